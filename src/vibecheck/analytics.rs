//! Aggregations over records: totals, today's net, the regret split and the
//! per-day breakdown. Pure functions, no store access.

use crate::model::{Amount, Kind, Record, NEUTRAL_SCORE};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Amount,
    pub expense: Amount,
    pub balance: Amount,
    pub count: usize,
}

/// Expense split by mood: scores below neutral count as regret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendingSplit {
    pub regret: Amount,
    pub good: Amount,
}

impl SpendingSplit {
    pub fn total(&self) -> Amount {
        self.regret + self.good
    }

    /// Share of spending that was regretted, `None` when nothing was spent.
    pub fn regret_ratio(&self) -> Option<f64> {
        let total = self.total().value();
        if total.is_zero() {
            return None;
        }
        (self.regret.value() / total).to_f64()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub spending: Amount,
    pub avg_mood: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub totals: Totals,
    pub today_net: Amount,
    pub today_happiness: u32,
    pub split: SpendingSplit,
    pub daily: Vec<DailyStat>,
}

pub fn totals(records: &[Record]) -> Totals {
    let income: Amount = records
        .iter()
        .filter(|r| r.kind == Kind::Income)
        .map(|r| r.amount)
        .sum();
    let expense: Amount = records
        .iter()
        .filter(|r| r.kind == Kind::Expense)
        .map(|r| r.amount)
        .sum();
    Totals {
        income,
        expense,
        balance: income - expense,
        count: records.len(),
    }
}

/// Signed sum (income minus expense) of the records dated `day`.
pub fn net_on(records: &[Record], day: NaiveDate) -> Amount {
    records
        .iter()
        .filter(|r| r.timestamp.date() == day)
        .map(Record::signed_amount)
        .sum()
}

/// Sum of the mood scores of the records dated `day`, income included.
pub fn happiness_on(records: &[Record], day: NaiveDate) -> u32 {
    records
        .iter()
        .filter(|r| r.timestamp.date() == day)
        .map(|r| u32::from(r.mood_score()))
        .sum()
}

pub fn spending_split(records: &[Record]) -> SpendingSplit {
    let mut split = SpendingSplit::default();
    for record in records.iter().filter(|r| r.kind == Kind::Expense) {
        if record.mood_score() < NEUTRAL_SCORE {
            split.regret = split.regret + record.amount;
        } else {
            split.good = split.good + record.amount;
        }
    }
    split
}

/// Expense total and mean mood score per calendar day, oldest day first.
///
/// The mood average covers every record of the day, income included.
pub fn daily(records: &[Record]) -> Vec<DailyStat> {
    let mut days: BTreeMap<NaiveDate, (Amount, u32, usize)> = BTreeMap::new();
    for record in records {
        let entry = days
            .entry(record.timestamp.date())
            .or_insert((Amount::ZERO, 0, 0));
        if record.kind == Kind::Expense {
            entry.0 = entry.0 + record.amount;
        }
        entry.1 += u32::from(record.mood_score());
        entry.2 += 1;
    }

    days.into_iter()
        .map(|(date, (spending, score_sum, count))| DailyStat {
            date,
            spending,
            avg_mood: f64::from(score_sum) / count as f64,
            count,
        })
        .collect()
}

pub fn summarize(records: &[Record], today: NaiveDate) -> Summary {
    Summary {
        totals: totals(records),
        today_net: net_on(records, today),
        today_happiness: happiness_on(records, today),
        split: spending_split(records),
        daily: daily(records),
    }
}

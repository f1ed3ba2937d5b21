//! # Data Model
//!
//! A [`Record`] is one ledger entry: when it happened, whether money went out
//! or came in, how much, a free-form note and a single-glyph mood tag.
//!
//! Records are immutable values. They only come into existence through
//! [`RecordStore::append`](crate::store::RecordStore::append) and are only
//! destroyed in bulk by a reset; the ledger file is the database.
//!
//! ## Timestamps
//!
//! Timestamps are local wall-clock times at second precision. They are kept
//! as [`NaiveDateTime`] so that formatting and parsing are exact inverses: the
//! file never records an offset, and reattaching the local zone on read would
//! be ambiguous around DST transitions.
//!
//! ## Amounts
//!
//! [`Amount`] wraps a [`Decimal`] and always renders with exactly two fraction
//! digits using `.` and no grouping separators. Parsing tolerates `,` grouping.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Expense or income classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Expense,
    Income,
}

impl Kind {
    /// Signed multiplier applied to an amount when computing balances.
    pub fn sign(self) -> Decimal {
        match self {
            Kind::Expense => Decimal::NEGATIVE_ONE,
            Kind::Income => Decimal::ONE,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Expense => write!(f, "expense"),
            Kind::Income => write!(f, "income"),
        }
    }
}

/// Fixed-point money value, two fraction digits when rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to two fraction digits (banker's rounding).
    pub fn rounded(&self) -> Amount {
        Amount(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        )
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.rounded().0;
        value.rescale(2);
        write!(f, "{}", value)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    /// Only `,` grouping is stripped. Whitespace and `_` are rejected even
    /// though `Decimal` would take `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().any(|c| c == '_' || c.is_whitespace()) {
            return Err(rust_decimal::Error::ErrorString(format!(
                "invalid amount '{}'",
                s
            )));
        }
        let normalized: String = s.chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&normalized).map(Amount)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

/// One persisted ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub kind: Kind,
    pub amount: Amount,
    pub note: String,
    pub mood_tag: String,
}

impl Record {
    pub fn new(
        timestamp: NaiveDateTime,
        kind: Kind,
        amount: Amount,
        note: impl Into<String>,
        mood_tag: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            amount,
            note: note.into(),
            mood_tag: mood_tag.into(),
        }
    }

    /// Amount with the sign implied by the kind (expenses negative).
    pub fn signed_amount(&self) -> Amount {
        Amount(self.amount.value() * self.kind.sign())
    }

    pub fn mood(&self) -> Option<Mood> {
        Mood::from_tag(&self.mood_tag)
    }

    /// Happiness score of the record's mood, neutral for unknown tags.
    pub fn mood_score(&self) -> u8 {
        mood_score(&self.mood_tag)
    }
}

/// Truncates a local instant to the second, the precision records carry.
pub fn to_record_time(instant: DateTime<Local>) -> NaiveDateTime {
    let naive = instant.naive_local();
    naive.with_nanosecond(0).unwrap_or(naive)
}

/// The current local time at record precision.
pub fn now() -> NaiveDateTime {
    to_record_time(Local::now())
}

/// Mood categories offered when recording an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    RegretlessJoy,
    ImpulseTax,
    RevengeSpending,
    Sad,
    Neutral,
    Happy,
}

pub const NEUTRAL_SCORE: u8 = 3;

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::RegretlessJoy,
        Mood::ImpulseTax,
        Mood::RevengeSpending,
        Mood::Sad,
        Mood::Neutral,
        Mood::Happy,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::RegretlessJoy => "🥳",
            Mood::ImpulseTax => "🤡",
            Mood::RevengeSpending => "😤",
            Mood::Sad => "😢",
            Mood::Neutral => "😐",
            Mood::Happy => "😀",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::RegretlessJoy => "regretless-joy",
            Mood::ImpulseTax => "impulse-tax",
            Mood::RevengeSpending => "revenge-spending",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mood::RegretlessJoy => "Regretless Joy",
            Mood::ImpulseTax => "Impulse Tax",
            Mood::RevengeSpending => "Revenge Spending",
            Mood::Sad => "Sad Spending",
            Mood::Neutral => "Meh",
            Mood::Happy => "Happy",
        }
    }

    /// Happiness score, 1 (worst) to 5 (best).
    pub fn score(self) -> u8 {
        match self {
            Mood::RegretlessJoy => 5,
            Mood::Happy => 4,
            Mood::Neutral => 3,
            Mood::ImpulseTax => 2,
            Mood::RevengeSpending | Mood::Sad => 1,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.emoji() == tag)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Mood {
    type Err = String;

    /// Accepts the kebab-case name, the title (case-insensitive) or the emoji.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| {
                m.emoji() == needle
                    || m.name().eq_ignore_ascii_case(needle)
                    || m.title().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown mood '{}'", needle))
    }
}

/// Score for an arbitrary stored tag.
pub fn mood_score(tag: &str) -> u8 {
    Mood::from_tag(tag).map_or(NEUTRAL_SCORE, Mood::score)
}

use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vibecheck::analytics::Summary;
use vibecheck::api::{CmdMessage, MessageLevel};
use vibecheck::codec::format_timestamp;
use vibecheck::config::LedgerConfig;
use vibecheck::model::{self, Amount, Kind, Mood, Record};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 12;
const EMPTY_NOTE: &str = "—";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_records(records: &[Record]) {
    for record in records {
        let mood = if record.mood_tag.is_empty() {
            "  ".to_string()
        } else {
            record.mood_tag.clone()
        };
        let mood_pad = 2usize.saturating_sub(mood.width());

        let amount = format_signed(record);
        let amount_colored = match record.kind {
            Kind::Expense => amount.red(),
            Kind::Income => amount.green(),
        };

        let note = if record.note.is_empty() {
            EMPTY_NOTE
        } else {
            record.note.as_str()
        };
        let fixed_width = 2 + 1 + AMOUNT_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let note_display = truncate_to_width(note, available);
        let padding = available.saturating_sub(note_display.width());

        println!(
            "{}{} {}  {}{}{}",
            mood,
            " ".repeat(mood_pad),
            amount_colored,
            note_display,
            " ".repeat(padding),
            format_time_ago(record).dimmed()
        );
    }
}

pub(super) fn print_summary(summary: &Summary) {
    let totals = &summary.totals;
    println!("{}", "Balance".bold());
    println!("  {:<14}{}", "Income", totals.income.to_string().green());
    println!("  {:<14}{}", "Expense", totals.expense.to_string().red());
    println!("  {:<14}{}", "Balance", colored_signed(totals.balance));
    println!("  {:<14}{}", "Today", colored_signed(summary.today_net));
    println!("  {:<14}+{}", "Today's vibe", summary.today_happiness);
    println!("  {:<14}{}", "Records", totals.count);

    println!();
    println!("{}", "Spending by mood".bold());
    let split = &summary.split;
    let ratio = split
        .regret_ratio()
        .map(|r| format!(" ({:.0}%)", r * 100.0))
        .unwrap_or_default();
    println!("  {:<14}{}{}", "Regret tax", split.regret.to_string().red(), ratio.dimmed());
    println!("  {:<14}{}", "Good vibes", split.good.to_string().green());

    if summary.daily.is_empty() {
        return;
    }
    println!();
    println!("{}", "Daily".bold());
    for day in &summary.daily {
        println!(
            "  {}  {:>width$}  mood {:.1}",
            day.date.format("%Y-%m-%d"),
            day.spending.to_string(),
            day.avg_mood,
            width = AMOUNT_WIDTH
        );
    }
}

pub(super) fn print_paths(paths: &[std::path::PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

pub(super) fn print_config(config: &LedgerConfig) {
    println!("recent-limit: {}", config.recent_limit);
}

pub(super) fn print_moods() {
    for mood in Mood::ALL {
        println!(
            "{}  {:<18}{:<18}{}",
            mood.emoji(),
            mood.name(),
            mood.title().dimmed(),
            "★".repeat(usize::from(mood.score()))
        );
    }
}

fn format_signed(record: &Record) -> String {
    let sign = match record.kind {
        Kind::Expense => '-',
        Kind::Income => '+',
    };
    format!("{:>width$}", format!("{}{}", sign, record.amount), width = AMOUNT_WIDTH)
}

fn colored_signed(amount: Amount) -> colored::ColoredString {
    if amount.value().is_sign_negative() {
        amount.to_string().red()
    } else {
        amount.to_string().green()
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Relative time for the last day, the stored timestamp beyond that.
fn format_time_ago(record: &Record) -> String {
    let elapsed = model::now().signed_duration_since(record.timestamp);
    let text = match elapsed.to_std() {
        Ok(duration) if elapsed.num_hours() < 24 => Formatter::new().convert(duration),
        _ => format_timestamp(&record.timestamp)[..16].to_string(),
    };
    format!("{:>width$}", text, width = TIME_WIDTH)
}

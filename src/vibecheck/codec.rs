//! # Record Codec
//!
//! Pure conversion between [`Record`] values and lines of the ledger file.
//!
//! ```text
//! 时间|类型|价格|备注|心情
//! 2024-01-01 10:00:00|支出|12.50|a/b c|🥳
//! ```
//!
//! The first line is a fixed header and is never data. Every data line has
//! five `|`-separated fields: timestamp, kind token, amount, note, mood tag.
//!
//! [`parse_line`] returns `None` for anything it cannot read. Callers drop
//! such lines so one damaged entry never hides the rest of the history.

use crate::model::{Amount, Kind, Record};
use chrono::NaiveDateTime;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

pub const DELIMITER: char = '|';
pub const DELIMITER_SUBSTITUTE: char = '/';
pub const HEADER: &str = "时间|类型|价格|备注|心情";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const EXPENSE_TOKEN: &str = "支出";
pub const INCOME_TOKEN: &str = "收入";

const FIELD_COUNT: usize = 5;

pub fn kind_token(kind: Kind) -> &'static str {
    match kind {
        Kind::Expense => EXPENSE_TOKEN,
        Kind::Income => INCOME_TOKEN,
    }
}

pub fn kind_from_token(token: &str) -> Option<Kind> {
    match token {
        EXPENSE_TOKEN => Some(Kind::Expense),
        INCOME_TOKEN => Some(Kind::Income),
        _ => None,
    }
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp, accepting only the exact rendering `format_timestamp`
/// would produce (no missing zero padding, no trailing fraction).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()?;
    (format_timestamp(&parsed) == s).then_some(parsed)
}

/// Makes free text safe for a single field.
///
/// Line breaks become spaces, delimiters become `/`, outer whitespace goes.
pub fn sanitize_note(note: &str) -> String {
    note.chars()
        .map(|c| match c {
            '\n' | '\r' => ' ',
            DELIMITER => DELIMITER_SUBSTITUTE,
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// First user-perceived character of a mood tag, sanitized like a note.
pub fn first_grapheme(tag: &str) -> String {
    let clean = sanitize_note(tag);
    clean.graphemes(true).next().unwrap_or_default().to_string()
}

/// Renders one record as a newline-terminated data line.
///
/// Fields are written as given; `RecordStore::append` sanitizes before
/// building the record, which is what keeps the line well-formed.
pub fn serialize(record: &Record) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}\n",
        format_timestamp(&record.timestamp),
        kind_token(record.kind),
        record.amount,
        record.note,
        record.mood_tag,
        d = DELIMITER,
    )
}

/// Parses one data line. Returns `None` if the line is malformed.
///
/// Extra trailing fields are ignored; empty fields are kept.
pub fn parse_line(line: &str) -> Option<Record> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }

    let timestamp = parse_timestamp(fields[0])?;
    let kind = kind_from_token(fields[1])?;
    let amount = Amount::from_str(fields[2]).ok()?;

    Some(Record {
        timestamp,
        kind,
        amount,
        note: fields[3].to_string(),
        mood_tag: fields[4].to_string(),
    })
}

/// Data lines of a ledger file: blank lines skipped, first line (header) dropped.
pub fn data_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().filter(|l| !l.is_empty()).skip(1)
}

/// Content of a freshly created or reset ledger file.
pub fn header_content() -> String {
    format!("{}\n", HEADER)
}

// src/process/date.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DateParseError;

static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)(?:st|nd|rd|th)\b").unwrap());
static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());
static DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Month tokens the sheet writes with a trailing period, normalized to the
/// abbreviations chrono's `%b` accepts. Anything else passes through.
const DOTTED_MONTHS: &[(&str, &str)] = &[
    ("Jan.", "Jan"),
    ("Feb.", "Feb"),
    ("Mar.", "Mar"),
    ("Apr.", "Apr"),
    ("Jun.", "Jun"),
    ("Jul.", "Jul"),
    ("Aug.", "Aug"),
    ("Sept.", "Sep"),
    ("Sep.", "Sep"),
    ("Oct.", "Oct"),
    ("Nov.", "Nov"),
    ("Dec.", "Dec"),
];

/// Strip ordinal suffixes and parenthetical notes, normalize dotted month
/// abbreviations.
fn clean(raw: &str) -> String {
    let s = ORDINAL_RE.replace_all(raw, "$1");
    let s = PAREN_RE.replace_all(&s, "");
    let mut s = s.trim().to_string();
    for (dotted, plain) in DOTTED_MONTHS {
        if s.contains(dotted) {
            s = s.replace(dotted, plain);
        }
    }
    s
}

/// Parse "<month> <day>" against abbreviated then full month names.
fn parse_single(s: &str, year: i32) -> Option<NaiveDate> {
    let s = s.trim();
    // a date needs a numeric day; bare month tokens are not dates
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let with_year = format!("{} {}", s, year);
    ["%b %d %Y", "%B %d %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
}

/// Normalize a free-text date field into a (start, end) date pair for the
/// given year. A hyphen marks a day range; the end date reuses the start
/// month unless the right-hand side names its own.
pub fn parse_date_span(raw: &str, year: i32) -> Result<(NaiveDate, NaiveDate), DateParseError> {
    let err = || DateParseError {
        raw: raw.to_string(),
    };
    let cleaned = clean(raw);

    let Some((left, right)) = cleaned.split_once('-') else {
        let date = parse_single(&cleaned, year).ok_or_else(err)?;
        return Ok((date, date));
    };

    let month = left.split_whitespace().next().ok_or_else(err)?;
    let start_day = DAY_RE.find_iter(left).last().ok_or_else(err)?.as_str();
    let end_day = DAY_RE.find(right).ok_or_else(err)?.as_str();
    let end_month = right
        .split_whitespace()
        .find(|t| t.chars().all(char::is_alphabetic))
        .unwrap_or(month);

    let start = parse_single(&format!("{} {}", month, start_day), year).ok_or_else(err)?;
    let end = parse_single(&format!("{} {}", end_month, end_day), year).ok_or_else(err)?;
    if end < start {
        return Err(err());
    }
    Ok((start, end))
}

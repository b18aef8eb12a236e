// src/process/time.rs

use chrono::NaiveTime;

use crate::error::TimeParseError;

/// Accepted grammars, tried in order: "10:30am", then "10am".
const TIME_FORMATS: &[&str] = &["%I:%M%p", "%I%p"];

fn parse_token(token: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(token, fmt).ok())
}

/// Normalize a free-text time field into a (start, end) pair, or `None`
/// when the sheet lists no specific time. A hyphen splits the field; a
/// single token serves as both start and end.
pub fn parse_time_span(
    raw: Option<&str>,
) -> Result<Option<(NaiveTime, NaiveTime)>, TimeParseError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    let mut parts = raw.split('-').map(str::trim);
    let first = parts.next().unwrap_or(raw);
    let last = parts.last().unwrap_or(first);

    let start = parse_token(first).ok_or_else(|| TimeParseError {
        raw: first.to_string(),
    })?;
    let end = parse_token(last).ok_or_else(|| TimeParseError {
        raw: last.to_string(),
    })?;
    Ok(Some((start, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn absent_or_blank_means_no_specific_time() {
        assert_eq!(parse_time_span(None).unwrap(), None);
        assert_eq!(parse_time_span(Some("")).unwrap(), None);
        assert_eq!(parse_time_span(Some("   ")).unwrap(), None);
    }

    #[test]
    fn single_token_is_both_start_and_end() {
        assert_eq!(
            parse_time_span(Some("10am")).unwrap(),
            Some((hm(10, 0), hm(10, 0)))
        );
        assert_eq!(
            parse_time_span(Some("6:15pm")).unwrap(),
            Some((hm(18, 15), hm(18, 15)))
        );
    }

    #[test]
    fn hyphen_ranges_with_mixed_grammars() {
        assert_eq!(
            parse_time_span(Some("10am-11:30am")).unwrap(),
            Some((hm(10, 0), hm(11, 30)))
        );
        assert_eq!(
            parse_time_span(Some("12pm-1pm")).unwrap(),
            Some((hm(12, 0), hm(13, 0)))
        );
    }

    #[test]
    fn tokens_are_trimmed_before_parsing() {
        assert_eq!(
            parse_time_span(Some(" 10am - 11am ")).unwrap(),
            Some((hm(10, 0), hm(11, 0)))
        );
    }

    #[test]
    fn unparseable_tokens_fail_with_the_offending_text() {
        let err = parse_time_span(Some("13:99pm")).unwrap_err();
        assert_eq!(err.raw, "13:99pm");

        let err = parse_time_span(Some("10am-sundown")).unwrap_err();
        assert_eq!(err.raw, "sundown");
    }

    #[test]
    fn twenty_four_hour_notation_is_rejected() {
        assert!(parse_time_span(Some("19:30")).is_err());
        assert!(parse_time_span(Some("10")).is_err());
    }
}

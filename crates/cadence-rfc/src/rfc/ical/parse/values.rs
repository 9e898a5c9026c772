//! Parsers for the DTSTART line, the RRULE line, and their values.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::build::{DTSTART, RRULE};
use crate::rfc::ical::core::{DailyRecurrence, FloatingDateTime, Weekday, WeekdaySet};

/// ## Summary
/// Parses the two-line `DTSTART` / `RRULE` rule text.
///
/// Lines may be separated by LF or CRLF. Rule parts may appear in any order
/// but each of FREQ, BYDAY and UNTIL must appear exactly once.
///
/// ## Errors
/// Returns a positioned `ParseError` for anything outside the subset.
pub fn parse_rule(s: &str) -> ParseResult<DailyRecurrence> {
    let lines: Vec<&str> = s
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let [dtstart_line, rrule_line] = lines.as_slice() else {
        return Err(ParseError::new(ParseErrorKind::InvalidLineCount, lines.len(), 1)
            .with_context(format!("found {} line(s)", lines.len())));
    };

    let dtstart_value = property_value(dtstart_line, DTSTART, 1)?;
    let dtstart = parse_floating(dtstart_value, 1, DTSTART.len() + 2)?;

    let rrule_value = property_value(rrule_line, RRULE, 2)?;
    let (by_day, until) = parse_rrule(rrule_value, 2, RRULE.len() + 2)?;

    tracing::trace!(%dtstart, %by_day, %until, "Parsed recurrence rule");

    Ok(DailyRecurrence::new(dtstart, by_day, until))
}

/// Splits `NAME:value`, checking the name against `expected`.
fn property_value<'a>(line: &'a str, expected: &str, line_no: usize) -> ParseResult<&'a str> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_no, 1))?;

    if let Some((base, _params)) = name.split_once(';')
        && base.eq_ignore_ascii_case(expected)
    {
        return Err(
            ParseError::new(ParseErrorKind::UnsupportedParameter, line_no, base.len() + 1)
                .with_context(name.to_string()),
        );
    }

    if !name.eq_ignore_ascii_case(expected) {
        return Err(ParseError::new(ParseErrorKind::UnexpectedProperty, line_no, 1)
            .with_context(format!("expected {expected}, found {name}")));
    }

    Ok(value)
}

/// Parses a `YYYYMMDDTHHMMSSZ` value.
fn parse_floating(s: &str, line: usize, col: usize) -> ParseResult<FloatingDateTime> {
    FloatingDateTime::parse_basic(s).ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidDateTime, line, col).with_context(s.to_string())
    })
}

/// Parses the RRULE value into its BYDAY set and UNTIL bound.
fn parse_rrule(s: &str, line: usize, start_col: usize) -> ParseResult<(WeekdaySet, FloatingDateTime)> {
    let mut freq_seen = false;
    let mut by_day: Option<WeekdaySet> = None;
    let mut until: Option<FloatingDateTime> = None;

    let mut col = start_col;
    for part in s.split(';') {
        let (key, value) = part.split_once('=').ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context(part.to_string())
        })?;
        let value_col = col + key.len() + 1;
        let duplicate = || {
            ParseError::new(ParseErrorKind::DuplicateRulePart, line, col).with_context(key.to_string())
        };

        match key.to_ascii_uppercase().as_str() {
            "FREQ" => {
                if freq_seen {
                    return Err(duplicate());
                }
                if !value.eq_ignore_ascii_case("DAILY") {
                    return Err(ParseError::new(ParseErrorKind::InvalidFrequency, line, value_col)
                        .with_context(value.to_string()));
                }
                freq_seen = true;
            }
            "BYDAY" => {
                if by_day.is_some() {
                    return Err(duplicate());
                }
                by_day = Some(parse_byday(value, line, value_col)?);
            }
            "UNTIL" => {
                if until.is_some() {
                    return Err(duplicate());
                }
                until = Some(parse_floating(value, line, value_col)?);
            }
            _ => {
                return Err(ParseError::new(ParseErrorKind::UnsupportedRulePart, line, col)
                    .with_context(key.to_string()));
            }
        }

        col += part.len() + 1;
    }

    let missing = |name: &str| {
        ParseError::new(ParseErrorKind::MissingRulePart, line, start_col).with_context(name.to_string())
    };
    if !freq_seen {
        return Err(missing("FREQ"));
    }
    let by_day = by_day.ok_or_else(|| missing("BYDAY"))?;
    let until = until.ok_or_else(|| missing("UNTIL"))?;

    Ok((by_day, until))
}

/// ## Summary
/// Parses a BYDAY value of plain two-letter weekday tokens (`MO,WE,FR`).
///
/// Ordinal forms such as `1MO` are rejected. Repeated tokens collapse.
///
/// ## Errors
/// Returns an error if a token is not a weekday or the list is empty.
pub fn parse_byday(s: &str, line: usize, col: usize) -> ParseResult<WeekdaySet> {
    if s.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyByDay, line, col));
    }

    let mut set = WeekdaySet::new();
    let mut token_col = col;
    for token in s.split(',') {
        let weekday = Weekday::parse(&token.to_ascii_uppercase()).ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidWeekday, line, token_col)
                .with_context(token.to_string())
        })?;
        set.insert(weekday);
        token_col += token.len() + 1;
    }

    Ok(set)
}

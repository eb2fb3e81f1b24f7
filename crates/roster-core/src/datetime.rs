//! Free-form date-of-birth parsing.
//!
//! Source files carry dates in whatever shape the person typing them liked:
//! `13-Jan-98`, `Jan 13 1998`, `1998-01-13`, `01/13/1998`, `13/01/1998`,
//! `Jan 1998`, `1998`. Parsing works on tokens split on `-`, `/` and
//! spaces, so the separator never matters.
//!
//! # Rules
//!
//! - Month names: full English names, three-letter abbreviations, `Sept`.
//! - Weekday names are ignored.
//! - Numeric `a/b/c` is read month-first, falling back to day-first when
//!   `a` cannot be a month.
//! - A four-digit leading token means year-first (`Y-M-D`, `Y-M`).
//! - Two-digit years pivot on the reference year: the most recent year not
//!   after it (`98` at 2026 is 1998, `13` is 2013).
//! - Partial dates default to the first of the month / January 1st.

use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Month(u32),
    Number(&'a str),
}

/// Removes everything except ASCII letters, digits, `-`, `/` and spaces.
pub fn sanitize_date_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | ' '))
        .collect()
}

/// Parses a free-form date, resolving two-digit years against `reference_year`.
///
/// Returns `None` for anything that does not name an existing calendar date.
pub fn parse_dob_text(text: &str, reference_year: i32) -> Option<NaiveDate> {
    let cleaned = sanitize_date_text(text);
    let mut tokens = Vec::new();
    for raw in cleaned.split(['-', '/', ' ']).filter(|t| !t.is_empty()) {
        if is_weekday(raw) {
            continue;
        }
        tokens.push(classify(raw)?);
    }

    let year = |digits: &str| resolve_year(digits, reference_year);

    match tokens.as_slice() {
        [Token::Number(d), Token::Month(m), Token::Number(y)] => date(year(y)?, *m, small(d)?),
        [Token::Month(m), Token::Number(d), Token::Number(y)] => date(year(y)?, *m, small(d)?),
        [Token::Number(a), Token::Number(b), Token::Number(c)] if a.len() == 4 => {
            date(year(a)?, small(b)?, small(c)?)
        }
        [Token::Number(a), Token::Number(b), Token::Number(c)] => {
            let (first, second, y) = (small(a)?, small(b)?, year(c)?);
            if (1..=12).contains(&first) {
                date(y, first, second)
            } else {
                date(y, second, first)
            }
        }
        [Token::Number(y), Token::Month(m)] if y.len() == 4 => date(year(y)?, *m, 1),
        [Token::Number(y), Token::Number(m)] if y.len() == 4 => date(year(y)?, small(m)?, 1),
        [Token::Month(m), Token::Number(y)] => date(year(y)?, *m, 1),
        [Token::Number(y)] if y.len() == 4 => date(year(y)?, 1, 1),
        _ => None,
    }
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn classify(token: &str) -> Option<Token<'_>> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Token::Number(token));
    }
    month_number(token).map(Token::Month)
}

fn month_number(token: &str) -> Option<u32> {
    let lower = token.to_ascii_lowercase();
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
        .and_then(|index| u32::try_from(index + 1).ok())
}

fn is_weekday(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    WEEKDAYS
        .iter()
        .any(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
}

/// Day or month component: one or two digits.
fn small(digits: &str) -> Option<u32> {
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    digits.parse().ok()
}

fn resolve_year(digits: &str, reference_year: i32) -> Option<i32> {
    match digits.len() {
        4 => digits.parse().ok(),
        2 => {
            let short: i32 = digits.parse().ok()?;
            let century = reference_year.div_euclid(100) * 100;
            let candidate = century + short;
            Some(if candidate > reference_year {
                candidate - 100
            } else {
                candidate
            })
        }
        _ => None,
    }
}

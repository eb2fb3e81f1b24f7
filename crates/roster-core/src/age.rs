//! Age estimation from tagged dates of birth.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use roster_model::Dob;

use crate::datetime::parse_dob_text;

/// Oldest age reported; anything above is treated as a data error.
pub const MAX_AGE: u32 = 100;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MILLIS_PER_YEAR: f64 = 365.25 * MILLIS_PER_DAY;

/// Day zero of spreadsheet serial dates.
fn serial_epoch() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Converts a spreadsheet day serial (fractions allowed) to an instant.
pub fn serial_to_datetime(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    // Beyond this chrono cannot represent the result anyway.
    if millis.abs() > 1.0e17 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    serial_epoch().checked_add_signed(delta)
}

/// Resolves a date of birth to an instant, or `None` when it has no valid date.
pub fn dob_instant(dob: &Dob, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match dob {
        Dob::Numeric(serial) => serial_to_datetime(*serial),
        Dob::Textual(text) => parse_dob_text(text, now.year())
            .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
        Dob::Absent => None,
    }
}

/// Whole years between the date of birth and `now`.
///
/// Years are 365.25 days, floored. Unknown dates and results outside
/// `0..=100` give `None`.
pub fn estimate_age(dob: &Dob, now: DateTime<Utc>) -> Option<u32> {
    let born = dob_instant(dob, now)?;
    let elapsed = now.signed_duration_since(born).num_milliseconds();
    let years = (elapsed as f64 / MILLIS_PER_YEAR).floor();
    if !(0.0..=f64::from(MAX_AGE)).contains(&years) {
        return None;
    }
    Some(years as u32)
}

/// [`estimate_age`] against the current time.
pub fn estimate_age_now(dob: &Dob) -> Option<u32> {
    estimate_age(dob, Utc::now())
}

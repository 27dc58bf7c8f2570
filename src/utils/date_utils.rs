//! Module for handling date parsing and date arithmetic.

use crate::error::{Result, ValidationError};
use chrono::{Datelike, NaiveDate};

/// Date formats tried in order when parsing record dates
pub const DATE_FORMATS: &[&str] = &[
    "%d %b %Y", // GEDCOM: 1 JAN 1970
    "%d %B %Y", // 1 January 1970
    "%Y-%m-%d", // ISO format: 1970-01-01
    "%d/%m/%Y", // 01/01/1970
    "%d.%m.%Y", // 01.01.1970
    "%Y%m%d",   // Compact: 19700101
];

/// Parse a date string with multiple format attempts
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::InvalidDate(text.to_string()))
}

/// Age in whole years at `as_of`
///
/// Calendar-aware: the year difference, minus one when `as_of` falls before
/// the birthday in its year. Returns `None` if `birth` is after `as_of`.
#[must_use]
pub fn age(birth: NaiveDate, as_of: NaiveDate) -> Option<u32> {
    if birth > as_of {
        return None;
    }

    let mut years = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}

/// Signed number of days from `a` to `b`
#[must_use]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

/// Format used when rendering exercise dates in responses, e.g. `Mon Jan 01 2024`
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Error)]
#[error("\"{value}\" is not a valid date. Expected YYYY-MM-DD")]
pub struct DateParseError {
    pub value: String,
}

/// Parses a calendar date from user input.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (the date part is kept) or the
/// display format produced by [display_date].
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|d| d.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(value, DISPLAY_DATE_FORMAT))
        .map_err(|_| DateParseError {
            value: value.to_owned(),
        })
}

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

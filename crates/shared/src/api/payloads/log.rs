use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    types::{parse_date, Uuid},
};

/// Raw query string of a log request. Empty values count as absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Parsed log bounds. `from` and `to` are inclusive
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u64>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl LogQuery {
    pub fn into_filter(self) -> Result<LogFilter, ValidationError> {
        let mut error_messages = Vec::new();

        let mut date = |name: &str, value: &Option<String>| match present(value).map(parse_date) {
            None => None,
            Some(Ok(date)) => Some(date),
            Some(Err(e)) => {
                error_messages.push(format!("{name}: {e}"));
                None
            },
        };
        let from = date("from", &self.from);
        let to = date("to", &self.to);

        let limit = match present(&self.limit).map(str::parse::<u64>) {
            None => None,
            Some(Ok(limit)) => Some(limit),
            Some(Err(_)) => {
                error_messages.push("limit must be a non-negative integer".to_owned());
                None
            },
        };

        ValidationError::check(error_messages)?;
        Ok(LogFilter { from, to, limit })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Number of entries in `log`
    pub count: usize,
    pub log: Vec<LogEntry>,
}

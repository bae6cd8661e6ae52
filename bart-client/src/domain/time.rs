//! Date and time query parameters.
//!
//! The API takes dates as `mm/dd/yyyy` (or the words `today` / `now`) and
//! times as `h:mm` followed by `am` or `pm`. Response times are passed
//! through as the strings the API returns.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use super::DomainError;

/// Date parameter for schedule and route queries.
///
/// # Examples
///
/// ```
/// use bart_client::domain::QueryDate;
/// use chrono::NaiveDate;
///
/// let date = QueryDate::On(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap());
/// assert_eq!(date.to_string(), "07/04/2026");
/// assert_eq!(QueryDate::Today.to_string(), "today");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDate {
    Today,
    Now,
    On(NaiveDate),
}

impl FromStr for QueryDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "today" => Ok(QueryDate::Today),
            "now" => Ok(QueryDate::Now),
            _ => NaiveDate::parse_from_str(trimmed, "%m/%d/%Y")
                .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
                .map(QueryDate::On)
                .map_err(|_| DomainError::InvalidDate(s.to_string())),
        }
    }
}

impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDate::Today => f.write_str("today"),
            QueryDate::Now => f.write_str("now"),
            QueryDate::On(date) => write!(f, "{}", date.format("%m/%d/%Y")),
        }
    }
}

/// Format a time the way the API expects it, e.g. `2:05pm`.
pub fn format_query_time(time: NaiveTime) -> String {
    time.format("%-I:%M%P").to_string()
}

/// Parse a query time from `h:mm am/pm` or 24-hour `HH:MM`.
pub fn parse_query_time(s: &str) -> Result<NaiveTime, DomainError> {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    NaiveTime::parse_from_str(&compact, "%I:%M%p")
        .or_else(|_| NaiveTime::parse_from_str(&compact, "%H:%M"))
        .map_err(|_| DomainError::InvalidTime(s.to_string()))
}

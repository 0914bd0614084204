//! Calendar date type used to stamp observations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{TailRiskError, TailRiskResult};

/// A calendar date attached to a price or derived observation.
///
/// Newtype over `chrono::NaiveDate`; daily series carry no time of day.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::types::Date;
///
/// let date = Date::parse("2018-01-02").unwrap();
/// assert_eq!(date.year(), 2018);
/// assert_eq!(date.add_days(1).to_string(), "2018-01-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> TailRiskResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| {
                TailRiskError::invalid_parameter(
                    "date",
                    format!("{year}-{month:02}-{day:02} is not a calendar date"),
                )
            })
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `TailRiskError::InvalidParameter` if the string is not a valid date.
    pub fn parse(s: &str) -> TailRiskResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| TailRiskError::invalid_parameter("date", format!("cannot parse '{s}'")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns true if the date falls on a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Date;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2018, 1, 2).unwrap();
        assert_eq!(date.year(), 2018);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 2);
    }

    #[test]
    fn test_invalid_date() {
        let err = Date::from_ymd(2023, 2, 30).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_parse() {
        let date = Date::parse("2024-12-31").unwrap();
        assert_eq!(date, Date::from_ymd(2024, 12, 31).unwrap());
        assert!(Date::parse(" 2024-12-31 ").is_ok());
        assert!(Date::parse("31/12/2024").is_err());
    }

    #[test]
    fn test_days_between_and_operators() {
        let a = Date::from_ymd(2024, 2, 28).unwrap();
        let b = a + 2;
        assert_eq!(b, Date::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(a.days_between(&b), 2);
        assert_eq!(b - a, 2);
    }

    #[test]
    fn test_weekend() {
        // 2024-01-06 is a Saturday
        assert!(Date::from_ymd(2024, 1, 6).unwrap().is_weekend());
        assert!(!Date::from_ymd(2024, 1, 8).unwrap().is_weekend());
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(2018, 1, 2).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2018-01-02\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }
}

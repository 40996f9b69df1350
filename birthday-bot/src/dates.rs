//! Month/day parsing, validation and formatting.
//!
//! Birthdays are recurring, so only the month and day are kept. The canonical
//! form is a zero-padded `MM-DD` string, which is also the on-disk format.

use std::fmt;

use chrono::{Datelike, Local};
use thiserror::Error;

/// English month names, indexed by month - 1
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Maximum day per month, indexed by month - 1.
/// February is capped at 29 regardless of the year.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Why a date string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date format! Use MM/DD (e.g., 01/31).")]
    WrongFormat,

    #[error("Month and day must be numbers! Use MM/DD (e.g., 01/31).")]
    NotNumeric,

    #[error("Invalid month! Month must be between 01 and 12.")]
    MonthOutOfRange,

    #[error("Invalid day for month {month}!")]
    DayOutOfRange { month: u32 },
}

/// A calendar-valid month and day with no year component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Build from numeric parts, enforcing the month and day ranges
    pub fn new(month: u32, day: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::MonthOutOfRange);
        }
        let max_day = DAYS_IN_MONTH[(month - 1) as usize];
        if day < 1 || day > max_day {
            return Err(DateError::DayOutOfRange { month });
        }
        Ok(Self { month, day })
    }

    /// Parse user input in `MM/DD` or `MM-DD` form.
    ///
    /// Single-digit parts are accepted (`3/5` is March 5th).
    pub fn parse(text: &str) -> Result<Self, DateError> {
        let parts: Vec<&str> = text.trim().split(['/', '-']).collect();
        let [month, day] = parts.as_slice() else {
            return Err(DateError::WrongFormat);
        };

        let month = parse_number(month)?;
        let day = parse_number(day)?;
        Self::new(month, day)
    }

    /// Re-hydrate a stored canonical `MM-DD` string
    pub fn from_canonical(text: &str) -> Result<Self, DateError> {
        Self::parse(text)
    }

    /// Parse the long form produced by [`MonthDay::long_form`], e.g. `March 05`
    pub fn from_long_form(text: &str) -> Result<Self, DateError> {
        let mut words = text.split_whitespace();
        let (Some(name), Some(day), None) = (words.next(), words.next(), words.next()) else {
            return Err(DateError::WrongFormat);
        };

        let month = MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .ok_or(DateError::MonthOutOfRange)?;

        Self::new(month as u32 + 1, parse_number(day)?)
    }

    /// Today's local wall-clock month and day
    pub fn today() -> Self {
        let now = Local::now();
        // Every real date is inside the table; Feb 29 included.
        Self {
            month: now.month(),
            day: now.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Human-friendly form, e.g. `March 05`
    pub fn long_form(&self) -> String {
        format!("{} {:02}", MONTH_NAMES[(self.month - 1) as usize], self.day)
    }

    /// Slash-separated form used in confirmations, e.g. `03/05`
    pub fn slash_form(&self) -> String {
        format!("{:02}/{:02}", self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl std::str::FromStr for MonthDay {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_number(part: &str) -> Result<u32, DateError> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateError::NotNumeric);
    }
    // Digit strings too long for u32 are out of range for both fields
    Ok(part.parse().unwrap_or(u32::MAX))
}

//! Date parsing and inclusive date ranges
//!
//! Dates are entered as `dd.mm.yyyy`; a range is two such dates joined by a
//! dash, e.g. `01.10.2023-31.10.2023`.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::{WalletError, WalletResult};

/// The only accepted input format for dates
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a `dd.mm.yyyy` date
pub fn parse_date(s: &str) -> WalletResult<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| WalletError::InvalidDate(trimmed.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A closed interval of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Fails with `InvalidDate` when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> WalletResult<Self> {
        if start > end {
            return Err(WalletError::InvalidDate(format!(
                "{}-{}",
                format_date(start),
                format_date(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering one day
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Both ends inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl FromStr for DateRange {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (start, end) = trimmed
            .split_once('-')
            .ok_or_else(|| WalletError::InvalidDate(trimmed.to_string()))?;

        Self::new(parse_date(start)?, parse_date(end)?)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_date(self.start), format_date(self.end))
    }
}

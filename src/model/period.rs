use crate::Result;
use anyhow::bail;
use chrono::{Datelike, Month, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// English month names, indexed by `month - 1`. The dashboard's period
/// selector offers exactly these.
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

/// A calendar month/year selection used to scope a report.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period. `month` is 1-based; anything outside `1..=12` is
    /// rejected.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("month must be in 1..=12, got {month}");
        }
        Ok(Self { year, month })
    }

    /// The period a given date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses an English month name, e.g. `"March"`. Matching is
    /// case-insensitive and accepts three-letter abbreviations.
    pub fn from_month_name(year: i32, name: &str) -> Result<Self> {
        match name.parse::<Month>() {
            Ok(month) => Ok(Self {
                year,
                month: month.number_from_month(),
            }),
            Err(_) => bail!("'{name}' is not a month name"),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The English name of the period's month.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// True if `date` falls within this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

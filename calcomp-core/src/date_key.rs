//! Date keys for the aggregate and year-agnostic `MM-DD` templates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalCompError, CalCompResult};

/// A concrete calendar day, rendered as `YYYY-MM-DD`.
///
/// Always a real date for its year: construction goes through
/// `NaiveDate`, so `2027-02-29` cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl FromStr for DateKey {
    type Err = CalCompError;

    fn from_str(s: &str) -> CalCompResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateKey)
            .map_err(|_| {
                CalCompError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD", s))
            })
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A recurring `MM-DD` date with no year attached.
///
/// Only the shape is checked here (month 1-12, day 1-31); whether the day
/// exists is decided when the template is bound to a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> CalCompResult<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(CalCompError::InvalidDate(format!(
                "month {} day {} is out of range",
                month, day
            )));
        }
        Ok(MonthDay { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The concrete date in `year`, or `None` if it does not exist that year.
    pub fn bind(&self, year: i32) -> Option<DateKey> {
        DateKey::from_ymd(year, self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = CalCompError;

    fn from_str(s: &str) -> CalCompResult<Self> {
        let invalid = || CalCompError::InvalidDate(format!("'{}'. Expected MM-DD", s));

        let (month, day) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        MonthDay::new(month, day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Bind `MM-DD` templates to `year`.
///
/// Templates that name a day the year does not have (`02-29` outside leap
/// years) are dropped without error.
pub fn bind_year<V: Clone>(year: i32, templates: &BTreeMap<MonthDay, V>) -> BTreeMap<DateKey, V> {
    templates
        .iter()
        .filter_map(|(md, value)| md.bind(year).map(|key| (key, value.clone())))
        .collect()
}

//! Per-date holiday records and the aggregate they are collected into.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date_key::{DateKey, MonthDay, bind_year};

/// One labelled, coloured line on a calendar day.
///
/// `colour` is a display token (a named colour or hex) and is never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub label: String,
    pub colour: String,
}

impl HolidayEntry {
    pub fn new(label: impl Into<String>, colour: impl Into<String>) -> Self {
        HolidayEntry {
            label: label.into(),
            colour: colour.into(),
        }
    }
}

/// The two record shapes sources are allowed to use.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourceRecord {
    Multi { entries: Vec<HolidayEntry> },
    Legacy { label: String, colour: String },
}

/// All entries for one date, in insertion order.
///
/// Deserialises from either [`SourceRecord`] shape, so legacy
/// `{label, colour}` records are normalised once at ingestion and never
/// seen by the merge logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SourceRecord")]
pub struct DayRecord {
    pub entries: Vec<HolidayEntry>,
}

impl From<SourceRecord> for DayRecord {
    fn from(record: SourceRecord) -> Self {
        match record {
            SourceRecord::Multi { entries } => DayRecord { entries },
            SourceRecord::Legacy { label, colour } => DayRecord {
                entries: vec![HolidayEntry { label, colour }],
            },
        }
    }
}

impl From<HolidayEntry> for DayRecord {
    fn from(entry: HolidayEntry) -> Self {
        DayRecord {
            entries: vec![entry],
        }
    }
}

impl DayRecord {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &HolidayEntry) -> bool {
        self.entries.contains(entry)
    }
}

/// Year-agnostic layer keyed by `MM-DD`.
pub type TemplateMap = BTreeMap<MonthDay, DayRecord>;

/// A template layer as read from disk, before its keys are checked.
pub type RawTemplate = BTreeMap<String, DayRecord>;

/// Parse the keys of a raw layer. Keys that are not a plausible `MM-DD`
/// (`04-32`, `13-01`, a full `YYYY-MM-DD`) are skipped with a warning.
pub fn parse_template(raw: RawTemplate) -> TemplateMap {
    raw.into_iter()
        .filter_map(|(key, record)| match key.parse::<MonthDay>() {
            Ok(month_day) => Some((month_day, record)),
            Err(e) => {
                warn!(key = %key, error = %e, "Skipping template date");
                None
            }
        })
        .collect()
}

/// The per-date structure threaded through the whole pipeline.
///
/// Iterates in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateMap(BTreeMap<DateKey, DayRecord>);

impl AggregateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a template layer to `year`, dropping dates that year lacks.
    pub fn from_template(year: i32, templates: &TemplateMap) -> Self {
        AggregateMap(bind_year(year, templates))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: &DateKey) -> Option<&DayRecord> {
        self.0.get(date)
    }

    pub fn entries_on(&self, date: &DateKey) -> &[HolidayEntry] {
        self.0.get(date).map(|r| r.entries.as_slice()).unwrap_or(&[])
    }

    /// Append an entry, creating the day record on first insertion.
    pub fn push(&mut self, date: DateKey, entry: HolidayEntry) {
        self.0.entry(date).or_default().entries.push(entry);
    }

    /// Append every entry of `other` whose exact `(label, colour)` pair is
    /// not already present on that date.
    ///
    /// Unlike [`crate::merge::merge`] this never rewrites existing entries.
    pub fn append_unique(&mut self, other: AggregateMap) {
        for (date, record) in other {
            for entry in record.entries {
                self.push_unique(date, entry);
            }
        }
    }

    /// Push `entry` unless the exact pair is already on `date`.
    pub fn push_unique(&mut self, date: DateKey, entry: HolidayEntry) {
        let day = self.0.entry(date).or_default();
        if !day.contains(&entry) {
            day.entries.push(entry);
        }
    }

    pub fn record_mut(&mut self, date: DateKey) -> &mut DayRecord {
        self.0.entry(date).or_default()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DateKey, DayRecord> {
        self.0.iter()
    }

    /// Total number of entries across all dates.
    pub fn entry_count(&self) -> usize {
        self.0.values().map(|r| r.entries.len()).sum()
    }
}

impl IntoIterator for AggregateMap {
    type Item = (DateKey, DayRecord);
    type IntoIter = btree_map::IntoIter<DateKey, DayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregateMap {
    type Item = (&'a DateKey, &'a DayRecord);
    type IntoIter = btree_map::Iter<'a, DateKey, DayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(DateKey, DayRecord)> for AggregateMap {
    fn from_iter<I: IntoIterator<Item = (DateKey, DayRecord)>>(iter: I) -> Self {
        AggregateMap(iter.into_iter().collect())
    }
}

impl From<BTreeMap<DateKey, DayRecord>> for AggregateMap {
    fn from(map: BTreeMap<DateKey, DayRecord>) -> Self {
        AggregateMap(map)
    }
}

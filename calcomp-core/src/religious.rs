//! Classification of religious-holiday API responses by faith.
//!
//! The response shape is Calendarific's `holidays` endpoint; only the fields
//! used for classification are modelled.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::date_key::DateKey;
use crate::holiday::{AggregateMap, HolidayEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReligiousResponse {
    #[serde(default)]
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub holidays: Vec<ApiHoliday>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiHoliday {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: ApiDate,
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    #[serde(default)]
    pub primary_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDate {
    pub iso: String,
}

impl ApiDate {
    /// The calendar date, ignoring any time-of-day part.
    pub fn date_key(&self) -> Option<DateKey> {
        self.iso.get(..10)?.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faith {
    Jewish,
    Muslim,
    Christian,
    Hindu,
    Buddhist,
}

/// Keyword table, checked in order; the first hit decides the faith.
const KEYWORDS: &[(&str, Faith)] = &[
    ("jewish", Faith::Jewish),
    ("hebrew", Faith::Jewish),
    ("muslim", Faith::Muslim),
    ("islamic", Faith::Muslim),
    ("christian", Faith::Christian),
    ("orthodox", Faith::Christian),
    ("hindu", Faith::Hindu),
    ("buddh", Faith::Buddhist),
];

impl Faith {
    pub fn colour(self) -> &'static str {
        match self {
            Faith::Jewish => "#D28800",
            Faith::Muslim => "green",
            Faith::Christian => "purple",
            Faith::Hindu => "#AD9200",
            Faith::Buddhist => "saddlebrown",
        }
    }

    /// Match against primary type, type list, name and description,
    /// case-insensitively.
    pub fn detect(holiday: &ApiHoliday) -> Option<Faith> {
        let primary = holiday.primary_type.to_lowercase();
        let types: Vec<String> = holiday.types.iter().map(|t| t.to_lowercase()).collect();
        let name = holiday.name.to_lowercase();
        let description = holiday.description.to_lowercase();

        KEYWORDS.iter().find_map(|&(keyword, faith)| {
            let hit = primary.contains(keyword)
                || types.iter().any(|t| t.contains(keyword))
                || name.contains(keyword)
                || description.contains(keyword);
            hit.then_some(faith)
        })
    }
}

/// Bucket every classifiable holiday by date and faith.
///
/// Distinct names landing in the same bucket are joined with a newline
/// unless the name already appears in the bucket's label.
pub fn classify(response: &ReligiousResponse) -> AggregateMap {
    let mut buckets: Vec<(DateKey, Faith, String)> = Vec::new();

    for holiday in &response.response.holidays {
        let Some(faith) = Faith::detect(holiday) else {
            continue;
        };
        let Some(date) = holiday.date.date_key() else {
            warn!(iso = %holiday.date.iso, name = %holiday.name, "Skipping holiday with unparseable date");
            continue;
        };

        match buckets.iter_mut().find(|(d, f, _)| *d == date && *f == faith) {
            Some((_, _, label)) => {
                if !label.contains(&holiday.name) {
                    label.push('\n');
                    label.push_str(&holiday.name);
                }
            }
            None => buckets.push((date, faith, holiday.name.clone())),
        }
    }

    let mut out = AggregateMap::new();
    for (date, faith, label) in buckets {
        out.push(date, HolidayEntry::new(label, faith.colour()));
    }

    debug!(days = out.len(), "Classified religious holidays");
    out
}

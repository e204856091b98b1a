//! The boundary between the pipeline and wherever holiday data comes from.
//!
//! Providers hand back data already normalised into [`DayRecord`] shape,
//! so nothing past this point deals with file formats or transport.
//!
//! [`DayRecord`]: crate::holiday::DayRecord

mod fs;
mod memory;

pub use fs::FsSourceProvider;
pub use memory::MemorySource;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::date_key::DateKey;
use crate::error::CalCompResult;
use crate::holiday::{AggregateMap, TemplateMap};
use crate::religious::ReligiousResponse;
use crate::rules::RuleBook;

/// Key used in region data for "the whole country".
pub const NATIONAL_KEY: &str = "NATIONAL";

/// Year-agnostic event layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLayer {
    UkEvents,
    Custom,
    Retro,
    Official,
    SemiOfficial,
    Fun,
}

impl TemplateLayer {
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateLayer::UkEvents => "uk_events.json",
            TemplateLayer::Custom => "custom_events.json",
            TemplateLayer::Retro => "retro_days.json",
            TemplateLayer::Official => "official_days.json",
            TemplateLayer::SemiOfficial => "semi_official_days.json",
            TemplateLayer::Fun => "fun_days.json",
        }
    }
}

/// Cultural days grouped by country code, or `ALL` for every country.
pub type CulturalDays = BTreeMap<String, TemplateMap>;

/// Group in [`CulturalDays`] that applies regardless of country.
pub const ALL_COUNTRIES: &str = "ALL";

pub type NamedDays = BTreeMap<DateKey, String>;

/// One country's public holidays, nationally and per subdivision.
///
/// Deserialises from `{"NATIONAL": {date: name}, "<SUBDIV>": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, NamedDays>")]
pub struct CountryHolidays {
    pub national: NamedDays,
    pub subdivisions: BTreeMap<String, NamedDays>,
}

impl From<BTreeMap<String, NamedDays>> for CountryHolidays {
    fn from(mut raw: BTreeMap<String, NamedDays>) -> Self {
        let national = raw.remove(NATIONAL_KEY).unwrap_or_default();
        CountryHolidays {
            national,
            subdivisions: raw,
        }
    }
}

impl CountryHolidays {
    pub fn is_empty(&self) -> bool {
        self.national.is_empty() && self.subdivisions.values().all(|days| days.is_empty())
    }
}

/// Display colours for countries and their subdivisions.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub countries: BTreeMap<String, String>,
    pub regions: BTreeMap<String, BTreeMap<String, String>>,
}

impl Palette {
    pub fn country_colour(&self, country: &str) -> Option<&str> {
        self.countries.get(country).map(String::as_str)
    }

    /// `subdivision` of `None` looks up the national colour.
    pub fn region_colour(&self, country: &str, subdivision: Option<&str>) -> Option<&str> {
        self.regions
            .get(country)?
            .get(subdivision.unwrap_or(NATIONAL_KEY))
            .map(String::as_str)
    }
}

/// Everything the pipeline reads.
///
/// Optional data that is absent comes back empty; only genuinely broken
/// sources are errors.
pub trait SourceProvider {
    fn template_layer(&mut self, layer: TemplateLayer) -> CalCompResult<TemplateMap>;

    fn cultural_days(&mut self) -> CalCompResult<CulturalDays>;

    fn country_holidays(&mut self, country: &str) -> CalCompResult<CountryHolidays>;

    fn palette(&mut self) -> CalCompResult<Palette>;

    fn variable_rules(&mut self) -> CalCompResult<RuleBook>;

    /// Religious holidays for `year`, already classified by faith.
    fn religious_holidays(&mut self, year: i32, country: &str) -> CalCompResult<AggregateMap>;
}

/// Transport for the religious-holiday API.
pub trait ReligiousFetch {
    fn fetch(&self, year: i32, country: &str) -> CalCompResult<ReligiousResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_holidays_split_national() {
        let json = r#"{
            "NATIONAL": {"2026-12-25": "Christmas Day"},
            "NSW": {"2026-08-03": "Bank Holiday"}
        }"#;
        let parsed: CountryHolidays = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.national.len(), 1);
        assert_eq!(parsed.subdivisions.len(), 1);
        assert!(parsed.subdivisions.contains_key("NSW"));
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_palette_lookup() {
        let mut palette = Palette::default();
        palette.countries.insert("FR".into(), "blue".into());
        palette.regions.insert(
            "AU".into(),
            [("NATIONAL".to_string(), "#AD9200".to_string()), ("VIC".to_string(), "crimson".to_string())]
                .into_iter()
                .collect(),
        );

        assert_eq!(palette.country_colour("FR"), Some("blue"));
        assert_eq!(palette.country_colour("DE"), None);
        assert_eq!(palette.region_colour("AU", None), Some("#AD9200"));
        assert_eq!(palette.region_colour("AU", Some("VIC")), Some("crimson"));
        assert_eq!(palette.region_colour("AU", Some("TAS")), None);
    }
}

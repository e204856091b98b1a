use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{info, warn};

use super::{
    CountryHolidays, CulturalDays, Palette, ReligiousFetch, SourceProvider, TemplateLayer,
};
use crate::cache::JsonCache;
use crate::error::{CalCompError, CalCompResult};
use crate::export::save_json;
use crate::holiday::{AggregateMap, RawTemplate, TemplateMap, parse_template};
use crate::religious::classify;
use crate::rules::RuleBook;

/// Reads every source from a config directory laid out as:
///
/// ```text
/// <config>/events/{uk_events,custom_events,retro_days,...}.json
/// <config>/events/cultural_days.json
/// <config>/holidays/<CC>.json
/// <config>/iso_country_colours.json
/// <config>/region_colours.json
/// <config>/rules/variable_rules.json
/// <config>/calendarific_multifaith_<year>.json   (religious cache)
/// ```
pub struct FsSourceProvider {
    config_dir: PathBuf,
    cache: JsonCache,
    fetcher: Option<Box<dyn ReligiousFetch>>,
}

impl FsSourceProvider {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        FsSourceProvider {
            config_dir: config_dir.into(),
            cache: JsonCache::new(),
            fetcher: None,
        }
    }

    /// Used when the religious cache for a year is missing or unreadable.
    pub fn with_fetcher(mut self, fetcher: impl ReligiousFetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn religious_cache_path(&self, year: i32) -> PathBuf {
        self.config_dir
            .join(format!("calendarific_multifaith_{}.json", year))
    }

    fn events_path(&self, file_name: &str) -> PathBuf {
        self.config_dir.join("events").join(file_name)
    }
}

impl SourceProvider for FsSourceProvider {
    fn template_layer(&mut self, layer: TemplateLayer) -> CalCompResult<TemplateMap> {
        let path = self.events_path(layer.file_name());
        let raw: RawTemplate = self.cache.load_optional(&path)?;
        Ok(parse_template(raw))
    }

    fn cultural_days(&mut self) -> CalCompResult<CulturalDays> {
        let path = self.events_path("cultural_days.json");
        let raw: BTreeMap<String, RawTemplate> = self.cache.load_optional(&path)?;

        Ok(raw
            .into_iter()
            .map(|(group, days)| (group, parse_template(days)))
            .collect())
    }

    fn country_holidays(&mut self, country: &str) -> CalCompResult<CountryHolidays> {
        let path = self
            .config_dir
            .join("holidays")
            .join(format!("{}.json", country.to_uppercase()));
        self.cache.load_optional(&path)
    }

    fn palette(&mut self) -> CalCompResult<Palette> {
        let countries: BTreeMap<String, String> = self
            .cache
            .load_optional(&self.config_dir.join("iso_country_colours.json"))?;
        let regions: BTreeMap<String, BTreeMap<String, String>> = self
            .cache
            .load_optional(&self.config_dir.join("region_colours.json"))?;

        Ok(Palette { countries, regions })
    }

    fn variable_rules(&mut self) -> CalCompResult<RuleBook> {
        let path = self.config_dir.join("rules").join("variable_rules.json");
        let book: RuleBook = self.cache.load_optional(&path)?;

        Ok(book
            .into_iter()
            .map(|(code, rules)| (code.to_uppercase(), rules))
            .collect())
    }

    fn religious_holidays(&mut self, year: i32, country: &str) -> CalCompResult<AggregateMap> {
        let path = self.religious_cache_path(year);

        if path.exists() {
            match self.cache.load::<AggregateMap>(&path) {
                Ok(cached) => {
                    info!(path = %path.display(), "Loaded religious holidays from cache");
                    return Ok(cached);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Religious cache unreadable, fetching fresh data");
                    self.cache.invalidate(&path);
                }
            }
        }

        let fetcher = self.fetcher.as_ref().ok_or_else(|| {
            CalCompError::Fetch("No religious-holiday fetcher configured".to_string())
        })?;

        info!(year, country, "Fetching religious holidays");
        let response = fetcher.fetch(year, country)?;
        let classified = classify(&response);

        save_json(&classified, &path, true)?;
        info!(path = %path.display(), "Saved religious holidays to cache");

        Ok(classified)
    }
}

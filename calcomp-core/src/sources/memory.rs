use std::collections::BTreeMap;

use super::{CountryHolidays, CulturalDays, Palette, SourceProvider, TemplateLayer};
use crate::error::CalCompResult;
use crate::holiday::{AggregateMap, TemplateMap};
use crate::rules::RuleBook;

/// A provider holding all of its data in memory.
///
/// Anything not set is empty, the same as a missing optional file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub layers: Vec<(TemplateLayer, TemplateMap)>,
    pub cultural: CulturalDays,
    pub countries: BTreeMap<String, CountryHolidays>,
    pub palette: Palette,
    pub rules: RuleBook,
    pub religious: BTreeMap<i32, AggregateMap>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: TemplateLayer, days: TemplateMap) -> Self {
        self.layers.retain(|(l, _)| *l != layer);
        self.layers.push((layer, days));
        self
    }
}

impl SourceProvider for MemorySource {
    fn template_layer(&mut self, layer: TemplateLayer) -> CalCompResult<TemplateMap> {
        Ok(self
            .layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, days)| days.clone())
            .unwrap_or_default())
    }

    fn cultural_days(&mut self) -> CalCompResult<CulturalDays> {
        Ok(self.cultural.clone())
    }

    fn country_holidays(&mut self, country: &str) -> CalCompResult<CountryHolidays> {
        Ok(self
            .countries
            .get(&country.to_uppercase())
            .cloned()
            .unwrap_or_default())
    }

    fn palette(&mut self) -> CalCompResult<Palette> {
        Ok(self.palette.clone())
    }

    fn variable_rules(&mut self) -> CalCompResult<RuleBook> {
        Ok(self.rules.clone())
    }

    fn religious_holidays(&mut self, year: i32, _country: &str) -> CalCompResult<AggregateMap> {
        Ok(self.religious.get(&year).cloned().unwrap_or_default())
    }
}

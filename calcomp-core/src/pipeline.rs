//! The full build: every enabled layer merged into one [`AggregateMap`].

use tracing::{debug, info};

use crate::error::CalCompResult;
use crate::holiday::{AggregateMap, HolidayEntry, TemplateMap};
use crate::merge::{CONFLICT_COLOUR, dedup_entries, merge};
use crate::rules::{RuleDiagnostic, build_variable_events};
use crate::settings::Settings;
use crate::sources::{
    ALL_COUNTRIES, CountryHolidays, CulturalDays, Palette, SourceProvider, TemplateLayer,
};
use crate::strategy::{NATIONAL, consolidate_regions, merge_identical};

const FALLBACK_COLOUR: &str = "grey";
const UK: &str = "GB";

/// Result of [`Pipeline::build`].
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub year: i32,
    pub holidays: AggregateMap,
    /// Rules that were configured but contributed nothing.
    pub diagnostics: Vec<RuleDiagnostic>,
}

pub struct Pipeline<P> {
    provider: P,
}

impl<P: SourceProvider> Pipeline<P> {
    pub fn new(provider: P) -> Self {
        Pipeline { provider }
    }

    pub fn build(&mut self, settings: &Settings) -> CalCompResult<BuildReport> {
        let year = settings.year;
        let include = &settings.include_days;
        let local_country = settings.local_country.to_uppercase();
        info!(year, local_country = %local_country, "Building holiday data");

        let mut holidays = self.country_layers(settings)?;
        debug!(entries = holidays.entry_count(), "Country holidays");

        let uk_events = self.template(year, TemplateLayer::UkEvents)?;
        merge(&mut holidays, uk_events);

        if include.religious {
            let religious = self.provider.religious_holidays(year, &local_country)?;
            debug!(days = religious.len(), "Religious holidays");
            merge(&mut holidays, religious);
        }

        if include.custom_events {
            merge(&mut holidays, self.template(year, TemplateLayer::Custom)?);
        }

        if include.retro {
            merge(&mut holidays, self.template(year, TemplateLayer::Retro)?);
        }

        if let Some(international) = &include.international {
            let mut combined = TemplateMap::new();
            for (layer, enabled) in [
                (TemplateLayer::Official, international.official),
                (TemplateLayer::SemiOfficial, international.semi_official),
                (TemplateLayer::Fun, international.fun),
            ] {
                if enabled {
                    combined.extend(self.provider.template_layer(layer)?);
                }
            }
            merge(&mut holidays, AggregateMap::from_template(year, &combined));
        }

        let rule_book = self.provider.variable_rules()?;
        let cultural = self.provider.cultural_days()?;
        let mut diagnostics = Vec::new();

        let mut rule_countries = vec![local_country.clone()];
        if include.country_list {
            for country in settings.listed_countries() {
                if !rule_countries.contains(&country) {
                    rule_countries.push(country);
                }
            }
        }

        for (i, country) in rule_countries.iter().enumerate() {
            let rules = rule_book.get(country).cloned().unwrap_or_default();
            let variable = build_variable_events(year, country, &rules);
            merge(&mut holidays, variable.events);
            diagnostics.extend(variable.diagnostics);

            if i == 0 {
                merge(&mut holidays, cultural_group(year, &cultural, ALL_COUNTRIES));
            }
            merge(&mut holidays, cultural_group(year, &cultural, country));
        }

        let holidays = dedup_entries(&holidays);
        let holidays = merge_identical(&holidays, settings.merge_identical_holidays, CONFLICT_COLOUR);

        info!(
            days = holidays.len(),
            entries = holidays.entry_count(),
            diagnostics = diagnostics.len(),
            "Holiday data built"
        );

        Ok(BuildReport {
            year,
            holidays,
            diagnostics,
        })
    }

    fn template(&mut self, year: i32, layer: TemplateLayer) -> CalCompResult<AggregateMap> {
        let days = self.provider.template_layer(layer)?;
        Ok(AggregateMap::from_template(year, &days))
    }

    /// National and regional public holidays, combined without rewriting
    /// anything already present.
    fn country_layers(&mut self, settings: &Settings) -> CalCompResult<AggregateMap> {
        let year = settings.year;
        let palette = self.provider.palette()?;
        let mut all = AggregateMap::new();

        if settings.include_days.uk_holidays {
            let uk = self.provider.country_holidays(UK)?;
            all.append_unique(uk_layer(year, &uk, &palette));
        }

        if !settings.include_days.country_list {
            return Ok(all);
        }

        let listed = settings.listed_countries();
        let (subdivided, plain): (Vec<String>, Vec<String>) = listed.into_iter().partition(|cc| {
            settings
                .subdivided_countries
                .iter()
                .any(|s| s.eq_ignore_ascii_case(cc))
        });

        for country in &subdivided {
            let days = self.provider.country_holidays(country)?;
            let layer = subdivided_layer(year, country, &days, &palette);
            all.append_unique(consolidate_regions(&layer));
        }

        for country in &plain {
            let days = self.provider.country_holidays(country)?;
            all.append_unique(country_layer(year, country, &days, &palette));
        }

        Ok(all)
    }
}

fn default_uk_colour(subdivision: &str) -> Option<&'static str> {
    match subdivision {
        "SCT" | "Scotland" => Some("blue"),
        "NIR" | "Northern Ireland" => Some("green"),
        "WLS" | "Wales" => Some("#D28800"),
        _ => None,
    }
}

/// UK holidays keep their bare names; the colour says where they apply.
fn uk_layer(year: i32, days: &CountryHolidays, palette: &Palette) -> AggregateMap {
    let mut out = AggregateMap::new();
    let national = palette.region_colour(UK, None).unwrap_or("red");

    for (date, name) in days.national.iter().filter(|(d, _)| d.year() == year) {
        out.push_unique(*date, HolidayEntry::new(name.as_str(), national));
    }

    for (subdivision, subdivision_days) in &days.subdivisions {
        let colour = palette
            .region_colour(UK, Some(subdivision))
            .or_else(|| default_uk_colour(subdivision))
            .unwrap_or(FALLBACK_COLOUR);

        for (date, name) in subdivision_days.iter().filter(|(d, _)| d.year() == year) {
            out.push_unique(*date, HolidayEntry::new(name.as_str(), colour));
        }
    }

    out
}

/// Labels every holiday with its subdivision, or `National`.
fn subdivided_layer(year: i32, country: &str, days: &CountryHolidays, palette: &Palette) -> AggregateMap {
    let mut out = AggregateMap::new();
    let national = palette.region_colour(country, None).unwrap_or(FALLBACK_COLOUR);

    for (date, name) in days.national.iter().filter(|(d, _)| d.year() == year) {
        let label = format!("{} ({})", name, NATIONAL);
        out.push_unique(*date, HolidayEntry::new(label, national));
    }

    for (subdivision, subdivision_days) in &days.subdivisions {
        let colour = palette
            .region_colour(country, Some(subdivision))
            .unwrap_or(FALLBACK_COLOUR);

        for (date, name) in subdivision_days.iter().filter(|(d, _)| d.year() == year) {
            let label = format!("{} ({})", name, subdivision);
            out.push_unique(*date, HolidayEntry::new(label, colour));
        }
    }

    out
}

/// Labels every national holiday with the country code.
fn country_layer(year: i32, country: &str, days: &CountryHolidays, palette: &Palette) -> AggregateMap {
    let colour = palette.country_colour(country).unwrap_or(FALLBACK_COLOUR);

    let mut out = AggregateMap::new();
    for (date, name) in days.national.iter().filter(|(d, _)| d.year() == year) {
        let label = format!("{} ({})", name, country);
        out.push_unique(*date, HolidayEntry::new(label, colour));
    }
    out
}

fn cultural_group(year: i32, cultural: &CulturalDays, group: &str) -> AggregateMap {
    cultural
        .get(group)
        .map(|days| AggregateMap::from_template(year, days))
        .unwrap_or_default()
}

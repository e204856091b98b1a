use std::collections::HashMap;

use crate::holiday::HolidayEntry;
use crate::label::{CanonicalKey, canonicalise, split_country_suffix};
use crate::merge::CONFLICT_COLOUR;
use crate::strategy::ConsolidationStrategy;

/// Folds entries naming the same holiday, possibly spelled differently, from
/// different sources or countries into one entry per holiday.
///
/// Entries are grouped by [`CanonicalKey`]; the first-seen name is kept for
/// display. Country codes are appended sorted. The colour is the most
/// frequent one in the group, ties going to whichever was seen first. A
/// group where no entry names a country keeps its colour only if all
/// entries agree, otherwise it gets the default colour.
#[derive(Debug, Clone)]
pub struct IdenticalHolidayMerger {
    default_colour: String,
}

impl Default for IdenticalHolidayMerger {
    fn default() -> Self {
        Self::new(CONFLICT_COLOUR)
    }
}

struct HolidayGroup {
    key: CanonicalKey,
    display_name: String,
    countries: Vec<Option<String>>,
    colours: Vec<String>,
}

impl IdenticalHolidayMerger {
    pub fn new(default_colour: &str) -> Self {
        IdenticalHolidayMerger {
            default_colour: default_colour.to_string(),
        }
    }

    fn resolve_colour(&self, group: &HolidayGroup) -> String {
        if group.countries.iter().all(Option::is_none) {
            let first = &group.colours[0];
            return if group.colours.iter().all(|c| c == first) {
                first.clone()
            } else {
                self.default_colour.clone()
            };
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for colour in &group.colours {
            *counts.entry(colour.as_str()).or_default() += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);

        group
            .colours
            .iter()
            .find(|c| counts.get(c.as_str()) == Some(&max))
            .cloned()
            .unwrap_or_else(|| self.default_colour.clone())
    }

    fn merged_label(group: &HolidayGroup) -> String {
        let mut codes: Vec<&str> = group.countries.iter().flatten().map(String::as_str).collect();
        codes.sort_unstable();
        codes.dedup();

        if codes.is_empty() {
            group.display_name.clone()
        } else {
            format!("{} ({})", group.display_name, codes.join(", "))
        }
    }
}

impl ConsolidationStrategy for IdenticalHolidayMerger {
    fn consolidate_day(&self, entries: &[HolidayEntry]) -> Vec<HolidayEntry> {
        let mut groups: Vec<HolidayGroup> = Vec::new();

        for entry in entries {
            let (name, country) = split_country_suffix(&entry.label);
            let key = canonicalise(&name);

            let index = match groups.iter().position(|g| g.key == key) {
                Some(i) => i,
                None => {
                    groups.push(HolidayGroup {
                        key,
                        display_name: name,
                        countries: Vec::new(),
                        colours: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            groups[index].countries.push(country);
            groups[index].colours.push(entry.colour.clone());
        }

        groups
            .iter()
            .map(|g| HolidayEntry::new(Self::merged_label(g), self.resolve_colour(g)))
            .collect()
    }
}

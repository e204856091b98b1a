use crate::holiday::HolidayEntry;
use crate::label::split_region_suffix;
use crate::strategy::ConsolidationStrategy;

/// Region used for entries that carry no suffix.
pub const NATIONAL: &str = "National";

/// Folds `Name (R1)`, `Name (R2)` into `Name (R1, R2)`.
///
/// Names must match exactly; there is no canonicalisation. The merged entry
/// takes the colour of the first entry in its group. Meant for a single
/// source's subdivision data, such as one country's states.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionConsolidator;

struct RegionGroup<'a> {
    name: &'a str,
    regions: Vec<&'a str>,
    colour: &'a str,
}

impl ConsolidationStrategy for RegionConsolidator {
    fn consolidate_day(&self, entries: &[HolidayEntry]) -> Vec<HolidayEntry> {
        let mut groups: Vec<RegionGroup> = Vec::new();

        for entry in entries {
            let (name, region) = split_region_suffix(&entry.label).unwrap_or((entry.label.as_str(), NATIONAL));

            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => {
                    if !group.regions.contains(&region) {
                        group.regions.push(region);
                    }
                }
                None => groups.push(RegionGroup {
                    name,
                    regions: vec![region],
                    colour: &entry.colour,
                }),
            }
        }

        groups
            .into_iter()
            .map(|g| HolidayEntry::new(format!("{} ({})", g.name, g.regions.join(", ")), g.colour))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;
    use crate::holiday::AggregateMap;
    use crate::strategy::consolidate_regions;

    #[test]
    fn test_same_name_regions_fold_together() {
        let date: DateKey = "2026-12-25".parse().unwrap();
        let mut map = AggregateMap::new();
        map.push(date, HolidayEntry::new("Christmas Day (NSW)", "darkblue"));
        map.push(date, HolidayEntry::new("Christmas Day (VIC)", "darkblue"));

        let merged = consolidate_regions(&map);
        assert_eq!(
            merged.entries_on(&date),
            &[HolidayEntry::new("Christmas Day (NSW, VIC)", "darkblue")]
        );
    }

    #[test]
    fn test_first_colour_wins_and_regions_keep_order() {
        let entries = vec![
            HolidayEntry::new("Labour Day (WA)", "green"),
            HolidayEntry::new("Labour Day (QLD)", "teal"),
            HolidayEntry::new("Labour Day (WA)", "green"),
            HolidayEntry::new("Labour Day", "#AD9200"),
        ];

        let merged = RegionConsolidator.consolidate_day(&entries);
        assert_eq!(
            merged,
            vec![HolidayEntry::new("Labour Day (WA, QLD, National)", "green")]
        );
    }

    #[test]
    fn test_no_canonical_matching() {
        let entries = vec![
            HolidayEntry::new("King's Birthday (NSW)", "darkblue"),
            HolidayEntry::new("Kings Birthday (VIC)", "crimson"),
        ];

        let merged = RegionConsolidator.consolidate_day(&entries);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].label, "King's Birthday (NSW)");
        assert_eq!(merged[1].label, "Kings Birthday (VIC)");
    }

    #[test]
    fn test_unsuffixed_label_gets_national() {
        let merged = RegionConsolidator.consolidate_day(&[HolidayEntry::new("Australia Day", "#AD9200")]);
        assert_eq!(merged, vec![HolidayEntry::new("Australia Day (National)", "#AD9200")]);
    }
}

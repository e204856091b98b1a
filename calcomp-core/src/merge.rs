//! Folding one holiday layer into another.

use std::collections::HashSet;

use crate::holiday::{AggregateMap, DayRecord, HolidayEntry};
use crate::label::normalise_observed;

/// Colour used when the same label arrives with conflicting colours.
pub const CONFLICT_COLOUR: &str = "black";

/// Merge `additional` into `base` in place.
///
/// For every date in `additional`, the two entry lists are concatenated and
/// grouped by exact label text. A label seen with more than one distinct
/// colour is forced to [`CONFLICT_COLOUR`]. Dates only present in `base`
/// are left untouched.
pub fn merge(base: &mut AggregateMap, additional: AggregateMap) {
    for (date, record) in additional {
        let day = base.record_mut(date);
        let mut combined = std::mem::take(&mut day.entries);
        combined.extend(record.entries);
        day.entries = group_by_label(combined);
    }
}

fn group_by_label(entries: Vec<HolidayEntry>) -> Vec<HolidayEntry> {
    // (label, distinct colours), in first-seen label order
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for entry in entries {
        match groups.iter_mut().find(|(label, _)| *label == entry.label) {
            Some((_, colours)) => {
                if !colours.contains(&entry.colour) {
                    colours.push(entry.colour);
                }
            }
            None => groups.push((entry.label, vec![entry.colour])),
        }
    }

    groups
        .into_iter()
        .map(|(label, mut colours)| {
            let colour = if colours.len() > 1 {
                CONFLICT_COLOUR.to_string()
            } else {
                colours.swap_remove(0)
            };
            HolidayEntry { label, colour }
        })
        .collect()
}

/// Drop repeated `(label, colour)` pairs per date, first occurrence wins.
///
/// Labels have stacked `observed` suffixes collapsed before comparison.
/// Kept entries retain their original label text.
pub fn dedup_entries(map: &AggregateMap) -> AggregateMap {
    map.iter()
        .map(|(date, record)| {
            let mut seen = HashSet::new();
            let entries = record
                .entries
                .iter()
                .filter(|entry| seen.insert((normalise_observed(&entry.label), entry.colour.clone())))
                .cloned()
                .collect();
            (*date, DayRecord { entries })
        })
        .collect()
}

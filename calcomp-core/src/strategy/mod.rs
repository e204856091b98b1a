//! Strategies that rewrite each day's entry list into a smaller one.
//!
//! The two strategies have different contracts and are not interchangeable:
//!
//! | | [`RegionConsolidator`] | [`IdenticalHolidayMerger`] |
//! |---|---|---|
//! | match on | exact name text | [`CanonicalKey`](crate::label::CanonicalKey) |
//! | suffix | region, default `National` | country code, `(observed)` excluded |
//! | suffix order | first seen | sorted |
//! | colour | first entry's | most frequent, first seen on ties |

mod identical;
mod region;

pub use identical::IdenticalHolidayMerger;
pub use region::{NATIONAL, RegionConsolidator};

use crate::holiday::{AggregateMap, DayRecord, HolidayEntry};

pub trait ConsolidationStrategy {
    /// Fold one date's entries into their consolidated form.
    fn consolidate_day(&self, entries: &[HolidayEntry]) -> Vec<HolidayEntry>;

    /// Apply to every date, replacing each entry list wholesale.
    fn apply(&self, map: &AggregateMap) -> AggregateMap {
        map.iter()
            .map(|(date, record)| {
                let entries = self.consolidate_day(&record.entries);
                (*date, DayRecord { entries })
            })
            .collect()
    }
}

/// Merge same-named subdivision holidays of one source.
pub fn consolidate_regions(map: &AggregateMap) -> AggregateMap {
    RegionConsolidator.apply(map)
}

/// Merge the same holiday across sources and countries.
///
/// Returns the input unchanged when `enabled` is false.
pub fn merge_identical(map: &AggregateMap, enabled: bool, default_colour: &str) -> AggregateMap {
    if !enabled {
        return map.clone();
    }
    IdenticalHolidayMerger::new(default_colour).apply(map)
}

//! Holiday aggregation for calcomp.
//!
//! This crate turns many optional holiday sources into one per-date
//! structure:
//! - `holiday` and `date_key` for the shared data model
//! - `merge`, `label` and `strategy` for combining and reconciling entries
//! - `rules` for moveable feasts and country civil rules
//! - `sources` and `pipeline` for reading layers and running a full build

pub mod cache;
pub mod date_key;
pub mod error;
pub mod export;
pub mod holiday;
pub mod label;
pub mod merge;
pub mod pipeline;
pub mod religious;
pub mod rules;
pub mod settings;
pub mod sources;
pub mod strategy;

pub use date_key::{DateKey, MonthDay};
pub use error::{CalCompError, CalCompResult};
pub use holiday::{AggregateMap, DayRecord, HolidayEntry, TemplateMap};
pub use pipeline::{BuildReport, Pipeline};
pub use settings::Settings;

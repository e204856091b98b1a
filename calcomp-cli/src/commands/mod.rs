pub mod build;
pub mod easter;
pub mod rules;

use chrono::Datelike;

/// Year to use when none is given on the command line.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

use std::path::Path;

use anyhow::{Context, Result};
use calcomp_core::rules::build_variable_events;
use calcomp_core::sources::{FsSourceProvider, SourceProvider};
use owo_colors::OwoColorize;

use super::current_year;
use crate::render::Render;

pub fn run(country: &str, year: Option<i32>, config_dir: &Path) -> Result<()> {
    let year = year.unwrap_or_else(current_year);
    let country = country.to_uppercase();

    let mut provider = FsSourceProvider::new(config_dir);
    let book = provider
        .variable_rules()
        .with_context(|| format!("Failed to read rules from {}", config_dir.display()))?;

    let Some(rules) = book.get(&country) else {
        println!(
            "{}",
            format!("No rules configured for {}", country).yellow()
        );
        return Ok(());
    };

    let out = build_variable_events(year, &country, rules);

    println!("{}", format!("{} {}", country, year).bold());
    if out.events.is_empty() {
        println!("   {}", "(no rule-based holidays)".dimmed());
    }
    for (date, record) in &out.events {
        for entry in &record.entries {
            println!("   {} {}", date.to_string().dimmed(), entry.render());
        }
    }

    for diagnostic in &out.diagnostics {
        println!("   {}", diagnostic.render());
    }

    Ok(())
}

use anyhow::{Result, anyhow};
use calcomp_core::rules::christian_feasts;
use calcomp_core::rules::computus::{orthodox_easter, western_easter};
use owo_colors::OwoColorize;

use super::current_year;
use crate::render::Render;

pub fn run(year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(current_year);

    let western = western_easter(year).ok_or_else(|| anyhow!("No Western Easter for {}", year))?;
    let orthodox = orthodox_easter(year).ok_or_else(|| anyhow!("No Orthodox Easter for {}", year))?;

    println!("{}", format!("Easter {}", year).bold());
    println!("   Western   {}", western.format("%a %d %b").to_string().green());
    println!("   Orthodox  {}", orthodox.format("%a %d %b").to_string().green());
    println!();

    for (date, record) in &christian_feasts(year) {
        for entry in &record.entries {
            println!("   {} {}", date.to_string().dimmed(), entry.render());
        }
    }

    Ok(())
}

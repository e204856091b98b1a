//! Coloured terminal rendering for calcomp-core types.

use calcomp_core::holiday::HolidayEntry;
use calcomp_core::pipeline::BuildReport;
use calcomp_core::rules::RuleDiagnostic;
use chrono::Datelike;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Parse `#RRGGBB`. Named colours are left to the terminal's imagination.
fn hex_rgb(colour: &str) -> Option<(u8, u8, u8)> {
    let hex = colour.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn swatch(colour: &str) -> String {
    match hex_rgb(colour) {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => "■".dimmed().to_string(),
    }
}

impl Render for HolidayEntry {
    fn render(&self) -> String {
        let label = self.label.replace('\n', " / ");
        format!("{} {} {}", swatch(&self.colour), label, self.colour.dimmed())
    }
}

impl Render for RuleDiagnostic {
    fn render(&self) -> String {
        format!("{} {}", "!".yellow(), self.to_string().yellow())
    }
}

fn pluralize<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

impl Render for BuildReport {
    fn render(&self) -> String {
        let days = self.holidays.len();
        let entries = self.holidays.entry_count();

        let mut lines = vec![format!(
            "📅 {}  {} {}, {} {}",
            self.year.bold(),
            days,
            pluralize(days, "day", "days"),
            entries,
            pluralize(entries, "entry", "entries"),
        )];

        let mut per_month = [0usize; 12];
        for (date, record) in &self.holidays {
            per_month[date.date().month0() as usize] += record.entries.len();
        }
        let bars: Vec<String> = per_month
            .iter()
            .enumerate()
            .map(|(i, count)| format!("{:02}:{}", i + 1, count))
            .collect();
        lines.push(format!("   {}", bars.join(" ").dimmed()));

        for diagnostic in &self.diagnostics {
            lines.push(format!("   {}", diagnostic.render()));
        }

        lines.join("\n")
    }
}

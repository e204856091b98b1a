use std::path::PathBuf;

use anyhow::{Context, Result};
use calcomp_core::export::{export_csv, save_json};
use calcomp_core::settings::InternationalDays;
use calcomp_core::sources::FsSourceProvider;
use calcomp_core::{Pipeline, Settings};
use clap::Args;
use owo_colors::OwoColorize;

use crate::calendarific::CalendarificFetcher;
use crate::render::Render;
use crate::utils::tui::create_spinner;

/// Settings file location plus switches that override it.
///
/// Switches only ever turn layers on; anything not given keeps its value
/// from the settings file.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[arg(long, default_value = "config/settings.json")]
    pub settings: PathBuf,

    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    /// `.env` file consulted for the religious-holiday API key
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    #[arg(long)]
    pub year: Option<i32>,

    /// All international layers
    #[arg(long)]
    pub international: bool,

    /// Official international days only
    #[arg(long)]
    pub official: bool,

    #[arg(long)]
    pub semi_official: bool,

    /// Informal and novelty days
    #[arg(long)]
    pub fun: bool,

    /// Retro computing anniversaries
    #[arg(long)]
    pub retro: bool,

    #[arg(long)]
    pub religious: bool,

    #[arg(long)]
    pub uk_holidays: bool,

    #[arg(long)]
    pub custom_events: bool,

    /// Holidays and rules for every country in the settings' country list
    #[arg(long)]
    pub country_list: bool,

    /// Fold the same holiday from different countries into one entry
    #[arg(long)]
    pub merge_identical: bool,

    /// CSV output path [default: holiday_export_<year>.csv]
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also save the dataset as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// List every entry instead of a summary
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(year) = self.year {
            settings.year = year;
        }

        let include = &mut settings.include_days;
        if self.international {
            include.international = Some(InternationalDays::default());
        } else if self.official || self.semi_official || self.fun {
            let international = include.international.get_or_insert(InternationalDays {
                official: false,
                semi_official: false,
                fun: false,
            });
            international.official |= self.official;
            international.semi_official |= self.semi_official;
            international.fun |= self.fun;
        }

        include.retro |= self.retro;
        include.religious |= self.religious;
        include.uk_holidays |= self.uk_holidays;
        include.custom_events |= self.custom_events;
        include.country_list |= self.country_list;
        settings.merge_identical_holidays |= self.merge_identical;
    }
}

pub fn run(args: BuildArgs) -> Result<()> {
    let mut settings = Settings::load(&args.settings)
        .with_context(|| format!("Failed to load settings from {}", args.settings.display()))?;
    args.apply(&mut settings);
    let year = settings.year;

    let fetcher = CalendarificFetcher::new(settings.clone(), args.env_file.clone())?;
    let provider = FsSourceProvider::new(&args.config_dir).with_fetcher(fetcher);
    let mut pipeline = Pipeline::new(provider);

    let spinner = create_spinner(format!("Building holidays for {}", year));
    let result = pipeline.build(&settings);
    spinner.finish_and_clear();
    let report = result.context("Build failed")?;

    let csv_path = args
        .csv
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("holiday_export_{}.csv", year)));
    export_csv(&report.holidays, &csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    if let Some(json_path) = &args.json {
        save_json(&report.holidays, json_path, true)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
    }

    println!("{}", report.render());

    if args.verbose {
        for (date, record) in &report.holidays {
            for entry in &record.entries {
                println!("   {} {}", date.to_string().dimmed(), entry.render());
            }
        }
    }

    println!();
    println!("{}", format!("  Exported: {}", csv_path.display()).green());
    if let Some(json_path) = &args.json {
        println!("{}", format!("  Saved: {}", json_path.display()).green());
    }

    Ok(())
}

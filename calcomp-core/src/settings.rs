//! Build settings and API credential lookup.

use std::path::Path;

use chrono::Datelike;
use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CalCompError, CalCompResult};

/// Sentinel `api_key` value meaning "look in `.env` or the environment".
pub const USE_ENVIRONMENT: &str = "USE_ENVIRONMENT";

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn default_local_country() -> String {
    "GB".to_string()
}

fn default_subdivided_countries() -> Vec<String> {
    vec!["AU".to_string()]
}

fn enabled() -> bool {
    true
}

/// Contents of `settings.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "current_year")]
    pub year: i32,

    /// Country whose rule set always runs.
    #[serde(default = "default_local_country")]
    pub local_country: String,

    #[serde(default)]
    pub include_days: IncludeDays,

    #[serde(default)]
    pub include_country_list: IncludeCountryList,

    #[serde(default)]
    pub merge_identical_holidays: bool,

    /// Countries whose holidays are reported per subdivision and then
    /// folded together by region.
    #[serde(default = "default_subdivided_countries")]
    pub subdivided_countries: Vec<String>,

    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            year: current_year(),
            local_country: default_local_country(),
            include_days: IncludeDays::default(),
            include_country_list: IncludeCountryList::default(),
            merge_identical_holidays: false,
            subdivided_countries: default_subdivided_countries(),
            api_key: None,
        }
    }
}

/// Which layers to include. Everything is off unless switched on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeDays {
    #[serde(default)]
    pub uk_holidays: bool,
    #[serde(default)]
    pub country_list: bool,
    #[serde(default)]
    pub religious: bool,
    #[serde(default)]
    pub custom_events: bool,
    #[serde(default)]
    pub retro: bool,
    /// Present means the international layers are on.
    #[serde(default)]
    pub international: Option<InternationalDays>,
}

/// International observance layers. Each defaults to on.
#[derive(Debug, Clone, Deserialize)]
pub struct InternationalDays {
    #[serde(default = "enabled")]
    pub official: bool,
    #[serde(default = "enabled")]
    pub semi_official: bool,
    #[serde(default = "enabled")]
    pub fun: bool,
}

impl Default for InternationalDays {
    fn default() -> Self {
        InternationalDays {
            official: true,
            semi_official: true,
            fun: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeCountryList {
    #[serde(default)]
    pub countries: Vec<String>,
}

impl Settings {
    /// Load settings from a JSON file. A missing file is an error.
    pub fn load(path: &Path) -> CalCompResult<Self> {
        if !path.exists() {
            return Err(CalCompError::SettingsNotFound(path.to_path_buf()));
        }

        let settings: Settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(true))
            .build()
            .map_err(|e| CalCompError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalCompError::Config(e.to_string()))?;

        debug!(path = %path.display(), year = settings.year, "Loaded settings");
        Ok(settings)
    }

    /// Countries listed for inclusion, upper-cased, in listed order.
    pub fn listed_countries(&self) -> Vec<String> {
        self.include_country_list
            .countries
            .iter()
            .map(|c| c.to_uppercase())
            .collect()
    }
}

/// Find an API key: the settings value (unless it is [`USE_ENVIRONMENT`]),
/// then `key_name` in the `.env` file at `env_path`, then `key_name` in the
/// process environment.
pub fn resolve_api_key(settings: &Settings, key_name: &str, env_path: &Path) -> CalCompResult<String> {
    match settings.api_key.as_deref() {
        Some(key) if !key.is_empty() && key != USE_ENVIRONMENT => return Ok(key.to_string()),
        _ => {}
    }

    if let Ok(entries) = dotenvy::from_path_iter(env_path) {
        for (name, value) in entries.flatten() {
            if name == key_name && !value.is_empty() {
                debug!(path = %env_path.display(), "API key read from .env");
                return Ok(value);
            }
        }
    }

    match std::env::var(key_name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(CalCompError::MissingApiKey(key_name.to_string())),
    }
}

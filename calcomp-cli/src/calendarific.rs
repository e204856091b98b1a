//! Blocking client for Calendarific's religious-holiday endpoint.

use std::path::PathBuf;
use std::time::Duration;

use calcomp_core::error::{CalCompError, CalCompResult};
use calcomp_core::religious::ReligiousResponse;
use calcomp_core::settings::{Settings, resolve_api_key};
use calcomp_core::sources::ReligiousFetch;
use tracing::debug;

const API_URL: &str = "https://calendarific.com/api/v2/holidays";
const API_KEY_NAME: &str = "API_KEY";
const TIMEOUT_SECS: u64 = 30;

pub struct CalendarificFetcher {
    http: reqwest::blocking::Client,
    settings: Settings,
    env_path: PathBuf,
}

impl CalendarificFetcher {
    /// The API key is only looked up when a fetch actually happens, so a
    /// warm cache needs no credentials.
    pub fn new(settings: Settings, env_path: PathBuf) -> CalCompResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| CalCompError::Fetch(e.to_string()))?;

        Ok(CalendarificFetcher {
            http,
            settings,
            env_path,
        })
    }
}

impl ReligiousFetch for CalendarificFetcher {
    fn fetch(&self, year: i32, country: &str) -> CalCompResult<ReligiousResponse> {
        let api_key = resolve_api_key(&self.settings, API_KEY_NAME, &self.env_path)?;
        let year = year.to_string();

        debug!(country, year = %year, "GET {}", API_URL);

        // Errors are stripped of their URL, which carries the API key.
        let response = self
            .http
            .get(API_URL)
            .query(&[
                ("api_key", api_key.as_str()),
                ("country", country),
                ("year", year.as_str()),
                ("type", "religious"),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CalCompError::Fetch(e.without_url().to_string()))?;

        response
            .json::<ReligiousResponse>()
            .map_err(|e| CalCompError::Fetch(e.without_url().to_string()))
    }
}

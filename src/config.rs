use crate::error::{config_error, env_error, BoardResult};
use crate::utils::scheduler::RefreshPolicy;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Where the vehicle leaves from when no origin is configured
pub const DEFAULT_ORIGIN_ADDRESS: &str = "221 Corley Mill Rd, Lexington, SC 29072";

/// Default timezone used to decide what "today" is
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Refresh interval for the data widgets, in seconds
pub const DEFAULT_DATA_REFRESH_SECS: u64 = 30;

/// Refresh interval for the countdown, in seconds
pub const DEFAULT_COUNTDOWN_REFRESH_SECS: u64 = 1;

/// Widget enablement overrides
const WIDGETS_FILE: &str = "config/widgets.toml";

/// Main configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Published CSV feed holding the event schedule
    pub feed_url: String,
    /// Google Maps Platform key used for geocoding, routes and the map embed
    pub google_api_key: Option<String>,
    /// Origin address for the travel estimate
    pub origin_address: String,
    /// Timezone for "today" and all resolved instants
    pub timezone: String,
    /// Redis URL holding the shared travel estimate; in-memory when unset
    pub redis_url: Option<String>,
    /// Seconds between data widget refreshes
    pub data_refresh_interval: u64,
    /// Seconds between countdown redraws
    pub countdown_refresh_interval: u64,
    /// Base buffer in minutes added on top of travel time
    pub base_buffer_minutes: i64,
    /// What to do when a refresh tick finds a cycle still running
    pub refresh_policy: RefreshPolicy,
    /// Locale of the fixed display strings
    pub locale: String,
    /// Map of widget names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BoardResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        // Load widget configuration from file if it exists
        if let Ok(content) = fs::read_to_string(WIDGETS_FILE) {
            let file_components = toml::from_str::<HashMap<String, bool>>(&content)?;
            config.components.extend(file_components);
        }

        Ok(config)
    }

    /// Build a configuration from a variable lookup
    pub fn from_lookup<F>(lookup: F) -> BoardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let feed_url = value("FEED_CSV_URL").ok_or_else(|| env_error("FEED_CSV_URL"))?;

        let timezone = value("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        // Fail early on a bad zone name instead of on the first refresh
        parse_timezone(&timezone)?;

        let data_refresh_interval =
            parse_number(value("DATA_REFRESH_SECS"), "DATA_REFRESH_SECS", DEFAULT_DATA_REFRESH_SECS)?;
        let countdown_refresh_interval = parse_number(
            value("COUNTDOWN_REFRESH_SECS"),
            "COUNTDOWN_REFRESH_SECS",
            DEFAULT_COUNTDOWN_REFRESH_SECS,
        )?;
        if data_refresh_interval == 0 || countdown_refresh_interval == 0 {
            return Err(config_error("Refresh intervals must be at least one second"));
        }

        let base_buffer_minutes = parse_number(
            value("BASE_BUFFER_MINUTES"),
            "BASE_BUFFER_MINUTES",
            crate::components::departure::DEFAULT_BASE_BUFFER_MINUTES,
        )?;

        let refresh_policy = match value("REFRESH_POLICY") {
            Some(policy) => policy.parse::<RefreshPolicy>()?,
            None => RefreshPolicy::default(),
        };

        let mut components = HashMap::new();
        for widget in ["banner", "travel", "countdown"] {
            components.insert(widget.to_string(), true);
        }

        Ok(Config {
            feed_url,
            google_api_key: value("GOOGLE_API_KEY"),
            origin_address: value("ORIGIN_ADDRESS")
                .unwrap_or_else(|| DEFAULT_ORIGIN_ADDRESS.to_string()),
            timezone,
            redis_url: value("REDIS_URL"),
            data_refresh_interval,
            countdown_refresh_interval,
            base_buffer_minutes,
            refresh_policy,
            locale: value("DASHBOARD_LOCALE").unwrap_or_else(|| String::from("en")),
            components,
        })
    }

    /// Check if a widget is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Parsed timezone
    pub fn tz(&self) -> BoardResult<Tz> {
        parse_timezone(&self.timezone)
    }
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> BoardResult<Tz> {
    name.parse::<Tz>()
        .map_err(|e| config_error(&format!("Invalid TIMEZONE {}: {}", name, e)))
}

fn parse_number<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> BoardResult<T> {
    match raw {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| config_error(&format!("Invalid {} format: {}", key, raw))),
        None => Ok(default),
    }
}

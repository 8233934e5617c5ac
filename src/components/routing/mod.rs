//! Geocoding and drive-time lookup for the travel estimate.

mod google;
pub mod models;

pub use google::GoogleRoutesClient;
pub use models::Coordinates;

use crate::error::BoardResult;
use async_trait::async_trait;

/// External geocoding and routing service
#[async_trait]
pub trait RouteLookup: Send + Sync {
    /// Coordinates of an address, `None` when the service cannot place it
    async fn geocode(&self, address: &str) -> BoardResult<Option<Coordinates>>;

    /// Driving time as display text, e.g. `1 hr 5 min`
    async fn travel_time(&self, origin: Coordinates, destination: Coordinates) -> BoardResult<String>;

    /// Embeddable directions map between two addresses, when the service has one
    fn map_embed_url(&self, _origin: &str, _destination: &str) -> Option<String> {
        None
    }
}

/// Format a raw duration such as `165s` for display.
///
/// Under an hour it is rounded to whole minutes; otherwise whole hours plus
/// rounded leftover minutes. Values that are not a number of seconds are
/// returned as they came.
pub fn format_duration(raw: &str) -> String {
    let trimmed = raw.trim();
    let seconds = trimmed
        .strip_suffix(|c: char| c.eq_ignore_ascii_case(&'s'))
        .unwrap_or(trimmed)
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0);

    let Some(seconds) = seconds else {
        return raw.to_string();
    };
    let seconds = seconds.floor() as u64;

    if seconds < 3600 {
        format!("{} min", (seconds as f64 / 60.0).round() as u64)
    } else {
        let hours = seconds / 3600;
        let minutes = ((seconds % 3600) as f64 / 60.0).round() as u64;
        format!("{} hr {} min", hours, minutes)
    }
}

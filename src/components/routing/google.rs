use super::models::{Coordinates, GeocodeResponse, RoutesResponse};
use super::{format_duration, RouteLookup};
use crate::error::{routing_error, BoardResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const ROUTES_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";
const EMBED_URL: &str = "https://www.google.com/maps/embed/v1/directions";

/// Google Maps Platform geocoding, routes and embed
#[derive(Debug, Clone)]
pub struct GoogleRoutesClient {
    client: Client,
    api_key: String,
}

impl GoogleRoutesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl RouteLookup for GoogleRoutesClient {
    async fn geocode(&self, address: &str) -> BoardResult<Option<Coordinates>> {
        debug!("Geocoding: {}", address);

        let url = Url::parse_with_params(GEOCODE_URL, &[("address", address), ("key", self.api_key.as_str())])
            .map_err(|e| routing_error(&format!("Failed to build geocoding URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| routing_error(&format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(routing_error(&format!(
                "Geocoding request failed with status {}",
                response.status().as_u16()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| routing_error(&format!("Failed to parse geocoding response: {}", e)))?;

        let location = body.first_location();
        if location.is_none() {
            warn!("Geocoding failed for {}: {}", address, body.status);
        }
        Ok(location)
    }

    async fn travel_time(&self, origin: Coordinates, destination: Coordinates) -> BoardResult<String> {
        let body = json!({
            "origin": {
                "location": {
                    "latLng": { "latitude": origin.latitude, "longitude": origin.longitude }
                }
            },
            "destination": {
                "location": {
                    "latLng": { "latitude": destination.latitude, "longitude": destination.longitude }
                }
            },
            "travelMode": "DRIVE",
            "routingPreference": "TRAFFIC_AWARE",
            "computeAlternativeRoutes": false,
            "routeModifiers": {
                "avoidHighways": false,
                "avoidTolls": false,
                "avoidFerries": false
            },
            "languageCode": "en-US",
            "units": "IMPERIAL"
        });

        let response = self
            .client
            .post(ROUTES_URL)
            .query(&[("key", self.api_key.as_str())])
            .header("X-Goog-FieldMask", "routes.duration")
            .json(&body)
            .send()
            .await
            .map_err(|e| routing_error(&format!("Routes API error: {}", e)))?;

        if !response.status().is_success() {
            return Err(routing_error(&format!(
                "Routes API request failed with status {}",
                response.status().as_u16()
            )));
        }

        let data: RoutesResponse = response
            .json()
            .await
            .map_err(|e| routing_error(&format!("Routes API error: {}", e)))?;

        data.routes
            .first()
            .and_then(|route| route.duration.as_deref())
            .map(format_duration)
            .ok_or_else(|| routing_error("No valid route found in response."))
    }

    fn map_embed_url(&self, origin: &str, destination: &str) -> Option<String> {
        Url::parse_with_params(
            EMBED_URL,
            &[
                ("key", self.api_key.as_str()),
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
            ],
        )
        .ok()
        .map(String::from)
    }
}

use serde::{Deserialize, Serialize};

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geocoding API response, trimmed to what we read
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Routes API response with the `routes.duration` field mask
#[derive(Debug, Deserialize)]
pub(crate) struct RoutesResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Route {
    pub duration: Option<String>,
}

impl GeocodeResponse {
    /// First match, only when the lookup succeeded
    pub fn first_location(&self) -> Option<Coordinates> {
        if self.status != "OK" {
            return None;
        }
        self.results.first().map(|r| Coordinates {
            latitude: r.geometry.location.lat,
            longitude: r.geometry.location.lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_response() {
        let body = r#"{
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": 33.98, "lng": -81.23}}}]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.first_location(),
            Some(Coordinates { latitude: 33.98, longitude: -81.23 })
        );

        let body = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_location(), None);
    }

    #[test]
    fn test_routes_response() {
        let response: RoutesResponse =
            serde_json::from_str(r#"{"routes": [{"duration": "165s"}]}"#).unwrap();
        assert_eq!(response.routes[0].duration.as_deref(), Some("165s"));

        let response: RoutesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.routes.is_empty());
    }
}

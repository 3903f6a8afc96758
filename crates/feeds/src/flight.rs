use serde::{Deserialize, Serialize};

use crate::FeedError;

/// One sample of a recorded flight path.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub longitude: f64,
    pub latitude: f64,
    /// Meters above the ellipsoid.
    pub height: f64,
    /// Seconds from route start.
    pub time: f64,
}

/// One element of the `GET /api/data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRoute {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Source noise level at the vehicle, dB.
    #[serde(default)]
    pub base_noise: f64,
    pub path: Vec<PathSample>,
}

impl FlightRoute {
    /// `(first, last)` sample times, seconds.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let first = self.path.first()?.time;
        let last = self.path.last()?.time;
        Some((first, last))
    }
}

/// Parses the `/api/data` payload. A route with no path samples cannot be
/// animated or drawn, so it is rejected here rather than downstream.
pub fn parse_flight_routes(json: &str) -> Result<Vec<FlightRoute>, FeedError> {
    let routes: Vec<FlightRoute> =
        serde_json::from_str(json).map_err(|e| FeedError::Json(e.to_string()))?;
    for route in &routes {
        if route.path.is_empty() {
            return Err(FeedError::EmptyPath {
                route: route.name.clone(),
            });
        }
    }
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::parse_flight_routes;
    use crate::FeedError;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"[
        {
            "name": "CBD courier line",
            "description": "express delivery across the business district",
            "base_noise": 82,
            "path": [
                {"longitude": 113.3234, "latitude": 23.1367, "height": 120, "time": 0},
                {"longitude": 113.3240, "latitude": 23.1320, "height": 120, "time": 60}
            ]
        }
    ]"#;

    #[test]
    fn parses_backend_shape() {
        let routes = parse_flight_routes(SAMPLE).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].base_noise, 82.0);
        assert_eq!(routes[0].path.len(), 2);
        assert_eq!(routes[0].time_range(), Some((0.0, 60.0)));
    }

    #[test]
    fn missing_optional_fields_default() {
        let routes = parse_flight_routes(
            r#"[{"name": "bare", "path": [{"longitude": 0, "latitude": 0, "height": 10, "time": 0}]}]"#,
        )
        .unwrap();
        assert_eq!(routes[0].description, "");
        assert_eq!(routes[0].base_noise, 0.0);
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = parse_flight_routes(r#"[{"name": "ghost", "path": []}]"#).unwrap_err();
        assert_eq!(
            err,
            FeedError::EmptyPath {
                route: "ghost".into()
            }
        );
    }

    #[test]
    fn malformed_json_is_a_feed_error() {
        assert!(matches!(
            parse_flight_routes("not json"),
            Err(FeedError::Json(_))
        ));
    }
}

use geo::rect::GeoRect;
use serde::{Deserialize, Serialize};

use crate::FeedError;

/// One scattered noise sample; `x` is longitude, `y` is latitude.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoisePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// The `GET /api/noise?index=N` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseSheet {
    pub points: Vec<NoisePoint>,
    pub min_noise: f64,
    pub max_noise: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl NoiseSheet {
    pub fn rect(&self) -> GeoRect {
        GeoRect::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }

    /// Maps a sample value into [0, 1] over the sheet's noise range.
    /// A collapsed range normalizes everything to zero.
    pub fn normalized(&self, value: f64) -> f64 {
        let range = self.max_noise - self.min_noise;
        if range <= 0.0 {
            return 0.0;
        }
        ((value - self.min_noise) / range).clamp(0.0, 1.0)
    }
}

pub fn parse_noise_sheet(json: &str) -> Result<NoiseSheet, FeedError> {
    serde_json::from_str(json).map_err(|e| FeedError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_noise_sheet;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "points": [
            {"x": 113.32, "y": 23.11, "value": 78.5},
            {"x": 113.33, "y": 23.12, "value": 64.0}
        ],
        "minNoise": 60.0,
        "maxNoise": 80.0,
        "minLon": 113.30,
        "maxLon": 113.40,
        "minLat": 23.10,
        "maxLat": 23.20
    }"#;

    #[test]
    fn parses_camel_case_payload() {
        let sheet = parse_noise_sheet(SAMPLE).unwrap();
        assert_eq!(sheet.points.len(), 2);
        assert_eq!(sheet.min_noise, 60.0);
        assert_eq!(sheet.rect().west, 113.30);
        assert_eq!(sheet.rect().north, 23.20);
    }

    #[test]
    fn normalized_clamps_to_unit_range() {
        let sheet = parse_noise_sheet(SAMPLE).unwrap();
        assert_eq!(sheet.normalized(60.0), 0.0);
        assert_eq!(sheet.normalized(70.0), 0.5);
        assert_eq!(sheet.normalized(80.0), 1.0);
        assert_eq!(sheet.normalized(120.0), 1.0);
        assert_eq!(sheet.normalized(-5.0), 0.0);
    }

    #[test]
    fn collapsed_range_normalizes_to_zero() {
        let mut sheet = parse_noise_sheet(SAMPLE).unwrap();
        sheet.max_noise = sheet.min_noise;
        assert_eq!(sheet.normalized(60.0), 0.0);
    }
}

/// Geographic rectangle in degrees (WGS84 lon/lat).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoRect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoRect {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// The full lon/lat range. Default emission bounds for effects that
    /// should cover the visible map regardless of camera position.
    pub fn whole_globe() -> Self {
        Self {
            west: -180.0,
            south: -90.0,
            east: 180.0,
            north: 90.0,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.west + self.east) * 0.5,
            (self.south + self.north) * 0.5,
        )
    }

    pub fn width_deg(&self) -> f64 {
        (self.east - self.west).max(0.0)
    }

    pub fn height_deg(&self) -> f64 {
        (self.north - self.south).max(0.0)
    }
}

impl Default for GeoRect {
    fn default() -> Self {
        Self::whole_globe()
    }
}

#[cfg(test)]
mod tests {
    use super::GeoRect;

    #[test]
    fn whole_globe_covers_everything() {
        let r = GeoRect::whole_globe();
        assert!(r.contains(-180.0, -90.0));
        assert!(r.contains(180.0, 90.0));
        assert!(r.contains(113.32, 23.11));
    }

    #[test]
    fn contains_respects_edges() {
        let r = GeoRect::new(113.0, 23.0, 114.0, 24.0);
        assert!(r.contains(113.0, 23.0));
        assert!(r.contains(114.0, 24.0));
        assert!(!r.contains(112.9, 23.5));
        assert!(!r.contains(113.5, 24.1));
    }

    #[test]
    fn center_and_extent() {
        let r = GeoRect::new(100.0, 20.0, 102.0, 26.0);
        assert_eq!(r.center(), (101.0, 23.0));
        assert_eq!(r.width_deg(), 2.0);
        assert_eq!(r.height_deg(), 6.0);
    }

    #[test]
    fn default_is_whole_globe() {
        assert_eq!(GeoRect::default(), GeoRect::whole_globe());
    }
}

use crate::math::Vec3;

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
/// WGS84 second eccentricity squared.
pub const WGS84_EP2: f64 = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

/// Geodetic position in degrees and meters, matching the feed payloads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub height_m: f64,
}

impl Geodetic {
    pub fn new(longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Self {
        Self {
            longitude_deg,
            latitude_deg,
            height_m,
        }
    }

    /// Converts to earth-centered, earth-fixed scene coordinates.
    pub fn to_ecef(self) -> Vec3 {
        let lat = self.latitude_deg.to_radians();
        let lon = self.longitude_deg.to_radians();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();

        let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        Vec3::new(
            (n + self.height_m) * cos_lat * lon.cos(),
            (n + self.height_m) * cos_lat * lon.sin(),
            (n * (1.0 - WGS84_E2) + self.height_m) * sin_lat,
        )
    }

    /// Recovers geodetic coordinates from scene space (Bowring's method).
    pub fn from_ecef(p: Vec3) -> Self {
        let rho = (p.x * p.x + p.y * p.y).sqrt();
        let lon = p.y.atan2(p.x);

        let theta = (p.z * WGS84_A).atan2(rho * WGS84_B);
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        let lat = (p.z + WGS84_EP2 * WGS84_B * sin_theta * sin_theta * sin_theta)
            .atan2(rho - WGS84_E2 * WGS84_A * cos_theta * cos_theta * cos_theta);

        let sin_lat = lat.sin();
        let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let height = rho / lat.cos() - n;

        Self::new(lon.to_degrees(), lat.to_degrees(), height)
    }
}

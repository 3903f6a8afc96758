pub mod flight_path;
pub mod heat_map;
pub mod layer;
pub mod noise_overlay;
pub mod poi;
pub mod session;
pub mod tileset;
pub mod wind_field;

pub use layer::{LayerController, LayerError, LayerId, LayerKind};
pub use session::DashboardSession;

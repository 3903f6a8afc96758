mod marker;
mod overlay;
mod path_track;
mod polyline;
mod time_span;
mod transform;
mod visibility;

pub use marker::Marker;
pub use overlay::{OverlayGrid, OverlayId};
pub use path_track::PathTrack;
pub use polyline::{Polyline, PolylineId};
pub use time_span::EntityTimeSpan;
pub use transform::Transform;
pub use visibility::Visibility;

use feeds::{FeedPayload, FetchQueue};
use runtime::work_queue::WorkId;
use scene::Viewer;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Tileset,
    FlightPath,
    Poi,
    HeatMap,
    NoiseOverlay,
    WindField,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Tileset => "tileset",
            LayerKind::FlightPath => "flight-path",
            LayerKind::Poi => "poi",
            LayerKind::HeatMap => "heat-map",
            LayerKind::NoiseOverlay => "noise-overlay",
            LayerKind::WindField => "wind-field",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// The fetch queue refused a request for this layer's data.
    FetchBacklog { max_len: usize },
    /// No layer with this id is registered in the session.
    UnknownLayer { id: LayerId },
}

impl std::fmt::Display for LayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerError::FetchBacklog { max_len } => {
                write!(f, "fetch queue is full ({max_len} pending)")
            }
            LayerError::UnknownLayer { id } => {
                write!(f, "no layer with id {}", id.0)
            }
        }
    }
}

impl std::error::Error for LayerError {}

/// Uniform interface over every dashboard layer.
///
/// The session dispatches through this trait only; there is no per-kind
/// switch anywhere. Layers own whatever they put into the scene and must
/// take it back out on `deactivate`. Both calls are safe to repeat:
/// activating an active layer and deactivating an inactive one are no-ops.
pub trait LayerController {
    fn id(&self) -> LayerId;
    fn kind(&self) -> LayerKind;
    fn is_active(&self) -> bool;

    fn activate(&mut self, viewer: &mut Viewer, fetch: &mut FetchQueue)
    -> Result<(), LayerError>;

    fn deactivate(&mut self, viewer: &mut Viewer, fetch: &mut FetchQueue);

    /// Called by the session when a fetch completes, with the fetched
    /// data. Layers ignore requests that are not theirs.
    fn on_fetch_complete(
        &mut self,
        _request: WorkId,
        _payload: &FeedPayload,
        _viewer: &mut Viewer,
    ) {
    }
}

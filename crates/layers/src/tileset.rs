use feeds::{FeedKind, FeedPayload, FeedRequest, FetchQueue};
use runtime::work_queue::WorkId;
use scene::Viewer;

use crate::layer::{LayerController, LayerError, LayerId, LayerKind};

/// A streamed 3D tileset (buildings, terrain meshes).
///
/// The layer does not stream tiles itself; it queues a fetch for its
/// source and flips to loaded when the session reports completion.
/// Deactivating while the fetch is still queued cancels it, so no data is
/// pulled for a layer nobody is looking at.
pub struct TilesetLayer {
    id: LayerId,
    source: String,
    /// Lift applied when draping the tileset, as a fraction of Earth radius.
    pub lift: f32,
    pending: Option<WorkId>,
    loaded: bool,
    active: bool,
}

impl TilesetLayer {
    pub fn new(id: u64, source: impl Into<String>) -> Self {
        Self {
            id: LayerId(id),
            source: source.into(),
            lift: 0.0,
            pending: None,
            loaded: false,
            active: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn pending_request(&self) -> Option<WorkId> {
        self.pending
    }
}

impl LayerController for TilesetLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Tileset
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(
        &mut self,
        _viewer: &mut Viewer,
        fetch: &mut FetchQueue,
    ) -> Result<(), LayerError> {
        if self.active {
            return Ok(());
        }
        if !self.loaded {
            let request = FeedRequest::new(FeedKind::Tileset {
                source: self.source.clone(),
            });
            let id = fetch
                .submit(0, request)
                .map_err(|e| LayerError::FetchBacklog { max_len: e.max_len })?;
            self.pending = Some(id);
        }
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self, _viewer: &mut Viewer, fetch: &mut FetchQueue) {
        if let Some(request) = self.pending.take() {
            fetch.cancel(request);
        }
        self.loaded = false;
        self.active = false;
    }

    fn on_fetch_complete(
        &mut self,
        request: WorkId,
        _payload: &FeedPayload,
        _viewer: &mut Viewer,
    ) {
        if self.pending == Some(request) {
            self.pending = None;
            self.loaded = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TilesetLayer;
    use feeds::{FeedKind, FeedPayload, FetchQueue};
    use scene::Viewer;

    use crate::layer::{LayerController, LayerError};

    #[test]
    fn activate_queues_a_fetch_for_the_source() {
        let mut viewer = Viewer::new(1.0);
        let mut fetch = FetchQueue::new(4);
        let mut layer = TilesetLayer::new(1, "tiles/city.json");

        layer.activate(&mut viewer, &mut fetch).unwrap();
        assert!(layer.is_active());
        assert!(!layer.is_loaded());

        let (id, request) = fetch.pop_next().unwrap();
        assert_eq!(
            request.kind,
            FeedKind::Tileset {
                source: "tiles/city.json".into()
            }
        );

        layer.on_fetch_complete(id, &FeedPayload::Tileset, &mut viewer);
        assert!(layer.is_loaded());
        assert!(layer.pending_request().is_none());
    }

    #[test]
    fn deactivate_cancels_a_still_queued_fetch() {
        let mut viewer = Viewer::new(1.0);
        let mut fetch = FetchQueue::new(4);
        let mut layer = TilesetLayer::new(1, "tiles/city.json");

        layer.activate(&mut viewer, &mut fetch).unwrap();
        layer.deactivate(&mut viewer, &mut fetch);
        assert!(fetch.pop_next().is_none());
        assert!(!layer.is_active());
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut viewer = Viewer::new(1.0);
        let mut fetch = FetchQueue::new(4);
        let mut layer = TilesetLayer::new(1, "tiles/city.json");

        layer.activate(&mut viewer, &mut fetch).unwrap();
        let (id, _) = fetch.pop_next().unwrap();
        layer.deactivate(&mut viewer, &mut fetch);

        // The fetch raced the deactivation; its completion must not
        // resurrect the layer's loaded state.
        layer.on_fetch_complete(id, &FeedPayload::Tileset, &mut viewer);
        assert!(!layer.is_loaded());
    }

    #[test]
    fn backlog_is_surfaced_as_a_layer_error() {
        let mut viewer = Viewer::new(1.0);
        let mut fetch = FetchQueue::new(0);
        let mut layer = TilesetLayer::new(1, "tiles/city.json");

        let err = layer.activate(&mut viewer, &mut fetch).unwrap_err();
        assert_eq!(err, LayerError::FetchBacklog { max_len: 0 });
        assert!(!layer.is_active());
    }
}

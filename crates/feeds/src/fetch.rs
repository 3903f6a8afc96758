use runtime::work_queue::{QueueFull, WorkId, WorkQueue};

use crate::flight::FlightRoute;
use crate::noise::NoiseSheet;

/// What a pending fetch is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    FlightData,
    NoiseSheet { index: u32 },
    Tileset { source: String },
}

/// Data a fulfilled fetch hands back to the layer that asked.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    FlightData(Vec<FlightRoute>),
    NoiseSheet(NoiseSheet),
    /// Tile streaming happens in the renderer; completion alone matters.
    Tileset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub kind: FeedKind,
}

impl FeedRequest {
    pub fn new(kind: FeedKind) -> Self {
        Self { kind }
    }
}

/// Deterministic queue of pending feed fetches.
///
/// The session submits here when a layer activates and the host app drains
/// it; deactivating a layer cancels its still-queued request, so a feed is
/// never fetched for a layer that no longer wants it.
#[derive(Debug)]
pub struct FetchQueue {
    inner: WorkQueue<FeedRequest>,
}

impl FetchQueue {
    pub fn new(max_pending: usize) -> Self {
        Self {
            inner: WorkQueue::with_max_len(max_pending),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn submit(&mut self, priority: i32, request: FeedRequest) -> Result<WorkId, QueueFull> {
        self.inner.try_push(priority, request)
    }

    pub fn cancel(&mut self, id: WorkId) -> bool {
        self.inner.cancel(id)
    }

    pub fn pop_next(&mut self) -> Option<(WorkId, FeedRequest)> {
        self.inner.pop_next()
    }
}

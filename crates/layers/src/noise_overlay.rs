use feeds::{FeedKind, FeedPayload, FeedRequest, FetchQueue, NoiseSheet};
use runtime::work_queue::WorkId;
use scene::Viewer;
use scene::components::{OverlayGrid, OverlayId};

use crate::layer::{LayerController, LayerError, LayerId, LayerKind};

/// Noise contour overlay built from a backend noise sheet.
///
/// Scattered samples are binned into a raster over the sheet's bounds;
/// a cell keeps the loudest normalized sample that lands in it. The
/// sheet is fetched on first activation unless supplied up front.
pub struct NoiseOverlayLayer {
    id: LayerId,
    sheet_index: u32,
    sheet: Option<NoiseSheet>,
    cols: usize,
    rows: usize,
    pending: Option<WorkId>,
    overlay: Option<OverlayId>,
    active: bool,
}

impl NoiseOverlayLayer {
    /// A layer that fetches sheet `sheet_index` when first activated.
    pub fn new(id: u64, sheet_index: u32) -> Self {
        Self {
            id: LayerId(id),
            sheet_index,
            sheet: None,
            cols: 64,
            rows: 64,
            pending: None,
            overlay: None,
            active: false,
        }
    }

    /// A layer with its sheet already in hand; no fetch is made.
    pub fn with_sheet(id: u64, sheet: NoiseSheet) -> Self {
        Self {
            sheet: Some(sheet),
            ..Self::new(id, 0)
        }
    }

    pub fn with_resolution(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn has_sheet(&self) -> bool {
        self.sheet.is_some()
    }

    /// The raster for the current sheet; `None` until one arrives.
    pub fn rasterize(&self) -> Option<OverlayGrid> {
        let sheet = self.sheet.as_ref()?;
        let mut grid = OverlayGrid::zeroed(sheet.rect(), self.cols, self.rows);
        for point in &sheet.points {
            let Some((col, row)) = grid.cell_of(point.x, point.y) else {
                continue;
            };
            let v = sheet.normalized(point.value) as f32;
            if v > grid.value(col, row) {
                grid.set_value(col, row, v);
            }
        }
        Some(grid)
    }

    fn attach_overlay(&mut self, viewer: &mut Viewer) {
        if self.overlay.is_none()
            && let Some(grid) = self.rasterize()
        {
            self.overlay = Some(viewer.world.add_overlay(grid));
        }
    }
}

impl LayerController for NoiseOverlayLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::NoiseOverlay
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(
        &mut self,
        viewer: &mut Viewer,
        fetch: &mut FetchQueue,
    ) -> Result<(), LayerError> {
        if self.active {
            return Ok(());
        }
        if self.sheet.is_some() {
            self.attach_overlay(viewer);
        } else if self.pending.is_none() {
            let id = fetch
                .submit(
                    0,
                    FeedRequest::new(FeedKind::NoiseSheet {
                        index: self.sheet_index,
                    }),
                )
                .map_err(|e| LayerError::FetchBacklog { max_len: e.max_len })?;
            self.pending = Some(id);
        }
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self, viewer: &mut Viewer, fetch: &mut FetchQueue) {
        if let Some(request) = self.pending.take() {
            fetch.cancel(request);
        }
        if let Some(overlay) = self.overlay.take() {
            viewer.world.remove_overlay(overlay);
        }
        self.active = false;
    }

    fn on_fetch_complete(
        &mut self,
        request: WorkId,
        payload: &FeedPayload,
        viewer: &mut Viewer,
    ) {
        if self.pending != Some(request) {
            return;
        }
        let FeedPayload::NoiseSheet(sheet) = payload else {
            return;
        };
        self.pending = None;
        self.sheet = Some(sheet.clone());
        if self.active {
            self.attach_overlay(viewer);
        }
    }
}

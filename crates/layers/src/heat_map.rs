use feeds::FetchQueue;
use geo::rect::GeoRect;
use scene::Viewer;
use scene::components::{OverlayGrid, OverlayId};

use crate::layer::{LayerController, LayerError, LayerId, LayerKind};

/// A weighted geographic sample feeding the density raster.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeatPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub weight: f64,
}

/// Density heat map over fixed bounds.
///
/// Each point splats a linear-falloff kernel into the grid; the result is
/// normalized by the hottest cell so the overlay always spans [0, 1].
pub struct HeatMapLayer {
    id: LayerId,
    points: Vec<HeatPoint>,
    bounds: GeoRect,
    cols: usize,
    rows: usize,
    kernel_radius_cells: usize,
    overlay: Option<OverlayId>,
    active: bool,
}

impl HeatMapLayer {
    pub fn new(id: u64, bounds: GeoRect, points: Vec<HeatPoint>) -> Self {
        Self {
            id: LayerId(id),
            points,
            bounds,
            cols: 64,
            rows: 64,
            kernel_radius_cells: 4,
            overlay: None,
            active: false,
        }
    }

    pub fn with_resolution(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    /// Builds the density raster. Points outside the bounds are ignored;
    /// no points (or degenerate bounds) yield an all-zero grid.
    pub fn density_grid(&self) -> OverlayGrid {
        let mut grid = OverlayGrid::zeroed(self.bounds, self.cols, self.rows);
        let radius = self.kernel_radius_cells as f64;

        for point in &self.points {
            let Some((col, row)) = grid.cell_of(point.longitude, point.latitude) else {
                continue;
            };
            let r = self.kernel_radius_cells as isize;
            for dy in -r..=r {
                for dx in -r..=r {
                    let (cx, cy) = (col as isize + dx, row as isize + dy);
                    if cx < 0 || cy < 0 || cx >= grid.cols as isize || cy >= grid.rows as isize {
                        continue;
                    }
                    let dist = ((dx * dx + dy * dy) as f64).sqrt();
                    if dist > radius {
                        continue;
                    }
                    let falloff = 1.0 - dist / radius.max(1.0);
                    let (cx, cy) = (cx as usize, cy as usize);
                    let v = grid.value(cx, cy) + (point.weight * falloff) as f32;
                    grid.set_value(cx, cy, v);
                }
            }
        }

        let max = grid.max_value();
        if max > 0.0 {
            for v in &mut grid.values {
                *v /= max;
            }
        }
        grid
    }
}

impl LayerController for HeatMapLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::HeatMap
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(
        &mut self,
        viewer: &mut Viewer,
        _fetch: &mut FetchQueue,
    ) -> Result<(), LayerError> {
        if self.active {
            return Ok(());
        }
        let grid = self.density_grid();
        self.overlay = Some(viewer.world.add_overlay(grid));
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self, viewer: &mut Viewer, _fetch: &mut FetchQueue) {
        if let Some(overlay) = self.overlay.take() {
            viewer.world.remove_overlay(overlay);
        }
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{HeatMapLayer, HeatPoint};
    use feeds::FetchQueue;
    use geo::rect::GeoRect;
    use scene::Viewer;

    use crate::layer::LayerController;

    fn bounds() -> GeoRect {
        GeoRect::new(113.0, 23.0, 114.0, 24.0)
    }

    #[test]
    fn single_point_peaks_at_its_cell() {
        let layer = HeatMapLayer::new(
            4,
            bounds(),
            vec![HeatPoint {
                longitude: 113.5,
                latitude: 23.5,
                weight: 1.0,
            }],
        )
        .with_resolution(32, 32);

        let grid = layer.density_grid();
        let (col, row) = grid.cell_of(113.5, 23.5).unwrap();
        assert_eq!(grid.value(col, row), 1.0);
        // Falls off away from the peak.
        assert!(grid.value(col + 3, row) < 1.0);
        assert_eq!(grid.value(col + 10, row), 0.0);
    }

    #[test]
    fn points_outside_bounds_are_ignored() {
        let layer = HeatMapLayer::new(
            4,
            bounds(),
            vec![HeatPoint {
                longitude: 120.0,
                latitude: 30.0,
                weight: 5.0,
            }],
        );
        assert_eq!(layer.density_grid().max_value(), 0.0);
    }

    #[test]
    fn empty_points_yield_a_blank_grid() {
        let layer = HeatMapLayer::new(4, bounds(), Vec::new());
        assert_eq!(layer.density_grid().max_value(), 0.0);
    }

    #[test]
    fn normalization_tops_out_at_one() {
        let layer = HeatMapLayer::new(
            4,
            bounds(),
            vec![
                HeatPoint {
                    longitude: 113.2,
                    latitude: 23.2,
                    weight: 10.0,
                },
                HeatPoint {
                    longitude: 113.8,
                    latitude: 23.8,
                    weight: 90.0,
                },
            ],
        );
        let grid = layer.density_grid();
        assert_eq!(grid.max_value(), 1.0);
    }

    #[test]
    fn activate_attaches_overlay_and_deactivate_removes_it() {
        let mut viewer = Viewer::new(1.0);
        let mut fetch = FetchQueue::new(4);
        let mut layer = HeatMapLayer::new(4, bounds(), Vec::new());

        layer.activate(&mut viewer, &mut fetch).unwrap();
        assert_eq!(viewer.world.overlays().count(), 1);
        layer.deactivate(&mut viewer, &mut fetch);
        assert_eq!(viewer.world.overlays().count(), 0);
        // Deactivating again stays a no-op.
        layer.deactivate(&mut viewer, &mut fetch);
    }
}

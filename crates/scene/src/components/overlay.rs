use geo::rect::GeoRect;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// A raster of normalized intensities draped over geographic bounds.
///
/// Cells are stored row-major, south-to-north, with values in [0, 1].
/// Both the heat map and the noise overlay render through this.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGrid {
    pub rect: GeoRect,
    pub cols: usize,
    pub rows: usize,
    pub values: Vec<f32>,
}

impl OverlayGrid {
    /// An all-zero grid. `cols`/`rows` of zero are bumped to one cell so a
    /// degenerate request still yields a renderable (blank) overlay.
    pub fn zeroed(rect: GeoRect, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            rect,
            cols,
            rows,
            values: vec![0.0; cols * rows],
        }
    }

    pub fn value(&self, col: usize, row: usize) -> f32 {
        self.values[row * self.cols + col]
    }

    pub fn set_value(&mut self, col: usize, row: usize, v: f32) {
        self.values[row * self.cols + col] = v;
    }

    /// Maps a lon/lat inside the rect to its cell. Returns `None` outside.
    pub fn cell_of(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        if !self.rect.contains(lon, lat) {
            return None;
        }
        let w = self.rect.width_deg();
        let h = self.rect.height_deg();
        if w <= 0.0 || h <= 0.0 {
            return Some((0, 0));
        }
        let col = (((lon - self.rect.west) / w) * self.cols as f64) as usize;
        let row = (((lat - self.rect.south) / h) * self.rows as f64) as usize;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }

    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayGrid;
    use geo::rect::GeoRect;

    #[test]
    fn cell_lookup_maps_corners_and_center() {
        let g = OverlayGrid::zeroed(GeoRect::new(0.0, 0.0, 10.0, 10.0), 10, 10);
        assert_eq!(g.cell_of(0.0, 0.0), Some((0, 0)));
        assert_eq!(g.cell_of(10.0, 10.0), Some((9, 9)));
        assert_eq!(g.cell_of(5.0, 5.0), Some((5, 5)));
        assert_eq!(g.cell_of(-1.0, 5.0), None);
    }

    #[test]
    fn zeroed_guards_degenerate_dimensions() {
        let g = OverlayGrid::zeroed(GeoRect::new(0.0, 0.0, 0.0, 0.0), 0, 0);
        assert_eq!((g.cols, g.rows), (1, 1));
        assert_eq!(g.cell_of(0.0, 0.0), Some((0, 0)));
        assert_eq!(g.max_value(), 0.0);
    }

    #[test]
    fn set_and_read_values() {
        let mut g = OverlayGrid::zeroed(GeoRect::new(0.0, 0.0, 1.0, 1.0), 4, 4);
        g.set_value(2, 3, 0.7);
        assert_eq!(g.value(2, 3), 0.7);
        assert_eq!(g.max_value(), 0.7);
    }
}

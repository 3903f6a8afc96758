use geo::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PolylineId(pub u32);

/// A world-space line strip: flight routes, boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub positions: Vec<Vec3>,
    pub width: f32,
    pub color: [f32; 4],
}

impl Polyline {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            width: 2.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

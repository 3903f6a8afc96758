/// A screen-facing billboard: POI pins, vehicle icons.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub image: String,
    pub scale: f32,
    pub color: [f32; 4],
    pub label: Option<String>,
}

impl Marker {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            scale: 1.0,
            color: [1.0, 1.0, 1.0, 1.0],
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

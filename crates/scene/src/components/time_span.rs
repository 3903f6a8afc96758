use geo::time::TimeSpan;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntityTimeSpan {
    pub span: TimeSpan,
}

impl EntityTimeSpan {
    pub fn new(span: TimeSpan) -> Self {
        Self { span }
    }
}

use crate::frame::Frame;

/// Which subsystem a trace event came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Layer lifecycle: activations and deactivations.
    Layer,
    /// Wind parameter edits and teardown.
    Wind,
    /// Feed fetch completions.
    Fetch,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Layer => "layer",
            Scope::Wind => "wind",
            Scope::Fetch => "fetch",
        }
    }
}

/// A trace record tied to the tick it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub scope: Scope,
    pub message: String,
}

/// In-memory trace of what the session did, keyed by frame index.
///
/// Headless runs have no screen to watch; this is how a run gets
/// inspected after the fact, in tests and in the driver's exit dump.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, frame: Frame, scope: Scope, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            scope,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events from one subsystem, in record order.
    pub fn scoped(&self, scope: Scope) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.scope == scope)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

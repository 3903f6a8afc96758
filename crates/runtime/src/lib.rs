pub mod event_log;
pub mod frame;
pub mod work_queue;

pub use event_log::{Event, EventLog, Scope};
pub use frame::{Clock, Frame};
pub use work_queue::{QueueFull, WorkId, WorkQueue};

//! Background notification worker and the dispatch seam feeding it.

pub mod dispatcher;
pub mod handler;
pub mod messages;

pub use dispatcher::{NotificationDispatcher, NotificationQueue, QueuedDispatcher};
pub use handler::{NotificationSink, NotificationWorker, TracingSink, WorkerReport};
pub use messages::{NotificationRequest, TraceContext};

//! Notification dispatch seam used by the state store.

use crate::worker::messages::NotificationRequest;
use tokio::sync::mpsc;

/// Fire-and-forget notification collaborator.
///
/// Calls must return promptly and must not report failures back to the state
/// layer: a notification that cannot be shown never affects state.
pub trait NotificationDispatcher: Send + Sync {
    /// A departure time was pinned.
    fn notify_departure(&self, route_id: &str, time: &str, stop_name: &str);

    /// A route was marked favorite.
    fn notify_favorite_route(&self, route_number: &str, message: &str);
}

/// Receiving end of a [`QueuedDispatcher`], consumed by the notification worker.
pub type NotificationQueue = mpsc::UnboundedReceiver<NotificationRequest>;

/// Dispatcher that enqueues requests for a background worker.
///
/// Enqueueing never blocks. If the worker has stopped, requests are logged
/// and dropped.
///
/// # Example
///
/// ```rust
/// use slavgorod_bus::worker::{NotificationDispatcher, QueuedDispatcher};
///
/// let (dispatcher, mut queue) = QueuedDispatcher::channel();
/// dispatcher.notify_departure("102", "06:25", "Market");
/// assert_eq!(queue.try_recv().unwrap().kind(), "departure");
/// ```
#[derive(Debug, Clone)]
pub struct QueuedDispatcher {
    tx: mpsc::UnboundedSender<NotificationRequest>,
}

impl QueuedDispatcher {
    /// Creates a dispatcher and the queue its requests arrive on.
    #[must_use]
    pub fn channel() -> (Self, NotificationQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn enqueue(&self, request: NotificationRequest) {
        let kind = request.kind();
        if self.tx.send(request).is_err() {
            tracing::debug!(kind = kind, "notification worker stopped, dropping request");
        } else {
            tracing::debug!(kind = kind, "notification request queued");
        }
    }
}

impl NotificationDispatcher for QueuedDispatcher {
    fn notify_departure(&self, route_id: &str, time: &str, stop_name: &str) {
        self.enqueue(NotificationRequest::departure(route_id, time, stop_name));
    }

    fn notify_favorite_route(&self, route_number: &str, message: &str) {
        self.enqueue(NotificationRequest::favorite_route(route_number, message));
    }
}

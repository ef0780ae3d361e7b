//! Background worker delivering queued notifications.
//!
//! The worker drains the [`NotificationQueue`] on its own task and hands each
//! request to a [`NotificationSink`]. Delivery is best-effort: a failed
//! delivery is logged and counted, never retried, and never reported back to
//! the state store that produced the request.

use crate::domain::error::Result;
use crate::worker::dispatcher::NotificationQueue;
use crate::worker::messages::NotificationRequest;
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Platform notification delivery.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Shows `request` to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refused or failed to show it.
    async fn deliver(&self, request: &NotificationRequest) -> Result<()>;
}

/// Sink that emits notifications as tracing events.
///
/// Used when no platform notification service is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn deliver(&self, request: &NotificationRequest) -> Result<()> {
        tracing::info!(
            kind = request.kind(),
            title = %request.title(),
            body = %request.body(),
            requested_at = %request.requested_at(),
            "notification"
        );
        Ok(())
    }
}

/// Delivery counters reported when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Drains a notification queue into a sink.
pub struct NotificationWorker<S> {
    queue: NotificationQueue,
    sink: S,
    report: WorkerReport,
}

impl<S: NotificationSink + 'static> NotificationWorker<S> {
    #[must_use]
    pub fn new(queue: NotificationQueue, sink: S) -> Self {
        Self {
            queue,
            sink,
            report: WorkerReport::default(),
        }
    }

    /// Delivers requests until every dispatcher feeding the queue is dropped.
    pub async fn run(mut self) -> WorkerReport {
        tracing::debug!("notification worker started");

        while let Some(request) = self.queue.recv().await {
            self.handle_request(request).await;
        }

        tracing::debug!(
            delivered = self.report.delivered,
            failed = self.report.failed,
            "notification worker stopped"
        );
        self.report
    }

    /// Runs the worker on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<WorkerReport> {
        tokio::spawn(self.run())
    }

    async fn handle_request(&mut self, request: NotificationRequest) {
        let span = tracing::debug_span!("notification_deliver", kind = request.kind());
        if let Some(parent) = request.trace_context().and_then(|ctx| ctx.to_otel_context()) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }

        match self.sink.deliver(&request).instrument(span).await {
            Ok(()) => {
                self.report.delivered += 1;
                tracing::debug!(kind = request.kind(), "notification delivered");
            }
            Err(e) => {
                self.report.failed += 1;
                tracing::warn!(kind = request.kind(), error = %e, "notification delivery failed");
            }
        }
    }
}

impl<S> std::fmt::Debug for NotificationWorker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationWorker")
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

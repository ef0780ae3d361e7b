//! Notification request types passed from the state layer to the worker.
//!
//! Requests cross a task boundary, so each one carries the tracing context of
//! the span that produced it. The worker re-parents its delivery span on that
//! context to keep a favorite tap and its notification in one trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote OpenTelemetry context from the captured ids.
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates constructors that stamp the request time and attach the current
/// trace context.
macro_rules! notification_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl NotificationRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request stamped with the current time and trace context")]
                pub fn $builder_name($($field: impl Into<$ty>),*) -> Self {
                    Self::$variant {
                        $($field: $field.into(),)*
                        requested_at: Utc::now(),
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

notification_request_builders! {
    departure(Departure { route_id: String, time: String, stop_name: String }),
    favorite_route(FavoriteRoute { route_number: String, message: String }),
}

/// A notification the state layer asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationRequest {
    /// A departure time of a route was pinned.
    Departure {
        /// Route the pinned time belongs to.
        route_id: String,
        /// Departure time, as shown on the schedule.
        time: String,
        /// Stop the bus departs from.
        stop_name: String,
        /// When the request was produced.
        requested_at: DateTime<Utc>,
        /// Trace context for linking spans across tasks.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// A whole route was marked favorite.
    FavoriteRoute {
        /// Route number shown to the user.
        route_number: String,
        /// Message body.
        message: String,
        /// When the request was produced.
        requested_at: DateTime<Utc>,
        /// Trace context for linking spans across tasks.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl NotificationRequest {
    /// Short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Departure { .. } => "departure",
            Self::FavoriteRoute { .. } => "favorite_route",
        }
    }

    /// Notification title.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Departure { route_id, .. } => format!("Автобус №{route_id}"),
            Self::FavoriteRoute { route_number, .. } => format!("Маршрут №{route_number}"),
        }
    }

    /// Notification body.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::Departure { time, stop_name, .. } => {
                format!("Отправление в {time} от остановки «{stop_name}»")
            }
            Self::FavoriteRoute { message, .. } => message.clone(),
        }
    }

    #[must_use]
    pub fn requested_at(&self) -> DateTime<Utc> {
        match self {
            Self::Departure { requested_at, .. } | Self::FavoriteRoute { requested_at, .. } => *requested_at,
        }
    }

    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Departure { trace_context, .. } | Self::FavoriteRoute { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

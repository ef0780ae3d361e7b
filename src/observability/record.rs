//! Compact JSON records for exported span batches.
//!
//! One [`BatchRecord`] is written per export call, as a single line:
//!
//! ```json
//! {"service":"slavgorod-bus","spans":[{"name":"set_query","trace_id":"…","span_id":"…",
//!   "parent_span_id":null,"start_unix_nanos":…,"duration_micros":…,"attributes":{"query_len":"3"},
//!   "events":["publishing ui snapshot"],"error":null}]}
//! ```

use opentelemetry::trace::{SpanId, Status};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

#[derive(Debug, Serialize)]
pub struct BatchRecord {
    pub service: String,
    pub spans: Vec<SpanRecord>,
}

#[derive(Debug, Serialize)]
pub struct SpanRecord {
    pub name: String,
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub start_unix_nanos: u128,
    pub duration_micros: u128,
    pub attributes: BTreeMap<String, String>,
    /// Names of the events recorded inside the span.
    pub events: Vec<String>,
    pub error: Option<String>,
}

impl BatchRecord {
    pub fn from_batch(service: &str, batch: &[SpanData]) -> Self {
        Self {
            service: service.to_string(),
            spans: batch.iter().map(SpanRecord::from).collect(),
        }
    }
}

impl From<&SpanData> for SpanRecord {
    fn from(span: &SpanData) -> Self {
        let parent_span_id =
            (span.parent_span_id != SpanId::INVALID).then(|| span.parent_span_id.to_string());

        let error = match &span.status {
            Status::Error { description } => Some(description.to_string()),
            Status::Unset | Status::Ok => None,
        };

        Self {
            name: span.name.to_string(),
            trace_id: span.span_context.trace_id().to_string(),
            span_id: span.span_context.span_id().to_string(),
            parent_span_id,
            start_unix_nanos: span
                .start_time
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or(Duration::ZERO)
                .as_nanos(),
            duration_micros: span
                .end_time
                .duration_since(span.start_time)
                .unwrap_or(Duration::ZERO)
                .as_micros(),
            attributes: span
                .attributes
                .iter()
                .map(|kv| (kv.key.to_string(), kv.value.to_string()))
                .collect(),
            events: span.events.iter().map(|event| event.name.to_string()).collect(),
            error,
        }
    }
}

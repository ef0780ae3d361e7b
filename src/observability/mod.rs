//! OpenTelemetry tracing with local file export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider → FileSpanExporter → JSON lines
//! ```
//!
//! Span batches are written as compact JSON lines to a file in the data
//! directory. The file rotates at 10 MB and keeps three backups.
//!
//! The filter level comes from `trace_level` in [`crate::Config`], defaulting
//! to `info`.

mod file_writer;
mod init;
mod record;
mod tracer;

pub use init::init_tracing;

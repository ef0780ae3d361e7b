//! Tracer provider that exports finished spans to a local file.

use super::file_writer::RotatingWriter;
use super::record::BatchRecord;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one JSON line.
struct FileSpanExporter {
    service: String,
    writer: RotatingWriter,
    is_shutdown: bool,
}

impl FileSpanExporter {
    const fn new(service: String, file_path: PathBuf) -> Self {
        Self {
            service,
            writer: RotatingWriter::new(file_path),
            is_shutdown: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        let record = BatchRecord::from_batch(&self.service, batch);
        let line = serde_json::to_string(&record).map_err(|e| TraceError::from(e.to_string()))?;
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("service", &self.service)
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a provider whose spans are exported synchronously to `file_path`.
pub fn create_tracer_provider(service: &str, file_path: PathBuf) -> TracerProvider {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service.to_string(),
    )]);
    let exporter = FileSpanExporter::new(service.to_string(), file_path);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer as _, TracerProvider as _};

    #[test]
    fn finished_span_lands_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let provider = create_tracer_provider("slavgorod-bus-test", path.clone());

        let tracer = provider.tracer("test");
        tracer.in_span("toggle_route_favorite", |_cx| {});
        drop(provider);

        let contents = std::fs::read_to_string(&path).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["service"], "slavgorod-bus-test");
        assert_eq!(line["spans"][0]["name"], "toggle_route_favorite");
        assert!(line["spans"][0]["parent_span_id"].is_null());
    }
}

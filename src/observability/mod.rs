//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer → FileSpanExporter → truckmap-otlp.json
//! ```
//!
//! Spans land as OTLP JSON lines in `~/.local/share/zellij/truckmap/`, rotated
//! at 10 MB with three backups. The filter comes from the `trace_level`
//! plugin option (an `EnvFilter` directive, default `info`).
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider and span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{active_trace_level, init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};

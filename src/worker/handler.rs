//! Worker thread message processing.
//!
//! All file access happens here, off the render loop. The Zellij worker
//! registration lives in the plugin binary; this type only turns a serialized
//! [`WorkerMessage`] into a serialized [`WorkerResponse`].

use crate::catalog::{CatalogSource, JsonCatalogSource};
use crate::infrastructure::paths::expand_tilde;
use crate::location::{locate, LocationSource};
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::Config;

/// Worker thread state.
///
/// Every request reads its source afresh. The worker installs its tracing
/// subscriber from the filter carried by the first traced message.
#[derive(Debug, Default)]
pub struct TruckmapWorker {
    handled: u64,
    tracing_ready: bool,
}

impl TruckmapWorker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages processed so far.
    #[must_use]
    pub const fn handled(&self) -> u64 {
        self.handled
    }

    /// Tracing configuration for this worker, returned once: for the first
    /// message whose trace context names the plugin's filter.
    pub fn take_tracing_config(&mut self, message: &WorkerMessage) -> Option<Config> {
        if self.tracing_ready {
            return None;
        }
        let trace_level = message.trace_context()?.trace_level.clone()?;
        self.tracing_ready = true;
        Some(Config {
            trace_level: Some(trace_level),
            ..Config::default()
        })
    }

    fn handle_load_catalog(path: &str) -> WorkerResponse {
        let source = JsonCatalogSource::new(expand_tilde(path));
        match source.load() {
            Ok(catalog) => {
                tracing::debug!(truck_count = catalog.len(), "catalog ready");
                WorkerResponse::CatalogLoaded {
                    trucks: catalog.trucks().to_vec(),
                }
            }
            Err(e) => {
                tracing::debug!(source = %source.describe(), error = %e, "catalog load failed");
                WorkerResponse::CatalogFailed {
                    message: format!("{}: {e}", source.describe()),
                }
            }
        }
    }

    fn handle_resolve_location(request_id: u64, source: &LocationSource) -> WorkerResponse {
        let mut provider = source.provider();
        let (permission, coordinate) = locate(provider.as_mut());
        tracing::debug!(request_id, ?permission, ?coordinate, "location request handled");
        WorkerResponse::LocationResolved {
            request_id,
            permission,
            coordinate,
        }
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        if let Some(config) = self.take_tracing_config(&message) {
            crate::observability::init_tracing(&config);
        }
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        self.handled += 1;

        match message {
            WorkerMessage::LoadCatalog { path, .. } => Self::handle_load_catalog(&path),
            WorkerMessage::ResolveLocation { request_id, source, .. } => {
                Self::handle_resolve_location(request_id, &source)
            }
        }
    }

    /// Deserializes `payload`, handles it and serializes the response.
    ///
    /// A payload that is not a [`WorkerMessage`] yields a serialized
    /// [`WorkerResponse::Error`]; `None` only if serialization itself fails.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("malformed worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(serialized) => Some(serialized),
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that reads catalog and location
//! files. It also carries distributed tracing context across the thread boundary.

use crate::domain::{Coordinate, TruckRecord};
use crate::location::{LocationSource, Permission};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,

    /// Plugin filter directive; the worker builds its subscriber from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_level: Option<String>,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        let context = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
            trace_level: crate::observability::active_trace_level().map(String::from),
        };
        tracing::trace!(trace_id = %context.trace_id, "capturing trace context");
        Some(context)
    }
}

/// Generates builder methods for `WorkerMessage` variants.
///
/// Each builder attaches the current trace context to the message.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_catalog(LoadCatalog { path: String }),
    resolve_location(ResolveLocation { request_id: u64, source: LocationSource }),
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load and validate a JSON catalog file.
    LoadCatalog {
        /// Catalog file path, `~` allowed.
        path: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Run the permission-then-coordinate flow once.
    ResolveLocation {
        /// Identifies the request so late answers can be discarded.
        request_id: u64,

        /// Where to look for the device location.
        source: LocationSource,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCatalog { trace_context, .. } | Self::ResolveLocation { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog file was loaded and passed validation.
    CatalogLoaded {
        /// Trucks in file order.
        trucks: Vec<TruckRecord>,
    },

    /// The catalog file could not be used.
    CatalogFailed {
        /// Human-readable error message.
        message: String,
    },

    /// The location request finished.
    LocationResolved {
        /// Echo of the request id.
        request_id: u64,

        /// Outcome of the permission step.
        permission: Permission,

        /// Device coordinate, if one could be determined.
        coordinate: Option<Coordinate>,
    },

    /// The worker could not process a message.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

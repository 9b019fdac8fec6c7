//! Background worker for catalog loading and location resolution.
//!
//! Work that touches the host filesystem runs on Zellij's worker thread so the
//! render loop never blocks. Requests and responses are JSON over the plugin
//! message channel and carry trace context so worker spans join the plugin
//! trace.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Message processing

pub mod handler;
pub mod messages;

pub use handler::TruckmapWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Plugin message name used for worker round-trips.
pub const WORKER_MESSAGE_NAME: &str = "truckmap";

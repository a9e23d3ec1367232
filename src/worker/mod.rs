//! Background worker for task storage.
//!
//! Store I/O runs on a Zellij worker thread so the plugin never blocks while
//! rendering. Requests and responses cross the thread boundary as JSON and
//! carry trace context so both halves land in the same trace.
//!
//! - `messages`: Request/response protocol and trace context propagation
//! - `handler`: [`TodoWorker`], which applies requests to the store

pub mod handler;
pub mod messages;

pub use handler::{init_worker_tracing, TodoWorker};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

/// Name the worker is registered under, and the message name its responses
/// are posted with.
pub const WORKER_NAME: &str = "zodo";

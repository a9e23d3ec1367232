//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) mutates the holders and returns a
//! `Vec<Action>`; the plugin shim executes them in order. Keeping effects as
//! data lets the handler run in tests without a Zellij host.

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the plugin. Emitted by `q`, and by back at the root route.
    ExitApp,

    /// Posts a request to the task worker.
    PostToWorker(WorkerMessage),
}

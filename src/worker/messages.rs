//! Request/response protocol between the plugin and the task worker.
//!
//! Both directions travel as JSON over Zellij's plugin message channel. Every
//! request carries an optional [`TraceContext`] so worker spans join the trace
//! of the UI event that caused them.

use crate::domain::{SortOrder, TodoId, TodoItem};
use serde::{Deserialize, Serialize};

/// Serialized OpenTelemetry parent for a span on the other side of the
/// worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace id, 32 lowercase hex digits.
    pub trace_id: String,

    /// Span id of the sending span, 16 lowercase hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the active span's trace and span ids.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid, which is the case in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span = otel_context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Operation names carried by error responses.
pub mod operation {
    pub const OPEN_STORE: &str = "open store";
    pub const LOAD_TASKS: &str = "load tasks";
    pub const CREATE_TASK: &str = "create task";
    pub const UPDATE_TASK: &str = "update task";
    pub const DELETE_TASK: &str = "delete task";
    pub const GET_TASK: &str = "get task";
}

/// Generates `WorkerMessage` constructors that stamp the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request with the current trace context.")]
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
    open_store(OpenStore { data_file: Option<String> }),
    load_todos(LoadTodos { request_id: u64, sort: SortOrder }),
    create_todo(CreateTodo { title: String, description: Option<String> }),
    update_todo(UpdateTodo { item: TodoItem }),
    delete_todo(DeleteTodo { id: TodoId }),
    get_todo(GetTodo { id: TodoId }),
}

/// Requests sent from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Opens (or reopens) the store. `None` uses the default data file.
    OpenStore {
        data_file: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Loads every task, sorted. The id is echoed back so the plugin can drop
    /// answers to requests it has since cancelled.
    LoadTodos {
        request_id: u64,
        sort: SortOrder,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Creates a task from validated form input.
    CreateTodo {
        title: String,
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replaces an existing task. Used for edits and completion toggles.
    UpdateTodo {
        item: TodoItem,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Deletes a task. Unknown ids are not an error.
    DeleteTodo {
        id: TodoId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Re-reads one task for the detail screen.
    GetTodo {
        id: TodoId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Short operation name used in logs and error responses.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::OpenStore { .. } => operation::OPEN_STORE,
            Self::LoadTodos { .. } => operation::LOAD_TASKS,
            Self::CreateTodo { .. } => operation::CREATE_TASK,
            Self::UpdateTodo { .. } => operation::UPDATE_TASK,
            Self::DeleteTodo { .. } => operation::DELETE_TASK,
            Self::GetTodo { .. } => operation::GET_TASK,
        }
    }

    /// Propagated trace context, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::OpenStore { trace_context, .. }
            | Self::LoadTodos { trace_context, .. }
            | Self::CreateTodo { trace_context, .. }
            | Self::UpdateTodo { trace_context, .. }
            | Self::DeleteTodo { trace_context, .. }
            | Self::GetTodo { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The store is open and holds `count` tasks.
    StoreOpened { count: usize },

    /// Answer to `LoadTodos`, already sorted.
    TodosLoaded { request_id: u64, todos: Vec<TodoItem> },

    TodoCreated { item: TodoItem },

    TodoUpdated { item: TodoItem },

    /// `existed` is false when the id was already gone.
    TodoDeleted { id: TodoId, existed: bool },

    TodoFetched { item: TodoItem },

    /// The referenced task no longer exists.
    TodoNotFound { id: TodoId, operation: String },

    /// Any other failure. `operation` names the request that failed.
    Error { operation: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_without_otel_layer_have_no_trace_context() {
        let msg = WorkerMessage::delete_todo(TodoId(3));
        assert!(msg.trace_context().is_none());
        assert_eq!(msg.operation(), "delete task");
    }

    #[test]
    fn test_message_json_omits_missing_trace_context() {
        let msg = WorkerMessage::load_todos(7, SortOrder::Title);
        let json = serde_json::to_string(&msg).unwrap();

        assert!(!json.contains("trace_context"));
        assert!(json.contains("\"sort\":\"title\""));
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), msg);
    }

    #[test]
    fn test_response_parses_from_json() {
        let json = r#"{"TodoDeleted":{"id":4,"existed":false}}"#;
        let response: WorkerResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response,
            WorkerResponse::TodoDeleted {
                id: TodoId(4),
                existed: false
            }
        );
    }
}

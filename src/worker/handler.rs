//! Task worker: runs store operations off the plugin's render path.
//!
//! [`TodoWorker`] owns the [`TodoStore`] and turns each [`WorkerMessage`] into
//! exactly one [`WorkerResponse`]. It has no Zellij dependency, so the binary
//! wraps it for `register_worker!` and tests drive it directly.

use crate::domain::error::{Result, TodoError};
use crate::domain::{SortOrder, TodoId, TodoItem};
use crate::infrastructure::paths;
use crate::storage::{JsonStorage, TodoRecord, TodoStore};
use crate::worker::messages::operation;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Worker-side state. The store is opened by `OpenStore`, or lazily at the
/// default path by the first other request.
#[derive(Default)]
pub struct TodoWorker {
    store: Option<Box<dyn TodoStore>>,
    data_file: Option<PathBuf>,
}

impl TodoWorker {
    /// Creates a worker over an already opened store.
    #[must_use]
    pub fn with_store(store: Box<dyn TodoStore>) -> Self {
        Self {
            store: Some(store),
            data_file: None,
        }
    }

    /// Returns `true` once a store is open.
    #[must_use]
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    fn store(&mut self) -> Result<&mut Box<dyn TodoStore>> {
        if self.store.is_none() {
            let path = self.data_file.clone().unwrap_or_else(paths::default_data_file);
            tracing::debug!(path = ?path, "opening store lazily");
            self.store = Some(Box::new(JsonStorage::new(path)?));
        }

        self.store
            .as_mut()
            .ok_or_else(|| TodoError::Worker("store not initialized".to_string()))
    }

    /// Maps a store result onto a response. `NotFound` gets its own response
    /// so the plugin can fall back instead of showing a banner.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "store operation successful");
                on_success(value)
            }
            Err(TodoError::NotFound(id)) => {
                tracing::debug!(operation, todo_id = %id, "task not found");
                WorkerResponse::TodoNotFound {
                    id,
                    operation: operation.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "store operation failed");
                WorkerResponse::Error {
                    operation: operation.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_open_store(&mut self, data_file: Option<String>) -> WorkerResponse {
        let path = data_file
            .map(|f| PathBuf::from(paths::expand_tilde(&f)))
            .unwrap_or_else(paths::default_data_file);

        let result = if self.store.is_some() && self.data_file.as_ref() == Some(&path) {
            tracing::debug!("store already open");
            self.store().and_then(|store| store.list_items())
        } else {
            self.store = None;
            self.data_file = Some(path);
            self.store().and_then(|store| store.list_items())
        };

        Self::respond(operation::OPEN_STORE, result, |records| WorkerResponse::StoreOpened {
            count: records.len(),
        })
    }

    fn handle_load_todos(&mut self, request_id: u64, sort: SortOrder) -> WorkerResponse {
        Self::respond(
            operation::LOAD_TASKS,
            self.store().and_then(|store| store.list_items()),
            |records| {
                let mut todos: Vec<TodoItem> = records.into_iter().map(TodoItem::from).collect();
                sort.sort(&mut todos);
                tracing::debug!(request_id, count = todos.len(), "tasks loaded");
                WorkerResponse::TodosLoaded { request_id, todos }
            },
        )
    }

    fn handle_create_todo(&mut self, title: &str, description: Option<&str>) -> WorkerResponse {
        let result = if title.trim().is_empty() {
            Err(TodoError::Validation("empty title".to_string()))
        } else {
            self.store()
                .and_then(|store| store.create_item(title, description))
        };

        Self::respond(operation::CREATE_TASK, result, |record| WorkerResponse::TodoCreated {
            item: record.into(),
        })
    }

    fn handle_update_todo(&mut self, item: &TodoItem) -> WorkerResponse {
        let record = TodoRecord::from(item);
        let result = self.store().and_then(|store| {
            store.update_item(&record)?;
            store.get_item(record.id)
        });

        Self::respond(operation::UPDATE_TASK, result, |record| WorkerResponse::TodoUpdated {
            item: record.into(),
        })
    }

    fn handle_delete_todo(&mut self, id: TodoId) -> WorkerResponse {
        Self::respond(
            operation::DELETE_TASK,
            self.store().and_then(|store| store.delete_item(id.0)),
            |existed| WorkerResponse::TodoDeleted { id, existed },
        )
    }

    fn handle_get_todo(&mut self, id: TodoId) -> WorkerResponse {
        Self::respond(
            operation::GET_TASK,
            self.store().and_then(|store| store.get_item(id.0)),
            |record| WorkerResponse::TodoFetched {
                item: record.into(),
            },
        )
    }

    /// Re-parents the current thread on the sender's span, if one was sent.
    /// The guard must outlive the handling span.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let remote = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(remote)
                .attach(),
        )
    }

    /// Handles one request and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", operation = message.operation())
            .entered();

        match message {
            WorkerMessage::OpenStore { data_file, .. } => self.handle_open_store(data_file),
            WorkerMessage::LoadTodos {
                request_id, sort, ..
            } => self.handle_load_todos(request_id, sort),
            WorkerMessage::CreateTodo {
                title, description, ..
            } => self.handle_create_todo(&title, description.as_deref()),
            WorkerMessage::UpdateTodo { item, .. } => self.handle_update_todo(&item),
            WorkerMessage::DeleteTodo { id, .. } => self.handle_delete_todo(id),
            WorkerMessage::GetTodo { id, .. } => self.handle_get_todo(id),
        }
    }

    /// Decodes a JSON request, handles it and encodes the response. Returns
    /// `None` when either side fails to (de)serialize.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);
        serde_json::to_string(&response)
            .map_err(|e| tracing::error!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the tracing pipeline on the worker thread, once.
///
/// The worker never sees the plugin configuration, so it traces at the
/// default level.
pub fn init_worker_tracing() {
    if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn worker(dir: &TempDir) -> TodoWorker {
        let store = JsonStorage::new(dir.path().join("todos.json")).unwrap();
        TodoWorker::with_store(Box::new(store))
    }

    fn created(response: WorkerResponse) -> TodoItem {
        match response {
            WorkerResponse::TodoCreated { item } => item,
            other => panic!("expected TodoCreated, got {other:?}"),
        }
    }

    #[test]
    fn test_open_store_reports_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("todos.json");
        let mut worker = TodoWorker::default();
        assert!(!worker.has_store());

        let response = worker.handle_message(WorkerMessage::open_store(Some(
            path.to_string_lossy().into_owned(),
        )));

        assert_eq!(response, WorkerResponse::StoreOpened { count: 0 });
        assert!(worker.has_store());
    }

    #[test]
    fn test_create_then_load_sorted() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);

        created(worker.handle_message(WorkerMessage::create_todo("b".into(), None)));
        created(worker.handle_message(WorkerMessage::create_todo("a".into(), None)));

        let response = worker.handle_message(WorkerMessage::load_todos(9, SortOrder::Title));
        let WorkerResponse::TodosLoaded { request_id, todos } = response else {
            panic!("expected TodosLoaded");
        };
        assert_eq!(request_id, 9);
        let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_create_blank_title_is_error() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);

        let response = worker.handle_message(WorkerMessage::create_todo("  ".into(), None));
        assert_eq!(
            response,
            WorkerResponse::Error {
                operation: operation::CREATE_TASK.to_string(),
                message: TodoError::Validation("empty title".into()).to_string(),
            }
        );
        assert_eq!(
            worker.handle_message(WorkerMessage::load_todos(1, SortOrder::default())),
            WorkerResponse::TodosLoaded {
                request_id: 1,
                todos: vec![]
            }
        );
    }

    #[test]
    fn test_update_and_fetch() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);
        let item = created(worker.handle_message(WorkerMessage::create_todo("a".into(), None)));

        let response = worker.handle_message(WorkerMessage::update_todo(item.toggled()));
        let WorkerResponse::TodoUpdated { item: updated } = response else {
            panic!("expected TodoUpdated");
        };
        assert!(updated.completed);

        let fetched = worker.handle_message(WorkerMessage::get_todo(item.id));
        assert_eq!(fetched, WorkerResponse::TodoFetched { item: updated });
    }

    #[test]
    fn test_missing_ids_map_to_not_found() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);

        let response = worker.handle_message(WorkerMessage::get_todo(TodoId(5)));
        assert_eq!(
            response,
            WorkerResponse::TodoNotFound {
                id: TodoId(5),
                operation: "get task".into()
            }
        );

        let ghost = TodoItem::new(TodoId(6), "ghost", None);
        let response = worker.handle_message(WorkerMessage::update_todo(ghost));
        assert!(matches!(response, WorkerResponse::TodoNotFound { id: TodoId(6), .. }));
    }

    #[test]
    fn test_delete_absent_reports_not_existed() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);
        let item = created(worker.handle_message(WorkerMessage::create_todo("a".into(), None)));

        let first = worker.handle_message(WorkerMessage::delete_todo(item.id));
        let second = worker.handle_message(WorkerMessage::delete_todo(item.id));

        assert_eq!(first, WorkerResponse::TodoDeleted { id: item.id, existed: true });
        assert_eq!(second, WorkerResponse::TodoDeleted { id: item.id, existed: false });
    }

    #[test]
    fn test_handle_payload_round_trips_json() {
        let dir = TempDir::new().unwrap();
        let mut worker = worker(&dir);

        let payload = serde_json::to_string(&WorkerMessage::get_todo(TodoId(1))).unwrap();
        let reply = worker.handle_payload(&payload).unwrap();
        assert!(reply.contains("TodoNotFound"));

        assert!(worker.handle_payload("not json").is_none());
    }
}

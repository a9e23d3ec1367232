//! Create/edit form state.

use crate::app::observable::{Observable, SubscriptionId};
use crate::domain::error::{Result, TodoError};
use crate::domain::{TodoId, TodoItem};
use crate::resources::{StringKey, Strings};

/// Input field with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
}

impl FormField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Title,
        }
    }
}

/// Snapshot of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub title: String,
    pub description: String,
    pub focus: FormField,
    /// Task being edited, `None` when creating.
    pub editing: Option<TodoId>,
    /// Inline error shown under the fields.
    pub error: Option<String>,
    /// A submit is waiting for the store.
    pub submitting: bool,
}

/// Store command produced by a valid submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Create {
        title: String,
        description: Option<String>,
    },
    Update {
        id: TodoId,
        title: String,
        description: Option<String>,
    },
}

/// Holder for [`FormSnapshot`].
#[derive(Debug, Default)]
pub struct TodoFormState {
    state: Observable<FormSnapshot>,
}

impl TodoFormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> &FormSnapshot {
        self.state.get()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state.get().submitting
    }

    /// Clears every field for a new task.
    pub fn reset(&mut self) {
        self.state.set_if_changed(FormSnapshot::default());
    }

    /// Pre-fills the form from an existing task.
    pub fn start_edit(&mut self, item: &TodoItem) {
        self.state.set(FormSnapshot {
            title: item.title.clone(),
            description: item.description.clone().unwrap_or_default(),
            editing: Some(item.id),
            ..FormSnapshot::default()
        });
    }

    pub fn push_char(&mut self, c: char) {
        self.state.update(|s| {
            match s.focus {
                FormField::Title => s.title.push(c),
                FormField::Description => s.description.push(c),
            }
            s.error = None;
        });
    }

    pub fn pop_char(&mut self) {
        self.state.update_if_changed(|s| {
            match s.focus {
                FormField::Title => s.title.pop(),
                FormField::Description => s.description.pop(),
            };
        });
    }

    pub fn next_field(&mut self) {
        self.state.update(|s| s.focus = s.focus.next());
    }

    /// Validates the fields and returns the store command. A blank title is
    /// rejected with an inline [`TodoError::Validation`] and focus moves back
    /// to the title.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Validation`] if the title is empty or whitespace,
    /// or if a submit is already in flight.
    pub fn submit(&mut self, strings: &Strings) -> Result<FormCommand> {
        let snapshot = self.state.get();
        if snapshot.submitting {
            return Err(TodoError::Validation(strings.get(StringKey::FormSaving).to_string()));
        }

        let title = snapshot.title.trim().to_string();
        if title.is_empty() {
            let message = strings.get(StringKey::FormTitleRequired).to_string();
            tracing::debug!("form rejected: empty title");
            self.state.update(|s| {
                s.error = Some(message.clone());
                s.focus = FormField::Title;
            });
            return Err(TodoError::Validation(message));
        }

        let description = Some(snapshot.description.trim())
            .filter(|d| !d.is_empty())
            .map(String::from);
        let command = match snapshot.editing {
            Some(id) => FormCommand::Update {
                id,
                title,
                description,
            },
            None => FormCommand::Create { title, description },
        };

        self.state.update(|s| {
            s.error = None;
            s.submitting = true;
        });
        Ok(command)
    }

    /// Records a failed submit and re-enables the form.
    pub fn fail_submit(&mut self, message: &str) {
        self.state.update(|s| {
            s.submitting = false;
            s.error = Some(message.to_string());
        });
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&FormSnapshot) + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TodoFormState {
        let mut form = TodoFormState::new();
        text.chars().for_each(|c| form.push_char(c));
        form
    }

    #[test]
    fn test_blank_title_is_rejected_inline() {
        let strings = Strings::default();
        let mut form = typed("   ");

        let err = form.submit(&strings).unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(form.snapshot().error.as_deref(), Some("Title is required"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_submit_trims_and_creates() {
        let strings = Strings::default();
        let mut form = typed(" Buy milk ");
        form.next_field();
        "2 liters".chars().for_each(|c| form.push_char(c));

        let command = form.submit(&strings).unwrap();
        assert_eq!(
            command,
            FormCommand::Create {
                title: "Buy milk".into(),
                description: Some("2 liters".into())
            }
        );
        assert!(form.is_submitting());
        assert!(form.submit(&strings).is_err());
    }

    #[test]
    fn test_edit_produces_update() {
        let strings = Strings::default();
        let item = TodoItem::new(TodoId(4), "Call mom", None);
        let mut form = TodoFormState::new();
        form.start_edit(&item);
        form.push_char('!');

        let command = form.submit(&strings).unwrap();
        assert_eq!(
            command,
            FormCommand::Update {
                id: TodoId(4),
                title: "Call mom!".into(),
                description: None
            }
        );
    }

    #[test]
    fn test_typing_clears_error_and_fail_reenables() {
        let strings = Strings::default();
        let mut form = TodoFormState::new();
        let _ = form.submit(&strings);
        form.push_char('a');
        assert!(form.snapshot().error.is_none());

        form.submit(&strings).unwrap();
        form.fail_submit("disk full");
        assert!(!form.is_submitting());
        assert_eq!(form.snapshot().error.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = typed("x");
        form.next_field();
        form.reset();
        assert_eq!(*form.snapshot(), FormSnapshot::default());
    }
}

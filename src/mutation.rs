//! Create/edit/delete orchestration as explicit state machines.
//!
//! Editing and deletion run as two independent machines so a stale editing
//! target or two open confirmations cannot happen by construction:
//! `Idle -> Editing -> Submitting -> Idle|Editing` and
//! `Idle -> Confirming -> Deleting -> Idle`.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{Template, ViewKind};

/// Form payload for create/update, mirroring the write endpoint's body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub is_featured: bool,
}

impl Default for TemplateDraft {
    fn default() -> Self {
        TemplateDraft {
            title: String::new(),
            description: String::new(),
            content: String::new(),
            category: "General".to_string(),
            tags: Vec::new(),
            is_public: false,
            is_featured: false,
        }
    }
}

impl TemplateDraft {
    pub fn from_template(t: &Template) -> Self {
        TemplateDraft {
            title: t.title.clone(),
            description: t.description.clone(),
            content: t.content.clone(),
            category: t.category.clone(),
            tags: t.tags.clone(),
            is_public: t.is_public,
            is_featured: t.is_featured,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditorState {
    Idle,
    Editing {
        /// Id of the template being edited; `None` for a create.
        target: Option<String>,
        draft: TemplateDraft,
        /// Message from a rejected submit, kept for display.
        error: Option<String>,
    },
    Submitting {
        target: Option<String>,
        draft: TemplateDraft,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeletionState {
    Idle,
    Confirming { id: String, title: String },
    Deleting { id: String },
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Submit was called outside of `Editing`; nothing happened.
    NotEditing,
    Saved { id: String },
    Rejected { message: Option<String> },
}

#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    NothingPending,
    Deleted { id: String },
    Rejected { message: Option<String> },
}

#[derive(Debug, Default)]
pub struct MutationPipeline {
    editor: EditorState,
    deletion: DeletionState,
}

impl Default for EditorState {
    fn default() -> Self {
        EditorState::Idle
    }
}

impl Default for DeletionState {
    fn default() -> Self {
        DeletionState::Idle
    }
}

impl MutationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn deletion(&self) -> &DeletionState {
        &self.deletion
    }

    /// Open the create form with empty defaults. Refused unless the editor
    /// is idle.
    pub fn open_create(&mut self) -> bool {
        if self.editor != EditorState::Idle {
            return false;
        }
        self.editor = EditorState::Editing {
            target: None,
            draft: TemplateDraft::default(),
            error: None,
        };
        true
    }

    /// Open the edit form seeded from an existing template.
    pub fn open_edit(&mut self, template: &Template) -> bool {
        if self.editor != EditorState::Idle {
            return false;
        }
        self.editor = EditorState::Editing {
            target: Some(template.id.clone()),
            draft: TemplateDraft::from_template(template),
            error: None,
        };
        true
    }

    /// Replace the draft with the form's current contents.
    pub fn set_draft(&mut self, draft: TemplateDraft) {
        if let EditorState::Editing { draft: slot, .. } = &mut self.editor {
            *slot = draft;
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.editor, EditorState::Editing { .. }) {
            self.editor = EditorState::Idle;
        }
    }

    /// Submit the open form. On success every view and the dashboard are
    /// reloaded rather than merging the returned entity; on rejection the
    /// machine returns to `Editing` with the draft preserved and the server
    /// message attached, and no local state changes.
    pub async fn submit(&mut self, catalog: &Catalog) -> SubmitOutcome {
        let (target, draft) = match std::mem::replace(&mut self.editor, EditorState::Idle) {
            EditorState::Editing { target, draft, .. } => (target, draft),
            other => {
                self.editor = other;
                return SubmitOutcome::NotEditing;
            }
        };
        self.editor = EditorState::Submitting {
            target: target.clone(),
            draft: draft.clone(),
        };

        let result = match &target {
            Some(id) => catalog.gateway().update(id, &draft).await,
            None => catalog.gateway().create(&draft).await,
        };

        match result {
            Ok(saved) => {
                self.editor = EditorState::Idle;
                catalog.reload_after_write().await;
                SubmitOutcome::Saved { id: saved.id }
            }
            Err(err) => {
                let message = failure_message(&err);
                self.editor = EditorState::Editing {
                    target,
                    draft,
                    error: message.clone(),
                };
                SubmitOutcome::Rejected { message }
            }
        }
    }

    /// Ask for confirmation before deleting. Refused while another deletion
    /// is pending.
    pub fn request_delete(&mut self, template: &Template) -> bool {
        if self.deletion != DeletionState::Idle {
            return false;
        }
        self.deletion = DeletionState::Confirming {
            id: template.id.clone(),
            title: template.title.clone(),
        };
        true
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.deletion, DeletionState::Confirming { .. }) {
            self.deletion = DeletionState::Idle;
        }
    }

    /// Run the confirmed deletion. On success the template disappears from
    /// both views immediately, and the search view additionally reloads to
    /// reconcile pagination counts when it is the one on screen. On failure
    /// the pending target is cleared and nothing local changes.
    pub async fn confirm_delete(&mut self, catalog: &Catalog, active: ViewKind) -> DeleteOutcome {
        let id = match std::mem::replace(&mut self.deletion, DeletionState::Idle) {
            DeletionState::Confirming { id, .. } => id,
            other => {
                self.deletion = other;
                return DeleteOutcome::NothingPending;
            }
        };
        self.deletion = DeletionState::Deleting { id: id.clone() };

        match catalog.gateway().delete(&id).await {
            Ok(()) => {
                self.deletion = DeletionState::Idle;
                catalog.apply_local_delete(&id);
                if active == ViewKind::Search {
                    catalog.reload_search_again().await;
                }
                DeleteOutcome::Deleted { id }
            }
            Err(err) => {
                self.deletion = DeletionState::Idle;
                DeleteOutcome::Rejected {
                    message: failure_message(&err),
                }
            }
        }
    }
}

/// The server's rejection message when it sent one, otherwise the classified
/// failure itself.
fn failure_message(err: &crate::remote::GatewayError) -> Option<String> {
    Some(match err.message() {
        Some(m) => m.to_string(),
        None => err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn create_form_opens_with_defaults() {
        let mut pipeline = MutationPipeline::new();
        assert!(pipeline.open_create());
        let EditorState::Editing { target, draft, .. } = pipeline.editor() else {
            panic!("expected editing state");
        };
        assert_eq!(*target, None);
        assert_eq!(draft.category, "General");
        assert!(!draft.is_public);
        assert!(!draft.is_featured);
    }

    #[test]
    fn edit_form_seeds_from_template() {
        let mut pipeline = MutationPipeline::new();
        let t = &fallback::templates()[0];
        assert!(pipeline.open_edit(t));
        let EditorState::Editing { target, draft, .. } = pipeline.editor() else {
            panic!("expected editing state");
        };
        assert_eq!(target.as_deref(), Some(t.id.as_str()));
        assert_eq!(draft.title, t.title);
        assert_eq!(draft.tags, t.tags);
    }

    #[test]
    fn second_form_is_refused_while_editing() {
        let mut pipeline = MutationPipeline::new();
        assert!(pipeline.open_create());
        assert!(!pipeline.open_create());
        assert!(!pipeline.open_edit(&fallback::templates()[0]));
        pipeline.cancel_edit();
        assert!(pipeline.open_create());
    }

    #[test]
    fn delete_requires_a_pending_confirmation() {
        let mut pipeline = MutationPipeline::new();
        let t = &fallback::templates()[0];
        assert!(pipeline.request_delete(t));
        assert!(!pipeline.request_delete(t));
        pipeline.cancel_delete();
        assert_eq!(*pipeline.deletion(), DeletionState::Idle);
        assert!(pipeline.request_delete(t));
    }
}

//! # Document Store
//!
//! Single source of truth for one editing session: the current document,
//! the selection, and the snapshot history.
//!
//! ## Lifecycle
//!
//! ```text
//! Load ──► Select ──► Patch / Insert / Reorder ──► Undo / Redo ──► Save
//!   │         │                 │                       │
//! reset   selection        push snapshot          move index
//! ```
//!
//! Every mutation returns an [`EditOutcome`]. The document only changes when
//! the outcome is `Applied`; contract violations come back as `Rejected`
//! and leave the last good state in place.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stencil_tree::{editable_fields, locate, locate_mut, Document, FormField, Node};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::history::History;
use crate::keys::{EditorCommand, KeyCombo};
use crate::patch::FieldPatch;
use crate::persist::{PersistedState, Template, TemplateMeta};
use crate::sync::{SyncMessage, SyncResponse, SyncState};

/// Root node plus the (possibly nested) node being edited inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "editableGrandParentComponentKey")]
    pub root_key: String,

    #[serde(rename = "editableComponentKey")]
    pub target_key: String,
}

impl Selection {
    pub fn new(root_key: impl Into<String>, target_key: impl Into<String>) -> Self {
        Self {
            root_key: root_key.into(),
            target_key: target_key.into(),
        }
    }

    /// The root node itself is the edit target
    pub fn targets_root(&self) -> bool {
        self.root_key == self.target_key
    }
}

/// Options for [`DocumentStore::set_document`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Replace the document without recording a snapshot (undo/redo replay)
    pub skip_history: bool,
}

impl SetOptions {
    pub const REPLAY: SetOptions = SetOptions { skip_history: true };
}

/// Result of a store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Document replaced; `version` is the new edit counter
    Applied { version: u64 },
    /// Nothing to do (history bound reached, patch changed nothing, ...)
    Noop { reason: String },
    /// Precondition violated; document left untouched
    Rejected { reason: String },
}

impl EditOutcome {
    fn noop(reason: impl Into<String>) -> Self {
        EditOutcome::Noop {
            reason: reason.into(),
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        EditOutcome::Rejected {
            reason: reason.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

/// Editable document with selection and undo/redo history
#[derive(Debug, Clone)]
pub struct DocumentStore {
    document: Document,

    selection: Option<Selection>,

    history: History,

    /// Metadata of the loaded template, if the document came from one
    template: Option<TemplateMeta>,

    /// Increments whenever the shown document changes
    version: u64,

    sync: SyncState,
}

impl DocumentStore {
    /// Store with default configuration
    pub fn new(document: Document) -> Self {
        Self::with_config(document, &EditorConfig::default())
    }

    pub fn with_config(document: Document, config: &EditorConfig) -> Self {
        Self {
            history: History::with_max_levels(document.clone(), config.history_limit),
            document,
            selection: None,
            template: None,
            version: 0,
            sync: SyncState::default(),
        }
    }

    /// Store seeded from a stored template
    pub fn from_template(template: Template, config: &EditorConfig) -> Self {
        let mut store = Self::with_config(template.data, config);
        store.template = Some(template.meta);
        store
    }

    /// Store rehydrated from a previous session; history restarts at `data`
    pub fn restore(state: PersistedState, config: &EditorConfig) -> Self {
        let mut store = Self::with_config(state.data, config);
        store.selection = state.selection;
        store
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn template(&self) -> Option<&TemplateMeta> {
        self.template.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the document. Unless `skip_history` is set, the new document
    /// becomes a snapshot right after the current one and any redo branch is
    /// discarded.
    pub fn set_document(&mut self, document: Document, options: SetOptions) -> EditOutcome {
        if !options.skip_history {
            self.history.push(document.clone());
        }
        self.document = document;
        self.version += 1;

        debug!(
            version = self.version,
            index = self.history.current_index(),
            snapshots = self.history.len(),
            replay = options.skip_history,
            "document set"
        );

        EditOutcome::Applied {
            version: self.version,
        }
    }

    /// Replace the document with a freshly loaded template, dropping history
    pub fn load_template(&mut self, template: Template) {
        info!(
            title = %template.meta.title,
            roots = template.data.len(),
            "loading template"
        );

        self.history.reset(template.data.clone());
        self.document = template.data;
        self.template = Some(template.meta);
        self.selection = None;
        self.version += 1;
        self.sync.mark_synced(self.version);
    }

    /// Append a root node (drag-and-drop landing)
    pub fn insert_root_node(&mut self, node: Node) -> EditOutcome {
        if !node.key.is_empty() && self.document.root(&node.key).is_some() {
            warn!(key = %node.key, "root key already present");
            return EditOutcome::rejected(format!("root key {:?} already present", node.key));
        }
        if let Some(void) = node.find_void_with_children() {
            warn!(key = %void.key, element = %void.element, "void element with children");
            return EditOutcome::rejected(format!(
                "<{}> {:?} cannot have children",
                void.element, void.key
            ));
        }

        debug!(key = %node.key, element = %node.element, "inserting root node");

        let mut next = self.document.clone();
        next.roots_mut().push(node);
        self.set_document(next, SetOptions::default())
    }

    /// Reorder roots. `new_order` must be a permutation of the current root
    /// keys; anything else is rejected.
    pub fn reorder_roots<S: AsRef<str>>(&mut self, new_order: &[S]) -> EditOutcome {
        if new_order.len() != self.document.len() {
            return EditOutcome::rejected(format!(
                "expected {} root keys, got {}",
                self.document.len(),
                new_order.len()
            ));
        }

        let mut remaining: Vec<Option<Node>> =
            self.document.roots().iter().cloned().map(Some).collect();
        let mut reordered = Vec::with_capacity(remaining.len());

        for key in new_order {
            let key = key.as_ref();
            let slot = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|node| node.key == key));

            match slot.and_then(Option::take) {
                Some(node) => reordered.push(node),
                None => {
                    warn!(key, "reorder key is not an unused root");
                    return EditOutcome::rejected(format!("{:?} is not a remaining root key", key));
                }
            }
        }

        if reordered == self.document.roots() {
            return EditOutcome::noop("order unchanged");
        }

        self.set_document(Document::new(reordered), SetOptions::default())
    }

    /// Point the editor at `target_key` inside root `root_key`
    pub fn select_node(&mut self, root_key: impl Into<String>, target_key: impl Into<String>) {
        let selection = Selection::new(root_key, target_key);
        debug!(root = %selection.root_key, target = %selection.target_key, "select");
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Resolve the selection against the current document. A selection whose
    /// nodes no longer exist resolves to `None`.
    pub fn selected_node(&self) -> Option<&Node> {
        let selection = self.selection.as_ref()?;
        self.find_target(&selection.root_key, &selection.target_key)
    }

    /// Form controls for the selected node
    pub fn selected_fields(&self) -> Vec<FormField> {
        self.selected_node().map(editable_fields).unwrap_or_default()
    }

    /// Node `target_key` searched only within root `root_key`
    pub fn find_target(&self, root_key: &str, target_key: &str) -> Option<&Node> {
        let root = self.document.root(root_key)?;
        if root_key == target_key {
            Some(root)
        } else {
            locate(root, target_key)
        }
    }

    /// Apply a field patch to one node and record the result as a snapshot
    pub fn apply_field_patch(
        &mut self,
        root_key: &str,
        target_key: &str,
        patch: &FieldPatch,
    ) -> EditOutcome {
        let mut next = self.document.clone();

        let Some(root) = next.root_mut(root_key) else {
            return EditOutcome::rejected(format!("no root with key {:?}", root_key));
        };
        let Some(target) = locate_mut(root, target_key) else {
            return EditOutcome::rejected(format!(
                "no node {:?} under root {:?}",
                target_key, root_key
            ));
        };

        let report = patch.apply_to(target);
        debug!(
            root = root_key,
            target = target_key,
            changed = report.changed.len(),
            unchanged = report.unchanged.len(),
            skipped = report.skipped.len(),
            "field patch"
        );

        if !report.has_changes() {
            return EditOutcome::noop("patch changed no editable field");
        }

        self.set_document(next, SetOptions::default())
    }

    /// Decode submitted form entries and apply them as a patch
    pub fn apply_form_submission<I, K>(&mut self, root_key: &str, target_key: &str, entries: I) -> EditOutcome
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let patch = FieldPatch::from_form(entries);
        self.apply_field_patch(root_key, target_key, &patch)
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> EditOutcome {
        match self.history.back() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                self.set_document(snapshot, SetOptions::REPLAY)
            }
            None => EditOutcome::noop("nothing to undo"),
        }
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> EditOutcome {
        match self.history.forward() {
            Some(snapshot) => {
                let snapshot = snapshot.clone();
                self.set_document(snapshot, SetOptions::REPLAY)
            }
            None => EditOutcome::noop("nothing to redo"),
        }
    }

    /// Route a keyboard shortcut to undo/redo
    pub fn handle_key(&mut self, combo: KeyCombo) -> EditOutcome {
        match combo.command() {
            Some(EditorCommand::Undo) => self.undo(),
            Some(EditorCommand::Redo) => self.redo(),
            None => EditOutcome::noop(format!("{} is not bound", combo)),
        }
    }

    /// Current document and selection, for saving between sessions
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            data: self.document.clone(),
            selection: self.selection.clone(),
        }
    }

    /// The loaded template with the current document as its data
    pub fn to_template(&self) -> Template {
        Template {
            meta: self.template.clone().unwrap_or_default(),
            data: self.document.clone(),
        }
    }

    /// Whether the document changed since the last confirmed sync
    pub fn is_dirty(&self) -> bool {
        self.sync.is_dirty(self.version)
    }

    pub fn mark_synced(&mut self) {
        self.sync.mark_synced(self.version);
    }

    /// Build an update message for the loaded template and mark the current
    /// version as in flight. `None` when the template has no id.
    pub fn sync_message(&mut self) -> Option<SyncMessage> {
        let template_id = self.template.as_ref()?.id?;
        self.sync.begin(self.version);

        Some(SyncMessage::UpdateTemplateData {
            template_id,
            template_data: self.document.clone(),
        })
    }

    /// Feed the service reply to a previous [`sync_message`](Self::sync_message)
    pub fn acknowledge_sync(&mut self, response: &SyncResponse) -> bool {
        self.sync.acknowledge(response)
    }
}

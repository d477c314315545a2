//! # Stencil Editor
//!
//! Editing engine for component-tree documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ tree: Node model, locator, attribute views  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: DocumentStore                       │
//! │  - Selection (root key + target key)        │
//! │  - Field patches from generated forms       │
//! │  - Insert / reorder roots                   │
//! │  - Snapshot history with undo/redo          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: renderer, form UI, template service   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One mutation surface**: every change goes through the store
//! 2. **Whole-document snapshots**: undo/redo replays, never re-records
//! 3. **Last known good**: rejected edits leave the document untouched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_editor::{DocumentStore, FieldPatch};
//! use stencil_tree::{Document, FieldPath};
//!
//! let mut store = DocumentStore::new(Document::from_json(json)?);
//!
//! store.select_node("hero", "hero-title");
//! let patch = FieldPatch::new().set(FieldPath::attribute(["title"]), "Welcome");
//! store.apply_field_patch("hero", "hero-title", &patch);
//!
//! store.undo();
//! store.redo();
//! ```

mod config;
mod errors;
mod form;
mod history;
mod keys;
mod patch;
mod persist;
mod store;
mod sync;

pub use config::{load_config_file, EditorConfig, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use form::{decode_form_key, form_key, FormKeys, FORM_KEY_SEPARATOR};
pub use history::History;
pub use keys::{EditorCommand, KeyCombo};
pub use patch::{FieldPatch, PatchReport, PatchSkip};
pub use persist::{PersistedState, Template, TemplateMeta};
pub use store::{DocumentStore, EditOutcome, Selection, SetOptions};
pub use sync::{SyncMessage, SyncResponse, SyncState};

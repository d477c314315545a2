//! # Stencil Tree
//!
//! Data model for component-tree documents.
//!
//! ```text
//! Document ─ [Node] ─┬─ attributes: name → Text | Number | Field | Group
//!                    └─ children:   Field | Node | [Node] | Text
//! ```
//!
//! - [`locate`] finds a node by key (depth-first, pre-order)
//! - [`resolve_attributes`] flattens attributes for a renderer
//! - [`editable_fields`] lists the form controls for a node

pub mod attributes;
pub mod error;
pub mod locator;
pub mod node;
pub mod visitor;

pub use attributes::{
    editable_fields, field_at, field_at_mut, resolve_attributes, FieldPath, FormControl, FormField,
};
pub use error::ShapeError;
pub use locator::{locate, locate_mut, locate_path, Fragment};
pub use node::{
    Attribute, Attributes, Children, Document, EditableField, ElementTag, Node, VOID_ELEMENTS,
};
pub use visitor::{duplicate_keys, walk_document, walk_node, KeyCollector, Visitor};

//! GenUI Schema - the closed catalog of dashboard nodes
//!
//! A dashboard is a tree of [`UiNode`]s. Each node has a `type` tag drawn
//! from a fixed catalog, a `props` object whose shape depends on that tag,
//! and (for containers only) a `children` array.
//!
//! The only way from untrusted JSON to a `UiNode` is the [`Validator`]:
//! it either returns a fully typed tree or a [`ValidationError`] locating
//! the first problem. Nothing is coerced and nothing is partially accepted.
//!
//! # Example
//!
//! ```rust
//! use genui_schema::{parse, NodeKind};
//! use serde_json::json;
//!
//! let tree = parse(&json!({
//!     "type": "Page",
//!     "props": { "title": "Demo" },
//!     "children": [{ "type": "Header", "props": { "text": "Hello" } }]
//! }))
//! .unwrap();
//!
//! assert_eq!(tree.kind(), NodeKind::Page);
//! assert_eq!(tree.node_count(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod json_schema;
pub mod node;
pub mod props;
pub mod validate;

pub use error::{SchemaError, ValidationError, ValidationErrorKind};
pub use json_schema::output_schema;
pub use node::{Category, ChildPolicy, NodeKind, UiNode, UnknownKind};
pub use validate::{parse, parse_str, Validator, DEFAULT_MAX_DEPTH};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and checking trees
    pub use crate::props::*;
    pub use crate::{parse, parse_str, NodeKind, UiNode, ValidationError, Validator};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types for tree validation
//!
//! Every failure carries the JSON path of the offending node so a caller
//! (or a model being re-prompted) can see exactly where the tree went wrong.

use std::fmt;

/// Why a node was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Node is not a JSON object
    NotAnObject,
    /// `type` key absent or not a string
    MissingDiscriminant,
    /// `type` names no catalog entry
    UnknownDiscriminant(String),
    /// Node object carries a key other than `type`, `props`, `children`
    UnexpectedKey(String),
    /// `props` key absent
    MissingProps,
    /// `props` does not match the shape for this kind
    InvalidProps { field: Option<String>, message: String },
    /// Container without a `children` array
    MissingChildren,
    /// Leaf kind carrying `children`
    UnexpectedChildren,
    /// `children` present but not an array
    InvalidChildren,
    /// Well-shaped props breaking a semantic rule
    Constraint { field: String, message: String },
    /// Tree nests deeper than the configured limit
    DepthExceeded { max: usize },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("node must be a JSON object"),
            Self::MissingDiscriminant => f.write_str("missing string field 'type'"),
            Self::UnknownDiscriminant(t) => write!(f, "unknown node type '{t}'"),
            Self::UnexpectedKey(k) => write!(f, "unexpected key '{k}'"),
            Self::MissingProps => f.write_str("missing field 'props'"),
            Self::InvalidProps {
                field: Some(field),
                message,
            } => write!(f, "invalid props at '{field}': {message}"),
            Self::InvalidProps { field: None, message } => write!(f, "invalid props: {message}"),
            Self::MissingChildren => f.write_str("missing 'children' array"),
            Self::UnexpectedChildren => f.write_str("this node type does not accept children"),
            Self::InvalidChildren => f.write_str("'children' must be an array"),
            Self::Constraint { field, message } => write!(f, "'{field}' {message}"),
            Self::DepthExceeded { max } => write!(f, "tree is nested deeper than {max} levels"),
        }
    }
}

/// A rejected tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}{}: {kind}", type_suffix(.node_type.as_deref()))]
pub struct ValidationError {
    /// JSON path of the offending node, e.g. `$.children[1]`
    pub path: String,
    /// `type` of the offending node, when it had a readable one
    pub node_type: Option<String>,
    pub kind: ValidationErrorKind,
}

fn type_suffix(node_type: Option<&str>) -> String {
    node_type.map(|t| format!(" ({t})")).unwrap_or_default()
}

impl ValidationError {
    pub(crate) fn new(path: &str, node_type: Option<&str>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.to_string(),
            node_type: node_type.map(str::to_string),
            kind,
        }
    }

    /// Offending props field, when the failure is inside `props`
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            ValidationErrorKind::InvalidProps { field, .. } => field.as_deref(),
            ValidationErrorKind::Constraint { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Node path extended into `props` when a field is known,
    /// e.g. `$.children[1].props.lines[0].dataKey`
    #[must_use]
    pub fn full_path(&self) -> String {
        match self.field() {
            Some(field) => format!("{}.props.{field}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Errors from [`parse_str`](crate::parse_str)
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Input is not JSON at all
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is JSON but not a valid tree
    #[error("invalid tree: {0}")]
    Validation(#[from] ValidationError),
}

impl SchemaError {
    /// Whether the input failed to parse as JSON (as opposed to failing validation)
    #[inline]
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

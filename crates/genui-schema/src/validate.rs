//! The single entry point from untrusted JSON to a typed tree
//!
//! Validation walks the candidate value top-down. Node-level structure
//! (`type`, `props`, `children`) is checked by hand so errors can say which
//! node failed; each `props` object is then decoded into its typed struct
//! with `serde_path_to_error` so errors can say which field failed. The first
//! failure aborts the whole walk: a tree is either entirely valid or rejected.

use crate::error::{SchemaError, ValidationError, ValidationErrorKind};
use crate::node::{ChildPolicy, NodeKind, UiNode};
use crate::props::Constraints;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Default nesting limit; the root sits at depth 1
pub const DEFAULT_MAX_DEPTH: usize = 32;

const NODE_KEYS: [&str; 3] = ["type", "props", "children"];

/// Validator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_depth: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A node whose envelope has been checked but whose payload has not
struct Candidate<'a> {
    path: &'a str,
    kind: NodeKind,
    depth: usize,
    props: &'a Value,
    children: Option<&'a Value>,
}

impl Candidate<'_> {
    fn error(&self, kind: ValidationErrorKind) -> ValidationError {
        ValidationError::new(self.path, Some(self.kind.as_str()), kind)
    }

    fn props<P>(&self) -> Result<P, ValidationError>
    where
        P: DeserializeOwned + Constraints,
    {
        let decoded: P = serde_path_to_error::deserialize(self.props).map_err(|err| {
            self.error(ValidationErrorKind::InvalidProps {
                field: offending_field(&err),
                message: err.inner().to_string(),
            })
        })?;
        decoded.check().map_err(|violation| {
            self.error(ValidationErrorKind::Constraint {
                field: violation.field,
                message: violation.message,
            })
        })?;
        Ok(decoded)
    }
}

impl Validator {
    /// Validator with the default depth limit
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the depth limit (clamped to at least 1)
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    #[inline]
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate an already-parsed JSON value
    pub fn parse(&self, value: &Value) -> Result<UiNode, ValidationError> {
        self.node(value, "$", 1)
    }

    /// Parse JSON text and validate it
    pub fn parse_str(&self, text: &str) -> Result<UiNode, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(self.parse(&value)?)
    }

    fn node(&self, value: &Value, path: &str, depth: usize) -> Result<UiNode, ValidationError> {
        let object = value
            .as_object()
            .ok_or_else(|| ValidationError::new(path, None, ValidationErrorKind::NotAnObject))?;

        let tag = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::new(path, None, ValidationErrorKind::MissingDiscriminant))?;

        let kind: NodeKind = tag.parse().map_err(|_| {
            ValidationError::new(
                path,
                Some(tag),
                ValidationErrorKind::UnknownDiscriminant(tag.to_string()),
            )
        })?;

        let candidate = self.envelope(object, path, kind, depth)?;
        decode(self, &candidate)
    }

    fn envelope<'a>(
        &self,
        object: &'a Map<String, Value>,
        path: &'a str,
        kind: NodeKind,
        depth: usize,
    ) -> Result<Candidate<'a>, ValidationError> {
        let fail = |k| ValidationError::new(path, Some(kind.as_str()), k);

        if depth > self.max_depth {
            return Err(fail(ValidationErrorKind::DepthExceeded {
                max: self.max_depth,
            }));
        }

        if let Some(key) = object.keys().find(|k| !NODE_KEYS.contains(&k.as_str())) {
            return Err(fail(ValidationErrorKind::UnexpectedKey(key.clone())));
        }

        let props = object
            .get("props")
            .ok_or_else(|| fail(ValidationErrorKind::MissingProps))?;

        let children = object.get("children").filter(|c| !c.is_null());
        match (kind.child_policy(), children) {
            (ChildPolicy::Required, None) => return Err(fail(ValidationErrorKind::MissingChildren)),
            (ChildPolicy::Forbidden, Some(_)) => {
                return Err(fail(ValidationErrorKind::UnexpectedChildren))
            }
            (_, Some(c)) if !c.is_array() => return Err(fail(ValidationErrorKind::InvalidChildren)),
            _ => {}
        }

        Ok(Candidate {
            path,
            kind,
            depth,
            props,
            children,
        })
    }

    fn children(&self, candidate: &Candidate<'_>) -> Result<Vec<UiNode>, ValidationError> {
        let Some(items) = candidate.children.and_then(Value::as_array) else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(i, child)| {
                let path = format!("{}.children[{i}]", candidate.path);
                self.node(child, &path, candidate.depth + 1)
            })
            .collect()
    }

    fn optional_children(
        &self,
        candidate: &Candidate<'_>,
    ) -> Result<Option<Vec<UiNode>>, ValidationError> {
        match candidate.children {
            Some(_) => self.children(candidate).map(Some),
            None => Ok(None),
        }
    }
}

/// Build the typed variant for an envelope-checked node
fn decode(v: &Validator, c: &Candidate<'_>) -> Result<UiNode, ValidationError> {
    let node = match c.kind {
        NodeKind::Page => UiNode::Page {
            props: c.props()?,
            children: v.children(c)?,
        },
        NodeKind::Grid => UiNode::Grid {
            props: c.props()?,
            children: v.children(c)?,
        },
        NodeKind::Stack => UiNode::Stack {
            props: c.props()?,
            children: v.children(c)?,
        },
        NodeKind::Card => UiNode::Card {
            props: c.props()?,
            children: v.children(c)?,
        },
        NodeKind::Tooltip => UiNode::Tooltip {
            props: c.props()?,
            children: v.children(c)?,
        },
        NodeKind::Badge => UiNode::Badge {
            props: c.props()?,
            children: v.optional_children(c)?,
        },
        NodeKind::Divider => UiNode::Divider { props: c.props()? },
        NodeKind::Header => UiNode::Header { props: c.props()? },
        NodeKind::Text => UiNode::Text { props: c.props()? },
        NodeKind::Image => UiNode::Image { props: c.props()? },
        NodeKind::Button => UiNode::Button { props: c.props()? },
        NodeKind::Input => UiNode::Input { props: c.props()? },
        NodeKind::List => UiNode::List { props: c.props()? },
        NodeKind::LineChart => UiNode::LineChart { props: c.props()? },
        NodeKind::BarChart => UiNode::BarChart { props: c.props()? },
        NodeKind::AreaChart => UiNode::AreaChart { props: c.props()? },
        NodeKind::PieChart => UiNode::PieChart { props: c.props()? },
        NodeKind::ComboChart => UiNode::ComboChart { props: c.props()? },
        NodeKind::ScatterChart => UiNode::ScatterChart { props: c.props()? },
        NodeKind::FunnelChart => UiNode::FunnelChart { props: c.props()? },
        NodeKind::TreemapChart => UiNode::TreemapChart { props: c.props()? },
        NodeKind::SparklineChart => UiNode::SparklineChart { props: c.props()? },
        NodeKind::MiniChart => UiNode::MiniChart { props: c.props()? },
        NodeKind::Table => UiNode::Table { props: c.props()? },
        NodeKind::DataGrid => UiNode::DataGrid { props: c.props()? },
        NodeKind::HeatmapTable => UiNode::HeatmapTable { props: c.props()? },
        NodeKind::StatCard => UiNode::StatCard { props: c.props()? },
        NodeKind::KpiCard => UiNode::KpiCard { props: c.props()? },
        NodeKind::MetricTrend => UiNode::MetricTrend { props: c.props()? },
        NodeKind::ComparisonBar => UiNode::ComparisonBar { props: c.props()? },
        NodeKind::LinearProgress => UiNode::LinearProgress { props: c.props()? },
        NodeKind::CircularProgress => UiNode::CircularProgress { props: c.props()? },
        NodeKind::ProgressRing => UiNode::ProgressRing { props: c.props()? },
        NodeKind::RadialGauge => UiNode::RadialGauge { props: c.props()? },
        NodeKind::Alert => UiNode::Alert { props: c.props()? },
        NodeKind::Timer => UiNode::Timer { props: c.props()? },
        NodeKind::Countdown => UiNode::Countdown { props: c.props()? },
        NodeKind::Rating => UiNode::Rating { props: c.props()? },
        NodeKind::Stepper => UiNode::Stepper { props: c.props()? },
        NodeKind::Accordion => UiNode::Accordion { props: c.props()? },
        NodeKind::Switch => UiNode::Switch { props: c.props()? },
        NodeKind::Slider => UiNode::Slider { props: c.props()? },
        NodeKind::Skeleton => UiNode::Skeleton { props: c.props()? },
        NodeKind::Avatar => UiNode::Avatar { props: c.props()? },
        NodeKind::AvatarGroup => UiNode::AvatarGroup { props: c.props()? },
        NodeKind::StockTicker => UiNode::StockTicker { props: c.props()? },
        NodeKind::MarketSentiment => UiNode::MarketSentiment { props: c.props()? },
        NodeKind::StockWatchlist => UiNode::StockWatchlist { props: c.props()? },
        NodeKind::FinancialChart => UiNode::FinancialChart { props: c.props()? },
    };
    Ok(node)
}

/// Field path inside `props` that an error points at.
///
/// `serde_path_to_error` reports the path of the value being decoded; for
/// missing and unknown keys that is the enclosing object, so the key named in
/// the message is appended.
fn offending_field(err: &serde_path_to_error::Error<serde_json::Error>) -> Option<String> {
    let base = match err.path().to_string() {
        root if root == "." => String::new(),
        other => other,
    };
    let message = err.inner().to_string();
    let named = if message.starts_with("missing field") || message.starts_with("unknown field") {
        backticked(&message)
    } else {
        None
    };

    match named {
        Some(name) if base.is_empty() || base == name || base.ends_with(&format!(".{name}")) => {
            if base.is_empty() {
                Some(name)
            } else {
                Some(base)
            }
        }
        Some(name) => Some(format!("{base}.{name}")),
        None if base.is_empty() => None,
        None => Some(base),
    }
}

fn backticked(message: &str) -> Option<String> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(message[start..start + len].to_string())
}

/// Validate with the default [`Validator`]
pub fn parse(value: &Value) -> Result<UiNode, ValidationError> {
    Validator::default().parse(value)
}

/// Parse JSON text and validate with the default [`Validator`]
pub fn parse_str(text: &str) -> Result<UiNode, SchemaError> {
    Validator::default().parse_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backticked_extracts_first_name() {
        assert_eq!(
            backticked("missing field `dataKey`"),
            Some("dataKey".to_string())
        );
        assert_eq!(
            backticked("unknown field `foo`, expected one of `text`"),
            Some("foo".to_string())
        );
        assert_eq!(backticked("invalid type: string"), None);
    }

    #[test]
    fn missing_top_level_prop() {
        let err = parse(&json!({ "type": "Header", "props": {} })).unwrap_err();
        assert_eq!(err.field(), Some("text"));
        assert_eq!(err.node_type.as_deref(), Some("Header"));
    }

    #[test]
    fn nested_missing_prop_has_full_field_path() {
        let err = parse(&json!({
            "type": "LineChart",
            "props": { "data": [], "xAxisKey": "m", "lines": [{ "stroke": "#000" }] }
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("lines[0].dataKey"));
    }

    #[test]
    fn wrong_type_points_at_field() {
        let err = parse(&json!({ "type": "Header", "props": { "text": 5 } })).unwrap_err();
        assert_eq!(err.field(), Some("text"));
    }

    #[test]
    fn max_depth_is_clamped() {
        assert_eq!(Validator::new().with_max_depth(0).max_depth(), 1);
        assert_eq!(Validator::new().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn null_children_on_leaf_is_absent() {
        let tree = parse(&json!({ "type": "Divider", "props": {}, "children": null })).unwrap();
        assert_eq!(tree.kind(), NodeKind::Divider);
    }
}

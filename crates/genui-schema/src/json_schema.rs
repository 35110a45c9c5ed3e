//! JSON Schema of the tree, for backends that accept schema-constrained output

use crate::node::UiNode;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

static OUTPUT_SCHEMA: Lazy<Arc<Value>> = Lazy::new(|| {
    let root = schemars::schema_for!(UiNode);
    Arc::new(serde_json::to_value(root).unwrap_or(Value::Null))
});

/// Draft-07 JSON Schema describing every legal [`UiNode`].
///
/// Generated once and shared; cloning the `Arc` is cheap.
#[must_use]
pub fn output_schema() -> Arc<Value> {
    Arc::clone(&OUTPUT_SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn schema_is_an_object_with_definitions() {
        let schema = output_schema();
        assert!(schema.is_object());
        assert!(schema.get("definitions").is_some());
    }

    #[test]
    fn schema_mentions_every_kind() {
        let text = output_schema().to_string();
        for kind in NodeKind::ALL {
            assert!(
                text.contains(&format!("\"{}\"", kind.as_str())),
                "schema is missing {kind}"
            );
        }
    }
}

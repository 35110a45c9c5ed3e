//! The tree returned when generation cannot produce one

use genui_schema::props::{Align, AlertProps, Severity};
use genui_schema::UiNode;

pub const FALLBACK_TITLE: &str = "Generation Error";
pub const FALLBACK_HEADER: &str = "Unable to Generate Dashboard";

/// A small, always-valid dashboard that explains the failure to the user
#[must_use]
pub fn fallback_tree() -> UiNode {
    UiNode::page(
        FALLBACK_TITLE,
        vec![
            UiNode::header(FALLBACK_HEADER),
            UiNode::Alert {
                props: AlertProps {
                    severity: Severity::Error,
                    title: Some("Generation Failed".to_string()),
                    message: "The AI was unable to generate a valid dashboard. \
                              Please try a simpler request or use a template."
                        .to_string(),
                    dismissible: Some(false),
                },
            },
            UiNode::text(
                "Tips: Try requests like 'Create a simple sales dashboard with 3 KPI cards'",
                Align::Left,
            ),
        ],
    )
}

/// Whether `tree` is the fallback dashboard
#[must_use]
pub fn is_fallback(tree: &UiNode) -> bool {
    *tree == fallback_tree()
}

#[cfg(test)]
mod tests {
    use super::*;
    use genui_schema::{parse, NodeKind};

    #[test]
    fn fallback_passes_validation() {
        let tree = fallback_tree();
        assert_eq!(parse(&tree.to_value()).unwrap(), tree);
    }

    #[test]
    fn fallback_shape() {
        let tree = fallback_tree();
        let kinds: Vec<NodeKind> = tree.children().iter().map(UiNode::kind).collect();
        assert_eq!(kinds, vec![NodeKind::Header, NodeKind::Alert, NodeKind::Text]);
        assert!(matches!(
            &tree.children()[1],
            UiNode::Alert { props } if props.severity == Severity::Error
        ));
        assert!(is_fallback(&tree));
    }
}

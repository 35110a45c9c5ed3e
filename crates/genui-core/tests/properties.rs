//! Property tests for the orchestrator's totality guarantees.
//!
//! Whatever the prompt and whatever the backend says, callers get a tree
//! that passes validation, and refinement failures give back the input.

use genui_core::{is_fallback, Orchestrator};
use genui_schema::{parse, NodeKind, UiNode};
use genui_test_utils::{sales_tree, setup_orchestrator, with_pie_chart, ScriptedBackend, SALES_EXAMPLE_JSON};
use proptest::prelude::*;
use std::sync::Arc;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn orchestrator(reply: String) -> (Orchestrator, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::always(reply));
    (setup_orchestrator(backend.clone()), backend)
}

/// Backend replies: garbage text, JSON of the wrong shape, or a valid tree
fn reply() -> impl Strategy<Value = String> {
    prop_oneof![
        ".*",
        "\\{\"type\":\"[A-Za-z]{1,12}\",\"props\":\\{\\}\\}",
        Just(SALES_EXAMPLE_JSON.to_string()),
        Just(format!("```json\n{SALES_EXAMPLE_JSON}\n```")),
        Just("[]".to_string()),
        Just("null".to_string()),
    ]
}

fn assert_valid(tree: &UiNode) -> Result<(), TestCaseError> {
    let reparsed = parse(&tree.to_value());
    prop_assert!(reparsed.is_ok(), "returned tree does not validate: {:?}", reparsed);
    let mut kinds = Vec::new();
    tree.walk(&mut |node, _| kinds.push(node.kind().as_str().to_string()));
    for kind in kinds {
        prop_assert!(kind.parse::<NodeKind>().is_ok());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generate_is_total(prompt in "\\PC{0,200}", reply in reply()) {
        let (orchestrator, backend) = orchestrator(reply);
        let tree = block_on(orchestrator.generate(&prompt));

        assert_valid(&tree)?;
        prop_assert!(tree == sales_tree() || is_fallback(&tree));
        prop_assert!((1..=3).contains(&backend.calls()));
    }

    #[test]
    fn prop_refine_rolls_back_on_bad_reply(
        instruction in "\\PC{0,80}",
        garbage in "[^{}]{0,40}",
        with_pie in any::<bool>(),
    ) {
        let current = if with_pie { with_pie_chart(&sales_tree()) } else { sales_tree() };
        let (orchestrator, backend) = orchestrator(garbage);

        let tree = block_on(orchestrator.refine(current.clone(), &instruction));

        prop_assert_eq!(tree, current);
        prop_assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn prop_refine_output_is_always_valid(instruction in "\\PC{0,80}", reply in reply()) {
        let (orchestrator, _backend) = orchestrator(reply);
        let tree = block_on(orchestrator.refine(sales_tree(), &instruction));
        assert_valid(&tree)?;
    }
}

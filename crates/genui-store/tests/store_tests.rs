//! Functional tests for the dashboard and share stores.
//!
//! Core guarantees exercised here:
//! - Saved dashboards round-trip through export and import as new records.
//! - Imports with an invalid tree are rejected and leave the store unchanged.
//! - Share views are counted exactly, even under concurrent access.

use genui_store::{DashboardStore, DashboardUpdate, ShareStore, StoreError};
use genui_test_utils::{fixed_clock, sales_tree, with_pie_chart};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

#[test]
fn save_get_update_delete() {
    let store = DashboardStore::new().with_clock(fixed_clock);
    let saved = store.save("Sales", sales_tree(), Some("Q3 numbers".into()));

    assert_eq!(store.get(&saved.id), Some(saved.clone()));

    let updated = store
        .update(
            &saved.id,
            DashboardUpdate::new()
                .name("Sales v2")
                .tree(with_pie_chart(&sales_tree())),
        )
        .unwrap();
    assert_eq!(updated.name, "Sales v2");
    assert_eq!(updated.description.as_deref(), Some("Q3 numbers"));
    assert_eq!(updated.tree, with_pie_chart(&sales_tree()));
    assert_eq!(updated.created_at, saved.created_at);

    assert!(store.delete(&saved.id));
    assert!(!store.delete(&saved.id));
    assert_eq!(store.get(&saved.id), None);
}

#[test]
fn list_is_newest_first() {
    let store = DashboardStore::new();
    let first = store.save("first", sales_tree(), None);
    let second = store.save("second", sales_tree(), None);
    let third = store.save("third", sales_tree(), None);

    let ids: Vec<String> = store.list().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn duplicate_gets_new_id_and_copy_suffix() {
    let store = DashboardStore::new();
    let original = store.save("Sales", sales_tree(), None);

    let copy = store.duplicate(&original.id).unwrap();

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "Sales (Copy)");
    assert_eq!(copy.tree, original.tree);
    assert_eq!(store.len(), 2);
    assert!(matches!(
        store.duplicate("dash_missing"),
        Err(StoreError::NotFound(_))
    ));
}

/// Tenet: an export imports back as an equal dashboard under a new id.
#[test]
fn export_then_import() {
    let store = DashboardStore::new();
    let original = store.save("Sales", sales_tree(), Some("exported".into()));

    let text = store.export_json(&original.id).unwrap();
    assert!(text.contains("\"schema\""));
    let imported = store.import_json(&text).unwrap();

    assert_ne!(imported.id, original.id);
    assert_eq!(imported.name, original.name);
    assert_eq!(imported.description, original.description);
    assert_eq!(imported.tree, original.tree);
}

/// Tenet: an invalid tree never enters the store through import.
#[test]
fn import_rejects_invalid_tree() {
    let store = DashboardStore::new();
    let text = r#"{"name":"bad","schema":{"type":"Page","props":{"title":"t"},"children":[{"type":"Hologram","props":{}}]}}"#;

    let err = store.import_json(text).unwrap_err();

    assert!(matches!(err, StoreError::InvalidImport(ref msg) if msg.contains("Hologram")));
    assert!(store.is_empty());
}

#[test]
fn import_rejects_non_json() {
    let store = DashboardStore::new();
    assert!(matches!(
        store.import_json("not json"),
        Err(StoreError::InvalidImport(_))
    ));
    assert!(matches!(
        store.export_json("dash_missing"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn share_is_a_frozen_copy() {
    let dashboards = DashboardStore::new();
    let shares = ShareStore::new().with_clock(fixed_clock);
    let saved = dashboards.save("Sales", sales_tree(), None);

    let shared = shares.create(&saved.name, saved.tree.clone()).unwrap();
    dashboards
        .update(&saved.id, DashboardUpdate::new().tree(with_pie_chart(&saved.tree)))
        .unwrap();

    let viewed = shares.get(&shared.share_id).unwrap();
    assert_eq!(viewed.tree, sales_tree());
    assert_eq!(viewed.view_count, 1);
    assert_eq!(viewed.created_at, fixed_clock());
}

#[test]
fn missing_share_is_none() {
    let shares = ShareStore::new();
    assert_eq!(shares.get("zzzzzzzz"), None);
    assert!(!shares.delete("zzzzzzzz"));
}

/// Tenet: concurrent viewers never lose a view.
#[test]
fn concurrent_views_are_all_counted() {
    let shares = Arc::new(ShareStore::new());
    let share_id = shares.create("Sales", sales_tree()).unwrap().share_id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shares = Arc::clone(&shares);
            let share_id = share_id.clone();
            thread::spawn(move || {
                for _ in 0..250 {
                    assert!(shares.get(&share_id).is_some());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shares.peek(&share_id).unwrap().view_count, 2000);
}

#[test]
fn many_shares_get_distinct_ids() {
    let shares = ShareStore::new();
    for i in 0..200 {
        shares.create(format!("d{i}"), sales_tree()).unwrap();
    }
    assert_eq!(shares.len(), 200);
    assert_eq!(shares.list().len(), 200);
}

//! Saved dashboards
//!
//! A dashboard is stored as its validated tree plus a little metadata.
//! Exports are the record's JSON; imports go back through the validator, so
//! a hand-edited export cannot smuggle an invalid tree into the store.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use genui_schema::UiNode;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use ulid::Ulid;

/// Prefix of every dashboard id
pub const ID_PREFIX: &str = "dash_";

/// A dashboard saved by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDashboard {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "schema")]
    pub tree: UiNode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an update may replace; `None` leaves the field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub tree: Option<UiNode>,
}

impl DashboardUpdate {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    #[inline]
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    #[inline]
    #[must_use]
    pub fn tree(mut self, tree: UiNode) -> Self {
        self.tree = Some(tree);
        self
    }
}

/// The part of an export that an import needs
#[derive(Debug, Deserialize)]
struct ImportDocument {
    name: String,
    #[serde(default)]
    description: Option<String>,
    schema: UiNode,
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    dashboard: SavedDashboard,
}

/// Concurrent in-memory dashboard store
#[derive(Debug)]
pub struct DashboardStore {
    dashboards: DashMap<String, Entry>,
    next_seq: AtomicU64,
    clock: fn() -> DateTime<Utc>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dashboards: DashMap::new(),
            next_seq: AtomicU64::new(0),
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used for timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Save a new dashboard under a fresh id
    pub fn save(&self, name: impl Into<String>, tree: UiNode, description: Option<String>) -> SavedDashboard {
        let now = (self.clock)();
        let dashboard = SavedDashboard {
            id: format!("{ID_PREFIX}{}", Ulid::new().to_string().to_lowercase()),
            name: name.into(),
            description,
            tree,
            created_at: now,
            updated_at: now,
        };
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.dashboards.insert(
            dashboard.id.clone(),
            Entry {
                seq,
                dashboard: dashboard.clone(),
            },
        );
        tracing::info!(id = %dashboard.id, name = %dashboard.name, "dashboard saved");
        dashboard
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<SavedDashboard> {
        self.dashboards.get(id).map(|e| e.dashboard.clone())
    }

    /// Apply `update` and bump `updated_at`
    pub fn update(&self, id: &str, update: DashboardUpdate) -> Result<SavedDashboard, StoreError> {
        let mut entry = self
            .dashboards
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let dashboard = &mut entry.dashboard;
        if let Some(name) = update.name {
            dashboard.name = name;
        }
        if let Some(description) = update.description {
            dashboard.description = description;
        }
        if let Some(tree) = update.tree {
            dashboard.tree = tree;
        }
        dashboard.updated_at = (self.clock)();
        tracing::debug!(id, "dashboard updated");
        Ok(dashboard.clone())
    }

    /// Remove a dashboard; `false` if it did not exist
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.dashboards.remove(id).is_some();
        if removed {
            tracing::info!(id, "dashboard deleted");
        }
        removed
    }

    /// Save a copy named "<name> (Copy)"
    pub fn duplicate(&self, id: &str) -> Result<SavedDashboard, StoreError> {
        let original = self.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.save(
            format!("{} (Copy)", original.name),
            original.tree,
            original.description,
        ))
    }

    /// All dashboards, most recently saved first
    #[must_use]
    pub fn list(&self) -> Vec<SavedDashboard> {
        let mut entries: Vec<(u64, SavedDashboard)> = self
            .dashboards
            .iter()
            .map(|e| (e.seq, e.dashboard.clone()))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries.into_iter().map(|(_, d)| d).collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dashboards.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dashboards.is_empty()
    }

    /// Pretty JSON of the stored record
    pub fn export_json(&self, id: &str) -> Result<String, StoreError> {
        let dashboard = self.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::to_string_pretty(&dashboard)?)
    }

    /// Save an exported record as a new dashboard.
    ///
    /// Only `name`, `description` and `schema` are read; the tree is validated.
    pub fn import_json(&self, text: &str) -> Result<SavedDashboard, StoreError> {
        let document: ImportDocument = serde_json::from_str(text).map_err(|e| {
            tracing::warn!(error = %e, "rejected dashboard import");
            StoreError::InvalidImport(e.to_string())
        })?;
        Ok(self.save(document.name, document.schema, document.description))
    }
}

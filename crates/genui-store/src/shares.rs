//! Shared dashboards
//!
//! A share is a frozen copy of a tree behind a short public id. Every
//! [`ShareStore::get`] counts as a view.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use genui_schema::UiNode;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a share id
pub const SHARE_ID_LEN: usize = 8;

/// How many fresh ids to try before giving up
pub const MAX_ID_ATTEMPTS: u32 = 16;

/// Default iframe size for [`embed_code`]
pub const DEFAULT_EMBED_WIDTH: u32 = 800;
pub const DEFAULT_EMBED_HEIGHT: u32 = 600;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A dashboard published under a share id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDashboard {
    pub share_id: String,
    pub name: String,
    #[serde(rename = "schema")]
    pub tree: UiNode,
    pub created_at: DateTime<Utc>,
    pub view_count: u64,
}

/// Random lowercase alphanumeric id of [`SHARE_ID_LEN`] characters
#[must_use]
pub fn random_share_id() -> String {
    let mut rng = rand::rng();
    (0..SHARE_ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Public URL of a share
#[must_use]
pub fn share_url(base: &str, share_id: &str) -> String {
    format!("{}/share/{share_id}", base.trim_end_matches('/'))
}

/// HTML snippet that embeds a share URL
#[must_use]
pub fn embed_code(url: &str, width: u32, height: u32) -> String {
    format!(
        r#"<iframe src="{url}?embed=true" width="{width}" height="{height}" frameborder="0" style="border: 1px solid #e5e7eb; border-radius: 8px;" title="GenUI Dashboard"></iframe>"#
    )
}

/// Concurrent in-memory share store
#[derive(Debug)]
pub struct ShareStore {
    shares: DashMap<String, SharedDashboard>,
    id_source: fn() -> String,
    clock: fn() -> DateTime<Utc>,
}

impl Default for ShareStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shares: DashMap::new(),
            id_source: random_share_id,
            clock: Utc::now,
        }
    }

    /// Replace the id generator
    #[must_use]
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish `tree` under a new id
    pub fn create(&self, name: impl Into<String>, tree: UiNode) -> Result<SharedDashboard, StoreError> {
        let name = name.into();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let share_id = (self.id_source)();
            match self.shares.entry(share_id.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(attempt, share_id = %share_id, "share id collision");
                }
                Entry::Vacant(slot) => {
                    let shared = SharedDashboard {
                        share_id,
                        name,
                        tree,
                        created_at: (self.clock)(),
                        view_count: 0,
                    };
                    slot.insert(shared.clone());
                    tracing::info!(share_id = %shared.share_id, "dashboard shared");
                    return Ok(shared);
                }
            }
        }
        tracing::error!(attempts = MAX_ID_ATTEMPTS, "no free share id");
        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Fetch a share and count the view
    pub fn get(&self, share_id: &str) -> Option<SharedDashboard> {
        let mut shared = self.shares.get_mut(share_id)?;
        shared.view_count += 1;
        Some(shared.clone())
    }

    /// Fetch without counting a view
    #[must_use]
    pub fn peek(&self, share_id: &str) -> Option<SharedDashboard> {
        self.shares.get(share_id).map(|s| s.clone())
    }

    pub fn delete(&self, share_id: &str) -> bool {
        self.shares.remove(share_id).is_some()
    }

    /// All shares, newest first
    #[must_use]
    pub fn list(&self) -> Vec<SharedDashboard> {
        let mut shares: Vec<SharedDashboard> = self.shares.iter().map(|s| s.clone()).collect();
        shares.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.share_id.cmp(&b.share_id)));
        shares
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_use_the_alphabet() {
        for _ in 0..100 {
            let id = random_share_id();
            assert_eq!(id.len(), SHARE_ID_LEN);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn url_and_embed_format() {
        let url = share_url("https://genui.example/", "abc12345");
        assert_eq!(url, "https://genui.example/share/abc12345");
        let html = embed_code(&url, DEFAULT_EMBED_WIDTH, DEFAULT_EMBED_HEIGHT);
        assert!(html.starts_with(r#"<iframe src="https://genui.example/share/abc12345?embed=true" width="800" height="600""#));
        assert!(html.ends_with("</iframe>"));
    }

    #[test]
    fn constant_id_source_exhausts() {
        let store = ShareStore::new().with_id_source(|| "samesame".to_string());
        store.create("first", UiNode::header("a")).unwrap();
        let err = store.create("second", UiNode::header("b")).unwrap_err();
        assert!(matches!(err, StoreError::IdExhausted { attempts: MAX_ID_ATTEMPTS }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn peek_does_not_count() {
        let store = ShareStore::new();
        let shared = store.create("a", UiNode::header("a")).unwrap();
        assert_eq!(store.peek(&shared.share_id).unwrap().view_count, 0);
        assert_eq!(store.get(&shared.share_id).unwrap().view_count, 1);
        assert_eq!(store.peek(&shared.share_id).unwrap().view_count, 1);
    }

    #[test]
    fn get_alone_records_a_view() {
        let store = ShareStore::new();
        let shared = store.create("a", UiNode::header("a")).unwrap();
        store.get(&shared.share_id);
        store.get(&shared.share_id);
        assert_eq!(store.peek(&shared.share_id).unwrap().view_count, 2);
    }
}

//! GenUI Store - saved and shared dashboards
//!
//! Two concurrent in-memory stores keyed by string ids:
//!
//! - [`DashboardStore`] keeps the user's saved dashboards with
//!   export/import through JSON
//! - [`ShareStore`] publishes frozen copies under short ids and counts views
//!
//! Every tree that enters either store is a [`genui_schema::UiNode`], so it
//! has already passed validation.
//!
//! # Example
//!
//! ```rust,ignore
//! use genui_store::{DashboardStore, ShareStore, share_url};
//!
//! let dashboards = DashboardStore::new();
//! let saved = dashboards.save("Sales", tree, None);
//!
//! let shares = ShareStore::new();
//! let shared = shares.create(&saved.name, saved.tree.clone())?;
//! println!("{}", share_url("https://genui.example", &shared.share_id));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod dashboards;
pub mod error;
pub mod shares;

pub use dashboards::{DashboardStore, DashboardUpdate, SavedDashboard};
pub use error::StoreError;
pub use shares::{
    embed_code, random_share_id, share_url, ShareStore, SharedDashboard, DEFAULT_EMBED_HEIGHT,
    DEFAULT_EMBED_WIDTH,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for the stores
    pub use crate::{
        DashboardStore, DashboardUpdate, SavedDashboard, ShareStore, SharedDashboard, StoreError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! GenUI Core - prompt to dashboard orchestration
//!
//! The [`Orchestrator`] wraps a text-generation backend behind a strict
//! contract: whatever the model says, callers only ever receive a tree that
//! passed the schema validator.
//!
//! - `generate` retries malformed replies a bounded number of times and
//!   returns a fixed fallback dashboard when they run out or the backend
//!   call fails
//! - `refine` makes one attempt and returns the caller's tree on failure
//! - `generate_from_template` is `generate` with a catalog prompt
//!
//! # Example
//!
//! ```rust,ignore
//! use genui_core::{GenUiConfig, OpenAiCompatibleBackend, Orchestrator};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GenUiConfig::from_env()?;
//! let backend = OpenAiCompatibleBackend::from_config(config.backend.clone());
//! let orchestrator = Orchestrator::new(Arc::new(backend), config.orchestrator);
//!
//! let tree = orchestrator.generate("Create a simple sales dashboard").await;
//! println!("{}", serde_json::to_string_pretty(&tree)?);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod payload;
pub mod prompts;
pub mod templates;

pub use backend::{
    BackendConfig, ChatMessage, GenerationBackend, GenerationRequest, GenerationResponse,
    OpenAiCompatibleBackend, Role,
};
pub use config::{GenUiConfig, OrchestratorConfig};
pub use error::{AttemptFailure, BackendError, ConfigError, FailureKind};
pub use fallback::{fallback_tree, is_fallback};
pub use orchestrator::{Clock, Generation, Orchestrator, Outcome};
pub use templates::{Template, TEMPLATES};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the orchestrator
    pub use crate::{
        BackendError, GenUiConfig, GenerationBackend, GenerationRequest, GenerationResponse,
        Orchestrator, OrchestratorConfig, Outcome,
    };
    pub use genui_schema::UiNode;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

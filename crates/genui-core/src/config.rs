//! Configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! ```toml
//! [orchestrator]
//! max_retries = 2
//! request_timeout_secs = 60
//! max_depth = 32
//!
//! [backend]
//! base_url = "https://api.cerebras.ai/v1"
//! model = "qwen-3-235b-a22b-instruct-2507"
//! ```

use crate::backend::BackendConfig;
use crate::error::ConfigError;
use genui_schema::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_MODEL: &str = "GENUI_MODEL";
pub const ENV_BASE_URL: &str = "GENUI_BASE_URL";
pub const ENV_MAX_RETRIES: &str = "GENUI_MAX_RETRIES";
pub const ENV_TIMEOUT_SECS: &str = "GENUI_TIMEOUT_SECS";

/// Orchestrator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Extra attempts after a reply fails to parse or validate
    pub max_retries: u32,
    /// Upper bound on a single backend call
    pub request_timeout_secs: u64,
    /// Nesting limit handed to the validator
    pub max_depth: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            request_timeout_secs: 60,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl OrchestratorConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Total attempts a generation may make
    #[inline]
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "orchestrator.max_depth",
                message: "must be at least 1".into(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "orchestrator.request_timeout_secs",
                message: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenUiConfig {
    pub orchestrator: OrchestratorConfig,
    pub backend: BackendConfig,
}

impl GenUiConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_orchestrator(mut self, orchestrator: OrchestratorConfig) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    /// Parse and check TOML text (no environment overrides)
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, apply environment overrides, then check the result
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config: Self = toml::from_str(&text)?;
        let config = config.with_env_overrides()?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `GENUI_*` variables from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(ENV_MODEL) {
            self.backend.model = model;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.backend.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            self.orchestrator.max_retries = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_RETRIES,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.orchestrator.request_timeout_secs =
                raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.orchestrator.validate()?;
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "backend.base_url",
                message: "must not be empty".into(),
            });
        }
        if self.backend.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "backend.model",
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

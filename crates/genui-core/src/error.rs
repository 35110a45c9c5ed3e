//! Error types for the orchestrator layer
//!
//! None of these escape `generate` or `refine`; they surface in logs, in the
//! detailed outcome report, and from configuration loading.

use genui_schema::ValidationError;
use std::path::PathBuf;

/// Failures raised by a generation backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Connection-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the configured bound
    #[error("backend timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Quota or rate limit hit
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Credentials missing or rejected
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status
    #[error("backend returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// Response arrived but had no usable text
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Whether a later call could plausibly succeed.
    ///
    /// Bad credentials will fail the same way every time. The orchestrator
    /// never retries a backend failure itself; this only classifies it for
    /// logs and for callers deciding whether to try again.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Unauthorized(_))
    }
}

/// Why a single attempt did not produce a tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FailureKind {
    /// Response text was not JSON
    #[error("response was not valid JSON: {0}")]
    Parse(String),

    /// JSON did not satisfy the schema
    #[error("response failed validation: {0}")]
    Validation(ValidationError),

    /// The backend call itself failed
    #[error(transparent)]
    Backend(BackendError),
}

/// One failed attempt, numbered from 1
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("attempt {attempt}: {kind}")]
pub struct AttemptFailure {
    pub attempt: u32,
    pub kind: FailureKind,
}

/// Errors loading or checking configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this shape
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// A value is out of its allowed range
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_failures_are_terminal() {
        assert!(!BackendError::Unauthorized("bad key".into()).is_retryable());
        assert!(BackendError::RateLimited("slow down".into()).is_retryable());
        assert!(BackendError::Timeout { secs: 5 }.is_retryable());
        assert!(BackendError::Status {
            code: 500,
            body: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn attempt_failure_display() {
        let failure = AttemptFailure {
            attempt: 2,
            kind: FailureKind::Backend(BackendError::Timeout { secs: 30 }),
        };
        assert_eq!(failure.to_string(), "attempt 2: backend timed out after 30s");
    }
}

//! Store errors

/// Errors from the dashboard and share stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("not found: {0}")]
    NotFound(String),

    /// Import text is not an exported dashboard, or its tree is invalid
    #[error("invalid import: {0}")]
    InvalidImport(String),

    /// Could not find an unused share id
    #[error("could not allocate a unique share id after {attempts} attempts")]
    IdExhausted { attempts: u32 },

    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

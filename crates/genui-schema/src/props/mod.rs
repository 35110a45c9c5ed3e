//! Per-kind `props` shapes
//!
//! Every struct here is strict: unknown keys are rejected, optional keys may
//! be omitted (or given as `null`) and are left out again on serialization.
//! Shape checks come from serde; the few rules serde cannot express live in
//! [`Constraints`] impls next to the struct they guard.

pub mod charts;
pub mod common;
pub mod content;
pub mod financial;
pub mod layout;
pub mod metrics;
pub mod progress;
pub mod tables;
pub mod utility;

pub use charts::*;
pub use common::*;
pub use content::*;
pub use financial::*;
pub use layout::*;
pub use metrics::*;
pub use progress::*;
pub use tables::*;
pub use utility::*;

/// A semantic rule broken by an otherwise well-shaped `props` object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Offending field, relative to `props`
    pub field: String,
    /// What the rule requires
    pub message: String,
}

impl ConstraintViolation {
    /// Create new violation
    #[inline]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rules checked after a `props` object deserialized successfully
pub trait Constraints {
    /// Check the rules; the default accepts everything
    fn check(&self) -> Result<(), ConstraintViolation> {
        Ok(())
    }
}

pub(crate) fn non_empty<T>(field: &str, items: &[T]) -> Result<(), ConstraintViolation> {
    if items.is_empty() {
        Err(ConstraintViolation::new(field, "must contain at least 1 item"))
    } else {
        Ok(())
    }
}

pub(crate) fn within(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConstraintViolation> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConstraintViolation::new(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ))
    }
}

pub(crate) fn at_least(field: &str, value: f64, min: f64) -> Result<(), ConstraintViolation> {
    if value >= min {
        Ok(())
    } else {
        Err(ConstraintViolation::new(
            field,
            format!("must be at least {min}, got {value}"),
        ))
    }
}

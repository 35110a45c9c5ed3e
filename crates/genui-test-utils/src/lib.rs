//! Testing utilities for the GenUI workspace
//!
//! Stub backends and fixture trees shared by integration tests.

#![allow(missing_docs)]

pub mod backends;
pub mod fixtures;

pub use backends::{FailingBackend, Scripted, ScriptedBackend, SlowBackend};
pub use fixtures::{
    fixed_clock, pie_chart, sales_tree, to_json, with_pie_chart, FIXED_DATE, SALES_EXAMPLE_JSON,
};

use genui_core::{GenerationBackend, Orchestrator, OrchestratorConfig};
use std::sync::Arc;

/// Orchestrator over `backend` with default config and the fixed clock
pub fn setup_orchestrator(backend: Arc<dyn GenerationBackend>) -> Orchestrator {
    Orchestrator::new(backend, OrchestratorConfig::default()).with_clock(fixed_clock)
}

//! The orchestrator
//!
//! Turns prompts into validated trees. From the caller's side every
//! operation is total: generation falls back to a fixed error dashboard and
//! refinement rolls back to the tree it was given. What went wrong is still
//! reported through `tracing` and, for callers that want it, through the
//! `*_detailed` variants.

use crate::backend::{ChatMessage, GenerationBackend, GenerationRequest};
use crate::config::OrchestratorConfig;
use crate::error::{AttemptFailure, BackendError, FailureKind};
use crate::fallback::fallback_tree;
use crate::payload;
use crate::prompts::{dashboard_system_prompt, REFINEMENT_SYSTEM_PROMPT};
use chrono::{DateTime, SecondsFormat, Utc};
use genui_schema::{output_schema, UiNode, Validator};
use std::fmt;
use std::sync::Arc;

/// Source of the "current date" line in every request
pub type Clock = fn() -> DateTime<Utc>;

/// How a tree was obtained
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The backend produced a valid tree on attempt `attempts`
    Generated { attempts: u32 },
    /// The backend produced a valid refined tree
    Refined,
    /// Every attempt failed; the tree is the fallback dashboard
    Fallback { failures: Vec<AttemptFailure> },
    /// Refinement failed; the tree is the caller's original
    RolledBack { failure: AttemptFailure },
}

/// A tree plus a report of how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub tree: UiNode,
    pub outcome: Outcome,
}

impl Generation {
    /// Whether the caller got a substitute rather than what was asked for
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Fallback { .. } | Outcome::RolledBack { .. }
        )
    }
}

/// Drives a [`GenerationBackend`] until it yields a valid tree
pub struct Orchestrator {
    backend: Arc<dyn GenerationBackend>,
    config: OrchestratorConfig,
    validator: Validator,
    clock: Clock,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    #[must_use]
    pub fn new(backend: Arc<dyn GenerationBackend>, config: OrchestratorConfig) -> Self {
        let validator = Validator::new().with_max_depth(config.max_depth);
        Self {
            backend,
            config,
            validator,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, e.g. with a fixed instant in tests
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[inline]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Generate a dashboard for `prompt`; never fails
    pub async fn generate(&self, prompt: &str) -> UiNode {
        self.generate_detailed(prompt).await.tree
    }

    /// Refine `current` according to `instruction`; returns `current` on any failure
    pub async fn refine(&self, current: UiNode, instruction: &str) -> UiNode {
        self.refine_detailed(current, instruction).await.tree
    }

    /// Generate from one of the pre-authored template prompts
    pub async fn generate_from_template(&self, template_prompt: &str) -> UiNode {
        self.generate(template_prompt).await
    }

    /// [`generate`](Self::generate) with the outcome report
    pub async fn generate_detailed(&self, prompt: &str) -> Generation {
        let max_attempts = self.config.max_attempts();
        let mut failures = Vec::new();

        for attempt in 1..=max_attempts {
            tracing::info!(
                attempt,
                max_attempts,
                prompt_len = prompt.len(),
                backend = self.backend.name(),
                "generating dashboard"
            );
            tracing::debug!(prompt, "generation prompt");

            let request = self.request(dashboard_system_prompt(), self.generation_message(prompt));
            match self.attempt(request).await {
                Ok(tree) => {
                    tracing::info!(attempt, nodes = tree.node_count(), "dashboard generated");
                    return Generation {
                        tree,
                        outcome: Outcome::Generated { attempts: attempt },
                    };
                }
                Err(kind) => {
                    log_failure(attempt, &kind);
                    // Backend failures end generation; only bad replies are retried.
                    let terminal = matches!(kind, FailureKind::Backend(_));
                    failures.push(AttemptFailure { attempt, kind });
                    if terminal {
                        tracing::warn!(attempt, "backend call failed, skipping remaining attempts");
                        break;
                    }
                }
            }
        }

        tracing::error!(attempts = failures.len(), "generation failed, returning fallback dashboard");
        Generation {
            tree: fallback_tree(),
            outcome: Outcome::Fallback { failures },
        }
    }

    /// [`refine`](Self::refine) with the outcome report.
    ///
    /// Refinement makes exactly one attempt.
    pub async fn refine_detailed(&self, current: UiNode, instruction: &str) -> Generation {
        tracing::info!(
            instruction_len = instruction.len(),
            nodes = current.node_count(),
            backend = self.backend.name(),
            "refining dashboard"
        );
        tracing::debug!(instruction, "refinement instruction");

        let result = match self.refinement_message(&current, instruction) {
            Ok(message) => {
                self.attempt(self.request(REFINEMENT_SYSTEM_PROMPT, message))
                    .await
            }
            Err(e) => Err(FailureKind::Parse(e.to_string())),
        };

        match result {
            Ok(tree) => {
                tracing::info!(nodes = tree.node_count(), "dashboard refined");
                Generation {
                    tree,
                    outcome: Outcome::Refined,
                }
            }
            Err(kind) => {
                log_failure(1, &kind);
                tracing::warn!("refinement failed, keeping the current dashboard");
                Generation {
                    tree: current,
                    outcome: Outcome::RolledBack {
                        failure: AttemptFailure { attempt: 1, kind },
                    },
                }
            }
        }
    }

    fn request(&self, system: &str, user: String) -> GenerationRequest {
        GenerationRequest {
            system: system.to_string(),
            messages: vec![ChatMessage::user(user)],
            output_schema: Some(output_schema()),
        }
    }

    fn now(&self) -> String {
        (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn generation_message(&self, prompt: &str) -> String {
        format!("Create a dashboard for: {prompt}\n(Current Date: {})", self.now())
    }

    fn refinement_message(
        &self,
        current: &UiNode,
        instruction: &str,
    ) -> Result<String, serde_json::Error> {
        let tree = serde_json::to_string_pretty(current)?;
        Ok(format!(
            "Current dashboard:\n{tree}\n\nModification request: {instruction}\n(Current Date: {})",
            self.now()
        ))
    }

    /// One bounded backend round trip, parsed and validated
    async fn attempt(&self, request: GenerationRequest) -> Result<UiNode, FailureKind> {
        let timeout = self.config.request_timeout();
        let response = match tokio::time::timeout(timeout, self.backend.generate(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(FailureKind::Backend(e)),
            Err(_elapsed) => {
                return Err(FailureKind::Backend(BackendError::Timeout {
                    secs: self.config.request_timeout_secs,
                }))
            }
        };
        payload::decode(&response.text, &self.validator)
    }
}

fn log_failure(attempt: u32, kind: &FailureKind) {
    match kind {
        FailureKind::Parse(message) => {
            tracing::warn!(attempt, error = %message, "backend response is not JSON");
        }
        FailureKind::Validation(err) => {
            tracing::warn!(
                attempt,
                path = %err.full_path(),
                node_type = err.node_type.as_deref().unwrap_or("-"),
                error = %err.kind,
                "backend response failed validation"
            );
        }
        FailureKind::Backend(err) => {
            tracing::warn!(attempt, error = %err, retryable = err.is_retryable(), "backend call failed");
        }
    }
}

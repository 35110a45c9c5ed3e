//! Deterministic stand-ins for a model backend

use async_trait::async_trait;
use genui_core::{BackendError, GenerationBackend, GenerationRequest, GenerationResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum Scripted {
    Text(String),
    Error(BackendError),
}

impl From<&str> for Scripted {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Scripted {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<BackendError> for Scripted {
    fn from(err: BackendError) -> Self {
        Self::Error(err)
    }
}

/// Replays a fixed script; once exhausted the last reply repeats.
///
/// Every request is recorded for later inspection.
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Vec<Scripted>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scripted>,
    {
        let script: Vec<Scripted> = script.into_iter().map(Into::into).collect();
        assert!(!script.is_empty(), "script needs at least one reply");
        Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`
    pub fn always(text: impl Into<String>) -> Self {
        Self::new([Scripted::Text(text.into())])
    }

    /// Number of `generate` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// User message of the most recent request
    pub fn last_user_message(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|r| r.user_content().map(str::to_string))
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        let reply = &self.script[call.min(self.script.len() - 1)];
        match reply {
            Scripted::Text(text) => Ok(GenerationResponse::new(text.clone())),
            Scripted::Error(err) => Err(err.clone()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Fails every call with the same error
#[derive(Debug)]
pub struct FailingBackend {
    error: BackendError,
    calls: AtomicUsize,
}

impl FailingBackend {
    pub fn new(error: BackendError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// A network failure
    pub fn network() -> Self {
        Self::new(BackendError::Transport("connection reset by peer".into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for FailingBackend {
    async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Answers with `text` after sleeping for `delay`
#[derive(Debug)]
pub struct SlowBackend {
    delay: Duration,
    text: String,
    calls: AtomicUsize,
}

impl SlowBackend {
    pub fn new(delay: Duration, text: impl Into<String>) -> Self {
        Self {
            delay,
            text: text.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for SlowBackend {
    async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(GenerationResponse::new(self.text.clone()))
    }

    fn name(&self) -> &str {
        "slow"
    }
}

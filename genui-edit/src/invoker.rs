//! Ordered fallback across model candidates.
//!
//! Each candidate is asked once, under its own timeout. A backend error, a
//! timeout or a blank reply moves on to the next candidate; the first
//! non-blank reply wins.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{BackendError, EditError, EditResult};
use crate::prompt::EditRequest;

/// A model identifier and how long one attempt may take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub timeout: Duration,
}

impl Candidate {
    pub fn new(id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            id: id.into(),
            timeout,
        }
    }
}

/// Text generation service behind the invoker
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Full text of one completion from `candidate_id`
    async fn complete(&self, candidate_id: &str, request: &EditRequest) -> Result<String, BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Backend(String),
    Timeout(Duration),
    EmptyResponse,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Backend(msg) => write!(f, "{}", msg),
            FailureReason::Timeout(after) => write!(f, "Timeout after {}ms", after.as_millis()),
            FailureReason::EmptyResponse => write!(f, "Empty response from model"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub candidate: String,
    pub reason: FailureReason,
}

/// Winning reply plus the failures that preceded it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub candidate: String,
    pub text: String,
    pub failures: Vec<CandidateFailure>,
}

pub struct ModelFallbackInvoker {
    candidates: Vec<Candidate>,
    backend: Arc<dyn ModelBackend>,
}

impl ModelFallbackInvoker {
    pub fn new(candidates: Vec<Candidate>, backend: Arc<dyn ModelBackend>) -> Self {
        Self { candidates, backend }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Try candidates in order until one returns non-blank text.
    ///
    /// Cancelling `cancel` abandons the attempt in flight and tries no more.
    pub async fn invoke(&self, request: &EditRequest, cancel: &CancellationToken) -> EditResult<Invocation> {
        if self.candidates.is_empty() {
            return Err(EditError::NoCandidates);
        }

        let mut failures: Vec<CandidateFailure> = Vec::new();
        for candidate in &self.candidates {
            if cancel.is_cancelled() {
                return Err(EditError::Cancelled);
            }

            let attempt = tokio::time::timeout(
                candidate.timeout,
                self.backend.complete(&candidate.id, request),
            );
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Edit cancelled while waiting on {}", candidate.id);
                    return Err(EditError::Cancelled);
                }
                outcome = attempt => outcome,
            };

            let reason = match outcome {
                Ok(Ok(text)) if !text.trim().is_empty() => {
                    tracing::info!("Model {} succeeded", candidate.id);
                    return Ok(Invocation {
                        candidate: candidate.id.clone(),
                        text,
                        failures,
                    });
                }
                Ok(Ok(_)) => FailureReason::EmptyResponse,
                Ok(Err(e)) => FailureReason::Backend(e.to_string()),
                Err(_) => FailureReason::Timeout(candidate.timeout),
            };

            tracing::warn!("Model {} failed: {}", candidate.id, reason);
            failures.push(CandidateFailure {
                candidate: candidate.id.clone(),
                reason,
            });
        }

        let last = failures
            .last()
            .map(|f| f.reason.to_string())
            .unwrap_or_default();
        Err(EditError::AllCandidatesFailed {
            attempts: failures,
            last,
        })
    }
}

//! Per-request context threaded through every collaborator call
//!
//! Carries cancellation and an optional deadline, nothing else.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::DomainError;

/// Cancellation and deadline for a single resolution
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// Attach an existing cancellation token (builder pattern)
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Set an absolute deadline (builder pattern)
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now (builder pattern)
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context is already cancelled or past its deadline
    pub fn check(&self) -> Result<(), DomainError> {
        if self.cancellation.is_cancelled() {
            return Err(DomainError::Cancelled);
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(DomainError::DeadlineExceeded);
            }
        }

        Ok(())
    }

    /// Drive a collaborator future, aborting it on cancellation or deadline
    pub async fn run<T, F>(&self, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        self.check()?;

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(DomainError::Cancelled),
                    _ = tokio::time::sleep_until(deadline) => Err(DomainError::DeadlineExceeded),
                    result = fut => result,
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(DomainError::Cancelled),
                    result = fut => result,
                }
            }
        }
    }
}

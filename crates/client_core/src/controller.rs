//! Trigger → in-flight → resolved-or-failed → visible state.
//!
//! [`AsyncActionController`] owns a single [`DisplayState`] cell. Every
//! `trigger` starts exactly one call and flips the cell to `Pending`; each
//! resolution is passed through a [`ResolutionGate`] so that an older
//! invocation finishing late never overwrites the answer of a newer one
//! that already resolved.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use shared::domain::ActionKind;
use tokio::{
    sync::watch,
    task::{JoinError, JoinHandle},
};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::{
    error::InvocationError,
    failure::{FailureSink, InvocationFailure, TracingFailureSink},
    gate::{InvocationToken, ResolutionGate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed,
}

impl DisplayState {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Succeeded(text) => Some(text),
            _ => None,
        }
    }
}

/// Terminal state of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    ResolvedApplied,
    ResolvedSuppressed,
    FailedApplied,
    FailedSuppressed,
}

impl InvocationOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ResolvedApplied => "resolved_applied",
            Self::ResolvedSuppressed => "resolved_suppressed",
            Self::FailedApplied => "failed_applied",
            Self::FailedSuppressed => "failed_suppressed",
        }
    }

    pub fn is_applied(self) -> bool {
        matches!(self, Self::ResolvedApplied | Self::FailedApplied)
    }
}

/// One remote operation as seen by a controller: an input goes in, the
/// text to display comes out.
#[async_trait]
pub trait ActionCall: Send + Sync + 'static {
    type Input: Send + 'static;

    fn kind(&self) -> ActionKind;
    async fn call(&self, input: Self::Input) -> Result<String, InvocationError>;
}

/// Handle to an issued invocation.
///
/// Dropping it detaches the call; it keeps running and still resolves
/// through the gate.
#[derive(Debug)]
pub struct InvocationHandle {
    task: JoinHandle<InvocationOutcome>,
}

impl InvocationHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the invocation has resolved and its effect (if any) is
    /// visible in the display state.
    pub async fn outcome(self) -> Result<InvocationOutcome, JoinError> {
        self.task.await
    }
}

pub struct AsyncActionController<A: ActionCall> {
    inner: Arc<ControllerInner<A>>,
}

struct ControllerInner<A> {
    action: A,
    gate: Mutex<ResolutionGate>,
    display: watch::Sender<DisplayState>,
    failures: Arc<dyn FailureSink>,
}

impl<A: ActionCall> Clone for AsyncActionController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: ActionCall> AsyncActionController<A> {
    pub fn new(action: A) -> Self {
        Self::with_failure_sink(action, Arc::new(TracingFailureSink))
    }

    pub fn with_failure_sink(action: A, failures: Arc<dyn FailureSink>) -> Self {
        let (display, _) = watch::channel(DisplayState::Idle);
        Self {
            inner: Arc::new(ControllerInner {
                action,
                gate: Mutex::new(ResolutionGate::new()),
                display,
                failures,
            }),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.inner.action.kind()
    }

    /// Issues one call carrying `input`. Must be called from within a tokio
    /// runtime.
    pub fn trigger(&self, input: A::Input) -> InvocationHandle {
        let token = {
            let mut gate = self.inner.lock_gate();
            let token = gate.mint();
            self.inner.display.send_replace(DisplayState::Pending);
            token
        };
        debug!(
            action = self.kind().label(),
            token = token.0,
            "invocation issued"
        );

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = inner.action.call(input).await;
            inner.resolve(token, result)
        });
        InvocationHandle { task }
    }

    pub fn state(&self) -> DisplayState {
        self.inner.display.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.inner.display.subscribe()
    }

    /// Stream of display states, starting with the current one.
    pub fn updates(&self) -> WatchStream<DisplayState> {
        WatchStream::new(self.subscribe())
    }
}

impl<A: ActionCall> ControllerInner<A> {
    fn lock_gate(&self) -> MutexGuard<'_, ResolutionGate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(
        &self,
        token: InvocationToken,
        result: Result<String, InvocationError>,
    ) -> InvocationOutcome {
        let action = self.action.kind();
        let (outcome, failure) = {
            // Gate check and assignment stay under one lock.
            let mut gate = self.lock_gate();
            let applied = gate.admit(token);
            match result {
                Ok(text) if applied => {
                    self.display.send_replace(DisplayState::Succeeded(text));
                    (InvocationOutcome::ResolvedApplied, None)
                }
                Ok(_) => (InvocationOutcome::ResolvedSuppressed, None),
                Err(error) => {
                    let outcome = if applied {
                        self.display.send_replace(DisplayState::Failed);
                        InvocationOutcome::FailedApplied
                    } else {
                        InvocationOutcome::FailedSuppressed
                    };
                    let failure = InvocationFailure {
                        action,
                        token,
                        error,
                        applied,
                        occurred_at: Utc::now(),
                    };
                    (outcome, Some(failure))
                }
            }
        };

        debug!(
            action = action.label(),
            token = token.0,
            outcome = outcome.label(),
            "invocation resolved"
        );
        if let Some(failure) = failure {
            self.failures.record(&failure);
        }
        outcome
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

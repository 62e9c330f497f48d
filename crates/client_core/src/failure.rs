//! Structured failure channel.
//!
//! Failed invocations never escape the controller. Each one is turned into
//! an [`InvocationFailure`] and handed to a [`FailureSink`], whether or not
//! it ended up changing the display state.

use chrono::{DateTime, Utc};
use shared::domain::ActionKind;
use tokio::sync::broadcast;
use tracing::warn;

use crate::{
    error::{FailureKind, InvocationError},
    gate::InvocationToken,
};

#[derive(Debug, Clone)]
pub struct InvocationFailure {
    pub action: ActionKind,
    pub token: InvocationToken,
    pub error: InvocationError,
    /// Whether this failure replaced the visible state with `Failed`.
    pub applied: bool,
    pub occurred_at: DateTime<Utc>,
}

impl InvocationFailure {
    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

pub trait FailureSink: Send + Sync {
    fn record(&self, failure: &InvocationFailure);
}

/// Default sink: one structured `warn` event per failure.
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn record(&self, failure: &InvocationFailure) {
        warn!(
            action = failure.action.label(),
            token = failure.token.0,
            kind = failure.kind().label(),
            applied = failure.applied,
            error = %failure.error,
            "invocation failed"
        );
    }
}

/// Fans failures out to any number of subscribers.
///
/// Records are dropped when nobody is subscribed.
#[derive(Clone)]
pub struct BroadcastFailureSink {
    tx: broadcast::Sender<InvocationFailure>,
}

impl BroadcastFailureSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InvocationFailure> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastFailureSink {
    fn default() -> Self {
        Self::new(64)
    }
}

impl FailureSink for BroadcastFailureSink {
    fn record(&self, failure: &InvocationFailure) {
        let _ = self.tx.send(failure.clone());
    }
}

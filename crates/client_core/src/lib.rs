//! Asynchronous invocation controller for the summarise service.
//!
//! A user action becomes one call through a [`RemoteInvoker`]; its outcome
//! lands in a [`DisplayState`] cell that UI code reads or subscribes to.
//! Overlapping invocations are reconciled by [`ResolutionGate`]: the
//! visible state always comes from the newest invocation that has resolved.

pub mod actions;
pub mod controller;
pub mod error;
pub mod failure;
pub mod gate;
pub mod invoker;

pub use actions::{HealthProbe, Summarizer};
pub use controller::{
    ActionCall, AsyncActionController, DisplayState, InvocationHandle, InvocationOutcome,
};
pub use error::{FailureKind, InvocationError};
pub use failure::{BroadcastFailureSink, FailureSink, InvocationFailure, TracingFailureSink};
pub use gate::{InvocationToken, ResolutionGate};
pub use invoker::{HttpInvoker, RemoteInvoker};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::ActionKind, protocol::SummariseRequest};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::{
    controller::{ActionCall, AsyncActionController, DisplayState, InvocationHandle},
    error::InvocationError,
    failure::FailureSink,
    invoker::RemoteInvoker,
};

pub struct HealthCall {
    invoker: Arc<dyn RemoteInvoker>,
}

#[async_trait]
impl ActionCall for HealthCall {
    type Input = ();

    fn kind(&self) -> ActionKind {
        ActionKind::HealthProbe
    }

    async fn call(&self, _input: ()) -> Result<String, InvocationError> {
        Ok(self.invoker.health().await?.message)
    }
}

pub struct SummariseCall {
    invoker: Arc<dyn RemoteInvoker>,
}

#[async_trait]
impl ActionCall for SummariseCall {
    type Input = String;

    fn kind(&self) -> ActionKind {
        ActionKind::Summarise
    }

    async fn call(&self, youtubeurl: String) -> Result<String, InvocationError> {
        let response = self
            .invoker
            .summarise(SummariseRequest { youtubeurl })
            .await?;
        Ok(response.summary)
    }
}

/// Manually triggered `GET /`; displays the returned status message.
#[derive(Clone)]
pub struct HealthProbe {
    controller: AsyncActionController<HealthCall>,
}

impl HealthProbe {
    pub fn new(invoker: Arc<dyn RemoteInvoker>) -> Self {
        Self {
            controller: AsyncActionController::new(HealthCall { invoker }),
        }
    }

    pub fn with_failure_sink(
        invoker: Arc<dyn RemoteInvoker>,
        failures: Arc<dyn FailureSink>,
    ) -> Self {
        Self {
            controller: AsyncActionController::with_failure_sink(HealthCall { invoker }, failures),
        }
    }

    pub fn trigger(&self) -> InvocationHandle {
        self.controller.trigger(())
    }

    pub fn state(&self) -> DisplayState {
        self.controller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.controller.subscribe()
    }

    pub fn updates(&self) -> WatchStream<DisplayState> {
        self.controller.updates()
    }
}

/// Manually triggered `POST /summarise` for a user-supplied URL; displays
/// the returned summary.
#[derive(Clone)]
pub struct Summarizer {
    controller: AsyncActionController<SummariseCall>,
}

impl Summarizer {
    pub fn new(invoker: Arc<dyn RemoteInvoker>) -> Self {
        Self {
            controller: AsyncActionController::new(SummariseCall { invoker }),
        }
    }

    pub fn with_failure_sink(
        invoker: Arc<dyn RemoteInvoker>,
        failures: Arc<dyn FailureSink>,
    ) -> Self {
        Self {
            controller: AsyncActionController::with_failure_sink(
                SummariseCall { invoker },
                failures,
            ),
        }
    }

    pub fn trigger(&self, url: impl Into<String>) -> InvocationHandle {
        self.controller.trigger(url.into())
    }

    pub fn state(&self) -> DisplayState {
        self.controller.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.controller.subscribe()
    }

    pub fn updates(&self) -> WatchStream<DisplayState> {
        self.controller.updates()
    }
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;

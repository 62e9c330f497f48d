use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use shared::protocol::{HealthResponse, SummariseRequest, SummaryResponse};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use crate::{error::InvocationError, invoker::RemoteInvoker};

pub(crate) type SummaryReply = Result<String, InvocationError>;

/// Serves `app` on an ephemeral loopback port and returns its base URL.
pub(crate) async fn spawn_service(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// Base URL of a loopback port nothing listens on.
pub(crate) fn unreachable_url() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

/// Invoker whose summaries are released by the test, one reply per URL.
#[derive(Default)]
pub(crate) struct ScriptedInvoker {
    summaries: Mutex<HashMap<String, oneshot::Receiver<SummaryReply>>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedInvoker {
    pub(crate) async fn script(&self, url: &str) -> oneshot::Sender<SummaryReply> {
        let (tx, rx) = oneshot::channel();
        self.summaries.lock().await.insert(url.to_string(), rx);
        tx
    }

    pub(crate) async fn requested(&self) -> Vec<String> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl RemoteInvoker for ScriptedInvoker {
    async fn health(&self) -> Result<HealthResponse, InvocationError> {
        Ok(HealthResponse {
            message: "scripted".into(),
        })
    }

    async fn summarise(
        &self,
        request: SummariseRequest,
    ) -> Result<SummaryResponse, InvocationError> {
        self.requested.lock().await.push(request.youtubeurl.clone());
        let reply = self.summaries.lock().await.remove(&request.youtubeurl);
        let Some(reply) = reply else {
            return Err(InvocationError::Transport(format!(
                "no scripted reply for {}",
                request.youtubeurl
            )));
        };
        let summary = reply
            .await
            .unwrap_or_else(|_| Err(InvocationError::Transport("reply dropped".into())))?;
        Ok(SummaryResponse { summary })
    }
}

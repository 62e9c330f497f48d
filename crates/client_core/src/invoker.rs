use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiErrorBody,
    protocol::{
        health_route, summarise_route, HealthResponse, SummariseRequest, SummaryResponse,
    },
};
use tracing::debug;
use url::Url;

use crate::error::InvocationError;

/// Boundary to the remote summarise service.
///
/// Implementations are stateless from the controller's point of view and
/// give no ordering guarantee between concurrent calls.
#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    async fn health(&self) -> Result<HealthResponse, InvocationError>;
    async fn summarise(&self, request: SummariseRequest)
        -> Result<SummaryResponse, InvocationError>;
}

pub struct HttpInvoker {
    http: Client,
    base_url: Url,
}

impl HttpInvoker {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, InvocationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(InvocationError::from_transport)?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, InvocationError> {
        let mut base_url = Url::parse(base_url.trim())?;
        // Routes join relative to the base, so a path prefix must end in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url, InvocationError> {
        Ok(self.base_url.join(route.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl RemoteInvoker for HttpInvoker {
    async fn health(&self) -> Result<HealthResponse, InvocationError> {
        let url = self.endpoint(health_route())?;
        debug!(%url, "GET health");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(InvocationError::from_transport)?;
        read_json(res).await
    }

    async fn summarise(
        &self,
        request: SummariseRequest,
    ) -> Result<SummaryResponse, InvocationError> {
        let url = self.endpoint(summarise_route())?;
        debug!(%url, youtubeurl = %request.youtubeurl, "POST summarise");
        let res = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(InvocationError::from_transport)?;
        read_json(res).await
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, InvocationError> {
    let status = res.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("unknown status");
        let message = match res.text().await {
            Ok(body) if body.trim().is_empty() => reason.to_string(),
            Ok(body) => serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.message())
                .unwrap_or(body),
            Err(err) => format!("{reason} (error body unreadable: {err})"),
        };
        return Err(InvocationError::Application {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = res.bytes().await.map_err(InvocationError::from_transport)?;
    serde_json::from_slice(&bytes).map_err(|err| InvocationError::MalformedResponse(err.to_string()))
}

#[cfg(test)]
#[path = "tests/invoker_tests.rs"]
mod tests;

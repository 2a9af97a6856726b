//! Where the user list comes from.
//!
//! `DataSource` abstracts the single network read so the UI can be driven by
//! a canned source in tests. `FetchTask` runs that read on the runtime and
//! exposes it as a pollable pending/succeeded/failed outcome for the UI loop.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::error::FetchError;
use crate::model::User;

/// One-shot provider of the user collection
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError>;
}

/// Plain `GET` against the users endpoint
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        let url = self.endpoint.to_string();
        tracing::debug!(%url, "GET users");

        let resp = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| FetchError::Request { url, source })?;

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Observable state of the startup fetch
#[derive(Debug)]
pub enum FetchOutcome {
    Pending,
    Succeeded(Vec<User>),
    Failed(FetchError),
}

/// Handle to the in-flight startup fetch
pub struct FetchTask {
    rx: oneshot::Receiver<Result<Vec<User>, FetchError>>,
}

impl FetchTask {
    /// Spawn the fetch on the current tokio runtime.
    ///
    /// There is no cancellation: dropping the handle lets the request finish
    /// and discards its result.
    pub fn spawn(source: Arc<dyn DataSource>) -> Self {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = source.fetch_users().await;
            // Receiver gone means the session ended first
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Non-blocking check on the fetch
    pub fn poll(&mut self) -> FetchOutcome {
        match self.rx.try_recv() {
            Ok(Ok(users)) => FetchOutcome::Succeeded(users),
            Ok(Err(e)) => FetchOutcome::Failed(e),
            Err(TryRecvError::Empty) => FetchOutcome::Pending,
            Err(TryRecvError::Closed) => FetchOutcome::Failed(FetchError::Aborted),
        }
    }

    /// Wait for the fetch to finish
    pub async fn wait(self) -> Result<Vec<User>, FetchError> {
        self.rx.await.unwrap_or(Err(FetchError::Aborted))
    }
}

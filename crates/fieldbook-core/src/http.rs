//! JSON-over-HTTP client for REST endpoints. Wraps reqwest with a small API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Thin wrapper around a reqwest client that speaks JSON.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Client with no request timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpError::Build)?;
        Ok(Self { inner })
    }

    /// `GET url` and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, HttpError> {
        debug!(%url, "GET");
        let res = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(HttpError::Request)?;
        decode(url, res).await
    }

    /// `POST url` with `body` as JSON and decode the response as `T`.
    pub async fn post_json<B, T>(&self, url: &Url, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let res = self
            .inner
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(HttpError::Request)?;
        decode(url, res).await
    }
}

async fn decode<T: DeserializeOwned>(url: &Url, res: reqwest::Response) -> Result<T, HttpError> {
    let status = res.status();
    if !status.is_success() {
        return Err(HttpError::Status {
            url: url.clone(),
            status: status.as_u16(),
        });
    }
    let bytes = res.bytes().await.map_err(HttpError::Request)?;
    serde_json::from_slice(&bytes).map_err(|source| HttpError::Decode {
        url: url.clone(),
        source,
    })
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Build(reqwest::Error),
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: Url, status: u16 },
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

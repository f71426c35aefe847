//! HTTP document fetcher backed by `reqwest`.

use async_trait::async_trait;
use schemascope_config::FetchConfig;
use serde_json::Value;
use tracing::trace;

use crate::DocumentFetcher;
use crate::errors::{FetchError, FetchResult};

/// Fetches documents with a plain GET and decodes the body as JSON.
///
/// Any non-2xx status is an error. The client-level timeout covers the
/// whole request, body included.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client {
                details: e.to_string().into(),
            })?;
        Ok(Self { client })
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            details: e.to_string().into(),
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, e))?;
        trace!(%url, bytes = body.len(), "document body received");

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            details: e.to_string().into(),
        })
    }
}

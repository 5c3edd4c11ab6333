use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, StatusCode};

use crate::error::{NotifyError, Result};

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::GET, url: url.into(), headers: Vec::new() }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self { method: Method::POST, url: url.into(), headers: Vec::new() }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Transport capability used by the pipelines.
///
/// An empty body means the upstream had nothing readable to offer; it is up
/// to the caller whether that is fatal.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::transport("<client>", e))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let res = builder
            .send()
            .await
            .map_err(|e| NotifyError::transport(&request.url, e))?;

        let status = res.status();
        let body = checked_body(&request.url, status, res.bytes().await.map(|b| b.to_vec()))?;

        debug!("{} {} -> {} bytes", request.method, request.url, body.len());
        Ok(body)
    }
}

/// Apply status and readability rules to a response body. An unreadable
/// body counts as empty; a non-2xx status is a transport failure.
fn checked_body<E: std::fmt::Display>(
    url: &str,
    status: StatusCode,
    body: std::result::Result<Vec<u8>, E>,
) -> Result<Vec<u8>> {
    let body = body.unwrap_or_else(|e| {
        warn!("Could not read response body from {url}: {e}");
        Vec::new()
    });

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body);
        return Err(NotifyError::transport(
            url,
            format!("status {}: {}", status, truncate_body(&text)),
        ));
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

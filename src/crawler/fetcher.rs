//! HTTP fetcher implementation
//!
//! This module is the only place the crawler touches the network:
//! - Building the HTTP client with a fixed per-request timeout
//! - Rotating the user agent on every request
//! - Reading the response body so callers never hold a connection
//! - Error classification (timeout vs other transport failures)

use crate::config::{CrawlerConfig, UserAgentConfig, DEFAULT_USER_AGENTS};
use crate::CrawlError;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched HTTP response with its body already read
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: String,
}

/// Issues a single GET for a URL
///
/// Implementations must not retry; a failed fetch is reported once and the
/// caller decides what to do with it.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError>;
}

/// Fetcher backed by `reqwest` with user agent rotation
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetcher {
    /// Creates a fetcher with the default timeout and user agent pool
    pub fn new() -> Result<Self, CrawlError> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT, default_pool())
    }

    /// Creates a fetcher from configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, CrawlError> {
        Self::with_timeout(crawler.request_timeout(), user_agent.pool.clone())
    }

    /// Creates a fetcher with an explicit timeout and user agent pool
    ///
    /// An empty pool falls back to the built-in browser signatures.
    pub fn with_timeout(timeout: Duration, user_agents: Vec<String>) -> Result<Self, CrawlError> {
        let client = build_http_client(timeout)?;
        let user_agents = if user_agents.is_empty() {
            default_pool()
        } else {
            user_agents
        };

        Ok(Self {
            client,
            user_agents,
        })
    }

    /// Picks a user agent uniformly at random, independently per call
    pub fn random_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError> {
        let user_agent = self.random_user_agent();
        tracing::debug!("GET {} (user agent: {})", url, user_agent);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let final_url = response.url().to_string();
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            final_url,
            status_code,
            content_type,
            body,
        })
    }
}

/// Builds an HTTP client with a fixed per-request timeout
///
/// Redirects are followed with reqwest's default policy so the final URL of
/// a page is reported, not the one listed in the sitemap.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

fn default_pool() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
}

fn classify_error(url: &str, error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Fetch {
            url: url.to_string(),
            source: error,
        }
    }
}

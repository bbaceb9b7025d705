//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - HEAD probes and GET fetches
//! - A single retry for transient network failures
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::classifier::ContentKind;
use crate::crawler::task::Verb;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed by the client
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered with a success status
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty when missing)
        content_type: String,
        /// Body, only read for GET requests that returned a listing
        body: Option<String>,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Timeouts applied to every request
///
/// # Example
///
/// ```no_run
/// use dropwatch::config::{CrawlerConfig, UserAgentConfig};
/// use dropwatch::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "dropwatch".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_millis(crawler.request_timeout);

    Client::builder()
        .user_agent(format_user_agent(user_agent))
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Format: CrawlerName/Version (+ContactURL)
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Requests a URL with the given verb
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Timeout | Wait `retry_timeout`, retry once |
/// | Connection error | Wait `retry_timeout`, retry once |
/// | Any HTTP status | No retry |
///
/// Only GET responses that report a listing content type have their body
/// read. A probe never downloads a body, and neither does a GET that
/// unexpectedly answers with an archive.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `verb` - Probe (HEAD) or fetch (GET)
/// * `url` - The URL to request
/// * `retry_timeout` - Wait before the single retry
pub async fn fetch(client: &Client, verb: Verb, url: &Url, retry_timeout: Duration) -> FetchResult {
    let response = match client.request(verb.method(), url.clone()).send().await {
        Ok(response) => response,
        Err(e) if is_transient(&e) => {
            tracing::debug!("{} {} failed ({}), retrying in {:?}", verb, url, e, retry_timeout);
            tokio::time::sleep(retry_timeout).await;

            match client.request(verb.method(), url.clone()).send().await {
                Ok(response) => response,
                Err(e) => return network_error(&e),
            }
        }
        Err(e) => return network_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let wants_body =
        verb == Verb::Fetch && ContentKind::from_content_type(&content_type) == ContentKind::Listing;

    let body = if wants_body {
        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => return network_error(&e),
        }
    } else {
        None
    };

    FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    }
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

/// Classifies a transport error
fn network_error(error: &reqwest::Error) -> FetchResult {
    let error = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchResult::NetworkError { error }
}

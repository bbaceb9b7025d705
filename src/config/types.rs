use serde::Deserialize;

/// Main configuration structure for Dropwatch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub releases: ReleasesConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "root")]
    pub roots: Vec<RootEntry>,
}

/// Crawler pacing and timeouts
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Wait before the single retry of a failed request (milliseconds)
    #[serde(rename = "retry-timeout", default = "default_retry_timeout")]
    pub retry_timeout: u64,

    /// Delay between two dispatched tasks (milliseconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            retry_timeout: default_retry_timeout(),
            request_delay: default_request_delay(),
        }
    }
}

fn default_request_timeout() -> u64 {
    1000
}

fn default_retry_timeout() -> u64 {
    1500
}

fn default_request_delay() -> u64 {
    100
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Tokens recognized by the filename grammar
#[derive(Debug, Clone, Deserialize)]
pub struct ReleasesConfig {
    /// Known project names; empty accepts any lowercase token
    #[serde(default)]
    pub projects: Vec<String>,

    /// Platform names the grammar recognizes
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// Platforms whose artifacts are registered; `None` accepts all
    #[serde(rename = "accept-platforms", default)]
    pub accept_platforms: Option<Vec<String>>,
}

impl Default for ReleasesConfig {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            platforms: default_platforms(),
            accept_platforms: None,
        }
    }
}

fn default_platforms() -> Vec<String> {
    vec!["linux".to_string(), "mac".to_string(), "windows".to_string()]
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON alias map
    #[serde(rename = "releases-path")]
    pub releases_path: String,

    /// Optional path to a markdown summary
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

/// A crawl root with its jail segment pattern
#[derive(Debug, Clone, Deserialize)]
pub struct RootEntry {
    /// Directory listing the crawl starts from
    pub url: String,

    /// Pattern for the version directory beneath the root
    #[serde(rename = "version-pattern", default = "default_version_pattern")]
    pub version_pattern: String,
}

/// Version directories look like `1.10` or `1.8.0`
pub fn default_version_pattern() -> String {
    r"1(?:\.[0-9]+)+".to_string()
}

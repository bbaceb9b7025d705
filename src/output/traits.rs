//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! run summary they receive.

use crate::output::stats::CrawlStatistics;
use crate::resolver::AliasMap;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the summary was assembled
    pub generated_at: DateTime<Utc>,

    /// Crawl roots, in configuration order
    pub roots: Vec<String>,

    /// Hash of the configuration file
    pub config_hash: String,

    /// Number of releases in the registry
    pub releases: usize,

    /// Final alias mapping
    pub aliases: AliasMap,

    /// Crawl counters
    pub stats: CrawlStatistics,
}

impl RunSummary {
    /// Creates a summary stamped with the current time
    pub fn new(
        roots: Vec<String>,
        config_hash: String,
        releases: usize,
        aliases: AliasMap,
        stats: CrawlStatistics,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            roots,
            config_hash,
            releases,
            aliases,
            stats,
        }
    }
}

/// Trait for output handlers
///
/// Output handlers persist the result of a finished run. A failing
/// handler is reported by the caller and never retried.
pub trait OutputHandler {
    /// Short description of the destination, used in logs
    fn destination(&self) -> String;

    /// Writes the summary
    ///
    /// # Arguments
    ///
    /// * `summary` - The finished run
    fn write(&self, summary: &RunSummary) -> OutputResult<()>;
}

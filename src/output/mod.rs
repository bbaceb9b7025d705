//! Output module for persisting run results
//!
//! This module handles:
//! - Writing the JSON alias map
//! - Generating markdown summaries
//! - Recording crawl statistics

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{format_aliases, JsonOutputHandler};
pub use markdown::{format_markdown_summary, MarkdownOutputHandler};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult, RunSummary};

use crate::config::OutputConfig;

/// Builds the handlers an output configuration asks for
///
/// The JSON alias map is always written; the markdown summary only when a
/// summary path is configured.
pub fn handlers_for(config: &OutputConfig) -> Vec<Box<dyn OutputHandler>> {
    let mut handlers: Vec<Box<dyn OutputHandler>> =
        vec![Box::new(JsonOutputHandler::new(&config.releases_path))];

    if let Some(summary_path) = &config.summary_path {
        handlers.push(Box::new(MarkdownOutputHandler::new(summary_path)));
    }

    handlers
}

/// Runs every handler, logging failures instead of propagating them
///
/// # Returns
///
/// The number of handlers that failed
pub fn write_all(handlers: &[Box<dyn OutputHandler>], summary: &RunSummary) -> usize {
    let mut failures = 0;

    for handler in handlers {
        match handler.write(summary) {
            Ok(()) => tracing::info!("Wrote {}", handler.destination()),
            Err(e) => {
                tracing::error!("Failed to write {}: {}", handler.destination(), e);
                failures += 1;
            }
        }
    }

    failures
}

/// Writes a finished run to every configured output
///
/// A run that registered no releases writes nothing, so a crawl that found
/// no drop site reachable keeps the previous alias map in place.
///
/// # Returns
///
/// The number of handlers that failed
pub fn publish(config: &OutputConfig, summary: &RunSummary) -> usize {
    if summary.releases == 0 {
        tracing::info!("No releases discovered, leaving outputs untouched");
        return 0;
    }

    write_all(&handlers_for(config), summary)
}

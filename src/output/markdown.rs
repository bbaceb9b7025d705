//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a run: the
//! roots crawled, task statistics, and the alias table.

use crate::output::traits::{OutputHandler, OutputResult, RunSummary};
use crate::state::TaskOutcome;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Writes a markdown summary of a run
#[derive(Debug, Clone)]
pub struct MarkdownOutputHandler {
    path: PathBuf,
}

impl MarkdownOutputHandler {
    /// Creates a handler writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownOutputHandler {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, summary: &RunSummary) -> OutputResult<()> {
        let markdown = format_markdown_summary(summary);

        let mut file = File::create(&self.path)?;
        file.write_all(markdown.as_bytes())?;

        Ok(())
    }
}

/// Formats a run summary as markdown
///
/// # Arguments
///
/// * `summary` - The finished run
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(summary: &RunSummary) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Dropwatch Release Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Config Hash**: {}\n", summary.config_hash));
    md.push_str(&format!("- **Releases**: {}\n", summary.releases));
    md.push_str(&format!("- **Aliases**: {}\n\n", summary.aliases.len()));

    // Roots
    if !summary.roots.is_empty() {
        md.push_str("## Roots\n\n");
        for root in &summary.roots {
            md.push_str(&format!("- {}\n", root));
        }
        md.push('\n');
    }

    // Requests
    md.push_str("## Requests\n\n");
    md.push_str(&format!("- **HEAD**: {}\n", summary.stats.probes));
    md.push_str(&format!("- **GET**: {}\n", summary.stats.fetches));
    md.push_str(&format!(
        "- **Out of jail**: {}\n\n",
        summary.stats.out_of_scope
    ));

    // Outcome breakdown
    md.push_str("## Task Outcomes\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    for outcome in TaskOutcome::all() {
        let count = summary.stats.count(outcome);
        if count > 0 {
            md.push_str(&format!("| {} | {} |\n", outcome, count));
        }
    }
    md.push('\n');

    // Aliases
    md.push_str("## Aliases\n\n");
    if summary.aliases.is_empty() {
        md.push_str("No releases were discovered.\n");
    } else {
        md.push_str("| Alias | URL |\n");
        md.push_str("|-------|-----|\n");
        for (alias, url) in &summary.aliases {
            md.push_str(&format!("| `{}` | {} |\n", alias, url));
        }
    }

    md
}

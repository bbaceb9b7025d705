//! JSON alias map output
//!
//! The alias map is the crate's main artifact: a flat JSON object from
//! alias tag to artifact URL, keys sorted.

use crate::output::traits::{OutputHandler, OutputResult, RunSummary};
use crate::resolver::AliasMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the alias map as a JSON object
#[derive(Debug, Clone)]
pub struct JsonOutputHandler {
    path: PathBuf,
}

impl JsonOutputHandler {
    /// Creates a handler writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonOutputHandler {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, summary: &RunSummary) -> OutputResult<()> {
        fs::write(&self.path, format_aliases(&summary.aliases)?)?;
        Ok(())
    }
}

/// Renders the alias map as pretty-printed JSON
pub fn format_aliases(aliases: &AliasMap) -> OutputResult<String> {
    let mut json = serde_json::to_string_pretty(aliases)?;
    json.push('\n');
    Ok(json)
}

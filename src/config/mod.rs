//! Configuration module for Dropwatch
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use dropwatch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("dropwatch.toml")).unwrap();
//! println!("Crawling {} roots", config.roots.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_version_pattern, Config, CrawlerConfig, OutputConfig, ReleasesConfig, RootEntry,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

// Re-export validation
pub use validation::validate;

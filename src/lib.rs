//! Dropwatch: latest-build aliases for directory-listing drop sites
//!
//! This crate crawls jailed directory listings for build artifacts, parses
//! release metadata out of artifact filenames, and resolves alias tags such
//! as `sourcemod-latest-linux` to concrete download URLs.

pub mod config;
pub mod crawler;
pub mod output;
pub mod release;
pub mod resolver;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Dropwatch operations
#[derive(Debug, Error)]
pub enum DropError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Release error: {0}")]
    Release(#[from] ReleaseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Invalid jail pattern: {0}")]
    InvalidPattern(String),
}

/// Release grammar errors
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Unexpected filename {0}")]
    UnexpectedFilename(String),

    #[error("Invalid number {value:?} in {filename}")]
    InvalidNumber { filename: String, value: String },

    #[error("Invalid grammar: {0}")]
    InvalidGrammar(String),
}

/// Result type alias for Dropwatch operations
pub type Result<T> = std::result::Result<T, DropError>;

// Re-export commonly used types
pub use config::Config;
pub use release::{ReleaseDescriptor, ReleaseRegistry};
pub use resolver::resolve_tags;
pub use state::TaskOutcome;
pub use crate::url::Jail;

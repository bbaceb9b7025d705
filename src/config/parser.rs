use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates the configuration file at `path`
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use dropwatch::config::load_config;
///
/// let config = load_config(Path::new("dropwatch.toml")).unwrap();
/// println!("Request delay: {}ms", config.crawler.request_delay);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration text
///
/// ```
/// use dropwatch::config::parse_config;
///
/// let config = parse_config(r#"
/// [user-agent]
/// crawler-name = "dropwatch"
/// crawler-version = "1.0"
/// contact-url = "https://example.com/about"
///
/// [output]
/// releases-path = "./releases.json"
///
/// [[root]]
/// url = "https://sm.alliedmods.net/smdrop/"
/// "#).unwrap();
/// assert_eq!(config.roots.len(), 1);
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of the configuration file
///
/// Logged at start-up so a run can be traced back to the exact file it
/// was configured from.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration together with the hash of the bytes it was parsed from
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(content.as_bytes())))
}

fn hash_content(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

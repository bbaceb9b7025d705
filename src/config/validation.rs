use crate::config::types::{Config, CrawlerConfig, ReleasesConfig, RootEntry, UserAgentConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Upper bound for the inter-dispatch delay (milliseconds)
const MAX_REQUEST_DELAY: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_releases_config(&config.releases)?;
    validate_output_config(&config.output)?;
    validate_roots(&config.roots)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout must be > 0ms".to_string(),
        ));
    }

    if config.retry_timeout == 0 {
        return Err(ConfigError::Validation(
            "retry_timeout must be > 0ms".to_string(),
        ));
    }

    if config.request_delay > MAX_REQUEST_DELAY {
        return Err(ConfigError::Validation(format!(
            "request_delay must be <= {}ms, got {}ms",
            MAX_REQUEST_DELAY, config.request_delay
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates the grammar token lists
fn validate_releases_config(config: &ReleasesConfig) -> Result<(), ConfigError> {
    if config.platforms.is_empty() {
        return Err(ConfigError::Validation(
            "at least one platform must be configured".to_string(),
        ));
    }

    for platform in &config.platforms {
        validate_token("platform", platform)?;
    }

    for project in &config.projects {
        validate_token("project", project)?;
    }

    if let Some(accepted) = &config.accept_platforms {
        for platform in accepted {
            if !config.platforms.contains(platform) {
                return Err(ConfigError::Validation(format!(
                    "accepted platform '{}' is not one of the configured platforms",
                    platform
                )));
            }
        }
    }

    Ok(())
}

/// Tokens are embedded into filename patterns and aliases
fn validate_token(kind: &str, token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", kind)));
    }

    if !token
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must contain only lowercase letters and digits",
            kind, token
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.releases_path.is_empty() {
        return Err(ConfigError::Validation(
            "releases_path cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl roots
fn validate_roots(roots: &[RootEntry]) -> Result<(), ConfigError> {
    if roots.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[root]] must be configured".to_string(),
        ));
    }

    for root in roots {
        let url = Url::parse(&root.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid root URL '{}': {}", root.url, e))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Validation(format!(
                "Root URL '{}' must use HTTP or HTTPS",
                root.url
            )));
        }

        if !url.path().ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "Root URL '{}' must name a directory (trailing '/')",
                root.url
            )));
        }

        Regex::new(&root.version_pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!(
                "version_pattern '{}' for {}: {}",
                root.version_pattern, root.url, e
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_version_pattern;

    fn root(url: &str) -> RootEntry {
        RootEntry {
            url: url.to_string(),
            version_pattern: default_version_pattern(),
        }
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("platform", "linux").is_ok());
        assert!(validate_token("platform", "win64").is_ok());

        assert!(validate_token("platform", "").is_err());
        assert!(validate_token("platform", "Linux").is_err());
        assert!(validate_token("platform", "mac-os").is_err());
        assert!(validate_token("project", "a.b").is_err());
    }

    #[test]
    fn test_validate_roots() {
        assert!(validate_roots(&[root("https://sm.alliedmods.net/smdrop/")]).is_ok());
        assert!(validate_roots(&[root("http://localhost:8080/drop/")]).is_ok());

        assert!(validate_roots(&[]).is_err());
        assert!(validate_roots(&[root("ftp://example.com/drop/")]).is_err());
        assert!(validate_roots(&[root("https://example.com/drop")]).is_err());
        assert!(validate_roots(&[root("not a url")]).is_err());
    }

    #[test]
    fn test_validate_roots_bad_pattern() {
        let entry = RootEntry {
            url: "https://example.com/drop/".to_string(),
            version_pattern: "1(".to_string(),
        };
        assert!(matches!(
            validate_roots(&[entry]),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_accept_platforms_must_be_known() {
        let config = ReleasesConfig {
            projects: vec![],
            platforms: vec!["linux".to_string()],
            accept_platforms: Some(vec!["windows".to_string()]),
        };
        assert!(validate_releases_config(&config).is_err());
    }

    #[test]
    fn test_crawler_limits() {
        let mut config = CrawlerConfig::default();
        assert!(validate_crawler_config(&config).is_ok());

        config.request_delay = MAX_REQUEST_DELAY + 1;
        assert!(validate_crawler_config(&config).is_err());

        config = CrawlerConfig::default();
        config.request_timeout = 0;
        assert!(validate_crawler_config(&config).is_err());
    }
}

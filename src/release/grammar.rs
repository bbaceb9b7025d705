//! Artifact filename grammar
//!
//! Drop sites name their artifacts positionally:
//!
//! ```text
//! PROJECT[-MAJOR.MINOR.MAINT][-TAG]-SCM BUILD[-PROJECT_EXTRA]-PLATFORM[-PLATFORM_EXTRA].EXT
//! sourcemod-1.10.0-git6502-linux.tar.gz
//! amxmodx-1.9.0-git5263-cstrike-windows.zip
//! ```

use crate::release::descriptor::{Platform, Project, ReleaseDescriptor, Version};
use crate::ReleaseError;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use url::Url;

/// Compiled filename grammar for a set of project and platform tokens
#[derive(Debug, Clone)]
pub struct FilenameGrammar {
    /// Unanchored source, reused inside jails
    source: String,
    anchored: Regex,
}

impl FilenameGrammar {
    /// Builds the grammar
    ///
    /// # Arguments
    ///
    /// * `projects` - Known project names; empty accepts any `[a-z]+` token
    /// * `platforms` - Known platform names; must not be empty
    pub fn new(projects: &[String], platforms: &[String]) -> Result<Self, ReleaseError> {
        if platforms.is_empty() {
            return Err(ReleaseError::InvalidGrammar(
                "no platforms configured".to_string(),
            ));
        }

        let project = if projects.is_empty() {
            "[a-z]+".to_string()
        } else {
            alternation(projects)
        };

        let source = format!(
            concat!(
                r"(?P<project>{project})",
                r"(?:-(?P<major>[0-9]+)\.(?P<minor>[0-9]+)\.(?P<maintenance>[0-9]+))?",
                r"(?:-(?P<tag>[a-z]+))?",
                r"-(?P<scm>[a-z]+)(?P<build>[0-9]+)",
                r"(?:-(?P<project_extra>[a-z]+))?",
                r"-(?P<platform>{platform})",
                r"(?:-(?P<platform_extra>[0-9a-z]+))?",
                r"\.(?P<extension>[0-9a-z]+(?:\.[0-9a-z]+)*)",
            ),
            project = project,
            platform = alternation(platforms),
        );

        let anchored = Regex::new(&format!("^{}$", source))
            .map_err(|e| ReleaseError::InvalidGrammar(e.to_string()))?;

        Ok(Self { source, anchored })
    }

    /// The unanchored pattern source
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole filename matches the grammar
    pub fn matches(&self, filename: &str) -> bool {
        self.anchored.is_match(filename)
    }

    /// Parses `filename` into a release descriptor located at `source_url`
    ///
    /// The descriptor starts with no tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use dropwatch::release::FilenameGrammar;
    /// use url::Url;
    ///
    /// let grammar = FilenameGrammar::new(&[], &["linux".to_string()]).unwrap();
    /// let url = Url::parse("https://example.com/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz").unwrap();
    /// let release = grammar.parse("sourcemod-1.10.0-git6502-linux.tar.gz", url).unwrap();
    /// assert_eq!(release.project.name, "sourcemod");
    /// assert_eq!(release.version.build, Some(6502));
    /// assert_eq!(release.extension, "tar.gz");
    /// ```
    pub fn parse(&self, filename: &str, source_url: Url) -> Result<ReleaseDescriptor, ReleaseError> {
        let caps = self
            .anchored
            .captures(filename)
            .ok_or_else(|| ReleaseError::UnexpectedFilename(filename.to_string()))?;

        let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        let mandatory = |name: &str| {
            text(name).ok_or_else(|| ReleaseError::UnexpectedFilename(filename.to_string()))
        };

        Ok(ReleaseDescriptor {
            project: Project {
                name: mandatory("project")?,
                extra: text("project_extra"),
            },
            version: Version {
                major: number(&caps, "major", filename)?,
                minor: number(&caps, "minor", filename)?,
                maintenance: number(&caps, "maintenance", filename)?,
                build: number(&caps, "build", filename)?,
                tag: text("tag"),
            },
            scm: mandatory("scm")?,
            platform: Platform {
                name: mandatory("platform")?,
                extra: text("platform_extra"),
            },
            extension: mandatory("extension")?,
            filename: filename.to_string(),
            source_url,
            tags: BTreeSet::new(),
        })
    }
}

/// Escaped `a|b|c` alternation
fn alternation(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|")
}

fn number(caps: &Captures<'_>, name: &str, filename: &str) -> Result<Option<u64>, ReleaseError> {
    caps.name(name)
        .map(|m| {
            m.as_str()
                .parse::<u64>()
                .map_err(|_| ReleaseError::InvalidNumber {
                    filename: filename.to_string(),
                    value: m.as_str().to_string(),
                })
        })
        .transpose()
}

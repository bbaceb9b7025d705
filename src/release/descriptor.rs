//! Release descriptors and their alias formatting

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use url::Url;

/// Separator between the project, version and platform parts of an alias
pub const ALIAS_SEPARATOR: &str = "-";

/// Project a release belongs to, e.g. `sourcemod` or `amxmodx-cstrike`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Project {
    pub name: String,
    pub extra: Option<String>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(extra) => write!(f, "{}-{}", self.name, extra),
            None => f.write_str(&self.name),
        }
    }
}

/// Platform a release was built for, e.g. `linux` or `windows-x64`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Platform {
    pub name: String,
    pub extra: Option<String>,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(extra) => write!(f, "{}-{}", self.name, extra),
            None => f.write_str(&self.name),
        }
    }
}

/// Structured release version
///
/// Ordering compares the numeric fields as integers in the order major,
/// minor, maintenance, build (an absent field sorts before any present
/// one), then the pre-release tag. `1.9.0.1` therefore sorts before
/// `1.10.0.1`, which a plain string comparison gets wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub maintenance: Option<u64>,
    pub build: Option<u64>,
    pub tag: Option<String>,
}

impl Version {
    /// The numeric fields that are present, most significant first
    pub fn numbers(&self) -> impl Iterator<Item = u64> {
        [self.major, self.minor, self.maintenance, self.build]
            .into_iter()
            .flatten()
    }
}

/// Renders the alias form of a version
///
/// Present numbers are joined with `.`; fewer than two numbers render as
/// `latest`. A tag is appended after a `-`.
///
/// ```
/// use dropwatch::release::Version;
///
/// let version = Version { major: Some(1), minor: Some(10), ..Version::default() };
/// assert_eq!(version.to_string(), "1.10");
///
/// let version = Version { major: Some(1), tag: Some("rc".into()), ..Version::default() };
/// assert_eq!(version.to_string(), "latest-rc");
/// ```
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.numbers().map(|n| n.to_string()).collect();
        if numbers.len() < 2 {
            f.write_str("latest")?;
        } else {
            f.write_str(&numbers.join("."))?;
        }
        if let Some(tag) = &self.tag {
            write!(f, "-{}", tag)?;
        }
        Ok(())
    }
}

/// Metadata parsed out of one artifact filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub project: Project,
    pub version: Version,
    /// Source control identifier preceding the build number, e.g. `git`
    pub scm: String,
    pub platform: Platform,
    /// File extension without the leading dot, e.g. `tar.gz`
    pub extension: String,
    pub filename: String,
    pub source_url: Url,
    /// Alias tags owned by this release; filled in by the resolver
    pub tags: BTreeSet<String>,
}

impl ReleaseDescriptor {
    /// Builds the alias for this release's project and platform at `version`
    pub fn alias(&self, version: &Version) -> String {
        format_alias(&self.project, version, &self.platform)
    }

    /// Total order over releases of the same project and platform
    ///
    /// Version first, then scm, extension and source URL so that no two
    /// distinct releases ever compare equal.
    pub fn cmp_release(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.scm.cmp(&other.scm))
            .then_with(|| self.extension.cmp(&other.extension))
            .then_with(|| self.source_url.as_str().cmp(other.source_url.as_str()))
    }
}

/// Joins project, version and platform into an alias tag
pub fn format_alias(project: &Project, version: &Version, platform: &Platform) -> String {
    [project.to_string(), version.to_string(), platform.to_string()].join(ALIAS_SEPARATOR)
}

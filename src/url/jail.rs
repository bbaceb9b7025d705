use crate::UrlError;
use regex::Regex;
use std::fmt;

/// Scope predicate bounding which URLs a crawl may visit
///
/// A jail is built from a literal root prefix plus an optional pattern for
/// the version directory beneath it and an optional pattern for the
/// artifact filename beneath that. It accepts every partial depth of that
/// hierarchy, because links are discovered one level at a time:
///
/// - `ROOT`
/// - `ROOT` + segment, with or without a trailing `/`
/// - `ROOT` + segment + `/` + filename
///
/// Nothing outside the root prefix ever matches.
///
/// # Examples
///
/// ```
/// use dropwatch::url::Jail;
///
/// let jail = Jail::new("https://sm.alliedmods.net/smdrop/", Some(r"1(?:\.[0-9]+)+"), None).unwrap();
/// assert!(jail.test("https://sm.alliedmods.net/smdrop/"));
/// assert!(jail.test("https://sm.alliedmods.net/smdrop/1.10/"));
/// assert!(!jail.test("https://sm.alliedmods.net/"));
/// assert!(!jail.test("https://sm.alliedmods.net/smdrop/2.0/"));
/// ```
#[derive(Debug, Clone)]
pub struct Jail {
    root: String,
    pattern: Regex,
}

impl Jail {
    /// Compiles a jail for `root`
    ///
    /// # Arguments
    ///
    /// * `root` - Literal URL prefix; escaped before compilation
    /// * `segment` - Pattern for the single path segment below the root
    /// * `filename` - Pattern for the filename below the segment
    ///
    /// A filename pattern without a segment pattern is ignored: the jail
    /// then only accepts the root itself.
    pub fn new(root: &str, segment: Option<&str>, filename: Option<&str>) -> Result<Self, UrlError> {
        let inner = match (segment, filename) {
            (None, _) => String::new(),
            (Some(segment), None) => format!("(?:(?:{})(?:/)?)?", segment),
            (Some(segment), Some(filename)) => {
                format!("(?:(?:{})(?:/(?:{})?)?)?", segment, filename)
            }
        };
        let source = format!("^{}{}$", regex::escape(root), inner);

        let pattern = Regex::new(&source)
            .map_err(|e| UrlError::InvalidPattern(format!("{}: {}", root, e)))?;

        Ok(Self {
            root: root.to_string(),
            pattern,
        })
    }

    /// Returns true if `candidate` is inside this jail
    pub fn test(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }

    /// The literal root prefix
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The compiled pattern source
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl fmt::Display for Jail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern.as_str())
    }
}

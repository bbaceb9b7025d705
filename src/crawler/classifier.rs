//! Response classification
//!
//! Every response is routed by the verb that produced it and the media
//! type it reported:
//!
//! | Verb  | Content  | Action |
//! |-------|----------|--------|
//! | HEAD  | listing  | Fetch the same URL with GET |
//! | GET   | listing  | Enumerate links, probe each |
//! | HEAD  | archive  | Parse the filename, register the release |
//! | GET   | archive  | Unexpected; archives are never fetched |
//! | any   | other    | Drop with a warning |

use crate::crawler::task::Verb;

/// Media types treated as a directory listing
const LISTING_TYPES: &[&str] = &["text/html"];

/// Media types treated as a leaf artifact
const ARCHIVE_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "application/gzip",
    "application/x-gzip",
];

/// Coarse kind of a response body, decided from headers only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Listing,
    Archive,
    Other,
}

impl ContentKind {
    /// Classifies a `Content-Type` header value
    ///
    /// Parameters such as `charset` are ignored and the comparison is
    /// case-insensitive.
    ///
    /// ```
    /// use dropwatch::crawler::ContentKind;
    ///
    /// assert_eq!(ContentKind::from_content_type("text/html;charset=ISO-8859-1"), ContentKind::Listing);
    /// assert_eq!(ContentKind::from_content_type("application/x-gzip"), ContentKind::Archive);
    /// assert_eq!(ContentKind::from_content_type("text/plain"), ContentKind::Other);
    /// ```
    pub fn from_content_type(content_type: &str) -> Self {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if LISTING_TYPES.contains(&media_type.as_str()) {
            ContentKind::Listing
        } else if ARCHIVE_TYPES.contains(&media_type.as_str()) {
            ContentKind::Archive
        } else {
            ContentKind::Other
        }
    }
}

/// What the coordinator does with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Re-queue the same URL as a fetch
    Escalate,
    /// Extract the listing's links and probe them
    EnumerateLinks,
    /// Parse the URL's filename as a release
    ParseArtifact,
    /// The verb should never produce this content
    UnexpectedVerb,
    /// No rule for this content type
    Unhandled,
}

/// Decides the action for a `(verb, content)` pair
pub fn classify(verb: Verb, content: ContentKind) -> Action {
    match (content, verb) {
        (ContentKind::Listing, Verb::Probe) => Action::Escalate,
        (ContentKind::Listing, Verb::Fetch) => Action::EnumerateLinks,
        (ContentKind::Archive, Verb::Probe) => Action::ParseArtifact,
        (ContentKind::Archive, Verb::Fetch) => Action::UnexpectedVerb,
        (ContentKind::Other, _) => Action::Unhandled,
    }
}

/// Task outcome definitions
///
/// Every dispatched task ends in exactly one of these states.
use std::fmt;

/// Represents how a crawl task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskOutcome {
    // ===== Progress States =====
    /// A probe found a listing and queued a fetch of the same URL
    Escalated,

    /// A fetched listing had its links queued
    Listed,

    /// A probed artifact was parsed and registered
    Registered,

    // ===== Skip States =====
    /// The artifact parsed but its platform is not accepted
    UnsupportedPlatform,

    /// The response content type has no classifier rule
    UnhandledContentType,

    // ===== Error States =====
    /// The artifact filename does not match the grammar
    UnexpectedFilename,

    /// A verb received content it should never see (a fetched archive)
    UnexpectedVerb,

    /// The server answered with a non-success status
    HttpError,

    /// Timeout or connection failure after the retry
    TransportError,
}

impl TaskOutcome {
    /// Returns true if the task moved the crawl forward
    pub fn is_progress(&self) -> bool {
        matches!(self, Self::Escalated | Self::Listed | Self::Registered)
    }

    /// Returns true if the task was skipped on purpose
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform | Self::UnhandledContentType)
    }

    /// Returns true if this represents an error logged at error level
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedFilename | Self::UnexpectedVerb | Self::HttpError | Self::TransportError
        )
    }

    /// Stable lowercase name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Escalated => "escalated",
            Self::Listed => "listed",
            Self::Registered => "registered",
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::UnhandledContentType => "unhandled_content_type",
            Self::UnexpectedFilename => "unexpected_filename",
            Self::UnexpectedVerb => "unexpected_verb",
            Self::HttpError => "http_error",
            Self::TransportError => "transport_error",
        }
    }

    /// Returns all possible outcomes
    pub fn all() -> Vec<Self> {
        vec![
            Self::Escalated,
            Self::Listed,
            Self::Registered,
            Self::UnsupportedPlatform,
            Self::UnhandledContentType,
            Self::UnexpectedFilename,
            Self::UnexpectedVerb,
            Self::HttpError,
            Self::TransportError,
        ]
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Crawl tasks

use crate::url::Jail;
use reqwest::Method;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Request kind for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Header-only request (`HEAD`)
    Probe,
    /// Full request (`GET`)
    Fetch,
}

impl Verb {
    /// The HTTP method used for this verb
    pub fn method(self) -> Method {
        match self {
            Verb::Probe => Method::HEAD,
            Verb::Fetch => Method::GET,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// A URL waiting to be requested, with the jail it was discovered under
///
/// The jail travels with every task derived from this one, so a whole
/// subtree stays bound by the scope of the root it was seeded from.
#[derive(Debug, Clone)]
pub struct CrawlTask {
    pub url: Url,
    pub jail: Arc<Jail>,
    pub verb: Verb,
}

impl CrawlTask {
    /// Creates a probe task
    pub fn probe(url: Url, jail: Arc<Jail>) -> Self {
        Self {
            url,
            jail,
            verb: Verb::Probe,
        }
    }

    /// Same URL and jail, requested with a full fetch
    pub fn escalate(&self) -> Self {
        Self {
            url: self.url.clone(),
            jail: Arc::clone(&self.jail),
            verb: Verb::Fetch,
        }
    }

    /// A probe for `url` under this task's jail
    pub fn child(&self, url: Url) -> Self {
        Self::probe(url, Arc::clone(&self.jail))
    }
}

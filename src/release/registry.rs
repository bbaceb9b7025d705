use crate::release::descriptor::ReleaseDescriptor;

/// Releases discovered during one crawl, in discovery order
///
/// The crawl only appends. Once the crawl drains, the resolver borrows the
/// registry mutably to attach tags; the sequence itself is never reordered.
#[derive(Debug, Clone, Default)]
pub struct ReleaseRegistry {
    releases: Vec<ReleaseDescriptor>,
}

impl ReleaseRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a release
    pub fn register(&mut self, release: ReleaseDescriptor) {
        tracing::debug!(
            "Registered {} ({} {} {})",
            release.source_url,
            release.project,
            release.version,
            release.platform
        );
        self.releases.push(release);
    }

    /// Returns the number of releases
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Returns whether no release was discovered
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Iterates over releases in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, ReleaseDescriptor> {
        self.releases.iter()
    }

    /// Mutable view used by the resolver to attach tags
    pub fn releases_mut(&mut self) -> &mut [ReleaseDescriptor] {
        &mut self.releases
    }
}

impl FromIterator<ReleaseDescriptor> for ReleaseRegistry {
    fn from_iter<I: IntoIterator<Item = ReleaseDescriptor>>(iter: I) -> Self {
        Self {
            releases: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ReleaseRegistry {
    type Item = &'a ReleaseDescriptor;
    type IntoIter = std::slice::Iter<'a, ReleaseDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.iter()
    }
}

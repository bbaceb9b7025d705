//! Tag resolver
//!
//! Runs once after the crawl drains. For each granularity level, releases
//! are grouped by project, platform and the version reduced to that level.
//! The greatest release of each group under
//! [`ReleaseDescriptor::cmp_release`] receives the group's alias.
//!
//! Distinct groups can render the same alias: every major version reduces
//! to its own `Latest` group, and all of them render `latest`. Each group
//! winner holds the alias; [`flatten`] then hands it to the greatest owner.

mod granularity;

pub use granularity::Granularity;

use crate::release::{format_alias, Platform, Project, ReleaseDescriptor, ReleaseRegistry, Version};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Final mapping from alias tag to artifact URL
pub type AliasMap = BTreeMap<String, String>;

/// Attaches alias tags to the registry's releases and flattens them
///
/// An empty registry yields an empty map. Tags are stored in sets, so
/// resolving the same registry again changes nothing.
///
/// # Examples
///
/// ```
/// use dropwatch::release::{FilenameGrammar, ReleaseRegistry};
/// use dropwatch::resolver::resolve_tags;
/// use url::Url;
///
/// let grammar = FilenameGrammar::new(&[], &["linux".to_string()]).unwrap();
/// let base = Url::parse("https://example.com/drop/1.10/").unwrap();
/// let mut registry = ReleaseRegistry::new();
/// for name in ["sourcemod-1.10.0-git6500-linux.zip", "sourcemod-1.10.0-git6502-linux.zip"] {
///     registry.register(grammar.parse(name, base.join(name).unwrap()).unwrap());
/// }
///
/// let aliases = resolve_tags(&mut registry);
/// assert_eq!(
///     aliases["sourcemod-latest-linux"],
///     "https://example.com/drop/1.10/sourcemod-1.10.0-git6502-linux.zip"
/// );
/// ```
pub fn resolve_tags(registry: &mut ReleaseRegistry) -> AliasMap {
    if registry.is_empty() {
        tracing::info!("No releases discovered, skipping tag resolution");
        return AliasMap::new();
    }

    for granularity in Granularity::ALL {
        assign_level(registry.releases_mut(), granularity);
    }

    flatten(registry)
}

/// Assigns one granularity level's aliases to the winning releases
fn assign_level(releases: &mut [ReleaseDescriptor], granularity: Granularity) {
    let mut winners: BTreeMap<(&Project, &Platform, Version), usize> = BTreeMap::new();

    for (index, release) in releases.iter().enumerate() {
        let key = (
            &release.project,
            &release.platform,
            granularity.reduce(&release.version),
        );
        match winners.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
            Entry::Occupied(mut entry) => {
                if release.cmp_release(&releases[*entry.get()]).is_gt() {
                    entry.insert(index);
                }
            }
        }
    }

    tracing::debug!("{} level: {} groups", granularity, winners.len());

    let assignments: Vec<(usize, String)> = winners
        .into_iter()
        .map(|((project, platform, version), index)| {
            (index, format_alias(project, &version, platform))
        })
        .collect();

    for (index, alias) in assignments {
        releases[index].tags.insert(alias);
    }
}

/// Collects `alias -> url` from every release's tags
///
/// Several releases can own the same alias: the winners of different major
/// versions all hold `latest`, and a release without a version triple
/// renders `latest` at every level. The greatest owner keeps it.
pub fn flatten(registry: &ReleaseRegistry) -> AliasMap {
    let mut owners: BTreeMap<&str, &ReleaseDescriptor> = BTreeMap::new();

    for release in registry {
        for tag in &release.tags {
            match owners.entry(tag.as_str()) {
                Entry::Vacant(entry) => {
                    entry.insert(release);
                }
                Entry::Occupied(mut entry) => {
                    if release.cmp_release(entry.get()).is_gt() {
                        entry.insert(release);
                    }
                }
            }
        }
    }

    owners
        .into_iter()
        .map(|(tag, release)| (tag.to_string(), release.source_url.to_string()))
        .collect()
}

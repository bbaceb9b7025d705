use crate::release::Version;
use std::fmt;

/// How much of a version an alias pins down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Every field, e.g. `sourcemod-1.10.0.6502-linux`
    Full,
    /// Build dropped, e.g. `sourcemod-1.10.0-linux`
    DropBuild,
    /// Maintenance and build dropped, e.g. `sourcemod-1.10-linux`
    DropMaintenance,
    /// Only the major number is kept, which renders as `sourcemod-latest-linux`
    Latest,
}

impl Granularity {
    /// All levels, finest first
    pub const ALL: [Granularity; 4] = [
        Granularity::Full,
        Granularity::DropBuild,
        Granularity::DropMaintenance,
        Granularity::Latest,
    ];

    /// Returns `version` with this level's fields removed
    ///
    /// The pre-release tag is always kept, so tagged builds get their own
    /// aliases such as `sourcemod-latest-dev-linux`.
    pub fn reduce(self, version: &Version) -> Version {
        let mut reduced = version.clone();
        match self {
            Granularity::Full => {}
            Granularity::DropBuild => {
                reduced.build = None;
            }
            Granularity::DropMaintenance => {
                reduced.maintenance = None;
                reduced.build = None;
            }
            Granularity::Latest => {
                reduced.minor = None;
                reduced.maintenance = None;
                reduced.build = None;
            }
        }
        reduced
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Full => "full",
            Granularity::DropBuild => "drop-build",
            Granularity::DropMaintenance => "drop-maintenance",
            Granularity::Latest => "latest",
        };
        f.write_str(name)
    }
}

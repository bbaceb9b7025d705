//! Release metadata module
//!
//! This module contains the release data model and the filename grammar:
//! - Release descriptors and structured versions
//! - Alias formatting
//! - Filename parsing
//! - The registry accumulating releases during a crawl

mod descriptor;
mod grammar;
mod registry;

pub use descriptor::{
    format_alias, Platform, Project, ReleaseDescriptor, Version, ALIAS_SEPARATOR,
};
pub use grammar::FilenameGrammar;
pub use registry::ReleaseRegistry;

//! URL handling module for Dropwatch
//!
//! This module provides the crawl jail and link normalization.

mod jail;
mod normalize;

// Re-export main types and functions
pub use jail::Jail;
pub use normalize::{filename_of, resolve_link};

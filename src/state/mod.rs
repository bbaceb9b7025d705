//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TaskOutcome`: How each dispatched task ended (registered, listed, dropped, failed)

mod task_outcome;

// Re-export main types
pub use task_outcome::TaskOutcome;

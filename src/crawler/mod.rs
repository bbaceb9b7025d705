//! Crawler module for directory-listing traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP probing and fetching with a single retry
//! - Content classification by verb and media type
//! - Listing parsing and link extraction
//! - Jail-filtered, deduplicated task scheduling
//! - Overall crawl coordination

mod classifier;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod task;

pub use classifier::{classify, Action, ContentKind};
pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, fetch, format_user_agent, FetchResult};
pub use parser::extract_links;
pub use scheduler::{Enqueued, Scheduler};
pub use task::{CrawlTask, Verb};

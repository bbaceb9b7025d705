//! Scheduler for the crawl work queue
//!
//! This module handles:
//! - FIFO ordering of pending tasks
//! - Jail filtering when a task is queued
//! - Deduplication of `(url, verb)` pairs over the whole run
//! - A fixed wait before every dispatched task

use crate::crawler::task::{CrawlTask, Verb};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

/// Result of offering a task to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// The task was added to the queue
    Queued,
    /// The URL is outside the task's jail
    OutOfScope,
    /// The same URL was already queued with the same verb
    Duplicate,
}

/// Work queue shared by every root of a crawl run
///
/// Roots seeded into the same scheduler share its seen-set, so a URL
/// reachable from two roots is requested once.
pub struct Scheduler {
    /// Tasks waiting to be dispatched
    queue: VecDeque<CrawlTask>,

    /// Every `(url, verb)` ever queued
    seen: HashSet<(String, Verb)>,

    /// Wait before each dispatch
    delay: Duration,
}

impl Scheduler {
    /// Creates an empty scheduler
    ///
    /// # Arguments
    ///
    /// * `delay` - Wait before every dispatched task
    pub fn new(delay: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            seen: HashSet::new(),
            delay,
        }
    }

    /// Offers a task to the queue
    ///
    /// Tasks outside their jail are dropped and logged at info level;
    /// duplicates are dropped silently.
    pub fn enqueue(&mut self, task: CrawlTask) -> Enqueued {
        if !task.jail.test(task.url.as_str()) {
            tracing::info!("Out of jail: {}", task.url);
            return Enqueued::OutOfScope;
        }

        if !self.seen.insert((task.url.as_str().to_string(), task.verb)) {
            tracing::trace!("Already queued: {} {}", task.verb, task.url);
            return Enqueued::Duplicate;
        }

        tracing::trace!("Queued: {} {}", task.verb, task.url);
        self.queue.push_back(task);
        Enqueued::Queued
    }

    /// Gets the next task, waiting out the dispatch delay first
    ///
    /// The crawl loop only asks for a task once the previous one has
    /// finished, so the wait always separates the end of one request from
    /// the start of the next, however long the request took.
    ///
    /// # Returns
    ///
    /// * `Some(CrawlTask)` - The next task to run
    /// * `None` - The queue is drained
    pub async fn next_task(&mut self) -> Option<CrawlTask> {
        let task = self.queue.pop_front()?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Some(task)
    }

    /// Returns the number of pending tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is drained
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns how many distinct `(url, verb)` pairs were queued
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

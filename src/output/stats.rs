//! Crawl statistics
//!
//! Counters collected by the coordinator while the crawl runs, and a
//! plain-text report of them.

use crate::crawler::{Enqueued, Verb};
use crate::state::TaskOutcome;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// HEAD requests dispatched
    pub probes: u64,

    /// GET requests dispatched
    pub fetches: u64,

    /// Links rejected by their jail
    pub out_of_scope: u64,

    /// Links already queued with the same verb
    pub duplicates: u64,

    /// Count of dispatched tasks by outcome
    pub tasks_by_outcome: HashMap<TaskOutcome, u64>,
}

impl CrawlStatistics {
    /// Creates empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dispatched request
    pub fn record_dispatch(&mut self, verb: Verb) {
        match verb {
            Verb::Probe => self.probes += 1,
            Verb::Fetch => self.fetches += 1,
        }
    }

    /// Records the scheduler's answer to an offered task
    pub fn record_enqueue(&mut self, enqueued: Enqueued) {
        match enqueued {
            Enqueued::Queued => {}
            Enqueued::OutOfScope => self.out_of_scope += 1,
            Enqueued::Duplicate => self.duplicates += 1,
        }
    }

    /// Records how a task ended
    pub fn record(&mut self, outcome: TaskOutcome) {
        *self.tasks_by_outcome.entry(outcome).or_insert(0) += 1;
    }

    /// Number of tasks that ended with `outcome`
    pub fn count(&self, outcome: TaskOutcome) -> u64 {
        self.tasks_by_outcome.get(&outcome).copied().unwrap_or(0)
    }

    /// Total dispatched tasks
    pub fn total_tasks(&self) -> u64 {
        self.probes + self.fetches
    }

    /// Tasks that ended in an error state
    pub fn total_errors(&self) -> u64 {
        self.tasks_by_outcome
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Requests: {} HEAD, {} GET", stats.probes, stats.fetches);
    println!("  Links out of jail: {}", stats.out_of_scope);
    println!("  Duplicate links: {}", stats.duplicates);
    println!();

    println!("Tasks by Outcome:");
    // Sort outcomes by count (descending), then by name
    let mut outcome_counts: Vec<_> = stats.tasks_by_outcome.iter().collect();
    outcome_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (outcome, count) in outcome_counts {
        let percentage = if stats.total_tasks() > 0 {
            (*count as f64 / stats.total_tasks() as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    let sum_where = |pred: fn(&TaskOutcome) -> bool| -> u64 {
        stats
            .tasks_by_outcome
            .iter()
            .filter(|(outcome, _)| pred(outcome))
            .map(|(_, count)| count)
            .sum()
    };
    println!(
        "Progress: {}, Skipped: {}, Errors: {}",
        sum_where(TaskOutcome::is_progress),
        sum_where(TaskOutcome::is_skipped),
        stats.total_errors()
    );
    println!(
        "Releases registered: {}",
        stats.count(TaskOutcome::Registered)
    );
}

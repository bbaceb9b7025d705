//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the work queue with one jailed probe per root
//! - Dispatching HEAD probes and GET fetches
//! - Routing each response through the content classifier
//! - Registering releases parsed from artifact filenames

use crate::config::Config;
use crate::crawler::classifier::{classify, Action, ContentKind};
use crate::crawler::fetcher::{build_http_client, fetch, FetchResult};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::task::CrawlTask;
use crate::output::CrawlStatistics;
use crate::release::{FilenameGrammar, ReleaseRegistry};
use crate::state::TaskOutcome;
use crate::url::{filename_of, Jail};
use crate::DropError;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Tasks between two progress log lines
const PROGRESS_INTERVAL: u64 = 25;

/// What a drained crawl leaves behind
#[derive(Debug)]
pub struct CrawlReport {
    /// Every release registered during the crawl, in discovery order
    pub registry: ReleaseRegistry,

    /// Request and outcome counters
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// Owns the work queue, the registry and the statistics; tasks run one at
/// a time, so none of them needs a lock.
pub struct Coordinator {
    scheduler: Scheduler,
    client: Client,
    grammar: FilenameGrammar,
    accept_platforms: Option<Vec<String>>,
    registry: ReleaseRegistry,
    stats: CrawlStatistics,
    retry_timeout: Duration,
}

impl Coordinator {
    /// Creates a new coordinator and seeds it with the configured roots
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(DropError)` - The grammar, a jail, a root URL or the HTTP
    ///   client could not be built
    pub fn new(config: &Config) -> Result<Self, DropError> {
        let grammar = FilenameGrammar::new(&config.releases.projects, &config.releases.platforms)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        let mut coordinator = Self {
            scheduler: Scheduler::new(Duration::from_millis(config.crawler.request_delay)),
            client,
            accept_platforms: config.releases.accept_platforms.clone(),
            registry: ReleaseRegistry::new(),
            stats: CrawlStatistics::new(),
            retry_timeout: Duration::from_millis(config.crawler.retry_timeout),
            grammar,
        };

        for root in &config.roots {
            // Jail the parsed form so the seed itself is always in scope
            let url = Url::parse(&root.url)?;
            let jail = Jail::new(
                url.as_str(),
                Some(&root.version_pattern),
                Some(coordinator.grammar.pattern()),
            )?;
            tracing::debug!("Jail for {}: {}", url, jail);

            let enqueued = coordinator
                .scheduler
                .enqueue(CrawlTask::probe(url, Arc::new(jail)));
            coordinator.stats.record_enqueue(enqueued);
        }

        Ok(coordinator)
    }

    /// Runs the crawl loop until the queue drains
    ///
    /// Individual task failures are logged and counted; they never stop
    /// the crawl.
    pub async fn run(mut self) -> CrawlReport {
        tracing::info!("Starting crawl with {} root(s)", self.scheduler.pending());

        let start_time = Instant::now();
        let mut tasks_run: u64 = 0;

        while let Some(task) = self.scheduler.next_task().await {
            self.stats.record_dispatch(task.verb);

            let outcome = self.process(task).await;
            tracing::trace!("Task finished: {}", outcome);
            self.stats.record(outcome);

            tasks_run += 1;
            if tasks_run % PROGRESS_INTERVAL == 0 {
                let rate = tasks_run as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} tasks run, {} queued, {} releases, {:.2} tasks/sec",
                    tasks_run,
                    self.scheduler.pending(),
                    self.registry.len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl drained: {} tasks run ({} distinct), {} releases registered in {:?}",
            tasks_run,
            self.scheduler.seen_count(),
            self.registry.len(),
            start_time.elapsed()
        );

        CrawlReport {
            registry: self.registry,
            stats: self.stats,
        }
    }

    /// Runs one task and reports how it ended
    async fn process(&mut self, task: CrawlTask) -> TaskOutcome {
        let (final_url, content_type, body) =
            match fetch(&self.client, task.verb, &task.url, self.retry_timeout).await {
                FetchResult::Success {
                    final_url,
                    content_type,
                    body,
                    ..
                } => (final_url, content_type, body),
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("{} {} returned HTTP {}", task.verb, task.url, status_code);
                    return TaskOutcome::HttpError;
                }
                FetchResult::NetworkError { error } => {
                    tracing::error!("{} {} failed: {}", task.verb, task.url, error);
                    return TaskOutcome::TransportError;
                }
            };

        tracing::info!("{} {} ({})", task.verb, task.url, content_type);

        match classify(task.verb, ContentKind::from_content_type(&content_type)) {
            Action::Escalate => {
                let enqueued = self.scheduler.enqueue(task.escalate());
                self.stats.record_enqueue(enqueued);
                TaskOutcome::Escalated
            }
            Action::EnumerateLinks => {
                let html = body.unwrap_or_default();
                for link in extract_links(&html, &final_url) {
                    let enqueued = self.scheduler.enqueue(task.child(link));
                    self.stats.record_enqueue(enqueued);
                }
                TaskOutcome::Listed
            }
            Action::ParseArtifact => self.register_artifact(&task),
            Action::UnexpectedVerb => {
                tracing::error!("Unexpected verb {} for {}", task.verb, task.url);
                TaskOutcome::UnexpectedVerb
            }
            Action::Unhandled => {
                tracing::warn!(
                    "Unhandled content-type {:?} for {}",
                    content_type,
                    task.url
                );
                TaskOutcome::UnhandledContentType
            }
        }
    }

    /// Parses the task URL's filename and registers the release
    fn register_artifact(&mut self, task: &CrawlTask) -> TaskOutcome {
        let Some(filename) = filename_of(&task.url) else {
            tracing::error!("Unexpected filename: {} has no filename", task.url);
            return TaskOutcome::UnexpectedFilename;
        };

        let release = match self.grammar.parse(filename, task.url.clone()) {
            Ok(release) => release,
            Err(e) => {
                tracing::error!("Unexpected filename: {}", e);
                return TaskOutcome::UnexpectedFilename;
            }
        };

        if let Some(accepted) = &self.accept_platforms {
            if !accepted.contains(&release.platform.name) {
                tracing::info!(
                    "Unsupported platform {} for {}",
                    release.platform.name,
                    release.filename
                );
                return TaskOutcome::UnsupportedPlatform;
            }
        }

        self.registry.register(release);
        TaskOutcome::Registered
    }
}

/// Runs a complete crawl operation
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the filename grammar and one jail per root
/// 2. Build the HTTP client
/// 3. Seed the scheduler with a probe per root
/// 4. Main crawl loop:
///    a. Get the next task from the scheduler
///    b. HEAD or GET the URL
///    c. Classify the response by verb and content type
///    d. Escalate, enumerate links, or register a release
/// 5. Return the registry and statistics once the queue drains
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Example
///
/// ```no_run
/// use dropwatch::config::load_config;
/// use dropwatch::crawler::run_crawl;
/// use dropwatch::resolve_tags;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let mut report = run_crawl(&config).await?;
/// let aliases = resolve_tags(&mut report.registry);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, DropError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

//! Integration tests for the crawler
//!
//! These tests use wiremock to serve mock drop sites and run the full
//! crawl and resolve cycle end-to-end.

use dropwatch::config::{
    default_version_pattern, Config, CrawlerConfig, OutputConfig, ReleasesConfig, RootEntry,
    UserAgentConfig,
};
use dropwatch::crawler::run_crawl;
use dropwatch::output::{publish, RunSummary};
use dropwatch::resolve_tags;
use dropwatch::TaskOutcome;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the given roots
fn create_test_config(roots: Vec<String>) -> Config {
    Config {
        crawler: CrawlerConfig {
            request_timeout: 2000,
            retry_timeout: 10,
            request_delay: 0,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        releases: ReleasesConfig::default(),
        output: OutputConfig {
            releases_path: "./releases.json".to_string(),
            summary_path: None,
        },
        roots: roots
            .into_iter()
            .map(|url| RootEntry {
                url,
                version_pattern: default_version_pattern(),
            })
            .collect(),
    }
}

/// Serves `html` as a directory listing at `at`, for both HEAD and GET
async fn mount_listing(server: &MockServer, at: &str, html: &str) {
    Mock::given(method("HEAD"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html.as_bytes().to_vec(), "text/html;charset=UTF-8"),
        )
        .mount(server)
        .await;
}

/// Serves an artifact at `at`; only HEAD is mocked
async fn mount_artifact(server: &MockServer, at: &str, content_type: &str) {
    Mock::given(method("HEAD"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", content_type))
        .mount(server)
        .await;
}

fn listing(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<tr><td><a href=\"{}\">{}</a></td></tr>\n", href, href))
        .collect();
    format!(
        "<html><head><title>Index</title></head><body><table>\n\
         <tr><th><a href=\"?C=N;O=D\">Name</a></th></tr>\n{}</table></body></html>",
        anchors
    )
}

/// Mounts a small SourceMod-style drop site under `/drop/`
async fn mount_drop_site(server: &MockServer) {
    mount_listing(
        server,
        "/drop/",
        &listing(&["../", "1.9/", "1.10/", "2.0/", "/other/"]),
    )
    .await;
    mount_listing(
        server,
        "/drop/1.9/",
        &listing(&["/drop/", "sourcemod-1.9.0-git6281-linux.tar.gz"]),
    )
    .await;
    mount_listing(
        server,
        "/drop/1.10/",
        &listing(&[
            "/drop/",
            "sourcemod-1.10.0-git6500-linux.tar.gz",
            "sourcemod-1.10.0-git6502-linux.tar.gz",
            "sourcemod-1.10.0-git6502-windows.zip",
            "sourcemod-latest-linux",
        ]),
    )
    .await;

    mount_artifact(
        server,
        "/drop/1.9/sourcemod-1.9.0-git6281-linux.tar.gz",
        "application/x-gzip",
    )
    .await;
    mount_artifact(
        server,
        "/drop/1.10/sourcemod-1.10.0-git6500-linux.tar.gz",
        "application/x-gzip",
    )
    .await;
    mount_artifact(
        server,
        "/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz",
        "application/x-gzip",
    )
    .await;
    mount_artifact(
        server,
        "/drop/1.10/sourcemod-1.10.0-git6502-windows.zip",
        "application/zip",
    )
    .await;
}

/// Requests received by the server as `(method, path)` pairs
async fn received(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|request| (request.method.to_string(), request.url.path().to_string()))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_resolves_aliases() {
    let mock_server = MockServer::start().await;
    mount_drop_site(&mock_server).await;

    let base_url = mock_server.uri();
    let config = create_test_config(vec![format!("{}/drop/", base_url)]);

    let mut report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.registry.len(), 4);

    let aliases = resolve_tags(&mut report.registry);
    let url = |p: &str| format!("{}{}", base_url, p);

    let latest_linux = url("/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz");
    assert_eq!(aliases["sourcemod-latest-linux"], latest_linux);
    assert_eq!(aliases["sourcemod-1.10-linux"], latest_linux);
    assert_eq!(aliases["sourcemod-1.10.0-linux"], latest_linux);
    assert_eq!(aliases["sourcemod-1.10.0.6502-linux"], latest_linux);
    assert_eq!(
        aliases["sourcemod-1.10.0.6500-linux"],
        url("/drop/1.10/sourcemod-1.10.0-git6500-linux.tar.gz")
    );

    let old_linux = url("/drop/1.9/sourcemod-1.9.0-git6281-linux.tar.gz");
    assert_eq!(aliases["sourcemod-1.9-linux"], old_linux);
    assert_eq!(aliases["sourcemod-1.9.0-linux"], old_linux);
    assert_eq!(aliases["sourcemod-1.9.0.6281-linux"], old_linux);

    let windows = url("/drop/1.10/sourcemod-1.10.0-git6502-windows.zip");
    assert_eq!(aliases["sourcemod-latest-windows"], windows);
    assert_eq!(aliases["sourcemod-1.10-windows"], windows);

    assert_eq!(aliases.len(), 12);
    assert_eq!(report.stats.count(TaskOutcome::Registered), 4);
    assert_eq!(report.stats.count(TaskOutcome::Listed), 3);
    assert_eq!(report.stats.count(TaskOutcome::Escalated), 3);
}

#[tokio::test]
async fn test_out_of_jail_links_are_not_requested() {
    let mock_server = MockServer::start().await;
    mount_drop_site(&mock_server).await;

    let config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    let report = run_crawl(&config).await.expect("Crawl failed");

    let requests = received(&mock_server).await;
    for (_, requested) in &requests {
        assert!(requested.starts_with("/drop/"), "requested {}", requested);
        assert_ne!(requested, "/drop/2.0/");
        assert_ne!(requested, "/drop/1.10/sourcemod-latest-linux");
    }

    // ../, 2.0/, /other/ and the unversioned symlink
    assert_eq!(report.stats.out_of_scope, 4);
}

#[tokio::test]
async fn test_archives_are_never_fetched() {
    let mock_server = MockServer::start().await;
    mount_drop_site(&mock_server).await;

    let config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    run_crawl(&config).await.expect("Crawl failed");

    let requests = received(&mock_server).await;
    let archive_gets: Vec<_> = requests
        .iter()
        .filter(|(verb, p)| verb == "GET" && (p.ends_with(".tar.gz") || p.ends_with(".zip")))
        .collect();
    assert!(archive_gets.is_empty(), "archives fetched: {:?}", archive_gets);

    let archive_heads = requests
        .iter()
        .filter(|(verb, p)| verb == "HEAD" && (p.ends_with(".tar.gz") || p.ends_with(".zip")))
        .count();
    assert_eq!(archive_heads, 4);
}

#[tokio::test]
async fn test_each_url_requested_once_per_verb() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let absolute = format!("{}/drop/1.10/", base_url);
    mount_listing(
        &mock_server,
        "/drop/",
        &listing(&["1.10/", "./1.10/", &absolute, "1.10/#top", "1.10/?C=M;O=A"]),
    )
    .await;
    mount_listing(
        &mock_server,
        "/drop/1.10/",
        &listing(&["sourcemod-1.10.0-git6502-linux.tar.gz"]),
    )
    .await;
    mount_artifact(
        &mock_server,
        "/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz",
        "application/gzip",
    )
    .await;

    let config = create_test_config(vec![format!("{}/drop/", base_url)]);
    let report = run_crawl(&config).await.expect("Crawl failed");

    let requests = received(&mock_server).await;
    let count = |verb: &str, p: &str| {
        requests
            .iter()
            .filter(|(v, requested)| v == verb && requested == p)
            .count()
    };
    assert_eq!(count("HEAD", "/drop/1.10/"), 1);
    assert_eq!(count("GET", "/drop/1.10/"), 1);
    assert_eq!(count("HEAD", "/drop/"), 1);
    assert_eq!(report.registry.len(), 1);
}

#[tokio::test]
async fn test_multiple_roots_share_one_map() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(&mock_server, "/sm/", &listing(&["1.10/"])).await;
    mount_listing(
        &mock_server,
        "/sm/1.10/",
        &listing(&["sourcemod-1.10.0-git6502-linux.tar.gz"]),
    )
    .await;
    mount_artifact(
        &mock_server,
        "/sm/1.10/sourcemod-1.10.0-git6502-linux.tar.gz",
        "application/x-gzip",
    )
    .await;

    mount_listing(&mock_server, "/mms/", &listing(&["1.11/"])).await;
    mount_listing(
        &mock_server,
        "/mms/1.11/",
        &listing(&["mmsource-1.11.0-git1148-windows.zip"]),
    )
    .await;
    mount_artifact(
        &mock_server,
        "/mms/1.11/mmsource-1.11.0-git1148-windows.zip",
        "application/zip",
    )
    .await;

    let config = create_test_config(vec![
        format!("{}/sm/", base_url),
        format!("{}/mms/", base_url),
    ]);
    let mut report = run_crawl(&config).await.expect("Crawl failed");
    let aliases = resolve_tags(&mut report.registry);

    assert_eq!(
        aliases["sourcemod-latest-linux"],
        format!("{}/sm/1.10/sourcemod-1.10.0-git6502-linux.tar.gz", base_url)
    );
    assert_eq!(
        aliases["mmsource-latest-windows"],
        format!("{}/mms/1.11/mmsource-1.11.0-git1148-windows.zip", base_url)
    );
}

#[tokio::test]
async fn test_unsupported_platform_is_not_registered() {
    let mock_server = MockServer::start().await;
    mount_drop_site(&mock_server).await;

    let mut config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    config.releases.accept_platforms = Some(vec!["linux".to_string()]);

    let mut report = run_crawl(&config).await.expect("Crawl failed");
    let aliases = resolve_tags(&mut report.registry);

    assert_eq!(report.stats.count(TaskOutcome::UnsupportedPlatform), 1);
    assert!(aliases.keys().all(|alias| alias.ends_with("-linux")));
    assert!(aliases.contains_key("sourcemod-latest-linux"));
}

#[tokio::test]
async fn test_unhandled_content_type_is_dropped() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, "/drop/", &listing(&["1.10/"])).await;
    mount_listing(
        &mock_server,
        "/drop/1.10/",
        &listing(&["sourcemod-1.10.0-git6502-linux.tar.gz"]),
    )
    .await;
    mount_artifact(
        &mock_server,
        "/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz",
        "application/octet-stream",
    )
    .await;

    let config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    let mut report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stats.count(TaskOutcome::UnhandledContentType), 1);
    assert!(resolve_tags(&mut report.registry).is_empty());
}

#[tokio::test]
async fn test_missing_directory_is_http_error() {
    let mock_server = MockServer::start().await;

    // 1.9/ is linked but not served
    mount_listing(&mock_server, "/drop/", &listing(&["1.9/", "1.10/"])).await;
    mount_listing(
        &mock_server,
        "/drop/1.10/",
        &listing(&["sourcemod-1.10.0-git6502-linux.tar.gz"]),
    )
    .await;
    mount_artifact(
        &mock_server,
        "/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz",
        "application/x-gzip",
    )
    .await;

    let config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.stats.count(TaskOutcome::HttpError), 1);
    assert_eq!(report.registry.len(), 1);
}

#[tokio::test]
async fn test_empty_site_yields_empty_map() {
    let mock_server = MockServer::start().await;
    mount_listing(&mock_server, "/drop/", &listing(&[])).await;

    let config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    let mut report = run_crawl(&config).await.expect("Crawl failed");

    assert!(report.registry.is_empty());
    assert!(resolve_tags(&mut report.registry).is_empty());
    assert_eq!(report.stats.total_tasks(), 2);
}

#[tokio::test]
async fn test_timeout_is_retried_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/drop/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(vec![format!("{}/drop/", mock_server.uri())]);
    config.crawler.request_timeout = 200;

    let report = run_crawl(&config).await.expect("Crawl failed");

    let requests = received(&mock_server).await;
    assert_eq!(requests.len(), 2, "requests: {:?}", requests);
    assert!(requests
        .iter()
        .all(|(verb, p)| verb == "HEAD" && p == "/drop/"));
    assert_eq!(report.stats.count(TaskOutcome::TransportError), 1);
}

#[tokio::test]
async fn test_failed_crawl_keeps_previous_alias_map() {
    let dir = tempfile::TempDir::new().unwrap();
    let releases_path = dir.path().join("releases.json");
    let previous = "{\"sourcemod-latest-linux\": \"https://good/url.tar.gz\"}\n";
    std::fs::write(&releases_path, previous).unwrap();

    let mut config = create_test_config(vec!["http://127.0.0.1:9/drop/".to_string()]);
    config.output.releases_path = releases_path.display().to_string();

    let mut report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.stats.count(TaskOutcome::TransportError), 1);

    let aliases = resolve_tags(&mut report.registry);
    let summary = RunSummary::new(
        vec![],
        "abc123".to_string(),
        report.registry.len(),
        aliases,
        report.stats,
    );

    assert_eq!(publish(&config.output, &summary), 0);
    assert_eq!(std::fs::read_to_string(&releases_path).unwrap(), previous);
}

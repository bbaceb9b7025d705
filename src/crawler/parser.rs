//! Directory listing parser
//!
//! Listings are plain HTML index pages; every anchor is a candidate. The
//! jail decides later which of them are worth a probe.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracts every link of a directory listing
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` with a non-empty href
/// - Resolved against `base_url` (the listing's final URL)
/// - Query, fragment and credentials dropped
/// - Non-HTTP(S) links skipped
/// - Duplicates removed, first occurrence kept
///
/// # Example
///
/// ```
/// use dropwatch::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="1.10/">1.10/</a><a href="?C=N;O=D">Name</a></body></html>"#;
/// let base_url = Url::parse("https://sm.alliedmods.net/smdrop/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links[0].as_str(), "https://sm.alliedmods.net/smdrop/1.10/");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links: Vec<Url> = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.trim().is_empty() {
            continue;
        }

        match resolve_link(base_url, href) {
            Ok(url) => {
                if !links.contains(&url) {
                    links.push(url);
                }
            }
            Err(e) => tracing::debug!("Skipping link {:?} on {}: {}", href, base_url, e),
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://sm.alliedmods.net/smdrop/1.10/").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        extract_links(html, &base_url())
            .into_iter()
            .map(|u| u.to_string())
            .collect()
    }

    const APACHE_LISTING: &str = r#"
        <html>
        <head><title>Index of /smdrop/1.10</title></head>
        <body>
        <h1>Index of /smdrop/1.10</h1>
        <table>
        <tr><th><a href="?C=N;O=D">Name</a></th><th><a href="?C=M;O=A">Last modified</a></th></tr>
        <tr><td><a href="/smdrop/">Parent Directory</a></td></tr>
        <tr><td><a href="sourcemod-1.10.0-git6502-linux.tar.gz">sourcemod-1.10.0-git6502-linux.tar.gz</a></td></tr>
        <tr><td><a href="sourcemod-1.10.0-git6502-windows.zip">sourcemod-1.10.0-git6502-windows.zip</a></td></tr>
        <tr><td><a href="sourcemod-latest-linux">sourcemod-latest-linux</a></td></tr>
        </table>
        </body>
        </html>
    "#;

    #[test]
    fn test_apache_listing() {
        assert_eq!(
            links(APACHE_LISTING),
            vec![
                "https://sm.alliedmods.net/smdrop/1.10/",
                "https://sm.alliedmods.net/smdrop/",
                "https://sm.alliedmods.net/smdrop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz",
                "https://sm.alliedmods.net/smdrop/1.10/sourcemod-1.10.0-git6502-windows.zip",
                "https://sm.alliedmods.net/smdrop/1.10/sourcemod-latest-linux",
            ]
        );
    }

    #[test]
    fn test_skip_empty_href() {
        let html = r#"<html><body><a href="">Empty</a><a href="  ">Blank</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_non_http_links() {
        let html = r#"<html><body><a href="mailto:admin@alliedmods.net">Mail</a><a href="javascript:void(0)">JS</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_anchor_without_href() {
        let html = r#"<html><body><a name="top">Top</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_absolute_links_kept() {
        let html = r#"<html><body><a href="https://www.sourcemod.net/">Home</a></body></html>"#;
        assert_eq!(links(html), vec!["https://www.sourcemod.net/"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(links("").is_empty());
    }
}

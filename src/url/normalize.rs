use crate::UrlError;
use url::Url;

/// Resolves a listing `href` into a crawlable URL
///
/// # Normalization Steps
///
/// 1. Resolve the href against the listing URL (dot segments are removed)
/// 2. Reject schemes other than HTTP and HTTPS
/// 3. Drop credentials (user and password)
/// 4. Drop the query string (directory listings add sort keys such as `?C=N;O=D`)
/// 5. Drop the fragment
///
/// Path case and trailing slashes are kept: on a drop site `/1.10` and
/// `/1.10/` are distinct resources until the server says otherwise.
///
/// # Examples
///
/// ```
/// use dropwatch::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://sm.alliedmods.net/smdrop/").unwrap();
/// let url = resolve_link(&base, "1.10/?C=M;O=A").unwrap();
/// assert_eq!(url.as_str(), "https://sm.alliedmods.net/smdrop/1.10/");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, UrlError> {
    let mut url = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    // Both setters only fail for URLs that cannot carry credentials,
    // which an http(s) URL always can.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Returns the last path segment of a URL, if it is non-empty
///
/// # Examples
///
/// ```
/// use dropwatch::url::filename_of;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/drop/1.10/sourcemod-1.10.0-git6502-linux.tar.gz").unwrap();
/// assert_eq!(filename_of(&url), Some("sourcemod-1.10.0-git6502-linux.tar.gz"));
/// ```
pub fn filename_of(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
}

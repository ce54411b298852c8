use log::debug;
use url::{form_urlencoded, Url};

use crate::common::RELATIVE_URL_BASE;

/// What the host knows about the page currently being viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    href: String,
    path: String,
    query: String,
    referrer: Option<String>,
}

impl PageContext {
    /// Build a context from the page URL and the document referrer.
    ///
    /// `url` may be absolute or origin-relative (`/landing?utm_source=x`).
    /// This never fails: unparseable input is split on `?` and `#` by hand.
    pub fn new(url: &str, referrer: Option<&str>) -> Self {
        let trimmed = url.trim();
        let (href, path, query) = match parse_page_url(trimmed) {
            Some((parsed, relative)) => split_parsed(&parsed, relative),
            None => {
                debug!("Page URL '{}' did not parse, splitting manually", trimmed);
                split_raw(trimmed)
            }
        };

        let referrer = referrer
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Self {
            href,
            path,
            query,
            referrer,
        }
    }

    /// URL without query string or fragment
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Path portion of the URL, `/` when the URL has none
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string without the leading `?`
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    /// First decoded value for `key`, matched exactly and case-sensitively.
    pub fn query_param(&self, key: &str) -> Option<String> {
        form_urlencoded::parse(self.query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Returns the parsed URL and whether it was resolved against the local base.
fn parse_page_url(url: &str) -> Option<(Url, bool)> {
    match Url::parse(url) {
        Ok(parsed) => Some((parsed, false)),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_URL_BASE)
            .ok()
            .and_then(|base| base.join(url).ok())
            .map(|joined| (joined, true)),
        Err(_) => None,
    }
}

fn split_parsed(parsed: &Url, relative: bool) -> (String, String, String) {
    let path = if parsed.path().is_empty() {
        "/".to_string()
    } else {
        parsed.path().to_string()
    };
    let query = parsed.query().unwrap_or("").to_string();

    let href = if relative || parsed.cannot_be_a_base() {
        path.clone()
    } else {
        let mut bare = parsed.clone();
        bare.set_query(None);
        bare.set_fragment(None);
        bare.to_string()
    };

    (href, path, query)
}

fn split_raw(url: &str) -> (String, String, String) {
    let without_fragment = url.split('#').next().unwrap_or("");
    let (before_query, query) = match without_fragment.split_once('?') {
        Some((before, query)) => (before, query),
        None => (without_fragment, ""),
    };
    let path = if before_query.is_empty() {
        "/".to_string()
    } else {
        before_query.to_string()
    };
    (path.clone(), path, query.to_string())
}

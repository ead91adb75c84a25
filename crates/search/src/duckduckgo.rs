//! DuckDuckGo web search — scrapes the no-JavaScript HTML endpoint.
//!
//! No API key is needed. Result links on that page go through a DuckDuckGo
//! redirect (`//duckduckgo.com/l/?uddg=<target>`), which is unwrapped here.

use async_trait::async_trait;
use quickseek_config::SearchConfig;
use quickseek_core::error::SearchError;
use quickseek_core::model::SearchResult;
use quickseek_core::search::SearchProvider;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const BASE_URL: &str = "https://duckduckgo.com/";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0";
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Web search through DuckDuckGo's HTML interface.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    endpoint: String,
    region: String,
    timeout: Duration,
}

impl DuckDuckGoSearch {
    /// Build from the `[search]` config section.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: HTML_ENDPOINT.to_string(),
            region: config.region.clone(),
            timeout: config.timeout(),
        })
    }

    /// Point at a different endpoint (a mirror or a local test server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn map_request_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        debug!(query = %query, limit, "Searching DuckDuckGo");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .form(&[("q", query), ("b", ""), ("kl", self.region.as_str())])
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        // DuckDuckGo answers 202 with an empty page when it throttles a client.
        if status == StatusCode::ACCEPTED || status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = status.as_u16(), "DuckDuckGo rate limited the request");
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let results = parse_results(&body, limit)?;
        debug!(results = results.len(), "DuckDuckGo search complete");
        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("bad selector '{css}': {e}")))
}

/// Extract at most `limit` organic results from a DuckDuckGo HTML page.
pub fn parse_results(html: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let result_selector = selector("div.result")?;
    let title_selector = selector("a.result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for element in document.select(&result_selector) {
        if results.len() >= limit {
            break;
        }

        // Sponsored entries
        if element.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(title_elem) = element.select(&title_selector).next() else {
            continue;
        };

        let title = collapse_text(title_elem);
        if title.is_empty() {
            continue;
        }

        let Some(url) = title_elem.value().attr("href").and_then(resolve_link) else {
            continue;
        };

        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(collapse_text)
            .unwrap_or_default();

        results.push(SearchResult::new(title, snippet, url));
    }

    Ok(results)
}

/// Text content of an element with runs of whitespace collapsed.
fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a result `href` into the destination URL.
///
/// Redirect links are unwrapped; any other link back into DuckDuckGo (ads,
/// internal pages) yields `None`.
fn resolve_link(href: &str) -> Option<String> {
    let base = Url::parse(BASE_URL).ok()?;
    let url = base.join(href).ok()?;

    let internal = url
        .host_str()
        .is_some_and(|host| host == "duckduckgo.com" || host.ends_with(".duckduckgo.com"));
    if !internal {
        return Some(url.to_string());
    }

    if url.path() == "/l/" {
        return url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .filter(|target| !target.is_empty());
    }

    None
}

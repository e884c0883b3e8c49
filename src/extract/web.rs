//! Web page extraction: fetch a page and reduce it to its article text.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{error, info};

use super::{ExtractError, collapse_whitespace, ensure_min_length};
use crate::core::models::{ExtractedContent, SourceKind};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Fragments this short (in characters) are navigation crumbs, captions, etc.
const MIN_FRAGMENT_CHARS: usize = 20;

/// Elements removed before any text is collected.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "form", "iframe",
];

/// Tried in order; the first visible match is the article root.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "[role=\"main\"]",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".content",
    "main",
    ".blog-post",
    ".post-body",
];

static CONTENT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
});

static TEXT_BLOCKS: LazyLock<Option<Selector>> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, h4, li").ok());

static BODY: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("body").ok());
static H1: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("h1").ok());
static TITLE: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("title").ok());

// html5ever always synthesizes <body>, so check the source for a real one.
static BODY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<body[\s>/]")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

pub struct WebExtractor {
    client: reqwest::Client,
}

impl WebExtractor {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ExtractError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ExtractError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its article text.
    ///
    /// # Errors
    ///
    /// Network failures, non-2xx statuses, pages without a usable body and
    /// pages with too little text all return an [`ExtractError`].
    pub async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let html = self.fetch(url).await.inspect_err(|e| {
            error!(url = %url, error = %e, "Error fetching URL");
        })?;

        let text = extract_article_text(&html).inspect_err(|e| {
            error!(url = %url, error = %e, "Error extracting content from page");
        })?;

        info!(url = %url, chars = text.chars().count(), "Extracted page content");
        Ok(ExtractedContent::new(text, url, SourceKind::Url))
    }

    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ExtractError::Fetch(format!("failed to read body: {e}")))
    }
}

/// Reduce an HTML document to `# Title` plus its main paragraphs, with all
/// whitespace collapsed.
///
/// # Errors
///
/// Returns [`ExtractError::NoBody`] when no content region and no `<body>`
/// exist, or [`ExtractError::TooShort`] when the result is near-empty.
pub fn extract_article_text(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);

    let root = CONTENT
        .iter()
        .find_map(|selector| first_visible(&document, selector))
        .or_else(|| {
            if BODY_TAG_RE.is_match(html) {
                BODY.as_ref().and_then(|s| first_visible(&document, s))
            } else {
                None
            }
        })
        .ok_or(ExtractError::NoBody)?;

    let title = H1
        .as_ref()
        .and_then(|s| first_visible(&document, s))
        .map(|el| visible_text(&el).trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            TITLE
                .as_ref()
                .and_then(|s| document.select(s).next())
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();

    let fragments: Vec<String> = TEXT_BLOCKS
        .as_ref()
        .map(|selector| {
            root.select(selector)
                .filter(|el| !is_stripped(el))
                .map(|el| visible_text(&el).trim().to_string())
                .filter(|text| text.chars().count() > MIN_FRAGMENT_CHARS)
                .collect()
        })
        .unwrap_or_default();

    let mut content = fragments.join("\n\n");
    if !title.is_empty() {
        content = format!("# {title}\n\n{content}");
    }

    ensure_min_length(collapse_whitespace(&content))
}

fn first_visible<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).find(|el| !is_stripped(el))
}

fn is_stripped_name(name: &str) -> bool {
    STRIPPED_TAGS.contains(&name)
}

/// True when the element or any ancestor is one of the stripped tags.
fn is_stripped(el: &ElementRef<'_>) -> bool {
    is_stripped_name(el.value().name())
        || el.ancestors().any(|node| {
            node.value()
                .as_element()
                .is_some_and(|e| is_stripped_name(e.name()))
        })
}

/// Concatenated text of `el`, skipping text nested in stripped tags.
fn visible_text(el: &ElementRef<'_>) -> String {
    el.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| is_stripped_name(e.name()))
            });
            (!hidden).then(|| String::from(&**text))
        })
        .collect()
}

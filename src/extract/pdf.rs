//! Text extraction from PDFs uploaded to Slack.
//!
//! The file is downloaded with the bot token, spooled to a temp file that is
//! removed when it goes out of scope, and read page by page with `lopdf`.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use tracing::{error, info, warn};

use super::{ExtractError, collapse_whitespace, ensure_min_length};
use crate::core::models::{ExtractedContent, SourceKind};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack files larger than this are refused rather than buffered.
pub const MAX_PDF_BYTES: usize = 25 * 1024 * 1024;

pub const MAX_PDF_PAGES: usize = 20;

pub const TRUNCATION_MARKER: &str = "[Content truncated - PDF exceeds 20 pages]";

pub struct PdfExtractor {
    client: reqwest::Client,
    bot_token: String,
}

impl PdfExtractor {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(bot_token: String) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| ExtractError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, bot_token })
    }

    /// Download a private Slack file and extract its text.
    ///
    /// # Errors
    ///
    /// Download failures, unreadable PDFs and near-empty text all return an
    /// [`ExtractError`].
    pub async fn extract(
        &self,
        file_url: &str,
        file_name: &str,
    ) -> Result<ExtractedContent, ExtractError> {
        let bytes = self.download(file_url).await.inspect_err(|e| {
            error!(file = %file_name, error = %e, "Error downloading PDF");
        })?;

        let text = tokio::task::spawn_blocking(move || extract_pdf_bytes(&bytes))
            .await
            .map_err(|e| ExtractError::Parse(format!("PDF extraction task failed: {e}")))?
            .inspect_err(|e| {
                error!(file = %file_name, error = %e, "Error extracting PDF content");
            })?;

        info!(file = %file_name, chars = text.chars().count(), "Extracted PDF content");
        Ok(ExtractedContent::new(text, file_name, SourceKind::Pdf))
    }

    async fn download(&self, file_url: &str) -> Result<Vec<u8>, ExtractError> {
        let resp = self
            .client
            .get(file_url)
            .bearer_auth(&self.bot_token)
            .send()
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ExtractError::Status(resp.status().as_u16()));
        }

        if let Some(len) = resp.content_length()
            && len > u64::try_from(MAX_PDF_BYTES).unwrap_or(u64::MAX)
        {
            return Err(ExtractError::Fetch(format!(
                "PDF too large ({len}B > {MAX_PDF_BYTES}B)"
            )));
        }

        let mut out: Vec<u8> = Vec::new();
        let mut stream = resp.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk =
                item.map_err(|e| ExtractError::Fetch(format!("error reading download: {e}")))?;
            if out.len().saturating_add(chunk.len()) > MAX_PDF_BYTES {
                return Err(ExtractError::Fetch(format!(
                    "PDF too large (exceeded {MAX_PDF_BYTES}B cap)"
                )));
            }
            out.extend_from_slice(&chunk);
        }

        Ok(out)
    }
}

/// Extract text from raw PDF bytes via a scoped temp file.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] for unreadable documents and
/// [`ExtractError::TooShort`] when the text is near-empty.
pub fn extract_pdf_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    with_temp_pdf(bytes, |path| {
        let doc = lopdf::Document::load(path)
            .map_err(|e| ExtractError::Parse(format!("invalid PDF: {e}")))?;

        let pages = doc.get_pages();
        let total = pages.len();
        let texts = pages.keys().take(MAX_PDF_PAGES).map(|&page_no| {
            doc.extract_text(&[page_no]).unwrap_or_else(|e| {
                warn!(page = page_no, error = %e, "Skipping unreadable PDF page");
                String::new()
            })
        });

        assemble_pages(texts, total)
    })
}

/// Write `bytes` to a temp file, run `f` on its path, and remove the file
/// whatever `f` returns.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written, or whatever `f`
/// returns.
pub fn with_temp_pdf<T>(
    bytes: &[u8],
    f: impl FnOnce(&Path) -> Result<T, ExtractError>,
) -> Result<T, ExtractError> {
    let mut file = tempfile::Builder::new()
        .prefix("vertovoice-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ExtractError::Parse(format!("failed to create temp file: {e}")))?;

    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| ExtractError::Parse(format!("failed to write temp file: {e}")))?;

    f(file.path())
}

/// Join per-page text, capped at [`MAX_PDF_PAGES`] pages.
///
/// Empty pages are skipped. If the document has more pages than the cap, a
/// single [`TRUNCATION_MARKER`] is appended.
///
/// # Errors
///
/// Returns [`ExtractError::TooShort`] when the joined text is near-empty.
pub fn assemble_pages<I>(pages: I, total_pages: usize) -> Result<String, ExtractError>
where
    I: IntoIterator<Item = String>,
{
    let mut parts: Vec<String> = pages
        .into_iter()
        .take(MAX_PDF_PAGES)
        .filter(|text| !text.trim().is_empty())
        .collect();

    if total_pages > MAX_PDF_PAGES {
        parts.push(TRUNCATION_MARKER.to_string());
    }

    ensure_min_length(collapse_whitespace(&parts.join("\n\n")))
}

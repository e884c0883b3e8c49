//! MIME utilities for Slack file attachments

const PDF_MIME: &str = "application/pdf";

/// Whether a Slack file looks like a PDF, by `filetype`, `mimetype` or name.
#[must_use]
pub fn is_pdf_file(filetype: Option<&str>, mimetype: Option<&str>, name: Option<&str>) -> bool {
    if filetype.is_some_and(|t| t.eq_ignore_ascii_case("pdf")) {
        return true;
    }
    if mimetype.is_some_and(|m| canonicalize_mime(m) == PDF_MIME) {
        return true;
    }
    name.and_then(|n| mime_guess::from_path(n).first())
        .is_some_and(|m| m.essence_str() == PDF_MIME)
}

#[must_use]
pub fn canonicalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_from_any_hint() {
        assert!(is_pdf_file(Some("PDF"), None, None));
        assert!(is_pdf_file(None, Some("application/pdf; charset=binary"), None));
        assert!(is_pdf_file(None, None, Some("Quarterly Report.pdf")));
        assert!(!is_pdf_file(Some("png"), Some("image/png"), Some("chart.png")));
        assert!(!is_pdf_file(None, None, None));
    }
}

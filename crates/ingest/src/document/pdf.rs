use super::{ExtractionError, PageContent};

pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let pages = pages_from_text(&text);
    if pages.len() == 1 && pages[0].text.is_empty() {
        // Scanned/image PDFs extract successfully but carry no text layer.
        tracing::warn!("PDF contains no extractable text");
    }
    Ok(pages)
}

/// Split extracted PDF text into pages.
///
/// pdf-extract returns all text as one string; form feed characters (\x0C)
/// typically separate pages.
fn pages_from_text(text: &str) -> Vec<PageContent> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![PageContent {
            page_number: 1,
            text: String::new(),
            headings: Vec::new(),
        }];
    }

    if text.contains('\x0C') {
        text.split('\x0C')
            .enumerate()
            .filter(|(_, page_text)| !page_text.trim().is_empty())
            .map(|(i, page_text)| PageContent {
                page_number: i + 1,
                text: page_text.trim().to_string(),
                headings: Vec::new(),
            })
            .collect()
    } else {
        // No page breaks found, treat as single page
        vec![PageContent {
            page_number: 1,
            text: trimmed.to_string(),
            headings: Vec::new(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        let pages = pages_from_text("first page\x0Csecond page\x0C");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "first page");
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].text, "second page");
    }

    #[test]
    fn blank_pages_dropped_but_numbering_kept() {
        let pages = pages_from_text("one\x0C  \n \x0Cthree");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_number, 3);
        assert_eq!(pages[1].text, "three");
    }

    #[test]
    fn no_form_feed_is_single_page() {
        let pages = pages_from_text("\n  Heading 1\n\nThis is a simple PDF.\n");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "Heading 1\n\nThis is a simple PDF.");
    }

    #[test]
    fn empty_text_is_single_empty_page() {
        let pages = pages_from_text("  \n ");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].text.is_empty());
    }
}

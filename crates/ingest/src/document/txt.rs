use super::{ExtractionError, PageContent};

/// Decode as UTF-8, falling back to lossy conversion. A leading byte order
/// mark is dropped.
pub(super) fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::debug!(valid_up_to = e.valid_up_to(), "text is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

pub fn extract_txt(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    Ok(vec![PageContent {
        page_number: 1,
        text: decode_text(bytes).trim().to_string(),
        headings: Vec::new(),
    }])
}

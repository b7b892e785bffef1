use super::txt::decode_text;
use super::{ExtractionError, PageContent};

/// Title of an ATX heading line (`#` to `######` followed by a space).
fn heading_title(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let rest = rest.trim();
    // A closing `#` run only counts when it stands apart from the title.
    let open = rest.trim_end_matches('#');
    let title = if open.is_empty() || open.ends_with([' ', '\t']) {
        open.trim_end()
    } else {
        rest
    };
    (!title.is_empty()).then_some(title)
}

pub fn extract_md(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = decode_text(bytes);

    let mut headings = Vec::new();
    let mut in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(title) = heading_title(line) {
            headings.push(title.to_string());
        }
    }

    Ok(vec![PageContent {
        page_number: 1,
        text: text.trim().to_string(),
        headings,
    }])
}

//! Excerpt extraction.
//!
//! The excerpt is the first prose paragraph of the rewritten body. Headings
//! (`#...`) and image lines (`![...`) are skipped wherever they appear; the
//! paragraph ends at the first blank line after prose has started.
//!
//! Paragraphs longer than the budget are clipped at the last sentence end
//! that fits, falling back to a hard cut.

/// Extract the excerpt from `body`, clipped to `limit` characters.
pub fn extract_excerpt(body: &str, limit: Option<usize>) -> String {
    let mut lines = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !lines.is_empty() {
                break;
            }
            continue;
        }
        if line.starts_with('#') || line.starts_with("![") {
            continue;
        }
        lines.push(line);
    }

    let paragraph = lines.join(" ");
    clip_sentence(paragraph.trim(), limit)
}

/// Clip `text` to at most `limit` characters, preferring a sentence end.
///
/// Keeps everything through the last `.` whose character index is below
/// `limit`; without one, cuts at exactly `limit` characters.
fn clip_sentence(text: &str, limit: Option<usize>) -> String {
    let Some(limit) = limit else {
        return text.trim_end().to_owned();
    };

    // Byte offset of the `limit`-th character, or None when text is short enough
    let Some((cut, _)) = text.char_indices().nth(limit) else {
        return text.trim_end().to_owned();
    };

    let clipped = match text[..cut].rfind('.') {
        Some(period) => &text[..=period],
        None => &text[..cut],
    };
    clipped.trim_end().to_owned()
}

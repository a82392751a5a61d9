//! Filename-derived identities and titles.
//!
//! A note's identity ties it to its previous exports across runs:
//! `My First Post.md` → `my-first-post`, exported as
//! `2024-06-15-my-first-post.md`.

use std::path::Path;

/// Separator replacing spaces in identities.
pub const IDENTITY_SEPARATOR: char = '-';

/// Identity of a note: file stem with spaces replaced by `-`, lowercased.
pub fn identity(path: &Path) -> String {
    stem(path)
        .replace(' ', &IDENTITY_SEPARATOR.to_string())
        .to_lowercase()
}

/// Title used when the note declares neither `title` nor `slug`.
///
/// `-` and `_` become spaces, then every word is title-cased.
pub fn fallback_title(path: &Path) -> String {
    title_case(&stem(path).replace(['-', '_'], " "))
}

/// File stem as text, empty when the path has none.
fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Uppercase the first character of every word, lowercase the rest.
///
/// Whitespace runs are preserved as-is.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

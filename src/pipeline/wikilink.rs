//! Wiki link flattening.
//!
//! Posts are published without the rest of the vault, so `[[Page]]` links
//! have nowhere to point. They are reduced to plain text:
//!
//! - `[[Page|Shown]]` → `Shown`
//! - `[[Page]]` → the configured replacement for `Page`, else `Page`
//!
//! Embeds (`![[...]]`) still present at this stage could not be resolved
//! and are kept as written.

use regex::{Captures, Regex};
use std::{borrow::Cow, collections::HashMap, sync::LazyLock};

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^|\]]+)(?:\|([^\]]+))?\]\]").expect("wikilink regex"));

/// Replace every wiki link in `body` with plain text.
pub fn rewrite_references<'a>(
    body: &'a str,
    replacements: &HashMap<String, String>,
) -> Cow<'a, str> {
    WIKILINK_REGEX.replace_all(body, |caps: &Captures<'_>| {
        if !caps[1].is_empty() {
            return caps[0].to_owned();
        }
        if let Some(display) = caps.get(3) {
            return display.as_str().trim().to_owned();
        }
        let page = caps[2].trim();
        replacements
            .get(page)
            .cloned()
            .unwrap_or_else(|| page.to_owned())
    })
}

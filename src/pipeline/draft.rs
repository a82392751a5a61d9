//! Draft block removal.
//!
//! `<draft>` … `</draft>` spans never reach a published post. The closing
//! tag is also accepted as `<\/draft>` or `<\draft>`, the escaped spellings
//! some editors produce. Matching is case-insensitive, spans may cross
//! lines and each opener pairs with the nearest closer. An opener without a
//! closer is left in place.

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static DRAFT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<draft>.*?<(?:/|\\/?)draft>").expect("draft regex"));

/// Remove every draft span, delimiters included.
pub fn strip_drafts(body: &str) -> Cow<'_, str> {
    DRAFT_REGEX.replace_all(body, "")
}

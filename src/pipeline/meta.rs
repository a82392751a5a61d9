//! Note metadata and post front matter.
//!
//! [`NoteMeta`] is what an author wrote at the top of a note: a handful of
//! recognized keys plus anything else, kept aside in `extra`.
//! [`PostMeta`] is the fixed schema every published post carries:
//!
//! ```yaml
//! layout: post
//! categories: blog
//! title: My First Post
//! date: 2024-06-15 14:30
//! tags: [blog, rust]
//! title-image: /images/cat.png
//! excerpt: The first paragraph.
//! ```
//!
//! Normalization never fails: every field has a fallback.

use crate::{config::PostConfig, utils::date::normalize_date};
use chrono::NaiveDateTime;
use educe::Educe;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

// ============================================================================
// Input metadata
// ============================================================================

/// Front matter of a source note.
#[derive(Debug, Clone, PartialEq, Educe, Deserialize)]
#[educe(Default)]
pub struct NoteMeta {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub slug: Option<String>,

    /// Raw date value, classified later by the date normalizer.
    #[serde(default)]
    pub date: Option<Value>,

    /// Raw tags value, copied to the post as written.
    #[serde(default = "empty_tags")]
    #[educe(Default = empty_tags())]
    pub tags: Value,

    /// Unrecognized keys. Not emitted; the post schema is fixed.
    #[allow(dead_code)]
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NoteMeta {
    /// Tag names for matching: a list (`[a, b]`) or a single scalar (`a`).
    ///
    /// Scalars are read as text; null, empty and nested entries are skipped.
    pub fn tag_names(&self) -> Vec<String> {
        match &self.tags {
            Value::Sequence(items) => items.iter().filter_map(scalar_to_text).collect(),
            other => scalar_to_text(other).into_iter().collect(),
        }
    }

    /// Whether the note carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_names().iter().any(|t| t == tag)
    }
}

/// `tags` of a note that has none.
fn empty_tags() -> Value {
    Value::Sequence(Vec::new())
}

/// Text form of a YAML scalar, `None` for null, empty text and collections.
fn scalar_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_to_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Accept any scalar for a text field instead of failing the whole note.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_text(&value))
}

// ============================================================================
// Output front matter
// ============================================================================

/// Front matter of a published post. Field order is the output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMeta {
    pub layout: String,
    pub categories: String,
    pub title: String,
    pub date: String,
    pub tags: Value,
    #[serde(rename = "title-image")]
    pub title_image: String,
    pub excerpt: String,
}

impl PostMeta {
    /// Map note metadata onto the post schema.
    ///
    /// Title falls back from `title` to `slug` to `fallback_title`; a missing
    /// date becomes `now`. `title-image` starts at the configured default
    /// and `excerpt` empty, both filled in from the rewritten body later.
    pub fn normalize(
        meta: &NoteMeta,
        fallback_title: &str,
        now: NaiveDateTime,
        post: &PostConfig,
    ) -> Self {
        let title = meta
            .title
            .clone()
            .or_else(|| meta.slug.clone())
            .unwrap_or_else(|| fallback_title.to_owned());

        Self {
            layout: post.layout.clone(),
            categories: post.categories.clone(),
            title,
            date: normalize_date(meta.date.as_ref(), now),
            tags: meta.tags.clone(),
            title_image: post.default_title_image.clone(),
            excerpt: String::new(),
        }
    }
}

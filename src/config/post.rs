//! `[post]` and `[links]` section configuration.
//!
//! Fixed values written into every post's front matter, and the
//! substitution table used when flattening wiki links.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `[post]` section in notepress.toml - output front matter.
///
/// # Example
/// ```toml
/// [post]
/// layout = "post"
/// categories = "blog"
/// default_title_image = "/images/default_title_image.png"
/// excerpt_max = 500
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PostConfig {
    /// Value of the `layout` key.
    #[serde(default = "defaults::post::layout")]
    #[educe(Default = defaults::post::layout())]
    pub layout: String,

    /// Value of the `categories` key.
    #[serde(default = "defaults::post::categories")]
    #[educe(Default = defaults::post::categories())]
    pub categories: String,

    /// `title-image` used when no embedded image could be resolved.
    #[serde(default = "defaults::post::default_title_image")]
    #[educe(Default = defaults::post::default_title_image())]
    pub default_title_image: String,

    /// Maximum excerpt length in characters. `0` disables clipping.
    #[serde(default = "defaults::post::excerpt_max")]
    #[educe(Default = defaults::post::excerpt_max())]
    pub excerpt_max: usize,
}

impl PostConfig {
    /// Excerpt budget, `None` when unbounded.
    pub fn excerpt_limit(&self) -> Option<usize> {
        (self.excerpt_max > 0).then_some(self.excerpt_max)
    }
}

/// `[links]` section - wiki link flattening.
///
/// # Example
/// ```toml
/// [links.replacements]
/// "Rust Notes" = "my notes on Rust"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinksConfig {
    /// Page name to replacement text, used for `[[Page]]` without display text.
    #[serde(default)]
    pub replacements: HashMap<String, String>,
}

//! `[source]` section configuration.
//!
//! Where notes and their attachments are read from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[source]` section in notepress.toml - the note vault being published.
///
/// # Example
/// ```toml
/// [source]
/// notes = "~/vault/all"      # Searched recursively
/// assets = "~/vault/files"   # Flat lookup by attachment name
/// publish_tag = "blog"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory holding the notes.
    #[serde(default = "defaults::source::notes")]
    #[educe(Default = defaults::source::notes())]
    pub notes: PathBuf,

    /// Directory holding embedded attachments (images).
    #[serde(default = "defaults::source::assets")]
    #[educe(Default = defaults::source::assets())]
    pub assets: PathBuf,

    /// File extension of notes, without the dot.
    #[serde(default = "defaults::source::extension")]
    #[educe(Default = defaults::source::extension())]
    pub extension: String,

    /// Only notes whose `tags` contain this value are published.
    #[serde(default = "defaults::source::publish_tag")]
    #[educe(Default = defaults::source::publish_tag())]
    pub publish_tag: String,
}

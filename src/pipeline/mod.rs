//! Note-to-post transformation.
//!
//! # Architecture
//!
//! ```text
//! Note { meta, body }
//!     │
//!     ├── body ──► strip_drafts() ──► rewrite_embeds() ──► rewrite_references()
//!     │                                    │                       │
//!     │                              first_asset              rewritten body
//!     │                                    │                       │
//!     │                                    │               extract_excerpt()
//!     │                                    ▼                       ▼
//!     └── meta ──► PostMeta::normalize() ──► title-image ──► excerpt ──► Post
//! ```
//!
//! Every pass takes text and returns text plus its side result; nothing is
//! shared between passes except through return values.

pub mod assets;
pub mod document;
pub mod draft;
pub mod embed;
pub mod excerpt;
pub mod freshness;
pub mod meta;
pub mod wikilink;

use crate::config::PublishConfig;
use anyhow::Result;
use assets::ResolveAsset;
use chrono::NaiveDateTime;
use document::Note;
use embed::Embedded;
use meta::PostMeta;
use std::{collections::HashMap, path::Path};

/// A transformed note, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub meta: PostMeta,
    pub body: String,
}

/// Run the body passes in order: drafts, embeds, wiki links.
pub fn transform_body(
    body: &str,
    resolver: &impl ResolveAsset,
    replacements: &HashMap<String, String>,
) -> Result<Embedded> {
    let body = draft::strip_drafts(body);
    let embedded = embed::rewrite_embeds(&body, resolver)?;
    let body = wikilink::rewrite_references(&embedded.body, replacements).into_owned();

    Ok(Embedded {
        body,
        first_asset: embedded.first_asset,
    })
}

/// Transform a note into a post.
pub fn build_post(
    note: &Note,
    resolver: &impl ResolveAsset,
    config: &PublishConfig,
    now: NaiveDateTime,
) -> Result<Post> {
    let Embedded { body, first_asset } =
        transform_body(&note.body, resolver, &config.links.replacements)?;

    let fallback = crate::utils::slug::fallback_title(&note.path);
    let mut meta = PostMeta::normalize(&note.meta, &fallback, now, &config.post);
    if let Some(reference) = first_asset {
        meta.title_image = reference;
    }
    meta.excerpt = excerpt::extract_excerpt(&body, config.post.excerpt_limit());

    Ok(Post { meta, body })
}

/// File name of the post for a note at `source`, e.g. `2024-06-15-my-post.md`.
pub fn post_file_name(source: &Path, meta: &PostMeta, extension: &str) -> String {
    let date = crate::utils::date::filename_prefix(&meta.date);
    let identity = crate::utils::slug::identity(source);
    format!("{date}-{identity}.{extension}")
}

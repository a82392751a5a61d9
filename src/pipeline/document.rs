//! Reading notes and rendering posts.
//!
//! A note is an optional YAML front matter block followed by the body:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [blog]
//! ---
//! Body text...
//! ```
//!
//! A note without the leading `---` line has no metadata at all. A block
//! that is opened but never closed, or that is not a YAML mapping, makes the
//! note unreadable.

use super::meta::{NoteMeta, PostMeta};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Front matter fence.
const FENCE: &str = "---";

/// Errors reading a single note.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("front matter in `{0}` is never closed")]
    UnclosedFrontMatter(PathBuf),

    #[error("invalid front matter in `{0}`")]
    Yaml(PathBuf, #[source] serde_yaml::Error),
}

/// A parsed source note.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    pub meta: NoteMeta,
    pub body: String,
}

impl Note {
    /// Read and parse the note at `path`.
    pub fn read(path: &Path) -> Result<Self, NoteError> {
        let content =
            fs::read_to_string(path).map_err(|err| NoteError::Io(path.to_path_buf(), err))?;
        Self::parse(path, &content)
    }

    /// Parse note text; `path` is used for error reporting.
    pub fn parse(path: &Path, content: &str) -> Result<Self, NoteError> {
        let (front, body) = split_front_matter(content)
            .ok_or_else(|| NoteError::UnclosedFrontMatter(path.to_path_buf()))?;

        let meta = match front {
            Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)
                .map_err(|err| NoteError::Yaml(path.to_path_buf(), err))?,
            _ => NoteMeta::default(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            meta,
            body: body.to_owned(),
        })
    }
}

/// Split `content` into `(front matter, body)`.
///
/// Returns `Some((None, content))` when there is no front matter and `None`
/// when the opening fence has no matching closing fence.
fn split_front_matter(content: &str) -> Option<(Option<&str>, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(rest) = strip_fence_line(content) else {
        return Some((None, content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((Some(front), body));
        }
        offset += line.len();
    }
    None
}

/// Remainder after a leading `---` line, if the content starts with one.
fn strip_fence_line(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (content, ""),
    };
    (first.trim_end() == FENCE).then_some(rest)
}

/// Render a post: front matter block, blank line, body.
///
/// Leading blank lines and trailing whitespace of the body are dropped;
/// indentation of the first line is kept.
pub fn render_post(meta: &PostMeta, body: &str) -> Result<String, serde_yaml::Error> {
    let yaml = serde_yaml::to_string(meta)?;
    let body = body.trim_start_matches(['\n', '\r']).trim_end();
    Ok(format!("{FENCE}\n{yaml}{FENCE}\n\n{body}\n"))
}

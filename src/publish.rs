//! Publishing run orchestration.
//!
//! ```text
//! publish_all()
//!     │
//!     └── for each note under [source.notes] (walk order)
//!             │
//!             └── publish_note()
//!                     ├── Note::read()          unreadable → error, next note
//!                     ├── tag gate              untagged   → nothing happens
//!                     ├── freshness gate        up to date → skip
//!                     ├── build_post()          copies attachments
//!                     └── write post
//! ```
//!
//! Notes are independent: one failing note is reported and the run goes on.

use crate::{
    config::PublishConfig,
    log,
    pipeline::{
        self, Post,
        assets::AssetStore,
        document::{Note, render_post},
        freshness::{Freshness, MtimeIndex, needs_publish},
    },
    utils::slug,
};
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// What happened to a single note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not tagged for publication.
    Ignored,
    /// Latest export is at least as new as the note.
    UpToDate,
    /// Post written to `path`.
    Published { path: PathBuf, title_image: String },
}

/// Counters for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub published: usize,
    pub up_to_date: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Publish every tagged note. Fails when at least one note failed.
pub fn publish_all(config: &PublishConfig) -> Result<Summary> {
    fs::create_dir_all(&config.output.posts).with_context(|| {
        format!(
            "Failed to create posts directory: {}",
            config.output.posts.display()
        )
    })?;

    let mut summary = Summary::default();
    for path in collect_notes(&config.source.notes, &config.source.extension) {
        match publish_note(&path, config) {
            Ok(Outcome::Ignored) => summary.ignored += 1,
            Ok(Outcome::UpToDate) => summary.up_to_date += 1,
            Ok(Outcome::Published { path: dest, title_image }) => {
                summary.published += 1;
                log!(
                    "publish";
                    "{} -> {} (title-image: {})",
                    display_name(&path),
                    relative_to(&dest, config.output.site_root()),
                    title_image
                );
            }
            Err(e) => {
                summary.failed += 1;
                log!("error"; "{}: {:#}", path.display(), e);
            }
        }
    }

    log!(
        "done";
        "{} published, {} up to date, {} not tagged, {} failed",
        summary.published, summary.up_to_date, summary.ignored, summary.failed
    );

    if summary.failed > 0 {
        bail!("{} note(s) failed to publish", summary.failed);
    }
    Ok(summary)
}

/// Collect note files recursively, in directory walk order.
///
/// Unreadable entries are reported and left out.
pub fn collect_notes(dir: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log!("warn"; "skipped while walking notes: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .map(|e| e.into_path())
        .collect()
}

/// Publish a single note if it is tagged and changed.
pub fn publish_note(path: &Path, config: &PublishConfig) -> Result<Outcome> {
    let note = Note::read(path)?;
    if !note.meta.has_tag(&config.source.publish_tag) {
        return Ok(Outcome::Ignored);
    }

    let name = display_name(path);
    let identity = slug::identity(path);
    let index = MtimeIndex::new(&config.output.posts, &config.output.extension);
    if !config.force && !is_stale(path, &identity, &index)? {
        log!("skip"; "{name} is up to date");
        return Ok(Outcome::UpToDate);
    }

    let resolver = AssetStore::from_config(config);
    let Post { meta, body } =
        pipeline::build_post(&note, &resolver, config, Local::now().naive_local())?;

    let file_name = pipeline::post_file_name(path, &meta, &config.output.extension);
    let dest = config.output.posts.join(&file_name);
    let content = render_post(&meta, &body)
        .with_context(|| format!("Failed to render front matter for {name}"))?;

    fs::create_dir_all(&config.output.posts)?;
    fs::write(&dest, content).with_context(|| format!("Failed to write {}", dest.display()))?;

    Ok(Outcome::Published {
        path: dest,
        title_image: meta.title_image,
    })
}

/// Whether the note was modified after its latest export.
fn is_stale(path: &Path, identity: &str, index: &impl Freshness) -> Result<bool> {
    let modified = path
        .metadata()
        .and_then(|meta| meta.modified())
        .with_context(|| format!("Failed to read modification time of {}", path.display()))?;
    Ok(needs_publish(modified, index.latest_output(identity)))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn relative_to(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

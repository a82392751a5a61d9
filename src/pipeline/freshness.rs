//! Freshness gate.
//!
//! Exported posts double as the cache: a note is republished only when it
//! was modified after the newest post exported for the same identity.
//! Posts are named `<date>-<identity>.<ext>`, so a note whose date changed
//! can have several exports; the newest one counts.
//!
//! The gate is a plain timestamp comparison. Touching a note forces a
//! republish; editing a post by hand can hide a pending update.

use std::{
    fs,
    path::Path,
    time::SystemTime,
};

/// Source of "when was this identity last exported".
pub trait Freshness {
    fn latest_output(&self, identity: &str) -> Option<SystemTime>;
}

/// Whether a note modified at `source` needs publishing given its latest export.
pub fn needs_publish(source: SystemTime, latest: Option<SystemTime>) -> bool {
    latest.is_none_or(|latest| source > latest)
}

/// Modification-time index over the posts directory.
#[derive(Debug, Clone, Copy)]
pub struct MtimeIndex<'a> {
    dir: &'a Path,
    extension: &'a str,
}

impl<'a> MtimeIndex<'a> {
    pub fn new(dir: &'a Path, extension: &'a str) -> Self {
        Self { dir, extension }
    }

    /// Whether `file_name` is an export of `identity`.
    fn is_export_of(&self, file_name: &str, identity: &str) -> bool {
        file_name
            .strip_suffix(self.extension)
            .and_then(|stem| stem.strip_suffix('.'))
            .and_then(|stem| stem.strip_suffix(identity))
            .is_some_and(|prefix| prefix.ends_with('-'))
    }
}

impl Freshness for MtimeIndex<'_> {
    fn latest_output(&self, identity: &str) -> Option<SystemTime> {
        let entries = fs::read_dir(self.dir).ok()?;

        entries
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.is_export_of(name, identity))
            })
            .filter_map(|entry| entry.metadata().ok())
            .filter(|meta| meta.is_file())
            .filter_map(|meta| meta.modified().ok())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs::File,
        time::Duration,
    };
    use tempfile::TempDir;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn write_with_mtime(path: &Path, mtime: SystemTime) {
        fs::write(path, "post").unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_needs_publish() {
        assert!(needs_publish(at(10), None));
        assert!(needs_publish(at(11), Some(at(10))));
        assert!(!needs_publish(at(10), Some(at(10))));
        assert!(!needs_publish(at(9), Some(at(10))));
    }

    #[test]
    fn test_is_export_of() {
        let index = MtimeIndex::new(Path::new("."), "md");

        assert!(index.is_export_of("2024-06-15-my-post.md", "my-post"));
        assert!(!index.is_export_of("2024-06-15-not-my-post.mdx", "my-post"));
        assert!(!index.is_export_of("2024-06-15-my-post.html", "my-post"));
        assert!(!index.is_export_of("my-post.md", "my-post"));
        assert!(!index.is_export_of("2024-06-15-xmy-post.md", "my-post"));
    }

    #[test]
    fn test_latest_output_picks_newest() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(&dir.path().join("2024-01-01-post.md"), at(1_000));
        write_with_mtime(&dir.path().join("2024-02-01-post.md"), at(3_000));
        write_with_mtime(&dir.path().join("2024-03-01-other.md"), at(9_000));

        let index = MtimeIndex::new(dir.path(), "md");
        assert_eq!(index.latest_output("post"), Some(at(3_000)));
    }

    #[test]
    fn test_latest_output_missing() {
        let dir = TempDir::new().unwrap();
        let index = MtimeIndex::new(dir.path(), "md");
        assert_eq!(index.latest_output("post"), None);

        let index = MtimeIndex::new(Path::new("/nonexistent/posts"), "md");
        assert_eq!(index.latest_output("post"), None);
    }

    #[test]
    fn test_directories_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("2024-01-01-post.md")).unwrap();

        let index = MtimeIndex::new(dir.path(), "md");
        assert_eq!(index.latest_output("post"), None);
    }
}

//! Attachment resolution and copying.
//!
//! Embedded images are looked up by exact name in the source attachment
//! directory and copied under the destination attachment directory. The
//! returned reference is the destination path relative to the site root,
//! always with forward slashes:
//!
//! ```text
//! files/cat.png  ──copy──►  site/images/cat.png  ──►  "/images/cat.png"
//! ```

use crate::{config::PublishConfig, log};
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs::{self, File, FileTimes},
    io,
    path::{Path, PathBuf},
};

/// Resolves an attachment name to a reference usable in a post.
///
/// A missing attachment is an expected outcome (`Ok(None)`); errors are
/// reserved for filesystem failures while copying.
pub trait ResolveAsset {
    fn resolve(&self, name: &str) -> Result<Option<String>>;
}

/// Filesystem-backed attachment store.
#[derive(Debug, Clone)]
pub struct AssetStore<'a> {
    /// Source attachment directory
    source: &'a Path,
    /// Destination attachment directory
    dest: &'a Path,
    /// Directory references are relative to
    site_root: &'a Path,
}

impl<'a> AssetStore<'a> {
    pub fn new(source: &'a Path, dest: &'a Path, site_root: &'a Path) -> Self {
        Self {
            source,
            dest,
            site_root,
        }
    }

    pub fn from_config(config: &'a PublishConfig) -> Self {
        Self::new(
            &config.source.assets,
            &config.output.assets,
            config.output.site_root(),
        )
    }

    /// Copy `src` to `dst` carrying over access and modification times.
    ///
    /// A read-only copy left at `dst` by an earlier run is replaced.
    fn copy_preserving_times(src: &Path, dst: &Path) -> Result<()> {
        if dst.metadata().is_ok_and(|meta| meta.permissions().readonly()) {
            fs::remove_file(dst)
                .with_context(|| format!("Failed to replace {}", dst.display()))?;
        }
        fs::copy(src, dst)
            .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;

        let meta = src.metadata()?;
        let mut times = FileTimes::new().set_modified(meta.modified()?);
        if let Ok(accessed) = meta.accessed() {
            times = times.set_accessed(accessed);
        }
        open_for_times(dst)
            .and_then(|file| file.set_times(times))
            .with_context(|| format!("Failed to set timestamps on {}", dst.display()))?;

        Ok(())
    }

    /// Reference for a destination path, e.g. `/images/cat.png`.
    fn reference(&self, dest_path: &Path) -> Result<String> {
        let relative = dest_path.strip_prefix(self.site_root).map_err(|_| {
            anyhow!(
                "Path is not in site root {}: {}",
                self.site_root.display(),
                dest_path.display()
            )
        })?;
        let path_str = relative.to_string_lossy().replace('\\', "/");
        Ok(format!("/{}", path_str.trim_start_matches('/')))
    }
}

impl ResolveAsset for AssetStore<'_> {
    fn resolve(&self, name: &str) -> Result<Option<String>> {
        let src_path = self.source.join(name);
        if !src_path.is_file() {
            log!("warn"; "image not found: {}", src_path.display());
            return Ok(None);
        }

        let dest_path: PathBuf = self.dest.join(name);
        if is_same_file(&src_path, &dest_path) {
            bail!(
                "Attachment {} would be copied onto itself; [output.assets] must differ from [source.assets]",
                src_path.display()
            );
        }
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        Self::copy_preserving_times(&src_path, &dest_path)?;

        self.reference(&dest_path).map(Some)
    }
}

/// Whether both paths exist and name the same file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Open a handle that can set timestamps, even on a read-only file.
#[cfg(windows)]
fn open_for_times(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;
    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
    File::options().access_mode(FILE_WRITE_ATTRIBUTES).open(path)
}

#[cfg(not(windows))]
fn open_for_times(path: &Path) -> io::Result<File> {
    File::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        source: PathBuf,
        dest: PathBuf,
        site_root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let source = dir.path().join("files");
            let site_root = dir.path().join("site");
            let dest = site_root.join("images");
            fs::create_dir_all(&source).unwrap();
            Self {
                _dir: dir,
                source,
                dest,
                site_root,
            }
        }

        fn store(&self) -> AssetStore<'_> {
            AssetStore::new(&self.source, &self.dest, &self.site_root)
        }
    }

    #[test]
    fn test_resolve_copies_and_returns_reference() {
        let fx = Fixture::new();
        fs::write(fx.source.join("cat.png"), b"meow").unwrap();

        let reference = fx.store().resolve("cat.png").unwrap();

        assert_eq!(reference.as_deref(), Some("/images/cat.png"));
        assert_eq!(fs::read(fx.dest.join("cat.png")).unwrap(), b"meow");
    }

    #[test]
    fn test_resolve_missing_returns_none() {
        let fx = Fixture::new();

        assert_eq!(fx.store().resolve("missing.png").unwrap(), None);
        assert!(!fx.dest.exists());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let fx = Fixture::new();
        fs::write(fx.source.join("cat.png"), b"meow").unwrap();

        let first = fx.store().resolve("cat.png").unwrap();
        let bytes = fs::read(fx.dest.join("cat.png")).unwrap();
        let second = fx.store().resolve("cat.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(fx.dest.join("cat.png")).unwrap(), bytes);
    }

    #[test]
    fn test_resolve_preserves_modification_time() {
        let fx = Fixture::new();
        let src = fx.source.join("old.png");
        fs::write(&src, b"old").unwrap();
        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();

        fx.store().resolve("old.png").unwrap();

        let copied = fx.dest.join("old.png").metadata().unwrap().modified().unwrap();
        assert_eq!(copied, past);
    }

    #[test]
    fn test_resolve_nested_name() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.source.join("2024")).unwrap();
        fs::write(fx.source.join("2024/dog.jpg"), b"woof").unwrap();

        let reference = fx.store().resolve("2024/dog.jpg").unwrap();

        assert_eq!(reference.as_deref(), Some("/images/2024/dog.jpg"));
        assert!(fx.dest.join("2024/dog.jpg").is_file());
    }

    #[test]
    fn test_directory_is_not_an_asset() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.source.join("folder.png")).unwrap();

        assert_eq!(fx.store().resolve("folder.png").unwrap(), None);
    }

    #[test]
    fn test_reference_outside_site_root_errors() {
        let fx = Fixture::new();
        let store = AssetStore::new(&fx.source, Path::new("/elsewhere"), &fx.site_root);
        assert!(store.reference(Path::new("/elsewhere/cat.png")).is_err());
    }

    #[test]
    fn test_resolve_same_directory_errors() {
        let fx = Fixture::new();
        fs::write(fx.source.join("cat.png"), b"meow").unwrap();
        let store = AssetStore::new(&fx.source, &fx.source, &fx.site_root);

        assert!(store.resolve("cat.png").is_err());
        assert_eq!(fs::read(fx.source.join("cat.png")).unwrap(), b"meow");
    }

    #[test]
    fn test_resolve_read_only_source() {
        let fx = Fixture::new();
        let src = fx.source.join("locked.png");
        fs::write(&src, b"locked").unwrap();
        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();
        let mut perms = fs::metadata(&src).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&src, perms).unwrap();

        let first = fx.store().resolve("locked.png").unwrap();
        let second = fx.store().resolve("locked.png").unwrap();

        assert_eq!(first.as_deref(), Some("/images/locked.png"));
        assert_eq!(first, second);
        let copied = fx.dest.join("locked.png");
        assert_eq!(fs::read(&copied).unwrap(), b"locked");
        assert_eq!(copied.metadata().unwrap().modified().unwrap(), past);
    }
}

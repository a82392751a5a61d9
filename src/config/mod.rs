//! Publishing configuration management for `notepress.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[source]`  | Note vault paths and the publish tag             |
//! | `[output]`  | Destination posts/attachments and the site root  |
//! | `[post]`    | Fixed front matter values, excerpt budget        |
//! | `[links]`   | Wiki link replacement table                      |
//!
//! # Example
//!
//! ```toml
//! [source]
//! notes = "~/vault/all"
//! assets = "~/vault/files"
//!
//! [output]
//! posts = "~/blog/_posts"
//! assets = "~/blog/images"
//!
//! [post]
//! excerpt_max = 300
//!
//! [links.replacements]
//! "Reading List" = "my reading list"
//! ```
//!
//! The configuration is loaded once at startup and passed by shared
//! reference to every pipeline stage.

pub mod defaults;
mod error;
mod output;
mod post;
mod source;

pub use error::ConfigError;
pub use output::OutputConfig;
pub use post::{LinksConfig, PostConfig};
pub use source::SourceConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing notepress.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Republish every tagged note, ignoring output timestamps
    #[serde(skip)]
    pub force: bool,

    /// Note vault settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Destination settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Front matter settings
    #[serde(default)]
    pub post: PostConfig,

    /// Wiki link settings
    #[serde(default)]
    pub links: LinksConfig,
}

impl PublishConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: PublishConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));

        Self::update_option(&mut self.source.notes, cli.notes.as_ref());
        Self::update_option(&mut self.source.assets, cli.assets.as_ref());
        Self::update_option(&mut self.output.posts, cli.posts.as_ref());
        Self::update_option(&mut self.output.assets, cli.images.as_ref());

        if let Commands::Publish { force } = &cli.command {
            self.force = *force;
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    pub fn update_path_with_root(&mut self, root: &Path, config_file: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(config_file));

        self.source.notes = Self::resolve(&root, &self.source.notes);
        self.source.assets = Self::resolve(&root, &self.source.assets);
        self.output.posts = Self::resolve(&root, &self.output.posts);
        self.output.assets = Self::resolve(&root, &self.output.assets);
        self.output.site_root = self
            .output
            .site_root
            .as_ref()
            .map(|path| Self::resolve(&root, path));
    }

    /// Expand `~` and join relative paths onto the root
    fn resolve(root: &Path, path: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        Self::normalize_path(&root.join(expanded))
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before publishing
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if !self.source.notes.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[source.notes] `{}` is not a directory",
                self.source.notes.display()
            )));
        }

        if self.source.publish_tag.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[source.publish_tag] must not be empty".into()
            ));
        }

        for (field, ext) in [
            ("[source.extension]", &self.source.extension),
            ("[output.extension]", &self.output.extension),
        ] {
            if ext.is_empty() || ext.starts_with('.') {
                bail!(ConfigError::Validation(format!(
                    "{field} must be a non-empty extension without the leading dot"
                )));
            }
        }

        if self.output.assets == self.source.assets {
            bail!(ConfigError::Validation(format!(
                "[output.assets] and [source.assets] are the same directory `{}`",
                self.source.assets.display()
            )));
        }

        if !self.output.assets.starts_with(self.output.site_root()) {
            bail!(ConfigError::Validation(format!(
                "[output.assets] `{}` must be inside the site root `{}`",
                self.output.assets.display(),
                self.output.site_root().display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [source]
            notes = "vault"

            [post]
            layout = "article"
        "#;
        let config = PublishConfig::from_str(config_str).unwrap();

        assert_eq!(config.source.notes, PathBuf::from("vault"));
        assert_eq!(config.post.layout, "article");
        assert_eq!(config.post.categories, "blog");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let invalid_config = r#"
            [source
            notes = "vault"
        "#;
        assert!(PublishConfig::from_str(invalid_config).is_err());
    }

    #[test]
    fn test_from_str_unknown_section() {
        assert!(PublishConfig::from_str("[serve]\nport = 80").is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = PublishConfig::from_path(Path::new("/nonexistent/notepress.toml")).unwrap_err();
        assert!(format!("{err}").contains("IO error"));
    }

    #[test]
    fn test_default_round_trip() {
        let content = toml::to_string_pretty(&PublishConfig::default()).unwrap();
        let config = PublishConfig::from_str(&content).unwrap();

        assert_eq!(config.source.publish_tag, "blog");
        assert_eq!(config.output.posts, PathBuf::from("site/_posts"));
        assert_eq!(config.post.excerpt_max, 500);
    }

    #[test]
    fn test_update_path_with_root() {
        let dir = TempDir::new().unwrap();
        let mut config = PublishConfig::default();
        config.update_path_with_root(dir.path(), Path::new("notepress.toml"));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.config_path, root.join("notepress.toml"));
        assert_eq!(config.source.notes, root.join("notes"));
        assert_eq!(config.output.posts, root.join("site/_posts"));
        assert_eq!(config.output.site_root(), root.join("site"));
    }

    #[test]
    fn test_update_path_keeps_absolute_paths() {
        let dir = TempDir::new().unwrap();
        let mut config = PublishConfig::default();
        config.source.assets = PathBuf::from("/var/attachments");
        config.update_path_with_root(dir.path(), Path::new("notepress.toml"));

        assert_eq!(config.source.assets, PathBuf::from("/var/attachments"));
    }

    fn valid_config(dir: &TempDir) -> PublishConfig {
        fs::create_dir_all(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notepress.toml"), "").unwrap();
        let mut config = PublishConfig::default();
        config.update_path_with_root(dir.path(), Path::new("notepress.toml"));
        config
    }

    #[test]
    fn test_validate_ok() {
        let dir = TempDir::new().unwrap();
        assert!(valid_config(&dir).validate().is_ok());
    }

    #[test]
    fn test_validate_missing_notes_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.source.notes = dir.path().join("missing");

        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("[source.notes]"));
    }

    #[test]
    fn test_validate_assets_outside_site_root() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.output.assets = PathBuf::from("/elsewhere/images");

        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("[output.assets]"));
    }

    #[test]
    fn test_validate_same_assets_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.source.assets = config.output.assets.clone();

        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("[source.assets]"));
    }

    #[test]
    fn test_validate_dotted_extension() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.output.extension = ".md".into();

        assert!(config.validate().is_err());
    }
}

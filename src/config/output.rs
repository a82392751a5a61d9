//! `[output]` section configuration.
//!
//! Where posts and copied attachments are written to.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[output]` section in notepress.toml - the destination site.
///
/// # Example
/// ```toml
/// [output]
/// posts = "~/blog/_posts"
/// assets = "~/blog/images"
/// ```
///
/// Image references in posts are written relative to `site_root`, which
/// defaults to the parent of `posts` (`~/blog` above, giving `/images/...`).
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving the rendered posts.
    #[serde(default = "defaults::output::posts")]
    #[educe(Default = defaults::output::posts())]
    pub posts: PathBuf,

    /// Directory receiving copied attachments.
    #[serde(default = "defaults::output::assets")]
    #[educe(Default = defaults::output::assets())]
    pub assets: PathBuf,

    /// Root that attachment references are made relative to.
    #[serde(default = "defaults::output::site_root")]
    #[educe(Default = defaults::output::site_root())]
    pub site_root: Option<PathBuf>,

    /// File extension of rendered posts, without the dot.
    #[serde(default = "defaults::output::extension")]
    #[educe(Default = defaults::output::extension())]
    pub extension: String,
}

impl OutputConfig {
    /// Site root, falling back to the parent of the posts directory.
    pub fn site_root(&self) -> &Path {
        self.site_root
            .as_deref()
            .or_else(|| self.posts.parent())
            .unwrap_or(Path::new("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::PublishConfig;
    use super::*;

    #[test]
    fn test_output_config_defaults() {
        let config: PublishConfig = toml::from_str("").unwrap();

        assert_eq!(config.output.posts, PathBuf::from("site/_posts"));
        assert_eq!(config.output.assets, PathBuf::from("site/images"));
        assert_eq!(config.output.site_root, None);
        assert_eq!(config.output.extension, "md");
    }

    #[test]
    fn test_site_root_defaults_to_posts_parent() {
        let output = OutputConfig {
            posts: PathBuf::from("/srv/blog/_posts"),
            ..OutputConfig::default()
        };
        assert_eq!(output.site_root(), Path::new("/srv/blog"));
    }

    #[test]
    fn test_site_root_explicit() {
        let output = OutputConfig {
            posts: PathBuf::from("/srv/blog/_posts"),
            site_root: Some(PathBuf::from("/srv")),
            ..OutputConfig::default()
        };
        assert_eq!(output.site_root(), Path::new("/srv"));
    }
}

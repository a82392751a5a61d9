//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [source] Section Defaults
// ============================================================================

pub mod source {
    use std::path::PathBuf;

    pub fn notes() -> PathBuf {
        "notes".into()
    }

    pub fn assets() -> PathBuf {
        "files".into()
    }

    pub fn extension() -> String {
        "md".into()
    }

    pub fn publish_tag() -> String {
        "blog".into()
    }
}

// ============================================================================
// [output] Section Defaults
// ============================================================================

pub mod output {
    use std::path::PathBuf;

    pub fn posts() -> PathBuf {
        "site/_posts".into()
    }

    pub fn assets() -> PathBuf {
        "site/images".into()
    }

    pub fn site_root() -> Option<PathBuf> {
        None
    }

    pub fn extension() -> String {
        "md".into()
    }
}

// ============================================================================
// [post] Section Defaults
// ============================================================================

pub mod post {
    pub fn layout() -> String {
        "post".into()
    }

    pub fn categories() -> String {
        "blog".into()
    }

    pub fn default_title_image() -> String {
        "/images/default_title_image.png".into()
    }

    pub fn excerpt_max() -> usize {
        500
    }
}

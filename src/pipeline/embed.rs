//! Embedded attachment rewriting.
//!
//! `![[cat.png]]` and `![[cat.png|300]]` become standard markdown images
//! pointing at the copied attachment:
//!
//! ```text
//! ![[cat.png]]       →  ![cat.png](/images/cat.png)
//! ![[cat.png|300]]   →  ![cat.png](/images/cat.png){: width="300" }
//! ![[gone.png]]      →  ![[gone.png]]   (left visibly broken)
//! ```

use super::assets::ResolveAsset;
use anyhow::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static EMBED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").expect("embed regex"));

/// Result of rewriting embeds in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    /// Body with every resolvable embed rewritten.
    pub body: String,
    /// Reference of the first embed that resolved, in document order.
    pub first_asset: Option<String>,
}

/// Rewrite every embed marker in `body`, copying attachments through `resolver`.
pub fn rewrite_embeds(body: &str, resolver: &impl ResolveAsset) -> Result<Embedded> {
    let mut out = String::with_capacity(body.len());
    let mut first_asset = None;
    let mut last = 0;

    for caps in EMBED_REGEX.captures_iter(body) {
        let Some(marker) = caps.get(0) else { continue };
        out.push_str(&body[last..marker.start()]);
        last = marker.end();

        let name = caps[1].trim();
        match resolver.resolve(name)? {
            Some(reference) => {
                out.push_str(&image(name, &reference, &caps));
                if first_asset.is_none() {
                    first_asset = Some(reference);
                }
            }
            None => out.push_str(marker.as_str()),
        }
    }
    out.push_str(&body[last..]);

    Ok(Embedded {
        body: out,
        first_asset,
    })
}

/// Markdown image for a resolved embed, with a width hint when numeric.
fn image(name: &str, reference: &str, caps: &Captures<'_>) -> String {
    match caps.get(2).map(|m| m.as_str()) {
        Some(width) if is_width(width) => {
            format!("![{name}]({reference}){{: width=\"{width}\" }}")
        }
        _ => format!("![{name}]({reference})"),
    }
}

/// Width hints must be plain digits, e.g. `300` but not `300x200`.
fn is_width(hint: &str) -> bool {
    !hint.is_empty() && hint.bytes().all(|b| b.is_ascii_digit())
}

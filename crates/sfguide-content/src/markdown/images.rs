//! Rewriting relative image references to absolute URLs.
//!
//! Quickstart bodies reference images relative to the guide's folder
//! (`![diagram](assets/flow.png)`, `![shot](./img.png)`). Once the markdown is
//! published elsewhere those paths must point at the hosted copies:
//!
//! - absolute (`http://`, `https://`) and protocol-relative (`//`) targets
//!   are left alone;
//! - leading `.` and `/` characters are stripped from the target;
//! - a trailing `/` on the base URL is dropped, so `B/` and `B` both give
//!   `B/{quickstart}/...` rather than a doubled slash;
//! - `assets/...` targets become `{base}/{quickstart}/assets/...`;
//! - anything else becomes `{base}/{quickstart}/assets/{target}`.
//!
//! Alt text and all other markdown are preserved byte for byte.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static IMAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("Invalid image regex"));

/// Rewritten markdown plus the number of references that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRewrite {
    /// Markdown with relative image targets made absolute.
    pub markdown: String,
    /// Number of image references rewritten.
    pub replaced: usize,
}

/// Whether an image target already points somewhere absolute.
pub fn is_absolute_target(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with("//")
}

/// Compute the absolute URL for a relative image target.
///
/// ```
/// use sfguide_content::markdown::images::absolute_image_url;
///
/// let base = "https://cdn.example.com/src";
/// assert_eq!(
///     absolute_image_url(base, "demo", "./assets/a.png"),
///     "https://cdn.example.com/src/demo/assets/a.png"
/// );
/// assert_eq!(
///     absolute_image_url(base, "demo", "a.png"),
///     "https://cdn.example.com/src/demo/assets/a.png"
/// );
/// ```
pub fn absolute_image_url(base_url: &str, quickstart_name: &str, target: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = target.trim_start_matches(['.', '/']);
    if path.starts_with("assets/") {
        format!("{base}/{quickstart_name}/{path}")
    } else {
        format!("{base}/{quickstart_name}/assets/{path}")
    }
}

/// Rewrite every relative `![alt](target)` in `markdown`.
///
/// Matching is non-greedy on the alt text and stops at the first `)`, so
/// targets containing parentheses are not supported.
///
/// # Example
///
/// ```
/// use sfguide_content::markdown::rewrite_image_urls;
///
/// let out = rewrite_image_urls(
///     "![a](img.png) and ![b](https://x/y.png)",
///     "https://cdn/x",
///     "demo",
/// );
/// assert_eq!(
///     out.markdown,
///     "![a](https://cdn/x/demo/assets/img.png) and ![b](https://x/y.png)"
/// );
/// assert_eq!(out.replaced, 1);
/// ```
pub fn rewrite_image_urls(markdown: &str, base_url: &str, quickstart_name: &str) -> ImageRewrite {
    let mut replaced = 0;

    let rewritten = IMAGE_REF.replace_all(markdown, |caps: &Captures| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let alt = caps.get(1).map_or("", |m| m.as_str());
        let target = caps.get(2).map_or("", |m| m.as_str());

        if is_absolute_target(target) {
            return whole.to_string();
        }

        replaced += 1;
        format!(
            "![{alt}]({})",
            absolute_image_url(base_url, quickstart_name, target)
        )
    });

    log::debug!("Rewrote {replaced} image reference(s) for {quickstart_name}");

    ImageRewrite {
        markdown: rewritten.into_owned(),
        replaced,
    }
}

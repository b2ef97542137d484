//! Navigation directive expansion.
//!
//! Scans raw markdown for `<nav route="..."/>` directives and replaces
//! each one with generated markdown links to the markdown files of the
//! named content subdirectory. Expansion happens before parsing, so the
//! generated links flow through the normal tokenize/transduce pipeline.
//!
//! Each directive is expanded independently, left to right: a failing
//! directive yields the literal placeholder text and never aborts the
//! rest of the expansion. Directories are re-listed on every call, so
//! navigation reflects live filesystem state.

use std::fmt::Write;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Placeholder text spliced in for a directive whose directory cannot be
/// listed.
pub const NAV_ERROR_TEXT: &str = "Error loading navigation";

/// File extension selecting navigation entries.
const MD_EXTENSION: &str = ".md";

/// Directive pattern; the tag may or may not self-close.
static NAV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<nav\s+route="([^"]+)"\s*/?>"#).unwrap());

/// Type alias for the directory listing callback.
pub type ListDirFn = dyn Fn(&Path) -> io::Result<Vec<String>> + Send + Sync;

/// Expands navigation directives against a content root.
pub struct NavExpander {
    content_root: PathBuf,
    base_url: String,
    list_dir: Box<ListDirFn>,
}

impl NavExpander {
    /// Create an expander over the given content root. Generated links
    /// are absolute, prefixed with `base_url`.
    #[must_use]
    pub fn new(content_root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            content_root: content_root.into(),
            base_url: base_url.into(),
            list_dir: Box::new(default_list_dir),
        }
    }

    /// Replace the directory listing callback.
    ///
    /// Default: `std::fs::read_dir` in enumeration order.
    #[must_use]
    pub fn with_list_dir<F>(mut self, list_dir: F) -> Self
    where
        F: Fn(&Path) -> io::Result<Vec<String>> + Send + Sync + 'static,
    {
        self.list_dir = Box::new(list_dir);
        self
    }

    /// Expand every directive occurrence in `raw`, first to last.
    ///
    /// Text without directives passes through unchanged, which also makes
    /// a second pass over already-expanded text a no-op.
    #[must_use]
    pub fn expand(&self, raw: &str) -> String {
        let mut result = String::with_capacity(raw.len());
        let mut last = 0;

        for caps in NAV_PATTERN.captures_iter(raw) {
            let Some(whole) = caps.get(0) else { continue };
            let route = &caps[1];

            result.push_str(&raw[last..whole.start()]);
            match self.links_for_route(route) {
                Ok(links) => result.push_str(&links),
                Err(err) => {
                    tracing::warn!(route, error = %err, "Failed to expand navigation directive");
                    result.push_str(NAV_ERROR_TEXT);
                }
            }
            last = whole.end();
        }

        result.push_str(&raw[last..]);
        result
    }

    /// Build the replacement text for one directive: one markdown link
    /// line per markdown file of the route directory, each followed by a
    /// blank line, in directory enumeration order.
    fn links_for_route(&self, route: &str) -> io::Result<String> {
        let dir = self.content_root.join(route);
        let entries = (self.list_dir)(&dir)?;

        let mut links = String::new();
        for name in entries {
            let Some(stem) = name.strip_suffix(MD_EXTENSION) else {
                continue;
            };
            let title = derive_title(stem);
            let _ = write!(
                links,
                "[{title}]({base}/{route}/{stem})\n\n",
                base = self.base_url
            );
        }
        Ok(links)
    }
}

/// Derive a display title from a file stem: upper-case the first
/// character and replace every dash with a space.
fn derive_title(stem: &str) -> String {
    let mut chars = stem.chars();
    let mut title = String::with_capacity(stem.len());
    if let Some(first) = chars.next() {
        title.extend(first.to_uppercase());
    }
    title.push_str(chars.as_str());
    title.replace('-', " ")
}

/// Default directory listing: direct entries in enumeration order.
fn default_list_dir(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

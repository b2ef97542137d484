//! Application state.
//!
//! Shared state for all request handlers. Everything here is immutable
//! after startup; requests never interfere with each other.

use std::path::PathBuf;

use mdpress_compose::{NavExpander, StyleSheet};
use mdpress_pdf::PageSize;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Navigation directive expander (content root + public base URL).
    pub(crate) nav: NavExpander,
    /// Style definitions, built once at startup.
    pub(crate) styles: StyleSheet,
    /// Markdown content root directory.
    pub(crate) content_root: PathBuf,
    /// Page size for content documents.
    pub(crate) page_size: PageSize,
    /// Page size for the not-found document.
    pub(crate) not_found_page_size: PageSize,
}

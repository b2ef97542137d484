//! PDF render engine for mdpress document trees.
//!
//! Consumes the styled [`DocumentTree`] produced by `mdpress-compose`
//! and a [`PageSize`], and produces a complete PDF byte stream. The
//! engine is self-contained: base-14 Helvetica faces with AFM advance
//! widths, WinAnsi text encoding, word-wrap layout with overflow
//! pagination, underline rules and `/URI` link annotations.
//!
//! Rendering writes into an in-memory buffer and cannot fail for
//! well-formed trees, so the function returns bytes directly rather
//! than a `Result`.
//!
//! # Example
//!
//! ```
//! use mdpress_compose::{StyleSheet, tokenize, transduce};
//! use mdpress_pdf::{PageSize, render};
//!
//! let styles = StyleSheet::default();
//! let tree = transduce(&tokenize("# Hello"), &styles);
//! let bytes = render(&tree, PageSize::Letter);
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```

mod layout;
mod metrics;
mod writer;

use mdpress_compose::DocumentTree;

/// Physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// US Letter, 612 x 792 pt.
    #[default]
    Letter,
    /// ISO A4, 595.28 x 841.89 pt.
    A4,
}

impl PageSize {
    /// Page dimensions in points, (width, height).
    #[must_use]
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::A4 => (595.28, 841.89),
        }
    }

    /// Parse a configuration name (`letter`, `a4`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "letter" => Some(Self::Letter),
            "a4" => Some(Self::A4),
            _ => None,
        }
    }
}

/// Render a document tree to PDF bytes.
#[must_use]
pub fn render(tree: &DocumentTree, size: PageSize) -> Vec<u8> {
    writer::write_pdf(&layout::lay_out(tree, size))
}

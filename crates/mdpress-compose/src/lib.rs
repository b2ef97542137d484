//! Markdown to styled document tree composition.
//!
//! This crate turns raw markdown text into the paginated, styled
//! [`DocumentTree`] consumed by the PDF render engine. The pipeline has
//! three stages, invoked per request:
//!
//! 1. [`NavExpander`]: replaces `<nav route="..."/>` directives in the raw
//!    text with generated markdown links to the files of a content
//!    subdirectory.
//! 2. [`tokenize`]: folds the pulldown-cmark event stream into the flat
//!    [`Token`] schema (headings, paragraphs with inline children, lists).
//! 3. [`transduce`]: maps each token into one styled block of a
//!    single-page document tree, resolving roles against an immutable
//!    [`StyleSheet`].
//!
//! # Example
//!
//! ```
//! use mdpress_compose::{StyleSheet, tokenize, transduce};
//!
//! let styles = StyleSheet::default();
//! let tokens = tokenize("# Hello\n\nSome [link](http://example.com).");
//! let tree = transduce(&tokens, &styles);
//! assert_eq!(tree.pages.len(), 1);
//! ```

mod nav;
mod style;
mod token;
mod transduce;
mod tree;

pub use nav::{NAV_ERROR_TEXT, NavExpander};
pub use style::{FontFamily, Rgb, Role, StyleSheet, TextStyle};
pub use token::{Inline, ListItem, Token, tokenize};
pub use transduce::{BULLET_GLYPH, transduce};
pub use tree::{BlockNode, DocumentTree, InlineNode, LinkNode, ListBlock, ListRow, PageNode, SpanBlock, TextBlock};

//! The styled, paginated document tree.
//!
//! Produced fresh per request by [`transduce`](crate::transduce) and
//! consumed once by the render engine. Every node carries both its
//! semantic [`Role`] and the resolved [`TextStyle`] record, so the
//! render engine needs no access to the style sheet.

use crate::style::{Role, TextStyle};

/// A complete document: ordered pages of ordered blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub pages: Vec<PageNode>,
}

/// One logical page.
///
/// The page style contributes padding and the base font; content that
/// overflows the physical page is continued by the render engine, not
/// modeled here.
#[derive(Debug, Clone, PartialEq)]
pub struct PageNode {
    pub style: TextStyle,
    pub blocks: Vec<BlockNode>,
}

/// A top-level block of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    /// A single styled run of plain text.
    Text(TextBlock),
    /// A paragraph of concatenated inline spans.
    Spans(SpanBlock),
    /// An unstyled container of bulleted rows.
    List(ListBlock),
}

/// A styled run of plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub role: Role,
    pub style: TextStyle,
    pub content: String,
}

/// A styled block whose content is a sequence of inline spans flowing
/// together as one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanBlock {
    pub role: Role,
    pub style: TextStyle,
    pub spans: Vec<InlineNode>,
}

/// An inline span within a [`SpanBlock`] or list row.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    /// Plain run inheriting the enclosing block's style.
    Text(String),
    /// Hyperlink run with its own style.
    Link(LinkNode),
}

/// A hyperlink span.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkNode {
    pub style: TextStyle,
    pub href: String,
    pub text: String,
}

/// A list container.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub rows: Vec<ListRow>,
}

/// One bulleted row: a fixed-width bullet glyph followed by the row body.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Row style (spacing between rows).
    pub style: TextStyle,
    /// The bullet glyph column.
    pub bullet: TextBlock,
    /// Text or link following the bullet.
    pub body: InlineNode,
}

//! Token stream to document tree transduction.
//!
//! A pure function of the token sequence and the style sheet: one page,
//! one block per mapped top-level token, token order preserved. Token
//! kinds without a mapping contribute nothing. The transducer cannot
//! fail; malformed shapes degrade to empty text runs.

use crate::style::{Role, StyleSheet};
use crate::token::{Inline, ListItem, Token};
use crate::tree::{
    BlockNode, DocumentTree, InlineNode, LinkNode, ListBlock, ListRow, PageNode, SpanBlock,
    TextBlock,
};

/// The literal bullet glyph rendered in front of every list row.
pub const BULLET_GLYPH: &str = "\u{2022} ";

/// Map a token sequence into a single-page styled document tree.
#[must_use]
pub fn transduce(tokens: &[Token], styles: &StyleSheet) -> DocumentTree {
    let blocks = tokens.iter().filter_map(|token| map_token(token, styles)).collect();

    DocumentTree {
        pages: vec![PageNode {
            style: *styles.get(Role::Page),
            blocks,
        }],
    }
}

/// Map one top-level token to its block, if it has a mapping.
fn map_token(token: &Token, styles: &StyleSheet) -> Option<BlockNode> {
    match token {
        Token::Heading { depth, text } => {
            let role = if *depth == 1 {
                Role::Heading1
            } else {
                Role::Heading2
            };
            Some(BlockNode::Text(TextBlock {
                role,
                style: *styles.get(role),
                content: text.clone(),
            }))
        }
        Token::Paragraph { text, children } => {
            if children.is_empty() {
                Some(BlockNode::Text(TextBlock {
                    role: Role::Paragraph,
                    style: *styles.get(Role::Paragraph),
                    content: text.clone(),
                }))
            } else {
                let spans = children
                    .iter()
                    .map(|child| map_inline(child, styles))
                    .collect();
                Some(BlockNode::Spans(SpanBlock {
                    role: Role::Paragraph,
                    style: *styles.get(Role::Paragraph),
                    spans,
                }))
            }
        }
        Token::List { items } => {
            let rows = items.iter().map(|item| map_item(item, styles)).collect();
            Some(BlockNode::List(ListBlock { rows }))
        }
        Token::Rule | Token::CodeBlock { .. } => None,
    }
}

/// Map an inline child to a span node.
fn map_inline(child: &Inline, styles: &StyleSheet) -> InlineNode {
    match child {
        Inline::Text(text) => InlineNode::Text(text.clone()),
        Inline::Link { href, text } => InlineNode::Link(LinkNode {
            style: *styles.get(Role::Link),
            href: href.clone(),
            text: text.clone(),
        }),
    }
}

/// Map a list item to a bulleted row.
///
/// Only the first inline child is consulted: a leading link renders as a
/// link row, anything else falls back to the item's plain text.
fn map_item(item: &ListItem, styles: &StyleSheet) -> ListRow {
    let body = match item.children.first() {
        Some(Inline::Link { href, text }) => InlineNode::Link(LinkNode {
            style: *styles.get(Role::Link),
            href: href.clone(),
            text: text.clone(),
        }),
        _ => InlineNode::Text(item.text.clone()),
    };

    ListRow {
        style: *styles.get(Role::ListItem),
        bullet: TextBlock {
            role: Role::Bullet,
            style: *styles.get(Role::Bullet),
            content: BULLET_GLYPH.to_owned(),
        },
        body,
    }
}

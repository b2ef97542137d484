//! Line breaking and page placement.
//!
//! Flows the blocks of a document tree onto physical pages: word wrap at
//! the content width, block margins, hanging indents for bulleted rows,
//! and overflow pagination. The output is a flat list of positioned text
//! runs, underline rules, and link rectangles per physical page, ready
//! for serialization.

use mdpress_compose::{
    BlockNode, DocumentTree, FontFamily, InlineNode, ListRow, PageNode, Rgb, SpanBlock, TextBlock,
    TextStyle,
};

use crate::metrics::{space_width, text_width};
use crate::PageSize;

/// Line height multiplier.
const LEADING: f32 = 1.2;

/// Underline rule thickness in points.
const RULE_THICKNESS: f32 = 0.5;

/// Gap between baseline and underline rule in points.
const RULE_OFFSET: f32 = 1.5;

/// Vertical slack added to link rectangles below the baseline.
const LINK_DESCENT: f32 = 2.0;

/// A laid-out document ready for serialization.
#[derive(Debug)]
pub(crate) struct Layout {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

/// One physical page of placed content.
#[derive(Debug, Default)]
pub(crate) struct Page {
    pub texts: Vec<PlacedText>,
    pub rules: Vec<PlacedRule>,
    pub links: Vec<PlacedLink>,
}

/// A positioned text run.
#[derive(Debug)]
pub(crate) struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub font: FontFamily,
    pub size: f32,
    pub color: Rgb,
    pub text: String,
}

/// A positioned filled rectangle (underlines).
#[derive(Debug)]
pub(crate) struct PlacedRule {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

/// A positioned link annotation rectangle.
#[derive(Debug)]
pub(crate) struct PlacedLink {
    pub rect: [f32; 4],
    pub href: String,
}

/// One word of inline content with its resolved style.
#[derive(Debug, Clone)]
struct Word {
    text: String,
    style: TextStyle,
    href: Option<String>,
}

/// Lay out a document tree on pages of the given size.
pub(crate) fn lay_out(tree: &DocumentTree, size: PageSize) -> Layout {
    let (width, height) = size.dimensions();
    let mut engine = Engine {
        width,
        height,
        padding: 0.0,
        cursor: height,
        pages: vec![Page::default()],
    };

    for page_node in &tree.pages {
        engine.page_node(page_node);
    }

    Layout {
        width,
        height,
        pages: engine.pages,
    }
}

/// Placement state: the page list plus a top-down y cursor.
struct Engine {
    width: f32,
    height: f32,
    padding: f32,
    /// Top of the next line area, measured from the page bottom.
    cursor: f32,
    pages: Vec<Page>,
}

impl Engine {
    fn page_node(&mut self, node: &PageNode) {
        self.padding = node.style.padding;
        // Each logical page starts on a fresh physical page
        if !self.current_page_empty() {
            self.pages.push(Page::default());
        }
        self.cursor = self.height - self.padding;

        for block in &node.blocks {
            match block {
                BlockNode::Text(text) => self.text_block(text),
                BlockNode::Spans(spans) => self.span_block(spans),
                BlockNode::List(list) => {
                    for row in &list.rows {
                        self.list_row(row);
                    }
                }
            }
        }
    }

    fn current_page_empty(&self) -> bool {
        self.pages
            .last()
            .is_none_or(|p| p.texts.is_empty() && p.rules.is_empty() && p.links.is_empty())
    }

    fn content_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }

    fn text_block(&mut self, block: &TextBlock) {
        self.cursor -= block.style.margin_top;
        let words = split_words(&block.content, &block.style, None);
        self.flow(&words, self.padding, self.content_width());
        self.cursor -= block.style.margin_bottom;
    }

    fn span_block(&mut self, block: &SpanBlock) {
        self.cursor -= block.style.margin_top;
        let mut words = Vec::new();
        for span in &block.spans {
            match span {
                InlineNode::Text(text) => {
                    words.extend(split_words(text, &block.style, None));
                }
                InlineNode::Link(link) => {
                    words.extend(split_words(&link.text, &link.style, Some(&link.href)));
                }
            }
        }
        self.flow(&words, self.padding, self.content_width());
        self.cursor -= block.style.margin_bottom;
    }

    fn list_row(&mut self, row: &ListRow) {
        self.cursor -= row.style.margin_top;

        let bullet_width = row.bullet.style.width.unwrap_or(0.0);
        let body_x = self.padding + bullet_width;
        let body_width = self.content_width() - bullet_width;

        let words = match &row.body {
            InlineNode::Text(text) => split_words(text, &row.style, None),
            InlineNode::Link(link) => split_words(&link.text, &link.style, Some(&link.href)),
        };

        // Body lines get a hanging indent; the bullet is placed afterwards
        // on whichever page and baseline the first body line landed on.
        let first_line = self.flow(&words, body_x, body_width);

        let (page_index, baseline) = first_line.unwrap_or_else(|| {
            // Empty body: the bullet still occupies a row of its own
            let line_height = row.bullet.style.size * LEADING;
            self.ensure_room(line_height);
            let baseline = self.cursor - row.bullet.style.size;
            self.cursor -= line_height;
            (self.pages.len() - 1, baseline)
        });

        self.pages[page_index].texts.push(PlacedText {
            x: self.padding,
            y: baseline,
            font: row.bullet.style.font,
            size: row.bullet.style.size,
            color: row.bullet.style.color,
            text: row.bullet.content.clone(),
        });

        self.cursor -= row.style.margin_bottom;
    }

    /// Flow words into wrapped lines starting at `x_origin`, breaking at
    /// `max_width`. Returns the page index and baseline of the first
    /// emitted line, if any.
    fn flow(&mut self, words: &[Word], x_origin: f32, max_width: f32) -> Option<(usize, f32)> {
        let mut first_line = None;
        let mut line: Vec<(Word, f32)> = Vec::new();
        let mut cursor_x = 0.0;

        for word in words {
            let width = text_width(word.style.font, word.style.size, &word.text);
            let space = if line.is_empty() {
                0.0
            } else {
                space_width(word.style.font, word.style.size)
            };

            if !line.is_empty() && cursor_x + space + width > max_width {
                let placed = self.emit_line(&line, x_origin);
                first_line.get_or_insert(placed);
                line.clear();
                line.push((word.clone(), 0.0));
                cursor_x = width;
            } else {
                let x = cursor_x + space;
                line.push((word.clone(), x));
                cursor_x = x + width;
            }
        }

        if !line.is_empty() {
            let placed = self.emit_line(&line, x_origin);
            first_line.get_or_insert(placed);
        }

        first_line
    }

    /// Emit one line of positioned words, merging same-style neighbors
    /// into single runs. Returns the page index and baseline used.
    fn emit_line(&mut self, line: &[(Word, f32)], x_origin: f32) -> (usize, f32) {
        let max_size = line
            .iter()
            .map(|(word, _)| word.style.size)
            .fold(0.0_f32, f32::max);
        let line_height = max_size * LEADING;

        self.ensure_room(line_height);
        let baseline = self.cursor - max_size;
        let page_index = self.pages.len() - 1;

        let mut index = 0;
        while index < line.len() {
            let (first, start_x) = &line[index];
            let mut text = first.text.clone();
            let mut end = index + 1;

            while end < line.len() && mergeable(&line[end].0, first) {
                text.push(' ');
                text.push_str(&line[end].0.text);
                end += 1;
            }

            let run_width = text_width(first.style.font, first.style.size, &text);
            let x = x_origin + start_x;
            let page = &mut self.pages[page_index];

            page.texts.push(PlacedText {
                x,
                y: baseline,
                font: first.style.font,
                size: first.style.size,
                color: first.style.color,
                text,
            });

            if first.style.underline {
                page.rules.push(PlacedRule {
                    x,
                    y: baseline - RULE_OFFSET,
                    width: run_width,
                    height: RULE_THICKNESS,
                    color: first.style.color,
                });
            }

            if let Some(href) = &first.href {
                page.links.push(PlacedLink {
                    rect: [
                        x,
                        baseline - LINK_DESCENT,
                        x + run_width,
                        baseline + first.style.size,
                    ],
                    href: href.clone(),
                });
            }

            index = end;
        }

        self.cursor -= line_height;
        (page_index, baseline)
    }

    /// Start a new physical page if the next line would cross the bottom
    /// padding.
    fn ensure_room(&mut self, needed: f32) {
        if self.cursor - needed < self.padding && !self.current_page_empty() {
            self.pages.push(Page::default());
            self.cursor = self.height - self.padding;
        }
    }
}

/// Two words render as one run when every visual attribute and the link
/// target agree.
fn mergeable(a: &Word, b: &Word) -> bool {
    a.style == b.style && a.href == b.href
}

/// Split text into styled words on whitespace.
fn split_words(text: &str, style: &TextStyle, href: Option<&str>) -> Vec<Word> {
    text.split_whitespace()
        .map(|word| Word {
            text: word.to_owned(),
            style: *style,
            href: href.map(str::to_owned),
        })
        .collect()
}

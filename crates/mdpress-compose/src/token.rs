//! Flat token schema and the pulldown-cmark adapter.
//!
//! [`tokenize`] folds the parser's event stream into the small closed set
//! of top-level tokens the transducer understands. Inline structure is
//! flattened aggressively: only plain text runs and links survive;
//! emphasis, inline code and raw HTML contribute their text content to
//! the surrounding run. HTML entities are resolved by the parser itself,
//! so token text is already decoded and is never decoded again
//! downstream.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// A top-level markdown token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A heading; only `depth == 1` vs `depth > 1` matters downstream.
    Heading { depth: u8, text: String },
    /// A paragraph with its flattened text and ordered inline children.
    Paragraph { text: String, children: Vec<Inline> },
    /// A bulleted or numbered list.
    List { items: Vec<ListItem> },
    /// A thematic break. Carried but unmapped.
    Rule,
    /// A fenced or indented code block. Carried but unmapped.
    CodeBlock { text: String },
}

/// An inline child of a paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// A plain text run.
    Text(String),
    /// A hyperlink. Invariant: `href` is never empty; the adapter demotes
    /// empty-target links to plain text runs.
    Link { href: String, text: String },
}

/// One item of a list token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Flattened text of the item's inline content.
    pub text: String,
    /// Ordered inline children; only the first is consulted downstream.
    pub children: Vec<Inline>,
}

/// Parse markdown text into the flat token schema.
#[must_use]
pub fn tokenize(markdown: &str) -> Vec<Token> {
    let mut events = Parser::new(markdown);
    let mut tokens = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let text = collect_text(&mut events, TagEnd::Heading(level));
                tokens.push(Token::Heading {
                    depth: heading_depth(level),
                    text,
                });
            }
            Event::Start(Tag::Paragraph) => {
                let children = collect_inlines(&mut events, TagEnd::Paragraph);
                let text = flatten(&children);
                tokens.push(Token::Paragraph { text, children });
            }
            Event::Start(Tag::List(_)) => {
                tokens.push(Token::List {
                    items: collect_items(&mut events),
                });
            }
            Event::Start(Tag::CodeBlock(_)) => {
                let text = collect_text(&mut events, TagEnd::CodeBlock);
                tokens.push(Token::CodeBlock { text });
            }
            Event::Rule => tokens.push(Token::Rule),
            // Blockquotes are dropped wholesale, content included.
            Event::Start(Tag::BlockQuote(_)) => skip_blockquote(&mut events),
            Event::Start(Tag::HtmlBlock) => skip_until(&mut events, TagEnd::HtmlBlock),
            _ => {}
        }
    }

    tokens
}

/// Numeric heading depth.
fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Concatenate the text content of a run of inline children.
fn flatten(children: &[Inline]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            Inline::Text(t) | Inline::Link { text: t, .. } => text.push_str(t),
        }
    }
    text
}

/// Collect flattened plain text until the matching end tag.
///
/// Inline formatting is discarded; text inside links and emphasis flows
/// through, image subtrees are dropped.
fn collect_text<'a, I>(events: &mut I, until: TagEnd) -> String
where
    I: Iterator<Item = Event<'a>>,
{
    let mut text = String::new();
    while let Some(event) = events.next() {
        match event {
            Event::End(end) if end == until => break,
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::Start(Tag::Image { .. }) => {
                // Consumed here so alt text does not leak into the run
                skip_image(events);
            }
            _ => {}
        }
    }
    text
}

/// Collect inline children (text runs and links) until the matching end
/// tag. Adjacent non-link content merges into a single run.
fn collect_inlines<'a, I>(events: &mut I, until: TagEnd) -> Vec<Inline>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut children = Vec::new();
    let mut run = String::new();

    while let Some(event) = events.next() {
        match event {
            Event::End(end) if end == until => break,
            Event::Start(Tag::Link { dest_url, .. }) => {
                let text = collect_text(events, TagEnd::Link);
                if dest_url.is_empty() {
                    // Empty target: demote to a plain run
                    run.push_str(&text);
                } else {
                    flush_run(&mut run, &mut children);
                    children.push(Inline::Link {
                        href: dest_url.into_string(),
                        text,
                    });
                }
            }
            Event::Start(Tag::Image { .. }) => skip_image(events),
            Event::Text(t) | Event::Code(t) => run.push_str(&t),
            Event::InlineHtml(html) | Event::Html(html) => run.push_str(&html),
            Event::SoftBreak | Event::HardBreak => run.push(' '),
            _ => {}
        }
    }

    flush_run(&mut run, &mut children);
    children
}

/// Push a pending text run into the child list.
fn flush_run(run: &mut String, children: &mut Vec<Inline>) {
    if !run.is_empty() {
        children.push(Inline::Text(std::mem::take(run)));
    }
}

/// Collect the items of a list whose start tag has been consumed.
fn collect_items<'a, I>(events: &mut I) -> Vec<ListItem>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut items = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Item) => items.push(collect_item(events)),
            Event::End(TagEnd::List(_)) => break,
            _ => {}
        }
    }
    items
}

/// Collect one list item's inline content.
///
/// Loose-list paragraph wrappers are transparent; nested lists inside the
/// item are skipped entirely.
fn collect_item<'a, I>(events: &mut I) -> ListItem
where
    I: Iterator<Item = Event<'a>>,
{
    let mut children = Vec::new();
    let mut run = String::new();

    while let Some(event) = events.next() {
        match event {
            Event::End(TagEnd::Item) => break,
            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => {}
            Event::Start(Tag::List(_)) => skip_list(events),
            Event::Start(Tag::Link { dest_url, .. }) => {
                let text = collect_text(events, TagEnd::Link);
                if dest_url.is_empty() {
                    run.push_str(&text);
                } else {
                    flush_run(&mut run, &mut children);
                    children.push(Inline::Link {
                        href: dest_url.into_string(),
                        text,
                    });
                }
            }
            Event::Start(Tag::Image { .. }) => skip_image(events),
            Event::Text(t) | Event::Code(t) => run.push_str(&t),
            Event::InlineHtml(html) | Event::Html(html) => run.push_str(&html),
            Event::SoftBreak | Event::HardBreak => run.push(' '),
            _ => {}
        }
    }

    flush_run(&mut run, &mut children);
    let text = flatten(&children);
    ListItem { text, children }
}

/// Skip a nested list subtree, start tag already consumed.
fn skip_list<'a, I>(events: &mut I)
where
    I: Iterator<Item = Event<'a>>,
{
    let mut depth = 1usize;
    for event in events.by_ref() {
        match event {
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(TagEnd::List(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

/// Skip a blockquote subtree, start tag already consumed.
fn skip_blockquote<'a, I>(events: &mut I)
where
    I: Iterator<Item = Event<'a>>,
{
    let mut depth = 1usize;
    for event in events.by_ref() {
        match event {
            Event::Start(Tag::BlockQuote(_)) => depth += 1,
            Event::End(TagEnd::BlockQuote(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

/// Skip an image subtree (alt-text events), start tag already consumed.
fn skip_image<'a, I>(events: &mut I)
where
    I: Iterator<Item = Event<'a>>,
{
    skip_until(events, TagEnd::Image);
}

/// Skip events until the given end tag.
fn skip_until<'a, I>(events: &mut I, until: TagEnd)
where
    I: Iterator<Item = Event<'a>>,
{
    for event in events.by_ref() {
        if matches!(&event, Event::End(end) if *end == until) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_depths() {
        let tokens = tokenize("# Title\n\n## Section\n\n### Sub");
        assert_eq!(
            tokens,
            vec![
                Token::Heading {
                    depth: 1,
                    text: "Title".to_owned()
                },
                Token::Heading {
                    depth: 2,
                    text: "Section".to_owned()
                },
                Token::Heading {
                    depth: 3,
                    text: "Sub".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_heading_inline_formatting_flattened() {
        let tokens = tokenize("# A [b](http://c) `d`");
        assert_eq!(
            tokens,
            vec![Token::Heading {
                depth: 1,
                text: "A b d".to_owned()
            }]
        );
    }

    #[test]
    fn test_plain_paragraph() {
        let tokens = tokenize("Hello world.");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "Hello world.".to_owned(),
                children: vec![Inline::Text("Hello world.".to_owned())],
            }]
        );
    }

    #[test]
    fn test_paragraph_with_link_preserves_order() {
        let tokens = tokenize("before [click](http://x) after");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "before click after".to_owned(),
                children: vec![
                    Inline::Text("before ".to_owned()),
                    Inline::Link {
                        href: "http://x".to_owned(),
                        text: "click".to_owned(),
                    },
                    Inline::Text(" after".to_owned()),
                ],
            }]
        );
    }

    #[test]
    fn test_emphasis_melts_into_text_run() {
        let tokens = tokenize("some *emphasized* and **bold** text");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "some emphasized and bold text".to_owned(),
                children: vec![Inline::Text("some emphasized and bold text".to_owned())],
            }]
        );
    }

    #[test]
    fn test_empty_href_link_demoted() {
        let tokens = tokenize("a [dead]() link");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "a dead link".to_owned(),
                children: vec![Inline::Text("a dead link".to_owned())],
            }]
        );
    }

    #[test]
    fn test_entities_decoded_once() {
        let tokens = tokenize("Fish &amp; chips");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "Fish & chips".to_owned(),
                children: vec![Inline::Text("Fish & chips".to_owned())],
            }]
        );

        // A doubly-encoded ampersand decodes exactly one level
        let tokens = tokenize("&amp;amp;");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "&amp;".to_owned(),
                children: vec![Inline::Text("&amp;".to_owned())],
            }]
        );
    }

    #[test]
    fn test_list_items() {
        let tokens = tokenize("- plain\n- [go](http://y)");
        assert_eq!(
            tokens,
            vec![Token::List {
                items: vec![
                    ListItem {
                        text: "plain".to_owned(),
                        children: vec![Inline::Text("plain".to_owned())],
                    },
                    ListItem {
                        text: "go".to_owned(),
                        children: vec![Inline::Link {
                            href: "http://y".to_owned(),
                            text: "go".to_owned(),
                        }],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_nested_list_skipped() {
        let tokens = tokenize("- outer\n  - inner\n- second");
        let Token::List { items } = &tokens[0] else {
            panic!("expected list, got {tokens:?}");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "outer");
        assert_eq!(items[1].text, "second");
    }

    #[test]
    fn test_code_block_carried_but_distinct() {
        let tokens = tokenize("```\nfn main() {}\n```");
        assert_eq!(
            tokens,
            vec![Token::CodeBlock {
                text: "fn main() {}\n".to_owned()
            }]
        );
    }

    #[test]
    fn test_rule_token() {
        let tokens = tokenize("above\n\n---\n\nbelow");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::Rule);
    }

    #[test]
    fn test_blockquote_dropped_entirely() {
        let tokens = tokenize("> quoted text\n\nafter");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "after".to_owned(),
                children: vec![Inline::Text("after".to_owned())],
            }]
        );
    }

    #[test]
    fn test_image_dropped() {
        let tokens = tokenize("before ![alt](img.png) after");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "before  after".to_owned(),
                children: vec![Inline::Text("before  after".to_owned())],
            }]
        );
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let tokens = tokenize("line one\nline two");
        assert_eq!(
            tokens,
            vec![Token::Paragraph {
                text: "line one line two".to_owned(),
                children: vec![Inline::Text("line one line two".to_owned())],
            }]
        );
    }

    #[test]
    fn test_token_order_preserved() {
        let tokens = tokenize("# H\n\npara\n\n- item\n");
        assert!(matches!(tokens[0], Token::Heading { .. }));
        assert!(matches!(tokens[1], Token::Paragraph { .. }));
        assert!(matches!(tokens[2], Token::List { .. }));
    }
}

//! Owned syntax tree over a plain CommonMark parse.
//!
//! `pulldown-cmark` produces a flat event stream; the compiler wants nodes it
//! can dispatch on and recurse into, each with a byte span into the source.

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading(u8),
    Paragraph,
    List { ordered: bool },
    Item,
    CodeBlock,
    BlockQuote,
    Emphasis,
    Strong,
    /// Links and images alike. The span starts at the opening `[`, so an
    /// image is a link whose span is preceded by `!`. Autolinks (`<...>`)
    /// have no brackets and are never images.
    Link { destination: String, autolink: bool },
    /// A literal text token. Inline code is folded in as text.
    Text(String),
    LineBreak,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Range<usize>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

/// Parse `source` as plain CommonMark (no extensions) into a tree rooted at a
/// `Document` node.
pub fn build(source: &str) -> Node {
    let parser = Parser::new_ext(source, Options::empty()).into_offset_iter();
    let mut builder = TreeBuilder::new(source.len());

    for (event, range) in parser {
        match event {
            Event::Start(tag) => {
                let is_image = matches!(tag, Tag::Image { .. });
                let kind = tag_kind(tag);
                let mut span = range;
                if is_image && source.as_bytes().get(span.start) == Some(&b'!') {
                    span.start += 1;
                }
                builder.open(Node::new(kind, span));
            }
            Event::End(_) => builder.close(),
            Event::Text(text) | Event::Code(text) => builder.text(&text, range),
            Event::SoftBreak | Event::HardBreak => {
                builder.leaf(Node::new(NodeKind::LineBreak, range));
            }
            // HTML, rules, math and footnotes carry nothing we project
            _ => {}
        }
    }

    builder.finish()
}

/// Byte ranges of every code block (fenced or indented) in `source`, in
/// ascending order. Code blocks never nest, so the ranges are disjoint.
pub fn code_block_ranges(source: &str) -> Vec<Range<usize>> {
    Parser::new_ext(source, Options::empty())
        .into_offset_iter()
        .filter_map(|(event, range)| {
            matches!(event, Event::Start(Tag::CodeBlock(_))).then_some(range)
        })
        .collect()
}

fn tag_kind(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level_to_u8(level)),
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::List(first_item) => NodeKind::List {
            ordered: first_item.is_some(),
        },
        Tag::Item => NodeKind::Item,
        Tag::CodeBlock(_) => NodeKind::CodeBlock,
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Link {
            link_type,
            dest_url,
            ..
        } => NodeKind::Link {
            destination: dest_url.into_string(),
            autolink: matches!(link_type, LinkType::Autolink | LinkType::Email),
        },
        Tag::Image { dest_url, .. } => NodeKind::Link {
            destination: dest_url.into_string(),
            autolink: false,
        },
        _ => NodeKind::Other,
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new(len: usize) -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document, 0..len)],
        }
    }

    fn open(&mut self, node: Node) {
        self.stack.push(node);
    }

    fn close(&mut self) {
        // The document root is only closed by `finish`
        if self.stack.len() > 1 {
            if let Some(node) = self.stack.pop() {
                self.leaf(node);
            }
        }
    }

    fn leaf(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    /// Append a text token, merging it into a directly preceding one.
    fn text(&mut self, text: &str, range: Range<usize>) {
        let Some(parent) = self.stack.last_mut() else {
            return;
        };

        if let Some(last) = parent.children.last_mut() {
            if let NodeKind::Text(literal) = &mut last.kind {
                literal.push_str(text);
                last.span.end = range.end;
                return;
            }
        }

        parent
            .children
            .push(Node::new(NodeKind::Text(text.to_string()), range));
    }

    fn finish(mut self) -> Node {
        while let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => return node,
            }
        }
        Node::new(NodeKind::Document, 0..0)
    }
}

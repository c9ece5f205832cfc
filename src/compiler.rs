use tracing::trace;

use crate::element::{Element, Inline, List, ListItem};
use crate::table;
use crate::tree::{self, Node, NodeKind};

/// Compile prose (text without pre-extracted tables) into document elements.
pub fn compile(text: &str) -> Vec<Element> {
    let document = tree::build(text);
    let mut elements = Vec::new();
    project_children(&document, text, &mut elements);
    elements
}

fn project_children(node: &Node, source: &str, elements: &mut Vec<Element>) {
    for child in &node.children {
        project(child, source, elements);
    }
}

fn project(node: &Node, source: &str, elements: &mut Vec<Element>) {
    match &node.kind {
        NodeKind::Heading(level) => elements.push(Element::Header {
            text: extract_text(node),
            level: *level,
        }),
        NodeKind::Paragraph => compile_paragraph(node, source, elements),
        NodeKind::List { ordered } => elements.push(Element::List(list(node, *ordered))),
        NodeKind::Item => elements.push(Element::ListItem(ListItem {
            text: extract_text(node),
            ordered: false,
        })),
        NodeKind::CodeBlock => elements.push(Element::CodeBlock {
            text: code_text(node),
        }),
        NodeKind::BlockQuote => elements.push(Element::Quote {
            text: extract_text(node),
        }),
        // Unknown containers pass their children through
        _ => project_children(node, source, elements),
    }
}

fn list(node: &Node, ordered: bool) -> List {
    let items = node
        .children
        .iter()
        .filter(|child| child.kind == NodeKind::Item)
        .map(|item| ListItem {
            text: extract_text(item),
            ordered,
        })
        .collect();

    List { ordered, items }
}

fn compile_paragraph(node: &Node, source: &str, elements: &mut Vec<Element>) {
    // Tables the scanner missed (no leading pipe) arrive as paragraphs
    let lines = extract_lines(node);
    if table::is_table(&lines) {
        trace!(start = node.span.start, "paragraph reparsed as table");
        let table_lines = table::table_line_count(&lines);
        let table_text: Vec<&str> = lines.lines().take(table_lines).collect();
        elements.push(table::project(&table_text.join("\n")));

        // Prose lines after the table stay a paragraph
        let rest = children_after_line(node, table_lines);
        if !rest.children.is_empty() {
            trace!(start = rest.span.start, "paragraph continues after table");
            elements.extend(hoist_images(extract_inline(&rest, source)));
        }
        return;
    }

    let runs = extract_inline(node, source);
    elements.extend(hoist_images(runs));
}

/// A copy of `node` holding only the children after its `line`-th line break.
fn children_after_line(node: &Node, line: usize) -> Node {
    let mut breaks = 0;
    let mut children = Vec::new();
    for child in &node.children {
        if breaks >= line {
            children.push(child.clone());
        } else if child.kind == NodeKind::LineBreak {
            breaks += 1;
        }
    }

    let start = children.first().map_or(node.span.end, |child| child.span.start);
    Node::new(NodeKind::Paragraph, start..node.span.end).with_children(children)
}

/// Flatten a node to its literal text: every text token, in order, separated
/// by single spaces. Structural whitespace and line breaks are not kept.
pub fn extract_text(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, false, &mut out);
    out.trim().to_string()
}

/// Like [`extract_text`], but line breaks inside the node become `\n`. Line
/// `n` of the result follows the node's `n`-th line break.
fn extract_lines(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, true, &mut out);
    out.trim_end().to_string()
}

fn collect_text(node: &Node, keep_lines: bool, out: &mut String) {
    match &node.kind {
        NodeKind::Text(literal) => {
            let literal = literal.trim();
            if !literal.is_empty() {
                out.push_str(literal);
                out.push(' ');
            }
        }
        NodeKind::LineBreak if keep_lines => out.push('\n'),
        _ => {
            for child in &node.children {
                collect_text(child, keep_lines, out);
            }
        }
    }
}

/// Code keeps its internal layout; only surrounding blank lines and trailing
/// whitespace go.
fn code_text(node: &Node) -> String {
    let mut out = String::new();
    for child in &node.children {
        if let NodeKind::Text(literal) = &child.kind {
            out.push_str(literal);
        }
    }
    out.trim_start_matches(['\n', '\r']).trim_end().to_string()
}

/// A link node is an image when the byte before its span is `!`.
fn is_image(node: &Node, source: &str) -> bool {
    node.span
        .start
        .checked_sub(1)
        .and_then(|before| source.as_bytes().get(before))
        == Some(&b'!')
}

/// Extract the inline runs of a node. Nested formatting is flattened into the
/// outermost run.
pub fn extract_inline(node: &Node, source: &str) -> Vec<Inline> {
    let mut runs = Vec::new();
    for child in &node.children {
        match &child.kind {
            NodeKind::Emphasis => runs.push(Inline::Italic {
                text: extract_text(child),
            }),
            NodeKind::Strong => runs.push(Inline::Bold {
                text: extract_text(child),
            }),
            NodeKind::Link {
                destination,
                autolink,
            } => {
                let text = extract_text(child);
                let url = destination.clone();
                if !autolink && is_image(child, source) {
                    runs.push(Inline::Image {
                        alt_text: text,
                        url,
                    });
                } else {
                    runs.push(Inline::Link { text, url });
                }
            }
            NodeKind::Text(literal) => {
                let literal = literal.trim();
                if !literal.is_empty() {
                    runs.push(Inline::Text {
                        text: literal.to_string(),
                    });
                }
            }
            _ => runs.extend(extract_inline(child, source)),
        }
    }
    runs
}

/// Split a paragraph's runs around its images: text before an image becomes a
/// `RichParagraph`, the image becomes a block `Image`, and so on.
pub fn hoist_images(runs: Vec<Inline>) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut pending = Vec::new();

    for run in runs {
        match run {
            Inline::Image { alt_text, url } => {
                if !pending.is_empty() {
                    elements.push(Element::RichParagraph {
                        runs: std::mem::take(&mut pending),
                    });
                }
                trace!(%url, "hoisting inline image");
                elements.push(Element::Image { alt_text, url });
            }
            other => pending.push(other),
        }
    }

    if !pending.is_empty() {
        elements.push(Element::RichParagraph { runs: pending });
    }

    elements
}

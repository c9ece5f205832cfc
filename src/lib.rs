mod compiler;
mod config;
mod element;
mod scanner;
mod table;
mod text;
mod tree;

pub use compiler::compile;
pub use config::{Config, ConfigError, Format};
pub use element::{Element, Inline, List, ListItem};
pub use scanner::{Region, Segment, scan, segments};
pub use table::{is_table, project};
pub use text::elements_to_text;

use tracing::debug;

/// Parse markdown text into an ordered sequence of document elements.
///
/// Pipe tables are located up front and projected directly; the prose between
/// them goes through a plain CommonMark parse. Output follows source order.
pub fn parse(markdown: &str) -> Vec<Element> {
    let segments = segments(markdown);
    debug!(segments = segments.len(), "partitioned input");

    let mut elements = Vec::new();
    for segment in segments {
        match segment {
            Segment::Prose(region) => elements.extend(compile(region.text)),
            Segment::Table(region) => elements.push(project(region.text)),
        }
    }
    elements
}

/// Convert markdown to a plain-text preview using default config.
pub fn to_text(markdown: &str) -> String {
    to_text_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to a plain-text preview with custom config.
pub fn to_text_with_config(markdown: &str, config: &Config) -> String {
    let elements = parse(markdown);
    elements_to_text(&elements, config)
}

use serde::Serialize;

/// Inline runs inside a paragraph. Formatting does not nest: each run carries
/// only its rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Bold { text: String },
    Italic { text: String },
    Link { text: String, url: String },
    /// Pre-hoist form. Never left inside a `RichParagraph` by the compiler.
    Image { alt_text: String, url: String },
}

/// A single list item, flattened to text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub text: String,
    pub ordered: bool,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Header {
        text: String,
        level: u8,
    },
    RichParagraph {
        runs: Vec<Inline>,
    },
    /// Only produced for an item found outside of any list.
    ListItem(ListItem),
    List(List),
    CodeBlock {
        text: String,
    },
    Quote {
        text: String,
    },
    Image {
        alt_text: String,
        url: String,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

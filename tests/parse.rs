use mdblocks::{Element, Inline, parse};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn text(s: &str) -> Inline {
    Inline::Text {
        text: s.to_string(),
    }
}

/// Short tag per element, for order checks
fn tag(element: &Element) -> &'static str {
    match element {
        Element::Header { .. } => "header",
        Element::RichParagraph { .. } => "paragraph",
        Element::ListItem(_) => "list_item",
        Element::List(_) => "list",
        Element::CodeBlock { .. } => "code",
        Element::Quote { .. } => "quote",
        Element::Image { .. } => "image",
        Element::Table { .. } => "table",
    }
}

#[test]
fn table_round_trip() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n";

    assert_eq!(
        parse(md),
        vec![Element::Table {
            headers: strings(&["A", "B"]),
            rows: vec![strings(&["1", "2"]), strings(&["3", "4"])],
        }]
    );
}

#[test]
fn ragged_rows_are_dropped() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 | 3 |\n| 4 | 5 |\n";

    assert_eq!(
        parse(md),
        vec![Element::Table {
            headers: strings(&["A", "B"]),
            rows: vec![strings(&["4", "5"])],
        }]
    );
}

#[test]
fn non_table_is_prose() {
    let md = "| A | B |\n| not a separator |\n";
    let elements = parse(md);

    assert!(elements.iter().all(|e| !matches!(e, Element::Table { .. })));
    assert_eq!(tag(&elements[0]), "paragraph");
}

#[test]
fn image_hoisting() {
    assert_eq!(
        parse("Look ![alt](http://x/img.png) here"),
        vec![
            Element::RichParagraph {
                runs: vec![text("Look")],
            },
            Element::Image {
                alt_text: "alt".to_string(),
                url: "http://x/img.png".to_string(),
            },
            Element::RichParagraph {
                runs: vec![text("here")],
            },
        ]
    );
}

#[rstest]
#[case("# H1", "H1", 1)]
#[case("## H2", "H2", 2)]
#[case("### H3", "H3", 3)]
#[case("#### H4  ", "H4", 4)]
#[case("##### H5 ##", "H5", 5)]
#[case("###### H6", "H6", 6)]
fn header_levels(#[case] md: &str, #[case] expected: &str, #[case] level: u8) {
    assert_eq!(
        parse(md),
        vec![Element::Header {
            text: expected.to_string(),
            level,
        }]
    );
}

#[test]
fn seven_hashes_is_not_a_header() {
    let elements = parse("####### H7");
    assert_eq!(tag(&elements[0]), "paragraph");
}

#[test]
fn link_vs_image() {
    assert_eq!(
        parse("[text](url)"),
        vec![Element::RichParagraph {
            runs: vec![Inline::Link {
                text: "text".to_string(),
                url: "url".to_string(),
            }],
        }]
    );
    assert_eq!(
        parse("![text](url)"),
        vec![Element::Image {
            alt_text: "text".to_string(),
            url: "url".to_string(),
        }]
    );
}

#[test]
fn order_is_preserved() {
    let md = "\
# Title

Intro paragraph.

- a
- b

```
code
```

> quote

## Next

Closing words.
";

    let tags: Vec<_> = parse(md).iter().map(tag).collect();
    assert_eq!(
        tags,
        vec!["header", "paragraph", "list", "code", "quote", "header", "paragraph"]
    );
}

#[test]
fn tables_interleave_with_prose() {
    let md = "\
# Report

Before the table.

| Name | Score |
|:-----|------:|
| Ada  | 10    |

After the table.

Key | Value
----|------
x   | 1
";

    let elements = parse(md);
    let tags: Vec<_> = elements.iter().map(tag).collect();
    assert_eq!(
        tags,
        vec!["header", "paragraph", "table", "paragraph", "table"]
    );

    assert_eq!(
        elements[4],
        Element::Table {
            headers: strings(&["Key", "Value"]),
            rows: vec![strings(&["x", "1"])],
        }
    );
}

#[test]
fn table_inside_code_fence_stays_code() {
    let md = "```\n| A | B |\n|---|---|\n```\n";

    assert_eq!(
        parse(md),
        vec![Element::CodeBlock {
            text: "| A | B |\n|---|---|".to_string(),
        }]
    );
}

#[test]
fn parsing_is_repeatable() {
    let md = "# T\n\n| A |\n|---|\n| 1 |\n\ntext ![i](u) **b**\n\n1. x\n2. y\n";
    assert_eq!(parse(md), parse(md));
}

#[test]
fn empty_and_blank_input() {
    assert!(parse("").is_empty());
    assert!(parse("\n \n\t\n").is_empty());
}

#[test]
fn malformed_input_still_parses() {
    let md = "**unclosed *emphasis [link(\n|\n| |\n```";
    let elements = parse(md);

    let tags: Vec<_> = elements.iter().map(tag).collect();
    assert_eq!(tags, vec!["paragraph", "code"]);

    let Element::RichParagraph { runs } = &elements[0] else {
        unreachable!();
    };
    assert!(matches!(&runs[0], Inline::Text { text } if text.starts_with("**unclosed")));
}

#[test]
fn fenced_table_inside_list_item_stays_in_list() {
    let elements = parse("- ```\n  | a |\n  |---|\n  ```\n");

    let tags: Vec<_> = elements.iter().map(tag).collect();
    assert_eq!(tags, vec!["list"]);
}

#[test]
fn prose_after_unpiped_table_survives() {
    assert_eq!(
        parse("A | B\n--|--\n1 | 2\nNote: trailing prose."),
        vec![
            Element::Table {
                headers: strings(&["A", "B"]),
                rows: vec![strings(&["1", "2"])],
            },
            Element::RichParagraph {
                runs: vec![text("Note: trailing prose.")],
            },
        ]
    );
}

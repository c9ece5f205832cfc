use crate::config::Config;
use crate::element::{Element, Inline, List};

/// Render elements as a plain-text preview
pub fn elements_to_text(elements: &[Element], config: &Config) -> String {
    let mut out = String::new();

    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_element(element, config, &mut out);
    }

    out
}

fn emit_element(element: &Element, config: &Config, out: &mut String) {
    match element {
        Element::Header { text, level } => {
            out.push_str(text);
            out.push('\n');
            // Setext-style underline for the two top levels
            let underline = match level {
                1 => Some('='),
                2 => Some('-'),
                _ => None,
            };
            if let Some(ch) = underline {
                out.extend(std::iter::repeat_n(ch, text.chars().count().max(1)));
                out.push('\n');
            }
        }
        Element::RichParagraph { runs } => {
            runs_to_text(runs, out);
            out.push('\n');
        }
        Element::ListItem(item) => {
            out.push_str(&" ".repeat(config.list.indent));
            out.push_str(&config.list.bullet);
            out.push(' ');
            out.push_str(&item.text);
            out.push('\n');
        }
        Element::List(list) => list_to_text(list, config, out),
        Element::CodeBlock { text } => {
            for line in text.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
        Element::Quote { text } => {
            out.push_str("> ");
            out.push_str(text);
            out.push('\n');
        }
        Element::Image { alt_text, url } => {
            out.push_str(&format!("[image: {alt_text}] <{url}>\n"));
        }
        Element::Table { headers, rows } => table_to_text(headers, rows, config, out),
    }
}

fn runs_to_text(runs: &[Inline], out: &mut String) {
    for (i, run) in runs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match run {
            Inline::Text { text } | Inline::Bold { text } | Inline::Italic { text } => {
                out.push_str(text);
            }
            Inline::Link { text, url } => {
                out.push_str(&format!("{text} <{url}>"));
            }
            Inline::Image { alt_text, .. } => out.push_str(alt_text),
        }
    }
}

fn list_to_text(list: &List, config: &Config, out: &mut String) {
    let indent = " ".repeat(config.list.indent);

    for (index, item) in list.items.iter().enumerate() {
        out.push_str(&indent);
        if list.ordered {
            out.push_str(&format!("{}. ", index + 1));
        } else {
            out.push_str(&config.list.bullet);
            out.push(' ');
        }
        out.push_str(&item.text);
        out.push('\n');
    }
}

fn table_to_text(headers: &[String], rows: &[Vec<String>], config: &Config, out: &mut String) {
    if headers.is_empty() {
        return;
    }

    let header_line = headers.join(&config.table.separator);
    out.push_str(&header_line);
    out.push('\n');

    if config.table.header_rule {
        out.extend(std::iter::repeat_n('-', header_line.chars().count()));
        out.push('\n');
    }

    for row in rows {
        out.push_str(&row.join(&config.table.separator));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListConfig, TableConfig};
    use crate::to_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading() {
        assert_eq!(to_text("# Hello"), "Hello\n=====\n");
        assert_eq!(to_text("## Hi"), "Hi\n--\n");
        assert_eq!(to_text("### Deep"), "Deep\n");
    }

    #[test]
    fn heading_with_following_content() {
        assert_eq!(to_text("# Title\n\nSome text."), "Title\n=====\n\nSome text.\n");
    }

    #[test]
    fn paragraph_runs_are_space_joined() {
        assert_eq!(
            to_text("**bold** then *italic* and [a link](https://x.dev)"),
            "bold then italic and a link <https://x.dev>\n"
        );
    }

    #[test]
    fn hoisted_image() {
        assert_eq!(
            to_text("Look ![alt](http://x/img.png) here"),
            "Look\n\n[image: alt] <http://x/img.png>\n\nhere\n"
        );
    }

    #[test]
    fn code_block() {
        assert_eq!(
            to_text("```rust\nlet x = 1;\n```"),
            "    let x = 1;\n"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(to_text("- one\n- two"), "• one\n• two\n");
    }

    #[test]
    fn ordered_list_is_renumbered() {
        assert_eq!(to_text("3. one\n4. two"), "1. one\n2. two\n");
    }

    #[test]
    fn quote() {
        assert_eq!(to_text("> wise words"), "> wise words\n");
    }

    #[test]
    fn table() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |";
        assert_eq!(to_text(md), "A | B\n-----\n1 | 2\n");
    }

    #[test]
    fn custom_config() {
        let config = Config {
            list: ListConfig {
                bullet: "*".to_string(),
                indent: 2,
            },
            table: TableConfig {
                separator: ",".to_string(),
                header_rule: false,
            },
            ..Config::default()
        };
        let elements = crate::parse("- a\n\n| A | B |\n|---|---|\n| 1 | 2 |\n");

        assert_eq!(elements_to_text(&elements, &config), "  * a\n\nA,B\n1,2\n");
    }

    #[test]
    fn standalone_list_item() {
        let elements = vec![Element::ListItem(crate::ListItem {
            text: "solo".to_string(),
            ordered: false,
        })];
        assert_eq!(elements_to_text(&elements, &Config::default()), "• solo\n");
    }
}

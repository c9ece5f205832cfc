use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::element::Element;

/// Separator row: `:?-+:?` cells split by `|`, outer pipes optional.
static SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?\s*$").expect("separator pattern is valid")
});

fn content_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Check whether `text` has the shape of a pipe table: a header line with at
/// least one `|`, followed by a separator row. Blank lines are ignored.
pub fn is_table(text: &str) -> bool {
    let lines = content_lines(text);
    if lines.len() < 2 {
        return false;
    }

    lines[0].contains('|') && SEPARATOR.is_match(lines[1].trim())
}

/// Number of leading lines of `text` (blank ones included) that belong to the
/// table: the header, the separator, and every following line with a `|`.
/// Anything after that is prose that happened to follow the table.
pub fn table_line_count(text: &str) -> usize {
    let mut content = 0;
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if content >= 2 && !line.contains('|') {
            return index;
        }
        content += 1;
    }
    text.lines().count()
}

/// Split a row into trimmed cells. Only the empty cells created by a leading or
/// trailing pipe are dropped; empty interior cells stay.
fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Project table text into a `Table` element.
///
/// The first non-blank line gives the headers and the second (the separator) is
/// skipped. Rows whose cell count differs from the header count are dropped.
pub fn project(text: &str) -> Element {
    let mut lines = content_lines(text).into_iter();
    let headers = lines.next().map(split_cells).unwrap_or_default();

    let rows = lines
        .skip(1)
        .map(split_cells)
        .filter(|row| {
            let keep = row.len() == headers.len();
            if !keep {
                trace!(
                    cells = row.len(),
                    headers = headers.len(),
                    "dropping ragged table row"
                );
            }
            keep
        })
        .collect();

    Element::Table { headers, rows }
}

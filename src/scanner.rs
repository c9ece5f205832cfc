use tracing::debug;

use crate::table::is_table;
use crate::tree::code_block_ranges;

/// A byte range of the input together with the text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl<'a> Region<'a> {
    fn new(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: &source[start..end],
        }
    }
}

/// One piece of the input partition. Consecutive segments tile the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(Region<'a>),
    Table(Region<'a>),
}

/// Find the pipe-table regions of `text`, in ascending order.
///
/// A line starting with `|` opens a candidate region; while one is open, any
/// line containing `|` extends it. Lines that touch a code block never take
/// part in a region. Candidates that fail [`is_table`] are left to the prose
/// path. Region ends include the newline of their last line.
pub fn scan(text: &str) -> Vec<Region<'_>> {
    let code_blocks = code_block_ranges(text);
    let mut code_blocks = code_blocks.iter().peekable();

    let mut regions = Vec::new();
    let mut open: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        while code_blocks.next_if(|code| code.end <= line_start).is_some() {}
        if code_blocks.peek().is_some_and(|code| code.start < offset) {
            if let Some(start) = open.take() {
                close_candidate(text, start, line_start, &mut regions);
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.starts_with('|') || (open.is_some() && trimmed.contains('|')) {
            open.get_or_insert(line_start);
            continue;
        }

        if let Some(start) = open.take() {
            close_candidate(text, start, line_start, &mut regions);
        }
    }

    if let Some(start) = open {
        close_candidate(text, start, text.len(), &mut regions);
    }

    regions
}

fn close_candidate<'a>(source: &'a str, start: usize, end: usize, regions: &mut Vec<Region<'a>>) {
    let region = Region::new(source, start, end);
    if is_table(region.text) {
        debug!(start, end, "found table region");
        regions.push(region);
    } else {
        debug!(start, end, "rejected table candidate");
    }
}

/// Partition `text` into alternating prose and table segments.
///
/// Empty prose gaps are omitted; concatenating the segment texts reproduces
/// the input exactly.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut position = 0;

    for region in scan(text) {
        if position < region.start {
            segments.push(Segment::Prose(Region::new(text, position, region.start)));
        }
        position = region.end;
        segments.push(Segment::Table(region));
    }

    if position < text.len() {
        segments.push(Segment::Prose(Region::new(text, position, text.len())));
    }

    segments
}

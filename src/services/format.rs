//! Response formatter: assistant text to render-safe segments.
//!
//! DESIGN
//! ======
//! Output is one [`FormattedLine`] per `\n`-separated line, empty lines
//! included. Within a line, each `**...**` pair (shortest match, left to
//! right) becomes an emphasis run with the markers stripped; everything
//! else is plain. An unpaired `**` is left in the plain text as written.
//! Formatting never fails.
//!
//! Lines starting with `*` or `-` carry a `list_item` hint for tighter
//! spacing. The hint does not change segmentation.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Emphasis(String),
}

impl Segment {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(t) | Self::Emphasis(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedLine {
    pub list_item: bool,
    pub segments: Vec<Segment>,
}

/// Split raw assistant text into lines of segments.
#[must_use]
pub fn format(raw: &str) -> Vec<FormattedLine> {
    raw.split('\n').map(format_line).collect()
}

fn format_line(line: &str) -> FormattedLine {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for caps in EMPHASIS.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_nonempty(&mut segments, Segment::Plain(line[cursor..whole.start()].to_string()));
        push_nonempty(&mut segments, Segment::Emphasis(inner.as_str().to_string()));
        cursor = whole.end();
    }
    push_nonempty(&mut segments, Segment::Plain(line[cursor..].to_string()));

    FormattedLine { list_item: line.starts_with('*') || line.starts_with('-'), segments }
}

fn push_nonempty(segments: &mut Vec<Segment>, segment: Segment) {
    if !segment.text().is_empty() {
        segments.push(segment);
    }
}

// =============================================================================
// HTML
// =============================================================================

/// Render formatted lines as HTML. All text is entity-escaped, so provider
/// output can never inject markup.
#[must_use]
pub fn render_html(lines: &[FormattedLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let class = if line.list_item { "list-item" } else { "line" };
        let _ = write!(out, "<div class=\"{class}\">");
        for segment in &line.segments {
            match segment {
                Segment::Plain(text) => out.push_str(&escape_html(text)),
                Segment::Emphasis(text) => {
                    let _ = write!(out, "<strong>{}</strong>", escape_html(text));
                }
            }
        }
        out.push_str("</div>");
    }
    out
}

#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;

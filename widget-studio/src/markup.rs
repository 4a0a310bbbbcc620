//! Helpers for building indented HTML fragments.

/// Escape text for insertion into element content or a quoted attribute.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const INDENT: &str = "  ";

/// One line of markup at a nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line {
    depth: usize,
    text: String,
}

/// Accumulates markup lines; children are indented two spaces per level.
#[derive(Debug, Default)]
pub(crate) struct Fragment {
    lines: Vec<Line>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, depth: usize, text: impl Into<String>) {
        self.lines.push(Line {
            depth,
            text: text.into(),
        });
    }

    /// `open`, then `text` one level deeper, then `close`.
    pub fn text_block(&mut self, depth: usize, open: String, text: &str, close: &str) {
        self.line(depth, open);
        self.line(depth + 1, text);
        self.line(depth, close);
    }

    pub fn finish(self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}{}", INDENT.repeat(l.depth), l.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

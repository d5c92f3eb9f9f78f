use crate::chunk::split_message;

/// One piece of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text, escaped on output.
    Text(String),
    /// Bold text, escaped and wrapped in `<b>`.
    Bold(String),
    /// Clickable label pointing at `href`.
    Link { href: String, label: String },
}

/// A single output line; an empty line renders as a blank separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Separator line; reads better than `new()` at call sites.
    pub fn blank() -> Self {
        Self::new()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text(text.into()));
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Bold(text.into()));
        self
    }

    pub fn link(mut self, href: impl Into<String>, label: impl Into<String>) -> Self {
        self.segments.push(Segment::Link {
            href: href.into(),
            label: label.into(),
        });
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }

    fn write_html(&self, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(&escape_text(text)),
                Segment::Bold(text) => {
                    out.push_str("<b>");
                    out.push_str(&escape_text(text));
                    out.push_str("</b>");
                }
                Segment::Link { href, label } => {
                    out.push_str("<a href=\"");
                    out.push_str(&escape_url(href));
                    out.push_str("\">");
                    out.push_str(&escape_text(label));
                    out.push_str("</a>");
                }
            }
        }
    }
}

/// The full schedule as an ordered list of lines, ready for Telegram's HTML
/// parse mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMessage {
    lines: Vec<Line>,
}

impl RenderedMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A message made of a single plain-text line.
    pub fn notice(text: impl Into<String>) -> Self {
        let mut message = Self::new();
        message.push(Line::new().text(text));
        message
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Telegram HTML text; every line is terminated by `\n`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            line.write_html(&mut out);
            out.push('\n');
        }
        out
    }

    /// Split the HTML text into chunks of at most `max_chars` characters,
    /// breaking between lines.
    pub fn to_chunks(&self, max_chars: usize) -> Vec<String> {
        split_message(&self.to_html(), max_chars)
    }
}

/// Escape text content for Telegram HTML.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Make a URL safe inside a double-quoted attribute: strip line breaks,
/// percent-encode spaces and escape `& < > " '`.
pub fn escape_url(url: &str) -> String {
    url.trim()
        .replace(['\r', '\n'], "")
        .replace(' ', "%20")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::{escape_url, Line, RenderedMessage};

    #[test]
    fn url_escaping_covers_quotes_and_ampersands() {
        assert_eq!(
            escape_url("https://x.example/?a=1&b=\"2\"&c='3'<>"),
            "https://x.example/?a=1&amp;b=&quot;2&quot;&amp;c=&#39;3&#39;&lt;&gt;"
        );
    }

    #[test]
    fn lines_render_with_markup() {
        let mut message = RenderedMessage::new();
        message.push(Line::new().text("⏰ ").bold("A & B"));
        message.push(Line::blank());
        message.push(Line::new().text("🔗 ").link("https://x/?a&b", "go"));
        assert_eq!(
            message.to_html(),
            "⏰ <b>A &amp; B</b>\n\n🔗 <a href=\"https://x/?a&amp;b\">go</a>\n"
        );
    }

    #[test]
    fn blank_line_is_an_empty_line() {
        assert_eq!(Line::blank(), Line::new());
        assert!(Line::blank().is_blank());
        assert!(!Line::new().text("x").is_blank());
    }
}

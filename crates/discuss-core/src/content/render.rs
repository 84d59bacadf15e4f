//! Basic markdown-to-HTML renderer

use super::Render;

/// Minimal markdown renderer
///
/// HTML-escapes the input, then renders a small inline subset: `**bold**`,
/// `*italic*` and `` `code` ``. Blank lines separate paragraphs. Anything
/// else passes through as escaped plain text, so rendering is total.
#[derive(Debug, Clone, Default)]
pub struct BasicRenderer;

impl BasicRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self
    }
}

impl Render for BasicRenderer {
    fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 16);
        for paragraph in text.split("\n\n").filter(|p| !p.trim().is_empty()) {
            let escaped = escape_html(paragraph.trim());
            let inline = render_inline(&escaped);
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("<p>");
            out.push_str(&inline);
            out.push_str("</p>");
        }
        out
    }
}

/// Escape characters significant to HTML
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_inline(escaped: &str) -> String {
    let bold = apply_span(escaped, "**", "<strong>", "</strong>");
    let italic = apply_span(&bold, "*", "<em>", "</em>");
    apply_span(&italic, "`", "<code>", "</code>")
}

/// Replace non-empty `delim`-delimited spans with `open`/`close` tags
///
/// Unpaired or empty delimiters are left untouched.
fn apply_span(text: &str, delim: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(delim) {
        let after = &rest[start + delim.len()..];
        match after.find(delim) {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(open);
                out.push_str(&after[..end]);
                out.push_str(close);
                rest = &after[end + delim.len()..];
            }
            _ => break,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        BasicRenderer::new().render(text)
    }

    #[test]
    fn test_plain_text_paragraph() {
        assert_eq!(render("hello world"), "<p>hello world</p>");
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            render("some **bold** text"),
            "<p>some <strong>bold</strong> text</p>"
        );
    }

    #[test]
    fn test_italic_and_code() {
        assert_eq!(
            render("an *em* and `code`"),
            "<p>an <em>em</em> and <code>code</code></p>"
        );
    }

    #[test]
    fn test_escapes_html() {
        assert_eq!(
            render("<b>not bold</b> & more"),
            "<p>&lt;b&gt;not bold&lt;/b&gt; &amp; more</p>"
        );
    }

    #[test]
    fn test_paragraph_split() {
        assert_eq!(render("one\n\ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn test_unclosed_markup_degrades_to_text() {
        assert_eq!(render("oops **unclosed"), "<p>oops **unclosed</p>");
        assert_eq!(render("lonely ` tick"), "<p>lonely ` tick</p>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n\n"), "");
    }
}

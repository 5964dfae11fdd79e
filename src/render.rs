//! Plain-text extraction from markdown note content for terminal display.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Strips markdown syntax, keeping the readable text. Used for list
/// previews and the `view` command; styling stays with the caller.
pub fn markdown_to_text(input: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(input) {
        match event {
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => {
                out.push('`');
                out.push_str(&code);
                out.push('`');
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push('\n'),
            Event::Rule => out.push_str("---\n"),
            _ => {}
        }
    }
    out.trim_end().to_string()
}

/// First non-empty line of the extracted text, truncated to `max_len`.
pub fn content_preview(content: &str, max_len: usize) -> String {
    let text = markdown_to_text(content);
    let first_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis_and_headings() {
        let text = markdown_to_text("# Title\n\nSome **bold** and *italic* text.");
        assert_eq!(text, "Title\nSome bold and italic text.");
    }

    #[test]
    fn keeps_inline_code_fenced() {
        assert_eq!(markdown_to_text("run `cargo test` now"), "run `cargo test` now");
    }

    #[test]
    fn renders_list_items_with_bullets() {
        let text = markdown_to_text("- milk\n- eggs");
        assert_eq!(text, "- milk\n- eggs");
    }

    #[test]
    fn preview_takes_the_first_line_and_truncates() {
        assert_eq!(content_preview("first line\nsecond", 20), "first line");
        assert_eq!(content_preview("abcdefghij", 4), "abcd...");
    }
}

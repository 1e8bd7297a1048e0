//! Markdown to HTML conversion.
use crate::{error::RenderError, highlight::highlight_code};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// The extension set shared by every document.
const MARKDOWN_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_FOOTNOTES);

struct CodeBlock {
    language: Option<String>,
    content: String,
}

impl CodeBlock {
    fn new(kind: &CodeBlockKind) -> Self {
        let language = match kind {
            // ```rust,ignore -> rust
            CodeBlockKind::Fenced(info) => info
                .split([' ', ','])
                .next()
                .filter(|lang| !lang.is_empty())
                .map(str::to_string),
            CodeBlockKind::Indented => None,
        };

        Self {
            language,
            content: String::new(),
        }
    }

    fn into_html(self) -> Result<String, RenderError> {
        let highlighted = highlight_code(&self.content, self.language.as_deref())?;
        let opening = match &self.language {
            Some(lang) => format!(
                "<pre class=\"code\" data-language=\"{lang}\"><code class=\"language-{lang}\">"
            ),
            None => String::from("<pre class=\"code\"><code>"),
        };

        Ok(format!("{opening}{highlighted}</code></pre>\n"))
    }
}

/// Renders a Markdown body to HTML.
///
/// Raw HTML in the body is passed through untouched, and code blocks are highlighted
/// with class-based spans styled by [`crate::highlight::extract_css`].
pub fn render(body: &str) -> Result<String, RenderError> {
    let mut events = Vec::new();
    let mut code_block: Option<CodeBlock> = None;

    for event in Parser::new_ext(body, MARKDOWN_OPTIONS) {
        match event {
            Event::Start(Tag::CodeBlock(ref kind)) => {
                code_block = Some(CodeBlock::new(kind));
            }
            Event::Text(ref text) if code_block.is_some() => {
                if let Some(block) = code_block.as_mut() {
                    block.content.push_str(text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = code_block.take() {
                    events.push(Event::Html(block.into_html()?.into()));
                }
            }
            _ => events.push(event),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    Ok(html_output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html() {
        // Arrange
        let markdown_input = "## Hello";
        let expected_html = "<h2>Hello</h2>\n".to_string();

        // Act
        let html_output = render(markdown_input).unwrap();

        // Assert
        assert_eq!(html_output, expected_html);
    }

    #[test]
    fn test_extensions_are_enabled() {
        let markdown_input = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n";

        let html_output = render(markdown_input).unwrap();

        assert!(html_output.contains("<table>"));
        assert!(html_output.contains("<del>gone</del>"));
        assert!(html_output.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let markdown_input = "<div class=\"note\">kept</div>\n";

        let html_output = render(markdown_input).unwrap();

        assert!(html_output.contains("<div class=\"note\">kept</div>"));
    }

    #[test]
    fn test_fenced_code_is_highlighted() {
        let markdown_input = "```rust\nlet x = 1;\n```\n";

        let html_output = render(markdown_input).unwrap();

        assert!(html_output.starts_with("<pre class=\"code\" data-language=\"rust\">"));
        assert!(html_output.contains("<span class=\""));
        assert!(html_output.ends_with("</code></pre>\n"));
    }

    #[test]
    fn test_indented_code_is_wrapped() {
        let markdown_input = "    plain <b>text</b>\n";

        let html_output = render(markdown_input).unwrap();

        assert!(html_output.starts_with("<pre class=\"code\"><code>"));
        assert!(html_output.contains("&lt;b&gt;"));
    }
}

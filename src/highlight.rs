use crate::error::{RenderError, StyleError};
use std::sync::OnceLock;
use syntect::{
    highlighting::ThemeSet,
    html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

/// Theme used for the page stylesheet when neither the CLI nor the document picks one.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

// The renderer emits classes and the stylesheet maps them to colors; both sides must agree.
const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Names of every theme registered in the catalog, sorted.
pub fn theme_names() -> Vec<&'static str> {
    get_theme_set().themes.keys().map(String::as_str).collect()
}

/// Renders the stylesheet for `theme_name`, to be inlined in the page `<style>`.
pub fn extract_css(theme_name: &str) -> Result<String, StyleError> {
    let theme = get_theme_set()
        .themes
        .get(theme_name)
        .ok_or_else(|| StyleError::UnknownTheme {
            name: theme_name.to_string(),
        })?;

    css_for_theme_with_class_style(theme, CLASS_STYLE).map_err(|source| StyleError::Css {
        name: theme_name.to_string(),
        source,
    })
}

/// Highlights a code block as class-annotated spans, without the surrounding `<pre>`.
pub fn highlight_code(content: &str, language: Option<&str>) -> Result<String, RenderError> {
    let ss = get_syntax_set();

    let syntax = language
        .filter(|lang| !lang.is_empty())
        .and_then(|lang| {
            ss.find_syntax_by_token(lang)
                .or_else(|| ss.find_syntax_by_name(lang))
        })
        .or_else(|| ss.find_syntax_by_first_line(content))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, ss, CLASS_STYLE);
    for line in LinesWithEndings::from(content) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|source| RenderError {
                language: language.unwrap_or("plain text").to_string(),
                source,
            })?;
    }

    Ok(generator.finalize())
}

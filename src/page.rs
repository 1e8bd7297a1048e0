use crate::front_matter::Metadata;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::Path;

/// Relative prefix the layout uses to link copied assets.
pub const ASSETS_PATH: &str = "./";

/// Everything the layout template can reference for one document.
#[derive(Debug, Serialize)]
pub struct Page {
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub content: String,
    pub inline_css: String,
    pub inline_js: String,
    pub assets_path: String,
}

impl Page {
    /// Merges parsed metadata with the rendered body and stylesheet.
    ///
    /// An empty or missing title falls back to the file stem of `source`.
    pub fn assemble(source: &Path, metadata: Metadata, content: String, inline_css: String) -> Self {
        let title = metadata
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| {
                source
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });

        Self {
            title,
            description: metadata.description.unwrap_or_default(),
            date: metadata.date,
            content,
            inline_css,
            inline_js: metadata.inline_js.unwrap_or_default(),
            assets_path: ASSETS_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_file_stem() {
        // Arrange
        let metadata = Metadata {
            title: Some(String::new()),
            published: true,
            ..Default::default()
        };

        // Act
        let page = Page::assemble(
            Path::new("src/posts/first-post.md"),
            metadata,
            "<p>hi</p>".into(),
            String::new(),
        );

        // Assert
        assert_eq!(page.title, "first-post");
    }

    #[test]
    fn test_absent_title_falls_back_to_file_stem() {
        let page = Page::assemble(
            Path::new("notes.md"),
            Metadata::default(),
            String::new(),
            String::new(),
        );

        assert_eq!(page.title, "notes");
    }

    #[test]
    fn test_fields_are_carried_over() {
        let metadata = Metadata {
            title: Some("Hi".into()),
            description: Some("About".into()),
            inline_js: Some("alert(1)".into()),
            published: true,
            ..Default::default()
        };

        let page = Page::assemble(
            Path::new("hello.md"),
            metadata,
            "<h1>Hello</h1>".into(),
            ".code {}".into(),
        );

        assert_eq!(page.title, "Hi");
        assert_eq!(page.description, "About");
        assert_eq!(page.content, "<h1>Hello</h1>");
        assert_eq!(page.inline_css, ".code {}");
        assert_eq!(page.inline_js, "alert(1)");
        assert_eq!(page.assets_path, "./");
        assert!(page.date.is_none());
    }
}

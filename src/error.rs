//! Error types for the page pipeline stages.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("Front matter block is missing its closing `---` line")]
    Unterminated,
    #[error("Invalid front matter")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
#[error("Failed to highlight code block (language: {language})")]
pub struct RenderError {
    pub language: String,
    #[source]
    pub source: syntect::Error,
}

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Theme `{name}` is not registered in the highlighting theme catalog")]
    UnknownTheme { name: String },
    #[error("Failed to generate CSS for theme `{name}`")]
    Css {
        name: String,
        #[source]
        source: syntect::Error,
    },
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read layout template: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse layout template: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
    #[error("Failed to render layout template: {path}")]
    Render {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Assets directory does not exist: {0}")]
    Missing(PathBuf),
    #[error("Failed to copy assets from {src} to {dest}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: fs_extra::error::Error,
    },
}

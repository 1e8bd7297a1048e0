use crate::{error::LayoutError, page::Page};
use std::fs;
use std::path::Path;
use tera::{Context as TeraContext, Tera};

const LAYOUT_NAME: &str = "layout.html";

/// Renders `page` into the layout template at `layout_path`.
///
/// The template is read and compiled on every call. It is registered under an `.html`
/// name so Tera autoescapes plain fields; the layout opts trusted fields out with `| safe`.
pub fn render(page: &Page, layout_path: &Path) -> Result<String, LayoutError> {
    let source = fs::read_to_string(layout_path).map_err(|source| LayoutError::Read {
        path: layout_path.to_path_buf(),
        source,
    })?;

    let mut tera = Tera::default();
    tera.add_raw_template(LAYOUT_NAME, &source)
        .map_err(|source| LayoutError::Parse {
            path: layout_path.to_path_buf(),
            source,
        })?;

    let render_error = |source: tera::Error| LayoutError::Render {
        path: layout_path.to_path_buf(),
        source,
    };
    let context = TeraContext::from_serialize(page).map_err(render_error)?;

    tera.render(LAYOUT_NAME, &context).map_err(render_error)
}

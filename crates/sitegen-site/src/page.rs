//! Page generation from a markdown file and an HTML template

use crate::{Result, SiteError, read_file, write_file};
use log::info;
use sitegen_core::{ConvertError, TitleError, extract_title, markdown_to_html};
use std::path::Path;
use thiserror::Error;

/// Template token replaced by the page title
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";

/// Template token replaced by the rendered page body
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Errors rendering a single page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error(transparent)]
    Title(#[from] TitleError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Render a markdown document into a template
///
/// Every title and content placeholder is substituted. The title is the text
/// of the first `# ` heading; a document without one is an error.
pub fn render_page(markdown: &str, template: &str) -> std::result::Result<String, PageError> {
    let title = extract_title(markdown)?;
    let content = markdown_to_html(markdown)?;

    Ok(template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content))
}

/// Generate `dest` from the markdown file `from` and the template file
///
/// Parent directories of `dest` are created as needed.
pub fn generate_page(from: &Path, template_path: &Path, dest: &Path) -> Result<()> {
    info!(
        "Generating page from {} to {} using {}",
        from.display(),
        dest.display(),
        template_path.display()
    );

    let template = read_file(template_path)?;
    generate_page_with_template(from, &template, dest)
}

/// Same as [`generate_page`] with the template already loaded
pub(crate) fn generate_page_with_template(from: &Path, template: &str, dest: &Path) -> Result<()> {
    let markdown = read_file(from)?;
    let html = render_page(&markdown, template).map_err(|source| SiteError::Page {
        file: from.to_path_buf(),
        source,
    })?;
    write_file(dest, &html)
}

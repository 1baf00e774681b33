//! Page layout definitions.

use askama::Template;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vaultsite_core::Page;

/// Placeholders recognised in user templates, substituted in this order
pub const TITLE_PLACEHOLDER: &str = "{PAGE_TITLE}";
pub const HEADER_PLACEHOLDER: &str = "{PAGE_HEADER}";
pub const BODY_PLACEHOLDER: &str = "{MAIN_BODY}";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read template {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render page template: {0}")]
    Template(#[from] askama::Error),
}

/// Built-in page template
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub header: &'a str,
    /// Already-rendered HTML, inserted unescaped
    pub body: &'a str,
}

/// A user template with `{PAGE_TITLE}`, `{PAGE_HEADER}` and `{MAIN_BODY}`
/// placeholders, loaded once per run
#[derive(Debug, Clone)]
pub struct PlaceholderTemplate {
    source: String,
}

impl PlaceholderTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|source| RenderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    /// Substitute title, then header, then body. The body goes last so text
    /// inside it is never treated as a placeholder.
    pub fn render(&self, title: &str, header: &str, body: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(HEADER_PLACEHOLDER, header)
            .replace(BODY_PLACEHOLDER, body)
    }
}

/// How pages are wrapped before being written
#[derive(Debug, Clone)]
pub enum Layout {
    Builtin,
    Placeholder(PlaceholderTemplate),
}

impl Layout {
    /// Load the template at `path`, or fall back to the built-in page
    pub fn from_path(path: Option<&Path>) -> Result<Self, RenderError> {
        match path {
            Some(path) => {
                tracing::info!("Using page template {:?}", path);
                PlaceholderTemplate::from_file(path).map(Layout::Placeholder)
            }
            None => Ok(Layout::Builtin),
        }
    }

    /// Wrap a page in the layout. Title and header are both the page's file stem.
    pub fn render(&self, page: &Page) -> Result<String, RenderError> {
        match self {
            Layout::Builtin => {
                let template = PageTemplate {
                    title: &page.title,
                    header: &page.title,
                    body: &page.content_html,
                };
                Ok(template.render()?)
            }
            Layout::Placeholder(template) => {
                Ok(template.render(&page.title, &page.title, &page.content_html))
            }
        }
    }
}

//! Vault building logic - indexes the vault once, then renders notes one by one.

use crate::{
    index::VaultIndex,
    markdown::{with_line_breaks, LinkError, MarkdownProcessor, WikilinkResolver},
    models::Page,
    vault::{markdown_to_html_path, EntryKind, Vault, VaultEntry},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} is not valid UTF-8")]
    NotUtf8(PathBuf),

    #[error("In {path}: {source}")]
    Link {
        path: String,
        #[source]
        source: LinkError,
    },
}

/// Main vault builder
pub struct VaultBuilder {
    vault: Vault,
    index: VaultIndex,
    processor: MarkdownProcessor,
}

impl VaultBuilder {
    /// Index the vault. The index is never modified afterwards.
    pub fn new(vault: Vault) -> Self {
        let index = VaultIndex::build(&vault);
        Self {
            vault,
            index,
            processor: MarkdownProcessor::new(),
        }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn index(&self) -> &VaultIndex {
        &self.index
    }

    /// Every vault file in traversal order
    pub fn entries(&self) -> impl Iterator<Item = VaultEntry> + '_ {
        self.vault.entries()
    }

    /// Render one document's raw markdown into a page.
    ///
    /// `rel_path` is the note's path relative to the vault's parent; it names
    /// the page and its output file.
    pub fn render_document(&self, rel_path: &str, raw: &str) -> Result<Page, LinkError> {
        let title = Path::new(rel_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let body = with_line_breaks(&raw.replace("\r\n", "\n"));
        let resolver = WikilinkResolver::new(&self.vault, &self.index);
        let content_html = self.processor.convert(&body, &resolver)?;

        tracing::debug!("Rendered: {}", rel_path);

        Ok(Page {
            title,
            rel_path: rel_path.to_string(),
            output_rel_path: markdown_to_html_path(rel_path),
            content_html,
        })
    }

    /// Read and render a note from disk
    pub fn render_page(&self, entry: &VaultEntry) -> Result<Page, BuildError> {
        let bytes = fs::read(&entry.path).map_err(|source| BuildError::Read {
            path: entry.path.clone(),
            source,
        })?;
        let raw = String::from_utf8(bytes).map_err(|_| BuildError::NotUtf8(entry.path.clone()))?;

        self.render_document(&entry.rel_path, &raw)
            .map_err(|source| BuildError::Link {
                path: entry.rel_path.clone(),
                source,
            })
    }

    /// Render every note in traversal order, stopping at the first failure
    pub fn render_all(&self) -> Result<Vec<Page>, BuildError> {
        let pages = self
            .entries()
            .filter(|entry| entry.kind == EntryKind::Note)
            .map(|entry| self.render_page(&entry))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Rendered {} pages", pages.len());

        Ok(pages)
    }
}

//! Content model for rendered pages.

/// A markdown note rendered to an HTML fragment, ready for a layout
#[derive(Debug, Clone)]
pub struct Page {
    /// File stem, used as page title and header
    pub title: String,
    /// Source path relative to the vault's parent (`"Vault/notes/a.md"`)
    pub rel_path: String,
    /// Output path relative to the output directory (`"Vault/notes/a.html"`)
    pub output_rel_path: String,
    pub content_html: String,
}

/// Counts reported at the end of a conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub pages: usize,
    pub assets: usize,
}

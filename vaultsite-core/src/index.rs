//! Flat, read-only index of every file in a vault.
//!
//! Built once per run and only consulted for bare-name wiki-links. Entries
//! keep walk order; the first match in that order wins a lookup.

use crate::vault::Vault;

/// A single file path relative to the vault's parent (`"MyVault/notes/a.md"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile(String);

impl VaultFile {
    pub fn new(rel_path: impl Into<String>) -> Self {
        Self(rel_path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Every vault file in traversal order
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    files: Vec<VaultFile>,
}

impl VaultIndex {
    /// Walk the vault once and record each regular file
    pub fn build(vault: &Vault) -> Self {
        let files: Vec<VaultFile> = vault
            .entries()
            .map(|entry| VaultFile::new(entry.rel_path))
            .collect();

        tracing::info!("Indexed {} files in vault '{}'", files.len(), vault.name());

        Self { files }
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: paths.into_iter().map(VaultFile::new).collect(),
        }
    }

    /// First file whose path ends with `name` or `name.md`.
    ///
    /// This is a plain string suffix test, so `b` also matches `club.md`.
    pub fn find_by_name(&self, name: &str) -> Option<&VaultFile> {
        let with_ext = format!("{name}.md");
        self.files
            .iter()
            .find(|f| f.0.ends_with(name) || f.0.ends_with(&with_ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaultFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

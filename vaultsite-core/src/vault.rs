//! Vault discovery: the root directory, its name, and a pruned walk of its files.

use crate::config::{normalize_path, ConfigError};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use walkdir::WalkDir;

/// What a vault file becomes in the output tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Markdown document, rendered to `.html`
    Note,
    /// Anything else, copied byte-for-byte
    Asset,
}

/// A regular file inside the vault
#[derive(Debug, Clone)]
pub struct VaultEntry {
    /// Absolute (or caller-relative) path on disk
    pub path: PathBuf,
    /// Path relative to the vault's parent, always starting with the vault
    /// name and using `/` as separator
    pub rel_path: String,
    pub kind: EntryKind,
}

impl VaultEntry {
    /// Output path relative to the output directory (`.md` becomes `.html`)
    pub fn output_rel_path(&self) -> String {
        match self.kind {
            EntryKind::Note => markdown_to_html_path(&self.rel_path),
            EntryKind::Asset => self.rel_path.clone(),
        }
    }
}

/// A validated vault root
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    name: String,
    ignore_dirs: Vec<String>,
}

impl Vault {
    /// Validate `path` as a vault root and derive the vault name from it
    pub fn open(path: impl AsRef<Path>, ignore_dirs: Vec<String>) -> Result<Self, ConfigError> {
        let raw = path.as_ref();
        if raw.to_string_lossy().trim().is_empty() {
            return Err(ConfigError::EmptyVaultPath);
        }

        let root = normalize_path(Path::new(raw.to_string_lossy().trim()));
        if !root.is_dir() {
            return Err(ConfigError::InvalidVaultPath(root));
        }

        let name = root
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::UnnamedVault(root.clone()))?;

        tracing::debug!("Opened vault '{}' at {:?}", name, root);

        Ok(Self {
            root,
            name,
            ignore_dirs,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `<vault>/<name>.md` exists as a regular file
    pub fn has_root_note(&self, name: &str) -> bool {
        self.root.join(format!("{name}.md")).is_file()
    }

    /// Walk every regular file, skipping ignored directories.
    ///
    /// Within a folder, files come before subfolders, each group ordered by
    /// name.
    pub fn entries(&self) -> impl Iterator<Item = VaultEntry> + '_ {
        self.walk()
            .filter(|e| e.file_type().is_file())
            .map(move |e| self.entry_for(e.into_path()))
    }

    /// Every folder below the root, as `VaultName/...` paths, parents first
    pub fn folders(&self) -> impl Iterator<Item = String> + '_ {
        self.walk()
            .filter(|e| e.depth() > 0 && e.file_type().is_dir())
            .map(move |e| self.rel_path_for(e.path()))
    }

    fn walk(&self) -> impl Iterator<Item = walkdir::DirEntry> + '_ {
        WalkDir::new(&self.root)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(move |e| {
                // Never prune the root itself, even if it shares an ignored name
                e.depth() == 0
                    || !(e.file_type().is_dir() && self.is_ignored(e.file_name().to_str()))
            })
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable vault entry: {}", err);
                    None
                }
            })
    }

    fn is_ignored(&self, dir_name: Option<&str>) -> bool {
        dir_name.is_some_and(|n| self.ignore_dirs.iter().any(|ignored| ignored == n))
    }

    fn rel_path_for(&self, path: &Path) -> String {
        let within = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace(MAIN_SEPARATOR, "/");
        format!("{}/{}", self.name, within)
    }

    fn entry_for(&self, path: PathBuf) -> VaultEntry {
        let rel_path = self.rel_path_for(&path);

        let kind = if path.extension().is_some_and(|ext| ext == "md") {
            EntryKind::Note
        } else {
            EntryKind::Asset
        };

        VaultEntry {
            path,
            rel_path,
            kind,
        }
    }
}

/// Replace a trailing `.md` extension with `.html`
pub fn markdown_to_html_path(path: &str) -> String {
    match path.strip_suffix(".md") {
        Some(stem) => format!("{stem}.html"),
        None => path.to_string(),
    }
}

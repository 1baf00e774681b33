//! Configuration parsing and validation.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::vault::Vault;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid output directory {0:?}")]
    InvalidOutputDir(PathBuf),

    #[error("Vault path cannot be empty")]
    EmptyVaultPath,

    #[error("Invalid vault path {0:?}")]
    InvalidVaultPath(PathBuf),

    #[error("Cannot determine vault name from path {0:?}")]
    UnnamedVault(PathBuf),
}

/// Main configuration struct matching the vaultsite.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,

    /// Directory names pruned from traversal and output
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_ignore_dirs() -> Vec<String> {
    vec![String::from(".obsidian")]
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub vault: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Page template with `{PAGE_TITLE}`, `{PAGE_HEADER}` and `{MAIN_BODY}`
    /// placeholders. `None` selects the built-in layout.
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Config {
    /// Configuration for a vault/output pair with every other setting defaulted
    pub fn new(vault: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathsConfig {
                vault: vault.into(),
                output: output.into(),
                template: None,
            },
            ignore_dirs: default_ignore_dirs(),
            config_path: None,
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Get the vault directory, resolved relative to config file
    pub fn vault_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.vault)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the template file (None means use built-in)
    pub fn template_path(&self) -> Option<PathBuf> {
        self.paths.template.as_ref().map(|p| self.resolve_path(p))
    }

    /// The output directory, which must already exist
    pub fn checked_output_dir(&self) -> Result<PathBuf, ConfigError> {
        let output = self.output_dir();
        if output.as_os_str().is_empty() || !output.is_dir() {
            return Err(ConfigError::InvalidOutputDir(output));
        }
        Ok(output)
    }

    /// Open the configured vault, validating its path
    pub fn open_vault(&self) -> Result<Vault, ConfigError> {
        // An empty vault entry must not be turned into the config directory
        if self.paths.vault.to_string_lossy().trim().is_empty() {
            return Err(ConfigError::EmptyVaultPath);
        }
        Vault::open(self.vault_dir(), self.ignore_dirs.clone())
    }

    /// Validate output and vault together, output first
    pub fn validate(&self) -> Result<(PathBuf, Vault), ConfigError> {
        let output = self.checked_output_dir()?;
        let vault = self.open_vault()?;
        Ok((output, vault))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

/// Lexically normalize a path: drop `.` segments, fold `name/..` pairs and
/// trailing separators. The filesystem is never consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::new("vault", "site");

        assert_eq!(config.ignore_dirs, vec![".obsidian".to_string()]);
        assert_eq!(config.template_path(), None);
        assert_eq!(config.vault_dir(), PathBuf::from("vault"));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("vaultsite.yml");
        fs::write(
            &config_path,
            "paths:\n  vault: notes/MyVault\n  output: site\n  template: base.html\n",
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.vault_dir(), dir.path().join("notes/MyVault"));
        assert_eq!(config.output_dir(), dir.path().join("site"));
        assert_eq!(config.template_path(), Some(dir.path().join("base.html")));
        assert_eq!(config.ignore_dirs, vec![".obsidian".to_string()]);
    }

    #[test]
    fn test_from_file_rejects_bad_yaml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("vaultsite.yml");
        fs::write(&config_path, "paths: [unclosed").unwrap();

        let err = Config::from_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_output_dir_is_rejected_before_vault() {
        let dir = tempdir().unwrap();
        let config = Config::new("", dir.path().join("does-not-exist"));

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOutputDir(_)));
    }

    #[test]
    fn test_empty_vault_path() {
        let dir = tempdir().unwrap();
        let config = Config::new("   ", dir.path());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVaultPath));
    }

    #[test]
    fn test_vault_must_be_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.md");
        fs::write(&file, "# not a vault").unwrap();
        let config = Config::new(&file, dir.path());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVaultPath(_)));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/")), PathBuf::from("a/b"));
        assert_eq!(normalize_path(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }
}

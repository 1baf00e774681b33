//! CLI command implementations.

pub mod convert;
pub mod verify;

pub use convert::convert_vault;
pub use verify::verify_vault;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vaultsite_core::Config;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "vaultsite.yml";

/// Paths given on the command line; they win over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub vault: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
}

/// Load the config file (explicit or `./vaultsite.yml`) and apply overrides
pub fn load_config(config_path: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let file = match config_path {
        Some(path) => Some(path),
        None if default_path.is_file() => Some(default_path),
        None => None,
    };

    let mut config = match file {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")?
        }
        None => Config::new(PathBuf::new(), PathBuf::from(".")),
    };

    // Command-line paths are relative to the working directory, not the config file
    if let Some(vault) = overrides.vault {
        config.paths.vault = from_cwd(vault);
    }
    if let Some(output) = overrides.output {
        config.paths.output = from_cwd(output);
    }
    if let Some(template) = overrides.template {
        config.paths.template = Some(from_cwd(template));
    }

    Ok(config)
}

fn from_cwd(path: PathBuf) -> PathBuf {
    if path.to_string_lossy().trim().is_empty() {
        return path;
    }
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_overrides_win_over_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.yml");
        fs::write(&config_path, "paths:\n  vault: FromFile\n  output: out\n").unwrap();
        let vault = dir.path().join("FromCli");

        let config = load_config(
            Some(config_path.as_path()),
            Overrides {
                vault: Some(vault.clone()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.vault_dir(), vault);
        assert_eq!(config.output_dir(), dir.path().join("out"));
    }

    #[test]
    fn test_empty_vault_override_is_kept_empty() {
        assert_eq!(from_cwd(PathBuf::from("  ")), PathBuf::from("  "));
    }
}

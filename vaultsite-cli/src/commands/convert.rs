//! Convert command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vaultsite_core::{Config, ConversionSummary, EntryKind, VaultBuilder, VaultEntry};
use vaultsite_render::Layout;

/// Convert the whole vault: render notes into pages and copy everything else.
///
/// Stops at the first failure; files written before it are left in place.
pub fn convert_vault(config: &Config) -> Result<ConversionSummary> {
    // Both paths are checked before anything is read from the vault
    let (output_dir, vault) = config.validate().context("Invalid configuration")?;
    let layout =
        Layout::from_path(config.template_path().as_deref()).context("Failed to load template")?;

    tracing::info!("Converting vault '{}' into {:?}", vault.name(), output_dir);

    let builder = VaultBuilder::new(vault);

    let vault_out = output_dir.join(builder.vault().name());
    fs::create_dir_all(&vault_out).with_context(|| format!("Failed to create {:?}", vault_out))?;
    for folder in builder.vault().folders() {
        let target = output_dir.join(&folder);
        fs::create_dir_all(&target).with_context(|| format!("Failed to create {:?}", target))?;
    }

    let mut summary = ConversionSummary::default();
    for entry in builder.entries() {
        let target = output_dir.join(entry.output_rel_path());

        match entry.kind {
            EntryKind::Note => {
                write_page(&builder, &layout, &entry, &target)?;
                summary.pages += 1;
            }
            EntryKind::Asset => {
                fs::copy(&entry.path, &target).with_context(|| {
                    format!("Failed to copy {:?} to {:?}", entry.path, target)
                })?;
                tracing::debug!("Copied: {}", entry.rel_path);
                summary.assets += 1;
            }
        }
    }

    tracing::info!("✓ Converted {} pages", summary.pages);
    tracing::info!("✓ Copied {} assets", summary.assets);
    tracing::info!("✓ Output written to {:?}", vault_out);

    Ok(summary)
}

fn write_page(
    builder: &VaultBuilder,
    layout: &Layout,
    entry: &VaultEntry,
    target: &Path,
) -> Result<()> {
    let page = builder.render_page(entry)?;
    let html = layout
        .render(&page)
        .with_context(|| format!("Failed to render {}", page.rel_path))?;
    fs::write(target, html).with_context(|| format!("Failed to write {:?}", target))?;
    Ok(())
}

//! Verify that every wiki-link in the vault resolves, without writing output.

use anyhow::{Context, Result};
use serde::Serialize;
use vaultsite_core::{Config, VaultBuilder};

#[derive(Serialize)]
struct VerificationSummary<'a> {
    vault: &'a str,
    files: usize,
    pages: usize,
}

/// Render every note in memory; the first unresolvable link is the error.
pub fn verify_vault(config: &Config, json: bool) -> Result<()> {
    let vault = config.open_vault().context("Invalid configuration")?;
    let builder = VaultBuilder::new(vault);
    let pages = builder
        .render_all()
        .context("Failed to render vault for verification")?;

    let summary = VerificationSummary {
        vault: builder.vault().name(),
        files: builder.index().len(),
        pages: pages.len(),
    };

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        println!(
            "Verification complete: {} pages in {} files, all links resolved",
            summary.pages, summary.files
        );
    }

    Ok(())
}

//! # vaultsite CLI
//!
//! Command-line interface for converting a markdown vault into static HTML.

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vaultsite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to ./vaultsite.yml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
pub struct VaultArgs {
    /// Path to the vault (should end with its name)
    #[arg(short = 'i', long = "in-vault", visible_alias = "in")]
    pub in_vault: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the vault into a tree of HTML pages
    Convert {
        #[command(flatten)]
        vault: VaultArgs,

        /// Existing directory the converted vault folder is written into
        /// [default: current directory]
        #[arg(short = 'o', long = "out-path", visible_alias = "out")]
        out_path: Option<PathBuf>,

        /// Page template with {PAGE_TITLE}, {PAGE_HEADER} and {MAIN_BODY} placeholders
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Render every note in memory and report the first unresolvable link
    Verify {
        #[command(flatten)]
        vault: VaultArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Convert {
            vault,
            out_path,
            template,
        } => {
            let overrides = commands::Overrides {
                vault: vault.in_vault,
                output: out_path,
                template,
            };
            let config = commands::load_config(cli.config.as_deref(), overrides)?;
            commands::convert_vault(&config).map(|_| ())
        }
        Commands::Verify { vault, json } => {
            let overrides = commands::Overrides {
                vault: vault.in_vault,
                ..Default::default()
            };
            let config = commands::load_config(cli.config.as_deref(), overrides)?;
            commands::verify_vault(&config, json)
        }
    }
}

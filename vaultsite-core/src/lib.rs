//! # vaultsite-core
//!
//! Core library for the vaultsite exporter.
//!
//! This crate turns a vault of interlinked markdown notes into HTML
//! fragments: it validates configuration, indexes the vault, transpiles
//! markdown through an ordered rule table and resolves `[[wiki-links]]`.

pub mod builder;
pub mod config;
pub mod index;
pub mod markdown;
pub mod models;
pub mod vault;

pub use builder::{BuildError, VaultBuilder};
pub use config::{Config, ConfigError};
pub use index::{VaultFile, VaultIndex};
pub use markdown::{LinkError, MarkdownProcessor};
pub use models::{ConversionSummary, Page};
pub use vault::{EntryKind, Vault, VaultEntry};

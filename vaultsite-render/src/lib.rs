//! # vaultsite-render
//!
//! Page layouts for vaultsite.
//!
//! A rendered note fragment is wrapped either in the built-in Askama page or
//! in a user-supplied placeholder template.

pub mod templates;

pub use templates::{Layout, PageTemplate, PlaceholderTemplate, RenderError};

//! Wikilink resolution for [[target]] and [[target|text]] syntax.

use crate::index::VaultIndex;
use crate::vault::{markdown_to_html_path, Vault};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::HashSet;
use std::path::MAIN_SEPARATOR;
use thiserror::Error;

static WIKILINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[.+?\]\]").expect("wikilink pattern must compile"));

/// Characters left as-is in generated hrefs: unreserved URL characters and `/`
const HREF_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Could not resolve link {token}: no file named '{target}' in the vault")]
    Unresolved { token: String, target: String },
}

/// One `[[...]]` occurrence, borrowed from the document body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkToken<'a> {
    /// The exact bracketed text, used for replacement
    pub raw: &'a str,
    pub target: &'a str,
    pub display: &'a str,
}

impl<'a> LinkToken<'a> {
    /// Parse a `[[...]]` span. The display text is everything after the first
    /// `|`, or the last path segment of the target.
    pub fn parse(raw: &'a str) -> Self {
        let inner = raw
            .strip_prefix("[[")
            .and_then(|s| s.strip_suffix("]]"))
            .unwrap_or(raw);

        let (target, display) = match inner.split_once('|') {
            Some((target, display)) => (target, display),
            None => {
                let display = inner
                    .rfind(is_separator)
                    .map(|pos| &inner[pos + 1..])
                    .unwrap_or(inner);
                (inner, display)
            }
        };

        Self {
            raw,
            target,
            display,
        }
    }

    /// Whether the target is a vault-rooted path rather than a bare name
    pub fn has_path(&self) -> bool {
        self.target.contains(is_separator)
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Every distinct `[[...]]` token in `body`, in order of first appearance
pub fn find_tokens(body: &str) -> Vec<LinkToken<'_>> {
    let mut seen = HashSet::new();
    WIKILINK_REGEX
        .find_iter(body)
        .map(|m| m.as_str())
        .filter(|raw| seen.insert(*raw))
        .map(LinkToken::parse)
        .collect()
}

/// Resolver for wikilink syntax against one vault
pub struct WikilinkResolver<'a> {
    vault: &'a Vault,
    index: &'a VaultIndex,
}

impl<'a> WikilinkResolver<'a> {
    pub fn new(vault: &'a Vault, index: &'a VaultIndex) -> Self {
        Self { vault, index }
    }

    /// Replace every wikilink in `body` with an anchor tag.
    ///
    /// Fails on the first bare name that matches no file in the vault.
    pub fn resolve(&self, body: &str) -> Result<String, LinkError> {
        let mut output = body.to_string();

        for token in find_tokens(body) {
            tracing::debug!("Resolving internal link {}", token.raw);
            let href = self.href_for(&token)?;
            let anchor = format!(r#"<a href="{}">{}</a>"#, href, token.display);
            output = output.replace(token.raw, &anchor);
        }

        Ok(output)
    }

    /// Site-absolute URL for a token
    pub fn href_for(&self, token: &LinkToken<'_>) -> Result<String, LinkError> {
        // Full path, or a note sitting directly in the vault root
        if token.has_path() || self.vault.has_root_note(token.target) {
            let target = token.target.replace(MAIN_SEPARATOR, "/");
            return Ok(encode_href(&format!(
                "{}/{}.html",
                self.vault.name(),
                target
            )));
        }

        // Bare name somewhere deeper in the vault
        match self.index.find_by_name(token.target) {
            Some(file) => Ok(encode_href(&markdown_to_html_path(file.as_str()))),
            None => Err(LinkError::Unresolved {
                token: token.raw.to_string(),
                target: token.target.to_string(),
            }),
        }
    }
}

fn encode_href(path: &str) -> String {
    format!("/{}", utf8_percent_encode(path, HREF_SAFE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn fixture() -> (tempfile::TempDir, Vault, VaultIndex) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("VaultName");
        fs::create_dir_all(root.join("notes/sub")).unwrap();
        fs::write(root.join("notes/a.md"), "").unwrap();
        fs::write(root.join("notes/sub/b.md"), "").unwrap();
        fs::write(root.join("notes/sub/My Page.md"), "").unwrap();
        fs::write(root.join("c.md"), "").unwrap();

        let vault = Vault::open(&root, vec![]).unwrap();
        let index = VaultIndex::build(&vault);
        (dir, vault, index)
    }

    #[test]
    fn test_parse_plain_and_display_forms() {
        let token = LinkToken::parse("[[notes/sub/b]]");
        assert_eq!(token.target, "notes/sub/b");
        assert_eq!(token.display, "b");
        assert!(token.has_path());

        let token = LinkToken::parse("[[b|My Note]]");
        assert_eq!(token.target, "b");
        assert_eq!(token.display, "My Note");
        assert!(!token.has_path());

        let token = LinkToken::parse("[[x|a|b]]");
        assert_eq!(token.target, "x");
        assert_eq!(token.display, "a|b");
    }

    #[test]
    fn test_find_tokens_dedupes_in_order() {
        let tokens = find_tokens("[[b]] then [[a]] and [[b]] again [[a|A]]");
        let raws: Vec<_> = tokens.iter().map(|t| t.raw).collect();
        assert_eq!(raws, vec!["[[b]]", "[[a]]", "[[a|A]]"]);
    }

    #[test]
    fn test_full_path_link() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        assert_eq!(
            resolver.resolve("[[notes/sub/b]]").unwrap(),
            r#"<a href="/VaultName/notes/sub/b.html">b</a>"#
        );
    }

    #[test]
    fn test_root_level_link() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        assert_eq!(
            resolver.resolve("[[c]]").unwrap(),
            r#"<a href="/VaultName/c.html">c</a>"#
        );
    }

    #[test]
    fn test_bare_name_with_display_text() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        assert_eq!(
            resolver.resolve("[[b|My Note]]").unwrap(),
            r#"<a href="/VaultName/notes/sub/b.html">My Note</a>"#
        );
    }

    #[test]
    fn test_hrefs_are_percent_encoded() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        assert_eq!(
            resolver.resolve("[[My Page]]").unwrap(),
            r#"<a href="/VaultName/notes/sub/My%20Page.html">My Page</a>"#
        );
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        let html = resolver.resolve("[[a]]<br>\nsee [[a]] twice").unwrap();
        assert_eq!(html.matches(r#"<a href="/VaultName/notes/a.html">a</a>"#).count(), 2);
        assert!(!html.contains("[["));
    }

    #[test]
    fn test_missing_link_is_an_error() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        let err = resolver.resolve("ok [[c]] but [[missing]]").unwrap_err();
        let LinkError::Unresolved { token, target } = &err;
        assert_eq!(token, "[[missing]]");
        assert_eq!(target, "missing");
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_body_without_links_is_unchanged() {
        let (_dir, vault, index) = fixture();
        let resolver = WikilinkResolver::new(&vault, &index);

        assert_eq!(resolver.resolve("[single] text").unwrap(), "[single] text");
    }
}

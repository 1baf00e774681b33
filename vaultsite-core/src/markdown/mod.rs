//! Markdown processing pipeline: rule-table transpiling, then wikilink resolution.

pub mod rules;
pub mod wikilinks;

pub use rules::{transpile, MatchMode, SubstitutionRule, Transpiler, RULES};
pub use wikilinks::{find_tokens, LinkError, LinkToken, WikilinkResolver};

/// Turn every line break into `<br>` followed by a newline so plain text keeps
/// its visible breaks in HTML
pub fn with_line_breaks(raw: &str) -> String {
    raw.replace('\n', "<br>\n")
}

/// Markdown processor: transpile first, resolve links second
pub struct MarkdownProcessor {
    transpiler: &'static Transpiler,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self {
            transpiler: Transpiler::builtin(),
        }
    }

    /// Convert a line-broken body to an HTML fragment.
    ///
    /// Links are resolved on the transpiled text, after newlines have been
    /// normalized by the rule table.
    pub fn convert(
        &self,
        body: &str,
        resolver: &WikilinkResolver<'_>,
    ) -> Result<String, LinkError> {
        let html = self.transpiler.transpile(body);
        resolver.resolve(&html)
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::VaultIndex;
    use crate::vault::Vault;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_with_line_breaks() {
        assert_eq!(with_line_breaks("a\nb\n"), "a<br>\nb<br>\n");
        assert_eq!(with_line_breaks("no breaks"), "no breaks");
    }

    #[test]
    fn test_convert_runs_both_stages() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("Notes");
        fs::create_dir_all(root.join("deep")).unwrap();
        fs::write(root.join("deep/target.md"), "").unwrap();
        let vault = Vault::open(&root, vec![]).unwrap();
        let index = VaultIndex::build(&vault);
        let resolver = WikilinkResolver::new(&vault, &index);

        let body = with_line_breaks("# Title\n**see** [[target]]");
        let html = MarkdownProcessor::new().convert(&body, &resolver).unwrap();

        assert_eq!(
            html,
            "<h1>Title<br></h1>\n<b>see</b> <a href=\"/Notes/deep/target.html\">target</a>"
        );
    }

    #[test]
    fn test_convert_propagates_link_errors() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("Notes");
        fs::create_dir_all(&root).unwrap();
        let vault = Vault::open(&root, vec![]).unwrap();
        let index = VaultIndex::build(&vault);
        let resolver = WikilinkResolver::new(&vault, &index);

        let result = MarkdownProcessor::new().convert("[[nowhere]]", &resolver);
        assert!(matches!(result, Err(LinkError::Unresolved { .. })));
    }
}

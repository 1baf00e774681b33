//! Markdown to HTML as an ordered table of regex substitutions.
//!
//! Each rule rewrites the whole output of the previous one, so the table
//! order is part of the output format. Bodies reach this stage with every
//! line break already turned into `<br>\n` (see [`super::with_line_breaks`]).

use once_cell::sync::Lazy;
use regex::Regex;

/// How a rule's pattern treats `^` and `$`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Anywhere in the buffer
    Global,
    /// `^`/`$` match at every line boundary
    Multiline,
}

/// A single pattern/replacement pair
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionRule {
    pub name: &'static str,
    pub pattern: &'static str,
    /// Replacement in `regex` syntax (`${1}` for the first group)
    pub replacement: &'static str,
    pub mode: MatchMode,
}

const fn rule(
    name: &'static str,
    pattern: &'static str,
    replacement: &'static str,
    mode: MatchMode,
) -> SubstitutionRule {
    SubstitutionRule {
        name,
        pattern,
        replacement,
        mode,
    }
}

use MatchMode::{Global, Multiline};

const UL_OPEN: &str = "\n<ul style=\"list-style-type:disc;\">${1}\n</ul>\n";
const OL_OPEN: &str = "\n<ol type=\"1\">${1}\n</ol>\n";
const LI: &str = "\n  <li>${1}</li>";

/// The transpiler program, in application order
pub const RULES: &[SubstitutionRule] = &[
    rule("paragraph", r"\n\n", "\n</p>\n\n<p>\n", Global),
    rule("h1", r"^# (.*)$", "<h1>${1}</h1>", Multiline),
    rule("h2", r"^## (.*)$", "<h2>${1}</h2>", Multiline),
    rule("h3", r"^### (.*)$", "<h3>${1}</h3>", Multiline),
    rule("h4", r"^#### (.*)$", "<h4>${1}</h4>", Multiline),
    rule("h5", r"^##### (.*)$", "<h5>${1}</h5>", Multiline),
    rule("h6", r"^###### (.*)$", "<h6>${1}</h6>", Multiline),
    rule("bold-asterisk", r"\*\*(.*?)\*\*", "<b>${1}</b>", Global),
    rule("bold-underscore", r"__(.*?)__", "<b>${1}</b>", Global),
    rule("italic-asterisk", r"\* \*(.*?)\* \*", "<i>${1}</i>", Global),
    rule("italic-underscore", r"_ _(.*?)_ _", "<i>${1}</i>", Global),
    rule("strikethrough", r"~~(.*?)~~", "<del>${1}</del>", Global),
    rule("highlight", r"==(.*?)==", "<mark>${1}</mark>", Global),
    // The bold rules above have already turned `***x***` into `<b>*x</b>*`
    rule(
        "bold-italic-asterisk",
        r"<b>\*(.*?)</b>\*",
        "<b><i>${1}</i></b>",
        Global,
    ),
    rule(
        "bold-italic-underscore",
        r"<b>_(.*?)</b>_",
        "<b><i>${1}</i></b>",
        Global,
    ),
    rule(
        "external-link",
        r"\[(.*?)\]\((.*?)\)",
        "<a target=\"_blank\" href=\"${2}\">${1}</a>",
        Global,
    ),
    rule("ul-dash", r"(\n- .*(?:\n- .*)*)", UL_OPEN, Global),
    rule("ul-plus", r"(\n\+ .*(?:\n\+ .*)*)", UL_OPEN, Global),
    rule("ul-asterisk", r"(\n\* .*(?:\n\* .*)*)", UL_OPEN, Global),
    rule("ol-dot", r"(\n[0-9]+\. .*(?:\n[0-9]+\. .*)*)", OL_OPEN, Global),
    rule("ol-paren", r"(\n[0-9]+\) .*(?:\n[0-9]+\) .*)*)", OL_OPEN, Global),
    rule("li-dash", r"\n- (.*)", LI, Global),
    rule("li-plus", r"\n\+ (.*)", LI, Global),
    rule("li-asterisk", r"\n\* (.*)", LI, Global),
    rule("li-dot", r"\n[0-9]+\. (.*)", LI, Global),
    rule("li-paren", r"\n[0-9]+\) (.*)", LI, Global),
    rule(
        "horizontal-rule",
        r"^(?:\*{3,}|_{3,}|-{3,})(?:<br>)?$",
        "\n  </p>\n<hr>\n<p>",
        Multiline,
    ),
];

struct CompiledRule {
    rule: SubstitutionRule,
    regex: Regex,
}

/// A compiled rule table, applied as a fold over the document
pub struct Transpiler {
    rules: Vec<CompiledRule>,
}

static DEFAULT: Lazy<Transpiler> =
    Lazy::new(|| Transpiler::new(RULES).expect("built-in markdown rules must compile"));

impl Transpiler {
    /// Compile a rule table, preserving its order
    pub fn new(rules: &[SubstitutionRule]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| {
                let pattern = match rule.mode {
                    Global => rule.pattern.to_string(),
                    Multiline => format!("(?m){}", rule.pattern),
                };
                Regex::new(&pattern).map(|regex| CompiledRule { rule: *rule, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The shared transpiler built from [`RULES`]
    pub fn builtin() -> &'static Transpiler {
        &DEFAULT
    }

    /// Rule names in application order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|c| c.rule.name)
    }

    /// Apply every rule in order. Text without markdown passes through as-is.
    pub fn transpile(&self, body: &str) -> String {
        self.rules.iter().fold(body.to_string(), |text, compiled| {
            compiled
                .regex
                .replace_all(&text, compiled.rule.replacement)
                .into_owned()
        })
    }
}

/// Transpile with the built-in rule table
pub fn transpile(body: &str) -> String {
    Transpiler::builtin().transpile(body)
}

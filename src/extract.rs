//! Class extraction from raw stylesheet text.
//!
//! Scans for `.class-name <decoration> { … }` rules with a regex — no CSS
//! AST, no cascade resolution. Bootstrap's published stylesheets are flat
//! and well-formed, so a selector/declaration-block scan is sufficient; the
//! regex is an implementation detail behind [`extract_classes`] and can be
//! swapped for a real parser without touching callers.

use std::collections::HashSet;

use regex::Regex;

use crate::{Catalog, CssClass};

/// Matches a dot, a class token, optional selector decoration (pseudo
/// classes, combinators, attribute selectors — anything up to the brace),
/// and the brace-delimited declaration block.
const CLASS_RULE_PATTERN: &str = r"\.([A-Za-z0-9_-]+)([^{]*?)\s*\{([^}]*)\}";

/// Extract an ordered, deduplicated class catalog from raw CSS text.
///
/// Duplicate rules for one class name keep the first occurrence in source
/// order; later matches are skipped entirely, not merged. This function
/// never fails: any internal error yields an empty catalog, which consumers
/// treat as "no suggestions available". Malformed CSS (unbalanced braces)
/// degrades to partial or zero matches for the unparseable region.
pub fn extract_classes(css: &str) -> Catalog {
    let Ok(rule_re) = Regex::new(CLASS_RULE_PATTERN) else {
        return Catalog::new();
    };
    // Compiled once per extraction, not once per matched rule — a full
    // Bootstrap stylesheet has thousands of rules.
    let reformat = ReformatPatterns::new();

    let mut seen: HashSet<String> = HashSet::new();
    let mut classes: Vec<CssClass> = Vec::new();

    for cap in rule_re.captures_iter(css) {
        let class_name = &cap[1];
        if !seen.insert(class_name.to_string()) {
            continue;
        }

        let raw_rule = cap.get(0).map(|m| m.as_str()).unwrap_or_default();
        classes.push(CssClass {
            class_name: class_name.to_string(),
            declaration: reformat_declaration(&reformat, raw_rule),
        });
    }

    Catalog::from(classes)
}

struct ReformatPatterns {
    open: Option<Regex>,
    semi: Option<Regex>,
    close: Option<Regex>,
}

impl ReformatPatterns {
    fn new() -> Self {
        Self {
            open: Regex::new(r"\s*\{\s*").ok(),
            semi: Regex::new(r";\s*").ok(),
            close: Regex::new(r"\s*\}\s*$").ok(),
        }
    }
}

/// Pretty-print a matched rule: opening brace on the selector line, each
/// semicolon-terminated property on its own two-space-indented line, closing
/// brace alone on the last line. If any pattern failed to build, the raw
/// match passes through untouched.
fn reformat_declaration(patterns: &ReformatPatterns, raw_rule: &str) -> String {
    let (Some(open_re), Some(semi_re), Some(close_re)) =
        (&patterns.open, &patterns.semi, &patterns.close)
    else {
        return raw_rule.to_string();
    };

    let text = open_re.replace(raw_rule, " {\n  ");
    let text = semi_re.replace_all(&text, ";\n  ");
    close_re.replace(&text, "\n}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_classes_in_source_order() {
        let css = ".btn { color: red; }\n.btn-primary { color: blue; }\n.container { width: 100%; }";
        let catalog = extract_classes(css);

        let names: Vec<&str> = catalog.iter().map(|c| c.class_name.as_str()).collect();
        assert_eq!(names, vec!["btn", "btn-primary", "container"]);
    }

    #[test]
    fn reformats_declaration_block() {
        let catalog = extract_classes(".btn { color: red; }");
        assert_eq!(
            catalog.find("btn").unwrap().declaration,
            ".btn {\n  color: red;\n}"
        );
    }

    #[test]
    fn multiple_properties_one_per_line() {
        let catalog = extract_classes(".card { display: block; border: 1px solid; }");
        assert_eq!(
            catalog.find("card").unwrap().declaration,
            ".card {\n  display: block;\n  border: 1px solid;\n}"
        );
    }

    #[test]
    fn first_rule_wins_on_duplicate_names() {
        let css = ".btn { color: red; }\n.btn { color: green; }";
        let catalog = extract_classes(css);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("btn").unwrap().declaration.contains("red"));
    }

    #[test]
    fn keeps_selector_decoration() {
        let css = ".btn:hover { color: red; }";
        let catalog = extract_classes(css);

        let class = catalog.find("btn").unwrap();
        assert!(class.declaration.starts_with(".btn:hover {"));
    }

    #[test]
    fn extraction_is_deterministic() {
        let css = ".a { x: 1; }\n.b { y: 2; }\n.a { x: 3; }";
        assert_eq!(extract_classes(css), extract_classes(css));
    }

    #[test]
    fn empty_input_yields_empty_catalog() {
        assert!(extract_classes("").is_empty());
    }

    #[test]
    fn malformed_css_degrades_to_partial_matches() {
        // The unclosed block swallows the rest of the region; earlier rules
        // still extract.
        let css = ".ok { color: red; }\n.broken { color: blue;";
        let catalog = extract_classes(css);

        assert!(catalog.find("ok").is_some());
        assert!(catalog.find("broken").is_none());
    }

    #[test]
    fn non_class_selectors_are_ignored() {
        let css = "body { margin: 0; }\n#app { display: flex; }\n.real { color: red; }";
        let catalog = extract_classes(css);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("real").is_some());
    }

    #[test]
    fn large_stylesheet_extracts_every_rule() {
        let mut css = String::new();
        for i in 0..2000 {
            css.push_str(&format!(".rule-{i} {{ order: {i}; }}\n"));
        }

        let catalog = extract_classes(&css);
        assert_eq!(catalog.len(), 2000);
        assert_eq!(
            catalog.find("rule-1999").unwrap().declaration,
            ".rule-1999 {\n  order: 1999;\n}"
        );
    }

    #[test]
    fn multiline_rules_extract() {
        let css = ".btn {\n  color: red;\n  border: none;\n}";
        let catalog = extract_classes(css);
        assert_eq!(
            catalog.find("btn").unwrap().declaration,
            ".btn {\n  color: red;\n  border: none;\n}"
        );
    }
}

//! Ranking policy: class categories, canonical ordering, and completion
//! filtering.
//!
//! The same ordering drives two consumers: completion `sortText` keys (so
//! the editor's native sort groups suggestions by category, then
//! alphabetically) and the formatter's canonical class-attribute order.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Catalog, CssClass};

// ---------------------------------------------------------------------------
// ClassCategory
// ---------------------------------------------------------------------------

/// Priority bucket of a class name, used only for ordering. Computed on
/// demand from the name; never stored or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassCategory {
    Layout,
    Components,
    Utilities,
    Other,
}

impl ClassCategory {
    /// Numeric rank; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            ClassCategory::Layout => 1,
            ClassCategory::Components => 2,
            ClassCategory::Utilities => 3,
            ClassCategory::Other => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassCategory::Layout => "layout",
            ClassCategory::Components => "components",
            ClassCategory::Utilities => "utilities",
            ClassCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ClassCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Category patterns, evaluated in order; first match wins. `align` and
// `justify` intentionally have no trailing dash (matches e.g.
// `align-items-center` and bare `justify-content-*` alike).
static LAYOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(container|row|col|grid|flex|d-|order-|offset-|g-)").unwrap()
});
static COMPONENTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(btn|card|nav|navbar|modal|form|input|dropdown|alert|badge|list|table)").unwrap()
});
static UTILITIES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(m-|p-|text-|bg-|border|rounded|shadow|w-|h-|position-|float-|align|justify)")
        .unwrap()
});

/// Assign the priority bucket for a class name.
pub fn categorize(class_name: &str) -> ClassCategory {
    if LAYOUT_RE.is_match(class_name) {
        ClassCategory::Layout
    } else if COMPONENTS_RE.is_match(class_name) {
        ClassCategory::Components
    } else if UTILITIES_RE.is_match(class_name) {
        ClassCategory::Utilities
    } else {
        ClassCategory::Other
    }
}

// ---------------------------------------------------------------------------
// Canonical ordering
// ---------------------------------------------------------------------------

/// Canonical comparison: category rank first, then the class name.
pub fn canonical_order(a: &str, b: &str) -> Ordering {
    categorize(a)
        .cmp(&categorize(b))
        .then_with(|| a.cmp(b))
}

/// Sort key for the host editor's completion list, shaped so that a plain
/// string sort yields the canonical order (e.g. `1-layout-container`).
pub fn sort_key(class_name: &str) -> String {
    let category = categorize(class_name);
    format!("{}-{}-{}", category.rank(), category.label(), class_name)
}

/// Return the names in canonical order. Duplicates are preserved; the
/// formatter deduplicates before ordering.
pub fn rank_classes<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    sorted.sort_by(|a, b| canonical_order(a, b));
    sorted
}

// ---------------------------------------------------------------------------
// Completion context
// ---------------------------------------------------------------------------

// Trailing-anchor matches on the line prefix before the cursor; the whole
// document is never parsed.
static COMPLETION_CONTEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class(?:Name)?=["']?[^"']*$"#).unwrap());
static OPEN_ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class(?:Name)?=["']([^"']*)$"#).unwrap());
static CLASS_ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class(?:Name)?=["'][^"']*$"#).unwrap());

/// Whether completions should be offered at this cursor position: the text
/// before the cursor ends inside an open (still unterminated) `class=` or
/// `className=` attribute value.
pub fn should_complete(line_prefix: &str) -> bool {
    COMPLETION_CONTEXT_RE.is_match(line_prefix)
}

/// Whether the position sits inside an open, quoted class-attribute value
/// (hover path; stricter than [`should_complete`], which also fires right
/// after the `=`).
pub fn in_class_attribute(line_prefix: &str) -> bool {
    CLASS_ATTRIBUTE_RE.is_match(line_prefix)
}

/// Class names already present in the open attribute value before the
/// cursor. These are excluded from candidates to avoid duplicate insertion.
pub fn used_classes(line_prefix: &str) -> Vec<&str> {
    OPEN_ATTRIBUTE_RE
        .captures(line_prefix)
        .and_then(|cap| cap.get(1))
        .map(|value| value.as_str().split_whitespace().collect())
        .unwrap_or_default()
}

/// Completion candidates for a cursor position: the catalog filtered by the
/// attribute's already-used names, in canonical order. Empty when the
/// position is not inside an open class attribute.
pub fn completion_candidates<'a>(catalog: &'a Catalog, line_prefix: &str) -> Vec<&'a CssClass> {
    if !should_complete(line_prefix) {
        return Vec::new();
    }

    let used: HashSet<&str> = used_classes(line_prefix).into_iter().collect();
    let mut candidates: Vec<&CssClass> = catalog
        .iter()
        .filter(|c| !used.contains(c.class_name.as_str()))
        .collect();
    candidates.sort_by(|a, b| canonical_order(&a.class_name, &b.class_name));
    candidates
}

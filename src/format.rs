//! Formatting policy: rewrite class-attribute contents into canonical order.
//!
//! Works line by line over `class="…"` / `className='…'` occurrences: split
//! the value on whitespace, drop duplicates (first occurrence wins), sort
//! canonically, rejoin with single spaces. An edit is emitted only when the
//! result differs from the original, preserving the original quote
//! character and attribute spelling.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::rank::canonical_order;

static CLASS_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class(?:Name)?=["']([^"']*)["']"#).unwrap());

/// One replacement within a document. `start`/`end` are byte offsets into
/// the line, spanning the whole attribute (`class="…"` inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Canonicalize one attribute value: whitespace-split, trim, first-wins
/// dedup, canonical sort, single-space rejoin.
pub fn sort_class_list(value: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tokens: Vec<&str> = value
        .split_whitespace()
        .filter(|token| seen.insert(*token))
        .collect();
    tokens.sort_by(|a, b| canonical_order(a, b));
    tokens.join(" ")
}

/// Edits for every class attribute on one line whose value is not already
/// canonical.
pub fn format_line(line_index: usize, line: &str) -> Vec<Edit> {
    let mut edits = Vec::new();

    for cap in CLASS_ATTR_RE.captures_iter(line) {
        let Some(full) = cap.get(0) else { continue };
        let value = &cap[1];
        let sorted = sort_class_list(value);
        if sorted == value {
            continue;
        }

        let quote = if full.as_str().contains('"') { '"' } else { '\'' };
        let attr_name = if full.as_str().starts_with("class=") {
            "class"
        } else {
            "className"
        };

        edits.push(Edit {
            line: line_index,
            start: full.start(),
            end: full.end(),
            replacement: format!("{attr_name}={quote}{sorted}{quote}"),
        });
    }

    edits
}

/// Edits for a whole document.
pub fn format_text(text: &str) -> Vec<Edit> {
    text.lines()
        .enumerate()
        .flat_map(|(i, line)| format_line(i, line))
        .collect()
}

/// Apply edits produced by [`format_text`] to a document. Hosts apply
/// edits through their own document APIs; this is the standalone
/// equivalent. Bytes outside the edit spans pass through untouched —
/// CR/LF terminators and a trailing newline survive as-is.
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    // Splitting on '\n' keeps any '\r' at the segment end; edit offsets
    // were computed on terminator-stripped lines, so they always land
    // before it.
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    // Right-to-left within a line keeps earlier offsets valid.
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by(|a, b| (b.line, b.start).cmp(&(a.line, a.start)));

    for edit in ordered {
        if let Some(line) = lines.get_mut(edit.line) {
            line.replace_range(edit.start..edit.end, &edit.replacement);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sorts_layout_before_components_before_utilities() {
        assert_eq!(
            sort_class_list("text-bold btn container"),
            "container btn text-bold"
        );
    }

    #[test]
    fn dedups_first_occurrence_wins() {
        assert_eq!(sort_class_list("btn btn btn-primary btn"), "btn btn-primary");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sort_class_list("  btn   container  "), "container btn");
    }

    #[test]
    fn no_edit_for_canonical_value() {
        let line = r#"<div class="container btn text-bold">"#;
        assert!(format_line(0, line).is_empty());
    }

    #[test]
    fn rewrites_unsorted_attribute() {
        let line = r#"<div class="text-bold btn container">"#;
        let edits = format_line(0, line);

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].replacement, r#"class="container btn text-bold""#);
        assert_eq!(&line[edits[0].start..edits[0].end], r#"class="text-bold btn container""#);
    }

    #[test]
    fn preserves_single_quotes() {
        let edits = format_line(0, "<div class='btn container'>");
        assert_eq!(edits[0].replacement, "class='container btn'");
    }

    #[test]
    fn preserves_class_name_spelling() {
        let edits = format_line(0, r#"<Button className="text-bold btn" />"#);
        assert_eq!(edits[0].replacement, r#"className="btn text-bold""#);
    }

    #[test]
    fn handles_multiple_attributes_per_line() {
        let line = r#"<div class="m-3 row"><span class="badge d-flex"></span></div>"#;
        let edits = format_line(0, line);

        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].replacement, r#"class="row m-3""#);
        assert_eq!(edits[1].replacement, r#"class="d-flex badge""#);
    }

    #[test]
    fn format_text_spans_lines() {
        let text = "<div class=\"btn container\">\n<p class=\"container btn\">";
        let edits = format_text(text);

        // Line 0 needs sorting, line 1 is already canonical.
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].line, 0);
    }

    #[test]
    fn apply_edits_round_trip() {
        let text = r#"<div class="text-bold btn container"><span class='row m-1 badge'></span>"#;
        let formatted = apply_edits(text, &format_text(text));
        assert_eq!(
            formatted,
            r#"<div class="container btn text-bold"><span class='row badge m-1'></span>"#
        );
    }

    #[test]
    fn apply_edits_preserves_trailing_newline() {
        let text = "<div class=\"btn container\">\n";
        let formatted = apply_edits(text, &format_text(text));
        assert_eq!(formatted, "<div class=\"container btn\">\n");
    }

    #[test]
    fn apply_edits_preserves_crlf_terminators() {
        let text = "<div class=\"btn container\">\r\n<p class=\"m-1 row\">\r\n";
        let formatted = apply_edits(text, &format_text(text));
        assert_eq!(
            formatted,
            "<div class=\"container btn\">\r\n<p class=\"row m-1\">\r\n"
        );
    }

    #[test]
    fn apply_edits_with_no_edits_is_identity() {
        let text = "line one\r\nline two\n\nno attributes here";
        assert_eq!(apply_edits(text, &[]), text);
    }

    #[test]
    fn formatter_is_idempotent() {
        let text = r#"<div class="text-bold btn container">"#;
        let once = apply_edits(text, &format_text(text));
        assert!(format_text(&once).is_empty());
        assert_eq!(apply_edits(&once, &format_text(&once)), once);
    }
}

//! Checklist line parsing and rewriting
//!
//! A checklist line references one pull request and carries a checkable
//! box: `* [ ] #123 Some title @author` (bullet `-` or `*`, box `x` when
//! checked). Anything after the identifier is opaque label text and is
//! preserved verbatim by every rewrite in this module. Lines that do not
//! match the pattern are not checklist lines and are left alone by the
//! reconciler.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// `* [x] #123 ...` — a checked checklist line. Group 1 is everything up
/// to the box, group 2 everything after it, group 3 the PR number.
fn checked_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*[-*]\s*)\[\s*x\s*\](\s*#(\d+).*)$").unwrap())
}

/// `* [ ] #123 ...` — a pending (unchecked) checklist line. The box holds
/// exactly one space; that is the canonical form freshly rendered bodies
/// use.
fn pending_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*[-*]\s*)\[ \](\s*#(\d+).*)$").unwrap())
}

/// Collect the PR numbers of all checked checklist lines in `text`.
pub fn checked_numbers(text: &str) -> HashSet<u64> {
    text.lines()
        .filter_map(|line| checked_number(line))
        .collect()
}

/// The PR number of `line` if it is a checked checklist line.
pub fn checked_number(line: &str) -> Option<u64> {
    let captures = checked_re().captures(line)?;
    captures[3].parse().ok()
}

/// The PR number of `line` if it is a pending checklist line.
pub fn pending_number(line: &str) -> Option<u64> {
    let captures = pending_re().captures(line)?;
    captures[3].parse().ok()
}

/// Rewrite a checked checklist line into pending form, preserving bullet,
/// spacing, identifier and label. Returns `None` for anything that is not
/// a checked checklist line.
pub fn uncheck(line: &str) -> Option<String> {
    let captures = checked_re().captures(line)?;
    Some(format!("{}[ ]{}", &captures[1], &captures[2]))
}

/// Rewrite a pending checklist line into checked form. Returns `None` for
/// anything that is not a pending checklist line.
pub fn check(line: &str) -> Option<String> {
    let captures = pending_re().captures(line)?;
    Some(format!("{}[x]{}", &captures[1], &captures[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pending_line_is_recognized() {
        assert_eq!(pending_number("* [ ] #12 Fix the build"), Some(12));
        assert_eq!(pending_number("- [ ] #3 Add feature @alice"), Some(3));
        assert_eq!(pending_number("  * [ ] #7 Indented entry"), Some(7));
    }

    #[test]
    fn test_checked_line_is_recognized() {
        assert_eq!(checked_number("* [x] #12 Fix the build"), Some(12));
        assert_eq!(checked_number("- [x] #3 Add feature"), Some(3));
        // Whitespace inside the box is tolerated on input.
        assert_eq!(checked_number("* [ x ] #9 Loose box"), Some(9));
    }

    #[test]
    fn test_case_sensitive_box() {
        assert_eq!(checked_number("* [X] #12 Uppercase is not checked"), None);
        assert_eq!(pending_number("* [X] #12 Uppercase is not pending"), None);
    }

    #[test]
    fn test_non_checklist_lines_rejected() {
        for line in [
            "Release notes",
            "* #12 missing box",
            "* [ ] 12 missing hash",
            "* [ ] #abc not a number",
            "+ [ ] #12 wrong bullet",
            "",
        ] {
            assert_eq!(pending_number(line), None, "line: {line:?}");
            assert_eq!(checked_number(line), None, "line: {line:?}");
        }
    }

    #[test]
    fn test_checked_numbers_scans_whole_text() {
        let text = "\
Heading

* [x] #1 First
* [ ] #2 Second
- [x] #3 Third";
        let numbers = checked_numbers(text);
        assert_eq!(numbers, HashSet::from([1, 3]));
    }

    #[test]
    fn test_uncheck_preserves_everything_but_the_box() {
        assert_eq!(
            uncheck("* [x] #12 Fix the build @bob").as_deref(),
            Some("* [ ] #12 Fix the build @bob")
        );
        assert_eq!(
            uncheck("  - [x] #3   spaced   label ").as_deref(),
            Some("  - [ ] #3   spaced   label ")
        );
        // Loose box content is normalized to the canonical pending form.
        assert_eq!(
            uncheck("* [ x ] #9 Loose box").as_deref(),
            Some("* [ ] #9 Loose box")
        );
        assert_eq!(uncheck("* [ ] #12 Already pending"), None);
        assert_eq!(uncheck("plain text"), None);
    }

    #[test]
    fn test_check_preserves_everything_but_the_box() {
        assert_eq!(
            check("* [ ] #12 Fix the build @bob").as_deref(),
            Some("* [x] #12 Fix the build @bob")
        );
        assert_eq!(
            check("- [ ] #3 Add feature").as_deref(),
            Some("- [x] #3 Add feature")
        );
        assert_eq!(check("* [x] #12 Already checked"), None);
    }

    #[test]
    fn test_roundtrip() {
        let line = "* [x] #42 The answer @deep";
        let pending = uncheck(line).unwrap();
        assert_eq!(check(&pending).as_deref(), Some(line));
    }
}

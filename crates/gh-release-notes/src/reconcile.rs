//! Check-state-preserving reconciliation of checklist bodies
//!
//! The release PR body is regenerated from scratch on every run, but
//! reviewers tick boxes and add notes in the published body between runs.
//! Reconciliation merges the two: the regenerated text decides which
//! entries exist, a line diff decides where reviewer-added text fits, and
//! check state is carried over by identifier.
//!
//! The diff must be blind to check state, so the old body is first
//! normalized to pending form; the checked identifiers recorded before
//! normalization are stamped back onto the merged result afterwards. The
//! box character is never special-cased inside the diff itself.

use crate::checklist;
use gh_line_diff::{diff, EditOp};

/// Merge a freshly rendered checklist body with the previously published
/// one.
///
/// * Lines only present in the new body are added (new entries start
///   unchecked).
/// * Lines only present in the old body are kept, so reviewer-added notes
///   and entries that fell out of the generated list are never silently
///   dropped.
/// * A line replaced in place keeps the old text when both sides are
///   pending checklist lines with identical text; otherwise both lines are
///   kept, old first.
/// * Every surviving checklist line whose number was checked in the old
///   body comes out checked.
///
/// An empty (or whitespace-only) `old_body` yields the new body, trimmed
/// and newline-normalized.
pub fn reconcile(old_body: &str, new_body: &str) -> String {
    let checked = checklist::checked_numbers(old_body);

    let old_lines: Vec<String> = split_lines(old_body)
        .into_iter()
        .map(|line| checklist::uncheck(&line).unwrap_or(line))
        .collect();
    let new_lines = split_lines(new_body);

    let mut merged: Vec<String> = Vec::with_capacity(new_lines.len());
    for op in diff(&old_lines, &new_lines) {
        match op {
            EditOp::Equal { new, .. } | EditOp::Insert { new } => merged.push(new.clone()),
            EditOp::Delete { old } => merged.push(old.clone()),
            EditOp::Replace { old, new } => {
                let same_entry = old == new
                    && checklist::pending_number(old).is_some()
                    && checklist::pending_number(new).is_some();
                merged.push(old.clone());
                if !same_entry {
                    merged.push(new.clone());
                }
            }
        }
    }

    let merged: Vec<String> = merged
        .into_iter()
        .map(|line| match checklist::pending_number(&line) {
            Some(number) if checked.contains(&number) => {
                checklist::check(&line).unwrap_or(line)
            }
            _ => line,
        })
        .collect();

    merged.join("\n")
}

/// Split a body into lines: trim the whole text, normalize `\r\n`, split
/// on `\n`. A blank body is the empty sequence, not a single empty line.
fn split_lines(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

//! Edit operation types produced by the differ

/// A single edit operation aligning one position of the old sequence
/// with one position of the new sequence.
///
/// `Replace` only appears when a run of deletions is immediately followed
/// by a run of insertions of the same length; the two runs are then paired
/// element by element. Unequal runs stay as separate `Delete`s and
/// `Insert`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp<'a, T> {
    /// The element is present unchanged in both sequences.
    Equal { old: &'a T, new: &'a T },

    /// The element only exists in the new sequence.
    Insert { new: &'a T },

    /// The element only exists in the old sequence.
    Delete { old: &'a T },

    /// An old element edited in place into a new element.
    Replace { old: &'a T, new: &'a T },
}

impl<'a, T> EditOp<'a, T> {
    /// The old-side element of this operation, if any.
    pub fn old(&self) -> Option<&'a T> {
        match self {
            EditOp::Equal { old, .. } | EditOp::Delete { old } | EditOp::Replace { old, .. } => {
                Some(*old)
            }
            EditOp::Insert { .. } => None,
        }
    }

    /// The new-side element of this operation, if any.
    pub fn new(&self) -> Option<&'a T> {
        match self {
            EditOp::Equal { new, .. } | EditOp::Insert { new } | EditOp::Replace { new, .. } => {
                Some(*new)
            }
            EditOp::Delete { .. } => None,
        }
    }
}

use core::fmt;
use std::error::Error;

/// Errors surfaced by [`RedBlackTree`](crate::RedBlackTree) and its
/// [`Cursor`](crate::Cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// `first()` or `last()` was called on an empty tree.
    Empty,
    /// The tree was structurally modified since the cursor last looked at
    /// it. The cursor cannot be used anymore, create a new one.
    ConcurrentModification,
    /// `remove()` was called before `next()`, or twice in a row.
    IllegalState,
    /// `next()` was called on a cursor that has no elements left.
    Exhausted,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("tree is empty"),
            Self::ConcurrentModification => {
                f.write_str("tree was modified while a cursor was open")
            }
            Self::IllegalState => f.write_str("no element to remove, call next() first"),
            Self::Exhausted => f.write_str("cursor is exhausted"),
        }
    }
}

impl Error for TreeError {}

/// Broken invariant reported by [`RedBlackTree::validate`](crate::RedBlackTree::validate).
///
/// Any of these is a bug in the tree, never a condition callers are
/// expected to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation<T> {
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    ConsecutiveReds(T),
    /// Left and right subtrees of a node have different black heights.
    UnbalancedBlacks { left: usize, right: usize },
    /// Child value is on the wrong side of its parent, `(child, parent)`.
    SortError(T, T),
    /// A child does not point back to its parent.
    BrokenParent(T),
    /// The threaded chain disagrees with the in-order traversal.
    BrokenThread,
    /// The stored length disagrees with the number of nodes.
    SizeMismatch { len: usize, nodes: usize },
}

impl<T> fmt::Display for Violation<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => f.write_str("root is red"),
            Self::ConsecutiveReds(v) => write!(f, "red node {v:?} has a red child"),
            Self::UnbalancedBlacks { left, right } => {
                write!(f, "unbalanced blacks, left: {left} right: {right}")
            }
            Self::SortError(child, parent) => {
                write!(f, "{child:?} is on the wrong side of {parent:?}")
            }
            Self::BrokenParent(v) => write!(f, "{v:?} does not point back to its parent"),
            Self::BrokenThread => f.write_str("threaded links out of order"),
            Self::SizeMismatch { len, nodes } => {
                write!(f, "len is {len} but the tree holds {nodes} nodes")
            }
        }
    }
}

impl<T> Error for Violation<T> where T: fmt::Debug {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(TreeError::Empty.to_string(), "tree is empty");
        assert_eq!(TreeError::Exhausted.to_string(), "cursor is exhausted");
        assert_eq!(
            Violation::<i32>::UnbalancedBlacks { left: 2, right: 3 }.to_string(),
            "unbalanced blacks, left: 2 right: 3"
        );
        assert_eq!(
            Violation::SortError(1, 4).to_string(),
            "1 is on the wrong side of 4"
        );
    }
}

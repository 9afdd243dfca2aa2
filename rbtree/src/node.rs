use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    pub(crate) fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    pub(crate) fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("RED"),
            Self::Black => f.write_str("BLACK"),
        }
    }
}

/// Handle of a node inside the tree's arena.
///
/// Every link of a node (parent, children and both threads) is a `NodeId`
/// instead of a pointer, so the cyclic graph has a single owner: the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The sentinel. Empty children, the root's parent and both ends of the
/// threaded chain point here.
pub(crate) const NIL: NodeId = NodeId(0);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == NIL
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    // `None` only for the sentinel and for slots waiting on the free list,
    // every node reachable from the root holds a value
    pub(crate) value: Option<T>,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) next_smaller: NodeId,
    pub(crate) next_larger: NodeId,
}

impl<T> Node<T> {
    /// A fresh red leaf, not yet attached to anything.
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value: Some(value),
            color: Color::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
            next_smaller: NIL,
            next_larger: NIL,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            value: None,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
            next_smaller: NIL,
            next_larger: NIL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_black_and_self_linked() {
        let nil = Node::<i32>::sentinel();
        assert!(nil.color.is_black());
        assert!(nil.value.is_none());
        for link in [
            nil.parent,
            nil.left,
            nil.right,
            nil.next_smaller,
            nil.next_larger,
        ] {
            assert!(link.is_nil());
        }
    }

    #[test]
    fn leaf_is_red() {
        let node = Node::leaf(7);
        assert!(node.color.is_red());
        assert_eq!(node.value, Some(7));
        assert!(node.left.is_nil() && node.right.is_nil());
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::Red.to_string(), "RED");
        assert_eq!(Color::Black.to_string(), "BLACK");
    }
}

use core::iter::FusedIterator;

use crate::node::NodeId;
use crate::RedBlackTree;

/// Borrowing iterator over a [`RedBlackTree`] that walks the threaded links.
///
/// Created by [`RedBlackTree::iter`]. Both ends can be consumed, they meet in
/// the middle.
pub struct Iter<'a, T> {
    tree: &'a RedBlackTree<T>,
    front: NodeId,
    back: NodeId,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a RedBlackTree<T>) -> Self {
        Self {
            tree,
            front: tree.first_node(),
            back: tree.last_node(),
            len: tree.len(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.front;
        self.front = self.tree.next_larger(node);
        self.len -= 1;
        Some(self.tree.value(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.back;
        self.back = self.tree.next_smaller(node);
        self.len -= 1;
        Some(self.tree.value(node))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

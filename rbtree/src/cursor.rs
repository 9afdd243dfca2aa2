use log::debug;

use crate::error::TreeError;
use crate::node::NodeId;
use crate::RedBlackTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest value first, following the next larger links.
    Ascending,
    /// Largest value first, following the next smaller links.
    Descending,
}

/// Fail-fast cursor over a [`RedBlackTree`].
///
/// A cursor does not hold on to the tree. Every call takes the tree it was
/// created from, which lets the caller remove elements while iterating and
/// keep several cursors open at once. Each cursor remembers the tree's
/// modification count; once the tree is changed by anything other than this
/// cursor's own [`remove`](Cursor::remove), both [`next`](Cursor::next) and
/// `remove` fail with [`TreeError::ConcurrentModification`].
///
/// Passing a different tree than the one the cursor was created from is a
/// logic error. The behavior is unspecified but memory safe.
///
/// ```
/// use rbtree::{Direction, RedBlackTree};
///
/// let mut tree: RedBlackTree<i32> = (1..=6).collect();
/// let mut cursor = tree.cursor(Direction::Ascending);
/// while cursor.has_next() {
///     if cursor.next(&tree)? % 2 == 0 {
///         cursor.remove(&mut tree)?;
///     }
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
/// # Ok::<(), rbtree::TreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    direction: Direction,
    // node holding the value `next` returns, the sentinel once exhausted
    current: NodeId,
    expected_mod_count: u64,
    can_remove: bool,
}

impl Cursor {
    pub(crate) fn new<T>(tree: &RedBlackTree<T>, direction: Direction) -> Self {
        let current = match direction {
            Direction::Ascending => tree.first_node(),
            Direction::Descending => tree.last_node(),
        };
        Self {
            direction,
            current,
            expected_mod_count: tree.mod_count(),
            can_remove: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether another element is waiting. Never fails, even if the tree was
    /// modified behind the cursor's back.
    pub fn has_next(&self) -> bool {
        !self.current.is_nil()
    }

    /// Returns the next element in the cursor's direction.
    pub fn next<'a, T>(&mut self, tree: &'a RedBlackTree<T>) -> Result<&'a T, TreeError> {
        self.check_for_comodification(tree)?;
        if self.current.is_nil() {
            return Err(TreeError::Exhausted);
        }
        let node = self.current;
        self.current = self.step(tree, node);
        self.can_remove = true;
        Ok(tree.value(node))
    }

    /// Removes the element most recently returned by [`next`](Self::next)
    /// and hands it back. Allowed once per `next`.
    ///
    /// The cursor stays valid, other open cursors on the same tree do not.
    pub fn remove<T>(&mut self, tree: &mut RedBlackTree<T>) -> Result<T, TreeError>
    where
        T: Ord,
    {
        self.check_for_comodification(tree)?;
        if !self.can_remove {
            return Err(TreeError::IllegalState);
        }

        // the last returned element sits right behind `current`
        let last = match (self.direction, self.current.is_nil()) {
            (Direction::Ascending, true) => tree.last_node(),
            (Direction::Ascending, false) => tree.next_smaller(self.current),
            (Direction::Descending, true) => tree.first_node(),
            (Direction::Descending, false) => tree.next_larger(self.current),
        };
        debug_assert!(!last.is_nil());

        // deleting may move the next value into another node, `current`
        // follows it
        let value = tree.delete_node(last, &mut self.current);
        self.expected_mod_count = tree.mod_count();
        self.can_remove = false;
        debug!("cursor removed {last:?}, continuing at {:?}", self.current);
        Ok(value)
    }

    fn step<T>(&self, tree: &RedBlackTree<T>, node: NodeId) -> NodeId {
        match self.direction {
            Direction::Ascending => tree.next_larger(node),
            Direction::Descending => tree.next_smaller(node),
        }
    }

    fn check_for_comodification<T>(&self, tree: &RedBlackTree<T>) -> Result<(), TreeError> {
        if tree.mod_count() != self.expected_mod_count {
            return Err(TreeError::ConcurrentModification);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> RedBlackTree<i32> {
        [5, 4, 2, 3, 6, 1].into_iter().collect()
    }

    fn drain(tree: &RedBlackTree<i32>, direction: Direction) -> Vec<i32> {
        let mut cursor = tree.cursor(direction);
        let mut values = Vec::new();
        while cursor.has_next() {
            values.push(*cursor.next(tree).unwrap());
        }
        values
    }

    #[test]
    fn traverses_both_directions() {
        let tree = tree();
        assert_eq!(drain(&tree, Direction::Ascending), [1, 2, 3, 4, 5, 6]);
        assert_eq!(drain(&tree, Direction::Descending), [6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn empty_tree() {
        let tree = RedBlackTree::<i32>::new();
        for direction in [Direction::Ascending, Direction::Descending] {
            let mut cursor = tree.cursor(direction);
            assert!(!cursor.has_next());
            assert_eq!(cursor.next(&tree), Err(TreeError::Exhausted));
        }
    }

    #[test]
    fn exhausted() {
        let tree = tree();
        let mut cursor = tree.cursor(Direction::Descending);
        for _ in 0..6 {
            cursor.next(&tree).unwrap();
        }
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(&tree), Err(TreeError::Exhausted));
        assert_eq!(cursor.direction(), Direction::Descending);
    }

    #[test]
    fn remove_first() {
        let mut tree = tree();
        let mut cursor = tree.cursor(Direction::Ascending);
        assert_eq!(cursor.next(&tree), Ok(&1));
        assert_eq!(cursor.remove(&mut tree), Ok(1));
        assert_eq!(tree.len(), 5);
        assert!(!tree.contains(&1));
        assert_eq!(cursor.next(&tree), Ok(&2));
        tree.validate().unwrap();
    }

    #[test]
    fn remove_everything() {
        for direction in [Direction::Ascending, Direction::Descending] {
            let mut tree = tree();
            let mut cursor = tree.cursor(direction);
            let mut removed = Vec::new();
            while cursor.has_next() {
                let v = *cursor.next(&tree).unwrap();
                assert_eq!(cursor.remove(&mut tree), Ok(v));
                removed.push(v);
                tree.validate().unwrap();
            }
            assert!(tree.is_empty());
            let mut expected = vec![1, 2, 3, 4, 5, 6];
            if direction == Direction::Descending {
                expected.reverse();
            }
            assert_eq!(removed, expected);
        }
    }

    #[test]
    fn remove_some() {
        let mut tree: RedBlackTree<i32> = (0..100).collect();
        let mut cursor = tree.cursor(Direction::Descending);
        let mut seen = Vec::new();
        while cursor.has_next() {
            let v = *cursor.next(&tree).unwrap();
            seen.push(v);
            if v % 3 != 0 {
                cursor.remove(&mut tree).unwrap();
            }
        }
        assert_eq!(seen, (0..100).rev().collect::<Vec<_>>());
        assert_eq!(
            tree.iter().copied().collect::<Vec<_>>(),
            (0..100).filter(|v| v % 3 == 0).collect::<Vec<_>>()
        );
        tree.validate().unwrap();
    }

    #[test]
    fn follows_value_moved_by_removal() {
        // 1 is the root with 2 as its only child, removing 1 moves 2 up
        let mut tree: RedBlackTree<i32> = [1, 2].into_iter().collect();
        let mut cursor = tree.cursor(Direction::Ascending);
        assert_eq!(cursor.next(&tree), Ok(&1));
        assert_eq!(cursor.remove(&mut tree), Ok(1));
        assert_eq!(cursor.next(&tree), Ok(&2));
        assert!(!cursor.has_next());

        let mut tree: RedBlackTree<i32> = [2, 1].into_iter().collect();
        let mut cursor = tree.cursor(Direction::Descending);
        assert_eq!(cursor.next(&tree), Ok(&2));
        assert_eq!(cursor.remove(&mut tree), Ok(2));
        assert_eq!(cursor.next(&tree), Ok(&1));
        assert!(!cursor.has_next());
    }

    #[test]
    fn remove_last_after_exhaustion() {
        let mut tree = tree();
        let mut cursor = tree.cursor(Direction::Ascending);
        while cursor.has_next() {
            cursor.next(&tree).unwrap();
        }
        assert_eq!(cursor.remove(&mut tree), Ok(6));
        assert_eq!(tree.last(), Ok(&5));
        assert_eq!(cursor.remove(&mut tree), Err(TreeError::IllegalState));
    }

    #[test]
    fn remove_requires_next() {
        let mut tree = tree();
        let mut cursor = tree.cursor(Direction::Ascending);
        assert_eq!(cursor.remove(&mut tree), Err(TreeError::IllegalState));

        cursor.next(&tree).unwrap();
        assert_eq!(cursor.remove(&mut tree), Ok(1));
        assert_eq!(cursor.remove(&mut tree), Err(TreeError::IllegalState));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn fails_fast_on_direct_modification() {
        let mut tree = tree();
        let mut cursor = tree.cursor(Direction::Ascending);
        cursor.next(&tree).unwrap();

        tree.insert(10);
        assert!(cursor.has_next());
        assert_eq!(cursor.next(&tree), Err(TreeError::ConcurrentModification));
        assert_eq!(
            cursor.remove(&mut tree),
            Err(TreeError::ConcurrentModification)
        );
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn noop_changes_keep_cursor_valid() {
        let mut tree = tree();
        let mut cursor = tree.cursor(Direction::Ascending);
        assert!(!tree.insert(3));
        assert!(!tree.remove(&42));
        assert_eq!(cursor.next(&tree), Ok(&1));
    }

    #[test]
    fn other_cursor_invalidated() {
        let mut tree = tree();
        let mut a = tree.cursor(Direction::Ascending);
        let mut b = tree.cursor(Direction::Descending);
        assert_eq!(a.next(&tree), Ok(&1));
        assert_eq!(b.next(&tree), Ok(&6));

        assert_eq!(a.remove(&mut tree), Ok(1));
        assert_eq!(a.next(&tree), Ok(&2));
        assert_eq!(b.next(&tree), Err(TreeError::ConcurrentModification));
        assert_eq!(b.remove(&mut tree), Err(TreeError::ConcurrentModification));
    }

    #[test]
    fn clear_invalidates() {
        let mut tree = tree();
        let mut cursor = tree.cursor(Direction::Ascending);
        tree.clear();
        assert_eq!(cursor.next(&tree), Err(TreeError::ConcurrentModification));
    }

    mod proptests {
        use std::collections::BTreeSet;

        use proptest::prelude::*;

        use super::*;

        proptest!(
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn remove_while_iterating(
                values in proptest::collection::hash_set(0..10000i32, 0..300),
                pick in proptest::collection::vec(any::<bool>(), 300),
                descending in any::<bool>()
            ) {
                let direction = if descending { Direction::Descending } else { Direction::Ascending };
                let mut tree: RedBlackTree<i32> = values.iter().copied().collect();
                let mut kept = BTreeSet::new();
                let mut visited = Vec::new();

                let mut cursor = tree.cursor(direction);
                let mut i = 0;
                while cursor.has_next() {
                    let v = *cursor.next(&tree).unwrap();
                    visited.push(v);
                    if pick[i] {
                        prop_assert_eq!(cursor.remove(&mut tree), Ok(v));
                    } else {
                        kept.insert(v);
                    }
                    i += 1;
                }

                let mut expected: Vec<_> = values.iter().copied().collect();
                expected.sort();
                if descending {
                    expected.reverse();
                }
                prop_assert_eq!(visited, expected);
                prop_assert!(tree.iter().eq(kept.iter()));
                prop_assert!(tree.validate().is_ok());
            }
        );
    }
}

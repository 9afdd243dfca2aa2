use core::fmt;
use std::borrow::Borrow;

use crate::cursor::{Cursor, Direction};
use crate::iter::Iter;
use crate::RedBlackTree;

/// Navigable ordered set backed by a [`RedBlackTree`].
///
/// Absence is always an `Option` here, including `first` and `last` on an
/// empty set. Use [`as_tree`](Self::as_tree) and
/// [`as_tree_mut`](Self::as_tree_mut) to drive a [`Cursor`].
#[derive(Clone)]
pub struct TreeSet<T> {
    tree: RedBlackTree<T>,
}

impl<T> TreeSet<T> {
    pub fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().ok()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    pub fn descending_iter(&self) -> std::iter::Rev<Iter<'_, T>> {
        self.tree.descending_iter()
    }

    pub fn cursor(&self, direction: Direction) -> Cursor {
        self.tree.cursor(direction)
    }

    pub fn as_tree(&self) -> &RedBlackTree<T> {
        &self.tree
    }

    pub fn as_tree_mut(&mut self) -> &mut RedBlackTree<T> {
        &mut self.tree
    }

    pub fn into_tree(self) -> RedBlackTree<T> {
        self.tree
    }
}

impl<T> TreeSet<T>
where
    T: Ord,
{
    /// Returns `true` if the value was not present yet.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Returns `true` if the value was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.take(value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(value)
    }

    pub fn lower<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower(value)
    }

    pub fn higher<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.higher(value)
    }

    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.floor(value)
    }

    pub fn ceiling<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.ceiling(value)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.poll_first()
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.poll_last()
    }
}

impl<T> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<RedBlackTree<T>> for TreeSet<T> {
    fn from(tree: RedBlackTree<T>) -> Self {
        Self { tree }
    }
}

impl<T> FromIterator<T> for TreeSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tree: RedBlackTree::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for TreeSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> PartialEq for TreeSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for TreeSet<T> where T: Eq {}

impl<T> fmt::Debug for TreeSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

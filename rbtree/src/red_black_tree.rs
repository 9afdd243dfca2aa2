use core::cmp::Ordering;
use core::fmt;
use core::mem;
use std::borrow::Borrow;

use log::{debug, trace};

use crate::cursor::{Cursor, Direction};
use crate::error::{TreeError, Violation};
use crate::iter::Iter;
use crate::node::{Color, Node, NodeId, NIL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodePos {
    Root,
    Left,
    Right,
}

/// An ordered set of unique values kept balanced by red-black coloring.
///
/// Besides the usual parent/left/right links every node is threaded into a
/// doubly linked list in ascending order, so stepping to the next smaller or
/// next larger value is O(1) and iteration needs neither a stack nor parent
/// chasing.
///
/// Nodes live in a single arena and refer to each other by index. Slot 0 is
/// the sentinel: it is black, holds no value and stands in for every missing
/// child, the root's parent and both ends of the threaded chain.
#[derive(Clone)]
pub struct RedBlackTree<T> {
    // INVARIANTS:
    //  * `nodes[0]` is the sentinel and is never written after construction
    //  * `root == NIL` iff `len == 0`
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    root: NodeId,
    len: usize,
    // bumped on every structural change, cursors compare against it
    mod_count: u64,
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RedBlackTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            root: NIL,
            len: 0,
            mod_count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Open cursors are invalidated.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        self.root = NIL;
        self.len = 0;
        self.bump_mod_count();
    }

    /// Smallest value in the tree.
    pub fn first(&self) -> Result<&T, TreeError> {
        self.get_value(self.first_node()).ok_or(TreeError::Empty)
    }

    /// Largest value in the tree.
    pub fn last(&self) -> Result<&T, TreeError> {
        self.get_value(self.last_node()).ok_or(TreeError::Empty)
    }

    /// Borrowing iterator in ascending order, reversible.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Borrowing iterator in descending order.
    pub fn descending_iter(&self) -> std::iter::Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    /// Fail-fast cursor positioned before the first element in `direction`.
    ///
    /// Unlike [`iter`](Self::iter) the cursor does not borrow the tree, so the
    /// tree may be changed while it is open. The cursor notices and refuses
    /// to continue, except for changes made through its own
    /// [`remove`](Cursor::remove).
    pub fn cursor(&self, direction: Direction) -> Cursor {
        Cursor::new(self, direction)
    }

    // ---- crate internal accessors used by cursors and iterators ----

    #[inline]
    pub(crate) fn mod_count(&self) -> u64 {
        self.mod_count
    }

    pub(crate) fn first_node(&self) -> NodeId {
        if self.root.is_nil() {
            return NIL;
        }
        self.min_of(self.root)
    }

    pub(crate) fn last_node(&self) -> NodeId {
        if self.root.is_nil() {
            return NIL;
        }
        self.max_of(self.root)
    }

    #[inline]
    pub(crate) fn next_smaller(&self, id: NodeId) -> NodeId {
        self.node(id).next_smaller
    }

    #[inline]
    pub(crate) fn next_larger(&self, id: NodeId) -> NodeId {
        self.node(id).next_larger
    }

    /// Value of a live node. Must never be called with the sentinel.
    pub(crate) fn value(&self, id: NodeId) -> &T {
        match &self.node(id).value {
            Some(value) => value,
            None => unreachable!("{id:?} is the sentinel or a freed slot"),
        }
    }

    /// Value of `id`, `None` for the sentinel.
    #[inline]
    pub(crate) fn get_value(&self, id: NodeId) -> Option<&T> {
        self.node(id).value.as_ref()
    }

    // ---- node accessors ----

    #[inline]
    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        debug_assert!(!id.is_nil(), "the sentinel is never written");
        &mut self.nodes[id.index()]
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent
    }

    #[inline]
    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(id).parent = parent;
    }

    #[inline]
    fn left(&self, id: NodeId) -> NodeId {
        self.node(id).left
    }

    #[inline]
    fn set_left(&mut self, id: NodeId, left: NodeId) {
        self.node_mut(id).left = left;
    }

    #[inline]
    fn right(&self, id: NodeId) -> NodeId {
        self.node(id).right
    }

    #[inline]
    fn set_right(&mut self, id: NodeId, right: NodeId) {
        self.node_mut(id).right = right;
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.node(id).color
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    fn swap_colors(&mut self, a: NodeId, b: NodeId) {
        let color_a = self.color(a);
        let color_b = self.color(b);
        self.set_color(a, color_b);
        self.set_color(b, color_a);
    }

    fn swap_values(&mut self, a: NodeId, b: NodeId) {
        let value_a = self.node_mut(a).value.take();
        let value_b = mem::replace(&mut self.node_mut(b).value, value_a);
        self.node_mut(a).value = value_b;
    }

    #[inline]
    fn is_root(&self, id: NodeId) -> bool {
        self.parent(id).is_nil()
    }

    fn pos(&self, id: NodeId) -> NodePos {
        let parent = self.parent(id);
        if parent.is_nil() {
            NodePos::Root
        } else if self.left(parent) == id {
            NodePos::Left
        } else {
            debug_assert_eq!(self.right(parent), id);
            NodePos::Right
        }
    }

    fn min_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while !self.left(x).is_nil() {
            x = self.left(x);
        }
        x
    }

    fn max_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while !self.right(x).is_nil() {
            x = self.right(x);
        }
        x
    }

    fn bump_mod_count(&mut self) {
        self.mod_count = self.mod_count.wrapping_add(1);
    }

    // ---- arena ----

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId::new(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> T {
        let node = mem::replace(self.node_mut(id), Node::sentinel());
        self.free.push(id);
        match node.value {
            Some(value) => value,
            None => unreachable!("released {id:?} twice"),
        }
    }

    // ---- rotations ----

    fn rotate_left(&mut self, node: NodeId) {
        //    p                       p
        //    |                       |
        // +-node-+               +-right-+
        // |      |      -->      |       |
        // a  +-right-+       +-node-+    c
        //    |       |       |      |
        //    b       c       a      b
        // where a, b, c can be any subtrees
        trace!("rotate left at {node:?}");
        let right = self.right(node);
        debug_assert!(!right.is_nil(), "rotating left without a right child");

        // attach b to node
        let b = self.left(right);
        self.set_right(node, b);
        if !b.is_nil() {
            self.set_parent(b, node);
        }

        // attach right to parent
        let parent = self.parent(node);
        self.set_parent(right, parent);
        match self.pos(node) {
            NodePos::Root => self.root = right,
            NodePos::Left => self.set_left(parent, right),
            NodePos::Right => self.set_right(parent, right),
        }

        // attach node to right
        self.set_left(right, node);
        self.set_parent(node, right);
    }

    fn rotate_right(&mut self, node: NodeId) {
        //         p              p
        //         |              |
        //     +-node-+       +-left-+
        //     |      |       |      |
        // +-left-+   c  -->  a  +-node-+
        // |      |              |      |
        // a      b              b      c
        // where a, b, c can be any subtrees
        trace!("rotate right at {node:?}");
        let left = self.left(node);
        debug_assert!(!left.is_nil(), "rotating right without a left child");

        // attach b to node
        let b = self.right(left);
        self.set_left(node, b);
        if !b.is_nil() {
            self.set_parent(b, node);
        }

        // attach left to parent
        let parent = self.parent(node);
        self.set_parent(left, parent);
        match self.pos(node) {
            NodePos::Root => self.root = left,
            NodePos::Left => self.set_left(parent, left),
            NodePos::Right => self.set_right(parent, left),
        }

        // attach node to left
        self.set_right(left, node);
        self.set_parent(node, left);
    }

    // ---- threaded links ----

    /// Makes `smaller` and `larger` neighbours in the threaded chain. Either
    /// side may be the sentinel, whose links stay untouched.
    fn link(&mut self, smaller: NodeId, larger: NodeId) {
        if !smaller.is_nil() {
            self.node_mut(smaller).next_larger = larger;
        }
        if !larger.is_nil() {
            self.node_mut(larger).next_smaller = smaller;
        }
    }

    /// Splices a freshly attached leaf into the chain next to its parent.
    fn thread_in(&mut self, node: NodeId) {
        let parent = self.parent(node);
        match self.pos(node) {
            NodePos::Root => {
                self.link(NIL, node);
                self.link(node, NIL);
            }
            NodePos::Left => {
                // the parent was the smallest value above the new node
                let before = self.next_smaller(parent);
                self.link(before, node);
                self.link(node, parent);
            }
            NodePos::Right => {
                let after = self.next_larger(parent);
                self.link(parent, node);
                self.link(node, after);
            }
        }
        trace!("threaded {node:?} next to {parent:?}");
    }

    fn thread_out(&mut self, node: NodeId) {
        let before = self.next_smaller(node);
        let after = self.next_larger(node);
        self.link(before, after);
        trace!("unthreaded {node:?}");
    }

    // ---- deletion ----

    /// Removes the value held by `node` and returns it.
    ///
    /// The slot that is physically freed is not necessarily `node`: values
    /// slide towards `node` from its in-order neighbour until the doomed
    /// value sits in a leaf. If `track` points at a node whose value slides,
    /// it is moved along to the value's new slot.
    pub(crate) fn delete_node(&mut self, node: NodeId, track: &mut NodeId) -> T {
        debug_assert!(!node.is_nil());
        let mut target = node;
        loop {
            let (left, right) = (self.left(target), self.right(target));
            let next = if !left.is_nil() {
                // in-order predecessor, it has no right child
                self.max_of(left)
            } else if !right.is_nil() {
                // a lone right child is a red leaf and the in-order successor
                self.min_of(right)
            } else {
                break;
            };
            self.swap_values(target, next);
            if *track == next {
                *track = target;
            }
            target = next;
        }

        self.thread_out(target);
        self.delete_fixup(target);

        if self.is_root(target) {
            self.root = NIL;
        } else {
            let parent = self.parent(target);
            match self.pos(target) {
                NodePos::Left => self.set_left(parent, NIL),
                _ => self.set_right(parent, NIL),
            }
            self.set_color(self.root, Color::Black);
        }

        self.len -= 1;
        self.bump_mod_count();
        self.release(target)
    }

    /// Restores the black heights before the black leaf `node` is cut off.
    fn delete_fixup(&mut self, mut node: NodeId) {
        // A red node can go without changing any black height. Otherwise
        // `node` is "double black": its side of the parent is about to lose
        // one black node.
        while self.color(node).is_black() && !self.is_root(node) {
            let parent = self.parent(node);
            let is_left = self.left(parent) == node;
            // a black non-root node always has a real sibling
            let sibling = if is_left {
                self.right(parent)
            } else {
                self.left(parent)
            };
            let (near, far) = if is_left {
                (self.left(sibling), self.right(sibling))
            } else {
                (self.right(sibling), self.left(sibling))
            };

            if self.color(sibling).is_black()
                && self.color(near).is_black()
                && self.color(far).is_black()
            {
                //     +--- p:? ---+             +--- p:? ---+
                //     |           |             |           |
                //    x:b      +- s:b -+   -->  x:b      +- s:r -+
                //             |       |                 |       |
                //            n:b     f:b               n:b     f:b
                // The sibling side loses a black too. A red parent can take
                // the missing black, a black one pushes the defect upwards.
                debug!("delete fixup: black sibling with black children");
                self.set_color(sibling, Color::Red);
                if self.color(parent).is_red() {
                    self.set_color(parent, Color::Black);
                    break;
                }
                node = parent;
                continue;
            }

            if self.color(sibling).is_red() {
                //     +--- p:b ---+                 +--- s:b ---+
                //     |           |                 |           |
                //    x:b      +- s:r -+   -->   +- p:r -+      f:b
                //             |       |         |       |
                //            n:b     f:b       x:b     n:b
                // x now has the black n as its sibling, try again.
                debug!("delete fixup: red sibling");
                self.swap_colors(parent, sibling);
                if is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                continue;
            }

            let (mut sibling, mut far) = (sibling, far);
            if self.color(far).is_black() {
                //     +--- p:? ---+              +--- p:? ---+
                //     |           |              |           |
                //    x:b      +- s:b -+   -->   x:b      +- n:b -+
                //             |       |                  |       |
                //            n:r     f:b                 a     s:r
                // turns the near red child into a far red child
                debug!("delete fixup: black sibling with red near child");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                if is_left {
                    self.rotate_right(sibling);
                } else {
                    self.rotate_left(sibling);
                }
                far = sibling;
                sibling = near;
            }

            //     +--- p:c ---+                   +--- s:c ---+
            //     |           |                   |           |
            //    x:b      +- s:b -+   -->     +- p:b -+      f:b
            //             |       |           |       |
            //             a      f:r         x:b      a
            // the extra black on p covers x, f turning black keeps the
            // other side intact
            debug!("delete fixup: black sibling with red far child");
            self.swap_colors(parent, sibling);
            if is_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            self.set_color(far, Color::Black);
            break;
        }
    }

    // ---- traversal helpers ----

    fn inorder_for_each_core<F>(&self, node: NodeId, f: &mut F)
    where
        F: FnMut(NodeId),
    {
        if node.is_nil() {
            return;
        }
        self.inorder_for_each_core(self.left(node), f);
        f(node);
        self.inorder_for_each_core(self.right(node), f);
    }
}

/// Search, insertion and removal.
impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Adds `value` to the tree. Returns `false` and leaves the tree
    /// untouched if an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        // Move left/right down the tree until we find empty slot
        let mut parent = NIL;
        let mut x = self.root;
        let mut pos = NodePos::Root;
        while !x.is_nil() {
            parent = x;
            match value.cmp(self.value(x)) {
                Ordering::Less => {
                    pos = NodePos::Left;
                    x = self.left(x);
                }
                Ordering::Equal => return false,
                Ordering::Greater => {
                    pos = NodePos::Right;
                    x = self.right(x);
                }
            }
        }

        let node = self.alloc(Node::leaf(value));
        match pos {
            NodePos::Root => self.root = node,
            NodePos::Left => self.set_left(parent, node),
            NodePos::Right => self.set_right(parent, node),
        }
        if !parent.is_nil() {
            self.set_parent(node, parent);
        }

        self.len += 1;
        self.bump_mod_count();
        self.thread_in(node);
        self.insert_fixup(node);
        true
    }

    fn insert_fixup(&mut self, mut node: NodeId) {
        // The only possible violation is `node` being red below a red parent.
        while !self.is_root(node)
            && self.color(node).is_red()
            && self.color(self.parent(node)).is_red()
        {
            let parent = self.parent(node);
            // a red parent is never the root
            let grand_parent = self.parent(parent);
            let parent_pos = self.pos(parent);
            let uncle = match parent_pos {
                NodePos::Left => self.right(grand_parent),
                _ => self.left(grand_parent),
            };

            if self.color(uncle).is_red() {
                //     +--- gp:b ---+               +--- gp:r ---+
                //     |            |               |            |
                //  + p:r +      + u:r +   -->   + p:b +      + u:b +
                //  |     |                      |     |
                // n:r   a:b                    n:r   a:b
                // Black height stays the same, but gp may now sit below a
                // red parent, so repeat from there.
                debug!("insert fixup: red uncle");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand_parent, Color::Red);
                node = grand_parent;
                continue;
            }

            match (parent_pos, self.pos(node)) {
                (NodePos::Left, NodePos::Right) => {
                    //       +-- gp:b --+                 +-- gp:b --+
                    //       |          |                 |          |
                    //  +-- p:r --+    u:b  -->       +- n:b --+    u:b
                    //  |         |                   |        |
                    // a:b       n:r                 p:r      ...
                    debug!("insert fixup: black uncle, left-right");
                    self.rotate_left(parent);
                    self.set_color(node, Color::Black);
                    self.rotate_right(grand_parent);
                }
                (NodePos::Left, _) => {
                    //           +-- gp:b --+            +----- p:b -----+
                    //           |          |            |               |
                    //      +-- p:r --+    u:b  -->     n:r         +- gp:r -+
                    //      |         |                             |        |
                    //     n:r       c:b                           c:b      u:b
                    debug!("insert fixup: black uncle, left-left");
                    self.set_color(parent, Color::Black);
                    self.rotate_right(grand_parent);
                }
                (_, NodePos::Left) => {
                    debug!("insert fixup: black uncle, right-left");
                    self.rotate_right(parent);
                    self.set_color(node, Color::Black);
                    self.rotate_left(grand_parent);
                }
                _ => {
                    debug!("insert fixup: black uncle, right-right");
                    self.set_color(parent, Color::Black);
                    self.rotate_left(grand_parent);
                }
            }
            self.set_color(grand_parent, Color::Red);
        }

        if !self.root.is_nil() {
            self.set_color(self.root, Color::Black);
        }
    }

    /// Removes `value` from the tree. Returns `false` if it wasn't there.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes `value` from the tree and hands back the stored value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find(value);
        if node.is_nil() {
            return None;
        }
        let mut untracked = NIL;
        Some(self.delete_node(node, &mut untracked))
    }

    /// Removes and returns the smallest value.
    pub fn poll_first(&mut self) -> Option<T> {
        let node = self.first_node();
        if node.is_nil() {
            return None;
        }
        let mut untracked = NIL;
        Some(self.delete_node(node, &mut untracked))
    }

    /// Removes and returns the largest value.
    pub fn poll_last(&mut self) -> Option<T> {
        let node = self.last_node();
        if node.is_nil() {
            return None;
        }
        let mut untracked = NIL;
        Some(self.delete_node(node, &mut untracked))
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(value).is_nil()
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_value(self.find(value))
    }

    fn find<Q>(&self, value: &Q) -> NodeId
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while !x.is_nil() {
            x = match value.cmp(self.value(x).borrow()) {
                Ordering::Less => self.left(x),
                Ordering::Equal => return x,
                Ordering::Greater => self.right(x),
            };
        }
        NIL
    }

    /// Largest value strictly less than `value`.
    pub fn lower<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_value(self.below(value, false))
    }

    /// Largest value less than or equal to `value`.
    pub fn floor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_value(self.below(value, true))
    }

    /// Smallest value strictly greater than `value`.
    pub fn higher<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_value(self.above(value, false))
    }

    /// Smallest value greater than or equal to `value`.
    pub fn ceiling<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_value(self.above(value, true))
    }

    // Every time we step right past a node smaller than the probe that node
    // is closer to the probe than any candidate seen before, so the last one
    // wins.
    fn below<Q>(&self, value: &Q, inclusive: bool) -> NodeId
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut best = NIL;
        let mut x = self.root;
        while !x.is_nil() {
            match self.value(x).borrow().cmp(value) {
                Ordering::Less => {
                    best = x;
                    x = self.right(x);
                }
                Ordering::Equal if inclusive => return x,
                _ => x = self.left(x),
            }
        }
        best
    }

    fn above<Q>(&self, value: &Q, inclusive: bool) -> NodeId
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut best = NIL;
        let mut x = self.root;
        while !x.is_nil() {
            match self.value(x).borrow().cmp(value) {
                Ordering::Greater => {
                    best = x;
                    x = self.left(x);
                }
                Ordering::Equal if inclusive => return x,
                _ => x = self.right(x),
            }
        }
        best
    }

    /// Checks every structural rule of the tree:
    ///
    /// * The root is black.
    /// * No red node has a red child.
    /// * Every path from a node down to the sentinel has the same number of
    ///   black nodes.
    /// * Children point back to their parents.
    /// * Values are in strictly ascending order and the threaded chain
    ///   visits exactly the same nodes as an in-order walk.
    /// * `len()` matches the number of nodes.
    ///
    /// Returns the number of black nodes on every path from the root down to
    /// the sentinel.
    pub fn validate(&self) -> Result<usize, Violation<T>>
    where
        T: Clone,
    {
        if self.root.is_nil() {
            if self.len != 0 {
                return Err(Violation::SizeMismatch {
                    len: self.len,
                    nodes: 0,
                });
            }
            return Ok(0);
        }
        if self.color(self.root).is_red() {
            return Err(Violation::RedRoot);
        }
        if !self.parent(self.root).is_nil() {
            return Err(Violation::BrokenParent(self.value(self.root).clone()));
        }

        let mut nodes = 0;
        let blacks = self.validate_tree(self.root, &mut nodes)?;
        if nodes != self.len {
            return Err(Violation::SizeMismatch {
                len: self.len,
                nodes,
            });
        }

        let mut inorder = Vec::with_capacity(self.len);
        self.inorder_for_each_core(self.root, &mut |id| inorder.push(id));
        let (mut prev, mut x) = (NIL, self.first_node());
        for id in inorder {
            if x != id || self.next_smaller(x) != prev {
                return Err(Violation::BrokenThread);
            }
            if !prev.is_nil() && self.value(prev) >= self.value(x) {
                let (smaller, larger) = (self.value(x).clone(), self.value(prev).clone());
                return Err(Violation::SortError(smaller, larger));
            }
            prev = x;
            x = self.next_larger(x);
        }
        if !x.is_nil() {
            return Err(Violation::BrokenThread);
        }

        Ok(blacks)
    }

    fn validate_tree(&self, node: NodeId, nodes: &mut usize) -> Result<usize, Violation<T>>
    where
        T: Clone,
    {
        if node.is_nil() {
            return Ok(0);
        }
        *nodes += 1;

        let (left, right) = (self.left(node), self.right(node));
        let red = self.color(node).is_red();
        if red && (self.color(left).is_red() || self.color(right).is_red()) {
            return Err(Violation::ConsecutiveReds(self.value(node).clone()));
        }
        for child in [left, right] {
            if !child.is_nil() && self.parent(child) != node {
                return Err(Violation::BrokenParent(self.value(child).clone()));
            }
        }
        if !left.is_nil() && self.value(left) >= self.value(node) {
            let (lval, parent) = (self.value(left).clone(), self.value(node).clone());
            return Err(Violation::SortError(lval, parent));
        }
        if !right.is_nil() && self.value(right) <= self.value(node) {
            let (rval, parent) = (self.value(right).clone(), self.value(node).clone());
            return Err(Violation::SortError(rval, parent));
        }

        let lblacks = self.validate_tree(left, nodes)?;
        let rblacks = self.validate_tree(right, nodes)?;
        if lblacks != rblacks {
            return Err(Violation::UnbalancedBlacks {
                left: lblacks,
                right: rblacks,
            });
        }
        Ok(lblacks + usize::from(!red))
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `nil` for the sentinel, the value otherwise.
struct Link<'a, T>(Option<&'a T>);

impl<T> fmt::Display for Link<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("nil"),
        }
    }
}

/// In-order dump of every node with its color and neighbours:
/// `[(1: RED, Parent: 2, Left: nil, Right: nil), ...]`.
impl<T> fmt::Display for RedBlackTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut result = Ok(());
        let mut first = true;
        self.inorder_for_each_core(self.root, &mut |id| {
            if result.is_err() {
                return;
            }
            let sep = if first { "" } else { ", " };
            first = false;
            let node = self.node(id);
            result = write!(
                f,
                "{sep}({}: {}, Parent: {}, Left: {}, Right: {})",
                self.value(id),
                node.color,
                Link(self.get_value(node.parent)),
                Link(self.get_value(node.left)),
                Link(self.get_value(node.right)),
            );
        });
        result?;
        f.write_str("]")
    }
}

impl<T> fmt::Debug for RedBlackTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Values<'a, T>(&'a RedBlackTree<T>);

        impl<T> fmt::Debug for Values<'_, T>
        where
            T: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("RedBlackTree")
            .field("len", &self.len)
            .field("root", &self.get_value(self.root))
            .field("nodes", &Values(self))
            .finish()
    }
}

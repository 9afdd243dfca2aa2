#![deny(rust_2018_idioms)]

//! Ordered set built on a red-black tree whose nodes are additionally
//! threaded into an ascending doubly linked list.
//!
//! ```
//! use rbtree::RedBlackTree;
//!
//! let mut tree: RedBlackTree<i32> = [5, 4, 2, 3, 6, 1].into_iter().collect();
//! assert!(tree.remove(&4));
//! assert_eq!(tree.lower(&4), Some(&3));
//! assert_eq!(tree.higher(&4), Some(&5));
//! assert_eq!(tree.descending_iter().copied().collect::<Vec<_>>(), [6, 5, 3, 2, 1]);
//! ```

mod cursor;
mod error;
mod iter;
mod node;
mod red_black_tree;
mod set;

pub use cursor::{Cursor, Direction};
pub use error::{TreeError, Violation};
pub use iter::Iter;
pub use red_black_tree::RedBlackTree;
pub use set::TreeSet;

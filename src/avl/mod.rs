//! Height-balanced binary search tree (AVL tree).
//!
//! This module provides [`AvlTree`], a mutable ordered map that keeps the
//! heights of every node's two subtrees within one of each other.
//!
//! # Overview
//!
//! - O(log N) get
//! - O(log N) insert
//! - O(log N) remove
//! - O(1) len and `is_empty`
//! - Double-ended in-order iteration
//!
//! # Examples
//!
//! ```rust
//! use avltree::avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [5, 2, 8, 1, 3, 7, 9] {
//!     tree.insert(key, key * 10);
//! }
//!
//! // Removing a node with two children promotes its in-order predecessor
//! tree.remove(&5);
//! assert_eq!(tree.root().map(|root| *root.key()), Some(3));
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3, &7, &8, &9]);
//! assert_eq!(tree.validate(), Ok(()));
//! ```
//!
//! # Internal Structure
//!
//! Nodes live in an arena and link to each other by [`NodeId`]. Each node
//! stores a balance factor, the height of its right subtree minus the height
//! of its left subtree. The tree maintains:
//!
//! 1. Every balance factor is -1, 0 or +1
//! 2. Keys increase strictly from left to right
//! 3. Every child's parent link points back at its parent
//!
//! After a structural change the affected path is walked upwards, updating
//! balance factors and applying at most a single or double rotation where a
//! factor would reach ±2.

mod cursor;
mod insert;
mod iter;
mod node;
mod remove;
mod rotation;
mod tree;
mod validate;

pub use cursor::NodeRef;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;
pub use node::NodeId;
pub use node::Side;
pub use tree::AvlTree;

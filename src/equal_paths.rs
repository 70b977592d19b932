//! Leaf-depth equality for arbitrary binary trees.
//!
//! [`equal_paths`] answers whether every root-to-leaf path has the same
//! length. It works on anything implementing [`BinaryNode`]: the plain
//! [`BinaryTree`] defined here, or an [`AvlTree`](crate::avl::AvlTree)
//! through its [`NodeRef`] handles.
//!
//! # Examples
//!
//! ```rust
//! use avltree::equal_paths::{BinaryTree, equal_paths};
//!
//! //     1
//! //    / \
//! //   2   3
//! let even = BinaryTree::leaf(1)
//!     .with_left(BinaryTree::leaf(2))
//!     .with_right(BinaryTree::leaf(3));
//! assert!(equal_paths(Some(&even)));
//!
//! //     1
//! //    / \
//! //   2   3
//! //  /
//! // 4
//! let uneven = BinaryTree::leaf(1)
//!     .with_left(BinaryTree::leaf(2).with_left(BinaryTree::leaf(4)))
//!     .with_right(BinaryTree::leaf(3));
//! assert!(!equal_paths(Some(&uneven)));
//! ```

use crate::avl::NodeRef;

/// A node of a binary tree that can hand out its children.
pub trait BinaryNode: Sized {
    /// Returns the left child.
    fn left(&self) -> Option<Self>;

    /// Returns the right child.
    fn right(&self) -> Option<Self>;
}

/// A plain, unbalanced binary tree owning its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryTree<T> {
    value: T,
    left: Option<Box<Self>>,
    right: Option<Box<Self>>,
}

impl<T> BinaryTree<T> {
    /// Creates a node without children.
    #[must_use]
    pub const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Returns this node with `left` as its left subtree.
    #[must_use]
    pub fn with_left(self, left: Self) -> Self {
        Self {
            left: Some(Box::new(left)),
            ..self
        }
    }

    /// Returns this node with `right` as its right subtree.
    #[must_use]
    pub fn with_right(self, right: Self) -> Self {
        Self {
            right: Some(Box::new(right)),
            ..self
        }
    }

    /// Returns the value stored in this node.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }
}

impl<T> BinaryNode for &BinaryTree<T> {
    fn left(&self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<Self> {
        self.right.as_deref()
    }
}

impl<K, V> BinaryNode for NodeRef<'_, K, V> {
    fn left(&self) -> Option<Self> {
        Self::left(self)
    }

    fn right(&self) -> Option<Self> {
        Self::right(self)
    }
}

/// Returns the number of levels below and including `node`, `0` for none.
#[must_use]
pub fn height<N: BinaryNode>(node: Option<&N>) -> usize {
    node.map_or(0, |node| {
        let left = height(node.left().as_ref());
        let right = height(node.right().as_ref());
        1 + left.max(right)
    })
}

/// Returns `true` if every leaf of the tree lies at the same depth.
///
/// A node with a single child contributes only the paths through that
/// child. An empty tree trivially qualifies.
#[must_use]
pub fn equal_paths<N: BinaryNode>(root: Option<N>) -> bool {
    let mut leaf_depth = None;
    root.is_none_or(|root| leaves_at_depth(&root, 0, &mut leaf_depth))
}

fn leaves_at_depth<N: BinaryNode>(node: &N, depth: usize, leaf_depth: &mut Option<usize>) -> bool {
    match (node.left(), node.right()) {
        (None, None) => *leaf_depth.get_or_insert(depth) == depth,
        (left, right) => left
            .into_iter()
            .chain(right)
            .all(|child| leaves_at_depth(&child, depth + 1, leaf_depth)),
    }
}

//! Error types for the AVL tree.
//!
//! Insertion and removal are total over their inputs, so there is no
//! user-facing error taxonomy. [`InvariantViolation`] describes a broken
//! structural invariant: it is what [`AvlTree::validate`] reports, and what
//! the balancing code raises (and escalates to a panic) when a link it relies
//! on is missing.
//!
//! [`AvlTree::validate`]: crate::avl::AvlTree::validate

use crate::avl::{NodeId, Side};

/// A broken structural invariant of an [`AvlTree`](crate::avl::AvlTree).
///
/// # Examples
///
/// ```rust
/// use avltree::avl::AvlTree;
///
/// let tree: AvlTree<i32, &str> = [(2, "two"), (1, "one"), (3, "three")]
///     .into_iter()
///     .collect();
/// assert_eq!(tree.validate(), Ok(()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A child expected by the balancing logic is absent.
    MissingChild {
        /// The node whose child is missing.
        node: NodeId,
        /// Which child slot was empty.
        side: Side,
    },
    /// A link points at an arena slot that holds no node.
    VacantSlot {
        /// The dangling index.
        node: NodeId,
    },
    /// A child's parent link does not point back at its parent.
    ParentMismatch {
        /// The child with the inconsistent back-reference.
        node: NodeId,
    },
    /// The in-order key sequence is not strictly increasing at this node.
    KeyOrder {
        /// The first node found out of order.
        node: NodeId,
    },
    /// The stored balance factor differs from the recomputed one.
    BalanceMismatch {
        /// The offending node.
        node: NodeId,
        /// The balance factor stored in the node.
        recorded: i8,
        /// Right height minus left height as recomputed.
        actual: isize,
    },
    /// A balance factor is outside `-1..=1`.
    Unbalanced {
        /// The offending node.
        node: NodeId,
        /// Its balance factor.
        balance: i8,
    },
    /// The cached entry count differs from the number of reachable nodes.
    LengthMismatch {
        /// The cached count.
        recorded: usize,
        /// Nodes reachable from the root.
        actual: usize,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingChild { node, side } => {
                write!(formatter, "node {node} has no {side} child")
            }
            Self::VacantSlot { node } => write!(formatter, "link to vacant slot {node}"),
            Self::ParentMismatch { node } => {
                write!(formatter, "node {node} does not point back at its parent")
            }
            Self::KeyOrder { node } => {
                write!(formatter, "key of node {node} breaks in-order ordering")
            }
            Self::BalanceMismatch {
                node,
                recorded,
                actual,
            } => write!(
                formatter,
                "node {node} records balance {recorded} but its subtrees differ by {actual}"
            ),
            Self::Unbalanced { node, balance } => {
                write!(formatter, "node {node} has balance {balance} outside -1..=1")
            }
            Self::LengthMismatch { recorded, actual } => write!(
                formatter,
                "tree records {recorded} entries but {actual} are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

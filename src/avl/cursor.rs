//! Read-only handles on individual tree nodes.

use std::fmt;

use super::node::{Node, NodeId, NodeStore, Side};

/// A shared view of one node of an [`AvlTree`](super::AvlTree).
///
/// Handles borrow the tree, so the shape they describe cannot change while
/// they are alive.
///
/// # Examples
///
/// ```rust
/// use avltree::avl::AvlTree;
///
/// let tree: AvlTree<i32, ()> = [30, 10, 20].into_iter().map(|key| (key, ())).collect();
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &20);
/// assert_eq!(root.left().map(|node| *node.key()), Some(10));
/// assert_eq!(root.right().map(|node| *node.key()), Some(30));
/// ```
pub struct NodeRef<'a, K, V> {
    store: &'a NodeStore<K, V>,
    id: NodeId,
    node: &'a Node<K, V>,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(super) fn new(store: &'a NodeStore<K, V>, id: NodeId) -> Option<Self> {
        store.get(id).map(|node| Self { store, id, node })
    }

    fn relative(&self, id: Option<NodeId>) -> Option<Self> {
        id.and_then(|id| Self::new(self.store, id))
    }

    /// Returns the arena index of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's key.
    #[must_use]
    pub const fn key(&self) -> &'a K {
        &self.node.key
    }

    /// Returns the node's value.
    #[must_use]
    pub const fn value(&self) -> &'a V {
        &self.node.value
    }

    /// Returns the balance factor: right height minus left height.
    #[must_use]
    pub const fn balance(&self) -> i8 {
        self.node.balance
    }

    /// Returns the child on `side`.
    #[must_use]
    pub fn child(&self, side: Side) -> Option<Self> {
        self.relative(self.node.child(side))
    }

    /// Returns the left child.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.child(Side::Left)
    }

    /// Returns the right child.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.child(Side::Right)
    }

    /// Returns the parent, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.relative(self.node.parent)
    }

    /// Returns the node with the next smaller key.
    #[must_use]
    pub fn predecessor(&self) -> Option<Self> {
        self.relative(self.store.predecessor(self.id))
    }

    /// Returns the node with the next larger key.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        self.relative(self.store.successor(self.id))
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }

    /// Returns the number of levels in the subtree rooted here, counted
    /// from the links rather than from balance factors.
    #[must_use]
    pub fn height(&self) -> usize {
        let left = self.left().map_or(0, |left| left.height());
        let right = self.right().map_or(0, |right| right.height());
        1 + left.max(right)
    }
}

impl<K: fmt::Debug, V> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &self.node.key)
            .field("balance", &self.node.balance)
            .finish()
    }
}

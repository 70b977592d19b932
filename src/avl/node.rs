//! Arena-backed node storage for the binary search tree layer.
//!
//! Nodes live in a `Vec` of slots and refer to each other through
//! [`NodeId`] indices. Child links are the tree's ownership edges; parent
//! links are plain back-references into the same arena, so there are no
//! reference cycles and no `unsafe`.
//!
//! This layer knows nothing about balancing. It offers node allocation,
//! lookup, in-order neighbours, structural unlinking of nodes with at most
//! one child, and a position swap. The AVL code drives it and keeps the
//! balance factors consistent.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::InvariantViolation;

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a node inside a tree's arena.
///
/// Identifiers are only meaningful for the tree that produced them, and a
/// freed slot may be reused by a later insertion.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// A child slot of a node.
///
/// Every left/right-symmetric step of the balancing code is written once
/// in terms of a `Side` and its [`opposite`](Side::opposite).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    /// The left child, holding smaller keys.
    Left,
    /// The right child, holding larger keys.
    Right,
}

impl Side {
    /// Returns the other side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the balance-factor contribution of growing this side:
    /// `-1` for left, `+1` for right.
    #[inline]
    #[must_use]
    pub const fn weight(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => formatter.write_str("left"),
            Self::Right => formatter.write_str("right"),
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// A single entry of the tree together with its structural links.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Height of the right subtree minus height of the left subtree.
    pub(crate) balance: i8,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    const fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            balance: 0,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    const fn child_slot(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Parent and child links of a node, copied out for re-linking.
#[derive(Clone, Copy)]
struct Links {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Outcome of descending the tree for a key.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Search {
    /// The key is stored at this node.
    Found(NodeId),
    /// The key is absent; a new node belongs in `side` of `parent`, or at the
    /// root when `parent` is `None`.
    Vacant {
        parent: Option<NodeId>,
        side: Side,
    },
}

// =============================================================================
// NodeStore Definition
// =============================================================================

/// Arena of nodes plus the root link.
#[derive(Clone, Debug)]
pub(crate) struct NodeStore<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    vacant: Vec<NodeId>,
    root: Option<NodeId>,
    length: usize,
}

impl<K, V> NodeStore<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            root: None,
            length: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    pub(crate) const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of slots ever allocated, occupied or not.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
        self.root = None;
        self.length = 0;
    }

    /// Returns the node at `id` if the slot is occupied.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node<K, V>, InvariantViolation> {
        self.get(id)
            .ok_or(InvariantViolation::VacantSlot { node: id })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<K, V>, InvariantViolation> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(InvariantViolation::VacantSlot { node: id })
    }

    pub(crate) fn parent(&self, id: NodeId) -> Result<Option<NodeId>, InvariantViolation> {
        Ok(self.node(id)?.parent)
    }

    pub(crate) fn child(&self, id: NodeId, side: Side) -> Result<Option<NodeId>, InvariantViolation> {
        Ok(self.node(id)?.child(side))
    }

    /// Returns the child on `side`, treating its absence as a broken invariant.
    pub(crate) fn require_child(&self, id: NodeId, side: Side) -> Result<NodeId, InvariantViolation> {
        self.child(id, side)?
            .ok_or(InvariantViolation::MissingChild { node: id, side })
    }

    pub(crate) fn balance(&self, id: NodeId) -> Result<i8, InvariantViolation> {
        Ok(self.node(id)?.balance)
    }

    pub(crate) fn set_balance(&mut self, id: NodeId, balance: i8) -> Result<(), InvariantViolation> {
        self.node_mut(id)?.balance = balance;
        Ok(())
    }

    /// Returns which child of its parent `id` is, or `None` for the root.
    pub(crate) fn side_of(&self, id: NodeId) -> Result<Option<Side>, InvariantViolation> {
        let Some(parent) = self.parent(id)? else {
            return Ok(None);
        };
        let parent_node = self.node(parent)?;
        if parent_node.left == Some(id) {
            Ok(Some(Side::Left))
        } else if parent_node.right == Some(id) {
            Ok(Some(Side::Right))
        } else {
            Err(InvariantViolation::ParentMismatch { node: id })
        }
    }

    /// Puts `child` into the `side` slot of `parent` and points it back.
    pub(crate) fn set_child(
        &mut self,
        parent: NodeId,
        side: Side,
        child: Option<NodeId>,
    ) -> Result<(), InvariantViolation> {
        *self.node_mut(parent)?.child_slot(side) = child;
        if let Some(child) = child {
            self.node_mut(child)?.parent = Some(parent);
        }
        Ok(())
    }

    /// Re-points whatever referred to `old` (its parent's child slot, or the
    /// root) at `new`, and sets `new`'s parent accordingly.
    pub(crate) fn replace_child(
        &mut self,
        old: NodeId,
        new: Option<NodeId>,
    ) -> Result<(), InvariantViolation> {
        let parent = self.parent(old)?;
        match (parent, self.side_of(old)?) {
            (Some(parent), Some(side)) => self.set_child(parent, side, new),
            _ => {
                self.root = new;
                if let Some(new) = new {
                    self.node_mut(new)?.parent = None;
                }
                Ok(())
            }
        }
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Creates a balanced, childless node hanging off `parent` (or as the
    /// root) and returns its index. Vacant slots are reused first.
    pub(crate) fn attach(
        &mut self,
        key: K,
        value: V,
        parent: Option<NodeId>,
        side: Side,
    ) -> Result<NodeId, InvariantViolation> {
        let node = Node::new(key, value, parent);
        let id = if let Some(id) = self.vacant.pop() {
            self.slots[id.index()] = Some(node);
            id
        } else {
            self.slots.push(Some(node));
            NodeId::new(self.slots.len() - 1)
        };
        self.length += 1;

        match parent {
            Some(parent) => self.set_child(parent, side, Some(id))?,
            None => self.root = Some(id),
        }
        Ok(id)
    }

    fn release(&mut self, id: NodeId) -> Result<Node<K, V>, InvariantViolation> {
        let node = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(InvariantViolation::VacantSlot { node: id })?;
        self.vacant.push(id);
        self.length -= 1;
        Ok(node)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Descends from the root for `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            let Some(node) = self.get(id) else { break };
            side = match key.cmp(node.key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(id),
            };
            parent = Some(id);
            current = node.child(side);
        }
        Search::Vacant { parent, side }
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Some(id),
            Search::Vacant { .. } => None,
        }
    }

    /// Follows `side` links from `from` as far as they go.
    pub(crate) fn extreme(&self, from: NodeId, side: Side) -> NodeId {
        let mut current = from;
        while let Some(next) = self.get(current).and_then(|node| node.child(side)) {
            current = next;
        }
        current
    }

    /// Returns the in-order neighbour of `id` in direction `side`: the
    /// predecessor for [`Side::Left`], the successor for [`Side::Right`].
    pub(crate) fn neighbor(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.get(id)?;
        if let Some(child) = node.child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = id;
        let mut parent = node.parent;
        while let Some(ancestor) = parent {
            let ancestor_node = self.get(ancestor)?;
            if ancestor_node.child(side) != Some(current) {
                return Some(ancestor);
            }
            current = ancestor;
            parent = ancestor_node.parent;
        }
        None
    }

    /// Consumes the store, returning its entries in ascending key order.
    pub(crate) fn into_entries(mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.length);
        let mut current = self.root.map(|root| self.extreme(root, Side::Left));
        while let Some(id) = current {
            order.push(id);
            current = self.successor(id);
        }
        order
            .into_iter()
            .filter_map(|id| self.slots.get_mut(id.index()).and_then(Option::take))
            .map(|node| (node.key, node.value))
            .collect()
    }

    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbor(id, Side::Left)
    }

    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbor(id, Side::Right)
    }

    // =========================================================================
    // Structural Removal
    // =========================================================================

    /// Unlinks a childless node and frees its slot.
    pub(crate) fn detach_leaf(&mut self, id: NodeId) -> Result<Node<K, V>, InvariantViolation> {
        self.replace_child(id, None)?;
        self.release(id)
    }

    /// Unlinks a node whose only child is on `side`, moving that child up
    /// into its place, and frees the node's slot.
    pub(crate) fn splice_up(&mut self, id: NodeId, side: Side) -> Result<Node<K, V>, InvariantViolation> {
        let child = self.require_child(id, side)?;
        self.replace_child(id, Some(child))?;
        self.release(id)
    }

    // =========================================================================
    // Position Swap
    // =========================================================================

    fn links(&self, id: NodeId) -> Result<Links, InvariantViolation> {
        let node = self.node(id)?;
        Ok(Links {
            parent: node.parent,
            left: node.left,
            right: node.right,
        })
    }

    /// Exchanges the tree positions of two nodes.
    ///
    /// Keys, values and balance factors stay with their node; only the links
    /// (and the links of neighbours pointing at them) change. Works when one
    /// node is the other's parent.
    pub(crate) fn swap_positions(&mut self, first: NodeId, second: NodeId) -> Result<(), InvariantViolation> {
        if first == second {
            return Ok(());
        }

        let first_links = self.links(first)?;
        let second_links = self.links(second)?;
        let first_side = self.side_of(first)?;
        let second_side = self.side_of(second)?;

        let exchange = |link: Option<NodeId>| match link {
            Some(id) if id == first => Some(second),
            Some(id) if id == second => Some(first),
            other => other,
        };

        self.repoint_parent(first_links.parent, first_side, first, second)?;
        self.repoint_parent(second_links.parent, second_side, second, first)?;
        for child in [first_links.left, first_links.right].into_iter().flatten() {
            if child != second {
                self.node_mut(child)?.parent = Some(second);
            }
        }
        for child in [second_links.left, second_links.right].into_iter().flatten() {
            if child != first {
                self.node_mut(child)?.parent = Some(first);
            }
        }

        let first_node = self.node_mut(first)?;
        first_node.parent = exchange(second_links.parent);
        first_node.left = exchange(second_links.left);
        first_node.right = exchange(second_links.right);

        let second_node = self.node_mut(second)?;
        second_node.parent = exchange(first_links.parent);
        second_node.left = exchange(first_links.left);
        second_node.right = exchange(first_links.right);
        Ok(())
    }

    /// Points the slot that held `old` at `new`, unless that slot belongs to
    /// `new` itself (the adjacent case is settled by the caller).
    fn repoint_parent(
        &mut self,
        parent: Option<NodeId>,
        side: Option<Side>,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), InvariantViolation> {
        match (parent, side) {
            (Some(parent), _) if parent == new => Ok(()),
            (Some(parent), Some(side)) => {
                *self.node_mut(parent)?.child_slot(side) = Some(new);
                Ok(())
            }
            (Some(_), None) => Err(InvariantViolation::ParentMismatch { node: old }),
            (None, _) => {
                self.root = Some(new);
                Ok(())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Builds an unbalanced BST by plain descent.
    fn store_from(keys: &[i32]) -> NodeStore<i32, i32> {
        let mut store = NodeStore::new();
        for &key in keys {
            if let Search::Vacant { parent, side } = store.search(&key) {
                store.attach(key, key * 10, parent, side).unwrap();
            }
        }
        store
    }

    fn in_order(store: &NodeStore<i32, i32>) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut current = store.root().map(|root| store.extreme(root, Side::Left));
        while let Some(id) = current {
            keys.push(store.node(id).unwrap().key);
            current = store.successor(id);
        }
        keys
    }

    fn key_of(store: &NodeStore<i32, i32>, id: Option<NodeId>) -> Option<i32> {
        id.map(|id| store.node(id).unwrap().key)
    }

    #[rstest]
    fn test_side_opposite_and_weight() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.weight(), -1);
        assert_eq!(Side::Right.weight(), 1);
    }

    #[rstest]
    fn test_attach_links_parent_and_child() {
        let store = store_from(&[5, 3, 8]);
        let root = store.root().unwrap();
        let left = store.child(root, Side::Left).unwrap().unwrap();
        assert_eq!(store.node(left).unwrap().key, 3);
        assert_eq!(store.parent(left).unwrap(), Some(root));
        assert_eq!(store.side_of(left).unwrap(), Some(Side::Left));
        assert_eq!(store.side_of(root).unwrap(), None);
        assert_eq!(store.len(), 3);
    }

    #[rstest]
    fn test_find_present_and_absent() {
        let store = store_from(&[5, 3, 8, 1]);
        assert_eq!(key_of(&store, store.find(&1)), Some(1));
        assert_eq!(store.find(&4), None);
    }

    #[rstest]
    fn test_predecessor_and_successor() {
        let store = store_from(&[5, 2, 8, 1, 3, 7, 9]);
        let five = store.find(&5).unwrap();
        let three = store.find(&3).unwrap();
        let one = store.find(&1).unwrap();
        assert_eq!(key_of(&store, store.predecessor(five)), Some(3));
        assert_eq!(key_of(&store, store.successor(five)), Some(7));
        assert_eq!(key_of(&store, store.successor(three)), Some(5));
        assert_eq!(store.predecessor(one), None);
        assert_eq!(in_order(&store), vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[rstest]
    fn test_detach_leaf_frees_slot_for_reuse() {
        let mut store = store_from(&[5, 3, 8]);
        let three = store.find(&3).unwrap();
        let removed = store.detach_leaf(three).unwrap();
        assert_eq!(removed.key, 3);
        assert_eq!(store.len(), 2);
        assert_eq!(store.child(store.root().unwrap(), Side::Left).unwrap(), None);

        if let Search::Vacant { parent, side } = store.search(&4) {
            let id = store.attach(4, 40, parent, side).unwrap();
            assert_eq!(id, three);
        }
        assert_eq!(store.capacity(), 3);
    }

    #[rstest]
    fn test_detach_only_node_empties_root() {
        let mut store = store_from(&[1]);
        let root = store.root().unwrap();
        store.detach_leaf(root).unwrap();
        assert_eq!(store.root(), None);
        assert_eq!(store.len(), 0);
    }

    #[rstest]
    #[case(Side::Left, &[5, 3, 1], 3, vec![1, 5])]
    #[case(Side::Right, &[5, 3, 4], 3, vec![4, 5])]
    fn test_splice_up(
        #[case] side: Side,
        #[case] keys: &[i32],
        #[case] removed: i32,
        #[case] expected: Vec<i32>,
    ) {
        let mut store = store_from(keys);
        let id = store.find(&removed).unwrap();
        let child = store.child(id, side).unwrap();
        store.splice_up(id, side).unwrap();
        assert_eq!(in_order(&store), expected);
        let root = store.root().unwrap();
        assert_eq!(store.child(root, Side::Left).unwrap(), child);
        assert_eq!(store.parent(child.unwrap()).unwrap(), Some(root));
    }

    #[rstest]
    fn test_splice_up_root_promotes_child() {
        let mut store = store_from(&[5, 8]);
        let root = store.root().unwrap();
        store.splice_up(root, Side::Right).unwrap();
        let new_root = store.root().unwrap();
        assert_eq!(store.node(new_root).unwrap().key, 8);
        assert_eq!(store.parent(new_root).unwrap(), None);
    }

    #[rstest]
    fn test_splice_up_without_child_is_violation() {
        let mut store = store_from(&[5]);
        let root = store.root().unwrap();
        assert_eq!(
            store.splice_up(root, Side::Left).unwrap_err(),
            InvariantViolation::MissingChild {
                node: root,
                side: Side::Left
            }
        );
    }

    #[rstest]
    fn test_swap_positions_non_adjacent() {
        // 5 is root with two children, its predecessor 3 is deeper on the left
        let mut store = store_from(&[5, 2, 8, 1, 3]);
        let five = store.find(&5).unwrap();
        let three = store.find(&3).unwrap();
        store.swap_positions(five, three).unwrap();

        assert_eq!(store.root(), Some(three));
        assert_eq!(store.parent(three).unwrap(), None);
        assert_eq!(key_of(&store, store.child(three, Side::Left).unwrap()), Some(2));
        assert_eq!(key_of(&store, store.child(three, Side::Right).unwrap()), Some(8));
        let two = store.find_node_by_key(2);
        assert_eq!(store.child(two, Side::Right).unwrap(), Some(five));
        assert_eq!(store.parent(five).unwrap(), Some(two));
        assert_eq!(store.child(five, Side::Left).unwrap(), None);
    }

    #[rstest]
    fn test_swap_positions_adjacent_parent_child() {
        let mut store = store_from(&[5, 3, 8, 1]);
        let five = store.find(&5).unwrap();
        let three = store.find(&3).unwrap();
        store.swap_positions(five, three).unwrap();

        assert_eq!(store.root(), Some(three));
        assert_eq!(store.child(three, Side::Left).unwrap(), Some(five));
        assert_eq!(store.parent(five).unwrap(), Some(three));
        assert_eq!(key_of(&store, store.child(five, Side::Left).unwrap()), Some(1));
        assert_eq!(store.parent(store.find_node_by_key(1)).unwrap(), Some(five));
        assert_eq!(store.parent(store.find_node_by_key(8)).unwrap(), Some(three));
    }

    #[rstest]
    fn test_swap_positions_siblings() {
        let mut store = store_from(&[5, 3, 8]);
        let three = store.find(&3).unwrap();
        let eight = store.find(&8).unwrap();
        store.swap_positions(three, eight).unwrap();
        let root = store.root().unwrap();
        assert_eq!(store.child(root, Side::Left).unwrap(), Some(eight));
        assert_eq!(store.child(root, Side::Right).unwrap(), Some(three));
    }

    impl NodeStore<i32, i32> {
        /// Finds a node by scanning slots, ignoring ordering.
        fn find_node_by_key(&self, key: i32) -> NodeId {
            let index = self
                .slots
                .iter()
                .position(|slot| slot.as_ref().is_some_and(|node| node.key == key))
                .unwrap();
            NodeId::new(index)
        }
    }
}

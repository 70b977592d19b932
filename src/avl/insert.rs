//! Insertion and the upward balance fix-up that follows it.

use super::node::{NodeId, Search, Side};
use super::tree::{AvlTree, escalate};
use crate::error::InvariantViolation;

impl<K: Ord, V> AvlTree<K, V> {
    /// Inserts a key-value pair.
    ///
    /// If the key is already present its value is overwritten in place and
    /// the shape of the tree does not change. Otherwise a new leaf is
    /// attached and the tree is rebalanced with at most one single or
    /// double rotation.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Panics
    ///
    /// Panics only if the tree's internal links are inconsistent, which
    /// indicates a defect in the balancing code itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1, "one");
    /// tree.insert(1, "ONE");
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&1), Some(&"ONE"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        if let Err(violation) = self.try_insert(key, value) {
            escalate(&violation);
        }
    }

    fn try_insert(&mut self, key: K, value: V) -> Result<(), InvariantViolation> {
        let (parent, side) = match self.store.search(&key) {
            Search::Found(id) => {
                self.store.node_mut(id)?.value = value;
                return Ok(());
            }
            Search::Vacant { parent, side } => (parent, side),
        };

        let node = self.store.attach(key, value, parent, side)?;
        let Some(parent) = parent else {
            return Ok(());
        };

        // A parent that leaned one way now has two children.
        if self.store.balance(parent)? != 0 {
            return self.store.set_balance(parent, 0);
        }
        self.store.set_balance(parent, side.weight())?;
        self.insert_fix(parent, node)
    }

    /// Walks up from `parent`, whose subtree just grew by one level through
    /// its child `child`, until the growth is absorbed or one rotation
    /// removes it.
    fn insert_fix(&mut self, mut parent: NodeId, mut child: NodeId) -> Result<(), InvariantViolation> {
        loop {
            let Some(grandparent) = self.store.parent(parent)? else {
                return Ok(());
            };
            let side = self
                .store
                .side_of(parent)?
                .ok_or(InvariantViolation::ParentMismatch { node: parent })?;
            let weight = side.weight();
            let balance = self.store.balance(grandparent)? + weight;

            if balance == 0 {
                return self.store.set_balance(grandparent, 0);
            }
            if balance == weight {
                self.store.set_balance(grandparent, balance)?;
                child = parent;
                parent = grandparent;
                continue;
            }

            if self.store.side_of(child)? == Some(side) {
                tracing::trace!(node = %grandparent, %side, "insert: single rotation");
                self.rotate(grandparent, side.opposite())?;
                self.store.set_balance(grandparent, 0)?;
                self.store.set_balance(parent, 0)?;
            } else {
                tracing::trace!(node = %grandparent, %side, "insert: double rotation");
                let pivot_balance = self.store.balance(child)?;
                self.rotate(parent, side)?;
                self.rotate(grandparent, side.opposite())?;
                let (parent_balance, grandparent_balance) = if pivot_balance == weight {
                    (0, -weight)
                } else if pivot_balance == 0 {
                    (0, 0)
                } else {
                    (weight, 0)
                };
                self.store.set_balance(parent, parent_balance)?;
                self.store.set_balance(grandparent, grandparent_balance)?;
                self.store.set_balance(child, 0)?;
            }
            return Ok(());
        }
    }
}

//! Independent verification of the tree's structural invariants.

use super::node::{NodeId, Side};
use super::tree::AvlTree;
use crate::error::InvariantViolation;

impl<K: Ord, V> AvlTree<K, V> {
    /// Checks every structural invariant from scratch.
    ///
    /// Heights are recomputed from the links, not from the stored balance
    /// factors, so this catches bookkeeping errors as well as broken links.
    /// The checks are: parent links agree with child links, each stored
    /// balance equals right height minus left height and lies in `-1..=1`,
    /// keys are strictly increasing in order, and the cached length matches
    /// the number of reachable nodes.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::avl::AvlTree;
    ///
    /// let mut tree: AvlTree<u32, ()> = (0..100).map(|key| (key, ())).collect();
    /// for key in (0..100).step_by(3) {
    ///     tree.remove(&key);
    /// }
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut reachable = 0;
        if let Some(root) = self.store.root() {
            if self.store.parent(root)?.is_some() {
                return Err(InvariantViolation::ParentMismatch { node: root });
            }
            self.subtree_height(root, &mut reachable)?;
        }
        if reachable != self.store.len() {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.store.len(),
                actual: reachable,
            });
        }
        self.check_order()
    }

    /// Returns the height of the subtree at `id`, verifying it on the way.
    fn subtree_height(&self, id: NodeId, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        *reachable += 1;
        // More nodes than slots means the links form a cycle.
        if *reachable > self.store.capacity() {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.store.len(),
                actual: *reachable,
            });
        }

        let node = self.store.node(id)?;
        let mut heights = [0_usize; 2];
        for (height, side) in heights.iter_mut().zip([Side::Left, Side::Right]) {
            if let Some(child) = node.child(side) {
                if self.store.parent(child)? != Some(id) {
                    return Err(InvariantViolation::ParentMismatch { node: child });
                }
                *height = self.subtree_height(child, reachable)?;
            }
        }

        let [left, right] = heights;
        let actual = right.cast_signed() - left.cast_signed();
        if isize::from(node.balance) != actual {
            return Err(InvariantViolation::BalanceMismatch {
                node: id,
                recorded: node.balance,
                actual,
            });
        }
        if !(-1..=1).contains(&node.balance) {
            return Err(InvariantViolation::Unbalanced {
                node: id,
                balance: node.balance,
            });
        }
        Ok(1 + left.max(right))
    }

    fn check_order(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.store.root() else {
            return Ok(());
        };
        let mut previous = self.store.extreme(root, Side::Left);
        while let Some(current) = self.store.successor(previous) {
            if self.store.node(previous)?.key >= self.store.node(current)?.key {
                return Err(InvariantViolation::KeyOrder { node: current });
            }
            previous = current;
        }
        Ok(())
    }
}

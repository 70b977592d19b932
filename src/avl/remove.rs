//! Removal, the predecessor swap for two-child nodes, and the upward
//! balance fix-up after a subtree shrinks.

use std::borrow::Borrow;

use super::node::{NodeId, Side};
use super::tree::{AvlTree, escalate};
use crate::error::InvariantViolation;

impl<K: Ord, V> AvlTree<K, V> {
    /// Removes `key` from the tree, returning its value.
    ///
    /// Removing an absent key is a no-op and leaves the tree untouched. A
    /// node with two children first trades places with its in-order
    /// predecessor, so the node that is physically unlinked never has more
    /// than one child.
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
    /// let mut tree: AvlTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(tree.remove(&1), Some("one"));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.try_remove(key) {
            Ok(value) => value,
            Err(violation) => escalate(&violation),
        }
    }

    fn try_remove<Q>(&mut self, key: &Q) -> Result<Option<V>, InvariantViolation>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(node) = self.store.find(key) else {
            return Ok(None);
        };

        let (left, right) = {
            let target = self.store.node(node)?;
            (target.left, target.right)
        };
        if left.is_some() && right.is_some() {
            let predecessor = self
                .store
                .predecessor(node)
                .ok_or(InvariantViolation::MissingChild {
                    node,
                    side: Side::Left,
                })?;
            self.node_swap(node, predecessor)?;
        }

        let parent = self.store.parent(node)?;
        let shrunk = self.store.side_of(node)?;
        let (has_left, has_right) = {
            let target = self.store.node(node)?;
            (target.left.is_some(), target.right.is_some())
        };
        let removed = if has_left {
            self.store.splice_up(node, Side::Left)?
        } else if has_right {
            self.store.splice_up(node, Side::Right)?
        } else {
            self.store.detach_leaf(node)?
        };

        if let (Some(parent), Some(shrunk)) = (parent, shrunk) {
            self.remove_fix(parent, shrunk)?;
        }
        Ok(Some(removed.value))
    }
}

impl<K, V> AvlTree<K, V> {
    /// Exchanges the tree positions of two nodes together with their balance
    /// factors, so each position keeps the balance it had.
    fn node_swap(&mut self, first: NodeId, second: NodeId) -> Result<(), InvariantViolation> {
        tracing::debug!(%first, %second, "swap nodes before removal");
        self.store.swap_positions(first, second)?;
        let first_balance = self.store.balance(first)?;
        let second_balance = self.store.balance(second)?;
        self.store.set_balance(first, second_balance)?;
        self.store.set_balance(second, first_balance)
    }

    /// Walks up from `node`, whose `shrunk` subtree just lost one level,
    /// rebalancing until the loss is absorbed or the root is reached.
    fn remove_fix(&mut self, mut node: NodeId, mut shrunk: Side) -> Result<(), InvariantViolation> {
        loop {
            // Where to continue if this subtree ends up shorter as well.
            let parent = self.store.parent(node)?;
            let parent_side = self.store.side_of(node)?;

            let taller = shrunk.opposite();
            let weight = taller.weight();
            let balance = self.store.balance(node)? + weight;

            if balance == weight {
                // Was even; still as tall as before.
                return self.store.set_balance(node, balance);
            }

            if balance != 0 {
                let child = self.store.require_child(node, taller)?;
                let child_balance = self.store.balance(child)?;

                if child_balance == 0 {
                    tracing::trace!(%node, %taller, "remove: single rotation, height kept");
                    self.rotate(node, shrunk)?;
                    self.store.set_balance(node, weight)?;
                    return self.store.set_balance(child, -weight);
                }

                if child_balance == weight {
                    tracing::trace!(%node, %taller, "remove: single rotation");
                    self.rotate(node, shrunk)?;
                    self.store.set_balance(node, 0)?;
                    self.store.set_balance(child, 0)?;
                } else {
                    tracing::trace!(%node, %taller, "remove: double rotation");
                    let grandchild = self.store.require_child(child, shrunk)?;
                    let grandchild_balance = self.store.balance(grandchild)?;
                    self.rotate(child, taller)?;
                    self.rotate(node, shrunk)?;
                    let (node_balance, child_balance) = if grandchild_balance == weight {
                        (-weight, 0)
                    } else if grandchild_balance == 0 {
                        (0, 0)
                    } else {
                        (0, weight)
                    };
                    self.store.set_balance(node, node_balance)?;
                    self.store.set_balance(child, child_balance)?;
                    self.store.set_balance(grandchild, 0)?;
                }
            } else {
                self.store.set_balance(node, 0)?;
            }

            match (parent, parent_side) {
                (Some(parent), Some(side)) => {
                    node = parent;
                    shrunk = side;
                }
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::avl::AvlTree;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        keys.iter().map(|&key| (key, key)).collect()
    }

    fn shape(tree: &AvlTree<i32, i32>) -> Vec<(i32, i8)> {
        let mut shape = Vec::new();
        let mut pending: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            shape.push((*node.key(), node.balance()));
            pending.extend(node.right());
            pending.extend(node.left());
        }
        shape
    }

    #[rstest]
    fn test_remove_absent_is_noop() {
        let mut tree = tree_of(&[5, 2, 8, 1]);
        let before = shape(&tree);
        assert_eq!(tree.remove(&42), None);
        assert_eq!(shape(&tree), before);
        assert_eq!(tree.len(), 4);
    }

    #[rstest]
    fn test_remove_only_node() {
        let mut tree = tree_of(&[1]);
        assert_eq!(tree.remove(&1), Some(1));
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[rstest]
    fn test_remove_two_children_uses_predecessor() {
        let mut tree = tree_of(&[5, 2, 8, 1, 3, 7, 9]);
        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(
            shape(&tree),
            vec![(3, 0), (2, -1), (1, 0), (8, 0), (7, 0), (9, 0)]
        );
        assert_eq!(tree.validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_with_adjacent_predecessor() {
        let mut tree = tree_of(&[5, 3, 8, 9]);
        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(shape(&tree), vec![(8, 0), (3, 0), (9, 0)]);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_shrink_absorbed() {
        let mut tree = tree_of(&[20, 10, 30]);
        tree.remove(&10);
        assert_eq!(shape(&tree), vec![(20, 1), (30, 0)]);
    }

    #[rstest]
    #[case::zig_zig(&[20, 10, 30, 40], 10, vec![(30, 0), (20, 0), (40, 0)])]
    #[case::mirrored_zig_zig(&[20, 10, 30, 5], 30, vec![(10, 0), (5, 0), (20, 0)])]
    #[case::zig_zag(&[20, 10, 30, 25], 10, vec![(25, 0), (20, 0), (30, 0)])]
    #[case::mirrored_zig_zag(&[20, 10, 30, 15], 30, vec![(15, 0), (10, 0), (20, 0)])]
    fn test_remove_rotations(
        #[case] keys: &[i32],
        #[case] removed: i32,
        #[case] expected: Vec<(i32, i8)>,
    ) {
        let mut tree = tree_of(keys);
        tree.remove(&removed);
        assert_eq!(shape(&tree), expected);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_rotation_with_even_child_stops() {
        let mut tree = tree_of(&[20, 10, 30, 25, 40]);
        tree.remove(&10);
        assert_eq!(shape(&tree), vec![(30, -1), (20, 1), (25, 0), (40, 0)]);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[rstest]
    fn test_remove_propagates_to_root() {
        // Fibonacci-shaped tree: removing the shallowest leaf rebalances twice
        let mut tree = tree_of(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        assert_eq!(tree.validate(), Ok(()));
        tree.remove(&12);
        assert_eq!(tree.validate(), Ok(()));
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[rstest]
    fn test_remove_everything_in_order() {
        let mut tree = tree_of(&(0..100).collect::<Vec<_>>());
        for key in 0..100 {
            assert_eq!(tree.remove(&key), Some(key));
            assert_eq!(tree.validate(), Ok(()));
        }
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_freed_slots_are_reused() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.remove(&2);
        tree.insert(4, 4);
        assert_eq!(tree.store.capacity(), 3);
    }
}

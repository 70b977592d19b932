//! Single rotations, the only structural move the balancing code makes.

use super::node::{NodeId, Side};
use super::tree::AvlTree;
use crate::error::InvariantViolation;

impl<K, V> AvlTree<K, V> {
    /// Rotates `pivot` down towards `direction`.
    ///
    /// The pivot's child on the opposite side takes the pivot's place (under
    /// the pivot's former parent, or as the root), that child's inner
    /// subtree moves across to the pivot, and the pivot becomes the child's
    /// `direction` child. `rotate(p, Side::Left)` is the classic left
    /// rotation.
    ///
    /// ```text
    ///       P                 C
    ///      / \               / \
    ///     a   C     ==>     P   c
    ///        / \           / \
    ///       b   c         a   b
    /// ```
    ///
    /// Balance factors are left alone; every caller knows the exact
    /// post-rotation values for its case and writes them itself.
    pub(super) fn rotate(&mut self, pivot: NodeId, direction: Side) -> Result<(), InvariantViolation> {
        let rising = self.store.require_child(pivot, direction.opposite())?;
        let inner = self.store.child(rising, direction)?;

        tracing::trace!(%pivot, %rising, %direction, "rotate");

        self.store.replace_child(pivot, Some(rising))?;
        self.store.set_child(pivot, direction.opposite(), inner)?;
        self.store.set_child(rising, direction, Some(pivot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::node::Search;
    use rstest::rstest;

    /// Builds a tree by plain descent, without any rebalancing.
    fn unbalanced(keys: &[i32]) -> AvlTree<i32, ()> {
        let mut tree = AvlTree::new();
        for &key in keys {
            if let Search::Vacant { parent, side } = tree.store.search(&key) {
                tree.store.attach(key, (), parent, side).unwrap();
            }
        }
        tree
    }

    fn shape(tree: &AvlTree<i32, ()>) -> Vec<(i32, Option<i32>)> {
        let mut shape = Vec::new();
        let mut pending: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            shape.push((*node.key(), node.parent().map(|parent| *parent.key())));
            pending.extend(node.right());
            pending.extend(node.left());
        }
        shape
    }

    #[rstest]
    fn test_rotate_left_at_root() {
        let mut tree = unbalanced(&[10, 5, 20, 15, 30]);
        let root = tree.store.root().unwrap();
        tree.rotate(root, Side::Left).unwrap();
        assert_eq!(
            shape(&tree),
            vec![
                (20, None),
                (10, Some(20)),
                (5, Some(10)),
                (15, Some(10)),
                (30, Some(20)),
            ]
        );
    }

    #[rstest]
    fn test_rotate_right_below_root() {
        let mut tree = unbalanced(&[50, 30, 60, 20, 40, 10]);
        let thirty = tree.store.find(&30).unwrap();
        tree.rotate(thirty, Side::Right).unwrap();
        assert_eq!(
            shape(&tree),
            vec![
                (50, None),
                (20, Some(50)),
                (10, Some(20)),
                (30, Some(20)),
                (40, Some(30)),
                (60, Some(50)),
            ]
        );
    }

    #[rstest]
    fn test_rotate_keeps_order() {
        let mut tree = unbalanced(&[1, 2, 3, 4]);
        let root = tree.store.root().unwrap();
        tree.rotate(root, Side::Left).unwrap();
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
        assert_eq!(tree.root().map(|root| *root.key()), Some(2));
    }

    #[rstest]
    fn test_rotate_without_rising_child_is_violation() {
        let mut tree = unbalanced(&[1, 2]);
        let root = tree.store.root().unwrap();
        assert_eq!(
            tree.rotate(root, Side::Right),
            Err(InvariantViolation::MissingChild {
                node: root,
                side: Side::Left,
            })
        );
    }
}

//! In-order iterators over an [`AvlTree`](super::AvlTree).
//!
//! Borrowing iterators walk parent links from node to node, so they need no
//! auxiliary stack and can be consumed from both ends.

use std::iter::FusedIterator;

use super::node::{NodeId, NodeStore, Side};

// =============================================================================
// Iter
// =============================================================================

/// An iterator over entries of an [`AvlTree`](super::AvlTree) in ascending
/// key order.
pub struct Iter<'a, K, V> {
    store: &'a NodeStore<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(store: &'a NodeStore<K, V>) -> Self {
        let root = store.root();
        Self {
            store,
            front: root.map(|root| store.extreme(root, Side::Left)),
            back: root.map(|root| store.extreme(root, Side::Right)),
            remaining: store.len(),
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = self.store.get(id)?;
        self.front = self.store.successor(id);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = self.store.get(id)?;
        self.back = self.store.predecessor(id);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

// =============================================================================
// Keys / Values
// =============================================================================

/// An iterator over the keys of an [`AvlTree`](super::AvlTree).
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`AvlTree`](super::AvlTree), in key
/// order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over entries of an [`AvlTree`](super::AvlTree) in
/// ascending key order.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(entries: Vec<(K, V)>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use crate::avl::AvlTree;
    use rstest::rstest;

    fn tree_of(keys: &[i32]) -> AvlTree<i32, i32> {
        keys.iter().map(|&key| (key, key * 10)).collect()
    }

    #[rstest]
    fn test_iter_ascending() {
        let tree = tree_of(&[5, 2, 8, 1, 3, 7, 9]);
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[rstest]
    fn test_iter_reversed() {
        let tree = tree_of(&[5, 2, 8, 1, 3]);
        let values: Vec<i32> = tree.values().rev().copied().collect();
        assert_eq!(values, vec![80, 50, 30, 20, 10]);
    }

    #[rstest]
    fn test_iter_meets_in_the_middle() {
        let tree = tree_of(&[1, 2, 3, 4]);
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((&1, &10)));
        assert_eq!(iter.next_back(), Some((&4, &40)));
        assert_eq!(iter.next(), Some((&2, &20)));
        assert_eq!(iter.next_back(), Some((&3, &30)));
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_iter_empty() {
        let tree = AvlTree::<i32, i32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.keys().len(), 0);
    }

    #[rstest]
    fn test_into_iter_reverse() {
        let tree = tree_of(&[2, 3, 1]);
        let keys: Vec<i32> = tree.into_iter().rev().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }
}

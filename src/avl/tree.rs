//! The [`AvlTree`] type and its read-only API.
//!
//! Structural mutation lives next door: rotations in `rotation.rs`,
//! insertion in `insert.rs`, removal in `remove.rs`.

use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

use static_assertions::assert_impl_all;

use super::cursor::NodeRef;
use super::iter::{IntoIter, Iter, Keys, Values};
use super::node::NodeStore;
use crate::error::InvariantViolation;

// =============================================================================
// AvlTree Definition
// =============================================================================

/// An ordered map kept height-balanced by AVL rotations.
///
/// Every node records a balance factor, the height of its right subtree
/// minus the height of its left subtree. After each public operation every
/// balance factor is in `-1..=1`, which bounds the height by roughly
/// `1.44 log2(n + 2)`.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(log N)          |
/// | `insert`       | O(log N)          |
/// | `remove`       | O(log N)          |
/// | `contains_key` | O(log N)          |
/// | `first`/`last` | O(log N)          |
/// | `len`          | O(1)              |
/// | `height`       | O(N)              |
/// | `validate`     | O(N)              |
///
/// # Examples
///
/// ```rust
/// use avltree::avl::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(10, "ten");
/// tree.insert(20, "twenty");
/// tree.insert(30, "thirty");
///
/// // Inserting in ascending order rotates 20 up to the root
/// let root = tree.root().unwrap();
/// assert_eq!(root.key(), &20);
/// assert_eq!(root.balance(), 0);
///
/// let keys: Vec<&i32> = tree.keys().collect();
/// assert_eq!(keys, vec![&10, &20, &30]);
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    pub(super) store: NodeStore<K, V>,
}

assert_impl_all!(AvlTree<i32, String>: Send, Sync, Clone, Default);

impl<K, V> AvlTree<K, V> {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::avl::AvlTree;
    ///
    /// let tree: AvlTree<i32, String> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: NodeStore::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Removes every entry and releases the arena.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Returns a handle on the root node, if any.
    ///
    /// Handles expose keys, values, balance factors and links, which makes
    /// the shape of the tree observable without giving out mutable access.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.store
            .root()
            .and_then(|root| NodeRef::new(&self.store, root))
    }

    /// Returns the number of levels, `0` for an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::avl::AvlTree;
    ///
    /// let tree: AvlTree<i32, ()> = (0..7).map(|key| (key, ())).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.root().map_or(0, |root| root.height())
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::avl::AvlTree;
    ///
    /// let tree: AvlTree<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let entries: Vec<(&i32, &char)> = tree.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.store)
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Returns a reference to the value stored for `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, as long as
    /// the ordering agrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avltree::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert("hello".to_string(), 42);
    /// assert_eq!(tree.get("hello"), Some(&42));
    /// assert_eq!(tree.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store
            .find(key)
            .and_then(|id| self.store.get(id))
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// Only the value is reachable; keys and links stay untouched.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.store.find(key)?;
        self.store.node_mut(id).ok().map(|node| &mut node.value)
    }

    /// Returns `true` if the tree holds `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store.find(key).is_some()
    }

    /// Returns a handle on the node holding `key`.
    #[must_use]
    pub fn node<Q>(&self, key: &Q) -> Option<NodeRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store
            .find(key)
            .and_then(|id| NodeRef::new(&self.store, id))
    }
}

/// Logs a broken invariant and aborts the current operation.
///
/// Reaching this means the balancing code itself is wrong; there is no
/// state a caller could recover.
#[cold]
#[track_caller]
pub(super) fn escalate(violation: &InvariantViolation) -> ! {
    tracing::error!(%violation, "AVL tree invariant broken");
    panic!("AVL tree invariant broken: {violation}");
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for AvlTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for AvlTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.store.into_entries())
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, Q> Index<&Q> for AvlTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AvlTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

//! # avltree
//!
//! A height-balanced binary search tree (AVL tree) for Rust.
//!
//! ## Overview
//!
//! [`AvlTree`](avl::AvlTree) is an ordered key-value map that guarantees
//! O(log N) lookup, insertion and removal by keeping every node's two
//! subtrees within one level of each other. It includes:
//!
//! - **AVL Tree**: insertion and removal with single and double rotations
//! - **Node Handles**: read-only access to keys, values, balance factors and links
//! - **Validation**: independent recomputation of every structural invariant
//! - **Equal Paths**: a leaf-depth check for arbitrary binary trees
//!
//! ## Feature Flags
//!
//! - `equal-paths`: The [`equal_paths`] module (enabled by default)
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! Rotations and fix-up decisions are reported through [`tracing`] at
//! `trace` level, node swaps at `debug` level. The crate never installs a
//! subscriber.
//!
//! ## Example
//!
//! ```rust
//! use avltree::prelude::*;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(30, "thirty");
//! tree.insert(10, "ten");
//! tree.insert(20, "twenty");
//!
//! // A right-left double rotation made 20 the root
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), &20);
//! assert_eq!(tree.height(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use avltree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::avl::*;

    pub use crate::error::*;

    #[cfg(feature = "equal-paths")]
    pub use crate::equal_paths::*;
}

pub mod avl;

pub mod error;

#[cfg(feature = "equal-paths")]
pub mod equal_paths;

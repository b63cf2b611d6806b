//! Keyed binary search trees that keep subtree sizes, so that besides the usual
//! search tree operations they can answer `select(k)` and `rank(key)` queries,
//! and that can be split by a key and merged back together in logarithmic time.
//!
//! Two balancing strategies are provided behind the same [`SomeTree`] interface:
//! [`avl::AVLTree`], a worst-case height balanced tree, and [`splay::SplayTree`],
//! a self adjusting tree. [`unbalanced::UnbalancedTree`] exposes the plain unbalanced
//! algorithms they are built on through the same interface.
//!
//! On top of the trees sits [`ColorArray`], an array of two-valued colors which
//! supports flipping every color from an index onwards in logarithmic time.
//!
//!```
//! use arbor::{SomeTree, avl::AVLTree};
//!
//! let mut tree: AVLTree<i32> = (1..=10).map(|key| (key, ())).collect();
//! let (low, high) = tree.split(&4);
//! assert_eq!(low.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
//! assert_eq!(high.len(), 6);
//!
//! let mut tree = low.merge(high);
//! assert_eq!(tree.select(7).map(|(key, _)| *key), Some(7));
//!```

pub mod color_array;
pub mod error;
pub mod trees;

pub use color_array::{Color, ColorArray};
pub use error::Error;
pub use trees::*;

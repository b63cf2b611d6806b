//! The basic tree module
//! This module implements basic unbalanced trees, keyed and augmented with subtree sizes.
//! The balanced trees in this crate are built by wrapping around it.

// these should not be public as they are merely separate files
// for some of the functions of this module
mod implementations;
mod iterative_deallocator;
mod iterators;
mod walker;

pub use iterative_deallocator::deallocate_iteratively;
pub use iterators::*;
pub use walker::*;

use std::fmt::Debug;

/// A basic tree. Might be empty.
/// The `T` parameter is for algorithm-specific bookkeeping data, such as the height
/// of an AVL node.
pub enum BasicTree<K, V, T = ()> {
    Empty,
    Root(Box<BasicNode<K, V, T>>),
}
use BasicTree::*;

impl<K, V, T> Default for BasicTree<K, V, T> {
    fn default() -> Self {
        Empty
    }
}

impl<K, V, T> BasicTree<K, V, T> {
    /// Constructs a new empty tree.
    pub fn new() -> Self {
        Empty
    }

    pub fn from_node(node: BasicNode<K, V, T>) -> Self {
        Root(Box::new(node))
    }

    pub fn from_boxed_node(node: Box<BasicNode<K, V, T>>) -> Self {
        Root(node)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    /// The number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Empty => 0,
            Root(node) => node.size,
        }
    }

    pub fn node(&self) -> Option<&BasicNode<K, V, T>> {
        match self {
            Empty => None,
            Root(node) => Some(&**node),
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut BasicNode<K, V, T>> {
        match self {
            Empty => None,
            Root(node) => Some(&mut **node),
        }
    }

    pub fn into_node(self) -> Option<BasicNode<K, V, T>> {
        match self {
            Empty => None,
            Root(node) => Some(*node),
        }
    }

    pub fn into_node_boxed(self) -> Option<Box<BasicNode<K, V, T>>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    /// Recomputes the size stored in the root, based on its sons.
    /// This is necessary when the sons might have changed.
    pub fn rebuild(&mut self) {
        if let Root(node) = self {
            node.rebuild();
        }
    }

    /// Returns a walker at the root of the tree.
    pub fn walker(&mut self) -> BasicWalker<'_, K, V, T> {
        BasicWalker::new(self)
    }

    /// Returns the node holding the key, without modifying the tree.
    pub fn find_node(&self, key: &K) -> Option<&BasicNode<K, V, T>>
    where
        K: Ord,
    {
        let mut tree = self;
        while let Root(node) = tree {
            tree = match key.cmp(&node.key) {
                std::cmp::Ordering::Less => &node.left,
                std::cmp::Ordering::Greater => &node.right,
                std::cmp::Ordering::Equal => return Some(&**node),
            };
        }
        None
    }

    pub fn find_node_mut(&mut self, key: &K) -> Option<&mut BasicNode<K, V, T>>
    where
        K: Ord,
    {
        let mut tree = self;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                std::cmp::Ordering::Less => tree = &mut node.left,
                std::cmp::Ordering::Greater => tree = &mut node.right,
                std::cmp::Ordering::Equal => return Some(&mut **node),
            }
        }
        None
    }

    /// Returns the entry with exactly `index` smaller keys, by descending on subtree sizes.
    pub fn select_zero_based(&self, mut index: usize) -> Option<(&K, &V)> {
        let mut tree = self;
        while let Root(node) = tree {
            let left_size = node.left.size();
            tree = match index.cmp(&left_size) {
                std::cmp::Ordering::Less => &node.left,
                std::cmp::Ordering::Equal => return Some((&node.key, &node.value)),
                std::cmp::Ordering::Greater => {
                    index -= left_size + 1;
                    &node.right
                }
            };
        }
        None
    }

    /// The height of the tree, computed by traversing it.
    /// The empty tree has height `0`.
    pub fn computed_height(&self) -> usize {
        let mut res = 0;
        let mut stack = vec![];
        if let Root(node) = self {
            stack.push((&**node, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            res = std::cmp::max(res, depth);
            for son in [&node.left, &node.right] {
                if let Root(son) = son {
                    stack.push((&**son, depth + 1));
                }
            }
        }
        res
    }

    pub fn min_key(&self) -> Option<&K> {
        let mut res = None;
        let mut tree = self;
        while let Root(node) = tree {
            res = Some(&node.key);
            tree = &node.left;
        }
        res
    }

    pub fn max_key(&self) -> Option<&K> {
        let mut res = None;
        let mut tree = self;
        while let Root(node) = tree {
            res = Some(&node.key);
            tree = &node.right;
        }
        res
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> Iter<'_, K, V, T> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_, K, V, T> {
        Keys::new(self)
    }

    /// Iterates over the entries with `lo <= key <= hi`, in order.
    pub fn range<'a>(&'a self, lo: &K, hi: &'a K) -> Range<'a, K, V, T>
    where
        K: Ord,
    {
        Range::new(self, lo, hi)
    }

    /// Returns the shape of the tree as a bracketed string: an empty tree is `*`,
    /// and a node is `<left key right>`.
    ///```
    /// use arbor::{SomeTree, avl::AVLTree};
    ///
    /// let tree: AVLTree<i32> = (1..=3).map(|key| (key, ())).collect();
    /// assert_eq!(tree.inner().representation(), "<<* 1 *> 2 <* 3 *>>");
    ///```
    pub fn representation(&self) -> String
    where
        K: Debug,
    {
        match self {
            Empty => String::from("*"),
            Root(node) => format!(
                "<{} {:?} {}>",
                node.left.representation(),
                node.key,
                node.right.representation()
            ),
        }
    }

    /// Checks that the sizes are correct in every node, and calls `func` on every node.
    /// Panics if anything is wrong.
    pub fn assert_correctness_with<F>(&self, mut func: F)
    where
        F: FnMut(&BasicNode<K, V, T>),
    {
        let mut stack = vec![];
        if let Root(node) = self {
            stack.push(&**node);
        }
        while let Some(node) = stack.pop() {
            node.assert_correctness_locally();
            func(node);
            for son in [&node.left, &node.right] {
                if let Root(son) = son {
                    stack.push(&**son);
                }
            }
        }
    }

    /// Checks that the keys are strictly increasing in order.
    pub fn assert_ordering(&self)
    where
        K: Ord,
    {
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = prev {
                assert!(prev < key, "keys are out of order");
            }
            prev = Some(key);
        }
    }
}

/// A basic node. Can be viewed as a non-empty basic tree: it always has at least one entry.
pub struct BasicNode<K, V, T = ()> {
    key: K,
    value: V,
    size: usize,
    pub(crate) alg_data: T,
    pub(crate) left: BasicTree<K, V, T>,
    pub(crate) right: BasicTree<K, V, T>,
}

impl<K, V, T: Default> BasicNode<K, V, T> {
    /// Creates a node with no sons.
    pub fn new(key: K, value: V) -> Self {
        Self::new_alg(key, value, Default::default())
    }
}

impl<K, V, T> BasicNode<K, V, T> {
    /// Creates a node with no sons, and the given algorithm specific data.
    pub fn new_alg(key: K, value: V, alg_data: T) -> Self {
        BasicNode {
            key,
            value,
            size: 1,
            alg_data,
            left: Empty,
            right: Empty,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// The value doesn't take part in the tree's bookkeeping, so it can be freely modified.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// The number of nodes in this node's subtree, including itself.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alg_data(&self) -> &T {
        &self.alg_data
    }

    pub fn left(&self) -> &BasicTree<K, V, T> {
        &self.left
    }

    pub fn right(&self) -> &BasicTree<K, V, T> {
        &self.right
    }

    /// Recomputes the size of this subtree from the sizes of the sons.
    pub fn rebuild(&mut self) {
        self.size = 1 + self.left.size() + self.right.size();
    }

    /// Takes the node apart, into its key, value and algorithm specific data.
    /// The sons are dropped.
    pub(crate) fn into_parts(self) -> (K, V, T) {
        (self.key, self.value, self.alg_data)
    }

    /// Checks that the size of the node is correct, assuming the sons' sizes are.
    pub fn assert_correctness_locally(&self) {
        assert_eq!(
            self.size,
            1 + self.left.size() + self.right.size(),
            "incorrect subtree size"
        );
    }
}

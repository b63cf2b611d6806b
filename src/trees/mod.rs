//! This module contains the search tree interface, the unbalanced tree it is built on,
//! and the implementations of specific balanced search trees.
//!
//! Every tree stores a key and a value in each node, and every node knows the size of
//! its subtree. Navigation is done with walkers: a walker holds a mutable reference to the
//! tree together with the whole path from the root to its current position, so that
//! it can go up as well as down. This path takes the place of parent pointers.

#[macro_use]
mod macros;

pub mod avl;
pub mod basic_tree;
pub mod methods;
pub mod splay;
pub mod unbalanced;

pub use methods::Rank;

use crate::Error;
use basic_tree::{BasicTree, Iter, Keys, Range};

/// Used to distinguish the two sons of a node, and the direction a walker came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the opposite side.
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;
    fn not(self) -> Side {
        self.flip()
    }
}

/// The search tree interface, implemented by [`unbalanced::UnbalancedTree`],
/// [`avl::AVLTree`] and [`splay::SplayTree`].
///
/// Keys are unique. Most operations go through the tree's walker, which is why even
/// queries take `&mut self`: a splay tree restructures itself on every access.
///
/// [`SomeTree::split`] and [`SomeTree::merge`] consume their inputs, so a tree that
/// has been split or merged can't be used again.
pub trait SomeTree<K: Ord, V>: Default + Sized {
    /// The algorithm specific data stored in every node.
    type TreeData;

    /// The walker type of this tree. Dropping the walker restores the tree's invariants,
    /// e.g. a splay tree's walker splays its current node when it is dropped.
    type Walker<'a>: SplittableWalker<K, V, Tree = Self>
    where
        Self: 'a;

    /// Returns a walker at the root of the tree.
    fn walker(&mut self) -> Self::Walker<'_>;

    /// Returns the underlying unbalanced tree, for read only access.
    fn inner(&self) -> &BasicTree<K, V, Self::TreeData>;

    /// Creates a tree with a single node.
    fn from_root(key: K, value: V) -> Self;

    /// Concatenates the two trees. All keys of `self` must be smaller than all the keys
    /// of `right`.
    fn merge(self, right: Self) -> Self;

    /// Returns a mutable reference to the value stored with the key, if it is present.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Checks the tree's invariants: ordering of the keys, subtree sizes,
    /// and the balancing algorithm's bookkeeping.
    /// If any of them is violated, panics.
    fn assert_correctness(&self);

    /// Creates an empty tree.
    fn new() -> Self {
        Default::default()
    }

    fn len(&self) -> usize {
        self.inner().size()
    }

    fn is_empty(&self) -> bool {
        self.inner().is_empty()
    }

    /// Returns a walker at the node with the given key.
    /// If there isn't any, the walker is at the empty position where that key would
    /// be inserted, and going up from there reaches the last node the search visited.
    fn search(&mut self, key: &K) -> Self::Walker<'_> {
        let mut walker = self.walker();
        methods::search_by_key(&mut walker, key);
        walker
    }

    /// Returns the key itself if it is present, and otherwise the key of the
    /// last node visited while searching for it.
    /// Returns `None` only for an empty tree.
    fn find(&mut self, key: &K) -> Option<K>
    where
        K: Clone,
    {
        let mut walker = self.search(key);
        if walker.is_empty() {
            let _ = walker.go_up();
        }
        let res = walker.key().cloned();
        res
    }

    fn get<'a>(&'a mut self, key: &K) -> Option<&'a V>
    where
        K: 'a,
        V: 'a,
        Self::TreeData: 'a,
    {
        let walker = self.search(key);
        let found = !walker.is_empty();
        drop(walker);
        if found {
            self.inner().find_node(key).map(|node| node.value())
        } else {
            None
        }
    }

    fn contains_key(&mut self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a new key. If the key is already present, returns
    /// [`Error::DuplicateKey`] and leaves the tree as is.
    ///```
    /// use arbor::{SomeTree, Error, splay::SplayTree};
    ///
    /// let mut tree: SplayTree<i32, &str> = SplayTree::new();
    /// tree.insert(3, "three").unwrap();
    /// assert_eq!(tree.insert(3, "drei"), Err(Error::DuplicateKey));
    /// assert_eq!(tree.get(&3), Some(&"three"));
    ///```
    fn insert(&mut self, key: K, value: V) -> Result<(), Error> {
        let mut walker = self.search(&key);
        if !walker.is_empty() {
            return Err(Error::DuplicateKey);
        }
        walker
            .insert(key, value)
            .expect("the walker is at an empty position");
        Ok(())
    }

    /// Removes the key from the tree and returns it with its value.
    /// Returns `None` if the key wasn't present.
    fn delete(&mut self, key: &K) -> Option<(K, V)> {
        let mut walker = self.search(key);
        let res = walker.delete();
        res
    }

    /// Returns the smallest key that is greater than `key`.
    /// `key` itself doesn't have to be present in the tree.
    fn successor(&mut self, key: &K) -> Option<K>
    where
        K: Clone,
    {
        let mut walker = self.search(key);
        methods::next_filled(&mut walker).ok()?;
        let res = walker.key().cloned();
        res
    }

    /// Returns the largest key that is smaller than `key`.
    /// `key` itself doesn't have to be present in the tree.
    fn predecessor(&mut self, key: &K) -> Option<K>
    where
        K: Clone,
    {
        let mut walker = self.search(key);
        methods::previous_filled(&mut walker).ok()?;
        let res = walker.key().cloned();
        res
    }

    /// Returns the `k`-th smallest entry, counting from `1`.
    /// Returns `None` if `k` is `0` or larger than the size of the tree.
    fn select(&mut self, k: usize) -> Option<(&K, &V)> {
        if k == 0 {
            return None;
        }
        self.select_zero_based(k - 1)
    }

    /// Returns the entry with exactly `index` smaller keys.
    fn select_zero_based(&mut self, index: usize) -> Option<(&K, &V)> {
        if index >= self.len() {
            return None;
        }
        let mut walker = self.walker();
        methods::search_by_index(&mut walker, index).expect("the index is in range");
        drop(walker);
        self.inner().select_zero_based(index)
    }

    /// Returns the `1`-based position of the key in sorted order, or the position it
    /// would have if it were inserted.
    ///```
    /// use arbor::{SomeTree, Rank, avl::AVLTree};
    ///
    /// let mut tree: AVLTree<i32> = [10, 20, 30].iter().map(|&key| (key, ())).collect();
    /// assert_eq!(tree.rank(&20), Rank::Found(2));
    /// assert_eq!(tree.rank(&25), Rank::Absent(3));
    ///```
    fn rank(&mut self, key: &K) -> Rank {
        let walker = self.search(key);
        let rank = methods::rank_at(&walker);
        rank
    }

    /// Iterates over the entries with `lo <= key <= hi`, in order.
    /// The iterator can be cloned in order to go over the range again.
    fn range_search<'a>(&'a mut self, lo: &K, hi: &'a K) -> Range<'a, K, V, Self::TreeData> {
        drop(self.search(lo));
        self.inner().range(lo, hi)
    }

    /// Iterates over all the entries, in order.
    fn iter(&self) -> Iter<'_, K, V, Self::TreeData> {
        self.inner().iter()
    }

    /// Iterates over all the keys, in order.
    fn keys(&self) -> Keys<'_, K, V, Self::TreeData> {
        self.inner().keys()
    }

    /// Splits the tree into the keys that are smaller or equal to `key`, and the keys
    /// that are greater than it. `key` itself doesn't have to be present in the tree.
    ///```
    /// use arbor::{SomeTree, splay::SplayTree};
    ///
    /// let tree: SplayTree<i32> = (1..=8).map(|key| (key * 10, ())).collect();
    /// let (low, high) = tree.split(&35);
    /// assert_eq!(low.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    /// assert_eq!(high.keys().copied().collect::<Vec<_>>(), vec![40, 50, 60, 70, 80]);
    ///```
    fn split(mut self, key: &K) -> (Self, Self) {
        let size = self.len();
        let mut walker = self.search(key);
        if !walker.is_empty() {
            methods::next_empty(&mut walker).expect("a node always has a right son position");
        }
        let right = walker
            .split_right()
            .expect("the walker is at an empty position");
        drop(walker);
        log::trace!(
            "split a tree of {} nodes into {} and {} nodes",
            size,
            self.len(),
            right.len()
        );
        (self, right)
    }
}

/// The walker interface. A walker is either at a node, or at an empty position,
/// i.e., a missing son of a node (or the root of an empty tree).
///
/// Walkers keep track of the number of keys to the left and to the right of the subtree
/// they are at, which is how ranks are computed.
pub trait SomeWalker<K, V> {
    /// Goes to the left son. Fails if at an empty position.
    fn go_left(&mut self) -> Result<(), ()>;

    /// Goes to the right son. Fails if at an empty position.
    fn go_right(&mut self) -> Result<(), ()>;

    /// Goes up to the parent, and returns which son the walker came from.
    /// Fails at the root.
    fn go_up(&mut self) -> Result<Side, ()>;

    /// The number of steps from the root.
    fn depth(&self) -> usize;

    /// The number of keys in the whole tree that are left of the current subtree.
    fn far_left_size(&self) -> usize;

    fn key(&self) -> Option<&K>;

    fn value(&self) -> Option<&V>;

    fn value_mut(&mut self) -> Option<&mut V>;

    /// The size of the current node's left subtree, or `None` at an empty position.
    fn left_size(&self) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.key().is_none()
    }

    fn is_root(&self) -> bool {
        self.depth() == 0
    }

    fn go_to_root(&mut self) {
        while self.go_up().is_ok() {}
    }

    /// Moves to the successor node. If there isn't any, moves to the root
    /// and returns `Err(())`.
    fn next(&mut self) -> Result<(), ()>
    where
        Self: Sized,
    {
        methods::next_filled(self)
    }

    /// Moves to the predecessor node. If there isn't any, moves to the root
    /// and returns `Err(())`.
    fn previous(&mut self) -> Result<(), ()>
    where
        Self: Sized,
    {
        methods::previous_filled(self)
    }
}

pub trait ModifiableWalker<K, V>: SomeWalker<K, V> {
    /// Inserts a node at the current empty position.
    /// If the current position is not empty, returns [`None`].
    /// The key must fit the position: the caller is responsible for keeping
    /// the keys ordered.
    fn insert(&mut self, key: K, value: V) -> Option<()>;

    /// Removes the current node from the tree, and returns its key and value.
    /// If currently at an empty position, returns [`None`].
    fn delete(&mut self) -> Option<(K, V)>;
}

pub trait SplittableWalker<K, V>: ModifiableWalker<K, V> {
    type Tree;

    /// Only works if the current position is empty.
    /// The keys to the left of the position remain in the tree, and the keys to its right
    /// are moved into the returned tree.
    fn split_right(&mut self) -> Option<Self::Tree>;

    /// Only works if the current position is empty.
    /// The keys to the right of the position remain in the tree, and the keys to its left
    /// are moved into the returned tree.
    fn split_left(&mut self) -> Option<Self::Tree>;
}

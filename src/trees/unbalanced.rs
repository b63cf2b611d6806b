//! An unbalanced search tree: the plain [`BasicTree`] algorithms behind the [`SomeTree`]
//! interface, with no rebalancing at all.
//!
//! Sorted insertions turn it into a path, so, like a splay tree, it is deallocated iteratively.

use super::basic_tree::*;
use super::*;

/// An unbalanced search tree.
pub struct UnbalancedTree<K, V = ()> {
    tree: BasicTree<K, V>,
}

impl<K, V> Default for UnbalancedTree<K, V> {
    fn default() -> Self {
        UnbalancedTree {
            tree: BasicTree::Empty,
        }
    }
}

impl<K, V> Drop for UnbalancedTree<K, V> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.tree);
    }
}

impl<K: Ord, V> SomeTree<K, V> for UnbalancedTree<K, V> {
    type TreeData = ();

    type Walker<'a> = UnbalancedWalker<'a, K, V>
    where
        Self: 'a;

    fn walker(&mut self) -> UnbalancedWalker<'_, K, V> {
        UnbalancedWalker {
            walker: self.tree.walker(),
        }
    }

    fn inner(&self) -> &BasicTree<K, V> {
        &self.tree
    }

    fn from_root(key: K, value: V) -> Self {
        UnbalancedTree {
            tree: BasicTree::from_node(BasicNode::new(key, value)),
        }
    }

    /// Removes the maximum of `self`, and hangs both trees under it.
    /// This doesn't keep the tree balanced in any sense.
    fn merge(mut self, mut right: Self) -> Self {
        if self.is_empty() {
            return right;
        }
        if right.is_empty() {
            return self;
        }
        debug_assert!(self.tree.max_key() < right.tree.min_key());

        let mut walker = self.tree.walker();
        while walker.go_right().is_ok() {}
        walker.go_up().expect("a non empty tree has a maximum");
        let (key, value, ()) = walker
            .delete_with_alg_data()
            .expect("the walker is at the maximum");
        drop(walker);

        let mut pivot = BasicNode::new(key, value);
        pivot.left = std::mem::take(&mut self.tree);
        pivot.right = std::mem::take(&mut right.tree);
        pivot.rebuild();
        UnbalancedTree {
            tree: BasicTree::from_node(pivot),
        }
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.find_node_mut(key).map(|node| node.value_mut())
    }

    /// Checks that the sizes are correct and the keys are ordered.
    /// If they are not, panics.
    fn assert_correctness(&self) {
        self.tree.assert_correctness_with(|_| {});
        self.tree.assert_ordering();
    }
}

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for UnbalancedTree<K, V> {
    /// Builds a tree of logarithmic depth from the entries.
    /// If a key repeats, its first entry is kept.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        UnbalancedTree {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for UnbalancedTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(std::mem::take(&mut self.tree))
    }
}

/// A walker for [`UnbalancedTree`]. It only rebuilds the sizes on the way back to the root.
pub struct UnbalancedWalker<'a, K, V> {
    walker: BasicWalker<'a, K, V>,
}

derive_SomeWalker! {walker,
    impl<'a, K, V> SomeWalker<K, V> for UnbalancedWalker<'a, K, V> {
        fn go_up(&mut self) -> Result<Side, ()> {
            self.walker.go_up()
        }
    }
}

impl<'a, K, V> ModifiableWalker<K, V> for UnbalancedWalker<'a, K, V> {
    /// Inserts the entry as a leaf at the current empty position.
    /// If the current position is not empty, return [`None`].
    fn insert(&mut self, key: K, value: V) -> Option<()> {
        self.walker.insert(key, value)
    }

    /// Removes the current node, putting its successor in its place.
    /// The walker stays at the same position.
    fn delete(&mut self) -> Option<(K, V)> {
        self.walker.delete()
    }
}

impl<'a, K, V> SplittableWalker<K, V> for UnbalancedWalker<'a, K, V> {
    type Tree = UnbalancedTree<K, V>;

    /// Unzips the path from the current empty position to the root: the nodes that were
    /// reached by going left form the right tree, and the others stay.
    /// The walker will be at the root after this operation, if it succeeds.
    fn split_right(&mut self) -> Option<UnbalancedTree<K, V>> {
        if !self.walker.is_empty() {
            return None;
        }

        let mut temp = BasicTree::Empty;
        // in the first round, this value is irrelevant. choosing this will skip the first swap.
        let mut prev_side = self.walker.is_left_son().unwrap_or(Side::Right);

        while let Ok(side) = self.walker.go_up() {
            if prev_side != side {
                let node = self.walker.node_mut().expect("went up to a node");
                let son = match side {
                    Side::Left => &mut node.left,
                    Side::Right => &mut node.right,
                };
                std::mem::swap(&mut temp, son);
                node.rebuild();
            }
            prev_side = side;
        }

        if prev_side == Side::Left {
            std::mem::swap(self.walker.inner_mut(), &mut temp);
        }
        Some(UnbalancedTree { tree: temp })
    }

    fn split_left(&mut self) -> Option<UnbalancedTree<K, V>> {
        let mut left = self.split_right()?;
        std::mem::swap(self.walker.inner_mut(), &mut left.tree);
        Some(left)
    }
}

//! Implementation of splay trees.
//! Every access moves the accessed node to the root of the tree, which gives
//! logarithmic amortized complexity without storing any balancing data in the nodes.
//!
//! Splaying is done by the [`SplayWalker`] when it is dropped, so every operation that goes
//! through a walker (searching, inserting, finding neighbours) splays the position it ended at.

use super::basic_tree::*;
use super::*;

/// A splay tree.
pub struct SplayTree<K, V = ()> {
    tree: BasicTree<K, V>,
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        SplayTree {
            tree: BasicTree::Empty,
        }
    }
}

impl<K, V> Drop for SplayTree<K, V> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.tree);
    }
}

impl<K: Ord, V> SomeTree<K, V> for SplayTree<K, V> {
    type TreeData = ();

    type Walker<'a> = SplayWalker<'a, K, V>
    where
        Self: 'a;

    fn walker(&mut self) -> SplayWalker<'_, K, V> {
        SplayWalker {
            walker: self.tree.walker(),
        }
    }

    fn inner(&self) -> &BasicTree<K, V> {
        &self.tree
    }

    fn from_root(key: K, value: V) -> Self {
        SplayTree {
            tree: BasicTree::from_node(BasicNode::new(key, value)),
        }
    }

    /// Splays the maximum of `self` to the root, and hangs `right` as its right son.
    /// Complexity: `O(log n)` amortized.
    fn merge(mut self, mut right: Self) -> Self {
        if self.is_empty() {
            return right;
        }
        if right.is_empty() {
            return self;
        }
        debug_assert!(self.tree.max_key() < right.tree.min_key());

        let mut walker = self.walker();
        while walker.go_right().is_ok() {}
        drop(walker); // splays the maximum

        let root = self
            .tree
            .node_mut()
            .expect("a non empty tree has a root");
        assert!(root.right.is_empty());
        root.right = std::mem::take(&mut right.tree);
        root.rebuild();
        self
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let walker = self.search(key);
        let found = !walker.is_empty();
        drop(walker);
        if found {
            // the key was splayed to the root
            self.tree.node_mut().map(|node| node.value_mut())
        } else {
            None
        }
    }

    fn assert_correctness(&self) {
        self.tree.assert_correctness_with(|_| {});
        self.tree.assert_ordering();
    }
}

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for SplayTree<K, V> {
    /// Inserts the entries one by one. If a key repeats, its first entry is kept.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree: SplayTree<K, V> = Default::default();
        for (key, value) in iter {
            match tree.insert(key, value) {
                // the first entry of a repeated key is kept
                Ok(()) | Err(Error::DuplicateKey) => {}
                Err(error) => unreachable!("insertion failed: {}", error),
            }
        }
        tree
    }
}

impl<K, V> IntoIterator for SplayTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(std::mem::take(&mut self.tree))
    }
}

/// A walker for [`SplayTree`]. When dropped, it splays its position to the root,
/// or the parent of its position if it is at an empty position.
pub struct SplayWalker<'a, K, V> {
    walker: BasicWalker<'a, K, V>,
}

derive_SomeWalker! {walker,
    impl<'a, K, V> SomeWalker<K, V> for SplayWalker<'a, K, V> {
        fn go_up(&mut self) -> Result<Side, ()> {
            self.walker.go_up()
        }
    }
}

impl<'a, K, V> SplayWalker<'a, K, V> {
    /// If at the root, do nothing.
    /// Otherwise, do a splay step upwards.
    ///
    /// About the amortized complexity of splay steps:
    /// the amortized cost of any splay step, except the zig step near the root, is at most
    /// `3(log(new_node.size) - log(old_node.size)) - 1`.
    /// The `-1` covers the cost of going down the tree in the first place,
    /// and therefore you pay for at most log the size of the node where you stop splaying.
    pub fn splay_step(&mut self) {
        let b1 = match self.walker.go_up() {
            Err(()) => return, // already the root
            Ok(b1) => b1,
        };

        let b2 = match self.walker.is_left_son() {
            None => {
                // became the root - zig step
                self.walker
                    .rot_side(!b1)
                    .expect("the splayed node went missing");
                return;
            }
            Some(b2) => b2,
        };

        if b1 == b2 {
            // zig-zig case
            self.walker.rot_up().expect("the parent went missing");
            self.walker
                .rot_side(!b1)
                .expect("the splayed node went missing");
        } else {
            // zig-zag case
            self.walker
                .rot_side(!b1)
                .expect("the splayed node went missing");
            self.walker.rot_up().expect("the parent went missing");
        }
    }

    /// Splays the current node to the top of the tree.
    /// If at an empty position, its parent is splayed.
    pub fn splay(&mut self) {
        if self.walker.is_empty() && self.walker.go_up().is_err() {
            return; // the tree is empty
        }
        while !self.walker.is_root() {
            self.splay_step();
        }
    }
}

impl<'a, K, V> Drop for SplayWalker<'a, K, V> {
    fn drop(&mut self) {
        self.splay();
    }
}

impl<'a, K, V> ModifiableWalker<K, V> for SplayWalker<'a, K, V> {
    /// Inserts the entry into the tree at the current empty position.
    /// If the current position is not empty, return [`None`].
    /// The new node is splayed when the walker is dropped.
    fn insert(&mut self, key: K, value: V) -> Option<()> {
        self.walker.insert(key, value)
    }

    /// Splays the current node to the root and removes it.
    /// If at an empty position, nothing is removed.
    fn delete(&mut self) -> Option<(K, V)> {
        if self.walker.is_empty() {
            return None;
        }
        self.splay();
        self.walker.delete()
    }
}

impl<'a, K, V> SplittableWalker<K, V> for SplayWalker<'a, K, V> {
    type Tree = SplayTree<K, V>;

    /// Will only do anything if the current position is empty.
    /// Splays the parent of the position to the root, and cuts off its son
    /// on the far side of the position.
    /// The walker will be at the root after this operation, if it succeeds.
    fn split_right(&mut self) -> Option<SplayTree<K, V>> {
        if !self.walker.is_empty() {
            return None;
        }
        let side = match self.walker.go_up() {
            Ok(side) => side,
            Err(()) => return Some(SplayTree::default()), // the tree is empty
        };
        self.splay();

        let mut root = self
            .walker
            .take_subtree()
            .into_node_boxed()
            .expect("the root was just splayed");
        let (left, right) = match side {
            Side::Left => {
                let left = std::mem::take(&mut root.left);
                root.rebuild();
                (left, BasicTree::Root(root))
            }
            Side::Right => {
                let right = std::mem::take(&mut root.right);
                root.rebuild();
                (BasicTree::Root(root), right)
            }
        };
        self.walker
            .put_subtree(left)
            .expect("the position was just emptied");
        Some(SplayTree { tree: right })
    }

    fn split_left(&mut self) -> Option<SplayTree<K, V>> {
        let mut left = self.split_right()?;
        std::mem::swap(&mut left.tree, self.walker.inner_mut());
        Some(left)
    }
}

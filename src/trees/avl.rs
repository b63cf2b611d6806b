//! Implementation of AVL trees.
//! Balanced by keeping track of node heights, this is a worst-case balancing
//! algorithm that has a small memory overhead per node.
//!
//! Besides the usual operations, AVL trees can be concatenated around a middle node
//! in time proportional to the difference of the heights, which is what makes
//! splitting and merging logarithmic.

use super::basic_tree::*;
use super::*;

/// The type that is used for height bookkeeping.
/// `u8` is definitely enough, since the height of the tree is logarithmic in the tree size.
type Height = u8;
/// Used for height differences
type HeightDiff = i8;

/// An AVL tree. Balanced by keeping track of node heights, this is a worst-case balancing
/// algorithm that has a small memory overhead per node.
pub struct AVLTree<K, V = ()> {
    tree: BasicTree<K, V, Height>,
}

/// For implementing `height`, `balance_factor` and `rebuild_height` for
/// trees, nodes and walkers alike.
trait Heighted {
    fn height(&self) -> Height;

    /// Returns `true` if the height of the current node had to be updated,
    /// `false` if it was correct.
    fn rebuild_height(&mut self) -> bool;

    /// Returns `right.height() - left.height()`
    fn balance_factor(&self) -> HeightDiff;
}

impl<K, V> Heighted for BasicTree<K, V, Height> {
    fn height(&self) -> Height {
        match self.node() {
            None => 0,
            Some(node) => node.height(),
        }
    }

    fn rebuild_height(&mut self) -> bool {
        if let Some(node) = self.node_mut() {
            node.rebuild_height()
        } else {
            true
        }
    }

    fn balance_factor(&self) -> HeightDiff {
        match self.node() {
            None => 0,
            Some(node) => node.balance_factor(),
        }
    }
}

impl<K, V> Heighted for BasicNode<K, V, Height> {
    fn height(&self) -> Height {
        *self.alg_data()
    }

    fn balance_factor(&self) -> HeightDiff {
        self.right.height() as HeightDiff - self.left.height() as HeightDiff
    }

    fn rebuild_height(&mut self) -> bool {
        let new_height = std::cmp::max(self.left.height(), self.right.height()) + 1;
        let changed = self.height() != new_height;
        self.alg_data = new_height;
        changed
    }
}

impl<K, V> AVLTree<K, V> {
    /// The height of the tree. The empty tree has height `0`, and a single node has height `1`.
    pub fn height(&self) -> usize {
        self.tree.height() as usize
    }

    fn assert_heights_locally_internal(node: &BasicNode<K, V, Height>) {
        assert_eq!(
            node.height(),
            std::cmp::max(node.left.height(), node.right.height()) + 1,
            "incorrect height"
        );
        assert!(
            (-1..=1).contains(&node.balance_factor()),
            "unbalanced node: balance factor {}",
            node.balance_factor()
        );
    }

    /// Asserts that the tree's heights are correct and balanced.
    /// Otherwise, panics.
    pub fn assert_heights(&self) {
        self.tree
            .assert_correctness_with(Self::assert_heights_locally_internal);
    }

    fn walker_inner(&mut self) -> AVLWalker<'_, K, V> {
        AVLWalker {
            walker: self.tree.walker(),
        }
    }
}

impl<K, V> Default for AVLTree<K, V> {
    fn default() -> Self {
        AVLTree {
            tree: BasicTree::Empty,
        }
    }
}

impl<K: Ord, V> SomeTree<K, V> for AVLTree<K, V> {
    type TreeData = Height;

    type Walker<'a> = AVLWalker<'a, K, V>
    where
        Self: 'a;

    fn walker(&mut self) -> AVLWalker<'_, K, V> {
        self.walker_inner()
    }

    fn inner(&self) -> &BasicTree<K, V, Height> {
        &self.tree
    }

    fn from_root(key: K, value: V) -> Self {
        AVLTree {
            tree: BasicTree::from_node(BasicNode::new_alg(key, value, 1)),
        }
    }

    /// Concatenates the trees together.
    /// Complexity: `O(log n)`.
    ///```
    /// use arbor::{SomeTree, avl::AVLTree};
    ///
    /// let tree: AVLTree<i32> = (17..=89).map(|key| (key, ())).collect();
    /// let tree2: AVLTree<i32> = (100..=125).map(|key| (key, ())).collect();
    /// let tree = tree.merge(tree2);
    ///
    /// let expected: Vec<_> = (17..=89).chain(100..=125).collect();
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), expected);
    /// # tree.assert_correctness();
    ///```
    fn merge(mut self, right: Self) -> Self {
        if self.is_empty() {
            return right;
        }
        if right.is_empty() {
            return self;
        }
        debug_assert!(self.tree.max_key() < right.tree.min_key());

        let mut walker = self.walker_inner();
        while walker.go_right().is_ok() {}
        walker.go_up().expect("a non empty tree has a maximum");
        let mid = walker
            .delete_boxed()
            .expect("the walker is at the maximum");
        drop(walker);
        log::trace!(
            "merging AVL trees of heights {} and {} around a pivot",
            self.height(),
            right.height()
        );
        self.concatenate_boxed_middle_right(mid, right);
        self
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.find_node_mut(key).map(|node| node.value_mut())
    }

    /// Checks the sizes, the ordering of the keys, and the heights.
    fn assert_correctness(&self) {
        self.tree
            .assert_correctness_with(Self::assert_heights_locally_internal);
        self.tree.assert_ordering();
    }
}

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for AVLTree<K, V> {
    /// Inserts the entries one by one. If a key repeats, its first entry is kept.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree: AVLTree<K, V> = Default::default();
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

impl<K, V> IntoIterator for AVLTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Height>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}

/// A walker struct for [`AVLTree`].
/// When it is dropped, it goes up to the root, rebuilding the sizes on the way.
pub struct AVLWalker<'a, K, V> {
    walker: BasicWalker<'a, K, V, Height>,
}

impl<'a, K, V> std::ops::Drop for AVLWalker<'a, K, V> {
    fn drop(&mut self) {
        self.go_to_root()
    }
}

derive_SomeWalker! {walker,
    impl<'a, K, V> SomeWalker<K, V> for AVLWalker<'a, K, V> {
        fn go_up(&mut self) -> Result<Side, ()> {
            let res = self.walker.go_up()?;
            let changed = self.inner_mut().rebuild_height();
            // it shouldn't have changed without being rebalanced already
            debug_assert!(!changed);
            Ok(res)
        }
    }
}

impl<'a, K, V> Heighted for AVLWalker<'a, K, V> {
    fn height(&self) -> Height {
        self.inner().height()
    }

    fn balance_factor(&self) -> HeightDiff {
        self.inner().balance_factor()
    }

    fn rebuild_height(&mut self) -> bool {
        self.inner_mut().rebuild_height()
    }
}

impl<'a, K, V> AVLWalker<'a, K, V> {
    fn inner(&self) -> &BasicTree<K, V, Height> {
        self.walker.inner()
    }

    fn inner_mut(&mut self) -> &mut BasicTree<K, V, Height> {
        self.walker.inner_mut()
    }

    fn rot_left(&mut self) -> Option<()> {
        self.walker
            .rot_left_with_custom_rebuilder(|node| {
                node.rebuild_height();
            })
    }

    fn rot_right(&mut self) -> Option<()> {
        self.walker
            .rot_right_with_custom_rebuilder(|node| {
                node.rebuild_height();
            })
    }

    fn rot_up(&mut self) -> Result<Side, ()> {
        self.walker.rot_up_with_custom_rebuilder(|node| {
            node.rebuild_height();
        })
    }

    /// This function gets called when a node is deleted or inserted,
    /// at the current position.
    fn rebalance(&mut self) {
        if self.walker.is_empty() {
            // heights may be incorrect, so go up with the inner walker
            if self.walker.go_up().is_err() {
                return;
            }
        }

        self.rebuild_height();

        loop {
            let node = self.inner().node().expect("rebalancing at an empty position");
            match node.balance_factor() {
                -2 => {
                    // left is deeper
                    if node.left.balance_factor() <= 0 {
                        // left left case
                        self.rot_right().expect("the left son exists");
                    } else {
                        // left right case
                        self.walker.go_left().expect("the left son exists");
                        self.rot_left().expect("the right grandson exists");
                        let res = self.rot_up();
                        assert_eq!(res, Ok(Side::Left));
                    }
                }

                -1..=1 => {} // do nothing, the current node is balanced.

                2 => {
                    // right is deeper
                    if node.right.balance_factor() >= 0 {
                        // right right case
                        self.rot_left().expect("the right son exists");
                    } else {
                        // right left case
                        self.walker.go_right().expect("the right son exists");
                        self.rot_right().expect("the left grandson exists");
                        let res = self.rot_up();
                        assert_eq!(res, Ok(Side::Right));
                    }
                }

                bf => panic!("illegal balance factor: {}", bf),
            }

            // current node has been balanced. now go up a node,
            // and check if we need to continue rebalancing.
            let res = self.walker.go_up();
            let changed = self.rebuild_height();
            let bf = self.balance_factor();
            if !changed && (-1..=1).contains(&bf) {
                // tree is now balanced correctly
                break;
            }
            if res.is_err() {
                // reached root
                break;
            }
        }
    }

    /// Deletes the current node and returns it with the box.
    /// The returned node has no sons.
    fn delete_boxed(&mut self) -> Option<Box<BasicNode<K, V, Height>>> {
        let mut node = self.walker.take_subtree().into_node_boxed()?;
        if node.right.is_empty() {
            self.walker
                .put_subtree(std::mem::take(&mut node.left))
                .expect("the position was just emptied");
            self.rebalance();
        } else {
            // find the next node and move it to the current position
            let mut walker = node.right.walker();
            while walker.go_left().is_ok() {}
            let res = walker.go_up();
            assert_eq!(res, Ok(Side::Left));

            let mut replacement = walker
                .take_subtree()
                .into_node_boxed()
                .expect("went up from an empty position");
            assert!(replacement.left.is_empty());
            walker
                .put_subtree(std::mem::take(&mut replacement.right))
                .expect("the position was just emptied");
            AVLWalker { walker }.rebalance(); // rebalance the right subtree

            replacement.left = std::mem::take(&mut node.left);
            replacement.right = std::mem::take(&mut node.right);
            replacement.rebuild();
            self.walker
                .put_subtree(BasicTree::Root(replacement))
                .expect("the position was just emptied");
            self.rebalance();
        }
        node.rebuild();
        Some(node)
    }
}

impl<'a, K, V> ModifiableWalker<K, V> for AVLWalker<'a, K, V> {
    /// Inserts the entry into the tree at the current empty position.
    /// If the current position is not empty, return [`None`].
    /// When the function returns, the walker will be at a position which is an ancestor of the
    /// newly inserted node.
    fn insert(&mut self, key: K, value: V) -> Option<()> {
        self.walker
            .insert_with_alg_data(key, value, 1 /* height of a node with no sons */)?;
        self.rebalance();
        Some(())
    }

    /// The walker ends at an ancestor of the deleted position.
    fn delete(&mut self) -> Option<(K, V)> {
        let (key, value, _) = (*self.delete_boxed()?).into_parts();
        Some((key, value))
    }
}

impl<'a, K, V> SplittableWalker<K, V> for AVLWalker<'a, K, V> {
    type Tree = AVLTree<K, V>;

    /// Will only do anything if the current position is empty.
    /// If it is empty, it will split the tree: the elements
    /// to the left will remain, and the elements to the right
    /// will be put in the new output tree.
    /// The walker will be at the root after this operation, if it succeeds.
    ///
    ///```
    /// use arbor::{SomeTree, SplittableWalker, methods, avl::AVLTree};
    ///
    /// let mut tree: AVLTree<i32> = (17..88).map(|key| (key, ())).collect();
    /// let mut walker = tree.search(&23);
    /// // the empty position right after 23
    /// methods::next_empty(&mut walker).unwrap();
    /// let tree2 = walker.split_right().unwrap();
    /// drop(walker);
    ///
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), (17..24).collect::<Vec<_>>());
    /// assert_eq!(tree2.keys().copied().collect::<Vec<_>>(), (24..88).collect::<Vec<_>>());
    /// # tree.assert_correctness();
    /// # tree2.assert_correctness();
    ///```
    fn split_right(&mut self) -> Option<AVLTree<K, V>> {
        if !self.walker.is_empty() {
            return None;
        }
        let mut left = AVLTree::default();
        let mut right = AVLTree::default();

        // heights may be incorrect, so go up with the inner walker
        while let Ok(side) = self.walker.go_up() {
            let mut node = self
                .walker
                .take_subtree()
                .into_node_boxed()
                .expect("went up from an empty position");
            match side {
                Side::Left => {
                    assert!(node.left.is_empty());
                    let auxiliary_right = AVLTree {
                        tree: std::mem::take(&mut node.right),
                    };
                    right.concatenate_boxed_middle_right(node, auxiliary_right);
                }
                Side::Right => {
                    assert!(node.right.is_empty());
                    let auxiliary_left = AVLTree {
                        tree: std::mem::take(&mut node.left),
                    };
                    left.concatenate_boxed_middle_left(auxiliary_left, node);
                }
            }
        }

        // the `self` tree is empty by this point.
        self.walker
            .put_subtree(left.tree)
            .expect("the tree was emptied");
        Some(right)
    }

    fn split_left(&mut self) -> Option<AVLTree<K, V>> {
        let mut right = self.split_right()?;
        std::mem::swap(&mut right.tree, self.inner_mut());
        Some(right)
    }
}

impl<K, V> AVLTree<K, V> {
    /// Concatenates the trees together, in place, with a given entry for the middle.
    /// All the keys of `self` must be smaller than `key`, and all the keys of `right`
    /// must be larger.
    /// Complexity: `O(log n)`. More precisely, `O(dh)` where `dh` is the difference of heights
    /// between the two trees.
    ///```
    /// use arbor::{SomeTree, avl::AVLTree};
    ///
    /// let mut tree: AVLTree<i32> = (17..=89).map(|key| (key, ())).collect();
    /// let tree2: AVLTree<i32> = (91..=95).map(|key| (key, ())).collect();
    /// tree.concatenate_middle_right(90, (), tree2);
    ///
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), (17..=95).collect::<Vec<_>>());
    /// # tree.assert_correctness();
    ///```
    pub fn concatenate_middle_right(&mut self, key: K, value: V, right: AVLTree<K, V>) {
        let node = BasicNode::new_alg(key, value, 0 /* dummy value */);
        self.concatenate_boxed_middle_right(Box::new(node), right);
    }

    fn concatenate_boxed_middle_right(
        &mut self,
        mut mid: Box<BasicNode<K, V, Height>>,
        mut right: AVLTree<K, V>,
    ) {
        if self.tree.height() < right.tree.height() {
            std::mem::swap(self, &mut right);
            self.concatenate_boxed_middle_left(right, mid);
            return;
        }
        let mut walker = self.walker_inner();
        while walker.height() > right.tree.height() {
            walker.walker.go_right().expect("taller than a tree of height 0");
        }
        mid.alg_data = 0;
        mid.left = walker.walker.take_subtree();
        mid.right = right.tree;
        mid.rebuild();
        walker
            .walker
            .put_subtree(BasicTree::Root(mid))
            .expect("the position was just emptied");
        walker.rebalance();
    }

    /// Concatenates the trees together, in place, with a given entry for the middle.
    /// All the keys of `left` must be smaller than `key`, and all the keys of `self`
    /// must be larger.
    ///```
    /// use arbor::{SomeTree, avl::AVLTree};
    ///
    /// let left: AVLTree<i32> = (1..=3).map(|key| (key, ())).collect();
    /// let mut tree: AVLTree<i32> = (5..=60).map(|key| (key, ())).collect();
    /// tree.concatenate_middle_left(left, 4, ());
    ///
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), (1..=60).collect::<Vec<_>>());
    /// # tree.assert_correctness();
    ///```
    pub fn concatenate_middle_left(&mut self, left: AVLTree<K, V>, key: K, value: V) {
        let node = BasicNode::new_alg(key, value, 0 /* dummy value */);
        self.concatenate_boxed_middle_left(left, Box::new(node));
    }

    fn concatenate_boxed_middle_left(
        &mut self,
        mut left: AVLTree<K, V>,
        mut mid: Box<BasicNode<K, V, Height>>,
    ) {
        if self.tree.height() < left.tree.height() {
            std::mem::swap(self, &mut left);
            self.concatenate_boxed_middle_right(mid, left);
            return;
        }
        let mut walker = self.walker_inner();
        while walker.height() > left.tree.height() {
            walker.walker.go_left().expect("taller than a tree of height 0");
        }
        mid.alg_data = 0;
        mid.right = walker.walker.take_subtree();
        mid.left = left.tree;
        mid.rebuild();
        walker
            .walker
            .put_subtree(BasicTree::Root(mid))
            .expect("the position was just emptied");
        walker.rebalance();
    }
}

/// Concatenates the trees together, with a given entry for the middle.
/// Complexity: `O(log n)`. More precisely, `O(dh)` where `dh` is the difference of heights
/// between the two trees.
///```
/// use arbor::{SomeTree, avl::{AVLTree, concatenate_with_middle}};
///
/// let tree1: AVLTree<i32, char> = (1..=40).map(|key| (key, 'a')).collect();
/// let tree2: AVLTree<i32, char> = (42..=43).map(|key| (key, 'b')).collect();
/// let mut tree3 = concatenate_with_middle(tree1, 41, 'm', tree2);
///
/// assert_eq!(tree3.len(), 43);
/// assert_eq!(tree3.get(&41), Some(&'m'));
/// # tree3.assert_correctness();
///```
pub fn concatenate_with_middle<K, V>(
    mut left: AVLTree<K, V>,
    key: K,
    value: V,
    right: AVLTree<K, V>,
) -> AVLTree<K, V> {
    left.concatenate_middle_right(key, value, right);
    left
}

// This is a private module, so no documentation for it directly.
// instead look for documentation of the `BasicWalker` struct.

use super::*;
use recursive_reference::*;

use crate::trees::{Side, SomeWalker}; // in order to be able to use our own go_up method

/// This struct implements a walker for the [`BasicTree`] type.
/// It is a struct that has a mutable reference of the tree, and allows you to walk up
/// and down on it.
/// The walker may also be in a position which is the son of a node, but doesn't contain
/// a node by itself, and then it is said to be in an empty position.
///
/// Walkers for other kinds of trees are built by wrapping around the [`BasicWalker`] type,
/// as tree types are built by wrapping around the [`BasicTree`] type.
///
/// The walker will automatically go back up the tree to the root when dropped,
/// in order to rebuild all the nodes.
///
/// Internally, [`recursive_reference::RecRef`] is used, in order to be able to dynamically
/// go up and down the tree without upsetting the borrow checker.
pub struct BasicWalker<'a, K, V, T = ()> {
    /// The telescope, holding references to all the subtrees from the root to the
    /// current position.
    pub(super) rec_ref: RecRef<'a, BasicTree<K, V, T>>,

    /// For every subtree from the root to the current subtree, the number of keys
    /// to its left in the whole tree.
    pub(super) far_left: Vec<usize>,

    /// This array holds for every node, whether the next subtree in the walker
    /// is its left son or the right son.
    /// This array is always one shorter than [`BasicWalker::rec_ref`] and
    /// [`BasicWalker::far_left`], because the last node has no son in the walker.
    pub(super) is_left: Vec<Side>,
}

impl<'a, K, V, T> BasicWalker<'a, K, V, T> {
    pub fn new(tree: &'a mut BasicTree<K, V, T>) -> BasicWalker<'a, K, V, T> {
        BasicWalker {
            rec_ref: RecRef::new(tree),
            far_left: vec![0],
            is_left: vec![],
        }
    }

    /// Returns true if at an empty position.
    pub fn is_empty(&self) -> bool {
        self.rec_ref.is_empty()
    }

    /// Returns true if at the root.
    /// Note: even if you are the root, the root might still be empty.
    pub fn is_root(&self) -> bool {
        self.is_left.is_empty()
    }

    /// If the current position is the left son of a node, returns [`Some(Left)`].
    /// If the current position is the right son of a node, returns [`Some(Right)`].
    /// If at the root, returns [`None`].
    pub fn is_left_son(&self) -> Option<Side> {
        self.is_left.last().cloned()
    }

    pub fn inner(&self) -> &BasicTree<K, V, T> {
        &self.rec_ref
    }

    pub(in super::super) fn inner_mut(&mut self) -> &mut BasicTree<K, V, T> {
        &mut self.rec_ref
    }

    pub fn node(&self) -> Option<&BasicNode<K, V, T>> {
        self.rec_ref.node()
    }

    pub(in super::super) fn node_mut(&mut self) -> Option<&mut BasicNode<K, V, T>> {
        self.rec_ref.node_mut()
    }

    /// Performs a left rotation.
    /// Returns [`None`] if at an empty position or if there is no right son,
    /// and the tree is left unchanged.
    pub fn rot_left(&mut self) -> Option<()> {
        self.rot_left_with_custom_rebuilder(|_| {})
    }

    /// Performs a left rotation.
    /// Returns [`None`] if at an empty position or if there is no right son.
    /// Uses a callback for a rebuilding action, that will be applied in addition
    /// to the regular size rebuilding, first on the node that goes down
    /// and then on the node that comes up.
    pub fn rot_left_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, V, T>)>(
        &mut self,
        mut rebuilder: F,
    ) -> Option<()> {
        if self.node()?.right.is_empty() {
            return None;
        }
        let owned_tree = std::mem::take(&mut *self.rec_ref);

        let mut bn1: Box<BasicNode<K, V, T>> = owned_tree.into_node_boxed()?;
        let mut bn2: Box<BasicNode<K, V, T>> = std::mem::take(&mut bn1.right).into_node_boxed()?;

        bn1.right = std::mem::take(&mut bn2.left);
        bn2.size = bn1.size; // instead of bn2.rebuild(), since we already know the result
        bn1.rebuild();
        rebuilder(&mut *bn1);
        bn2.left = Root(bn1);
        rebuilder(&mut *bn2);

        *self.rec_ref = Root(bn2); // restore the node back
        Some(())
    }

    /// Performs a right rotation.
    /// Returns [`None`] if at an empty position or if there is no left son,
    /// and the tree is left unchanged.
    pub fn rot_right(&mut self) -> Option<()> {
        self.rot_right_with_custom_rebuilder(|_| {})
    }

    /// Performs a right rotation.
    /// Returns [`None`] if at an empty position or if there is no left son.
    /// Uses a callback for a rebuilding action, that will be applied in addition
    /// to the regular size rebuilding.
    pub fn rot_right_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, V, T>)>(
        &mut self,
        mut rebuilder: F,
    ) -> Option<()> {
        if self.node()?.left.is_empty() {
            return None;
        }
        let owned_tree = std::mem::take(&mut *self.rec_ref);

        let mut bn1: Box<BasicNode<K, V, T>> = owned_tree.into_node_boxed()?;
        let mut bn2: Box<BasicNode<K, V, T>> = std::mem::take(&mut bn1.left).into_node_boxed()?;

        bn1.left = std::mem::take(&mut bn2.right);
        bn2.size = bn1.size;
        bn1.rebuild();
        rebuilder(&mut *bn1);
        bn2.right = Root(bn1);
        rebuilder(&mut *bn2);

        *self.rec_ref = Root(bn2);
        Some(())
    }

    /// Performs rot_left if `side` is [`Side::Left`]
    /// rot_right otherwise
    pub fn rot_side(&mut self, side: Side) -> Option<()> {
        match side {
            Side::Left => self.rot_left(),
            Side::Right => self.rot_right(),
        }
    }

    pub fn rot_side_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, V, T>)>(
        &mut self,
        side: Side,
        rebuilder: F,
    ) -> Option<()> {
        match side {
            Side::Left => self.rot_left_with_custom_rebuilder(rebuilder),
            Side::Right => self.rot_right_with_custom_rebuilder(rebuilder),
        }
    }

    /// Rotates so that the current node moves up.
    /// Basically moves up and then calls rot_side.
    /// Fails if the current node is the root.
    pub fn rot_up(&mut self) -> Result<Side, ()> {
        self.rot_up_with_custom_rebuilder(|_| {})
    }

    pub fn rot_up_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, V, T>)>(
        &mut self,
        rebuilder: F,
    ) -> Result<Side, ()> {
        let b = self.go_up()?;
        self.rot_side_with_custom_rebuilder(b.flip(), rebuilder)
            .expect("original node went missing?");
        Ok(b)
    }

    pub fn go_to_root(&mut self) {
        while self.go_up().is_ok() {}
    }

    pub fn insert_with_alg_data(&mut self, key: K, value: V, alg_data: T) -> Option<()> {
        match *self.rec_ref {
            Empty => {
                *self.rec_ref = BasicTree::from_node(BasicNode::new_alg(key, value, alg_data));
                Some(())
            }
            _ => None,
        }
    }

    /// Takes the current subtree out of the tree, and writes `Empty` instead.
    /// Intended to help writing tree algorithms.
    pub(in super::super) fn take_subtree(&mut self) -> BasicTree<K, V, T> {
        std::mem::take(&mut *self.rec_ref)
    }

    /// If the current position is empty, puts the given subtree there instead.
    /// Intended to help writing tree algorithms.
    pub(in super::super) fn put_subtree(&mut self, new: BasicTree<K, V, T>) -> Option<()> {
        if self.rec_ref.is_empty() {
            *self.rec_ref = new;
            Some(())
        } else {
            None
        }
    }

    /// Removes the current node. If it has a right son, the successor takes its place,
    /// and the successor's right son takes the successor's old place.
    /// The walker stays at the same position.
    pub fn delete_with_alg_data(&mut self) -> Option<(K, V, T)> {
        let mut node = self.take_subtree().into_node()?;
        if node.right.is_empty() {
            self.put_subtree(std::mem::take(&mut node.left))
                .expect("the position was just emptied");
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
            drop(walker);

            replacement.left = std::mem::take(&mut node.left);
            replacement.right = std::mem::take(&mut node.right);
            replacement.rebuild();
            self.put_subtree(BasicTree::Root(replacement))
                .expect("the position was just emptied");
        }
        Some(node.into_parts())
    }
}

/// This implementation exists in order to rebuild the nodes
/// when the walker gets dropped
impl<'a, K, V, T> Drop for BasicWalker<'a, K, V, T> {
    fn drop(&mut self) {
        self.go_to_root();
    }
}

//! This module implements the walker traits for [`BasicWalker`], and building and consuming
//! a [`BasicTree`] through iterators.
//! It is a separate file from the main module file only to keep the walker's movement
//! code in one place.

use super::super::*; // crate::trees::*
use super::*;
use recursive_reference::RecRef;

const NO_VALUE_ERROR: &str = "invariant violated: RecRef can't be empty";

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for BasicTree<K, V> {
    /// Builds a [`BasicTree`] of logarithmic depth from the entries.
    /// If a key repeats, its first entry is kept.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> Self {
        let mut entries: Vec<(K, V)> = into_iter.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);

        // The stack holds nodes, each of which has no right son, and a left son which is
        // a perfect binary tree. The nodes correspond to the binary digits of `count`:
        // the i'th digit of `count` is `1` iff the stack holds a node with `2^i` nodes under it.
        let mut stack: Vec<BasicNode<K, V>> = vec![];
        for (count, (key, value)) in entries.into_iter().enumerate() {
            let mut tree = BasicTree::Empty;
            for i in 0.. {
                if (count >> i) & 1 == 1 {
                    let mut prev_node = stack.pop().expect("a node for every binary digit");
                    prev_node.right = tree;
                    prev_node.rebuild();
                    tree = BasicTree::from_node(prev_node);
                } else {
                    let mut node = BasicNode::new(key, value);
                    node.left = tree;
                    node.rebuild();
                    stack.push(node);
                    break;
                }
            }
        }

        let mut tree = BasicTree::Empty;
        for mut prev_node in stack.into_iter().rev() {
            prev_node.right = tree;
            prev_node.rebuild();
            tree = BasicTree::from_node(prev_node);
        }
        tree
    }
}

impl<K, V, T> IntoIterator for BasicTree<K, V, T> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K, V, T> IntoIterator for &'a BasicTree<K, V, T> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, T>;
    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, K, V, T> SomeWalker<K, V> for BasicWalker<'a, K, V, T> {
    fn go_left(&mut self) -> Result<(), ()> {
        let far_left = *self.far_left.last().expect(NO_VALUE_ERROR);
        let res = RecRef::extend_result(&mut self.rec_ref, |tree| match tree.node_mut() {
            Some(node) => Ok(&mut node.left),
            None => Err(()),
        });
        // push side information. nothing new is left of the left son
        if res.is_ok() {
            self.is_left.push(Side::Left);
            self.far_left.push(far_left);
        }
        res
    }

    fn go_right(&mut self) -> Result<(), ()> {
        let mut far_left = *self.far_left.last().expect(NO_VALUE_ERROR);
        let res = RecRef::extend_result(&mut self.rec_ref, |tree| {
            if let Some(node) = tree.node_mut() {
                // the current node and its left subtree are now to the left
                far_left += node.left.size() + 1;
                Ok(&mut node.right)
            } else {
                Err(())
            }
        });
        if res.is_ok() {
            self.is_left.push(Side::Right);
            self.far_left.push(far_left);
        }
        res
    }

    fn go_up(&mut self) -> Result<Side, ()> {
        match self.is_left.pop() {
            None => Err(()),
            Some(b) => {
                RecRef::pop(&mut self.rec_ref).expect(NO_VALUE_ERROR);
                self.far_left.pop().expect(NO_VALUE_ERROR);
                self.rec_ref.rebuild();
                Ok(b)
            }
        }
    }

    fn depth(&self) -> usize {
        self.is_left.len()
    }

    fn far_left_size(&self) -> usize {
        *self.far_left.last().expect(NO_VALUE_ERROR)
    }

    fn key(&self) -> Option<&K> {
        Some(self.rec_ref.node()?.key())
    }

    fn value(&self) -> Option<&V> {
        Some(self.rec_ref.node()?.value())
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        Some(self.rec_ref.node_mut()?.value_mut())
    }

    fn left_size(&self) -> Option<usize> {
        Some(self.rec_ref.node()?.left.size())
    }
}

impl<'a, K, V> ModifiableWalker<K, V> for BasicWalker<'a, K, V> {
    /// Inserts the entry into the tree at the current empty position.
    /// If the current position is not empty, return [`None`].
    /// When the function returns, the walker will be at the position the node
    /// was inserted.
    fn insert(&mut self, key: K, value: V) -> Option<()> {
        self.insert_with_alg_data(key, value, ())
    }

    /// Removes the current entry from the tree, and returns it.
    /// If currently at an empty position, returns [`None`].
    /// After deletion, the walker will stay at the same position, but the subtree below it
    /// may change
    /// and the current node will be a different node (of course).
    fn delete(&mut self) -> Option<(K, V)> {
        let (key, value, ()) = self.delete_with_alg_data()?;
        Some((key, value))
    }
}

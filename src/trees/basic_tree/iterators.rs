//! In-order iterators over basic trees.

use super::*;

/// Pushes the node and its chain of left descendants onto the stack.
fn push_left_spine<'a, K, V, T>(
    stack: &mut Vec<&'a BasicNode<K, V, T>>,
    mut tree: &'a BasicTree<K, V, T>,
) {
    while let Root(node) = tree {
        stack.push(&**node);
        tree = &node.left;
    }
}

/// An in-order iterator over the entries of a tree.
/// Only requires immutable access to the tree.
pub struct Iter<'a, K, V, T = ()> {
    stack: Vec<&'a BasicNode<K, V, T>>,
    remaining: usize,
}

impl<'a, K, V, T> Iter<'a, K, V, T> {
    pub fn new(tree: &'a BasicTree<K, V, T>) -> Self {
        let mut stack = vec![];
        push_left_spine(&mut stack, tree);
        Iter {
            stack,
            remaining: tree.size(),
        }
    }
}

// the derived clone implementation requires that K: Clone, which is unnecessary
impl<'a, K, V, T> Clone for Iter<'a, K, V, T> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, T> Iterator for Iter<'a, K, V, T> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        push_left_spine(&mut self.stack, &node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, T> ExactSizeIterator for Iter<'a, K, V, T> {}

impl<'a, K, V, T> std::iter::FusedIterator for Iter<'a, K, V, T> {}

/// An iterator over the keys of a tree, in order.
pub struct Keys<'a, K, V, T = ()> {
    iter: Iter<'a, K, V, T>,
}

impl<'a, K, V, T> Keys<'a, K, V, T> {
    pub fn new(tree: &'a BasicTree<K, V, T>) -> Self {
        Keys {
            iter: Iter::new(tree),
        }
    }
}

impl<'a, K, V, T> Clone for Keys<'a, K, V, T> {
    fn clone(&self) -> Self {
        Keys {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V, T> Iterator for Keys<'a, K, V, T> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V, T> ExactSizeIterator for Keys<'a, K, V, T> {}

/// An iterator over the entries with keys in a closed range `lo..=hi`, in order.
/// It can be cloned in order to restart the scan from its current point.
pub struct Range<'a, K, V, T = ()> {
    stack: Vec<&'a BasicNode<K, V, T>>,
    hi: &'a K,
}

impl<'a, K: Ord, V, T> Range<'a, K, V, T> {
    /// Takes `O(log n)` time for balanced trees. Every step afterwards
    /// takes `O(1)` amortized time.
    pub fn new(tree: &'a BasicTree<K, V, T>, lo: &K, hi: &'a K) -> Self {
        let mut stack = vec![];
        let mut tree = tree;
        // only nodes with keys `>= lo` are pushed, and each one's left subtree is
        // explored before it is popped.
        while let Root(node) = tree {
            if node.key >= *lo {
                stack.push(&**node);
                tree = &node.left;
            } else {
                tree = &node.right;
            }
        }
        Range { stack, hi }
    }
}

impl<'a, K, V, T> Clone for Range<'a, K, V, T> {
    fn clone(&self) -> Self {
        Range {
            stack: self.stack.clone(),
            hi: self.hi,
        }
    }
}

impl<'a, K: Ord, V, T> Iterator for Range<'a, K, V, T> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if node.key > *self.hi {
            self.stack.clear();
            return None;
        }
        push_left_spine(&mut self.stack, &node.right);
        Some((&node.key, &node.value))
    }
}

impl<'a, K: Ord, V, T> std::iter::FusedIterator for Range<'a, K, V, T> {}

/// An owning in-order iterator.
pub struct IntoIter<K, V, T = ()> {
    stack: Vec<Box<BasicNode<K, V, T>>>,
    remaining: usize,
}

impl<K, V, T> IntoIter<K, V, T> {
    pub fn new(tree: BasicTree<K, V, T>) -> Self {
        let remaining = tree.size();
        let mut res = IntoIter {
            stack: vec![],
            remaining,
        };
        res.push_left_spine(tree);
        res
    }

    fn push_left_spine(&mut self, mut tree: BasicTree<K, V, T>) {
        while let Root(mut node) = tree {
            tree = std::mem::take(&mut node.left);
            self.stack.push(node);
        }
    }
}

impl<K, V, T> Iterator for IntoIter<K, V, T> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(std::mem::take(&mut node.right));
        self.remaining -= 1;
        let (key, value, _) = (*node).into_parts();
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, T> ExactSizeIterator for IntoIter<K, V, T> {}

impl<K, V, T> Drop for IntoIter<K, V, T> {
    fn drop(&mut self) {
        // the right subtrees that weren't reached yet might be arbitrarily deep
        for node in self.stack.iter_mut() {
            deallocate_iteratively(&mut node.right);
        }
    }
}

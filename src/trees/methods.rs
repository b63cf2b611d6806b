//! Methods module
//! This module provides generic methods for walkers of any tree: searching by key
//! or by position, computing ranks, and moving to neighbouring positions.
//!
//! Different balanced tree algorithms are different, and the generic functions
//! only move the walker around. Whatever restructuring a tree needs happens when its
//! walker is dropped, e.g. a splay tree splays the position the walker stopped at.

use super::*;
use std::cmp::Ordering;

/// The position of a key in the sorted order of a tree, counting from `1`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Rank {
    /// The key is present, and this is its position.
    Found(usize),
    /// The key is absent, and this is the position it would have if it were inserted.
    Absent(usize),
}

impl Rank {
    /// The position, whether or not the key is present.
    /// For an absent key, this is the number of smaller keys plus one.
    ///```
    /// use arbor::{SomeTree, Rank, avl::AVLTree};
    ///
    /// let mut tree: AVLTree<i32> = [10, 20, 30].iter().map(|&key| (key, ())).collect();
    /// assert_eq!(tree.rank(&30).position(), 3);
    /// assert_eq!(tree.rank(&31).position(), 4);
    /// assert!(!tree.rank(&31).is_found());
    ///```
    pub fn position(self) -> usize {
        match self {
            Rank::Found(position) | Rank::Absent(position) => position,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, Rank::Found(_))
    }
}

/// Moves the walker down to the node with the given key.
/// If there isn't any, the walker ends at the empty position where that key would be inserted.
pub fn search_by_key<K: Ord, V, W: SomeWalker<K, V>>(walker: &mut W, key: &K) {
    while let Some(current) = walker.key() {
        match key.cmp(current) {
            Ordering::Less => walker.go_left(),
            Ordering::Greater => walker.go_right(),
            Ordering::Equal => break,
        }
        .expect("the walker is at a node");
    }
}

/// Moves the walker down to the node with exactly `index` smaller keys in the whole tree.
/// If there isn't any, the walker ends at an empty position and `Err(())` is returned.
pub fn search_by_index<K, V, W: SomeWalker<K, V>>(walker: &mut W, index: usize) -> Result<(), ()> {
    while let Some(left_size) = walker.left_size() {
        let smaller = walker.far_left_size() + left_size;
        match index.cmp(&smaller) {
            Ordering::Less => walker.go_left(),
            Ordering::Greater => walker.go_right(),
            Ordering::Equal => return Ok(()),
        }
        .expect("the walker is at a node");
    }
    Err(())
}

/// Returns the rank of the walker's position: the position of the current node,
/// or, at an empty position, the position a node inserted there would have.
pub fn rank_at<K, V, W: SomeWalker<K, V>>(walker: &W) -> Rank {
    match walker.left_size() {
        Some(left_size) => Rank::Found(walker.far_left_size() + left_size + 1),
        None => Rank::Absent(walker.far_left_size() + 1),
    }
}

/// If the walker is at an empty position, return an error.
/// Goes to the next empty position
pub fn next_empty<K, V, W: SomeWalker<K, V>>(walker: &mut W) -> Result<(), ()> {
    walker.go_right()?; // if we're at an empty node, return error
    while !walker.is_empty() {
        walker.go_left().expect("the walker is at a node");
    }
    Ok(())
}

/// If the walker is at an empty position, return an error.
/// Goes to the previous empty position
pub fn previous_empty<K, V, W: SomeWalker<K, V>>(walker: &mut W) -> Result<(), ()> {
    walker.go_left()?;
    while !walker.is_empty() {
        walker.go_right().expect("the walker is at a node");
    }
    Ok(())
}

/// Finds the next filled node.
/// If there isn't any, moves to root and return Err(()).
pub fn next_filled<K, V, W: SomeWalker<K, V>>(walker: &mut W) -> Result<(), ()> {
    if !walker.is_empty() {
        next_empty(walker).expect("the walker is at a node");
    }
    loop {
        match walker.go_up() {
            Ok(Side::Left) => break,
            Ok(Side::Right) => (),
            Err(()) => return Err(()), // there was no next node
        }
    }
    Ok(())
}

/// Finds the previous filled node.
/// If there isn't any, moves to root and return Err(()).
pub fn previous_filled<K, V, W: SomeWalker<K, V>>(walker: &mut W) -> Result<(), ()> {
    if !walker.is_empty() {
        previous_empty(walker).expect("the walker is at a node");
    }
    loop {
        match walker.go_up() {
            Ok(Side::Right) => break,
            Ok(Side::Left) => (),
            Err(()) => return Err(()),
        }
    }
    Ok(())
}

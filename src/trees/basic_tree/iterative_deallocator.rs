use super::*;

/// The auto-generated deallocation code for [`BasicTree`] is recursive.
/// Since splay trees can have arbitrary depth, deallocating a large
/// splay tree could cause a stack overflow.
///
/// Therefore, we have this tiny struct in order to deallocate a [`BasicTree`] in an iterative way.
/// From the user's perspective this is a function from the `basic_tree` module.
struct IterativeDeallocator<K, V, T> {
    stack: Vec<Box<BasicNode<K, V, T>>>,
}

impl<K, V, T> IterativeDeallocator<K, V, T> {
    fn step(&mut self) -> Option<()> {
        let mut node = self.stack.pop()?;
        self.push(std::mem::take(&mut node.left));
        self.push(std::mem::take(&mut node.right));
        Some(())
    }

    fn push(&mut self, tree: BasicTree<K, V, T>) {
        if let Some(node) = tree.into_node_boxed() {
            self.stack.push(node);
        }
    }
}

/// Replaces the tree with an empty tree, and deallocates the tree iteratively.
/// Input is a reference and not an owned value so that this function can get
/// called in `Drop` implementations.
pub fn deallocate_iteratively<K, V, T>(tree: &mut BasicTree<K, V, T>) {
    let my_tree = std::mem::take(tree);
    let mut deallocator = IterativeDeallocator { stack: vec![] };
    deallocator.push(my_tree);
    while deallocator.step().is_some() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_path_is_freed() {
        let mut tree: BasicTree<u32, ()> = BasicTree::new();
        for key in (0..200_000).rev() {
            let mut node = BasicNode::new(key, ());
            node.right = tree;
            node.rebuild();
            tree = BasicTree::from_node(node);
        }
        assert_eq!(tree.size(), 200_000);
        deallocate_iteratively(&mut tree);
        assert!(tree.is_empty());
    }
}

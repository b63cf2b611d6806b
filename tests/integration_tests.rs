mod common;
use common::*;

use arbor::trees::{avl::AVLTree, splay::SplayTree, unbalanced::UnbalancedTree};
use arbor::*;

#[test]
fn splay_and_avl_consistency() {
    check_consistency::<SplayTree<_, _>, AVLTree<_, _>>(2_000);
}

#[test]
fn basic_and_avl_consistency() {
    check_consistency::<UnbalancedTree<_, _>, AVLTree<_, _>>(1_000);
}

#[test]
fn delete() {
    check_delete::<AVLTree<_, _>>();
    check_delete::<SplayTree<_, _>>();
    check_delete::<UnbalancedTree<_, _>>();
}

#[test]
fn split_everywhere() {
    for n in [0, 1, 2, 7, 64] {
        check_split_everywhere::<AVLTree<_, _>>(n);
        check_split_everywhere::<SplayTree<_, _>>(n);
        check_split_everywhere::<UnbalancedTree<_, _>>(n);
    }
}

#[test]
fn avl_insertion_order() {
    let mut tree: AVLTree<i32> = AVLTree::new();
    for key in [7, 3, 13, 1, 5, 10, 15] {
        tree.insert(key, ()).unwrap();
    }
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.inner().node().map(|node| *node.key()), Some(7));
    assert_eq!(tree.insert(5, ()), Err(Error::DuplicateKey));
}

#[test]
fn splay_access_moves_to_root() {
    let mut tree: SplayTree<i32> = SplayTree::new();
    for key in 1..=4 {
        tree.insert(key, ()).unwrap();
    }
    assert_eq!(tree.find(&2), Some(2));
    assert_eq!(tree.inner().node().map(|node| *node.key()), Some(2));
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[test]
fn delete_only_node_and_reinsert() {
    let mut tree: AVLTree<i32, &str> = AVLTree::from_root(1, "one");
    assert_eq!(tree.delete(&1), Some((1, "one")));
    assert!(tree.is_empty());
    tree.insert(2, "two").unwrap();
    assert_eq!(tree.get(&2), Some(&"two"));
    tree.assert_correctness();
}

#[test]
fn split_then_merge_large() {
    let tree: AVLTree<u32, u32> = (0..10_000).map(|key| (key, key % 7)).collect();
    let (low, high) = checked_split_u32(tree, 6_543);
    assert_eq!(low.len(), 6_544);
    assert!(low.height() <= 19 && high.height() <= 19);
    let tree = low.merge(high);
    tree.assert_correctness();
    assert!(tree.height() <= 20);
}

fn checked_split_u32(tree: AVLTree<u32, u32>, key: u32) -> (AVLTree<u32, u32>, AVLTree<u32, u32>) {
    let (low, high) = tree.split(&key);
    low.assert_correctness();
    high.assert_correctness();
    (low, high)
}

#[test]
fn concatenate_with_middle_key() {
    let left: AVLTree<i32> = (0..100).map(|key| (key, ())).collect();
    let right: AVLTree<i32> = (101..103).map(|key| (key, ())).collect();
    let mut tree = avl::concatenate_with_middle(left, 100, (), right);
    tree.assert_correctness();
    assert_eq!(tree.len(), 103);
    assert_eq!(tree.rank(&100), Rank::Found(101));
}

#[test]
fn color_array_flips() {
    let mut array: ColorArray = ColorArray::new(7);
    array.flip(4).unwrap();
    assert_eq!(array.to_string(), "wwwbbbb");
    for index in 1..=3 {
        assert_eq!(array.get(index), Ok(Color::White));
    }
    array.flip(4).unwrap();
    assert_eq!(array.to_string(), "wwwwwww");
    array.assert_correctness();

    let mut array: ColorArray<SplayTree<usize, Color>> = "bbwwbw".parse().unwrap();
    array.flip_range(2, 4).unwrap();
    assert_eq!(array.to_string(), "bwbbbw");
    assert_eq!(array.count(Color::Black), 4);
    array.assert_correctness();
}

#[test]
fn color_array_random_flips() {
    use rand::Rng;
    let _ = pretty_env_logger::try_init();
    let mut rng = rand::thread_rng();
    let mut array: ColorArray = ColorArray::new(300);
    let mut model = vec![Color::White; 300];
    for _ in 0..500 {
        let x = rng.gen_range(1..=301);
        array.flip(x).unwrap();
        for color in &mut model[x - 1..] {
            *color = !*color;
        }
    }
    array.assert_correctness();
    assert!(array.colors().eq(model.into_iter()));
}

#[test]
fn color_array_fixed_rounds() {
    use ColorAction::*;
    let mut array: ColorArray<SplayTree<usize, Color>> = "wwbw".parse().unwrap();
    let mut model: Vec<Color> = array.colors().collect();
    let actions = [
        SetColor { index: 2, color: Color::Black },
        Flip { x: 2 },
        SetColor { index: 4, color: Color::Black },
        SetColor { index: 5, color: Color::White },
        SetColor { index: 0, color: Color::Black },
        Toggle { index: 1 },
        Pop,
        Push { color: Color::White },
        FlipRange { lo: 1, hi: 3 },
        Get { index: 3 },
    ];
    for action in actions {
        let (res, expected) = run_color_round(action, &mut array, &mut model);
        assert_eq!(res, expected, "{:?}", action);
    }
    assert_eq!(
        array.set_color(5, Color::White),
        Err(Error::IndexOutOfRange { index: 5, len: 4 })
    );
    assert_eq!(array.to_string(), "wbbw");
    array.assert_correctness();
}

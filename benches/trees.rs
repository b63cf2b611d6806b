#[macro_use]
extern crate criterion;

use arbor::trees::{avl::AVLTree, splay::SplayTree};
use arbor::{Color, ColorArray, SomeTree};
use criterion::{black_box, Criterion};
use rand::{thread_rng, Rng};

const SIZE: usize = 100_000;

fn random_keys(count: usize) -> Vec<u32> {
    let mut rng = thread_rng();
    (0..count).map(|_| rng.gen_range(0..SIZE as u32 * 4)).collect()
}

fn bench_insert(c: &mut Criterion) {
    let keys = random_keys(SIZE);
    c.bench_function("AVL insert 100k random keys", |b| {
        b.iter(|| {
            let mut tree: AVLTree<u32> = AVLTree::new();
            for &key in &keys {
                let _ = tree.insert(key, ());
            }
            tree
        })
    });
    c.bench_function("Splay insert 100k random keys", |b| {
        b.iter(|| {
            let mut tree: SplayTree<u32> = SplayTree::new();
            for &key in &keys {
                let _ = tree.insert(key, ());
            }
            tree
        })
    });
}

fn bench_split_merge(c: &mut Criterion) {
    let keys = random_keys(1_000);
    c.bench_function("AVL split and merge 1k times", |b| {
        let mut tree: AVLTree<u32> = (0..SIZE as u32 * 4)
            .step_by(4)
            .map(|key| (key, ()))
            .collect();
        b.iter(|| {
            for key in &keys {
                let (low, high) = std::mem::take(&mut tree).split(key);
                tree = low.merge(high);
            }
        })
    });
    c.bench_function("Splay split and merge 1k times", |b| {
        let mut tree: SplayTree<u32> = (0..SIZE as u32 * 4)
            .step_by(4)
            .map(|key| (key, ()))
            .collect();
        b.iter(|| {
            for key in &keys {
                let (low, high) = std::mem::take(&mut tree).split(key);
                tree = low.merge(high);
            }
        })
    });
}

fn bench_color_flips(c: &mut Criterion) {
    let mut rng = thread_rng();
    let flips: Vec<usize> = (0..1_000).map(|_| rng.gen_range(1..=SIZE + 1)).collect();
    c.bench_function("ColorArray 1k flips on 100k colors", |b| {
        let mut array: ColorArray = ColorArray::new(SIZE);
        b.iter(|| {
            for &x in &flips {
                array.flip(x).unwrap();
            }
            black_box(array.len())
        })
    });
    c.bench_function("ColorArray over splay trees 1k flips on 100k colors", |b| {
        let mut array: ColorArray<SplayTree<usize, Color>> = ColorArray::new(SIZE);
        b.iter(|| {
            for &x in &flips {
                array.flip(x).unwrap();
            }
            black_box(array.len())
        })
    });
}

criterion_group!(benches, bench_insert, bench_split_merge, bench_color_flips);
criterion_main!(benches);

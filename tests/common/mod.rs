#![allow(dead_code)]

use arbor::*;
use itertools::Itertools;
use proptest::prelude::*;
use rand::{self, Rng};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// Something to perform in one round of tests
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { key: i32, value: i32 },
    Delete { key: i32 },
    Get { key: i32 },
    Select { k: usize },
    RankOf { key: i32 },
    Successor { key: i32 },
    Predecessor { key: i32 },
    Range { lo: i32, hi: i32 },
    SplitMerge { key: i32 },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Inserted(Result<(), Error>),
    Entry(Option<(i32, i32)>),
    Value(Option<i32>),
    Position(Rank),
    Key(Option<i32>),
    Entries(Vec<(i32, i32)>),
    Sizes(usize, usize),
}

pub const KEY_BOUND: i32 = 150;

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng, len: usize) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(-KEY_BOUND..=KEY_BOUND);
    match rng.gen_range(0..9) {
        0 | 1 => Insert {
            key,
            value: rng.gen(),
        },
        2 => Delete { key },
        3 => Get { key },
        4 => Select {
            k: rng.gen_range(0..=len + 1),
        },
        5 => RankOf { key },
        6 => {
            if rng.gen() {
                Successor { key }
            } else {
                Predecessor { key }
            }
        }
        7 => {
            let other = rng.gen_range(-KEY_BOUND..=KEY_BOUND);
            Range {
                lo: key.min(other),
                hi: key.max(other),
            }
        }
        8 => SplitMerge { key },
        _ => panic!(),
    }
}

pub fn round_action_strategy() -> impl Strategy<Value = RoundAction> {
    use RoundAction::*;
    let key = -KEY_BOUND..=KEY_BOUND;
    prop_oneof![
        2 => (key.clone(), any::<i32>()).prop_map(|(key, value)| Insert { key, value }),
        1 => key.clone().prop_map(|key| Delete { key }),
        1 => key.clone().prop_map(|key| Get { key }),
        1 => (0..400usize).prop_map(|k| Select { k }),
        1 => key.clone().prop_map(|key| RankOf { key }),
        1 => key.clone().prop_map(|key| Successor { key }),
        1 => key.clone().prop_map(|key| Predecessor { key }),
        1 => (key.clone(), key.clone()).prop_map(|(a, b)| Range { lo: a.min(b), hi: a.max(b) }),
        1 => key.prop_map(|key| SplitMerge { key }),
    ]
}

/// Checks that splitting by `key` gives two valid trees on the right sides of `key`,
/// and returns them.
pub fn checked_split<T>(tree: T, key: &i32) -> (T, T)
where
    T: SomeTree<i32, i32>,
{
    let size = tree.len();
    let (low, high) = tree.split(key);
    low.assert_correctness();
    high.assert_correctness();
    assert_eq!(low.len() + high.len(), size);
    assert!(low.keys().all(|k| k <= key));
    assert!(high.keys().all(|k| k > key));
    (low, high)
}

pub fn run_round<T>(round_action: RoundAction, tree: &mut T) -> RoundResult
where
    T: SomeTree<i32, i32>,
{
    use RoundAction::*;
    use RoundResult::*;

    match round_action {
        Insert { key, value } => Inserted(tree.insert(key, value)),
        Delete { key } => Entry(tree.delete(&key)),
        Get { key } => Value(tree.get(&key).copied()),
        Select { k } => Entry(tree.select(k).map(|(key, value)| (*key, *value))),
        RankOf { key } => Position(tree.rank(&key)),
        Successor { key } => Key(tree.successor(&key)),
        Predecessor { key } => Key(tree.predecessor(&key)),
        Range { lo, hi } => Entries(
            tree.range_search(&lo, &hi)
                .map(|(key, value)| (*key, *value))
                .collect(),
        ),
        SplitMerge { key } => {
            let (low, high) = checked_split(std::mem::take(tree), &key);
            let sizes = Sizes(low.len(), high.len());
            *tree = low.merge(high);
            sizes
        }
    }
}

/// Runs the same round on a `BTreeMap`, which is the reference behaviour.
pub fn run_round_on_model(round_action: RoundAction, map: &mut BTreeMap<i32, i32>) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;

    match round_action {
        Insert { key, value } => {
            if map.contains_key(&key) {
                Inserted(Err(Error::DuplicateKey))
            } else {
                map.insert(key, value);
                Inserted(Ok(()))
            }
        }
        Delete { key } => Entry(map.remove_entry(&key)),
        Get { key } => Value(map.get(&key).copied()),
        Select { k } => Entry(if k == 0 {
            None
        } else {
            map.iter().nth(k - 1).map(|(key, value)| (*key, *value))
        }),
        RankOf { key } => {
            let position = map.range(..key).count() + 1;
            Position(if map.contains_key(&key) {
                Rank::Found(position)
            } else {
                Rank::Absent(position)
            })
        }
        Successor { key } => Key(map.range((Excluded(key), Unbounded)).next().map(|(k, _)| *k)),
        Predecessor { key } => Key(map.range(..key).next_back().map(|(k, _)| *k)),
        Range { lo, hi } => Entries(map.range(lo..=hi).map(|(k, v)| (*k, *v)).collect()),
        SplitMerge { key } => Sizes(map.range(..=key).count(), map.range(key + 1..).count()),
    }
}

fn initial_entries() -> Vec<(i32, i32)> {
    (-KEY_BOUND..=KEY_BOUND).step_by(3).map(|key| (key, -key)).collect()
}

/// Runs random rounds on two trees and on a `BTreeMap`, and checks they always agree.
pub fn check_consistency<T1, T2>(num_rounds: u32)
where
    T1: SomeTree<i32, i32> + FromIterator<(i32, i32)>,
    T2: SomeTree<i32, i32> + FromIterator<(i32, i32)>,
{
    let mut rng = rand::thread_rng();

    let mut tree1: T1 = initial_entries().into_iter().collect();
    let mut tree2: T2 = initial_entries().into_iter().collect();
    let mut model: BTreeMap<i32, i32> = initial_entries().into_iter().collect();

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng, model.len());
        let expected = run_round_on_model(round_action, &mut model);
        let res1 = run_round(round_action, &mut tree1);
        let res2 = run_round(round_action, &mut tree2);
        assert_eq!(res1, expected, "{:?}", round_action);
        assert_eq!(res2, expected, "{:?}", round_action);

        assert_eq!(tree1.len(), model.len());
        assert_eq!(tree2.len(), model.len());
        // `O(n)` per round, but the trees stay small in this test
        tree1.assert_correctness();
        tree2.assert_correctness();
    }
    assert!(tree1.iter().eq(model.iter()));
    assert!(tree2.iter().eq(model.iter()));
}

pub fn check_consistency_proptest<T>(
    initial: &[(i32, i32)],
    actions: &[RoundAction],
) -> Result<(), TestCaseError>
where
    T: SomeTree<i32, i32>,
{
    let mut tree: T = T::new();
    let mut model = BTreeMap::new();
    for &(key, value) in initial {
        let action = RoundAction::Insert { key, value };
        let expected = run_round_on_model(action, &mut model);
        prop_assert_eq!(run_round(action, &mut tree), expected);
    }

    for &action in actions {
        let expected = run_round_on_model(action, &mut model);
        prop_assert_eq!(run_round(action, &mut tree), expected);
        tree.assert_correctness();
    }
    prop_assert!(tree
        .iter()
        .map(|(key, value)| (*key, *value))
        .eq(model.into_iter()));
    Ok(())
}

/// Deletes every key in turn from a fresh tree, through a walker.
pub fn check_delete<T>()
where
    T: SomeTree<i32, i32> + FromIterator<(i32, i32)>,
{
    let entries: Vec<(i32, i32)> = (0..300).map(|key| (key, key * key)).collect();
    for i in 0..entries.len() {
        let mut tree: T = entries.iter().cloned().collect();
        let mut walker = tree.search(&(i as i32));
        assert_eq!(walker.value().cloned(), Some(entries[i].1));
        assert_eq!(walker.delete(), Some(entries[i]));
        drop(walker);
        tree.assert_correctness();
        assert!(tree
            .iter()
            .map(|(key, value)| (*key, *value))
            .eq(entries[..i].iter().chain(entries[i + 1..].iter()).cloned()));
    }
}

/// Splits a tree of the keys `0, 2, ..., 2 * (n - 1)` at every key and between every two keys,
/// and merges the parts back.
pub fn check_split_everywhere<T>(n: i32)
where
    T: SomeTree<i32, i32> + FromIterator<(i32, i32)>,
{
    for key in -1..=2 * n {
        let tree: T = (0..n).map(|i| (2 * i, i)).collect();
        let (low, high) = checked_split(tree, &key);
        assert_eq!(low.len() as i32, ((key + 2) / 2).clamp(0, n));
        let tree = low.merge(high);
        tree.assert_correctness();
        assert_eq!(tree.len() as i32, n);
        assert!(tree.keys().tuple_windows().all(|(a, b)| a < b));
    }
}

/// Something to perform on a color array in one round of tests
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ColorAction {
    Flip { x: usize },
    FlipRange { lo: usize, hi: usize },
    Toggle { index: usize },
    SetColor { index: usize, color: Color },
    Get { index: usize },
    Push { color: Color },
    Pop,
}

pub fn color_strategy() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::White), Just(Color::Black)]
}

pub fn color_action_strategy(max_len: usize) -> impl Strategy<Value = ColorAction> {
    use ColorAction::*;
    prop_oneof![
        3 => (0..max_len + 2).prop_map(|x| Flip { x }),
        2 => (0..max_len + 2, 0..max_len + 2).prop_map(|(lo, hi)| FlipRange { lo, hi }),
        1 => (0..max_len + 2).prop_map(|index| Toggle { index }),
        1 => (0..max_len + 2, color_strategy())
            .prop_map(|(index, color)| SetColor { index, color }),
        1 => (0..max_len + 2).prop_map(|index| Get { index }),
        1 => color_strategy().prop_map(|color| Push { color }),
        1 => Just(Pop),
    ]
}

fn model_index(model: &[Color], index: usize) -> Result<usize, Error> {
    if index == 0 || index > model.len() {
        Err(Error::IndexOutOfRange {
            index,
            len: model.len(),
        })
    } else {
        Ok(index - 1)
    }
}

/// Applies the action to a color array and to a plain vector, and returns both results.
pub fn run_color_round<T>(
    action: ColorAction,
    array: &mut ColorArray<T>,
    model: &mut Vec<Color>,
) -> (Result<Option<Color>, Error>, Result<Option<Color>, Error>)
where
    T: SomeTree<usize, Color>,
{
    use ColorAction::*;
    match action {
        Flip { x } => {
            let expected = if x == 0 || x > model.len() + 1 {
                Err(Error::IndexOutOfRange {
                    index: x,
                    len: model.len(),
                })
            } else {
                for color in &mut model[x - 1..] {
                    *color = !*color;
                }
                Ok(None)
            };
            (array.flip(x).map(|()| None), expected)
        }
        FlipRange { lo, hi } => {
            let expected = if lo > hi {
                Ok(None)
            } else {
                model_index(model, lo)
                    .and_then(|lo| Ok((lo, model_index(model, hi)?)))
                    .map(|(lo, hi)| {
                        for color in &mut model[lo..=hi] {
                            *color = !*color;
                        }
                        None
                    })
            };
            (array.flip_range(lo, hi).map(|()| None), expected)
        }
        Toggle { index } => {
            let expected = model_index(model, index).map(|i| {
                model[i] = !model[i];
                Some(model[i])
            });
            (array.toggle(index).map(Some), expected)
        }
        SetColor { index, color } => {
            let expected = model_index(model, index).map(|i| {
                model[i] = color;
                None
            });
            (array.set_color(index, color).map(|()| None), expected)
        }
        Get { index } => (
            array.get(index).map(Some),
            model_index(model, index).map(|i| Some(model[i])),
        ),
        Push { color } => {
            array.push(color);
            model.push(color);
            (Ok(None), Ok(None))
        }
        Pop => (Ok(array.pop()), Ok(model.pop())),
    }
}

pub fn check_color_array_proptest<T>(
    initial: &[Color],
    actions: &[ColorAction],
) -> Result<(), TestCaseError>
where
    T: SomeTree<usize, Color>,
{
    let mut array: ColorArray<T> = initial.iter().copied().collect();
    let mut model = initial.to_vec();
    for &action in actions {
        let (res, expected) = run_color_round(action, &mut array, &mut model);
        prop_assert_eq!(res, expected, "{:?}", action);
        prop_assert_eq!(array.len(), model.len());
    }
    array.assert_correctness();
    prop_assert!(array.colors().eq(model.iter().copied()));
    Ok(())
}

use lazy_bst::{Error, LazyTree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set of live keys.
/// This way we can ensure that after a random smattering of inserts
/// and removals we have the same set of live keys in both.
fn do_ops<K>(ops: &[Op<K>], tree: &mut LazyTree<K>, live: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                live.insert(k.clone());
            }
            Op::Remove(k) => {
                tree.remove(k);
                live.remove(k);
            }
            Op::RemoveHard(k) => {
                tree.remove_hard(k);
                live.remove(k);
            }
            Op::CollectGarbage => {
                tree.collect_garbage();
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = LazyTree::new();
    let mut live = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut live);
    tree.size() == live.len()
        && tree.size() <= tree.hard_size()
        && tree.iter().eq(live.iter())
        && tree.find_min().ok() == live.iter().next()
        && tree.find_max().ok() == live.iter().next_back()
}

#[quickcheck]
fn live_traversal_is_strictly_increasing(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: LazyTree<_> = xs.into_iter().collect();
    for x in &removes {
        tree.remove(x);
    }

    let mut visited = Vec::new();
    tree.traverse_live(|x| visited.push(*x));
    visited.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: LazyTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(Error::NotFound))
}

#[quickcheck]
fn remove_and_reinsert_keeps_hard_size(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: LazyTree<_> = xs.into_iter().collect();
    tree.insert(x);
    let hard_size = tree.hard_size();

    tree.remove(&x);
    let removed = !tree.contains(&x) && tree.find(&x) == Err(Error::NotFound);
    tree.insert(x);

    removed && tree.contains(&x) && tree.hard_size() == hard_size
}

#[quickcheck]
fn garbage_collection_leaves_only_live_nodes(ops: Vec<Op<i8>>) -> bool {
    let mut tree = LazyTree::new();
    let mut live = BTreeSet::new();
    do_ops(&ops, &mut tree, &mut live);

    tree.collect_garbage();
    tree.hard_size() == live.len()
        && tree.iter_all().all(|(_, tombstoned)| !tombstoned)
        && !tree.collect_garbage()
}

#[quickcheck]
fn clone_is_independent(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let original: LazyTree<_> = xs.into_iter().collect();
    let before = original.iter_all().map(|(k, t)| (*k, t)).collect::<Vec<_>>();
    let (size, hard_size, height) = (original.size(), original.hard_size(), original.height());

    let mut cloned = original.clone();
    let mut live = BTreeSet::new();
    do_ops(&ops, &mut cloned, &mut live);

    original.iter_all().map(|(k, t)| (*k, t)).eq(before)
        && original.size() == size
        && original.hard_size() == hard_size
        && original.height() == height
}

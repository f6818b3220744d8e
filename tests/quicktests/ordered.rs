use std::collections::HashSet;

use arbor::{Balancer, OrderedTree, TreeError};

use crate::{init_logging, remove_all};

fn contains<B: Balancer>(xs: &[i8]) -> bool {
    let tree: OrderedTree<_, B> = xs.iter().copied().collect();
    xs.iter().all(|x| tree.contains(x)) && tree.len() == xs.len()
}

fn contains_not<B: Balancer>(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_, B> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

/// Deletes every copy of each of `deletes`, then checks the survivors come out sorted.
fn with_deletions<B: Balancer>(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_, B> = xs.iter().copied().collect();
    for delete in &deletes {
        while tree.delete(delete).is_ok() {}
        let before = tree.clone();
        if tree.delete(delete) != Err(TreeError::NotFound)
            || tree != before
            || tree.check_invariants().is_err()
        {
            return false;
        }
    }

    let mut still_present = xs;
    remove_all(&mut still_present, &deletes);
    still_present.sort_unstable();
    tree.iter().eq(still_present.iter())
}

/// Every traversal sees every vertex exactly once.
fn traversals_agree<B: Balancer>(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_, B> = xs.into_iter().collect();
    let sorted = |mut seen: Vec<i8>| {
        seen.sort_unstable();
        seen
    };
    let (mut pre, mut inorder, mut post, mut level) = (vec![], vec![], vec![], vec![]);
    tree.pre_order(|v| pre.push(*v.element()));
    tree.in_order(|v| inorder.push(*v.element()));
    tree.post_order(|v| post.push(*v.element()));
    tree.bfs(|v| level.push(*v.element()));

    let expected: Vec<i8> = tree.iter().copied().collect();
    inorder == expected
        && sorted(pre) == expected
        && sorted(post) == expected
        && sorted(level) == expected
}

/// A clone compares equal, and stops comparing equal once either side changes.
fn clones_are_structurally_equal<B: Balancer>(xs: Vec<i8>, extra: i8) -> bool {
    let tree: OrderedTree<_, B> = xs.into_iter().collect();
    let mut copy = tree.clone();
    if copy != tree {
        return false;
    }
    copy.insert(extra);
    copy != tree
}

macro_rules! ordered_quicktests {
    ($($module:ident => $balancer:ty),* $(,)?) => {$(
        mod $module {
            use super::*;

            quickcheck::quickcheck! {
                fn contains_inserted(xs: Vec<i8>) -> bool {
                    init_logging();
                    contains::<$balancer>(&xs)
                }

                fn misses_absent(xs: Vec<i8>, nots: Vec<i8>) -> bool {
                    contains_not::<$balancer>(xs, nots)
                }

                fn deletions_keep_order(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
                    with_deletions::<$balancer>(xs, deletes)
                }

                fn traversals_see_everything(xs: Vec<i8>) -> bool {
                    traversals_agree::<$balancer>(xs)
                }

                fn clones_compare_equal(xs: Vec<i8>, extra: i8) -> bool {
                    clones_are_structurally_equal::<$balancer>(xs, extra)
                }
            }
        }
    )*};
}

ordered_quicktests! {
    unbalanced => arbor::Unbalanced,
    avl => arbor::Avl,
    red_black => arbor::RedBlack,
}

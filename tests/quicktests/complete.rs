use arbor::{CompleteTree, TreeError};

use crate::remove_all;

fn floor_log2(len: usize) -> isize {
    match len {
        0 => -1,
        len => len.ilog2() as isize,
    }
}

quickcheck::quickcheck! {
    fn keeps_insertion_order_breadth_first(xs: Vec<i8>) -> bool {
        crate::init_logging();
        let tree: CompleteTree<_> = xs.iter().copied().collect();
        tree.iter().eq(xs.iter()) && tree.height() == floor_log2(xs.len())
    }

    fn stays_complete_through_deletes(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: CompleteTree<_> = xs.iter().copied().collect();
        for x in &deletes {
            while tree.delete(x).is_ok() {
                if tree.check_invariants().is_err() || tree.height() != floor_log2(tree.len()) {
                    return false;
                }
            }
            if tree.delete(x) != Err(TreeError::NotFound) {
                return false;
            }
        }

        let mut expected = xs;
        remove_all(&mut expected, &deletes);
        let mut actual: Vec<i8> = tree.iter().copied().collect();
        expected.sort_unstable();
        actual.sort_unstable();
        actual == expected
    }

    fn bfs_matches_iter(xs: Vec<i8>) -> bool {
        let tree: CompleteTree<_> = xs.into_iter().collect();
        let mut seen = Vec::new();
        tree.bfs(|v| seen.push(*v.element()));
        seen.iter().eq(tree.iter())
    }
}

use arbor::AvlTree;

/// Checks every vertex's stored height and balance factor using the public vertex API only.
fn heights_hold(tree: &AvlTree<i16>) -> bool {
    let mut ok = true;
    tree.post_order(|v| {
        let left = v.left().map_or(-1, |l| l.height());
        let right = v.right().map_or(-1, |r| r.height());
        ok &= v.height() == left.max(right) + 1;
        ok &= (left - right).abs() <= 1;
        ok &= tree.height_of(v.id()) == Ok(v.height());
    });
    ok && tree.height() == tree.root().map_or(-1, |root| root.height())
}

quickcheck::quickcheck! {
    fn balanced_after_inserts(xs: Vec<i16>) -> bool {
        crate::init_logging();
        let tree: AvlTree<_> = xs.into_iter().collect();
        heights_hold(&tree)
    }

    fn balanced_after_deletes(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
        let mut tree: AvlTree<_> = xs.into_iter().collect();
        for x in &deletes {
            let _ = tree.delete(x);
            if !heights_hold(&tree) {
                return false;
            }
        }
        tree.check_invariants().is_ok()
    }

    fn rotation_is_rejected(xs: Vec<i16>) -> bool {
        let mut tree: AvlTree<_> = xs.into_iter().collect();
        let Ok(root) = tree.root().map(|root| root.id()) else {
            return true;
        };
        let before = tree.clone();
        tree.rotate_left(root).is_err() && tree.rotate_right(root).is_err() && tree == before
    }
}

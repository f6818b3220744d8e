use arbor::{Color, RedBlackTree, VertexRef};

/// The number of black vertices from `v` up to and including the root.
fn blacks_to_root(mut v: VertexRef<'_, i16>) -> usize {
    let mut count = 0;
    loop {
        count += usize::from(v.color() == Some(Color::Black));
        match v.parent() {
            Ok(parent) => v = parent,
            Err(_) => return count,
        }
    }
}

/// Checks the coloring rules using the public vertex API only.
fn colors_hold(tree: &RedBlackTree<i16>) -> bool {
    let root_black = tree
        .root()
        .map_or(true, |root| root.color() == Some(Color::Black));
    let mut ok = root_black;
    let mut black_height = None;
    tree.pre_order(|v| {
        let color = v.color();
        ok &= matches!(color, Some(Color::Red | Color::Black));
        ok &= tree.color_of(v.id()).ok() == color;
        if color == Some(Color::Red) {
            for child in [v.left(), v.right()].into_iter().flatten() {
                ok &= child.color() == Some(Color::Black);
            }
        }
        if !v.has_left() || !v.has_right() {
            let blacks = blacks_to_root(v);
            ok &= *black_height.get_or_insert(blacks) == blacks;
        }
    });
    ok
}

quickcheck::quickcheck! {
    fn colored_after_inserts(xs: Vec<i16>) -> bool {
        crate::init_logging();
        let tree: RedBlackTree<_> = xs.into_iter().collect();
        colors_hold(&tree)
    }

    fn colored_after_deletes(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
        let mut tree: RedBlackTree<_> = xs.into_iter().collect();
        for x in &deletes {
            let _ = tree.delete(x);
            if !colors_hold(&tree) {
                return false;
            }
        }
        tree.check_invariants().is_ok()
    }

    fn delete_returns_the_element(xs: Vec<i16>) -> bool {
        let mut tree: RedBlackTree<_> = xs.iter().copied().collect();
        xs.iter().all(|x| tree.delete(x) == Ok(*x)) && tree.is_empty()
    }
}

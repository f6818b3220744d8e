use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use arbor::{AvlTree, BinarySearchTree, RedBlackTree};

#[derive(Clone)]
enum TreeEnum<T> {
    Unbalanced(BinarySearchTree<T>),
    Avl(AvlTree<T>),
    RedBlack(RedBlackTree<T>),
}

impl<T: Ord> TreeEnum<T> {
    fn contains(&self, x: &T) -> bool {
        match self {
            Self::Unbalanced(t) => t.contains(x),
            Self::Avl(t) => t.contains(x),
            Self::RedBlack(t) => t.contains(x),
        }
    }

    fn insert(&mut self, x: T) {
        match self {
            Self::Unbalanced(t) => t.insert(x),
            Self::Avl(t) => t.insert(x),
            Self::RedBlack(t) => t.insert(x),
        }
    }

    fn delete(&mut self, x: &T) {
        match self {
            Self::Unbalanced(t) => {
                let _removed = black_box(t.delete(x));
            }
            Self::Avl(t) => {
                let _removed = black_box(t.delete(x));
            }
            Self::RedBlack(t) => {
                let _removed = black_box(t.delete(x));
            }
        }
    }
}

/// The elements `0..num_nodes`, ordered so that inserting them into an unbalanced tree builds a
/// perfect tree. Keeps the unbalanced numbers comparable to the balanced ones.
fn perfect_order(num_nodes: usize) -> Vec<i32> {
    let mut order = Vec::with_capacity(num_nodes);
    let mut ranges = VecDeque::from([(0, num_nodes)]);
    while let Some((low, high)) = ranges.pop_front() {
        if low < high {
            let mid = low + (high - low) / 2;
            order.push(mid as i32);
            ranges.push_back((low, mid));
            ranges.push_back((mid + 1, high));
        }
    }
    order
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// balancing strategies before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element_in_tree = num_nodes - 1;
        let order = perfect_order(num_nodes);

        let tree_tests = [
            (
                "unbalanced",
                TreeEnum::Unbalanced(order.iter().copied().collect()),
            ),
            ("avl", TreeEnum::Avl(order.iter().copied().collect())),
            (
                "red-black",
                TreeEnum::RedBlack(order.iter().copied().collect()),
            ),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree as i32));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "search", |tree, i| {
        let _found = black_box(tree.contains(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.delete(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "search-miss", |tree, i| {
        let _found = black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.delete(&(i + 1));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

//! AVL rebalancing. See [the Wikipedia page][wiki] for terminology.
//!
//! [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing

use log::trace;

use crate::engine::Engine;
use crate::error::Violation;
use crate::vertex::{Augment, VertexId};

/// The stored height of a vertex, -1 for an absent one.
pub(crate) fn height_of<T>(engine: &Engine<T>, id: Option<VertexId>) -> isize {
    match id.map(|id| engine.augment(id)) {
        Some(Augment::Height(height)) => height,
        Some(_) => unreachable!("AVL trees only hold height-bearing vertices"),
        None => -1,
    }
}

/// Adjusts the height of `id` to be the max of its children's heights + 1.
fn fix_height<T>(engine: &mut Engine<T>, id: VertexId) {
    let left = height_of(engine, engine.left(id));
    let right = height_of(engine, engine.right(id));
    engine.set_augment(id, Augment::Height(left.max(right) + 1));
}

/// The height of the left subtree minus the height of the right subtree.
fn balance_factor<T>(engine: &Engine<T>, id: VertexId) -> isize {
    height_of(engine, engine.left(id)) - height_of(engine, engine.right(id))
}

fn rotate_left<T>(engine: &mut Engine<T>, id: VertexId) {
    let rotated = engine.rotate_left(id);
    debug_assert!(rotated, "Rotate left => right child");
    fix_height(engine, id);
    if let Some(parent) = engine.parent(id) {
        fix_height(engine, parent);
    }
}

fn rotate_right<T>(engine: &mut Engine<T>, id: VertexId) {
    let rotated = engine.rotate_right(id);
    debug_assert!(rotated, "Rotate right => left child");
    fix_height(engine, id);
    if let Some(parent) = engine.parent(id) {
        fix_height(engine, parent);
    }
}

/// Walks from `start` up to the root, refreshing heights and rotating wherever a vertex's subtrees
/// differ in height by two. Every ancestor is visited, not just those up to the first balanced one.
pub(crate) fn rebalance<T>(engine: &mut Engine<T>, start: Option<VertexId>) {
    let mut current = start;
    while let Some(id) = current {
        fix_height(engine, id);
        let rotated = match balance_factor(engine, id) {
            -2 => {
                let right = engine.right(id).expect("Right heavy => right child");
                if balance_factor(engine, right) == 1 {
                    trace!("{id:?} is right heavy with a zig-zag, rotating right then left");
                    rotate_right(engine, right);
                } else {
                    trace!("{id:?} is right heavy, rotating left");
                }
                rotate_left(engine, id);
                true
            }
            2 => {
                let left = engine.left(id).expect("Left heavy => left child");
                if balance_factor(engine, left) == -1 {
                    trace!("{id:?} is left heavy with a zig-zag, rotating left then right");
                    rotate_left(engine, left);
                } else {
                    trace!("{id:?} is left heavy, rotating right");
                }
                rotate_right(engine, id);
                true
            }
            _ => false,
        };

        if cfg!(debug_assertions) {
            // After a rotation `id` has moved down and its parent is the new subtree root.
            let top = match engine.parent(id) {
                Some(parent) if rotated => parent,
                _ => id,
            };
            assert!(balance_factor(engine, top).abs() <= 1);
        }
        current = engine.parent(id);
    }
}

/// Checks that every stored height is correct and every balance factor is within -1..=1.
pub(crate) fn check<T>(engine: &Engine<T>) -> Result<(), Violation> {
    for vertex in engine.post_order() {
        let id = vertex.id();
        let left = height_of(engine, engine.left(id));
        let right = height_of(engine, engine.right(id));
        if height_of(engine, Some(id)) != left.max(right) + 1 {
            return Err(Violation::StaleHeight(id));
        }
        if (left - right).abs() > 1 {
            return Err(Violation::Unbalanced(id));
        }
    }
    Ok(())
}

//! Red-black rebalancing.
//!
//! A red-black tree always satisfies:
//!
//! 1. Every vertex is red or black.
//! 2. The root is black.
//! 3. Absent children count as black leaves.
//! 4. A red vertex has two black children.
//! 5. Every path from a vertex down to an absent child passes through the same number of black
//!    vertices.
//!
//! Deleting a black vertex with no children leaves a "doubly black" hole where it used to be. The
//! hole has no vertex of its own, so the walk that repairs it tracks it as a virtual slot
//! (its parent plus a side) instead of allocating a throwaway leaf.

use log::trace;

use crate::balance::Removal;
use crate::engine::Engine;
use crate::error::Violation;
use crate::vertex::{Augment, Color, Side, VertexId};

fn color_of<T>(engine: &Engine<T>, id: Option<VertexId>) -> Color {
    match id.map(|id| engine.augment(id)) {
        Some(Augment::Color(color)) => color,
        Some(_) => unreachable!("Red-black trees only hold colored vertices"),
        None => Color::Black,
    }
}

fn is_red<T>(engine: &Engine<T>, id: Option<VertexId>) -> bool {
    color_of(engine, id) == Color::Red
}

fn is_black<T>(engine: &Engine<T>, id: Option<VertexId>) -> bool {
    color_of(engine, id) == Color::Black
}

fn paint<T>(engine: &mut Engine<T>, id: VertexId, color: Color) {
    engine.set_augment(id, Augment::Color(color));
}

/// Restores the coloring rules after `inserted` was linked in as a new leaf.
pub(crate) fn after_insert<T>(engine: &mut Engine<T>, inserted: VertexId) {
    paint(engine, inserted, Color::Red);
    let mut vertex = inserted;
    loop {
        let Some(mut parent) = engine.parent(vertex) else {
            trace!("{vertex:?} is the root, painting it black");
            paint(engine, vertex, Color::Black);
            return;
        };
        if is_black(engine, Some(parent)) {
            return;
        }

        let grandparent = engine.parent(parent).expect("A red vertex is never the root");
        let parent_side = engine.side_of(parent).expect("Parent has a parent");
        let uncle = engine.child(grandparent, parent_side.opposite());
        if let (Some(uncle), true) = (uncle, is_red(engine, uncle)) {
            trace!("uncle of {vertex:?} is red, recoloring and moving up to {grandparent:?}");
            paint(engine, parent, Color::Black);
            paint(engine, uncle, Color::Black);
            paint(engine, grandparent, Color::Red);
            vertex = grandparent;
            continue;
        }

        if engine.side_of(vertex) != Some(parent_side) {
            trace!("{vertex:?} and its parent are crossed, rotating {parent:?}");
            engine.rotate(parent, parent_side);
            // The old parent is now the child of `vertex`, so the two trade roles.
            std::mem::swap(&mut vertex, &mut parent);
        }

        trace!("{vertex:?} and its parent are aligned, rotating {grandparent:?}");
        paint(engine, parent, Color::Black);
        paint(engine, grandparent, Color::Red);
        engine.rotate(grandparent, parent_side.opposite());
        return;
    }
}

/// A vertex one black short on every path through it: either a real vertex or the empty spot a
/// removed leaf left behind.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Real(VertexId),
    Virtual { parent: VertexId, side: Side },
}

impl Slot {
    /// The parent of the slot and the side it hangs from, `None` at the root.
    fn position<T>(self, engine: &Engine<T>) -> Option<(VertexId, Side)> {
        match self {
            Slot::Real(id) => Some((engine.parent(id)?, engine.side_of(id)?)),
            Slot::Virtual { parent, side } => Some((parent, side)),
        }
    }
}

/// Restores the coloring rules after a vertex was unlinked.
pub(crate) fn after_remove<T>(engine: &mut Engine<T>, removal: &Removal) {
    let removed_black = matches!(removal.augment, Augment::Color(Color::Black));
    let child_black = is_black(engine, removal.child);
    if let Some(child) = removal.child {
        paint(engine, child, Color::Black);
    }
    if !(removed_black && child_black) {
        // Either the removed vertex or its child was red; painting the child black restores every
        // black height on its own.
        return;
    }

    let slot = match (removal.child, removal.parent, removal.side) {
        (Some(child), _, _) => Slot::Real(child),
        (None, Some(parent), Some(side)) => Slot::Virtual { parent, side },
        // The last vertex was removed.
        _ => return,
    };
    fix_double_black(engine, slot);
}

fn fix_double_black<T>(engine: &mut Engine<T>, mut slot: Slot) {
    loop {
        let Some((parent, side)) = slot.position(engine) else {
            if let Slot::Real(root) = slot {
                paint(engine, root, Color::Black);
            }
            return;
        };

        let mut sibling = engine
            .child(parent, side.opposite())
            .expect("A doubly black vertex always has a sibling");
        if is_red(engine, Some(sibling)) {
            trace!("sibling {sibling:?} is red, rotating {parent:?} {side:?}");
            paint(engine, parent, Color::Red);
            paint(engine, sibling, Color::Black);
            engine.rotate(parent, side);
            sibling = engine
                .child(parent, side.opposite())
                .expect("A red sibling has two black children");
        }

        let near = engine.child(sibling, side);
        let mut far = engine.child(sibling, side.opposite());
        let nephews_black = is_black(engine, near) && is_black(engine, far);

        if nephews_black && is_black(engine, Some(parent)) {
            trace!("{parent:?}, its children and nephews are black, moving up");
            paint(engine, sibling, Color::Red);
            slot = Slot::Real(parent);
            continue;
        }
        if nephews_black {
            trace!("{parent:?} is red with black children and nephews, swapping colors");
            paint(engine, sibling, Color::Red);
            paint(engine, parent, Color::Black);
            return;
        }

        if let (Some(near), true) = (near, is_black(engine, far)) {
            trace!("near nephew {near:?} is red, rotating {sibling:?} away");
            paint(engine, sibling, Color::Red);
            paint(engine, near, Color::Black);
            engine.rotate(sibling, side.opposite());
            sibling = near;
            far = engine.child(sibling, side.opposite());
        }

        trace!("far nephew {far:?} is red, rotating {parent:?} {side:?}");
        let parent_color = color_of(engine, Some(parent));
        paint(engine, sibling, parent_color);
        paint(engine, parent, Color::Black);
        paint(engine, far.expect("The far nephew is red"), Color::Black);
        engine.rotate(parent, side);
        return;
    }
}

/// Checks the five coloring rules.
pub(crate) fn check<T>(engine: &Engine<T>) -> Result<(), Violation> {
    if let Some(root) = engine.root_id() {
        if is_red(engine, Some(root)) {
            return Err(Violation::RedRoot(root));
        }
    }

    // Black height of every finished subtree, indexed by vertex id.
    let mut black_heights = vec![0usize; engine.slot_count()];
    let black_height = |heights: &[usize], id: Option<VertexId>| id.map_or(1, |id| heights[id.0]);

    for vertex in engine.post_order() {
        let id = vertex.id();
        let (left, right) = (engine.left(id), engine.right(id));
        let color = color_of(engine, Some(id));
        if color == Color::Uncolored {
            return Err(Violation::Uncolored(id));
        }
        if color == Color::Red && (is_red(engine, left) || is_red(engine, right)) {
            return Err(Violation::RedRed(id));
        }

        let below = black_height(&black_heights, left);
        if below != black_height(&black_heights, right) {
            return Err(Violation::BlackHeight(id));
        }
        black_heights[id.0] = below + usize::from(color == Color::Black);
    }
    Ok(())
}

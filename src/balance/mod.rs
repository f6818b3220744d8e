//! Balancing strategies for [`OrderedTree`](crate::OrderedTree).
//!
//! An ordered tree performs the plain structural insert or delete and then hands the affected
//! vertex to its strategy, which restores whatever invariant it is responsible for. The strategy
//! is picked by a zero-sized marker type so each tree kind is its own type:
//!
//! - [`Unbalanced`] does nothing. Height is bounded only by the insertion order.
//! - [`Avl`] keeps the heights of sibling subtrees within one of each other.
//! - [`RedBlack`] keeps the red-black coloring rules.

pub(crate) mod avl;
pub(crate) mod red_black;

use crate::engine::Engine;
use crate::error::Violation;
use crate::vertex::{Augment, Color, Side, VertexId};

/// The rebalancing routine a tree runs after each structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// No rebalancing.
    Unbalanced,
    /// Height balancing with stored heights.
    Avl,
    /// Color balancing with recoloring and rotations.
    RedBlack,
}

impl Strategy {
    /// Only unbalanced trees may be rotated by their users.
    pub(crate) fn allows_external_rotation(self) -> bool {
        matches!(self, Strategy::Unbalanced)
    }

    /// The augment a freshly inserted vertex starts with.
    pub(crate) fn fresh_augment(self) -> Augment {
        match self {
            Strategy::Unbalanced => Augment::Plain,
            Strategy::Avl => Augment::Height(0),
            Strategy::RedBlack => Augment::Color(Color::Uncolored),
        }
    }

    pub(crate) fn after_insert<T>(self, engine: &mut Engine<T>, inserted: VertexId) {
        match self {
            Strategy::Unbalanced => {}
            Strategy::Avl => {
                let parent = engine.parent(inserted);
                avl::rebalance(engine, parent);
            }
            Strategy::RedBlack => red_black::after_insert(engine, inserted),
        }
    }

    pub(crate) fn after_remove<T>(self, engine: &mut Engine<T>, removal: &Removal) {
        match self {
            Strategy::Unbalanced => {}
            Strategy::Avl => avl::rebalance(engine, removal.parent),
            Strategy::RedBlack => red_black::after_remove(engine, removal),
        }
    }

    pub(crate) fn check<T>(self, engine: &Engine<T>) -> Result<(), Violation> {
        match self {
            Strategy::Unbalanced => Ok(()),
            Strategy::Avl => avl::check(engine),
            Strategy::RedBlack => red_black::check(engine),
        }
    }
}

/// Where a vertex was physically unlinked from, as seen by a balancer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Removal {
    /// The parent the removed vertex hung from, `None` if it was the root.
    pub(crate) parent: Option<VertexId>,
    /// Which side of `parent` the removed vertex hung from.
    pub(crate) side: Option<Side>,
    /// The child that took the removed vertex's place, if any.
    pub(crate) child: Option<VertexId>,
    /// The removed vertex's augment.
    pub(crate) augment: Augment,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unbalanced {}
    impl Sealed for super::Avl {}
    impl Sealed for super::RedBlack {}
}

/// Selects the balancing strategy of an [`OrderedTree`](crate::OrderedTree). Implemented only by
/// the marker types in this module.
pub trait Balancer: sealed::Sealed {
    /// The routine this marker stands for.
    const STRATEGY: Strategy;
}

/// Marker for an ordered tree that never rebalances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unbalanced;

/// Marker for an AVL tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Avl;

/// Marker for a red-black tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedBlack;

impl Balancer for Unbalanced {
    const STRATEGY: Strategy = Strategy::Unbalanced;
}

impl Balancer for Avl {
    const STRATEGY: Strategy = Strategy::Avl;
}

impl Balancer for RedBlack {
    const STRATEGY: Strategy = Strategy::RedBlack;
}

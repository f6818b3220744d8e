//! Errors reported by the trees in this crate.

use thiserror::Error;

use crate::vertex::VertexId;

/// The ways a tree operation can fail. A failing operation never leaves the tree partially
/// modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The given [`VertexId`] does not name a live vertex of this tree.
    #[error("vertex {0:?} does not belong to this tree")]
    InvalidArgument(VertexId),
    /// The requested element, vertex or link does not exist.
    #[error("no such element")]
    NotFound,
    /// The operation is not allowed on this kind of tree.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

/// The first broken invariant found by a `check_invariants` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// An element sits on the wrong side of one of its ancestors.
    #[error("vertex {0:?} breaks the search order")]
    Order(VertexId),
    /// A child does not point back at the vertex that links to it.
    #[error("vertex {0:?} has a parent link that does not match its position")]
    BrokenLink(VertexId),
    /// The stored element count differs from the number of reachable vertices.
    #[error("tree records {recorded} elements but {reachable} are reachable")]
    Count {
        /// The count the tree keeps.
        recorded: usize,
        /// The number of vertices reachable from the root.
        reachable: usize,
    },
    /// The heights of the two subtrees of a vertex differ by more than one.
    #[error("vertex {0:?} has a balance factor outside of -1..=1")]
    Unbalanced(VertexId),
    /// The stored height of a vertex is not one more than its tallest child.
    #[error("vertex {0:?} stores a stale height")]
    StaleHeight(VertexId),
    /// A vertex of a red-black tree is neither red nor black.
    #[error("vertex {0:?} is uncolored")]
    Uncolored(VertexId),
    /// The root of a red-black tree is red.
    #[error("the root {0:?} is red")]
    RedRoot(VertexId),
    /// A red vertex has a red child.
    #[error("red vertex {0:?} has a red child")]
    RedRed(VertexId),
    /// Two paths below a vertex pass through different numbers of black vertices.
    #[error("paths below vertex {0:?} have different black heights")]
    BlackHeight(VertexId),
    /// A complete tree has a gap before its last vertex in breadth-first order.
    #[error("vertex {0:?} leaves a gap in the last level")]
    Incomplete(VertexId),
}

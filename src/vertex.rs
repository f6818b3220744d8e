//! Vertices and the read-only handles trees hand out to callers.

use std::fmt;

use crate::engine::Engine;
use crate::error::TreeError;

/// Identifies a vertex inside the tree that created it. Ids are only meaningful for that tree and
/// only until the vertex is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

/// The color of a red-black vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red vertex. Both of its children are black.
    Red,
    /// A black vertex. Absent children count as black.
    Black,
    /// A vertex that has not been colored yet. Never observable once an operation returns.
    Uncolored,
}

/// The per-vertex bookkeeping a balancing strategy keeps on top of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Augment {
    /// Nothing extra (unbalanced and complete trees).
    Plain,
    /// The height of the subtree rooted at the vertex. A leaf has height 0.
    Height(isize),
    /// The red-black color of the vertex.
    Color(Color),
}

/// Which child of its parent a vertex is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A vertex as stored in the arena. The children are owned through the arena; `parent` is only a
/// back-link used to walk upward.
#[derive(Debug, Clone)]
pub(crate) struct Vertex<T> {
    pub(crate) element: T,
    pub(crate) left: Option<VertexId>,
    pub(crate) right: Option<VertexId>,
    pub(crate) parent: Option<VertexId>,
    pub(crate) augment: Augment,
}

impl<T> Vertex<T> {
    pub(crate) fn new(element: T, augment: Augment) -> Self {
        Self {
            element,
            left: None,
            right: None,
            parent: None,
            augment,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<VertexId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// A borrowed view of one vertex of a tree.
///
/// # Examples
///
/// ```
/// use arbor::BinarySearchTree;
///
/// let tree: BinarySearchTree<_> = [5, 3, 8].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(*root.element(), 5);
/// assert_eq!(*root.left().unwrap().element(), 3);
/// assert!(root.parent().is_err());
/// ```
pub struct VertexRef<'a, T> {
    engine: &'a Engine<T>,
    id: VertexId,
}

impl<T> Clone for VertexRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for VertexRef<'_, T> {}

impl<T> fmt::Debug for VertexRef<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexRef")
            .field("id", &self.id)
            .field("element", self.element())
            .field("augment", &self.augment())
            .finish()
    }
}

impl<'a, T> VertexRef<'a, T> {
    pub(crate) fn new(engine: &'a Engine<T>, id: VertexId) -> Self {
        Self { engine, id }
    }

    fn vertex(&self) -> &'a Vertex<T> {
        self.engine.vertex(self.id)
    }

    fn link(&self, link: Option<VertexId>) -> Result<Self, TreeError> {
        link.map(|id| Self::new(self.engine, id))
            .ok_or(TreeError::NotFound)
    }

    /// The id of this vertex, usable with the tree's id-based operations.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The element stored in this vertex.
    pub fn element(&self) -> &'a T {
        &self.vertex().element
    }

    /// The balancing bookkeeping stored in this vertex.
    pub fn augment(&self) -> Augment {
        self.vertex().augment
    }

    /// The color of this vertex, if it belongs to a red-black tree.
    pub fn color(&self) -> Option<Color> {
        match self.augment() {
            Augment::Color(color) => Some(color),
            _ => None,
        }
    }

    /// Whether this vertex has a parent.
    pub fn has_parent(&self) -> bool {
        self.vertex().parent.is_some()
    }

    /// Whether this vertex has a left child.
    pub fn has_left(&self) -> bool {
        self.vertex().left.is_some()
    }

    /// Whether this vertex has a right child.
    pub fn has_right(&self) -> bool {
        self.vertex().right.is_some()
    }

    /// The parent of this vertex, or [`TreeError::NotFound`] for the root.
    pub fn parent(&self) -> Result<Self, TreeError> {
        self.link(self.vertex().parent)
    }

    /// The left child of this vertex, or [`TreeError::NotFound`] if there is none.
    pub fn left(&self) -> Result<Self, TreeError> {
        self.link(self.vertex().left)
    }

    /// The right child of this vertex, or [`TreeError::NotFound`] if there is none.
    pub fn right(&self) -> Result<Self, TreeError> {
        self.link(self.vertex().right)
    }

    /// The height of the subtree rooted here; a leaf has height 0. AVL vertices report their
    /// stored height, every other vertex computes it.
    pub fn height(&self) -> isize {
        match self.augment() {
            Augment::Height(height) => height,
            _ => self.engine.subtree_height(Some(self.id)),
        }
    }

    /// The number of edges between this vertex and the root.
    pub fn depth(&self) -> usize {
        self.engine.depth_of(self.id)
    }
}

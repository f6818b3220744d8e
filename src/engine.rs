//! The arena every tree in this crate is built on.
//!
//! The engine knows how vertices hang together but nothing about ordering: it allocates and frees
//! vertices, keeps parent and child links consistent, rotates, searches structurally, and walks the
//! tree. Every walk uses an explicit stack or queue so an unbalanced tree of any height can be
//! traversed without exhausting the call stack.

use std::collections::VecDeque;

use log::trace;

use crate::error::TreeError;
use crate::iter::{BreadthFirst, InOrder, PostOrder, PreOrder};
use crate::vertex::{Augment, Side, Vertex, VertexId, VertexRef};

#[derive(Debug, Clone)]
pub(crate) struct Engine<T> {
    slots: Vec<Option<Vertex<T>>>,
    // Indices of empty slots, reused before the arena grows.
    free: Vec<usize>,
    root: Option<VertexId>,
    len: usize,
}

impl<T> Default for Engine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Engine<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root_id(&self) -> Option<VertexId> {
        self.root
    }

    /// One past the largest index ever handed out. Useful for sizing side tables keyed by id.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops every vertex but keeps the slots, so ids from before the clear stay dead until their
    /// slot is reused.
    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.free = (0..self.slots.len()).collect();
        self.root = None;
        self.len = 0;
    }

    /// Stores a new, unlinked vertex.
    pub(crate) fn alloc(&mut self, element: T, augment: Augment) -> VertexId {
        let vertex = Some(Vertex::new(element, augment));
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = vertex;
                VertexId(index)
            }
            None => {
                self.slots.push(vertex);
                VertexId(self.slots.len() - 1)
            }
        }
    }

    /// Takes an already unlinked vertex out of the arena.
    pub(crate) fn release(&mut self, id: VertexId) -> Vertex<T> {
        let vertex = self.slots[id.0]
            .take()
            .expect("Released vertices must be live");
        debug_assert!(self.root != Some(id), "Released the root while still linked");
        self.free.push(id.0);
        self.len -= 1;
        vertex
    }

    pub(crate) fn is_live(&self, id: VertexId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Fails with [`TreeError::InvalidArgument`] unless `id` names a live vertex.
    pub(crate) fn check(&self, id: VertexId) -> Result<VertexId, TreeError> {
        if self.is_live(id) {
            Ok(id)
        } else {
            Err(TreeError::InvalidArgument(id))
        }
    }

    pub(crate) fn vertex(&self, id: VertexId) -> &Vertex<T> {
        self.slots[id.0]
            .as_ref()
            .expect("Linked vertex ids are always live")
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex<T> {
        self.slots[id.0]
            .as_mut()
            .expect("Linked vertex ids are always live")
    }

    pub(crate) fn view(&self, id: VertexId) -> VertexRef<'_, T> {
        VertexRef::new(self, id)
    }

    pub(crate) fn root(&self) -> Result<VertexRef<'_, T>, TreeError> {
        self.root.map(|id| self.view(id)).ok_or(TreeError::NotFound)
    }

    pub(crate) fn element(&self, id: VertexId) -> &T {
        &self.vertex(id).element
    }

    pub(crate) fn parent(&self, id: VertexId) -> Option<VertexId> {
        self.vertex(id).parent
    }

    pub(crate) fn left(&self, id: VertexId) -> Option<VertexId> {
        self.vertex(id).left
    }

    pub(crate) fn right(&self, id: VertexId) -> Option<VertexId> {
        self.vertex(id).right
    }

    pub(crate) fn child(&self, id: VertexId, side: Side) -> Option<VertexId> {
        self.vertex(id).child(side)
    }

    pub(crate) fn augment(&self, id: VertexId) -> Augment {
        self.vertex(id).augment
    }

    pub(crate) fn set_augment(&mut self, id: VertexId, augment: Augment) {
        self.vertex_mut(id).augment = augment;
    }

    /// Which side of its parent `id` hangs from, or `None` for the root.
    pub(crate) fn side_of(&self, id: VertexId) -> Option<Side> {
        let parent = self.parent(id)?;
        if self.left(parent) == Some(id) {
            Some(Side::Left)
        } else {
            debug_assert_eq!(self.right(parent), Some(id));
            Some(Side::Right)
        }
    }

    /// Makes `child` the `side` child of `parent`, fixing the child's parent link too.
    pub(crate) fn set_child(&mut self, parent: VertexId, side: Side, child: Option<VertexId>) {
        let vertex = self.vertex_mut(parent);
        match side {
            Side::Left => vertex.left = child,
            Side::Right => vertex.right = child,
        }
        if let Some(child) = child {
            self.vertex_mut(child).parent = Some(parent);
        }
    }

    pub(crate) fn set_root(&mut self, root: Option<VertexId>) {
        self.root = root;
        if let Some(root) = root {
            self.vertex_mut(root).parent = None;
        }
    }

    /// Puts `new` wherever `old` is linked from: its parent's matching child slot, or the root.
    pub(crate) fn replace_in_parent(&mut self, old: VertexId, new: Option<VertexId>) {
        match (self.parent(old), self.side_of(old)) {
            (Some(parent), Some(side)) => self.set_child(parent, side, new),
            _ => self.set_root(new),
        }
    }

    /// Swaps the elements of two vertices, leaving their positions and augments alone.
    pub(crate) fn swap_elements(&mut self, a: VertexId, b: VertexId) {
        if a == b {
            return;
        }
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);
        let low = head[low].as_mut().expect("Linked vertex ids are always live");
        let high = tail[0].as_mut().expect("Linked vertex ids are always live");
        std::mem::swap(&mut low.element, &mut high.element);
    }

    /// The rightmost vertex of the subtree rooted at `id`.
    pub(crate) fn max_in(&self, mut id: VertexId) -> VertexId {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }

    /// Rotates `id` down toward `side`, lifting its child on the other side into its place.
    /// Returns `false` (and changes nothing) when that child doesn't exist.
    ///
    /// # Diagram
    ///
    /// Rotating `old` to the right (toward `Side::Right`):
    ///
    /// ```text
    ///       parent               parent
    ///         /                    /
    ///       old                  new
    ///      /   \                /   \
    ///    new    z   rotate ->  x    old
    ///   /   \                       /  \
    ///  x     y                     y    z
    /// ```
    pub(crate) fn rotate(&mut self, old: VertexId, side: Side) -> bool {
        let lifted_side = side.opposite();
        let Some(new) = self.child(old, lifted_side) else {
            return false;
        };
        trace!("rotating {old:?} {side:?}, lifting {new:?}");

        // Each step below rewrites both directions of a link, so no half-linked state survives
        // past the statement that created it.
        self.replace_in_parent(old, Some(new));
        let moved = self.child(new, side);
        self.set_child(old, lifted_side, moved);
        self.set_child(new, side, Some(old));
        true
    }

    pub(crate) fn rotate_left(&mut self, id: VertexId) -> bool {
        self.rotate(id, Side::Left)
    }

    pub(crate) fn rotate_right(&mut self, id: VertexId) -> bool {
        self.rotate(id, Side::Right)
    }

    /// Height of the subtree rooted at `id`: -1 for an absent subtree, 0 for a leaf.
    pub(crate) fn subtree_height(&self, id: Option<VertexId>) -> isize {
        let mut height = -1;
        let mut level: Vec<VertexId> = id.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| [self.left(id), self.right(id)])
                .flatten()
                .collect();
        }
        height
    }

    pub(crate) fn height(&self) -> isize {
        self.subtree_height(self.root)
    }

    pub(crate) fn depth_of(&self, mut id: VertexId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.parent(id) {
            depth += 1;
            id = parent;
        }
        depth
    }

    /// Finds the first vertex in pre-order holding an element equal to `element`. Doesn't assume
    /// any ordering, so it is O(n).
    pub(crate) fn find_structural(&self, element: &T) -> Option<VertexId>
    where
        T: PartialEq,
    {
        self.pre_order().find(|v| v.element() == element).map(|v| v.id())
    }

    pub(crate) fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(self)
    }

    pub(crate) fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    pub(crate) fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self)
    }

    pub(crate) fn breadth_first(&self) -> BreadthFirst<'_, T> {
        BreadthFirst::new(self)
    }

    /// Whether both trees have the same shape with equal elements and augments at every position.
    /// Stops at the first mismatch.
    pub(crate) fn structurally_eq(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        if self.len != other.len {
            return false;
        }
        let mut pending: VecDeque<(Option<VertexId>, Option<VertexId>)> = VecDeque::new();
        pending.push_back((self.root, other.root));
        while let Some(pair) = pending.pop_front() {
            match pair {
                (None, None) => {}
                (Some(mine), Some(theirs)) => {
                    let (mine, theirs) = (self.vertex(mine), other.vertex(theirs));
                    if mine.element != theirs.element || mine.augment != theirs.augment {
                        return false;
                    }
                    pending.push_back((mine.left, theirs.left));
                    pending.push_back((mine.right, theirs.right));
                }
                _ => return false,
            }
        }
        true
    }
}

//! A complete binary tree: every level is full except possibly the last, which fills from the left.
//!
//! Elements are not ordered. The shape alone decides where a vertex goes, so searching has to look
//! at every vertex.
//!
//! # Examples
//!
//! ```
//! use arbor::CompleteTree;
//!
//! let mut tree: CompleteTree<_> = ["a", "b", "c", "d"].into_iter().collect();
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
//!
//! // The last vertex's element fills the hole.
//! assert_eq!(tree.delete(&"a"), Ok("a"));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["d", "b", "c"]);
//! ```

use std::fmt;

use log::debug;

use crate::engine::Engine;
use crate::error::{TreeError, Violation};
use crate::render;
use crate::vertex::{Augment, Side, VertexId, VertexRef};

/// A binary tree filled in breadth-first order.
pub struct CompleteTree<T> {
    engine: Engine<T>,
}

impl<T> Default for CompleteTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CompleteTree<T> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CompleteTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> CompleteTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// The height of the tree: -1 when empty, otherwise `⌊log2 len⌋`.
    pub fn height(&self) -> isize {
        match self.len() {
            0 => -1,
            len => len.ilog2() as isize,
        }
    }

    /// The root vertex, or [`TreeError::NotFound`] if the tree is empty.
    pub fn root(&self) -> Result<VertexRef<'_, T>, TreeError> {
        self.engine.root()
    }

    /// The vertex with the given id, or [`TreeError::InvalidArgument`] if it isn't in this tree.
    pub fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T>, TreeError> {
        self.engine.check(id).map(|id| self.engine.view(id))
    }

    /// Removes every element. Ids handed out before the clear are rejected with
    /// [`TreeError::InvalidArgument`] until new inserts reuse their slots.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Adds `element` at the first free position in breadth-first order.
    pub fn insert(&mut self, element: T) {
        debug!("inserting into a complete tree of {} elements", self.len());
        let position = self.len() + 1;
        let id = self.engine.alloc(element, Augment::Plain);
        if position == 1 {
            self.engine.set_root(Some(id));
            return;
        }

        let parent = self
            .vertex_at(position / 2)
            .expect("Every position up to the length is filled");
        let side = if position % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        };
        self.engine.set_child(parent, side, Some(id));
    }

    /// The vertex at a 1-based breadth-first `position`. The bits of `position` below its leading
    /// one spell out the path from the root, 0 for left and 1 for right.
    fn vertex_at(&self, position: usize) -> Option<VertexId> {
        let mut id = self.engine.root_id()?;
        for bit in (0..position.ilog2()).rev() {
            let side = if (position >> bit) & 1 == 0 {
                Side::Left
            } else {
                Side::Right
            };
            id = self.engine.child(id, side)?;
        }
        Some(id)
    }

    /// Iterates over the elements in breadth-first order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.engine.breadth_first().map(|v| v.element())
    }

    /// Calls `visit` on every vertex level by level, left to right.
    pub fn bfs<F>(&self, visit: F)
    where
        F: FnMut(VertexRef<'_, T>),
    {
        self.engine.breadth_first().for_each(visit);
    }

    /// Calls `visit` on every vertex: a vertex, then its left subtree, then its right subtree.
    pub fn pre_order<F>(&self, visit: F)
    where
        F: FnMut(VertexRef<'_, T>),
    {
        self.engine.pre_order().for_each(visit);
    }

    /// Calls `visit` on every vertex: the left subtree, then the vertex, then the right subtree.
    pub fn in_order<F>(&self, visit: F)
    where
        F: FnMut(VertexRef<'_, T>),
    {
        self.engine.in_order().for_each(visit);
    }

    /// Calls `visit` on every vertex: the left subtree, then the right subtree, then the vertex.
    pub fn post_order<F>(&self, visit: F)
    where
        F: FnMut(VertexRef<'_, T>),
    {
        self.engine.post_order().for_each(visit);
    }

    /// Checks that the tree is complete, that parent and child links agree, and that the element
    /// count is right.
    pub fn check_invariants(&self) -> Result<(), Violation> {
        if let Some(root) = self.engine.root_id() {
            if self.engine.parent(root).is_some() {
                return Err(Violation::BrokenLink(root));
            }
        }

        let len = self.len();
        let mut reachable = 0;
        for (index, vertex) in self.engine.breadth_first().enumerate() {
            let id = vertex.id();
            let position = index + 1;
            reachable += 1;
            for child in [self.engine.left(id), self.engine.right(id)].into_iter().flatten() {
                if self.engine.parent(child) != Some(id) {
                    return Err(Violation::BrokenLink(child));
                }
            }
            if vertex.has_left() != (2 * position <= len)
                || vertex.has_right() != (2 * position < len)
            {
                return Err(Violation::Incomplete(id));
            }
        }
        if reachable != len {
            return Err(Violation::Count {
                recorded: len,
                reachable,
            });
        }
        Ok(())
    }
}

impl<T: PartialEq> CompleteTree<T> {
    /// Finds the first vertex in pre-order holding an element equal to `element`.
    pub fn search(&self, element: &T) -> Option<VertexRef<'_, T>> {
        self.engine
            .find_structural(element)
            .map(|id| self.engine.view(id))
    }

    /// Whether some element of the tree equals `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.engine.find_structural(element).is_some()
    }

    /// Removes the element [`search`](Self::search) would find and returns it. The element of the
    /// last vertex in breadth-first order moves into the emptied vertex, and that last vertex is
    /// unlinked, so the tree stays complete.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if no element is equal; the tree is unchanged.
    pub fn delete(&mut self, element: &T) -> Result<T, TreeError> {
        let target = self
            .engine
            .find_structural(element)
            .ok_or(TreeError::NotFound)?;
        debug!("deleting from a complete tree of {} elements", self.len());

        let last = self
            .vertex_at(self.len())
            .expect("A non-empty tree has a last vertex");
        self.engine.swap_elements(target, last);
        self.engine.replace_in_parent(last, None);
        Ok(self.engine.release(last).element)
    }
}

/// Two trees are equal when they hold equal elements at every position.
impl<T: PartialEq> PartialEq for CompleteTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.engine.structurally_eq(&other.engine)
    }
}

impl<T: Eq> Eq for CompleteTree<T> {}

impl<T: fmt::Display> fmt::Display for CompleteTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::render(f, &self.engine)
    }
}

impl<T> FromIterator<T> for CompleteTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for CompleteTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bfs(tree: &CompleteTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn fills_levels_left_to_right() {
        let tree: CompleteTree<_> = (1..=6).collect();

        assert_eq!(bfs(&tree), [1, 2, 3, 4, 5, 6]);
        let mut pre = Vec::new();
        tree.pre_order(|v| pre.push(*v.element()));
        assert_eq!(pre, [1, 2, 4, 5, 3, 6]);

        let three = tree.search(&3).unwrap();
        assert_eq!(*three.left().unwrap().element(), 6);
        assert!(three.right().is_err());
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn height_is_floor_log2() {
        let mut tree = CompleteTree::new();
        assert_eq!(tree.height(), -1);
        for (n, expected) in (1..=8).zip([0, 1, 1, 2, 2, 2, 2, 3]) {
            tree.insert(n);
            assert_eq!(tree.height(), expected);
            assert_eq!(tree.root().unwrap().height(), expected);
        }
    }

    #[test]
    fn delete_moves_last_into_the_hole() {
        let mut tree: CompleteTree<_> = (1..=6).collect();

        assert_eq!(tree.delete(&2), Ok(2));

        assert_eq!(bfs(&tree), [1, 6, 3, 4, 5]);
        assert!(!tree.search(&3).unwrap().has_left());
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn delete_last_vertex() {
        let mut tree: CompleteTree<_> = (1..=6).collect();

        assert_eq!(tree.delete(&6), Ok(6));
        assert_eq!(bfs(&tree), [1, 2, 3, 4, 5]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn delete_missing_leaves_tree_unchanged() {
        let mut tree: CompleteTree<_> = (1..=4).collect();
        let before = tree.clone();

        assert_eq!(tree.delete(&9), Err(TreeError::NotFound));
        assert_eq!(tree, before);
    }

    #[test]
    fn delete_everything() {
        let mut tree: CompleteTree<_> = (0..20).collect();
        for x in (0..20).rev().step_by(2).chain((0..20).step_by(2)) {
            assert_eq!(tree.delete(&x), Ok(x));
            assert_eq!(tree.check_invariants(), Ok(()));
        }
        assert!(tree.is_empty());
        assert!(tree.root().is_err());
    }

    #[test]
    fn search_ignores_order() {
        let tree: CompleteTree<_> = [7, 1, 7, 3].into_iter().collect();

        assert_eq!(tree.search(&7).unwrap().id(), tree.root().unwrap().id());
        assert_eq!(tree.search(&3).unwrap().depth(), 2);
        assert!(tree.contains(&1));
        assert!(!tree.contains(&2));
    }

    #[test]
    fn renders_like_the_ordered_trees() {
        let tree: CompleteTree<_> = [1, 2, 3, 4].into_iter().collect();

        assert_eq!(tree.to_string(), "1\n├─›2\n│  └─›4\n└─»3\n");
    }

    #[test]
    fn clear_rejects_old_ids() {
        let mut tree: CompleteTree<_> = (1..=3).collect();
        let old = tree.search(&3).unwrap().id();

        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.vertex(old).map(|v| v.id()), Err(TreeError::InvalidArgument(old)));
        tree.insert(4);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn equality_is_structural() {
        let a: CompleteTree<_> = [1, 2, 3].into_iter().collect();
        let b: CompleteTree<_> = [1, 2, 3].into_iter().collect();
        let c: CompleteTree<_> = [1, 3, 2].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

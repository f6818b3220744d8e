//! Ordered binary trees: a plain binary search tree plus its AVL and red-black variants.
//!
//! All three are the same [`OrderedTree`] type. The second type parameter picks the balancing
//! strategy, which runs right after every structural insert or delete.
//!
//! # Examples
//!
//! ```
//! use arbor::{AvlTree, TreeError};
//!
//! let mut tree = AvlTree::new();
//! for x in [1, 2, 3] {
//!     tree.insert(x);
//! }
//!
//! // Inserting in increasing order rotated 2 up to the root.
//! let root = tree.root().unwrap();
//! assert_eq!(*root.element(), 2);
//! assert_eq!(root.height(), 1);
//!
//! // Deleting hands the element back.
//! assert_eq!(tree.delete(&1), Ok(1));
//! assert_eq!(tree.delete(&1), Err(TreeError::NotFound));
//!
//! // Balanced trees can't be rotated from outside.
//! let root = tree.root().unwrap().id();
//! assert!(tree.rotate_left(root).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::debug;

use crate::balance::{self, Avl, Balancer, RedBlack, Removal, Unbalanced};
use crate::engine::Engine;
use crate::error::{TreeError, Violation};
use crate::render;
use crate::vertex::{Color, Side, VertexId, VertexRef};

/// An ordered binary tree whose balancing strategy is chosen by `B`.
///
/// Elements comparing equal to a vertex go to its left on insertion. Rotations performed by the
/// balanced variants may later move equal elements to either side, so the guarantee every variant
/// keeps is that an in-order walk yields the elements in non-decreasing order.
pub struct OrderedTree<T, B = Unbalanced> {
    engine: Engine<T>,
    // Only meaningful right after an insert.
    last_inserted: Option<VertexId>,
    balancer: PhantomData<B>,
}

/// An ordered tree that never rebalances. Its height depends on the insertion order.
pub type BinarySearchTree<T> = OrderedTree<T, Unbalanced>;

/// An ordered tree that keeps sibling subtree heights within one of each other.
pub type AvlTree<T> = OrderedTree<T, Avl>;

/// An ordered tree that keeps the red-black coloring rules.
pub type RedBlackTree<T> = OrderedTree<T, RedBlack>;

impl<T, B: Balancer> Default for OrderedTree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> Clone for OrderedTree<T, B>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            last_inserted: self.last_inserted,
            balancer: PhantomData,
        }
    }
}

impl<T, B> fmt::Debug for OrderedTree<T, B>
where
    T: fmt::Debug,
    B: Balancer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("strategy", &B::STRATEGY)
            .field("len", &self.len())
            .field("root", &self.root().ok())
            .finish()
    }
}

impl<T, B: Balancer> OrderedTree<T, B> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            last_inserted: None,
            balancer: PhantomData,
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

    /// The height of the tree: -1 when empty, 0 for a lone root.
    pub fn height(&self) -> isize {
        self.engine.height()
    }

    /// The root vertex, or [`TreeError::NotFound`] if the tree is empty.
    pub fn root(&self) -> Result<VertexRef<'_, T>, TreeError> {
        self.engine.root()
    }

    /// The vertex with the given id, or [`TreeError::InvalidArgument`] if it isn't in this tree.
    pub fn vertex(&self, id: VertexId) -> Result<VertexRef<'_, T>, TreeError> {
        self.engine.check(id).map(|id| self.engine.view(id))
    }

    /// The vertex created by the most recent insert. Any other mutation forgets it.
    pub fn last_inserted(&self) -> Option<VertexRef<'_, T>> {
        self.last_inserted.map(|id| self.engine.view(id))
    }

    /// Removes every element. Ids handed out before the clear are rejected with
    /// [`TreeError::InvalidArgument`] until new inserts reuse their slots.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.last_inserted = None;
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.engine.in_order().map(|v| v.element())
    }

    /// Calls `visit` on every vertex: a vertex, then its left subtree, then its right subtree.
    pub fn pre_order<F>(&self, visit: F)
    where
        F: FnMut(VertexRef<'_, T>),
    {
        self.engine.pre_order().for_each(visit);
    }

    /// Calls `visit` on every vertex in element order.
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

    /// Calls `visit` on every vertex level by level, left to right.
    pub fn bfs<F>(&self, visit: F)
    where
        F: FnMut(VertexRef<'_, T>),
    {
        self.engine.breadth_first().for_each(visit);
    }

    /// Rotates the tree to the left on `id`, lifting its right child into its place.
    ///
    /// # Errors
    ///
    /// - [`TreeError::UnsupportedOperation`] on AVL and red-black trees, whose balance only their
    ///   own rebalancing may change.
    /// - [`TreeError::InvalidArgument`] if `id` is not in this tree.
    /// - [`TreeError::NotFound`] if the vertex has no right child. The tree is left untouched.
    pub fn rotate_left(&mut self, id: VertexId) -> Result<(), TreeError> {
        self.rotate(id, Side::Left)
    }

    /// Rotates the tree to the right on `id`, lifting its left child into its place. Fails the
    /// same way [`rotate_left`](Self::rotate_left) does, mirrored.
    pub fn rotate_right(&mut self, id: VertexId) -> Result<(), TreeError> {
        self.rotate(id, Side::Right)
    }

    fn rotate(&mut self, id: VertexId, side: Side) -> Result<(), TreeError> {
        if !B::STRATEGY.allows_external_rotation() {
            return Err(TreeError::UnsupportedOperation(
                "self-balancing trees can't be rotated by their users",
            ));
        }
        self.engine.check(id)?;
        self.last_inserted = None;
        if self.engine.rotate(id, side) {
            Ok(())
        } else {
            Err(TreeError::NotFound)
        }
    }
}

impl<T, B> OrderedTree<T, B>
where
    T: Ord,
    B: Balancer,
{
    /// Adds `element` as a new leaf, then lets the balancing strategy restore its invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(*tree.last_inserted().unwrap().element(), 1);
    /// ```
    pub fn insert(&mut self, element: T) {
        debug!("inserting into a {:?} tree of {} elements", B::STRATEGY, self.len());
        let slot = self.engine.root_id().map(|mut current| loop {
            let side = match element.cmp(self.engine.element(current)) {
                Ordering::Less | Ordering::Equal => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match self.engine.child(current, side) {
                Some(child) => current = child,
                None => break (current, side),
            }
        });

        let id = self.engine.alloc(element, B::STRATEGY.fresh_augment());
        match slot {
            Some((parent, side)) => self.engine.set_child(parent, side, Some(id)),
            None => self.engine.set_root(Some(id)),
        }
        self.last_inserted = Some(id);

        B::STRATEGY.after_insert(&mut self.engine, id);
        self.verify();
    }

    /// Finds a vertex holding an element equal to `element`, descending from the root. When
    /// several are equal, the one closest to the root wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// let four = tree.search(&4).unwrap();
    ///
    /// assert_eq!(four.depth(), 2);
    /// assert_eq!(*four.parent().unwrap().element(), 3);
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, element: &T) -> Option<VertexRef<'_, T>> {
        self.find(element).map(|id| self.engine.view(id))
    }

    /// Whether some element of the tree equals `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    fn find(&self, element: &T) -> Option<VertexId> {
        let mut next = self.engine.root_id();
        while let Some(id) = next {
            next = match element.cmp(self.engine.element(id)) {
                Ordering::Less => self.engine.left(id),
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.engine.right(id),
            };
        }
        None
    }

    /// Removes one element equal to `element` and returns it.
    ///
    /// A vertex with two children first trades elements with the largest vertex of its left
    /// subtree, which has at most one child; that vertex is the one unlinked, with its child (if
    /// any) moving up into its place.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if no element is equal; the tree is unchanged.
    pub fn delete(&mut self, element: &T) -> Result<T, TreeError> {
        let mut target = self.find(element).ok_or(TreeError::NotFound)?;
        debug!("deleting from a {:?} tree of {} elements", B::STRATEGY, self.len());

        if let (Some(left), Some(_)) = (self.engine.left(target), self.engine.right(target)) {
            let predecessor = self.engine.max_in(left);
            self.engine.swap_elements(target, predecessor);
            target = predecessor;
        }

        let child = self.engine.left(target).or(self.engine.right(target));
        let removal = Removal {
            parent: self.engine.parent(target),
            side: self.engine.side_of(target),
            child,
            augment: self.engine.augment(target),
        };
        self.engine.replace_in_parent(target, child);
        let removed = self.engine.release(target);
        self.last_inserted = None;

        B::STRATEGY.after_remove(&mut self.engine, &removal);
        self.verify();
        Ok(removed.element)
    }

    /// Checks every invariant the tree is supposed to keep: in-order elements are non-decreasing,
    /// parent and child links agree, the element count is right, and the balancing strategy's own
    /// invariant holds.
    pub fn check_invariants(&self) -> Result<(), Violation> {
        if let Some(root) = self.engine.root_id() {
            if self.engine.parent(root).is_some() {
                return Err(Violation::BrokenLink(root));
            }
        }

        let mut reachable = 0;
        let mut previous: Option<&T> = None;
        for vertex in self.engine.in_order() {
            let id = vertex.id();
            reachable += 1;
            for child in [self.engine.left(id), self.engine.right(id)].into_iter().flatten() {
                if self.engine.parent(child) != Some(id) {
                    return Err(Violation::BrokenLink(child));
                }
            }
            if previous.is_some_and(|previous| previous > vertex.element()) {
                return Err(Violation::Order(id));
            }
            previous = Some(vertex.element());
        }
        if reachable != self.len() {
            return Err(Violation::Count {
                recorded: self.len(),
                reachable,
            });
        }

        B::STRATEGY.check(&self.engine)
    }

    fn verify(&self) {
        if cfg!(feature = "invariant-checks") {
            if let Err(violation) = self.check_invariants() {
                panic!("{:?} tree invariant broken: {violation}", B::STRATEGY);
            }
        }
    }
}

impl<T> OrderedTree<T, Avl> {
    /// The stored height of a vertex.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `id` is not in this tree.
    pub fn height_of(&self, id: VertexId) -> Result<isize, TreeError> {
        let id = self.engine.check(id)?;
        Ok(balance::avl::height_of(&self.engine, Some(id)))
    }
}

impl<T> OrderedTree<T, RedBlack> {
    /// The color of a vertex.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidArgument`] if `id` is not in this tree.
    pub fn color_of(&self, id: VertexId) -> Result<Color, TreeError> {
        let id = self.engine.check(id)?;
        Ok(self.engine.view(id).color().unwrap_or(Color::Black))
    }
}

/// Two trees are equal when they have the same shape with equal elements, heights and colors at
/// every position.
impl<T, B> PartialEq for OrderedTree<T, B>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.engine.structurally_eq(&other.engine)
    }
}

impl<T: Eq, B> Eq for OrderedTree<T, B> {}

impl<T, B> fmt::Display for OrderedTree<T, B>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::render(f, &self.engine)
    }
}

impl<T, B> FromIterator<T> for OrderedTree<T, B>
where
    T: Ord,
    B: Balancer,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, B> Extend<T> for OrderedTree<T, B>
where
    T: Ord,
    B: Balancer,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

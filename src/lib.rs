//! This crate exposes a family of binary trees built on one shared
//! engine, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. Every vertex of a BST keeps
//! one invariant:
//!
//! 1. Every element in the left subtree of a vertex is less than or equal
//!    to the vertex's own element.
//! 2. Every element in the right subtree of a vertex is greater than or
//!    equal to the vertex's own element.
//!
//! > Note that some vertices have no children. These vertices are called "leaves".
//!
//! Searching for an element takes `O(height)`, where `height` is the number
//! of edges on the longest path from the root down to a leaf. A plain
//! [`BinarySearchTree`] can degrade to a list (insert `1, 2, 3, ...` and
//! every vertex only has a right child), so this crate also offers two
//! self-balancing variants that keep the height within `O(lg N)`:
//!
//! - [`AvlTree`] stores the height of every subtree and rotates whenever two
//!   siblings differ in height by two.
//! - [`RedBlackTree`] colors every vertex red or black and recolors or
//!   rotates so that no red vertex has a red child and every path down
//!   passes through the same number of black vertices.
//!
//! All three are [`OrderedTree`]s that differ only in their [`balance`]
//! strategy. [`CompleteTree`] is an unordered variant filled level by level.
//!
//! ```
//! use arbor::{BinarySearchTree, RedBlackTree};
//!
//! let skewed: BinarySearchTree<_> = (0..100).collect();
//! let balanced: RedBlackTree<_> = (0..100).collect();
//!
//! assert_eq!(skewed.height(), 99);
//! assert!(balanced.height() <= 12);
//! assert!(skewed.iter().eq(balanced.iter()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balance;
mod complete;
mod engine;
mod error;
mod iter;
mod ordered;
mod render;
mod vertex;

pub use balance::{Avl, Balancer, RedBlack, Strategy, Unbalanced};
pub use complete::CompleteTree;
pub use error::{TreeError, Violation};
pub use ordered::{AvlTree, BinarySearchTree, OrderedTree, RedBlackTree};
pub use vertex::{Augment, Color, VertexId, VertexRef};

#[cfg(test)]
mod test;

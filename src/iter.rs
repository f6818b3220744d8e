//! Traversal iterators. Each one keeps its own stack or queue, so several can walk the same tree at
//! once and none of them recurses.

use std::collections::VecDeque;

use crate::engine::Engine;
use crate::vertex::{VertexId, VertexRef};

/// Visits a vertex, then its left subtree, then its right subtree.
pub(crate) struct PreOrder<'a, T> {
    engine: &'a Engine<T>,
    stack: Vec<VertexId>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(engine: &'a Engine<T>) -> Self {
        Self {
            engine,
            stack: engine.root_id().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = VertexRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.engine.right(id));
        self.stack.extend(self.engine.left(id));
        Some(self.engine.view(id))
    }
}

/// Visits the left subtree, then the vertex, then the right subtree. For ordered trees this yields
/// elements in non-decreasing order.
pub(crate) struct InOrder<'a, T> {
    engine: &'a Engine<T>,
    stack: Vec<VertexId>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(engine: &'a Engine<T>) -> Self {
        let mut iter = Self {
            engine,
            stack: Vec::new(),
        };
        iter.push_left_spine(engine.root_id());
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<VertexId>) {
        while let Some(id) = next {
            self.stack.push(id);
            next = self.engine.left(id);
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = VertexRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.engine.right(id));
        Some(self.engine.view(id))
    }
}

/// Visits the left subtree, then the right subtree, then the vertex.
pub(crate) struct PostOrder<'a, T> {
    engine: &'a Engine<T>,
    // The flag records whether the vertex's children have already been pushed.
    stack: Vec<(VertexId, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(engine: &'a Engine<T>) -> Self {
        Self {
            engine,
            stack: engine.root_id().map(|id| (id, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = VertexRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            if expanded {
                return Some(self.engine.view(id));
            }
            self.stack.push((id, true));
            self.stack
                .extend(self.engine.right(id).map(|right| (right, false)));
            self.stack.extend(self.engine.left(id).map(|left| (left, false)));
        }
    }
}

/// Visits vertices level by level, left to right.
pub(crate) struct BreadthFirst<'a, T> {
    engine: &'a Engine<T>,
    queue: VecDeque<VertexId>,
}

impl<'a, T> BreadthFirst<'a, T> {
    pub(crate) fn new(engine: &'a Engine<T>) -> Self {
        Self {
            engine,
            queue: engine.root_id().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = VertexRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.engine.left(id));
        self.queue.extend(self.engine.right(id));
        Some(self.engine.view(id))
    }
}

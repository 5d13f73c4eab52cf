//! Borrowing in-order iterators over a [`LazyTree`][crate::LazyTree].

use std::iter::FusedIterator;

use crate::lazy::Node;

/// An in-order iterator over the live elements of a tree. Created by
/// [`LazyTree::iter`][crate::LazyTree::iter].
pub struct Iter<'a, T> {
    inner: IterAll<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            inner: IterAll::new(root),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .find_map(|(key, tombstoned)| (!tombstoned).then_some(key))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An in-order iterator over every node of a tree, tombstoned or not. Each item is the node's
/// key and whether it is tombstoned. Created by
/// [`LazyTree::iter_all`][crate::LazyTree::iter_all].
pub struct IterAll<'a, T> {
    /// Nodes whose left subtree has been pushed but which haven't been yielded yet. The top of
    /// the stack is always the next node in order.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> IterAll<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for IterAll<'a, T> {
    type Item = (&'a T, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, node.tombstoned))
    }
}

impl<T> FusedIterator for IterAll<'_, T> {}

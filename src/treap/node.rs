use crate::entry::Entry;
use crate::treap::tree::Tree;
use std::mem;

/// A struct representing an internal node of a treap.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub priority: u64,
    pub left: Tree<T, U>,
    pub right: Tree<T, U>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, priority: u64) -> Self {
        Node {
            entry: Entry { key, value },
            priority,
            left: None,
            right: None,
        }
    }

    // The right child is promoted into the slot that holds `self`.
    pub fn rotate_left(&mut self) {
        let mut child = self.right.take().expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        self.left = Some(child);
    }

    // The left child is promoted into the slot that holds `self`.
    pub fn rotate_right(&mut self) {
        let mut child = self.left.take().expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        self.right = Some(child);
    }

    pub fn is_heap_property_violated(&self, subtree: &Tree<T, U>) -> bool {
        match subtree {
            Some(child) => self.priority > child.priority,
            None => false,
        }
    }
}

//! Persistent singly linked list.

use std::{fmt, rc::Rc};

/// An immutable cons list with structural sharing.
///
/// Cloning is O(1). `cons` never mutates the list it extends, so every
/// existing handle keeps observing the same elements.
pub struct ConsList<T> {
    head: Option<Rc<Node<T>>>,
}

struct Node<T> {
    value: T,
    next: ConsList<T>,
}

impl<T> ConsList<T> {
    /// The empty list.
    pub fn new() -> Self {
        Self { head: None }
    }

    /// A new list with `value` in front of `self`.
    pub fn cons(&self, value: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                value,
                next: self.clone(),
            })),
        }
    }

    /// The first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    /// Everything after the first element, or `None` for the empty list.
    pub fn rest(&self) -> Option<&ConsList<T>> {
        self.head.as_ref().map(|node| &node.next)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of elements. O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { cell: self }
    }
}

impl<T> Default for ConsList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ConsList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

// Iterative drop so long lists don't overflow the stack.
impl<T> Drop for ConsList<T> {
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            match Rc::try_unwrap(node) {
                Ok(mut node) => head = node.next.head.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T> FromIterator<T> for ConsList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(ConsList::new(), |list, value| list.cons(value))
    }
}

impl<T: PartialEq> PartialEq for ConsList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for ConsList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the elements of a [`ConsList`].
pub struct Iter<'a, T> {
    cell: &'a ConsList<T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cell.head.as_ref()?;
        self.cell = &node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a ConsList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Snapshot iteration.
//!
//! An iterator captures the traversal sequence of the tree when it is created. The borrow on
//! the tree keeps it from being mutated while the iterator is alive, so the snapshot is
//! always accurate.

use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

use crate::node::{Arena, NodeId};
use crate::{Order, Tree};

/// Iterates over the values of a tree in a fixed traversal order.
///
/// Can be walked from both ends.
///
/// # Examples
///
/// ```
/// use ordtree::{BinaryTree, Order};
///
/// let tree: BinaryTree<_> = [5, 3, 7, 2, 4].into_iter().collect();
///
/// let preorder: Vec<_> = tree.iter(Order::Preorder).copied().collect();
/// assert_eq!(preorder, [5, 3, 2, 4, 7]);
///
/// let mut backwards = tree.iter(Order::Inorder).rev();
/// assert_eq!(backwards.next(), Some(&7));
/// ```
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    ids: Vec<NodeId>,
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, ids: Vec<NodeId>) -> Self {
        let back = ids.len();
        Self {
            nodes,
            ids,
            front: 0,
            back,
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            ids: self.ids.clone(),
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let id = self.ids[self.front];
        self.front += 1;
        Some(&self.nodes[id].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(&self.nodes[self.ids[self.back]].value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> fmt::Debug for Iter<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A position inside a snapshot of a traversal sequence that can step both ways.
///
/// The position one past the last value is the end position. Cloned cursors share their
/// snapshot and compare equal when they point at the same position of the same snapshot.
/// Cursors taken from separate calls to [`Tree::cursor`] never compare equal, even over the
/// same tree.
///
/// # Examples
///
/// ```
/// use ordtree::{BinaryTree, Order};
///
/// let tree: BinaryTree<_> = [2, 1, 3].into_iter().collect();
/// let mut cursor = tree.cursor(Order::Inorder);
/// let start = cursor.clone();
///
/// assert_eq!(cursor.current(), Some(&1));
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.current(), Some(&3));
/// cursor.move_next();
/// assert!(cursor.is_end());
///
/// cursor.move_prev();
/// cursor.move_prev();
/// cursor.move_prev();
/// assert_eq!(cursor, start);
/// ```
pub struct Cursor<'a, T> {
    nodes: &'a Arena<T>,
    ids: Rc<[NodeId]>,
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn new(nodes: &'a Arena<T>, ids: Vec<NodeId>) -> Self {
        Self {
            nodes,
            ids: ids.into(),
            index: 0,
        }
    }

    /// The value at the cursor, `None` at the end position.
    pub fn current(&self) -> Option<&'a T> {
        self.ids.get(self.index).map(|&id| &self.nodes[id].value)
    }

    /// Steps forward. Stays put at the end position.
    pub fn move_next(&mut self) {
        if self.index < self.ids.len() {
            self.index += 1;
        }
    }

    /// Steps backward. Stays put at the first value.
    pub fn move_prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// How many values precede the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// True at the end position.
    pub fn is_end(&self) -> bool {
        self.index == self.ids.len()
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            ids: Rc::clone(&self.ids),
            index: self.index,
        }
    }
}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ids, &other.ids) && self.index == other.index
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.ids.len())
            .field("current", &self.current())
            .finish()
    }
}

impl<T, B> Tree<T, B> {
    /// A snapshot iterator over every value in the given order.
    pub fn iter(&self, order: Order) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.order_ids(self.root, order))
    }

    /// A snapshot iterator over the subtree rooted at `id`. `None` if `id` isn't a live node
    /// of this tree.
    pub fn iter_from(&self, id: NodeId, order: Order) -> Option<Iter<'_, T>> {
        self.nodes.get(id)?;
        Some(Iter::new(&self.nodes, self.order_ids(Some(id), order)))
    }

    /// A cursor at the first value of the given order, or at the end position if the tree is
    /// empty.
    pub fn cursor(&self, order: Order) -> Cursor<'_, T> {
        Cursor::new(&self.nodes, self.order_ids(self.root, order))
    }
}

impl<'a, T, B> IntoIterator for &'a Tree<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    /// Iterates in order, smallest value first.
    fn into_iter(self) -> Self::IntoIter {
        self.iter(Order::Inorder)
    }
}

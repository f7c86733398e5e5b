//! Threaded traversal.
//!
//! Threading a tree stores, in every absent child slot, a link to the node that follows it
//! in some traversal order. The tree can then be walked from first to last node with no
//! recursion and no explicit stack. Threads are a view over the current shape only: any
//! mutation unthreads the tree first.
//!
//! # Examples
//!
//! ```
//! use ordtree::{BinaryTree, Order, TreeError};
//!
//! let mut tree: BinaryTree<_> = [5, 3, 7, 2, 4].into_iter().collect();
//! tree.make_threaded(Order::Inorder);
//!
//! let mut seen = Vec::new();
//! tree.traverse_threaded(|v| seen.push(*v)).unwrap();
//! assert_eq!(seen, [2, 3, 4, 5, 7]);
//!
//! // Mutating drops the threads.
//! tree.insert(6);
//! assert_eq!(tree.traverse_threaded(|_| {}), Err(TreeError::NotThreaded));
//! ```

use tracing::debug;

use crate::node::{Link, NodeId};
use crate::{Order, Tree, TreeError};

impl<T, B> Tree<T, B> {
    /// Threads the tree under `order`, replacing every absent child slot with a link to the
    /// node's successor in that order. The last node of the order keeps its absent slots.
    /// Threading again, under any order, first removes the old threads.
    pub fn make_threaded(&mut self, order: Order) {
        self.unthread();
        let ids = self.order_ids(self.root, order);
        for pair in ids.windows(2) {
            let (id, next) = (pair[0], pair[1]);
            let node = &mut self.nodes[id];
            if node.left.is_absent() {
                node.left = Link::Thread(next);
            }
            if node.right.is_absent() {
                node.right = Link::Thread(next);
            }
        }
        self.threaded = Some(order);
        debug!(%order, len = ids.len(), "threaded tree");
    }

    /// Removes every thread, turning thread slots back into absent ones. Does nothing if the
    /// tree isn't threaded.
    pub fn unthread(&mut self) {
        let Some(order) = self.threaded.take() else {
            return;
        };
        for node in self.nodes.iter_mut() {
            if let Link::Thread(_) = node.left {
                node.left = Link::Absent;
            }
            if let Link::Thread(_) = node.right {
                node.right = Link::Absent;
            }
        }
        debug!(%order, "unthreaded tree");
    }

    /// True while the tree is threaded.
    pub fn is_threaded(&self) -> bool {
        self.threaded.is_some()
    }

    /// The order the tree is threaded under, if any.
    pub fn threaded_order(&self) -> Option<Order> {
        self.threaded
    }

    /// Calls `visit` with every value in the order the tree is threaded under, following
    /// child and thread links only.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotThreaded`] unless [`make_threaded`][Self::make_threaded] was called
    /// after the last mutation.
    pub fn traverse_threaded(&self, mut visit: impl FnMut(&T)) -> Result<(), TreeError> {
        let order = self.threaded.ok_or(TreeError::NotThreaded)?;
        let mut current = self.root.map(|root| self.first_in(root, order));
        while let Some(id) = current {
            visit(&self.nodes[id].value);
            current = self.threaded_successor(id, order);
        }
        Ok(())
    }

    fn first_in(&self, root: NodeId, order: Order) -> NodeId {
        match order {
            Order::Inorder => self.leftmost(root),
            Order::Preorder => root,
            Order::Postorder => self.first_postorder(root),
        }
    }

    /// The deepest node reached by always stepping into the left child when there is one
    /// and into the right child otherwise.
    fn first_postorder(&self, mut id: NodeId) -> NodeId {
        loop {
            let (left, right) = self.nodes[id].children();
            match left.or(right) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    fn threaded_successor(&self, id: NodeId, order: Order) -> Option<NodeId> {
        let node = &self.nodes[id];
        match (node.left, node.right) {
            (Link::Thread(next), _) | (_, Link::Thread(next)) => return Some(next),
            // Only the last node keeps an absent slot.
            (Link::Absent, _) | (_, Link::Absent) => return None,
            (Link::Child(_), Link::Child(_)) => {}
        }

        // Two children, so neither slot says where to go next.
        let (left, right) = node.children();
        match order {
            Order::Inorder => right.map(|right| self.leftmost(right)),
            Order::Preorder => left,
            Order::Postorder => {
                let parent = node.parent?;
                match self.nodes[parent].right.child() {
                    Some(sibling) if sibling != id => Some(self.first_postorder(sibling)),
                    _ => Some(parent),
                }
            }
        }
    }
}

//! Queries over the shape of a tree: subtree extraction, subtree matching, path lookup and
//! merging. Every tree these hand back is an independent deep copy.

use std::ops::Add;

use crate::balance::Balance;
use crate::node::{Arena, Link, Node, NodeId, Side};
use crate::{Order, Tree, TreeError};

/// Copies the subtree under `root` into a fresh arena, keeping its shape and cached heights.
/// Threads are not copied.
pub(crate) fn copy_subtree<T, B>(nodes: &Arena<T>, root: NodeId) -> Tree<T, B>
where
    T: Clone,
{
    let mut copy = Arena::default();
    let mut new_root = None;
    // (node to copy, its new parent and the slot it goes in)
    let mut stack: Vec<(NodeId, Option<(NodeId, Side)>)> = vec![(root, None)];
    while let Some((old, place)) = stack.pop() {
        let source = &nodes[old];
        let mut node = Node::new(source.value.clone(), place.map(|(parent, _)| parent));
        node.height = source.height;
        let id = copy.alloc(node);
        match place {
            None => new_root = Some(id),
            Some((parent, side)) => copy[parent].set_link(side, Link::Child(id)),
        }
        let (left, right) = source.children();
        stack.extend(right.map(|right| (right, Some((id, Side::Right)))));
        stack.extend(left.map(|left| (left, Some((id, Side::Left)))));
    }
    Tree::with_root(copy, new_root)
}

/// True when the two subtrees have the same shape and equal values in the same places.
pub(crate) fn same_shape<T>(
    a_nodes: &Arena<T>,
    a_root: Option<NodeId>,
    b_nodes: &Arena<T>,
    b_root: Option<NodeId>,
) -> bool
where
    T: PartialEq,
{
    let mut stack = vec![(a_root, b_root)];
    while let Some(pair) = stack.pop() {
        match pair {
            (None, None) => {}
            (Some(a), Some(b)) => {
                let (a, b) = (&a_nodes[a], &b_nodes[b]);
                if a.value != b.value {
                    return false;
                }
                let ((a_left, a_right), (b_left, b_right)) = (a.children(), b.children());
                stack.push((a_right, b_right));
                stack.push((a_left, b_left));
            }
            _ => return false,
        }
    }
    true
}

impl<T, B> Tree<T, B> {
    /// A copy of the subtree rooted at a node holding `value`, or `None` if there is no such
    /// node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, Order};
    ///
    /// let tree: BinaryTree<_> = [5, 3, 7, 2, 4].into_iter().collect();
    /// let three = tree.subtree(&3).unwrap();
    ///
    /// assert_eq!(three.to_string_in(Order::Preorder), "3 2 4");
    /// assert!(tree.subtree(&6).is_none());
    /// ```
    pub fn subtree(&self, value: &T) -> Option<Self>
    where
        T: Ord + Clone,
    {
        self.find_id(value).map(|id| self.copy_subtree(id))
    }

    /// True when some node of this tree roots a subtree with exactly the shape and values of
    /// `other`. An empty `other` is contained in every tree.
    ///
    /// The comparison is attempted at every node, so it finds matches even in trees whose
    /// ordering was broken by hand.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BinaryTree;
    ///
    /// let tree: BinaryTree<_> = [5, 3, 7, 2, 4].into_iter().collect();
    /// let part: BinaryTree<_> = [3, 2, 4].into_iter().collect();
    /// let other: BinaryTree<_> = [3, 2].into_iter().collect();
    ///
    /// assert!(tree.contains_subtree(&part));
    /// // 3 has a right child in `tree`, so this shape doesn't occur.
    /// assert!(!tree.contains_subtree(&other));
    /// ```
    pub fn contains_subtree<B2>(&self, other: &Tree<T, B2>) -> bool
    where
        T: PartialEq,
    {
        let Some(other_root) = other.root else {
            return true;
        };
        let target = other.height();
        self.order_ids(self.root, Order::Preorder)
            .into_iter()
            // Cached heights are exact, so only nodes of the same height can match.
            .filter(|&id| self.nodes[id].height == target)
            .any(|id| same_shape(&self.nodes, Some(id), &other.nodes, Some(other_root)))
    }

    /// Follows `path` from the root, stepping left for every `'L'` and right for every `'R'`,
    /// and returns a copy of the subtree where it ends. An empty path copies the whole tree.
    ///
    /// Returns `Ok(None)` if the path leaves the tree or the tree is empty.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPath`] for any character other than `'L'` or `'R'`. The whole
    /// path is checked before the tree is walked.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, Order, TreeError};
    ///
    /// let tree: BinaryTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let left = tree.find_by_path("L").unwrap().unwrap();
    /// assert_eq!(left.to_string_in(Order::Inorder), "1");
    ///
    /// assert!(tree.find_by_path("LL").unwrap().is_none());
    /// assert_eq!(
    ///     tree.find_by_path("Lx"),
    ///     Err(TreeError::InvalidPath { step: 'x', position: 1 })
    /// );
    /// ```
    pub fn find_by_path(&self, path: &str) -> Result<Option<Self>, TreeError>
    where
        T: Clone,
    {
        let steps = path
            .chars()
            .enumerate()
            .map(|(position, step)| match step {
                'L' => Ok(Side::Left),
                'R' => Ok(Side::Right),
                step => Err(TreeError::InvalidPath { step, position }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut current = self.root;
        for side in steps {
            let Some(id) = current else { break };
            current = self.nodes[id].link(side).child();
        }
        Ok(current.map(|id| self.copy_subtree(id)))
    }
}

impl<T, B> Tree<T, B>
where
    T: Ord + Clone,
    B: Balance,
{
    /// A new tree holding the values of both trees. It starts as a copy of `self` and the
    /// values of `other` are inserted in preorder, so the shape of `self` is kept at the top
    /// of the result. Neither input changes.
    ///
    /// Also available as `&a + &b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{AvlTree, BinaryTree, Order};
    ///
    /// let a: AvlTree<_> = [1, 2, 3].into_iter().collect();
    /// let b: BinaryTree<_> = [3, 4].into_iter().collect();
    ///
    /// let both = a.merge(&b);
    /// assert_eq!(both.len(), 5);
    /// assert_eq!(both.to_string_in(Order::Inorder), "1 2 3 3 4");
    /// assert!(both.is_balanced());
    /// ```
    pub fn merge<B2>(&self, other: &Tree<T, B2>) -> Self {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }

    /// Inserts a copy of every value of `other`, in preorder.
    pub fn merge_from<B2>(&mut self, other: &Tree<T, B2>) {
        for id in other.order_ids(other.root, Order::Preorder) {
            self.insert(other.nodes[id].value.clone());
        }
    }
}

impl<'a, T, B> Add for &'a Tree<T, B>
where
    T: Ord + Clone,
    B: Balance,
{
    type Output = Tree<T, B>;

    fn add(self, other: Self) -> Tree<T, B> {
        self.merge(other)
    }
}

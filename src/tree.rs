//! The ordered tree container shared by the plain and AVL strategies.
//!
//! # Examples
//!
//! ```
//! use ordtree::{BinaryTree, Order};
//!
//! let mut tree = BinaryTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! for value in [5, 3, 7, 2, 4] {
//!     tree.insert(value);
//! }
//! assert_eq!(tree.to_string_in(Order::Inorder), "2 3 4 5 7");
//! assert_eq!(tree.to_string_in(Order::Preorder), "5 3 2 4 7");
//!
//! // Removing a value hands it back.
//! assert_eq!(tree.remove(&3), Ok(3));
//! assert!(!tree.contains(&3));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

use tracing::debug;

use crate::balance::{Balance, Plain};
use crate::node::{Arena, Link, Node, NodeId, NodeRef, Side};
use crate::{print, structural, Order, TreeError};

/// A binary search tree holding a multiset of values. The balancing strategy `B` decides
/// what happens after every insertion and removal: [`Plain`] only keeps heights up to date,
/// [`Avl`][crate::Avl] also rotates to keep the tree height balanced.
///
/// Equal values are allowed; ordered insertion sends a duplicate to the right of the values
/// equal to it.
pub struct Tree<T, B = Plain> {
    pub(crate) nodes: Arena<T>,
    pub(crate) root: Option<NodeId>,
    /// The order the tree is currently threaded under, if it is threaded at all.
    pub(crate) threaded: Option<Order>,
    strategy: PhantomData<B>,
}

impl<T, B> Default for Tree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Manual implementation of `Clone` so we don't require the strategy marker to be `Clone`.
impl<T, B> Clone for Tree<T, B>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            threaded: self.threaded,
            strategy: PhantomData,
        }
    }
}

impl<T, B> fmt::Debug for Tree<T, B>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("threaded", &self.threaded)
            .field("values", &self.values(Order::Inorder))
            .finish()
    }
}

/// Draws the tree, one node per line.
///
/// ```
/// use ordtree::BinaryTree;
///
/// let tree: BinaryTree<_> = [2, 1, 3].into_iter().collect();
/// assert_eq!(tree.to_string(), "2\n├─ 1\n└─ 3");
/// ```
impl<T, B> fmt::Display for Tree<T, B>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print::write_tree(&self.nodes, self.root, f)
    }
}

impl<T, B> Tree<T, B> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::default(),
            root: None,
            threaded: None,
            strategy: PhantomData,
        }
    }

    pub(crate) fn with_root(nodes: Arena<T>, root: Option<NodeId>) -> Self {
        Self {
            nodes,
            root,
            threaded: None,
            strategy: PhantomData,
        }
    }

    /// The number of values in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: `-1` when empty, `0` for a lone root.
    pub fn height(&self) -> i32 {
        self.nodes.height_of(self.root)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, T, B>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    /// Looks up a node by id. Returns `None` for ids that don't refer to a live node.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T, B>> {
        self.nodes.get(id).map(|_| NodeRef::new(self, id))
    }

    /// Finds a node holding a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BinaryTree;
    ///
    /// let tree: BinaryTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let node = tree.search(&1).unwrap();
    /// assert_eq!(node.value(), &1);
    /// assert!(node.is_leaf());
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, value: &T) -> Option<NodeRef<'_, T, B>>
    where
        T: Ord,
    {
        self.find_id(value).map(|id| NodeRef::new(self, id))
    }

    /// True if some node holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find_id(value).is_some()
    }

    pub(crate) fn find_id(&self, value: &T) -> Option<NodeId>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.child(),
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right.child(),
            };
        }
        None
    }

    /// The smallest value in the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::Empty`] if the tree has no values.
    pub fn min(&self) -> Result<&T, TreeError> {
        let root = self.root.ok_or(TreeError::Empty)?;
        Ok(&self.nodes[self.leftmost(root)].value)
    }

    /// The largest value in the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::Empty`] if the tree has no values.
    pub fn max(&self) -> Result<&T, TreeError> {
        let root = self.root.ok_or(TreeError::Empty)?;
        Ok(&self.nodes[self.rightmost(root)].value)
    }

    /// Seeds an empty tree with a root, returning its id. Meant for building trees by hand
    /// together with [`insert_at`][Self::insert_at].
    ///
    /// # Errors
    ///
    /// [`TreeError::NotEmpty`] if the tree already has a root.
    pub fn insert_root(&mut self, value: T) -> Result<NodeId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::NotEmpty);
        }
        self.unthread();
        let id = self.nodes.alloc(Node::new(value, None));
        self.root = Some(id);
        Ok(id)
    }

    /// Attaches `value` as a new child of `parent`, in its left slot if that is open and in
    /// its right slot otherwise.
    ///
    /// This ignores the ordering of values entirely, so it can (and is meant to) build trees
    /// that are not binary search trees or not balanced. Nothing corrects the resulting
    /// shape, not even on an AVL tree; only the cached heights are updated. Searching a tree
    /// whose ordering has been broken this way may miss values that are present.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownNode`] if `parent` isn't a node of this tree and
    /// [`TreeError::NoOpenSlot`] if it already has two children.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, Order};
    ///
    /// let mut tree = BinaryTree::new();
    /// let root = tree.insert_root(1).unwrap();
    /// tree.insert_at(root, 2).unwrap();
    /// tree.insert_at(root, 3).unwrap();
    ///
    /// // 2 sits left of 1 even though it's larger.
    /// assert_eq!(tree.to_string_in(Order::Inorder), "2 1 3");
    /// ```
    pub fn insert_at(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        let node = self.nodes.get(parent).ok_or(TreeError::UnknownNode(parent))?;
        let side = match node.children() {
            (None, _) => Side::Left,
            (Some(_), None) => Side::Right,
            (Some(_), Some(_)) => return Err(TreeError::NoOpenSlot(parent)),
        };
        self.unthread();
        let id = self.nodes.alloc(Node::new(value, Some(parent)));
        self.nodes[parent].set_link(side, Link::Child(id));
        self.fix_heights_from(Some(parent));
        Ok(id)
    }

    /// Rebuilds the tree into a minimum height shape holding the same values.
    ///
    /// The values are read in order and the middle one of every range becomes the root of
    /// that range's subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BinaryTree;
    ///
    /// let mut tree: BinaryTree<_> = (1..=5).rev().collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.balance();
    /// assert!(tree.is_balanced());
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn balance(&mut self) {
        self.unthread();
        let ids = self.order_ids(self.root, Order::Inorder);
        let mut nodes = mem::take(&mut self.nodes);
        let mut values: Vec<Option<T>> = ids
            .into_iter()
            .map(|id| Some(nodes.remove(id).value))
            .collect();
        debug!(len = values.len(), "rebuilding balanced tree");
        self.root = self.build_balanced(&mut values, None);
    }

    fn build_balanced(
        &mut self,
        values: &mut [Option<T>],
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        if values.is_empty() {
            return None;
        }
        let mid = (values.len() - 1) / 2;
        let value = values[mid].take().expect("every value is placed exactly once");
        let id = self.nodes.alloc(Node::new(value, parent));

        let (left, rest) = values.split_at_mut(mid);
        let left = self.build_balanced(left, Some(id));
        let right = self.build_balanced(&mut rest[1..], Some(id));
        self.nodes[id].left = Link::from(left);
        self.nodes[id].right = Link::from(right);
        self.update_height(id);
        Some(id)
    }

    /// Checks that the heights of the two subtrees of every node differ by at most one.
    ///
    /// This walks the whole tree and recomputes every height rather than trusting the
    /// cached ones, so it verifies the AVL guarantee instead of assuming it.
    pub fn is_balanced(&self) -> bool {
        let mut heights = vec![-1; self.nodes.capacity()];
        let height = |heights: &[i32], id: Option<NodeId>| id.map_or(-1, |id| heights[id.index()]);
        for id in self.order_ids(self.root, Order::Postorder) {
            let (left, right) = self.nodes[id].children();
            let (left, right) = (height(&heights, left), height(&heights, right));
            if left.abs_diff(right) > 1 {
                return false;
            }
            heights[id.index()] = left.max(right) + 1;
        }
        true
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.threaded = None;
    }

    /// Calls `visit` with every value in the given order.
    pub fn traverse(&self, order: Order, mut visit: impl FnMut(&T)) {
        for id in self.order_ids(self.root, order) {
            visit(&self.nodes[id].value);
        }
    }

    /// Every value in the given order.
    pub fn values(&self, order: Order) -> Vec<&T> {
        self.order_ids(self.root, order)
            .into_iter()
            .map(|id| &self.nodes[id].value)
            .collect()
    }

    /// Writes the values in the given order to `out`, separated by single spaces.
    pub fn write_in<W>(&self, order: Order, out: &mut W) -> fmt::Result
    where
        T: fmt::Display,
        W: fmt::Write,
    {
        for (i, id) in self.order_ids(self.root, order).into_iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            write!(out, "{}", self.nodes[id].value)?;
        }
        Ok(())
    }

    /// The values in the given order, separated by single spaces.
    pub fn to_string_in(&self, order: Order) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        self.write_in(order, &mut out)
            .expect("a Display implementation returned an error unexpectedly");
        out
    }

    /// The structural nodes under `start` in the given order. Threads are ignored.
    pub(crate) fn order_ids(&self, start: Option<NodeId>, order: Order) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(start) = start else {
            return out;
        };
        let mut stack = Vec::new();
        match order {
            Order::Preorder => {
                stack.push(start);
                while let Some(id) = stack.pop() {
                    out.push(id);
                    let (left, right) = self.nodes[id].children();
                    stack.extend(right);
                    stack.extend(left);
                }
            }
            Order::Inorder => {
                let mut current = Some(start);
                loop {
                    while let Some(id) = current {
                        stack.push(id);
                        current = self.nodes[id].left.child();
                    }
                    let Some(id) = stack.pop() else {
                        break;
                    };
                    out.push(id);
                    current = self.nodes[id].right.child();
                }
            }
            Order::Postorder => {
                // Node, right, left reversed is left, right, node.
                stack.push(start);
                while let Some(id) = stack.pop() {
                    out.push(id);
                    let (left, right) = self.nodes[id].children();
                    stack.extend(left);
                    stack.extend(right);
                }
                out.reverse();
            }
        }
        out
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left.child() {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right.child() {
            id = right;
        }
        id
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    pub(crate) fn update_height(&mut self, id: NodeId) {
        let (left, right) = self.nodes[id].children();
        let height = self.nodes.height_of(left).max(self.nodes.height_of(right)) + 1;
        self.nodes[id].height = height;
    }

    /// Repairs cached heights from `start` up towards the root, stopping at the first node
    /// whose height didn't change.
    pub(crate) fn fix_heights_from(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            let before = self.nodes[id].height;
            self.update_height(id);
            if self.nodes[id].height == before {
                break;
            }
            current = self.nodes[id].parent;
        }
    }

    /// Recomputes every cached height bottom up.
    pub(crate) fn recompute_heights(&mut self) {
        for id in self.order_ids(self.root, Order::Postorder) {
            self.update_height(id);
        }
    }

    /// Points whatever referenced `old` as a child (its parent or the tree's root) at `new`.
    /// The parent link of `new` is left to the caller.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left.child() == Some(old) {
                    parent.left = Link::from(new);
                } else {
                    parent.right = Link::from(new);
                }
            }
        }
    }

    /// Unlinks a node with at most one child by splicing that child into its place. Returns
    /// the node and its former parent.
    fn splice_out(&mut self, id: NodeId) -> (Node<T>, Option<NodeId>) {
        let (left, right) = self.nodes[id].children();
        debug_assert!(left.is_none() || right.is_none());
        let child = left.or(right);
        let parent = self.nodes[id].parent;
        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        self.replace_child(parent, id, child);
        (self.nodes.remove(id), parent)
    }

    pub(crate) fn copy_subtree(&self, root: NodeId) -> Self
    where
        T: Clone,
    {
        structural::copy_subtree(&self.nodes, root)
    }
}

impl<T, B> Tree<T, B>
where
    B: Balance,
{
    /// Inserts `value`, keeping the tree ordered, and returns the id of its new node.
    /// Duplicates are allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BinaryTree;
    ///
    /// let mut tree = BinaryTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> NodeId
    where
        T: Ord,
    {
        self.unthread();
        let id = match self.root {
            None => {
                let id = self.nodes.alloc(Node::new(value, None));
                self.root = Some(id);
                id
            }
            Some(mut current) => loop {
                let node = &self.nodes[current];
                let side = if value < node.value {
                    Side::Left
                } else {
                    Side::Right
                };
                match node.link(side).child() {
                    Some(next) => current = next,
                    None => {
                        let id = self.nodes.alloc(Node::new(value, Some(current)));
                        self.nodes[current].set_link(side, Link::Child(id));
                        break id;
                    }
                }
            },
        };
        B::after_insert(self, id);
        id
    }

    /// Removes one value equal to `value` and returns it.
    ///
    /// A node with two children is not unlinked itself: it takes over the smallest value of
    /// its right subtree and that value's node is removed instead.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if no value in the tree equals `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, TreeError};
    ///
    /// let mut tree = BinaryTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.remove(&1), Ok(1));
    /// assert_eq!(tree.remove(&1), Err(TreeError::NotFound));
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T, TreeError>
    where
        T: Ord,
    {
        let id = self.find_id(value).ok_or(TreeError::NotFound)?;
        self.unthread();
        let (removed, lowest_changed) = match self.nodes[id].children() {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let (successor, parent) = self.splice_out(successor);
                let removed = mem::replace(&mut self.nodes[id].value, successor.value);
                (removed, parent)
            }
            _ => {
                let (node, parent) = self.splice_out(id);
                (node.value, parent)
            }
        };
        B::after_remove(self, lowest_changed);
        Ok(removed)
    }
}

/// Two trees are equal when they have the same shape and equal values in the same places.
impl<T, B, B2> PartialEq<Tree<T, B2>> for Tree<T, B>
where
    T: PartialEq,
{
    fn eq(&self, other: &Tree<T, B2>) -> bool {
        structural::same_shape(&self.nodes, self.root, &other.nodes, other.root)
    }
}

impl<T, B> Eq for Tree<T, B> where T: Eq {}

impl<T, B> FromIterator<T> for Tree<T, B>
where
    T: Ord,
    B: Balance,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, B> Extend<T> for Tree<T, B>
where
    T: Ord,
    B: Balance,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

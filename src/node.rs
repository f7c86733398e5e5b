//! Nodes and the arena they live in.
//!
//! Every node of a [`Tree`] is stored in an arena owned by that tree and is addressed by a
//! [`NodeId`]. A node's child slots are [`Link`]s which make the difference between "no
//! child", "owned child" and "thread" explicit, so a thread can never be mistaken for a
//! structural child.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::iter::Iter;
use crate::{Order, Tree};

/// A handle to a node inside one particular tree.
///
/// Ids stay valid across insertions and rotations. Removing a value frees one node and its
/// slot may be handed out again by a later insertion, so ids held across a removal should be
/// looked up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The contents of one child slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Link {
    #[default]
    Absent,
    /// A structural child owned by the node holding this link.
    Child(NodeId),
    /// A non-owning link to the next node of the order the tree is threaded under.
    Thread(NodeId),
}

impl Link {
    /// The structural child, treating threads as absent.
    pub(crate) fn child(self) -> Option<NodeId> {
        match self {
            Link::Child(id) => Some(id),
            Link::Absent | Link::Thread(_) => None,
        }
    }

    pub(crate) fn is_absent(self) -> bool {
        matches!(self, Link::Absent)
    }
}

impl From<Option<NodeId>> for Link {
    fn from(child: Option<NodeId>) -> Self {
        child.map_or(Link::Absent, Link::Child)
    }
}

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Option<NodeId>,
    /// Length of the longest path from this node down to a leaf. A leaf has height 0.
    pub(crate) height: i32,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            value,
            left: Link::Absent,
            right: Link::Absent,
            parent,
            height: 0,
        }
    }

    pub(crate) fn link(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_link(&mut self, side: Side, link: Link) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right = link,
        }
    }

    pub(crate) fn children(&self) -> (Option<NodeId>, Option<NodeId>) {
        (self.left.child(), self.right.child())
    }
}

/// Slot storage for the nodes of one tree. Freed slots are recycled by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// One past the largest index ever handed out. Useful for sizing side tables.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(node);
                NodeId(index)
            }
            None => {
                let index = u32::try_from(self.slots.len()).expect("more than u32::MAX nodes");
                self.slots.push(Some(node));
                NodeId(index)
            }
        }
    }

    /// Frees the slot of `id` and hands back its node. Links pointing at it must already be
    /// gone.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node<T> {
        let node = self.slots[id.index()]
            .take()
            .expect("removing a node that is already free");
        self.free.push(id.0);
        self.len -= 1;
        node
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node<T>> {
        self.slots.iter_mut().flatten()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Height of an optional subtree, `-1` for an empty one.
    pub(crate) fn height_of(&self, id: Option<NodeId>) -> i32 {
        id.map_or(-1, |id| self[id].height)
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        self.get(id).expect("link to a freed node")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .expect("link to a freed node")
    }
}

/// A borrowed view of one node of a tree.
pub struct NodeRef<'a, T, B> {
    tree: &'a Tree<T, B>,
    id: NodeId,
}

impl<'a, T, B> Clone for NodeRef<'a, T, B> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T, B> Copy for NodeRef<'a, T, B> {}

/// What a child slot of a node currently holds.
pub enum Slot<'a, T, B> {
    /// Nothing.
    Absent,
    /// A structural child.
    Child(NodeRef<'a, T, B>),
    /// A thread to the node's successor in the order the tree is threaded under.
    Thread(NodeRef<'a, T, B>),
}

impl<'a, T, B> Slot<'a, T, B> {
    /// The structural child, if any. Threads are not children.
    pub fn child(self) -> Option<NodeRef<'a, T, B>> {
        match self {
            Slot::Child(node) => Some(node),
            Slot::Absent | Slot::Thread(_) => None,
        }
    }

    /// Whether the slot holds a thread.
    pub fn is_thread(&self) -> bool {
        matches!(self, Slot::Thread(_))
    }
}

impl<'a, T, B> NodeRef<'a, T, B> {
    pub(crate) fn new(tree: &'a Tree<T, B>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a Node<T> {
        &self.tree.nodes[self.id]
    }

    fn slot(&self, link: Link) -> Slot<'a, T, B> {
        match link {
            Link::Absent => Slot::Absent,
            Link::Child(id) => Slot::Child(NodeRef::new(self.tree, id)),
            Link::Thread(id) => Slot::Thread(NodeRef::new(self.tree, id)),
        }
    }

    /// The id of this node within its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The stored value.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// The left child slot.
    pub fn left(&self) -> Slot<'a, T, B> {
        self.slot(self.node().left)
    }

    /// The right child slot.
    pub fn right(&self) -> Slot<'a, T, B> {
        self.slot(self.node().right)
    }

    /// Height of the subtree rooted here; 0 for a leaf.
    pub fn height(&self) -> i32 {
        self.node().height
    }

    /// True when the node has no structural children.
    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// True when the node has at least one structural child.
    pub fn has_children(&self) -> bool {
        let (left, right) = self.node().children();
        left.is_some() || right.is_some()
    }

    /// A snapshot iterator over the subtree rooted at this node.
    pub fn iter(&self, order: Order) -> Iter<'a, T> {
        Iter::new(&self.tree.nodes, self.tree.order_ids(Some(self.id), order))
    }

    /// Deep copies the subtree rooted at this node into a new tree that shares nothing with
    /// this one.
    pub fn to_tree(&self) -> Tree<T, B>
    where
        T: Clone,
    {
        self.tree.copy_subtree(self.id)
    }
}

impl<'a, T, B> fmt::Debug for NodeRef<'a, T, B>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .field("height", &self.height())
            .finish()
    }
}

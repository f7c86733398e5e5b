//! Balancing strategies.
//!
//! A [`Tree`] runs a strategy hook after every ordered insertion and every removal. The
//! [`Plain`] strategy only repairs the cached heights on the way back up. The [`Avl`]
//! strategy also rotates any node whose subtrees differ in height by more than one, so the
//! tree height stays `O(lg N)`.

use tracing::trace;

use crate::node::{Link, NodeId};
use crate::Tree;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Plain {}
    impl Sealed for super::Avl {}
}

/// What a tree does to its shape after a structural change. Implemented by [`Plain`] and
/// [`Avl`]; this trait is sealed.
pub trait Balance: sealed::Sealed {
    /// Called after the node `inserted` has been attached as a leaf.
    fn after_insert<T>(tree: &mut Tree<T, Self>, inserted: NodeId)
    where
        Self: Sized;

    /// Called after a node has been unlinked. `lowest_changed` is the deepest node whose
    /// subtree lost a node, or `None` if the root itself was unlinked.
    fn after_remove<T>(tree: &mut Tree<T, Self>, lowest_changed: Option<NodeId>)
    where
        Self: Sized;
}

/// No balancing. The shape of the tree depends entirely on insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Balance for Plain {
    fn after_insert<T>(tree: &mut Tree<T, Self>, inserted: NodeId) {
        let parent = tree.nodes[inserted].parent;
        tree.fix_heights_from(parent);
    }

    fn after_remove<T>(tree: &mut Tree<T, Self>, lowest_changed: Option<NodeId>) {
        tree.fix_heights_from(lowest_changed);
    }
}

/// AVL balancing: after every change the heights of the two subtrees of any node differ by
/// at most one.
///
/// # Examples
///
/// ```
/// use ordtree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for value in [10, 20, 30] {
///     tree.insert(value);
/// }
///
/// // The third insertion rotated 20 up.
/// assert_eq!(tree.root().unwrap().value(), &20);
/// assert!(tree.is_balanced());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Avl;

impl Avl {
    /// Walks from `start` to the root, fixing heights and rotating where needed.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn retrace<T>(tree: &mut Tree<T, Self>, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            tree.update_height(id);
            let subtree_root = match tree.balance_factor(id) {
                bf if bf > 1 => {
                    let left = tree.nodes[id].left.child().expect("left heavy => left child");
                    if tree.balance_factor(left) >= 0 {
                        tree.rotate_right(id)
                    } else {
                        tree.rotate_left_right(id)
                    }
                }
                bf if bf < -1 => {
                    let right = tree.nodes[id].right.child().expect("right heavy => right child");
                    if tree.balance_factor(right) <= 0 {
                        tree.rotate_left(id)
                    } else {
                        tree.rotate_right_left(id)
                    }
                }
                _ => id,
            };

            if cfg!(debug_assertions) {
                let node = &tree.nodes[subtree_root];
                let (left, right) = node.children();
                let (left, right) = (tree.nodes.height_of(left), tree.nodes.height_of(right));
                assert_eq!(node.height, left.max(right) + 1);
            }
            current = tree.nodes[subtree_root].parent;
        }
    }
}

impl Balance for Avl {
    fn after_insert<T>(tree: &mut Tree<T, Self>, inserted: NodeId) {
        let parent = tree.nodes[inserted].parent;
        Self::retrace(tree, parent);
    }

    fn after_remove<T>(tree: &mut Tree<T, Self>, lowest_changed: Option<NodeId>) {
        Self::retrace(tree, lowest_changed);
    }
}

impl<T, B> Tree<T, B> {
    /// The height of the left subtree minus the height of the right subtree. See [the
    /// Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub(crate) fn balance_factor(&self, id: NodeId) -> i32 {
        let (left, right) = self.nodes[id].children();
        self.nodes.height_of(left) - self.nodes.height_of(right)
    }

    /// Rotate `x` to the left. This moves its right child up vertically and `x` down
    /// vertically. Returns the new root of the subtree.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   Option<parent>              Option<parent>
    ///      /                           /
    ///     x                           y
    ///    / \                         / \
    ///   a   y       rotate ->       x   c
    ///      / \                     / \
    ///     b   c                   a   b
    /// ```
    pub(crate) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let y = self.nodes[x].right.child().expect("Rotate left => right child");
        let parent = self.nodes[x].parent;
        let b = self.nodes[y].left.child();

        self.nodes[x].right = Link::from(b);
        if let Some(b) = b {
            self.nodes[b].parent = Some(x);
        }
        self.nodes[y].left = Link::Child(x);
        self.nodes[x].parent = Some(y);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.update_height(x);
        self.update_height(y);
        trace!(pivot = %x, new_root = %y, "rotated left");
        y
    }

    /// Rotate `y` to the right, the mirror image of [`rotate_left`][Self::rotate_left].
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///     Option<parent>            Option<parent>
    ///        /                         /
    ///       y                         x
    ///      / \                       / \
    ///     x   c     rotate ->       a   y
    ///    / \                           / \
    ///   a   b                         b   c
    /// ```
    pub(crate) fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let x = self.nodes[y].left.child().expect("Rotate right => left child");
        let parent = self.nodes[y].parent;
        let b = self.nodes[x].right.child();

        self.nodes[y].left = Link::from(b);
        if let Some(b) = b {
            self.nodes[b].parent = Some(y);
        }
        self.nodes[x].right = Link::Child(y);
        self.nodes[y].parent = Some(x);
        self.nodes[x].parent = parent;
        self.replace_child(parent, y, Some(x));

        self.update_height(y);
        self.update_height(x);
        trace!(pivot = %y, new_root = %x, "rotated right");
        x
    }

    pub(crate) fn rotate_left_right(&mut self, id: NodeId) -> NodeId {
        let left = self.nodes[id].left.child().expect("Rotating requires a left child");
        self.rotate_left(left);
        self.rotate_right(id)
    }

    pub(crate) fn rotate_right_left(&mut self, id: NodeId) -> NodeId {
        let right = self.nodes[id].right.child().expect("Rotating requires a right child");
        self.rotate_right(right);
        self.rotate_left(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AvlTree, Order, TreeError};

    /// Assert the heights of the root, left child, and right child of a tree.
    macro_rules! assert_heights {
        ($tree:ident, $height:expr, $left_height:expr, $right_height:expr) => {{
            match $tree.root() {
                Some(n) => {
                    assert_eq!(n.height(), $height);

                    let left_height = n.left().child().map_or(-1, |n| n.height());
                    let right_height = n.right().child().map_or(-1, |n| n.height());
                    assert_eq!(right_height, $right_height);
                    assert_eq!(left_height, $left_height);
                }
                None => assert_eq!(-1, $height),
            }
        }};
    }

    #[test]
    fn single_left_rotation() {
        let mut tree = AvlTree::new();
        for value in [10, 20, 30] {
            tree.insert(value);
        }

        assert_eq!(tree.root().unwrap().value(), &20);
        assert_eq!(tree.values(Order::Preorder), [&20, &10, &30]);
        assert!(tree.is_balanced());
        assert_heights!(tree, 1, 0, 0);
    }

    #[test]
    fn single_right_rotation() {
        let mut tree = AvlTree::new();
        for value in [30, 20, 10] {
            tree.insert(value);
        }

        assert_eq!(tree.values(Order::Preorder), [&20, &10, &30]);
        assert_heights!(tree, 1, 0, 0);
    }

    #[test]
    fn test_left_right_rebalance() {
        let mut tree = AvlTree::new();

        tree.insert(0);
        tree.insert(-2);
        tree.insert(-1);

        assert_eq!(tree.values(Order::Preorder), [&-1, &-2, &0]);
        assert_heights!(tree, 1, 0, 0);
    }

    #[test]
    fn test_right_left_rebalance() {
        let mut tree = AvlTree::new();

        tree.insert(0);
        tree.insert(2);
        tree.insert(1);

        assert_eq!(tree.values(Order::Preorder), [&1, &0, &2]);
        assert_heights!(tree, 1, 0, 0);
    }

    #[test]
    fn always_adding_left() {
        let values = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut inserted = Vec::new();

        let mut tree = AvlTree::new();
        for value in values {
            tree.insert(value);
            inserted.push(value);
            assert!(tree.is_balanced());
            for inserted in &inserted {
                assert!(tree.contains(inserted));
            }
        }
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn always_adding_right() {
        let mut tree = AvlTree::new();
        for value in 1..=1000 {
            tree.insert(value);
        }
        assert!(tree.is_balanced());
        assert_eq!(tree.height(), 9);
        assert_eq!(tree.min(), Ok(&1));
        assert_eq!(tree.max(), Ok(&1000));
    }

    #[test]
    fn rotate_right_fixes_parent_pointers() {
        let mut tree = AvlTree::new();
        for value in [5, 3, 9, 4, 2, 1] {
            tree.insert(value);
        }

        // 3 rose to the root and 4 moved under 5.
        assert_eq!(tree.values(Order::Preorder), [&3, &2, &1, &5, &4, &9]);
        for id in tree.order_ids(tree.root, Order::Preorder) {
            let (left, right) = tree.nodes[id].children();
            for child in left.into_iter().chain(right) {
                assert_eq!(tree.nodes[child].parent, Some(id));
            }
        }
        assert_eq!(tree.nodes[tree.root.unwrap()].parent, None);
    }

    #[test]
    fn delete_rebalances() {
        let mut tree = AvlTree::new();
        for value in [5, 3, 8, 2, 6, 9, 7] {
            tree.insert(value);
        }
        // Removing 2 leaves the root right heavy with a left leaning right child.
        assert_eq!(tree.remove(&2), Ok(2));
        assert_eq!(tree.remove(&3), Ok(3));

        assert!(tree.is_balanced());
        assert_eq!(tree.values(Order::Preorder), [&6, &5, &8, &7, &9]);
        assert_heights!(tree, 2, 0, 1);
    }

    #[test]
    fn delete_with_deeper_successor() {
        let mut tree = AvlTree::new();
        for value in [5, 3, 8, 2, 6, 9, 7] {
            tree.insert(value);
        }

        assert_eq!(tree.remove(&8), Ok(8));
        assert_eq!(tree.remove(&42), Err(TreeError::NotFound));
        assert!(tree.is_balanced());
        for value in [2, 3, 5, 6, 7, 9] {
            assert!(tree.contains(&value));
        }
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion() {
        let mut tree = AvlTree::new();
        for value in [77, -22, 0, -127, 5, 109, -58, -105, -65, -86, 45, -11, -39] {
            tree.insert(value);
        }
        tree.remove(&0).unwrap();
        assert!(tree.remove(&-122).is_err());
        assert!(tree.is_balanced());
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion2() {
        let mut tree = AvlTree::new();
        for value in [-49, -107, 127, -22, -77, -128, -119, -69, -122, 109, 115, -118] {
            tree.insert(value);
        }
        tree.remove(&-49).unwrap();
        tree.remove(&-77).unwrap();
        assert!(tree.is_balanced());
    }

    #[test]
    fn duplicates_stay_findable() {
        let mut tree = AvlTree::new();
        for _ in 0..10 {
            tree.insert(7);
        }
        assert!(tree.is_balanced());
        for _ in 0..10 {
            assert_eq!(tree.remove(&7), Ok(7));
            assert!(tree.is_balanced());
        }
        assert!(tree.is_empty());
    }
}

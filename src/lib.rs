//! This crate exposes an ordered tree container: a Binary Search Tree (BST)
//! that can optionally keep itself balanced with the AVL discipline, plus a
//! handful of things one can do with a tree beyond inserting and searching.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. A BST is made of nodes, each of
//! which stores a value and has up to two child nodes. The most important
//! invariant of a BST is that, for every node, the values in its left subtree
//! are no greater than its own value and the values in its right subtree are
//! no smaller. Values may repeat, so a tree holds a multiset.
//!
//! > Nodes without children are called "leaf nodes".
//!
//! Searching for a value takes `O(height)`, where `height` is the length of
//! the longest path from the root to a leaf. Inserting already sorted values
//! into a plain BST gives a chain whose height is `N - 1`. The AVL discipline
//! rotates nodes after every change so that the heights of the two subtrees of
//! any node differ by at most one, which limits the height to `O(lg N)`.
//!
//! ## This crate
//!
//! [`Tree`] is generic over its [`Balance`] strategy. [`BinaryTree`] uses
//! [`Plain`] and never reshapes itself; [`AvlTree`] uses [`Avl`]. On top of
//! the usual operations a tree can be
//!
//! - iterated in any [`Order`], from both ends or with a [`Cursor`],
//! - threaded, so it can be walked without a stack (see [`thread`]),
//! - queried by shape with [`Tree::subtree`], [`Tree::contains_subtree`] and
//!   [`Tree::find_by_path`], or merged with another tree,
//! - mapped, filtered and folded (see [`functional`]),
//! - written to text and read back with its exact shape (see [`serialize`]).
//!
//! All of the walks are iterative, so even a degenerate tree with millions
//! of nodes won't overflow the stack.
//!
//! # Examples
//!
//! ```
//! use ordtree::{AvlTree, BinaryTree, Order};
//!
//! let plain: BinaryTree<_> = (1..=100).collect();
//! let avl: AvlTree<_> = (1..=100).collect();
//!
//! assert_eq!(plain.height(), 99);
//! assert_eq!(avl.height(), 6);
//! assert!(plain.iter(Order::Inorder).eq(avl.iter(Order::Inorder)));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod balance;
mod error;
pub mod functional;
mod iter;
mod node;
mod order;
mod print;
pub mod serialize;
mod structural;
pub mod thread;
mod tree;


pub use balance::{Avl, Balance, Plain};
pub use error::TreeError;
pub use iter::{Cursor, Iter};
pub use node::{NodeId, NodeRef, Slot};
pub use order::Order;
pub use serialize::Format;
pub use tree::Tree;

/// A binary search tree that never rebalances.
pub type BinaryTree<T> = Tree<T, Plain>;

/// A binary search tree that keeps itself AVL balanced.
pub type AvlTree<T> = Tree<T, Avl>;

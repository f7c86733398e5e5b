//! The error type shared by every fallible tree operation.

use thiserror::Error;

use crate::node::NodeId;
use crate::Order;

/// Everything that can go wrong when using a [`Tree`][crate::Tree].
///
/// Lookup misses (searching for an absent value, walking a path off the
/// structure) are not errors; those operations return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `remove` was asked for a value the tree does not hold.
    #[error("value not found in tree")]
    NotFound,

    /// `min` or `max` was called on a tree without nodes.
    #[error("tree is empty")]
    Empty,

    /// A threaded traversal was requested but the tree is not threaded, either because it
    /// never was or because it has been mutated since.
    #[error("tree is not threaded")]
    NotThreaded,

    /// A traversal order name that isn't one of `inorder`, `preorder` or `postorder`.
    #[error("unknown traversal order {0:?}")]
    UnknownOrder(String),

    /// A path contained something other than `L` or `R`.
    #[error("invalid path step {step:?} at position {position}")]
    InvalidPath {
        /// The offending character.
        step: char,
        /// Its character index within the path.
        position: usize,
    },

    /// Serialized text that doesn't describe a tree.
    #[error("malformed serialized tree at token {position}: {reason}")]
    Malformed {
        /// Index of the token where decoding gave up.
        position: usize,
        /// What was wrong.
        reason: &'static str,
    },

    /// A value token that the element type refused to parse.
    #[error("cannot parse value {token:?} at token {position}")]
    InvalidValue {
        /// The unescaped token text.
        token: String,
        /// Index of the token.
        position: usize,
    },

    /// A serialization order whose encoding can't be decoded into a single shape. Only
    /// preorder and postorder are accepted.
    #[error("cannot serialize a tree in {0} order")]
    UnsupportedOrder(Order),

    /// A serialization format whose separator, sentinel and escape characters clash.
    #[error("invalid serialization format: {0}")]
    InvalidFormat(&'static str),

    /// A node id that doesn't refer to a live node of this tree.
    #[error("no node with id {0}")]
    UnknownNode(NodeId),

    /// Positional insertion below a node whose child slots are both taken.
    #[error("node {0} has no open child slot")]
    NoOpenSlot(NodeId),

    /// A root was seeded into a tree that already has one.
    #[error("tree already has a root")]
    NotEmpty,
}

//! A text encoding that keeps the exact shape of a tree.
//!
//! Every node is written as a value token and every absent child as a sentinel token, so
//! decoding can put every value back where it was. Tokens are separated by a separator
//! character. The walk is preorder unless another order is asked for. With the default
//! [`Format`], the tree
//!
//! ```text
//!   2
//!  / \
//! 1   3
//! ```
//!
//! encodes as `2,1,#,#,3,#,#` in preorder, as `#,#,1,#,#,3,2` in postorder, and the empty
//! tree as `#` in both.
//!
//! Inorder can't be used. With sentinels included, `#,1,#,2,#` is both 1 with a right
//! child 2 and 2 with a left child 1, so an inorder encoding doesn't pin down one shape.
//! Asking for it gives [`TreeError::UnsupportedOrder`].
//!
//! Value tokens are the `Display` text of the value with the escape character `\`, the
//! separator and the sentinel each preceded by a `\`. A value whose text is `#` is
//! therefore written `\#` and can't be confused with an absent child.
//!
//! Decoding does not check the ordering of the values, so trees built by hand with
//! [`Tree::insert_at`] come back unchanged.
//!
//! # Examples
//!
//! ```
//! use ordtree::{BinaryTree, Order};
//!
//! let tree: BinaryTree<_> = [2, 1, 3].into_iter().collect();
//! let text = tree.serialize();
//! assert_eq!(text, "2,1,#,#,3,#,#");
//!
//! let back = BinaryTree::<i32>::deserialize(&text).unwrap();
//! assert_eq!(back, tree);
//!
//! let text = tree.serialize_in(Order::Postorder).unwrap();
//! assert_eq!(text, "#,#,1,#,#,3,2");
//! assert_eq!(BinaryTree::deserialize_in(&text, Order::Postorder), Ok(tree));
//! ```

use std::fmt::{self, Display, Write};
use std::str::FromStr;

use tracing::debug;

use crate::node::{Arena, Link, Node, NodeId, Side};
use crate::{Order, Tree, TreeError};

/// The separator and sentinel characters of the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    separator: char,
    sentinel: char,
}

impl Format {
    /// Escapes the separator, the sentinel and itself inside value tokens.
    pub const ESCAPE: char = '\\';

    /// Builds a format.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidFormat`] if the two characters are equal or either of them is
    /// [`Format::ESCAPE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, Format};
    ///
    /// let format = Format::new(' ', '.').unwrap();
    /// let tree: BinaryTree<_> = [2, 1].into_iter().collect();
    /// assert_eq!(tree.serialize_with(&format), "2 1 . . .");
    ///
    /// assert!(Format::new('#', '#').is_err());
    /// ```
    pub fn new(separator: char, sentinel: char) -> Result<Self, TreeError> {
        if separator == sentinel {
            return Err(TreeError::InvalidFormat("separator and sentinel are the same"));
        }
        if separator == Self::ESCAPE || sentinel == Self::ESCAPE {
            return Err(TreeError::InvalidFormat("the escape character is reserved"));
        }
        Ok(Self {
            separator,
            sentinel,
        })
    }

    /// The character between tokens.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// The token standing for an absent child.
    pub fn sentinel(&self) -> char {
        self.sentinel
    }

    fn is_special(&self, ch: char) -> bool {
        ch == Self::ESCAPE || ch == self.separator || ch == self.sentinel
    }
}

impl Default for Format {
    fn default() -> Self {
        Self {
            separator: ',',
            sentinel: '#',
        }
    }
}

/// One decoded token.
#[derive(Debug, PartialEq)]
enum Token {
    Absent,
    Value(String),
}

/// The orders whose sentinel encoding describes exactly one shape.
#[derive(Debug, Clone, Copy)]
enum Encoding {
    Preorder,
    Postorder,
}

impl TryFrom<Order> for Encoding {
    type Error = TreeError;

    fn try_from(order: Order) -> Result<Self, TreeError> {
        match order {
            Order::Preorder => Ok(Encoding::Preorder),
            Order::Postorder => Ok(Encoding::Postorder),
            Order::Inorder => Err(TreeError::UnsupportedOrder(order)),
        }
    }
}

/// A step of the encoding walk.
enum Visit {
    /// A child slot; its node, if any, still has to be expanded.
    Slot(Option<NodeId>),
    /// A node whose subtrees have been written.
    Value(NodeId),
}

/// Writes `Display` output with special characters escaped.
struct Escaper<'a, W> {
    out: &'a mut W,
    format: &'a Format,
}

impl<'a, W: Write> Write for Escaper<'a, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.format.is_special(ch) {
                self.out.write_char(Format::ESCAPE)?;
            }
            self.out.write_char(ch)?;
        }
        Ok(())
    }
}

fn tokenize(text: &str, format: &Format) -> Result<Vec<Token>, TreeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // An unescaped sentinel was seen in the current token.
    let mut sentinel = false;
    // Anything else was seen in the current token.
    let mut other = false;

    let finish = |tokens: &mut Vec<Token>, current: &mut String, sentinel, other| {
        let position = tokens.len();
        match (sentinel, other) {
            (true, true) => Err(TreeError::Malformed {
                position,
                reason: "unescaped sentinel inside a value",
            }),
            (true, false) => {
                tokens.push(Token::Absent);
                Ok(())
            }
            (false, _) => {
                tokens.push(Token::Value(std::mem::take(current)));
                Ok(())
            }
        }
    };

    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == Format::ESCAPE {
            let position = tokens.len();
            match chars.next() {
                Some(escaped) if format.is_special(escaped) => {
                    current.push(escaped);
                    other = true;
                }
                Some(_) => {
                    return Err(TreeError::Malformed {
                        position,
                        reason: "unknown escape sequence",
                    })
                }
                None => {
                    return Err(TreeError::Malformed {
                        position,
                        reason: "dangling escape character",
                    })
                }
            }
        } else if ch == format.separator {
            finish(&mut tokens, &mut current, sentinel, other)?;
            sentinel = false;
            other = false;
        } else if ch == format.sentinel {
            if sentinel {
                other = true;
            }
            sentinel = true;
        } else {
            current.push(ch);
            other = true;
        }
    }
    finish(&mut tokens, &mut current, sentinel, other)?;
    Ok(tokens)
}

fn parse_value<T: FromStr>(token: String, position: usize) -> Result<T, TreeError> {
    token.parse().map_err(|_| TreeError::InvalidValue { token, position })
}

fn decode_preorder<T: FromStr>(
    tokens: Vec<Token>,
) -> Result<(Arena<T>, Option<NodeId>), TreeError> {
    let count = tokens.len();
    let mut nodes = Arena::default();
    let mut root = None;
    // Slots still waiting for a token, the next one to fill on top. `None` is the root.
    let mut pending: Vec<Option<(NodeId, Side)>> = vec![None];
    for (position, token) in tokens.into_iter().enumerate() {
        let place = pending.pop().ok_or(TreeError::Malformed {
            position,
            reason: "trailing tokens after a complete tree",
        })?;
        let Token::Value(token) = token else {
            continue;
        };
        let value = parse_value(token, position)?;
        let id = nodes.alloc(Node::new(value, place.map(|(parent, _)| parent)));
        match place {
            None => root = Some(id),
            Some((parent, side)) => nodes[parent].set_link(side, Link::Child(id)),
        }
        pending.push(Some((id, Side::Right)));
        pending.push(Some((id, Side::Left)));
    }
    if !pending.is_empty() {
        return Err(TreeError::Malformed {
            position: count,
            reason: "unexpected end of input",
        });
    }
    Ok((nodes, root))
}

fn decode_postorder<T: FromStr>(
    tokens: Vec<Token>,
) -> Result<(Arena<T>, Option<NodeId>), TreeError> {
    let count = tokens.len();
    let mut nodes = Arena::default();
    // Finished subtrees, the latest on top.
    let mut done: Vec<Option<NodeId>> = Vec::new();
    for (position, token) in tokens.into_iter().enumerate() {
        let Token::Value(token) = token else {
            done.push(None);
            continue;
        };
        if done.len() < 2 {
            return Err(TreeError::Malformed {
                position,
                reason: "value without both children before it",
            });
        }
        let value = parse_value(token, position)?;
        let right = done.pop().flatten();
        let left = done.pop().flatten();
        let id = nodes.alloc(Node::new(value, None));
        for (side, child) in [(Side::Left, left), (Side::Right, right)] {
            if let Some(child) = child {
                nodes[child].parent = Some(id);
                nodes[id].set_link(side, Link::Child(child));
            }
        }
        done.push(Some(id));
    }
    // More than one subtree left means their parents never came.
    match done[..] {
        [root] => Ok((nodes, root)),
        _ => Err(TreeError::Malformed {
            position: count,
            reason: "unexpected end of input",
        }),
    }
}

impl<T, B> Tree<T, B>
where
    T: Display,
{
    /// Encodes the tree in preorder with the default [`Format`].
    pub fn serialize(&self) -> String {
        self.encode(Encoding::Preorder, &Format::default())
    }

    /// Encodes the tree in preorder with the given format.
    pub fn serialize_with(&self, format: &Format) -> String {
        self.encode(Encoding::Preorder, format)
    }

    /// Encodes the tree in the given order with the default [`Format`].
    ///
    /// # Errors
    ///
    /// [`TreeError::UnsupportedOrder`] for [`Order::Inorder`], which can't be decoded back
    /// into a single shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, Order, TreeError};
    ///
    /// let tree: BinaryTree<_> = [1, 2].into_iter().collect();
    /// assert_eq!(tree.serialize_in(Order::Preorder), Ok(tree.serialize()));
    /// assert_eq!(tree.serialize_in(Order::Postorder).unwrap(), "#,#,#,2,1");
    /// assert_eq!(
    ///     tree.serialize_in(Order::Inorder),
    ///     Err(TreeError::UnsupportedOrder(Order::Inorder))
    /// );
    /// ```
    pub fn serialize_in(&self, order: Order) -> Result<String, TreeError> {
        self.serialize_in_with(order, &Format::default())
    }

    /// Encodes the tree in the given order and format.
    ///
    /// # Errors
    ///
    /// Same as [`serialize_in`][Self::serialize_in].
    pub fn serialize_in_with(&self, order: Order, format: &Format) -> Result<String, TreeError> {
        let encoding = Encoding::try_from(order)?;
        Ok(self.encode(encoding, format))
    }

    /// Writes the preorder encoding of the tree to `out`.
    pub fn write_serialized<W>(&self, format: &Format, out: &mut W) -> fmt::Result
    where
        W: Write,
    {
        self.write_encoded(Encoding::Preorder, format, out)
    }

    fn encode(&self, encoding: Encoding, format: &Format) -> String {
        let mut out = String::new();
        self.write_encoded(encoding, format, &mut out)
            .expect("a Display implementation returned an error unexpectedly");
        debug!(?encoding, len = self.len(), bytes = out.len(), "serialized tree");
        out
    }

    fn write_encoded<W>(&self, encoding: Encoding, format: &Format, out: &mut W) -> fmt::Result
    where
        W: Write,
    {
        let mut stack = vec![Visit::Slot(self.root)];
        let mut first = true;
        while let Some(visit) = stack.pop() {
            let token = match visit {
                Visit::Slot(None) => None,
                Visit::Slot(Some(id)) => {
                    if let Encoding::Postorder = encoding {
                        stack.push(Visit::Value(id));
                    }
                    let (left, right) = self.nodes[id].children();
                    stack.push(Visit::Slot(right));
                    stack.push(Visit::Slot(left));
                    match encoding {
                        Encoding::Preorder => Some(id),
                        Encoding::Postorder => continue,
                    }
                }
                Visit::Value(id) => Some(id),
            };
            if !first {
                out.write_char(format.separator)?;
            }
            first = false;
            match token {
                None => out.write_char(format.sentinel)?,
                Some(id) => {
                    let value = &self.nodes[id].value;
                    write!(Escaper { out: &mut *out, format }, "{value}")?;
                }
            }
        }
        Ok(())
    }
}

impl<T, B> Tree<T, B>
where
    T: FromStr,
{
    /// Decodes a preorder tree written with the default [`Format`].
    ///
    /// # Errors
    ///
    /// [`TreeError::Malformed`] if `text` doesn't describe exactly one tree and
    /// [`TreeError::InvalidValue`] if a value token doesn't parse as a `T`.
    pub fn deserialize(text: &str) -> Result<Self, TreeError> {
        Self::deserialize_in_with(text, Order::Preorder, &Format::default())
    }

    /// Decodes a preorder tree written with the given format.
    ///
    /// # Errors
    ///
    /// Same as [`deserialize`][Self::deserialize].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{BinaryTree, TreeError};
    ///
    /// // The right child of 1 is missing.
    /// assert_eq!(
    ///     BinaryTree::<i32>::deserialize("1,#"),
    ///     Err(TreeError::Malformed { position: 2, reason: "unexpected end of input" })
    /// );
    /// assert_eq!(
    ///     BinaryTree::<i32>::deserialize("1,x,#,#,#"),
    ///     Err(TreeError::InvalidValue { token: "x".to_string(), position: 1 })
    /// );
    /// ```
    pub fn deserialize_with(text: &str, format: &Format) -> Result<Self, TreeError> {
        Self::deserialize_in_with(text, Order::Preorder, format)
    }

    /// Decodes a tree written in the given order with the default [`Format`].
    ///
    /// # Errors
    ///
    /// [`TreeError::UnsupportedOrder`] for [`Order::Inorder`], otherwise the same as
    /// [`deserialize`][Self::deserialize].
    pub fn deserialize_in(text: &str, order: Order) -> Result<Self, TreeError> {
        Self::deserialize_in_with(text, order, &Format::default())
    }

    /// Decodes a tree written in the given order and format.
    ///
    /// # Errors
    ///
    /// Same as [`deserialize_in`][Self::deserialize_in].
    pub fn deserialize_in_with(
        text: &str,
        order: Order,
        format: &Format,
    ) -> Result<Self, TreeError> {
        let encoding = Encoding::try_from(order)?;
        let tokens = tokenize(text, format)?;
        let count = tokens.len();
        let (nodes, root) = match encoding {
            Encoding::Preorder => decode_preorder(tokens)?,
            Encoding::Postorder => decode_postorder(tokens)?,
        };

        let mut tree = Self::with_root(nodes, root);
        tree.recompute_heights();
        debug!(?encoding, len = tree.len(), tokens = count, "deserialized tree");
        Ok(tree)
    }
}

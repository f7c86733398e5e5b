//! Traversal orders.

use std::fmt;
use std::str::FromStr;

use crate::TreeError;

/// The order in which a traversal visits nodes. Accepted by iteration, threading and
/// printing entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields values in sorted order.
    #[default]
    Inorder,
    /// Node, left subtree, right subtree.
    Preorder,
    /// Left subtree, right subtree, node.
    Postorder,
}

impl Order {
    /// All orders, handy for exhaustive tests.
    pub const ALL: [Order; 3] = [Order::Inorder, Order::Preorder, Order::Postorder];

    /// The lowercase name accepted by [`Order::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Order::Inorder => "inorder",
            Order::Preorder => "preorder",
            Order::Postorder => "postorder",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = TreeError;

    /// # Examples
    ///
    /// ```
    /// use ordtree::{Order, TreeError};
    ///
    /// assert_eq!("preorder".parse(), Ok(Order::Preorder));
    /// assert_eq!(
    ///     "levelorder".parse::<Order>(),
    ///     Err(TreeError::UnknownOrder("levelorder".to_string()))
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inorder" => Ok(Order::Inorder),
            "preorder" => Ok(Order::Preorder),
            "postorder" => Ok(Order::Postorder),
            other => Err(TreeError::UnknownOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for order in Order::ALL {
            assert_eq!(order.to_string().parse(), Ok(order));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Inorder".parse::<Order>().is_err());
        assert!(" inorder".parse::<Order>().is_err());
    }
}

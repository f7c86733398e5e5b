//! Map, filter and fold over the values of a tree.
//!
//! Nothing here changes a value in place. A function passed to [`Tree::apply`] need not
//! preserve the ordering of the values, so its results are inserted into a fresh tree which
//! orders them again.
//!
//! # Examples
//!
//! ```
//! use ordtree::{AvlTree, Order};
//!
//! let tree: AvlTree<i32> = (1..=5).collect();
//!
//! // Negating reverses the order; the new tree is still sorted.
//! let negated = tree.apply(|v| -v);
//! assert_eq!(negated.to_string_in(Order::Inorder), "-5 -4 -3 -2 -1");
//!
//! let odd = tree.filter(|v| v % 2 == 1);
//! assert_eq!(odd.to_string_in(Order::Inorder), "1 3 5");
//!
//! assert_eq!(tree.reduce(0, |sum, v| sum + v), 15);
//! ```

use crate::balance::Balance;
use crate::{Order, Tree};

impl<T, B> Tree<T, B>
where
    B: Balance,
{
    /// A new tree holding `f` of every value. Values are mapped in order and inserted into
    /// the new tree as they come, using this tree's balancing strategy.
    pub fn apply<U, F>(&self, mut f: F) -> Tree<U, B>
    where
        U: Ord,
        F: FnMut(&T) -> U,
    {
        self.iter(Order::Inorder).map(|value| f(value)).collect()
    }

    /// A new tree holding copies of the values for which `predicate` returns true.
    #[doc(alias = "where")]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        T: Ord + Clone,
        P: FnMut(&T) -> bool,
    {
        self.iter(Order::Inorder)
            .filter(|value| predicate(*value))
            .cloned()
            .collect()
    }
}

impl<T, B> Tree<T, B> {
    /// Folds the values in order, smallest first, starting from `initial`.
    pub fn reduce<A, F>(&self, initial: A, f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter(Order::Inorder).fold(initial, f)
    }
}

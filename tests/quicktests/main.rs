#[macro_use]
extern crate quickcheck_macros;

mod functional;
mod ordering;
mod serialize;
mod structural;
mod thread;

use ordtree::Order;
use quickcheck::{Arbitrary, Gen};

/// The kinds of "things" to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the value into the tree
    Insert(T),
    /// Remove one copy of the value from the tree
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Any traversal order.
#[derive(Copy, Clone, Debug)]
pub struct AnyOrder(pub Order);

impl Arbitrary for AnyOrder {
    fn arbitrary(g: &mut Gen) -> Self {
        AnyOrder(*g.choose(&Order::ALL).unwrap())
    }
}

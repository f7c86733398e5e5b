use ordtree::{AvlTree, Balance, BinaryTree, Order, Tree, TreeError};

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a sorted vector.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same multiset of values in both.
fn do_ops<B: Balance>(ops: &[Op<i8>], tree: &mut Tree<i8, B>, model: &mut Vec<i8>) {
    for op in ops {
        match *op {
            Op::Insert(v) => {
                tree.insert(v);
                let at = model.partition_point(|x| *x <= v);
                model.insert(at, v);
            }
            Op::Remove(v) => {
                let expected = match model.iter().position(|x| *x == v) {
                    Some(at) => Ok(model.remove(at)),
                    None => Err(TreeError::NotFound),
                };
                assert_eq!(tree.remove(&v), expected);
            }
        }
    }
}

fn is_sorted(tree: &Tree<i8, impl Balance>) -> bool {
    tree.values(Order::Inorder).windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = BinaryTree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);
    is_sorted(&tree) && tree.iter(Order::Inorder).eq(model.iter()) && tree.len() == model.len()
}

#[quickcheck]
fn avl_is_balanced_after_every_op(ops: Vec<Op<i8>>) -> bool {
    let mut tree = AvlTree::new();
    let mut model = Vec::new();

    ops.chunks(1).all(|op| {
        do_ops(op, &mut tree, &mut model);
        tree.is_balanced() && is_sorted(&tree)
    }) && tree.iter(Order::Inorder).eq(model.iter())
}

#[quickcheck]
fn avl_and_plain_hold_the_same_values(xs: Vec<i8>) -> bool {
    let plain: BinaryTree<_> = xs.iter().copied().collect();
    let avl: AvlTree<_> = xs.iter().copied().collect();

    plain.iter(Order::Inorder).eq(avl.iter(Order::Inorder)) && plain.len() == avl.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: BinaryTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: AvlTree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.remove(delete).is_ok() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.len() == still_present.len()
}

#[quickcheck]
fn balance_gives_minimum_height(xs: Vec<i8>) -> bool {
    let mut tree: BinaryTree<_> = xs.iter().copied().collect();
    tree.balance();

    // A tree of height h holds at most 2^(h+1) - 1 values.
    let minimum = (usize::BITS - xs.len().leading_zeros()) as i32 - 1;
    tree.is_balanced() && tree.height() == minimum && is_sorted(&tree)
}

#[quickcheck]
fn min_and_max(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();

    tree.min().ok() == xs.iter().min() && tree.max().ok() == xs.iter().max()
}

use ordtree::{BinaryTree, Order, TreeError};

use crate::{AnyOrder, Op};

fn threaded(tree: &BinaryTree<i8>) -> Result<Vec<i8>, TreeError> {
    let mut out = Vec::new();
    tree.traverse_threaded(|v| out.push(*v))?;
    Ok(out)
}

#[quickcheck]
fn threaded_walk_matches_iteration(xs: Vec<i8>, order: AnyOrder) -> bool {
    let mut tree: BinaryTree<_> = xs.into_iter().collect();
    tree.make_threaded(order.0);

    threaded(&tree) == Ok(tree.iter(order.0).copied().collect())
}

#[quickcheck]
fn threading_is_idempotent(xs: Vec<i8>, order: AnyOrder) -> bool {
    let mut tree: BinaryTree<_> = xs.into_iter().collect();
    tree.make_threaded(order.0);
    let first = threaded(&tree);
    tree.make_threaded(order.0);

    first.is_ok() && threaded(&tree) == first
}

#[quickcheck]
fn mutation_unthreads(xs: Vec<i8>, op: Op<i8>) -> bool {
    let mut tree: BinaryTree<_> = xs.into_iter().collect();
    tree.make_threaded(Order::Inorder);
    let changed = match op {
        Op::Insert(v) => {
            tree.insert(v);
            true
        }
        Op::Remove(v) => tree.remove(&v).is_ok(),
    };

    (threaded(&tree) == Err(TreeError::NotThreaded)) == changed
}

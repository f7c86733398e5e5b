use ordtree::{AvlTree, BinaryTree, Order};

#[quickcheck]
fn apply_keeps_every_value(xs: Vec<i16>) -> bool {
    let tree: BinaryTree<_> = xs.iter().copied().collect();
    let doubled = tree.apply(|v| i32::from(*v) * -2);

    let mut expected: Vec<_> = xs.iter().map(|v| i32::from(*v) * -2).collect();
    expected.sort_unstable();
    doubled.iter(Order::Inorder).eq(expected.iter())
}

#[quickcheck]
fn apply_never_touches_the_source(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let before = tree.clone();
    let mapped = tree.apply(|v| v.wrapping_mul(3));

    tree == before && mapped.is_balanced() && mapped.len() == tree.len()
}

#[quickcheck]
fn filter_matches_iterator_filter(xs: Vec<i8>, threshold: i8) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let kept = tree.filter(|v| *v > threshold);

    kept.iter(Order::Inorder)
        .eq(tree.iter(Order::Inorder).filter(|v| **v > threshold))
}

#[quickcheck]
fn reduce_sums(xs: Vec<i8>) -> bool {
    let tree: BinaryTree<_> = xs.iter().copied().collect();

    tree.reduce(0i64, |sum, v| sum + i64::from(*v)) == xs.iter().map(|v| i64::from(*v)).sum()
}

use ordtree::{AvlTree, BinaryTree, Order};

#[quickcheck]
fn merge_has_both(a: Vec<i8>, b: Vec<i8>) -> bool {
    let left: BinaryTree<_> = a.iter().copied().collect();
    let right: AvlTree<_> = b.iter().copied().collect();
    let merged = left.merge(&right);

    merged.len() == a.len() + b.len()
        && a.iter().chain(&b).all(|v| merged.contains(v))
        && left.len() == a.len()
        && right.len() == b.len()
}

#[quickcheck]
fn merge_operator(a: Vec<i8>, b: Vec<i8>) -> bool {
    let left: AvlTree<_> = a.into_iter().collect();
    let right: AvlTree<_> = b.into_iter().collect();
    let merged = &left + &right;

    merged.is_balanced() && merged == left.merge(&right)
}

#[quickcheck]
fn every_subtree_is_contained(xs: Vec<i8>) -> bool {
    let tree: BinaryTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| match tree.subtree(x) {
        Some(sub) => tree.contains_subtree(&sub),
        None => false,
    })
}

#[quickcheck]
fn paths_reach_subtrees(xs: Vec<i8>, path: Vec<bool>) -> bool {
    let tree: BinaryTree<_> = xs.into_iter().collect();
    let path: String = path.iter().map(|&left| if left { 'L' } else { 'R' }).collect();

    match tree.find_by_path(&path).unwrap() {
        Some(sub) => {
            let root = sub.root().unwrap();
            tree.contains_subtree(&sub)
                && tree.subtree(root.value()).is_some()
                && sub.iter(Order::Inorder).count() == sub.len()
        }
        None => true,
    }
}

use ordtree::{AvlTree, BinaryTree, Format, Order, TreeError};

use crate::AnyOrder;

#[quickcheck]
fn round_trip_keeps_shape(xs: Vec<i32>) -> bool {
    let tree: BinaryTree<_> = xs.into_iter().collect();
    let back = BinaryTree::<i32>::deserialize(&tree.serialize()).unwrap();

    back == tree && back.height() == tree.height() && back.len() == tree.len()
}

#[quickcheck]
fn round_trip_strings(xs: Vec<String>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();
    let back = AvlTree::<String>::deserialize(&tree.serialize()).unwrap();

    back == tree && back.is_balanced()
}

#[quickcheck]
fn round_trip_custom_format(xs: Vec<String>) -> bool {
    let format = Format::new(' ', '_').unwrap();
    let tree: BinaryTree<_> = xs.into_iter().collect();
    let text = tree.serialize_with(&format);

    BinaryTree::<String>::deserialize_with(&text, &format) == Ok(tree)
}

#[quickcheck]
fn round_trip_in_any_order(xs: Vec<i32>, order: AnyOrder) -> bool {
    let AnyOrder(order) = order;
    let tree: BinaryTree<_> = xs.into_iter().collect();

    match tree.serialize_in(order) {
        Ok(text) => BinaryTree::deserialize_in(&text, order) == Ok(tree),
        Err(err) => order == Order::Inorder && err == TreeError::UnsupportedOrder(order),
    }
}

#[quickcheck]
fn postorder_differs_from_preorder(xs: Vec<u8>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();
    let post = tree.serialize_in(Order::Postorder).unwrap();

    // Same tokens, different positions, unless the tree is empty.
    post.len() == tree.serialize().len() && (tree.is_empty() == (post == tree.serialize()))
}

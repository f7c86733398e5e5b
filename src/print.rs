//! Drawing a tree as text, one node per line.
//!
//! ```text
//! 5
//! ├─ 3
//! │  ├─ 2
//! │  └─ 4
//! └─ 7
//!    ├─ ∅
//!    └─ 8
//! ```
//!
//! The left child comes first. A missing child is drawn as `∅` when its sibling exists.

use std::fmt::{self, Display, Write};

use crate::node::{Arena, NodeId};

const EMPTY: &str = "∅";

pub(crate) fn write_tree<T, W>(nodes: &Arena<T>, root: Option<NodeId>, out: &mut W) -> fmt::Result
where
    T: Display,
    W: Write,
{
    let Some(root) = root else {
        return out.write_str(EMPTY);
    };
    write!(out, "{}", nodes[root].value)?;

    // (slot to draw, indentation of its line, whether it is the last child of its parent)
    let mut stack: Vec<(Option<NodeId>, String, bool)> = Vec::new();
    push_children(nodes, root, "", &mut stack);
    while let Some((slot, indent, last)) = stack.pop() {
        out.write_char('\n')?;
        out.write_str(&indent)?;
        out.write_str(if last { "└─ " } else { "├─ " })?;
        match slot {
            None => out.write_str(EMPTY)?,
            Some(id) => {
                write!(out, "{}", nodes[id].value)?;
                let indent = indent + (if last { "   " } else { "│  " });
                push_children(nodes, id, &indent, &mut stack);
            }
        }
    }
    Ok(())
}

fn push_children<T>(
    nodes: &Arena<T>,
    id: NodeId,
    indent: &str,
    stack: &mut Vec<(Option<NodeId>, String, bool)>,
) {
    let (left, right) = nodes[id].children();
    if left.is_none() && right.is_none() {
        return;
    }
    stack.push((right, indent.to_string(), true));
    stack.push((left, indent.to_string(), false));
}

#[cfg(test)]
mod tests {
    use crate::BinaryTree;

    #[test]
    fn empty() {
        assert_eq!(BinaryTree::<i32>::new().to_string(), "∅");
    }

    #[test]
    fn lone_root() {
        let tree: BinaryTree<_> = [1].into_iter().collect();
        assert_eq!(tree.to_string(), "1");
    }

    #[test]
    fn nested() {
        let tree: BinaryTree<_> = [5, 3, 7, 2, 4, 8].into_iter().collect();
        let expected = "\
5
├─ 3
│  ├─ 2
│  └─ 4
└─ 7
   ├─ ∅
   └─ 8";
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn missing_right_child() {
        let tree: BinaryTree<_> = ["b", "a"].into_iter().collect();
        assert_eq!(tree.to_string(), "b\n├─ a\n└─ ∅");
    }

    #[test]
    fn threads_are_not_drawn() {
        let mut tree: BinaryTree<_> = [2, 1, 3].into_iter().collect();
        let before = tree.to_string();
        tree.make_threaded(crate::Order::Inorder);
        assert_eq!(tree.to_string(), before);
    }
}

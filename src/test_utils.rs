use std::fmt::Debug;

use proptest::prelude::*;

use crate::{
    node::{Node, Side},
    AvlTree,
};

/// The upper bound (exclusive) of generated keys.
///
/// A small key domain encourages multiple operations to act on the same key.
pub(crate) const KEY_MAX: usize = 200;

/// Generate an arbitrary key in [0..[`KEY_MAX`]).
pub(crate) fn arbitrary_key() -> impl Strategy<Value = usize> {
    0..KEY_MAX
}

/// Construct a perfectly balanced subtree from the given ascending keys,
/// mapping each key to itself.
///
/// # Panics
///
/// Panics if `keys` is empty or not strictly ascending.
pub(crate) fn build(keys: impl IntoIterator<Item = usize>) -> Box<Node<usize, usize>> {
    let keys = keys.into_iter().collect::<Vec<_>>();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    build_slice(&keys).expect("cannot build an empty subtree")
}

fn build_slice(keys: &[usize]) -> Option<Box<Node<usize, usize>>> {
    if keys.is_empty() {
        return None;
    }

    let mid = keys.len() / 2;
    let mut n = Box::new(Node::new(keys[mid], keys[mid]));
    *n.slot(Side::Left) = build_slice(&keys[..mid]);
    *n.slot(Side::Right) = build_slice(&keys[mid + 1..]);
    n.update_height();

    Some(n)
}

/// Return the keys of the subtree rooted at `n` in ascending order.
pub(crate) fn in_order_keys<K, V>(n: Option<&Node<K, V>>) -> Vec<K>
where
    K: Clone,
{
    let mut out = Vec::new();
    let mut stack = Vec::new();
    let mut ptr = n;

    loop {
        while let Some(v) = ptr {
            stack.push(v);
            ptr = v.left();
        }

        let Some(v) = stack.pop() else { break };
        out.push(v.key().clone());
        ptr = v.right();
    }

    out
}

/// Assert the BST and AVL properties of tree nodes, ensuring the tree is
/// well-formed.
pub(crate) fn validate_tree_structure<K, V>(t: &AvlTree<K, V>)
where
    K: Ord + Debug,
    V: Debug,
{
    let root = match t.root() {
        Some(v) => v,
        None => return,
    };

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        // Prepare to visit the children
        stack.extend(n.left().iter().chain(n.right().iter()));

        // Invariant 1: the left child always contains a key strictly less
        // than this node.
        assert!(n.left().map(|v| v.key() < n.key()).unwrap_or(true));

        // Invariant 2: the right child always contains a key strictly
        // greater than this node.
        assert!(n.right().map(|v| v.key() > n.key()).unwrap_or(true));

        // Invariant 3: the height of this node is always +1 of the maximum
        // child height.
        let left_height = n.left().map(|v| v.height()).unwrap_or_default();
        let right_height = n.right().map(|v| v.height()).unwrap_or_default();
        let want_height = left_height.max(right_height) + 1;

        assert_eq!(
            n.height(),
            want_height,
            "expect node with key {:?} to have height {}, has {}",
            n.key(),
            want_height,
            n.height(),
        );

        // Invariant 4: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot exceed 1.
        let balance = (left_height as i64 - right_height as i64).abs();
        assert!(balance <= 1, "balance={balance}, node={n:?}");
    }

    // Invariant 5: the in-order traversal is strictly increasing, which
    // implies the BST property holds across whole subtrees, not only between
    // parent and child.
    let keys = t.iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));

    assert!(t.is_balanced());
}

//! Range truncation: discard every key beyond a boundary in time
//! proportional to the tree height.
//!
//! Descending towards the boundary key splits the tree into three kinds of
//! node:
//!
//! ```text
//!                 (a)            a: kept spine node, key < x
//!                /   \
//!              A1    [b]         b: discarded spine node, key > x
//!                    /  \
//!                  (c)   B2      c: kept spine node (the boundary), key <= x
//!                  / \
//!                C1   C2
//! ```
//!
//! For `remove_above(x)` the discarded spine nodes ([b]) are dropped along
//! with their right subtrees (B2), and the boundary drops its right subtree
//! (C2). What remains is a "vine" of kept spine nodes, root-most first, each
//! holding only its untouched, internally balanced left subtree (A1, C1).
//!
//! The vine is collapsed from the bottom up: each kept spine node becomes the
//! pivot joining its own kept subtree with the tree already rebuilt from the
//! nodes below it. Because the kept subtrees of consecutive spine nodes grow
//! in height towards the root, the work of every join telescopes and the
//! whole collapse runs in O(height).

use crate::{
    metrics::Recorder,
    node::{height, Node, Side},
    path::Path,
};

/// Discard every key in the subtree rooted at `root` lying strictly beyond
/// `bound` on the side opposite `keep`, returning the balanced remainder.
///
/// `keep == Side::Left` retains the keys `<= bound` and `keep == Side::Right`
/// retains the keys `>= bound`. `bound` need not be present: the deepest
/// kept node on the path towards it is the nearest present key on the kept
/// side, which becomes the effective boundary.
pub(crate) fn truncate<K, V, R>(
    root: Box<Node<K, V>>,
    bound: &K,
    keep: Side,
    rec: &mut R,
) -> Option<Box<Node<K, V>>>
where
    K: Ord,
    R: Recorder,
{
    let discard = keep.opposite();

    // Detach every node on the search path from its parent.
    let (path, last) = Path::to_key(root, bound);
    let exact = Side::toward(bound, last.key()).is_none();

    // Spine nodes beyond the bound are dropped here, together with their
    // subtrees on the discarded side. Their kept-side child was detached by
    // the descent and continues the path.
    let mut vine = path
        .into_nodes()
        .chain(std::iter::once(last))
        .filter(|n| !discard.contains(n.key(), bound))
        .collect::<Vec<_>>();

    tracing::trace!(
        ?keep,
        exact,
        survivors = vine.len(),
        "collapsing truncation vine"
    );

    let mut acc = None;
    while let Some(mut pivot) = vine.pop() {
        rec.traversal();

        // Only the boundary node still holds a child on the discarded side;
        // the descent emptied that slot for every other kept spine node.
        drop(pivot.take_child(discard));
        let kept = pivot.take_child(keep);

        acc = Some(match keep {
            Side::Left => join(kept, pivot, acc, rec),
            Side::Right => join(acc, pivot, kept, rec),
        });
    }

    acc
}

/// Join the balanced subtrees `left` and `right` with the childless `pivot`,
/// where every key in `left` is less than the pivot key and every key in
/// `right` is greater, returning a balanced tree.
///
/// Runs in O(|height(left) - height(right)| + 1).
pub(crate) fn join<K, V, R>(
    left: Option<Box<Node<K, V>>>,
    mut pivot: Box<Node<K, V>>,
    right: Option<Box<Node<K, V>>>,
    rec: &mut R,
) -> Box<Node<K, V>>
where
    R: Recorder,
{
    debug_assert!(pivot.left().is_none() && pivot.right().is_none());

    let (hl, hr) = (height(left.as_deref()), height(right.as_deref()));

    // The taller operand, the shorter one, and the side of the taller operand
    // facing the pivot (its inner spine).
    let (tall, short, inner) = match (left, right) {
        (Some(l), r) if hl > hr + 1 => (l, r, Side::Right),
        (l, Some(r)) if hr > hl + 1 => (r, l, Side::Left),
        (l, r) => {
            // Close enough in height to hang directly off the pivot.
            *pivot.slot(Side::Left) = l;
            *pivot.slot(Side::Right) = r;
            pivot.update_height();
            return pivot;
        }
    };

    let short_height = height(short.as_deref());

    // Walk down the inner spine of the taller operand until reaching a
    // subtree no more than one level taller than the shorter operand.
    let mut path = Path::default();
    let mut node = tall;
    while node.height() > short_height + 1 {
        match node.take_child(inner) {
            Some(child) => {
                path.push(node, inner);
                node = child;
            }
            None => break,
        }
    }

    // The pivot takes the place of that subtree, adopting it and the shorter
    // operand as children, and the spine above is fixed up.
    *pivot.slot(inner.opposite()) = Some(node);
    *pivot.slot(inner) = short;

    path.rebalance_from(pivot, rec)
}

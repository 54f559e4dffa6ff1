use std::cmp::Ordering;

use crate::metrics::Recorder;

/// One of the two child positions of a [`Node`].
///
/// Every mirrored algorithm (rotations, extreme / neighbour lookups, range
/// truncation) is written once against a [`Side`] rather than twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The side of a node holding `key` that a search for `key` descends
    /// into, or [`None`] if `key` is `node_key`.
    pub(crate) fn toward<K>(key: &K, node_key: &K) -> Option<Self>
    where
        K: Ord,
    {
        match key.cmp(node_key) {
            Ordering::Less => Some(Self::Left),
            Ordering::Equal => None,
            Ordering::Greater => Some(Self::Right),
        }
    }

    /// Returns true if `key` lies strictly on this side of `pivot`.
    pub(crate) fn contains<K>(self, key: &K, pivot: &K) -> bool
    where
        K: Ord,
    {
        Self::toward(key, pivot) == Some(self)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Child nodes pointers.
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, an absent child a height of 0.
    ///
    /// A u8 holds a maximum value of 255, which is far beyond the height of
    /// any balanced tree that fits in memory.
    height: u8,

    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let node = match Side::toward(key, &self.key) {
            Some(side) => self.child(side),
            None => return Some(&self.value),
        }?;

        node.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        let node = match Side::toward(key, &self.key) {
            Some(side) => self.slot(side).as_deref_mut(),
            None => return Some(&mut self.value),
        }?;

        node.get_mut(key)
    }

    /// The minimum (`Side::Left`) or maximum (`Side::Right`) node of the
    /// subtree rooted at `self`.
    pub(crate) fn extreme(&self, side: Side) -> &Self {
        let mut n = self;
        while let Some(c) = n.child(side) {
            n = c;
        }
        n
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// The owning pointer slot for the child on `side`.
    pub(crate) fn slot(&mut self, side: Side) -> &mut Option<Box<Self>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Unlink and return the child on `side`, if any.
    ///
    /// The cached height of `self` is NOT updated.
    pub(crate) fn take_child(&mut self, side: Side) -> Option<Box<Self>> {
        self.slot(side).take()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Exchange the key and value of `self` with those of `other`, leaving
    /// both nodes' links and heights untouched.
    pub(crate) fn swap_entry(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.key, &mut other.key);
        std::mem::swap(&mut self.value, &mut other.value);
    }

    /// Recompute the cached height of this node from its children.
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(self.left()).max(height(self.right()));
    }

    /// Explode this [`Node`] into the key `K` and value `V` it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Validate the cached heights and AVL balance of the subtree rooted at
    /// `self`, returning true if every node is balanced.
    ///
    /// # Panics
    ///
    /// Panics if any cached height differs from the height recomputed from
    /// the children; this is a structural defect, not a property of the
    /// input.
    pub(crate) fn is_balanced(&self) -> bool {
        // Validate the children first so that the heights used to compute
        // this node's balance are known to be correct.
        if !self.left().map(Self::is_balanced).unwrap_or(true)
            || !self.right().map(Self::is_balanced).unwrap_or(true)
        {
            return false;
        }

        let want = 1 + height(self.left()).max(height(self.right()));
        assert_eq!(
            self.height, want,
            "invariant violation: cached node height {} != computed height {}",
            self.height, want
        );

        balance(self).abs() <= 1
    }
}

pub(crate) fn height<K, V>(n: Option<&Node<K, V>>) -> u8 {
    n.map(|v| v.height()).unwrap_or_default()
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns height(right) - height(left): a positive number when right heavy,
/// and a negative number when left heavy.
pub(crate) fn balance<K, V>(n: &Node<K, V>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.right()) as i16 - height(n.left()) as i16) as i8
}

/// The side `n` is heavier on, if any.
fn heavy_side<K, V>(n: &Node<K, V>) -> Option<Side> {
    match balance(n) {
        0 => None,
        b if b > 0 => Some(Side::Right),
        _ => Some(Side::Left),
    }
}

/// Rotate the subtree rooted at `x` so that `x` moves down towards `side`,
/// promoting its child on the opposite side in its place.
///
/// ```text
///   rotate(x, Left):
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
///
///   rotate(y, Right):
///
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `x` has no child opposite `side` (cannot be rotated).
pub(crate) fn rotate<K, V, R>(x: &mut Box<Node<K, V>>, side: Side, rec: &mut R)
where
    R: Recorder,
{
    let mut p = x
        .take_child(side.opposite())
        .expect("invariant violation: rotation without a child to promote");
    std::mem::swap(x, &mut p);

    // "x" now points at the promoted node, and "p" holds the demoted former
    // root, which adopts the promoted node's inner child.
    *p.slot(side.opposite()) = x.take_child(side);
    p.update_height();

    *x.slot(side) = Some(p);
    x.update_height();

    rec.rotation();
}

/// Restore the AVL balance of the subtree rooted at `n`, whose children are
/// both balanced and whose heights differ by at most 2.
///
/// Applies a single rotation, or a double rotation when the heavy child
/// leans towards the opposite side (a zig-zag), and never recurses. The
/// cached height of `n` is recomputed first.
///
/// # Panics
///
/// Panics if the balance factor of `n` exceeds a magnitude of 2, which no
/// single fix-up step can correct.
pub(crate) fn rebalance<K, V, R>(n: &mut Box<Node<K, V>>, rec: &mut R)
where
    R: Recorder,
{
    n.update_height();

    let bf = balance(n);
    assert!(
        bf.abs() <= 2,
        "invariant violation: balance factor {bf} cannot be fixed by rotation"
    );
    if bf.abs() <= 1 {
        return;
    }

    let heavy = if bf > 0 { Side::Right } else { Side::Left };

    // Zig-zag: straighten the heavy child towards the heavy side first.
    if let Some(child) = n.slot(heavy).as_mut() {
        if heavy_side(child) == Some(heavy.opposite()) {
            rotate(child, heavy, rec);
        }
    }

    rotate(n, heavy.opposite(), rec);

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after rebalancing.
    debug_assert!(balance(n).abs() <= 1);
}

use crate::{
    entry::Entry,
    iter::{OwnedIter, RefIter},
    metrics::{Instrumented, Metrics, Recorder},
    node::{height, Node, Side},
    path::Path,
    truncate::truncate,
    Error,
};

/// An [`AvlTree`] is an ordered map of `(key, value)` tuples backed by a
/// height-balanced binary search tree.
///
/// Point inserts, lookups and deletes run in `O(log n)` time.
///
/// # Range Truncation
///
/// In addition to point operations, the tree can discard every key above
/// ([`AvlTree::remove_above()`]), below ([`AvlTree::remove_below()`]) or
/// outside ([`AvlTree::remove_range()`]) a boundary. The rebalancing work is
/// proportional to the height of the tree and independent of the number of
/// keys discarded: the discarded subtrees are never visited to rebalance the
/// remainder. Dropping them still frees every discarded node.
///
/// # Concurrency
///
/// The tree has no internal synchronisation. Callers needing shared access
/// should wrap it in a lock, or [`Clone`] it (a deep copy sharing nothing
/// with the original) to mutate a private snapshot and swap it in.
#[derive(Debug, Clone)]
pub struct AvlTree<K, V>(Option<Box<Node<K, V>>>);

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<K, V> AvlTree<K, V> {
    /// Construct a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The height of the tree; 0 when empty, 1 for a single key.
    pub fn height(&self) -> usize {
        height(self.0.as_deref()) as usize
    }

    /// Iterate over the `(key, value)` tuples in the tree in ascending key
    /// order.
    pub fn iter(&self) -> RefIter<'_, K, V> {
        RefIter::new(self.0.as_deref())
    }

    /// Return a deep copy of this tree that shares no nodes with `self`.
    ///
    /// Equivalent to [`Clone::clone()`].
    pub fn copy(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        self.clone()
    }

    /// Validate the AVL invariants of every node in the tree, returning false
    /// if any node has subtrees that differ in height by more than 1.
    ///
    /// This is a diagnostic that visits every node in `O(n)` time.
    ///
    /// # Panics
    ///
    /// Panics if a cached node height is inconsistent with the subtree it
    /// roots.
    pub fn is_balanced(&self) -> bool {
        self.0.as_deref().map(Node::is_balanced).unwrap_or(true)
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.0.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn into_root(self) -> Option<Box<Node<K, V>>> {
        self.0
    }
}

impl<K, V> AvlTree<K, V>
where
    K: Ord,
{
    /// Insert `value` for `key`, returning the previous value for `key` if
    /// any.
    ///
    /// Overwriting the value of an existing key does not modify the tree
    /// structure.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_with(key, value, &mut ())
    }

    pub(crate) fn insert_with<R>(&mut self, key: K, value: V, rec: &mut R) -> Option<V>
    where
        R: Recorder,
    {
        let Some(root) = self.0.take() else {
            self.0 = Some(Box::new(Node::new(key, value)));
            return None;
        };

        let (mut path, mut target) = Path::to_key(root, &key);

        match Side::toward(&key, target.key()) {
            None => {
                // The tree structure has not been modified, so it does not
                // require rebalancing.
                let old = std::mem::replace(target.value_mut(), value);
                self.0 = Some(path.restore(target));
                Some(old)
            }
            Some(side) => {
                // Link the new leaf beneath the last node on the path, and
                // fix up every ancestor from there to the root.
                path.push(target, side);
                self.0 = Some(path.rebalance_from(Box::new(Node::new(key, value)), rec));
                None
            }
        }
    }

    /// Return a reference to the value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.as_ref().and_then(|v| v.get(key))
    }

    /// Return a mutable reference to the value for `key`, if any.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.0.as_mut().and_then(|v| v.get_mut(key))
    }

    /// Returns true if `key` is present in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Return the value for `key`, or [`Error::KeyNotFound`].
    pub fn search(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Get the [`Entry`] for `key` for in-place manipulation.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V>
    where
        K: Clone,
    {
        Entry::new(key, self)
    }

    /// Remove `key` from the tree, returning its value if it was present.
    ///
    /// Deleting an absent key is a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.delete_with(key, &mut ())
    }

    pub(crate) fn delete_with<R>(&mut self, key: &K, rec: &mut R) -> Option<V>
    where
        R: Recorder,
    {
        let root = self.0.take()?;
        let (mut path, mut target) = Path::to_key(root, key);

        if Side::toward(key, target.key()).is_some() {
            // Not found.
            self.0 = Some(path.restore(target));
            return None;
        }

        // "removed" is the node physically unlinked from the tree, and
        // "replacement" its (at most one) child that takes its place.
        let (removed, replacement) = match target.take_right() {
            Some(right) if target.left().is_some() => {
                // The target has two children: it stays in place and takes
                // the entry of its in-order successor (the minimum of the
                // right subtree), which has no left child and is unlinked
                // instead.
                let depth = path.len();
                tracing::trace!(depth, "splicing in-order successor");

                path.push(target, Side::Right);

                let mut successor = path.to_edge(right, Side::Left);
                path.node_mut(depth).swap_entry(&mut successor);

                let replacement = successor.take_right();
                (successor, replacement)
            }
            right => {
                let replacement = right.or_else(|| target.take_left());
                (target, replacement)
            }
        };

        self.0 = path.rebalance(replacement, rec);

        Some(removed.into_tuple().1)
    }

    /// Return the minimum key in the tree and its value.
    pub fn min(&self) -> Result<(&K, &V), Error> {
        self.extreme(Side::Left)
    }

    /// Return the maximum key in the tree and its value.
    pub fn max(&self) -> Result<(&K, &V), Error> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Result<(&K, &V), Error> {
        let n = self.0.as_deref().ok_or(Error::EmptyTree)?.extreme(side);
        Ok((n.key(), n.value()))
    }

    /// Return the smallest key strictly greater than `key`, and its value.
    ///
    /// `key` need not be present in the tree.
    pub fn successor(&self, key: &K) -> Option<(&K, &V)> {
        self.neighbour(key, Side::Right)
    }

    /// Return the largest key strictly less than `key`, and its value.
    ///
    /// `key` need not be present in the tree.
    pub fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        self.neighbour(key, Side::Left)
    }

    /// Find the closest key lying strictly on `side` of `key`.
    fn neighbour(&self, key: &K, side: Side) -> Option<(&K, &V)> {
        let mut best = None;
        let mut ptr = self.0.as_deref();

        while let Some(n) = ptr {
            if side.contains(n.key(), key) {
                // A candidate; anything closer is on the near side of it.
                best = Some(n);
                ptr = n.child(side.opposite());
            } else {
                ptr = n.child(side);
            }
        }

        best.map(|n| (n.key(), n.value()))
    }

    /// Remove every key strictly greater than `bound`.
    ///
    /// If `bound` is absent, the effective boundary is the largest present
    /// key less than `bound`; if there is none, the tree becomes empty.
    ///
    /// Runs in time proportional to the height of the tree.
    pub fn remove_above(&mut self, bound: &K) {
        self.remove_above_with(bound, &mut ())
    }

    pub(crate) fn remove_above_with<R>(&mut self, bound: &K, rec: &mut R)
    where
        R: Recorder,
    {
        self.retain_side(bound, Side::Left, rec)
    }

    /// Remove every key strictly less than `bound`.
    ///
    /// If `bound` is absent, the effective boundary is the smallest present
    /// key greater than `bound`; if there is none, the tree becomes empty.
    ///
    /// Runs in time proportional to the height of the tree.
    pub fn remove_below(&mut self, bound: &K) {
        self.remove_below_with(bound, &mut ())
    }

    pub(crate) fn remove_below_with<R>(&mut self, bound: &K, rec: &mut R)
    where
        R: Recorder,
    {
        self.retain_side(bound, Side::Right, rec)
    }

    fn retain_side<R>(&mut self, bound: &K, keep: Side, rec: &mut R)
    where
        R: Recorder,
    {
        if let Some(root) = self.0.take() {
            self.0 = truncate(root, bound, keep, rec);
        }
    }

    /// Remove every key outside of the inclusive range `[lower, upper]`.
    ///
    /// Applies [`AvlTree::remove_below()`] with `lower`, then
    /// [`AvlTree::remove_above()`] with `upper`; the two truncations act on
    /// disjoint parts of the key space and the result does not depend on the
    /// order.
    ///
    /// Returns [`Error::InvalidRange`] without modifying the tree if `lower`
    /// is greater than `upper`.
    pub fn remove_range(&mut self, lower: &K, upper: &K) -> Result<(), Error> {
        self.remove_range_with(lower, upper, &mut ())
    }

    pub(crate) fn remove_range_with<R>(
        &mut self,
        lower: &K,
        upper: &K,
        rec: &mut R,
    ) -> Result<(), Error>
    where
        R: Recorder,
    {
        if lower > upper {
            tracing::debug!("rejecting range truncation with lower > upper");
            return Err(Error::InvalidRange);
        }

        self.remove_below_with(lower, rec);
        self.remove_above_with(upper, rec);

        Ok(())
    }

    /// Borrow this tree through a handle that records rebalancing work into
    /// `metrics`.
    pub fn instrument<'a>(&'a mut self, metrics: &'a mut Metrics) -> Instrumented<'a, K, V> {
        Instrumented::new(self, metrics)
    }
}

impl<K, V> IntoIterator for AvlTree<K, V> {
    type Item = (K, V);
    type IntoIter = OwnedIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        OwnedIter::new(self.0)
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = RefIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<K, V> Extend<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

use crate::AvlTree;

/// A sink for rebalancing events, threaded through every mutating algorithm.
///
/// The unit type `()` discards all events and compiles down to nothing, so
/// uninstrumented calls pay no cost.
pub(crate) trait Recorder {
    /// A single rotation was applied.
    fn rotation(&mut self) {}

    /// One level of a rebalancing walk was processed.
    fn traversal(&mut self) {}
}

impl Recorder for () {}

/// Rebalancing counters collected by an [`Instrumented`] tree handle.
///
/// A [`Metrics`] value is owned by the caller and only ever written by calls
/// made through the [`Instrumented`] handle borrowing it, so independent runs
/// (or concurrent tests) never observe each other's counts.
///
/// A double rotation is counted as two rotations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    rotations: u64,
    traversals: u64,
}

impl Metrics {
    /// The number of single rotations applied.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// The number of tree levels visited while rebalancing.
    pub fn traversals(&self) -> u64 {
        self.traversals
    }

    /// Zero both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Recorder for Metrics {
    fn rotation(&mut self) {
        self.rotations += 1;
    }

    fn traversal(&mut self) {
        self.traversals += 1;
    }
}

/// A mutable view of an [`AvlTree`] that records rebalancing work into a
/// caller-provided [`Metrics`].
///
/// Constructed by [`AvlTree::instrument()`].
#[derive(Debug)]
pub struct Instrumented<'a, K, V> {
    tree: &'a mut AvlTree<K, V>,
    metrics: &'a mut Metrics,
}

impl<'a, K, V> Instrumented<'a, K, V>
where
    K: Ord,
{
    pub(crate) fn new(tree: &'a mut AvlTree<K, V>, metrics: &'a mut Metrics) -> Self {
        Self { tree, metrics }
    }

    /// See [`AvlTree::insert()`].
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.insert_with(key, value, self.metrics)
    }

    /// See [`AvlTree::delete()`].
    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.tree.delete_with(key, self.metrics)
    }

    /// See [`AvlTree::remove_above()`].
    pub fn remove_above(&mut self, bound: &K) {
        self.tree.remove_above_with(bound, self.metrics)
    }

    /// See [`AvlTree::remove_below()`].
    pub fn remove_below(&mut self, bound: &K) {
        self.tree.remove_below_with(bound, self.metrics)
    }

    /// See [`AvlTree::remove_range()`].
    pub fn remove_range(&mut self, lower: &K, upper: &K) -> Result<(), crate::Error> {
        self.tree.remove_range_with(lower, upper, self.metrics)
    }

    /// Read-only access to the underlying tree.
    pub fn tree(&self) -> &AvlTree<K, V> {
        self.tree
    }

    /// The counters recorded so far.
    pub fn metrics(&self) -> &Metrics {
        self.metrics
    }
}

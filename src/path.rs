use crate::{
    metrics::Recorder,
    node::{rebalance, Node, Side},
};

/// A root-to-target path through a tree, held as a zipper.
///
/// Each frame owns an ancestor [`Node`] whose child slot on the recorded
/// [`Side`] has been emptied (the "hole" the next frame, or the target, was
/// detached from). Nothing on the path is reachable from two owners at once;
/// the tree is reassembled strictly bottom-up by [`Path::rebalance()`] or
/// [`Path::restore()`].
#[derive(Debug)]
pub(crate) struct Path<K, V> {
    frames: Vec<(Box<Node<K, V>>, Side)>,
}

impl<K, V> Default for Path<K, V> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
        }
    }
}

impl<K, V> Path<K, V> {
    /// Descend from `root` towards `key`, detaching each visited node from
    /// its parent.
    ///
    /// Returns the path of ancestors and the final node: the node holding
    /// `key`, or the node `key` would be linked beneath if it is absent.
    pub(crate) fn to_key(root: Box<Node<K, V>>, key: &K) -> (Self, Box<Node<K, V>>)
    where
        K: Ord,
    {
        let mut path = Self::default();
        let mut node = root;

        while let Some(side) = Side::toward(key, node.key()) {
            match node.take_child(side) {
                Some(child) => {
                    path.push(node, side);
                    node = child;
                }
                None => break,
            }
        }

        (path, node)
    }

    /// Descend from `node` following only children on `side`, extending this
    /// path, and return the detached extreme (minimum or maximum) node of the
    /// subtree.
    pub(crate) fn to_edge(&mut self, mut node: Box<Node<K, V>>, side: Side) -> Box<Node<K, V>> {
        while let Some(child) = node.take_child(side) {
            self.push(node, side);
            node = child;
        }
        node
    }

    /// Append `node` to the path, recording that its child on `side` has been
    /// detached and continues the path.
    pub(crate) fn push(&mut self, node: Box<Node<K, V>>, side: Side) {
        debug_assert!(node.child(side).is_none());
        self.frames.push((node, side));
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    /// A mutable reference to the node at `depth` frames below the root of
    /// the path.
    pub(crate) fn node_mut(&mut self, depth: usize) -> &mut Node<K, V> {
        &mut self.frames[depth].0
    }

    /// Rebuild the tree bottom-up after a structural edit at the bottom of
    /// the path.
    ///
    /// `subtree` replaces whatever was detached from the deepest frame. It,
    /// and then every ancestor in turn, has its height recomputed and is
    /// rebalanced before being linked back into the hole it was taken from.
    /// Returns the new root of the whole path, or [`None`] if the path was
    /// empty and no subtree was given.
    pub(crate) fn rebalance<R>(
        mut self,
        subtree: Option<Box<Node<K, V>>>,
        rec: &mut R,
    ) -> Option<Box<Node<K, V>>>
    where
        R: Recorder,
    {
        match subtree {
            Some(n) => Some(self.rebalance_from(n, rec)),
            None => {
                // The deepest frame lost its child; it is the lowest node
                // needing a fix-up.
                let (node, _) = self.frames.pop()?;
                Some(self.rebalance_from(node, rec))
            }
        }
    }

    /// As [`Path::rebalance()`], for a present subtree.
    pub(crate) fn rebalance_from<R>(self, mut node: Box<Node<K, V>>, rec: &mut R) -> Box<Node<K, V>>
    where
        R: Recorder,
    {
        rec.traversal();
        rebalance(&mut node, rec);

        self.frames
            .into_iter()
            .rev()
            .fold(node, |child, (mut parent, side)| {
                rec.traversal();
                *parent.slot(side) = Some(child);
                rebalance(&mut parent, rec);
                parent
            })
    }

    /// Link `node` back into the deepest hole and reattach every frame
    /// without touching any cached height.
    ///
    /// Only valid when the path was not structurally modified.
    pub(crate) fn restore(self, node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        self.frames
            .into_iter()
            .rev()
            .fold(node, |child, (mut parent, side)| {
                *parent.slot(side) = Some(child);
                parent
            })
    }

    /// Consume the path, returning the detached ancestors from the root
    /// down.
    pub(crate) fn into_nodes(self) -> impl DoubleEndedIterator<Item = Box<Node<K, V>>> {
        self.frames.into_iter().map(|(n, _)| n)
    }
}

use crate::AvlTree;

const PRESENT: &str = "occupied entry key must be present in the tree";

/// A view into a single key of an [`AvlTree`], which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`AvlTree`].
///
/// [`entry`]: AvlTree::entry
#[derive(Debug)]
pub enum Entry<'a, K, V>
where
    K: Ord + Clone,
{
    /// The key is absent from the tree.
    Vacant(VacantEntry<'a, K, V>),
    /// The key is present in the tree.
    Occupied(OccupiedEntry<'a, K, V>),
}

/// A view into an absent key of an [`AvlTree`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct VacantEntry<'a, K, V>
where
    K: Ord + Clone,
{
    key: K,
    tree: &'a mut AvlTree<K, V>,
}

/// A view into a present key of an [`AvlTree`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V>
where
    K: Ord + Clone,
{
    key: K,
    tree: &'a mut AvlTree<K, V>,
}

impl<'a, K, V> VacantEntry<'a, K, V>
where
    K: Ord + Clone,
{
    /// The key that would be used when inserting a value through this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Insert `value` for this entry's key, returning a mutable reference to
    /// it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        self.insert_entry(value).into_mut()
    }

    /// Insert `value` for this entry's key, returning the now occupied
    /// entry.
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        self.tree.insert(self.key.clone(), value);
        OccupiedEntry {
            key: self.key,
            tree: self.tree,
        }
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V>
where
    K: Ord + Clone,
{
    /// The key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value of this entry.
    #[inline]
    pub fn get(&self) -> &V {
        self.tree.get(&self.key).expect(PRESENT)
    }

    /// A mutable reference to the value of this entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.get_mut(&self.key).expect(PRESENT)
    }

    /// Convert the entry into a mutable reference to its value, bound to the
    /// lifetime of the tree borrow.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.get_mut(&self.key).expect(PRESENT)
    }

    /// Overwrite the value of this entry, returning the old value.
    ///
    /// The tree structure is not modified.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Delete this entry's key from the tree, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.tree.delete(&self.key).expect(PRESENT)
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Clone,
{
    pub(crate) fn new(key: K, tree: &'a mut AvlTree<K, V>) -> Self {
        if tree.contains_key(&key) {
            Entry::Occupied(OccupiedEntry { key, tree })
        } else {
            Entry::Vacant(VacantEntry { key, tree })
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltrim::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, &str> = AvlTree::default();
    /// assert_eq!(tree.entry(10).key(), &10);
    /// ```
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting `default` if empty, and
    /// returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltrim::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, u32> = AvlTree::default();
    ///
    /// tree.entry(10).or_insert(42);
    /// assert_eq!(tree.get(&10), Some(&42));
    ///
    /// *tree.entry(10).or_insert(100) += 1;
    /// assert_eq!(tree.get(&10), Some(&43));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(|| default)
    }

    /// Ensures a value is in the entry by inserting the result of `default`
    /// if empty, and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        self.or_insert_with_key(|_| default())
    }

    /// As [`Entry::or_insert_with()`], passing the entry's key to `default`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltrim::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, i32> = AvlTree::default();
    ///
    /// tree.entry(10).or_insert_with_key(|key| key * 2);
    /// assert_eq!(tree.get(&10), Some(&20));
    /// ```
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltrim::AvlTree;
    ///
    /// let mut tree: AvlTree<&str, u32> = AvlTree::default();
    ///
    /// for word in ["a", "b", "a"] {
    ///     tree.entry(word).and_modify(|v| *v += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(tree.get(&"a"), Some(&2));
    /// assert_eq!(tree.get(&"b"), Some(&1));
    /// ```
    #[inline]
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        if let Entry::Occupied(entry) = &mut self {
            f(entry.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an [`OccupiedEntry`].
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(entry) => entry.insert_entry(value),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Clone,
    V: Default,
{
    /// Ensures a value is in the entry by inserting the default value if
    /// empty, and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

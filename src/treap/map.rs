use crate::entry::Entry;
use crate::treap::node::Node;
use crate::treap::priority::{self, SipPriority};
use crate::treap::tree;
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occuring in its right subtree. The priority of a node is
/// less than or equal to the priority of all nodes in its subtrees. The priority of a node is the
/// hash of its key, so the shape of the tree depends only on the set of keys and the hasher. With
/// a well-distributed hash, the expected height of the tree is proportional to the logarithm of
/// the number of keys.
///
/// # Examples
///
/// ```
/// use hashed_treap::treap::TreapMap;
///
/// let mut map = TreapMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.size(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert!(map.is_bst() && map.is_heap());
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert!(!map.delete(&1));
/// ```
pub struct TreapMap<T, U, S = SipPriority> {
    root: tree::Tree<T, U>,
    size: usize,
    hasher: S,
}

impl<T, U> TreapMap<T, U> {
    /// Constructs a new, empty `TreapMap<T, U>` whose priorities are hashed with random keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(SipPriority::new())
    }

    /// Constructs a new, empty `TreapMap<T, U>` whose priorities are hashed with fixed keys. Two
    /// maps constructed with the same keys and fed the same keys have the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut first = TreapMap::with_keys(1, 2);
    /// let mut second = TreapMap::with_keys(1, 2);
    /// for key in 0..10 {
    ///     first.insert(key, key);
    ///     second.insert(9 - key, 9 - key);
    /// }
    /// assert_eq!(first.stringify(), second.stringify());
    /// ```
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        Self::with_hasher(SipPriority::with_keys(k0, k1))
    }
}

impl<T, U, S> TreapMap<T, U, S> {
    /// Constructs a new, empty `TreapMap<T, U, S>` that derives priorities with `hasher`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::{SipPriority, TreapMap};
    ///
    /// let mut map = TreapMap::with_hasher(SipPriority::with_keys(0, 0));
    /// map.insert("a", 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// ```
    pub fn with_hasher(hasher: S) -> Self {
        TreapMap {
            root: None,
            size: 0,
            hasher,
        }
    }

    /// Returns a reference to the hasher used to derive priorities.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, only its
    /// value is replaced and the old value is returned. The position and priority of an existing
    /// key never change.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// assert_eq!(map.size(), 1);
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<U>
    where
        T: Hash + Ord,
        S: BuildHasher,
    {
        let TreapMap {
            ref mut root,
            ref mut size,
            ref hasher,
        } = self;
        let priority = priority::priority(hasher, &key);
        let new_node = Node::new(key, value, priority);
        let ret = tree::insert(root, new_node);
        if ret.is_none() {
            *size += 1;
        }
        ret
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let TreapMap {
            ref mut root,
            ref mut size,
            ..
        } = self;
        tree::remove(root, key).map(|entry| {
            *size -= 1;
            let Entry { key, value } = entry;
            (key, value)
        })
    }

    /// Removes a key from the map and returns `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// assert!(!map.delete(&1));
    /// map.insert(1, 1);
    /// assert!(map.delete(&1));
    /// assert!(map.is_empty());
    /// ```
    pub fn delete<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.root, key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.root, key).map(|entry| &mut entry.value)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.size(), 1);
    /// ```
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing treap of {} entries", self.size);
        self.root = None;
        self.size = 0;
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root).map(|entry| &entry.key)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        tree::height(&self.root)
    }

    /// Renders the structure of the tree for debugging. Each node is written as
    /// `{key , value}(left)(right)` and an empty tree is the empty string. The format is not
    /// stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.stringify(), "");
    /// map.insert(1, 'a');
    /// assert_eq!(map.stringify(), "{1 , a}()()");
    /// ```
    pub fn stringify(&self) -> String
    where
        T: Display,
        U: Display,
    {
        let mut ret = String::new();
        tree::stringify(&self.root, &mut ret).expect("Writing to a `String` cannot fail.");
        ret
    }

    /// Returns `true` if no node has a higher priority than either of its children.
    pub fn is_heap(&self) -> bool {
        tree::is_heap(&self.root)
    }

    /// Returns `true` if every key is greater than all keys in its left subtree and less than all
    /// keys in its right subtree.
    pub fn is_bst(&self) -> bool
    where
        T: Ord,
    {
        tree::is_bst(&self.root, None, None)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapMapIter<'_, T, U> {
        TreapMapIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashed_treap::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (_, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> TreapMapIterMut<'_, T, U> {
        TreapMapIterMut {
            current: self.root.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }
}

impl<T, U, S> IntoIterator for TreapMap<T, U, S> {
    type IntoIter = TreapMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U, S> IntoIterator for &'a TreapMap<T, U, S>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = TreapMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U, S> IntoIterator for &'a mut TreapMap<T, U, S>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = TreapMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `TreapMap<T, U, S>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct TreapMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for TreapMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `TreapMap<T, U, S>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T, U> Iterator for TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

type BorrowedIterEntryMut<'a, T, U> = (&'a mut Entry<T, U>, BorrowedTreeMut<'a, T, U>);
type BorrowedTreeMut<'a, T, U> = Option<&'a mut Node<T, U>>;

/// A mutable iterator for `TreapMap<T, U, S>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct TreapMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    current: BorrowedTreeMut<'a, T, U>,
    stack: Vec<BorrowedIterEntryMut<'a, T, U>>,
}

impl<'a, T, U> Iterator for TreapMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        let TreapMapIterMut {
            ref mut current,
            ref mut stack,
        } = self;
        while let Some(node) = current.take() {
            let Node {
                entry, left, right, ..
            } = node;
            *current = left.as_mut().map(|node| &mut **node);
            stack.push((entry, right.as_mut().map(|node| &mut **node)));
        }
        stack.pop().map(|(entry, right)| {
            *current = right;
            let Entry { key, value } = entry;
            (&*key, value)
        })
    }
}

impl<T, U> Default for TreapMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, S> Extend<(T, U)> for TreapMap<T, U, S>
where
    T: Hash + Ord,
    S: BuildHasher,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U, S> FromIterator<(T, U)> for TreapMap<T, U, S>
where
    T: Hash + Ord,
    S: BuildHasher + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<T, U, S> Debug for TreapMap<T, U, S>
where
    T: Debug,
    U: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, S, V> Index<&'a V> for TreapMap<T, U, S>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, S, V> IndexMut<&'a V> for TreapMap<T, U, S>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

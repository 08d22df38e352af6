use crate::avl_tree::balanced_tree::{BalancedTree, Cursor, IntoIter, Iter};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::result;

/// An ordered set of unique values implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one.
///
/// # Examples
/// ```
/// use extended_containers::avl_tree::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// set.insert(0);
/// set.insert(3);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.get(set.lower_bound(&2)), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T> {
    tree: BalancedTree<T>,
}

impl<T> OrderedSet<T> {
    /// Constructs a new, empty `OrderedSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let set: OrderedSet<u32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        OrderedSet {
            tree: BalancedTree::new(false),
        }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of elements the set could hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets.
    pub fn swap(&mut self, other: &mut OrderedSet<T>) {
        mem::swap(self, other);
    }

    /// Returns the minimum value of the set, or `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum value of the set, or `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns a cursor at the smallest value, or the end cursor if the set is empty.
    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    /// Returns the past-the-end cursor.
    pub fn end(&self) -> Cursor {
        self.tree.end()
    }

    /// Returns the cursor following `cursor` in ascending order.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.next(cursor)
    }

    /// Returns the cursor preceding `cursor` in ascending order.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.prev(cursor)
    }

    /// Returns the value at `cursor`, or `None` for the end cursor.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.tree.get(cursor)
    }

    /// Removes the value at `cursor` and returns it.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(1);
    /// let cursor = set.find(&1);
    /// assert_eq!(set.erase(cursor), Some(1));
    /// assert!(set.is_empty());
    /// ```
    pub fn erase(&mut self, cursor: Cursor) -> Option<T> {
        self.tree.remove_at(cursor)
    }

    /// Returns an iterator over the set. The iterator yields the values in ascending order.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> OrderedSetIter<T> {
        OrderedSetIter {
            inner: self.tree.iter(),
        }
    }

    /// Writes the values of the underlying tree in root-left-right order, for debugging.
    pub fn show<W>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Debug,
        W: fmt::Write,
    {
        self.tree.print(out)
    }
}

impl<T> OrderedSet<T>
where
    T: Ord,
{
    /// Inserts a value into the set. Returns a cursor at the value and `true` if it was
    /// inserted, or a cursor at the equal value already present and `false`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert!(set.insert(1).1);
    /// assert!(!set.insert(1).1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        self.tree.insert(value)
    }

    /// Inserts every value of `iter` in order and returns the result of each insert.
    pub fn insert_many<I>(&mut self, iter: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().map(|value| self.insert(value)).collect()
    }

    /// Removes a value from the set, returning it if it was present.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value)
    }

    /// Returns a cursor at `value`, or the end cursor if it is absent.
    pub fn find(&self, value: &T) -> Cursor {
        self.tree.find(value)
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.tree.include(value)
    }

    /// Returns a cursor at the first value not less than `value`.
    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.tree.lower_bound(value)
    }

    /// Returns a cursor at the first value greater than `value`.
    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.tree.upper_bound(value)
    }

    /// Moves every value of `other` into the set, leaving `other` empty. Values already present
    /// in the set are dropped.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedSet;
    ///
    /// let mut set: OrderedSet<u32> = vec![1, 3].into_iter().collect();
    /// let mut other: OrderedSet<u32> = vec![2, 3].into_iter().collect();
    /// set.merge(&mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn merge(&mut self, other: &mut OrderedSet<T>) {
        for value in other.tree.take() {
            self.tree.insert(value);
        }
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OrderedSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for OrderedSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &OrderedSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for OrderedSet<T> where T: Eq {}

impl<T> Extend<T> for OrderedSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type IntoIter = OrderedSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T>
where
    T: 'a,
{
    type IntoIter = OrderedSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `OrderedSet<T>`.
///
/// This iterator traverses the elements of the set in ascending order and yields owned values.
pub struct OrderedSetIntoIter<T> {
    inner: IntoIter<T>,
}

impl<T> Iterator for OrderedSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator for `OrderedSet<T>`.
///
/// This iterator traverses the elements of the set in ascending order and yields immutable
/// references.
pub struct OrderedSetIter<'a, T>
where
    T: 'a,
{
    inner: Iter<'a, T>,
}

impl<'a, T> Iterator for OrderedSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, T> DoubleEndedIterator for OrderedSetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> Serialize for OrderedSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for OrderedSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}

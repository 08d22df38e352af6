use crate::avl_tree::balanced_tree::{BalancedTree, Cursor, IntoIter, Iter};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::result;

/// An ordered multiset implemented using an avl tree.
///
/// Equal values are all kept. A value is placed after every equal value already in the
/// multiset, so equal values iterate in insertion order.
///
/// # Examples
/// ```
/// use extended_containers::avl_tree::OrderedMultiset;
///
/// let mut multiset = OrderedMultiset::new();
/// multiset.insert(10);
/// multiset.insert(20);
/// multiset.insert(10);
/// multiset.insert(30);
///
/// assert_eq!(multiset.count(&10), 2);
/// assert_eq!(multiset.iter().collect::<Vec<&u32>>(), vec![&10, &10, &20, &30]);
/// ```
#[derive(Clone)]
pub struct OrderedMultiset<T> {
    tree: BalancedTree<T>,
}

impl<T> OrderedMultiset<T> {
    /// Constructs a new, empty `OrderedMultiset<T>`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = OrderedMultiset::new();
    /// ```
    pub fn new() -> Self {
        OrderedMultiset {
            tree: BalancedTree::new(true),
        }
    }

    /// Returns the number of values in the multiset, counting each copy.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let mut multiset = OrderedMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset holds no values.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let mut multiset = OrderedMultiset::new();
    /// assert!(multiset.is_empty());
    /// multiset.insert(1);
    /// assert!(!multiset.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of values the multiset can address.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Removes every value from the multiset.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let mut multiset = OrderedMultiset::new();
    /// multiset.insert(1);
    /// multiset.clear();
    /// assert!(multiset.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two multisets.
    pub fn swap(&mut self, other: &mut OrderedMultiset<T>) {
        mem::swap(self, other);
    }

    /// Returns the smallest value, or `None` if the multiset is empty.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(multiset.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the largest value, or `None` if the multiset is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns a cursor at the smallest value, or the end cursor if the multiset is empty.
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

    /// Returns the cursor preceding `cursor`. Stepping back from the end cursor reaches the
    /// largest value.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.prev(cursor)
    }

    /// Returns the value at `cursor`, or `None` for the end cursor.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![1, 2].into_iter().collect();
    /// assert_eq!(multiset.get(multiset.begin()), Some(&1));
    /// assert_eq!(multiset.get(multiset.end()), None);
    /// ```
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.tree.get(cursor)
    }

    /// Removes the value at `cursor` and returns it. Other values equal to it are kept.
    pub fn erase(&mut self, cursor: Cursor) -> Option<T> {
        self.tree.remove_at(cursor)
    }

    /// Returns an iterator over the multiset in ascending order.
    pub fn iter(&self) -> OrderedMultisetIter<T> {
        OrderedMultisetIter {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over the values from `from` up to but excluding `to`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![1, 2, 2, 3].into_iter().collect();
    /// let (from, to) = multiset.equal_range(&2);
    /// assert_eq!(multiset.range(from, to).count(), 2);
    /// ```
    pub fn range(&self, from: Cursor, to: Cursor) -> OrderedMultisetIter<T> {
        OrderedMultisetIter {
            inner: self.tree.iter_range(from, to),
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

impl<T> OrderedMultiset<T>
where
    T: Ord,
{
    /// Inserts a value into the multiset. The insert always succeeds, so the flag is always
    /// `true`.
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

    /// Removes one value equal to `value` and returns it.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let mut multiset: OrderedMultiset<u32> = vec![1, 1].into_iter().collect();
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert!(multiset.contains(&1));
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value)
    }

    /// Returns a cursor at a value equal to `value`, or the end cursor if there is none.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![1, 2].into_iter().collect();
    /// assert_eq!(multiset.get(multiset.find(&2)), Some(&2));
    /// assert_eq!(multiset.find(&3), multiset.end());
    /// ```
    pub fn find(&self, value: &T) -> Cursor {
        self.tree.find(value)
    }

    /// Checks if a value equal to `value` exists in the multiset.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![1].into_iter().collect();
    /// assert!(multiset.contains(&1));
    /// assert!(!multiset.contains(&2));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.tree.include(value)
    }

    /// Returns the number of values equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.tree.count(value)
    }

    /// Returns a cursor at the first value not less than `value`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![1, 3, 3, 5].into_iter().collect();
    /// assert_eq!(multiset.get(multiset.lower_bound(&2)), Some(&3));
    /// assert_eq!(multiset.lower_bound(&6), multiset.end());
    /// ```
    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.tree.lower_bound(value)
    }

    /// Returns a cursor at the first value greater than `value`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMultiset;
    ///
    /// let multiset: OrderedMultiset<u32> = vec![1, 3, 3, 5].into_iter().collect();
    /// assert_eq!(multiset.get(multiset.upper_bound(&3)), Some(&5));
    /// ```
    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.tree.upper_bound(value)
    }

    /// Returns the half-open cursor range of the values equal to `value`. Both cursors are equal
    /// if there are none.
    pub fn equal_range(&self, value: &T) -> (Cursor, Cursor) {
        self.tree.equal_range(value)
    }

    /// Moves every value of `other` into the multiset, leaving `other` empty.
    pub fn merge(&mut self, other: &mut OrderedMultiset<T>) {
        for value in other.tree.take() {
            self.tree.insert(value);
        }
    }
}

impl<T> Default for OrderedMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OrderedMultiset<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for OrderedMultiset<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &OrderedMultiset<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for OrderedMultiset<T> where T: Eq {}

impl<T> Extend<T> for OrderedMultiset<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<T> FromIterator<T> for OrderedMultiset<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = OrderedMultiset::new();
        multiset.extend(iter);
        multiset
    }
}

impl<T> IntoIterator for OrderedMultiset<T> {
    type IntoIter = OrderedMultisetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedMultiset<T>
where
    T: 'a,
{
    type IntoIter = OrderedMultisetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `OrderedMultiset<T>`.
pub struct OrderedMultisetIntoIter<T> {
    inner: IntoIter<T>,
}

impl<T> Iterator for OrderedMultisetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An iterator for `OrderedMultiset<T>`.
pub struct OrderedMultisetIter<'a, T>
where
    T: 'a,
{
    inner: Iter<'a, T>,
}

impl<'a, T> Iterator for OrderedMultisetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, T> DoubleEndedIterator for OrderedMultisetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> Serialize for OrderedMultiset<T>
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

impl<'de, T> Deserialize<'de> for OrderedMultiset<T>
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

use crate::avl_tree::balanced_tree::{BalancedTree, Cursor, IntoIter, Iter};
use crate::avl_tree::pair::Pair;
use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;
use std::result;

fn key_order<K, V, Q>(pair: &Pair<K, V>, key: &Q) -> Ordering
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let probe: &Q = pair.key().borrow();
    probe.cmp(key)
}

/// An ordered map implemented using an avl tree.
///
/// Each entry is stored as a `Pair<K, V>` ordered by key alone. Keys are unique and can never be
/// changed in place; values can be read and written through the accessors.
///
/// # Examples
/// ```
/// use extended_containers::avl_tree::OrderedMap;
/// use extended_containers::Error;
///
/// let mut map = OrderedMap::new();
/// map.insert(1, String::from("a"));
/// map.insert(2, String::from("b"));
///
/// map.get_or_insert_default(3).push('c');
/// assert_eq!(map.len(), 3);
/// assert_eq!(map[&3], "c");
///
/// assert_eq!(map.at(&1), Ok(&String::from("a")));
/// assert_eq!(map.at(&99), Err(Error::KeyNotFound));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    tree: BalancedTree<Pair<K, V>>,
}

impl<K, V> OrderedMap<K, V> {
    /// Constructs a new, empty `OrderedMap<K, V>`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let map: OrderedMap<u32, u32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        OrderedMap {
            tree: BalancedTree::new(false),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the largest number of entries the map can address.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the map, removing all entries.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps.
    pub fn swap(&mut self, other: &mut OrderedMap<K, V>) {
        mem::swap(self, other);
    }

    /// Returns a cursor at the entry with the smallest key, or the end cursor if the map is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.get_pair(map.begin()).map(|pair| *pair.key()), Some(1));
    /// ```
    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    /// Returns the past-the-end cursor.
    pub fn end(&self) -> Cursor {
        self.tree.end()
    }

    /// Returns the cursor following `cursor` in key order.
    pub fn next(&self, cursor: Cursor) -> Cursor {
        self.tree.next(cursor)
    }

    /// Returns the cursor preceding `cursor` in key order.
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        self.tree.prev(cursor)
    }

    /// Returns the entry at `cursor`, or `None` for the end cursor.
    pub fn get_pair(&self, cursor: Cursor) -> Option<&Pair<K, V>> {
        self.tree.get(cursor)
    }

    /// Returns a mutable reference to the value at `cursor`.
    pub fn value_at_mut(&mut self, cursor: Cursor) -> Option<&mut V> {
        self.tree.value_mut(cursor).map(|pair| pair.value_mut())
    }

    /// Removes the entry at `cursor` and returns it.
    pub fn erase(&mut self, cursor: Cursor) -> Option<(K, V)> {
        self.tree.remove_at(cursor).map(Pair::into_inner)
    }

    /// Returns the entry with the minimum key, or `None` if the map is empty.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.tree.min().map(|pair| (pair.key(), pair.value()))
    }

    /// Returns the entry with the maximum key, or `None` if the map is empty.
    pub fn max(&self) -> Option<(&K, &V)> {
        self.tree.max().map(|pair| (pair.key(), pair.value()))
    }

    /// Returns an iterator over the map. The iterator yields the entries in ascending key order.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> OrderedMapIter<K, V> {
        OrderedMapIter {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    pub fn keys<'a>(&'a self) -> impl DoubleEndedIterator<Item = &'a K> + 'a {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map in ascending key order.
    pub fn values<'a>(&'a self) -> impl DoubleEndedIterator<Item = &'a V> + 'a {
        self.iter().map(|(_, value)| value)
    }

    /// Writes the entries of the underlying tree in root-left-right order, for debugging.
    pub fn show<W>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Debug,
        V: fmt::Debug,
        W: fmt::Write,
    {
        self.tree.print(out)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    fn find_entry<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find_by(|pair| key_order(pair, key))
    }

    /// Inserts a key-value pair into the map. If the key is already present, the map is left
    /// unchanged, the new pair is dropped and a cursor at the existing entry is returned with
    /// `false`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert(1, 1).1);
    /// assert!(!map.insert(1, 2).1);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        self.tree.insert(Pair::new(key, value))
    }

    /// Inserts a key-value pair into the map, replacing the value if the key is already present.
    /// Returns a cursor at the entry and `true` if a new entry was created.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert_or_assign(1, 1).1);
    /// assert!(!map.insert_or_assign(1, 2).1);
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Cursor, bool) {
        let cursor = self.find_entry(&key);
        match self.tree.value_mut(cursor) {
            Some(pair) => {
                *pair.value_mut() = value;
                (cursor, false)
            },
            None => self.insert(key, value),
        }
    }

    /// Inserts every pair of `iter` in order and returns the result of each insert.
    pub fn insert_many<I>(&mut self, iter: I) -> Vec<(Cursor, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        iter.into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// Removes a key from the map, returning the entry if the key was present.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let cursor = self.find_entry(key);
        self.erase(cursor)
    }

    /// Returns a cursor at the entry for `key`, or the end cursor if the key is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_entry(key)
    }

    /// Checks if a key exists in the map.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find_entry(key).is_end()
    }

    /// Returns an immutable reference to the value associated with a particular key, or `None`
    /// if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(self.find_entry(key)).map(Pair::value)
    }

    /// Returns a mutable reference to the value associated with a particular key, or `None` if
    /// the key is absent.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let cursor = self.find_entry(key);
        self.value_at_mut(cursor)
    }

    /// Returns an immutable reference to the value associated with a particular key, or
    /// `Error::KeyNotFound` if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    /// use extended_containers::Error;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.at(&1), Ok(&1));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key, or
    /// `Error::KeyNotFound` if the key is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with `key`, inserting the default
    /// value first if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// *map.get_or_insert_default(1) += 2;
    /// *map.get_or_insert_default(1) += 3;
    /// assert_eq!(map.get(&1), Some(&5));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let mut cursor = self.find_entry(&key);
        if cursor.is_end() {
            cursor = self.insert(key, V::default()).0;
        }
        match self.value_at_mut(cursor) {
            Some(value) => value,
            None => unreachable!(),
        }
    }

    /// Returns a cursor at the first entry whose key is not less than `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound_by(|pair| key_order(pair, key))
    }

    /// Returns a cursor at the first entry whose key is greater than `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.upper_bound_by(|pair| key_order(pair, key))
    }

    /// Moves every entry of `other` whose key is absent from the map into the map, leaving
    /// `other` empty. Entries whose key is already present keep their current value.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// let mut other = OrderedMap::new();
    /// other.insert(1, "x");
    /// other.insert(2, "b");
    ///
    /// map.merge(&mut other);
    /// assert!(other.is_empty());
    /// assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&1, &"a"), (&2, &"b")]);
    /// ```
    pub fn merge(&mut self, other: &mut OrderedMap<K, V>) {
        for pair in other.tree.take() {
            self.tree.insert(pair);
        }
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &OrderedMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<'a, K, V, Q> Index<&'a Q> for OrderedMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type IntoIter = OrderedMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = OrderedMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `OrderedMap<K, V>`.
///
/// This iterator traverses the entries of the map in ascending key order and yields owned
/// entries.
pub struct OrderedMapIntoIter<K, V> {
    inner: IntoIter<Pair<K, V>>,
}

impl<K, V> Iterator for OrderedMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Pair::into_inner)
    }
}

/// An iterator for `OrderedMap<K, V>`.
///
/// This iterator traverses the entries of the map in ascending key order and yields immutable
/// references.
pub struct OrderedMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    inner: Iter<'a, Pair<K, V>>,
}

impl<'a, K, V> Iterator for OrderedMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| (pair.key(), pair.value()))
    }
}

impl<'a, K, V> DoubleEndedIterator for OrderedMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|pair| (pair.key(), pair.value()))
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V> {
    marker: PhantomData<OrderedMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert_or_assign(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use crate::error::Error;
    use serde_test::{assert_tokens, Token};

    fn sample() -> OrderedMap<u32, String> {
        let mut map = OrderedMap::new();
        map.insert(1, String::from("a"));
        map.insert(2, String::from("b"));
        map
    }

    #[test]
    fn test_len_empty() {
        let map: OrderedMap<u32, u32> = OrderedMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.min(), None);
    }

    #[test]
    fn test_get_or_insert_default_grows_map() {
        let mut map = sample();
        assert_eq!(map.get_or_insert_default(3).as_str(), "");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_or_insert_default(1).as_str(), "a");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_at_missing_key() {
        let mut map = sample();
        assert_eq!(map.at(&99), Err(Error::KeyNotFound));
        assert!(map.at(&99).unwrap_err().is_out_of_range());
        assert_eq!(map.at_mut(&99), Err(Error::KeyNotFound));
        map.at_mut(&2).unwrap().push('c');
        assert_eq!(map.at(&2), Ok(&String::from("bc")));
    }

    #[test]
    #[should_panic]
    fn test_index_missing_key() {
        let map = sample();
        let _ = &map[&3];
    }

    #[test]
    fn test_insert_does_not_overwrite() {
        let mut map = sample();
        let (cursor, inserted) = map.insert(1, String::from("z"));
        assert!(!inserted);
        assert_eq!(map.get_pair(cursor).map(|pair| pair.value().as_str()), Some("a"));
    }

    #[test]
    fn test_insert_or_assign() {
        let mut map = sample();
        assert!(!map.insert_or_assign(1, String::from("z")).1);
        assert!(map.insert_or_assign(5, String::from("e")).1);
        assert_eq!(map[&1], "z");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_remove_and_erase() {
        let mut map = sample();
        assert_eq!(map.remove(&1), Some((1, String::from("a"))));
        assert!(!map.contains(&1));
        let cursor = map.find(&2);
        assert_eq!(map.erase(cursor), Some((2, String::from("b"))));
        assert!(map.is_empty());
        assert_eq!(map.remove(&2), None);
    }

    #[test]
    fn test_merge_keeps_existing_values() {
        let mut map = sample();
        let mut other = OrderedMap::new();
        other.insert(2, String::from("x"));
        other.insert(3, String::from("c"));
        map.merge(&mut other);
        assert!(other.is_empty());
        assert_eq!(
            map.values().map(String::as_str).collect::<Vec<&str>>(),
            vec!["a", "b", "c"],
        );
    }

    #[test]
    fn test_insert_many() {
        let mut map = OrderedMap::new();
        let results = map.insert_many(vec![(1, 1), (2, 2), (1, 3)]);
        assert_eq!(
            results.iter().map(|result| result.1).collect::<Vec<bool>>(),
            vec![true, true, false],
        );
        assert_eq!(results[0].0, results[2].0);
    }

    #[test]
    fn test_bounds_and_navigation() {
        let map: OrderedMap<u32, u32> = vec![(1, 10), (3, 30), (5, 50)].into_iter().collect();
        let cursor = map.lower_bound(&2);
        assert_eq!(map.get_pair(cursor).map(|pair| *pair.key()), Some(3));
        assert_eq!(map.get_pair(map.next(cursor)).map(|pair| *pair.key()), Some(5));
        assert_eq!(map.upper_bound(&5), map.end());
        assert_eq!(map.keys().rev().cloned().collect::<Vec<u32>>(), vec![5, 3, 1]);
    }

    #[test]
    fn test_value_at_mut() {
        let mut map: OrderedMap<u32, u32> = vec![(1, 10)].into_iter().collect();
        let cursor = map.begin();
        if let Some(value) = map.value_at_mut(cursor) {
            *value += 1;
        }
        assert_eq!(map.get(&1), Some(&11));
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut map = OrderedMap::new();
        map.insert(String::from("key"), 1);
        assert_eq!(map.get("key"), Some(&1));
        assert!(map.contains("key"));
        assert_eq!(map["key"], 1);
    }

    #[test]
    fn test_clone_isolated() {
        let mut map = sample();
        let copy = map.clone();
        map.get_or_insert_default(9);
        assert_eq!(copy.len(), 2);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_debug() {
        let map: OrderedMap<u32, u32> = vec![(2, 20), (1, 10)].into_iter().collect();
        assert_eq!(format!("{:?}", map), "{1: 10, 2: 20}");
    }

    #[test]
    fn test_serde_tokens() {
        let map: OrderedMap<u32, u32> = vec![(2, 20), (1, 10)].into_iter().collect();
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::U32(10),
                Token::U32(2),
                Token::U32(20),
                Token::MapEnd,
            ],
        );
    }
}

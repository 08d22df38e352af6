use crate::arena::{Entry, TypedArena};
use crate::avl_tree::node::Node;
use crate::avl_tree::tree::{self, Arena};
use crate::error::{Error, Result};
use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;
use std::mem;

/// The maximum number of nodes held by one arena chunk of a tree built by `BalancedTree::new`.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// A position in a `BalancedTree<T>`.
///
/// `At` names a node. `End` is the position one past the maximum and remembers the maximum node
/// at the time it was produced, so stepping back from it yields that node. All `End` cursors
/// compare equal. A cursor is a plain handle: it never borrows the tree and it is invalidated
/// when the node it names is removed.
#[derive(Clone, Copy, Debug)]
pub enum Cursor {
    At(Entry),
    End(Option<Entry>),
}

impl Cursor {
    /// Returns `true` if the cursor is past the last element.
    pub fn is_end(&self) -> bool {
        match self {
            Cursor::End(_) => true,
            Cursor::At(_) => false,
        }
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Cursor) -> bool {
        match (self, other) {
            (Cursor::At(a), Cursor::At(b)) => a == b,
            (Cursor::End(_), Cursor::End(_)) => true,
            _ => false,
        }
    }
}

impl Eq for Cursor {}

/// An ordered container implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Nodes live in a
/// `TypedArena` and link to their children and parent through arena handles, which lets the
/// tree walk to a node's in-order successor or predecessor without an auxiliary stack.
///
/// Whether equal values may coexist is fixed when the tree is constructed. When they may, a new
/// value is placed after every equal value already present, so equal values iterate in insertion
/// order.
///
/// # Examples
/// ```
/// use extended_containers::avl_tree::BalancedTree;
///
/// let mut tree = BalancedTree::new(false);
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
///
/// assert_eq!(tree.top(), Ok(&20));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&10, &20, &30]);
/// ```
#[derive(Clone)]
pub struct BalancedTree<T> {
    arena: Arena<T>,
    root: Option<Entry>,
    allow_duplicates: bool,
}

impl<T> BalancedTree<T> {
    /// Constructs a new, empty `BalancedTree<T>`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let tree: BalancedTree<u32> = BalancedTree::new(true);
    /// assert!(tree.allows_duplicates());
    /// ```
    pub fn new(allow_duplicates: bool) -> Self {
        Self::with_chunk_size(allow_duplicates, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `BalancedTree<T>` whose arena holds at most `chunk_size` nodes per
    /// chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(allow_duplicates: bool, chunk_size: usize) -> Self {
        BalancedTree {
            arena: TypedArena::new(chunk_size),
            root: None,
            allow_duplicates,
        }
    }

    /// Returns `true` if the tree keeps equal values.
    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let tree = BalancedTree::with_value(1, false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the largest number of elements the tree could address.
    pub fn max_size(&self) -> usize {
        usize::max_value() / cmp::max(mem::size_of::<Node<T>>(), 1)
    }

    /// Removes every element from the tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Moves the contents out of the tree, leaving an empty tree with the same duplicate policy
    /// and chunk size behind.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::with_value(1, true);
    /// let moved = tree.take();
    /// assert!(tree.is_empty());
    /// assert_eq!(moved.len(), 1);
    /// ```
    pub fn take(&mut self) -> Self {
        let empty = Self::with_chunk_size(self.allow_duplicates, self.arena.chunk_size());
        mem::replace(self, empty)
    }

    /// Returns the value stored at the root of the tree, or `Error::Empty` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    /// use extended_containers::Error;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// assert_eq!(tree.top(), Err(Error::Empty));
    /// tree.insert(1);
    /// assert_eq!(tree.top(), Ok(&1));
    /// ```
    pub fn top(&self) -> Result<&T> {
        match self.root {
            Some(root) => Ok(&self.arena[root].value),
            None => Err(Error::Empty),
        }
    }

    /// Returns the minimum value of the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[tree::min_node(&self.arena, root)].value)
    }

    /// Returns the maximum value of the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[tree::max_node(&self.arena, root)].value)
    }

    /// Returns a cursor at the minimum element, or the end cursor if the tree is empty.
    pub fn begin(&self) -> Cursor {
        match self.root {
            Some(root) => Cursor::At(tree::min_node(&self.arena, root)),
            None => Cursor::End(None),
        }
    }

    /// Returns the cursor one past the maximum element.
    pub fn end(&self) -> Cursor {
        Cursor::End(self.root.map(|root| tree::max_node(&self.arena, root)))
    }

    /// Returns the cursor after `cursor` in in-order. Advancing the end cursor yields the end
    /// cursor.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let cursor = tree.next(tree.begin());
    /// assert_eq!(tree.get(cursor), Some(&2));
    /// assert_eq!(tree.next(cursor), tree.end());
    /// ```
    pub fn next(&self, cursor: Cursor) -> Cursor {
        match cursor {
            Cursor::At(entry) => match tree::successor(&self.arena, entry) {
                Some(successor) => Cursor::At(successor),
                None => Cursor::End(Some(entry)),
            },
            end @ Cursor::End(_) => end,
        }
    }

    /// Returns the cursor before `cursor` in in-order. Stepping back from the end cursor yields
    /// the maximum; stepping back from the minimum stays at the minimum.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.get(tree.prev(tree.end())), Some(&2));
    /// assert_eq!(tree.prev(tree.begin()), tree.begin());
    /// ```
    pub fn prev(&self, cursor: Cursor) -> Cursor {
        match cursor {
            Cursor::At(entry) => match tree::predecessor(&self.arena, entry) {
                Some(predecessor) => Cursor::At(predecessor),
                None => Cursor::At(entry),
            },
            Cursor::End(Some(last)) => Cursor::At(last),
            Cursor::End(None) => Cursor::End(None),
        }
    }

    /// Returns the value at `cursor`, or `None` for the end cursor or a cursor whose node was
    /// removed.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        match cursor {
            Cursor::At(entry) => self.arena.get(&entry).map(|node| &node.value),
            Cursor::End(_) => None,
        }
    }

    // Callers must not change the ordering of the value.
    pub(crate) fn value_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        match cursor {
            Cursor::At(entry) => self.arena.get_mut(&entry).map(|node| &mut node.value),
            Cursor::End(_) => None,
        }
    }

    /// Removes the element at `cursor` and returns it. Returns `None` for the end cursor or a
    /// cursor whose node was already removed.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// let (cursor, _) = tree.insert(1);
    /// assert_eq!(tree.remove_at(cursor), Some(1));
    /// assert_eq!(tree.remove_at(tree.end()), None);
    /// ```
    pub fn remove_at(&mut self, cursor: Cursor) -> Option<T> {
        match cursor {
            Cursor::At(entry) if self.arena.get(&entry).is_some() => {
                Some(tree::remove(&mut self.arena, &mut self.root, entry))
            },
            _ => None,
        }
    }

    /// Returns a cursor at an element for which `f` returns `Ordering::Equal`, or the end cursor
    /// if there is none. `f` reports how an element is ordered relative to the target, like the
    /// comparator of `slice::binary_search_by`.
    pub fn find_by<F>(&self, f: F) -> Cursor
    where
        F: Fn(&T) -> Ordering,
    {
        match tree::find_by(&self.arena, self.root, |value| f(value).reverse()) {
            Some(entry) => Cursor::At(entry),
            None => self.end(),
        }
    }

    /// Returns the number of elements for which `f` returns `Ordering::Equal`.
    pub fn count_by<F>(&self, f: F) -> usize
    where
        F: Fn(&T) -> Ordering,
    {
        tree::count_by(&self.arena, self.root, &|value: &T| f(value).reverse())
    }

    /// Returns a cursor at the first element that is not ordered before the target.
    pub fn lower_bound_by<F>(&self, f: F) -> Cursor
    where
        F: Fn(&T) -> Ordering,
    {
        self.bound(|value| f(value) != Ordering::Less)
    }

    /// Returns a cursor at the first element that is ordered after the target.
    pub fn upper_bound_by<F>(&self, f: F) -> Cursor
    where
        F: Fn(&T) -> Ordering,
    {
        self.bound(|value| f(value) == Ordering::Greater)
    }

    fn bound<F>(&self, is_after: F) -> Cursor
    where
        F: Fn(&T) -> bool,
    {
        match tree::partition_point(&self.arena, self.root, is_after) {
            Some(entry) => Cursor::At(entry),
            None => self.end(),
        }
    }

    /// Returns an iterator over the tree. The iterator yields the elements in in-order.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next_back(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        self.iter_range(self.begin(), self.end())
    }

    /// Returns an iterator over the elements from `from` up to but excluding `to`. `to` must not
    /// precede `from`.
    pub fn iter_range(&self, from: Cursor, to: Cursor) -> Iter<T> {
        Iter {
            tree: self,
            front: from,
            back: to,
        }
    }

    /// Writes the values of the tree in root-left-right order. The output is meant for
    /// debugging; its format is not stable.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.insert(3);
    ///
    /// let mut out = String::new();
    /// tree.print(&mut out).unwrap();
    /// assert_eq!(out, "2 1 3 ");
    /// ```
    pub fn print<W>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Debug,
        W: fmt::Write,
    {
        tree::print(&self.arena, self.root, out)
    }
}

impl<T> BalancedTree<T>
where
    T: Ord,
{
    /// Constructs a tree holding a single value.
    pub fn with_value(value: T, allow_duplicates: bool) -> Self {
        let mut tree = Self::new(allow_duplicates);
        tree.insert(value);
        tree
    }

    /// Inserts a value into the tree. Returns a cursor at the inserted value and `true`, or, if
    /// the tree rejects duplicates and an equal value is present, a cursor at that value and
    /// `false`. A rejected value is dropped.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(false);
    /// let (first, inserted) = tree.insert(1);
    /// assert!(inserted);
    /// assert_eq!(tree.insert(1), (first, false));
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        let (entry, inserted) =
            tree::insert(&mut self.arena, &mut self.root, value, self.allow_duplicates);
        (Cursor::At(entry), inserted)
    }

    /// Removes one element equal to `value` and returns it, or `None` if there is none.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(true);
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert!(tree.include(&1));
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let cursor = self.find(value);
        self.remove_at(cursor)
    }

    /// Returns a cursor at an element equal to `value`, or the end cursor if there is none.
    pub fn find(&self, value: &T) -> Cursor {
        self.find_by(|probe| probe.cmp(value))
    }

    /// Checks if an element equal to `value` exists in the tree.
    pub fn include(&self, value: &T) -> bool {
        !self.find(value).is_end()
    }

    /// Returns the number of elements equal to `value`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new(true);
    /// tree.insert(10);
    /// tree.insert(20);
    /// tree.insert(10);
    /// assert_eq!(tree.count(&10), 2);
    /// assert_eq!(tree.count(&15), 0);
    /// ```
    pub fn count(&self, value: &T) -> usize {
        self.count_by(|probe| probe.cmp(value))
    }

    /// Returns a cursor at the first element not less than `value`.
    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.lower_bound_by(|probe| probe.cmp(value))
    }

    /// Returns a cursor at the first element greater than `value`.
    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.upper_bound_by(|probe| probe.cmp(value))
    }

    /// Returns the half-open cursor range holding every element equal to `value`.
    pub fn equal_range(&self, value: &T) -> (Cursor, Cursor) {
        (self.lower_bound(value), self.upper_bound(value))
    }
}

impl<T> Default for BalancedTree<T> {
    /// Constructs an empty tree that rejects duplicates.
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T> fmt::Debug for BalancedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for BalancedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for BalancedTree<T>
where
    T: Ord,
{
    /// Collects into a tree that rejects duplicates.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T> IntoIterator for BalancedTree<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            arena: self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BalancedTree<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BalancedTree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned values.
pub struct IntoIter<T> {
    arena: Arena<T>,
    current: Option<Entry>,
    stack: Vec<Entry>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.current {
            self.current = self.arena[entry].left;
            self.stack.push(entry);
        }
        self.stack.pop().map(|entry| {
            let Node { value, right, .. } = self.arena.free(&entry);
            self.current = right;
            value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.arena.len(), Some(self.arena.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator for `BalancedTree<T>`.
///
/// This iterator traverses the elements of the tree in-order from both ends and yields immutable
/// references.
pub struct Iter<'a, T>
where
    T: 'a,
{
    tree: &'a BalancedTree<T>,
    front: Cursor,
    back: Cursor,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let ret = self.tree.get(self.front);
        self.front = self.tree.next(self.front);
        ret
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back = self.tree.prev(self.back);
        self.tree.get(self.back)
    }
}

#[cfg(test)]
mod tests {
    use super::{BalancedTree, Cursor};
    use crate::avl_tree::tree::check_invariants;
    use crate::error::Error;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::collections::BTreeMap;

    fn check<T: Ord>(tree: &BalancedTree<T>) {
        assert_eq!(check_invariants(&tree.arena, tree.root), tree.len());
    }

    #[test]
    fn test_len_empty() {
        let tree: BalancedTree<u32> = BalancedTree::new(false);
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert_eq!(tree.top(), Err(Error::Empty));
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_ascending_inserts_rebalance() {
        let mut tree = BalancedTree::new(false);
        tree.insert(10);
        tree.insert(20);
        tree.insert(30);
        check(&tree);
        assert_eq!(tree.top(), Ok(&20));
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let mut tree = BalancedTree::new(true);
        for value in &[10, 20, 10, 30] {
            tree.insert(*value);
        }
        check(&tree);
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![10, 10, 20, 30]);
        assert_eq!(tree.count(&10), 2);
        assert_eq!(tree.count(&20), 1);
        assert_eq!(tree.count(&40), 0);
    }

    #[test]
    fn test_insert_unique_returns_existing() {
        let mut tree = BalancedTree::new(false);
        let (cursor, inserted) = tree.insert(5);
        assert!(inserted);
        let (again, inserted) = tree.insert(5);
        assert!(!inserted);
        assert_eq!(cursor, again);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_then_include() {
        let mut tree = BalancedTree::new(true);
        tree.insert(1);
        tree.insert(2);
        tree.insert(2);
        assert_eq!(tree.remove(&1), Some(1));
        assert!(!tree.include(&1));
        assert_eq!(tree.remove(&2), Some(2));
        assert!(tree.include(&2));
        assert_eq!(tree.remove(&3), None);
        check(&tree);
    }

    #[test]
    fn test_cursor_navigation() {
        let tree: BalancedTree<u32> = (1..=5).collect();
        let mut cursor = tree.begin();
        let mut values = Vec::new();
        while cursor != tree.end() {
            values.push(*tree.get(cursor).unwrap());
            cursor = tree.next(cursor);
        }
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(tree.next(tree.end()), tree.end());
        assert_eq!(tree.get(tree.prev(tree.end())), Some(&5));
        assert_eq!(tree.prev(tree.begin()), tree.begin());
        assert_eq!(tree.get(tree.end()), None);
    }

    #[test]
    fn test_end_on_empty_tree() {
        let tree: BalancedTree<u32> = BalancedTree::new(false);
        assert_eq!(tree.prev(tree.end()), Cursor::End(None));
        assert_eq!(tree.iter().next_back(), None);
    }

    #[test]
    fn test_bounds() {
        let mut tree = BalancedTree::new(true);
        for value in &[1, 3, 3, 3, 5] {
            tree.insert(*value);
        }
        assert_eq!(tree.get(tree.lower_bound(&3)), Some(&3));
        assert_eq!(tree.get(tree.upper_bound(&3)), Some(&5));
        assert_eq!(tree.get(tree.lower_bound(&4)), Some(&5));
        assert_eq!(tree.upper_bound(&5), tree.end());
        let (from, to) = tree.equal_range(&3);
        assert_eq!(tree.iter_range(from, to).count(), 3);
        let (from, to) = tree.equal_range(&4);
        assert_eq!(from, to);
    }

    #[test]
    fn test_remove_at() {
        let mut tree: BalancedTree<u32> = (0..10).collect();
        let cursor = tree.find(&4);
        assert_eq!(tree.remove_at(cursor), Some(4));
        assert_eq!(tree.remove_at(cursor), None);
        assert_eq!(tree.remove_at(tree.end()), None);
        check(&tree);
        assert!(!tree.include(&4));
    }

    #[test]
    fn test_iter_double_ended() {
        let tree: BalancedTree<u32> = (0..6).collect();
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.collect::<Vec<&u32>>(), vec![&1, &2, &3]);
        assert_eq!(tree.iter().rev().cloned().collect::<Vec<u32>>(), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = BalancedTree::new(true);
        for value in &[3, 1, 2, 1] {
            tree.insert(*value);
        }
        let iter = tree.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<u32>>(), vec![1, 1, 2, 3]);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut tree: BalancedTree<u32> = (0..4).collect();
        let copy = tree.clone();
        tree.insert(10);
        tree.remove(&0);
        assert_eq!(copy.iter().cloned().collect::<Vec<u32>>(), vec![0, 1, 2, 3]);
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3, 10]);
    }

    #[test]
    fn test_take() {
        let mut tree = BalancedTree::with_value(1, true);
        let moved = tree.take();
        assert!(tree.is_empty());
        assert!(tree.allows_duplicates());
        assert_eq!(moved.iter().cloned().collect::<Vec<u32>>(), vec![1]);
    }

    #[test]
    fn test_max_size() {
        let tree: BalancedTree<u64> = BalancedTree::new(false);
        assert!(tree.max_size() > 0);
    }

    #[test]
    fn test_debug() {
        let tree: BalancedTree<u32> = (1..4).collect();
        assert_eq!(format!("{:?}", tree), "[1, 2, 3]");
    }

    #[test]
    fn test_drained_tree_releases_nodes() {
        let mut tree = BalancedTree::new(false);
        for value in 0..5000u32 {
            tree.insert(value);
        }
        for value in 0..5000u32 {
            assert_eq!(tree.remove(&value), Some(value));
        }
        assert!(tree.is_empty());
        assert!(tree.arena.is_empty());

        tree.insert(7);
        check(&tree);
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![7]);
    }

    #[test]
    fn test_random_against_btree_map() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = BalancedTree::with_chunk_size(true, 16);
        let mut expected: BTreeMap<u32, usize> = BTreeMap::new();

        for _ in 0..2000 {
            let value = rng.gen_range(0, 100);
            if rng.gen_weighted_bool(3) {
                let removed = tree.remove(&value);
                match expected.get_mut(&value) {
                    Some(count) => {
                        assert_eq!(removed, Some(value));
                        *count -= 1;
                    },
                    None => assert_eq!(removed, None),
                }
                if expected.get(&value) == Some(&0) {
                    expected.remove(&value);
                }
            } else {
                tree.insert(value);
                *expected.entry(value).or_insert(0) += 1;
            }
            check(&tree);
        }

        for (value, count) in &expected {
            assert_eq!(tree.count(value), *count);
        }
        let flattened: Vec<u32> = expected
            .iter()
            .flat_map(|(value, count)| ::std::iter::repeat(*value).take(*count))
            .collect();
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), flattened);
    }
}

use crate::error::Result;
use crate::list::linked_list::{IntoIter, Iter, LinkedList};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::result;

/// A last-in first-out stack backed by a `LinkedList<T>`.
///
/// The top of the stack is the back of the list.
///
/// # Examples
///
/// ```
/// use extended_containers::list::Stack;
///
/// let mut s = Stack::new();
///
/// s.push(0);
/// s.push(1);
/// assert_eq!(s.len(), 2);
///
/// assert_eq!(s.top(), Ok(&1));
/// assert_eq!(s.pop(), Some(1));
/// assert_eq!(s.pop(), Some(0));
/// assert!(s.top().is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stack<T> {
    list: LinkedList<T>,
}

impl<T> Stack<T> {
    /// Constructs a new, empty `Stack<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::list::Stack;
    ///
    /// let s: Stack<u32> = Stack::new();
    /// assert!(s.is_empty());
    /// ```
    pub fn new() -> Self {
        Stack {
            list: LinkedList::new(),
        }
    }

    /// Pushes an item onto the stack.
    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Pops the top item off the stack. Returns `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// Returns the top item of the stack, or `Error::Empty` if the stack is empty.
    pub fn top(&self) -> Result<&T> {
        self.list.back()
    }

    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.list.back_mut()
    }

    /// Pushes every item of `iter` in order, so the last item ends up on top.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::list::Stack;
    ///
    /// let mut s = Stack::new();
    /// s.insert_many_front(vec![1, 2, 3]);
    /// assert_eq!(s.pop(), Some(3));
    /// ```
    pub fn insert_many_front<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.list.insert_many_back(iter);
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn swap(&mut self, other: &mut Stack<T>) {
        mem::swap(self, other);
    }

    /// Returns an iterator over the stack from bottom to top.
    pub fn iter(&self) -> Iter<T> {
        self.list.iter()
    }
}

impl<T> fmt::Debug for Stack<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Stack<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<T> Serialize for Stack<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.list.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Stack<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        LinkedList::deserialize(deserializer).map(|list| Stack { list })
    }
}

#[cfg(test)]
mod tests {
    use super::Stack;
    use crate::error::Error;

    #[test]
    fn test_len_empty() {
        let s: Stack<u32> = Stack::new();
        assert_eq!(s.len(), 0);
        assert_eq!(s.top(), Err(Error::Empty));
    }

    #[test]
    fn test_lifo_order() {
        let mut s = Stack::new();
        for value in 0..5 {
            s.push(value);
        }
        let mut popped = Vec::new();
        while let Some(value) = s.pop() {
            popped.push(value);
        }
        assert_eq!(popped, vec![4, 3, 2, 1, 0]);
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn test_top_mut() {
        let mut s: Stack<u32> = vec![1, 2].into_iter().collect();
        *s.top_mut().unwrap() = 5;
        assert_eq!(s.top(), Ok(&5));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_insert_many_front() {
        let mut s = Stack::new();
        s.push(0);
        s.insert_many_front(vec![1, 2]);
        assert_eq!(s.iter().cloned().collect::<Vec<u32>>(), vec![0, 1, 2]);
        assert_eq!(s.top(), Ok(&2));
    }

    #[test]
    fn test_clone_and_swap() {
        let mut s: Stack<u32> = (0..3).collect();
        let copy = s.clone();
        let mut other = Stack::new();
        s.swap(&mut other);
        assert!(s.is_empty());
        assert_eq!(other, copy);
    }
}

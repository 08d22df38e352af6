use crate::error::Result;
use crate::list::linked_list::{IntoIter, Iter, LinkedList};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::result;

/// A first-in first-out queue backed by a `LinkedList<T>`.
///
/// Items are pushed at the back of the list and popped from the front.
///
/// # Examples
///
/// ```
/// use extended_containers::list::Queue;
///
/// let mut q = Queue::new();
/// q.push(0);
/// q.push(1);
///
/// assert_eq!(q.front(), Ok(&0));
/// assert_eq!(q.back(), Ok(&1));
/// assert_eq!(q.pop(), Some(0));
/// assert_eq!(q.pop(), Some(1));
/// assert_eq!(q.pop(), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Constructs a new, empty `Queue<T>`.
    pub fn new() -> Self {
        Queue {
            list: LinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Returns the oldest item, or `Error::Empty` if the queue is empty.
    pub fn front(&self) -> Result<&T> {
        self.list.front()
    }

    /// Returns the newest item, or `Error::Empty` if the queue is empty.
    pub fn back(&self) -> Result<&T> {
        self.list.back()
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.list.front_mut()
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.list.back_mut()
    }

    /// Pushes every item of `iter` in order.
    pub fn insert_many_back<I>(&mut self, iter: I)
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

    pub fn swap(&mut self, other: &mut Queue<T>) {
        mem::swap(self, other);
    }

    /// Returns an iterator over the queue from front to back.
    pub fn iter(&self) -> Iter<T> {
        self.list.iter()
    }
}

impl<T> fmt::Debug for Queue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Queue<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<T> Serialize for Queue<T>
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

impl<'de, T> Deserialize<'de> for Queue<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        LinkedList::deserialize(deserializer).map(|list| Queue { list })
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use crate::error::Error;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let q: Queue<u32> = Queue::new();
        assert_eq!(q.len(), 0);
        assert_eq!(q.front(), Err(Error::Empty));
        assert_eq!(q.back(), Err(Error::Empty));
    }

    #[test]
    fn test_fifo_order() {
        let mut q = Queue::new();
        q.insert_many_back(0..5);
        let mut popped = Vec::new();
        while let Some(value) = q.pop() {
            popped.push(value);
        }
        assert_eq!(popped, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_front_back_mut() {
        let mut q: Queue<u32> = (1..4).collect();
        *q.front_mut().unwrap() += 10;
        *q.back_mut().unwrap() += 10;
        assert_eq!(q.iter().cloned().collect::<Vec<u32>>(), vec![11, 2, 13]);
    }

    #[test]
    fn test_interleaved() {
        let mut q = Queue::new();
        q.push(1);
        q.push(2);
        assert_eq!(q.pop(), Some(1));
        q.push(3);
        assert_eq!(q.front(), Ok(&2));
        assert_eq!(q.back(), Ok(&3));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_serde_tokens() {
        let q: Queue<u32> = (1..3).collect();
        assert_tokens(
            &q,
            &[
                Token::Seq { len: Some(2) },
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }
}

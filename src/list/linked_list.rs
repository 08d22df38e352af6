use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::cmp;
use std::fmt;
use std::iter::{self, FromIterator};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use std::result;

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    prev: Link<T>,
    next: Link<T>,
}

impl<T> Node<T> {
    fn allocate(value: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            value,
            prev: None,
            next: None,
        });
        NonNull::from(Box::leak(node))
    }
}

// SAFETY: `link` must be `None` or point to a live node.
unsafe fn next_of<T>(link: Link<T>) -> Link<T> {
    link.and_then(|node| (*node.as_ptr()).next)
}

/// A doubly linked list without sentinel nodes.
///
/// An empty list has neither a head nor a tail. Every node is owned by exactly one list and is
/// freed when it is removed or when the list is dropped. Relinking operations (`splice`,
/// `merge`, `sort`) move nodes between lists without allocating.
///
/// # Examples
/// ```
/// use extended_containers::list::LinkedList;
///
/// let mut list: LinkedList<u32> = vec![3, 1, 2].into_iter().collect();
/// list.sort();
/// list.push_front(0);
///
/// assert_eq!(list.len(), 4);
/// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&0, &1, &2, &3]);
/// assert_eq!(list.back(), Ok(&3));
/// ```
pub struct LinkedList<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedList<T> {
    /// Constructs a new, empty `LinkedList<T>`.
    pub fn new() -> Self {
        LinkedList {
            head: None,
            tail: None,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the largest number of elements the list could address.
    pub fn max_size(&self) -> usize {
        usize::max_value() / cmp::max(mem::size_of::<Node<T>>(), 1)
    }

    /// Removes every element from the list.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Exchanges the contents of two lists.
    pub fn swap(&mut self, other: &mut LinkedList<T>) {
        mem::swap(self, other);
    }

    // Detaches every node, leaving the list empty without freeing anything.
    fn detach(&mut self) -> (Link<T>, Link<T>, usize) {
        let ret = (self.head, self.tail, self.len);
        self.head = None;
        self.tail = None;
        self.len = 0;
        ret
    }

    // Returns the node at `index`, walking from the nearer end. `index == len` yields `None`.
    fn node_at(&self, index: usize) -> Link<T> {
        if index >= self.len {
            return None;
        }
        // SAFETY: every link reached from `head` or `tail` within `len` steps is a live node owned
        // by this list.
        unsafe {
            if index <= self.len / 2 {
                let mut curr = self.head;
                for _ in 0..index {
                    curr = next_of(curr);
                }
                curr
            } else {
                let mut curr = self.tail;
                for _ in 0..self.len - 1 - index {
                    curr = curr.and_then(|node| (*node.as_ptr()).prev);
                }
                curr
            }
        }
    }

    // Links the chain `first..=last` of `count` nodes before `at`, or at the back if `at` is
    // `None`.
    //
    // SAFETY: `at` must be `None` or a node of this list, and the chain must be owned by no list.
    unsafe fn link_chain_before(
        &mut self,
        at: Link<T>,
        first: NonNull<Node<T>>,
        last: NonNull<Node<T>>,
        count: usize,
    ) {
        let prev = match at {
            Some(at) => (*at.as_ptr()).prev,
            None => self.tail,
        };
        (*first.as_ptr()).prev = prev;
        (*last.as_ptr()).next = at;
        match prev {
            Some(prev) => (*prev.as_ptr()).next = Some(first),
            None => self.head = Some(first),
        }
        match at {
            Some(at) => (*at.as_ptr()).prev = Some(last),
            None => self.tail = Some(last),
        }
        self.len += count;
    }

    // SAFETY: `node` must be a node of this list.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        let mut boxed = Box::from_raw(node.as_ptr());
        match boxed.prev {
            Some(prev) => (*prev.as_ptr()).next = boxed.next,
            None => self.head = boxed.next,
        }
        match boxed.next {
            Some(next) => (*next.as_ptr()).prev = boxed.prev,
            None => self.tail = boxed.prev,
        }
        boxed.prev = None;
        boxed.next = None;
        self.len -= 1;
        boxed
    }

    fn link_value_before(&mut self, at: Link<T>, value: T) -> NonNull<Node<T>> {
        let node = Node::allocate(value);
        // SAFETY: `node` was just allocated and belongs to no list.
        unsafe { self.link_chain_before(at, node, node, 1) };
        node
    }

    /// Returns the first element, or `Error::Empty` if the list is empty.
    pub fn front(&self) -> Result<&T> {
        // SAFETY: `head` is a live node owned by this list and the borrow is tied to `&self`.
        self.head
            .map(|node| unsafe { &(*node.as_ptr()).value })
            .ok_or(Error::Empty)
    }

    /// Returns the last element, or `Error::Empty` if the list is empty.
    pub fn back(&self) -> Result<&T> {
        // SAFETY: `tail` is a live node owned by this list and the borrow is tied to `&self`.
        self.tail
            .map(|node| unsafe { &(*node.as_ptr()).value })
            .ok_or(Error::Empty)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        // SAFETY: `head` is a live node owned by this list and the borrow is tied to `&mut self`.
        self.head
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
            .ok_or(Error::Empty)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        // SAFETY: `tail` is a live node owned by this list and the borrow is tied to `&mut self`.
        self.tail
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
            .ok_or(Error::Empty)
    }

    /// Prepends an element to the list.
    pub fn push_front(&mut self, value: T) {
        let head = self.head;
        self.link_value_before(head, value);
    }

    /// Appends an element to the list.
    pub fn push_back(&mut self, value: T) {
        self.link_value_before(None, value);
    }

    /// Removes the first element and returns it, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        // SAFETY: `head` is a node of this list.
        self.head
            .map(|node| unsafe { self.unlink(node).value })
    }

    /// Removes the last element and returns it, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        // SAFETY: `tail` is a node of this list.
        self.tail
            .map(|node| unsafe { self.unlink(node).value })
    }

    /// Inserts `value` before the element at `index`. `index` may equal the length.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![1, 3].into_iter().collect();
    /// list.insert(1, 2).unwrap();
    /// assert!(list.insert(4, 4).is_err());
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.check_insert_index(index)?;
        let at = self.node_at(index);
        self.link_value_before(at, value);
        Ok(())
    }

    /// Removes the element at `index` and returns it.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        match self.node_at(index) {
            // SAFETY: `node_at` only returns nodes of this list.
            Some(node) => Ok(unsafe { self.unlink(node).value }),
            None => Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            }),
        }
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index > self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Moves every element of `other` before the element at `index`, leaving `other` empty. The
    /// nodes are relinked in constant time once the position is found.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![1, 4].into_iter().collect();
    /// let mut other: LinkedList<u32> = vec![2, 3].into_iter().collect();
    /// list.splice(1, &mut other).unwrap();
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4]);
    /// ```
    pub fn splice(&mut self, index: usize, other: &mut LinkedList<T>) -> Result<()> {
        self.check_insert_index(index)?;
        let at = self.node_at(index);
        self.splice_before(at, other);
        Ok(())
    }

    fn splice_before(&mut self, at: Link<T>, other: &mut LinkedList<T>) {
        if let (Some(first), Some(last), count) = other.detach() {
            debug!("splicing {} nodes into a list of {}", count, self.len);
            // SAFETY: the detached chain is owned by no list and `at` is a node of this list.
            unsafe { self.link_chain_before(at, first, last, count) };
        }
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        let mut curr = self.head;
        while let Some(node) = curr {
            // SAFETY: `node` is a live node of this list; only its own links are changed.
            unsafe {
                let node = &mut *node.as_ptr();
                mem::swap(&mut node.prev, &mut node.next);
                curr = node.prev;
            }
        }
        mem::swap(&mut self.head, &mut self.tail);
    }

    /// Returns an iterator over the list from front to back.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Returns an iterator over the list from front to back that yields mutable references.
    pub fn iter_mut(&mut self) -> IterMut<T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Returns a cursor at the front of the list. The cursor rests on the ghost position if the
    /// list is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<T> {
        CursorMut {
            current: self.head,
            list: self,
        }
    }

    /// Inserts every element of `iter` before the element at `index`, keeping their order.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![1, 5].into_iter().collect();
    /// list.insert_many(1, vec![2, 3, 4]).unwrap();
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4, &5]);
    /// ```
    pub fn insert_many<I>(&mut self, index: usize, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_insert_index(index)?;
        let mut values: LinkedList<T> = iter.into_iter().collect();
        self.splice(index, &mut values)
    }

    /// Appends every element of `iter` in order.
    pub fn insert_many_back<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_back(value);
        }
    }

    /// Pushes every element of `iter` to the front in turn, so they end up in reverse order.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![4].into_iter().collect();
    /// list.insert_many_front(vec![1, 2, 3]);
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1, &4]);
    /// ```
    pub fn insert_many_front<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_front(value);
        }
    }
}

impl<T> LinkedList<T>
where
    T: Default,
{
    /// Constructs a list holding `len` default values.
    pub fn with_len(len: usize) -> Self {
        iter::repeat_with(T::default).take(len).collect()
    }
}

impl<T> LinkedList<T>
where
    T: PartialEq,
{
    /// Removes every element equal to the element before it.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![1, 1, 2, 1, 1, 1].into_iter().collect();
    /// list.unique();
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &1]);
    /// ```
    pub fn unique(&mut self) {
        let mut prev = self.head;
        // SAFETY: `prev` and `curr` are live nodes of this list; `curr` is unlinked only after its
        // successor has been read.
        unsafe {
            let mut curr = next_of(prev);
            while let (Some(kept), Some(node)) = (prev, curr) {
                curr = (*node.as_ptr()).next;
                if (*node.as_ptr()).value == (*kept.as_ptr()).value {
                    self.unlink(node);
                } else {
                    prev = Some(node);
                }
            }
        }
    }
}

impl<T> LinkedList<T>
where
    T: Ord,
{
    /// Merges the sorted list `other` into this sorted list, leaving `other` empty. The merge is
    /// stable: an element of `other` is placed after every element of this list that it is equal
    /// to. No node is allocated or freed.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![1, 3, 5].into_iter().collect();
    /// let mut other: LinkedList<u32> = vec![2, 3, 6].into_iter().collect();
    /// list.merge(&mut other);
    ///
    /// assert!(other.is_empty());
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &3, &5, &6]);
    /// ```
    pub fn merge(&mut self, other: &mut LinkedList<T>) {
        let (mut right, _, right_len) = other.detach();
        let (mut left, _, left_len) = self.detach();
        debug!("merging lists of {} and {} nodes", left_len, right_len);

        let mut head: Link<T> = None;
        let mut tail: Link<T> = None;
        // SAFETY: `left` and `right` walk two detached chains; each node is read before it is
        // relinked onto the merged chain, which this list then owns.
        unsafe {
            loop {
                let chosen = match (left, right) {
                    (Some(l), Some(r)) => {
                        if (*r.as_ptr()).value < (*l.as_ptr()).value {
                            right = (*r.as_ptr()).next;
                            r
                        } else {
                            left = (*l.as_ptr()).next;
                            l
                        }
                    },
                    (Some(l), None) => {
                        left = (*l.as_ptr()).next;
                        l
                    },
                    (None, Some(r)) => {
                        right = (*r.as_ptr()).next;
                        r
                    },
                    (None, None) => break,
                };
                (*chosen.as_ptr()).prev = tail;
                match tail {
                    Some(tail) => (*tail.as_ptr()).next = Some(chosen),
                    None => head = Some(chosen),
                }
                tail = Some(chosen);
            }
            if let Some(tail) = tail {
                (*tail.as_ptr()).next = None;
            }
        }

        self.head = head;
        self.tail = tail;
        self.len = left_len + right_len;
    }

    /// Sorts the list in place. The sort is stable and relinks nodes without allocating.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::list::LinkedList;
    ///
    /// let mut list: LinkedList<u32> = vec![5, 1, 4, 2, 3].into_iter().collect();
    /// list.sort();
    /// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4, &5]);
    /// ```
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }
        debug!("sorting list of {} nodes", self.len);

        // Bottom-up merge sort over the `next` links: each pass merges adjacent runs of length
        // `run` into runs of length `2 * run`. `prev` links are rebuilt once at the end.
        //
        // SAFETY: every node visited belongs to this list; each pass reads a node's `next` before
        // appending that node to the output chain.
        unsafe {
            let mut list = self.head;
            let mut run = 1;
            loop {
                let mut p = list;
                let mut tail: Link<T> = None;
                list = None;
                let mut merges = 0;

                while p.is_some() {
                    merges += 1;
                    let mut q = p;
                    let mut p_len = 0;
                    while p_len < run && q.is_some() {
                        p_len += 1;
                        q = next_of(q);
                    }
                    let mut q_len = run;

                    loop {
                        let take_q = match (p_len > 0, q_len > 0 && q.is_some()) {
                            (false, false) => break,
                            (false, true) => true,
                            (true, false) => false,
                            (true, true) => match (p, q) {
                                (Some(p_node), Some(q_node)) => {
                                    (*q_node.as_ptr()).value < (*p_node.as_ptr()).value
                                },
                                _ => unreachable!(),
                            },
                        };
                        let chosen = if take_q {
                            let chosen = q;
                            q = next_of(q);
                            q_len -= 1;
                            chosen
                        } else {
                            let chosen = p;
                            p = next_of(p);
                            p_len -= 1;
                            chosen
                        };
                        if let Some(chosen) = chosen {
                            match tail {
                                Some(tail) => (*tail.as_ptr()).next = Some(chosen),
                                None => list = Some(chosen),
                            }
                            tail = Some(chosen);
                        }
                    }
                    p = q;
                }

                if let Some(tail) = tail {
                    (*tail.as_ptr()).next = None;
                }
                if merges <= 1 {
                    break;
                }
                run *= 2;
            }

            self.head = list;
            let mut prev: Link<T> = None;
            let mut curr = list;
            while let Some(node) = curr {
                (*node.as_ptr()).prev = prev;
                prev = Some(node);
                curr = (*node.as_ptr()).next;
            }
            self.tail = prev;
        }
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Clone for LinkedList<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LinkedList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for LinkedList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &LinkedList<T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for LinkedList<T> where T: Eq {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T>
where
    T: 'a,
{
    type IntoIter = IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `LinkedList<T>`.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator for `LinkedList<T>` that yields immutable references.
pub struct Iter<'a, T>
where
    T: 'a,
{
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len` bounds the walk to nodes of the borrowed list, which outlives `'a`.
        self.head.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len` bounds the walk to nodes of the borrowed list, which outlives `'a`.
        self.tail.map(|node| unsafe {
            let node = &*node.as_ptr();
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

/// An iterator for `LinkedList<T>` that yields mutable references.
pub struct IterMut<'a, T>
where
    T: 'a,
{
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T>
where
    T: 'a,
{
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len` bounds the walk so each node of the exclusively borrowed list is yielded
        // at most once.
        self.head.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.len -= 1;
            self.head = node.next;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `len` bounds the walk so each node of the exclusively borrowed list is yielded
        // at most once.
        self.tail.map(|node| unsafe {
            let node = &mut *node.as_ptr();
            self.len -= 1;
            self.tail = node.prev;
            &mut node.value
        })
    }
}

/// A cursor over a `LinkedList<T>` that can edit the list around its position.
///
/// Besides the elements, the cursor can rest on a "ghost" position between the back and the
/// front of the list. Moving forward from the back or backward from the front reaches the ghost.
pub struct CursorMut<'a, T>
where
    T: 'a,
{
    current: Link<T>,
    list: &'a mut LinkedList<T>,
}

impl<'a, T> CursorMut<'a, T>
where
    T: 'a,
{
    /// Returns the element at the cursor, or `None` on the ghost position.
    pub fn current(&mut self) -> Option<&mut T> {
        // SAFETY: `current` is a node of the exclusively borrowed list.
        self.current
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    pub fn move_next(&mut self) {
        self.current = match self.current {
            // SAFETY: `current` is a node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).next },
            None => self.list.head,
        };
    }

    pub fn move_prev(&mut self) {
        self.current = match self.current {
            // SAFETY: `current` is a node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).prev },
            None => self.list.tail,
        };
    }

    /// Inserts `value` before the cursor. On the ghost position the value goes to the back.
    pub fn insert_before(&mut self, value: T) {
        self.list.link_value_before(self.current, value);
    }

    /// Inserts `value` after the cursor. On the ghost position the value goes to the front.
    pub fn insert_after(&mut self, value: T) {
        let at = match self.current {
            // SAFETY: `current` is a node of the borrowed list.
            Some(node) => unsafe { (*node.as_ptr()).next },
            None => self.list.head,
        };
        self.list.link_value_before(at, value);
    }

    /// Removes the element at the cursor and returns it, moving the cursor to the next element.
    /// Returns `None` on the ghost position.
    pub fn remove_current(&mut self) -> Option<T> {
        self.current.map(|node| {
            // SAFETY: `current` is a node of the borrowed list; its successor is read before it is
            // freed.
            unsafe {
                self.current = (*node.as_ptr()).next;
                self.list.unlink(node).value
            }
        })
    }

    /// Moves every element of `other` before the cursor, leaving `other` empty.
    pub fn splice_before(&mut self, other: &mut LinkedList<T>) {
        self.list.splice_before(self.current, other);
    }
}

impl<T> Serialize for LinkedList<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for LinkedList<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}

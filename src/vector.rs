//! Contiguous growable array with an explicit doubling growth policy.

use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::cmp;
use std::fmt;
use std::iter::{self, FromIterator};
use std::mem;
use std::ops::{Index, IndexMut};
use std::result;
use std::slice;
use std::vec;

/// A contiguous growable array.
///
/// The array tracks its own capacity: when it is full, the capacity doubles (growing from zero
/// to one), so a sequence of pushes costs amortized constant time. Elements are stored in a
/// single buffer, and `insert` and `erase` shift the elements after the position.
///
/// # Examples
/// ```
/// use extended_containers::vector::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.push_back(1);
/// array.push_back(3);
/// array.insert(1, 2).unwrap();
///
/// assert_eq!(array.data(), &[1, 2, 3]);
/// assert_eq!(array.capacity(), 4);
/// assert!(array.at(3).is_err());
/// ```
pub struct DynamicArray<T> {
    buffer: Vec<T>,
    capacity: usize,
}

impl<T> DynamicArray<T> {
    /// Constructs a new, empty `DynamicArray<T>` with no capacity.
    pub fn new() -> Self {
        DynamicArray {
            buffer: Vec::new(),
            capacity: 0,
        }
    }

    /// Constructs a new, empty `DynamicArray<T>` able to hold `capacity` elements without
    /// growing. Returns `Error::CapacityExceeded` if `capacity` is larger than `max_size()`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::vector::DynamicArray;
    ///
    /// let array: DynamicArray<u32> = DynamicArray::with_capacity(10).unwrap();
    /// assert_eq!(array.capacity(), 10);
    /// assert!(DynamicArray::<u32>::with_capacity(usize::max_value()).is_err());
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut array = Self::new();
        array.reserve(capacity)?;
        Ok(array)
    }

    /// Returns the largest number of elements the array can hold.
    pub fn max_size(&self) -> usize {
        isize::max_value() as usize / cmp::max(mem::size_of::<T>(), 1)
    }

    /// Returns the number of elements in the array.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::vector::DynamicArray;
    ///
    /// let array: DynamicArray<u32> = vec![1, 2, 3].into();
    /// assert_eq!(array.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the number of elements the array can hold without growing.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ensures the array can hold `capacity` elements without growing. Returns
    /// `Error::CapacityExceeded` if `capacity` is larger than `max_size()`.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        let max = self.max_size();
        if capacity > max {
            return Err(Error::CapacityExceeded {
                requested: capacity,
                max,
            });
        }
        if capacity > self.capacity {
            self.reallocate(capacity);
        }
        Ok(())
    }

    /// Shrinks the capacity of the array to its length.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity > self.buffer.len() {
            debug!(
                "shrinking dynamic array from {} to {}",
                self.capacity,
                self.buffer.len(),
            );
            self.buffer.shrink_to_fit();
            self.capacity = self.buffer.len();
        }
    }

    fn reallocate(&mut self, capacity: usize) {
        debug!("growing dynamic array from {} to {}", self.capacity, capacity);
        let additional = capacity - self.buffer.len();
        self.buffer.reserve_exact(additional);
        self.capacity = capacity;
    }

    // Doubles the capacity until `additional` more elements fit.
    fn grow_for(&mut self, additional: usize) {
        let required = self.buffer.len() + additional;
        if required <= self.capacity {
            return;
        }
        let mut capacity = cmp::max(self.capacity, 1);
        while capacity < required {
            capacity = capacity.saturating_mul(2);
        }
        self.reallocate(cmp::min(capacity, self.max_size()));
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index > self.buffer.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.buffer.len(),
            });
        }
        Ok(())
    }

    /// Returns a reference to the element at `index`, or `Error::IndexOutOfRange` if `index` is
    /// not less than the length.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::vector::DynamicArray;
    /// use extended_containers::Error;
    ///
    /// let array: DynamicArray<u32> = vec![1, 2].into();
    /// assert_eq!(array.at(1), Ok(&2));
    /// assert_eq!(array.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.buffer.len();
        self.buffer
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`, or `Error::IndexOutOfRange` if
    /// `index` is not less than the length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.buffer.len();
        self.buffer
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns the first element, or `Error::Empty` if the array is empty.
    pub fn front(&self) -> Result<&T> {
        self.buffer.first().ok_or(Error::Empty)
    }

    /// Returns the last element, or `Error::Empty` if the array is empty.
    pub fn back(&self) -> Result<&T> {
        self.buffer.last().ok_or(Error::Empty)
    }

    /// Returns the elements as a slice.
    pub fn data(&self) -> &[T] {
        &self.buffer
    }

    /// Returns the elements as a mutable slice.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    /// Returns an iterator over the elements in order.
    pub fn iter(&self) -> slice::Iter<T> {
        self.buffer.iter()
    }

    /// Returns an iterator over mutable references to the elements in order.
    pub fn iter_mut(&mut self) -> slice::IterMut<T> {
        self.buffer.iter_mut()
    }

    /// Appends an element, doubling the capacity if the array is full.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::vector::DynamicArray;
    ///
    /// let mut array = DynamicArray::new();
    /// array.push_back(1);
    /// assert_eq!(array.back(), Ok(&1));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.grow_for(1);
        self.buffer.push(value);
    }

    /// Removes the last element and returns it, or `None` if the array is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.buffer.pop()
    }

    /// Inserts `value` before the element at `index`, shifting the following elements. `index`
    /// may equal the length. Returns the index of the inserted element.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        self.check_insert_index(index)?;
        self.grow_for(1);
        self.buffer.insert(index, value);
        Ok(index)
    }

    /// Inserts every element of `iter` before the element at `index`, keeping their order.
    /// Returns the index of the first inserted element.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::vector::DynamicArray;
    ///
    /// let mut array: DynamicArray<u32> = vec![1, 5].into();
    /// assert_eq!(array.insert_many(1, vec![2, 3, 4]), Ok(1));
    /// assert_eq!(array.data(), &[1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_many<I>(&mut self, index: usize, iter: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_insert_index(index)?;
        let values: Vec<T> = iter.into_iter().collect();
        self.grow_for(values.len());
        self.buffer.splice(index..index, values);
        Ok(index)
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

    /// Removes the element at `index`, shifting the following elements, and returns it.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        if index >= self.buffer.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.buffer.len(),
            });
        }
        Ok(self.buffer.remove(index))
    }

    /// Removes every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Exchanges the contents of two arrays.
    pub fn swap(&mut self, other: &mut DynamicArray<T>) {
        mem::swap(self, other);
    }
}

impl<T> DynamicArray<T>
where
    T: Default,
{
    /// Constructs an array holding `len` default values.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::vector::DynamicArray;
    ///
    /// let array: DynamicArray<u32> = DynamicArray::with_len(3);
    /// assert_eq!(array.data(), &[0, 0, 0]);
    /// ```
    pub fn with_len(len: usize) -> Self {
        iter::repeat_with(T::default).take(len).collect()
    }
}

impl<T> Clone for DynamicArray<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut buffer = Vec::with_capacity(self.capacity);
        buffer.extend(self.buffer.iter().cloned());
        DynamicArray {
            buffer,
            capacity: self.capacity,
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DynamicArray<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for DynamicArray<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &DynamicArray<T>) -> bool {
        self.buffer == other.buffer
    }
}

impl<T> Eq for DynamicArray<T> where T: Eq {}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.buffer[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.buffer[index]
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(buffer: Vec<T>) -> Self {
        let capacity = buffer.len();
        DynamicArray { buffer, capacity }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = DynamicArray::new();
        array.extend(iter);
        array
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type IntoIter = vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T>
where
    T: 'a,
{
    type IntoIter = slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T>
where
    T: 'a,
{
    type IntoIter = slice::IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Serialize for DynamicArray<T>
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

impl<'de, T> Deserialize<'de> for DynamicArray<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::deserialize(deserializer).map(DynamicArray::from)
    }
}

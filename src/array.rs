//! Fixed-size array with checked accessors.

use crate::error::{Error, Result};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::array;
use std::convert::TryFrom;
use std::mem;
use std::ops::{Index, IndexMut};
use std::result;
use std::slice;

/// An array holding exactly `N` elements.
///
/// # Examples
/// ```
/// use extended_containers::array::FixedArray;
/// use extended_containers::Error;
///
/// let mut array: FixedArray<u32, 3> = FixedArray::new();
/// array.fill(7);
/// *array.at_mut(1).unwrap() = 1;
///
/// assert_eq!(array.data(), &[7, 1, 7]);
/// assert_eq!(array.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FixedArray<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Returns `N`.
    pub fn len(&self) -> usize {
        N
    }

    /// Returns `true` if `N` is zero.
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns the number of elements the array holds, which never changes.
    pub fn max_size(&self) -> usize {
        N
    }

    /// Returns a reference to the element at `index`, or `Error::IndexOutOfRange` if `index` is
    /// not less than `N`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.data
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len: N })
    }

    /// Returns a mutable reference to the element at `index`, or `Error::IndexOutOfRange` if
    /// `index` is not less than `N`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.data
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len: N })
    }

    /// Returns the first element, or `Error::Empty` if `N` is zero.
    pub fn front(&self) -> Result<&T> {
        self.data.first().ok_or(Error::Empty)
    }

    /// Returns the last element, or `Error::Empty` if `N` is zero.
    pub fn back(&self) -> Result<&T> {
        self.data.last().ok_or(Error::Empty)
    }

    /// Returns the elements as a slice.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the elements as a mutable slice.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> slice::Iter<T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<T> {
        self.data.iter_mut()
    }

    /// Exchanges the contents of two arrays.
    pub fn swap(&mut self, other: &mut FixedArray<T, N>) {
        mem::swap(&mut self.data, &mut other.data);
    }

    /// Sets every element to a clone of `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }
}

impl<T, const N: usize> FixedArray<T, N>
where
    T: Default,
{
    /// Constructs an array of default values.
    pub fn new() -> Self {
        FixedArray {
            data: array::from_fn(|_| T::default()),
        }
    }
}

impl<T, const N: usize> Default for FixedArray<T, N>
where
    T: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(data: [T; N]) -> Self {
        FixedArray { data }
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T, const N: usize> IntoIterator for FixedArray<T, N> {
    type IntoIter = array::IntoIter<T, N>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIterator::into_iter(self.data)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N>
where
    T: 'a,
{
    type IntoIter = slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const N: usize> Serialize for FixedArray<T, N>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(N))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for FixedArray<T, N>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: Vec<T> = Vec::deserialize(deserializer)?;
        let len = values.len();
        let expected = format!("an array of {} elements", N);
        <[T; N]>::try_from(values)
            .map(FixedArray::from)
            .map_err(|_| de::Error::invalid_length(len, &expected.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::FixedArray;
    use crate::error::Error;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_new_is_default_filled() {
        let array: FixedArray<u32, 4> = FixedArray::new();
        assert_eq!(array.len(), 4);
        assert_eq!(array.max_size(), 4);
        assert!(array.iter().all(|value| *value == 0));
    }

    #[test]
    fn test_front_back() {
        let array = FixedArray::from([1, 2, 3]);
        assert_eq!(array.front(), Ok(&1));
        assert_eq!(array.back(), Ok(&3));

        let empty: FixedArray<u32, 0> = FixedArray::new();
        assert!(empty.is_empty());
        assert_eq!(empty.front(), Err(Error::Empty));
        assert_eq!(empty.back(), Err(Error::Empty));
    }

    #[test]
    fn test_at_out_of_range() {
        let mut array = FixedArray::from([1, 2]);
        assert_eq!(array.at(1), Ok(&2));
        assert_eq!(array.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
        assert!(array.at_mut(5).is_err());
        array[0] = 5;
        assert_eq!(array[0], 5);
    }

    #[test]
    fn test_swap_and_fill() {
        let mut array = FixedArray::from([1, 2]);
        let mut other = FixedArray::from([3, 4]);
        array.swap(&mut other);
        assert_eq!(array.data(), &[3, 4]);
        assert_eq!(other.data(), &[1, 2]);
        array.fill(9);
        assert_eq!(array.data(), &[9, 9]);
    }

    #[test]
    fn test_into_iter() {
        let array = FixedArray::from([String::from("a"), String::from("b")]);
        assert_eq!(array.into_iter().collect::<Vec<String>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_serde_tokens() {
        let array = FixedArray::from([1u32, 2u32]);
        assert_tokens(
            &array,
            &[
                Token::Seq { len: Some(2) },
                Token::U32(1),
                Token::U32(2),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_deserialize_wrong_length() {
        assert_de_tokens_error::<FixedArray<u32, 2>>(
            &[Token::Seq { len: Some(1) }, Token::U32(1), Token::SeqEnd],
            "invalid length 1, expected an array of 2 elements",
        );
    }
}

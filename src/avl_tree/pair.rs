use std::cmp::Ordering;

/// A key-value pair stored by `OrderedMap<K, V>`.
///
/// Pairs are ordered and compared by key alone. The key cannot be changed once the pair is
/// constructed, since that could break the ordering of the tree holding it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Pair<K, V> {
    /// Constructs a new `Pair<K, V>`.
    ///
    /// # Examples
    /// ```
    /// use extended_containers::avl_tree::Pair;
    ///
    /// let pair = Pair::new(1, "a");
    /// assert_eq!(pair.key(), &1);
    /// assert_eq!(pair.value(), &"a");
    /// ```
    pub fn new(key: K, value: V) -> Self {
        Pair { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the pair, returning the key and the value.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Pair::new(key, value)
    }
}

impl<K, V> Ord for Pair<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Pair<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> PartialOrd for Pair<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Pair<K, V>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> PartialEq for Pair<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &Pair<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Pair<K, V> where K: Ord {}

#[cfg(test)]
mod tests {
    use super::Pair;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_compares_by_key_only() {
        assert_eq!(Pair::new(1, "a"), Pair::new(1, "b"));
        assert!(Pair::new(1, "z") < Pair::new(2, "a"));
    }

    #[test]
    fn test_value_mut() {
        let mut pair = Pair::from((1, 10));
        *pair.value_mut() += 1;
        assert_eq!(pair.into_inner(), (1, 11));
    }

    #[test]
    fn test_serde_tokens() {
        assert_tokens(
            &Pair::new(1u32, 2u32),
            &[
                Token::Struct {
                    name: "Pair",
                    len: 2,
                },
                Token::Str("key"),
                Token::U32(1),
                Token::Str("value"),
                Token::U32(2),
                Token::StructEnd,
            ],
        );
    }
}

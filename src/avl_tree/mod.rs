//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one, and the ordered containers built on it.

mod balanced_tree;
mod map;
mod multiset;
mod node;
mod pair;
mod set;
mod tree;

pub use self::balanced_tree::{BalancedTree, Cursor, IntoIter, Iter, DEFAULT_CHUNK_SIZE};
pub use self::map::{OrderedMap, OrderedMapIntoIter, OrderedMapIter};
pub use self::multiset::{OrderedMultiset, OrderedMultisetIntoIter, OrderedMultisetIter};
pub use self::pair::Pair;
pub use self::set::{OrderedSet, OrderedSetIntoIter, OrderedSetIter};

//! Equality, ordering and hashing for [`ForwardList`].
//!
//! Lists compare element-wise, front to back. Ordering is lexicographic: the
//! first differing element decides, and a proper prefix orders first.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::{ForwardList, Key, Node, Storage};

/// Lists are equal if they have the same length and equal elements in the
/// same order. Storage and key types may differ.
impl<T, U, K1, K2, S1, S2> PartialEq<ForwardList<U, K2, S2>> for ForwardList<T, K1, S1>
where
    T: PartialEq<U>,
    K1: Key,
    K2: Key,
    S1: Storage<Node<T, K1>, Key = K1>,
    S2: Storage<Node<U, K2>, Key = K2>,
{
    fn eq(&self, other: &ForwardList<U, K2, S2>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, K: Key, S> Eq for ForwardList<T, K, S> where S: Storage<Node<T, K>, Key = K> {}

/// Lexicographic order. Like equality, works across storage and key types.
impl<T, U, K1, K2, S1, S2> PartialOrd<ForwardList<U, K2, S2>> for ForwardList<T, K1, S1>
where
    T: PartialOrd<U>,
    K1: Key,
    K2: Key,
    S1: Storage<Node<T, K1>, Key = K1>,
    S2: Storage<Node<U, K2>, Key = K2>,
{
    fn partial_cmp(&self, other: &ForwardList<U, K2, S2>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, K: Key, S> Ord for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, K: Key, S> Hash for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

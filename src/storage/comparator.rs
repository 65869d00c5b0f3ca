//
use std::cmp::Ordering;

// Ordering over keys is supplied as a strict less-than predicate. Everything else (equality, three-way compare)
// is derived from it so a comparator only has to get one thing right.
//
// The comparator must be a total order and must not change its answers for the lifetime of the list,
// otherwise the level chains stop being sorted.
pub trait Comparator<K>: Send + Sync {
    fn less(&self, a: &K, b: &K) -> bool;

    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Natural ordering of any `K: Ord`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultComparator {}

impl<K: Ord> Comparator<K> for DefaultComparator {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a `Fn(&K, &K) -> bool` less-than closure into a [`Comparator`].
///
/// ```
/// use skiplist_kv::LessThan;
/// use skiplist_kv::storage::comparator::Comparator;
///
/// let descending = LessThan(|a: &u32, b: &u32| a > b);
/// assert!(descending.less(&9, &1));
/// ```
#[derive(Clone, Copy)]
pub struct LessThan<F>(pub F);

impl<K, F> Comparator<K> for LessThan<F>
where
    F: Fn(&K, &K) -> bool + Send + Sync,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for LessThan<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LessThan(..)")
    }
}

//! Single-slot memoization for derived views.
//!
//! A [`Memo`] remembers the key it was last computed for and the value it
//! produced. Keys compare by identity: shared data (`Arc`) by pointer, plain
//! values by equality. A view therefore recomputes only when one of the
//! inputs it declares in its key changes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use s3profile_core::ProfileId;

use crate::TRACING_TARGET_VIEWS;
use crate::form::FieldError;

/// Identity comparison used to decide whether a memo is still valid.
pub(crate) trait MemoKey {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> MemoKey for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: MemoKey> MemoKey for Option<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! impl_memo_key_by_value {
    ($($t:ty),+) => {$(
        impl MemoKey for $t {
            #[inline]
            fn same(&self, other: &Self) -> bool {
                self == other
            }
        }
    )+};
}

impl_memo_key_by_value!(bool, String, ProfileId, FieldError);

macro_rules! impl_memo_key_for_tuple {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name: MemoKey),+> MemoKey for ($($name,)+) {
            #[inline]
            fn same(&self, other: &Self) -> bool {
                $(self.$idx.same(&other.$idx))&&+
            }
        }
    };
}

impl_memo_key_for_tuple!(A: 0, B: 1);
impl_memo_key_for_tuple!(A: 0, B: 1, C: 2);
impl_memo_key_for_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_memo_key_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);

/// Cache of the most recent computation of one view.
#[derive(Debug)]
pub(crate) struct Memo<K, V> {
    name: &'static str,
    slot: Mutex<Option<(K, V)>>,
    computations: AtomicU64,
}

impl<K: MemoKey, V: Clone> Memo<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(None),
            computations: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, computing it on a miss.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        let result: Result<V, std::convert::Infallible> =
            self.try_get_or_compute(key, |key| Ok(compute(key)));
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`Memo::get_or_compute`], but only successful results are cached.
    pub fn try_get_or_compute<E>(
        &self,
        key: K,
        compute: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<V, E> {
        let mut slot = self.slot.lock();
        if let Some((cached, value)) = slot.as_ref()
            && cached.same(&key)
        {
            return Ok(value.clone());
        }

        let value = compute(&key)?;
        let computations = self.computations.fetch_add(1, Ordering::Relaxed) + 1;

        tracing::trace!(
            target: TRACING_TARGET_VIEWS,
            view = self.name,
            computations,
            "Derived view recomputed"
        );

        *slot = Some((key, value.clone()));
        Ok(value)
    }

    /// Returns how many times the value was (re)computed.
    #[cfg(test)]
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_on_same_value_key() {
        let memo: Memo<(String, bool), usize> = Memo::new("len");
        let a = memo.get_or_compute(("abc".into(), true), |(s, _)| s.len());
        let b = memo.get_or_compute(("abc".into(), true), |_| unreachable!());

        assert_eq!((a, b), (3, 3));
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_arc_keys_compare_by_pointer() {
        let memo: Memo<Arc<Vec<u8>>, usize> = Memo::new("len");
        let first = Arc::new(vec![1, 2]);
        let equal_but_distinct = Arc::new(vec![1, 2]);

        memo.get_or_compute(first.clone(), |v| v.len());
        memo.get_or_compute(first, |v| v.len());
        assert_eq!(memo.computations(), 1);

        memo.get_or_compute(equal_but_distinct, |v| v.len());
        assert_eq!(memo.computations(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let memo: Memo<bool, u8> = Memo::new("fallible");

        let error: Result<u8, &str> = memo.try_get_or_compute(true, |_| Err("boom"));
        assert!(error.is_err());
        assert_eq!(memo.computations(), 0);

        let value: Result<u8, &str> = memo.try_get_or_compute(true, |_| Ok(1));
        assert_eq!(value, Ok(1));
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_option_keys() {
        assert!(None::<bool>.same(&None));
        assert!(!Some(true).same(&None));
        assert!(Some(FieldError::IsRequired).same(&Some(FieldError::IsRequired)));
    }
}

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::error::{Result, RevListError};
use crate::sequence::Sequence;

/// Read-only adapter over a [`Sequence`].
///
/// Reads, searches, cursors and sub-ranges work as usual; every mutating call
/// fails with `UnsupportedOperation`, including mutations attempted through a
/// cursor or a view built on top of the adapter.
pub struct ReadOnly<'a, T, S: Sequence<T> + ?Sized> {
    inner: &'a S,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, S: Sequence<T> + ?Sized> ReadOnly<'a, T, S> {
    pub(crate) fn new(inner: &'a S) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    fn reject<R>(operation: &'static str) -> Result<R> {
        Err(RevListError::UnsupportedOperation { operation })
    }
}

impl<T, S: Sequence<T> + ?Sized> Sequence<T> for ReadOnly<'_, T, S> {
    fn raw_len(&self) -> usize {
        self.inner.raw_len()
    }

    fn revision(&self) -> u64 {
        self.inner.revision()
    }

    fn size(&self) -> Result<usize> {
        self.inner.size()
    }

    fn read<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.inner.read(index, f)
    }

    fn set(&self, _index: usize, _value: T) -> Result<T> {
        Self::reject("set")
    }

    fn insert(&self, _index: usize, _value: T) -> Result<()> {
        Self::reject("insert")
    }

    fn remove_at(&self, _index: usize) -> Result<T> {
        Self::reject("remove_at")
    }

    fn remove_range(&self, _from: usize, _to: usize) -> Result<()> {
        Self::reject("remove_range")
    }

    fn insert_vec(&self, _index: usize, _items: Vec<T>) -> Result<bool> {
        Self::reject("insert_all")
    }
}

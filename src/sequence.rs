use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use crate::error::{Result, RevListError};
use crate::iter::{Cursor, Iter};
use crate::readonly::ReadOnly;
use crate::view::View;

// Fixed seeds so that fingerprints are reproducible within a build
const FINGERPRINT_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Positional access to an ordered sequence of `T`.
///
/// Implemented by [`RevList`](crate::RevList), by [`View`] and by [`ReadOnly`].
/// All methods take `&self`: a list, its views and its cursors are shared handles
/// confined to one owner, and structural changes made through one handle are
/// detected by the others through the revision counter.
///
/// Required methods are the raw positional operations; everything else
/// (iteration, search, equality, sub-ranges) is derived from them.
pub trait Sequence<T> {
    /// Element count without a liveness check.
    ///
    /// Cursors and views use it to track positions after a change they made
    /// themselves. Callers that want a count they can trust use [`Sequence::size`].
    fn raw_len(&self) -> usize;

    /// Live revision of the list at the root of this sequence.
    fn revision(&self) -> u64;

    /// Calls `f` with a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= len`, `ConcurrentStructuralChange` if the
    /// sequence is a stale view.
    ///
    /// # Panics
    ///
    /// The underlying list is borrowed while `f` runs; mutating that list from
    /// inside `f` panics.
    fn read<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R>;

    /// Replaces the element at `index`, returning the previous element.
    /// Not a structural change.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= len`.
    fn set(&self, index: usize, value: T) -> Result<T>;

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index > len`, `CapacityExceeded` if the list cannot grow.
    fn insert(&self, index: usize, value: T) -> Result<()>;

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index >= len`.
    fn remove_at(&self, index: usize) -> Result<T>;

    /// Removes all elements in `[from, to)` with a single shift and a single
    /// revision bump.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `from > to` or `to > len`.
    fn remove_range(&self, from: usize, to: usize) -> Result<()>;

    /// Inserts `items` at `index` in order with a single shift. Returns whether
    /// anything was inserted; an empty `items` leaves the revision unchanged.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index > len`, `CapacityExceeded` if the list cannot grow.
    fn insert_vec(&self, index: usize, items: Vec<T>) -> Result<bool>;

    /// Number of elements, failing if this sequence is no longer usable.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn size(&self) -> Result<usize> {
        Ok(self.raw_len())
    }

    /// Whether the sequence has no elements.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == 0)
    }

    /// Returns a clone of the element at `index`.
    ///
    /// # Errors
    ///
    /// See [`Sequence::read`].
    fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.read(index, T::clone)
    }

    /// Appends `value` at the end; the same as `insert(len, value)`.
    ///
    /// # Errors
    ///
    /// See [`Sequence::insert`].
    fn append(&self, value: T) -> Result<()> {
        self.insert(self.raw_len(), value)
    }

    /// Inserts every element of `source` at `index`, in iteration order.
    ///
    /// The source is drained once before the list is touched.
    ///
    /// # Errors
    ///
    /// See [`Sequence::insert_vec`].
    fn insert_all(&self, index: usize, source: impl IntoIterator<Item = T>) -> Result<bool> {
        self.insert_vec(index, source.into_iter().collect())
    }

    /// Appends every element of `source`.
    ///
    /// # Errors
    ///
    /// See [`Sequence::insert_vec`].
    fn append_all(&self, source: impl IntoIterator<Item = T>) -> Result<bool> {
        self.insert_all(self.raw_len(), source)
    }

    /// Removes every element with a single revision bump.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn clear(&self) -> Result<()> {
        self.remove_range(0, self.raw_len())
    }

    /// Position of the first element equal to `value`.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn index_of(&self, value: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        for index in 0..self.size()? {
            if self.read(index, |item| item == value)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Position of the last element equal to `value`.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn last_index_of(&self, value: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        for index in (0..self.size()?).rev() {
            if self.read(index, |item| item == value)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.index_of(value)?.is_some())
    }

    /// Removes the first element equal to `value`. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn remove_value(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        match self.index_of(value)? {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fail-fast bidirectional cursor positioned before the first element.
    ///
    /// A cursor created over a stale view starts out invalidated: it reports no
    /// next element and every move fails with `ConcurrentStructuralChange`.
    fn cursor(&self) -> Cursor<'_, T, Self>
    where
        Self: Sized,
    {
        Cursor::new(self, 0)
    }

    /// Fail-fast bidirectional cursor whose first `next` returns the element at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index > len`.
    fn cursor_at(&self, index: usize) -> Result<Cursor<'_, T, Self>>
    where
        Self: Sized,
    {
        let length = self.size()?;
        if index > length {
            return Err(RevListError::IndexOutOfRange { index, length });
        }
        Ok(Cursor::new(self, index))
    }

    /// Fail-fast forward iterator yielding clones of the elements.
    fn iter(&self) -> Iter<'_, T, Self>
    where
        Self: Sized,
        T: Clone,
    {
        Iter::new(self.cursor())
    }

    /// Window over `[from, to)` backed by this sequence.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `from > to` or `to > len`; `ConcurrentStructuralChange`
    /// for a stale view.
    fn sub_range(&self, from: usize, to: usize) -> Result<View<'_, T, Self>>
    where
        Self: Sized,
    {
        let length = self.size()?;
        if from > to || to > length {
            return Err(RevListError::InvalidRange { from, to, length });
        }
        Ok(View::new(self, from, to))
    }

    /// Adapter over this sequence that rejects every mutating call.
    fn read_only(&self) -> ReadOnly<'_, T, Self>
    where
        Self: Sized,
    {
        ReadOnly::new(self)
    }

    /// Same length and pairwise-equal elements, in order.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` if either side is a stale view.
    fn equals<S>(&self, other: &S) -> Result<bool>
    where
        S: Sequence<T> + ?Sized,
        T: PartialEq,
    {
        let length = self.size()?;
        if length != other.size()? {
            return Ok(false);
        }
        for index in 0..length {
            let equal = self.read(index, |left| other.read(index, |right| left == right))??;
            if !equal {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Order-sensitive fingerprint: `h = 31 * h + hash(e)` folded from `h = 1`.
    ///
    /// Equal sequences have equal fingerprints.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn fingerprint(&self) -> Result<u64>
    where
        T: Hash,
    {
        let [k0, k1, k2, k3] = FINGERPRINT_SEEDS;
        self.fingerprint_with(&ahash::RandomState::with_seeds(k0, k1, k2, k3))
    }

    /// [`Sequence::fingerprint`] with a caller-chosen element hasher.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn fingerprint_with<H: BuildHasher>(&self, hasher: &H) -> Result<u64>
    where
        T: Hash,
    {
        let mut fingerprint: u64 = 1;
        for index in 0..self.size()? {
            let element = self.read(index, |item| hasher.hash_one(item))?;
            fingerprint = fingerprint.wrapping_mul(31).wrapping_add(element);
        }
        Ok(fingerprint)
    }

    /// Clones of all elements, in order.
    ///
    /// # Errors
    ///
    /// `ConcurrentStructuralChange` for a stale view.
    fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        (0..self.size()?).map(|index| self.get(index)).collect()
    }
}

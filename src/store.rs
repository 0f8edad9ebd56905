use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem::size_of;

use crate::error::{Result, RevListError};

/// Capacity a zero-capacity store jumps to on its first growth
pub const DEFAULT_CAPACITY: usize = 10;

// Some allocators keep header words in front of the block
const RESERVED_SLOTS: usize = 8;

/// Largest number of slots a list of `T` may ever hold.
///
/// Derived from the largest allocation the platform can address (`isize::MAX` bytes),
/// minus a few reserved slots.
#[must_use]
pub const fn max_capacity<T>() -> usize {
    let slot = size_of::<Option<T>>();
    let slot = if slot == 0 { 1 } else { slot };
    (isize::MAX as usize / slot).saturating_sub(RESERVED_SLOTS)
}

/// Contiguous slot storage behind a `RevList`.
///
/// Slots `[0, len)` are always `Some`, slots `[len, capacity)` are always `None`.
/// Removed slots are reset to `None` right away, so a removed element is dropped
/// (or handed back) immediately instead of lingering until the slot is reused.
pub(crate) struct Store<T> {
    slots: Box<[Option<T>]>,
    len: usize,
    growth_copies: usize,
}

impl<T> Store<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new().into_boxed_slice(),
            len: 0,
            growth_copies: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        Self::check_ceiling(capacity)?;
        let mut slots = Self::allocate(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            len: 0,
            growth_copies: 0,
        })
    }

    pub(crate) fn from_vec(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            slots: items.into_iter().map(Some).collect(),
            len,
            growth_copies: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of elements moved by growth-triggered reallocations so far.
    pub(crate) fn growth_copies(&self) -> usize {
        self.growth_copies
    }

    fn check_ceiling(requested: usize) -> Result<()> {
        let max = max_capacity::<T>();
        if requested > max {
            return Err(RevListError::CapacityExceeded { requested, max });
        }
        Ok(())
    }

    fn allocate(capacity: usize) -> Result<Vec<Option<T>>> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| RevListError::CapacityExceeded {
                requested: capacity,
                max: max_capacity::<T>(),
            })?;
        Ok(slots)
    }

    /// Moves the filled prefix into a fresh allocation of `new_capacity` slots.
    /// Returns the number of elements moved.
    fn relocate(&mut self, new_capacity: usize) -> Result<usize> {
        let mut slots = Self::allocate(new_capacity)?;
        slots.extend(self.slots.iter_mut().take(self.len).map(Option::take));
        slots.resize_with(new_capacity, || None);
        log::trace!(
            "relocated {} elements from {} to {} slots",
            self.len,
            self.slots.len(),
            new_capacity
        );
        self.slots = slots.into_boxed_slice();
        Ok(self.len)
    }

    /// Grows the store so that it holds at least `min_capacity` slots.
    ///
    /// The new capacity is `max(old + old / 2, min_capacity)`, clamped to
    /// [`max_capacity`]. A zero-capacity store grows straight to
    /// `max(DEFAULT_CAPACITY, min_capacity)`.
    pub(crate) fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        let old = self.capacity();
        if min_capacity <= old {
            return Ok(());
        }
        Self::check_ceiling(min_capacity)?;

        let grown = if old == 0 {
            DEFAULT_CAPACITY
        } else {
            old.saturating_add(old / 2)
        };
        let new_capacity = grown.max(min_capacity).min(max_capacity::<T>());

        let moved = self.relocate(new_capacity)?;
        self.growth_copies += moved;
        Ok(())
    }

    /// Trims the capacity down to the current length.
    pub(crate) fn compact(&mut self) -> Result<()> {
        if self.capacity() > self.len {
            log::debug!("compacting store from {} to {} slots", self.capacity(), self.len);
            self.relocate(self.len)?;
        }
        Ok(())
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(..self.len)?.get(index)?.as_ref()
    }

    /// Replaces the element at `index`, returning the previous one.
    /// Returns `None` (and drops `value`) if `index` is not below `len`.
    pub(crate) fn set(&mut self, index: usize, value: T) -> Option<T> {
        let slot = self.slots.get_mut(..self.len)?.get_mut(index)?;
        slot.replace(value)
    }

    /// Shifts `[index, len)` one slot right and writes `value` at `index`.
    ///
    /// The caller must have ensured `index <= len < capacity`.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn insert_shift(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len && self.len < self.capacity());
        self.slots[self.len] = Some(value);
        self.slots[index..=self.len].rotate_right(1);
        self.len += 1;
    }

    /// Removes the element at `index` and shifts `(index, len)` one slot left.
    ///
    /// The caller must have ensured `index < len`.
    #[allow(clippy::indexing_slicing, clippy::expect_used)]
    pub(crate) fn remove_shift(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        let removed = self.slots[index]
            .take()
            .expect("Slots below len are filled");
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        removed
    }

    /// Writes `items` at `index`, shifting the tail right once by `items.len()`.
    ///
    /// The caller must have ensured `index <= len` and room for all items.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn insert_many(&mut self, index: usize, items: Vec<T>) {
        let count = items.len();
        debug_assert!(index <= self.len && self.len + count <= self.capacity());
        let end = self.len + count;
        for (slot, item) in self.slots[self.len..end].iter_mut().zip(items) {
            *slot = Some(item);
        }
        self.slots[index..end].rotate_right(count);
        self.len = end;
    }

    /// Drops `[from, to)` and shifts the tail left once.
    ///
    /// The caller must have ensured `from <= to <= len`.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn remove_range(&mut self, from: usize, to: usize) {
        debug_assert!(from <= to && to <= self.len);
        self.slots[from..to].fill_with(|| None);
        self.slots[from..self.len].rotate_left(to - from);
        self.len -= to - from;
    }

    #[allow(clippy::indexing_slicing)]
    pub(crate) fn clear(&mut self) {
        self.slots[..self.len].fill_with(|| None);
        self.len = 0;
    }

    /// Keeps the elements whose flag in `keep` is set, preserving their order.
    /// Returns the number of removed elements.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn retain_mask(&mut self, keep: &[bool]) -> usize {
        debug_assert_eq!(keep.len(), self.len);
        let mut write = 0;
        for (read, &kept) in keep.iter().enumerate() {
            if kept {
                self.slots.swap(write, read);
                write += 1;
            } else {
                self.slots[read] = None;
            }
        }
        let removed = self.len - write;
        self.len = write;
        removed
    }

    #[allow(clippy::indexing_slicing)]
    pub(crate) fn sort_by(&mut self, mut compare: impl FnMut(&T, &T) -> Ordering) {
        self.slots[..self.len].sort_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => compare(a, b),
            _ => Ordering::Equal,
        });
    }

    #[allow(clippy::indexing_slicing)]
    pub(crate) fn replace_each(&mut self, mut replace: impl FnMut(&T) -> T) {
        for item in self.slots[..self.len].iter_mut().flatten() {
            let next = replace(item);
            *item = next;
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().take(self.len).flatten()
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        let len = self.len;
        self.slots.into_vec().into_iter().take(len).flatten().collect()
    }
}

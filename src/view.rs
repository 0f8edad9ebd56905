use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;

use crate::core::RevList;
use crate::error::{Result, RevListError};
use crate::sequence::Sequence;

/// A window over `[offset, offset + len)` of a parent sequence.
///
/// A view owns no elements. Every call is bounds-checked against the view's own
/// length, checked for liveness, shifted by `offset` and forwarded to the parent,
/// which may itself be a view: a view of a view chains to its parent view rather
/// than to the root list, so each hop runs its own liveness check.
///
/// Structural changes made through the view update its length and its revision
/// snapshot. A structural change made anywhere else (directly on the list, through
/// an ancestor or through a sibling view) makes the view permanently stale: every
/// later call fails with `ConcurrentStructuralChange`.
pub struct View<'a, T, P: Sequence<T> + ?Sized = RevList<T>> {
    parent: &'a P,
    offset: usize,
    len: Cell<usize>,
    expected_revision: Cell<u64>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, P: Sequence<T> + ?Sized> View<'a, T, P> {
    pub(crate) fn new(parent: &'a P, from: usize, to: usize) -> Self {
        Self {
            parent,
            offset: from,
            len: Cell::new(to - from),
            expected_revision: Cell::new(parent.revision()),
            _marker: PhantomData,
        }
    }

    /// Position of the view's first element within its parent.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The sequence this view forwards to.
    #[must_use]
    pub fn parent(&self) -> &'a P {
        self.parent
    }

    /// Whether the view still matches the list revision.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.parent.revision() == self.expected_revision.get()
    }

    fn check_live(&self) -> Result<()> {
        let expected = self.expected_revision.get();
        let actual = self.parent.revision();
        if actual != expected {
            log::debug!(
                "stale view at offset {}: expected revision {expected}, found {actual}",
                self.offset
            );
            return Err(RevListError::ConcurrentStructuralChange { expected, actual });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let length = self.len.get();
        if index >= length {
            return Err(RevListError::IndexOutOfRange { index, length });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        let length = self.len.get();
        if index > length {
            return Err(RevListError::IndexOutOfRange { index, length });
        }
        Ok(())
    }

    // After a structural change delegated to the parent: take the new revision
    // and apply the length delta the parent went through.
    fn sync(&self, parent_len_before: usize) {
        self.expected_revision.set(self.parent.revision());
        let parent_len_after = self.parent.raw_len();
        let len = self.len.get();
        self.len.set((len + parent_len_after).saturating_sub(parent_len_before));
    }
}

impl<T, P: Sequence<T> + ?Sized> Sequence<T> for View<'_, T, P> {
    fn raw_len(&self) -> usize {
        self.len.get()
    }

    fn revision(&self) -> u64 {
        self.parent.revision()
    }

    fn size(&self) -> Result<usize> {
        self.check_live()?;
        Ok(self.len.get())
    }

    fn read<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.check_index(index)?;
        self.check_live()?;
        self.parent.read(self.offset + index, f)
    }

    fn set(&self, index: usize, value: T) -> Result<T> {
        self.check_index(index)?;
        self.check_live()?;
        self.parent.set(self.offset + index, value)
    }

    fn insert(&self, index: usize, value: T) -> Result<()> {
        self.check_insert_index(index)?;
        self.check_live()?;
        let before = self.parent.raw_len();
        self.parent.insert(self.offset + index, value)?;
        self.sync(before);
        Ok(())
    }

    fn remove_at(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        self.check_live()?;
        let before = self.parent.raw_len();
        let removed = self.parent.remove_at(self.offset + index)?;
        self.sync(before);
        Ok(removed)
    }

    fn remove_range(&self, from: usize, to: usize) -> Result<()> {
        let length = self.len.get();
        if from > to || to > length {
            return Err(RevListError::InvalidRange { from, to, length });
        }
        self.check_live()?;
        let before = self.parent.raw_len();
        self.parent.remove_range(self.offset + from, self.offset + to)?;
        self.sync(before);
        Ok(())
    }

    fn insert_vec(&self, index: usize, items: Vec<T>) -> Result<bool> {
        self.check_insert_index(index)?;
        self.check_live()?;
        let before = self.parent.raw_len();
        let inserted = self.parent.insert_vec(self.offset + index, items)?;
        if inserted {
            self.sync(before);
        }
        Ok(inserted)
    }
}

impl<T: fmt::Debug, P: Sequence<T> + ?Sized> fmt::Debug for View<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_live() {
            return f
                .debug_struct("View")
                .field("offset", &self.offset)
                .field("stale", &true)
                .finish();
        }
        let mut list = f.debug_list();
        for index in 0..self.len.get() {
            if self.read(index, |item| {
                list.entry(item);
            })
            .is_err()
            {
                return Err(fmt::Error);
            }
        }
        list.finish()
    }
}

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::core::RevList;
use crate::error::{Result, RevListError};
use crate::sequence::Sequence;

/// Where a [`Cursor`] is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No element has been returned yet
    Fresh,
    /// At least one element has been returned and more remain ahead
    Advancing,
    /// Nothing remains ahead of the cursor
    Exhausted,
    /// A structural change made elsewhere was detected; the cursor is unusable
    Invalidated,
}

/// Fail-fast bidirectional cursor over a [`Sequence`].
///
/// The cursor sits between two elements: `next` returns the element after it,
/// `previous` the element before it. It captures the sequence revision when created
/// and fails with `ConcurrentStructuralChange` as soon as that revision moves
/// because of a change the cursor did not make. Changes made through the cursor's
/// own [`remove`](Cursor::remove) and [`add`](Cursor::add) resynchronize it.
///
/// Detection is best effort: it catches every single-owner misuse but is no
/// substitute for external synchronization.
pub struct Cursor<'a, T, S: Sequence<T> + ?Sized> {
    seq: &'a S,
    cursor: usize,
    last_returned: Option<usize>,
    expected_revision: u64,
    moved: bool,
    invalidated: Option<RevListError>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, S: Sequence<T> + ?Sized> Cursor<'a, T, S> {
    pub(crate) fn new(seq: &'a S, cursor: usize) -> Self {
        // Over a stale view the cursor is dead on arrival
        let invalidated = seq.size().err();
        if let Some(err) = &invalidated {
            log::debug!("cursor created over a stale sequence: {err}");
        }
        Self {
            seq,
            cursor,
            last_returned: None,
            expected_revision: seq.revision(),
            moved: false,
            invalidated,
            _marker: PhantomData,
        }
    }

    fn check_revision(&mut self) -> Result<()> {
        if let Some(err) = &self.invalidated {
            return Err(err.clone());
        }
        let actual = self.seq.revision();
        if actual != self.expected_revision {
            log::debug!(
                "cursor invalidated: expected revision {}, found {}",
                self.expected_revision,
                actual
            );
            let err = RevListError::ConcurrentStructuralChange {
                expected: self.expected_revision,
                actual,
            };
            self.invalidated = Some(err.clone());
            return Err(err);
        }
        Ok(())
    }

    // Failures of the underlying sequence while the revision still matched
    // mean a stale view; those are terminal as well.
    fn track<R>(&mut self, result: Result<R>) -> Result<R> {
        if let Err(err @ RevListError::ConcurrentStructuralChange { .. }) = &result {
            self.invalidated = Some(err.clone());
        }
        result
    }

    fn resync(&mut self) {
        self.expected_revision = self.seq.revision();
    }

    /// Whether `next` would return an element. Does not check the revision,
    /// but an invalidated cursor never has a next element.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.invalidated.is_none() && self.cursor < self.seq.raw_len()
    }

    /// Whether `previous` would return an element. Does not check the revision,
    /// but an invalidated cursor never has a previous element.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.invalidated.is_none() && self.cursor > 0
    }

    /// Index of the element the next call to `next` would return.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.cursor
    }

    /// Index of the element the next call to `previous` would return, if any.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    /// Current lifecycle state; see [`CursorState`].
    #[must_use]
    pub fn state(&self) -> CursorState {
        if self.invalidated.is_some() {
            CursorState::Invalidated
        } else if !self.has_next() {
            CursorState::Exhausted
        } else if self.moved {
            CursorState::Advancing
        } else {
            CursorState::Fresh
        }
    }

    /// Returns the element after the cursor and moves past it, or `Ok(None)`
    /// when the cursor is at the end.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::ConcurrentStructuralChange` if the sequence was
    /// structurally modified other than through this cursor. The error is terminal.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<T>>
    where
        T: Clone,
    {
        self.check_revision()?;
        let index = self.cursor;
        if index >= self.seq.raw_len() {
            return Ok(None);
        }
        let item = self.seq.get(index);
        let item = self.track(item)?;
        self.last_returned = Some(index);
        self.cursor = index + 1;
        self.moved = true;
        Ok(Some(item))
    }

    /// Returns the element before the cursor and moves back over it, or `Ok(None)`
    /// when the cursor is at the start.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::next`].
    pub fn previous(&mut self) -> Result<Option<T>>
    where
        T: Clone,
    {
        self.check_revision()?;
        let Some(index) = self.cursor.checked_sub(1) else {
            return Ok(None);
        };
        let item = self.seq.get(index);
        let item = self.track(item)?;
        self.last_returned = Some(index);
        self.cursor = index;
        self.moved = true;
        Ok(Some(item))
    }

    /// Removes the element last returned by `next` or `previous`.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::IllegalState` if nothing was returned since the last
    /// `remove`/`add`, and `RevListError::ConcurrentStructuralChange` if the
    /// sequence was modified behind the cursor's back.
    pub fn remove(&mut self) -> Result<T> {
        let Some(index) = self.last_returned else {
            return Err(RevListError::IllegalState {
                reason: "remove called without a preceding next or previous",
            });
        };
        self.check_revision()?;
        let removed = self.seq.remove_at(index);
        let removed = self.track(removed)?;
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.last_returned = None;
        self.resync();
        Ok(removed)
    }

    /// Replaces the element last returned by `next` or `previous`.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::IllegalState` if nothing was returned since the last
    /// `remove`/`add`, and `RevListError::ConcurrentStructuralChange` if the
    /// sequence was modified behind the cursor's back.
    pub fn set(&mut self, value: T) -> Result<T> {
        let Some(index) = self.last_returned else {
            return Err(RevListError::IllegalState {
                reason: "set called without a preceding next or previous",
            });
        };
        self.check_revision()?;
        let previous = self.seq.set(index, value);
        self.track(previous)
    }

    /// Inserts `value` at the cursor; a following `next` is unaffected and a
    /// following `previous` returns the new element.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::ConcurrentStructuralChange` if the sequence was
    /// modified behind the cursor's back, or `CapacityExceeded` if it cannot grow.
    pub fn add(&mut self, value: T) -> Result<()> {
        self.check_revision()?;
        let inserted = self.seq.insert(self.cursor, value);
        self.track(inserted)?;
        self.cursor += 1;
        self.last_returned = None;
        self.resync();
        Ok(())
    }

    /// Feeds every remaining element to `action`, then leaves the cursor at the end.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::next`].
    pub fn for_each_remaining(&mut self, mut action: impl FnMut(T)) -> Result<()>
    where
        T: Clone,
    {
        while let Some(item) = self.next()? {
            action(item);
        }
        Ok(())
    }
}

/// Forward iterator adapter over a [`Cursor`], yielding `Result<T>`.
///
/// Yields `Some(Err(..))` once when a structural change is detected and `None`
/// afterwards (and after the end), so `collect::<Result<Vec<_>>>()` reports the failure.
pub struct Iter<'a, T, S: Sequence<T> + ?Sized> {
    cursor: Cursor<'a, T, S>,
    done: bool,
}

impl<'a, T, S: Sequence<T> + ?Sized> Iter<'a, T, S> {
    pub(crate) fn new(cursor: Cursor<'a, T, S>) -> Self {
        Self {
            cursor,
            done: false,
        }
    }
}

impl<T: Clone, S: Sequence<T> + ?Sized> Iterator for Iter<'_, T, S> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // One extra item for a possible error
        let remaining = self.cursor.seq.raw_len().saturating_sub(self.cursor.cursor);
        (0, Some(remaining + 1))
    }
}

impl<T: Clone, S: Sequence<T> + ?Sized> FusedIterator for Iter<'_, T, S> {}

impl<'a, T: Clone> IntoIterator for &'a RevList<T> {
    type Item = Result<T>;
    type IntoIter = Iter<'a, T, RevList<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

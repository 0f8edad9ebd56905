use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::error::{Result, RevListError};
use crate::sequence::Sequence;
use crate::store::Store;

/// A growable, indexable sequence with a structural revision counter.
///
/// Every operation that changes the length or shifts element positions bumps
/// [`Sequence::revision`] exactly once; replacing an element in place never does.
/// Cursors and views compare against that counter to detect changes they did not
/// make themselves.
///
/// The list is a single-owner container: it is `!Sync`, and all handles to it
/// (cursors, views) borrow it for their whole lifetime.
pub struct RevList<T> {
    store: RefCell<Store<T>>,
    revision: Cell<u64>,
}

impl<T> RevList<T> {
    /// Creates an empty list without allocating.
    ///
    /// The first insertion allocates [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) slots.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(Store::new())
    }

    /// Creates an empty list with room for `capacity` elements.
    ///
    /// A capacity of 0 behaves like [`RevList::new`].
    ///
    /// # Errors
    ///
    /// Returns `RevListError::CapacityExceeded` if `capacity` is above
    /// [`max_capacity`](crate::max_capacity) or the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::from_store(Store::with_capacity(capacity)?))
    }

    fn from_store(store: Store<T>) -> Self {
        Self {
            store: RefCell::new(store),
            revision: Cell::new(0),
        }
    }

    fn bump_revision(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
    }

    /// Number of elements. A list is never stale, so this cannot fail.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    /// Whether the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots allocated, filled or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.borrow().capacity()
    }

    /// Elements moved by growth-triggered reallocations since the list was created.
    #[must_use]
    pub fn growth_copies(&self) -> usize {
        self.store.borrow().growth_copies()
    }

    /// Makes sure the list can hold `min_capacity` elements without reallocating.
    /// Not a structural change.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::CapacityExceeded` if `min_capacity` is above the ceiling
    /// or the allocation fails.
    pub fn ensure_capacity(&self, min_capacity: usize) -> Result<()> {
        self.store.borrow_mut().ensure_capacity(min_capacity)
    }

    /// Shrinks the capacity to the current length. Not a structural change.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::CapacityExceeded` if the smaller allocation fails.
    pub fn compact(&self) -> Result<()> {
        self.store.borrow_mut().compact()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let length = self.len();
        if index >= length {
            return Err(RevListError::IndexOutOfRange { index, length });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        let length = self.len();
        if index > length {
            return Err(RevListError::IndexOutOfRange { index, length });
        }
        Ok(())
    }

    /// Removes every element for which `predicate` returns true.
    ///
    /// The predicate sees every element before anything is removed, so a panicking
    /// predicate leaves the list untouched. One revision bump if anything was removed.
    ///
    /// # Panics
    ///
    /// Mutating the list from inside `predicate` panics.
    pub fn remove_if(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        let keep: Vec<bool> = self.store.borrow().iter().map(|item| !predicate(item)).collect();
        let removed = self.store.borrow_mut().retain_mask(&keep);
        if removed > 0 {
            self.bump_revision();
        }
        removed > 0
    }

    /// Keeps only the elements for which `predicate` returns true.
    ///
    /// # Panics
    ///
    /// Mutating the list from inside `predicate` panics.
    pub fn retain(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.remove_if(|item| !predicate(item))
    }

    /// Removes every element that is contained in `other`.
    pub fn remove_all(&self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.remove_if(|item| other.contains(item))
    }

    /// Removes every element that is not contained in `other`.
    pub fn retain_all(&self, other: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.remove_if(|item| !other.contains(item))
    }

    /// Replaces every element with `replace(&element)`. Not a structural change.
    ///
    /// # Panics
    ///
    /// Touching the list from inside `replace` panics.
    pub fn replace_all(&self, replace: impl FnMut(&T) -> T) {
        self.store.borrow_mut().replace_each(replace);
    }

    /// Stable sort with a comparator. Reordering is a structural change, so the
    /// revision is bumped once unless the list has fewer than two elements.
    ///
    /// # Panics
    ///
    /// Touching the list from inside `compare` panics.
    pub fn sort_by(&self, compare: impl FnMut(&T, &T) -> Ordering) {
        let mut store = self.store.borrow_mut();
        if store.len() > 1 {
            store.sort_by(compare);
            self.bump_revision();
        }
    }

    /// Sorts in ascending order; see [`RevList::sort_by`].
    pub fn sort(&self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Calls `action` with a clone of every element, in order.
    ///
    /// The list is not borrowed while `action` runs.
    ///
    /// # Errors
    ///
    /// Returns `RevListError::ConcurrentStructuralChange` if `action` structurally
    /// modified the list; iteration stops at the first such change.
    pub fn for_each(&self, mut action: impl FnMut(T)) -> Result<()>
    where
        T: Clone,
    {
        let expected = self.revision();
        let mut index = 0;
        while self.revision() == expected && index < self.len() {
            action(self.get(index)?);
            index += 1;
        }
        let actual = self.revision();
        if actual != expected {
            return Err(RevListError::ConcurrentStructuralChange { expected, actual });
        }
        Ok(())
    }

    /// Consumes the list, returning its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.store.into_inner().into_vec()
    }
}

impl<T> Sequence<T> for RevList<T> {
    fn raw_len(&self) -> usize {
        self.store.borrow().len()
    }

    fn revision(&self) -> u64 {
        self.revision.get()
    }

    fn read<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        let store = self.store.borrow();
        match store.get(index) {
            Some(item) => Ok(f(item)),
            None => Err(RevListError::IndexOutOfRange {
                index,
                length: store.len(),
            }),
        }
    }

    #[allow(clippy::expect_used)]
    fn set(&self, index: usize, value: T) -> Result<T> {
        self.check_index(index)?;
        Ok(self
            .store
            .borrow_mut()
            .set(index, value)
            .expect("Index checked by check_index"))
    }

    fn insert(&self, index: usize, value: T) -> Result<()> {
        self.check_insert_index(index)?;
        let mut store = self.store.borrow_mut();
        let required = store.len() + 1;
        store.ensure_capacity(required)?;
        store.insert_shift(index, value);
        self.bump_revision();
        Ok(())
    }

    fn remove_at(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let removed = self.store.borrow_mut().remove_shift(index);
        self.bump_revision();
        Ok(removed)
    }

    fn remove_range(&self, from: usize, to: usize) -> Result<()> {
        let length = self.len();
        if from > to || to > length {
            return Err(RevListError::InvalidRange { from, to, length });
        }
        if from == to {
            return Ok(());
        }
        self.store.borrow_mut().remove_range(from, to);
        self.bump_revision();
        Ok(())
    }

    fn insert_vec(&self, index: usize, items: Vec<T>) -> Result<bool> {
        self.check_insert_index(index)?;
        if items.is_empty() {
            return Ok(false);
        }
        let mut store = self.store.borrow_mut();
        let required = store.len() + items.len();
        store.ensure_capacity(required)?;
        store.insert_many(index, items);
        self.bump_revision();
        Ok(true)
    }

    fn clear(&self) -> Result<()> {
        let mut store = self.store.borrow_mut();
        if store.len() > 0 {
            store.clear();
            self.bump_revision();
        }
        Ok(())
    }
}

impl<T> Default for RevList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for RevList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_store(Store::from_vec(items))
    }
}

impl<T> FromIterator<T> for RevList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

/// Copies the elements into a list sized exactly to fit, with a fresh revision.
impl<T: Clone> Clone for RevList<T> {
    fn clone(&self) -> Self {
        Self::from(self.store.borrow().iter().cloned().collect::<Vec<T>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for RevList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.store.borrow().iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RevList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.store.borrow().iter().eq(other.store.borrow().iter())
    }
}

impl<T: Eq> Eq for RevList<T> {}

impl<T: Hash> Hash for RevList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let store = self.store.borrow();
        state.write_usize(store.len());
        for item in store.iter() {
            item.hash(state);
        }
    }
}

impl<T> IntoIterator for RevList<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

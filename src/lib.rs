#![no_std]

//! `RevList`: a growable sequence container with fail-fast cursors and chained views.
//!
//! `RevList<T>` is a contiguous, indexable list that counts its own structural
//! changes. Cursors and sub-range views borrow the list and compare that counter on
//! every step, so a change made behind their back is reported as
//! `RevListError::ConcurrentStructuralChange` instead of silently producing wrong
//! results.
//!
//! Three layers, bottom to top:
//!
//! - a backing store of `Option<T>` slots with amortized growth
//!   (`new = max(old + old / 2, required)`, first growth to [`DEFAULT_CAPACITY`]);
//! - the list itself, implementing the [`Sequence`] positional contract and bumping
//!   its revision once per insert, remove, clear, bulk insert or bulk remove;
//! - [`View`]s, windows over a list or over another view that translate indices and
//!   forward every call to their parent.
//!
//! All handles take `&self`. The list is meant for a single owner: it is `!Sync` and
//! uses no locks or atomics. Views and cursors hold borrows of their parent, so they
//! cannot outlive it.
//!
//! # Performance Characteristics
//!
//! - `append()`: amortized O(1)
//! - `get()`, `set()`: O(1) on a list, O(depth) on a view chain
//! - `insert()`, `remove_at()`: O(n - index)
//! - `remove_range()`, `insert_all()`: one shift regardless of the number of elements
//! - `index_of()`, `equals()`, `fingerprint()`: O(n)
//!
//! ## `no_std` Compatibility
//!
//! The crate needs `alloc` but not `std`. Enable the optional `std` feature to get
//! `std::error::Error` through `thiserror/std`:
//! ```toml
//! [dependencies]
//! revlist = { version = "0.1", features = ["std"] }
//! ```
//!
//! # Positional Interface
//!
//! ```
//! use revlist::{RevList, Sequence};
//!
//! let list = RevList::new();
//! list.append("b").unwrap();
//! list.insert(0, "a").unwrap();
//! list.append_all(["c", "d"]).unwrap();
//!
//! assert_eq!(list.get(2).unwrap(), "c");
//! assert_eq!(list.set(3, "e").unwrap(), "d");
//! assert_eq!(list.index_of(&"e").unwrap(), Some(3));
//!
//! // Every insert/remove bumps the revision once, set does not
//! assert_eq!(list.revision(), 3);
//!
//! list.remove_range(1, 3).unwrap();
//! assert_eq!(list.to_vec().unwrap(), vec!["a", "e"]);
//! assert_eq!(list.revision(), 4);
//! ```
//!
//! # Fail-fast Cursors
//!
//! A cursor fails once the list is structurally changed by anyone but itself:
//!
//! ```
//! use revlist::{RevList, RevListError, Sequence};
//!
//! let list: RevList<i32> = (1..=5).collect();
//!
//! let mut cursor = list.cursor();
//! while let Some(value) = cursor.next().unwrap() {
//!     if value % 2 == 0 {
//!         cursor.remove().unwrap(); // changes through the cursor are fine
//!     }
//! }
//! assert_eq!(list.to_vec().unwrap(), vec![1, 3, 5]);
//!
//! let mut stale = list.cursor();
//! list.append(7).unwrap();
//! assert!(matches!(
//!     stale.next(),
//!     Err(RevListError::ConcurrentStructuralChange { .. })
//! ));
//! ```
//!
//! `&RevList<T>` is also a std iterator of `Result<T>`:
//!
//! ```
//! use revlist::RevList;
//!
//! let list = RevList::from(vec![1, 2, 3]);
//! let total: i32 = (&list).into_iter().map(Result::unwrap).sum();
//! assert_eq!(total, 6);
//! ```
//!
//! # Views
//!
//! ```
//! use revlist::{RevList, Sequence};
//!
//! let list: RevList<i32> = (0..6).collect();
//! let view = list.sub_range(1, 4).unwrap();
//! assert_eq!(view.to_vec().unwrap(), vec![1, 2, 3]);
//!
//! view.remove_at(0).unwrap();
//! assert_eq!(view.size().unwrap(), 2);
//! assert_eq!(list.to_vec().unwrap(), vec![0, 2, 3, 4, 5]);
//!
//! // The idiom for removing a range
//! list.sub_range(3, 5).unwrap().clear().unwrap();
//! assert_eq!(list.to_vec().unwrap(), vec![0, 2, 3]);
//!
//! // `view` did not make that change, so it is now stale
//! assert!(view.get(0).is_err());
//! ```

extern crate alloc;

mod core;
mod error;
mod iter;
mod readonly;
mod sequence;
mod store;
mod view;

// Re-export public types and traits
pub use crate::core::RevList;
pub use error::{Result, RevListError};
pub use iter::{Cursor, CursorState, Iter};
pub use readonly::ReadOnly;
pub use sequence::Sequence;
pub use store::{max_capacity, DEFAULT_CAPACITY};
pub use view::View;

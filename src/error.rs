use thiserror::Error;

/// Error types for `RevList`, its views and its cursors
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RevListError {
    /// Index is beyond the current length
    #[error("Index out of range: index {index} is beyond length {length}")]
    IndexOutOfRange {
        /// Index that was accessed
        index: usize,
        /// Length of the list or view at the time of the call
        length: usize,
    },
    /// Malformed `[from, to)` pair
    #[error("Invalid range: [{from}, {to}) does not fit length {length}")]
    InvalidRange {
        /// Inclusive start of the range
        from: usize,
        /// Exclusive end of the range
        to: usize,
        /// Length of the list or view at the time of the call
        length: usize,
    },
    /// The list was structurally modified behind the back of a cursor or view
    #[error("Concurrent structural change: expected revision {expected}, found {actual}")]
    ConcurrentStructuralChange {
        /// Revision captured by the cursor or view
        expected: u64,
        /// Live revision of the list
        actual: u64,
    },
    /// Cursor `set`/`remove` without a preceding `next`/`previous`
    #[error("Illegal state: {reason}")]
    IllegalState {
        /// What the cursor was missing
        reason: &'static str,
    },
    /// Growth would exceed the addressable-size ceiling, or the allocation failed
    #[error("Capacity exceeded: requested {requested} slots, maximum is {max}")]
    CapacityExceeded {
        /// Number of slots requested
        requested: usize,
        /// Maximum number of slots for the element type
        max: usize,
    },
    /// A read-only sequence rejected a mutating call
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: &'static str,
    },
}

/// Result type for all fallible `revlist` operations.
pub type Result<T> = core::result::Result<T, RevListError>;

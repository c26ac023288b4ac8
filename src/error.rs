use thiserror::Error;

/// Recoverable outcomes of the reserve and drain operations.
///
/// None of these indicate a bug: callers poll, back off, or treat them as the
/// ordinary full/empty signal of a bounded queue.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// Every slot holds (or is being written with) an unconsumed element.
    #[error("ring buffer is full")]
    Full,

    /// The push side has been disabled with `disable()`.
    #[error("push reservations are disabled")]
    Disabled,

    /// No published element is available at the pop cursor.
    #[error("ring buffer is empty")]
    Empty,

    /// The pop cursor is already at or past the bound given to `clear_pop_index`.
    #[error("pop cursor reached the drain bound")]
    DrainLimit,
}

/// Returned when a manager cannot be constructed with the requested parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("capacity must be non-zero")]
    Zero,

    #[error("capacity {capacity} exceeds the maximum supported capacity {max}")]
    TooLarge { capacity: u32, max: u32 },

    #[error("generation limit {limit} is too small, at least 2 generations are required")]
    GenerationLimit { limit: u32 },
}

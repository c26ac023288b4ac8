// Index manager for a bounded MPMC ring buffer - the payload array lives elsewhere

use crossbeam_utils::CachePadded;
use std::sync::atomic::AtomicU32;

/// A lock-free manager of slot indices for an external circular buffer.
///
/// The manager never touches payload memory. It hands out `(generation, index)`
/// pairs that grant exclusive access to one slot of a caller-owned array, and
/// tracks the state of each slot so that concurrent producers and consumers
/// never own the same slot at the same time.
///
/// ### Concurrency Design:
/// - **State words**: one `AtomicU32` per slot holding `(generation, ElementState)`.
///   A compare-and-swap on the state word is the only thing that transfers
///   ownership of a slot. Encoding the generation defeats ABA: a stale thread
///   compares against last lap's generation and fails.
/// - **Push cursor**: combined index (`generation * capacity + slot`) of the next
///   slot to try for writing, plus the disabled flag in the top bit.
/// - **Pop cursor**: combined index of the next slot to try for reading.
///
/// Cursor advancement is best effort. A reservation is recorded in the state
/// word before the cursor moves, and any thread that finds a slot already taken
/// pushes the cursor forward itself.
pub struct RingIndexManager {
    /// Producer cursor. Padded to prevent false sharing with the pop cursor.
    pub(crate) push_index: CachePadded<AtomicU32>,

    /// Consumer cursor. Padded to prevent false sharing with the state array.
    pub(crate) pop_index: CachePadded<AtomicU32>,

    /// Encoded `(generation, ElementState)` for each slot.
    pub(crate) states: Box<[AtomicU32]>,

    /// Number of slots. Fixed at construction.
    pub(crate) capacity: u32,

    /// Last generation representable by every state word and both cursors.
    pub(crate) max_generation: u32,

    /// Last valid combined index; incrementing it wraps to zero.
    pub(crate) max_combined_index: u32,
}

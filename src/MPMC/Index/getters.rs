use super::layout::{decode_generation, decode_state, discard_disabled_flag};
use super::Index::RingIndexManager;
use crate::MPMC::Structs::SlotSnapshot;
use std::io;
use std::sync::atomic::Ordering;

/// Read-only accessors for RingIndexManager
///
/// Cursor and state reads use relaxed ordering; they are meant for
/// monitoring and diagnostics, not for making ownership decisions.
impl RingIndexManager {
    /// Number of slots managed.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Largest generation value in use before generations wrap to 0.
    pub fn max_generation(&self) -> u32 {
        self.max_generation
    }

    /// Largest combined index before the cursors wrap to 0.
    pub fn max_combined_index(&self) -> u32 {
        self.max_combined_index
    }

    /// `(generation, index)` the next push reservation will try first.
    pub fn push_position(&self) -> (u32, u32) {
        let combined = discard_disabled_flag(self.push_index.load(Ordering::Relaxed));
        (combined / self.capacity, combined % self.capacity)
    }

    /// `(generation, index)` the next pop reservation will try first.
    pub fn pop_position(&self) -> (u32, u32) {
        let combined = discard_disabled_flag(self.pop_index.load(Ordering::Relaxed));
        (combined / self.capacity, combined % self.capacity)
    }

    /// Decoded state word of slot `index`.
    ///
    /// # Panics
    /// If `index >= capacity()`.
    pub fn slot_state(&self, index: u32) -> SlotSnapshot {
        let encoded = self.states[index as usize].load(Ordering::Relaxed);
        SlotSnapshot {
            generation: decode_generation(encoded),
            state: decode_state(encoded),
        }
    }

    /// Write the cursor summary and per-slot state table to `stream`.
    pub fn print<W: io::Write>(&self, stream: &mut W) -> io::Result<()> {
        write!(stream, "{}", self)
    }
}

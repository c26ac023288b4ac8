// Value types handed across the index manager boundary.

use std::fmt;

/// The per-slot state kept in the low two bits of every state word.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// Slot is free and may be reserved for writing.
    Empty = 0,
    /// A producer holds the slot.
    Writing = 1,
    /// Slot holds a published element.
    Full = 2,
    /// A consumer holds the slot.
    Reading = 3,
}

impl ElementState {
    /// Decode the two state bits; higher bits are ignored.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => ElementState::Empty,
            1 => ElementState::Writing,
            2 => ElementState::Full,
            _ => ElementState::Reading,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ElementState::Empty => "EMPTY",
            ElementState::Writing => "WRITING",
            ElementState::Full => "FULL",
            ElementState::Reading => "READING",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width/alignment flags work in the state table
        f.pad(self.as_str())
    }
}

/// Exclusive claim on a slot for writing.
///
/// Returned by `reserve_push_index`. The holder writes the payload at
/// `index()` in the external buffer and then hands the token back to either
/// `commit_push_index` or `abort_push_index_reservation`, both of which take
/// it by value so a reservation can be released only once.
#[must_use = "a push reservation must be committed or aborted, or the slot stays WRITING forever"]
#[derive(Debug, PartialEq, Eq)]
pub struct PushReservation {
    generation: u32,
    index: u32,
}

impl PushReservation {
    pub(crate) fn new(generation: u32, index: u32) -> Self {
        Self { generation, index }
    }

    /// The lap of the buffer this reservation belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Physical slot in the external payload array.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn into_parts(self) -> (u32, u32) {
        (self.generation, self.index)
    }
}

/// Exclusive claim on a published slot for reading.
///
/// Returned by `reserve_pop_index` and consumed by `commit_pop_index`.
#[must_use = "a pop reservation must be committed, or the slot stays READING forever"]
#[derive(Debug, PartialEq, Eq)]
pub struct PopReservation {
    generation: u32,
    index: u32,
}

impl PopReservation {
    pub(crate) fn new(generation: u32, index: u32) -> Self {
        Self { generation, index }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn into_parts(self) -> (u32, u32) {
        (self.generation, self.index)
    }
}

/// A slot released by `clear_pop_index`.
///
/// The slot has already been recycled for the next generation when this is
/// returned; the caller only needs it to dispose of the payload at `index`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Disposed {
    pub generation: u32,
    pub index: u32,
}

/// Point-in-time view of one state word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub generation: u32,
    pub state: ElementState,
}

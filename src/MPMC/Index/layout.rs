//! Bit layout of the shared words and the pure helpers that pack and unpack them.
//!
//! Every shared word is a `u32`, so the generation budget does not depend on the
//! target's native word size.
//!
//! State words (one per slot):
//!
//! ```text
//! |31 30 . . . . . . . . . . . . . . . . . . . 2 | 1 0 |
//! |            generation count                  |state|
//! ```
//!
//! Push cursor (the pop cursor has the same layout with bit 31 always clear):
//!
//! ```text
//! |31|30 . . . . . . . . . . . . . . . . . . . . . . 0 |
//! |D |     (generation * capacity) + slot index        |
//! ```
//!
//! Both cursors and every state word must be able to represent at least two
//! generations, which leaves one generation bit beside the disabled flag and
//! caps the capacity at `2^30`.

use crate::MPMC::Structs::ElementState;

/// Bits of a state word holding the `ElementState`.
pub const ELEMENT_STATE_MASK: u32 = 0x3;

/// Shift applied to the generation count in a state word.
pub const GENERATION_COUNT_SHIFT: u32 = 2;

/// Number of distinct generations a state word can hold.
pub const NUM_STATE_GENERATIONS: u32 = 1 << (u32::BITS - GENERATION_COUNT_SHIFT);

/// Disabled flag in the push cursor.
pub const DISABLED_STATE_MASK: u32 = 1 << (u32::BITS - 1);

/// Number of distinct combined indices a cursor can hold.
pub const NUM_COMBINED_INDICES: u32 = DISABLED_STATE_MASK;

/// Largest capacity for which a cursor still covers two generations.
pub const MAX_CAPACITY: u32 = 1 << (u32::BITS - 2);

#[inline]
pub const fn encode_element_state(generation: u32, state: ElementState) -> u32 {
    (generation << GENERATION_COUNT_SHIFT) | state as u32
}

#[inline]
pub const fn decode_generation(encoded: u32) -> u32 {
    encoded >> GENERATION_COUNT_SHIFT
}

#[inline]
pub const fn decode_state(encoded: u32) -> ElementState {
    ElementState::from_bits(encoded & ELEMENT_STATE_MASK)
}

#[inline]
pub const fn is_disabled_flag_set(push_index: u32) -> bool {
    push_index & DISABLED_STATE_MASK != 0
}

#[inline]
pub const fn discard_disabled_flag(push_index: u32) -> u32 {
    push_index & !DISABLED_STATE_MASK
}

/// Number of complete generations both the cursors and the state words can
/// represent for a buffer of `capacity` slots.
///
/// # Panics
/// If `capacity` is zero.
pub fn num_representable_generations(capacity: u32) -> u32 {
    assert!(capacity > 0, "capacity must be non-zero");
    (NUM_COMBINED_INDICES / capacity).min(NUM_STATE_GENERATIONS)
}

/// Signed distance from `subtrahend` to `minuend` on a circle of `modulo` values.
///
/// The result is folded into `(-modulo / 2, modulo / 2]`, so a value that has
/// wrapped past zero still compares as "ahead". Operands exactly half the
/// circle apart compare as `minuend` ahead.
///
/// # Panics
/// If `modulo > 2^31` or either operand is not below `modulo`.
pub fn circular_difference(minuend: u32, subtrahend: u32, modulo: u32) -> i32 {
    assert!(modulo <= NUM_COMBINED_INDICES, "modulo {modulo} out of range");
    assert!(minuend < modulo, "minuend {minuend} >= modulo {modulo}");
    assert!(subtrahend < modulo, "subtrahend {subtrahend} >= modulo {modulo}");

    let modulo = i64::from(modulo);
    let difference = i64::from(minuend) - i64::from(subtrahend);
    let folded = if 2 * difference > modulo {
        difference - modulo
    } else if 2 * difference <= -modulo {
        difference + modulo
    } else {
        difference
    };
    folded as i32
}

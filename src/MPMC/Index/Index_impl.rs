use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed, Release, SeqCst};
use std::thread;

use crossbeam_utils::CachePadded;
use tracing::{debug, trace};

use super::layout::{
    self, decode_generation, decode_state, discard_disabled_flag, encode_element_state,
    is_disabled_flag_set, DISABLED_STATE_MASK, MAX_CAPACITY,
};
use super::Index::RingIndexManager;
use crate::error::{CapacityError, IndexError};
use crate::MPMC::Structs::{Disposed, ElementState, PopReservation, PushReservation};

impl RingIndexManager {
    /// Create a manager for a buffer of `capacity` slots, all `(0, EMPTY)`.
    ///
    /// # Panics
    /// If `capacity` is zero or larger than `layout::MAX_CAPACITY`.
    pub fn new(capacity: u32) -> Self {
        match Self::try_new(capacity) {
            Ok(manager) => manager,
            Err(e) => panic!("RingIndexManager::new(): {e}"),
        }
    }

    /// Fallible form of [`RingIndexManager::new`].
    pub fn try_new(capacity: u32) -> Result<Self, CapacityError> {
        Self::with_generation_limit(capacity, None)
    }

    pub(crate) fn with_generation_limit(
        capacity: u32,
        generation_limit: Option<u32>,
    ) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        if capacity > MAX_CAPACITY {
            return Err(CapacityError::TooLarge {
                capacity,
                max: MAX_CAPACITY,
            });
        }

        let mut generations = layout::num_representable_generations(capacity);
        if let Some(limit) = generation_limit {
            if limit < 2 {
                return Err(CapacityError::GenerationLimit { limit });
            }
            generations = generations.min(limit);
        }

        let max_generation = generations - 1;
        // generations * capacity <= 2^31, so this cannot overflow
        let max_combined_index = generations * capacity - 1;

        let empty = encode_element_state(0, ElementState::Empty);
        let states = (0..capacity)
            .map(|_| AtomicU32::new(empty))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            capacity,
            max_generation,
            max_combined_index,
            "ring index manager created"
        );

        Ok(Self {
            push_index: CachePadded::new(AtomicU32::new(0)),
            pop_index: CachePadded::new(AtomicU32::new(0)),
            states,
            capacity,
            max_generation,
            max_combined_index,
        })
    }

    #[inline]
    pub(crate) fn next_generation(&self, generation: u32) -> u32 {
        if generation == self.max_generation {
            0
        } else {
            generation + 1
        }
    }

    #[inline]
    pub(crate) fn next_combined_index(&self, combined: u32) -> u32 {
        if combined == self.max_combined_index {
            0
        } else {
            combined + 1
        }
    }

    /// Try to move `cursor` from `combined` to the following combined index.
    /// Returns the value the cursor holds afterwards as far as this thread knows.
    #[inline]
    fn advance_cursor(&self, cursor: &AtomicU32, combined: u32) -> u32 {
        let next = self.next_combined_index(combined);
        match cursor.compare_exchange(combined, next, SeqCst, Relaxed) {
            Ok(_) => next,
            Err(actual) => actual,
        }
    }

    #[inline]
    fn state(&self, index: u32) -> &AtomicU32 {
        &self.states[index as usize]
    }

    /// Claim the next free slot for writing.
    ///
    /// Returns `IndexError::Disabled` if the push side is disabled and
    /// `IndexError::Full` if the slot at the push cursor still holds last
    /// lap's element.
    pub fn reserve_push_index(&self) -> Result<PushReservation, IndexError> {
        let mut loaded = self.push_index.load(Relaxed);

        // A full slot must be observed on two attempts at the same cursor value
        // before reporting FULL. This absorbs the push/pop race on a buffer of
        // capacity 1.
        let mut saved: Option<u32> = None;

        loop {
            if is_disabled_flag_set(loaded) {
                trace!("push reservation refused, manager disabled");
                return Err(IndexError::Disabled);
            }

            let combined = discard_disabled_flag(loaded);
            let generation = combined / self.capacity;
            let index = combined % self.capacity;

            let compare = encode_element_state(generation, ElementState::Empty);
            let swap = encode_element_state(generation, ElementState::Writing);

            let was = match self.state(index).compare_exchange(compare, swap, AcqRel, Acquire) {
                Ok(_) => {
                    self.advance_cursor(&self.push_index, combined);
                    return Ok(PushReservation::new(generation, index));
                }
                Err(was) => was,
            };

            // Either last lap's element is still here, or another producer
            // already took this slot during this lap.
            let difference = generation.wrapping_sub(decode_generation(was)) as i32;
            if difference == 1 || difference == -(self.max_generation as i32) {
                if decode_state(was) == ElementState::Reading {
                    trace!(generation, index, "push waiting on in-progress read");
                    thread::yield_now();
                    loaded = self.push_index.load(Relaxed);
                    continue;
                }
                if saved != Some(loaded) {
                    saved = Some(loaded);
                    loaded = self.push_index.load(Relaxed);
                    continue;
                }
                trace!(generation, index, "push reservation refused, buffer full");
                return Err(IndexError::Full);
            }

            loaded = self.advance_cursor(&self.push_index, combined);
        }
    }

    /// Publish the element written under `reservation`, making it poppable.
    ///
    /// # Panics
    /// If the slot is not `(generation, WRITING)`.
    pub fn commit_push_index(&self, reservation: PushReservation) {
        let (generation, index) = reservation.into_parts();
        self.assert_slot(generation, index, ElementState::Writing, "commit_push_index");

        // The WRITING state is exclusively ours, no CAS needed.
        self.state(index)
            .store(encode_element_state(generation, ElementState::Full), Release);
    }

    /// Claim the oldest published slot for reading.
    ///
    /// Returns `IndexError::Empty` if the slot at the pop cursor holds no
    /// element for the cursor's generation.
    pub fn reserve_pop_index(&self) -> Result<PopReservation, IndexError> {
        let mut loaded = self.pop_index.load(Relaxed);

        loop {
            let generation = loaded / self.capacity;
            let index = loaded % self.capacity;

            let compare = encode_element_state(generation, ElementState::Full);
            let swap = encode_element_state(generation, ElementState::Reading);

            let was = match self.state(index).compare_exchange(compare, swap, AcqRel, Acquire) {
                Ok(_) => {
                    self.advance_cursor(&self.pop_index, loaded);
                    return Ok(PopReservation::new(generation, index));
                }
                Err(was) => was,
            };

            if decode_generation(was) != generation {
                // Last lap's reader has not finished, or nothing was pushed yet
                trace!(generation, index, "pop reservation refused, buffer empty");
                return Err(IndexError::Empty);
            }

            match decode_state(was) {
                ElementState::Empty => {
                    trace!(generation, index, "pop reservation refused, buffer empty");
                    return Err(IndexError::Empty);
                }
                ElementState::Writing | ElementState::Full => {
                    // A producer is mid-write, or this thread slept through a
                    // whole lap.
                    trace!(generation, index, "pop waiting on in-progress write");
                    thread::yield_now();
                    loaded = self.pop_index.load(Relaxed);
                }
                ElementState::Reading => {
                    loaded = self.advance_cursor(&self.pop_index, loaded);
                }
            }
        }
    }

    /// Release the slot read under `reservation` for the next generation of writers.
    ///
    /// # Panics
    /// If the slot is not `(generation, READING)`.
    pub fn commit_pop_index(&self, reservation: PopReservation) {
        let (generation, index) = reservation.into_parts();
        self.assert_slot(generation, index, ElementState::Reading, "commit_pop_index");

        self.state(index).store(
            encode_element_state(self.next_generation(generation), ElementState::Empty),
            Release,
        );
    }

    /// Refuse all further push reservations. In-flight reservations and the
    /// pop side are unaffected.
    pub fn disable(&self) {
        let previous = self.push_index.fetch_or(DISABLED_STATE_MASK, SeqCst);
        if !is_disabled_flag_set(previous) {
            debug!(push_index = previous, "push side disabled");
        }
    }

    /// Allow push reservations again.
    pub fn enable(&self) {
        let previous = self.push_index.fetch_and(!DISABLED_STATE_MASK, SeqCst);
        if is_disabled_flag_set(previous) {
            debug!(
                push_index = discard_disabled_flag(previous),
                "push side enabled"
            );
        }
    }

    /// Reserve and release the slot at the pop cursor in one step, provided the
    /// cursor has not yet reached `(end_generation, end_index)`.
    ///
    /// Used to dispose of the remaining elements when tearing a queue down.
    /// Returns `IndexError::DrainLimit` once the pop cursor is at or past the
    /// bound.
    ///
    /// # Panics
    /// If `end_generation > max_generation()` or `end_index >= capacity()`.
    pub fn clear_pop_index(&self, end_generation: u32, end_index: u32) -> Result<Disposed, IndexError> {
        assert!(
            end_generation <= self.max_generation,
            "clear_pop_index(): end generation {end_generation} > max generation {}",
            self.max_generation
        );
        assert!(
            end_index < self.capacity,
            "clear_pop_index(): end index {end_index} >= capacity {}",
            self.capacity
        );

        let end_combined = end_generation * self.capacity + end_index;
        let modulo = self.max_combined_index + 1;
        let mut loaded = self.pop_index.load(Relaxed);

        let (generation, index) = loop {
            if layout::circular_difference(end_combined, loaded, modulo) <= 0 {
                return Err(IndexError::DrainLimit);
            }

            let generation = loaded / self.capacity;
            let index = loaded % self.capacity;

            // READING only for now; the slot is marked EMPTY after the cursor
            // moves so a racing popper never reports a spurious empty queue.
            let compare = encode_element_state(generation, ElementState::Full);
            let swap = encode_element_state(generation, ElementState::Reading);

            match self.state(index).compare_exchange(compare, swap, AcqRel, Acquire) {
                Ok(_) => break (generation, index),
                Err(was) => match decode_state(was) {
                    ElementState::Writing | ElementState::Full => {
                        trace!(generation, index, "clear waiting on in-progress write");
                        thread::yield_now();
                        loaded = self.pop_index.load(Relaxed);
                    }
                    ElementState::Empty | ElementState::Reading => {
                        loaded = self.advance_cursor(&self.pop_index, loaded);
                    }
                },
            }
        };

        self.advance_cursor(&self.pop_index, loaded);
        self.state(index).store(
            encode_element_state(self.next_generation(generation), ElementState::Empty),
            Release,
        );

        Ok(Disposed { generation, index })
    }

    /// Give up a push reservation without publishing an element.
    ///
    /// Only valid when every element before the reservation has been disposed
    /// of, i.e. the pop cursor refers exactly to this `(generation, index)`.
    /// The pop cursor moves past the slot and the slot is recycled.
    ///
    /// # Panics
    /// If the slot is not `(generation, WRITING)` or the pop cursor is
    /// somewhere else.
    pub fn abort_push_index_reservation(&self, reservation: PushReservation) {
        let (generation, index) = reservation.into_parts();
        self.assert_slot(
            generation,
            index,
            ElementState::Writing,
            "abort_push_index_reservation",
        );

        let loaded = self.pop_index.load(Relaxed);
        assert_eq!(
            loaded,
            generation * self.capacity + index,
            "abort_push_index_reservation(): pop cursor does not refer to generation {generation}, index {index}"
        );

        self.advance_cursor(&self.pop_index, loaded);
        self.state(index).store(
            encode_element_state(self.next_generation(generation), ElementState::Empty),
            Release,
        );
    }

    /// Instantaneous number of occupied slots, in `[0, capacity]`.
    ///
    /// Advisory only: the value may be stale by the time it is returned.
    pub fn length(&self) -> u32 {
        // The push cursor must be loaded before the pop cursor (both SeqCst).
        // Then the difference can only exceed the capacity if the pop cursor
        // wrapped around `max_combined_index` in between, and the queue was empty.
        let push = discard_disabled_flag(self.push_index.load(SeqCst));
        let pop = self.pop_index.load(SeqCst);

        let difference = push.wrapping_sub(pop) as i32;
        if difference >= 0 {
            if difference as u32 > self.capacity {
                return 0;
            }
            return difference as u32;
        }

        if i64::from(difference) < -i64::from(self.max_combined_index / 2) {
            // push wrapped past max_combined_index, pop has not
            let wrapped = i64::from(difference) + i64::from(self.max_combined_index) + 1;
            return wrapped.min(i64::from(self.capacity)) as u32;
        }
        0
    }

    /// `true` unless `disable()` has been called since the last `enable()`.
    pub fn is_enabled(&self) -> bool {
        !is_disabled_flag_set(self.push_index.load(SeqCst))
    }

    fn assert_slot(&self, generation: u32, index: u32, expected: ElementState, op: &str) {
        assert!(
            generation <= self.max_generation,
            "{op}(): generation {generation} > max generation {}",
            self.max_generation
        );
        assert!(
            index < self.capacity,
            "{op}(): index {index} >= capacity {}",
            self.capacity
        );

        let current = self.state(index).load(Relaxed);
        assert!(
            current == encode_element_state(generation, expected),
            "{op}(): slot {index} is {{ {} | {} }}, expected {{ {generation} | {expected} }}",
            decode_generation(current),
            decode_state(current),
        );
    }
}

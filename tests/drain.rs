// Teardown protocol: disable the push side, dispose of what is left with
// clear_pop_index, and abort in-flight reservations at the head of the queue.
use dmxp_ringindex::{
    Disposed, ElementState, IndexError, IndexManagerBuilder, RingIndexManager, SlotSnapshot,
};

fn push(manager: &RingIndexManager) -> (u32, u32) {
    let reservation = manager.reserve_push_index().expect("push should succeed");
    let position = (reservation.generation(), reservation.index());
    manager.commit_push_index(reservation);
    position
}

fn pop(manager: &RingIndexManager) -> (u32, u32) {
    let reservation = manager.reserve_pop_index().expect("pop should succeed");
    let position = (reservation.generation(), reservation.index());
    manager.commit_pop_index(reservation);
    position
}

#[test]
fn clear_up_to_push_cursor() {
    let manager = RingIndexManager::new(8);
    for _ in 0..5 {
        push(&manager);
    }

    manager.disable();
    let (end_generation, end_index) = manager.push_position();
    assert_eq!((end_generation, end_index), (0, 5));

    for i in 0..5 {
        assert_eq!(
            manager.clear_pop_index(end_generation, end_index),
            Ok(Disposed {
                generation: 0,
                index: i
            })
        );
        assert_eq!(
            manager.slot_state(i),
            SlotSnapshot {
                generation: 1,
                state: ElementState::Empty
            }
        );
    }
    assert_eq!(
        manager.clear_pop_index(end_generation, end_index),
        Err(IndexError::DrainLimit)
    );
    assert_eq!(manager.length(), 0);
    assert_eq!(manager.reserve_pop_index(), Err(IndexError::Empty));

    manager.enable();
    assert_eq!(push(&manager), (0, 5));
    assert_eq!(pop(&manager), (0, 5));
}

#[test]
fn clear_stops_at_bound() {
    let manager = RingIndexManager::new(4);
    for _ in 0..4 {
        push(&manager);
    }

    assert_eq!(manager.clear_pop_index(0, 2).map(|d| d.index), Ok(0));
    assert_eq!(manager.clear_pop_index(0, 2).map(|d| d.index), Ok(1));
    assert_eq!(manager.clear_pop_index(0, 2), Err(IndexError::DrainLimit));
    // a bound behind the pop cursor is also refused
    assert_eq!(manager.clear_pop_index(0, 1), Err(IndexError::DrainLimit));

    // the rest is still there for ordinary consumers
    assert_eq!(manager.length(), 2);
    assert_eq!(pop(&manager), (0, 2));
    assert_eq!(pop(&manager), (0, 3));
}

#[test]
fn clear_on_empty_manager() {
    let manager = RingIndexManager::new(4);
    assert_eq!(manager.clear_pop_index(0, 0), Err(IndexError::DrainLimit));
}

#[test]
fn abort_after_clearing_predecessors() {
    let manager = RingIndexManager::new(4);
    push(&manager);
    push(&manager);

    // The producer of the third element fails to write its payload.
    let failed = manager.reserve_push_index().expect("slot free");
    let (generation, index) = (failed.generation(), failed.index());
    assert_eq!((generation, index), (0, 2));

    assert_eq!(manager.clear_pop_index(generation, index).map(|d| d.index), Ok(0));
    assert_eq!(manager.clear_pop_index(generation, index).map(|d| d.index), Ok(1));
    assert_eq!(
        manager.clear_pop_index(generation, index),
        Err(IndexError::DrainLimit)
    );

    manager.abort_push_index_reservation(failed);
    assert_eq!(manager.pop_position(), (0, 3));
    assert_eq!(
        manager.slot_state(2),
        SlotSnapshot {
            generation: 1,
            state: ElementState::Empty
        }
    );
    assert_eq!(manager.length(), 0);

    // the queue carries on normally
    assert_eq!(push(&manager), (0, 3));
    assert_eq!(push(&manager), (1, 0));
    assert_eq!(pop(&manager), (0, 3));
    assert_eq!(pop(&manager), (1, 0));
}

#[test]
fn abort_on_fresh_manager() {
    let manager = RingIndexManager::new(1);
    for generation in 0..4 {
        let reservation = manager.reserve_push_index().expect("slot free");
        assert_eq!(reservation.generation(), generation);
        manager.abort_push_index_reservation(reservation);
        assert_eq!(manager.reserve_pop_index(), Err(IndexError::Empty));
    }
}

#[test]
#[should_panic(expected = "pop cursor does not refer to")]
fn abort_with_undisposed_predecessor_panics() {
    let manager = RingIndexManager::new(4);
    push(&manager);
    let reservation = manager.reserve_push_index().expect("slot free");
    manager.abort_push_index_reservation(reservation);
}

#[test]
#[should_panic(expected = "clear_pop_index()")]
fn clear_with_out_of_range_bound_panics() {
    let manager = RingIndexManager::new(4);
    let _ = manager.clear_pop_index(0, 4);
}

#[test]
fn clear_across_combined_index_wrap() {
    // two generations of two slots: combined indices 0..=3
    let manager = IndexManagerBuilder::new()
        .with_capacity(2)
        .with_generation_limit(2)
        .build()
        .expect("valid configuration");

    // move both cursors to combined index 3
    for _ in 0..3 {
        push(&manager);
        pop(&manager);
    }
    assert_eq!(manager.pop_position(), (1, 1));

    // elements at combined 3 and 0; the bound wraps to combined 1
    assert_eq!(push(&manager), (1, 1));
    assert_eq!(push(&manager), (0, 0));
    let (end_generation, end_index) = manager.push_position();
    assert_eq!((end_generation, end_index), (0, 1));

    assert_eq!(
        manager.clear_pop_index(end_generation, end_index),
        Ok(Disposed {
            generation: 1,
            index: 1
        })
    );
    assert_eq!(
        manager.clear_pop_index(end_generation, end_index),
        Ok(Disposed {
            generation: 0,
            index: 0
        })
    );
    assert_eq!(
        manager.clear_pop_index(end_generation, end_index),
        Err(IndexError::DrainLimit)
    );
    assert_eq!(manager.length(), 0);
}

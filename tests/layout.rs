// Bit-layout tests for the state words and cursors. These pin the encoding
// so that a change to the shifts or masks shows up here first.
use dmxp_ringindex::MPMC::Index::layout::{
    circular_difference, decode_generation, decode_state, discard_disabled_flag,
    encode_element_state, is_disabled_flag_set, num_representable_generations,
    DISABLED_STATE_MASK, MAX_CAPACITY, NUM_COMBINED_INDICES, NUM_STATE_GENERATIONS,
};
use dmxp_ringindex::ElementState;

#[test]
fn test_constants() {
    assert_eq!(NUM_STATE_GENERATIONS, 1 << 30);
    assert_eq!(DISABLED_STATE_MASK, 0x8000_0000);
    assert_eq!(NUM_COMBINED_INDICES, 1 << 31);
    assert_eq!(MAX_CAPACITY, 1 << 30);
}

#[test]
fn test_state_word_encoding() {
    let states = [
        ElementState::Empty,
        ElementState::Writing,
        ElementState::Full,
        ElementState::Reading,
    ];
    for generation in [0, 1, 7, NUM_STATE_GENERATIONS - 1] {
        for state in states {
            let encoded = encode_element_state(generation, state);
            assert_eq!(decode_generation(encoded), generation);
            assert_eq!(decode_state(encoded), state);
        }
    }

    // the state lives in the two low bits
    assert_eq!(encode_element_state(0, ElementState::Empty), 0);
    assert_eq!(encode_element_state(0, ElementState::Reading), 3);
    assert_eq!(encode_element_state(5, ElementState::Full), (5 << 2) | 2);
}

#[test]
fn test_disabled_flag() {
    assert!(!is_disabled_flag_set(0));
    assert!(!is_disabled_flag_set(DISABLED_STATE_MASK - 1));
    assert!(is_disabled_flag_set(DISABLED_STATE_MASK));
    assert!(is_disabled_flag_set(DISABLED_STATE_MASK | 42));

    assert_eq!(discard_disabled_flag(DISABLED_STATE_MASK | 42), 42);
    assert_eq!(discard_disabled_flag(42), 42);
}

#[test]
fn test_num_representable_generations() {
    // small buffers are limited by the state word
    assert_eq!(num_representable_generations(1), 1 << 30);
    assert_eq!(num_representable_generations(2), 1 << 30);
    // larger ones by the cursor
    assert_eq!(num_representable_generations(4), 1 << 29);
    assert_eq!(num_representable_generations(3), (1u32 << 31) / 3);
    assert_eq!(num_representable_generations(MAX_CAPACITY), 2);
}

#[test]
#[should_panic]
fn test_num_representable_generations_zero() {
    num_representable_generations(0);
}

#[test]
fn test_circular_difference() {
    assert_eq!(circular_difference(5, 3, 10), 2);
    assert_eq!(circular_difference(3, 5, 10), -2);
    assert_eq!(circular_difference(0, 0, 10), 0);

    // minuend has wrapped past zero
    assert_eq!(circular_difference(1, 9, 10), 2);
    // subtrahend has wrapped past zero
    assert_eq!(circular_difference(9, 1, 10), -2);

    // exactly half way is always positive
    assert_eq!(circular_difference(5, 0, 10), 5);
    assert_eq!(circular_difference(0, 5, 10), 5);
    assert_eq!(circular_difference(1, 0, 3), 1);
    assert_eq!(circular_difference(0, 1, 3), -1);

    let modulo = NUM_COMBINED_INDICES;
    assert_eq!(circular_difference(0, modulo - 1, modulo), 1);
    assert_eq!(circular_difference(modulo - 1, 0, modulo), -1);
}

#[test]
#[should_panic]
fn test_circular_difference_operand_out_of_range() {
    circular_difference(10, 0, 10);
}

mod builder;

pub use builder::IndexManagerBuilder;

pub mod Index {
    pub mod Index;
    pub mod Index_impl;
    pub mod layout;
    mod debug;
    mod getters;
    pub use Index::RingIndexManager; // re-export for stable path
}

pub mod Structs {
    pub mod Index_Structs;
    pub use Index_Structs::{Disposed, ElementState, PopReservation, PushReservation, SlotSnapshot}; // re-export for stable path
}

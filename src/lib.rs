// Module naming follows project convention (MPMC = Multi-Producer Multi-Consumer)
#[allow(non_snake_case)]
pub mod MPMC;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod error;

pub use error::{CapacityError, IndexError};
pub use MPMC::Index::RingIndexManager;
pub use MPMC::IndexManagerBuilder;
pub use MPMC::Structs::{Disposed, ElementState, PopReservation, PushReservation, SlotSnapshot};

use crate::error::CapacityError;
use crate::MPMC::Index::RingIndexManager;

pub struct IndexManagerBuilder {
    capacity: u32,
    generation_limit: Option<u32>,
}

impl Default for IndexManagerBuilder {
    fn default() -> Self {
        Self {
            capacity: 1024, // 1024 slots
            generation_limit: None, // as many generations as the encoding allows
        }
    }
}

impl IndexManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Cap the number of generations before the generation count wraps to 0.
    ///
    /// The effective count is the smaller of `limit` and what the encoding can
    /// represent for the chosen capacity. Small limits make the wraparound
    /// paths reachable in a few laps; `limit` must be at least 2.
    pub fn with_generation_limit(mut self, limit: u32) -> Self {
        self.generation_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<RingIndexManager, CapacityError> {
        RingIndexManager::with_generation_limit(self.capacity, self.generation_limit)
    }
}

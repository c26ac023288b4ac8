use super::Index::RingIndexManager;
use std::fmt;

// Proxy implementations that call the standalone debug functions
impl fmt::Debug for RingIndexManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_index_manager(self, f)
    }
}

impl fmt::Display for RingIndexManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::write_state_table(self, f)
    }
}

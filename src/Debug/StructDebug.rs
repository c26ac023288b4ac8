use std::fmt;
use crate::MPMC::Index::RingIndexManager;

/// Debug function for RingIndexManager
///
/// Shows the derived constants and the decoded cursors, but not the
/// per-slot table (use `Display` or `print` for that).
pub fn debug_index_manager(manager: &RingIndexManager, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingIndexManager")
        .field("capacity", &manager.capacity())
        .field("enabled", &manager.is_enabled())
        .field("max_generation", &manager.max_generation())
        .field("max_combined_index", &manager.max_combined_index())
        .field("push", &manager.push_position())
        .field("pop", &manager.pop_position())
        .finish_non_exhaustive()
}

/// Diagnostic dump of the cursors, derived constants and every slot.
///
/// ```text
///         capacity: 4
///          enabled: true
/// ...
///        0: { 1   | EMPTY   } <-- push
///        1: { 0   | FULL    } <-- pop
/// ```
pub fn write_state_table(manager: &RingIndexManager, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (push_generation, push_index) = manager.push_position();
    let (pop_generation, pop_index) = manager.pop_position();

    writeln!(f)?;
    writeln!(f, "        capacity: {}", manager.capacity())?;
    writeln!(f, "         enabled: {}", manager.is_enabled())?;
    writeln!(f, "   maxGeneration: {}", manager.max_generation())?;
    writeln!(f, "maxCombinedIndex: {}", manager.max_combined_index())?;
    writeln!(f, "  pushGeneration: {push_generation}")?;
    writeln!(f, "       pushIndex: {push_index}")?;
    writeln!(f, "   popGeneration: {pop_generation}")?;
    writeln!(f, "        popIndex: {pop_index}")?;

    for i in 0..manager.capacity() {
        let slot = manager.slot_state(i);
        write!(f, "{:>8}: {{ {:<3} | {:<7} }}", i, slot.generation, slot.state)?;

        if push_index == i && pop_index == i {
            write!(f, " <-- push & pop")?;
        } else if push_index == i {
            write!(f, " <-- push")?;
        } else if pop_index == i {
            write!(f, " <-- pop")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

//! Tally of the fixes made by a cleanup pass

use std::fmt;

/// Number of corrections made, by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Levels whose position or size was snapped to the world grid
    pub levels_snapped: usize,
    /// Layer instances removed for lack of a definition
    pub layers_removed: usize,
    /// Entity lists cleared on non-entity layers
    pub entity_lists_cleared: usize,
    /// IntGrids cleared on non-IntGrid layers
    pub int_grids_cleared: usize,
    /// IntGrids resampled to match the level's cell count
    pub int_grids_resampled: usize,
    pub auto_tiles_removed: usize,
    pub entities_removed: usize,
    /// Entities resized or moved onto the grid
    pub entities_fixed: usize,
    pub field_instances_removed: usize,
    /// Levels whose layer instances were reordered
    pub levels_reordered: usize,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.levels_snapped
            + self.layers_removed
            + self.entity_lists_cleared
            + self.int_grids_cleared
            + self.int_grids_resampled
            + self.auto_tiles_removed
            + self.entities_removed
            + self.entities_fixed
            + self.field_instances_removed
            + self.levels_reordered
    }

    /// Whether the pass found nothing to fix
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("no problems found");
        }
        write!(
            f,
            "{} fixes ({} levels snapped, {} layers removed, {} entities removed, {} entities fixed, {} auto tiles removed, {} fields removed)",
            self.total(),
            self.levels_snapped,
            self.layers_removed,
            self.entities_removed,
            self.entities_fixed,
            self.auto_tiles_removed,
            self.field_instances_removed
        )
    }
}

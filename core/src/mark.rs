use serde::{Deserialize, Serialize};

/// Per-cell visual state tracked by the puzzle engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellMark {
    Plain,
    Selected,
    Found,
}

impl CellMark {
    /// Cells that are part of a found word stay out of any later gesture.
    pub const fn is_selectable(self) -> bool {
        !matches!(self, Self::Found)
    }
}

impl Default for CellMark {
    fn default() -> Self {
        Self::Plain
    }
}

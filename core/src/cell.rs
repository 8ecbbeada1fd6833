use serde::{Deserialize, Serialize};

/// What the player currently sees of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A single board cell.
///
/// `adjacent` is only meaningful once mines have been placed; until then every
/// cell reads as a mine-free zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub adjacent: u8,
    pub visibility: Visibility,
}

impl Cell {
    pub const fn is_hidden(&self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }
}

//! Board and game-state engine for a single-player mine-clearing puzzle.
//!
//! A front end drives a [`GameSession`] with reveal, flag and chord intents and
//! renders the [`Snapshot`] each intent returns. Mines are placed lazily on the
//! first reveal so the first move is always safe.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::MarkOutcome;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
pub mod reveal;
mod session;
mod snapshot;
mod types;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self {
            width,
            height,
            mines,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from a mine fraction in `[0, 1]`, rounded to the nearest
    /// whole mine and capped so at least one cell stays safe.
    pub fn from_density(width: Coord, height: Coord, density: f64) -> Result<Self> {
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(GameError::InvalidConfig);
        }

        let total_cells = mult(width, height);
        if total_cells == 0 {
            return Err(GameError::InvalidConfig);
        }

        // the product is within [0, total_cells]
        let mines = (density * f64::from(total_cells)).round() as CellCount;
        Self::new(width, height, mines.min(total_cells - 1))
    }

    pub const fn beginner() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            width: 16,
            height: 16,
            mines: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            width: 30,
            height: 16,
            mines: 99,
        }
    }

    /// Checks `width, height >= 1` and `mines < width * height`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfig)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// `(height, width)`, the shape of the grid this config describes.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_dimensions_and_mines() {
        assert!(BoardConfig::new(3, 3, 0).is_ok());
        assert!(BoardConfig::new(3, 3, 8).is_ok());
        assert_eq!(BoardConfig::new(3, 3, 9), Err(GameError::InvalidConfig));
        assert_eq!(BoardConfig::new(0, 3, 1), Err(GameError::InvalidConfig));
        assert_eq!(BoardConfig::new(3, 0, 1), Err(GameError::InvalidConfig));
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            BoardConfig::beginner(),
            BoardConfig::intermediate(),
            BoardConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(BoardConfig::expert().size(), (16, 30));
        assert_eq!(BoardConfig::expert().safe_cells(), 381);
    }

    #[test]
    fn from_density_rounds_and_caps() {
        assert_eq!(BoardConfig::from_density(20, 20, 0.1).unwrap().mines, 40);
        assert_eq!(BoardConfig::from_density(3, 3, 0.0).unwrap().mines, 0);
        assert_eq!(BoardConfig::from_density(3, 3, 1.0).unwrap().mines, 8);
        assert_eq!(
            BoardConfig::from_density(3, 3, 1.5),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            BoardConfig::from_density(3, 3, f64::NAN),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            BoardConfig::from_density(0, 3, 0.5),
            Err(GameError::InvalidConfig)
        );
    }

    #[test]
    fn deserialized_config_is_revalidated() {
        let config: BoardConfig =
            serde_json::from_str(r#"{"width":2,"height":2,"mines":4}"#).unwrap();

        assert_eq!(config.validate(), Err(GameError::InvalidConfig));
    }
}

use core::num::Saturating;
use core::time::Duration;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Unstarted -> InProgress
/// - Unstarted -> Won
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No cell revealed yet, mines not placed
    #[default]
    Unstarted,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_unstarted(self) -> bool {
        matches!(self, Self::Unstarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum MineSource {
    Seeded(u64),
    Fixed(Vec<Coord2>),
}

/// One game from the first click to a win or loss.
///
/// The session exclusively owns its [`Grid`]; every change goes through
/// [`reveal`](Self::reveal), [`toggle_flag`](Self::toggle_flag),
/// [`chord`](Self::chord) or [`reset`](Self::reset), and each of them returns a
/// fresh [`Snapshot`]. Callers on several threads must serialize access.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: BoardConfig,
    grid: Grid,
    phase: Phase,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    start_tile: StartTile,
    source: MineSource,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// New session whose mines will be placed at random from `seed`.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::from_source(config, MineSource::Seeded(seed))
    }

    /// New session with a predetermined layout.
    ///
    /// The layout still has to respect the first-move policy: revealing one of
    /// these mines first fails with [`GameError::InvalidLayout`].
    pub fn with_mines(config: BoardConfig, mines: Vec<Coord2>) -> Result<Self> {
        config.validate()?;
        let (height, width) = config.size();
        FixedMineGenerator::new(mines.clone()).place(
            &mut Grid::new(height, width)?,
            config.mines,
            &BTreeSet::new(),
        )?;
        Self::from_source(config, MineSource::Fixed(mines))
    }

    /// Sets the first-move policy. A fixed layout that cannot keep the
    /// [`StartTile::AlwaysZero`] neighborhood clear falls back to
    /// [`StartTile::SimpleSafe`], same as random placement.
    pub fn with_start_tile(mut self, start_tile: StartTile) -> Self {
        self.start_tile = start_tile;
        self
    }

    fn from_source(config: BoardConfig, source: MineSource) -> Result<Self> {
        config.validate()?;
        let (height, width) = config.size();
        log::debug!(
            "New {}x{} session with {} mines",
            width,
            height,
            config.mines
        );

        Ok(Self {
            config,
            grid: Grid::new(height, width)?,
            phase: Phase::default(),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            start_tile: StartTile::default(),
            source,
            started_at: None,
            ended_at: None,
            triggered_mine: None,
        })
    }

    /// Discards this game and starts a fresh one. An invalid `config` leaves
    /// the current game untouched.
    pub fn reset(&mut self, config: BoardConfig, seed: u64) -> Result<Snapshot> {
        *self = Self::new(config, seed)?.with_start_tile(self.start_tile);
        Ok(self.snapshot())
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn start_tile(&self) -> StartTile {
        self.start_tile
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    /// Revealed safe cells, mines shown after a loss are not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Mines not yet flagged; negative when the player over-flags.
    pub fn remaining_mines(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count.0 as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Time since the first reveal, frozen once the game ends.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or_else(Instant::now)
                .duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self, Vec::new())
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Snapshot> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.phase.is_unstarted() {
            if !self.grid[coords].is_hidden() {
                return Ok(self.snapshot());
            }
            self.place_mines(coords)?;
            self.mark_started();
        }

        let changed = reveal::reveal(&mut self.grid, coords)?;
        Ok(self.apply(changed))
    }

    pub fn chord(&mut self, coords: Coord2) -> Result<Snapshot> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        if self.phase.is_unstarted() {
            return Ok(self.snapshot());
        }

        let changed = reveal::chord(&mut self.grid, coords)?;
        Ok(self.apply(changed))
    }

    /// Flags or unflags a hidden cell. Allowed before the first reveal, which
    /// neither starts the clock nor places mines.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Snapshot> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        if reveal::toggle_flag(&mut self.grid, coords)?.has_update() {
            if self.grid[coords].is_flagged() {
                self.flagged_count += 1;
            } else {
                self.flagged_count -= 1;
            }
        }

        Ok(self.snapshot())
    }

    fn place_mines(&mut self, start: Coord2) -> Result<()> {
        let excluded = self
            .start_tile
            .exclusion(&self.grid, start, self.config.mines);

        match &self.source {
            MineSource::Seeded(seed) => RandomMineGenerator::new(*seed).place(
                &mut self.grid,
                self.config.mines,
                &excluded,
            ),
            MineSource::Fixed(mines) => {
                let placed = FixedMineGenerator::new(mines.clone()).place(
                    &mut self.grid,
                    self.config.mines,
                    &excluded,
                );
                match placed {
                    Err(GameError::InvalidLayout) if excluded.len() > 1 => {
                        log::warn!("Fixed layout touches the start zone, fallback to simple safe");
                        FixedMineGenerator::new(mines.clone()).place(
                            &mut self.grid,
                            self.config.mines,
                            &BTreeSet::from([start]),
                        )
                    }
                    placed => placed,
                }
            }
        }
    }

    /// Folds newly revealed cells into the counters and settles the phase.
    fn apply(&mut self, changed: BTreeSet<Coord2>) -> Snapshot {
        let mut hit_mine = None;
        for &coords in &changed {
            if self.grid[coords].mine {
                hit_mine = hit_mine.or(Some(coords));
            } else {
                self.revealed_count += 1;
            }
        }

        let mut changed: Vec<Coord2> = changed.into_iter().collect();
        if let Some(mine) = hit_mine {
            self.triggered_mine = Some(mine);
            changed.extend(reveal::reveal_mines(&mut self.grid));
            changed.sort_unstable();
            self.end_game(false);
        } else if self.revealed_count.0 == self.config.safe_cells() {
            self.end_game(true);
        }

        Snapshot::from_session(self, changed)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn mark_started(&mut self) {
        if self.phase.is_unstarted() {
            let now = Instant::now();
            self.started_at = Some(now);
            self.phase = Phase::InProgress;
            log::debug!("Game started");
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won { Phase::Won } else { Phase::Lost };
        self.ended_at = Some(Instant::now());
        log::debug!("Game ended: {:?} after {:?}", self.phase, self.elapsed());
    }
}

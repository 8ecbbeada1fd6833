use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfig,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("Not enough free cells to place the requested mines")]
    InsufficientSpace,
    #[error("Mine layout does not match the board")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;

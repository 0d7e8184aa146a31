use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No deck has been dealt yet")]
    NotDealt,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game is still in progress")]
    StillPlaying,
}

pub type Result<T> = core::result::Result<T, GameError>;

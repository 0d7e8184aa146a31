#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use card::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod card;
mod deck;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_attempts: u8,
    pub mismatch_delay_ms: u32,
    /// A cleared board only wins once the timer is strictly past this.
    pub min_win_secs: Seconds,
}

impl GameConfig {
    pub const DEFAULT_ATTEMPTS: u8 = 20;
    pub const MAX_ATTEMPTS: u8 = 99;
    pub const MISMATCH_DELAY_MS: u32 = 1000;
    pub const MIN_WIN_SECS: Seconds = 2;

    pub const fn new_unchecked(max_attempts: u8) -> Self {
        Self {
            max_attempts,
            mismatch_delay_ms: Self::MISMATCH_DELAY_MS,
            min_win_secs: Self::MIN_WIN_SECS,
        }
    }

    pub fn new(max_attempts: u8) -> Self {
        Self::new_unchecked(max_attempts.clamp(1, Self::MAX_ATTEMPTS))
    }

    pub const fn start_halves(&self) -> HalfAttempts {
        halves(self.max_attempts)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_ATTEMPTS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Matched,
    /// Two different faces are showing; the caller owes a [`Session::resolve_mismatch`] after the delay.
    Mismatched,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Matched => true,
            Mismatched => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Won,
    Lost,
}

impl GameResult {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Won => "You Won!",
            Self::Lost => "You Lost!",
        }
    }
}

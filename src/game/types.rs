//! Entities of a run: the bird, pipe pairs, coins and the session record.

use crate::core::config::GameConfig;

/// The player's bird. Horizontal position is fixed by the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Vertical position of the bird's center. 0 = ceiling, grows downward.
    pub y: f64,
    /// Vertical velocity in units/second (positive = falling).
    pub velocity: f64,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            y: config.bird_start_y,
            velocity: 0.0,
        }
    }
}

/// A top and bottom pipe with a vertical gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    /// Left edge of both pipes.
    pub x: f64,
    pub gap_center: f64,
    pub gap_height: f64,
    /// Set once the pair has been scored.
    pub passed: bool,
}

impl PipePair {
    pub fn new(x: f64, gap_center: f64, gap_height: f64) -> Self {
        Self {
            x,
            gap_center,
            gap_height,
            passed: false,
        }
    }

    /// Bottom edge of the top pipe.
    pub fn gap_top(&self) -> f64 {
        self.gap_center - self.gap_height / 2.0
    }

    /// Top edge of the bottom pipe.
    pub fn gap_bottom(&self) -> f64 {
        self.gap_center + self.gap_height / 2.0
    }
}

/// A collectible coin that bobs as it scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub x: f64,
    pub y: f64,
    /// Center of the bob.
    pub base_y: f64,
    /// Bob phase in radians.
    pub phase: f64,
    pub value: u64,
    pub special: bool,
}

/// Where the run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the first flap. Physics paused.
    #[default]
    Ready,
    Playing,
    GameOver,
}

/// Per-run bookkeeping. Replaced wholesale on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    pub phase: Phase,
    /// Coins picked up this run, plus the score conversion once the run ends.
    pub coins_earned: u64,
    /// Whether this run set a new high score. Valid in GameOver.
    pub new_high_score: bool,
    /// Whether the GameOver commit reached the store.
    pub saved: bool,
}

//! Flappy - terminal Flappy Bird with a persistent high score, coins and
//! unlockable skins.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod build_info;
pub mod core;
pub mod game;
pub mod input;
pub mod persistence;
pub mod profile;
pub mod ui;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::core::constants::*;
pub use game::{Game, GameInput, InputOutcome, Phase, RenderSnapshot, TickResult};
pub use persistence::{load_profile, save_profile, FileStore, MemoryStore, ProfileStore};
pub use profile::{PersistentProfile, SkinId};

//! Flappy Bird simulation.
//!
//! The bird falls under gravity and flaps upward on input while pipe pairs
//! scroll in from the right. Passing a pair scores a point; touching a pipe
//! or the ground ends the run.

pub mod logic;
pub mod physics;
pub mod types;

pub use logic::*;
pub use types::*;

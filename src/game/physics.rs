//! Per-tick simulation: bird motion, obstacle field, coins, collision, scoring.
//!
//! Everything here is a plain function over entity data so it can be driven
//! and tested without a running game.

use super::types::{Bird, Coin, PipePair};
use crate::core::config::GameConfig;
use rand::Rng;

/// What happened to the bird during one physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdTick {
    Airborne,
    /// Clamped at the ceiling. Not fatal.
    HitCeiling,
    /// Reached the ground. Ends the run.
    Grounded,
}

/// Apply gravity and integrate position (semi-implicit Euler).
///
/// `velocity += gravity * dt` (capped at terminal velocity), then
/// `y += velocity * dt`. The bird never leaves `[0, ground_y]`.
pub fn tick(bird: &mut Bird, dt: f64, config: &GameConfig) -> BirdTick {
    bird.velocity = (bird.velocity + config.gravity * dt).min(config.terminal_velocity);
    bird.y += bird.velocity * dt;

    if bird.y < 0.0 {
        bird.y = 0.0;
        bird.velocity = 0.0;
        BirdTick::HitCeiling
    } else if bird.y >= config.ground_y() {
        bird.y = config.ground_y();
        BirdTick::Grounded
    } else {
        BirdTick::Airborne
    }
}

/// Set velocity to the flap impulse, whatever the bird was doing.
pub fn flap(bird: &mut Bird, config: &GameConfig) {
    bird.velocity = config.flap_impulse;
}

/// Append a pair at the right edge once the last one has moved far enough in.
///
/// Returns true if a pair was spawned.
pub fn spawn_pipe<R: Rng>(pipes: &mut Vec<PipePair>, rng: &mut R, config: &GameConfig) -> bool {
    let due = match pipes.last() {
        Some(last) => last.x < config.field_width - config.spawn_distance,
        None => true,
    };
    if !due {
        return false;
    }

    let (min_center, max_center) = config.gap_center_range();
    let gap_center = if max_center > min_center {
        rng.gen_range(min_center..=max_center)
    } else {
        min_center
    };

    pipes.push(PipePair::new(config.field_width, gap_center, config.gap_height));
    true
}

/// Scroll pairs left and drop the ones that left the field.
pub fn advance_pipes(pipes: &mut Vec<PipePair>, dt: f64, config: &GameConfig) {
    let shift = config.scroll_speed * dt;
    for pipe in pipes.iter_mut() {
        pipe.x -= shift;
    }
    pipes.retain(|p| p.x + config.pipe_width >= 0.0);
}

/// True if the bird is out of the field or its bounding box touches a pipe.
pub fn check_collision(bird: &Bird, pipes: &[PipePair], config: &GameConfig) -> bool {
    if bird.y < 0.0 || bird.y >= config.ground_y() {
        return true;
    }

    let r = config.bird_radius;
    let bird_left = config.bird_x - r;
    let bird_right = config.bird_x + r;
    let bird_top = bird.y - r;
    let bird_bottom = bird.y + r;

    pipes.iter().any(|pipe| {
        let overlaps_x = bird_right > pipe.x && bird_left < pipe.x + config.pipe_width;
        overlaps_x && (bird_top < pipe.gap_top() || bird_bottom > pipe.gap_bottom())
    })
}

/// Mark pairs that moved past the bird and return how many were new.
pub fn check_scoring(pipes: &mut [PipePair], config: &GameConfig) -> u32 {
    let mut newly_passed = 0;
    for pipe in pipes.iter_mut().filter(|p| !p.passed) {
        if pipe.x < config.bird_x {
            pipe.passed = true;
            newly_passed += 1;
        }
    }
    newly_passed
}

/// Drop a coin into the field.
///
/// If the newest pipe is fully on-screen the coin sits between it and the
/// next spawn, near that pipe's gap height. Otherwise it goes in the middle
/// third of the field at the right edge.
pub fn spawn_coin<R: Rng>(
    coins: &mut Vec<Coin>,
    pipes: &[PipePair],
    rng: &mut R,
    config: &GameConfig,
) {
    let rightmost = pipes
        .iter()
        .max_by(|a, b| a.x.total_cmp(&b.x))
        .filter(|p| p.x + config.pipe_width < config.field_width);

    let (x, base_y) = match rightmost {
        Some(pipe) => {
            let quarter = pipe.gap_height / 4.0;
            let y = pipe.gap_center + rng.gen_range(-quarter..=quarter);
            let x = pipe.x + config.pipe_width + (config.spawn_distance - config.pipe_width) / 2.0;
            (x, y)
        }
        None => {
            let h = config.field_height;
            (config.field_width, rng.gen_range(h / 3.0..=h * 2.0 / 3.0))
        }
    };

    let special = rng.gen_bool(config.special_coin_chance);
    coins.push(Coin {
        x,
        y: base_y,
        base_y,
        phase: rng.gen_range(0.0..std::f64::consts::TAU),
        value: if special {
            config.special_coin_value
        } else {
            config.coin_value
        },
        special,
    });
}

/// Scroll and bob coins, dropping the ones that left the field.
pub fn advance_coins(coins: &mut Vec<Coin>, dt: f64, config: &GameConfig) {
    let shift = config.scroll_speed * dt;
    for coin in coins.iter_mut() {
        coin.x -= shift;
        coin.phase = (coin.phase + config.coin_bob_speed * dt) % std::f64::consts::TAU;
        coin.y = coin.base_y + coin.phase.sin() * config.coin_bob_range;
    }
    coins.retain(|c| c.x >= -2.0 * config.coin_radius);
}

/// Remove coins touching the bird and return their total value.
pub fn collect_coins(bird: &Bird, coins: &mut Vec<Coin>, config: &GameConfig) -> u64 {
    let reach = config.coin_radius + config.bird_radius;
    let mut collected = 0;
    coins.retain(|coin| {
        let dx = coin.x - config.bird_x;
        let dy = coin.y - bird.y;
        if dx.hypot(dy) < reach {
            collected += coin.value;
            false
        } else {
            true
        }
    });
    collected
}

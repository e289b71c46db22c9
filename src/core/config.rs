//! Runtime tuning parameters.
//!
//! Every value has a compiled default in [`super::constants`]. A `config.json`
//! in the user's config directory may override any subset of fields; a file
//! that fails to parse or validate is ignored in favor of the defaults.

use super::constants::*;
use crate::utils::persistence::{config_dir, load_json};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// A configuration value that would make the simulation meaningless.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("flap impulse must point upward (negative), got {0}")]
    FlapNotUpward(f64),
    #[error("pipe gap of {gap} (with margin {margin}) does not fit a field of height {height}")]
    GapTooLarge { gap: f64, margin: f64, height: f64 },
    #[error("pipe gap margin {0} must be zero or more")]
    NegativeMargin(f64),
    #[error("bird x {0} lies outside the play field")]
    BirdOutsideField(f64),
    #[error("bird start y {0} lies outside the play field")]
    StartOutsideField(f64),
    #[error("special coin chance {0} is not a probability")]
    BadChance(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f64,
    pub field_height: f64,

    pub bird_x: f64,
    pub bird_start_y: f64,
    pub bird_radius: f64,

    pub gravity: f64,
    pub flap_impulse: f64,
    pub terminal_velocity: f64,
    pub scroll_speed: f64,

    pub pipe_width: f64,
    pub gap_height: f64,
    pub gap_margin: f64,
    pub spawn_distance: f64,

    pub coin_interval: f64,
    pub coin_radius: f64,
    pub coin_value: u64,
    pub special_coin_value: u64,
    pub special_coin_chance: f64,
    pub coin_bob_range: f64,
    pub coin_bob_speed: f64,
    pub coins_per_point: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            bird_x: BIRD_X,
            bird_start_y: BIRD_START_Y,
            bird_radius: BIRD_RADIUS,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            terminal_velocity: TERMINAL_VELOCITY,
            scroll_speed: SCROLL_SPEED,

            pipe_width: PIPE_WIDTH,
            gap_height: PIPE_GAP_HEIGHT,
            gap_margin: PIPE_GAP_MARGIN,
            spawn_distance: PIPE_SPAWN_DISTANCE,

            coin_interval: COIN_INTERVAL_SECONDS,
            coin_radius: COIN_RADIUS,
            coin_value: COIN_VALUE,
            special_coin_value: SPECIAL_COIN_VALUE,
            special_coin_chance: SPECIAL_COIN_CHANCE,
            coin_bob_range: COIN_BOB_RANGE,
            coin_bob_speed: COIN_BOB_SPEED,
            coins_per_point: COINS_PER_POINT,
        }
    }
}

impl GameConfig {
    /// Lowest point the bird's center can reach: its bottom edge on the
    /// field floor. Touching it ends the run.
    pub fn ground_y(&self) -> f64 {
        self.field_height - self.bird_radius
    }

    /// Inclusive range of gap centers that keep the whole gap on-screen.
    pub fn gap_center_range(&self) -> (f64, f64) {
        let half = self.gap_height / 2.0;
        let min = half + self.gap_margin;
        let max = (self.field_height - half - self.gap_margin).max(min);
        (min, max)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("bird_radius", self.bird_radius),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("scroll_speed", self.scroll_speed),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("spawn_distance", self.spawn_distance),
            ("coin_interval", self.coin_interval),
            ("coin_radius", self.coin_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive(name));
            }
        }

        if !(self.flap_impulse < 0.0) {
            return Err(ConfigError::FlapNotUpward(self.flap_impulse));
        }
        if !(self.gap_margin >= 0.0 && self.gap_margin.is_finite()) {
            return Err(ConfigError::NegativeMargin(self.gap_margin));
        }
        if self.gap_height + 2.0 * self.gap_margin > self.field_height {
            return Err(ConfigError::GapTooLarge {
                gap: self.gap_height,
                margin: self.gap_margin,
                height: self.field_height,
            });
        }
        if !(0.0..=self.field_width).contains(&self.bird_x) {
            return Err(ConfigError::BirdOutsideField(self.bird_x));
        }
        if !(0.0..self.ground_y()).contains(&self.bird_start_y) {
            return Err(ConfigError::StartOutsideField(self.bird_start_y));
        }
        if !(0.0..=1.0).contains(&self.special_coin_chance) {
            return Err(ConfigError::BadChance(self.special_coin_chance));
        }
        Ok(())
    }

    /// Load `config.json` from the user config directory.
    ///
    /// Missing file means defaults. A malformed or invalid file is logged and
    /// replaced by defaults so a bad edit never keeps the game from starting.
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join(CONFIG_FILENAME)),
            Err(e) => {
                warn!(error = %e, "no config directory, using default tuning");
                Self::default()
            }
        }
    }

    /// Load tuning from an explicit file, with the same fallbacks as [`load`].
    ///
    /// [`load`]: GameConfig::load
    pub fn load_from(path: &Path) -> Self {
        match load_json::<Self>(path) {
            Ok(Some(config)) => match config.validate() {
                Ok(()) => {
                    info!(path = %path.display(), "loaded tuning overrides");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Write `contents` to a config file in a unique temporary directory.
    fn temp_config(contents: Option<&str>) -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "flappy-config-test-{}-{}",
            std::process::id(),
            id
        ));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        let path = dir.join(CONFIG_FILENAME);
        if let Some(contents) = contents {
            fs::write(&path, contents).expect("Failed to write config");
        }
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config: GameConfig = serde_json::from_str(r#"{ "gravity": 1200.0 }"#).unwrap();
        assert!((config.gravity - 1200.0).abs() < f64::EPSILON);
        assert!((config.flap_impulse - FLAP_IMPULSE).abs() < f64::EPSILON);
        assert!((config.field_height - FIELD_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_downward_flap_rejected() {
        let config = GameConfig {
            flap_impulse: 50.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FlapNotUpward(50.0)));
    }

    #[test]
    fn test_oversized_gap_rejected() {
        let config = GameConfig {
            gap_height: 600.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_gravity_rejected() {
        let config = GameConfig {
            gravity: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NotPositive("gravity")));
    }

    #[test]
    fn test_gap_center_range_keeps_gap_on_screen() {
        let config = GameConfig::default();
        let (min, max) = config.gap_center_range();
        let half = config.gap_height / 2.0;
        assert!(min - half >= 0.0);
        assert!(max + half <= config.field_height);
        assert!(min <= max);
    }

    #[test]
    fn test_negative_margin_rejected() {
        let config = GameConfig {
            gap_margin: -70.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeMargin(-70.0)));

        let config = GameConfig {
            gap_margin: f64::INFINITY,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeMargin(_))
        ));
    }

    #[test]
    fn test_bird_x_outside_field_rejected() {
        let config = GameConfig {
            bird_x: -5.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BirdOutsideField(-5.0)));

        let config = GameConfig {
            bird_x: f64::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BirdOutsideField(_))
        ));
    }

    #[test]
    fn test_ground_is_bird_bottom_on_floor() {
        let config = GameConfig::default();
        assert!((config.ground_y() + config.bird_radius - config.field_height).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let path = temp_config(None);
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
        cleanup(&path);
    }

    #[test]
    fn test_load_from_applies_valid_overrides() {
        let path = temp_config(Some(r#"{ "gravity": 1200.0, "gap_height": 140.0 }"#));
        let config = GameConfig::load_from(&path);
        assert!((config.gravity - 1200.0).abs() < f64::EPSILON);
        assert!((config.gap_height - 140.0).abs() < f64::EPSILON);
        assert!((config.scroll_speed - SCROLL_SPEED).abs() < f64::EPSILON);
        cleanup(&path);
    }

    #[test]
    fn test_load_from_malformed_json_gives_defaults() {
        let path = temp_config(Some("{ gravity: "));
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
        cleanup(&path);
    }

    #[test]
    fn test_load_from_invalid_values_gives_defaults() {
        let path = temp_config(Some(r#"{ "gravity": 0 }"#));
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
        cleanup(&path);

        let path = temp_config(Some(r#"{ "gap_margin": -70.0 }"#));
        assert_eq!(GameConfig::load_from(&path), GameConfig::default());
        cleanup(&path);
    }
}

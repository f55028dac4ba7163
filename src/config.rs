//! Game configuration
//!
//! Read from an optional JSON file; any field left out keeps its default, so
//! `{}` is a valid config.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{GameRules, Size};

/// Frame and countdown pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub frame_rate: u32,
    pub countdown_beats: u8,
    pub beat_millis: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            countdown_beats: COUNTDOWN_BEATS,
            beat_millis: BEAT_MILLIS,
        }
    }
}

impl Timing {
    pub fn frame(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    pub fn beat(&self) -> Duration {
        Duration::from_millis(self.beat_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub rules: GameRules,
    pub timing: Timing,
    /// Play sound cues
    pub sound: bool,
    /// Fixed seed for gap placement
    pub seed: Option<u64>,
    /// Directory of `<theme>.json` manifests replacing the built-in palettes
    pub theme_dir: Option<PathBuf>,
    /// Log destination; logging is off without one unless `RUST_LOG` is set
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            timing: Timing::default(),
            sound: true,
            seed: None,
            theme_dir: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys: serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GameRules {
            physics,
            obstacles,
            difficulty,
        } = &self.rules;

        if physics.gravity <= 0.0 {
            return invalid("physics.gravity must be positive");
        }
        if physics.jump_velocity >= 0.0 {
            return invalid("physics.jump_velocity must be negative (upward)");
        }
        if obstacles.width <= 0.0 || obstacles.gap_height <= 0.0 || obstacles.pitch <= 0.0 {
            return invalid("obstacles.width, gap_height and pitch must be positive");
        }
        if obstacles.min_live == 0 {
            return invalid("obstacles.min_live must be at least 1");
        }
        // An obstacle whose trailing edge lands exactly on 0 expires unscored when spawn_x is 0
        if physics.spawn_x <= 0.0 {
            return invalid("physics.spawn_x must be positive");
        }
        if obstacles.gap_top_min <= 0 || obstacles.gap_top_min > obstacles.gap_top_max {
            return invalid("obstacles.gap_top_min..=gap_top_max must be a non-empty range above 0");
        }
        if difficulty.base_speed <= 0.0 || difficulty.speed_increment < 0.0 {
            return invalid("difficulty.base_speed must be positive and speed_increment not negative");
        }
        if difficulty.max_speed < difficulty.base_speed {
            return invalid("difficulty.max_speed must not be below base_speed");
        }
        if self.timing.frame_rate == 0 {
            return invalid("timing.frame_rate must be at least 1");
        }
        Ok(())
    }

    /// The gap range must leave solid pipe above and below in this field,
    /// and the actor must fit inside it horizontally.
    pub fn check_field(&self, field: Size, actor: Size) -> Result<(), ConfigError> {
        let o = &self.rules.obstacles;
        let lowest_bottom = o.gap_top_max as f32 + o.gap_height;
        if lowest_bottom >= field.height {
            return Err(ConfigError::Invalid(format!(
                "gaps reach y={lowest_bottom} but the play field is only {} tall",
                field.height
            )));
        }
        let spawn_x = self.rules.physics.spawn_x;
        if spawn_x + actor.width > field.width {
            return Err(ConfigError::Invalid(format!(
                "an actor {} wide at physics.spawn_x={spawn_x} does not fit the {} wide play field",
                actor.width, field.width
            )));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(reason.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BoundaryPolicy;

    #[test]
    fn empty_object_is_the_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json(
            r#"{ "difficulty": { "max_speed": 4.0 }, "physics": { "boundary": "clamp" }, "seed": 9 }"#,
        )
        .unwrap();
        assert_eq!(config.rules.difficulty.max_speed, 4.0);
        assert_eq!(config.rules.difficulty.base_speed, 2.0);
        assert_eq!(config.rules.physics.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.rules.physics.gravity, 0.5);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn default_config_round_trips() {
        let json = Config::default().to_json();
        assert_eq!(Config::from_json(&json).unwrap(), Config::default());
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let err = Config::from_json(r#"{ "difficulty": { "base_speed": 8.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_minimum() {
        let err = Config::from_json(r#"{ "obstacles": { "min_live": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_json() {
        let err = Config::from_json("{ seed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    const ACTOR: Size = Size::new(30.0, 30.0);

    #[test]
    fn default_gaps_fit_the_default_field() {
        let config = Config::default();
        assert!(config.check_field(Size::new(400.0, 600.0), ACTOR).is_ok());
        assert!(config.check_field(Size::new(400.0, 450.0), ACTOR).is_err());
    }

    #[test]
    fn gaps_may_not_start_at_the_top_edge() {
        let err = Config::from_json(r#"{ "obstacles": { "gap_top_min": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn gaps_may_not_reach_the_bottom_edge() {
        let mut config = Config::default();
        config.rules.obstacles.gap_top_min = 100;
        config.rules.obstacles.gap_top_max = 200;
        config.rules.obstacles.gap_height = 400.0;
        assert!(config.validate().is_ok());
        assert!(config.check_field(Size::new(400.0, 600.0), ACTOR).is_err());
        assert!(config.check_field(Size::new(400.0, 601.0), ACTOR).is_ok());
    }

    #[test]
    fn spawn_x_must_be_inside_the_field() {
        for json in [
            r#"{ "physics": { "spawn_x": -100.0 } }"#,
            r#"{ "physics": { "spawn_x": 0.0 } }"#,
        ] {
            let err = Config::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }
        assert!(Config::from_json(r#"{ "physics": { "spawn_x": 1.0 } }"#).is_ok());
    }

    #[test]
    fn the_actor_must_fit_at_its_spawn_column() {
        let mut config = Config::default();
        config.rules.physics.spawn_x = 370.0;
        assert!(config.check_field(Size::new(400.0, 600.0), ACTOR).is_ok());
        config.rules.physics.spawn_x = 371.0;
        assert!(config.check_field(Size::new(400.0, 600.0), ACTOR).is_err());
    }

    #[test]
    fn timing_durations() {
        let timing = Timing::default();
        assert_eq!(timing.beat(), Duration::from_secs(1));
        assert!((timing.frame().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }
}

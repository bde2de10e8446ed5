//! Gameplay tuning.
//!
//! Every constant the simulation uses lives in [`Tuning`].  The defaults
//! reproduce the classic feel; a TOML file may override any subset of them.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ShooterError;

/// Environment variable naming an explicit tuning file.
pub const CONFIG_ENV: &str = "BOLT_SHOOTER_CONFIG";

/// Tuning file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "bolt_shooter.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── Screen ──
    /// Height of the grass band at the bottom of the screen.
    pub floor_height: f32,
    /// Upper bound for a single frame's delta time, in seconds.
    pub max_frame_dt: f32,

    // ── Player ──
    pub player_size: f32,
    pub player_speed: f32,
    pub gravity: f32,
    /// Upward velocity applied by a jump (positive number).
    pub jump_speed: f32,
    pub starting_ammunition: u32,
    pub shoot_cooldown: f32,
    /// Radians per second.
    pub aim_rate: f32,
    /// Most upward aim angle (negative).
    pub aim_min: f32,
    /// Most downward aim angle.
    pub aim_max: f32,

    // ── Projectile ──
    pub projectile_speed: f32,
    /// How far past the screen edges a bolt may fly before it is dropped.
    pub offscreen_margin: f32,

    // ── Target ──
    pub target_count: usize,
    pub target_size: f32,
    /// Spin in radians per second.
    pub target_spin: f32,
    /// Shrink speed relative to growth speed.
    pub shrink_factor: f32,

    // ── Rewards ──
    /// Probability that a hit refunds exactly one bolt.
    pub reward_one: f64,
    /// Probability that a hit refunds two bolts; the rest refunds three.
    pub reward_two: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            floor_height: 100.0,
            max_frame_dt: 0.1,

            player_size: 128.0,
            player_speed: 200.0,
            gravity: 1000.0,
            jump_speed: 500.0,
            starting_ammunition: 5,
            shoot_cooldown: 0.3,
            aim_rate: 0.5 * PI,
            aim_min: -0.25 * PI,
            aim_max: 0.1 * PI,

            projectile_speed: 1000.0,
            offscreen_margin: 100.0,

            target_count: 3,
            target_size: 64.0,
            target_spin: PI,
            shrink_factor: 3.0,

            reward_one: 0.85,
            reward_two: 0.12,
        }
    }
}

impl Tuning {
    pub fn from_toml_str(src: &str, path: &Path) -> Result<Self, ShooterError> {
        let tuning: Tuning = toml::from_str(src).map_err(|source| ShooterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tuning.validate(path)?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with: negative durations,
    /// sizes and rates, an inverted aim range, or reward odds above one.
    pub fn validate(&self, path: &Path) -> Result<(), ShooterError> {
        let invalid = |field: &'static str, reason: &'static str| ShooterError::ConfigInvalid {
            path: path.to_path_buf(),
            field,
            reason,
        };

        let non_negative = [
            ("floor_height", self.floor_height),
            ("max_frame_dt", self.max_frame_dt),
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("shoot_cooldown", self.shoot_cooldown),
            ("aim_rate", self.aim_rate),
            ("projectile_speed", self.projectile_speed),
            ("offscreen_margin", self.offscreen_margin),
            ("target_size", self.target_size),
            ("target_spin", self.target_spin),
            ("shrink_factor", self.shrink_factor),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }

        if self.aim_min > self.aim_max {
            return Err(invalid("aim_min", "must not exceed aim_max"));
        }
        for (field, value) in [("reward_one", self.reward_one), ("reward_two", self.reward_two)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be a probability"));
            }
        }
        if self.reward_one + self.reward_two > 1.0 {
            return Err(invalid("reward_two", "reward_one + reward_two must not exceed 1"));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ShooterError> {
        let src = std::fs::read_to_string(path).map_err(|source| ShooterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src, path)
    }
}

/// Where to look for a tuning file: the env override first, then the
/// working-directory default if it exists.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

/// Load tuning from the configured file, or defaults when there is none.
pub fn load_tuning() -> Result<Tuning, ShooterError> {
    match config_path() {
        Some(path) => {
            let tuning = Tuning::from_file(&path)?;
            tracing::info!(path = %path.display(), "loaded tuning");
            Ok(tuning)
        }
        None => Ok(Tuning::default()),
    }
}

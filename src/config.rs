//! Run configuration: which boss to face and how fast enemy bullets fly.
//!
//! Values come from an optional TOML file and are overridden by CLI flags
//! in the binary. Everything else is a compiled-in constant.
//!
//! ```toml
//! boss = "hourglass"        # or "random"
//! bullet_speed_scale = 1.2
//! seed = 42                 # optional, for reproducible runs
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{BossKind, BossSelection};
use crate::error::{ConfigError, Result};

pub const MIN_SPEED_SCALE: f32 = 0.5;
pub const MAX_SPEED_SCALE: f32 = 2.0;
pub const SPEED_SCALE_STEP: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Boss name, or `"random"`.
    pub boss: String,
    pub bullet_speed_scale: f32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { boss: "random".to_string(), bullet_speed_scale: 1.0, seed: None }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), boss = %config.boss, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.selection()?;
        validate_speed_scale(self.bullet_speed_scale)?;
        Ok(())
    }

    pub fn selection(&self) -> Result<BossSelection> {
        self.boss.parse()
    }
}

pub fn validate_speed_scale(scale: f32) -> Result<f32> {
    if scale.is_finite() && (MIN_SPEED_SCALE..=MAX_SPEED_SCALE).contains(&scale) {
        Ok(scale)
    } else {
        Err(ConfigError::InvalidSpeedScale(scale))
    }
}

/// One menu step up or down, kept inside the valid range and rounded to
/// a tenth so repeated steps do not drift.
pub fn step_speed_scale(scale: f32, up: bool) -> f32 {
    let next = if up { scale + SPEED_SCALE_STEP } else { scale - SPEED_SCALE_STEP };
    ((next * 10.0).round() / 10.0).clamp(MIN_SPEED_SCALE, MAX_SPEED_SCALE)
}

impl FromStr for BossKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        BossKind::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| ConfigError::UnknownBoss(s.to_string()))
    }
}

impl FromStr for BossSelection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("random") {
            Ok(BossSelection::Random)
        } else {
            s.parse().map(BossSelection::Fixed)
        }
    }
}

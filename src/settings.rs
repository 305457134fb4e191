//! Game tuning
//!
//! Loaded from a JSON file; every field falls back to the built-in constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (None = random per process)
    pub seed: Option<u64>,
    /// Paddle pixels per tick
    pub paddle_speed: f32,
    /// Ball pixels per tick on each axis at serve
    pub ball_speed: f32,
    /// Seconds between wall descents
    pub descent_interval_secs: f32,
    /// Points per destroyed block
    pub points_per_block: u32,
    /// Rows present at game start
    pub initial_rows: usize,
    /// Frame rate the driver paces to
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            descent_interval_secs: DESCENT_INTERVAL_SECS,
            points_per_block: POINTS_PER_BLOCK,
            initial_rows: INITIAL_ROWS,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Most rows that can start above the game-over line
    pub fn max_initial_rows() -> usize {
        ((GAME_OVER_LINE - TOP_ROW_Y - BLOCK_HEIGHT) / ROW_PITCH).floor() as usize + 1
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and sanitize settings from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, serde_json::Error> {
        let json = std::fs::read_to_string(path).map_err(serde_json::Error::io)?;
        Ok(Self::from_json(&json)?.sanitized())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Could not load {}: {}, using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.paddle_speed.is_finite() && self.paddle_speed > 0.0) {
            log::warn!("paddle_speed {} out of range, using {}", self.paddle_speed, defaults.paddle_speed);
            self.paddle_speed = defaults.paddle_speed;
        }
        if !(self.ball_speed.is_finite() && self.ball_speed > 0.0) {
            log::warn!("ball_speed {} out of range, using {}", self.ball_speed, defaults.ball_speed);
            self.ball_speed = defaults.ball_speed;
        }
        if !(self.descent_interval_secs.is_finite() && self.descent_interval_secs > 0.0) {
            log::warn!(
                "descent_interval_secs {} out of range, using {}",
                self.descent_interval_secs,
                defaults.descent_interval_secs
            );
            self.descent_interval_secs = defaults.descent_interval_secs;
        }
        let max_rows = Self::max_initial_rows();
        if self.initial_rows == 0 || self.initial_rows > max_rows {
            let rows = self.initial_rows.clamp(1, max_rows);
            log::warn!("initial_rows {} out of range, using {}", self.initial_rows, rows);
            self.initial_rows = rows;
        }
        if self.target_fps == 0 {
            log::warn!("target_fps 0 out of range, using {}", defaults.target_fps);
            self.target_fps = defaults.target_fps;
        }

        self
    }

    /// Fixed frame time matching `target_fps`
    pub fn frame_secs(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

//! Game settings and tuning
//!
//! Loaded from a JSON file on disk; anything missing falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{START_CLOCK, START_LIVES};
use crate::platform::KeyBindings;

/// Movement and physics constants, in pixels per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added each airborne frame
    pub gravity: f32,
    /// Cap on downward velocity
    pub max_fall_speed: f32,
    /// Horizontal acceleration while a direction key is held
    pub acceleration: f32,
    /// Cap on horizontal speed
    pub max_speed: f32,
    /// Velocity multiplier applied each idle frame (< 1)
    pub friction: f32,
    /// Below this horizontal speed an idle player stops outright
    pub stop_threshold: f32,
    /// Upward impulse of a jump
    pub jump_power: f32,
    /// Upward impulse after stomping an enemy
    pub stomp_bounce: f32,
    /// Frames of enemy immunity after taking damage
    pub hurt_invulnerability_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_fall_speed: 10.0,
            acceleration: 0.5,
            max_speed: 4.0,
            friction: 0.8,
            stop_threshold: 0.1,
            jump_power: 12.0,
            stomp_bounce: 8.0,
            hurt_invulnerability_frames: 120,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,

    // === Viewport ===
    /// Visible width in world pixels; drives camera scrolling
    pub viewport_width: f32,

    // === Session ===
    pub start_lives: u8,
    /// Countdown seconds at level start
    pub start_clock: u32,

    // === Input ===
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            viewport_width: 800.0,
            start_lives: START_LIVES,
            start_clock: START_CLOCK,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings {}: {err}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Malformed settings {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("brick_runner_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "start_lives": 5, "tuning": { "gravity": 0.25 } }"#)
                .unwrap();
        assert_eq!(settings.start_lives, 5);
        assert_eq!(settings.tuning.gravity, 0.25);
        assert_eq!(settings.tuning.jump_power, 12.0);
        assert_eq!(settings.start_clock, START_CLOCK);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(temp_path("does_not_exist.json"));
        assert_eq!(settings.start_lives, START_LIVES);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings.json");
        let mut settings = Settings::default();
        settings.viewport_width = 640.0;
        settings.tuning.max_speed = 6.0;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.viewport_width, 640.0);
        assert_eq!(loaded.tuning.max_speed, 6.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.viewport_width, 800.0);
        let _ = fs::remove_file(&path);
    }
}

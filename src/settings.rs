//! Game settings and preferences
//!
//! Read from a JSON file next to the executable. Anything missing falls back
//! to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE_HZ;

/// Default location of the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "city_runner_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Persistence ===
    /// Economy save record
    pub save_path: PathBuf,

    // === Loop ===
    /// Target simulation rate
    pub tick_rate_hz: u32,
    /// Fixed RNG seed (clock-derived when absent)
    pub seed: Option<u64>,

    // === Headless driver ===
    /// Jump automatically ahead of obstacles
    pub autopilot: bool,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Runs the headless driver plays before quitting
    pub demo_runs: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("gamedata.txt"),
            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
            autopilot: true,
            max_frames: None,
            demo_runs: 3,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values into usable ranges
    fn sanitized(mut self) -> Self {
        self.tick_rate_hz = self.tick_rate_hz.clamp(1, 1000);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}

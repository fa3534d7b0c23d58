//! Session settings and difficulty tiers
//!
//! Loaded from a JSON file by the native runner; everything has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;

/// Difficulty tier, fixed when a session is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Like [`Difficulty::from_name`], but unknown names fall back to the default tier
    pub fn parse(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {s:?}, using {}", Self::default().as_str());
            Self::default()
        })
    }

    /// Number of enemies in play
    pub fn enemy_count(&self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 4,
        }
    }

    /// Ticks between enemy moves (lower is faster)
    pub fn enemy_cadence(&self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        }
    }

    /// How long a collected power-up lasts
    pub fn power_up_ms(&self) -> i32 {
        match self {
            Difficulty::Easy => 8000,
            Difficulty::Medium => 6000,
            Difficulty::Hard => 4000,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// RNG seed for enemy directions, escape lengths and pickups
    pub seed: u64,
    /// Tick period in milliseconds, also the power-up decay step
    pub tick_ms: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: 0x5EED,
            tick_ms: TICK_MS,
        }
    }
}

impl Settings {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Tick period to simulate with. Non-positive values fall back to the default.
    pub fn tick_period(&self) -> i32 {
        if self.tick_ms > 0 {
            self.tick_ms
        } else {
            log::warn!("tick_ms must be positive, using {TICK_MS}");
            TICK_MS
        }
    }

    /// Parse settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.tick_ms = settings.tick_period();
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(err) => {
                log::warn!("Could not read {} ({err}), using defaults", path.display());
                Self::default()
            }
        }
    }
}

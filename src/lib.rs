//! Maze Chase - A grid maze chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, movement, enemies, power-ups, game state)
//! - `settings`: Difficulty and session configuration

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period in milliseconds (10 Hz)
    pub const TICK_MS: i32 = 100;

    /// Lives at the start of a session
    pub const START_LIVES: u8 = 3;

    /// Points for eating a pellet
    pub const PELLET_SCORE: u64 = 10;
    /// Points for collecting the power-up pickup
    pub const POWER_UP_SCORE: u64 = 50;
    /// Points for shooting down an enemy
    pub const ENEMY_KILL_SCORE: u64 = 200;

    /// Enemy move cycles spent in escape mode (inclusive range)
    pub const ESCAPE_CYCLES_MIN: u32 = 10;
    pub const ESCAPE_CYCLES_MAX: u32 = 15;

    /// Ticks between power-up spawn attempts (inclusive range)
    pub const PICKUP_COOLDOWN_MIN: u32 = 30;
    pub const PICKUP_COOLDOWN_MAX: u32 = 80;
    /// Chance a spawn attempt actually places a pickup
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.5;
    /// Rejection sampling budget per spawn attempt
    pub const PICKUP_SPAWN_SAMPLES: u32 = 64;
}

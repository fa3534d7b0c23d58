//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (by enemy index)
//! - No rendering or platform dependencies

pub mod enemy;
pub mod grid;
pub mod movement;
pub mod power;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use enemy::{Enemy, EnemyColor, EnemyMode};
pub use grid::{Grid, GridError, MazeLayout, TileKind, Zone};
pub use movement::{Direction, can_step, step};
pub use power::{PowerUp, Projectile};
pub use rng::GameRng;
pub use snapshot::Snapshot;
pub use state::{GamePhase, GameState, Player};
pub use tick::{TickInput, tick};

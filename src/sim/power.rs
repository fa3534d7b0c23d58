//! Power-up timing, pickup placement and projectiles
//!
//! A pickup appears now and then while the player is unpowered. Collecting it
//! grants a timed power state during which the player can fire projectiles
//! that knock enemies out until the power runs out.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::grid::{Grid, TileKind, Zone};
use super::movement::Direction;
use super::rng::GameRng;
use crate::consts::*;

/// Timed power state plus the pickup that grants it
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub active: bool,
    /// Milliseconds of power left (meaningful only while active)
    pub remaining_ms: i32,
    /// Pickup currently placed on the grid
    pub pickup: Option<IVec2>,
    /// Ticks until the next spawn attempt
    pub cooldown: u32,
}

impl PowerUp {
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            active: false,
            remaining_ms: 0,
            pickup: None,
            cooldown: roll_cooldown(rng),
        }
    }

    /// Collect the pickup if the player stands on it
    pub fn try_collect(&mut self, player: IVec2, duration_ms: i32) -> bool {
        if self.pickup != Some(player) {
            return false;
        }
        self.pickup = None;
        self.active = true;
        self.remaining_ms = duration_ms;
        log::info!("Power-up collected at {player}: {duration_ms} ms");
        true
    }

    /// Advance one tick. Returns true on the tick the power runs out.
    pub fn advance(&mut self, tick_ms: i32, grid: &Grid, home: &Zone, rng: &mut GameRng) -> bool {
        if self.active {
            self.remaining_ms -= tick_ms;
            if self.remaining_ms <= 0 {
                self.active = false;
                self.remaining_ms = 0;
                self.cooldown = roll_cooldown(rng);
                log::info!("Power-up expired");
                return true;
            }
            return false;
        }

        if self.pickup.is_some() {
            return false;
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            if rng.chance(PICKUP_SPAWN_CHANCE) {
                self.pickup = spawn_location(grid, home, rng);
                if let Some(pos) = self.pickup {
                    log::debug!("Power-up pickup spawned at {pos}");
                }
            }
            self.cooldown = roll_cooldown(rng);
        }
        false
    }
}

fn roll_cooldown(rng: &mut GameRng) -> u32 {
    rng.range_inclusive(PICKUP_COOLDOWN_MIN, PICKUP_COOLDOWN_MAX)
}

/// Uniform non-wall cell outside the home zone, by rejection sampling
fn spawn_location(grid: &Grid, home: &Zone, rng: &mut GameRng) -> Option<IVec2> {
    let cells = (grid.width() * grid.height()) as usize;
    (0..PICKUP_SPAWN_SAMPLES).find_map(|_| {
        let i = rng.index(cells) as i32;
        let pos = IVec2::new(i % grid.width(), i / grid.width());
        let tile = grid.tile_at(pos);
        let usable = matches!(tile, TileKind::Open | TileKind::Pellet) && !home.contains(pos);
        usable.then_some(pos)
    })
}

/// A shot travelling in a straight line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: IVec2,
    pub dir: Direction,
}

/// Spawn a projectile one cell ahead of `from`. Nothing spawns into a wall or
/// off the grid.
pub fn fire(grid: &Grid, from: IVec2, dir: Direction) -> Option<Projectile> {
    let pos = from + dir.delta();
    (grid.in_bounds(pos) && !grid.is_wall(pos)).then_some(Projectile { pos, dir })
}

/// Knock out the first live enemy on `pos`. Returns whether one was hit.
fn strike(pos: IVec2, enemies: &mut [Enemy]) -> bool {
    match enemies.iter_mut().find(|e| e.alive && e.pos == pos) {
        Some(enemy) => {
            enemy.alive = false;
            log::debug!("{:?} enemy shot at {pos}", enemy.color);
            true
        }
        None => false,
    }
}

/// Move every projectile one cell and resolve impacts.
///
/// Each projectile checks its current cell (an enemy may have walked into it),
/// then advances without wrapping, then checks the new cell. A projectile is
/// gone after its first hit. Returns the number of enemies knocked out.
pub fn advance_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut [Enemy],
    grid: &Grid,
) -> u32 {
    let mut hits = 0;
    projectiles.retain_mut(|shot| {
        if strike(shot.pos, enemies) {
            hits += 1;
            return false;
        }
        let next = shot.pos + shot.dir.delta();
        if !grid.in_bounds(next) || grid.is_wall(next) {
            return false;
        }
        shot.pos = next;
        if strike(shot.pos, enemies) {
            hits += 1;
            return false;
        }
        true
    });
    hits
}

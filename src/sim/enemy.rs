//! Enemy agents and their movement behavior
//!
//! Each enemy starts in `Escape` mode, heading away from the spawn cluster,
//! and switches to `Pursue` after a number of its own move cycles. All enemies
//! share one algorithm; only mode, cadence and RNG draws differ.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Zone};
use super::movement::{Direction, can_step, step};
use super::rng::GameRng;
use crate::consts::{ESCAPE_CYCLES_MAX, ESCAPE_CYCLES_MIN};

/// Identity/colour tag, assigned in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyColor {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl EnemyColor {
    pub const ORDER: [EnemyColor; 4] = [
        EnemyColor::Red,
        EnemyColor::Pink,
        EnemyColor::Cyan,
        EnemyColor::Orange,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ORDER[index % Self::ORDER.len()]
    }
}

/// Behavior mode. Escape always comes first and never comes back until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMode {
    Escape,
    Pursue,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: IVec2,
    pub spawn: IVec2,
    pub color: EnemyColor,
    pub dir: Direction,
    /// Ticks between moves (1 = every tick)
    pub cadence: u32,
    /// Ticks since the last move cycle
    pub tick_counter: u32,
    pub mode: EnemyMode,
    /// Move cycles left before switching to pursuit
    pub escape_cycles: u32,
    /// False after being shot; dead enemies are inert until reset
    pub alive: bool,
}

impl Enemy {
    pub fn new(spawn: IVec2, color: EnemyColor, cadence: u32, rng: &mut GameRng) -> Self {
        let mut enemy = Self {
            pos: spawn,
            spawn,
            color,
            dir: Direction::default(),
            cadence: cadence.max(1),
            tick_counter: 0,
            mode: EnemyMode::Escape,
            escape_cycles: 0,
            alive: true,
        };
        enemy.reset(rng);
        enemy
    }

    /// Back to spawn: alive, escaping, with fresh direction and escape length
    pub fn reset(&mut self, rng: &mut GameRng) {
        self.pos = self.spawn;
        self.alive = true;
        self.mode = EnemyMode::Escape;
        self.tick_counter = 0;
        self.dir = rng.direction();
        self.escape_cycles = rng.range_inclusive(ESCAPE_CYCLES_MIN, ESCAPE_CYCLES_MAX);
    }

    /// Count a tick. Returns true when this tick is a move cycle.
    fn tick_cadence(&mut self) -> bool {
        self.tick_counter += 1;
        if self.tick_counter >= self.cadence {
            self.tick_counter = 0;
            true
        } else {
            false
        }
    }

    /// One move cycle is spent; flip to pursuit once escape runs out
    fn finish_cycle(&mut self) {
        if self.mode == EnemyMode::Escape {
            self.escape_cycles = self.escape_cycles.saturating_sub(1);
            if self.escape_cycles == 0 {
                self.mode = EnemyMode::Pursue;
                log::trace!("{:?} enemy switches to pursuit at {}", self.color, self.pos);
            }
        }
    }

    /// Pick the direction for this move cycle, or None when boxed in.
    ///
    /// Without a preferred move the enemy keeps its current heading if that
    /// is legal, so it follows corridors instead of snapping back to the first
    /// open direction. Only then are Right, Down, Left, Up scanned in order.
    pub fn choose_direction(&self, grid: &Grid, home: &Zone, target: IVec2) -> Option<Direction> {
        let preferred = match self.mode {
            EnemyMode::Escape => escape_direction(grid, self.pos, home.center()),
            EnemyMode::Pursue => pursue_direction(grid, self.pos, target),
        };
        preferred.or_else(|| {
            std::iter::once(self.dir)
                .chain(Direction::ALL)
                .find(|dir| can_step(grid, self.pos, *dir))
        })
    }
}

/// First legal direction pointing away from the spawn cluster: vertical first
/// (Up when level with or above the centre), then horizontal (Right when level
/// with or right of it).
fn escape_direction(grid: &Grid, pos: IVec2, home_center: IVec2) -> Option<Direction> {
    let vertical = if pos.y <= home_center.y {
        Direction::Up
    } else {
        Direction::Down
    };
    let horizontal = if pos.x >= home_center.x {
        Direction::Right
    } else {
        Direction::Left
    };
    [vertical, horizontal]
        .into_iter()
        .find(|dir| can_step(grid, pos, *dir))
}

/// Neighbor closest to `target` by Manhattan distance, without wrapping.
///
/// Candidates are scored in a fixed order: toward the target on the axis with
/// the larger gap (horizontal on ties), toward it on the other axis, away on the
/// other axis, then away on the larger axis. The first minimum wins.
fn pursue_direction(grid: &Grid, pos: IVec2, target: IVec2) -> Option<Direction> {
    let gap = target - pos;
    let horizontal = if gap.x >= 0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let vertical = if gap.y >= 0 {
        Direction::Down
    } else {
        Direction::Up
    };
    let (major, minor) = if gap.x.abs() >= gap.y.abs() {
        (horizontal, vertical)
    } else {
        (vertical, horizontal)
    };

    let mut best: Option<(Direction, i32)> = None;
    for dir in [major, minor, minor.opposite(), major.opposite()] {
        let next = pos + dir.delta();
        if !grid.in_bounds(next) || grid.is_wall(next) {
            continue;
        }
        let dist = (target - next).abs().element_sum();
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((dir, dist));
        }
    }
    best.map(|(dir, _)| dir)
}

/// Advance every live enemy by one tick.
///
/// Enemies update in index order, in place. A move onto a cell held by another
/// live enemy is suppressed: earlier enemies are checked at their new cells,
/// later ones at the cells they have not yet left.
pub fn advance_enemies(enemies: &mut [Enemy], grid: &Grid, home: &Zone, target: IVec2) {
    for i in 0..enemies.len() {
        if !enemies[i].alive || !enemies[i].tick_cadence() {
            continue;
        }

        if let Some(dir) = enemies[i].choose_direction(grid, home, target) {
            let dest = step(grid, enemies[i].pos, dir);
            let blocked = enemies
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.alive && other.pos == dest);
            let enemy = &mut enemies[i];
            enemy.dir = dir;
            if !blocked {
                enemy.pos = dest;
            }
        }

        enemies[i].finish_cycle();
    }
}

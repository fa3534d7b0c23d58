//! Renderable per-tick view of a session
//!
//! Presentation layers read this instead of `GameState`, so they only ever
//! see whole ticks.

use glam::IVec2;
use serde::Serialize;

use super::enemy::{EnemyColor, EnemyMode};
use super::movement::Direction;
use super::power::Projectile;
use super::state::{GamePhase, GameState};
use crate::settings::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerPose {
    pub pos: IVec2,
    pub dir: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnemyPose {
    pub pos: IVec2,
    pub dir: Direction,
    pub color: EnemyColor,
    pub mode: EnemyMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub pellets_remaining: u32,
    pub power_active: bool,
    pub power_remaining_ms: i32,
    /// Maze rows as ASCII (`#` wall, `.` pellet, space open)
    pub grid: Vec<String>,
    pub player: PlayerPose,
    /// Live enemies only
    pub enemies: Vec<EnemyPose>,
    pub pickup: Option<IVec2>,
    pub projectiles: Vec<Projectile>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            difficulty: state.difficulty,
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            pellets_remaining: state.pellets_remaining(),
            power_active: state.power.active,
            power_remaining_ms: state.power.remaining_ms,
            grid: state.grid.rows(),
            player: PlayerPose {
                pos: state.player.pos,
                dir: state.player.dir,
            },
            enemies: state
                .enemies
                .iter()
                .filter(|e| e.alive)
                .map(|e| EnemyPose {
                    pos: e.pos,
                    dir: e.dir,
                    color: e.color,
                    mode: e.mode,
                })
                .collect(),
            pickup: state.power.pickup,
            projectiles: state.projectiles.clone(),
        }
    }

    /// Score line shown under the maze
    pub fn hud_line(&self) -> String {
        format!(
            "Score: {}  Lives: {}  Pellets: {}",
            self.score, self.lives, self.pellets_remaining
        )
    }

    /// Text rendering with agents drawn over the maze.
    ///
    /// `@` player, first letter of the colour for enemies, `*` pickup,
    /// `-`/`|` projectiles.
    pub fn render_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> = self.grid.iter().map(|r| r.chars().collect()).collect();
        let mut put = |pos: IVec2, ch: char| {
            if let Some(cell) = rows
                .get_mut(pos.y as usize)
                .and_then(|row| row.get_mut(pos.x as usize))
            {
                *cell = ch;
            }
        };

        if let Some(pickup) = self.pickup {
            put(pickup, '*');
        }
        for shot in &self.projectiles {
            let ch = match shot.dir {
                Direction::Left | Direction::Right => '-',
                Direction::Up | Direction::Down => '|',
            };
            put(shot.pos, ch);
        }
        put(self.player.pos, '@');
        for enemy in &self.enemies {
            let ch = match enemy.color {
                EnemyColor::Red => 'R',
                EnemyColor::Pink => 'P',
                EnemyColor::Cyan => 'C',
                EnemyColor::Orange => 'O',
            };
            put(enemy.pos, ch);
        }

        let mut out = String::new();
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&self.hud_line());
        out
    }
}

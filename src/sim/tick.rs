//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. The order of
//! the steps inside `tick` is part of the game rules.

use super::enemy::advance_enemies;
use super::movement::Direction;
use super::power::{advance_projectiles, fire};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input intents sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested direction (buffered until legal)
    pub direction: Option<Direction>,
    /// Fire a projectile (only while powered up)
    pub fire: bool,
}

impl TickInput {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            fire: false,
        }
    }

    /// Build input from currently held key names (arrows, WASD, space).
    /// With several direction keys held, the last one in Right, Down, Left,
    /// Up order wins.
    pub fn from_keys(keys: &[&str]) -> Self {
        let mut input = Self::default();
        for dir in Direction::ALL {
            if keys.iter().any(|k| Direction::from_key(k) == Some(dir)) {
                input.direction = Some(dir);
            }
        }
        input.fire = keys.iter().any(|k| matches!(*k, " " | "Space" | "Spacebar"));
        input
    }

    pub fn is_empty(&self) -> bool {
        self.direction.is_none() && !self.fire
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::LevelComplete | GamePhase::GameOver => return,
        GamePhase::NotStarted => {
            if input.is_empty() {
                return;
            }
            log::info!("Run started");
            state.phase = GamePhase::Running;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    // Player
    if let Some(dir) = input.direction {
        state.player.next_dir = dir;
    }
    state.player.advance(&state.grid);

    // Pellets
    if state.grid.consume_pellet(state.player.pos) {
        state.score += PELLET_SCORE;
        if state.pellets_remaining() == 0 {
            log::info!("Level complete! Score: {}", state.score);
            state.phase = GamePhase::LevelComplete;
            return;
        }
    }

    // Power-up pickup
    let duration = state.difficulty.power_up_ms();
    let collected = state.power.try_collect(state.player.pos, duration);
    if collected {
        state.score += POWER_UP_SCORE;
    }

    // Firing
    if input.fire && state.power.active {
        if let Some(shot) = fire(&state.grid, state.player.pos, state.player.dir) {
            state.projectiles.push(shot);
        }
    }

    // Enemies
    advance_enemies(&mut state.enemies, &state.grid, &state.home, state.player.pos);

    // Projectiles
    let hits = advance_projectiles(&mut state.projectiles, &mut state.enemies, &state.grid);
    state.score += u64::from(hits) * ENEMY_KILL_SCORE;

    // Player vs enemies
    if resolve_collision(state) {
        return;
    }

    // Power-up timer and pickup spawning; a fresh power-up starts draining next tick
    if !collected
        && state
            .power
            .advance(state.tick_ms, &state.grid, &state.home, &mut state.rng)
    {
        state.revive_dead_enemies();
    }
}

/// Handle at most one player/enemy collision. Returns true when the run ended.
fn resolve_collision(state: &mut GameState) -> bool {
    let player = state.player.pos;
    let Some(enemy) = state.enemies.iter().find(|e| e.alive && e.pos == player) else {
        return false;
    };
    log::debug!("Caught by {:?} enemy at {player}", enemy.color);

    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        log::info!("Game over! Final score: {}", state.score);
        state.phase = GamePhase::GameOver;
        return true;
    }

    state.reset_positions();
    false
}

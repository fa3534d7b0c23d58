//! Game state and core simulation types
//!
//! One `GameState` is one session. Restarting means building a new one.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyColor};
use super::grid::{Grid, MazeLayout, Zone};
use super::movement::{Direction, can_step, step};
use super::power::{PowerUp, Projectile};
use super::rng::GameRng;
use super::snapshot::Snapshot;
use crate::consts::START_LIVES;
use crate::settings::{Difficulty, Settings};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    NotStarted,
    /// Active gameplay
    Running,
    /// Every pellet eaten
    LevelComplete,
    /// Out of lives
    GameOver,
}

impl GamePhase {
    /// Terminal phases ignore further ticks
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::LevelComplete | GamePhase::GameOver)
    }
}

/// The player-controlled agent
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: IVec2,
    pub spawn: IVec2,
    /// Direction currently travelled
    pub dir: Direction,
    /// Requested turn, applied as soon as it is legal
    pub next_dir: Direction,
}

impl Player {
    pub fn new(spawn: IVec2) -> Self {
        Self {
            pos: spawn,
            spawn,
            dir: Direction::Right,
            next_dir: Direction::Right,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.spawn);
    }

    /// Take the buffered turn if it is legal, then keep moving if possible.
    /// A blocked turn stays buffered and the player carries on straight.
    pub fn advance(&mut self, grid: &Grid) {
        if can_step(grid, self.pos, self.next_dir) {
            self.dir = self.next_dir;
        }
        if can_step(grid, self.pos, self.dir) {
            self.pos = step(grid, self.pos, self.dir);
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Tick period; the power-up timer drains by this much per tick
    pub tick_ms: i32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter (Running ticks only)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub grid: Grid,
    /// Enemy spawn cluster
    pub home: Zone,
    pub player: Player,
    /// Enemies in spawn order; this order drives every per-enemy loop
    pub enemies: Vec<Enemy>,
    pub power: PowerUp,
    pub projectiles: Vec<Projectile>,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// New session on the reference maze
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_layout(MazeLayout::classic(), difficulty, seed)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(settings.difficulty, settings.seed);
        state.tick_ms = settings.tick_period();
        state
    }

    /// New session on a custom layout. Spawn cells are reused in order when
    /// the tier asks for more enemies than the layout has spawns; a layout
    /// without spawns gets no enemies.
    pub fn with_layout(layout: MazeLayout, difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let cadence = difficulty.enemy_cadence();
        let enemies = layout
            .enemy_spawns
            .iter()
            .cycle()
            .take(difficulty.enemy_count())
            .enumerate()
            .map(|(i, spawn)| Enemy::new(*spawn, EnemyColor::for_index(i), cadence, &mut rng))
            .collect();
        let power = PowerUp::new(&mut rng);

        log::info!(
            "New session: difficulty={}, seed={}, pellets={}",
            difficulty.as_str(),
            seed,
            layout.grid.pellet_count()
        );

        Self {
            seed,
            difficulty,
            tick_ms: crate::consts::TICK_MS,
            lives: START_LIVES,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::NotStarted,
            grid: layout.grid,
            home: layout.home,
            player: Player::new(layout.player_spawn),
            enemies,
            power,
            projectiles: Vec::new(),
            rng,
        }
    }

    pub fn pellets_remaining(&self) -> u32 {
        self.grid.pellet_count()
    }

    /// Put the player and every enemy back on their spawn cells
    pub fn reset_positions(&mut self) {
        self.player.reset();
        for enemy in &mut self.enemies {
            enemy.reset(&mut self.rng);
        }
        self.projectiles.clear();
    }

    /// Bring back every enemy that was shot, at its spawn cell
    pub fn revive_dead_enemies(&mut self) {
        for enemy in self.enemies.iter_mut().filter(|e| !e.alive) {
            enemy.reset(&mut self.rng);
        }
    }

    /// Renderable view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyMode;

    #[test]
    fn test_new_session_per_difficulty() {
        for tier in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let state = GameState::new(tier, 1);
            assert_eq!(state.enemies.len(), tier.enemy_count());
            assert!(state.enemies.iter().all(|e| e.cadence == tier.enemy_cadence()));
            assert!(state.enemies.iter().all(|e| e.mode == EnemyMode::Escape));
            assert_eq!(state.lives, START_LIVES);
            assert_eq!(state.phase, GamePhase::NotStarted);
            assert!(!state.power.active);
        }
    }

    #[test]
    fn test_spawns_reused_when_short() {
        let layout = MazeLayout::parse(&["P..E.."]).unwrap();
        let state = GameState::with_layout(layout, Difficulty::Hard, 3);
        assert_eq!(state.enemies.len(), 4);
        assert!(state.enemies.iter().all(|e| e.spawn == IVec2::new(3, 0)));
    }

    #[test]
    fn test_layout_without_spawns_has_no_enemies() {
        let mut layout = MazeLayout::parse(&["P..E.."]).unwrap();
        layout.enemy_spawns.clear();
        let mut state = GameState::with_layout(layout, Difficulty::Hard, 3);
        assert!(state.enemies.is_empty());

        crate::sim::tick(&mut state, &crate::sim::TickInput::steer(Direction::Right));
        assert_eq!(state.player.pos, IVec2::new(1, 0));
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_from_settings_rejects_bad_tick_period() {
        let settings = Settings {
            tick_ms: 0,
            ..Settings::with_difficulty(Difficulty::Easy)
        };
        let state = GameState::from_settings(&settings);
        assert_eq!(state.tick_ms, crate::consts::TICK_MS);
        assert_eq!(state.difficulty, Difficulty::Easy);

        let settings = Settings {
            tick_ms: 50,
            ..Settings::default()
        };
        assert_eq!(GameState::from_settings(&settings).tick_ms, 50);
    }

    #[test]
    fn test_player_buffered_turn() {
        let layout = MazeLayout::parse(&[
            "#####", //
            "#P..#", //
            "###.#", //
            "#E..#",
        ])
        .unwrap();
        let mut player = Player::new(layout.player_spawn);
        player.next_dir = Direction::Down;

        // Down is walled: keep going right with the turn buffered
        player.advance(&layout.grid);
        assert_eq!(player.pos, IVec2::new(2, 1));
        assert_eq!(player.dir, Direction::Right);
        player.advance(&layout.grid);
        assert_eq!(player.pos, IVec2::new(3, 1));

        // Now the turn is legal
        player.advance(&layout.grid);
        assert_eq!(player.dir, Direction::Down);
        assert_eq!(player.pos, IVec2::new(3, 2));

        // Dead end below the wall row: stays put
        player.next_dir = Direction::Down;
        player.advance(&layout.grid);
        assert_eq!(player.pos, IVec2::new(3, 3));
        player.advance(&layout.grid);
        assert_eq!(player.pos, IVec2::new(3, 3));
    }

    #[test]
    fn test_revive_only_dead() {
        let mut state = GameState::new(Difficulty::Medium, 9);
        state.enemies[0].pos = IVec2::new(4, 4);
        state.enemies[0].alive = false;
        state.enemies[1].pos = IVec2::new(1, 1);

        state.revive_dead_enemies();
        assert!(state.enemies[0].alive);
        assert_eq!(state.enemies[0].pos, state.enemies[0].spawn);
        assert_eq!(state.enemies[1].pos, IVec2::new(1, 1));
    }
}

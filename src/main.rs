//! Maze Chase entry point
//!
//! Headless native runner: builds a session from settings, drives it with a
//! simple autopilot and prints the board as it goes.
//!
//! Usage: `maze-chase [easy|medium|hard|path/to/settings.json]`

use std::collections::VecDeque;

use glam::IVec2;

use maze_chase::sim::{Direction, GamePhase, GameState, TickInput, TileKind, can_step, step, tick};
use maze_chase::{Difficulty, Settings};

/// Hard cap so a stuck autopilot still terminates
const MAX_TICKS: u64 = 5000;
/// Print the board every this many ticks
const PRINT_EVERY: u64 = 250;

fn main() {
    env_logger::init();
    log::info!("Maze Chase (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(arg) if arg.ends_with(".json") => Settings::load_from(&arg),
        Some(arg) => Settings::with_difficulty(Difficulty::parse(&arg)),
        None => Settings::default(),
    };

    let mut state = GameState::from_settings(&settings);
    while !state.phase.is_terminal() && state.time_ticks < MAX_TICKS {
        let input = autopilot(&state);
        tick(&mut state, &input);
        if state.time_ticks % PRINT_EVERY == 0 {
            println!("{}\n", state.snapshot().render_ascii());
        }
    }

    let snapshot = state.snapshot();
    println!("{}", snapshot.render_ascii());
    match state.phase {
        GamePhase::LevelComplete => println!("Level complete!"),
        GamePhase::GameOver => println!("Game over!"),
        _ => println!("Stopped after {} ticks", state.time_ticks),
    }
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => log::debug!("Final snapshot:\n{json}"),
        Err(err) => log::error!("Could not serialize snapshot: {err}"),
    }
}

/// Demo player: head for the nearest pellet (or pickup), avoid stepping next
/// to a live enemy, and shoot whenever powered up.
fn autopilot(state: &GameState) -> TickInput {
    let grid = &state.grid;
    let from = state.player.pos;
    let danger = |pos: IVec2| {
        state
            .enemies
            .iter()
            .any(|e| e.alive && (e.pos - pos).abs().element_sum() <= 1)
    };

    // Breadth-first search over legal (wrapping) moves, remembering first step
    let mut seen = vec![false; (grid.width() * grid.height()) as usize];
    let idx = |p: IVec2| (p.y * grid.width() + p.x) as usize;
    let mut queue = VecDeque::new();
    seen[idx(from)] = true;
    for dir in Direction::ALL {
        let next = step(grid, from, dir);
        if can_step(grid, from, dir) && !danger(next) && !seen[idx(next)] {
            seen[idx(next)] = true;
            queue.push_back((next, dir));
        }
    }

    let mut choice = None;
    while let Some((pos, first)) = queue.pop_front() {
        if grid.tile_at(pos) == TileKind::Pellet || state.power.pickup == Some(pos) {
            choice = Some(first);
            break;
        }
        for dir in Direction::ALL {
            let next = step(grid, pos, dir);
            if can_step(grid, pos, dir) && !seen[idx(next)] {
                seen[idx(next)] = true;
                queue.push_back((next, first));
            }
        }
    }

    TickInput {
        direction: choice.or(Some(state.player.dir)),
        fire: state.power.active,
    }
}

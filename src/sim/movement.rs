//! Direction table and grid stepping
//!
//! Every agent moves exactly one cell per step. Steps wrap around the grid
//! edges, so leaving the tunnel on the left re-enters on the right.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Movement direction, encoded 0..=3 in clockwise order starting at Right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
}

impl Direction {
    /// Fixed scan order used wherever "any legal direction" is needed
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Cell offset for one step
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Right => IVec2::new(1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Up => IVec2::new(0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Decode from the 0..=3 encoding (taken modulo 4)
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Map a key name to a direction (arrow keys and WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            _ => None,
        }
    }
}

/// Destination of one step, wrapped onto the grid
#[inline]
fn destination(grid: &Grid, pos: IVec2, dir: Direction) -> IVec2 {
    grid.wrap(pos + dir.delta())
}

/// Whether a step from `pos` in `dir` lands on a non-wall cell
pub fn can_step(grid: &Grid, pos: IVec2, dir: Direction) -> bool {
    !grid.is_wall(destination(grid, pos, dir))
}

/// Take one step. Callers gate this with [`can_step`].
pub fn step(grid: &Grid, pos: IVec2, dir: Direction) -> IVec2 {
    destination(grid, pos, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::MazeLayout;
    use proptest::prelude::*;

    #[test]
    fn test_direction_encoding() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index() as usize, i);
            assert_eq!(Direction::from_index(i as u8), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("S"), Some(Direction::Down));
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_wall_blocks_step() {
        let layout = MazeLayout::parse(&["E...P#...."]).unwrap();
        let grid = &layout.grid;
        let pos = IVec2::new(4, 0);
        assert!(!can_step(grid, pos, Direction::Right));
        assert!(can_step(grid, pos, Direction::Left));
        assert_eq!(step(grid, pos, Direction::Left), IVec2::new(3, 0));
    }

    #[test]
    fn test_tunnel_wraps() {
        let layout = MazeLayout::classic();
        let grid = &layout.grid;
        let left_edge = IVec2::new(0, 10);
        assert!(can_step(grid, left_edge, Direction::Left));
        assert_eq!(step(grid, left_edge, Direction::Left), IVec2::new(19, 10));
        assert_eq!(
            step(grid, IVec2::new(19, 10), Direction::Right),
            IVec2::new(0, 10)
        );
    }

    proptest! {
        #[test]
        fn prop_step_stays_on_grid(
            x in 0i32..20,
            y in 0i32..20,
            dir in 0u8..4,
        ) {
            let layout = MazeLayout::classic();
            let grid = &layout.grid;
            let dir = Direction::from_index(dir);
            let next = step(grid, IVec2::new(x, y), dir);
            prop_assert!(grid.in_bounds(next));
            if can_step(grid, IVec2::new(x, y), dir) {
                prop_assert!(!grid.is_wall(next));
            }
        }
    }
}

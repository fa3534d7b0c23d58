//! Static tile map and maze layout
//!
//! The grid never changes shape after construction. The only mutation is a
//! pellet tile turning into an open tile when the player eats it.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Tile classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Open,
    Pellet,
}

impl TileKind {
    /// ASCII glyph used by layouts and snapshots
    pub fn as_char(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Open => ' ',
            TileKind::Pellet => '.',
        }
    }
}

/// Errors from parsing an ASCII maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    UnknownTile { col: usize, row: usize, ch: char },
    MissingPlayerSpawn,
    MissingEnemySpawn,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "maze has no rows"),
            GridError::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} tiles, expected {expected}")
            }
            GridError::UnknownTile { col, row, ch } => {
                write!(f, "unknown tile {ch:?} at ({col}, {row})")
            }
            GridError::MissingPlayerSpawn => write!(f, "maze has no player spawn ('P')"),
            GridError::MissingEnemySpawn => write!(f, "maze has no enemy spawn ('E')"),
        }
    }
}

impl std::error::Error for GridError {}

/// Fixed-size tile grid
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
    pellets: u32,
}

impl Grid {
    fn new(width: i32, height: i32, tiles: Vec<TileKind>) -> Self {
        let pellets = tiles.iter().filter(|t| **t == TileKind::Pellet).count() as u32;
        Self {
            width,
            height,
            tiles,
            pellets,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: IVec2) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Tile at a position. Anything outside the grid reads as `Open`.
    pub fn tile_at(&self, pos: IVec2) -> TileKind {
        if self.in_bounds(pos) {
            self.tiles[self.index(pos)]
        } else {
            TileKind::Open
        }
    }

    #[inline]
    pub fn is_wall(&self, pos: IVec2) -> bool {
        self.tile_at(pos) == TileKind::Wall
    }

    /// Wrap a position onto the torus
    #[inline]
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        IVec2::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Turn a pellet into open floor. Returns whether a pellet was eaten.
    pub fn consume_pellet(&mut self, pos: IVec2) -> bool {
        if self.tile_at(pos) != TileKind::Pellet {
            return false;
        }
        let idx = self.index(pos);
        self.tiles[idx] = TileKind::Open;
        self.pellets -= 1;
        true
    }

    /// Pellets still on the board
    pub fn pellet_count(&self) -> u32 {
        self.pellets
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, TileKind)> + '_ {
        self.tiles.iter().enumerate().map(|(i, tile)| {
            let i = i as i32;
            (IVec2::new(i % self.width, i / self.width), *tile)
        })
    }

    /// ASCII rows, one string per grid row
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|t| t.as_char()).collect())
            .collect()
    }
}

/// Rectangular zone of cells (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub min: IVec2,
    pub max: IVec2,
}

impl Zone {
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    pub fn center(&self) -> IVec2 {
        (self.min + self.max) / 2
    }
}

/// Reference maze.
///
/// `#` wall, `.` pellet, space open, `P` player spawn, `E` enemy spawn.
/// Row 10 is the tunnel that wraps left/right.
pub const CLASSIC_MAZE: [&str; 20] = [
    "####################",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#.##.###.##.###.##.#",
    "#..................#",
    "#.##.#.######.#.##.#",
    "#....#........#....#",
    "####.####  ####.####",
    "####.#  EEEE  #.####",
    "####.# ###### #.####",
    "    .  #    #  .    ",
    "####.# ###### #.####",
    "####.#        #.####",
    "####.# ###### #.####",
    "#........P.........#",
    "#.##.###.##.###.##.#",
    "#..#.............#.#",
    "##.#.#.######.#.##.#",
    "#....#........#....#",
    "####################",
];

/// Enemy home area in the reference maze; pickups never spawn inside it
const CLASSIC_HOME: Zone = Zone {
    min: IVec2::new(6, 7),
    max: IVec2::new(13, 12),
};

/// A grid plus the spawn points that go with it
#[derive(Debug, Clone)]
pub struct MazeLayout {
    pub grid: Grid,
    pub player_spawn: IVec2,
    /// Enemy spawn cells in spawn order
    pub enemy_spawns: Vec<IVec2>,
    /// Spawn cluster, used as the escape reference and pickup exclusion zone
    pub home: Zone,
}

impl MazeLayout {
    /// The reference 20x20 maze
    pub fn classic() -> Self {
        let mut layout =
            Self::parse(&CLASSIC_MAZE).expect("reference maze is a valid layout");
        layout.home = CLASSIC_HOME;
        layout
    }

    /// Parse an ASCII maze. The home zone is the bounding box of the enemy
    /// spawns grown by one cell.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut player_spawn = None;
        let mut enemy_spawns = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = IVec2::new(col as i32, row as i32);
                let tile = match ch {
                    '#' => TileKind::Wall,
                    '.' => TileKind::Pellet,
                    ' ' | '_' => TileKind::Open,
                    'P' => {
                        player_spawn = Some(pos);
                        TileKind::Open
                    }
                    'E' => {
                        enemy_spawns.push(pos);
                        TileKind::Open
                    }
                    _ => return Err(GridError::UnknownTile { col, row, ch }),
                };
                tiles.push(tile);
            }
        }

        let player_spawn = player_spawn.ok_or(GridError::MissingPlayerSpawn)?;
        let (first, rest) = enemy_spawns
            .split_first()
            .ok_or(GridError::MissingEnemySpawn)?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));

        Ok(Self {
            grid: Grid::new(width as i32, rows.len() as i32, tiles),
            player_spawn,
            enemy_spawns,
            home: Zone {
                min: min - IVec2::ONE,
                max: max + IVec2::ONE,
            },
        })
    }
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self::classic()
    }
}

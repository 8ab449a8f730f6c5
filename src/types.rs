// Cycles game types
// Positions, directions, and the per-tick game state snapshot sent by the server

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BotError;

/// Grid cell value meaning "nobody is here"
pub const EMPTY_CELL: u32 = 0;

/// 2D coordinate on the grid. x grows east, y grows south.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four possible movement directions.
///
/// On the wire a direction travels as its index (`0=north, 1=east, 2=south, 3=west`).
/// Decoding anything else fails with `BotError::InvalidDirection` instead of
/// being mapped to some default.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::North, Direction::East, Direction::South, Direction::West]
    }

    /// Uppercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        }
    }

    /// Unit grid offset `(dx, dy)` for this direction
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Calculates the next position when moving in this direction
    pub fn apply(&self, position: &Position) -> Position {
        let (dx, dy) = self.offset();
        Position {
            x: position.x + dx,
            y: position.y + dy,
        }
    }

    /// Wire index of this direction
    pub fn index(&self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.index()
    }
}

impl TryFrom<u8> for Direction {
    type Error = BotError;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        match idx {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            other => Err(BotError::InvalidDirection(format!("index {}", other))),
        }
    }
}

impl FromStr for Direction {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "east" => Ok(Direction::East),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            _ => Err(BotError::InvalidDirection(format!("'{}'", s))),
        }
    }
}

/// A player as seen in a snapshot
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
}

/// Point-in-time view of the game received once per tick.
///
/// `grid` is row-major, `width * height` cells; each cell holds the id of the
/// player occupying it or `EMPTY_CELL`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub frame: u64,
    pub width: i32,
    pub height: i32,
    pub grid: Vec<u32>,
    pub players: Vec<Player>,
}

impl GameState {
    /// Creates an all-empty grid with no players
    pub fn empty(width: i32, height: i32) -> Self {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        GameState {
            frame: 0,
            width,
            height,
            grid: vec![EMPTY_CELL; cells],
            players: Vec::new(),
        }
    }

    /// Checks that the grid matches the declared dimensions and every player
    /// stands inside it
    pub fn validate(&self) -> Result<(), BotError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(BotError::InvalidSnapshot(format!(
                "non-positive grid size {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize;
        if self.grid.len() != expected {
            return Err(BotError::InvalidSnapshot(format!(
                "grid has {} cells, expected {} for {}x{}",
                self.grid.len(),
                expected,
                self.width,
                self.height
            )));
        }
        if let Some(p) = self.players.iter().find(|p| !self.is_inside_grid(&p.position)) {
            return Err(BotError::InvalidSnapshot(format!(
                "player '{}' at {} is outside the {}x{} grid",
                p.name, p.position, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn is_inside_grid(&self, position: &Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Id of the player occupying `position`, if any.
    /// Positions outside the grid report no occupant.
    pub fn occupant(&self, position: &Position) -> Option<u32> {
        if !self.is_inside_grid(position) {
            return None;
        }
        let idx = (position.y * self.width + position.x) as usize;
        match self.grid.get(idx) {
            Some(&EMPTY_CELL) | None => None,
            Some(&id) => Some(id),
        }
    }

    pub fn is_cell_empty(&self, position: &Position) -> bool {
        self.occupant(position).is_none()
    }

    /// Marks a cell as occupied by `id`. Out-of-grid positions are ignored.
    pub fn set_cell(&mut self, position: &Position, id: u32) {
        if self.is_inside_grid(position) {
            let idx = (position.y * self.width + position.x) as usize;
            self.grid[idx] = id;
        }
    }

    /// Looks up a player by display name
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }
}

// Move validation
//
// A move is safe only when its destination is inside the grid, not occupied by
// any player in the current snapshot, and not part of our own trail. Each
// failing condition is reported separately so callers can log why a candidate
// was rejected.

use std::fmt;

use crate::trail::Trail;
use crate::types::{Direction, GameState, Position};

/// Outcome of checking one candidate move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCheck {
    Safe,
    /// Destination lies outside the grid
    OutOfBounds(Position),
    /// Destination is occupied by the player with this id
    Occupied { position: Position, by: u32 },
    /// Destination is one of our own recent positions
    InTrail(Position),
}

impl MoveCheck {
    pub fn is_safe(&self) -> bool {
        matches!(self, MoveCheck::Safe)
    }
}

impl fmt::Display for MoveCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCheck::Safe => write!(f, "safe"),
            MoveCheck::OutOfBounds(p) => write!(f, "position {} is outside the grid", p),
            MoveCheck::Occupied { position, by } => {
                write!(f, "position {} is occupied by player {}", position, by)
            }
            MoveCheck::InTrail(p) => write!(f, "position {} is part of the trail", p),
        }
    }
}

/// Checks the destination of moving from `position` in `direction`.
///
/// Conditions are tested in order bounds, occupancy, trail; the first failure wins.
pub fn check_move(
    position: &Position,
    direction: Direction,
    state: &GameState,
    trail: &Trail,
) -> MoveCheck {
    let next = direction.apply(position);

    if !state.is_inside_grid(&next) {
        return MoveCheck::OutOfBounds(next);
    }

    if let Some(by) = state.occupant(&next) {
        return MoveCheck::Occupied { position: next, by };
    }

    if trail.contains(&next) {
        return MoveCheck::InTrail(next);
    }

    MoveCheck::Safe
}

pub fn is_safe(position: &Position, direction: Direction, state: &GameState, trail: &Trail) -> bool {
    check_move(position, direction, state, trail).is_safe()
}

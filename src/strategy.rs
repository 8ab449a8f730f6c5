// Zigzag move policy
//
// Sweeps the grid column by column: keep moving along the secondary axis
// (south or north) until blocked, then step east and reverse. When neither
// works, fall back to the first safe of west, north, south. With no safe move
// at all the primary direction is returned anyway.

use log::{debug, error};

use crate::safety::check_move;
use crate::trail::Trail;
use crate::types::{Direction, GameState, Position};

/// Fallback scan order once both zigzag and primary direction are blocked
const FALLBACK_ORDER: [Direction; 3] = [Direction::West, Direction::North, Direction::South];

/// Result of one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// No safe move existed; `direction` is the primary direction and may be fatal
    pub forced: bool,
}

/// Deterministic zigzag strategy with its persisted parity
#[derive(Debug, Clone)]
pub struct ZigzagPolicy {
    moving_south: bool,
    primary: Direction,
}

impl ZigzagPolicy {
    /// Starts moving south with east as the drift direction
    pub fn new() -> Self {
        ZigzagPolicy {
            moving_south: true,
            primary: Direction::East,
        }
    }

    pub fn moving_south(&self) -> bool {
        self.moving_south
    }

    pub fn primary(&self) -> Direction {
        self.primary
    }

    /// Current secondary-axis direction
    pub fn zigzag_direction(&self) -> Direction {
        if self.moving_south {
            Direction::South
        } else {
            Direction::North
        }
    }

    /// Picks the move for this tick.
    ///
    /// Order, first safe wins:
    /// 1. zigzag direction (parity unchanged)
    /// 2. primary direction (parity flips)
    /// 3. west, north, south
    /// 4. primary direction, flagged as forced
    pub fn decide(
        &mut self,
        name: &str,
        position: &Position,
        state: &GameState,
        trail: &Trail,
    ) -> Decision {
        let zigzag = self.zigzag_direction();
        if Self::try_direction(name, position, zigzag, state, trail) {
            return Decision {
                direction: zigzag,
                forced: false,
            };
        }

        if Self::try_direction(name, position, self.primary, state, trail) {
            self.moving_south = !self.moving_south;
            return Decision {
                direction: self.primary,
                forced: false,
            };
        }

        for &dir in FALLBACK_ORDER.iter() {
            if Self::try_direction(name, position, dir, state, trail) {
                return Decision {
                    direction: dir,
                    forced: false,
                };
            }
        }

        error!("{}: No valid moves available, forcing {}", name, self.primary);
        Decision {
            direction: self.primary,
            forced: true,
        }
    }

    fn try_direction(
        name: &str,
        position: &Position,
        direction: Direction,
        state: &GameState,
        trail: &Trail,
    ) -> bool {
        let check = check_move(position, direction, state, trail);
        if !check.is_safe() {
            debug!("{}: {} rejected, {}", name, direction, check);
        }
        check.is_safe()
    }
}

impl Default for ZigzagPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBSTACLE: u32 = 99;

    /// Runs the policy for `ticks` moves on a fixed snapshot, recording each move in the trail
    fn sweep(state: &GameState, start: Position, ticks: usize) -> Vec<Decision> {
        let mut policy = ZigzagPolicy::new();
        let mut trail = Trail::new();
        let mut position = start;
        let mut decisions = Vec::new();

        for _ in 0..ticks {
            let decision = policy.decide("test", &position, state, &trail);
            position = decision.direction.apply(&position);
            trail.record(position);
            decisions.push(decision);
        }
        decisions
    }

    fn surround(state: &mut GameState, center: Position, blocked: &[Direction]) {
        for dir in blocked {
            state.set_cell(&dir.apply(&center), OBSTACLE);
        }
    }

    #[test]
    fn test_open_board_moves_south_first() {
        let state = GameState::empty(10, 10);
        let mut policy = ZigzagPolicy::new();

        let decision = policy.decide("test", &Position::new(5, 5), &state, &Trail::new());

        assert_eq!(decision.direction, Direction::South);
        assert!(!decision.forced);
        assert!(policy.moving_south(), "zigzag move must not flip parity");
    }

    #[test]
    fn test_keeps_moving_south_until_blocked() {
        let state = GameState::empty(1000, 1000);
        let decisions = sweep(&state, Position::new(500, 0), 200);

        assert!(decisions.iter().all(|d| d.direction == Direction::South));
    }

    #[test]
    fn test_boustrophedon_sweep_on_small_grid() {
        use Direction::*;

        let state = GameState::empty(3, 3);
        let decisions = sweep(&state, Position::new(0, 0), 9);
        let directions: Vec<Direction> = decisions.iter().map(|d| d.direction).collect();

        assert_eq!(
            directions,
            vec![South, South, East, North, North, East, South, South, East]
        );
        assert!(decisions[..8].iter().all(|d| !d.forced));
        assert!(decisions[8].forced, "bottom-right corner leaves no safe move");
    }

    #[test]
    fn test_east_flips_parity() {
        let mut state = GameState::empty(10, 10);
        let center = Position::new(5, 5);
        surround(&mut state, center, &[Direction::South]);
        let mut policy = ZigzagPolicy::new();

        let decision = policy.decide("test", &center, &state, &Trail::new());

        assert_eq!(decision.direction, Direction::East);
        assert!(!policy.moving_south());
        assert_eq!(policy.zigzag_direction(), Direction::North);
    }

    #[test]
    fn test_falls_back_to_west() {
        let mut state = GameState::empty(10, 10);
        let center = Position::new(5, 5);
        surround(
            &mut state,
            center,
            &[Direction::South, Direction::North, Direction::East],
        );
        let mut policy = ZigzagPolicy::new();

        let decision = policy.decide("test", &center, &state, &Trail::new());

        assert_eq!(decision.direction, Direction::West);
        assert!(!decision.forced);
        assert!(policy.moving_south(), "fallback must not flip parity");
    }

    #[test]
    fn test_fallback_prefers_north_after_west() {
        let mut state = GameState::empty(10, 10);
        let center = Position::new(5, 5);
        surround(&mut state, center, &[Direction::South, Direction::East, Direction::West]);
        let mut policy = ZigzagPolicy::new();

        let decision = policy.decide("test", &center, &state, &Trail::new());

        assert_eq!(decision.direction, Direction::North);
    }

    #[test]
    fn test_trail_blocks_like_occupancy() {
        let state = GameState::empty(10, 10);
        let center = Position::new(5, 5);
        let mut trail = Trail::new();
        trail.record(Direction::South.apply(&center));
        trail.record(Direction::East.apply(&center));
        trail.record(Direction::West.apply(&center));
        let mut policy = ZigzagPolicy::new();

        let decision = policy.decide("test", &center, &state, &trail);

        assert_eq!(decision.direction, Direction::North);
    }

    #[test]
    fn test_deadlock_returns_primary_direction() {
        let mut state = GameState::empty(10, 10);
        let center = Position::new(5, 5);
        surround(&mut state, center, &Direction::all());
        let mut policy = ZigzagPolicy::new();

        let decision = policy.decide("test", &center, &state, &Trail::new());

        assert_eq!(decision.direction, Direction::East);
        assert!(decision.forced);
        assert!(policy.moving_south(), "forced move must not flip parity");
    }
}

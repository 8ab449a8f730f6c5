// Offline arena
//
// A single-player game run in-process, for playtesting the bot without a
// server. The player starts in the top-left corner of a grid seeded with
// random obstacles. Each submitted move is applied immediately: leaving the
// grid or entering an occupied cell eliminates the player, otherwise its new
// cell is filled with its id. After an elimination the arena still delivers
// one more state (without the player) before going inactive.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::connection::Connection;
use crate::error::{BotError, Result};
use crate::types::{Direction, GameState, Player, Position};

/// Grid value used for obstacles
pub const OBSTACLE_ID: u32 = u32::MAX;

/// Id given to the arena's only player
pub const PLAYER_ID: u32 = 1;

/// Parameters for a generated arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
    pub obstacles: usize,
    pub seed: u64,
    pub max_ticks: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: 100,
            height: 100,
            obstacles: 0,
            seed: 0,
            max_ticks: 10_000,
        }
    }
}

/// In-process `Connection` playing a single-player game
pub struct Arena {
    state: GameState,
    player_name: String,
    max_ticks: u64,
    eliminated: bool,
    delivered_final: bool,
    moves: Vec<Direction>,
}

impl Arena {
    /// Builds a grid per `config` with the player at (0, 0)
    pub fn new(player_name: &str, config: &ArenaConfig) -> Result<Self> {
        if config.width <= 0 || config.height <= 0 {
            return Err(BotError::Config(format!(
                "arena size must be positive, got {}x{}",
                config.width, config.height
            )));
        }
        let free_cells = (config.width as usize * config.height as usize) - 1;
        if config.obstacles > free_cells {
            return Err(BotError::Config(format!(
                "{} obstacles do not fit in {} free cells",
                config.obstacles, free_cells
            )));
        }

        let mut state = GameState::empty(config.width, config.height);
        let start = Position::new(0, 0);
        state.set_cell(&start, PLAYER_ID);
        state.players.push(Player {
            id: PLAYER_ID,
            name: player_name.to_string(),
            position: start,
        });

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut placed = 0;
        while placed < config.obstacles {
            let cell = Position::new(
                rng.random_range(0..config.width),
                rng.random_range(0..config.height),
            );
            if state.is_cell_empty(&cell) {
                state.set_cell(&cell, OBSTACLE_ID);
                placed += 1;
            }
        }

        Self::with_state(player_name, state, config.max_ticks)
    }

    /// Uses a hand-built state. `player_name` must be one of its players.
    pub fn with_state(player_name: &str, state: GameState, max_ticks: u64) -> Result<Self> {
        state.validate()?;
        if state.player(player_name).is_none() {
            return Err(BotError::PlayerMissing(player_name.to_string()));
        }

        Ok(Arena {
            state,
            player_name: player_name.to_string(),
            max_ticks,
            eliminated: false,
            delivered_final: false,
            moves: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn eliminated(&self) -> bool {
        self.eliminated
    }

    /// Every move received so far, in order
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    /// Cells covered by the player's trail, including the current cell
    pub fn covered_cells(&self) -> usize {
        self.state.grid.iter().filter(|&&c| c == PLAYER_ID).count()
    }

    /// ASCII picture of the grid: `#` obstacle, `o` trail, `@` player, `.` empty
    pub fn render(&self) -> String {
        let head = self.state.player(&self.player_name).map(|p| p.position);
        let mut out = String::new();
        for y in 0..self.state.height {
            for x in 0..self.state.width {
                let pos = Position::new(x, y);
                let c = match self.state.occupant(&pos) {
                    _ if Some(pos) == head => '@',
                    Some(OBSTACLE_ID) => '#',
                    Some(_) => 'o',
                    None => '.',
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    fn advance(&mut self, direction: Direction) {
        self.state.frame += 1;

        let Some(idx) = self
            .state
            .players
            .iter()
            .position(|p| p.name == self.player_name)
        else {
            return;
        };

        let next = direction.apply(&self.state.players[idx].position);
        if !self.state.is_inside_grid(&next) || !self.state.is_cell_empty(&next) {
            info!(
                "Arena: {} crashed at {} on frame {}",
                self.player_name, next, self.state.frame
            );
            self.state.players.remove(idx);
            self.eliminated = true;
            return;
        }

        let id = self.state.players[idx].id;
        self.state.set_cell(&next, id);
        self.state.players[idx].position = next;
    }
}

impl Connection for Arena {
    fn is_active(&mut self) -> bool {
        // A crash is always reported, even on the last allowed tick
        if self.eliminated {
            !self.delivered_final
        } else {
            self.state.frame < self.max_ticks
        }
    }

    fn receive_game_state(&mut self) -> Result<GameState> {
        if self.eliminated {
            self.delivered_final = true;
        }
        Ok(self.state.clone())
    }

    fn send_move(&mut self, direction: Direction) -> Result<()> {
        self.moves.push(direction);
        self.advance(direction);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_arena_places_player_and_obstacles() {
        let config = ArenaConfig {
            width: 8,
            height: 6,
            obstacles: 10,
            seed: 42,
            max_ticks: 100,
        };
        let arena = Arena::new("bot1", &config).unwrap();

        let obstacles = arena
            .state()
            .grid
            .iter()
            .filter(|&&c| c == OBSTACLE_ID)
            .count();
        assert_eq!(obstacles, 10);
        assert_eq!(
            arena.state().player("bot1").unwrap().position,
            Position::new(0, 0)
        );
        assert_eq!(arena.covered_cells(), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = ArenaConfig {
            width: 20,
            height: 20,
            obstacles: 30,
            seed: 7,
            max_ticks: 10,
        };
        let a = Arena::new("bot1", &config).unwrap();
        let b = Arena::new("bot1", &config).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_too_many_obstacles_rejected() {
        let config = ArenaConfig {
            width: 2,
            height: 2,
            obstacles: 4,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            Arena::new("bot1", &config),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn test_move_fills_cell() {
        let config = ArenaConfig {
            width: 3,
            height: 3,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new("bot1", &config).unwrap();

        arena.send_move(Direction::South).unwrap();
        let state = arena.receive_game_state().unwrap();

        assert_eq!(state.frame, 1);
        assert_eq!(state.player("bot1").unwrap().position, Position::new(0, 1));
        assert_eq!(state.occupant(&Position::new(0, 0)), Some(PLAYER_ID));
        assert_eq!(state.occupant(&Position::new(0, 1)), Some(PLAYER_ID));
    }

    #[test]
    fn test_crash_removes_player_then_goes_inactive() {
        let config = ArenaConfig {
            width: 3,
            height: 3,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new("bot1", &config).unwrap();

        arena.send_move(Direction::North).unwrap();
        assert!(arena.eliminated());
        assert!(arena.is_active(), "final state not delivered yet");

        let state = arena.receive_game_state().unwrap();
        assert!(state.player("bot1").is_none());
        assert!(!arena.is_active());
    }

    #[test]
    fn test_crash_on_last_tick_still_delivers_final_state() {
        let config = ArenaConfig {
            width: 1,
            height: 1,
            max_ticks: 1,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new("bot1", &config).unwrap();

        arena.send_move(Direction::East).unwrap();
        assert!(arena.eliminated());
        assert!(arena.is_active(), "tick limit must not hide the crash");

        let state = arena.receive_game_state().unwrap();
        assert!(state.player("bot1").is_none());
        assert!(!arena.is_active());
    }

    #[test]
    fn test_inactive_after_max_ticks() {
        let config = ArenaConfig {
            width: 10,
            height: 10,
            max_ticks: 2,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new("bot1", &config).unwrap();

        arena.send_move(Direction::South).unwrap();
        assert!(arena.is_active());
        arena.send_move(Direction::South).unwrap();
        assert!(!arena.is_active());
        assert_eq!(arena.moves(), &[Direction::South, Direction::South]);
    }

    #[test]
    fn test_render_marks_cells() {
        let mut state = GameState::empty(3, 2);
        state.set_cell(&Position::new(0, 0), PLAYER_ID);
        state.set_cell(&Position::new(1, 0), PLAYER_ID);
        state.set_cell(&Position::new(2, 1), OBSTACLE_ID);
        state.players.push(Player {
            id: PLAYER_ID,
            name: "bot1".to_string(),
            position: Position::new(1, 0),
        });
        let arena = Arena::with_state("bot1", state, 10).unwrap();

        assert_eq!(arena.render(), "o@.\n..#\n");
    }
}

// Tick loop for the zigzag cycles bot
//
// Each tick: pull the latest game state, find our own player, let the zigzag
// policy pick a direction, send it, and remember the cell we moved into. Any
// error ends the run; the caller decides how to report it.

use log::{debug, info, warn};

use crate::connection::Connection;
use crate::error::{BotError, Result};
use crate::strategy::{Decision, ZigzagPolicy};
use crate::trail::Trail;
use crate::types::Direction;

/// Totals reported when a game ends normally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub forced_moves: u64,
}

/// A single bot playing over one connection.
/// Owns all per-game mutable state: the trail and the zigzag parity.
pub struct Bot<C: Connection> {
    name: String,
    connection: C,
    trail: Trail,
    policy: ZigzagPolicy,
    summary: RunSummary,
}

impl<C: Connection> Bot<C> {
    /// Wraps an established connection. Fails if the connection is already inactive.
    pub fn new(name: impl Into<String>, mut connection: C) -> Result<Self> {
        let name = name.into();
        if !connection.is_active() {
            return Err(BotError::ConnectionLost(format!(
                "connection for '{}' is not active",
                name
            )));
        }

        Ok(Bot {
            name,
            connection,
            trail: Trail::new(),
            policy: ZigzagPolicy::new(),
            summary: RunSummary::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn policy(&self) -> &ZigzagPolicy {
        &self.policy
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Plays one tick and returns the submitted direction
    pub fn tick(&mut self) -> Result<Direction> {
        let state = self.connection.receive_game_state()?;

        let position = state
            .player(&self.name)
            .map(|p| p.position)
            .ok_or_else(|| BotError::PlayerMissing(self.name.clone()))?;
        debug!(
            "{}: Frame {}, position {}",
            self.name, state.frame, position
        );

        let Decision { direction, forced } =
            self.policy.decide(&self.name, &position, &state, &self.trail);
        if forced {
            warn!(
                "{}: Sending forced move {} from {}",
                self.name, direction, position
            );
            self.summary.forced_moves += 1;
        }

        self.connection.send_move(direction)?;
        info!("{}: Sent move {}", self.name, direction);

        self.trail.record(direction.apply(&position));
        self.summary.ticks += 1;

        Ok(direction)
    }

    /// Plays until the connection reports the game is over
    pub fn run(&mut self) -> Result<RunSummary> {
        while self.connection.is_active() {
            self.tick()?;
        }

        info!(
            "{}: Game over after {} ticks ({} forced moves)",
            self.name, self.summary.ticks, self.summary.forced_moves
        );
        Ok(self.summary)
    }
}

// Connection to the game server
//
// The bot only needs three things from the outside world: whether the game is
// still running, the next game state, and a way to submit a move. `Connection`
// captures that; `TcpConnection` speaks newline-delimited JSON over TCP and
// `arena::Arena` plays an offline game in-process.
//
// Wire format, one JSON object per line:
//   client -> server  {"name": "<bot name>"}      once, right after connecting
//   server -> client  GameState                   every tick
//   client -> server  {"move": <direction index>} every tick
//
// The server ends the game by closing the socket between ticks.

use log::{debug, info};
use serde::Serialize;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::net::TcpStream;

use crate::config::ServerConfig;
use crate::error::{BotError, Result};
use crate::types::{Direction, GameState};

/// Longest line accepted from the server
pub const MAX_LINE_BYTES: usize = 64 * 1024 * 1024;

/// Synchronous, blocking channel to a running game
pub trait Connection {
    /// Whether the game is still running for this bot. May block until the
    /// server either sends the next state or hangs up.
    fn is_active(&mut self) -> bool;

    /// Blocks until the next game state arrives
    fn receive_game_state(&mut self) -> Result<GameState>;

    /// Submits this tick's move. No acknowledgement is expected.
    fn send_move(&mut self, direction: Direction) -> Result<()>;
}

/// Handshake sent once after connecting
#[derive(Debug, Serialize)]
struct JoinMessage<'a> {
    name: &'a str,
}

/// Per-tick move message
#[derive(Debug, Serialize)]
struct MoveMessage {
    #[serde(rename = "move")]
    direction: Direction,
}

/// Line-delimited JSON connection over a blocking TCP stream
pub struct TcpConnection {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    active: bool,
    line: String,
    max_line_bytes: usize,
}

impl TcpConnection {
    /// Connects to the server and announces `name`
    pub fn connect(name: &str, server: &ServerConfig) -> Result<Self> {
        let addr = server.address();
        let stream = TcpStream::connect(&addr).map_err(|source| BotError::Connect {
            addr: addr.clone(),
            source,
        })?;
        stream.set_nodelay(true)?;

        let mut connection = TcpConnection {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
            active: true,
            line: String::new(),
            max_line_bytes: MAX_LINE_BYTES,
        };
        connection.write_line(&JoinMessage { name })?;
        info!("{}: Connected to {}", name, addr);

        Ok(connection)
    }

    /// Overrides the longest accepted server line
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    fn write_line<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let result = serde_json::to_writer(&mut self.writer, message)
            .map_err(BotError::from)
            .and_then(|_| {
                self.writer.write_all(b"\n")?;
                self.writer.flush()?;
                Ok(())
            });

        if result.is_err() {
            self.active = false;
        }
        result
    }
}

impl Connection for TcpConnection {
    fn is_active(&mut self) -> bool {
        if !self.active {
            return false;
        }
        // An orderly close between ticks is the end of the game
        match self.reader.fill_buf() {
            Ok(buf) if !buf.is_empty() => true,
            Ok(_) => {
                debug!("Server closed the connection");
                self.active = false;
                false
            }
            Err(e) => {
                debug!("Connection check failed: {}", e);
                self.active = false;
                false
            }
        }
    }

    fn receive_game_state(&mut self) -> Result<GameState> {
        self.line.clear();
        let limit = self.max_line_bytes as u64;
        let read = match (&mut self.reader).take(limit).read_line(&mut self.line) {
            Ok(n) => n,
            Err(e) => {
                self.active = false;
                return Err(e.into());
            }
        };
        if read == 0 {
            self.active = false;
            return Err(BotError::ConnectionLost(
                "server closed the connection".to_string(),
            ));
        }
        if !self.line.ends_with('\n') && read as u64 >= limit {
            self.active = false;
            return Err(BotError::InvalidSnapshot(format!(
                "message exceeds {} bytes",
                self.max_line_bytes
            )));
        }

        let state: GameState = serde_json::from_str(self.line.trim_end())?;
        state.validate()?;
        debug!("Received frame {} ({} players)", state.frame, state.players.len());

        Ok(state)
    }

    fn send_move(&mut self, direction: Direction) -> Result<()> {
        self.write_line(&MoveMessage { direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_message_encodes_direction_index() {
        let json = serde_json::to_string(&MoveMessage {
            direction: Direction::South,
        })
        .unwrap();
        assert_eq!(json, r#"{"move":2}"#);
    }

    #[test]
    fn test_join_message_carries_name() {
        let json = serde_json::to_string(&JoinMessage { name: "bot1" }).unwrap();
        assert_eq!(json, r#"{"name":"bot1"}"#);
    }
}

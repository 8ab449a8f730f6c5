// Configuration module for reading Cycles.toml
// Only connection and logging settings live here; the move strategy is fixed.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{BotError, Result};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "Cycles.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Game server address
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpStream::connect`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging defaults; `RUST_LOG` still wins when set
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| BotError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| BotError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Hardcoded fallback; should match Cycles.toml
    pub fn default_hardcoded() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 50000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Loads Cycles.toml, falling back to hardcoded defaults only when the file is absent
    pub fn load_or_default() -> Result<Self> {
        Self::load_from_or_default(DEFAULT_CONFIG_PATH)
    }

    /// A file that exists but cannot be read or parsed is an error
    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            eprintln!(
                "Warning: {} not found, using hardcoded defaults",
                path.display()
            );
            return Ok(Self::default_hardcoded());
        }
        Self::from_file(path)
    }

    /// Applies `CYCLES_HOST` / `CYCLES_PORT` from the environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            env::var("CYCLES_HOST").ok(),
            env::var("CYCLES_PORT").ok(),
        )
    }

    fn with_overrides(mut self, host: Option<String>, port: Option<String>) -> Result<Self> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| BotError::Config(format!("Invalid CYCLES_PORT '{}': {}", port, e)))?;
        }
        Ok(self)
    }
}

// Library exports for the zigzag cycles bot
// The main binary, the simulator, and the integration tests all build on these.

pub mod arena;
pub mod bot;
pub mod config;
pub mod connection;
pub mod error;
pub mod safety;
pub mod strategy;
pub mod trail;
pub mod types;

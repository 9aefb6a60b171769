// Library exports for the Pakku bot
// Integration tests and tools use the core engine through this crate root

pub mod client;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod food;
pub mod graph;
pub mod pathfind;
pub mod strategy;
pub mod types;

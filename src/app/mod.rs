//! Application layer: configuration and the container that wires
//! persistence adapters into bot creation.

pub mod config;
pub mod container;

pub use config::{AppConfig, BotConfig, SearchConfig};
pub use container::{App, AppBuilder};

//! Driver for the `springsim` binary.
//!
//! - [`config`] — the simulation configuration and its TOML loader
//! - [`simulation`] — builds the grid and model from a config and runs RK4

pub mod config;
pub mod simulation;

pub use config::{ConfigError, SimulationConfig};
pub use simulation::{Simulation, SimulationError, Summary};

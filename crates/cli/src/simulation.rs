//! Runs a configured spring-damper simulation.

use std::fmt;

use springsim_core::{TimeGrid, Trajectory};
use springsim_models::SpringDamper;
use springsim_solvers::transient::rk4;
use thiserror::Error;

use crate::config::{ConfigError, SimulationConfig};

/// Errors that can occur when running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("integration failed: {0}")]
    Integration(#[from] rk4::Error),
}

/// The outcome of a simulation: the grid, the model, and the trajectory.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub grid: TimeGrid,
    pub model: SpringDamper,
    pub trajectory: Trajectory,
}

impl Simulation {
    /// Validates `config`, builds the grid and model, and integrates.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or integration fails.
    pub fn run(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let grid = config.time_grid()?;
        let model = config.model()?;

        tracing::info!(
            start = grid.start(),
            end = grid.end(),
            points = grid.len(),
            "running spring-damper simulation"
        );

        let trajectory = rk4::integrate(&model, &config.initial_state, &grid)?;

        Ok(Self {
            grid,
            model,
            trajectory,
        })
    }

    /// Summarizes the final state of the run.
    ///
    /// A component the trajectory does not carry is reported as NaN.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let last = self.trajectory.last();
        let component = |index: usize| last.get(index).copied().unwrap_or(f64::NAN);
        Summary {
            points: self.trajectory.len(),
            final_time: self.grid.end(),
            position: component(0),
            velocity: component(1),
            equilibrium: self.model.equilibrium().map(|[position, _]| position),
        }
    }
}

/// Final state of a simulation, printed by `springsim run`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub points: usize,
    pub final_time: f64,
    pub position: f64,
    pub velocity: f64,
    /// Steady-state position `F / k`, when the model has a spring.
    pub equilibrium: Option<f64>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "points:      {}", self.points)?;
        writeln!(f, "final time:  {:.6} s", self.final_time)?;
        writeln!(f, "position:    {:.6}", self.position)?;
        write!(f, "velocity:    {:.6}", self.velocity)?;
        if let Some(equilibrium) = self.equilibrium {
            write!(f, "\nequilibrium: {equilibrium:.6}")?;
        }
        Ok(())
    }
}

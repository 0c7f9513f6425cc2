//! Simulation configuration.
//!
//! A config can be written as TOML; every key is optional and falls back to
//! the reference run:
//!
//! ```toml
//! start = 0.0
//! stop = 60.0
//! increment = 0.1
//! initial_state = [0.0, 0.0]
//!
//! [parameters]
//! damping = 4.0
//! stiffness = 2.0
//! mass = 20.0
//! force = 5.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use springsim_core::{GridError, TimeGrid};
use springsim_models::{ParameterError, Parameters, SpringDamper};
use thiserror::Error;

/// Errors that can occur when loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid time grid: {0}")]
    Grid(#[from] GridError),

    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),

    #[error("initial state must have {expected} components, got {actual}")]
    InitialState { expected: usize, actual: usize },
}

/// Everything needed to run one spring-damper simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// First grid time (s).
    pub start: f64,
    /// Last grid time (s), included up to rounding.
    pub stop: f64,
    /// Grid spacing (s).
    pub increment: f64,
    /// Initial `[position, velocity]`.
    pub initial_state: Vec<f64>,
    /// Model constants.
    pub parameters: Parameters,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 60.0,
            increment: 0.1,
            initial_state: vec![0.0, 0.0],
            parameters: Parameters::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid config.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml_str(&text)
    }

    /// Builds the time grid `start..=stop` with spacing `increment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds or increment do not describe a grid.
    pub fn time_grid(&self) -> Result<TimeGrid, ConfigError> {
        Ok(TimeGrid::arange(self.start, self.stop, self.increment)?)
    }

    /// Builds the spring-damper model.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid.
    pub fn model(&self) -> Result<SpringDamper, ConfigError> {
        Ok(SpringDamper::new(self.parameters)?)
    }

    /// Checks the whole config without running anything.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the grid, the parameters, or the
    /// initial state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_grid()?;
        self.model()?;
        if self.initial_state.len() != SpringDamper::STATE_DIM {
            return Err(ConfigError::InitialState {
                expected: SpringDamper::STATE_DIM,
                actual: self.initial_state.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = SimulationConfig::default();

        assert_eq!(config.start, 0.0);
        assert_eq!(config.stop, 60.0);
        assert_eq!(config.increment, 0.1);
        assert_eq!(config.initial_state, vec![0.0, 0.0]);
        assert_eq!(config.parameters, Parameters::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.time_grid().unwrap().len(), 601);
    }

    #[test]
    fn empty_document_is_default() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let text = r"
            stop = 10.0
            initial_state = [1.0, 0.0]

            [parameters]
            damping = 0.0
        ";

        let config = SimulationConfig::from_toml_str(text).unwrap();

        assert_eq!(config.stop, 10.0);
        assert_eq!(config.increment, 0.1);
        assert_eq!(config.initial_state, vec![1.0, 0.0]);
        assert_eq!(config.parameters.damping, 0.0);
        assert_eq!(config.parameters.mass, 20.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SimulationConfig::from_toml_str("duration = 5.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_reports_each_problem() {
        let bad_grid = SimulationConfig {
            increment: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(bad_grid.validate(), Err(ConfigError::Grid(_))));

        let bad_parameters = SimulationConfig {
            parameters: Parameters {
                mass: -1.0,
                ..Parameters::default()
            },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            bad_parameters.validate(),
            Err(ConfigError::Parameters(ParameterError::Mass(_)))
        ));

        let bad_state = SimulationConfig {
            initial_state: vec![1.0],
            ..SimulationConfig::default()
        };
        assert!(matches!(
            bad_state.validate(),
            Err(ConfigError::InitialState {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn oversized_grid_is_a_config_error() {
        let config = SimulationConfig {
            increment: 1e-300,
            ..SimulationConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Grid(GridError::TooManyPoints { .. }))
        ));
    }

    #[test]
    fn far_start_time_is_accepted() {
        let config = SimulationConfig {
            start: 1.7e9,
            stop: 1.7e9 + 1.0,
            ..SimulationConfig::default()
        };

        assert!(config.validate().is_ok());
        assert_eq!(config.time_grid().unwrap().len(), 11);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimulationConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

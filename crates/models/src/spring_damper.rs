//! A mass-spring-damper driven by a constant force.
//!
//! With position `x1` and velocity `x2`, the model is
//!
//! ```text
//! x1' = x2
//! x2' = (F - c x2 - k x1) / m
//! ```
//!
//! where `c` is the damping coefficient, `k` the spring stiffness, `m` the mass,
//! and `F` the applied force.

use serde::{Deserialize, Serialize};
use springsim_core::Derivative;
use thiserror::Error;
use uom::si::f64::{Force, Mass};

use crate::units::{DampingCoefficient, Stiffness};

/// Physical constants of a [`SpringDamper`], in SI units.
///
/// The default is the reference system: `c = 4 kg/s`, `k = 2 N/m`,
/// `m = 20 kg`, `F = 5 N`.
///
/// Fields left out of a deserialized document take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Damping coefficient `c` (kg/s).
    pub damping: f64,
    /// Spring stiffness `k` (N/m).
    pub stiffness: f64,
    /// Mass `m` (kg).
    pub mass: f64,
    /// Applied force `F` (N).
    pub force: f64,
}

/// Errors that can occur when validating [`Parameters`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("damping must be finite and non-negative, got {0}")]
    Damping(f64),

    #[error("stiffness must be finite and non-negative, got {0}")]
    Stiffness(f64),

    #[error("mass must be finite and positive, got {0}")]
    Mass(f64),

    #[error("force must be finite, got {0}")]
    Force(f64),
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            damping: 4.0,
            stiffness: 2.0,
            mass: 20.0,
            force: 5.0,
        }
    }
}

impl Parameters {
    /// Builds parameters from dimensioned quantities.
    #[must_use]
    pub fn from_quantities(
        damping: DampingCoefficient,
        stiffness: Stiffness,
        mass: Mass,
        force: Force,
    ) -> Self {
        Self {
            damping: damping.value,
            stiffness: stiffness.value,
            mass: mass.value,
            force: force.value,
        }
    }

    /// Validates that every constant is finite, the mass is positive, and the
    /// damping and stiffness are non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending constant.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ParameterError::Damping(self.damping));
        }
        if !self.stiffness.is_finite() || self.stiffness < 0.0 {
            return Err(ParameterError::Stiffness(self.stiffness));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ParameterError::Mass(self.mass));
        }
        if !self.force.is_finite() {
            return Err(ParameterError::Force(self.force));
        }
        Ok(())
    }
}

/// A forced mass-spring-damper with state `[position, velocity]`.
///
/// The model has no explicit time dependence. It always returns a
/// two-component derivative; a state of any other dimension gets a NaN
/// derivative, which integrators report as a shape mismatch.
///
/// The default model uses the reference [`Parameters`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpringDamper {
    parameters: Parameters,
}

impl SpringDamper {
    /// Number of state components: position and velocity.
    pub const STATE_DIM: usize = 2;

    /// Creates a model from validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `parameters` fail [`Parameters::validate`].
    pub fn new(parameters: Parameters) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    /// Returns the model parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the steady state `[F / k, 0]`, or `None` without a spring.
    #[must_use]
    pub fn equilibrium(&self) -> Option<[f64; 2]> {
        let Parameters {
            stiffness, force, ..
        } = self.parameters;
        (stiffness > 0.0).then(|| [force / stiffness, 0.0])
    }

    /// Returns the undamped natural frequency `sqrt(k / m)` in rad/s, or
    /// `None` without a spring.
    #[must_use]
    pub fn natural_frequency(&self) -> Option<f64> {
        let Parameters {
            stiffness, mass, ..
        } = self.parameters;
        (stiffness > 0.0).then(|| (stiffness / mass).sqrt())
    }

    /// Returns the damping ratio `c / (2 sqrt(k m))`, or `None` without a
    /// spring.
    ///
    /// Below one the response oscillates; at or above one it does not.
    #[must_use]
    pub fn damping_ratio(&self) -> Option<f64> {
        let Parameters {
            damping,
            stiffness,
            mass,
            ..
        } = self.parameters;
        (stiffness > 0.0).then(|| damping / (2.0 * (stiffness * mass).sqrt()))
    }
}

impl Derivative for SpringDamper {
    fn derivative(&self, state: &[f64], _t: f64) -> Vec<f64> {
        let &[position, velocity] = state else {
            return vec![f64::NAN; Self::STATE_DIM];
        };

        let Parameters {
            damping,
            stiffness,
            mass,
            force,
        } = self.parameters;

        vec![
            velocity,
            (force - damping * velocity - stiffness * position) / mass,
        ]
    }
}

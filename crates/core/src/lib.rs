//! Core traits and types for springsim.
//!
//! This crate defines the shared abstractions that integrators and models
//! build on:
//!
//! - [`Derivative`] — a pure mapping from `(state, t)` to the state's time
//!   derivative, implemented for any matching closure
//! - [`TimeGrid`] — a validated, uniformly spaced sequence of sample instants
//! - [`Trajectory`] — the row-major table of states produced by a run

mod derivative;
mod grid;
mod trajectory;

pub use derivative::Derivative;
pub use grid::{GridError, MAX_POINTS, TimeGrid};
pub use trajectory::{Trajectory, TrajectoryError};

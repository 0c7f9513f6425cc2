//! Solvers for transient problems: stepping an ODE system through time.
//!
//! A [`Derivative`] maps a state vector and a time to the state's rate of
//! change. Solvers in this module advance an initial state across a
//! [`TimeGrid`] and collect the result in a [`Trajectory`].
//!
//! # Solvers
//!
//! - [`rk4`] — classical fourth-order Runge-Kutta with a fixed step
//! - [`batch`] — independent RK4 runs distributed across threads
//!
//! [`Derivative`]: springsim_core::Derivative
//! [`TimeGrid`]: springsim_core::TimeGrid
//! [`Trajectory`]: springsim_core::Trajectory

pub mod batch;
pub mod rk4;

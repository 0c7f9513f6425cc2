//! Numerical integrators for springsim.
//!
//! # Modules
//!
//! - [`transient`] — fixed-step time integration of ODE systems defined by a
//!   [`Derivative`](springsim_core::Derivative)

pub mod transient;

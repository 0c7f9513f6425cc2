//! Reference models for springsim.
//!
//! - [`SpringDamper`] — a mass-spring-damper driven by a constant force, with
//!   its constants held in [`Parameters`]
//!
//! Models implement [`Derivative`](springsim_core::Derivative) and can be
//! passed to any integrator in `springsim-solvers`.

mod spring_damper;
pub mod units;

pub use spring_damper::{ParameterError, Parameters, SpringDamper};

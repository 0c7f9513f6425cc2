//! Independent RK4 runs distributed across a rayon thread pool.
//!
//! Each run owns its trajectory and only reads the shared derivative and grid,
//! so runs can execute in any order on any thread. Results come back in input
//! order and are identical to calling [`rk4::integrate`] for each run in turn.

use rayon::prelude::*;
use springsim_core::{Derivative, TimeGrid, Trajectory};

use super::rk4;

/// Integrates one system from many initial states in parallel.
///
/// Returns one result per entry of `initial_states`, in the same order. A
/// failing run does not affect the others.
pub fn integrate_states<D, S>(
    f: &D,
    initial_states: &[S],
    grid: &TimeGrid,
) -> Vec<Result<Trajectory, rk4::Error>>
where
    D: Derivative + Sync + ?Sized,
    S: AsRef<[f64]> + Sync,
{
    tracing::debug!(runs = initial_states.len(), "integrating initial states");

    initial_states
        .par_iter()
        .map(|initial| rk4::integrate(f, initial.as_ref(), grid))
        .collect()
}

/// Integrates many systems from one initial state in parallel.
///
/// Typical use is a parameter sweep, where each system is the same model built
/// from a different parameter set. Returns one result per system, in order.
pub fn integrate_systems<D>(
    systems: &[D],
    initial: &[f64],
    grid: &TimeGrid,
) -> Vec<Result<Trajectory, rk4::Error>>
where
    D: Derivative + Sync,
{
    tracing::debug!(runs = systems.len(), "integrating systems");

    systems
        .par_iter()
        .map(|f| rk4::integrate(f, initial, grid))
        .collect()
}

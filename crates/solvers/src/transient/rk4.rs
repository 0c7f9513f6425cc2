//! Classical fourth-order Runge-Kutta solver for ODE systems.
//!
//! This module advances a state across a uniform [`TimeGrid`] with the
//! explicit RK4 scheme, one step per consecutive pair of grid points:
//!
//! ```text
//! k1 = h * f(x_n,          t_n)
//! k2 = h * f(x_n + k1 / 2, t_n + h / 2)
//! k3 = h * f(x_n + k2 / 2, t_n + h / 2)
//! k4 = h * f(x_n + k3,     t_n + h)
//! x_{n+1} = x_n + (k1 + 2 k2 + 2 k3 + k4) / 6
//! ```
//!
//! The local truncation error is O(h⁵) and the global error O(h⁴) for smooth
//! derivatives. There is no step-size control: accuracy depends entirely on the
//! grid spacing, and a stiff system or an oversized step may blow up. Non-finite
//! values are not detected; once they appear they carry through every later row.
//!
//! # Example
//!
//! ```
//! use springsim_core::TimeGrid;
//! use springsim_solvers::transient::rk4;
//!
//! let decay = |x: &[f64], _t: f64| vec![-x[0]];
//! let grid = TimeGrid::arange(0.0, 1.0, 0.1)?;
//!
//! let trajectory = rk4::integrate(&decay, &[1.0], &grid)?;
//!
//! assert_eq!(trajectory.len(), grid.len());
//! assert!((trajectory.last()[0] - (-1.0_f64).exp()).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod stages;

pub use error::Error;

use springsim_core::{Derivative, TimeGrid, Trajectory, TrajectoryError};

use stages::Stages;

/// Advances `state` by a single RK4 step from `t` to `t + h`.
///
/// `h` may be negative to step backward in time.
///
/// # Errors
///
/// Returns [`Error::EmptyState`] if `state` is empty, or
/// [`Error::ShapeMismatch`] if `f` returns a vector of a different length
/// than `state`.
pub fn step<D>(f: &D, state: &[f64], t: f64, h: f64) -> Result<Vec<f64>, Error>
where
    D: Derivative + ?Sized,
{
    if state.is_empty() {
        return Err(Error::EmptyState);
    }

    let mut next = Vec::with_capacity(state.len());
    Stages::new(state.len()).advance(f, state, t, h, 0, &mut next)?;
    Ok(next)
}

/// Integrates `f` from `initial` across every point of `grid`.
///
/// # Algorithm
///
/// 1. Store `initial` as row 0, unchanged.
/// 2. Take the step size `h = grid[1] - grid[0]` once.
/// 3. For each `i` in `0..grid.len() - 1`, advance row `i` at time `grid[i]`
///    by one RK4 step and store it as row `i + 1`.
///
/// A single-point grid yields a trajectory holding only `initial`, and `f` is
/// never called.
///
/// # Errors
///
/// Returns [`Error::EmptyState`] if `initial` is empty, or
/// [`Error::ShapeMismatch`] as soon as `f` returns a vector of the wrong
/// length. No partial trajectory is returned.
pub fn integrate<D>(f: &D, initial: &[f64], grid: &TimeGrid) -> Result<Trajectory, Error>
where
    D: Derivative + ?Sized,
{
    let mut trajectory =
        Trajectory::from_initial(initial, grid.len()).map_err(|_| Error::EmptyState)?;

    let Some(h) = grid.step() else {
        tracing::debug!(dim = initial.len(), "single-point grid, no steps taken");
        return Ok(trajectory);
    };

    let span = tracing::debug_span!("rk4", dim = initial.len(), points = grid.len(), h);
    let _enter = span.enter();

    let mut stages = Stages::new(initial.len());
    let mut current = initial.to_vec();
    let mut next = Vec::with_capacity(initial.len());

    for (step, t) in grid.iter().take(grid.len() - 1).enumerate() {
        stages.advance(f, &current, t, h, step, &mut next)?;
        tracing::trace!(step, t, state = ?next);

        trajectory.push_row(&next).map_err(|err| match err {
            TrajectoryError::EmptyState => Error::EmptyState,
            TrajectoryError::ShapeMismatch { expected, actual } => Error::ShapeMismatch {
                step,
                expected,
                actual,
            },
        })?;
        std::mem::swap(&mut current, &mut next);
    }

    tracing::debug!(steps = grid.len() - 1, final_state = ?current, "integration complete");

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // --- Test fixtures ---

    /// Exponential decay: x' = -x.
    fn decay(x: &[f64], _t: f64) -> Vec<f64> {
        vec![-x[0]]
    }

    /// Undamped unit oscillator: x'' = -x.
    fn oscillator(x: &[f64], _t: f64) -> Vec<f64> {
        vec![x[1], -x[0]]
    }

    // --- Tests ---

    #[test]
    fn first_row_is_initial_state() {
        let grid = TimeGrid::arange(0.0, 1.0, 0.1).unwrap();
        let initial = [0.3, -1.7];

        let trajectory = integrate(&oscillator, &initial, &grid).unwrap();

        assert_eq!(trajectory.initial(), &initial);
        assert_eq!(trajectory.len(), grid.len());
        assert_eq!(trajectory.dim(), 2);
    }

    #[test]
    fn single_point_grid_returns_initial() {
        let calls = Cell::new(0);
        let f = |x: &[f64], _t: f64| {
            calls.set(calls.get() + 1);
            x.to_vec()
        };
        let grid = TimeGrid::new(vec![0.0]).unwrap();

        let trajectory = integrate(&f, &[5.0], &grid).unwrap();

        assert_eq!(trajectory.as_slice(), &[5.0]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn four_derivative_calls_per_step() {
        let calls = Cell::new(0);
        let f = |x: &[f64], _t: f64| {
            calls.set(calls.get() + 1);
            vec![-x[0]]
        };
        let grid = TimeGrid::uniform(0.0, 0.1, 11).unwrap();

        integrate(&f, &[1.0], &grid).unwrap();

        assert_eq!(calls.get(), 40);
    }

    #[test]
    fn matches_exponential_decay() {
        let grid = TimeGrid::arange(0.0, 2.0, 0.01).unwrap();

        let trajectory = integrate(&decay, &[1.0], &grid).unwrap();

        for (t, row) in grid.iter().zip(trajectory.rows()) {
            assert_relative_eq!(row[0], (-t).exp(), max_relative = 1e-9);
        }
    }

    #[test]
    fn exact_for_cubic_in_time() {
        // RK4 reduces to Simpson's rule when f depends only on t, which is
        // exact for polynomials up to degree three.
        let f = |_x: &[f64], t: f64| vec![3.0 * t * t];
        let grid = TimeGrid::uniform(0.0, 0.5, 5).unwrap();

        let trajectory = integrate(&f, &[0.0], &grid).unwrap();

        for (t, row) in grid.iter().zip(trajectory.rows()) {
            assert_abs_diff_eq!(row[0], t.powi(3), epsilon = 1e-12);
        }
    }

    #[test]
    fn uses_grid_times() {
        let f = |_x: &[f64], t: f64| vec![1.0, t];
        let grid = TimeGrid::uniform(10.0, 0.25, 5).unwrap();

        let trajectory = integrate(&f, &[0.0, 0.0], &grid).unwrap();

        // x0 tracks elapsed time; x1 integrates t from 10 to 11.
        assert_relative_eq!(trajectory.last()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(trajectory.last()[1], 10.5, epsilon = 1e-12);
    }

    #[test]
    fn backward_integration() {
        let forward_grid = TimeGrid::arange(0.0, 1.0, 0.05).unwrap();
        let forward = integrate(&decay, &[1.0], &forward_grid).unwrap();

        let backward_grid = TimeGrid::arange(1.0, 0.0, -0.05).unwrap();
        let backward = integrate(&decay, forward.last(), &backward_grid).unwrap();

        assert_relative_eq!(backward.last()[0], 1.0, max_relative = 1e-7);
    }

    #[test]
    fn single_step_matches_integrate() {
        let grid = TimeGrid::uniform(0.0, 0.1, 2).unwrap();

        let trajectory = integrate(&oscillator, &[1.0, 0.0], &grid).unwrap();
        let next = step(&oscillator, &[1.0, 0.0], 0.0, 0.1).unwrap();

        assert_eq!(trajectory.row(1), Some(next.as_slice()));
    }

    #[test]
    fn step_rejects_empty_state() {
        assert_eq!(step(&decay, &[], 0.0, 0.1), Err(Error::EmptyState));
    }

    #[test]
    fn integrate_rejects_empty_state() {
        let grid = TimeGrid::uniform(0.0, 0.1, 3).unwrap();
        assert_eq!(
            integrate(&oscillator, &[], &grid).unwrap_err(),
            Error::EmptyState
        );
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let f = |x: &[f64], _t: f64| vec![0.0; x.len() + 1];
        let grid = TimeGrid::uniform(0.0, 0.1, 4).unwrap();

        let err = integrate(&f, &[1.0, 2.0], &grid).unwrap_err();

        assert_eq!(
            err,
            Error::ShapeMismatch {
                step: 0,
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn shape_mismatch_on_later_step() {
        // Switches to the wrong dimension once t passes 0.15.
        let f = |x: &[f64], t: f64| {
            if t > 0.15 {
                vec![0.0]
            } else {
                vec![0.0; x.len()]
            }
        };
        let grid = TimeGrid::uniform(0.0, 0.1, 5).unwrap();

        let err = integrate(&f, &[1.0, 2.0], &grid).unwrap_err();

        // Step 1 probes t = 0.15 and then t = 0.2 at its last stage.
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                step: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn non_finite_values_propagate() {
        let f = |x: &[f64], t: f64| {
            if t >= 0.2 {
                vec![f64::NAN, x[1]]
            } else {
                vec![0.0, x[1]]
            }
        };
        let grid = TimeGrid::uniform(0.0, 0.1, 6).unwrap();

        let trajectory = integrate(&f, &[1.0, 1.0], &grid).unwrap();

        assert_eq!(trajectory.len(), 6);
        assert_eq!(trajectory.row(1).unwrap()[0], 1.0);
        // Step 1 reaches t = 0.2 in its final stage.
        for row in trajectory.rows().skip(2) {
            assert!(row[0].is_nan());
            assert!(row[1].is_finite());
        }
    }

    #[test]
    fn deterministic() {
        let grid = TimeGrid::arange(0.0, 10.0, 0.1).unwrap();

        let a = integrate(&oscillator, &[1.0, 0.5], &grid).unwrap();
        let b = integrate(&oscillator, &[1.0, 0.5], &grid).unwrap();

        let bits = |t: &Trajectory| t.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }
}

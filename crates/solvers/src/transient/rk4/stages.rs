use springsim_core::Derivative;

use super::Error;

/// Reusable buffers for the four RK4 stage increments.
///
/// Each `k` holds `h * f(probe, t)` for one stage. The probe buffer holds the
/// intermediate state passed to the derivative. Nothing here outlives a
/// single call to [`Stages::advance`] in any observable way.
#[derive(Debug)]
pub(super) struct Stages {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    probe: Vec<f64>,
}

impl Stages {
    pub(super) fn new(dim: usize) -> Self {
        Self {
            k1: Vec::with_capacity(dim),
            k2: Vec::with_capacity(dim),
            k3: Vec::with_capacity(dim),
            k4: Vec::with_capacity(dim),
            probe: Vec::with_capacity(dim),
        }
    }

    /// Advances `state` from `t` to `t + h` and writes the result to `next`.
    ///
    /// `step` is only used to label errors.
    pub(super) fn advance<D>(
        &mut self,
        f: &D,
        state: &[f64],
        t: f64,
        h: f64,
        step: usize,
        next: &mut Vec<f64>,
    ) -> Result<(), Error>
    where
        D: Derivative + ?Sized,
    {
        let Self {
            k1,
            k2,
            k3,
            k4,
            probe,
        } = self;
        let half = 0.5 * h;

        // k1 = h * f(x, t)
        increment(f, state, t, h, step, k1)?;

        // k2 = h * f(x + k1/2, t + h/2)
        offset(state, k1, 0.5, probe);
        increment(f, probe, t + half, h, step, k2)?;

        // k3 = h * f(x + k2/2, t + h/2)
        offset(state, k2, 0.5, probe);
        increment(f, probe, t + half, h, step, k3)?;

        // k4 = h * f(x + k3, t + h)
        offset(state, k3, 1.0, probe);
        increment(f, probe, t + h, h, step, k4)?;

        next.clear();
        next.extend(
            state
                .iter()
                .zip(k1.iter().zip(k2.iter()))
                .zip(k3.iter().zip(k4.iter()))
                .map(|((x, (a, b)), (c, d))| x + (a + 2.0 * b + 2.0 * c + d) / 6.0),
        );

        Ok(())
    }
}

/// Evaluates one stage and stores `h * f(probe, t)` in `out`.
fn increment<D>(
    f: &D,
    probe: &[f64],
    t: f64,
    h: f64,
    step: usize,
    out: &mut Vec<f64>,
) -> Result<(), Error>
where
    D: Derivative + ?Sized,
{
    let derivative = f.derivative(probe, t);

    if derivative.len() != probe.len() {
        tracing::warn!(
            step,
            t,
            expected = probe.len(),
            actual = derivative.len(),
            "derivative returned a vector of the wrong dimension"
        );
        return Err(Error::ShapeMismatch {
            step,
            expected: probe.len(),
            actual: derivative.len(),
        });
    }

    out.clear();
    out.extend(derivative.iter().map(|d| h * d));
    Ok(())
}

/// Writes `state + scale * k` to `out`.
fn offset(state: &[f64], k: &[f64], scale: f64, out: &mut Vec<f64>) {
    out.clear();
    out.extend(state.iter().zip(k).map(|(x, dx)| x + scale * dx));
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use approx::assert_relative_eq;

    #[test]
    fn probes_start_midpoints_and_end() {
        let calls = RefCell::new(Vec::new());
        let f = |x: &[f64], t: f64| {
            calls.borrow_mut().push((x[0], t));
            vec![1.0]
        };

        let mut stages = Stages::new(1);
        let mut next = Vec::new();
        stages.advance(&f, &[0.0], 2.0, 0.5, 0, &mut next).unwrap();

        // With a unit derivative every stage increment is h = 0.5.
        assert_eq!(
            calls.into_inner(),
            vec![(0.0, 2.0), (0.25, 2.25), (0.25, 2.25), (0.5, 2.5)]
        );
        assert_eq!(next, vec![0.5]);
    }

    #[test]
    fn weights_stages_one_two_two_one() {
        // f = t makes each stage depend only on its probe time:
        // k1 = 0, k2 = k3 = h * h/2, k4 = h * h.
        let f = |_x: &[f64], t: f64| vec![t];
        let h = 0.2;

        let mut stages = Stages::new(1);
        let mut next = Vec::new();
        stages.advance(&f, &[1.0], 0.0, h, 0, &mut next).unwrap();

        let expected = 1.0 + (0.0 + 2.0 * h * h / 2.0 + 2.0 * h * h / 2.0 + h * h) / 6.0;
        assert_relative_eq!(next[0], expected, epsilon = 1e-15);
    }

    #[test]
    fn reports_wrong_dimension() {
        let f = |_x: &[f64], _t: f64| vec![0.0; 3];

        let mut stages = Stages::new(2);
        let mut next = Vec::new();
        let err = stages
            .advance(&f, &[1.0, 2.0], 0.0, 0.1, 7, &mut next)
            .unwrap_err();

        assert_eq!(
            err,
            Error::ShapeMismatch {
                step: 7,
                expected: 2,
                actual: 3
            }
        );
    }
}

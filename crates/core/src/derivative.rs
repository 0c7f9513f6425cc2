/// Defines the right-hand side of a first-order ODE system.
///
/// A derivative maps a state vector and a time to the time derivative of that
/// state. Integrators call it several times per step with intermediate stage
/// states that do not lie on the true trajectory, so implementations must be
/// pure: no interior mutation, no dependence on call history, and defined for
/// any state of the expected dimension.
///
/// The returned vector must have the same length as `state`. Integrators treat
/// a length mismatch as a contract violation and report it as an error.
///
/// Any closure with the signature `Fn(&[f64], f64) -> Vec<f64>` implements
/// this trait, so ad-hoc systems need no wrapper type:
///
/// ```
/// use springsim_core::Derivative;
///
/// let decay = |x: &[f64], _t: f64| vec![-x[0]];
/// assert_eq!(decay.derivative(&[2.0], 0.0), vec![-2.0]);
/// ```
pub trait Derivative {
    /// Returns `d(state)/dt` at time `t`.
    fn derivative(&self, state: &[f64], t: f64) -> Vec<f64>;
}

impl<F> Derivative for F
where
    F: Fn(&[f64], f64) -> Vec<f64>,
{
    fn derivative(&self, state: &[f64], t: f64) -> Vec<f64> {
        self(state, t)
    }
}

//! Shared fixtures for cross-crate tests.

use springsim_models::{Parameters, SpringDamper};

/// Unit harmonic oscillator: `c = 0`, `k = 1`, `m = 1`, `F = 0`.
///
/// From `[1, 0]` the exact position is `cos(t)`.
#[must_use]
pub fn harmonic_oscillator() -> SpringDamper {
    SpringDamper::new(Parameters {
        damping: 0.0,
        stiffness: 1.0,
        mass: 1.0,
        force: 0.0,
    })
    .expect("unit oscillator parameters are valid")
}

/// Exact `[position, velocity]` of an underdamped spring-damper at time `t`.
///
/// # Panics
///
/// Panics if the parameters do not describe an underdamped system with a
/// spring (`k > 0` and `c² < 4 k m`).
#[must_use]
pub fn underdamped_solution(parameters: &Parameters, initial: [f64; 2], t: f64) -> [f64; 2] {
    let Parameters {
        damping,
        stiffness,
        mass,
        force,
    } = *parameters;

    let sigma = damping / (2.0 * mass);
    let omega_sq = stiffness / mass - sigma * sigma;
    assert!(
        stiffness > 0.0 && omega_sq > 0.0,
        "system must be underdamped"
    );
    let omega = omega_sq.sqrt();

    // Offset from equilibrium decays as a damped sinusoid.
    let y0 = initial[0] - force / stiffness;
    let v0 = initial[1];
    let b = (v0 + sigma * y0) / omega;

    let decay = (-sigma * t).exp();
    let (sin, cos) = (omega * t).sin_cos();

    [
        force / stiffness + decay * (y0 * cos + b * sin),
        decay * (v0 * cos - (sigma * b + omega * y0) * sin),
    ]
}

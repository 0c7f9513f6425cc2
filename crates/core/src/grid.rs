use thiserror::Error;

/// Relative tolerance on spacing when checking that a grid is uniform.
///
/// Grids built as `start + i * step` or by repeated addition differ from the
/// nominal step by rounding error only, which is far below this bound.
const UNIFORM_REL_TOL: f64 = 1e-6;

/// Rounding allowance, in units of `f64::EPSILON` times the magnitude of the
/// compared points.
///
/// Each point carries a rounding error proportional to its own magnitude, so
/// spacings far from the origin (e.g. a grid starting at a Unix timestamp)
/// vary by more than `UNIFORM_REL_TOL * |step|` even when built uniformly.
const ROUNDING_ULPS: f64 = 4.0;

/// Largest number of points a constructor will allocate.
pub const MAX_POINTS: usize = 1 << 30;

/// Errors that can occur when constructing a [`TimeGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("time grid must contain at least one point")]
    Empty,

    #[error("time grid point {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("time grid step must be finite and non-zero, got {step}")]
    InvalidStep { step: f64 },

    #[error("time grid would have {requested} points, more than the limit of {max}", max = MAX_POINTS)]
    TooManyPoints { requested: f64 },

    #[error("time grid is not uniform at index {index}: expected step {expected}, found {actual}")]
    NonUniform {
        index: usize,
        expected: f64,
        actual: f64,
    },
}

/// An ordered, uniformly spaced sequence of sample instants.
///
/// The spacing `step = t[1] - t[0]` is non-zero and holds for every
/// consecutive pair. A negative step describes a grid that runs backward in
/// time. A single-point grid is valid and has no step.
///
/// A `TimeGrid` is immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// Creates a grid from explicit points.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty, contains a non-finite value,
    /// has a zero step, or is not uniformly spaced.
    pub fn new(points: Vec<f64>) -> Result<Self, GridError> {
        if points.is_empty() {
            return Err(GridError::Empty);
        }

        if let Some((index, &value)) = points.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(GridError::NonFinite { index, value });
        }

        if let [first, second, ..] = points[..] {
            let expected = second - first;
            if expected == 0.0 || !expected.is_finite() {
                return Err(GridError::InvalidStep { step: expected });
            }

            let first_scale = first.abs().max(second.abs());
            for (index, pair) in points.windows(2).enumerate().skip(1) {
                let actual = pair[1] - pair[0];
                let scale = first_scale.max(pair[0].abs()).max(pair[1].abs());
                let tol = UNIFORM_REL_TOL * expected.abs() + ROUNDING_ULPS * f64::EPSILON * scale;

                // Spacing must keep the sign of the first step and never vanish.
                let reversed =
                    actual == 0.0 || actual.is_sign_negative() != expected.is_sign_negative();
                if reversed || (actual - expected).abs() > tol {
                    return Err(GridError::NonUniform {
                        index: index + 1,
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(Self { points })
    }

    /// Creates a grid of `len` points `start + i * step`.
    ///
    /// # Errors
    ///
    /// Returns an error if `len` is zero or exceeds [`MAX_POINTS`], `start` is
    /// not finite, or `step` is zero or not finite while `len > 1`.
    pub fn uniform(start: f64, step: f64, len: usize) -> Result<Self, GridError> {
        if len > 1 && (step == 0.0 || !step.is_finite()) {
            return Err(GridError::InvalidStep { step });
        }
        if len > MAX_POINTS {
            #[allow(clippy::cast_precision_loss)]
            let requested = len as f64;
            return Err(GridError::TooManyPoints { requested });
        }

        #[allow(clippy::cast_precision_loss)]
        let points = (0..len).map(|i| start + i as f64 * step).collect();

        Self::new(points)
    }

    /// Creates a grid from `start` to `stop` with the given `increment`.
    ///
    /// Points are `start + i * increment`. The stop bound is padded by half an
    /// increment so that `stop` itself is included even when rounding would
    /// otherwise drop it: `arange(0.0, 60.0, 0.1)` has 601 points, the last
    /// of which is `60.0` up to rounding.
    ///
    /// # Errors
    ///
    /// Returns an error if `increment` is zero or not finite, if `start` or
    /// `stop` is not finite, if the range contains no points (for example
    /// `stop < start` with a positive increment), or if it would contain more
    /// than [`MAX_POINTS`].
    pub fn arange(start: f64, stop: f64, increment: f64) -> Result<Self, GridError> {
        if increment == 0.0 || !increment.is_finite() {
            return Err(GridError::InvalidStep { step: increment });
        }
        if !start.is_finite() {
            return Err(GridError::NonFinite {
                index: 0,
                value: start,
            });
        }
        if !stop.is_finite() {
            return Err(GridError::NonFinite {
                index: 0,
                value: stop,
            });
        }

        let span = (stop + 0.5 * increment - start) / increment;
        if span <= 0.0 {
            return Err(GridError::Empty);
        }
        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_POINTS as f64;
        if !span.is_finite() || span > limit {
            return Err(GridError::TooManyPoints {
                requested: span.ceil(),
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = span.ceil() as usize;

        Self::uniform(start, increment, len)
    }

    /// Returns the grid points.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Returns an iterator over the grid points.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied()
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a grid holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first point.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.points[0]
    }

    /// Returns the last point.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Returns the step `t[1] - t[0]`, or `None` for a single-point grid.
    #[must_use]
    pub fn step(&self) -> Option<f64> {
        match self.points[..] {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }
}

impl std::ops::Index<usize> for TimeGrid {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.points[index]
    }
}

impl TryFrom<Vec<f64>> for TimeGrid {
    type Error = GridError;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

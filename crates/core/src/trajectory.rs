use thiserror::Error;

/// Errors that can occur when building a [`Trajectory`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("trajectory state dimension must be at least one")]
    EmptyState,

    #[error("row has {actual} values but the trajectory dimension is {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// A table of states, one row per time-grid point.
///
/// Rows are stored contiguously in row-major order. Row 0 is the initial
/// state exactly as supplied. Rows can only be appended, so row `i + 1` is
/// always written after row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    dim: usize,
    data: Vec<f64>,
}

impl Trajectory {
    /// Starts a trajectory from its initial state.
    ///
    /// `capacity` is the expected total number of rows and is used only to
    /// reserve storage up front.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::EmptyState`] if `initial` is empty.
    pub fn from_initial(initial: &[f64], capacity: usize) -> Result<Self, TrajectoryError> {
        if initial.is_empty() {
            return Err(TrajectoryError::EmptyState);
        }

        let mut data = Vec::with_capacity(capacity.max(1) * initial.len());
        data.extend_from_slice(initial);

        Ok(Self {
            dim: initial.len(),
            data,
        })
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::ShapeMismatch`] if `row` does not have
    /// exactly [`dim`](Self::dim) values. The trajectory is left unchanged.
    pub fn push_row(&mut self, row: &[f64]) -> Result<(), TrajectoryError> {
        if row.len() != self.dim {
            return Err(TrajectoryError::ShapeMismatch {
                expected: self.dim,
                actual: row.len(),
            });
        }

        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Always `false`; a trajectory holds at least its initial state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the state dimension (number of columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns row `index`, or `None` if out of range.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.dim)?;
        let end = start.checked_add(self.dim)?;
        self.data.get(start..end)
    }

    /// Returns an iterator over rows in time order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Returns the values of column `index` in time order, or `None` if the
    /// column is out of range.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.dim).then(|| self.rows().map(|row| row[index]).collect())
    }

    /// Returns the initial state.
    #[must_use]
    pub fn initial(&self) -> &[f64] {
        &self.data[..self.dim]
    }

    /// Returns the most recent state.
    #[must_use]
    pub fn last(&self) -> &[f64] {
        &self.data[self.data.len() - self.dim..]
    }

    /// Returns the underlying row-major storage.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

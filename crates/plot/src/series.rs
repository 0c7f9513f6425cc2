use springsim_core::{TimeGrid, Trajectory};
use thiserror::Error;

/// Errors that can occur when extracting plot data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlotError {
    #[error("column {column} is out of range for a trajectory of dimension {dim}")]
    ColumnOutOfRange { column: usize, dim: usize },

    #[error("time grid has {grid} points but the trajectory has {trajectory} rows")]
    LengthMismatch { grid: usize, trajectory: usize },
}

/// Pairs each grid time with column `column` of `trajectory`.
///
/// # Errors
///
/// Returns an error if `column` is not a valid state index or if the grid and
/// trajectory lengths differ.
pub fn series(
    grid: &TimeGrid,
    trajectory: &Trajectory,
    column: usize,
) -> Result<Vec<[f64; 2]>, PlotError> {
    if grid.len() != trajectory.len() {
        return Err(PlotError::LengthMismatch {
            grid: grid.len(),
            trajectory: trajectory.len(),
        });
    }
    if column >= trajectory.dim() {
        return Err(PlotError::ColumnOutOfRange {
            column,
            dim: trajectory.dim(),
        });
    }

    Ok(grid
        .iter()
        .zip(trajectory.rows())
        .map(|(t, row)| [t, row[column]])
        .collect())
}

/// A named line of `[x, y]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// A collection of series to be drawn on one chart.
///
/// Build with [`TrajectoryPlot::new`] and chain
/// [`column`](TrajectoryPlot::column) for each state component to show.
///
/// # Example
///
/// ```
/// use springsim_core::{TimeGrid, Trajectory};
/// use springsim_plot::TrajectoryPlot;
///
/// let grid = TimeGrid::uniform(0.0, 1.0, 2)?;
/// let mut trajectory = Trajectory::from_initial(&[0.0, 1.0], 2)?;
/// trajectory.push_row(&[1.0, 0.5])?;
///
/// let plot = TrajectoryPlot::new()
///     .column("Position (x1)", &grid, &trajectory, 0)?
///     .column("Velocity (x2)", &grid, &trajectory, 1)?;
///
/// assert_eq!(plot.series()[1].points, vec![[0.0, 1.0], [1.0, 0.5]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryPlot {
    pub(crate) series: Vec<Series>,
}

impl TrajectoryPlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds column `column` of `trajectory` against `grid` as a named series.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`series`].
    pub fn column(
        mut self,
        name: &str,
        grid: &TimeGrid,
        trajectory: &Trajectory,
        column: usize,
    ) -> Result<Self, PlotError> {
        let points = series(grid, trajectory, column)?;
        self.series.push(Series {
            name: name.to_owned(),
            points,
        });
        Ok(self)
    }

    /// Adds an arbitrary named series, such as an analytical reference curve.
    #[must_use]
    pub fn add_series(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.series.push(Series {
            name: name.to_owned(),
            points: points.to_vec(),
        });
        self
    }

    /// Returns the collected series in insertion order.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }
}

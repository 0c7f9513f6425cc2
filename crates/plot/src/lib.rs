//! Plotting for springsim trajectories.
//!
//! Plotting is a separate stage from integration: a solver produces a
//! [`Trajectory`](springsim_core::Trajectory) over a
//! [`TimeGrid`](springsim_core::TimeGrid), and this crate turns selected
//! columns of that table into `(t, value)` series for a line chart.
//!
//! # Features
//!
//! - `window` — Enables [`TrajectoryPlot::show`] for rendering via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.

mod series;

#[cfg(feature = "window")]
mod window;

pub use series::{PlotError, Series, TrajectoryPlot, series};

#[cfg(feature = "window")]
pub use window::ShowConfig;

//! Native egui window for a [`TrajectoryPlot`].

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::{Series, TrajectoryPlot};

/// Configuration for rendering a [`TrajectoryPlot`].
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// plot.show(
///     ShowConfig::new()
///         .title("Simulation of Mass-Damper-Spring (RK4)")
///         .x_label("Time (s)")
///         .legend(),
/// )?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    legend: bool,
    hide_grid: bool,
}

impl ShowConfig {
    /// Creates a config with no title, no axis labels, no legend, and grid
    /// lines shown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the x-axis label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Sets the y-axis label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Enables a legend labeling each series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Hides the background grid lines.
    #[must_use]
    pub fn hide_grid(mut self) -> Self {
        self.hide_grid = true;
        self
    }
}

impl TrajectoryPlot {
    /// Opens a blocking egui window displaying all series.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let app = PlotApp {
            series: self.series,
            config,
        };

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
    }
}

/// The egui [`eframe::App`] that renders collected series.
struct PlotApp {
    series: Vec<Series>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(title) = &self.config.title {
                ui.heading(title);
            }

            let mut plot = Plot::new("trajectory_plot").show_grid(!self.config.hide_grid);
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.config.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            if let Some(label) = &self.config.y_label {
                plot = plot.y_axis_label(label.clone());
            }

            plot.show(ui, |plot_ui| {
                for Series { name, points } in &self.series {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}

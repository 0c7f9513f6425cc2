use std::{error::Error, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use springsim_cli::{Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "springsim")]
#[command(about = "Simulate a forced mass-spring-damper with fixed-step RK4", long_about = None)]
struct Cli {
    /// Path to a TOML config file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate and print the final state
    Run(Overrides),
    /// Integrate and plot position and velocity against time
    #[cfg(feature = "plot")]
    Plot(Overrides),
}

#[derive(Args)]
struct Overrides {
    /// Start time in seconds
    #[arg(long)]
    start: Option<f64>,
    /// Stop time in seconds (included)
    #[arg(long)]
    stop: Option<f64>,
    /// Time increment in seconds
    #[arg(long)]
    increment: Option<f64>,
    /// Initial position
    #[arg(long)]
    position: Option<f64>,
    /// Initial velocity
    #[arg(long)]
    velocity: Option<f64>,
    /// Damping coefficient c (kg/s)
    #[arg(long)]
    damping: Option<f64>,
    /// Spring stiffness k (N/m)
    #[arg(long)]
    stiffness: Option<f64>,
    /// Mass m (kg)
    #[arg(long)]
    mass: Option<f64>,
    /// Applied force F (N)
    #[arg(long)]
    force: Option<f64>,
}

impl Overrides {
    fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        let assign = |slot: &mut f64, value: Option<f64>| {
            if let Some(value) = value {
                *slot = value;
            }
        };

        assign(&mut config.start, self.start);
        assign(&mut config.stop, self.stop);
        assign(&mut config.increment, self.increment);
        assign(&mut config.parameters.damping, self.damping);
        assign(&mut config.parameters.stiffness, self.stiffness);
        assign(&mut config.parameters.mass, self.mass);
        assign(&mut config.parameters.force, self.force);

        if let [position, velocity] = config.initial_state.as_mut_slice() {
            assign(position, self.position);
            assign(velocity, self.velocity);
        } else if self.position.is_some() || self.velocity.is_some() {
            config.initial_state = vec![self.position.unwrap_or(0.0), self.velocity.unwrap_or(0.0)];
        }

        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    match cli.command {
        Commands::Run(overrides) => cmd_run(&overrides.apply(base)),
        #[cfg(feature = "plot")]
        Commands::Plot(overrides) => cmd_plot(&overrides.apply(base)),
    }
}

fn cmd_run(config: &SimulationConfig) -> Result<(), Box<dyn Error>> {
    let simulation = Simulation::run(config)?;
    println!("{}", simulation.summary());
    Ok(())
}

#[cfg(feature = "plot")]
fn cmd_plot(config: &SimulationConfig) -> Result<(), Box<dyn Error>> {
    use springsim_plot::{ShowConfig, TrajectoryPlot};

    let Simulation {
        grid, trajectory, ..
    } = Simulation::run(config)?;

    TrajectoryPlot::new()
        .column("Position (x1)", &grid, &trajectory, 0)?
        .column("Velocity (x2)", &grid, &trajectory, 1)?
        .show(
            ShowConfig::new()
                .title("Simulation of Mass-Damper-Spring (RK4)")
                .x_label("Time (s)")
                .y_label("State Variable Value")
                .legend(),
        )?;

    Ok(())
}

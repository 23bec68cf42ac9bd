//! `bicycle-sim` CLI: simulate reference maneuvers and write out their
//! control tables and trajectory plots.

use anyhow::Result;
use bicycle_sim::{export, plot, simulate, BicycleModel, Maneuver, VehicleParams};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bicycle-sim", about = "Kinematic bicycle model simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one maneuver and write its data table and path plot.
    Run {
        #[arg(value_enum)]
        maneuver: Maneuver,
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Where to write the (time, v, w) table; defaults to <maneuver>.txt
        #[arg(long)]
        data: Option<PathBuf>,
        /// Where to write the x-y path plot; defaults to <maneuver>.png
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Simulate every reference maneuver with default output paths.
    All {
        #[command(flatten)]
        geometry: GeometryArgs,
    },
}

#[derive(Args)]
struct GeometryArgs {
    /// Wheelbase in m
    #[arg(long, default_value_t = VehicleParams::default().wheelbase)]
    wheelbase: f64,
    /// Rear axle to centre-of-mass distance in m
    #[arg(long, default_value_t = VehicleParams::default().rear_axle_to_com)]
    rear_axle_to_com: f64,
    /// Steering rate limit in rad/s
    #[arg(long, default_value_t = VehicleParams::default().max_steer_rate)]
    max_steer_rate: f64,
}

impl GeometryArgs {
    fn params(&self) -> VehicleParams {
        VehicleParams {
            wheelbase: self.wheelbase,
            rear_axle_to_com: self.rear_axle_to_com,
            max_steer_rate: self.max_steer_rate,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            maneuver,
            geometry,
            data,
            plot,
        } => run_maneuver(maneuver, geometry.params(), data, plot),
        Commands::All { geometry } => {
            for maneuver in Maneuver::ALL {
                run_maneuver(maneuver, geometry.params(), None, None)?;
            }
            Ok(())
        }
    }
}

fn run_maneuver(
    maneuver: Maneuver,
    params: VehicleParams,
    data: Option<PathBuf>,
    plot: Option<PathBuf>,
) -> Result<()> {
    let mut model = BicycleModel::new(params)?;
    let profile = maneuver.profile(model.params());
    let trajectory = simulate(&mut model, &profile)?;

    let data_path =
        data.unwrap_or_else(|| PathBuf::from(format!("{}.txt", maneuver.file_stem())));
    export::write_profile(&profile, &data_path)?;

    let plot_path =
        plot.unwrap_or_else(|| PathBuf::from(format!("{}.png", maneuver.file_stem())));
    plot::plot_trajectory(&trajectory, maneuver.title(), &plot_path)?;

    println!(
        "Wrote {} and {}",
        data_path.display(),
        plot_path.display()
    );
    Ok(())
}

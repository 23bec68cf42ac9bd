pub use cgmath;
pub use error::{ExportError, ModelError, PlotError};
pub use maneuver::{ControlProfile, ControlSample, Maneuver, SAMPLE_TIME};
pub use model::{BicycleModel, VehicleParams, VehicleState};
pub use simulation::{simulate, Trajectory, TrajectorySample};
pub use util::Interval;

mod debug;
mod error;
pub mod export;
mod maneuver;
mod model;
pub mod plot;
mod simulation;
mod util;

/// A 2D point
pub type Point2d = cgmath::Point2<f64>;

/// A 2D vector
pub type Vector2d = cgmath::Vector2<f64>;

//! Error types surfaced by the simulator.

use std::path::PathBuf;

/// Possible errors from constructing or stepping a [BicycleModel](crate::BicycleModel).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A geometry parameter violated its constraint at construction.
    #[error("invalid parameter `{name}` = {value}: must satisfy {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A step input was rejected; the model state is unchanged.
    #[error("invalid step input `{name}` = {value}")]
    InvalidInput { name: &'static str, value: f64 },
}

/// Possible errors from writing a control profile to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write profile to {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Possible errors from rendering a trajectory plot.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to render plot to {path:?}: {message}")]
    Backend { path: PathBuf, message: String },

    #[error("nothing to plot: the trajectory is empty")]
    EmptyTrajectory,
}

//! Drives a model through a control profile and records the trajectory.

use crate::error::ModelError;
use crate::maneuver::ControlProfile;
use crate::model::{BicycleModel, VehicleState};
use crate::util::Interval;
use crate::{debug, Point2d};

/// One simulated sample: the applied command and the state it produced.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectorySample {
    /// Offset from the start of the run in s.
    pub time: f64,
    /// The velocity that was applied in m/s.
    pub velocity: f64,
    /// The steering rate that was commanded in rad/s.
    pub steer_rate: f64,
    /// The state after the step.
    pub state: VehicleState,
}

/// The result of driving a model through a control profile.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    /// The recorded samples, in time order.
    pub samples: Vec<TrajectorySample>,
    /// Debugging information captured during the run as a JSON array.
    #[cfg(feature = "debug")]
    pub debug: serde_json::Value,
}

impl Trajectory {
    /// The travelled positions, in time order.
    pub fn positions(&self) -> impl Iterator<Item = Point2d> + '_ {
        self.samples.iter().map(|s| s.state.position())
    }

    /// Axis-aligned bounds of the travelled path, or `None` if no samples
    /// were recorded.
    pub fn bounds(&self) -> Option<(Interval<f64>, Interval<f64>)> {
        let mut positions = self.positions();
        let first = positions.next()?;
        let mut x = Interval::new(first.x, first.x);
        let mut y = Interval::new(first.y, first.y);
        for p in positions {
            x.include(p.x);
            y.include(p.y);
        }
        Some((x, y))
    }
}

/// Runs the model through every sample of the profile, in time order.
///
/// The model is reset first, so the trajectory always starts from the
/// origin. A rejected step surfaces immediately and discards the run.
pub fn simulate(
    model: &mut BicycleModel,
    profile: &ControlProfile,
) -> Result<Trajectory, ModelError> {
    model.reset();
    let mut samples = Vec::with_capacity(profile.len());
    for cmd in &profile.samples {
        let state = model.step(cmd.velocity, cmd.steer_rate, profile.sample_time)?;
        debug::debug_state(cmd.time, &state);
        samples.push(TrajectorySample {
            time: cmd.time,
            velocity: cmd.velocity,
            steer_rate: cmd.steer_rate,
            state,
        });
    }
    log::debug!(
        "simulated {} samples covering {:.2} s",
        samples.len(),
        profile.duration()
    );
    Ok(Trajectory {
        samples,
        #[cfg(feature = "debug")]
        debug: debug::take_debug_frame(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maneuver::ControlSample;
    use assert_approx_eq::assert_approx_eq;

    fn constant_profile(velocity: f64, steer_rate: f64, n: usize) -> ControlProfile {
        ControlProfile {
            sample_time: 0.01,
            samples: (0..n)
                .map(|i| ControlSample {
                    time: i as f64 * 0.01,
                    velocity,
                    steer_rate,
                })
                .collect(),
        }
    }

    #[test]
    fn records_one_sample_per_command() {
        let mut model = BicycleModel::default();
        let profile = constant_profile(2.0, 0.0, 50);
        let trajectory = simulate(&mut model, &profile).unwrap();
        assert_eq!(trajectory.samples.len(), 50);
        assert_approx_eq!(trajectory.samples.last().unwrap().state.x, 1.0);
    }

    #[test]
    fn resets_before_running() {
        let mut model = BicycleModel::default();
        model.step(10.0, 1.0, 1.0).unwrap();

        let profile = constant_profile(1.0, 0.0, 10);
        let trajectory = simulate(&mut model, &profile).unwrap();
        assert_approx_eq!(trajectory.samples[0].state.x, 0.01);
        assert_eq!(trajectory.samples[0].state.y, 0.0);
    }

    #[test]
    fn empty_profile_yields_empty_trajectory() {
        let mut model = BicycleModel::default();
        let profile = constant_profile(1.0, 0.0, 0);
        let trajectory = simulate(&mut model, &profile).unwrap();
        assert!(trajectory.samples.is_empty());
        assert!(trajectory.bounds().is_none());
    }

    #[test]
    fn bounds_cover_the_path() {
        let mut model = BicycleModel::default();
        let profile = constant_profile(2.0, 0.0, 100);
        let trajectory = simulate(&mut model, &profile).unwrap();
        let (x, y) = trajectory.bounds().unwrap();
        assert_approx_eq!(x.min, 0.02);
        assert_approx_eq!(x.max, 2.0);
        assert_eq!(y.min, 0.0);
        assert_eq!(y.max, 0.0);
    }

    #[test]
    fn invalid_profile_surfaces_the_step_error() {
        let mut model = BicycleModel::default();
        let mut profile = constant_profile(1.0, 0.0, 10);
        profile.sample_time = 0.0;
        assert!(matches!(
            simulate(&mut model, &profile),
            Err(ModelError::InvalidInput { .. })
        ));
    }
}

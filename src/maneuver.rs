//! Reference maneuver profiles.
//!
//! Each maneuver is a pure function from the vehicle geometry to a
//! time-indexed control profile; no simulation or I/O happens here, so the
//! model can be exercised without touching the file system or a display.

use crate::model::VehicleParams;
use crate::util::Interval;
use itertools::repeat_n;
use std::f64::consts::TAU;
use std::iter;

/// The sample time shared by all reference profiles in s.
pub const SAMPLE_TIME: f64 = 0.01; // s

/// A single timed control input.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlSample {
    /// Offset from the start of the run in s.
    pub time: f64,
    /// Commanded longitudinal velocity in m/s.
    pub velocity: f64,
    /// Commanded steering rate in rad/s.
    pub steer_rate: f64,
}

/// A fixed-rate, time-ordered sequence of control inputs.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlProfile {
    /// Interval between consecutive samples in s.
    pub sample_time: f64,
    /// The ordered control samples.
    pub samples: Vec<ControlSample>,
}

impl ControlProfile {
    /// Builds a constant-velocity profile from a steering rate sequence.
    fn from_rates(
        sample_time: f64,
        velocity: f64,
        rates: impl IntoIterator<Item = f64>,
    ) -> Self {
        let samples = rates
            .into_iter()
            .enumerate()
            .map(|(i, steer_rate)| ControlSample {
                time: i as f64 * sample_time,
                velocity,
                steer_rate,
            })
            .collect();
        Self {
            sample_time,
            samples,
        }
    }

    /// The number of samples in the profile.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the profile contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The total simulated time covered by the profile in s.
    pub fn duration(&self) -> f64 {
        self.len() as f64 * self.sample_time
    }
}

/// A canned reference maneuver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    /// Two opposite constant-radius loops joined into an eight.
    FigureEight,
    /// A single sinusoidal steering pulse at constant speed.
    LaneChange,
    /// Four 90 degree corners joined by straights.
    Square,
    /// A repeated left-right weave.
    WavePath,
}

impl Maneuver {
    /// Every reference maneuver, in presentation order.
    pub const ALL: [Maneuver; 4] = [
        Maneuver::FigureEight,
        Maneuver::LaneChange,
        Maneuver::Square,
        Maneuver::WavePath,
    ];

    /// Builds the control profile for this maneuver.
    ///
    /// Only the figure-eight depends on the geometry: its steering ramp is
    /// sized from the wheelbase and the rate limit.
    pub fn profile(self, params: &VehicleParams) -> ControlProfile {
        match self {
            Self::FigureEight => figure_eight(params),
            Self::LaneChange => lane_change(),
            Self::Square => square(),
            Self::WavePath => wave_path(),
        }
    }

    /// The stem used for the maneuver's output file names.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::FigureEight => "figure8",
            Self::LaneChange => "lanechange",
            Self::Square => "square",
            Self::WavePath => "WavePath",
        }
    }

    /// The title drawn above the maneuver's trajectory plot.
    pub fn title(self) -> &'static str {
        match self {
            Self::FigureEight => "Bicycle Model - Figure 8 Trajectory",
            Self::LaneChange => "Bicycle Model - Lane Change Trajectory",
            Self::Square => "Bicycle Model - Square Trajectory",
            Self::WavePath => "Bicycle Model - Wave Path Trajectory",
        }
    }
}

/// Number of samples in a run of the given duration.
fn sample_count(duration: f64) -> usize {
    (duration / SAMPLE_TIME).round() as usize
}

/// Constant velocity of the figure-eight run in m/s.
const FIGURE_EIGHT_VELOCITY: f64 = 4.0; // m/s
/// Turn radius of each lobe in m.
const FIGURE_EIGHT_RADIUS: f64 = 8.0; // m
/// Figure-eight run duration in s.
const FIGURE_EIGHT_DURATION: f64 = 30.0; // s

/// Ramp to the lobe-tracking steering angle, hold the first loop, reverse
/// the steering through twice the ramp at the half-way point, hold again.
fn figure_eight(params: &VehicleParams) -> ControlProfile {
    let n = sample_count(FIGURE_EIGHT_DURATION);
    let half = n / 2;

    // Steering angle that tracks the desired turn radius, and the number of
    // samples needed to reach it at the rate limit.
    let steer_desired = (params.wheelbase / FIGURE_EIGHT_RADIUS).atan();
    let ramp = ((steer_desired / params.max_steer_rate / SAMPLE_TIME).round() as usize).max(1);

    let mut rates = vec![0.0; n];
    rates[..ramp.min(n)].fill(params.max_steer_rate);
    rates[half..(half + 2 * ramp).min(n)].fill(-params.max_steer_rate);
    ControlProfile::from_rates(SAMPLE_TIME, FIGURE_EIGHT_VELOCITY, rates)
}

/// Constant velocity of the lane change run in m/s.
const LANE_CHANGE_VELOCITY: f64 = 6.0; // m/s
/// Lane change run duration in s.
const LANE_CHANGE_DURATION: f64 = 20.0; // s
/// When the swerve begins in s.
const LANE_CHANGE_START: f64 = 2.0; // s
/// How long the swerve lasts in s.
const LANE_CHANGE_SWERVE: f64 = 6.0; // s
/// Peak steering rate during the swerve in rad/s.
const LANE_CHANGE_RATE: f64 = 0.6; // rad/s

/// One full sine period of steering rate, so the steering angle returns to
/// zero when the swerve completes.
fn lane_change() -> ControlProfile {
    let window = Interval::new(LANE_CHANGE_START, LANE_CHANGE_START + LANE_CHANGE_SWERVE);
    let rates = (0..sample_count(LANE_CHANGE_DURATION)).map(|i| {
        let t = i as f64 * SAMPLE_TIME;
        if window.contains(t) {
            let tau = (t - LANE_CHANGE_START) / LANE_CHANGE_SWERVE * TAU;
            LANE_CHANGE_RATE * tau.sin()
        } else {
            0.0
        }
    });
    ControlProfile::from_rates(SAMPLE_TIME, LANE_CHANGE_VELOCITY, rates)
}

/// Constant velocity of the square run in m/s.
const SQUARE_VELOCITY: f64 = 4.0; // m/s
/// Square run duration in s.
const SQUARE_DURATION: f64 = 60.0; // s
/// Sample indices where each corner's steering pulse begins.
const SQUARE_CORNERS: [usize; 4] = [670, 2210, 3670, 5220];
/// Samples per half pulse (steer in, then steer back out).
const SQUARE_PULSE: usize = 100;
/// Steering rate magnitude through a corner in rad/s.
const SQUARE_RATE: f64 = 0.753; // rad/s

/// Straight cruise with a balanced steering pulse at each corner.
fn square() -> ControlProfile {
    let mut rates = vec![0.0; sample_count(SQUARE_DURATION)];
    for start in SQUARE_CORNERS {
        rates[start..start + SQUARE_PULSE].fill(SQUARE_RATE);
        rates[start + SQUARE_PULSE..start + 2 * SQUARE_PULSE].fill(-SQUARE_RATE);
    }
    ControlProfile::from_rates(SAMPLE_TIME, SQUARE_VELOCITY, rates)
}

/// Constant velocity of the wave path run in m/s.
const WAVE_VELOCITY: f64 = 6.0; // m/s
/// Wave path run duration in s.
const WAVE_DURATION: f64 = 60.0; // s
/// Samples in the opening left-hand arc.
const WAVE_LEAD_IN: usize = 100;
/// Samples per half weave.
const WAVE_HALF: usize = 200;
/// Number of weave blocks after the lead-in.
const WAVE_BLOCKS: usize = 14;
/// Steering rate magnitude throughout the weave in rad/s.
const WAVE_RATE: f64 = 1.0; // rad/s

/// A short lead-in arc, a tiled (right, left) weave, then a closing
/// right-hand arc that runs to the end of the profile.
fn wave_path() -> ControlProfile {
    let rates = repeat_n(WAVE_RATE, WAVE_LEAD_IN)
        .chain((0..WAVE_BLOCKS).flat_map(|_| {
            repeat_n(-WAVE_RATE, WAVE_HALF).chain(repeat_n(WAVE_RATE, WAVE_HALF))
        }))
        .chain(iter::repeat(-WAVE_RATE))
        .take(sample_count(WAVE_DURATION));
    ControlProfile::from_rates(SAMPLE_TIME, WAVE_VELOCITY, rates)
}

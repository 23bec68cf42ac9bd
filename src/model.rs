use crate::error::ModelError;
use crate::Point2d;

/// The default wheelbase in m.
const DEFAULT_WHEELBASE: f64 = 2.0; // m

/// The default rear-axle-to-centre-of-mass distance in m.
const DEFAULT_REAR_AXLE_TO_COM: f64 = 1.2; // m

/// The default steering rate limit in rad/s.
const DEFAULT_MAX_STEER_RATE: f64 = 1.22; // rad/s

/// The geometry and actuation limit of a simulated vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleParams {
    /// Distance between the front and rear axles in m.
    pub wheelbase: f64,
    /// Distance from the rear axle to the centre of mass in m.
    pub rear_axle_to_com: f64,
    /// The maximum magnitude of the steering rate in rad/s.
    pub max_steer_rate: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            wheelbase: DEFAULT_WHEELBASE,
            rear_axle_to_com: DEFAULT_REAR_AXLE_TO_COM,
            max_steer_rate: DEFAULT_MAX_STEER_RATE,
        }
    }
}

impl VehicleParams {
    /// Checks the geometric constraints, returning the first violation.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.wheelbase > 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "wheelbase",
                value: self.wheelbase,
                constraint: "wheelbase > 0",
            });
        }
        if !(self.rear_axle_to_com >= 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "rear_axle_to_com",
                value: self.rear_axle_to_com,
                constraint: "rear_axle_to_com >= 0",
            });
        }
        if self.rear_axle_to_com > self.wheelbase {
            return Err(ModelError::InvalidParameter {
                name: "rear_axle_to_com",
                value: self.rear_axle_to_com,
                constraint: "rear_axle_to_com <= wheelbase",
            });
        }
        if !(self.max_steer_rate > 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "max_steer_rate",
                value: self.max_steer_rate,
                constraint: "max_steer_rate > 0",
            });
        }
        Ok(())
    }
}

/// The pose and steering angle of a simulated vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    /// Position along the x axis in m.
    pub x: f64,
    /// Position along the y axis in m.
    pub y: f64,
    /// Heading angle in rad. Accumulates without wrapping.
    pub heading: f64,
    /// Steering angle in rad. Accumulates without wrapping.
    pub steer: f64,
}

impl VehicleState {
    /// The coordinates of the vehicle as a point in the plane.
    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

/// A kinematic bicycle model.
///
/// Relates commanded velocity and steering rate directly to pose
/// derivatives, ignoring tire forces and inertia. The model owns its
/// [VehicleState]; [step](Self::step) is the only mutation path.
#[derive(Clone, Debug)]
pub struct BicycleModel {
    /// The vehicle geometry. Read-only after construction.
    params: VehicleParams,
    /// The evolving pose and steering angle.
    state: VehicleState,
}

impl Default for BicycleModel {
    fn default() -> Self {
        // The default geometry satisfies its own constraints.
        Self {
            params: VehicleParams::default(),
            state: VehicleState::default(),
        }
    }
}

impl BicycleModel {
    /// Creates a model with the given geometry.
    pub fn new(params: VehicleParams) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(Self {
            params,
            state: VehicleState::default(),
        })
    }

    /// The vehicle geometry.
    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// The current state of the vehicle.
    pub fn state(&self) -> VehicleState {
        self.state
    }

    /// Returns the state to the origin with zero angles. Idempotent.
    pub fn reset(&mut self) {
        self.state = VehicleState::default();
    }

    /// Advances the model by one time step using forward-Euler integration.
    ///
    /// The commanded steering rate is clamped to the limit before it is
    /// integrated; the steering angle itself is never bounded, so a command
    /// sequence that saturates the rate for long enough will push `tan`
    /// through its asymptote and the resulting non-finite values propagate
    /// into the pose. Callers must keep commanded angles plausible.
    ///
    /// The slip angle is evaluated from the *updated* steering angle while
    /// the pose derivatives use the *previous* heading; reordering either
    /// changes every trajectory downstream.
    ///
    /// # Parameters
    /// * `velocity` - The commanded longitudinal velocity in m/s.
    /// * `steer_rate` - The commanded steering rate in rad/s.
    /// * `dt` - The time step in seconds.
    pub fn step(
        &mut self,
        velocity: f64,
        steer_rate: f64,
        dt: f64,
    ) -> Result<VehicleState, ModelError> {
        // Reject bad inputs before any state is touched.
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ModelError::InvalidInput {
                name: "dt",
                value: dt,
            });
        }
        if !velocity.is_finite() {
            return Err(ModelError::InvalidInput {
                name: "velocity",
                value: velocity,
            });
        }
        if !steer_rate.is_finite() {
            return Err(ModelError::InvalidInput {
                name: "steer_rate",
                value: steer_rate,
            });
        }

        let VehicleParams {
            wheelbase,
            rear_axle_to_com,
            max_steer_rate,
        } = self.params;

        // Limit the steering rate, then integrate the steering angle.
        let rate = steer_rate.clamp(-max_steer_rate, max_steer_rate);
        let steer = self.state.steer + rate * dt;

        // Slip angle from the bicycle kinematics.
        let beta = ((rear_axle_to_com / wheelbase) * steer.tan()).atan();

        // Pose derivatives at the current heading.
        let x_dot = velocity * (self.state.heading + beta).cos();
        let y_dot = velocity * (self.state.heading + beta).sin();
        let heading_dot = (velocity / wheelbase) * beta.cos() * steer.tan();

        self.state = VehicleState {
            x: self.state.x + x_dot * dt,
            y: self.state.y + y_dot * dt,
            heading: self.state.heading + heading_dot * dt,
            steer,
        };
        Ok(self.state)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn zero_input_leaves_origin() {
        let mut model = BicycleModel::default();
        for _ in 0..50 {
            let state = model.step(0.0, 0.0, 0.01).unwrap();
            assert_eq!(state, VehicleState::default());
        }
    }

    #[test]
    fn steering_rate_is_clamped() {
        let mut saturated = BicycleModel::default();
        let mut limited = BicycleModel::default();
        let w_max = saturated.params().max_steer_rate;

        saturated.step(1.0, 100.0, 0.01).unwrap();
        limited.step(1.0, w_max, 0.01).unwrap();
        assert_eq!(saturated.state(), limited.state());

        saturated.reset();
        limited.reset();
        saturated.step(1.0, -100.0, 0.01).unwrap();
        limited.step(1.0, -w_max, 0.01).unwrap();
        assert_eq!(saturated.state(), limited.state());
    }

    #[test]
    fn straight_line_motion() {
        let mut model = BicycleModel::default();
        for _ in 0..100 {
            model.step(4.0, 0.0, 0.1).unwrap();
        }
        let state = model.state();
        assert_approx_eq!(state.x, 40.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.heading, 0.0);
        assert_eq!(state.steer, 0.0);
    }

    #[test]
    fn zero_velocity_only_moves_steering() {
        let mut model = BicycleModel::default();
        for _ in 0..10 {
            model.step(0.0, 0.5, 0.1).unwrap();
        }
        let state = model.state();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.heading, 0.0);
        assert_approx_eq!(state.steer, 0.5);
    }

    #[test]
    fn mirrored_steering_mirrors_the_path() {
        let rates = [0.3, -0.5, 1.0, 0.2, -0.9, 0.0, 0.7];
        let mut left = BicycleModel::default();
        let mut right = BicycleModel::default();

        for rate in rates {
            let a = left.step(3.0, rate, 0.05).unwrap();
            let b = right.step(3.0, -rate, 0.05).unwrap();
            assert_approx_eq!(a.x, b.x, 1e-12);
            assert_approx_eq!(a.y, -b.y, 1e-12);
            assert_approx_eq!(a.heading, -b.heading, 1e-12);
            assert_approx_eq!(a.steer, -b.steer, 1e-12);
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut model = BicycleModel::default();
        model.step(2.0, 0.4, 0.1).unwrap();
        model.reset();
        assert_eq!(model.state(), VehicleState::default());
        model.reset();
        assert_eq!(model.state(), VehicleState::default());
    }

    #[test]
    fn rejects_invalid_geometry() {
        let invalid = [
            VehicleParams {
                wheelbase: 0.0,
                ..Default::default()
            },
            VehicleParams {
                wheelbase: -2.0,
                ..Default::default()
            },
            VehicleParams {
                rear_axle_to_com: -0.1,
                ..Default::default()
            },
            VehicleParams {
                rear_axle_to_com: 2.5,
                ..Default::default()
            },
            VehicleParams {
                max_steer_rate: 0.0,
                ..Default::default()
            },
            VehicleParams {
                wheelbase: f64::NAN,
                ..Default::default()
            },
        ];
        for params in invalid {
            assert!(matches!(
                BicycleModel::new(params),
                Err(ModelError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_step_inputs_without_mutating() {
        let mut model = BicycleModel::default();
        model.step(2.0, 0.4, 0.1).unwrap();
        let before = model.state();

        for (v, w, dt) in [
            (1.0, 0.0, 0.0),
            (1.0, 0.0, -0.01),
            (1.0, 0.0, f64::NAN),
            (1.0, 0.0, f64::INFINITY),
            (f64::NAN, 0.0, 0.01),
            (1.0, f64::NEG_INFINITY, 0.01),
        ] {
            assert!(matches!(
                model.step(v, w, dt),
                Err(ModelError::InvalidInput { .. })
            ));
            assert_eq!(model.state(), before);
        }
    }
}

//! Control sources and the derivation of steering and acceleration targets.
//!
//! Both the neural controller and the manual inputs end up as a steering
//! angle and an acceleration that the shared integrator consumes.

use ndarray::Array1;

use super::super::brain::{Brain, Command};
use super::super::params::VehicleParams;

/// The four held-key flags an external input mapper writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualInputs {
    /// Steer left.
    pub left: bool,
    /// Steer right.
    pub right: bool,
    /// Accelerate forward.
    pub throttle: bool,
    /// Brake, then reverse.
    pub brake: bool,
}

/// Where a vehicle's control signals come from.
#[derive(Debug, Clone)]
pub enum ControlSource {
    /// Held-key flags set by an external input mapper.
    Manual(ManualInputs),
    /// Neural network fed with range-finder readings.
    Autonomous(Brain),
}

/// Control signal for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlSignal {
    /// Normalised steering and throttle from a controller.
    Command(Command),
    /// Snapshot of the manual input flags.
    Manual(ManualInputs),
}

impl ControlSource {
    /// Derives this tick's control signal from the sensor inputs.
    pub fn signal(&self, sensor_inputs: &Array1<f32>) -> ControlSignal {
        match self {
            ControlSource::Autonomous(brain) => ControlSignal::Command(brain.command(sensor_inputs)),
            ControlSource::Manual(inputs) => ControlSignal::Manual(*inputs),
        }
    }
}

/// Maps a normalised command onto steering angle and acceleration.
pub(super) fn command_targets(specs: &VehicleParams, command: Command) -> (f32, f32) {
    let steering = command.steering.clamp(-1.0, 1.0) * specs.max_steering;
    let acceleration = command.throttle.clamp(-1.0, 1.0) * specs.max_acceleration;
    (steering, acceleration)
}

/// Ramps steering and acceleration from held-key state.
///
/// Steering ramps at `steer_rate` while a key is held and snaps back to zero
/// otherwise. A pedal that opposes the direction of travel applies the brake
/// deceleration; a pedal that agrees with it ramps at `acceleration_rate`.
/// With no pedal held, free deceleration pulls the velocity towards zero
/// without crossing it.
pub(super) fn manual_targets(
    specs: &VehicleParams,
    inputs: ManualInputs,
    steering: f32,
    acceleration: f32,
    velocity: f32,
    dt: f32,
) -> (f32, f32) {
    let steering = if inputs.right {
        steering - specs.steer_rate * dt
    } else if inputs.left {
        steering + specs.steer_rate * dt
    } else {
        0.0
    };

    let acceleration = if inputs.throttle {
        if velocity < 0.0 {
            specs.brake_deceleration
        } else {
            acceleration + specs.acceleration_rate * dt
        }
    } else if inputs.brake {
        if velocity > 0.0 {
            -specs.brake_deceleration
        } else {
            acceleration - specs.acceleration_rate * dt
        }
    } else if velocity.abs() > dt * specs.free_deceleration {
        -specs.free_deceleration * velocity.signum()
    } else if dt > 0.0 {
        -velocity / dt
    } else {
        acceleration
    };

    (
        steering.clamp(-specs.max_steering, specs.max_steering),
        acceleration.clamp(-specs.max_acceleration, specs.max_acceleration),
    )
}

//! Bicycle-model integration shared by every control source.

use geo::Coord;

use super::super::brain::Command;
use super::super::geometric_utils::rotate;
use super::control::{ManualInputs, command_targets, manual_targets};
use super::Vehicle;

/// Kinematic quantities produced by one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Heading rate used for this step, in rad/s.
    pub angular_velocity: f32,
    /// Length of the displacement applied this step, in world units.
    pub distance: f32,
}

impl Vehicle {
    /// Steps the vehicle from a normalised controller command.
    pub fn step(&mut self, command: Command, dt: f32) -> Motion {
        let (steering, acceleration) = command_targets(&self.specs, command);
        self.steering = steering;
        self.acceleration = acceleration;
        self.integrate(dt)
    }

    /// Steps the vehicle from held-key state.
    pub fn step_manual(&mut self, inputs: ManualInputs, dt: f32) -> Motion {
        let (steering, acceleration) = manual_targets(
            &self.specs,
            inputs,
            self.steering,
            self.acceleration,
            self.velocity,
            dt,
        );
        self.steering = steering;
        self.acceleration = acceleration;
        self.integrate(dt)
    }

    /// Integrates velocity, position and heading over `dt`.
    ///
    /// Velocity lives on the local forward axis and is rotated into world
    /// space by the negated heading, so heading grows clockwise on screen.
    pub fn integrate(&mut self, dt: f32) -> Motion {
        self.velocity = (self.velocity + self.acceleration * dt)
            .clamp(-self.specs.max_velocity, self.specs.max_velocity);

        let angular_velocity = if self.steering == 0.0 {
            0.0
        } else {
            let turning_radius = (self.specs.wheelbase / 2.0) / self.steering.sin();
            self.velocity / turning_radius
        };

        let displacement = rotate(
            Coord {
                x: self.velocity,
                y: 0.0,
            },
            -self.heading,
        ) * dt;

        self.pos = self.pos + displacement;
        self.heading += angular_velocity * dt;
        self.step_distance = displacement.x.hypot(displacement.y);

        Motion {
            angular_velocity,
            distance: self.step_distance,
        }
    }
}

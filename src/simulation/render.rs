//! Render primitives handed to an external draw routine.
//!
//! Nothing here draws; frames are plain data captured from the vehicles
//! after a tick.

use geo::Coord;

use super::vehicle::{RayTrace, Vehicle, WheelTransform};

/// Drawable state of one vehicle, in track units.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFrame {
    /// Vehicle id.
    pub id: usize,
    /// Display colour.
    pub color: [u8; 3],
    /// Whether the vehicle has cleared the final checkpoint.
    pub finished: bool,
    /// Body corners: front-left, front-right, rear-right, rear-left.
    pub body: [Coord<f32>; 4],
    /// Wheel placements: rear-left, rear-right, front-left, front-right.
    pub wheels: [WheelTransform; 4],
    /// Range-finder rays from the latest scan.
    pub rays: Vec<RayTrace>,
}

impl VehicleFrame {
    /// Captures a vehicle's drawable state.
    pub fn capture(vehicle: &Vehicle, scale: f32) -> Self {
        Self {
            id: vehicle.id,
            color: vehicle.color,
            finished: vehicle.finished,
            body: vehicle.body_polygon(scale),
            wheels: vehicle.wheel_transforms(scale),
            rays: vehicle.rays.clone(),
        }
    }
}

/// Everything an external renderer needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Generation being simulated.
    pub generation: u32,
    /// Simulation time within the generation.
    pub time: f32,
    /// Vehicles to draw.
    pub vehicles: Vec<VehicleFrame>,
}

impl RenderFrame {
    /// Captures a frame from a set of vehicles.
    pub fn capture(generation: u32, time: f32, vehicles: &[Vehicle], scale: f32) -> Self {
        Self {
            generation,
            time,
            vehicles: vehicles
                .iter()
                .map(|vehicle| VehicleFrame::capture(vehicle, scale))
                .collect(),
        }
    }
}

//! Per-vehicle state and the per-tick pipeline.
//!
//! Each tick a vehicle reads its range finder, derives control signals from
//! its control source, integrates its kinematics and finally reports
//! progress and collisions back to the caller.

use geo::Coord;

use super::super::brain::Brain;
use super::super::params::{Params, VehicleParams};
use super::super::progress;
use super::super::track::Track;
use super::control::{ControlSignal, ControlSource, ManualInputs};
use super::range_finder::{RangeFinder, RayTrace};

/// Why a vehicle left the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationCause {
    /// The body polygon touched a wall segment.
    WallCollision,
    /// No checkpoint was cleared within the stall timeout.
    StallTimeout,
}

/// Lifecycle state of a vehicle. `Eliminated` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleState {
    /// Still driving.
    Alive,
    /// Removed from the active set.
    Eliminated(EliminationCause),
}

/// Result of a single vehicle tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The vehicle keeps driving.
    Alive,
    /// The vehicle was eliminated during this tick.
    Eliminated {
        /// Reason for elimination.
        cause: EliminationCause,
        /// Fitness at the moment of elimination.
        fitness: f32,
    },
}

/// A simulated car.
///
/// Kinematic state is kept in world units; track-facing geometry is
/// converted with the configured world scale.
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Unique identifier for this vehicle.
    pub id: usize,
    /// Display colour, derived from the id.
    pub color: [u8; 3],
    /// Position in world units.
    pub pos: Coord<f32>,
    /// Heading in radians.
    pub heading: f32,
    /// Signed speed along the heading.
    pub velocity: f32,
    /// Steering angle in radians.
    pub steering: f32,
    /// Longitudinal acceleration.
    pub acceleration: f32,
    /// Footprint and control limits.
    pub specs: VehicleParams,
    /// Checkpoints cleared so far, in `[0, checkpoint count]`.
    pub checkpoint_index: usize,
    /// Simulation time of the last checkpoint advance (or of entering the window).
    pub last_checkpoint_time: f32,
    /// Distance covered during the previous tick.
    pub step_distance: f32,
    /// Distance covered since spawn.
    pub odometer: f32,
    /// Current fitness score.
    pub fitness: f32,
    /// Lifecycle state.
    pub state: VehicleState,
    /// Whether the final checkpoint has been cleared.
    pub finished: bool,
    /// Where steering and throttle come from.
    pub control: ControlSource,
    /// Latest range-finder rays, kept for visualisation only.
    pub rays: Vec<RayTrace>,
}

impl Vehicle {
    /// Creates a vehicle at rest at `pos`, facing `heading`.
    pub fn new(
        id: usize,
        pos: Coord<f32>,
        heading: f32,
        specs: VehicleParams,
        control: ControlSource,
    ) -> Self {
        Self {
            id,
            color: id_color(id),
            pos,
            heading,
            velocity: 0.0,
            steering: 0.0,
            acceleration: 0.0,
            specs,
            checkpoint_index: 0,
            last_checkpoint_time: 0.0,
            step_distance: 0.0,
            odometer: 0.0,
            fitness: 0.0,
            state: VehicleState::Alive,
            finished: false,
            control,
            rays: Vec::new(),
        }
    }

    /// Creates a neural-network driven vehicle at the track's starting point.
    pub fn autonomous(id: usize, track: &Track, params: &Params, brain: Brain) -> Self {
        Self::new(
            id,
            track.starting_point() / params.world_scale,
            0.0,
            params.vehicle.clone(),
            ControlSource::Autonomous(brain),
        )
    }

    /// Creates a keyboard driven vehicle at the track's starting point.
    pub fn manual(id: usize, track: &Track, params: &Params) -> Self {
        Self::new(
            id,
            track.starting_point() / params.world_scale,
            0.0,
            params.vehicle.clone(),
            ControlSource::Manual(ManualInputs::default()),
        )
    }

    /// Checks if the vehicle is still driving.
    pub fn is_alive(&self) -> bool {
        self.state == VehicleState::Alive
    }

    /// Index of the checkpoint the vehicle must cross next, if any remain.
    pub fn target_checkpoint(&self, checkpoint_count: usize) -> Option<usize> {
        (self.checkpoint_index < checkpoint_count).then_some(self.checkpoint_index)
    }

    /// Mutable access to the input flags of a manually driven vehicle.
    pub fn manual_inputs_mut(&mut self) -> Option<&mut ManualInputs> {
        match &mut self.control {
            ControlSource::Manual(inputs) => Some(inputs),
            ControlSource::Autonomous(_) => None,
        }
    }

    /// The controller genome, if the vehicle is autonomous.
    pub fn brain(&self) -> Option<&Brain> {
        match &self.control {
            ControlSource::Autonomous(brain) => Some(brain),
            ControlSource::Manual(_) => None,
        }
    }

    /// Consumes the vehicle and returns its genome, if it has one.
    pub fn into_brain(self) -> Option<Brain> {
        match self.control {
            ControlSource::Autonomous(brain) => Some(brain),
            ControlSource::Manual(_) => None,
        }
    }

    /// Advances the vehicle by one tick.
    ///
    /// `time` is the simulation time at the end of the tick. Eliminated
    /// vehicles are left untouched.
    pub fn tick(&mut self, track: &Track, params: &Params, time: f32, dt: f32) -> StepOutcome {
        if let VehicleState::Eliminated(cause) = self.state {
            return StepOutcome::Eliminated {
                cause,
                fitness: self.fitness,
            };
        }

        let reading = RangeFinder.scan(self, track, params);
        let signal = self.control.signal(&reading.to_array());
        self.rays = reading.traces.to_vec();

        match signal {
            ControlSignal::Command(command) => self.step(command, dt),
            ControlSignal::Manual(inputs) => self.step_manual(inputs, dt),
        };

        progress::update(self, track, params, time)
    }
}

/// Spreads ids around the hue circle so neighbouring ids get distinct colours.
fn id_color(id: usize) -> [u8; 3] {
    let hue = (id as f32 * 0.618_034).fract() * 6.0;
    let (s, v) = (0.7f32, 0.95f32);
    let c = v * s;
    let x = c * (1.0 - (hue % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match hue as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |channel: f32| ((channel + m) * 255.0).round() as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

//! Progress and collision tracking.
//!
//! After every kinematic step the tracker advances the odometer, tests the
//! body against the next checkpoint gate, recomputes the fitness, and finally
//! eliminates the vehicle on wall contact or when it has stalled.

use super::geometric_utils::intersect;
use super::params::{DistanceMode, Params};
use super::track::Track;
use super::vehicle::{EliminationCause, StepOutcome, Vehicle, VehicleState};

/// Result of testing a vehicle against its next checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointEvent {
    /// No gate was crossed.
    None,
    /// A gate was crossed; holds the new checkpoint index.
    Advanced(usize),
    /// The final gate was crossed.
    Completed,
}

/// Checks whether any body edge touches any wall segment.
pub fn hits_wall(vehicle: &Vehicle, track: &Track, scale: f32) -> bool {
    let edges = vehicle.body_edges(scale);
    track
        .wall_segments()
        .iter()
        .any(|wall| edges.iter().any(|edge| intersect(edge, wall).is_some()))
}

/// Tests the body against the next checkpoint gate only and advances on contact.
///
/// The stall timer restarts at `time` whenever a gate is crossed.
pub fn check_checkpoint(vehicle: &mut Vehicle, track: &Track, time: f32, scale: f32) -> CheckpointEvent {
    let Some(target) = vehicle.target_checkpoint(track.checkpoint_count()) else {
        return CheckpointEvent::None;
    };

    let gate = &track.checkpoint_segments()[target];
    if !vehicle
        .body_edges(scale)
        .iter()
        .any(|edge| intersect(edge, gate).is_some())
    {
        return CheckpointEvent::None;
    }

    vehicle.checkpoint_index += 1;
    vehicle.last_checkpoint_time = time;

    if vehicle.checkpoint_index == track.checkpoint_count() {
        vehicle.finished = true;
        CheckpointEvent::Completed
    } else {
        CheckpointEvent::Advanced(vehicle.checkpoint_index)
    }
}

/// Checks whether the vehicle has gone too long without clearing a gate.
pub fn is_stalled(vehicle: &Vehicle, time: f32, timeout: f32) -> bool {
    time - vehicle.last_checkpoint_time > timeout
}

/// Scores a vehicle from its checkpoint progress and traveled distance.
pub fn fitness(vehicle: &Vehicle, params: &Params) -> f32 {
    let distance = match params.distance_mode {
        DistanceMode::Odometer => vehicle.odometer,
        DistanceMode::Instantaneous => vehicle.step_distance,
    };

    params.checkpoint_weight * (vehicle.checkpoint_index as f32 * params.checkpoint_reward)
        + params.distance_weight * distance
}

/// Runs every progress and collision check for one tick.
///
/// `time` is the simulation time at the end of the tick.
pub fn update(vehicle: &mut Vehicle, track: &Track, params: &Params, time: f32) -> StepOutcome {
    let scale = params.world_scale;

    vehicle.odometer += vehicle.step_distance;

    if let CheckpointEvent::Completed = check_checkpoint(vehicle, track, time, scale) {
        tracing::debug!(vehicle = vehicle.id, time, "course completed");
    }

    vehicle.fitness = fitness(vehicle, params);

    let cause = if hits_wall(vehicle, track, scale) {
        EliminationCause::WallCollision
    } else if is_stalled(vehicle, time, params.stall_timeout) {
        EliminationCause::StallTimeout
    } else {
        return StepOutcome::Alive;
    };

    vehicle.state = VehicleState::Eliminated(cause);
    StepOutcome::Eliminated {
        cause,
        fitness: vehicle.fitness,
    }
}

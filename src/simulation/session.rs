//! Manual driving: a single keyboard-controlled vehicle on a track.

use super::error::Result;
use super::params::Params;
use super::render::RenderFrame;
use super::track::Track;
use super::vehicle::{ManualInputs, StepOutcome, Vehicle};

/// A manual driving session.
///
/// An external input mapper writes the four control flags through
/// [`inputs_mut`](Self::inputs_mut); the session only reads them. An
/// eliminated vehicle is respawned at the starting point on the same tick.
#[derive(Debug, Clone)]
pub struct DrivingSession {
    track: Track,
    params: Params,
    vehicle: Vehicle,
    inputs: ManualInputs,
    time: f32,
    attempts: usize,
}

impl DrivingSession {
    /// Creates a session with a vehicle at the starting point.
    pub fn new(track: Track, params: Params) -> Result<Self> {
        params.validate()?;
        let vehicle = Vehicle::manual(0, &track, &params);

        Ok(Self {
            track,
            params,
            vehicle,
            inputs: ManualInputs::default(),
            time: 0.0,
            attempts: 0,
        })
    }

    /// Control flags for the external input mapper.
    pub fn inputs_mut(&mut self) -> &mut ManualInputs {
        &mut self.inputs
    }

    /// Advances the session by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> StepOutcome {
        if let Some(flags) = self.vehicle.manual_inputs_mut() {
            *flags = self.inputs;
        }

        self.time += dt;
        let outcome = self.vehicle.tick(&self.track, &self.params, self.time, dt);

        if let StepOutcome::Eliminated { cause, fitness } = outcome {
            tracing::info!(attempt = self.attempts, ?cause, fitness, "manual vehicle eliminated");
            self.attempts += 1;
            self.time = 0.0;
            self.vehicle = Vehicle::manual(self.attempts, &self.track, &self.params);
        }

        outcome
    }

    /// The vehicle being driven.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Number of eliminations so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Render primitives for the driven vehicle.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(
            0,
            self.time,
            std::slice::from_ref(&self.vehicle),
            self.params.world_scale,
        )
    }
}

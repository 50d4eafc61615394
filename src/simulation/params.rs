use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, SimulationError};

/// Number of range-finder rays, and therefore brain inputs.
pub const NUM_RAYS: usize = 7;
/// Number of brain outputs (steering, throttle).
pub const NUM_OUTPUTS: usize = 2;

/// How the parent selection picks its "best" and "worst" archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Best are the highest-fitness entries, worst the lowest.
    #[default]
    FittestAndWeakest,
    /// Best are taken from the head of an ascending fitness sort and worst
    /// from its tail.
    ReferenceOrder,
}

/// How the distance term of the fitness is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMode {
    /// Sum of every per-tick displacement since spawn.
    #[default]
    Odometer,
    /// Displacement of the most recent tick only.
    Instantaneous,
}

/// Kinematic model constants shared by every vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    /// Half of the body width (lateral).
    pub half_width: f32,
    /// Half of the body length (longitudinal).
    pub half_length: f32,
    /// Distance between axles.
    pub wheelbase: f32,
    /// Steering angle limit in radians.
    pub max_steering: f32,
    /// Acceleration limit.
    pub max_acceleration: f32,
    /// Forward/backward speed limit.
    pub max_velocity: f32,
    /// Deceleration applied when throttle or brake opposes the travel direction.
    pub brake_deceleration: f32,
    /// Deceleration applied when neither pedal is held.
    pub free_deceleration: f32,
    /// Rate at which a held pedal ramps the acceleration.
    pub acceleration_rate: f32,
    /// Rate at which a held steering key ramps the steering angle (rad/s).
    pub steer_rate: f32,
    /// Wheel graphic half length.
    pub wheel_radius: f32,
    /// Wheel graphic width.
    pub wheel_width: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            half_width: 0.5,
            half_length: 1.0,
            wheelbase: 4.0,
            max_steering: PI / 6.0,
            max_acceleration: 5.0,
            max_velocity: 20.0,
            brake_deceleration: 10.0,
            free_deceleration: 2.0,
            acceleration_rate: 3.0,
            steer_rate: PI / 6.0,
            wheel_radius: 0.3,
            wheel_width: 0.2,
        }
    }
}

/// Simulation parameters that control vehicles, scoring and evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Vehicles per generation.
    pub population_size: usize,
    /// Vehicles simulated concurrently.
    pub active_window: usize,
    /// Number of hidden layers in every brain.
    pub hidden_layers: usize,
    /// Width of every hidden layer.
    pub hidden_neurons: usize,
    /// Per-parameter probability of a fresh random value during breeding.
    pub mutation_rate: f32,
    /// Number of highest-ranked archive entries admitted to the gene pool.
    pub best_count: usize,
    /// Number of lowest-ranked archive entries admitted to the gene pool.
    pub worst_count: usize,
    /// Number of bred children per generation; the rest are random.
    pub offspring_count: usize,
    /// Gene-pool copies per unit of fitness.
    pub pool_repeat_scale: f32,
    /// Selection order for the gene pool.
    pub selection_policy: SelectionPolicy,
    /// Distance term used by the fitness.
    pub distance_mode: DistanceMode,
    /// Weight of checkpoint progress in the fitness.
    pub checkpoint_weight: f32,
    /// Weight of traveled distance in the fitness.
    pub distance_weight: f32,
    /// Fitness points per cleared checkpoint, before weighting.
    pub checkpoint_reward: f32,
    /// Seconds allowed between checkpoint advances.
    pub stall_timeout: f32,
    /// Range-finder ray length in world units.
    pub ray_length: f32,
    /// Track units per world unit.
    pub world_scale: f32,
    /// Hard cap on how long one active window may run, if any.
    pub max_window_seconds: Option<f32>,
    /// Kinematic constants.
    pub vehicle: VehicleParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 50,
            active_window: 10,
            hidden_layers: 1,
            hidden_neurons: 8,
            mutation_rate: 0.1,
            best_count: 10,
            worst_count: 2,
            offspring_count: 40,
            pool_repeat_scale: 10.0,
            selection_policy: SelectionPolicy::default(),
            distance_mode: DistanceMode::default(),
            checkpoint_weight: 1.0,
            distance_weight: 0.1,
            checkpoint_reward: 20.0,
            stall_timeout: 5.0,
            ray_length: 10.0,
            world_scale: 1.0,
            max_window_seconds: None,
            vehicle: VehicleParams::default(),
        }
    }
}

impl Params {
    /// Reads parameters from a JSON file; absent fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parses parameters from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Neural network layer dimensions, input first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![NUM_RAYS];
        sizes.extend(std::iter::repeat_n(self.hidden_neurons, self.hidden_layers));
        sizes.push(NUM_OUTPUTS);
        sizes
    }

    /// Range-finder ray length in track units.
    pub fn scaled_ray_length(&self) -> f32 {
        self.ray_length * self.world_scale
    }

    /// Rejects configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SimulationError::invalid_params("population_size must be > 0"));
        }
        if self.active_window == 0 || self.active_window > self.population_size {
            return Err(SimulationError::invalid_params(format!(
                "active_window must be in 1..={}, got {}",
                self.population_size, self.active_window
            )));
        }
        if self.hidden_layers > 0 && self.hidden_neurons == 0 {
            return Err(SimulationError::invalid_params("hidden_neurons must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimulationError::invalid_params(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.best_count + self.worst_count == 0 {
            return Err(SimulationError::invalid_params(
                "best_count + worst_count must be > 0",
            ));
        }
        let positive = [
            ("stall_timeout", self.stall_timeout),
            ("ray_length", self.ray_length),
            ("world_scale", self.world_scale),
            ("pool_repeat_scale", self.pool_repeat_scale),
            ("vehicle.half_width", self.vehicle.half_width),
            ("vehicle.half_length", self.vehicle.half_length),
            ("vehicle.wheelbase", self.vehicle.wheelbase),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::invalid_params(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if let Some(limit) = self.max_window_seconds {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(SimulationError::invalid_params(format!(
                    "max_window_seconds must be positive, got {limit}"
                )));
            }
        }
        Ok(())
    }
}

//! # Racer - Neuroevolution of Self-Driving Cars
//!
//! A population of simplified cars drives around a closed track, each one
//! steered by a small feed-forward network. A genetic algorithm breeds the
//! networks of the best drivers into the next generation.
//!
//! ## Features
//!
//! - Bicycle-model vehicle kinematics with manual or neural control
//! - Seven-ray range finder cast against the track walls
//! - Checkpoint progress, wall collision and stall detection
//! - Feed-forward network with tanh activation
//! - Fitness-weighted gene pool with per-parameter crossover and mutation
//! - Render primitives for an external renderer
//!
//! ## Core Modules
//!
//! - [`simulation::track`] - Track geometry loading
//! - [`simulation::vehicle`] - Vehicle state, kinematics and sensing
//! - [`simulation::progress`] - Checkpoints, collisions and fitness
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::evolution`] - Generational evolution engine

/// Core simulation logic and data structures.
pub mod simulation {
    /// Neural network controller and its genetic operators.
    pub mod brain;
    /// Error types.
    pub mod error;
    /// Generational evolution engine.
    pub mod evolution;
    /// Segment intersection and vector rotation.
    pub mod geometric_utils;
    /// Simulation parameters.
    pub mod params;
    /// Checkpoint progress, wall collisions and fitness.
    pub mod progress;
    /// Render primitives for an external draw routine.
    pub mod render;
    /// Manual driving session.
    pub mod session;
    /// Track geometry.
    pub mod track;
    /// Vehicle state, kinematics and sensing.
    pub mod vehicle;
}

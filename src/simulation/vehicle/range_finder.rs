//! Range finder - a fixed fan of rays cast against the track walls.
//!
//! Rays point straight ahead, at both front corners, to both sides, and at
//! both rear corners of the body. Each reading is the distance to the
//! nearest wall along the ray, normalised by the ray length.

use geo::{Coord, Line};
use ndarray::Array1;

use super::super::geometric_utils::{distance, intersect, rotate};
use super::super::params::{NUM_RAYS, Params};
use super::super::track::Track;
use super::Vehicle;

/// One cast ray, for visualisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayTrace {
    /// Ray origin in track units.
    pub start: Coord<f32>,
    /// Ray end at full length, in track units.
    pub end: Coord<f32>,
    /// Nearest wall hit along the ray, if any.
    pub hit: Option<Coord<f32>>,
}

/// Readings of the full ray fan.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReading {
    /// Normalised distances in `[0, 1]`; 1.0 means no wall within range.
    pub distances: [f32; NUM_RAYS],
    /// Geometry of every ray.
    pub traces: [RayTrace; NUM_RAYS],
}

impl RangeReading {
    /// Distances as a brain input vector.
    pub fn to_array(&self) -> Array1<f32> {
        Array1::from_iter(self.distances)
    }
}

/// Fan of range-finder rays cast against the track walls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeFinder;

impl RangeFinder {
    /// Ray angles relative to the heading.
    ///
    /// `θ = atan(half_width / half_length)` is the corner diagonal angle.
    pub fn ray_angles(half_width: f32, half_length: f32) -> [f32; NUM_RAYS] {
        use std::f32::consts::{FRAC_PI_2, PI};

        let theta = (half_width / half_length).atan();
        [
            0.0,
            theta,
            -theta,
            FRAC_PI_2,
            -FRAC_PI_2,
            PI + theta,
            PI - theta,
        ]
    }

    /// Casts every ray of the fan from the vehicle's current pose.
    pub fn scan(&self, vehicle: &Vehicle, track: &Track, params: &Params) -> RangeReading {
        let origin = vehicle.track_position(params.world_scale);
        let length = params.scaled_ray_length();
        let angles = Self::ray_angles(vehicle.specs.half_width, vehicle.specs.half_length);

        let traces = angles.map(|offset| {
            let end = origin + rotate(Coord { x: length, y: 0.0 }, -(vehicle.heading + offset));
            let ray = Line::new(origin, end);

            let hit = track
                .wall_segments()
                .iter()
                .filter_map(|wall| intersect(&ray, wall))
                .min_by(|a, b| distance(origin, *a).total_cmp(&distance(origin, *b)));

            RayTrace {
                start: origin,
                end,
                hit,
            }
        });

        let distances = traces.map(|trace| {
            trace
                .hit
                .map_or(1.0, |hit| (distance(origin, hit) / length).min(1.0))
        });

        RangeReading { distances, traces }
    }
}

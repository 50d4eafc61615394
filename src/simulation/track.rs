//! Closed-loop race track: boundary polygons, checkpoint gates and starting point.
//!
//! A track is loaded once and is read-only afterwards; every vehicle in a
//! generation shares the same instance.

use std::path::Path;

use geo::{Coord, Line};
use serde::{Deserialize, Serialize};

use super::error::{Result, SimulationError};
use super::geometric_utils::closed_segments;

/// Raw track geometry as stored on disk.
///
/// Every field is optional at the serde level so that missing data is
/// reported as [`SimulationError::MalformedTrack`] rather than a generic
/// JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackData {
    /// Outer boundary polygon, implicitly closed.
    #[serde(default)]
    pub outer_vertices: Option<Vec<[f32; 2]>>,
    /// Inner boundary polygon, implicitly closed.
    #[serde(default)]
    pub inner_vertices: Option<Vec<[f32; 2]>>,
    /// Spawn position of every vehicle.
    #[serde(default)]
    pub starting_point: Option<[f32; 2]>,
    /// Ordered checkpoint gates, each a pair of points.
    #[serde(default)]
    pub check_points: Option<Vec<Vec<[f32; 2]>>>,
}

/// Immutable track geometry.
#[derive(Debug, Clone)]
pub struct Track {
    outer: Vec<Coord<f32>>,
    inner: Vec<Coord<f32>>,
    start: Coord<f32>,
    checkpoints: Vec<Line<f32>>,
    walls: Vec<Line<f32>>,
}

impl Track {
    /// Reads and validates a track file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parses and validates track geometry from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: TrackData = serde_json::from_str(json)
            .map_err(|e| SimulationError::malformed_track(format!("invalid track JSON: {e}")))?;
        Self::from_data(data)
    }

    /// Validates raw geometry and derives the wall set.
    pub fn from_data(data: TrackData) -> Result<Self> {
        let outer = boundary(data.outer_vertices, "outer_vertices")?;
        let inner = boundary(data.inner_vertices, "inner_vertices")?;

        let start = data
            .starting_point
            .ok_or_else(|| SimulationError::malformed_track("missing field `starting_point`"))?;
        let start = coord(start, "starting_point")?;

        let raw_checkpoints = data
            .check_points
            .ok_or_else(|| SimulationError::malformed_track("missing field `check_points`"))?;
        if raw_checkpoints.is_empty() {
            return Err(SimulationError::malformed_track(
                "`check_points` must contain at least one segment",
            ));
        }

        let checkpoints = raw_checkpoints
            .into_iter()
            .enumerate()
            .map(|(i, points)| match points.as_slice() {
                [a, b] => Ok(Line::new(coord(*a, "check_points")?, coord(*b, "check_points")?)),
                _ => Err(SimulationError::malformed_track(format!(
                    "checkpoint {i} has {} points, expected 2",
                    points.len()
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        let mut walls = closed_segments(&outer);
        walls.extend(closed_segments(&inner));

        Ok(Self {
            outer,
            inner,
            start,
            checkpoints,
            walls,
        })
    }

    /// All boundary edges of both polygons, each polygon closed.
    pub fn wall_segments(&self) -> &[Line<f32>] {
        &self.walls
    }

    /// Checkpoint gates in the order they must be crossed.
    pub fn checkpoint_segments(&self) -> &[Line<f32>] {
        &self.checkpoints
    }

    /// Number of checkpoint gates.
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Spawn position, in track units.
    pub fn starting_point(&self) -> Coord<f32> {
        self.start
    }

    /// Outer boundary vertices.
    pub fn outer_vertices(&self) -> &[Coord<f32>] {
        &self.outer
    }

    /// Inner boundary vertices.
    pub fn inner_vertices(&self) -> &[Coord<f32>] {
        &self.inner
    }
}

fn boundary(vertices: Option<Vec<[f32; 2]>>, field: &str) -> Result<Vec<Coord<f32>>> {
    let vertices =
        vertices.ok_or_else(|| SimulationError::malformed_track(format!("missing field `{field}`")))?;
    if vertices.len() < 3 {
        return Err(SimulationError::malformed_track(format!(
            "`{field}` needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    vertices.into_iter().map(|p| coord(p, field)).collect()
}

fn coord([x, y]: [f32; 2], field: &str) -> Result<Coord<f32>> {
    if x.is_finite() && y.is_finite() {
        Ok(Coord { x, y })
    } else {
        Err(SimulationError::malformed_track(format!(
            "non-finite coordinate in `{field}`"
        )))
    }
}

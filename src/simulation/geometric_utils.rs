//! Geometric utility functions for segment intersection and vector rotation.

use geo::{Coord, Distance, Euclidean, Line, Point};
use thiserror::Error;

/// Failure modes of the line-parameter solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The two segments are parallel, collinear or zero-length, so the
    /// 2×2 system has a vanishing determinant.
    #[error("degenerate segment pair (zero determinant)")]
    DegenerateSegment,
}

/// Solves the parametric line system for two segments.
///
/// Returns `(t, u)` such that `a.start + t * a.delta() == b.start + u * b.delta()`.
/// The parameters are not range checked; see [`intersect`].
///
/// # Errors
///
/// [`GeometryError::DegenerateSegment`] when the determinant vanishes.
pub fn line_parameters(a: &Line<f32>, b: &Line<f32>) -> Result<(f32, f32), GeometryError> {
    let d1 = a.delta();
    let d2 = b.delta();

    let den = d1.x * d2.y - d1.y * d2.x;
    let scale = d1.x.hypot(d1.y) * d2.x.hypot(d2.y);
    if !den.is_finite() || den.abs() <= f32::EPSILON * scale {
        return Err(GeometryError::DegenerateSegment);
    }

    let w = b.start - a.start;
    let t = (w.x * d2.y - w.y * d2.x) / den;
    let u = (w.x * d1.y - w.y * d1.x) / den;

    Ok((t, u))
}

/// Intersects two finite segments.
///
/// # Returns
///
/// The intersection point when it lies on both segments (endpoints
/// included), `None` otherwise. Parallel, collinear and zero-length
/// segments never intersect.
pub fn intersect(a: &Line<f32>, b: &Line<f32>) -> Option<Coord<f32>> {
    match line_parameters(a, b) {
        Ok((t, u)) if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) => {
            Some(a.start + a.delta() * t)
        }
        Ok(_) => None,
        Err(err) => {
            tracing::trace!(?a, ?b, "{err}");
            None
        }
    }
}

/// Rotates a vector counter-clockwise by `angle` radians.
pub fn rotate(v: Coord<f32>, angle: f32) -> Coord<f32> {
    let (sin, cos) = angle.sin_cos();
    Coord {
        x: v.x * cos - v.y * sin,
        y: v.x * sin + v.y * cos,
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Coord<f32>, b: Coord<f32>) -> f32 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

/// Builds the edges of a closed polygon, joining the last vertex back to the first.
pub fn closed_segments(vertices: &[Coord<f32>]) -> Vec<Line<f32>> {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&start, &end)| Line::new(start, end))
        .collect()
}

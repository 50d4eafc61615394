//! Body footprint and wheel placement in track units.

use geo::{Coord, Line};

use super::super::geometric_utils::rotate;
use super::Vehicle;

/// Placement of one wheel graphic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTransform {
    /// Wheel centre in track units.
    pub center: Coord<f32>,
    /// Wheel orientation, same convention as the vehicle heading.
    pub rotation: f32,
    /// Half of the wheel length in track units.
    pub half_length: f32,
    /// Half of the wheel width in track units.
    pub half_width: f32,
}

impl Vehicle {
    /// Position in track units.
    pub fn track_position(&self, scale: f32) -> Coord<f32> {
        self.pos * scale
    }

    /// Maps a point from the vehicle frame (x forward, y lateral, world units)
    /// into track units.
    fn to_track(&self, local: Coord<f32>, scale: f32) -> Coord<f32> {
        self.track_position(scale) + rotate(local * scale, -self.heading)
    }

    /// Body rectangle corners: front-left, front-right, rear-right, rear-left.
    pub fn body_polygon(&self, scale: f32) -> [Coord<f32>; 4] {
        let (hl, hw) = (self.specs.half_length, self.specs.half_width);
        [
            Coord { x: hl, y: hw },
            Coord { x: hl, y: -hw },
            Coord { x: -hl, y: -hw },
            Coord { x: -hl, y: hw },
        ]
        .map(|corner| self.to_track(corner, scale))
    }

    /// The four closed edges of the body rectangle.
    pub fn body_edges(&self, scale: f32) -> [Line<f32>; 4] {
        let [a, b, c, d] = self.body_polygon(scale);
        [Line::new(a, b), Line::new(b, c), Line::new(c, d), Line::new(d, a)]
    }

    /// Wheel graphics: rear-left, rear-right, front-left, front-right.
    ///
    /// Front wheels turn with the steering angle.
    pub fn wheel_transforms(&self, scale: f32) -> [WheelTransform; 4] {
        let specs = &self.specs;
        let rear_x = -specs.half_length + specs.wheel_radius;
        let front_x = specs.half_length;

        let wheel = |x: f32, side: f32, steer: f32| WheelTransform {
            center: self.to_track(
                Coord {
                    x,
                    y: side * specs.half_width,
                },
                scale,
            ),
            rotation: self.heading + steer,
            half_length: specs.wheel_radius * scale,
            half_width: specs.wheel_width / 2.0 * scale,
        };

        [
            wheel(rear_x, 1.0, 0.0),
            wheel(rear_x, -1.0, 0.0),
            wheel(front_x, 1.0, self.steering),
            wheel(front_x, -1.0, self.steering),
        ]
    }
}

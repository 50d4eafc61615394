//! Vehicle module containing vehicle state, kinematics and sensing.

mod body;
mod control;
mod dynamics;
mod range_finder;
mod vehicle;

// Re-export everything from the vehicle module
pub use vehicle::*;

pub use body::WheelTransform;
pub use control::{ControlSignal, ControlSource, ManualInputs};
pub use dynamics::Motion;
pub use range_finder::{RangeFinder, RangeReading, RayTrace};

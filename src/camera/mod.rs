//! 2D camera module
//!
//! The camera owns a position/rotation/scale transform, optional per-axis
//! follow targets, a shake generator and an area clamp. Renderers consume the
//! composed world-to-screen matrix.

#[allow(clippy::module_inception)]
pub mod camera;
pub mod shake;

pub use camera::{Camera, FollowAxis};
pub use shake::{Shake, ShakeState};

//! spritecore - spatial core of a small 2D sprite game runtime
//!
//! Core modules:
//! - `collision`: Two-tier sphere collision (large bounding sphere + small precise spheres)
//! - `camera`: Follow/zoom/shake camera and its composed world-to-screen transform
//! - `sprite`: Sprite record carrying the pose colliders and the camera track
//! - `scene`: Sprite registry and per-frame driver
//! - `context`: Per-run frame context (time scale, seeded RNG)
//! - `settings`: Data-driven camera and timing configuration

pub mod camera;
pub mod collision;
pub mod context;
pub mod scene;
pub mod settings;
pub mod sprite;

pub use camera::{Camera, FollowAxis, Shake, ShakeState};
pub use collision::{CarrierPose, CollisionSphere, SphereCollider};
pub use context::FrameContext;
pub use scene::{Scene, SpriteId};
pub use settings::{CameraSettings, Settings, SettingsError};
pub use sprite::Sprite;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Runtime configuration constants
pub mod consts {
    /// How fast a soft-locked camera closes on its target (per second)
    pub const DEFAULT_ACCELERATION: f32 = 4.0;
    /// How fast the camera scale eases toward its target scale (per second)
    pub const DEFAULT_ZOOM_SPEED: f32 = 4.0;
    /// Scale a fresh camera starts at; it eases in toward `DEFAULT_TARGET_SCALE`
    pub const INITIAL_SCALE: f32 = 0.5;
    pub const DEFAULT_TARGET_SCALE: f32 = 1.0;
    /// Global time multiplier (1.0 = real time)
    pub const DEFAULT_TIME_SCALE: f32 = 1.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Axis-aligned rectangle in world space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}

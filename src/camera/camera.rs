//! Camera transform, target follow and area clamping
//!
//! World-to-screen mapping is the fixed composition
//! translate(-position) -> rotate(rotation) -> scale(scale) -> translate(viewport / 2).
//! The matrix is cached and re-derived on every write through a setter.

use glam::{Affine2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shake::Shake;
use crate::consts::*;
use crate::settings::Settings;
use crate::sprite::SpriteId;
use crate::Rect;

/// Which axes a follow/snap request applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FollowAxis {
    X,
    Y,
    #[default]
    Both,
}

impl FollowAxis {
    #[inline]
    pub fn has_x(self) -> bool {
        matches!(self, FollowAxis::X | FollowAxis::Both)
    }

    #[inline]
    pub fn has_y(self) -> bool {
        matches!(self, FollowAxis::Y | FollowAxis::Both)
    }
}

/// A 2D camera
///
/// `position` is the world point shown at the viewport center.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    /// Radians
    rotation: f32,
    /// > 1 zooms in, < 1 zooms out. Must stay non-zero.
    scale: f32,
    viewport: Vec2,
    matrix: Affine2,

    /// Scale the camera eases toward every update
    pub target_scale: f32,
    /// How fast `scale` approaches `target_scale` (per second)
    pub zoom_speed: f32,
    /// How fast a soft lock closes on its target (per second)
    pub acceleration: f32,
    /// Soft lock lags behind the target; hard lock snaps to it
    pub soft_lock: bool,

    follow_x: Option<SpriteId>,
    follow_y: Option<SpriteId>,

    shake: Shake,
    /// Disabled shake turns `shake()` into a no-op (reduced motion)
    shake_enabled: bool,
}

impl Camera {
    /// Camera for a `width` x `height` viewport, centered on the world origin
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: INITIAL_SCALE,
            viewport: Vec2::new(width, height),
            matrix: Affine2::IDENTITY,
            target_scale: DEFAULT_TARGET_SCALE,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            acceleration: DEFAULT_ACCELERATION,
            soft_lock: false,
            follow_x: None,
            follow_y: None,
            shake: Shake::new(),
            shake_enabled: true,
        };
        camera.update_matrix();
        camera
    }

    /// Camera configured from settings
    pub fn with_settings(width: f32, height: f32, settings: &Settings) -> Self {
        let mut camera = Self::new(width, height);
        let cfg = &settings.camera;
        camera.scale = cfg.initial_scale;
        camera.target_scale = cfg.target_scale;
        camera.zoom_speed = cfg.zoom_speed;
        camera.acceleration = cfg.acceleration;
        camera.soft_lock = cfg.soft_lock;
        camera.shake_enabled = settings.effective_screen_shake();
        camera.update_matrix();
        camera
    }

    fn update_matrix(&mut self) {
        self.matrix = Affine2::from_translation(self.viewport / 2.0)
            * Affine2::from_scale(Vec2::splat(self.scale))
            * Affine2::from_angle(self.rotation)
            * Affine2::from_translation(-self.position);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_matrix();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.update_matrix();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.update_matrix();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the viewport (e.g. on window resize)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.update_matrix();
    }

    /// Composed world-to-screen transform
    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    pub fn follow_x(&self) -> Option<SpriteId> {
        self.follow_x
    }

    pub fn follow_y(&self) -> Option<SpriteId> {
        self.follow_y
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_shaking()
    }

    /// Offset applied by the most recent shake step
    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset()
    }

    /// Start shaking for `duration` seconds with peak offset `magnitude`
    pub fn shake(&mut self, duration: f32, magnitude: f32) {
        if !self.shake_enabled {
            return;
        }
        log::debug!("Camera shake: {duration}s at magnitude {magnitude}");
        self.shake.start(duration, magnitude);
    }

    pub fn set_shake_enabled(&mut self, enabled: bool) {
        self.shake_enabled = enabled;
        if !enabled {
            self.shake.stop();
        }
    }

    /// Map a world point to screen space
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        self.matrix.transform_point2(point)
    }

    /// Map a screen point back to world space (`None` while scale is zero)
    pub fn screen_to_world(&self, point: Vec2) -> Option<Vec2> {
        if self.scale == 0.0 {
            return None;
        }
        Some(self.matrix.inverse().transform_point2(point))
    }

    /// Jump to `center` on the given axes without changing follow targets
    pub fn zoom_to_target(&mut self, center: Vec2, axis: FollowAxis) {
        if axis.has_x() {
            self.position.x = center.x;
        }
        if axis.has_y() {
            self.position.y = center.y;
        }
        self.update_matrix();
    }

    /// Snap to the target on the given axes, then keep following it
    pub fn set_target(&mut self, target: SpriteId, center: Vec2, axis: FollowAxis) {
        self.zoom_to_target(center, axis);
        if axis.has_x() {
            self.follow_x = Some(target);
        }
        if axis.has_y() {
            self.follow_y = Some(target);
        }
        log::debug!("Camera following {target:?} on {axis:?}");
    }

    /// Stop following on the given axes (they freeze in place)
    pub fn clear_target(&mut self, axis: FollowAxis) {
        if axis.has_x() {
            self.follow_x = None;
        }
        if axis.has_y() {
            self.follow_y = None;
        }
    }

    /// Advance the camera by one frame
    ///
    /// `dt` is the already time-scaled frame delta. `target_center` resolves a
    /// follow target to its current world center; a target that no longer
    /// resolves is dropped and its axis freezes.
    pub fn update<R, F>(&mut self, dt: f32, rng: &mut R, target_center: F)
    where
        R: Rng,
        F: Fn(SpriteId) -> Option<Vec2>,
    {
        // Shake perturbs position cumulatively
        if let Some(offset) = self.shake.step(dt, rng) {
            self.position += offset;
        }

        self.scale += (self.target_scale - self.scale) * self.zoom_speed * dt;

        if let Some(id) = self.follow_x {
            match target_center(id) {
                Some(center) => {
                    self.position.x = self.follow_step(self.position.x, center.x, dt);
                }
                None => {
                    log::debug!("Camera X target {id:?} is gone, freezing axis");
                    self.follow_x = None;
                }
            }
        }

        if let Some(id) = self.follow_y {
            match target_center(id) {
                Some(center) => {
                    self.position.y = self.follow_step(self.position.y, center.y, dt);
                }
                None => {
                    log::debug!("Camera Y target {id:?} is gone, freezing axis");
                    self.follow_y = None;
                }
            }
        }

        self.update_matrix();
    }

    #[inline]
    fn follow_step(&self, current: f32, target: f32, dt: f32) -> f32 {
        if self.soft_lock {
            current + (target - current) * self.acceleration * dt
        } else {
            target
        }
    }

    /// World-space rectangle currently visible (rotation ignored)
    pub fn visible_area(&self) -> Rect {
        let half = self.viewport / 2.0 / self.scale;
        Rect::new(
            self.position.x - half.x,
            self.position.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
    }

    /// Keep the visible area inside the given rectangle
    ///
    /// Each edge is corrected in turn (left, right, top, bottom), shifting the
    /// visible area without shrinking it. When the visible area is wider or
    /// taller than the bounds, the later correction wins on that axis and the
    /// area ends up flush with the right or bottom edge.
    pub fn clamp_to_area(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (left, right, top, bottom) = (x, x + width, y, y + height);

        let half = self.viewport / 2.0 / self.scale;
        let mut camera_left = self.position.x - half.x;
        let mut camera_right = self.position.x + half.x;
        let mut camera_top = self.position.y - half.y;
        let mut camera_bottom = self.position.y + half.y;

        if camera_left < left {
            camera_right += left - camera_left;
            camera_left = left;
        }
        if camera_right > right {
            camera_left -= camera_right - right;
            camera_right = right;
        }
        if camera_top < top {
            camera_bottom += top - camera_top;
            camera_top = top;
        }
        if camera_bottom > bottom {
            camera_top -= camera_bottom - bottom;
            camera_bottom = bottom;
        }

        self.set_position(Vec2::new(
            (camera_left + camera_right) / 2.0,
            (camera_top + camera_bottom) / 2.0,
        ));
    }

    /// `clamp_to_area` taking a rectangle
    pub fn clamp_to_rect(&mut self, bounds: Rect) {
        self.clamp_to_area(bounds.x, bounds.y, bounds.width, bounds.height);
    }
}

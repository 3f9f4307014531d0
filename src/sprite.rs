//! Sprite record
//!
//! Sprites are plain data: a pose, a texture extent and an optional collider
//! component. Draw ordering, textures and animation live with the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{CarrierPose, CollisionSphere, SphereCollider};

slotmap::new_key_type! {
    /// Handle to a sprite in a [`crate::Scene`]
    pub struct SpriteId;
}

/// A positioned, rotatable sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    /// Top-left position in world space
    pub position: Vec2,
    /// Rotation in radians (clockwise on screen)
    pub rotation: f32,
    /// Pivot point relative to `position` (texture center by default)
    pub origin: Vec2,
    /// Per-axis draw scale
    pub scale: Vec2,
    /// Texture extent in pixels
    pub size: Vec2,
    /// Active sprites get their collider refreshed each frame
    pub is_active: bool,
    pub is_visible: bool,
    pub collider: Option<SphereCollider>,
}

impl Sprite {
    /// Sprite with a `size` texture at `position`
    ///
    /// Panics on a zero or negative texture extent.
    pub fn new(size: Vec2, position: Vec2) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0,
            "sprite texture must be non-empty, got {size:?}"
        );
        Self {
            position,
            rotation: 0.0,
            origin: size / 2.0,
            scale: Vec2::ONE,
            size,
            is_active: true,
            is_visible: true,
            collider: None,
        }
    }

    /// Builder: attach the default collider
    pub fn with_collider(mut self) -> Self {
        self.attach_collider();
        self
    }

    /// Builder: attach a small sphere (creates the default collider if needed)
    pub fn with_sphere(mut self, radius: f32, distance: f32, angle: f32) -> Self {
        let sphere = CollisionSphere::new(radius, self.pose(), distance, angle);
        self.collider_mut().add_sphere(sphere);
        self
    }

    /// Attach a collider whose large sphere circumscribes the texture
    pub fn attach_collider(&mut self) {
        self.collider = Some(SphereCollider::new(self.size, self.pose()));
    }

    /// The collider, created with defaults if missing
    pub fn collider_mut(&mut self) -> &mut SphereCollider {
        let pose = self.pose();
        let size = self.size;
        self.collider
            .get_or_insert_with(|| SphereCollider::new(size, pose))
    }

    pub fn pose(&self) -> CarrierPose {
        CarrierPose::new(self.position, self.origin, self.rotation)
    }

    /// World-space center the camera tracks
    pub fn center(&self) -> Vec2 {
        self.position + self.origin
    }

    /// Scale uniformly by a factor (compounds with the current scale)
    pub fn set_scale(&mut self, factor: f32) {
        self.origin *= factor;
        self.scale *= factor;
    }

    /// Refresh the collider from the current pose
    pub fn refresh_collider(&mut self) {
        let pose = self.pose();
        if let Some(collider) = self.collider.as_mut() {
            collider.update(pose);
        }
    }
}

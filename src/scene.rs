//! Sprite registry and per-frame driver
//!
//! A scene owns its sprites (keyed by [`SpriteId`]) and its camera. Colliders
//! live on the sprites and are handed the carrier pose by value, so nothing
//! holds a reference back into the registry.
//!
//! Frame order: scaled delta -> camera (shake, zoom, follow) -> collider
//! refresh. Gameplay then queries collisions and commits or rolls back moves.

use glam::Vec2;
use slotmap::SlotMap;

use crate::camera::{Camera, FollowAxis};
use crate::collision::CollisionSphere;
use crate::context::FrameContext;
use crate::settings::Settings;
pub use crate::sprite::SpriteId;
use crate::sprite::Sprite;

pub struct Scene {
    sprites: SlotMap<SpriteId, Sprite>,
    pub camera: Camera,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            sprites: SlotMap::with_key(),
            camera,
        }
    }

    /// Scene with a camera built from settings
    pub fn with_settings(width: f32, height: f32, settings: &Settings) -> Self {
        Self::new(Camera::with_settings(width, height, settings))
    }

    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        self.sprites.insert(sprite)
    }

    /// Remove a sprite; a camera following it freezes on the next update
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        self.sprites.remove(id)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Append a small sphere to a sprite's collider (created on demand)
    ///
    /// Returns false if the sprite does not exist.
    pub fn add_sphere(&mut self, id: SpriteId, radius: f32, distance: f32, angle: f32) -> bool {
        let Some(sprite) = self.sprites.get_mut(id) else {
            return false;
        };
        let sphere = CollisionSphere::new(radius, sprite.pose(), distance, angle);
        sprite.collider_mut().add_sphere(sphere);
        true
    }

    /// Point the camera at a sprite (snap now, follow afterwards)
    pub fn follow(&mut self, id: SpriteId, axis: FollowAxis) -> bool {
        let Some(sprite) = self.sprites.get(id) else {
            log::warn!("Cannot follow missing sprite {id:?}");
            return false;
        };
        self.camera.set_target(id, sprite.center(), axis);
        true
    }

    /// Run one frame of `elapsed_secs` wall time; returns the scaled delta
    pub fn update(&mut self, ctx: &mut FrameContext, elapsed_secs: f32) -> f32 {
        let dt = ctx.begin_frame(elapsed_secs);

        let sprites = &self.sprites;
        self.camera
            .update(dt, &mut ctx.rng, |id| sprites.get(id).map(Sprite::center));

        for sprite in self.sprites.values_mut().filter(|s| s.is_active) {
            sprite.refresh_collider();
        }

        dt
    }

    /// Two-phase collision test between two sprites
    ///
    /// False if either sprite is missing or has no collider, and for `a == b`.
    pub fn collides(&mut self, a: SpriteId, b: SpriteId) -> bool {
        if a == b {
            return false;
        }
        let Some(other) = self.sprites.get_mut(b) else {
            return false;
        };
        let other_pose = other.pose();
        let Some(mut other_collider) = other.collider.take() else {
            return false;
        };

        let hit = match self.sprites.get_mut(a) {
            Some(sprite) => {
                let pose = sprite.pose();
                match sprite.collider.as_mut() {
                    Some(collider) => collider.collides_with(pose, &mut other_collider, other_pose),
                    None => false,
                }
            }
            None => false,
        };

        self.sprites[b].collider = Some(other_collider);
        hit
    }

    /// Every other active sprite currently colliding with `id`
    pub fn collisions_of(&mut self, id: SpriteId) -> Vec<SpriteId> {
        let candidates: Vec<SpriteId> = self
            .sprites
            .iter()
            .filter(|(other, s)| *other != id && s.is_active && s.collider.is_some())
            .map(|(other, _)| other)
            .collect();

        candidates
            .into_iter()
            .filter(|&other| self.collides(id, other))
            .collect()
    }

    /// Move a sprite by `offset` and turn it by `rotation` radians unless
    /// that makes it collide
    ///
    /// On a collision both the position and the rotation are put back and
    /// false is returned. A missing sprite never moves.
    pub fn try_move(&mut self, id: SpriteId, offset: Vec2, rotation: f32) -> bool {
        let Some(sprite) = self.sprites.get_mut(id) else {
            return false;
        };
        let previous = (sprite.position, sprite.rotation);
        sprite.position += offset;
        sprite.rotation += rotation;

        let hits = self.collisions_of(id);
        let sprite = &mut self.sprites[id];
        if !hits.is_empty() {
            log::debug!("Move of {id:?} blocked by {hits:?}, rolling back");
            (sprite.position, sprite.rotation) = previous;
        }
        sprite.refresh_collider();
        hits.is_empty()
    }
}

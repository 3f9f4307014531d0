//! Collision sphere rigidly attached to a carrier
//!
//! A sphere sits `distance` away from the carrier's origin point, in the
//! direction the carrier is facing. Its world position is derived, so it must
//! be refreshed from the carrier pose whenever the carrier moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// The parts of a carrier's state a collider tracks
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarrierPose {
    /// Top-left position of the carrier
    pub position: Vec2,
    /// Pivot point, relative to `position`
    pub origin: Vec2,
    /// Rotation in radians (clockwise on screen, 0 faces east)
    pub rotation: f32,
}

impl CarrierPose {
    pub fn new(position: Vec2, origin: Vec2, rotation: f32) -> Self {
        Self {
            position,
            origin,
            rotation,
        }
    }

    /// World-space pivot point of the carrier
    #[inline]
    pub fn pivot(&self) -> Vec2 {
        self.position + self.origin
    }
}

/// A circle offset from its carrier by a fixed distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionSphere {
    /// World-space center (derived from the carrier pose by `update`)
    pub position: Vec2,
    pub radius: f32,
    /// Offset magnitude from the carrier pivot
    pub distance: f32,
    /// Offset direction relative to the carrier's rotation (radians).
    ///
    /// Stored but not applied: the offset follows the carrier rotation alone.
    pub angle: f32,
}

impl CollisionSphere {
    /// Create a sphere and place it against the carrier's current pose
    pub fn new(radius: f32, pose: CarrierPose, distance: f32, angle: f32) -> Self {
        let mut sphere = Self {
            position: Vec2::ZERO,
            radius,
            distance,
            angle,
        };
        sphere.update(pose);
        sphere
    }

    /// Sphere sitting on the carrier pivot
    pub fn centered(radius: f32, pose: CarrierPose) -> Self {
        Self::new(radius, pose, 0.0, 0.0)
    }

    /// Recompute the world position from the carrier pose
    pub fn update(&mut self, pose: CarrierPose) {
        let offset = polar_to_cartesian(self.distance, pose.rotation);
        self.position = pose.pivot() + offset;
    }

    /// Whether the two spheres overlap (touching counts)
    pub fn collides_with(&self, other: &CollisionSphere) -> bool {
        let xdist = (self.position.x - other.position.x).abs();
        let ydist = (self.position.y - other.position.y).abs();
        let combined_radius = self.radius + other.radius;

        // Cheap axis rejection before the sqrt
        if xdist > combined_radius {
            return false;
        }
        if ydist > combined_radius {
            return false;
        }

        (xdist * xdist + ydist * ydist).sqrt() <= combined_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn at(x: f32, y: f32, radius: f32) -> CollisionSphere {
        CollisionSphere::centered(radius, CarrierPose::new(Vec2::new(x, y), Vec2::ZERO, 0.0))
    }

    #[test]
    fn test_overlap_scenario() {
        let a = at(0.0, 0.0, 10.0);
        let b = at(14.0, 0.0, 5.0);
        assert!(a.collides_with(&b));

        let b = at(16.0, 0.0, 5.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_touching_spheres_collide() {
        let a = at(0.0, 0.0, 10.0);
        let b = at(15.0, 0.0, 5.0);
        assert!(a.collides_with(&b));

        // 3-4-5 triangle, exact in f32
        let a = at(0.0, 0.0, 2.0);
        let b = at(3.0, 4.0, 3.0);
        assert!(a.collides_with(&b));
    }

    #[test]
    fn test_diagonal_rejected_by_precise_test() {
        // Passes both axis checks (7 <= 8) but distance is ~9.9
        let a = at(0.0, 0.0, 4.0);
        let b = at(7.0, 7.0, 4.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_update_tracks_pivot() {
        let pose = CarrierPose::new(Vec2::new(100.0, 50.0), Vec2::new(16.0, 8.0), 0.0);
        let sphere = CollisionSphere::centered(4.0, pose);
        assert_eq!(sphere.position, Vec2::new(116.0, 58.0));
    }

    #[test]
    fn test_offset_rotates_with_carrier() {
        let mut pose = CarrierPose::new(Vec2::ZERO, Vec2::ZERO, 0.0);
        let mut sphere = CollisionSphere::new(2.0, pose, 10.0, 0.0);
        assert!((sphere.position - Vec2::new(10.0, 0.0)).length() < 1e-4);

        pose.rotation = PI / 2.0;
        sphere.update(pose);
        assert!((sphere.position - Vec2::new(0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_stored_angle_does_not_affect_offset() {
        // Known discrepancy: `angle` is kept on the sphere but the offset
        // direction comes from the carrier rotation only.
        let pose = CarrierPose::new(Vec2::ZERO, Vec2::ZERO, 0.0);
        let plain = CollisionSphere::new(2.0, pose, 10.0, 0.0);
        let angled = CollisionSphere::new(2.0, pose, 10.0, PI / 2.0);
        assert_eq!(plain.position, angled.position);
        assert_eq!(angled.angle, PI / 2.0);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.0f32..100.0,
        ) {
            let a = at(ax, ay, ar);
            let b = at(bx, by, br);
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        }

        #[test]
        fn prop_axis_separation_never_collides(
            x in -500.0f32..500.0, r1 in 0.0f32..50.0, r2 in 0.0f32..50.0, gap in 0.01f32..100.0,
        ) {
            let a = at(x, 0.0, r1);
            let b = at(x + r1 + r2 + gap, 0.0, r2);
            prop_assert!(!a.collides_with(&b));
        }
    }
}

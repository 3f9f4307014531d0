//! Two-phase sphere collider
//!
//! The large sphere rejects far-apart pairs cheaply; only pairs whose large
//! spheres overlap pay for the small-sphere cross product.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sphere::{CarrierPose, CollisionSphere};

/// Collider attached to one carrier
///
/// With no small spheres the carrier still passes the broad phase but can
/// never register a hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereCollider {
    pub large_sphere: CollisionSphere,
    pub small_spheres: Vec<CollisionSphere>,
}

impl SphereCollider {
    /// Collider whose large sphere circumscribes a `size` texture around the pivot
    ///
    /// Panics if either texture dimension is not strictly positive.
    pub fn new(size: Vec2, pose: CarrierPose) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0,
            "collider carrier needs a non-empty texture, got {size:?}"
        );
        let radius = size.length() / 2.0;
        Self::with_large_sphere(CollisionSphere::centered(radius, pose))
    }

    pub fn with_large_sphere(large_sphere: CollisionSphere) -> Self {
        Self {
            large_sphere,
            small_spheres: Vec::new(),
        }
    }

    /// Append a precise sphere (no overlap or duplicate checks)
    pub fn add_sphere(&mut self, sphere: CollisionSphere) {
        self.small_spheres.push(sphere);
    }

    /// Refresh every sphere from the carrier pose
    pub fn update(&mut self, pose: CarrierPose) {
        self.large_sphere.update(pose);
        for sphere in &mut self.small_spheres {
            sphere.update(pose);
        }
    }

    /// Broad-phase test on the large spheres only
    pub fn broad_phase(
        &mut self,
        pose: CarrierPose,
        other: &mut SphereCollider,
        other_pose: CarrierPose,
    ) -> bool {
        self.large_sphere.update(pose);
        other.large_sphere.update(other_pose);
        self.large_sphere.collides_with(&other.large_sphere)
    }

    /// Full two-phase test against another carrier's collider
    pub fn collides_with(
        &mut self,
        pose: CarrierPose,
        other: &mut SphereCollider,
        other_pose: CarrierPose,
    ) -> bool {
        if !self.broad_phase(pose, other, other_pose) {
            return false;
        }

        for sphere in &mut other.small_spheres {
            sphere.update(other_pose);
        }
        for mine in &mut self.small_spheres {
            mine.update(pose);
            if other.small_spheres.iter().any(|theirs| mine.collides_with(theirs)) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    const SIZE: Vec2 = Vec2::new(32.0, 32.0);

    fn pose_at(x: f32, y: f32) -> CarrierPose {
        CarrierPose::new(Vec2::new(x, y), SIZE / 2.0, 0.0)
    }

    fn with_core(pose: CarrierPose, radius: f32) -> SphereCollider {
        let mut collider = SphereCollider::new(SIZE, pose);
        collider.add_sphere(CollisionSphere::centered(radius, pose));
        collider
    }

    #[test]
    fn test_default_large_sphere_contains_corners() {
        let size = Vec2::new(40.0, 30.0);
        let pose = CarrierPose::new(Vec2::new(100.0, 200.0), size / 2.0, 0.0);
        let collider = SphereCollider::new(size, pose);

        let center = collider.large_sphere.position;
        let corners = [
            pose.position,
            pose.position + Vec2::new(size.x, 0.0),
            pose.position + Vec2::new(0.0, size.y),
            pose.position + size,
        ];
        for corner in corners {
            assert!(corner.distance(center) <= collider.large_sphere.radius + 1e-4);
        }
        assert!((collider.large_sphere.radius - 25.0).abs() < 1e-4);
    }

    #[test]
    #[should_panic]
    fn test_zero_size_texture_panics() {
        let _ = SphereCollider::new(Vec2::new(0.0, 16.0), CarrierPose::default());
    }

    #[test]
    fn test_far_apart_carriers_rejected() {
        let pa = pose_at(0.0, 0.0);
        let pb = pose_at(500.0, 0.0);
        let mut a = with_core(pa, 16.0);
        let mut b = with_core(pb, 16.0);
        assert!(!a.collides_with(pa, &mut b, pb));
    }

    #[test]
    fn test_overlapping_small_spheres_collide() {
        let pa = pose_at(0.0, 0.0);
        let pb = pose_at(20.0, 0.0);
        let mut a = with_core(pa, 12.0);
        let mut b = with_core(pb, 12.0);
        assert!(a.collides_with(pa, &mut b, pb));
        assert!(b.collides_with(pb, &mut a, pa));
    }

    #[test]
    fn test_broad_pass_narrow_miss() {
        // Large spheres (r ~22.6) overlap at 40 apart, small cores (r 4) do not
        let pa = pose_at(0.0, 0.0);
        let pb = pose_at(40.0, 0.0);
        let mut a = with_core(pa, 4.0);
        let mut b = with_core(pb, 4.0);
        assert!(a.broad_phase(pa, &mut b, pb));
        assert!(!a.collides_with(pa, &mut b, pb));
    }

    #[test]
    fn test_empty_small_spheres_never_collide() {
        let pa = pose_at(0.0, 0.0);
        let pb = pose_at(0.0, 0.0);
        let mut a = SphereCollider::new(SIZE, pa);
        let mut b = with_core(pb, 16.0);
        assert!(a.broad_phase(pa, &mut b, pb));
        assert!(!a.collides_with(pa, &mut b, pb));
        assert!(!b.collides_with(pb, &mut a, pa));
    }

    #[test]
    fn test_collides_with_uses_live_pose() {
        let pa = pose_at(0.0, 0.0);
        let mut pb = pose_at(500.0, 0.0);
        let mut a = with_core(pa, 12.0);
        let mut b = with_core(pb, 12.0);
        assert!(!a.collides_with(pa, &mut b, pb));

        // Spheres were built at the old pose; the test must refresh them
        pb.position = Vec2::new(10.0, 0.0);
        assert!(a.collides_with(pa, &mut b, pb));
    }

    #[test]
    fn test_offset_sphere_follows_rotation() {
        // A "nose" sphere 30 units ahead of the carrier pivot
        let mut pa = pose_at(0.0, 0.0);
        let mut a = SphereCollider::new(SIZE, pa);
        a.add_sphere(CollisionSphere::new(4.0, pa, 30.0, 0.0));

        // Target sits below the carrier
        let pb = pose_at(0.0, 30.0);
        let mut b = with_core(pb, 4.0);
        assert!(!a.collides_with(pa, &mut b, pb));

        // Turn to face down (clockwise on screen)
        pa.rotation = PI / 2.0;
        assert!(a.collides_with(pa, &mut b, pb));
    }

    #[test]
    fn test_update_refreshes_all_spheres() {
        let pa = pose_at(0.0, 0.0);
        let mut a = with_core(pa, 4.0);
        a.add_sphere(CollisionSphere::new(2.0, pa, 10.0, 0.0));

        let moved = pose_at(100.0, 50.0);
        a.update(moved);
        assert_eq!(a.large_sphere.position, moved.pivot());
        assert_eq!(a.small_spheres[0].position, moved.pivot());
        assert!((a.small_spheres[1].position - (moved.pivot() + Vec2::new(10.0, 0.0))).length() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_narrow_implies_broad(
            bx in -100.0f32..100.0, by in -100.0f32..100.0, rot in -PI..PI,
            radii in proptest::collection::vec(1.0f32..20.0, 0..4),
            distances in proptest::collection::vec(0.0f32..15.0, 4),
        ) {
            let pa = pose_at(0.0, 0.0);
            let pb = CarrierPose::new(Vec2::new(bx, by), SIZE / 2.0, rot);
            let mut a = SphereCollider::new(SIZE, pa);
            let mut b = SphereCollider::new(SIZE, pb);
            for (r, d) in radii.iter().zip(distances.iter()) {
                a.add_sphere(CollisionSphere::new(*r, pa, *d, 0.0));
                b.add_sphere(CollisionSphere::new(*r, pb, *d, 0.0));
            }

            let broad = a.broad_phase(pa, &mut b, pb);
            let full = a.collides_with(pa, &mut b, pb);
            prop_assert!(!full || broad);
        }
    }
}

//! Sphere collision module
//!
//! Carriers (sprites) get a two-tier collider:
//! - One large sphere bounding the whole carrier (broad phase)
//! - Any number of small spheres describing the precise shape (narrow phase)
//!
//! Tests are discrete, per frame. There is no collision response here; callers
//! decide whether to commit or roll back a move.

pub mod collider;
pub mod sphere;

pub use collider::SphereCollider;
pub use sphere::{CarrierPose, CollisionSphere};

//! Physics module for collision detection and response
//!
//! Colliders and rigid bodies are plain data owned by scene objects; the
//! world drives them once per frame.

pub mod collider;
pub mod collision;
pub mod collision_system;
pub mod rigidbody;

pub use collider::{Collider, ColliderShape};
pub use collision::{ShapeKind, WorldShape};
pub use collision_system::{CollisionPair, ContactTracker};
pub use rigidbody::Rigidbody;

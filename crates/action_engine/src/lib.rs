//! # Action Engine
//!
//! Scene and physics core for a 3D action game.
//!
//! ## Features
//!
//! - **Scene Hierarchy**: Handle-based objects with parent/child transforms
//! - **Collision Detection**: Sphere, oriented box, AABB and capsule narrow phase
//! - **Rigid Bodies**: Gravity, drag, bounce and friction response
//! - **Collision Events**: Enter, stay and exit callbacks per object
//! - **Debug Drawing**: Collider outlines colored by contact state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use action_engine::prelude::*;
//!
//! let mut world = World::new();
//! world.create_object(
//!     GameObject::new("ground")
//!         .with_collider(Collider::new_aabb(Vec3::new(20.0, 1.0, 20.0))),
//! );
//! world.create_object(
//!     GameObject::new("ball")
//!         .with_position(Vec3::new(0.0, 5.0, 0.0))
//!         .with_collider(Collider::new_sphere(0.5))
//!         .with_rigidbody(Rigidbody::new().with_bounciness(0.5)),
//! );
//!
//! for _ in 0..60 {
//!     world.update(1.0 / 60.0);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared configuration
pub mod config;
pub mod core;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod physics;
pub mod scene;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{model_cache::{FileModelLoader, ModelCache}, AssetError, Model, ModelLoader},
        core::{Config, ConfigError, SimulationConfig, WorldConfig},
        debug::{CollisionDebugColors, DebugDrawSystem, DebugShape, ShapeRenderer},
        foundation::{
            collections::ObjectId,
            math::{Mat4, Pose, Transform, Vec3, Vec4},
        },
        physics::{Collider, ColliderShape, Rigidbody},
        render::{ModelRenderer, RenderContext},
        scene::{Behaviour, Contact, GameObject, HierarchyMode, ObjectContext, World},
    };
}

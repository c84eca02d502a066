//! Debug module for visualization and debugging tools

pub mod draw;
pub mod collision_debug;

pub use draw::{DebugDrawSystem, DebugShape, ShapeRenderer};
pub use collision_debug::CollisionDebugColors;

//! Scene management
//!
//! The [`World`] owns every [`GameObject`] in a slot map and addresses them
//! through [`ObjectId`](crate::foundation::collections::ObjectId) handles.
//! Parent/child links are handles too, so removing an object never leaves a
//! dangling reference behind.

pub mod game_object;
pub mod world;

#[cfg(test)]
mod tests;

pub use game_object::{draw_model_default, Behaviour, Contact, GameObject, HierarchyMode, ObjectContext};
pub use world::World;

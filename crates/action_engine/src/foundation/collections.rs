//! Specialized collection types

pub use slotmap::{SlotMap, Key};

slotmap::new_key_type! {
    /// Stable handle to a scene object owned by the [`World`](crate::scene::World)
    ///
    /// Handles stay valid until the object is garbage collected; a stale
    /// handle simply fails to resolve.
    pub struct ObjectId;
}

/// Arena of scene objects addressed by [`ObjectId`]
pub type ObjectMap<T> = SlotMap<ObjectId, T>;

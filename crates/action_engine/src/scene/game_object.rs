//! Scene objects
//!
//! A [`GameObject`] owns its transform, colliders, optional rigid body and
//! optional behaviour. Parent and child links are [`ObjectId`] handles into
//! the owning [`World`](super::World); operations that need the hierarchy
//! (world-space transforms, parenting, destruction) live on the world.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::assets::Model;
use crate::foundation::collections::ObjectId;
use crate::foundation::math::{Mat4, Pose, Transform, Vec3};
use crate::physics::{Collider, Rigidbody};
use crate::render::{ModelRenderer, RenderContext};

/// How much a child inherits from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HierarchyMode {
    /// World transform follows the parent; active state and lifetime do not
    TransformOnly,
    /// Transform, active state and destruction all follow the parent
    #[default]
    Full,
}

/// The other object of a collision callback
#[derive(Clone, Copy)]
pub struct Contact<'a> {
    /// Handle of the other object
    pub id: ObjectId,
    /// The other object, or `None` if it was removed before the callback ran
    pub object: Option<&'a GameObject>,
}

/// Game-specific logic attached to an object
///
/// Every hook has a default, so implementors only override what they need.
pub trait Behaviour {
    /// Called once per frame before the object integrates its velocity
    fn update(&mut self, _ctx: &mut ObjectContext<'_>, _dt: f32) {}

    /// Submit draw calls for the object placed at `world_matrix`
    fn render(
        &self,
        object: &GameObject,
        world_matrix: &Mat4,
        context: &RenderContext,
        renderer: &mut dyn ModelRenderer,
    ) {
        draw_model_default(object, world_matrix, context, renderer);
    }

    /// First frame of contact with `other`
    fn on_collision_enter(&mut self, _ctx: &mut ObjectContext<'_>, _other: Contact<'_>) {}

    /// Contact with `other` continued from the previous frame
    fn on_collision_stay(&mut self, _ctx: &mut ObjectContext<'_>, _other: Contact<'_>) {}

    /// Contact with `other` ended this frame
    fn on_collision_exit(&mut self, _ctx: &mut ObjectContext<'_>, _other: Contact<'_>) {}
}

/// Draw the object's model at `world_matrix`
pub fn draw_model_default(
    object: &GameObject,
    world_matrix: &Mat4,
    context: &RenderContext,
    renderer: &mut dyn ModelRenderer,
) {
    if let Some(model) = object.model() {
        renderer.draw_model(context, model, world_matrix);
    }
}

/// Mutable view of an object handed to behaviour hooks
///
/// The behaviour itself is detached from the object while the hook runs.
pub struct ObjectContext<'a> {
    id: ObjectId,
    object: &'a mut GameObject,
    destroy_requested: bool,
}

impl<'a> ObjectContext<'a> {
    pub(crate) fn new(id: ObjectId, object: &'a mut GameObject) -> Self {
        Self {
            id,
            object,
            destroy_requested: false,
        }
    }

    /// Handle of the object
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Destroy the object once the hook returns
    pub fn destroy(&mut self) {
        self.destroy_requested = true;
    }

    /// Whether [`Self::destroy`] was called
    pub fn destroy_requested(&self) -> bool {
        self.destroy_requested
    }
}

impl Deref for ObjectContext<'_> {
    type Target = GameObject;

    fn deref(&self) -> &GameObject {
        self.object
    }
}

impl DerefMut for ObjectContext<'_> {
    fn deref_mut(&mut self) -> &mut GameObject {
        self.object
    }
}

/// Entity in the scene
pub struct GameObject {
    name: String,
    transform: Transform,
    velocity: Vec3,
    active: bool,
    colliders: Vec<Collider>,
    rigidbody: Option<Rigidbody>,
    model: Option<Arc<Model>>,

    pub(crate) world_matrix: Mat4,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    pub(crate) hierarchy: HierarchyMode,
    pub(crate) behaviour: Option<Box<dyn Behaviour>>,
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("velocity", &self.velocity)
            .field("active", &self.active)
            .field("colliders", &self.colliders)
            .field("rigidbody", &self.rigidbody)
            .field("model", &self.model)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("hierarchy", &self.hierarchy)
            .field("has_behaviour", &self.behaviour.is_some())
            .finish()
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new("GameObject")
    }
}

impl GameObject {
    /// Create an active object at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            velocity: Vec3::zeros(),
            active: true,
            colliders: Vec::new(),
            rigidbody: None,
            model: None,
            world_matrix: Mat4::identity(),
            parent: None,
            children: Vec::new(),
            hierarchy: HierarchyMode::Full,
            behaviour: None,
        }
    }

    /// Builder: local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: local position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.set_position(position);
        self
    }

    /// Builder: local Euler rotation in radians
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.set_rotation(rotation);
        self
    }

    /// Builder: local scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.set_scale(scale);
        self
    }

    /// Builder: velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: add a collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.colliders.push(collider);
        self
    }

    /// Builder: attach a rigid body
    pub fn with_rigidbody(mut self, rigidbody: Rigidbody) -> Self {
        self.rigidbody = Some(rigidbody);
        self
    }

    /// Builder: shared model
    pub fn with_model(mut self, model: Arc<Model>) -> Self {
        self.model = Some(model);
        self
    }

    /// Builder: behaviour hooks
    pub fn with_behaviour(mut self, behaviour: impl Behaviour + 'static) -> Self {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Local Euler rotation
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    /// Local scale
    pub fn scale(&self) -> Vec3 {
        self.transform.scale()
    }

    /// Set the local position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
        self.sync_root_world_matrix();
    }

    /// Set the local rotation
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.set_rotation(rotation);
        self.sync_root_world_matrix();
    }

    /// Set the local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.set_scale(scale);
        self.sync_root_world_matrix();
    }

    /// Replace the whole local transform
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.sync_root_world_matrix();
    }

    /// Move in local space
    pub fn translate(&mut self, delta: Vec3) {
        self.transform.translate(delta);
        self.sync_root_world_matrix();
    }

    /// Add to the local rotation
    pub fn rotate(&mut self, delta: Vec3) {
        self.transform.rotate(delta);
        self.sync_root_world_matrix();
    }

    /// Velocity in units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Own active flag (ignores ancestors)
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the own active flag
    ///
    /// Inactive objects are skipped by every pass and removed from the
    /// world at the end of the frame.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Attached colliders
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Attached colliders, mutable
    pub fn colliders_mut(&mut self) -> &mut [Collider] {
        &mut self.colliders
    }

    /// Attach a collider
    pub fn add_collider(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    /// Detach every collider
    pub fn clear_colliders(&mut self) {
        self.colliders.clear();
    }

    /// Whether any collider is enabled
    pub fn has_enabled_collider(&self) -> bool {
        self.colliders.iter().any(Collider::is_enabled)
    }

    /// Attached rigid body
    pub fn rigidbody(&self) -> Option<&Rigidbody> {
        self.rigidbody.as_ref()
    }

    /// Attached rigid body, mutable
    pub fn rigidbody_mut(&mut self) -> Option<&mut Rigidbody> {
        self.rigidbody.as_mut()
    }

    /// Attach or remove the rigid body
    pub fn set_rigidbody(&mut self, rigidbody: Option<Rigidbody>) {
        self.rigidbody = rigidbody;
    }

    /// Whether the object has an enabled, non-kinematic rigid body
    pub fn has_simulated_body(&self) -> bool {
        self.rigidbody.as_ref().is_some_and(Rigidbody::is_simulated)
    }

    /// Shared model
    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    /// Replace the model
    pub fn set_model(&mut self, model: Option<Arc<Model>>) {
        self.model = model;
    }

    /// Whether a behaviour is attached
    pub fn has_behaviour(&self) -> bool {
        self.behaviour.is_some()
    }

    /// Parent handle
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Child handles
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// Inheritance mode relative to the parent
    pub fn hierarchy_mode(&self) -> HierarchyMode {
        self.hierarchy
    }

    /// Cached world matrix
    ///
    /// Always current for root objects. For a parented object, local setters
    /// called directly on it (or on an ancestor) show up after the next world
    /// update; [`World::world_matrix`](super::World::world_matrix) walks the
    /// parent chain instead.
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// World pose (scale removed) from the cached world matrix
    pub fn world_pose(&self) -> Pose {
        Pose::from_matrix(&self.world_matrix)
    }

    pub(crate) fn apply_forces(&mut self, dt: f32, gravity: &Vec3) {
        if let Some(body) = &self.rigidbody {
            if body.is_simulated() {
                body.apply_gravity(&mut self.velocity, dt, gravity);
                body.apply_drag(&mut self.velocity, dt);
                body.clamp_velocity(&mut self.velocity);
            }
        }
    }

    pub(crate) fn respond_to_contact(&mut self, normal: &Vec3) {
        if let Some(body) = &self.rigidbody {
            body.respond_to_contact(&mut self.velocity, normal);
        }
    }

    pub(crate) fn integrate(&mut self, dt: f32) {
        self.translate(self.velocity * dt);
    }

    /// A root's world matrix is its local matrix
    fn sync_root_world_matrix(&mut self) {
        if self.parent.is_none() {
            self.world_matrix = *self.transform.matrix();
        }
    }
}

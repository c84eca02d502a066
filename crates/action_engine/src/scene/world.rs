//! The world: owner of every scene object and driver of the frame loop
//!
//! Each call to [`World::update`] runs, in order:
//!
//! 1. **Physics** - gravity, drag and speed clamp for simulated bodies
//! 2. **Integration** - behaviour update, `position += velocity * dt` and
//!    top-down world-matrix propagation
//! 3. **Collision** - all-pairs narrow phase with positional correction
//! 4. **Events** - enter, stay and exit callbacks from the contact diff
//! 5. **Cleanup** - objects marked inactive are removed
//!
//! Objects are never removed mid-frame, so handles captured during a frame
//! stay valid until the cleanup step.

use crate::assets::{AssetError, ModelLoader};
use crate::core::config::WorldConfig;
use crate::debug::{CollisionDebugColors, ShapeRenderer};
use crate::foundation::collections::{ObjectId, ObjectMap};
use crate::foundation::math::{
    euler_from_basis, rotation_matrix, safe_normalize, translation_of, Mat4, Pose, Transform, Vec3,
};
use crate::physics::ContactTracker;
use crate::render::{ModelRenderer, RenderContext};

use super::game_object::{draw_model_default, Behaviour, Contact, GameObject, HierarchyMode, ObjectContext};

#[derive(Debug, Clone, Copy)]
enum CollisionEvent {
    Enter,
    Stay,
    Exit,
}

/// Scene container and per-frame simulation
pub struct World {
    objects: ObjectMap<GameObject>,
    gravity: Vec3,
    debug_draw_colliders: bool,
    debug_colors: CollisionDebugColors,
    contacts: ContactTracker,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world with standard gravity
    pub fn new() -> Self {
        Self::with_config(&WorldConfig::default())
    }

    /// Create an empty world from configuration
    pub fn with_config(config: &WorldConfig) -> Self {
        Self {
            objects: ObjectMap::with_key(),
            gravity: config.gravity,
            debug_draw_colliders: config.debug_draw_colliders,
            debug_colors: CollisionDebugColors::default(),
            contacts: ContactTracker::new(),
        }
    }

    // ------------------------------------------------------------------
    // Object management
    // ------------------------------------------------------------------

    /// Take ownership of an object and return its handle
    pub fn create_object(&mut self, mut object: GameObject) -> ObjectId {
        object.world_matrix = *object.transform().matrix();
        let name = object.name().to_string();
        let id = self.objects.insert(object);
        log::debug!("Created object '{}' ({:?})", name, id);
        id
    }

    /// Create an object drawing the model at `path`
    pub fn create_model_object(
        &mut self,
        loader: &mut dyn ModelLoader,
        path: &str,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<ObjectId, AssetError> {
        let model = loader.load_model(path).map_err(|e| {
            log::warn!("Failed to load model '{}': {}", path, e);
            e
        })?;

        let object = GameObject::new(path)
            .with_transform(Transform::new(position, rotation, scale))
            .with_model(model);
        Ok(self.create_object(object))
    }

    /// Remove every object and forget all contacts
    pub fn clear(&mut self) {
        log::debug!("Clearing world ({} objects)", self.objects.len());
        self.objects.clear();
        self.contacts.clear();
    }

    /// Object by handle
    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Object by handle, mutable
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Whether the handle refers to an object in the world
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of objects, including ones awaiting removal
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Handles of every object in container order
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys()
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name() == name)
            .map(|(id, _)| id)
    }

    /// Parent of an object
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(GameObject::parent)
    }

    /// Children of an object (empty for unknown handles)
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects.get(id).map(GameObject::children).unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Gravity acceleration
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Set gravity acceleration
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Whether collider outlines are drawn
    pub fn debug_draw_colliders(&self) -> bool {
        self.debug_draw_colliders
    }

    /// Enable or disable collider outlines
    pub fn set_debug_draw_colliders(&mut self, enabled: bool) {
        self.debug_draw_colliders = enabled;
    }

    /// Colors used for collider outlines
    pub fn debug_colors(&self) -> &CollisionDebugColors {
        &self.debug_colors
    }

    /// Replace the collider outline colors
    pub fn set_debug_colors(&mut self, colors: CollisionDebugColors) {
        self.debug_colors = colors;
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// Own flag, and for [`HierarchyMode::Full`] children also every
    /// ancestor's flag
    pub fn is_active_in_hierarchy(&self, id: ObjectId) -> bool {
        let mut current = id;
        loop {
            let Some(object) = self.objects.get(current) else {
                return current != id;
            };
            if !object.is_active() {
                return false;
            }
            match (object.hierarchy, object.parent) {
                (HierarchyMode::Full, Some(parent)) => current = parent,
                _ => return true,
            }
        }
    }

    /// Parent `child` under `parent` inheriting transform, active state and
    /// destruction; `None` detaches
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>, keep_world_position: bool) -> bool {
        self.attach(child, parent, keep_world_position, HierarchyMode::Full)
    }

    /// Parent `child` under `parent` inheriting only the transform; `None`
    /// detaches
    pub fn set_parent_transform_only(
        &mut self,
        child: ObjectId,
        parent: Option<ObjectId>,
        keep_world_position: bool,
    ) -> bool {
        self.attach(child, parent, keep_world_position, HierarchyMode::TransformOnly)
    }

    fn attach(
        &mut self,
        child: ObjectId,
        parent: Option<ObjectId>,
        keep_world_position: bool,
        mode: HierarchyMode,
    ) -> bool {
        if !self.objects.contains_key(child) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.objects.contains_key(parent) {
                return false;
            }
            if self.is_self_or_descendant(parent, child) {
                log::warn!("Refusing to parent {:?} under its own descendant {:?}", child, parent);
                return false;
            }
        }

        let world_position = self.world_position(child).unwrap_or_else(Vec3::zeros);

        self.unlink_from_parent(child);

        if let Some(parent) = parent {
            if let Some(parent_object) = self.objects.get_mut(parent) {
                parent_object.children.push(child);
            }
        }
        if let Some(object) = self.objects.get_mut(child) {
            object.parent = parent;
            object.hierarchy = mode;
        }

        if keep_world_position {
            self.set_world_position(child, world_position);
        } else {
            self.refresh_world_matrices(child);
        }
        true
    }

    /// Whether `candidate` is `root` or lies below it
    fn is_self_or_descendant(&self, candidate: ObjectId, root: ObjectId) -> bool {
        let mut current = Some(candidate);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.objects.get(id).and_then(GameObject::parent);
        }
        false
    }

    fn unlink_from_parent(&mut self, child: ObjectId) {
        let old_parent = self.objects.get_mut(child).and_then(|object| object.parent.take());
        if let Some(old_parent) = old_parent.and_then(|id| self.objects.get_mut(id)) {
            old_parent.children.retain(|&id| id != child);
        }
    }

    /// Mark an object for removal
    ///
    /// [`HierarchyMode::Full`] children are destroyed with it;
    /// [`HierarchyMode::TransformOnly`] children are detached and keep their
    /// world transform. Destroying an already destroyed object does nothing
    /// new.
    pub fn destroy(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        if object.is_active() {
            log::debug!("Destroying object '{}' ({:?})", object.name(), id);
        }
        object.set_active(false);

        let children = object.children.clone();
        for child in children {
            let Some(child_object) = self.objects.get(child) else {
                continue;
            };
            match child_object.hierarchy {
                HierarchyMode::Full => {
                    if child_object.is_active() {
                        self.destroy(child);
                    }
                }
                HierarchyMode::TransformOnly => self.detach_keep_world_transform(child),
            }
        }
    }

    /// Detach from the parent, keeping position, rotation and scale in world space
    fn detach_keep_world_transform(&mut self, id: ObjectId) {
        let Some(world) = self.world_matrix(id) else {
            return;
        };
        self.unlink_from_parent(id);
        if let Some(object) = self.objects.get_mut(id) {
            object.set_transform(Transform::from_matrix(&world));
        }
        self.refresh_world_matrices(id);
    }

    // ------------------------------------------------------------------
    // World-space transforms
    // ------------------------------------------------------------------

    /// World matrix computed from the current parent chain
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let object = self.objects.get(id)?;
        let mut matrix = *object.transform().matrix();
        let mut parent = object.parent;

        while let Some(parent_object) = parent.and_then(|p| self.objects.get(p)) {
            matrix = parent_object.transform().matrix() * matrix;
            parent = parent_object.parent;
        }

        Some(matrix)
    }

    /// World position
    pub fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        self.world_matrix(id).map(|matrix| translation_of(&matrix))
    }

    /// World pose (position and rotation, scale removed)
    pub fn world_pose(&self, id: ObjectId) -> Option<Pose> {
        self.world_matrix(id).map(|matrix| Pose::from_matrix(&matrix))
    }

    /// Move an object so its origin lands on `position` in world space
    pub fn set_world_position(&mut self, id: ObjectId, position: Vec3) {
        let Some(parent) = self.objects.get(id).map(GameObject::parent) else {
            return;
        };

        let local = match parent.and_then(|p| self.world_matrix(p)) {
            Some(parent_world) => match parent_world.try_inverse() {
                Some(inverse) => inverse.transform_point(&position.into()).coords,
                None => {
                    log::warn!("Parent of {:?} has a singular world matrix; position unchanged", id);
                    return;
                }
            },
            None => position,
        };

        if let Some(object) = self.objects.get_mut(id) {
            object.set_position(local);
        }
        self.refresh_world_matrices(id);
    }

    /// Rotate an object so its world orientation matches the Euler angles
    pub fn set_world_rotation(&mut self, id: ObjectId, rotation: Vec3) {
        let Some(parent) = self.objects.get(id).map(GameObject::parent) else {
            return;
        };

        let local = match parent.and_then(|p| self.world_pose(p)) {
            Some(parent_pose) => {
                euler_from_basis(&(parent_pose.basis.transpose() * rotation_matrix(&rotation).matrix()))
            }
            None => rotation,
        };

        if let Some(object) = self.objects.get_mut(id) {
            object.set_rotation(local);
        }
        self.refresh_world_matrices(id);
    }

    /// Distance between the world positions of two objects
    pub fn distance_between(&self, a: ObjectId, b: ObjectId) -> Option<f32> {
        Some((self.world_position(b)? - self.world_position(a)?).magnitude())
    }

    /// Unit direction from `a` to `b` in world space
    pub fn direction_between(&self, a: ObjectId, b: ObjectId) -> Option<Vec3> {
        safe_normalize(&(self.world_position(b)? - self.world_position(a)?))
    }

    /// Recompute cached world matrices for `id` and everything below it
    fn refresh_world_matrices(&mut self, id: ObjectId) {
        let Some(world) = self.world_matrix(id) else {
            return;
        };

        let mut stack = vec![(id, world)];
        while let Some((current, matrix)) = stack.pop() {
            let Some(object) = self.objects.get_mut(current) else {
                continue;
            };
            object.world_matrix = matrix;

            let children = object.children.clone();
            for child in children {
                if let Some(child_object) = self.objects.get(child) {
                    stack.push((child, matrix * child_object.transform().matrix()));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.apply_forces(dt);
        self.integrate_hierarchy(dt);
        self.detect_collisions();
        self.dispatch_collision_events();
        self.collect_garbage();
    }

    fn apply_forces(&mut self, dt: f32) {
        let ids: Vec<ObjectId> = self.objects.keys().collect();
        let gravity = self.gravity;

        for id in ids {
            if !self.is_active_in_hierarchy(id) {
                continue;
            }
            if let Some(object) = self.objects.get_mut(id) {
                object.apply_forces(dt, &gravity);
            }
        }
    }

    /// Depth-first from the roots so every parent is placed before its children
    fn integrate_hierarchy(&mut self, dt: f32) {
        let mut stack: Vec<(ObjectId, Mat4)> = self
            .objects
            .iter()
            .filter(|(_, object)| object.parent.is_none())
            .map(|(id, _)| (id, Mat4::identity()))
            .collect();
        stack.reverse();

        while let Some((id, parent_world)) = stack.pop() {
            let children_before = self.children(id).to_vec();
            if self.is_active_in_hierarchy(id) {
                self.run_behaviour_update(id, dt);
            }
            let active = self.is_active_in_hierarchy(id);

            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };
            if active {
                object.integrate(dt);
            }
            object.world_matrix = parent_world * object.transform().matrix();

            let world = object.world_matrix;
            let mut next: Vec<(ObjectId, Mat4)> = object.children.iter().map(|&child| (child, world)).collect();
            // Children detached by the behaviour (self-destruction) are roots now
            next.extend(
                children_before
                    .into_iter()
                    .filter(|child| !object.children.contains(child))
                    .map(|child| (child, Mat4::identity())),
            );
            stack.extend(next.into_iter().rev());
        }
    }

    fn run_behaviour_update(&mut self, id: ObjectId, dt: f32) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        let Some(mut behaviour) = object.behaviour.take() else {
            return;
        };

        let mut ctx = ObjectContext::new(id, object);
        behaviour.update(&mut ctx, dt);
        let destroy = ctx.destroy_requested();

        object.behaviour = Some(behaviour);
        if destroy {
            self.destroy(id);
        }
    }

    fn detect_collisions(&mut self) {
        self.contacts.begin_frame();

        let candidates: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, object)| object.has_enabled_collider())
            .map(|(id, _)| id)
            .filter(|&id| self.is_active_in_hierarchy(id))
            .collect();

        for &a in &candidates {
            let simulated = self.objects.get(a).is_some_and(GameObject::has_simulated_body);
            if simulated {
                self.resolve_against_all(a, &candidates);
            } else {
                self.test_against_all(a, &candidates);
            }
        }
    }

    /// Boolean tests for an object without a usable rigid body
    fn test_against_all(&mut self, a: ObjectId, candidates: &[ObjectId]) {
        for &b in candidates {
            if a == b || self.contacts.contains(a, b) {
                continue;
            }
            let (Some(object_a), Some(object_b)) = (self.objects.get(a), self.objects.get(b)) else {
                continue;
            };

            let pose_a = object_a.world_pose();
            let pose_b = object_b.world_pose();
            let touching = object_a.colliders().iter().any(|ca| {
                object_b
                    .colliders()
                    .iter()
                    .any(|cb| ca.check_collision(&pose_a, cb, &pose_b))
            });

            if touching && self.contacts.record(a, b) {
                log::trace!("Contact {:?} <-> {:?}", a, b);
            }
        }
    }

    /// Penetration tests for a simulated body; all corrections against every
    /// neighbour are summed and applied once
    fn resolve_against_all(&mut self, a: ObjectId, candidates: &[ObjectId]) {
        let mut total_correction = Vec3::zeros();
        let mut normal_sum = Vec3::zeros();
        let mut touched = Vec::new();

        let Some(object_a) = self.objects.get(a) else {
            return;
        };
        let pose_a = object_a.world_pose();

        for &b in candidates {
            if a == b {
                continue;
            }
            let Some(object_b) = self.objects.get(b) else {
                continue;
            };
            let pose_b = object_b.world_pose();

            let mut touching = false;
            for ca in object_a.colliders() {
                for cb in object_b.colliders() {
                    if let Some(correction) = ca.check_rigidbody_collision(&pose_a, cb, &pose_b) {
                        touching = true;
                        total_correction += correction;
                        if let Some(normal) = safe_normalize(&correction) {
                            normal_sum += normal;
                        }
                    }
                }
            }

            if touching {
                touched.push(b);
            }
        }

        if touched.is_empty() {
            return;
        }

        for b in touched {
            if self.contacts.record(a, b) {
                log::trace!("Contact {:?} <-> {:?}", a, b);
            }
        }

        if let Some(position) = self.world_position(a) {
            self.set_world_position(a, position + total_correction);
        }
        if let Some(normal) = safe_normalize(&normal_sum) {
            if let Some(object) = self.objects.get_mut(a) {
                object.respond_to_contact(&normal);
            }
        }
    }

    fn dispatch_collision_events(&mut self) {
        for pair in self.contacts.entered() {
            self.fire_pair(pair.entity_a, pair.entity_b, CollisionEvent::Enter);
        }
        for pair in self.contacts.stayed() {
            self.fire_pair(pair.entity_a, pair.entity_b, CollisionEvent::Stay);
        }
        for pair in self.contacts.exited() {
            self.fire_pair(pair.entity_a, pair.entity_b, CollisionEvent::Exit);
        }
    }

    fn fire_pair(&mut self, a: ObjectId, b: ObjectId, event: CollisionEvent) {
        log::trace!("{:?} {:?} <-> {:?}", event, a, b);
        self.fire(a, b, event);
        self.fire(b, a, event);
    }

    fn fire(&mut self, id: ObjectId, other: ObjectId, event: CollisionEvent) {
        // Destroyed earlier in this dispatch
        if !self.objects.get(id).is_some_and(GameObject::is_active) {
            return;
        }
        let Some(mut behaviour) = self.objects.get_mut(id).and_then(|object| object.behaviour.take()) else {
            return;
        };

        let destroy = match self.objects.get_disjoint_mut([id, other]) {
            Some([object, other_object]) => {
                let mut ctx = ObjectContext::new(id, object);
                let contact = Contact {
                    id: other,
                    object: Some(&*other_object),
                };
                Self::invoke(behaviour.as_mut(), &mut ctx, contact, event);
                ctx.destroy_requested()
            }
            None => match self.objects.get_mut(id) {
                Some(object) => {
                    let mut ctx = ObjectContext::new(id, object);
                    let contact = Contact { id: other, object: None };
                    Self::invoke(behaviour.as_mut(), &mut ctx, contact, event);
                    ctx.destroy_requested()
                }
                None => false,
            },
        };

        if let Some(object) = self.objects.get_mut(id) {
            object.behaviour = Some(behaviour);
        }
        if destroy {
            self.destroy(id);
        }
    }

    fn invoke(
        behaviour: &mut dyn Behaviour,
        ctx: &mut ObjectContext<'_>,
        other: Contact<'_>,
        event: CollisionEvent,
    ) {
        match event {
            CollisionEvent::Enter => behaviour.on_collision_enter(ctx, other),
            CollisionEvent::Stay => behaviour.on_collision_stay(ctx, other),
            CollisionEvent::Exit => behaviour.on_collision_exit(ctx, other),
        }
    }

    fn collect_garbage(&mut self) {
        let dead: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, object)| !object.is_active())
            .map(|(id, _)| id)
            .collect();

        if dead.is_empty() {
            return;
        }

        // Survivors parented to a removed object become roots in place
        for &id in &dead {
            let children = self.children(id).to_vec();
            for child in children {
                if self.objects.get(child).is_some_and(GameObject::is_active) {
                    self.detach_keep_world_transform(child);
                }
            }
            self.unlink_from_parent(id);
        }

        for &id in &dead {
            self.objects.remove(id);
        }
        log::debug!("Removed {} inactive object(s)", dead.len());
    }

    // ------------------------------------------------------------------
    // Contacts
    // ------------------------------------------------------------------

    /// Objects touching `id` in the last update
    pub fn contacts_of(&self, id: ObjectId) -> Vec<ObjectId> {
        self.contacts.contacts_of(id)
    }

    /// Whether two objects touched in the last update
    pub fn is_touching(&self, a: ObjectId, b: ObjectId) -> bool {
        self.contacts.contains(a, b)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Submit every object active in the hierarchy to the renderer
    pub fn render(&self, context: &RenderContext, renderer: &mut dyn ModelRenderer) {
        for (id, object) in &self.objects {
            if !self.is_active_in_hierarchy(id) {
                continue;
            }
            let Some(world_matrix) = self.world_matrix(id) else {
                continue;
            };
            match &object.behaviour {
                Some(behaviour) => behaviour.render(object, &world_matrix, context, renderer),
                None => draw_model_default(object, &world_matrix, context, renderer),
            }
        }
    }

    /// Emit collider outlines when collider drawing is enabled
    pub fn draw_debug_primitives(&self, renderer: &mut dyn ShapeRenderer) {
        if !self.debug_draw_colliders {
            return;
        }

        for (id, object) in &self.objects {
            if !self.is_active_in_hierarchy(id) {
                continue;
            }
            let Some(pose) = self.world_pose(id) else {
                continue;
            };
            let colliding = self.contacts.involves(id);

            for collider in object.colliders() {
                let color = self.debug_colors.color_for(collider.is_enabled(), colliding);
                renderer.draw_shape(&collider.debug_draw_info(&pose, color));
            }
        }
    }
}

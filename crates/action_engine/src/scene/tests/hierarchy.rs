//! Parenting, transform propagation and destruction

use approx::assert_relative_eq;

use crate::foundation::math::{translation_of, Vec3};
use crate::scene::{Behaviour, GameObject, HierarchyMode, ObjectContext, World};

fn world_without_gravity() -> World {
    let mut world = World::new();
    world.set_gravity(Vec3::zeros());
    world
}

#[test]
fn test_child_world_matrix_is_parent_times_local() {
    let mut world = world_without_gravity();
    let parent = world.create_object(
        GameObject::new("parent")
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(0.0, 0.5, 0.2))
            .with_scale(Vec3::new(2.0, 2.0, 2.0)),
    );
    let child = world.create_object(GameObject::new("child").with_position(Vec3::new(1.0, 0.0, 0.0)));
    assert!(world.set_parent(child, Some(parent), false));

    let parent_world = *world.object(parent).unwrap().transform().matrix();
    let child_local = *world.object(child).unwrap().transform().matrix();
    let expected = parent_world * child_local;

    assert_relative_eq!(world.world_matrix(child).unwrap(), expected, epsilon = 1e-5);
    assert_relative_eq!(*world.object(child).unwrap().world_matrix(), expected, epsilon = 1e-5);
}

#[test]
fn test_moving_parent_moves_child_rigidly() {
    let mut world = world_without_gravity();
    let parent = world.create_object(GameObject::new("parent").with_position(Vec3::new(0.0, 1.0, 0.0)));
    let child = world.create_object(GameObject::new("child").with_position(Vec3::new(2.0, 0.0, 0.0)));
    world.set_parent(child, Some(parent), false);

    let before = world.world_position(child).unwrap();
    let delta = Vec3::new(0.5, -3.0, 4.0);
    world.object_mut(parent).unwrap().translate(delta);
    world.update(0.016);

    assert_relative_eq!(world.world_position(child).unwrap(), before + delta, epsilon = 1e-5);
    assert_relative_eq!(
        translation_of(world.object(child).unwrap().world_matrix()),
        before + delta,
        epsilon = 1e-5
    );
}

#[test]
fn test_parent_velocity_carries_children() {
    let mut world = world_without_gravity();
    let parent = world.create_object(GameObject::new("ship").with_velocity(Vec3::new(2.0, 0.0, 0.0)));
    let turret = world.create_object(GameObject::new("turret").with_position(Vec3::new(0.0, 1.0, 0.0)));
    world.set_parent(turret, Some(parent), false);

    world.update(0.5);

    assert_relative_eq!(world.world_position(turret).unwrap(), Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(world.object(turret).unwrap().position(), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_keep_world_position_converts_into_parent_space() {
    let mut world = world_without_gravity();
    let parent = world.create_object(
        GameObject::new("parent")
            .with_position(Vec3::new(1.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0)),
    );
    let child = world.create_object(GameObject::new("child").with_position(Vec3::new(3.0, 0.0, 0.0)));

    assert!(world.set_parent(child, Some(parent), true));
    assert_relative_eq!(world.object(child).unwrap().position(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-6);

    // Detaching with keep restores the world position as local position
    assert!(world.set_parent(child, None, true));
    assert_eq!(world.parent(child), None);
    assert!(world.children(parent).is_empty());
    assert_relative_eq!(world.object(child).unwrap().position(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_reparenting_moves_child_between_lists() {
    let mut world = world_without_gravity();
    let first = world.create_object(GameObject::new("first"));
    let second = world.create_object(GameObject::new("second"));
    let child = world.create_object(GameObject::new("child"));

    world.set_parent(child, Some(first), false);
    world.set_parent_transform_only(child, Some(second), false);

    assert!(world.children(first).is_empty());
    assert_eq!(world.children(second), &[child]);
    assert_eq!(world.object(child).unwrap().hierarchy_mode(), HierarchyMode::TransformOnly);
}

#[test]
fn test_cycles_are_refused() {
    let mut world = world_without_gravity();
    let root = world.create_object(GameObject::new("root"));
    let middle = world.create_object(GameObject::new("middle"));
    let leaf = world.create_object(GameObject::new("leaf"));
    world.set_parent(middle, Some(root), false);
    world.set_parent(leaf, Some(middle), false);

    assert!(!world.set_parent(root, Some(leaf), false));
    assert!(!world.set_parent(root, Some(root), false));
    assert_eq!(world.parent(root), None);
}

#[test]
fn test_active_in_hierarchy_propagation() {
    let mut world = world_without_gravity();
    let root = world.create_object(GameObject::new("root"));
    let full_child = world.create_object(GameObject::new("full"));
    let grandchild = world.create_object(GameObject::new("grandchild"));
    let loose_child = world.create_object(GameObject::new("loose"));

    world.set_parent(full_child, Some(root), false);
    world.set_parent(grandchild, Some(full_child), false);
    world.set_parent_transform_only(loose_child, Some(root), false);

    world.object_mut(root).unwrap().set_active(false);

    assert!(world.object(full_child).unwrap().is_active());
    assert!(!world.is_active_in_hierarchy(full_child));
    assert!(!world.is_active_in_hierarchy(grandchild));
    assert!(world.is_active_in_hierarchy(loose_child));
}

#[test]
fn test_inactive_parent_freezes_full_children_only() {
    let mut world = world_without_gravity();
    let root = world.create_object(GameObject::new("root"));
    let full_child = world.create_object(GameObject::new("full").with_velocity(Vec3::new(1.0, 0.0, 0.0)));
    let loose_child = world.create_object(GameObject::new("loose").with_velocity(Vec3::new(1.0, 0.0, 0.0)));
    world.set_parent(full_child, Some(root), false);
    world.set_parent_transform_only(loose_child, Some(root), false);

    world.object_mut(root).unwrap().set_active(false);
    world.update(1.0);

    // Deactivation is not destruction: the full child was frozen, then both
    // children survive the root's removal as roots
    assert!(!world.contains(root));
    assert!(world.contains(full_child));
    assert_eq!(world.parent(full_child), None);
    assert_relative_eq!(world.world_position(full_child).unwrap(), Vec3::zeros());
    assert_eq!(world.parent(loose_child), None);
    assert_relative_eq!(world.world_position(loose_child).unwrap(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_destroying_full_parent_cascades() {
    let mut world = world_without_gravity();
    let parent = world.create_object(GameObject::new("parent").with_position(Vec3::new(5.0, 0.0, 0.0)));
    let full_child = world.create_object(GameObject::new("full").with_position(Vec3::new(1.0, 0.0, 0.0)));
    let loose_child = world.create_object(GameObject::new("loose").with_position(Vec3::new(0.0, 2.0, 0.0)));
    world.set_parent(full_child, Some(parent), false);
    world.set_parent_transform_only(loose_child, Some(parent), false);

    let loose_world = world.world_position(loose_child).unwrap();
    world.destroy(parent);

    assert!(!world.object(parent).unwrap().is_active());
    assert!(!world.object(full_child).unwrap().is_active());
    assert!(world.object(loose_child).unwrap().is_active());
    assert_eq!(world.parent(loose_child), None);
    assert_relative_eq!(world.world_position(loose_child).unwrap(), loose_world, epsilon = 1e-6);

    // Destroying twice changes nothing
    world.destroy(parent);

    world.update(0.016);
    assert!(!world.contains(parent));
    assert!(!world.contains(full_child));
    assert!(world.contains(loose_child));
    assert!(world.object(loose_child).unwrap().is_active());
    assert_relative_eq!(world.world_position(loose_child).unwrap(), Vec3::new(5.0, 2.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_set_world_rotation_under_rotated_parent() {
    let mut world = world_without_gravity();
    let parent = world.create_object(GameObject::new("parent").with_rotation(Vec3::new(0.0, 0.6, 0.0)));
    let child = world.create_object(GameObject::new("child"));
    world.set_parent(child, Some(parent), false);

    world.set_world_rotation(child, Vec3::new(0.0, 1.0, 0.0));
    assert_relative_eq!(world.object(child).unwrap().rotation(), Vec3::new(0.0, 0.4, 0.0), epsilon = 1e-5);
}

#[test]
fn test_distance_and_direction_use_world_positions() {
    let mut world = world_without_gravity();
    let parent = world.create_object(GameObject::new("parent").with_position(Vec3::new(0.0, 3.0, 0.0)));
    let child = world.create_object(GameObject::new("child").with_position(Vec3::new(0.0, 1.0, 0.0)));
    let target = world.create_object(GameObject::new("target").with_position(Vec3::new(3.0, 4.0, 0.0)));
    world.set_parent(child, Some(parent), false);

    assert_relative_eq!(world.distance_between(child, target).unwrap(), 3.0, epsilon = 1e-6);
    assert_relative_eq!(world.direction_between(child, target).unwrap(), Vec3::x(), epsilon = 1e-6);
    assert!(world.direction_between(child, child).is_none());
}

#[test]
fn test_find_by_name_and_clear() {
    let mut world = world_without_gravity();
    let hero = world.create_object(GameObject::new("hero"));
    world.create_object(GameObject::new("rock"));

    assert_eq!(world.find_by_name("hero"), Some(hero));
    assert_eq!(world.find_by_name("dragon"), None);
    assert_eq!(world.len(), 2);

    world.clear();
    assert!(world.is_empty());
    assert!(!world.contains(hero));
}

#[test]
fn test_set_world_position_refreshes_descendant_caches() {
    let mut world = world_without_gravity();
    let root = world.create_object(GameObject::new("root"));
    let middle = world.create_object(GameObject::new("middle").with_position(Vec3::new(1.0, 0.0, 0.0)));
    let leaf = world.create_object(GameObject::new("leaf").with_position(Vec3::new(0.0, 1.0, 0.0)));
    world.set_parent(middle, Some(root), false);
    world.set_parent(leaf, Some(middle), false);

    world.set_world_position(root, Vec3::new(0.0, 0.0, 4.0));

    assert_relative_eq!(
        translation_of(world.object(leaf).unwrap().world_matrix()),
        Vec3::new(1.0, 1.0, 4.0),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        translation_of(world.object(middle).unwrap().world_matrix()),
        Vec3::new(1.0, 0.0, 4.0),
        epsilon = 1e-6
    );
}

struct SelfDestruct;

impl Behaviour for SelfDestruct {
    fn update(&mut self, ctx: &mut ObjectContext<'_>, _dt: f32) {
        ctx.destroy();
    }
}

#[test]
fn test_children_released_mid_update_still_integrate() {
    let mut world = world_without_gravity();
    let parent = world.create_object(GameObject::new("parent").with_behaviour(SelfDestruct));
    let loose_child = world.create_object(GameObject::new("loose").with_velocity(Vec3::new(1.0, 0.0, 0.0)));
    world.set_parent_transform_only(loose_child, Some(parent), false);

    world.update(1.0);

    assert!(!world.contains(parent));
    assert_eq!(world.parent(loose_child), None);
    assert_relative_eq!(world.world_position(loose_child).unwrap(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(
        translation_of(world.object(loose_child).unwrap().world_matrix()),
        Vec3::new(1.0, 0.0, 0.0),
        epsilon = 1e-6
    );
}

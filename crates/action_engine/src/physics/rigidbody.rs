//! Rigid-body properties and velocity helpers
//!
//! Bodies do not own their velocity; the owning scene object does. Every
//! helper here takes the velocity by mutable reference so the world can run
//! the passes without borrowing the whole object twice.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{safe_normalize, Vec3};

/// Squared speed below which a post-contact velocity is zeroed
const REST_SPEED_SQUARED: f32 = 1e-4;

/// Physical properties of a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rigidbody {
    enabled: bool,
    kinematic: bool,
    use_gravity: bool,
    drag: f32,
    mass: f32,
    bounciness: f32,
    friction: f32,
    max_speed: f32,
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self {
            enabled: true,
            kinematic: false,
            use_gravity: true,
            drag: 0.0,
            mass: 1.0,
            bounciness: 0.0,
            friction: 0.0,
            max_speed: -1.0,
        }
    }
}

impl Rigidbody {
    /// Create a body with default properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: kinematic flag
    pub fn with_kinematic(mut self, kinematic: bool) -> Self {
        self.set_kinematic(kinematic);
        self
    }

    /// Builder: gravity flag
    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.set_use_gravity(use_gravity);
        self
    }

    /// Builder: linear drag
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.set_drag(drag);
        self
    }

    /// Builder: mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    /// Builder: bounciness in [0, 1]
    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.set_bounciness(bounciness);
        self
    }

    /// Builder: friction in [0, 1]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.set_friction(friction);
        self
    }

    /// Builder: speed limit (negative for unlimited)
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.set_max_speed(max_speed);
        self
    }

    /// Whether the body takes part in simulation
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the body
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Kinematic bodies ignore forces and collision response
    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    /// Set the kinematic flag
    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    /// Whether gravity applies
    pub fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    /// Set whether gravity applies
    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }

    /// Linear drag coefficient
    pub fn drag(&self) -> f32 {
        self.drag
    }

    /// Set the drag coefficient (clamped to >= 0)
    pub fn set_drag(&mut self, drag: f32) {
        self.drag = drag.max(0.0);
    }

    /// Mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass (clamped to >= 0)
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(0.0);
    }

    /// Restitution in [0, 1]
    pub fn bounciness(&self) -> f32 {
        self.bounciness
    }

    /// Set the restitution (clamped to [0, 1])
    pub fn set_bounciness(&mut self, bounciness: f32) {
        self.bounciness = bounciness.clamp(0.0, 1.0);
    }

    /// Tangential damping in [0, 1]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Set the tangential damping (clamped to [0, 1])
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction.clamp(0.0, 1.0);
    }

    /// Speed limit; negative means unlimited
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Set the speed limit
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed;
    }

    /// Enabled and not kinematic
    pub fn is_simulated(&self) -> bool {
        self.enabled && !self.kinematic
    }

    /// `v += g * dt` for simulated bodies with gravity on
    pub fn apply_gravity(&self, velocity: &mut Vec3, dt: f32, gravity: &Vec3) {
        if !self.is_simulated() || !self.use_gravity {
            return;
        }
        *velocity += gravity * dt;
    }

    /// Implicit damping `v *= 1 / (1 + drag * dt)`
    pub fn apply_drag(&self, velocity: &mut Vec3, dt: f32) {
        if !self.is_simulated() || self.drag <= 0.0 {
            return;
        }
        *velocity *= 1.0 / (1.0 + self.drag * dt);
    }

    /// Rescale the velocity down to the speed limit
    pub fn clamp_velocity(&self, velocity: &mut Vec3) {
        if self.max_speed < 0.0 {
            return;
        }

        let speed_squared = velocity.magnitude_squared();
        if speed_squared > self.max_speed * self.max_speed {
            *velocity *= self.max_speed / speed_squared.sqrt();
        }
    }

    /// Bounce and friction against a contact normal pointing away from the surface
    pub fn respond_to_contact(&self, velocity: &mut Vec3, normal: &Vec3) {
        let Some(normal) = safe_normalize(normal) else {
            return;
        };

        let normal_speed = velocity.dot(&normal);
        if normal_speed < 0.0 {
            let normal_part = normal * normal_speed;
            let tangent_part = *velocity - normal_part;
            *velocity = tangent_part * (1.0 - self.friction) - normal_part * self.bounciness;
        }

        if velocity.magnitude_squared() < REST_SPEED_SQUARED {
            *velocity = Vec3::zeros();
        }

        self.clamp_velocity(velocity);
    }

    /// Translate by the full correction, then respond along its direction
    pub fn resolve_collision(&self, position: &mut Vec3, velocity: &mut Vec3, correction: &Vec3) {
        *position += correction;
        self.respond_to_contact(velocity, correction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gravity() -> Vec3 {
        Vec3::new(0.0, -9.8, 0.0)
    }

    #[test]
    fn test_defaults() {
        let body = Rigidbody::new();
        assert!(body.is_enabled());
        assert!(!body.is_kinematic());
        assert!(body.use_gravity());
        assert_relative_eq!(body.mass(), 1.0);
        assert_relative_eq!(body.drag(), 0.0);
        assert!(body.max_speed() < 0.0);
    }

    #[test]
    fn test_setters_clamp() {
        let body = Rigidbody::new()
            .with_bounciness(1.5)
            .with_friction(-0.2)
            .with_mass(-3.0)
            .with_drag(-1.0);

        assert_relative_eq!(body.bounciness(), 1.0);
        assert_relative_eq!(body.friction(), 0.0);
        assert_relative_eq!(body.mass(), 0.0);
        assert_relative_eq!(body.drag(), 0.0);
    }

    #[test]
    fn test_gravity_skipped_for_kinematic_and_disabled() {
        let mut velocity = Vec3::zeros();

        Rigidbody::new().with_kinematic(true).apply_gravity(&mut velocity, 1.0, &gravity());
        Rigidbody::new().with_gravity(false).apply_gravity(&mut velocity, 1.0, &gravity());
        let mut disabled = Rigidbody::new();
        disabled.set_enabled(false);
        disabled.apply_gravity(&mut velocity, 1.0, &gravity());

        assert_relative_eq!(velocity, Vec3::zeros());
    }

    #[test]
    fn test_drag_is_implicit_damping() {
        let body = Rigidbody::new().with_drag(1.0);
        let mut velocity = Vec3::new(4.0, 0.0, 0.0);
        body.apply_drag(&mut velocity, 1.0);
        assert_relative_eq!(velocity, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_clamp_velocity() {
        let body = Rigidbody::new().with_max_speed(5.0);
        let mut velocity = Vec3::new(6.0, 8.0, 0.0);
        body.clamp_velocity(&mut velocity);
        assert_relative_eq!(velocity, Vec3::new(3.0, 4.0, 0.0), epsilon = 1e-6);

        let mut zero = Vec3::zeros();
        body.clamp_velocity(&mut zero);
        assert_relative_eq!(zero, Vec3::zeros());
    }

    #[test]
    fn test_fall_then_bounce() {
        let body = Rigidbody::new().with_bounciness(0.5);
        let mut velocity = Vec3::zeros();

        for _ in 0..10 {
            body.apply_gravity(&mut velocity, 0.1, &gravity());
            body.apply_drag(&mut velocity, 0.1);
            body.clamp_velocity(&mut velocity);
        }
        assert_relative_eq!(velocity.y, -9.8, epsilon = 1e-4);

        let mut position = Vec3::zeros();
        body.resolve_collision(&mut position, &mut velocity, &Vec3::new(0.0, 0.1, 0.0));

        assert_relative_eq!(position, Vec3::new(0.0, 0.1, 0.0));
        assert_relative_eq!(velocity.y, 4.9, epsilon = 1e-4);
    }

    #[test]
    fn test_friction_damps_tangent() {
        let body = Rigidbody::new().with_friction(0.5);
        let mut velocity = Vec3::new(2.0, -1.0, 0.0);
        body.respond_to_contact(&mut velocity, &Vec3::new(0.0, 3.0, 0.0));
        assert_relative_eq!(velocity, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_separating_velocity_untouched() {
        let body = Rigidbody::new().with_bounciness(1.0).with_friction(1.0);
        let mut velocity = Vec3::new(1.0, 2.0, 0.0);
        body.respond_to_contact(&mut velocity, &Vec3::y());
        assert_relative_eq!(velocity, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_slow_contact_comes_to_rest() {
        let body = Rigidbody::new();
        let mut velocity = Vec3::new(0.005, -0.5, 0.0);
        body.respond_to_contact(&mut velocity, &Vec3::y());
        assert_relative_eq!(velocity, Vec3::zeros());
    }
}

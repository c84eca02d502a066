//! Physics sandbox
//!
//! Runs the world headless for a fixed number of frames: balls drop onto a
//! ground slab, a ship carries a turret across the arena and a pickup
//! vanishes on first touch. Contacts are logged as they happen and collider
//! outlines are collected every frame.
//!
//! Usage: `physics_sandbox [sandbox_app/sandbox.toml]`

use action_engine::prelude::*;

/// Logs collision callbacks for one object
struct ContactLogger {
    label: String,
    destroy_on_touch: bool,
    touches: u32,
}

impl ContactLogger {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            destroy_on_touch: false,
            touches: 0,
        }
    }

    fn pickup(label: &str) -> Self {
        Self {
            destroy_on_touch: true,
            ..Self::new(label)
        }
    }

    fn partner_name<'a>(other: &Contact<'a>) -> &'a str {
        other.object.map_or("<removed>", GameObject::name)
    }
}

impl Behaviour for ContactLogger {
    fn on_collision_enter(&mut self, ctx: &mut ObjectContext<'_>, other: Contact<'_>) {
        self.touches += 1;
        log::info!(
            "{} touched {} at {:?} (touch #{})",
            self.label,
            Self::partner_name(&other),
            ctx.position(),
            self.touches
        );
        if self.destroy_on_touch {
            log::info!("{} collected", self.label);
            ctx.destroy();
        }
    }

    fn on_collision_exit(&mut self, _ctx: &mut ObjectContext<'_>, other: Contact<'_>) {
        log::debug!("{} left {}", self.label, Self::partner_name(&other));
    }
}

/// Spins its object around the Y axis
struct Spinner {
    speed: f32,
}

impl Behaviour for Spinner {
    fn update(&mut self, ctx: &mut ObjectContext<'_>, dt: f32) {
        ctx.rotate(Vec3::new(0.0, self.speed * dt, 0.0));
    }
}

fn load_config() -> Result<SimulationConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load_from_file(&path),
        None => Ok(SimulationConfig::default()),
    }
}

fn build_scene(world: &mut World) {
    world.create_object(
        GameObject::new("ground")
            .with_position(Vec3::new(0.0, -0.5, 0.0))
            .with_collider(Collider::new_aabb(Vec3::new(40.0, 1.0, 40.0))),
    );

    for (i, bounciness) in [0.2_f32, 0.5, 0.8].into_iter().enumerate() {
        let x = i as f32 * 2.0 - 2.0;
        let name = format!("ball_{i}");
        world.create_object(
            GameObject::new(name.as_str())
                .with_position(Vec3::new(x, 4.0 + i as f32, 0.0))
                .with_collider(Collider::new_sphere(0.5))
                .with_rigidbody(Rigidbody::new().with_bounciness(bounciness).with_friction(0.1))
                .with_behaviour(ContactLogger::new(&name)),
        );
    }

    world.create_object(
        GameObject::new("crate")
            .with_position(Vec3::new(0.0, 6.0, 3.0))
            .with_rotation(Vec3::new(0.3, 0.4, 0.0))
            .with_collider(Collider::new_box(Vec3::new(1.0, 1.0, 1.0)))
            .with_rigidbody(Rigidbody::new().with_drag(0.2).with_max_speed(8.0))
            .with_behaviour(ContactLogger::new("crate")),
    );

    world.create_object(
        GameObject::new("platform")
            .with_position(Vec3::new(0.0, 0.5, 3.0))
            .with_collider(Collider::new_box(Vec3::new(3.0, 0.5, 3.0)))
            .with_rigidbody(Rigidbody::new().with_kinematic(true))
            .with_behaviour(Spinner { speed: 1.0 }),
    );

    world.create_object(
        GameObject::new("pillar")
            .with_position(Vec3::new(4.0, 1.5, 0.0))
            .with_collider(Collider::new_capsule(0.4, 3.0)),
    );

    let ship = world.create_object(
        GameObject::new("ship")
            .with_position(Vec3::new(-6.0, 1.0, -2.0))
            .with_velocity(Vec3::new(2.0, 0.0, 0.0))
            .with_collider(Collider::new_box(Vec3::new(2.0, 0.5, 1.0)))
            .with_behaviour(ContactLogger::new("ship")),
    );
    let turret = world.create_object(
        GameObject::new("turret")
            .with_position(Vec3::new(0.0, 0.75, 0.0))
            .with_collider(Collider::new_sphere(0.25))
            .with_behaviour(Spinner { speed: 2.0 }),
    );
    world.set_parent_transform_only(turret, Some(ship), false);

    world.create_object(
        GameObject::new("pickup")
            .with_position(Vec3::new(0.0, 1.0, -2.0))
            .with_collider(Collider::new_sphere(0.3))
            .with_behaviour(ContactLogger::pickup("pickup")),
    );
}

fn run(config: &SimulationConfig) {
    let mut world = World::with_config(&config.world);
    build_scene(&mut world);
    log::info!("Scene ready with {} objects", world.len());

    let mut debug_draw = DebugDrawSystem::new();
    let mut peak_contacts = 0;
    let mut outlines = 0;

    for frame in 0..config.frame_count {
        world.update(config.time_step);

        let contacts: usize = world.object_ids().map(|id| world.contacts_of(id).len()).sum::<usize>() / 2;
        peak_contacts = peak_contacts.max(contacts);

        debug_draw.update(config.time_step);
        world.draw_debug_primitives(&mut debug_draw);
        outlines += debug_draw.shape_count();

        if frame % 60 == 0 {
            log::debug!("Frame {}: {} objects, {} contacts", frame, world.len(), contacts);
        }
    }

    log::info!(
        "Simulated {} frames: {} objects remain, peak {} simultaneous contacts, {} outlines emitted",
        config.frame_count,
        world.len(),
        peak_contacts,
        outlines
    );
    for name in ["ball_0", "ball_1", "ball_2", "crate", "turret"] {
        if let Some(id) = world.find_by_name(name) {
            if let Some(position) = world.world_position(id) {
                log::info!("{} rests at {:?}", name, position);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    // RUST_LOG overrides the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();
    config.validate()?;

    log::info!("Starting physics sandbox");
    run(&config);
    log::info!("Physics sandbox completed successfully");
    Ok(())
}

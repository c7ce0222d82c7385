//! Marble arena demo application
//!
//! Drops a marble into a small triangle-mesh arena, lets the physics engine
//! settle it against the floor and a ramp, then probes the scene with ray
//! and sphere casts.

use phys_engine::collision::{Collider, TriangleMesh, Vertex};
use phys_engine::config::{Config, ConfigError, PhysicsConfig};
use phys_engine::foundation::math::{utils, Transform, Vec3};
use phys_engine::{GroundState, PhysicsEngine, RigidBody};
use thiserror::Error;

// Simulation constants
const FRAME_COUNT: usize = 120;
const LOG_INTERVAL: usize = 20; // Frames between progress reports

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to load physics configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Flat arena floor centered on the origin
fn ground_mesh() -> TriangleMesh {
    let normal = [0.0, 1.0, 0.0];
    TriangleMesh::new(vec![
        Vertex::new([-20.0, 0.0, -20.0], normal),
        Vertex::new([-20.0, 0.0, 20.0], normal),
        Vertex::new([20.0, 0.0, 20.0], normal),
        Vertex::new([-20.0, 0.0, -20.0], normal),
        Vertex::new([20.0, 0.0, 20.0], normal),
        Vertex::new([20.0, 0.0, -20.0], normal),
    ])
}

/// Ramp rising away from the arena center, shallow enough to count as ground
fn ramp_mesh() -> TriangleMesh {
    let normal = [0.0, 0.89443, -0.44721];
    TriangleMesh::new(vec![
        Vertex::new([-4.0, 0.0, 8.0], normal),
        Vertex::new([-4.0, 4.0, 16.0], normal),
        Vertex::new([4.0, 4.0, 16.0], normal),
        Vertex::new([-4.0, 0.0, 8.0], normal),
        Vertex::new([4.0, 4.0, 16.0], normal),
        Vertex::new([4.0, 0.0, 8.0], normal),
    ])
}

/// Wall panel in its local XY plane, facing +Z until placed by a transform
fn wall_mesh() -> TriangleMesh {
    let normal = [0.0, 0.0, 1.0];
    TriangleMesh::new(vec![
        Vertex::new([-6.0, 0.0, 0.0], normal),
        Vertex::new([6.0, 0.0, 0.0], normal),
        Vertex::new([6.0, 6.0, 0.0], normal),
        Vertex::new([-6.0, 0.0, 0.0], normal),
        Vertex::new([6.0, 6.0, 0.0], normal),
        Vertex::new([-6.0, 6.0, 0.0], normal),
    ])
}

/// Read a configuration file named on the command line, or fall back to the
/// defaults
fn load_config() -> Result<PhysicsConfig, DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading physics configuration from {}", path);
            PhysicsConfig::load_from_file(&path)?
        }
        None => PhysicsConfig::default(),
    };
    config.validate().map_err(DemoError::InvalidConfig)?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting marble arena demo");

    let config = load_config()?;
    let engine = PhysicsEngine::from_config(&config);

    // Static scene: a floor, a walkable ramp, and a rotated wall behind the
    // arena center
    let ground = ground_mesh();
    let ramp = ramp_mesh();
    let wall = wall_mesh();
    let ground_transform = Transform::identity();
    let ramp_transform = Transform::identity();
    let wall_transform = Transform::from_position_euler_deg(
        Vec3::new(0.0, 0.0, -10.0),
        Vec3::new(0.0, 15.0, 0.0),
    );
    let colliders = [
        Collider::new(&ground, &ground_transform),
        Collider::new(&ramp, &ramp_transform),
        Collider::new(&wall, &wall_transform),
    ];

    // The marble falls from above the floor while drifting toward the ramp
    let mut marble = RigidBody::from_position(Vec3::new(0.0, 6.0, 0.0))
        .with_velocity(Vec3::new(0.0, 0.0, 2.5));
    let mut ground_state = GroundState::default();

    for frame in 0..FRAME_COUNT {
        engine.step_fixed(&mut [&mut marble]);
        engine.resolve_player_collisions(
            &mut marble,
            config.player_radius,
            &colliders,
            &mut ground_state,
        );

        // Sliding contact: keep the velocity tangent to whatever we stand on
        if ground_state.grounded {
            marble.velocity = utils::project_on_plane(marble.velocity, ground_state.normal);
        }

        if frame % LOG_INTERVAL == 0 {
            log::info!(
                "frame {:3}: position {:?}, grounded {}",
                frame,
                marble.position(),
                ground_state.grounded
            );
        }
    }

    // Probe straight down from above the marble for the surface beneath it
    let probe_origin = marble.position() + Vec3::new(0.0, 10.0, 0.0);
    match engine.raycast(probe_origin, Vec3::new(0.0, -1.0, 0.0), 50.0, &colliders) {
        Some(hit) => log::info!(
            "surface below the marble: point {:?}, distance {:.2}",
            hit.point,
            hit.distance
        ),
        None => log::warn!("no surface below the marble"),
    }

    // A sphere the size of the marble swept backward reaches the wall
    match engine.spherecast(
        Vec3::new(0.0, 1.0, 0.0),
        config.player_radius,
        Vec3::new(0.0, 0.0, -1.0),
        50.0,
        &colliders,
    ) {
        Some(hit) => log::info!(
            "rear wall: point {:?}, distance {:.2}",
            hit.point,
            hit.distance
        ),
        None => log::warn!("rear wall probe missed"),
    }

    log::info!(
        "Demo finished: position {:?}, grounded {}",
        marble.position(),
        ground_state.grounded
    );
    Ok(())
}

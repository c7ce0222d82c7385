//! # Phys Engine
//!
//! A small fixed-timestep physics and collision library for 3D games.
//!
//! ## Features
//!
//! - **Explicit Euler Integration**: gravity and applied forces over a fixed timestep
//! - **Sphere Resolution**: push-out of a player sphere from triangle meshes
//! - **Ray and Sphere Casts**: Möller-Trumbore queries over whole collider sets
//! - **Ground Classification**: gravity-relative reporting of walkable surfaces
//! - **File Configuration**: TOML and RON tuning profiles
//!
//! ## Quick Start
//!
//! ```rust
//! use phys_engine::prelude::*;
//!
//! // One large floor triangle with its face pointing up
//! let mesh = TriangleMesh::new(vec![
//!     Vertex::new([-100.0, 0.0, -100.0], [0.0, 1.0, 0.0]),
//!     Vertex::new([0.0, 0.0, 100.0], [0.0, 1.0, 0.0]),
//!     Vertex::new([100.0, 0.0, -100.0], [0.0, 1.0, 0.0]),
//! ]);
//! let floor = Transform::identity();
//! let colliders = [Collider::new(&mesh, &floor)];
//!
//! let engine = PhysicsEngine::default();
//! let mut player = RigidBody::from_position(Vec3::new(0.0, 0.5, 0.0));
//! let mut ground = GroundState::default();
//!
//! // Half sunk into the floor, the player sphere gets pushed up to rest
//! engine.resolve_player_collisions(&mut player, 1.0, &colliders, &mut ground);
//! assert!(ground.grounded);
//! assert!((player.position().y - 1.0).abs() < 1e-5);
//!
//! // World queries run against the same collider set
//! let hit = engine
//!     .raycast(
//!         Vec3::new(0.0, 5.0, 0.0),
//!         Vec3::new(0.0, -1.0, 0.0),
//!         100.0,
//!         &colliders,
//!     )
//!     .unwrap();
//! assert!((hit.distance - 5.0).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod body;
pub mod collision;
pub mod config;
pub mod foundation;

mod engine;

pub use body::{GroundState, RigidBody};
pub use config::{Config, ConfigError, PhysicsConfig};
pub use engine::PhysicsEngine;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        body::{GroundState, RigidBody},
        collision::{
            Collider, PhysicsTriangle, Ray, RayHit, SphereContact, TriangleMesh, Vertex,
        },
        config::{Config, ConfigError, PhysicsConfig},
        engine::PhysicsEngine,
        foundation::math::{Quat, Transform, Vec3},
    };
}

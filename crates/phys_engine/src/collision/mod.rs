//! Collision detection for sphere-versus-mesh gameplay
//!
//! The narrow phase works on transient [`PhysicsTriangle`]s rebuilt from
//! [`TriangleMesh`] data for every query; [`Collider`] pairs a mesh with its
//! world transform.

pub mod mesh;
pub mod primitives;

pub use mesh::{Collider, TriangleMesh, Vertex};
pub use primitives::{PhysicsTriangle, Ray, RayHit, SphereContact};

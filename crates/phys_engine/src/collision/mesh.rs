//! Collision meshes and static colliders
//!
//! Meshes own triangle-list vertex data in local space; colliders pair a
//! borrowed mesh with a world transform and hand the engine freshly
//! transformed triangles.

use bytemuck::{Pod, Zeroable};

use super::primitives::PhysicsTriangle;
use crate::foundation::math::{Transform, Vec3};

/// A mesh vertex: position plus an authored surface normal.
///
/// The layout matches the interleaved six-float buffers asset pipelines
/// produce, so vertex data can be reinterpreted without copying. Collision
/// tests recompute face normals from winding and ignore the authored ones.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in the mesh's local space
    pub position: [f32; 3],
    /// Authored surface normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Triangle-list collision mesh in local space.
///
/// Every three consecutive vertices form one triangle; trailing vertices
/// that do not complete a triple are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    vertices: Vec<Vertex>,
}

impl TriangleMesh {
    /// Creates a mesh from a triangle list
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Reinterprets a flat buffer of six floats per vertex (position, then
    /// normal) as a mesh.
    ///
    /// Returns `None` when the length is not a whole number of vertices.
    pub fn from_interleaved(buffer: &[f32]) -> Option<Self> {
        let vertices: &[Vertex] = bytemuck::try_cast_slice(buffer).ok()?;
        Some(Self {
            vertices: vertices.to_vec(),
        })
    }

    /// The vertex list
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Whether the mesh holds no complete triangle
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Iterate the mesh's triangles in local space.
    ///
    /// Triangles are rebuilt on every call; nothing is cached.
    pub fn triangles(&self) -> impl Iterator<Item = PhysicsTriangle> + '_ {
        self.vertices.chunks_exact(3).map(|v| {
            PhysicsTriangle::new(
                Vec3::from(v[0].position),
                Vec3::from(v[1].position),
                Vec3::from(v[2].position),
            )
        })
    }
}

/// A static world obstacle: a collision mesh placed by a transform.
///
/// Colliders borrow their mesh and transform from the game's scene data.
/// Only the rigid part of the transform applies; scale is ignored.
#[derive(Debug, Clone, Copy)]
pub struct Collider<'a> {
    /// Local-space collision geometry
    pub mesh: &'a TriangleMesh,
    /// World placement of the mesh
    pub transform: &'a Transform,
}

impl<'a> Collider<'a> {
    /// Creates a collider from a borrowed mesh and transform
    pub fn new(mesh: &'a TriangleMesh, transform: &'a Transform) -> Self {
        Self { mesh, transform }
    }

    /// Iterate the collider's triangles in world space
    pub fn world_triangles(&self) -> impl Iterator<Item = PhysicsTriangle> + 'a {
        let mesh = self.mesh;
        let rotation = self.transform.rotation;
        let translation = self.transform.position;
        mesh.triangles().map(move |mut triangle| {
            triangle.transform(rotation, translation);
            triangle
        })
    }
}

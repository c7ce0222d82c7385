//! The physics engine: integration, player collision resolution, and world
//! queries
//!
//! The engine holds tuning values only. All simulation state lives in the
//! bodies, colliders, and ground sinks the caller passes in, so queries can
//! run against any collider set at any time.

use crate::body::{GroundState, RigidBody};
use crate::collision::{Collider, Ray, RayHit};
use crate::config::PhysicsConfig;
use crate::foundation::math::Vec3;

/// Shortest direction vector accepted by the cast queries
const MIN_DIRECTION: f32 = 1e-6;

/// Fixed-timestep physics over caller-owned bodies and colliders.
///
/// Every triangle of every collider is tested per query; collider sets are
/// expected to stay small.
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    gravity: Vec3,
    fixed_timestep: f32,
    triangle_extrusion: f32,
    ground_normal_threshold: f32,
    ray_epsilon: f32,
}

impl PhysicsEngine {
    /// Creates an engine with the given gravity and fixed timestep; the
    /// narrow-phase tuning starts from the defaults.
    pub fn new(gravity: Vec3, fixed_timestep: f32) -> Self {
        Self {
            gravity,
            fixed_timestep,
            ..Self::default()
        }
    }

    /// Creates an engine from a configuration.
    ///
    /// `config.player_radius` stays with the host; it is passed per call to
    /// [`resolve_player_collisions`](Self::resolve_player_collisions).
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity,
            fixed_timestep: config.fixed_timestep,
            triangle_extrusion: config.triangle_extrusion,
            ground_normal_threshold: config.ground_normal_threshold,
            ray_epsilon: config.ray_epsilon,
        }
    }

    /// Current gravity acceleration
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Set the gravity acceleration
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Timestep used by [`step_fixed`](Self::step_fixed)
    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Set the fixed timestep
    pub fn set_fixed_timestep(&mut self, fixed_timestep: f32) {
        self.fixed_timestep = fixed_timestep;
    }

    /// Advance every body by one explicit Euler step.
    ///
    /// Gravity joins the accumulated force first, then velocity and position
    /// integrate and the force accumulator clears.
    pub fn step(&self, bodies: &mut [&mut RigidBody], dt: f32) {
        for body in bodies.iter_mut() {
            if body.apply_gravity {
                body.force += self.gravity;
            }
            body.velocity += body.force * dt;
            body.transform.position += body.velocity * dt;
            body.force = Vec3::zeros();
        }
    }

    /// Advance every body by the configured fixed timestep
    pub fn step_fixed(&self, bodies: &mut [&mut RigidBody]) {
        self.step(bodies, self.fixed_timestep);
    }

    /// Push a sphere-shaped body out of every triangle it penetrates and
    /// classify ground contact into `ground`.
    ///
    /// The ground state is reset first, so it reflects only this pass. The
    /// sphere center is sampled once up front: corrections accumulate on the
    /// body without re-testing, and when several triangles qualify as ground
    /// the last one tested wins. Triangles are extruded for the contact test
    /// and back faces are skipped.
    pub fn resolve_player_collisions(
        &self,
        body: &mut RigidBody,
        sphere_radius: f32,
        colliders: &[Collider<'_>],
        ground: &mut GroundState,
    ) {
        ground.reset();

        let sphere_center = body.transform.position;
        let gravity_up = (-self.gravity).try_normalize(MIN_DIRECTION);

        for collider in colliders {
            for mut triangle in collider.world_triangles() {
                triangle.extrude(self.triangle_extrusion);

                if !triangle.faces_point(sphere_center) {
                    continue;
                }
                if let Some(contact) = triangle.intersect_sphere(sphere_center, sphere_radius) {
                    log::trace!(
                        "player contact: penetration {:.5}, normal {:?}",
                        contact.penetration,
                        contact.normal
                    );
                    body.transform.position += contact.normal * contact.penetration;

                    if let Some(up) = gravity_up {
                        if triangle.normal.dot(&up) > self.ground_normal_threshold {
                            ground.grounded = true;
                            ground.normal = triangle.normal;
                        }
                    }
                }
            }
        }
    }

    /// Cast a ray against every collider and return the closest hit within
    /// `max_distance`.
    ///
    /// Returns `None` for a zero direction. The reported normal is the face
    /// normal of the hit triangle, whichever side the ray came from.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        colliders: &[Collider<'_>],
    ) -> Option<RayHit> {
        let ray = Ray::new(origin, direction)?;

        let mut closest = max_distance;
        let mut hit = None;

        for collider in colliders {
            for triangle in collider.world_triangles() {
                if let Some((t, _u, _v)) = triangle.intersect_ray(&ray, self.ray_epsilon) {
                    if t < closest {
                        closest = t;
                        hit = Some(RayHit {
                            distance: t,
                            point: ray.point_at(t),
                            normal: triangle.normal,
                        });
                    }
                }
            }
        }

        hit
    }

    /// Approximate spherecast: a centerline raycast whose hit is pulled back
    /// along the ray by the sphere radius.
    ///
    /// Surfaces the sphere would graze off-center are not caught, and the
    /// reported distance goes negative when the surface starts inside the
    /// sphere.
    pub fn spherecast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        colliders: &[Collider<'_>],
    ) -> Option<RayHit> {
        let direction = direction.try_normalize(MIN_DIRECTION)?;
        let mut hit = self.raycast(origin, direction, max_distance, colliders)?;

        hit.point -= direction * radius;
        hit.distance -= radius;
        Some(hit)
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}

//! Rigid body state and ground contact tracking
//!
//! Bodies are plain data: the integrator and the collision resolver mutate
//! them in place, and game code reads or writes the fields directly.

use crate::foundation::math::{Transform, Vec3};

/// A point mass with an owned world transform.
///
/// Forces accumulate between steps through [`apply_force`](Self::apply_force)
/// and are cleared by the integrator at the end of each step.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// World transform; the integrator advances `transform.position`
    pub transform: Transform,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Force accumulated for the next integration step
    pub force: Vec3,

    /// Mass of the body. The integrator treats force as acceleration, so this
    /// is bookkeeping for game code.
    pub mass: f32,

    /// Whether gravity joins the accumulated force each step
    pub apply_gravity: bool,
}

impl RigidBody {
    /// Create a body at rest with unit mass and gravity enabled
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            mass: 1.0,
            apply_gravity: true,
        }
    }

    /// Create a body at rest at a world position
    pub fn from_position(position: Vec3) -> Self {
        Self::new(Transform::from_position(position))
    }

    /// Enable or disable gravity for this body
    pub fn with_gravity(mut self, apply_gravity: bool) -> Self {
        self.apply_gravity = apply_gravity;
        self
    }

    /// Give the body an initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Accumulate a force for the next integration step
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// World position shorthand
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(Transform::identity())
    }
}

/// Ground contact produced by player collision resolution.
///
/// The resolver resets this at the start of every pass; when several
/// triangles qualify as ground in one pass, the last one tested wins.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundState {
    /// True when the body stands on a walkable surface
    pub grounded: bool,

    /// Unit normal of the walkable surface; `+Y` when not grounded
    pub normal: Vec3,
}

impl GroundState {
    /// Clear the contact back to airborne with an upright normal
    pub fn reset(&mut self) {
        self.grounded = false;
        self.normal = Vec3::y();
    }
}

impl Default for GroundState {
    fn default() -> Self {
        Self {
            grounded: false,
            normal: Vec3::y(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigid_body_defaults() {
        let body = RigidBody::default();

        assert_eq!(body.velocity, Vec3::zeros());
        assert_eq!(body.force, Vec3::zeros());
        assert_eq!(body.mass, 1.0);
        assert!(body.apply_gravity);
        assert_eq!(body.position(), Vec3::zeros());
    }

    #[test]
    fn test_builders_set_state() {
        let body = RigidBody::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_velocity(Vec3::new(0.0, 0.0, 4.0))
            .with_mass(2.5)
            .with_gravity(false);

        assert_eq!(body.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.velocity, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(body.mass, 2.5);
        assert!(!body.apply_gravity);
    }

    #[test]
    fn test_apply_force_accumulates() {
        let mut body = RigidBody::default();

        body.apply_force(Vec3::new(1.0, 0.0, 0.0));
        body.apply_force(Vec3::new(0.0, 2.0, 0.0));

        assert_eq!(body.force, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_ground_state_reset() {
        let mut ground = GroundState {
            grounded: true,
            normal: Vec3::new(1.0, 0.0, 0.0),
        };

        ground.reset();

        assert_eq!(ground, GroundState::default());
        assert!(!ground.grounded);
        assert_eq!(ground.normal, Vec3::y());
    }
}

//! Math utilities and types
//!
//! Provides fundamental math types for 3D physics and game development.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform from a position and XYZ Euler angles in degrees
    pub fn from_position_euler_deg(position: Vec3, euler_deg: Vec3) -> Self {
        let rotation = Quat::from_euler_angles(
            utils::deg_to_rad(euler_deg.x),
            utils::deg_to_rad(euler_deg.y),
            utils::deg_to_rad(euler_deg.z),
        );
        Self::from_position_rotation(position, rotation)
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Remove from `v` the component along the plane normal `n`.
    ///
    /// The normal does not need to be unit length. Returns `v` unchanged when
    /// the normal is too short to define a plane.
    pub fn project_on_plane(v: Vec3, n: Vec3) -> Vec3 {
        let len_sq = n.magnitude_squared();
        if len_sq <= f32::EPSILON {
            return v;
        }
        v - n * (v.dot(&n) / len_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_defaults_to_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_eq!(transform.rotation, Quat::identity());
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_euler_constructor_rotates_about_y() {
        let transform =
            Transform::from_position_euler_deg(Vec3::zeros(), Vec3::new(0.0, 90.0, 0.0));

        let rotated = transform.rotation * Vec3::x();
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_to_matrix_combines_scale_and_translation() {
        let mut transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        transform.scale = Vec3::new(2.0, 2.0, 2.0);

        let point = transform.to_matrix() * nalgebra::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(
            point,
            nalgebra::Vector4::new(3.0, 2.0, 3.0, 1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_project_on_plane_removes_normal_component() {
        let projected = utils::project_on_plane(Vec3::new(1.0, 2.0, 3.0), Vec3::y());
        assert_relative_eq!(projected, Vec3::new(1.0, 0.0, 3.0), epsilon = 1e-6);

        // Non-unit normals give the same plane
        let scaled = utils::project_on_plane(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 4.0, 0.0));
        assert_relative_eq!(scaled, projected, epsilon = 1e-6);
    }

    #[test]
    fn test_project_on_plane_keeps_vector_for_zero_normal() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(utils::project_on_plane(v, Vec3::zeros()), v);
    }
}

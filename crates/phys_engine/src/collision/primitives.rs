//! Primitive collision shapes and intersection algorithms
//!
//! Provides the narrow-phase geometry: rays and the transient triangles the
//! engine rebuilds from collision meshes for every query.

use crate::foundation::math::{Quat, Vec3};

/// Shortest vector length treated as normalizable
const MIN_LENGTH: f32 = 1e-6;

/// Degeneracy cutoff for the barycentric denominator, which scales with the
/// fourth power of edge length
const MIN_BARY_DENOM: f32 = 1e-12;

/// A ray for raycasting queries
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (always normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction.
    ///
    /// Returns `None` when the direction is too short to normalize.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize(MIN_LENGTH)?;
        Some(Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a raycast or spherecast
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The face normal of the triangle that was hit
    pub normal: Vec3,
}

/// Result of a sphere-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct SphereContact {
    /// Contact normal pointing from the triangle toward the sphere center
    pub normal: Vec3,
    /// Depth the sphere sinks past the triangle plane
    pub penetration: f32,
}

/// A triangle carrying its face normal and centroid.
///
/// Triangles are transient: the engine rebuilds them from mesh vertices for
/// every query rather than caching world-space geometry.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsTriangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
    /// Unit face normal by the right-hand rule; zero when the triangle is
    /// degenerate
    pub normal: Vec3,
    /// Centroid of the three vertices
    pub center: Vec3,
}

impl PhysicsTriangle {
    /// Creates a triangle from three vertices, computing normal and centroid
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(MIN_LENGTH)
            .unwrap_or_else(Vec3::zeros);
        Self {
            v0,
            v1,
            v2,
            normal,
            center: (v0 + v1 + v2) / 3.0,
        }
    }

    /// Rigidly place the triangle in the world: rotate the vertices and the
    /// normal about the origin, translate the vertices, and recompute the
    /// centroid. Scale is not applied; collision geometry is authored at
    /// world size.
    pub fn transform(&mut self, rotation: Quat, translation: Vec3) {
        self.v0 = rotation * self.v0 + translation;
        self.v1 = rotation * self.v1 + translation;
        self.v2 = rotation * self.v2 + translation;
        self.normal = rotation * self.normal;
        self.center = (self.v0 + self.v1 + self.v2) / 3.0;
    }

    /// Scale the vertices away from the centroid. The normal and the centroid
    /// are unchanged.
    pub fn extrude(&mut self, factor: f32) {
        self.v0 = (self.v0 - self.center) * factor + self.center;
        self.v1 = (self.v1 - self.center) * factor + self.center;
        self.v2 = (self.v2 - self.center) * factor + self.center;
    }

    /// Whether the front face points toward the given point.
    ///
    /// Points on the triangle plane and degenerate triangles face nothing.
    pub fn faces_point(&self, point: Vec3) -> bool {
        match (point - self.center).try_normalize(MIN_LENGTH) {
            Some(to_point) => self.normal.dot(&to_point) > 0.0,
            None => false,
        }
    }

    /// Barycentric weights of a point with respect to `(v0, v1, v2)`, solved
    /// from the edge dot products.
    ///
    /// The point is expected to lie on the triangle plane. Returns `None`
    /// when the triangle is degenerate.
    pub fn barycentric(&self, point: Vec3) -> Option<Vec3> {
        let edge0 = self.v2 - self.v0;
        let edge1 = self.v1 - self.v0;
        let to_point = point - self.v0;

        let dot00 = edge0.dot(&edge0);
        let dot01 = edge0.dot(&edge1);
        let dot02 = edge0.dot(&to_point);
        let dot11 = edge1.dot(&edge1);
        let dot12 = edge1.dot(&to_point);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom.abs() < MIN_BARY_DENOM {
            return None;
        }
        let inv_denom = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
        let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

        Some(Vec3::new(1.0 - u - v, v, u))
    }

    /// Whether a point on the triangle plane lies within the triangle,
    /// edges included
    pub fn contains_projected(&self, point: Vec3) -> bool {
        self.barycentric(point)
            .map_or(false, |bary| bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0)
    }

    /// Test a sphere against the triangle.
    ///
    /// The sphere collides when its center projects inside the triangle and
    /// sits within `radius` of the plane. The contact normal is the face
    /// normal flipped toward the sphere center.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<SphereContact> {
        let distance = self.normal.dot(&(center - self.center));
        let projected = center - self.normal * distance;

        if !self.contains_projected(projected) {
            return None;
        }
        if distance.abs() > radius {
            return None;
        }

        let normal = if distance < 0.0 { -self.normal } else { self.normal };
        Some(SphereContact {
            normal,
            penetration: radius - distance.abs(),
        })
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Returns `(t, u, v)` with the hit distance and barycentric coordinates.
    /// Near-parallel rays and hits closer than `epsilon` along the ray are
    /// misses; both sides of the triangle can be hit.
    pub fn intersect_ray(&self, ray: &Ray, epsilon: f32) -> Option<(f32, f32, f32)> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to the triangle plane?
        if a.abs() < epsilon {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t > epsilon {
            Some((t, u, v))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RAY_EPSILON: f32 = 1e-5;

    fn unit_triangle() -> PhysicsTriangle {
        PhysicsTriangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    fn floor_triangle() -> PhysicsTriangle {
        PhysicsTriangle::new(
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, -10.0),
        )
    }

    #[test]
    fn test_normal_and_centroid() {
        let triangle = unit_triangle();

        assert_relative_eq!(triangle.normal, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(
            triangle.center,
            Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        let collinear = PhysicsTriangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );

        assert_eq!(collinear.normal, Vec3::zeros());
        assert!(collinear.barycentric(Vec3::new(0.5, 0.0, 0.0)).is_none());
        assert!(collinear
            .intersect_sphere(Vec3::new(0.5, 0.1, 0.0), 1.0)
            .is_none());
        assert!(!collinear.faces_point(Vec3::new(0.5, 1.0, 0.0)));
    }

    #[test]
    fn test_transform_moves_vertices_and_normal() {
        let mut triangle = unit_triangle();
        let rotation = Quat::from_axis_angle(&Vec3::x_axis(), std::f32::consts::FRAC_PI_2);

        triangle.transform(rotation, Vec3::new(0.0, 5.0, 0.0));

        // +Z normal rotates onto -Y, vertices follow and the centroid is
        // recomputed from the moved vertices
        assert_relative_eq!(triangle.normal, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(triangle.v0, Vec3::new(0.0, 5.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(triangle.v1, Vec3::new(1.0, 5.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(triangle.v2, Vec3::new(0.0, 5.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(
            triangle.center,
            Vec3::new(1.0 / 3.0, 5.0, 1.0 / 3.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_extrude_keeps_centroid_and_normal() {
        let mut triangle = floor_triangle();
        let center = triangle.center;
        let normal = triangle.normal;
        let reach = (triangle.v0 - center).magnitude();

        triangle.extrude(1.3);

        assert_relative_eq!(triangle.center, center, epsilon = 1e-4);
        assert_relative_eq!(triangle.normal, normal, epsilon = 1e-6);
        assert_relative_eq!(
            (triangle.v0 - center).magnitude(),
            reach * 1.3,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_barycentric_weights() {
        let triangle = unit_triangle();

        let at_center = triangle.barycentric(triangle.center).unwrap();
        assert_relative_eq!(
            at_center,
            Vec3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            epsilon = 1e-5
        );

        let at_v2 = triangle.barycentric(triangle.v2).unwrap();
        assert_relative_eq!(at_v2, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_contains_projected_inside_and_out() {
        let triangle = unit_triangle();

        assert!(triangle.contains_projected(triangle.center));
        assert!(triangle.contains_projected(triangle.v0));
        // Hypotenuse midpoint counts as inside
        assert!(triangle.contains_projected(Vec3::new(0.5, 0.5, 0.0)));
        assert!(!triangle.contains_projected(Vec3::new(0.6, 0.6, 0.0)));
        assert!(!triangle.contains_projected(Vec3::new(-0.1, 0.5, 0.0)));
    }

    #[test]
    fn test_sphere_contact_above_plane() {
        let triangle = floor_triangle();

        let contact = triangle
            .intersect_sphere(Vec3::new(0.0, 0.5, 0.0), 1.0)
            .unwrap();

        assert_relative_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(contact.penetration, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_contact_below_plane_flips_normal() {
        let triangle = floor_triangle();

        let contact = triangle
            .intersect_sphere(Vec3::new(0.0, -0.5, 0.0), 1.0)
            .unwrap();

        assert_relative_eq!(contact.normal, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(contact.penetration, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_misses() {
        let triangle = floor_triangle();

        // Too far from the plane
        assert!(triangle
            .intersect_sphere(Vec3::new(0.0, 2.0, 0.0), 1.0)
            .is_none());
        // Close to the plane but projecting outside the triangle
        assert!(triangle
            .intersect_sphere(Vec3::new(50.0, 0.1, 50.0), 1.0)
            .is_none());
    }

    #[test]
    fn test_faces_point_one_sided() {
        let triangle = floor_triangle();

        assert!(triangle.faces_point(Vec3::new(0.0, 1.0, 0.0)));
        assert!(!triangle.faces_point(Vec3::new(0.0, -1.0, 0.0)));
        // A point at the centroid has no direction to face
        assert!(!triangle.faces_point(triangle.center));
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, -3.0, 0.0)).unwrap();

        assert_relative_eq!(ray.direction, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(ray.point_at(2.0), Vec3::new(0.0, -2.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        assert!(Ray::new(Vec3::zeros(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_ray_hits_triangle() {
        let triangle = floor_triangle();
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();

        let (t, u, v) = triangle.intersect_ray(&ray, RAY_EPSILON).unwrap();

        assert_relative_eq!(t, 5.0, epsilon = 1e-4);
        assert!(u >= 0.0 && v >= 0.0 && u + v <= 1.0);
    }

    #[test]
    fn test_ray_hits_back_face_too() {
        let triangle = floor_triangle();
        let ray = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();

        let (t, _u, _v) = triangle.intersect_ray(&ray, RAY_EPSILON).unwrap();
        assert_relative_eq!(t, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ray_misses() {
        let triangle = floor_triangle();

        // Parallel to the plane
        let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(triangle.intersect_ray(&parallel, RAY_EPSILON).is_none());

        // Triangle behind the origin
        let away = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(triangle.intersect_ray(&away, RAY_EPSILON).is_none());

        // Outside the triangle bounds
        let wide = Ray::new(Vec3::new(50.0, 5.0, 50.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        assert!(triangle.intersect_ray(&wide, RAY_EPSILON).is_none());
    }
}

//! Mesh-level geometric helpers using nalgebra
//!
//! This module provides the low-level operations the fit checker and the
//! scene adapter are built from:
//! - Local bounding box calculation
//! - Expansion of a box into its 8 corners
//! - Affine transformation of points
//! - Baking a scale factor into mesh vertices

use crate::model::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};

/// An axis-aligned bounding box represented as (min_point, max_point)
pub type BoundingBox = (Point3<f64>, Point3<f64>);

/// Compute the local axis-aligned bounding box of a mesh
///
/// Unlike a full triangle-mesh AABB this only looks at vertices, so a mesh
/// without triangles (a point cloud or a loose edge) still has bounds.
///
/// # Returns
/// `None` if the mesh has no vertices
pub fn compute_mesh_aabb(mesh: &Mesh) -> Option<BoundingBox> {
    let first = mesh.vertices.first()?;
    let mut min = Point3::new(first.x, first.y, first.z);
    let mut max = min;

    for v in &mesh.vertices[1..] {
        min.x = min.x.min(v.x);
        min.y = min.y.min(v.y);
        min.z = min.z.min(v.z);
        max.x = max.x.max(v.x);
        max.y = max.y.max(v.y);
        max.z = max.z.max(v.z);
    }

    Some((min, max))
}

/// Expand a bounding box into its 8 corner points
///
/// Corners are ordered the way the host reports an object's bound box:
/// the four `min.x` corners first, walking `(y, z)` as
/// `(min, min) (min, max) (max, max) (max, min)`, then the same four
/// at `max.x`.
pub fn bound_box_corners(min: &Point3<f64>, max: &Point3<f64>) -> [Point3<f64>; 8] {
    [
        Point3::new(min.x, min.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(min.x, max.y, max.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(max.x, max.y, min.z),
    ]
}

/// Local bound box corners of a mesh
///
/// An empty mesh reports all 8 corners at the local origin, matching what
/// the host reports for objects without geometry.
pub fn mesh_corners(mesh: &Mesh) -> [Point3<f64>; 8] {
    match compute_mesh_aabb(mesh) {
        Some((min, max)) => bound_box_corners(&min, &max),
        None => [Point3::origin(); 8],
    }
}

/// Apply a 4x4 affine transformation matrix to a point
///
/// # Arguments
/// * `point` - The point to transform
/// * `transform` - Column-vector convention, translation in the last column
pub fn apply_transform(point: &Point3<f64>, transform: &Matrix4<f64>) -> Point3<f64> {
    transform.transform_point(point)
}

/// Compute the bounding box of a set of corners after transforming them
///
/// # Returns
/// A tuple of (min_point, max_point) enclosing every transformed corner
pub fn compute_transformed_aabb(
    corners: &[Point3<f64>; 8],
    transform: &Matrix4<f64>,
) -> BoundingBox {
    let first = apply_transform(&corners[0], transform);
    let mut result_min = first;
    let mut result_max = first;

    for corner in &corners[1..] {
        let p = apply_transform(corner, transform);
        result_min = result_min.inf(&p);
        result_max = result_max.sup(&p);
    }

    (result_min, result_max)
}

/// Size of the local bounding box of a mesh (zero for an empty mesh)
pub fn mesh_extent(mesh: &Mesh) -> Vector3<f64> {
    compute_mesh_aabb(mesh)
        .map(|(min, max)| max - min)
        .unwrap_or_else(Vector3::zeros)
}

/// Multiply every vertex of a mesh component-wise by `scale`
///
/// Used to bake an object's scale into its geometry.
pub fn scale_mesh(mesh: &mut Mesh, scale: &Vector3<f64>) {
    for v in &mut mesh.vertices {
        v.x *= scale.x;
        v.y *= scale.y;
        v.z *= scale.z;
    }
}

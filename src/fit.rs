//! Bounding-volume fit checking
//!
//! Computes world-space axis-aligned bounding boxes of mesh objects, checks
//! them against a printer's build volume, and computes the translation that
//! centers an object on the build plate.
//!
//! Everything here is a pure function of its inputs. Applying a translation
//! to a scene object is left to the caller.
//!
//! # Example
//!
//! ```
//! use bambu3mf::fit::{self, PlacedCorners};
//! use bambu3mf::{PresetTable, PrinterModel};
//! use nalgebra::{Matrix4, Point3, Vector3};
//!
//! # fn main() -> bambu3mf::Result<()> {
//! let part = PlacedCorners::from_extent(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 20.0, 30.0),
//!     Matrix4::new_translation(&Vector3::new(5.0, 5.0, 0.0)),
//! );
//! let volume = PresetTable::bambu_lab().volume(PrinterModel::A1Mini);
//!
//! let aabb = fit::compute_world_aabb([&part])?;
//! assert!(fit::fits_within(&aabb, &volume));
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::mesh_ops::{bound_box_corners, compute_transformed_aabb};
use crate::printer::BuildVolume;
use nalgebra::{Matrix4, Point3, Vector3};
use tracing::debug;

/// Translation to add to an object's location
pub type Translation = Vector3<f64>;

/// Read-only view of a scene object as seen by the fit checker
///
/// Implement this for the host's object type. The checker never mutates
/// objects through it.
pub trait MeshObject {
    /// Whether the object carries mesh geometry
    ///
    /// Non-mesh objects are skipped by [`compute_world_aabb`].
    fn is_mesh(&self) -> bool {
        true
    }

    /// The 8 corners of the object's local bounding box
    fn local_corners(&self) -> [Point3<f64>; 8];

    /// Object-to-world transform
    fn world_transform(&self) -> Matrix4<f64>;
}

impl<T: MeshObject + ?Sized> MeshObject for &T {
    fn is_mesh(&self) -> bool {
        (**self).is_mesh()
    }

    fn local_corners(&self) -> [Point3<f64>; 8] {
        (**self).local_corners()
    }

    fn world_transform(&self) -> Matrix4<f64> {
        (**self).world_transform()
    }
}

/// Fixed corners with a transform
///
/// The minimal [`MeshObject`] for hosts that already expose bounding box
/// corners and a world matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCorners {
    /// Local corners
    pub corners: [Point3<f64>; 8],
    /// Object-to-world transform
    pub transform: Matrix4<f64>,
}

impl PlacedCorners {
    /// Corners of the local box `min..max`, placed by `transform`
    pub fn from_extent(min: Point3<f64>, max: Point3<f64>, transform: Matrix4<f64>) -> Self {
        Self {
            corners: bound_box_corners(&min, &max),
            transform,
        }
    }
}

impl MeshObject for PlacedCorners {
    fn local_corners(&self) -> [Point3<f64>; 8] {
        self.corners
    }

    fn world_transform(&self) -> Matrix4<f64> {
        self.transform
    }
}

/// World-space axis-aligned bounding box in millimeters
///
/// `min <= max` holds on every axis for boxes produced by this module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from its corners
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Smallest box enclosing both boxes
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// The box moved by `offset`
    pub fn translated(&self, offset: &Translation) -> Aabb {
        Aabb {
            min: self.min + *offset,
            max: self.max + *offset,
        }
    }
}

/// World-space bounding box of a single object
///
/// The object's kind is not checked.
pub fn compute_object_aabb<O: MeshObject + ?Sized>(object: &O) -> Aabb {
    let (min, max) = compute_transformed_aabb(&object.local_corners(), &object.world_transform());
    Aabb { min, max }
}

/// Combined world-space bounding box of every mesh object in `objects`
///
/// Each object's 8 local corners are transformed into world space and the
/// min/max is folded per axis across all of them. Non-mesh objects are
/// skipped.
///
/// # Errors
///
/// [`Error::EmptyInput`] if no mesh object remains after filtering.
pub fn compute_world_aabb<'a, O, I>(objects: I) -> Result<Aabb>
where
    O: MeshObject + ?Sized + 'a,
    I: IntoIterator<Item = &'a O>,
{
    let mut count = 0usize;
    let combined = objects
        .into_iter()
        .filter(|object| object.is_mesh())
        .map(|object| {
            count += 1;
            compute_object_aabb(object)
        })
        .reduce(|acc, aabb| acc.merged(&aabb))
        .ok_or(Error::EmptyInput)?;

    debug!(objects = count, size = ?combined.size(), "computed world bounding box");
    Ok(combined)
}

/// Whether `aabb` fits inside `volume` on all three axes
///
/// A box exactly the size of the volume fits.
pub fn fits_within(aabb: &Aabb, volume: &BuildVolume) -> bool {
    let size = aabb.size();
    size.x <= volume.x && size.y <= volume.y && size.z <= volume.z
}

/// Translation that centers `aabb` over the build plate and rests it on z = 0
pub fn compute_center_offset(aabb: &Aabb, volume: &BuildVolume) -> Translation {
    let center = aabb.center();
    Translation::new(
        volume.x / 2.0 - center.x,
        volume.y / 2.0 - center.y,
        -aabb.min.z,
    )
}

/// Outcome of a fit check, ready for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Measured size
    pub size: Vector3<f64>,
    /// Volume the size was checked against
    pub volume: BuildVolume,
    /// Whether the size fits
    pub fits: bool,
}

impl FitReport {
    /// Check a bounding box against a volume
    pub fn new(aabb: &Aabb, volume: &BuildVolume) -> Self {
        Self {
            size: aabb.size(),
            volume: *volume,
            fits: fits_within(aabb, volume),
        }
    }

    /// Check a bare size (e.g. an object's dimensions) against a volume
    pub fn from_size(size: Vector3<f64>, volume: &BuildVolume) -> Self {
        Self::new(&Aabb::new(Point3::origin(), Point3::from(size)), volume)
    }

    /// Size formatted as `XxYxZ` with one decimal
    pub fn size_label(&self) -> String {
        format!("{:.1}x{:.1}x{:.1}", self.size.x, self.size.y, self.size.z)
    }

    /// `Fits` or `Too large`
    pub fn status_label(&self) -> &'static str {
        if self.fits { "Fits" } else { "Too large" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(min: (f64, f64, f64), max: (f64, f64, f64), at: (f64, f64, f64)) -> PlacedCorners {
        PlacedCorners::from_extent(
            Point3::new(min.0, min.1, min.2),
            Point3::new(max.0, max.1, max.2),
            Matrix4::new_translation(&Vector3::new(at.0, at.1, at.2)),
        )
    }

    struct NotAMesh;

    impl MeshObject for NotAMesh {
        fn is_mesh(&self) -> bool {
            false
        }

        fn local_corners(&self) -> [Point3<f64>; 8] {
            [Point3::new(-1000.0, -1000.0, -1000.0); 8]
        }

        fn world_transform(&self) -> Matrix4<f64> {
            Matrix4::identity()
        }
    }

    #[test]
    fn test_single_object_aabb() {
        let part = placed((0.0, 0.0, 0.0), (10.0, 20.0, 30.0), (5.0, 5.0, 0.0));
        let aabb = compute_world_aabb([&part]).unwrap();
        assert_eq!(aabb.min, Point3::new(5.0, 5.0, 0.0));
        assert_eq!(aabb.max, Point3::new(15.0, 25.0, 30.0));
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<PlacedCorners> = Vec::new();
        assert!(matches!(compute_world_aabb(&none), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_non_mesh_objects_are_skipped() {
        let objects: Vec<&dyn MeshObject> = vec![&NotAMesh];
        assert!(matches!(
            compute_world_aabb(objects.iter().copied()),
            Err(Error::EmptyInput)
        ));

        let part = placed((0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (0.0, 0.0, 0.0));
        let objects: Vec<&dyn MeshObject> = vec![&NotAMesh, &part];
        let aabb = compute_world_aabb(objects.iter().copied()).unwrap();
        assert_eq!(aabb.min, Point3::origin());
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_fits_within_boundary() {
        let volume = BuildVolume::new(180.0, 180.0, 180.0).unwrap();
        let exact = Aabb::new(Point3::new(10.0, 10.0, 0.0), Point3::new(190.0, 190.0, 180.0));
        assert!(fits_within(&exact, &volume));

        let over = Aabb::new(Point3::origin(), Point3::new(180.0, 180.0, 180.0 + 1e-9));
        assert!(!fits_within(&over, &volume));
    }

    #[test]
    fn test_center_offset() {
        let volume = BuildVolume::new(256.0, 256.0, 256.0).unwrap();
        let aabb = Aabb::new(Point3::new(-10.0, 0.0, 5.0), Point3::new(10.0, 40.0, 25.0));
        let offset = compute_center_offset(&aabb, &volume);
        assert_eq!(offset, Vector3::new(128.0, 108.0, -5.0));

        let moved = aabb.translated(&offset);
        assert_eq!(moved.center().x, 128.0);
        assert_eq!(moved.center().y, 128.0);
        assert_eq!(moved.min.z, 0.0);
    }

    #[test]
    fn test_fit_report_labels() {
        let volume = BuildVolume::new(180.0, 180.0, 180.0).unwrap();
        let report = FitReport::from_size(Vector3::new(200.0, 10.0, 10.24), &volume);
        assert!(!report.fits);
        assert_eq!(report.size_label(), "200.0x10.0x10.2");
        assert_eq!(report.status_label(), "Too large");

        let report = FitReport::from_size(Vector3::new(10.0, 20.0, 30.0), &volume);
        assert!(report.fits);
        assert_eq!(report.status_label(), "Fits");
    }

    #[test]
    fn test_merged() {
        let a = Aabb::new(Point3::new(0.0, 5.0, 0.0), Point3::new(1.0, 6.0, 1.0));
        let b = Aabb::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(0.5, 1.0, 3.0));
        let m = a.merged(&b);
        assert_eq!(m.min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(m.max, Point3::new(1.0, 6.0, 3.0));
    }
}

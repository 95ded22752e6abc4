//! In-memory scene adapter
//!
//! This module models the parts of a host scene graph the setup operators
//! touch: objects with a location/rotation/scale transform, the selection
//! and active object, the 3D cursor, unit settings, 3D views, materials and
//! the add-on's own scene properties.
//!
//! [`SceneObject`] implements [`MeshObject`], so scene selections can be fed
//! straight into the fit checker.

use crate::config::{UnitSettings, ViewportClip};
use crate::error::{Error, Result};
use crate::fit::{Aabb, MeshObject, Translation};
use crate::mesh_ops::{mesh_corners, mesh_extent, scale_mesh};
use crate::model::Mesh;
use crate::printer::PrinterModel;
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

/// What kind of data an object carries
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Triangle mesh geometry
    Mesh(Mesh),
    /// Transform-only object without geometry
    Empty,
    /// Curve object
    Curve,
    /// Camera
    Camera,
    /// Light
    Light,
}

/// How an object is drawn in the 3D view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    /// Only the bounding box
    Bounds,
    /// Edges only
    Wire,
    /// Shaded without textures
    Solid,
    /// Shaded with textures
    #[default]
    Textured,
}

/// Viewport display and visibility flags of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    /// Draw style
    pub display_type: DisplayType,
    /// Draw on top of other objects
    pub show_in_front: bool,
    /// Object cannot be selected in the viewport
    pub hide_select: bool,
    /// Object is excluded from renders
    pub hide_render: bool,
    /// Object color (RGBA)
    pub color: [f64; 4],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            display_type: DisplayType::Textured,
            show_in_front: false,
            hide_select: false,
            hide_render: false,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Per-axis transform locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformLocks {
    /// Location locked per axis
    pub location: [bool; 3],
    /// Rotation locked per axis
    pub rotation: [bool; 3],
    /// Scale locked per axis
    pub scale: [bool; 3],
}

impl TransformLocks {
    /// Every channel locked
    pub fn all() -> Self {
        Self {
            location: [true; 3],
            rotation: [true; 3],
            scale: [true; 3],
        }
    }

    /// Whether every channel is locked
    pub fn is_fully_locked(&self) -> bool {
        *self == Self::all()
    }
}

/// A shaded surface material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Unique material name
    pub name: String,
    /// Base color (RGBA)
    pub base_color: [f64; 4],
    /// Surface roughness in `0.0..=1.0`
    pub roughness: f64,
}

impl Material {
    /// Create a material with the host's default surface
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            roughness: 0.5,
        }
    }
}

/// An object in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Object name, unique within a scene
    pub name: String,
    /// Object data
    pub kind: ObjectKind,
    /// Location in world space
    pub location: Vector3<f64>,
    /// Rotation
    pub rotation: UnitQuaternion<f64>,
    /// Scale per local axis
    pub scale: Vector3<f64>,
    /// Selection state
    pub selected: bool,
    /// Display flags
    pub display: DisplaySettings,
    /// Transform locks
    pub locks: TransformLocks,
    /// Names of the materials in the object's material slots
    pub materials: Vec<String>,
}

impl SceneObject {
    /// Create an object at the origin with identity rotation and unit scale
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            location: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            selected: false,
            display: DisplaySettings::default(),
            locks: TransformLocks::default(),
            materials: Vec::new(),
        }
    }

    /// Create a mesh object
    pub fn mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::new(name, ObjectKind::Mesh(mesh))
    }

    /// Set the location
    pub fn with_location(mut self, x: f64, y: f64, z: f64) -> Self {
        self.location = Vector3::new(x, y, z);
        self
    }

    /// Set the rotation
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Mesh data, if this is a mesh object
    pub fn mesh_data(&self) -> Option<&Mesh> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Size of the local bounding box scaled by the object's scale
    ///
    /// Rotation and location are not taken into account. Non-mesh objects
    /// have zero dimensions.
    pub fn dimensions(&self) -> Vector3<f64> {
        match self.mesh_data() {
            Some(mesh) => mesh_extent(mesh).component_mul(&self.scale.abs()),
            None => Vector3::zeros(),
        }
    }

    /// Scale the object so its dimensions become `dimensions`
    ///
    /// Axes with zero local extent keep their current scale.
    pub fn set_dimensions(&mut self, dimensions: Vector3<f64>) {
        let Some(mesh) = self.mesh_data() else {
            return;
        };
        let extent = mesh_extent(mesh);
        for axis in 0..3 {
            if extent[axis] > 0.0 {
                self.scale[axis] = dimensions[axis] / extent[axis];
            }
        }
    }

    /// Bake the scale into the mesh vertices and reset it to 1
    ///
    /// Non-mesh objects are left unchanged.
    pub fn apply_scale(&mut self) {
        let scale = self.scale;
        if let ObjectKind::Mesh(mesh) = &mut self.kind {
            scale_mesh(mesh, &scale);
            self.scale = Vector3::new(1.0, 1.0, 1.0);
        }
    }

    /// Move the object by `offset`
    pub fn translate(&mut self, offset: &Translation) {
        self.location += *offset;
    }
}

impl MeshObject for SceneObject {
    fn is_mesh(&self) -> bool {
        matches!(self.kind, ObjectKind::Mesh(_))
    }

    fn local_corners(&self) -> [Point3<f64>; 8] {
        match self.mesh_data() {
            Some(mesh) => mesh_corners(mesh),
            None => [Point3::origin(); 8],
        }
    }

    fn world_transform(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.location)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

/// A 3D viewport
#[derive(Debug, Clone, PartialEq)]
pub struct View3d {
    /// Near clipping distance
    pub clip_start: f64,
    /// Far clipping distance
    pub clip_end: f64,
    /// Region the view was last framed on
    pub framed: Option<Aabb>,
}

impl Default for View3d {
    fn default() -> Self {
        Self {
            clip_start: 0.01,
            clip_end: 1000.0,
            framed: None,
        }
    }
}

impl View3d {
    /// Apply a clipping range
    pub fn set_clip(&mut self, clip: &ViewportClip) {
        self.clip_start = clip.clip_start;
        self.clip_end = clip.clip_end;
    }
}

/// Scene properties owned by the add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneProps {
    /// Printer the scene is set up for
    pub printer_model: PrinterModel,
}

/// An in-memory scene
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
    active: Option<usize>,
    /// 3D cursor location
    pub cursor: Point3<f64>,
    /// Unit settings
    pub unit_settings: UnitSettings,
    /// Open 3D views
    pub views: Vec<View3d>,
    /// Materials available to objects
    pub materials: Vec<Material>,
    /// Add-on properties
    pub props: SceneProps,
}

impl Scene {
    /// A fresh scene with host defaults and a single 3D view
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            active: None,
            cursor: Point3::origin(),
            unit_settings: UnitSettings::meters(),
            views: vec![View3d::default()],
            materials: Vec::new(),
            props: SceneProps::default(),
        }
    }

    /// Scene set up for `printer`
    pub fn with_printer(mut self, printer: PrinterModel) -> Self {
        self.props.printer_model = printer;
        self
    }

    /// Add an object, making it the only selected object and the active one
    ///
    /// Returns the index of the new object.
    pub fn add_object(&mut self, mut object: SceneObject) -> usize {
        self.deselect_all();
        object.selected = true;
        self.objects.push(object);
        let index = self.objects.len() - 1;
        self.active = Some(index);
        index
    }

    /// All objects
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Object at `index`
    pub fn object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    /// Mutable object at `index`
    pub fn object_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// Index of the object called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    /// Object called `name`
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Mutable object called `name`
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Object called `name`, or `Error::ObjectNotFound`
    pub fn require(&self, name: &str) -> Result<&SceneObject> {
        self.find(name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    /// Remove the object called `name`, returning it
    pub fn remove_object_named(&mut self, name: &str) -> Option<SceneObject> {
        let index = self.index_of(name)?;
        let removed = self.objects.remove(index);
        self.active = match self.active {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Some(removed)
    }

    /// The active object
    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.and_then(|i| self.objects.get(i))
    }

    /// The mutable active object
    pub fn active_object_mut(&mut self) -> Option<&mut SceneObject> {
        self.active.and_then(|i| self.objects.get_mut(i))
    }

    /// Selected objects in scene order
    pub fn selected_objects(&self) -> Vec<&SceneObject> {
        self.objects.iter().filter(|o| o.selected).collect()
    }

    /// Indices of the selected objects
    pub fn selected_indices(&self) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Clear the selection
    pub fn deselect_all(&mut self) {
        for object in &mut self.objects {
            object.selected = false;
        }
    }

    /// Select exactly the objects at `indices`
    ///
    /// Objects with `hide_select` set stay unselected.
    pub fn select_only(&mut self, indices: &[usize]) {
        for (i, object) in self.objects.iter_mut().enumerate() {
            object.selected = indices.contains(&i) && !object.display.hide_select;
        }
    }

    /// Material called `name`
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Material called `name`, created with `create` if missing
    pub fn material_or_insert_with<F>(&mut self, name: &str, create: F) -> &Material
    where
        F: FnOnce() -> Material,
    {
        let index = match self.materials.iter().position(|m| m.name == name) {
            Some(index) => index,
            None => {
                self.materials.push(create());
                self.materials.len() - 1
            }
        };
        &self.materials[index]
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

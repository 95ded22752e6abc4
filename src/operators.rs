//! Printer setup operators
//!
//! Each operator performs one user-facing action on a [`Scene`]: configuring
//! millimeter units, creating the build volume and build plate markers,
//! checking whether the selection fits the printer, centering the selection
//! on the plate, and wrapping the host's STL/3MF import and export.
//!
//! Operators never fail half-way. They either finish, or cancel without
//! touching the scene, and describe what happened in an
//! [`OperatorOutcome`]. Every report is also logged through `tracing`.
//!
//! # Example
//!
//! ```
//! use bambu3mf::operators::{self, OperatorStatus};
//! use bambu3mf::{Mesh, PresetTable, Scene, SceneObject, SetupConfig};
//!
//! let presets = PresetTable::bambu_lab();
//! let mut scene = Scene::new();
//! operators::full_setup(&mut scene, &SetupConfig::new(), &presets);
//!
//! scene.add_object(SceneObject::mesh("Part", Mesh::cube(40.0)));
//! let outcome = operators::check_model_fit(&scene, &presets);
//! assert_eq!(outcome.status, OperatorStatus::Finished);
//! assert!(outcome.value.unwrap().fits);
//! ```

use crate::config::SetupConfig;
use crate::error::Result;
use crate::exchange::{
    Exporter, FileFormat, Importer, StlExportOptions, StlImportOptions, ThreeMfExportOptions,
    ThreeMfImportOptions,
};
use crate::fit::{
    FitReport, MeshObject, Translation, compute_center_offset, compute_object_aabb,
    compute_world_aabb,
};
use crate::model::Mesh;
use crate::printer::{BuildVolume, PresetTable};
use crate::scene::{DisplaySettings, DisplayType, Material, Scene, SceneObject, TransformLocks};
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span, warn};

/// Name of the build volume marker object
pub const BUILD_VOLUME_NAME: &str = "Build Volume";

/// Name of the build plate marker object
pub const BUILD_PLATE_NAME: &str = "Build Plate";

/// Name of the build plate's material
pub const BUILD_PLATE_MATERIAL: &str = "Build Plate Material";

/// Viewport color of the build volume wireframe
pub const BUILD_VOLUME_COLOR: [f64; 4] = [0.2, 0.6, 1.0, 0.5];

/// Base color of the build plate material
pub const BUILD_PLATE_COLOR: [f64; 4] = [0.15, 0.15, 0.15, 1.0];

/// Roughness of the build plate material
pub const BUILD_PLATE_ROUGHNESS: f64 = 0.8;

/// How an operator ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorStatus {
    /// The operator ran to completion
    Finished,
    /// The operator was aborted without changing the scene
    Cancelled,
}

/// Severity of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Informational
    Info,
    /// Something the user should look at
    Warning,
    /// The operation went wrong
    Error,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Severity
    pub level: ReportLevel,
    /// Message text
    pub message: String,
}

/// Result of running an operator
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorOutcome<T = ()> {
    /// Whether the operator finished or was cancelled
    pub status: OperatorStatus,
    /// Messages for the user, in the order they were produced
    pub reports: Vec<Report>,
    /// Value computed by the operator, if any
    pub value: Option<T>,
}

impl<T> OperatorOutcome<T> {
    fn finished(value: Option<T>) -> Self {
        Self {
            status: OperatorStatus::Finished,
            reports: Vec::new(),
            value,
        }
    }

    fn cancelled() -> Self {
        Self {
            status: OperatorStatus::Cancelled,
            reports: Vec::new(),
            value: None,
        }
    }

    fn report(mut self, level: ReportLevel, message: impl Into<String>) -> Self {
        let message = message.into();
        match level {
            ReportLevel::Info => info!("{}", message),
            ReportLevel::Warning => warn!("{}", message),
            ReportLevel::Error => error!("{}", message),
        }
        self.reports.push(Report { level, message });
        self
    }

    /// Whether the operator finished
    pub fn is_finished(&self) -> bool {
        self.status == OperatorStatus::Finished
    }

    /// Report messages in order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.reports.iter().map(|r| r.message.as_str())
    }

    /// The most severe report level, if anything was reported
    pub fn worst_level(&self) -> Option<ReportLevel> {
        self.reports.iter().map(|r| r.level).max_by_key(|level| match level {
            ReportLevel::Info => 0,
            ReportLevel::Warning => 1,
            ReportLevel::Error => 2,
        })
    }
}

fn active_volume(scene: &Scene, presets: &PresetTable) -> BuildVolume {
    presets.volume(scene.props.printer_model)
}

/// Configure units and view clipping for a millimeter workflow
///
/// Also records `config.printer` as the scene's printer.
pub fn setup_scene(scene: &mut Scene, config: &SetupConfig) -> OperatorOutcome {
    scene.props.printer_model = config.printer;
    scene.unit_settings = config.units;
    for view in &mut scene.views {
        view.set_clip(&config.viewport);
    }

    OperatorOutcome::finished(None).report(
        ReportLevel::Info,
        "Scene configured for millimeter workflow",
    )
}

/// Create a wireframe cube the size of the printer's build volume
///
/// The cube sits on z = 0 with its footprint spanning `0..x` and `0..y`.
/// An existing build volume object is replaced.
pub fn create_build_volume(scene: &mut Scene, presets: &PresetTable) -> OperatorOutcome {
    let volume = active_volume(scene, presets);
    let _span = info_span!("create_build_volume", printer = %scene.props.printer_model).entered();

    if scene.remove_object_named(BUILD_VOLUME_NAME).is_some() {
        debug!("replaced existing build volume");
    }

    let mut object = SceneObject::mesh(BUILD_VOLUME_NAME, Mesh::cube(1.0));
    object.set_dimensions(volume.size());
    object.location = volume.half_extents();
    object.apply_scale();
    object.display = DisplaySettings {
        display_type: DisplayType::Wire,
        show_in_front: true,
        hide_select: true,
        hide_render: true,
        color: BUILD_VOLUME_COLOR,
    };
    object.locks = TransformLocks::all();

    let index = scene.add_object(object);
    if let Some(object) = scene.object_mut(index) {
        object.selected = false;
    }
    scene.cursor = Point3::origin();

    OperatorOutcome::finished(None).report(
        ReportLevel::Info,
        format!(
            "Created {}×{}×{}mm build volume",
            volume.x, volume.y, volume.z
        ),
    )
}

/// Create a flat plane covering the printer's build plate
///
/// An existing build plate object is replaced. The plate material is
/// created on first use and shared afterwards.
pub fn create_build_plate(scene: &mut Scene, presets: &PresetTable) -> OperatorOutcome {
    let volume = active_volume(scene, presets);
    let _span = info_span!("create_build_plate", printer = %scene.props.printer_model).entered();

    if scene.remove_object_named(BUILD_PLATE_NAME).is_some() {
        debug!("replaced existing build plate");
    }

    let mut object = SceneObject::mesh(BUILD_PLATE_NAME, Mesh::plane(1.0));
    object.set_dimensions(Vector3::new(volume.x, volume.y, 0.0));
    let (cx, cy) = volume.center_xy();
    object.location = Vector3::new(cx, cy, 0.0);
    object.apply_scale();

    let material = scene.material_or_insert_with(BUILD_PLATE_MATERIAL, || Material {
        base_color: BUILD_PLATE_COLOR,
        roughness: BUILD_PLATE_ROUGHNESS,
        ..Material::new(BUILD_PLATE_MATERIAL)
    });
    object.materials.push(material.name.clone());
    object.display.hide_select = true;
    object.locks = TransformLocks::all();

    let index = scene.add_object(object);
    if let Some(object) = scene.object_mut(index) {
        object.selected = false;
    }

    OperatorOutcome::finished(None).report(
        ReportLevel::Info,
        format!("Created {}×{}mm build plate", volume.x, volume.y),
    )
}

/// Configure the scene, create the build volume and plate, and frame the views
pub fn full_setup(
    scene: &mut Scene,
    config: &SetupConfig,
    presets: &PresetTable,
) -> OperatorOutcome {
    let mut reports = setup_scene(scene, config).reports;
    reports.extend(create_build_volume(scene, presets).reports);
    reports.extend(create_build_plate(scene, presets).reports);

    if let Ok(bounds) = compute_world_aabb(scene.objects()) {
        for view in &mut scene.views {
            view.framed = Some(bounds);
        }
    }

    let mut outcome = OperatorOutcome::finished(None);
    outcome.reports = reports;
    outcome.report(ReportLevel::Info, "Full printer setup complete!")
}

/// Check whether the selected meshes, taken together, fit the build volume
///
/// All selected mesh objects are combined into a single bounding box.
/// Cancels if nothing is selected or the selection has no meshes.
pub fn check_model_fit(scene: &Scene, presets: &PresetTable) -> OperatorOutcome<FitReport> {
    let volume = active_volume(scene, presets);
    let selected = scene.selected_objects();
    if selected.is_empty() {
        return OperatorOutcome::cancelled().report(ReportLevel::Warning, "No objects selected");
    }

    let aabb = match compute_world_aabb(selected.iter().copied()) {
        Ok(aabb) => aabb,
        Err(err) => {
            debug!(%err, "fit check aborted");
            return OperatorOutcome::cancelled()
                .report(ReportLevel::Warning, "No mesh objects selected");
        }
    };

    let report = FitReport::new(&aabb, &volume);
    let outcome = OperatorOutcome::finished(Some(report));
    if report.fits {
        outcome.report(
            ReportLevel::Info,
            format!("Model fits! Size: {}mm", report.size_label()),
        )
    } else {
        outcome.report(
            ReportLevel::Warning,
            format!(
                "Model too large! Size: {}mm (max: {}x{}x{}mm)",
                report.size_label(),
                volume.x,
                volume.y,
                volume.z
            ),
        )
    }
}

/// Center each selected mesh on the build plate and rest it on z = 0
///
/// Objects are centered independently of each other. All offsets are
/// computed before any object moves.
pub fn center_on_plate(
    scene: &mut Scene,
    presets: &PresetTable,
) -> OperatorOutcome<Vec<(String, Translation)>> {
    let volume = active_volume(scene, presets);
    let selected = scene.selected_indices();
    if selected.is_empty() {
        return OperatorOutcome::cancelled().report(ReportLevel::Warning, "No objects selected");
    }

    let offsets: Vec<(usize, Translation)> = selected
        .into_iter()
        .filter_map(|index| {
            let object = scene.object(index)?;
            if !object.is_mesh() {
                return None;
            }
            let offset = compute_center_offset(&compute_object_aabb(object), &volume);
            Some((index, offset))
        })
        .collect();

    if offsets.is_empty() {
        return OperatorOutcome::cancelled()
            .report(ReportLevel::Warning, "No mesh objects selected");
    }

    let mut moved = Vec::with_capacity(offsets.len());
    for (index, offset) in offsets {
        if let Some(object) = scene.object_mut(index) {
            object.translate(&offset);
            debug!(object = %object.name, ?offset, "centered on build plate");
            moved.push((object.name.clone(), offset));
        }
    }

    OperatorOutcome::finished(Some(moved))
        .report(ReportLevel::Info, "Objects centered on build plate")
}

/// Import an STL file at 1:1 scale and report whether it fits
///
/// # Errors
///
/// Propagates the host importer's error; the scene is unchanged.
pub fn import_stl<I: Importer + ?Sized>(
    scene: &mut Scene,
    importer: &mut I,
    presets: &PresetTable,
    path: &Path,
) -> Result<OperatorOutcome<FitReport>> {
    let objects = importer.import_stl(path, &StlImportOptions::default())?;
    Ok(finish_import(scene, presets, objects))
}

/// Import a 3MF file with native millimeter units and report whether it fits
///
/// # Errors
///
/// Propagates the host importer's error; the scene is unchanged.
pub fn import_3mf<I: Importer + ?Sized>(
    scene: &mut Scene,
    importer: &mut I,
    presets: &PresetTable,
    path: &Path,
) -> Result<OperatorOutcome<FitReport>> {
    let objects = importer.import_3mf(path, &ThreeMfImportOptions::default())?;
    Ok(finish_import(scene, presets, objects))
}

/// Add imported objects, select them, and report on the first one
fn finish_import(
    scene: &mut Scene,
    presets: &PresetTable,
    objects: Vec<SceneObject>,
) -> OperatorOutcome<FitReport> {
    let volume = active_volume(scene, presets);
    let indices: Vec<usize> = objects
        .into_iter()
        .map(|object| scene.add_object(object))
        .collect();
    scene.select_only(&indices);

    let Some(first) = indices.first().and_then(|&i| scene.object(i)) else {
        return OperatorOutcome::finished(None);
    };

    let report = FitReport::from_size(first.dimensions(), &volume);
    OperatorOutcome::finished(Some(report)).report(
        ReportLevel::Info,
        format!(
            "Imported: {}mm ({})",
            report.size_label(),
            report.status_label()
        ),
    )
}

/// Default export path: the first selected object's name plus the extension
pub fn default_export_path(scene: &Scene, format: FileFormat) -> Option<PathBuf> {
    scene
        .selected_objects()
        .first()
        .map(|object| format.default_file_name(&object.name))
}

/// Export the selection as binary STL at 1:1 scale
///
/// With `path = None` the file is named after the first selected object.
///
/// # Errors
///
/// Propagates the host exporter's error.
pub fn export_stl<E: Exporter + ?Sized>(
    scene: &Scene,
    exporter: &mut E,
    path: Option<&Path>,
) -> Result<OperatorOutcome<PathBuf>> {
    export_selection(scene, FileFormat::Stl, path, |path, objects| {
        exporter.export_stl(path, objects, &StlExportOptions::default())
    })
}

/// Export the selection as 3MF at 1:1 scale
///
/// With `path = None` the file is named after the first selected object.
///
/// # Errors
///
/// Propagates the host exporter's error.
pub fn export_3mf<E: Exporter + ?Sized>(
    scene: &Scene,
    exporter: &mut E,
    path: Option<&Path>,
) -> Result<OperatorOutcome<PathBuf>> {
    export_selection(scene, FileFormat::ThreeMf, path, |path, objects| {
        exporter.export_3mf(path, objects, &ThreeMfExportOptions::default())
    })
}

fn export_selection<F>(
    scene: &Scene,
    format: FileFormat,
    path: Option<&Path>,
    write: F,
) -> Result<OperatorOutcome<PathBuf>>
where
    F: FnOnce(&Path, &[&SceneObject]) -> Result<()>,
{
    let selected = scene.selected_objects();
    let Some(first) = selected.first() else {
        return Ok(OperatorOutcome::cancelled()
            .report(ReportLevel::Warning, "No objects selected for export"));
    };

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => format.default_file_name(&first.name),
    };

    debug!(%format, objects = selected.len(), path = %path.display(), "exporting selection");
    write(&path, &selected)?;

    let message = format!("Exported to {}", path.display());
    Ok(OperatorOutcome::finished(Some(path)).report(ReportLevel::Info, message))
}

//! Shared utilities for integration tests
//!
//! Provides small scene builders and recording stand-ins for the host's
//! import/export operators.

#![allow(dead_code)]

use bambu3mf::exchange::{
    Exporter, Importer, StlExportOptions, StlImportOptions, ThreeMfExportOptions,
    ThreeMfImportOptions,
};
use bambu3mf::{Error, Mesh, Result, SceneObject};
use std::path::{Path, PathBuf};

/// A mesh object whose local box spans `0..size`, located at `at`
pub fn box_object(name: &str, size: (f64, f64, f64), at: (f64, f64, f64)) -> SceneObject {
    SceneObject::mesh(name, Mesh::cuboid((0.0, 0.0, 0.0), size)).with_location(at.0, at.1, at.2)
}

/// Importer returning clones of a fixed set of objects
#[derive(Default)]
pub struct RecordingImporter {
    pub objects: Vec<SceneObject>,
    pub stl_calls: Vec<(PathBuf, StlImportOptions)>,
    pub three_mf_calls: Vec<(PathBuf, ThreeMfImportOptions)>,
}

impl RecordingImporter {
    pub fn returning(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            ..Self::default()
        }
    }
}

impl Importer for RecordingImporter {
    fn import_stl(&mut self, path: &Path, options: &StlImportOptions) -> Result<Vec<SceneObject>> {
        self.stl_calls.push((path.to_path_buf(), *options));
        Ok(self.objects.clone())
    }

    fn import_3mf(
        &mut self,
        path: &Path,
        options: &ThreeMfImportOptions,
    ) -> Result<Vec<SceneObject>> {
        self.three_mf_calls.push((path.to_path_buf(), *options));
        Ok(self.objects.clone())
    }
}

/// Importer that always fails like a host reading a corrupt file
pub struct FailingImporter;

impl Importer for FailingImporter {
    fn import_stl(&mut self, path: &Path, _options: &StlImportOptions) -> Result<Vec<SceneObject>> {
        Err(Error::import_failed(path, "unexpected end of file"))
    }

    fn import_3mf(
        &mut self,
        path: &Path,
        _options: &ThreeMfImportOptions,
    ) -> Result<Vec<SceneObject>> {
        Err(Error::import_failed(path, "not a zip archive"))
    }
}

/// One recorded export call
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCall {
    pub path: PathBuf,
    pub object_names: Vec<String>,
}

/// Exporter recording what it was asked to write
#[derive(Default)]
pub struct RecordingExporter {
    pub stl: Vec<(ExportCall, StlExportOptions)>,
    pub three_mf: Vec<(ExportCall, ThreeMfExportOptions)>,
    pub fail_with: Option<String>,
}

impl RecordingExporter {
    fn call(path: &Path, objects: &[&SceneObject]) -> ExportCall {
        ExportCall {
            path: path.to_path_buf(),
            object_names: objects.iter().map(|o| o.name.clone()).collect(),
        }
    }
}

impl Exporter for RecordingExporter {
    fn export_stl(
        &mut self,
        path: &Path,
        objects: &[&SceneObject],
        options: &StlExportOptions,
    ) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(Error::export_failed(path, message));
        }
        self.stl.push((Self::call(path, objects), *options));
        Ok(())
    }

    fn export_3mf(
        &mut self,
        path: &Path,
        objects: &[&SceneObject],
        options: &ThreeMfExportOptions,
    ) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(Error::export_failed(path, message));
        }
        self.three_mf.push((Self::call(path, objects), *options));
        Ok(())
    }
}

/// Assert two floats are equal within a tolerance
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

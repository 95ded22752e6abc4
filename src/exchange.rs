//! Host import/export interface
//!
//! STL and 3MF files are read and written by the host application's own
//! operators. This module defines the options the wrappers in
//! [`crate::operators`] pass to them, and the traits a host adapter
//! implements to perform the actual file I/O.
//!
//! # Example
//!
//! ```
//! use bambu3mf::exchange::{Importer, StlImportOptions, ThreeMfImportOptions};
//! use bambu3mf::{Mesh, Result, SceneObject};
//! use std::path::Path;
//!
//! struct PrimitiveImporter;
//!
//! impl Importer for PrimitiveImporter {
//!     fn import_stl(&mut self, path: &Path, _options: &StlImportOptions) -> Result<Vec<SceneObject>> {
//!         let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Imported");
//!         Ok(vec![SceneObject::mesh(name, Mesh::cube(20.0))])
//!     }
//!
//!     fn import_3mf(&mut self, path: &Path, _options: &ThreeMfImportOptions) -> Result<Vec<SceneObject>> {
//!         self.import_stl(path, &StlImportOptions::default())
//!     }
//! }
//! ```

use crate::error::Result;
use crate::scene::SceneObject;
use std::fmt;
use std::path::{Path, PathBuf};

/// File formats handled by the host operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Stereolithography
    Stl,
    /// 3D Manufacturing Format
    ThreeMf,
}

impl FileFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Stl => "stl",
            FileFormat::ThreeMf => "3mf",
        }
    }

    /// Glob used to filter the host's file browser
    pub fn filter_glob(&self) -> &'static str {
        match self {
            FileFormat::Stl => "*.stl",
            FileFormat::ThreeMf => "*.3mf",
        }
    }

    /// File name for exporting an object called `object_name`
    ///
    /// The extension is appended, so dotted object names such as
    /// `Cube.001` keep their suffix.
    pub fn default_file_name(&self, object_name: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", object_name, self.extension()))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Stl => f.write_str("STL"),
            FileFormat::ThreeMf => f.write_str("3MF"),
        }
    }
}

/// How 3MF model units are mapped onto scene units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleUnit {
    /// One model millimeter becomes one scene unit
    #[default]
    MmNative,
    /// Model units are converted using the scene's unit scale
    SceneUnits,
}

/// Options for the host's STL importer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlImportOptions {
    /// Uniform scale applied to imported geometry
    pub global_scale: f64,
}

impl Default for StlImportOptions {
    fn default() -> Self {
        Self { global_scale: 1.0 }
    }
}

/// Options for the host's 3MF importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreeMfImportOptions {
    /// Unit mapping
    pub scale_unit: ScaleUnit,
}

/// Options for the host's STL exporter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlExportOptions {
    /// Only export selected objects
    pub selected_only: bool,
    /// Uniform scale applied on export
    pub global_scale: f64,
    /// Write ASCII STL instead of binary
    pub ascii: bool,
}

impl Default for StlExportOptions {
    fn default() -> Self {
        Self {
            selected_only: true,
            global_scale: 1.0,
            ascii: false,
        }
    }
}

/// Options for the host's 3MF exporter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeMfExportOptions {
    /// Only export selected objects
    pub use_selection: bool,
    /// Uniform scale applied on export
    pub global_scale: f64,
}

impl Default for ThreeMfExportOptions {
    fn default() -> Self {
        Self {
            use_selection: true,
            global_scale: 1.0,
        }
    }
}

/// The host's file importers
pub trait Importer {
    /// Read an STL file into new scene objects
    fn import_stl(&mut self, path: &Path, options: &StlImportOptions) -> Result<Vec<SceneObject>>;

    /// Read a 3MF file into new scene objects
    fn import_3mf(
        &mut self,
        path: &Path,
        options: &ThreeMfImportOptions,
    ) -> Result<Vec<SceneObject>>;
}

/// The host's file exporters
///
/// `objects` is the set the wrapper decided to export (the selection when
/// the options say so).
pub trait Exporter {
    /// Write objects as STL
    fn export_stl(
        &mut self,
        path: &Path,
        objects: &[&SceneObject],
        options: &StlExportOptions,
    ) -> Result<()>;

    /// Write objects as 3MF
    fn export_3mf(
        &mut self,
        path: &Path,
        objects: &[&SceneObject],
        options: &ThreeMfExportOptions,
    ) -> Result<()>;
}

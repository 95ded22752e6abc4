//! # bambu3mf
//!
//! Printer setup tools for Bambu Lab 3D printing workflows.
//!
//! This library provides the scene-side logic of a 3MF/STL printing workflow:
//! visualizing a printer's build volume and plate, checking whether models
//! fit, centering models on the plate, and configuring a millimeter unit
//! setup. File formats are read and written by the host application; the
//! import/export wrappers only parameterize the host's operators.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - World-space bounding boxes of arbitrary transformed objects
//! - Fit checking against the stock volumes of six Bambu Lab printers
//! - Centering on the build plate
//! - JSON setup configuration
//!
//! ## Example
//!
//! ```
//! use bambu3mf::{fit, Mesh, PresetTable, PrinterModel, SceneObject};
//!
//! # fn main() -> bambu3mf::Result<()> {
//! let part = SceneObject::mesh("Part", Mesh::cuboid((0.0, 0.0, 0.0), (200.0, 10.0, 10.0)));
//! let volume = PresetTable::bambu_lab().volume(PrinterModel::A1Mini);
//!
//! let aabb = fit::compute_world_aabb([&part])?;
//! assert!(!fit::fits_within(&aabb, &volume));
//!
//! let offset = fit::compute_center_offset(&aabb, &volume);
//! println!("Move by {:?} to center on the plate", offset);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod exchange;
pub mod fit;
pub mod mesh_ops;
pub mod model;
pub mod operators;
pub mod printer;
pub mod scene;

pub use config::{LengthUnit, SetupConfig, UnitSettings, UnitSystem, ViewportClip};
pub use error::{Error, Result};
pub use exchange::{Exporter, FileFormat, Importer};
pub use fit::{Aabb, FitReport, MeshObject, Translation};
pub use model::{Mesh, Triangle, Vertex};
pub use operators::{OperatorOutcome, OperatorStatus, Report, ReportLevel};
pub use printer::{BuildVolume, PresetTable, PrinterModel};
pub use scene::{ObjectKind, Scene, SceneObject};

pub use nalgebra;

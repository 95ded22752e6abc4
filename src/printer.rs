//! Printer models and their build volumes
//!
//! The preset table is an immutable value passed explicitly to every
//! operation that needs a build volume. [`PresetTable::bambu_lab`] holds the
//! stock envelopes of the supported Bambu Lab printers.

use crate::error::{Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported Bambu Lab printer models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrinterModel {
    /// Bambu Lab A1 Mini
    #[default]
    #[serde(rename = "A1_MINI")]
    A1Mini,
    /// Bambu Lab A1
    #[serde(rename = "A1")]
    A1,
    /// Bambu Lab P1S
    #[serde(rename = "P1S")]
    P1S,
    /// Bambu Lab P1P
    #[serde(rename = "P1P")]
    P1P,
    /// Bambu Lab X1 Carbon
    #[serde(rename = "X1C")]
    X1Carbon,
    /// Bambu Lab X1E
    #[serde(rename = "X1E")]
    X1E,
}

impl PrinterModel {
    /// Every supported model, in menu order
    pub const ALL: [PrinterModel; 6] = [
        PrinterModel::A1Mini,
        PrinterModel::A1,
        PrinterModel::P1S,
        PrinterModel::P1P,
        PrinterModel::X1Carbon,
        PrinterModel::X1E,
    ];

    /// Stable identifier used in configuration files and scene properties
    pub fn identifier(&self) -> &'static str {
        match self {
            PrinterModel::A1Mini => "A1_MINI",
            PrinterModel::A1 => "A1",
            PrinterModel::P1S => "P1S",
            PrinterModel::P1P => "P1P",
            PrinterModel::X1Carbon => "X1C",
            PrinterModel::X1E => "X1E",
        }
    }

    /// Menu label including the stock build volume
    pub fn display_name(&self) -> &'static str {
        match self {
            PrinterModel::A1Mini => "A1 Mini (180×180×180)",
            PrinterModel::A1 => "A1 (256×256×256)",
            PrinterModel::P1S => "P1S (256×256×256)",
            PrinterModel::P1P => "P1P (256×256×256)",
            PrinterModel::X1Carbon => "X1 Carbon (256×256×256)",
            PrinterModel::X1E => "X1E (256×256×256)",
        }
    }

    /// Full product name
    pub fn description(&self) -> &'static str {
        match self {
            PrinterModel::A1Mini => "Bambu Lab A1 Mini",
            PrinterModel::A1 => "Bambu Lab A1",
            PrinterModel::P1S => "Bambu Lab P1S",
            PrinterModel::P1P => "Bambu Lab P1P",
            PrinterModel::X1Carbon => "Bambu Lab X1 Carbon",
            PrinterModel::X1E => "Bambu Lab X1E",
        }
    }
}

impl fmt::Display for PrinterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for PrinterModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PrinterModel::ALL
            .into_iter()
            .find(|m| m.identifier().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPrinter(s.to_string()))
    }
}

/// A printer's build envelope in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildVolume {
    /// Width along X
    pub x: f64,
    /// Depth along Y
    pub y: f64,
    /// Height along Z
    pub z: f64,
}

impl BuildVolume {
    /// Create a build volume, rejecting non-positive or non-finite extents
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_volume_axis(axis, value));
            }
        }
        Ok(Self { x, y, z })
    }

    /// Cube-shaped volume used by the stock presets
    const fn cube(edge: f64) -> Self {
        Self {
            x: edge,
            y: edge,
            z: edge,
        }
    }

    /// Extents as a vector
    pub fn size(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Half of each extent
    pub fn half_extents(&self) -> Vector3<f64> {
        self.size() / 2.0
    }

    /// Center of the build plate footprint
    pub fn center_xy(&self) -> (f64, f64) {
        (self.x / 2.0, self.y / 2.0)
    }
}

impl fmt::Display for BuildVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Immutable lookup from printer model to build volume
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    volumes: HashMap<PrinterModel, BuildVolume>,
}

impl PresetTable {
    /// Stock Bambu Lab build volumes
    pub fn bambu_lab() -> Self {
        let volumes = PrinterModel::ALL
            .into_iter()
            .map(|model| (model, stock_volume(model)))
            .collect();
        Self { volumes }
    }

    /// Replace the volume of one model
    ///
    /// # Example
    ///
    /// ```
    /// use bambu3mf::{BuildVolume, PresetTable, PrinterModel};
    ///
    /// # fn main() -> bambu3mf::Result<()> {
    /// let presets = PresetTable::bambu_lab()
    ///     .with_volume(PrinterModel::A1, BuildVolume::new(250.0, 250.0, 250.0)?);
    /// assert_eq!(presets.volume(PrinterModel::A1).x, 250.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_volume(mut self, model: PrinterModel, volume: BuildVolume) -> Self {
        self.volumes.insert(model, volume);
        self
    }

    /// Build volume of `model`
    pub fn volume(&self, model: PrinterModel) -> BuildVolume {
        self.volumes
            .get(&model)
            .copied()
            .unwrap_or_else(|| stock_volume(model))
    }

    /// Entries in menu order
    pub fn iter(&self) -> impl Iterator<Item = (PrinterModel, BuildVolume)> + '_ {
        PrinterModel::ALL
            .into_iter()
            .map(move |model| (model, self.volume(model)))
    }
}

fn stock_volume(model: PrinterModel) -> BuildVolume {
    match model {
        PrinterModel::A1Mini => BuildVolume::cube(180.0),
        PrinterModel::A1
        | PrinterModel::P1S
        | PrinterModel::P1P
        | PrinterModel::X1Carbon
        | PrinterModel::X1E => BuildVolume::cube(256.0),
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::bambu_lab()
    }
}

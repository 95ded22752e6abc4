//! Setup configuration
//!
//! [`SetupConfig`] collects the settings the setup operators apply to a
//! scene: the active printer, the unit system and the 3D view clipping
//! range. Defaults match a millimeter workflow, so most callers only pick a
//! printer:
//!
//! ```
//! use bambu3mf::{PrinterModel, SetupConfig};
//!
//! let config = SetupConfig::new().with_printer(PrinterModel::P1S);
//! assert_eq!(config.units.scale_length, 0.001);
//! ```
//!
//! Configurations can also be loaded from JSON. Missing fields take their
//! defaults:
//!
//! ```
//! use bambu3mf::{PrinterModel, SetupConfig};
//!
//! # fn main() -> bambu3mf::Result<()> {
//! let config = SetupConfig::from_json_str(r#"{ "printer": "X1C" }"#)?;
//! assert_eq!(config.printer, PrinterModel::X1Carbon);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::printer::PrinterModel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Unit system of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitSystem {
    /// No unit system, raw scene units
    None,
    /// Metric
    #[default]
    Metric,
    /// Imperial
    Imperial,
}

/// Unit used when displaying lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    /// Micrometers
    Micrometers,
    /// Millimeters
    #[default]
    Millimeters,
    /// Centimeters
    Centimeters,
    /// Meters
    Meters,
    /// Inches
    Inches,
}

/// Scene unit settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSettings {
    /// Unit system
    pub system: UnitSystem,
    /// Meters per scene unit
    pub scale_length: f64,
    /// Display unit for lengths
    pub length_unit: LengthUnit,
}

impl UnitSettings {
    /// One scene unit is one millimeter
    pub fn millimeters() -> Self {
        Self {
            system: UnitSystem::Metric,
            scale_length: 0.001,
            length_unit: LengthUnit::Millimeters,
        }
    }

    /// One scene unit is one meter (the host's own default)
    pub fn meters() -> Self {
        Self {
            system: UnitSystem::Metric,
            scale_length: 1.0,
            length_unit: LengthUnit::Meters,
        }
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self::millimeters()
    }
}

/// Near and far clipping distances of a 3D view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportClip {
    /// Near clipping distance
    pub clip_start: f64,
    /// Far clipping distance
    pub clip_end: f64,
}

impl Default for ViewportClip {
    fn default() -> Self {
        Self {
            clip_start: 0.1,
            clip_end: 10000.0,
        }
    }
}

/// Settings applied by the scene setup operators
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Active printer model
    pub printer: PrinterModel,
    /// Unit settings applied to the scene
    pub units: UnitSettings,
    /// Clipping range applied to every 3D view
    pub viewport: ViewportClip,
}

impl SetupConfig {
    /// Millimeter workflow for the default printer
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the printer model
    pub fn with_printer(mut self, printer: PrinterModel) -> Self {
        self.printer = printer;
        self
    }

    /// Override the unit settings
    pub fn with_units(mut self, units: UnitSettings) -> Self {
        self.units = units;
        self
    }

    /// Override the 3D view clipping range
    pub fn with_viewport(mut self, viewport: ViewportClip) -> Self {
        self.viewport = viewport;
        self
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SetupConfig = serde_json::from_str(json)?;
        debug!(printer = %config.printer, "loaded setup configuration");
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Serialize the configuration to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

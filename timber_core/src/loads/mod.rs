//! # Load Model
//!
//! Load categories, load cases, and live-load reduction per the AITC
//! Timber Construction Manual / IBC. The allowable-stress-design
//! combination table lives in [`combinations`].
//!
//! A [`LoadCase`] is a labelled set of category magnitudes plus the
//! context needed for live-load reduction (tributary area, roof slope,
//! structure type). Unset categories are zero.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::loads::{LoadCase, LoadType, StructureType};
//!
//! let case = LoadCase::new("roof joist")
//!     .with_load(LoadType::Dead, 10.0)
//!     .with_load(LoadType::LiveRoof, 20.0)
//!     .with_tributary_area(400.0)
//!     .with_roof_slope(6.0)
//!     .with_structure_type(StructureType::Roof);
//!
//! let reduced = case.reduced_live_load().unwrap();
//! assert!((reduced - 14.4).abs() < 1e-9);
//! ```

pub mod combinations;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{CalcError, CalcResult};

/// Load categories used in the ASD combination table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// Dead load (D)
    Dead,
    /// Floor live load (L)
    Live,
    /// Roof live load (Lr)
    LiveRoof,
    /// Snow load (S)
    Snow,
    /// Rain load (R)
    Rain,
    /// Wind load (W)
    Wind,
    /// Earthquake load (E)
    Seismic,
}

impl LoadType {
    /// All load type variants
    pub const ALL: [LoadType; 7] = [
        LoadType::Dead,
        LoadType::Live,
        LoadType::LiveRoof,
        LoadType::Snow,
        LoadType::Rain,
        LoadType::Wind,
        LoadType::Seismic,
    ];

    /// Get the short code used in combination labels
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::LiveRoof => "Lr",
            LoadType::Snow => "S",
            LoadType::Rain => "R",
            LoadType::Wind => "W",
            LoadType::Seismic => "E",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "D" | "DEAD" => Ok(LoadType::Dead),
            "L" | "LIVE" => Ok(LoadType::Live),
            "LR" | "LIVEROOF" | "ROOFLIVE" => Ok(LoadType::LiveRoof),
            "S" | "SNOW" => Ok(LoadType::Snow),
            "R" | "RAIN" => Ok(LoadType::Rain),
            "W" | "WIND" => Ok(LoadType::Wind),
            "E" | "EARTHQUAKE" | "SEISMIC" => Ok(LoadType::Seismic),
            _ => Err(CalcError::invalid_input(
                "load_type",
                s,
                "load type can only be 'D', 'L', 'Lr', 'S', 'R', 'W', or 'E'",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead",
            LoadType::Live => "Live",
            LoadType::LiveRoof => "Roof Live",
            LoadType::Snow => "Snow",
            LoadType::Rain => "Rain",
            LoadType::Wind => "Wind",
            LoadType::Seismic => "Earthquake",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Structure type for live-load reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    Roof,
    Floor,
}

impl StructureType {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "roof" => Ok(StructureType::Roof),
            "floor" => Ok(StructureType::Floor),
            _ => Err(CalcError::invalid_input(
                "structure_type",
                s,
                "structure_type can only be 'roof' or 'floor'",
            )),
        }
    }
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureType::Roof => write!(f, "roof"),
            StructureType::Floor => write!(f, "floor"),
        }
    }
}

/// A labelled load case: category magnitudes plus the context needed for
/// live-load reduction. Magnitudes are in whatever consistent unit the
/// limit state demands (lb, psi, or lb/ft); unset categories read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Case label (e.g. "roof joist")
    pub label: String,
    /// Magnitude per category; absent categories are zero
    pub magnitudes: HashMap<LoadType, f64>,
    /// Tributary area A_f (ft^2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tributary_area_sqft: Option<f64>,
    /// Roof slope F (inches of rise per foot)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_slope_rise_per_ft: Option<f64>,
    /// Structure type for live-load reduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_type: Option<StructureType>,
}

impl LoadCase {
    /// Create an empty load case
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            magnitudes: HashMap::new(),
            tributary_area_sqft: None,
            roof_slope_rise_per_ft: None,
            structure_type: None,
        }
    }

    /// Set the magnitude of a load category
    pub fn with_load(mut self, load_type: LoadType, magnitude: f64) -> Self {
        self.magnitudes.insert(load_type, magnitude);
        self
    }

    /// Set the tributary area A_f (ft^2)
    pub fn with_tributary_area(mut self, area_sqft: f64) -> Self {
        self.tributary_area_sqft = Some(area_sqft);
        self
    }

    /// Set the roof slope F (inches of rise per foot)
    pub fn with_roof_slope(mut self, rise_per_ft: f64) -> Self {
        self.roof_slope_rise_per_ft = Some(rise_per_ft);
        self
    }

    /// Set the structure type for live-load reduction
    pub fn with_structure_type(mut self, structure_type: StructureType) -> Self {
        self.structure_type = Some(structure_type);
        self
    }

    /// Get the magnitude of a category (zero when unset)
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.magnitudes.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Validate the case: all magnitudes finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (&load_type, &magnitude) in &self.magnitudes {
            if !magnitude.is_finite() || magnitude < 0.0 {
                return Err(CalcError::invalid_input(
                    load_type.code(),
                    magnitude.to_string(),
                    "Load magnitudes must be finite and non-negative",
                ));
            }
        }
        if let Some(area) = self.tributary_area_sqft {
            if !area.is_finite() || area <= 0.0 {
                return Err(CalcError::invalid_input(
                    "tributary_area_sqft",
                    area.to_string(),
                    "Tributary area must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Reduce the live load for this case using its context metadata.
    ///
    /// Uses the roof-live magnitude for roofs and the floor-live magnitude
    /// for floors; fails with `MissingField` when the needed metadata was
    /// never supplied.
    pub fn reduced_live_load(&self) -> CalcResult<f64> {
        let structure_type = self
            .structure_type
            .ok_or_else(|| CalcError::missing_field("structure_type"))?;
        let area = self
            .tributary_area_sqft
            .ok_or_else(|| CalcError::missing_field("tributary_area_sqft"))?;
        match structure_type {
            StructureType::Roof => {
                let slope = self
                    .roof_slope_rise_per_ft
                    .ok_or_else(|| CalcError::missing_field("roof_slope_rise_per_ft"))?;
                reduced_live_load(self.get(LoadType::LiveRoof), area, slope, structure_type)
            }
            StructureType::Floor => {
                reduced_live_load(self.get(LoadType::Live), area, 0.0, structure_type)
            }
        }
    }
}

/// Reduce a live load by tributary area and roof slope (AITC / IBC).
///
/// `l0_psf` is the minimum unreduced uniformly distributed live load,
/// `area_sqft` the tributary area A_f, and `slope_rise_per_ft` the inches
/// of rise per foot for a sloped roof (ignored for floors).
pub fn reduced_live_load(
    l0_psf: f64,
    area_sqft: f64,
    slope_rise_per_ft: f64,
    structure_type: StructureType,
) -> CalcResult<f64> {
    if !area_sqft.is_finite() || area_sqft <= 0.0 {
        return Err(CalcError::invalid_input(
            "area_sqft",
            area_sqft.to_string(),
            "Tributary area must be positive",
        ));
    }
    match structure_type {
        StructureType::Roof => {
            let r1 = if area_sqft <= 200.0 {
                1.0
            } else if area_sqft < 600.0 {
                1.2 - 0.001 * area_sqft
            } else {
                0.6
            };
            let r2 = if slope_rise_per_ft < 4.0 {
                1.0
            } else if slope_rise_per_ft < 12.0 {
                1.2 - 0.05 * slope_rise_per_ft
            } else {
                0.6
            };
            Ok(l0_psf * r1 * r2)
        }
        StructureType::Floor => {
            if area_sqft > 200.0 {
                Ok(l0_psf * (0.25 * 10.6 / area_sqft.sqrt()))
            } else {
                Ok(l0_psf)
            }
        }
    }
}

/// Load record as supplied by the surrounding record editor.
///
/// Unknown structure-type strings fail decoding with `InvalidInput`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "D": 10.0,
///   "Lr": 20.0,
///   "A_f": 400.0,
///   "F_slope": 6.0,
///   "structure_type": "roof"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    #[serde(rename = "D")]
    pub dead: f64,
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub live: Option<f64>,
    #[serde(rename = "Lr", default, skip_serializing_if = "Option::is_none")]
    pub live_roof: Option<f64>,
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<f64>,
    #[serde(rename = "R", default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    #[serde(rename = "W", default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    #[serde(rename = "E", default, skip_serializing_if = "Option::is_none")]
    pub seismic: Option<f64>,
    #[serde(rename = "A_f", default, skip_serializing_if = "Option::is_none")]
    pub tributary_area_sqft: Option<f64>,
    #[serde(rename = "F_slope", default, skip_serializing_if = "Option::is_none")]
    pub roof_slope_rise_per_ft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_type: Option<String>,
}

impl LoadRecord {
    /// Decode into a validated [`LoadCase`]
    pub fn decode(&self, label: impl Into<String>) -> CalcResult<LoadCase> {
        let mut case = LoadCase::new(label).with_load(LoadType::Dead, self.dead);
        for (load_type, magnitude) in [
            (LoadType::Live, self.live),
            (LoadType::LiveRoof, self.live_roof),
            (LoadType::Snow, self.snow),
            (LoadType::Rain, self.rain),
            (LoadType::Wind, self.wind),
            (LoadType::Seismic, self.seismic),
        ] {
            if let Some(magnitude) = magnitude {
                case = case.with_load(load_type, magnitude);
            }
        }
        case.tributary_area_sqft = self.tributary_area_sqft;
        case.roof_slope_rise_per_ft = self.roof_slope_rise_per_ft;
        if let Some(ref s) = self.structure_type {
            case.structure_type = Some(StructureType::from_str_flexible(s)?);
        }
        case.validate()?;
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roof_reduction() {
        // L0 = 20 psf, A_f = 400 ft^2, F = 6: R1 = 0.8, R2 = 0.9
        let reduced = reduced_live_load(20.0, 400.0, 6.0, StructureType::Roof).unwrap();
        assert!((reduced - 14.4).abs() < 1e-9);
    }

    #[test]
    fn test_roof_reduction_bounds() {
        // small flat roof: no reduction
        let reduced = reduced_live_load(20.0, 150.0, 2.0, StructureType::Roof).unwrap();
        assert_eq!(reduced, 20.0);

        // large steep roof: both factors floor at 0.6
        let reduced = reduced_live_load(20.0, 800.0, 14.0, StructureType::Roof).unwrap();
        assert!((reduced - 20.0 * 0.6 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_floor_reduction() {
        // small floor area: no reduction
        let reduced = reduced_live_load(40.0, 180.0, 0.0, StructureType::Floor).unwrap();
        assert_eq!(reduced, 40.0);

        let reduced = reduced_live_load(40.0, 400.0, 0.0, StructureType::Floor).unwrap();
        assert!((reduced - 40.0 * (0.25 * 10.6 / 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_reduction_rejects_bad_area() {
        assert!(reduced_live_load(20.0, 0.0, 6.0, StructureType::Roof).is_err());
        assert!(reduced_live_load(20.0, -50.0, 6.0, StructureType::Floor).is_err());
    }

    #[test]
    fn test_case_reduction_needs_metadata() {
        let case = LoadCase::new("joist").with_load(LoadType::LiveRoof, 20.0);
        let err = case.reduced_live_load().unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");

        let case = case
            .with_structure_type(StructureType::Roof)
            .with_tributary_area(400.0)
            .with_roof_slope(6.0);
        assert!((case.reduced_live_load().unwrap() - 14.4).abs() < 1e-9);
    }

    #[test]
    fn test_validation() {
        let case = LoadCase::new("bad").with_load(LoadType::Dead, -5.0);
        assert!(case.validate().is_err());

        let case = LoadCase::new("ok")
            .with_load(LoadType::Dead, 10.0)
            .with_load(LoadType::Live, 5.0);
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_unset_category_reads_zero() {
        let case = LoadCase::new("partial").with_load(LoadType::Dead, 10.0);
        assert_eq!(case.get(LoadType::Snow), 0.0);
        assert_eq!(case.get(LoadType::Dead), 10.0);
    }

    #[test]
    fn test_structure_type_parsing() {
        assert_eq!(
            StructureType::from_str_flexible("Roof").unwrap(),
            StructureType::Roof
        );
        let err = StructureType::from_str_flexible("wall").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_record_decoding() {
        let json = r#"{
            "D": 10.0,
            "Lr": 20.0,
            "A_f": 400.0,
            "F_slope": 6.0,
            "structure_type": "roof"
        }"#;
        let record: LoadRecord = serde_json::from_str(json).unwrap();
        let case = record.decode("roof joist").unwrap();
        assert_eq!(case.get(LoadType::Dead), 10.0);
        assert_eq!(case.get(LoadType::LiveRoof), 20.0);
        assert_eq!(case.structure_type, Some(StructureType::Roof));
    }

    #[test]
    fn test_record_rejects_unknown_structure_type() {
        let record = LoadRecord {
            dead: 10.0,
            live: None,
            live_roof: None,
            snow: None,
            rain: None,
            wind: None,
            seismic: None,
            tributary_area_sqft: None,
            roof_slope_rise_per_ft: None,
            structure_type: Some("bridge".to_string()),
        };
        assert!(record.decode("bad").is_err());
    }
}

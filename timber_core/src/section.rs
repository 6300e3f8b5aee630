//! # Section Model
//!
//! Rectangular cross-section geometry and its derived properties.
//! Dimensions are stored in inches; a [`Section`] is immutable once
//! constructed and every property is computed on demand from the stored
//! dimensions, so the derived values can never go stale.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::section::Section;
//!
//! let section = Section::new(1.5, 9.25, 144.0).unwrap();
//! assert_eq!(section.area_in2(), 13.875);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Rectangular member cross-section with its length, all in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Breadth b (width, inches)
    pub breadth_in: f64,
    /// Depth d (inches)
    pub depth_in: f64,
    /// Member length L (inches)
    pub length_in: f64,
}

impl Section {
    /// Create a section, validating that all dimensions are positive and
    /// finite.
    pub fn new(breadth_in: f64, depth_in: f64, length_in: f64) -> CalcResult<Self> {
        for (field, value) in [
            ("breadth_in", breadth_in),
            ("depth_in", depth_in),
            ("length_in", length_in),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Section dimensions must be positive and finite",
                ));
            }
        }
        Ok(Section {
            breadth_in,
            depth_in,
            length_in,
        })
    }

    /// Gross cross-sectional area A = b*d (in^2)
    pub fn area_in2(&self) -> f64 {
        self.breadth_in * self.depth_in
    }

    /// Moment of inertia about the strong axis I = b*d^3/12 (in^4)
    pub fn moment_of_inertia_in4(&self) -> f64 {
        self.breadth_in * self.depth_in.powi(3) / 12.0
    }

    /// Section modulus about the strong axis S = b*d^2/6 (in^3)
    pub fn section_modulus_in3(&self) -> f64 {
        self.breadth_in * self.depth_in.powi(2) / 6.0
    }

    /// Flat-use factor C_fu for sawn timbers loaded about the weak axis.
    ///
    /// (12/d)^(1/9) for d > 12 in, 1.0 otherwise.
    pub fn flat_use_factor(&self) -> f64 {
        if self.depth_in > 12.0 {
            (12.0 / self.depth_in).powf(1.0 / 9.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_properties() {
        // nominal 2x10: 1.5 x 9.25
        let section = Section::new(1.5, 9.25, 144.0).unwrap();
        assert!((section.area_in2() - 13.875).abs() < 1e-9);
        assert!((section.moment_of_inertia_in4() - 98.9316).abs() < 1e-3);
        assert!((section.section_modulus_in3() - 21.3906).abs() < 1e-3);
    }

    #[test]
    fn test_properties_track_dimensions() {
        // properties are computed from the stored dimensions on demand
        let a = Section::new(3.0, 12.0, 120.0).unwrap();
        let b = Section::new(3.0, 14.0, 120.0).unwrap();
        assert!(b.moment_of_inertia_in4() > a.moment_of_inertia_in4());
    }

    #[test]
    fn test_flat_use_factor() {
        let shallow = Section::new(3.0, 12.0, 120.0).unwrap();
        assert_eq!(shallow.flat_use_factor(), 1.0);

        let deep = Section::new(5.125, 16.5, 240.0).unwrap();
        let expected = (12.0 / 16.5_f64).powf(1.0 / 9.0);
        assert!((deep.flat_use_factor() - expected).abs() < 1e-12);
        assert!(deep.flat_use_factor() < 1.0);
    }

    #[test]
    fn test_rejects_nonpositive_dimensions() {
        assert!(Section::new(0.0, 9.25, 144.0).is_err());
        assert!(Section::new(1.5, -9.25, 144.0).is_err());
        assert!(Section::new(1.5, 9.25, f64::INFINITY).is_err());
    }

    #[test]
    fn test_serialization() {
        let section = Section::new(1.5, 9.25, 144.0).unwrap();
        let json = serde_json::to_string(&section).unwrap();
        let roundtrip: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(section, roundtrip);
    }
}

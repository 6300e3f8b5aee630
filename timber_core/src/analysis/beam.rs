//! Beam limit-state formulas: bending and shear stresses, deflection
//! under the six standard load cases, self-weight, and moment envelopes
//! built from applied-force bundles.
//!
//! All lengths are in inches and forces in pounds; uniform loads are in
//! pounds per inch of length.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::stability::MomentEnvelope;

/// Bending stress for a rectangular section: f_b = 6M / (b * d^2)
/// (AITC Eq. 4.2.1-1).
pub fn bending_stress(moment_inlb: f64, breadth_in: f64, depth_in: f64) -> CalcResult<f64> {
    if breadth_in <= 0.0 || depth_in <= 0.0 {
        return Err(CalcError::invalid_input(
            "section",
            format!("b={breadth_in}, d={depth_in}"),
            "Section dimensions must be positive",
        ));
    }
    Ok(6.0 * moment_inlb / (breadth_in * depth_in.powi(2)))
}

/// End-reaction shear from a uniform load, excluding the load applied
/// within one depth of the support: V = w*L/2 - w*d.
pub fn shear_force(w_lb_per_in: f64, length_in: f64, depth_in: f64) -> f64 {
    w_lb_per_in * length_in / 2.0 - w_lb_per_in * depth_in
}

/// Shear stress for a rectangular section: f_v = 3V / (2 * b * d)
/// (AITC Eq. 4.2.2-1).
pub fn shear_stress(shear_lb: f64, breadth_in: f64, depth_in: f64) -> CalcResult<f64> {
    if breadth_in <= 0.0 || depth_in <= 0.0 {
        return Err(CalcError::invalid_input(
            "section",
            format!("b={breadth_in}, d={depth_in}"),
            "Section dimensions must be positive",
        ));
    }
    Ok(3.0 * shear_lb / (2.0 * breadth_in * depth_in))
}

/// Beam self-weight per inch of length: w = b * d * rho
/// (density in pounds per cubic inch).
pub fn self_weight(breadth_in: f64, depth_in: f64, density_pci: f64) -> f64 {
    breadth_in * depth_in * density_pci
}

/// The six standard deflection load cases, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeflectionCase {
    /// 0: cantilever, point load at the free end
    CantileverEndPoint,
    /// 1: cantilever, point load at distance a from the support
    CantileverPointAt,
    /// 2: simply supported, uniform load
    SimpleUniform,
    /// 3: simply supported, triangular load with apex at midspan
    SimpleTriangularMidspan,
    /// 4: simply supported, partial triangular load
    SimplePartialTriangular,
    /// 5: fixed at both ends, uniform load
    FixedUniform,
}

impl DeflectionCase {
    /// Resolve a case from its numeric index (0-5)
    pub fn from_index(index: u8) -> CalcResult<Self> {
        match index {
            0 => Ok(DeflectionCase::CantileverEndPoint),
            1 => Ok(DeflectionCase::CantileverPointAt),
            2 => Ok(DeflectionCase::SimpleUniform),
            3 => Ok(DeflectionCase::SimpleTriangularMidspan),
            4 => Ok(DeflectionCase::SimplePartialTriangular),
            5 => Ok(DeflectionCase::FixedUniform),
            _ => Err(CalcError::invalid_input(
                "deflection_case",
                index.to_string(),
                "Deflection case index must be between 0 and 5",
            )),
        }
    }

    /// Numeric index of this case
    pub fn index(&self) -> u8 {
        match self {
            DeflectionCase::CantileverEndPoint => 0,
            DeflectionCase::CantileverPointAt => 1,
            DeflectionCase::SimpleUniform => 2,
            DeflectionCase::SimpleTriangularMidspan => 3,
            DeflectionCase::SimplePartialTriangular => 4,
            DeflectionCase::FixedUniform => 5,
        }
    }
}

/// Maximum deflection for one of the standard load cases.
///
/// `w` is the load magnitude (lb for point loads, lb/in for distributed
/// loads); `a_in` is the point-load location, used only by
/// `CantileverPointAt`.
pub fn deflection(
    w: f64,
    case: DeflectionCase,
    a_in: f64,
    length_in: f64,
    e_psi: f64,
    moment_of_inertia_in4: f64,
) -> CalcResult<f64> {
    if length_in <= 0.0 || e_psi <= 0.0 || moment_of_inertia_in4 <= 0.0 {
        return Err(CalcError::invalid_input(
            "deflection",
            format!("L={length_in}, E={e_psi}, I={moment_of_inertia_in4}"),
            "Length, modulus, and moment of inertia must be positive",
        ));
    }
    let l = length_in;
    let ei = e_psi * moment_of_inertia_in4;
    match case {
        DeflectionCase::CantileverEndPoint => Ok(w * l.powi(3) / (3.0 * ei)),
        DeflectionCase::CantileverPointAt => {
            if !(0.0..=l).contains(&a_in) {
                return Err(CalcError::invalid_input(
                    "a_in",
                    a_in.to_string(),
                    "Point-load location must lie within the span",
                ));
            }
            Ok(w * a_in.powi(2) * (3.0 * l - a_in) / (6.0 * ei))
        }
        DeflectionCase::SimpleUniform => Ok(w * l.powi(4) / (8.0 * ei)),
        DeflectionCase::SimpleTriangularMidspan => Ok(w * l.powi(4) / (30.0 * ei)),
        DeflectionCase::SimplePartialTriangular => Ok(11.0 * w * l.powi(4) / (120.0 * ei)),
        DeflectionCase::FixedUniform => Ok(w * l.powi(2) / (2.0 * ei)),
    }
}

/// Applied forces along the unbraced length, from which moments are
/// derived (AITC Eq. 3.4.3.1.2-2 inputs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum ForceBundle {
    /// Maximum force plus forces at the quarter points
    QuarterPoint {
        f_max: f64,
        f_a: f64,
        f_b: f64,
        f_c: f64,
    },
    /// End forces plus the force at the centerline; `f_0` is the end
    /// producing the larger compression on the bottom face
    EndForces { f_0: f64, f_1: f64, f_cl: f64 },
    /// A single force at the centerline
    CenterPoint { f_cl: f64 },
    /// Uniform loads, summed
    Uniform { forces: Vec<f64> },
}

/// Moments derived from a [`ForceBundle`]: either a full envelope for
/// the bending coefficient, or a single midspan moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum DerivedMoments {
    Envelope(MomentEnvelope),
    Midspan { moment_inlb: f64 },
}

/// Derive beam moments from an applied-force bundle over a span.
pub fn moments_from_forces(bundle: &ForceBundle, length_in: f64) -> CalcResult<DerivedMoments> {
    if length_in <= 0.0 {
        return Err(CalcError::invalid_input(
            "length_in",
            length_in.to_string(),
            "Span length must be positive",
        ));
    }
    let l = length_in;
    match bundle {
        ForceBundle::QuarterPoint {
            f_max,
            f_a,
            f_b,
            f_c,
        } => Ok(DerivedMoments::Envelope(MomentEnvelope::Quarterly {
            m_max: f_max * l,
            m_a: f_a * l / 4.0,
            m_b: f_b * l / 2.0,
            m_c: f_c * 3.0 * l / 4.0,
        })),
        ForceBundle::EndForces { f_0, f_1, f_cl } => {
            Ok(DerivedMoments::Envelope(MomentEnvelope::EndMoments {
                m_0: f_0 * l,
                m_1: f_1 * l,
                m_cl: f_cl * l / 2.0,
            }))
        }
        ForceBundle::CenterPoint { f_cl } => Ok(DerivedMoments::Midspan {
            moment_inlb: f_cl * l / 8.0,
        }),
        ForceBundle::Uniform { forces } => {
            let total: f64 = forces.iter().sum();
            Ok(DerivedMoments::Midspan {
                moment_inlb: total * l.powi(2) / 8.0,
            })
        }
    }
}

//! # Stability Engine
//!
//! Slenderness, critical buckling design values, and beam/column
//! stability factors per AITC chapter 3. Everything here is a free
//! function dispatching on [`MemberClass`] and
//! [`WoodKind`](crate::materials::WoodKind); the member analyzer wires
//! these together per limit state.
//!
//! Slenderness caps are advisory: exceeding one accumulates a
//! [`Diagnostic`] but never fails the computation.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::stability::{column_slenderness_ratio, effective_length};
//!
//! let l_e = effective_length(120.0, 1.0);
//! let s_r = column_slenderness_ratio(l_e, 6.0).unwrap();
//! assert_eq!(s_r, 20.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, Diagnostic};
use crate::materials::WoodKind;

/// Lateral support constant k from AITC Table 3.4.3.1.2-1; this value is
/// the conservative choice for cases not listed there.
pub const DEFAULT_LATERAL_SUPPORT_K: f64 = 1.73;

/// Member class for stability dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberClass {
    Beam,
    Column,
}

impl std::fmt::Display for MemberClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberClass::Beam => write!(f, "beam"),
            MemberClass::Column => write!(f, "column"),
        }
    }
}

/// Effective length l_e = K_e * l_u (AITC Table 3.4.3.9.2-1 supplies K_e)
pub fn effective_length(unbraced_length_in: f64, k_e: f64) -> f64 {
    k_e * unbraced_length_in
}

/// Moment values along the unbraced length, used for the bending
/// coefficient C_b (AITC Eq. 3.4.3.1.2-2 and -5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "kebab-case")]
pub enum MomentEnvelope {
    /// Maximum moment plus moments at the quarter, half, and
    /// three-quarter points of the unbraced length
    Quarterly {
        m_max: f64,
        m_a: f64,
        m_b: f64,
        m_c: f64,
    },
    /// End moments plus the moment at the centerline of the unbraced
    /// length; `m_0` is the end producing the larger compression on the
    /// bottom face
    EndMoments { m_0: f64, m_1: f64, m_cl: f64 },
}

impl MomentEnvelope {
    /// Bending coefficient C_b for this envelope.
    pub fn bending_coefficient(&self) -> CalcResult<f64> {
        match *self {
            MomentEnvelope::Quarterly {
                m_max,
                m_a,
                m_b,
                m_c,
            } => {
                let denom = 3.0 * m_a + 4.0 * m_b + 3.0 * m_c + 2.5 * m_max;
                if denom == 0.0 {
                    return Err(CalcError::invalid_input(
                        "moment_envelope",
                        format!("M_max={m_max}, M_a={m_a}, M_b={m_b}, M_c={m_c}"),
                        "Quarter-point moments sum to zero",
                    ));
                }
                Ok(12.5 * m_max / denom)
            }
            MomentEnvelope::EndMoments { m_0, m_1, m_cl } => {
                if m_0 == 0.0 || m_1 + m_0 == 0.0 {
                    return Err(CalcError::invalid_input(
                        "moment_envelope",
                        format!("M_0={m_0}, M_1={m_1}, M_CL={m_cl}"),
                        "End moments produce a zero divisor",
                    ));
                }
                Ok(3.0 - (2.0 / 3.0) * (m_1 / m_0) - (8.0 / 3.0) * m_cl / (m_1 + m_0))
            }
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive and finite",
        ));
    }
    Ok(())
}

/// Column slenderness ratio s_r = l_e / d
pub fn column_slenderness_ratio(effective_length_in: f64, depth_in: f64) -> CalcResult<f64> {
    check_positive("effective_length_in", effective_length_in)?;
    check_positive("depth_in", depth_in)?;
    Ok(effective_length_in / depth_in)
}

/// Beam slenderness ratio without moment data: s_r = sqrt(l_e * d / b^2)
pub fn beam_slenderness_ratio(
    effective_length_in: f64,
    depth_in: f64,
    breadth_in: f64,
) -> CalcResult<f64> {
    check_positive("effective_length_in", effective_length_in)?;
    check_positive("depth_in", depth_in)?;
    check_positive("breadth_in", breadth_in)?;
    Ok((effective_length_in * depth_in / breadth_in.powi(2)).sqrt())
}

/// Beam slenderness ratio from a moment envelope (AITC Eq. 3.4.3.1.2-2).
///
/// `k` is the lateral support constant; pass
/// [`DEFAULT_LATERAL_SUPPORT_K`] unless a tabulated case applies.
pub fn beam_slenderness_with_envelope(
    unbraced_length_in: f64,
    depth_in: f64,
    breadth_in: f64,
    envelope: &MomentEnvelope,
    k: f64,
) -> CalcResult<f64> {
    check_positive("unbraced_length_in", unbraced_length_in)?;
    check_positive("depth_in", depth_in)?;
    check_positive("breadth_in", breadth_in)?;
    check_positive("k", k)?;

    let c_b = envelope.bending_coefficient()?;
    if c_b <= 0.0 {
        return Err(CalcError::invalid_input(
            "moment_envelope",
            c_b.to_string(),
            "Bending coefficient C_b must be positive",
        ));
    }
    let eta = 1.3 * k * depth_in / unbraced_length_in;
    let c_e = (eta.powi(2) + 1.0).sqrt() - eta;
    Ok((1.84 * unbraced_length_in * depth_in / (c_b * c_e * breadth_in.powi(2))).sqrt())
}

/// Critical buckling design value F_E = scale * E_min' / s_r^2
/// (AITC Eq. 3.4.3.1-2 / 3.4.3.9-2).
///
/// Exceeding the slenderness cap for the member class pushes a
/// [`Diagnostic`] and continues. Round-log beams have no scale defined
/// by the governing reference and fail with `Unsupported`.
pub fn critical_buckling_design_value(
    slenderness_ratio: f64,
    e_min_prime_psi: f64,
    kind: WoodKind,
    class: MemberClass,
    diagnostics: &mut Vec<Diagnostic>,
) -> CalcResult<f64> {
    check_positive("slenderness_ratio", slenderness_ratio)?;
    check_positive("e_min_prime_psi", e_min_prime_psi)?;

    let scale = match class {
        MemberClass::Column => match kind {
            WoodKind::RoundLog => {
                if slenderness_ratio > 43.0 {
                    diagnostics.push(Diagnostic::SlendernessExceeded {
                        ratio: slenderness_ratio,
                        service_limit: 43.0,
                        construction_limit: None,
                    });
                }
                0.617
            }
            WoodKind::SawnLumber | WoodKind::Glulam => {
                if slenderness_ratio > 50.0 {
                    diagnostics.push(Diagnostic::SlendernessExceeded {
                        ratio: slenderness_ratio,
                        service_limit: 50.0,
                        construction_limit: Some(75.0),
                    });
                }
                0.822
            }
        },
        MemberClass::Beam => match kind {
            WoodKind::RoundLog => {
                return Err(CalcError::unsupported(
                    "critical_buckling_design_value",
                    "beam buckling for round logs is not defined by the governing reference",
                ))
            }
            WoodKind::SawnLumber | WoodKind::Glulam => 1.2,
        },
    };

    Ok(scale * e_min_prime_psi / slenderness_ratio.powi(2))
}

/// Stability factor C_P (columns, AITC Eq. 3.4.3.9-1) or C_L (beams,
/// AITC Eq. 3.4.3.1-1).
///
/// `f_star_psi` is the reference stress with every applicable adjustment
/// factor except the stability factor itself (and, for beams, C_fu, C_V,
/// and C_I).
pub fn stability_factor(
    f_e_psi: f64,
    f_star_psi: f64,
    kind: WoodKind,
    class: MemberClass,
) -> CalcResult<f64> {
    check_positive("f_e_psi", f_e_psi)?;
    check_positive("f_star_psi", f_star_psi)?;

    let ratio = f_e_psi / f_star_psi;
    let (alpha, c) = match class {
        MemberClass::Column => {
            let c = match kind {
                WoodKind::SawnLumber => 0.8,
                WoodKind::RoundLog => 0.85,
                WoodKind::Glulam => 0.9,
            };
            ((1.0 + ratio) / (2.0 * c), c)
        }
        MemberClass::Beam => ((1.0 + ratio) / 1.9, 0.95),
    };

    Ok(alpha - (alpha.powi(2) - ratio / c).sqrt())
}

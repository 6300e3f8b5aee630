//! # Member Analyzer
//!
//! Orchestrates the material, section, load, and stability modules into
//! per-limit-state verdicts for beams, columns, and beam-columns.
//!
//! The [`Analyzer`] is a staged builder: material first, then section
//! and member kind, then loads. Calling [`Analyzer::analyze`] before the
//! inputs are complete fails with `IncompleteInput`. Analysis itself
//! never mutates the configured inputs, so re-analyzing equal inputs
//! yields identical results.
//!
//! Overstress is not an error: a failing limit state comes back with
//! [`Verdict::Exceeds`] and a utilization above 1.0.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::analysis::{Analyzer, MemberKind, Verdict};
//! use timber_core::loads::{LoadCase, LoadType};
//! use timber_core::materials::{Material, WoodTypeRecord, WoodKind, WoodGrade};
//! use timber_core::section::Section;
//!
//! let material = Material::new(WoodTypeRecord {
//!     name: "Spruce-Pine-Fir No.2".to_string(),
//!     kind: WoodKind::SawnLumber,
//!     grade: WoodGrade::No2,
//!     e_psi: 1_400_000.0,
//!     e_min_psi: None,
//!     specific_gravity: 0.42,
//!     fv_psi: 135.0,
//!     fc_psi: 1150.0,
//!     fc_perp_psi: 425.0,
//!     fb_psi: 875.0,
//!     ft_psi: 450.0,
//! }).unwrap();
//! let section = Section::new(1.5, 9.25, 144.0).unwrap();
//!
//! let mut analyzer = Analyzer::new();
//! analyzer.set_material(material);
//! analyzer.set_section(MemberKind::Beam, section).unwrap();
//! analyzer
//!     .set_loads(
//!         LoadCase::new("floor")
//!             .with_load(LoadType::Dead, 2.0)
//!             .with_load(LoadType::Live, 5.0),
//!     )
//!     .unwrap();
//!
//! let result = analyzer.analyze().unwrap();
//! assert_eq!(result.governing.as_deref(), Some("D+L"));
//! ```

pub mod beam;
pub mod beam_column;
pub mod column;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, Diagnostic};
use crate::loads::combinations::{asd_combinations, governing, LoadCombination};
use crate::loads::LoadCase;
use crate::materials::{Material, WoodKind, WoodTypeRecord};
use crate::section::Section;
use crate::stability::{
    beam_slenderness_ratio, beam_slenderness_with_envelope, column_slenderness_ratio,
    critical_buckling_design_value, effective_length, stability_factor, MemberClass,
    MomentEnvelope, DEFAULT_LATERAL_SUPPORT_K,
};
use crate::units::{Feet, Inches};

use self::beam_column::{interaction, InteractionInput};

/// Member kind, with the beam-column variant carrying its eccentricities
/// and effective lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MemberKind {
    Beam,
    Column,
    BeamColumn {
        /// Strong axis load eccentricity (in)
        e1_in: f64,
        /// Weak axis load eccentricity (in)
        e2_in: f64,
        /// Effective length for column buckling (in)
        column_effective_length_in: f64,
        /// Effective length for lateral-torsional buckling (in)
        beam_effective_length_in: f64,
    },
}

impl MemberKind {
    /// Short code for labels and records
    pub fn code(&self) -> &'static str {
        match self {
            MemberKind::Beam => "beam",
            MemberKind::Column => "column",
            MemberKind::BeamColumn { .. } => "beam-column",
        }
    }
}

/// A structural member: kind, material, and cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    pub material: Material,
    pub section: Section,
}

impl Member {
    pub fn new(kind: MemberKind, material: Material, section: Section) -> Self {
        Member {
            kind,
            material,
            section,
        }
    }
}

/// Pass/fail verdict for a limit state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Ok,
    Exceeds,
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, Verdict::Ok)
    }
}

/// One evaluated limit state: demand against adjusted allowable, with
/// the utilization ratio and verdict. Units are named in `name` (psi for
/// stresses, inches for deflection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitState {
    pub name: String,
    pub demand: f64,
    pub allowable: f64,
    /// demand / allowable
    pub unity: f64,
    pub verdict: Verdict,
}

impl LimitState {
    /// Evaluate a limit state from its demand and allowable values.
    pub fn evaluate(
        name: impl Into<String>,
        demand: f64,
        allowable: f64,
    ) -> CalcResult<LimitState> {
        if !allowable.is_finite() || allowable <= 0.0 {
            return Err(CalcError::invalid_input(
                "allowable",
                allowable.to_string(),
                "Allowable value must be positive and finite",
            ));
        }
        let unity = demand / allowable;
        Ok(LimitState {
            name: name.into(),
            demand,
            allowable,
            unity,
            verdict: if demand <= allowable {
                Verdict::Ok
            } else {
                Verdict::Exceeds
            },
        })
    }
}

/// Full analysis output for one member under one load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Member kind code ("beam", "column", "beam-column")
    pub member_kind: String,
    pub limit_states: Vec<LimitState>,
    /// Every ASD combination evaluated
    pub combinations: Vec<LoadCombination>,
    /// Label of the governing combination
    pub governing: Option<String>,
    /// Interaction equation value, for beam-columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    /// True when every limit state passed
    pub fn passes(&self) -> bool {
        self.limit_states.iter().all(|ls| ls.verdict.is_ok())
    }
}

/// Analyzer configuration stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalyzerState {
    Unconfigured,
    MaterialSet,
    SectionSet,
    LoadsSet,
    Analyzed,
}

/// Staged builder for member analysis. Inputs must be supplied in
/// dependency order: material, then section and kind, then loads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    material: Option<Material>,
    kind: Option<MemberKind>,
    section: Option<Section>,
    loads: Option<LoadCase>,
    analyzed: bool,

    effective_length_factor: f64,
    net_area_in2: Option<f64>,
    density_pci: Option<f64>,
    southern_pine: bool,
    moment_envelope: Option<MomentEnvelope>,
    lateral_support_k: f64,
    deflection_case: beam::DeflectionCase,
    deflection_point_in: f64,
    deflection_limit_ratio: f64,
    bending_stresses_psi: (f64, f64),
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            material: None,
            kind: None,
            section: None,
            loads: None,
            analyzed: false,
            effective_length_factor: 1.0,
            net_area_in2: None,
            density_pci: None,
            southern_pine: false,
            moment_envelope: None,
            lateral_support_k: DEFAULT_LATERAL_SUPPORT_K,
            deflection_case: beam::DeflectionCase::SimpleUniform,
            deflection_point_in: 0.0,
            deflection_limit_ratio: 240.0,
            bending_stresses_psi: (0.0, 0.0),
        }
    }

    /// Current configuration stage
    pub fn state(&self) -> AnalyzerState {
        if self.analyzed {
            AnalyzerState::Analyzed
        } else if self.loads.is_some() {
            AnalyzerState::LoadsSet
        } else if self.section.is_some() {
            AnalyzerState::SectionSet
        } else if self.material.is_some() {
            AnalyzerState::MaterialSet
        } else {
            AnalyzerState::Unconfigured
        }
    }

    /// Set the material (first stage).
    pub fn set_material(&mut self, material: Material) -> &mut Self {
        self.material = Some(material);
        self.analyzed = false;
        self
    }

    /// Set the member kind and cross-section. Requires a material.
    pub fn set_section(&mut self, kind: MemberKind, section: Section) -> CalcResult<&mut Self> {
        if self.material.is_none() {
            return Err(CalcError::incomplete_input("material", "set_section"));
        }
        self.kind = Some(kind);
        self.section = Some(section);
        self.analyzed = false;
        Ok(self)
    }

    /// Set material, kind, and section at once from a decoded [`Member`].
    pub fn set_member(&mut self, member: Member) -> &mut Self {
        self.material = Some(member.material);
        self.kind = Some(member.kind);
        self.section = Some(member.section);
        self.analyzed = false;
        self
    }

    /// Set the load case (final required stage). Requires a section.
    pub fn set_loads(&mut self, loads: LoadCase) -> CalcResult<&mut Self> {
        if self.section.is_none() {
            return Err(CalcError::incomplete_input("section", "set_loads"));
        }
        loads.validate()?;
        self.loads = Some(loads);
        self.analyzed = false;
        Ok(self)
    }

    /// Effective-length factor K_e (AITC Table 3.4.3.9.2-1; default 1.0)
    pub fn with_effective_length_factor(&mut self, k_e: f64) -> &mut Self {
        self.effective_length_factor = k_e;
        self
    }

    /// Net cross-sectional area after holes and notches, enabling the
    /// net-section compression check
    pub fn with_net_area(&mut self, area_in2: f64) -> &mut Self {
        self.net_area_in2 = Some(area_in2);
        self
    }

    /// Wood density (pounds per cubic inch); when set, member self-weight
    /// is added to the dead load before combinations are evaluated
    pub fn with_density(&mut self, density_pci: f64) -> &mut Self {
        self.density_pci = Some(density_pci);
        self
    }

    /// Treat the glulam species as Southern Pine for the volume factor
    pub fn with_southern_pine(&mut self, southern_pine: bool) -> &mut Self {
        self.southern_pine = southern_pine;
        self
    }

    /// Moment envelope along the unbraced length, refining the beam
    /// slenderness ratio via the bending coefficient C_b
    pub fn with_moment_envelope(&mut self, envelope: MomentEnvelope) -> &mut Self {
        self.moment_envelope = Some(envelope);
        self
    }

    /// Lateral support constant k (AITC Table 3.4.3.1.2-1)
    pub fn with_lateral_support_k(&mut self, k: f64) -> &mut Self {
        self.lateral_support_k = k;
        self
    }

    /// Deflection load case and point-load location (default: simply
    /// supported uniform load)
    pub fn with_deflection_case(&mut self, case: beam::DeflectionCase, a_in: f64) -> &mut Self {
        self.deflection_case = case;
        self.deflection_point_in = a_in;
        self
    }

    /// Deflection limit as a span ratio L/n (default n = 240)
    pub fn with_deflection_limit_ratio(&mut self, ratio: f64) -> &mut Self {
        self.deflection_limit_ratio = ratio;
        self
    }

    /// Applied bending stresses (strong axis, weak axis) for the
    /// beam-column interaction check
    pub fn with_bending_stresses(&mut self, f_b1_psi: f64, f_b2_psi: f64) -> &mut Self {
        self.bending_stresses_psi = (f_b1_psi, f_b2_psi);
        self
    }

    /// Run the analysis. Fails with `IncompleteInput` unless material,
    /// section, and loads have all been set.
    pub fn analyze(&mut self) -> CalcResult<AnalysisResult> {
        let material = self
            .material
            .as_ref()
            .ok_or_else(|| CalcError::incomplete_input("material", "analyze"))?;
        let kind = self
            .kind
            .ok_or_else(|| CalcError::incomplete_input("section", "analyze"))?;
        let section = self
            .section
            .as_ref()
            .ok_or_else(|| CalcError::incomplete_input("section", "analyze"))?;
        let loads = self
            .loads
            .as_ref()
            .ok_or_else(|| CalcError::incomplete_input("loads", "analyze"))?;

        let result = match kind {
            MemberKind::Beam => self.analyze_beam(material, section, loads),
            MemberKind::Column => self.analyze_column(material, section, loads),
            MemberKind::BeamColumn {
                e1_in,
                e2_in,
                column_effective_length_in,
                beam_effective_length_in,
            } => self.analyze_beam_column(
                material,
                section,
                loads,
                e1_in,
                e2_in,
                column_effective_length_in,
                beam_effective_length_in,
            ),
        }?;
        self.analyzed = true;
        Ok(result)
    }

    // Beam dead loads are per inch of length, so self-weight enters as
    // b*d*rho; axial members carry their whole weight, b*d*L*rho.
    fn combined_loads(&self, section: &Section, loads: &LoadCase, axial: bool) -> LoadCase {
        match self.density_pci {
            Some(density) => {
                let mut w_sw =
                    beam::self_weight(section.breadth_in, section.depth_in, density);
                if axial {
                    w_sw *= section.length_in;
                }
                let mut case = loads.clone();
                let dead = case.get(crate::loads::LoadType::Dead);
                case.magnitudes
                    .insert(crate::loads::LoadType::Dead, dead + w_sw);
                case
            }
            None => loads.clone(),
        }
    }

    // Beam loads are uniform loads in pounds per inch of length.
    fn analyze_beam(
        &self,
        material: &Material,
        section: &Section,
        loads: &LoadCase,
    ) -> CalcResult<AnalysisResult> {
        let mut diagnostics = Vec::new();
        let case = self.combined_loads(section, loads, false);
        let combinations = asd_combinations(&case)?;
        let gov = governing(&combinations)
            .ok_or_else(|| CalcError::incomplete_input("loads", "analyze"))?;
        let w = gov.value;
        let gov_label = gov.label.clone();

        let b = section.breadth_in;
        let d = section.depth_in;
        let l = section.length_in;

        // lateral stability
        let s_r = match &self.moment_envelope {
            Some(envelope) => beam_slenderness_with_envelope(
                l,
                d,
                b,
                envelope,
                self.lateral_support_k,
            )?,
            None => {
                let l_e = effective_length(l, self.effective_length_factor);
                beam_slenderness_ratio(l_e, d, b)?
            }
        };
        let f_be = critical_buckling_design_value(
            s_r,
            material.e_min_psi,
            material.kind,
            MemberClass::Beam,
            &mut diagnostics,
        )?;
        let c_l = stability_factor(f_be, material.fb_psi, material.kind, MemberClass::Beam)?;
        let c_v = if material.kind == WoodKind::Glulam {
            let length_ft: Feet = Inches(l).into();
            material.volume_factor(b, d, length_ft.value(), self.southern_pine)?
        } else {
            1.0
        };
        let f_b_prime = material.fb_psi * c_l * c_v * section.flat_use_factor();

        let moment = w * l.powi(2) / 8.0;
        let f_b = beam::bending_stress(moment, b, d)?;
        let mut limit_states = vec![LimitState::evaluate("bending (psi)", f_b, f_b_prime)?];

        let v = beam::shear_force(w, l, d);
        let f_v = beam::shear_stress(v, b, d)?;
        limit_states.push(LimitState::evaluate("shear (psi)", f_v, material.fv_psi)?);

        let delta = beam::deflection(
            w,
            self.deflection_case,
            self.deflection_point_in,
            l,
            material.e_psi,
            section.moment_of_inertia_in4(),
        )?;
        limit_states.push(LimitState::evaluate(
            "deflection (in)",
            delta,
            l / self.deflection_limit_ratio,
        )?);

        Ok(AnalysisResult {
            member_kind: MemberKind::Beam.code().to_string(),
            limit_states,
            combinations,
            governing: Some(gov_label),
            interaction: None,
            diagnostics,
        })
    }

    // Column loads are concentric axial loads in pounds.
    fn analyze_column(
        &self,
        material: &Material,
        section: &Section,
        loads: &LoadCase,
    ) -> CalcResult<AnalysisResult> {
        let mut diagnostics = Vec::new();
        let case = self.combined_loads(section, loads, true);
        let combinations = asd_combinations(&case)?;
        let gov = governing(&combinations)
            .ok_or_else(|| CalcError::incomplete_input("loads", "analyze"))?;
        let p = gov.value;
        let gov_label = gov.label.clone();

        let l_e = effective_length(section.length_in, self.effective_length_factor);
        let s_r = column_slenderness_ratio(l_e, section.depth_in)?;
        let f_ce = critical_buckling_design_value(
            s_r,
            material.e_min_psi,
            material.kind,
            MemberClass::Column,
            &mut diagnostics,
        )?;
        let c_p = stability_factor(f_ce, material.fc_psi, material.kind, MemberClass::Column)?;
        let f_c_prime = material.fc_psi * c_p;
        let f_c_star = material.fc_psi;

        let mut limit_states = vec![column::gross_section_check(
            p,
            section.area_in2(),
            f_c_prime,
        )?];
        if let Some(a_n) = self.net_area_in2 {
            limit_states.push(column::net_section_check(p, a_n, f_c_star)?);
        }

        Ok(AnalysisResult {
            member_kind: MemberKind::Column.code().to_string(),
            limit_states,
            combinations,
            governing: Some(gov_label),
            interaction: None,
            diagnostics,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn analyze_beam_column(
        &self,
        material: &Material,
        section: &Section,
        loads: &LoadCase,
        e1_in: f64,
        e2_in: f64,
        l_e_c_in: f64,
        l_e_b_in: f64,
    ) -> CalcResult<AnalysisResult> {
        let mut diagnostics = Vec::new();
        let case = self.combined_loads(section, loads, true);
        let combinations = asd_combinations(&case)?;
        let gov = governing(&combinations)
            .ok_or_else(|| CalcError::incomplete_input("loads", "analyze"))?;
        let p = gov.value;
        let gov_label = gov.label.clone();

        // d1 is the wide face, d2 the narrow face
        let d1 = section.depth_in;
        let d2 = section.breadth_in;
        let f_c = column::compression_stress(p, section.area_in2())?;

        let f_ce1 = critical_buckling_design_value(
            column_slenderness_ratio(l_e_c_in, d1)?,
            material.e_min_psi,
            material.kind,
            MemberClass::Column,
            &mut diagnostics,
        )?;
        let f_ce2 = critical_buckling_design_value(
            column_slenderness_ratio(l_e_c_in, d2)?,
            material.e_min_psi,
            material.kind,
            MemberClass::Column,
            &mut diagnostics,
        )?;
        let f_be = critical_buckling_design_value(
            beam_slenderness_ratio(l_e_b_in, d1, d2)?,
            material.e_min_psi,
            material.kind,
            MemberClass::Beam,
            &mut diagnostics,
        )?;

        // the weaker axis governs the column stability factor
        let c_p = stability_factor(
            f_ce1.min(f_ce2),
            material.fc_psi,
            material.kind,
            MemberClass::Column,
        )?;
        let f_c_prime = material.fc_psi * c_p;

        let c_l = stability_factor(f_be, material.fb_psi, material.kind, MemberClass::Beam)?;
        let f_b1_prime = material.fb_psi * c_l;
        let f_b2_prime = material.fb_psi * section.flat_use_factor();

        let (f_b1, f_b2) = self.bending_stresses_psi;
        let outcome = interaction(&InteractionInput {
            d1_in: d1,
            d2_in: d2,
            e1_in,
            e2_in,
            f_c_psi: f_c,
            f_b1_psi: f_b1,
            f_b2_psi: f_b2,
            f_c_prime_psi: f_c_prime,
            f_b1_prime_psi: f_b1_prime,
            f_b2_prime_psi: f_b2_prime,
            f_ce1_psi: f_ce1,
            f_ce2_psi: f_ce2,
            f_be_psi: f_be,
        })?;
        diagnostics.extend(outcome.diagnostics.clone());

        let mut limit_states = vec![column::gross_section_check(
            p,
            section.area_in2(),
            f_c_prime,
        )?];
        if let Some(a_n) = self.net_area_in2 {
            limit_states.push(column::net_section_check(p, a_n, material.fc_psi)?);
        }
        limit_states.push(LimitState {
            name: "beam-column interaction (ratio)".to_string(),
            demand: outcome.value,
            allowable: 1.0,
            unity: outcome.value,
            verdict: outcome.verdict,
        });

        Ok(AnalysisResult {
            member_kind: "beam-column".to_string(),
            limit_states,
            combinations,
            governing: Some(gov_label),
            interaction: Some(outcome.value),
            diagnostics,
        })
    }
}

/// Member record as supplied by the surrounding record editor.
///
/// Unknown support-kind strings fail decoding with `InvalidInput`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "support_kind": "beam",
///   "wood_type": { "name": "SPF No.2", "kind": "sawn-lumber", "grade": "no-2",
///                  "E": 1400000.0, "G": 0.42, "F_v": 135.0, "F_c": 1150.0,
///                  "F_c_perp": 425.0, "F_b": 875.0, "F_t": 450.0 },
///   "breadth": 1.5,
///   "depth": 9.25,
///   "length": 144.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub support_kind: String,
    pub wood_type: WoodTypeRecord,
    /// Breadth (in)
    pub breadth: f64,
    /// Depth (in)
    pub depth: f64,
    /// Length (in)
    pub length: f64,
    /// Strong axis eccentricity (in), beam-columns only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e1: Option<f64>,
    /// Weak axis eccentricity (in), beam-columns only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e2: Option<f64>,
    /// Effective length for column buckling (in), beam-columns only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_effective_length: Option<f64>,
    /// Effective length for lateral-torsional buckling (in), beam-columns only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam_effective_length: Option<f64>,
}

impl MemberRecord {
    /// Decode into a validated [`Member`]
    pub fn decode(&self) -> CalcResult<Member> {
        let kind = match self.support_kind.to_lowercase().replace([' ', '_'], "-").as_str() {
            "beam" => MemberKind::Beam,
            "column" => MemberKind::Column,
            "beam-column" => MemberKind::BeamColumn {
                e1_in: self.e1.unwrap_or(0.0),
                e2_in: self.e2.unwrap_or(0.0),
                column_effective_length_in: self
                    .column_effective_length
                    .ok_or_else(|| CalcError::missing_field("column_effective_length"))?,
                beam_effective_length_in: self
                    .beam_effective_length
                    .ok_or_else(|| CalcError::missing_field("beam_effective_length"))?,
            },
            other => {
                return Err(CalcError::invalid_input(
                    "support_kind",
                    other,
                    "support kind can only be 'beam', 'column', or 'beam-column'",
                ))
            }
        };
        let material = Material::new(self.wood_type.clone())?;
        let section = Section::new(self.breadth, self.depth, self.length)?;
        Ok(Member::new(kind, material, section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadType;
    use crate::materials::WoodGrade;

    fn spf_material() -> Material {
        Material::new(WoodTypeRecord {
            name: "Spruce-Pine-Fir No.2".to_string(),
            kind: WoodKind::SawnLumber,
            grade: WoodGrade::No2,
            e_psi: 1_400_000.0,
            e_min_psi: None,
            specific_gravity: 0.42,
            fv_psi: 135.0,
            fc_psi: 1150.0,
            fc_perp_psi: 425.0,
            fb_psi: 875.0,
            ft_psi: 450.0,
        })
        .unwrap()
    }

    fn configured_beam() -> Analyzer {
        let mut analyzer = Analyzer::new();
        analyzer.set_material(spf_material());
        analyzer
            .set_section(MemberKind::Beam, Section::new(1.5, 9.25, 144.0).unwrap())
            .unwrap();
        analyzer
            .set_loads(
                LoadCase::new("floor")
                    .with_load(LoadType::Dead, 2.0)
                    .with_load(LoadType::Live, 5.0),
            )
            .unwrap();
        analyzer
    }

    #[test]
    fn test_state_progression() {
        let mut analyzer = Analyzer::new();
        assert_eq!(analyzer.state(), AnalyzerState::Unconfigured);

        analyzer.set_material(spf_material());
        assert_eq!(analyzer.state(), AnalyzerState::MaterialSet);

        analyzer
            .set_section(MemberKind::Beam, Section::new(1.5, 9.25, 144.0).unwrap())
            .unwrap();
        assert_eq!(analyzer.state(), AnalyzerState::SectionSet);

        analyzer
            .set_loads(LoadCase::new("case").with_load(LoadType::Dead, 1.0))
            .unwrap();
        assert_eq!(analyzer.state(), AnalyzerState::LoadsSet);

        analyzer.analyze().unwrap();
        assert_eq!(analyzer.state(), AnalyzerState::Analyzed);
    }

    #[test]
    fn test_out_of_order_configuration_fails() {
        let mut analyzer = Analyzer::new();
        let err = analyzer
            .set_section(MemberKind::Beam, Section::new(1.5, 9.25, 144.0).unwrap())
            .unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");

        analyzer.set_material(spf_material());
        let err = analyzer
            .set_loads(LoadCase::new("case").with_load(LoadType::Dead, 1.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");
    }

    #[test]
    fn test_analyze_before_loads_fails() {
        let mut analyzer = Analyzer::new();
        analyzer.set_material(spf_material());
        analyzer
            .set_section(MemberKind::Beam, Section::new(1.5, 9.25, 144.0).unwrap())
            .unwrap();
        let err = analyzer.analyze().unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");
    }

    #[test]
    fn test_beam_analysis() {
        let mut analyzer = configured_beam();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.member_kind, "beam");
        assert_eq!(result.governing.as_deref(), Some("D+L"));
        assert_eq!(result.limit_states.len(), 3);

        // w = 7 lb/in over 144 in: M = wL^2/8, f_b = 6M/(bd^2)
        let moment = 7.0 * 144.0_f64.powi(2) / 8.0;
        let f_b = 6.0 * moment / (1.5 * 9.25 * 9.25);
        let bending = &result.limit_states[0];
        assert!((bending.demand - f_b).abs() < 1e-9);

        let v = 7.0 * 144.0 / 2.0 - 7.0 * 9.25;
        let f_v = 3.0 * v / (2.0 * 1.5 * 9.25);
        let shear = &result.limit_states[1];
        assert!((shear.demand - f_v).abs() < 1e-9);
        assert_eq!(shear.allowable, 135.0);
    }

    #[test]
    fn test_reanalysis_is_identical() {
        // equal inputs give bit-identical outputs
        let mut analyzer = configured_beam();
        let first = analyzer.analyze().unwrap();
        let second = analyzer.analyze().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_self_weight_enters_dead_load() {
        let mut with_sw = configured_beam();
        with_sw.with_density(0.02);
        let result_sw = with_sw.analyze().unwrap();

        let mut without = configured_beam();
        let result = without.analyze().unwrap();

        let d_sw = result_sw
            .combinations
            .iter()
            .find(|c| c.label == "D")
            .unwrap()
            .value;
        let d = result.combinations.iter().find(|c| c.label == "D").unwrap().value;
        assert!((d_sw - (d + 1.5 * 9.25 * 0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_column_self_weight_scales_with_length() {
        let mut results = Vec::new();
        for length in [96.0, 240.0] {
            let mut analyzer = Analyzer::new();
            analyzer.set_material(spf_material());
            analyzer
                .set_section(MemberKind::Column, Section::new(3.5, 5.5, length).unwrap())
                .unwrap();
            analyzer
                .set_loads(LoadCase::new("post").with_load(LoadType::Dead, 4000.0))
                .unwrap();
            analyzer.with_density(0.02);
            let result = analyzer.analyze().unwrap();
            let d = result
                .combinations
                .iter()
                .find(|c| c.label == "D")
                .unwrap()
                .value;
            // the full member weight b*d*L*rho enters the dead load
            assert!((d - (4000.0 + 3.5 * 5.5 * length * 0.02)).abs() < 1e-9);
            results.push(d);
        }
        assert!(results[1] > results[0]);
    }

    #[test]
    fn test_overloaded_beam_column_is_a_verdict_not_an_error() {
        let mut analyzer = Analyzer::new();
        analyzer.set_material(spf_material());
        analyzer
            .set_section(
                MemberKind::BeamColumn {
                    e1_in: 0.0,
                    e2_in: 0.0,
                    column_effective_length_in: 240.0,
                    beam_effective_length_in: 240.0,
                },
                Section::new(3.5, 5.5, 240.0).unwrap(),
            )
            .unwrap();
        // f_c = 50,000 / 19.25 far exceeds both critical buckling values
        analyzer
            .set_loads(LoadCase::new("overload").with_load(LoadType::Dead, 50_000.0))
            .unwrap();
        let result = analyzer.analyze().unwrap();

        assert!(!result.passes());
        let interaction = result
            .limit_states
            .iter()
            .find(|ls| ls.name.starts_with("beam-column interaction"))
            .unwrap();
        assert_eq!(interaction.verdict, Verdict::Exceeds);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::CriticalBucklingExceeded { .. })));
    }

    #[test]
    fn test_column_analysis() {
        let mut analyzer = Analyzer::new();
        analyzer.set_material(spf_material());
        analyzer
            .set_section(MemberKind::Column, Section::new(5.5, 5.5, 96.0).unwrap())
            .unwrap();
        analyzer
            .set_loads(
                LoadCase::new("post")
                    .with_load(LoadType::Dead, 4000.0)
                    .with_load(LoadType::Snow, 6000.0),
            )
            .unwrap();
        analyzer.with_net_area(26.0);
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.member_kind, "column");
        // L absent: alternate replaces the unfactored D+S
        assert_eq!(result.governing.as_deref(), Some("D+S"));
        let gov = result.combinations.iter().find(|c| c.label == "D+S").unwrap();
        assert!((gov.value - (4000.0 + 0.75 * 6000.0)).abs() < 1e-9);

        assert_eq!(result.limit_states.len(), 2);
        let gross = &result.limit_states[0];
        assert!((gross.demand - gov.value / 30.25).abs() < 1e-9);
        // F_c' = F_c * C_P < F_c
        assert!(gross.allowable < 1150.0);

        let net = &result.limit_states[1];
        assert!((net.demand - gov.value / 26.0).abs() < 1e-9);
        assert_eq!(net.allowable, 1150.0);
    }

    #[test]
    fn test_slender_column_warns() {
        let mut analyzer = Analyzer::new();
        analyzer.set_material(spf_material());
        // s_r = 360 / 3.5 > 50
        analyzer
            .set_section(MemberKind::Column, Section::new(3.5, 3.5, 360.0).unwrap())
            .unwrap();
        analyzer
            .set_loads(LoadCase::new("tall").with_load(LoadType::Dead, 1000.0))
            .unwrap();
        let result = analyzer.analyze().unwrap();
        assert!(result
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::SlendernessExceeded { .. })));
    }

    #[test]
    fn test_beam_column_analysis() {
        let mut analyzer = Analyzer::new();
        analyzer.set_material(spf_material());
        analyzer
            .set_section(
                MemberKind::BeamColumn {
                    e1_in: 0.0,
                    e2_in: 0.0,
                    column_effective_length_in: 96.0,
                    beam_effective_length_in: 96.0,
                },
                Section::new(5.5, 9.25, 96.0).unwrap(),
            )
            .unwrap();
        analyzer
            .set_loads(LoadCase::new("eave post").with_load(LoadType::Dead, 5000.0))
            .unwrap();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.member_kind, "beam-column");
        let value = result.interaction.unwrap();
        assert!(value > 0.0);

        // with no bending and no eccentricity the interaction is the
        // squared gross compression utilization
        let gross = &result.limit_states[0];
        assert!((value - gross.unity.powi(2)).abs() < 1e-9);
    }

    #[test]
    fn test_overstress_is_a_verdict_not_an_error() {
        let mut analyzer = configured_beam();
        analyzer
            .set_loads(
                LoadCase::new("overload")
                    .with_load(LoadType::Dead, 50.0)
                    .with_load(LoadType::Live, 120.0),
            )
            .unwrap();
        let result = analyzer.analyze().unwrap();
        assert!(!result.passes());
        assert!(result
            .limit_states
            .iter()
            .any(|ls| ls.verdict == Verdict::Exceeds && ls.unity > 1.0));
    }

    #[test]
    fn test_member_record_decoding() {
        let json = r#"{
            "support_kind": "beam",
            "wood_type": {
                "name": "SPF No.2", "kind": "sawn-lumber", "grade": "no-2",
                "E": 1400000.0, "G": 0.42, "F_v": 135.0, "F_c": 1150.0,
                "F_c_perp": 425.0, "F_b": 875.0, "F_t": 450.0
            },
            "breadth": 1.5,
            "depth": 9.25,
            "length": 144.0
        }"#;
        let record: MemberRecord = serde_json::from_str(json).unwrap();
        let member = record.decode().unwrap();
        assert_eq!(member.kind, MemberKind::Beam);
        assert_eq!(member.section.depth_in, 9.25);
    }

    #[test]
    fn test_member_record_rejects_unknown_kind() {
        let mut record: MemberRecord = serde_json::from_str(
            r#"{
            "support_kind": "truss",
            "wood_type": {
                "name": "SPF No.2", "kind": "sawn-lumber", "grade": "no-2",
                "E": 1400000.0, "G": 0.42, "F_v": 135.0, "F_c": 1150.0,
                "F_c_perp": 425.0, "F_b": 875.0, "F_t": 450.0
            },
            "breadth": 1.5, "depth": 9.25, "length": 144.0
        }"#,
        )
        .unwrap();
        assert!(record.decode().is_err());

        record.support_kind = "beam-column".to_string();
        // beam-columns need both effective lengths
        let err = record.decode().unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_result_serialization() {
        let mut analyzer = configured_beam();
        let result = analyzer.analyze().unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}

//! # timber_core - Timber Member Analysis Engine
//!
//! `timber_core` analyzes timber structural members per the AITC Timber
//! Construction Manual: beams, columns, and beam-columns under
//! allowable-stress-design (ASD) load combinations, with beam and column
//! stability factors and per-limit-state pass/fail verdicts.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Overstress is a result, not an error**: a failing member comes
//!   back with `Verdict::Exceeds`, never as an `Err`
//!
//! ## Quick Start
//!
//! ```rust
//! use timber_core::analysis::{Analyzer, MemberKind};
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
//!
//! let mut analyzer = Analyzer::new();
//! analyzer.set_material(material);
//! analyzer
//!     .set_section(MemberKind::Beam, Section::new(1.5, 9.25, 144.0).unwrap())
//!     .unwrap();
//! analyzer
//!     .set_loads(
//!         LoadCase::new("floor joist")
//!             .with_load(LoadType::Dead, 1.0)
//!             .with_load(LoadType::Live, 2.5),
//!     )
//!     .unwrap();
//!
//! let result = analyzer.analyze().unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("governing"));
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Wood species/grade reference values and derivations
//! - [`section`] - Rectangular cross-section geometry
//! - [`loads`] - Load cases, live-load reduction, and ASD combinations
//! - [`stability`] - Slenderness, critical buckling, stability factors
//! - [`analysis`] - Member analyzer and limit-state verdicts
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types and result diagnostics

pub mod analysis;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod section;
pub mod stability;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{AnalysisResult, Analyzer, Member, MemberKind, Verdict};
pub use errors::{CalcError, CalcResult, Diagnostic};
pub use materials::{Material, WoodKind};
pub use section::Section;

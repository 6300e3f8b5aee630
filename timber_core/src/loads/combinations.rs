//! # ASD Load Combinations
//!
//! Allowable-stress-design load combinations per the AITC Timber
//! Construction Manual / IBC basic combinations. Given a [`LoadCase`],
//! [`asd_combinations`] emits every combination whose non-dead categories
//! are present, and [`governing`] picks the maximum.
//!
//! When the floor live load L is absent, the 0.75-factored alternates
//! replace the unfactored `D+Lr` / `D+S` / `D+R` entries rather than
//! appearing alongside them.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::loads::{LoadCase, LoadType};
//! use timber_core::loads::combinations::{asd_combinations, governing};
//!
//! let case = LoadCase::new("floor beam")
//!     .with_load(LoadType::Dead, 10.0)
//!     .with_load(LoadType::Live, 5.0)
//!     .with_load(LoadType::Wind, 3.0);
//!
//! let combos = asd_combinations(&case).unwrap();
//! let gov = governing(&combos).unwrap();
//! assert_eq!(gov.label, "D+L");
//! assert_eq!(gov.value, 15.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{LoadCase, LoadType};
use crate::errors::CalcResult;

/// One evaluated ASD load combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination label (e.g. "D+L+S")
    pub label: String,
    /// Human-readable equation (e.g. "D + 0.75L + 0.75S")
    pub equation: String,
    /// Evaluated magnitude
    pub value: f64,
}

impl LoadCombination {
    fn new(label: &str, equation: &str, value: f64) -> Self {
        LoadCombination {
            label: label.to_string(),
            equation: equation.to_string(),
            value,
        }
    }
}

// Combinations are emitted in table order; a label already present is
// replaced in place, which is how the 0.75-factored alternates supersede
// the unfactored D+Lr/D+S/D+R entries when L is absent.
fn push_or_replace(combos: &mut Vec<LoadCombination>, combo: LoadCombination) {
    if let Some(existing) = combos.iter_mut().find(|c| c.label == combo.label) {
        *existing = combo;
    } else {
        combos.push(combo);
    }
}

/// Evaluate the ASD combination table for a load case.
///
/// Every combination whose non-dead categories are all non-zero is
/// emitted; the dead-only combination `D` is always present.
pub fn asd_combinations(case: &LoadCase) -> CalcResult<Vec<LoadCombination>> {
    case.validate()?;

    let d = case.get(LoadType::Dead);
    let l = case.get(LoadType::Live);
    let lr = case.get(LoadType::LiveRoof);
    let s = case.get(LoadType::Snow);
    let r = case.get(LoadType::Rain);
    let w = case.get(LoadType::Wind);
    let e = case.get(LoadType::Seismic);

    let mut combos = Vec::new();
    combos.push(LoadCombination::new("D", "D", d));

    if w != 0.0 {
        combos.push(LoadCombination::new("D+W", "0.6D + W", 0.6 * d + w));
    }
    if e != 0.0 {
        combos.push(LoadCombination::new("D+E", "0.6D + 0.7E", 0.6 * d + 0.7 * e));
    }
    if l != 0.0 {
        combos.push(LoadCombination::new("D+L", "D + L", d + l));
    }
    if lr != 0.0 {
        combos.push(LoadCombination::new("D+Lr", "D + Lr", d + lr));
    }
    if s != 0.0 {
        combos.push(LoadCombination::new("D+S", "D + S", d + s));
    }
    if r != 0.0 {
        combos.push(LoadCombination::new("D+R", "D + R", d + r));
    }

    // transient companions: 0.75-factored alternates
    let companions = [("Lr", lr), ("S", s), ("R", r)];
    if l != 0.0 {
        for (code, value) in companions {
            if value == 0.0 {
                continue;
            }
            push_or_replace(
                &mut combos,
                LoadCombination::new(
                    &format!("D+L+{code}"),
                    &format!("D + 0.75L + 0.75{code}"),
                    d + 0.75 * l + 0.75 * value,
                ),
            );
            if w != 0.0 {
                push_or_replace(
                    &mut combos,
                    LoadCombination::new(
                        &format!("D+W+L+{code}"),
                        &format!("D + 0.75W + 0.75L + 0.75{code}"),
                        d + 0.75 * w + 0.75 * l + 0.75 * value,
                    ),
                );
            }
            if e != 0.0 {
                push_or_replace(
                    &mut combos,
                    LoadCombination::new(
                        &format!("D+E+L+{code}"),
                        &format!("D + 0.75E + 0.75L + 0.75{code}"),
                        d + 0.75 * e + 0.75 * l + 0.75 * value,
                    ),
                );
            }
        }
    } else {
        for (code, value) in companions {
            if value == 0.0 {
                continue;
            }
            push_or_replace(
                &mut combos,
                LoadCombination::new(
                    &format!("D+{code}"),
                    &format!("D + 0.75{code}"),
                    d + 0.75 * value,
                ),
            );
            if w != 0.0 {
                push_or_replace(
                    &mut combos,
                    LoadCombination::new(
                        &format!("D+W+{code}"),
                        &format!("D + 0.75W + 0.75{code}"),
                        d + 0.75 * w + 0.75 * value,
                    ),
                );
            }
            if e != 0.0 {
                push_or_replace(
                    &mut combos,
                    LoadCombination::new(
                        &format!("D+E+{code}"),
                        &format!("D + 0.75E + 0.75{code}"),
                        d + 0.75 * e + 0.75 * value,
                    ),
                );
            }
        }
    }

    Ok(combos)
}

/// The governing (maximum-magnitude) combination, or `None` for an empty
/// table.
pub fn governing(combos: &[LoadCombination]) -> Option<&LoadCombination> {
    combos
        .iter()
        .max_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
}

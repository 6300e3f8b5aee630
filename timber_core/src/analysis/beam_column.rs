//! Beam-column interaction per the NDS-style unified equation
//! (AITC Eq. 5.7-1), combining axial compression with biaxial bending
//! and eccentricity moments.
//!
//! Degenerate terms are dropped and recorded as diagnostics instead of
//! failing, and compression at or beyond a critical buckling value comes
//! back as a failed verdict, never an error; weak-axis overstress masked
//! by excess capacity elsewhere is flagged as an advisory.

use serde::{Deserialize, Serialize};

use super::Verdict;
use crate::errors::{CalcError, CalcResult, Diagnostic};

/// Inputs to the interaction equation. Subscript 1 is the strong (wide
/// face) axis, subscript 2 the weak (narrow face) axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionInput {
    /// Wide face dimension d1 (in)
    pub d1_in: f64,
    /// Narrow face dimension d2 (in)
    pub d2_in: f64,
    /// Strong axis load eccentricity e1 (in)
    pub e1_in: f64,
    /// Weak axis load eccentricity e2 (in)
    pub e2_in: f64,
    /// Axial compression stress f_c (psi)
    pub f_c_psi: f64,
    /// Strong axis bending stress f_b1 (psi)
    pub f_b1_psi: f64,
    /// Weak axis bending stress f_b2 (psi)
    pub f_b2_psi: f64,
    /// Adjusted compression design value F_c' (psi)
    pub f_c_prime_psi: f64,
    /// Strong axis adjusted bending design value F_b1' (psi)
    pub f_b1_prime_psi: f64,
    /// Weak axis adjusted bending design value F_b2' (psi)
    pub f_b2_prime_psi: f64,
    /// Critical buckling design value for strong axis column buckling (psi)
    pub f_ce1_psi: f64,
    /// Critical buckling design value for weak axis column buckling (psi);
    /// zero when weak-axis buckling is fully braced out
    pub f_ce2_psi: f64,
    /// Critical lateral-torsional buckling design value for bending (psi)
    pub f_be_psi: f64,
}

/// Outcome of the interaction equation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    /// Interaction equation value; at most 1.0 passes
    pub value: f64,
    pub verdict: Verdict,
    pub diagnostics: Vec<Diagnostic>,
}

/// Evaluate the unified beam-column interaction equation.
pub fn interaction(input: &InteractionInput) -> CalcResult<InteractionOutcome> {
    for (field, value) in [
        ("d1_in", input.d1_in),
        ("d2_in", input.d2_in),
        ("f_c_prime_psi", input.f_c_prime_psi),
        ("f_b1_prime_psi", input.f_b1_prime_psi),
        ("f_ce1_psi", input.f_ce1_psi),
        ("f_be_psi", input.f_be_psi),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Value must be positive and finite",
            ));
        }
    }
    let mut diagnostics = Vec::new();
    // exceeding a buckling capacity is a failed result, never an error
    let mut buckling_failed = false;

    let first = (input.f_c_psi / input.f_c_prime_psi).powi(2);

    let ecc1 = input.f_c_psi * (6.0 * input.e1_in / input.d1_in);
    let second = if input.f_c_psi >= input.f_ce1_psi {
        diagnostics.push(Diagnostic::CriticalBucklingExceeded {
            axis: "strong axis".to_string(),
            demand_psi: input.f_c_psi,
            capacity_psi: input.f_ce1_psi,
        });
        diagnostics.push(Diagnostic::InteractionTermDropped {
            term: "second term".to_string(),
            reason: "second term denominator is not positive".to_string(),
        });
        buckling_failed = true;
        0.0
    } else {
        let second_top =
            input.f_b1_psi + ecc1 * (1.0 + 0.234 * input.f_c_psi / input.f_ce1_psi);
        let second_bottom = input.f_b1_prime_psi * (1.0 - input.f_c_psi / input.f_ce1_psi);
        second_top / second_bottom
    };

    // Q per Eq. 5.7-2: squared ratio of strong axis bending demand to the
    // lateral-torsional buckling value
    let q = ((input.f_b1_psi + ecc1) / input.f_be_psi).powi(2);

    if input.f_ce2_psi > 0.0 {
        if input.f_c_psi >= input.f_ce2_psi {
            diagnostics.push(Diagnostic::CriticalBucklingExceeded {
                axis: "weak axis".to_string(),
                demand_psi: input.f_c_psi,
                capacity_psi: input.f_ce2_psi,
            });
            buckling_failed = true;
        }
        let masking = input.f_c_psi / input.f_ce2_psi + q;
        if masking >= 1.0 {
            diagnostics.push(Diagnostic::WeakAxisOverstressMasked { measure: masking });
        }
    }

    let third = if input.f_ce2_psi == 0.0 {
        diagnostics.push(Diagnostic::InteractionTermDropped {
            term: "third term".to_string(),
            reason: "weak axis critical buckling value F_cE2 is zero".to_string(),
        });
        0.0
    } else {
        let ecc2 = input.f_c_psi * (6.0 * input.e2_in / input.d2_in);
        let third_top = input.f_b2_psi
            + ecc2 * (1.0 + 0.234 * input.f_c_psi / input.f_ce2_psi + 0.234 * q);
        let third_bottom =
            input.f_b2_prime_psi * (1.0 - input.f_c_psi / input.f_ce2_psi - q);
        if third_bottom <= 0.0 {
            diagnostics.push(Diagnostic::InteractionTermDropped {
                term: "third term".to_string(),
                reason: "third term denominator is not positive".to_string(),
            });
            0.0
        } else {
            third_top / third_bottom
        }
    };

    let value = first + second + third;
    let verdict = if value <= 1.0 && !buckling_failed {
        Verdict::Ok
    } else {
        Verdict::Exceeds
    };

    Ok(InteractionOutcome {
        value,
        verdict,
        diagnostics,
    })
}

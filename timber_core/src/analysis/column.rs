//! Column limit-state formulas: axial compression on the gross and net
//! sections (AITC 5.6).

use super::LimitState;
use crate::errors::{CalcError, CalcResult};

/// Axial compression stress f_c = P / A
pub fn compression_stress(p_lb: f64, area_in2: f64) -> CalcResult<f64> {
    if area_in2 <= 0.0 {
        return Err(CalcError::invalid_input(
            "area_in2",
            area_in2.to_string(),
            "Area must be positive",
        ));
    }
    Ok(p_lb / area_in2)
}

/// Gross-section check: P/A_g against F_c' (the adjusted compression
/// design value including the column stability factor C_P).
pub fn gross_section_check(
    p_lb: f64,
    area_gross_in2: f64,
    f_c_prime_psi: f64,
) -> CalcResult<LimitState> {
    let f_c = compression_stress(p_lb, area_gross_in2)?;
    LimitState::evaluate("compression, gross section (psi)", f_c, f_c_prime_psi)
}

/// Net-section check: P/A_n against F_c* (the adjusted compression
/// design value without C_P).
pub fn net_section_check(
    p_lb: f64,
    area_net_in2: f64,
    f_c_star_psi: f64,
) -> CalcResult<LimitState> {
    let f_c = compression_stress(p_lb, area_net_in2)?;
    LimitState::evaluate("compression, net section (psi)", f_c, f_c_star_psi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Verdict;

    #[test]
    fn test_compression_stress() {
        assert_eq!(compression_stress(13_875.0, 13.875).unwrap(), 1000.0);
        assert!(compression_stress(1000.0, 0.0).is_err());
    }

    #[test]
    fn test_gross_check_within_allowable() {
        let state = gross_section_check(10_000.0, 30.25, 800.0).unwrap();
        assert!((state.demand - 10_000.0 / 30.25).abs() < 1e-9);
        assert_eq!(state.verdict, Verdict::Ok);
        assert!(state.unity < 1.0);
    }

    #[test]
    fn test_gross_check_exceeds() {
        let state = gross_section_check(30_000.0, 30.25, 800.0).unwrap();
        assert_eq!(state.verdict, Verdict::Exceeds);
        assert!(state.unity > 1.0);
    }

    #[test]
    fn test_net_check_uses_net_area() {
        // a bolt hole reduces the area, raising the stress
        let gross = gross_section_check(20_000.0, 30.25, 1150.0).unwrap();
        let net = net_section_check(20_000.0, 26.5, 1150.0).unwrap();
        assert!(net.demand > gross.demand);
    }
}

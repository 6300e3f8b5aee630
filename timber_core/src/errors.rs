//! # Error Types
//!
//! Structured error types for timber_core. Each variant carries enough
//! context to understand and fix the offending input programmatically.
//!
//! Overstress is never an error: a member that fails a limit state comes
//! back as a normal result with `Verdict::Exceeds`. Likewise, degenerate
//! divisors along legitimate code paths (a vanishing critical buckling
//! value) reduce the calculation and leave a [`Diagnostic`] on the result
//! instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(depth_in: f64) -> CalcResult<()> {
//!     if depth_in <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "depth_in",
//!             depth_in.to_string(),
//!             "Depth must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for timber_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, unknown enumeration, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required record field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The analyzer was invoked before its inputs were complete
    #[error("Incomplete input: {missing} must be set before {operation}")]
    IncompleteInput { missing: String, operation: String },

    /// A code path the governing reference does not yet define
    #[error("Unsupported: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an IncompleteInput error
    pub fn incomplete_input(missing: impl Into<String>, operation: impl Into<String>) -> Self {
        CalcError::IncompleteInput {
            missing: missing.into(),
            operation: operation.into(),
        }
    }

    /// Create an Unsupported error
    pub fn unsupported(feature: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Unsupported {
            feature: feature.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::IncompleteInput { .. } => "INCOMPLETE_INPUT",
            CalcError::Unsupported { .. } => "UNSUPPORTED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Advisory accumulated on an analysis result.
///
/// Structured values the presentation collaborator can render however it
/// likes. None of them fail the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    /// Slenderness ratio exceeds the tabulated cap for this member class.
    SlendernessExceeded {
        ratio: f64,
        service_limit: f64,
        /// Relaxed limit permitted during construction, where one exists
        construction_limit: Option<f64>,
    },

    /// Compression stress meets or exceeds a critical buckling design
    /// value; the member fails that buckling mode outright.
    CriticalBucklingExceeded {
        axis: String,
        demand_psi: f64,
        capacity_psi: f64,
    },

    /// Weak-axis overstress is being masked by excess capacity in
    /// compression and strong-axis bending.
    WeakAxisOverstressMasked { measure: f64 },

    /// A term of the beam-column interaction equation was dropped because
    /// its divisor vanished along a legitimate code path.
    InteractionTermDropped { term: String, reason: String },
}

impl Diagnostic {
    /// Human-readable message for display
    pub fn message(&self) -> String {
        match self {
            Diagnostic::SlendernessExceeded {
                ratio,
                service_limit,
                construction_limit,
            } => match construction_limit {
                Some(limit) => format!(
                    "slenderness ratio {ratio:.1} exceeds {service_limit:.0} \
                     (in-service limit; {limit:.0} permitted during construction)"
                ),
                None => format!("slenderness ratio {ratio:.1} exceeds {service_limit:.0}"),
            },
            Diagnostic::CriticalBucklingExceeded {
                axis,
                demand_psi,
                capacity_psi,
            } => format!(
                "{demand_psi:.0} >= {capacity_psi:.0}: compression stress exceeds the \
                 critical buckling design value for {axis} buckling"
            ),
            Diagnostic::WeakAxisOverstressMasked { measure } => format!(
                "{measure:.3} >= 1.0: overstress in weak axis bending is being masked \
                 by excess capacity in compression and strong axis bending"
            ),
            Diagnostic::InteractionTermDropped { term, reason } => {
                format!("interaction {term} dropped: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("depth_in", "-5.0", "Depth must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::missing_field("loads").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            CalcError::unsupported("e_min", "round-log").error_code(),
            "UNSUPPORTED"
        );
        assert_eq!(
            CalcError::incomplete_input("loads", "analyze").error_code(),
            "INCOMPLETE_INPUT"
        );
    }

    #[test]
    fn test_diagnostic_messages() {
        let diag = Diagnostic::SlendernessExceeded {
            ratio: 55.2,
            service_limit: 50.0,
            construction_limit: Some(75.0),
        };
        assert!(diag.message().contains("55.2"));
        assert!(diag.message().contains("construction"));

        let diag = Diagnostic::WeakAxisOverstressMasked { measure: 1.21 };
        assert!(diag.message().contains("masked"));
    }

    #[test]
    fn test_diagnostic_serialization() {
        let diag = Diagnostic::InteractionTermDropped {
            term: "third term".to_string(),
            reason: "F_cE2 = 0".to_string(),
        };
        let json = serde_json::to_string(&diag).unwrap();
        let roundtrip: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, roundtrip);
    }
}

//! # Error Types
//!
//! Domain-specific error types for celidone-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  celidone-core errors (this file)                                      │
//! │  ├── ValidationError  - One field or one rule failed                   │
//! │  └── CoreError        - Rejected requests, illegal transitions         │
//! │                                                                         │
//! │  desktop-bridge errors (separate crate)                                │
//! │  └── ApiError         - What the Electron shell sees (serialized)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Renderer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Taxonomy
//! Field validators and the rental engine share these variants, so the UI
//! can render any error list the same way. Messages are pt-BR because they
//! are shown verbatim to shop staff.
//!
//! | Kind          | Variants                                              |
//! |---------------|-------------------------------------------------------|
//! | Required      | `Required`                                            |
//! | Malformed     | `InvalidDocument`, `InvalidFormat`, `LettersOnly`,    |
//! |               | `TooShort`, `TooLong`, `PatternMismatch`,             |
//! |               | `NotAllowed`, `InvalidDate`                           |
//! | Checksum      | `ChecksumMismatch`                                    |
//! | BusinessRule  | amounts, date ordering, product availability          |

use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentKind;
use crate::lifecycle::RentalActionKind;
use crate::money::Money;
use crate::types::RentalStatus;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of every error the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Field missing or empty.
    Required,
    /// Wrong length, pattern or unknown enum value.
    Malformed,
    /// Structurally plausible document whose check digits do not match.
    Checksum,
    /// Amounts, date ordering, availability.
    BusinessRule,
    /// State machine rule violated.
    IllegalTransition,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` holds the label shown to the user ("Valor do aluguel"), not the
/// JSON key, so messages can be displayed without another lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field}: campo obrigatório")]
    Required { field: String },

    /// Document has the wrong length or repeats a single digit.
    #[error("{kind} inválido")]
    InvalidDocument { kind: DocumentKind },

    /// Document is well formed but its check digits do not match.
    #[error("{kind} inválido")]
    ChecksumMismatch { kind: DocumentKind },

    /// Value does not match the expected format (email, CEP, phone).
    #[error("{field} inválido")]
    InvalidFormat { field: String },

    /// Value contains characters other than letters and spaces.
    #[error("{field} deve conter apenas letras")]
    LettersOnly { field: String },

    /// Field value is too short.
    #[error("{field} deve ter pelo menos {min} caracteres")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} deve ter no máximo {max} caracteres")]
    TooLong { field: String, max: usize },

    /// Value must follow a fixed pattern such as `PRD-0000`.
    #[error("{field} deve seguir o padrão {pattern}")]
    PatternMismatch { field: String, pattern: String },

    /// Value must be strictly positive.
    #[error("{field} deve ser maior que zero")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} não pode ser negativo")]
    MustNotBeNegative { field: String },

    /// Monetary value outside the configured bounds.
    #[error("{field} deve ser entre {min} e {max}")]
    AmountOutOfRange { field: String, min: Money, max: Money },

    /// Value is not in a closed set.
    #[error("{field} deve ser um de: {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Date could not be parsed.
    #[error("{field} deve ser uma data válida")]
    InvalidDate { field: String },

    /// Expected return date is on or before the rental date.
    #[error("Data prevista para devolução deve ser posterior à data do aluguel")]
    ReturnNotAfterRental,

    /// Actual return date precedes the rental date.
    #[error("Data efetiva de devolução não pode ser anterior à data do aluguel")]
    ReturnedBeforeRental,

    /// Product is not in the available state.
    #[error("Produto não está disponível para aluguel")]
    ProductUnavailable,

    /// Computed amount does not fit in centavos.
    #[error("{field} excede o limite suportado")]
    Overflow { field: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
        }
    }

    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required { .. } => ErrorKind::Required,
            ValidationError::InvalidDocument { .. }
            | ValidationError::InvalidFormat { .. }
            | ValidationError::LettersOnly { .. }
            | ValidationError::TooShort { .. }
            | ValidationError::TooLong { .. }
            | ValidationError::PatternMismatch { .. }
            | ValidationError::NotAllowed { .. }
            | ValidationError::InvalidDate { .. } => ErrorKind::Malformed,
            ValidationError::ChecksumMismatch { .. } => ErrorKind::Checksum,
            ValidationError::MustBePositive { .. }
            | ValidationError::MustNotBeNegative { .. }
            | ValidationError::AmountOutOfRange { .. }
            | ValidationError::ReturnNotAfterRental
            | ValidationError::ReturnedBeforeRental
            | ValidationError::ProductUnavailable
            | ValidationError::Overflow { .. } => ErrorKind::BusinessRule,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by operations that either produce a value or refuse to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Return or cancel attempted on a rental that already ended.
    ///
    /// ## When This Occurs
    /// ```text
    /// DEVOLVIDO ──cancel──► ✗ TerminalState
    /// CANCELADO ──return──► ✗ TerminalState
    /// ```
    #[error("Aluguel {status} está em estado terminal: não é possível {action}")]
    TerminalState {
        status: RentalStatus,
        action: RentalActionKind,
    },

    /// Rental request failed one or more rules.
    #[error("Aluguel inválido: {}", join_messages(.errors))]
    Rejected { errors: Vec<ValidationError> },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy bucket of this error.
    ///
    /// A rejection reports the kind of its first error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::TerminalState { .. } => ErrorKind::IllegalTransition,
            CoreError::Rejected { errors } => errors
                .first()
                .map(ValidationError::kind)
                .unwrap_or(ErrorKind::BusinessRule),
            CoreError::Validation(err) => err.kind(),
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("Cliente").to_string(),
            "Cliente: campo obrigatório"
        );

        let err = ValidationError::TooShort {
            field: "Nome".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "Nome deve ter pelo menos 2 caracteres");

        let err = ValidationError::ChecksumMismatch {
            kind: DocumentKind::Cpf,
        };
        assert_eq!(err.to_string(), "CPF inválido");
    }

    #[test]
    fn test_amount_range_message_uses_brl() {
        let err = ValidationError::AmountOutOfRange {
            field: "Valor do aluguel".to_string(),
            min: Money::from_cents(1),
            max: Money::from_cents(999_999),
        };
        assert_eq!(
            err.to_string(),
            "Valor do aluguel deve ser entre R$ 0,01 e R$ 9.999,99"
        );
    }

    #[test]
    fn test_not_allowed_lists_values() {
        let err = ValidationError::NotAllowed {
            field: "Sexo".to_string(),
            allowed: vec!["masculino".to_string(), "feminino".to_string()],
        };
        assert_eq!(err.to_string(), "Sexo deve ser um de: masculino, feminino");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ValidationError::required("x").kind(), ErrorKind::Required);
        assert_eq!(
            ValidationError::InvalidDocument {
                kind: DocumentKind::Cnpj
            }
            .kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            ValidationError::ProductUnavailable.kind(),
            ErrorKind::BusinessRule
        );

        let err = CoreError::TerminalState {
            status: RentalStatus::Cancelado,
            action: RentalActionKind::Return,
        };
        assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    }

    #[test]
    fn test_terminal_state_message() {
        let err = CoreError::TerminalState {
            status: RentalStatus::Cancelado,
            action: RentalActionKind::Return,
        };
        assert_eq!(
            err.to_string(),
            "Aluguel CANCELADO está em estado terminal: não é possível devolver"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::ProductUnavailable.into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::ProductUnavailable)
        ));
    }
}

//! # Document Module
//!
//! CPF (individuals) and CNPJ (organizations) validation by modulo-11
//! check digits.
//!
//! ## Anatomy
//! ```text
//! CPF   111.444.777-35         CNPJ   11.222.333/0001-81
//!       └───── body ────┘└┘           └────── body ──────┘└┘
//!          9 digits     check            12 digits       check
//! ```
//!
//! Both check digits use the same routine: weight the digits from the
//! right, take `sum mod 11`, and map `resto < 2 → 0`, otherwise
//! `11 − resto`. CPF weights grow without bound (2, 3, … 11); CNPJ weights
//! cycle 2..9.
//!
//! ## Rejection Order
//! 1. Empty input → `Required`
//! 2. Wrong digit count or a single repeated digit → `InvalidDocument`
//!    (no check digit is computed)
//! 3. Check digit mismatch → `ChecksumMismatch`

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::mask::{apply_mask, CNPJ_MASK, CPF_MASK};
use crate::types::PersonType;
use crate::validation::ValidationResult;

// =============================================================================
// Document Kind
// =============================================================================

/// The two Brazilian tax-id formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    /// Cadastro de Pessoas Físicas, 11 digits.
    Cpf,
    /// Cadastro Nacional da Pessoa Jurídica, 14 digits.
    Cnpj,
}

impl DocumentKind {
    /// Number of digits, check digits included.
    pub const fn length(&self) -> usize {
        match self {
            DocumentKind::Cpf => 11,
            DocumentKind::Cnpj => 14,
        }
    }

    /// Display mask template.
    pub const fn mask(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => CPF_MASK,
            DocumentKind::Cnpj => CNPJ_MASK,
        }
    }

    /// Weight of the digit `position` places from the right of the body.
    fn weight(&self, position: usize) -> u32 {
        let position = position as u32;
        match self {
            DocumentKind::Cpf => position + 2,
            DocumentKind::Cnpj => 2 + position % 8,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cpf => write!(f, "CPF"),
            DocumentKind::Cnpj => write!(f, "CNPJ"),
        }
    }
}

// =============================================================================
// Validated Documents
// =============================================================================

/// A CPF that passed validation. Holds digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct Cpf(String);

impl Cpf {
    /// Validates and wraps a CPF; see [`validate_cpf`].
    pub fn parse(input: &str) -> ValidationResult<Self> {
        validate_cpf(input)
    }

    /// The 11 digits, unmasked.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// `111.444.777-35`
    pub fn formatted(&self) -> String {
        apply_mask(&self.0, CPF_MASK)
    }
}

/// A CNPJ that passed validation. Holds digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct Cnpj(String);

impl Cnpj {
    /// Validates and wraps a CNPJ; see [`validate_cnpj`].
    pub fn parse(input: &str) -> ValidationResult<Self> {
        validate_cnpj(input)
    }

    /// The 14 digits, unmasked.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// `11.222.333/0001-81`
    pub fn formatted(&self) -> String {
        apply_mask(&self.0, CNPJ_MASK)
    }
}

/// The tax id of a customer, chosen by its [`PersonType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentNumber {
    Cpf(Cpf),
    Cnpj(Cnpj),
}

impl DocumentNumber {
    /// Validates `input` as a CPF for individuals or a CNPJ for organizations.
    pub fn parse(input: &str, person_type: PersonType) -> ValidationResult<Self> {
        match person_type {
            PersonType::PessoaFisica => validate_cpf(input).map(DocumentNumber::Cpf),
            PersonType::PessoaJuridica => validate_cnpj(input).map(DocumentNumber::Cnpj),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentNumber::Cpf(_) => DocumentKind::Cpf,
            DocumentNumber::Cnpj(_) => DocumentKind::Cnpj,
        }
    }

    pub fn digits(&self) -> &str {
        match self {
            DocumentNumber::Cpf(cpf) => cpf.digits(),
            DocumentNumber::Cnpj(cnpj) => cnpj.digits(),
        }
    }

    pub fn formatted(&self) -> String {
        match self {
            DocumentNumber::Cpf(cpf) => cpf.formatted(),
            DocumentNumber::Cnpj(cnpj) => cnpj.formatted(),
        }
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a CPF, masked or not.
///
/// ## Example
/// ```rust
/// use celidone_core::document::validate_cpf;
///
/// assert!(validate_cpf("111.444.777-35").is_ok());
/// assert!(validate_cpf("12345678901").is_err());
/// assert!(validate_cpf("00000000000").is_err());
/// ```
pub fn validate_cpf(input: &str) -> ValidationResult<Cpf> {
    let digits = validate(input, DocumentKind::Cpf)?;
    Ok(Cpf(digits))
}

/// Validates a CNPJ, masked or not.
///
/// ## Example
/// ```rust
/// use celidone_core::document::validate_cnpj;
///
/// assert!(validate_cnpj("11.222.333/0001-81").is_ok());
/// assert!(validate_cnpj("11222333000180").is_err());
/// ```
pub fn validate_cnpj(input: &str) -> ValidationResult<Cnpj> {
    let digits = validate(input, DocumentKind::Cnpj)?;
    Ok(Cnpj(digits))
}

fn validate(input: &str, kind: DocumentKind) -> ValidationResult<String> {
    if input.is_empty() {
        return Err(ValidationError::required(kind.to_string()));
    }

    let digits: Vec<u8> = input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect();

    if digits.len() != kind.length() || digits.windows(2).all(|w| w[0] == w[1]) {
        return Err(ValidationError::InvalidDocument { kind });
    }

    let len = digits.len();
    for split in [len - 2, len - 1] {
        if check_digit(&digits[..split], kind) != digits[split] {
            return Err(ValidationError::ChecksumMismatch { kind });
        }
    }

    Ok(digits.iter().map(|d| char::from(b'0' + d)).collect())
}

/// Modulo-11 check digit over `body`.
fn check_digit(body: &[u8], kind: DocumentKind) -> u8 {
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| u32::from(digit) * kind.weight(position))
        .sum();

    match sum % 11 {
        resto if resto < 2 => 0,
        resto => (11 - resto) as u8,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// CPF check digits computed the long way: `(sum × 10) mod 11`, 10 → 0.
    fn cpf_digits_by_hand(body: &[u8; 9]) -> (u8, u8) {
        let mut sum: u32 = (0..9).map(|i| u32::from(body[i]) * (10 - i as u32)).sum();
        let mut first = (sum * 10) % 11;
        if first >= 10 {
            first = 0;
        }

        sum = (0..9).map(|i| u32::from(body[i]) * (11 - i as u32)).sum::<u32>() + first * 2;
        let mut second = (sum * 10) % 11;
        if second >= 10 {
            second = 0;
        }
        (first as u8, second as u8)
    }

    /// CNPJ check digits with explicit cycling weights.
    fn cnpj_digits_by_hand(body: &[u8; 12]) -> (u8, u8) {
        let digit = |slice: &[u8]| {
            let mut sum = 0u32;
            let mut peso = 2u32;
            for i in (0..slice.len()).rev() {
                sum += u32::from(slice[i]) * peso;
                peso = if peso == 9 { 2 } else { peso + 1 };
            }
            let resto = sum % 11;
            if resto < 2 {
                0u8
            } else {
                (11 - resto) as u8
            }
        };
        let first = digit(body);
        let mut with_first = body.to_vec();
        with_first.push(first);
        (first, digit(&with_first))
    }

    fn to_string(digits: &[u8]) -> String {
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    #[test]
    fn test_cpf_golden_cases() {
        assert_eq!(validate_cpf("11144477735").unwrap().digits(), "11144477735");
        assert_eq!(
            validate_cpf("12345678901"),
            Err(ValidationError::ChecksumMismatch {
                kind: DocumentKind::Cpf
            })
        );
        assert_eq!(
            validate_cpf("00000000000"),
            Err(ValidationError::InvalidDocument {
                kind: DocumentKind::Cpf
            })
        );
    }

    #[test]
    fn test_cpf_accepts_masked_input() {
        let cpf = validate_cpf("111.444.777-35").unwrap();
        assert_eq!(cpf.digits(), "11144477735");
        assert_eq!(cpf.formatted(), "111.444.777-35");
    }

    #[test]
    fn test_cpf_required_and_length() {
        assert_eq!(validate_cpf(""), Err(ValidationError::required("CPF")));
        assert!(matches!(
            validate_cpf("1114447773"),
            Err(ValidationError::InvalidDocument { .. })
        ));
        assert!(matches!(
            validate_cpf("111444777350"),
            Err(ValidationError::InvalidDocument { .. })
        ));
        // Separators only: no digits at all.
        assert!(matches!(
            validate_cpf("...-"),
            Err(ValidationError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_cnpj_golden_cases() {
        let cnpj = validate_cnpj("11222333000181").unwrap();
        assert_eq!(cnpj.formatted(), "11.222.333/0001-81");
        assert_eq!(
            validate_cnpj("11222333000180"),
            Err(ValidationError::ChecksumMismatch {
                kind: DocumentKind::Cnpj
            })
        );
        assert!(matches!(
            validate_cnpj("11111111111111"),
            Err(ValidationError::InvalidDocument { .. })
        ));
        assert_eq!(validate_cnpj(""), Err(ValidationError::required("CNPJ")));
    }

    #[test]
    fn test_document_number_by_person_type() {
        let doc = DocumentNumber::parse("111.444.777-35", PersonType::PessoaFisica).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Cpf);
        assert_eq!(doc.digits(), "11144477735");

        let doc = DocumentNumber::parse("11222333000181", PersonType::PessoaJuridica).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Cnpj);
        assert_eq!(doc.formatted(), "11.222.333/0001-81");

        // A valid CPF is not a CNPJ.
        assert!(DocumentNumber::parse("11144477735", PersonType::PessoaJuridica).is_err());
    }

    proptest! {
        #[test]
        fn prop_cpf_matches_hand_computation(body in prop::array::uniform9(0u8..10)) {
            let (first, second) = cpf_digits_by_hand(&body);
            let mut digits = body.to_vec();
            digits.extend([first, second]);
            let text = to_string(&digits);

            let all_same = digits.windows(2).all(|w| w[0] == w[1]);
            prop_assert_eq!(validate_cpf(&text).is_ok(), !all_same);

            // Any other second digit must be rejected.
            let wrong = (second + 1) % 10;
            digits[10] = wrong;
            prop_assert!(validate_cpf(&to_string(&digits)).is_err());
        }

        #[test]
        fn prop_cnpj_matches_hand_computation(body in prop::array::uniform12(0u8..10)) {
            let (first, second) = cnpj_digits_by_hand(&body);
            let mut digits = body.to_vec();
            digits.extend([first, second]);
            let text = to_string(&digits);

            let all_same = digits.windows(2).all(|w| w[0] == w[1]);
            prop_assert_eq!(validate_cnpj(&text).is_ok(), !all_same);

            digits[12] = (first + 1) % 10;
            prop_assert!(validate_cnpj(&to_string(&digits)).is_err());
        }
    }
}

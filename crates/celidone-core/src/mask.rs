//! # Mask Module
//!
//! Positional input masks for documents, CEP and phone numbers.
//!
//! ## How a Template Is Applied
//! ```text
//! raw:       "11144477735"   (non-digits stripped first)
//! template:  "###.###.###-##"
//!             │││└ literal, emitted as-is
//!             └┴┴─ '#' consumes the next digit
//! result:    "111.444.777-35"
//! ```
//!
//! Masking stops as soon as the digits or the template run out, so a
//! half-typed field gets a half-applied mask and never an error.
//!
//! ## Laws
//! - `remove_mask(apply_mask(d, t)) == d` for a digit string `d` no longer
//!   than the placeholder count of `t` (longer input is truncated)
//! - `remove_mask(remove_mask(x)) == remove_mask(x)`

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// `111.444.777-35`
pub const CPF_MASK: &str = "###.###.###-##";
/// `11.222.333/0001-81`
pub const CNPJ_MASK: &str = "##.###.###/####-##";
/// `01310-100`
pub const CEP_MASK: &str = "#####-###";
/// `(11) 98765-4321`
pub const MOBILE_MASK: &str = "(##) #####-####";
/// `(11) 3456-7890`
pub const LANDLINE_MASK: &str = "(##) ####-####";

/// Template character that consumes one digit.
pub const PLACEHOLDER: char = '#';

// =============================================================================
// Mask Functions
// =============================================================================

/// Applies `template` to the digits of `raw`.
///
/// ## Example
/// ```rust
/// use celidone_core::mask::{apply_mask, CPF_MASK};
///
/// assert_eq!(apply_mask("11144477735", CPF_MASK), "111.444.777-35");
/// assert_eq!(apply_mask("1114", CPF_MASK), "111.4");
/// ```
pub fn apply_mask(raw: &str, template: &str) -> String {
    let mut digits = raw.chars().filter(char::is_ascii_digit).peekable();
    let mut masked = String::with_capacity(template.len());

    for slot in template.chars() {
        if digits.peek().is_none() {
            break;
        }
        if slot == PLACEHOLDER {
            masked.extend(digits.next());
        } else {
            masked.push(slot);
        }
    }

    masked
}

/// Keeps only the ASCII digits of `value`.
pub fn remove_mask(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Number of `#` slots in a template.
pub fn placeholder_count(template: &str) -> usize {
    template.chars().filter(|&c| c == PLACEHOLDER).count()
}

// =============================================================================
// Mask Detection
// =============================================================================

/// Field type guessed from the digit count of a value.
///
/// | Digits | Type       |
/// |--------|------------|
/// | 14     | `cnpj`     |
/// | 11     | `cpf`      |
/// | 10     | `fixo`     |
/// | 8      | `cep`      |
/// | other  | `unknown`  |
///
/// An 11-digit mobile number is reported as `cpf`: the digit count cannot
/// tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MaskType {
    Cnpj,
    Cpf,
    #[serde(rename = "fixo")]
    Landline,
    Cep,
    Unknown,
}

impl MaskType {
    /// Template for this type, if it has one.
    pub const fn template(&self) -> Option<&'static str> {
        match self {
            MaskType::Cnpj => Some(CNPJ_MASK),
            MaskType::Cpf => Some(CPF_MASK),
            MaskType::Landline => Some(LANDLINE_MASK),
            MaskType::Cep => Some(CEP_MASK),
            MaskType::Unknown => None,
        }
    }
}

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaskType::Cnpj => "cnpj",
            MaskType::Cpf => "cpf",
            MaskType::Landline => "fixo",
            MaskType::Cep => "cep",
            MaskType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classifies `value` by how many digits it carries.
pub fn detect_mask_type(value: &str) -> MaskType {
    match remove_mask(value).len() {
        14 => MaskType::Cnpj,
        11 => MaskType::Cpf,
        10 => MaskType::Landline,
        8 => MaskType::Cep,
        _ => MaskType::Unknown,
    }
}

/// Masks `value` with the template of its detected type.
///
/// Values of unknown type are returned unchanged.
pub fn auto_mask(value: &str) -> String {
    match detect_mask_type(value).template() {
        Some(template) => apply_mask(value, template),
        None => value.to_string(),
    }
}

// =============================================================================
// Masked Field
// =============================================================================

/// Raw digits kept together with the template that displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaskedField {
    raw: String,
    template: String,
}

impl MaskedField {
    /// Builds a field from any input, masked or not.
    ///
    /// Digits beyond the template's placeholder count are dropped.
    pub fn new(value: &str, template: &str) -> Self {
        let raw = remove_mask(value)
            .chars()
            .take(placeholder_count(template))
            .collect();
        MaskedField {
            raw,
            template: template.to_string(),
        }
    }

    /// Digits only.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Digits rendered through the template.
    pub fn masked(&self) -> String {
        apply_mask(&self.raw, &self.template)
    }

    /// True once every placeholder is filled.
    pub fn is_complete(&self) -> bool {
        self.raw.len() == placeholder_count(&self.template)
    }
}

impl fmt::Display for MaskedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_apply_known_templates() {
        assert_eq!(apply_mask("11144477735", CPF_MASK), "111.444.777-35");
        assert_eq!(apply_mask("11222333000181", CNPJ_MASK), "11.222.333/0001-81");
        assert_eq!(apply_mask("01310100", CEP_MASK), "01310-100");
        assert_eq!(apply_mask("11987654321", MOBILE_MASK), "(11) 98765-4321");
        assert_eq!(apply_mask("1134567890", LANDLINE_MASK), "(11) 3456-7890");
    }

    #[test]
    fn test_apply_partial_input() {
        assert_eq!(apply_mask("", CPF_MASK), "");
        assert_eq!(apply_mask("111", CPF_MASK), "111");
        assert_eq!(apply_mask("1114", CPF_MASK), "111.4");
        // Leading literals are emitted as soon as one digit exists.
        assert_eq!(apply_mask("1", MOBILE_MASK), "(1");
    }

    #[test]
    fn test_apply_ignores_non_digits_and_truncates() {
        assert_eq!(apply_mask("111.444.777-35", CPF_MASK), "111.444.777-35");
        assert_eq!(apply_mask("abc", CPF_MASK), "");
        assert_eq!(apply_mask("0131010099", CEP_MASK), "01310-100");
    }

    #[test]
    fn test_remove_mask() {
        assert_eq!(remove_mask("(11) 98765-4321"), "11987654321");
        assert_eq!(remove_mask(""), "");
        assert_eq!(remove_mask("R$ 1.234,50"), "123450");
    }

    #[test]
    fn test_detect_mask_type() {
        assert_eq!(detect_mask_type("11.222.333/0001-81"), MaskType::Cnpj);
        assert_eq!(detect_mask_type("111.444.777-35"), MaskType::Cpf);
        assert_eq!(detect_mask_type("(11) 3456-7890"), MaskType::Landline);
        assert_eq!(detect_mask_type("01310-100"), MaskType::Cep);
        assert_eq!(detect_mask_type("123"), MaskType::Unknown);
        // An 11-digit mobile number looks like a CPF.
        assert_eq!(detect_mask_type("(11) 98765-4321"), MaskType::Cpf);
    }

    #[test]
    fn test_mask_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MaskType::Landline).unwrap(), "\"fixo\"");
        assert_eq!(serde_json::to_string(&MaskType::Cpf).unwrap(), "\"cpf\"");
        assert_eq!(MaskType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_auto_mask() {
        assert_eq!(auto_mask("11144477735"), "111.444.777-35");
        assert_eq!(auto_mask("01310100"), "01310-100");
        assert_eq!(auto_mask("12-3"), "12-3");
    }

    #[test]
    fn test_masked_field() {
        let field = MaskedField::new("111.444.777-35", CPF_MASK);
        assert_eq!(field.raw(), "11144477735");
        assert_eq!(field.to_string(), "111.444.777-35");
        assert!(field.is_complete());

        let partial = MaskedField::new("0131", CEP_MASK);
        assert_eq!(partial.masked(), "0131");
        assert!(!partial.is_complete());

        let long = MaskedField::new("013101009999", CEP_MASK);
        assert_eq!(long.raw(), "01310100");
    }

    fn templates() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![CPF_MASK, CNPJ_MASK, CEP_MASK, MOBILE_MASK, LANDLINE_MASK])
    }

    proptest! {
        #[test]
        fn prop_round_trip_up_to_truncation(
            template in templates(),
            digits in "[0-9]{0,20}",
        ) {
            let expected: String = digits.chars().take(placeholder_count(template)).collect();
            prop_assert_eq!(remove_mask(&apply_mask(&digits, template)), expected);
        }

        #[test]
        fn prop_remove_mask_idempotent(value in ".{0,40}") {
            let once = remove_mask(&value);
            prop_assert_eq!(remove_mask(&once), once.clone());
            prop_assert!(once.chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn prop_mask_of_masked_is_stable(template in templates(), value in "[0-9.()/ -]{0,30}") {
            let stripped = remove_mask(&value);
            let again = remove_mask(&apply_mask(&stripped, template));
            prop_assert!(stripped.starts_with(&again));
        }
    }
}

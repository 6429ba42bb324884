//! # Validation Module
//!
//! Field validators for the customer and product forms, the aggregate
//! validators built on them, and the report type shared with the rental
//! rule engine.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field validators (this module, document module)              │
//! │  ├── validate_email, validate_cep, validate_name, validate_phone       │
//! │  └── validate_cpf, validate_cnpj                                       │
//! │           │  first failure wins, one ValidationError                   │
//! │           ▼                                                             │
//! │  Layer 2: Aggregate validators                                         │
//! │  ├── ValidationService::validate_cliente / validate_produto            │
//! │  └── RentalRuleEngine::validate (rental module)                        │
//! │           │  every failure collected in a ValidationReport             │
//! │           ▼                                                             │
//! │  Layer 3: Backend REST service (constraints, uniqueness)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use celidone_core::validation::{validate_email, ValidationService};
//! use celidone_core::types::ClienteDraft;
//!
//! assert!(validate_email("ana@loja.com.br").is_ok());
//!
//! let service = ValidationService::default();
//! let draft = ClienteDraft {
//!     nome: Some("Ana Souza".into()),
//!     email: Some("ana@loja.com.br".into()),
//!     ..Default::default()
//! };
//! assert!(service.validate_cliente(Some(&draft)).is_valid());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use ts_rs::TS;

use crate::document::{validate_cnpj, validate_cpf};
use crate::error::ValidationError;
use crate::mask::remove_mask;
use crate::types::{ClienteDraft, ClosedSet, PersonType, ProductStatus, ProdutoDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Patterns
// =============================================================================

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").expect("NAME_REGEX: invalid regex pattern")
});

static MOBILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\([0-9]{2}\) [0-9]{5}-[0-9]{4}$").expect("MOBILE_REGEX: invalid regex pattern")
});

static LANDLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\([0-9]{2}\) [0-9]{4}-[0-9]{4}$")
        .expect("LANDLINE_REGEX: invalid regex pattern")
});

static PRODUCT_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PRD-[0-9]{4}$").expect("PRODUCT_CODE_REGEX: invalid regex pattern")
});

static SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(PP|P|M|G|GG|XG|XXG|36|38|40|42|44|46|48|50|52|54|56|58|60)$")
        .expect("SIZE_REGEX: invalid regex pattern")
});

/// Allowed values of `ProdutoDraft::sexo`.
pub const PRODUCT_SEXES: &[&str] = &["masculino", "feminino", "unissex"];

/// Digits in a CEP.
pub const CEP_LENGTH: usize = 8;

// =============================================================================
// Rules
// =============================================================================

/// Configurable bounds for the field validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ValidationRules {
    /// Minimum trimmed name length, in characters.
    pub name_min_len: usize,
    /// Maximum trimmed name length, in characters.
    pub name_max_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules {
            name_min_len: 2,
            name_max_len: 100,
        }
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an email address.
///
/// ## Example
/// ```rust
/// use celidone_core::validation::validate_email;
///
/// assert!(validate_email("a@b.co").is_ok());
/// assert!(validate_email("a@b").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.is_empty() {
        return Err(ValidationError::required("Email"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::invalid_format("Email"));
    }

    Ok(())
}

/// Validates a CEP: exactly 8 digits once separators are removed.
pub fn validate_cep(cep: &str) -> ValidationResult<()> {
    if cep.is_empty() {
        return Err(ValidationError::required("CEP"));
    }

    if remove_mask(cep).len() != CEP_LENGTH {
        return Err(ValidationError::invalid_format("CEP"));
    }

    Ok(())
}

/// Validates a person's name.
///
/// ## Rules
/// - Must not be empty
/// - Trimmed length within `rules.name_min_len..=rules.name_max_len`
/// - Letters (accented included) and whitespace only
pub fn validate_name(name: &str, rules: &ValidationRules) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::required("Nome"));
    }

    let trimmed = name.trim();
    let len = trimmed.chars().count();

    if len < rules.name_min_len {
        return Err(ValidationError::TooShort {
            field: "Nome".to_string(),
            min: rules.name_min_len,
        });
    }

    if len > rules.name_max_len {
        return Err(ValidationError::TooLong {
            field: "Nome".to_string(),
            max: rules.name_max_len,
        });
    }

    if !NAME_REGEX.is_match(trimmed) {
        return Err(ValidationError::LettersOnly {
            field: "Nome".to_string(),
        });
    }

    Ok(())
}

/// Mobile or landline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PhoneKind {
    /// `(DD) NNNNN-NNNN`
    #[default]
    #[serde(rename = "celular")]
    Mobile,
    /// `(DD) NNNN-NNNN`
    #[serde(rename = "fixo")]
    Landline,
}

impl PhoneKind {
    fn field(&self) -> &'static str {
        match self {
            PhoneKind::Mobile => "Celular",
            PhoneKind::Landline => "Telefone",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            PhoneKind::Mobile => &MOBILE_REGEX,
            PhoneKind::Landline => &LANDLINE_REGEX,
        }
    }
}

/// Validates a masked phone number of the given kind.
///
/// ## Example
/// ```rust
/// use celidone_core::validation::{validate_phone, PhoneKind};
///
/// assert!(validate_phone("(11) 98765-4321", PhoneKind::Mobile).is_ok());
/// assert!(validate_phone("(11) 3456-7890", PhoneKind::Landline).is_ok());
/// assert!(validate_phone("11987654321", PhoneKind::Mobile).is_err());
/// ```
pub fn validate_phone(phone: &str, kind: PhoneKind) -> ValidationResult<()> {
    if phone.is_empty() {
        return Err(ValidationError::required(kind.field()));
    }

    if !kind.pattern().is_match(phone) {
        return Err(ValidationError::invalid_format(kind.field()));
    }

    Ok(())
}

// =============================================================================
// Field Check
// =============================================================================

/// Serializable outcome of one field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> From<&ValidationResult<T>> for FieldCheck {
    fn from(result: &ValidationResult<T>) -> Self {
        match result {
            Ok(_) => FieldCheck {
                is_valid: true,
                message: None,
            },
            Err(err) => FieldCheck {
                is_valid: false,
                message: Some(err.to_string()),
            },
        }
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// Every failure found while validating one record, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding exactly one error.
    pub fn single(error: ValidationError) -> Self {
        ValidationReport {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records the error of a failed check and passes a success through.
    pub fn check<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// User-facing messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// `Ok` when empty, otherwise all errors.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            is_valid: self.is_valid(),
            errors: self.messages(),
        }
    }
}

/// Wire form of a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

// =============================================================================
// Validation Service
// =============================================================================

/// Aggregate validators for the customer and product forms.
#[derive(Debug, Clone, Default)]
pub struct ValidationService {
    rules: ValidationRules,
}

impl ValidationService {
    pub fn new(rules: ValidationRules) -> Self {
        ValidationService { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// [`validate_name`] with this service's bounds.
    pub fn validate_name(&self, name: &str) -> ValidationResult<()> {
        validate_name(name, &self.rules)
    }

    /// Validates a customer form.
    ///
    /// ## Checks
    /// 1. Name and email, always
    /// 2. CPF for `PESSOA_FISICA`, CNPJ for `PESSOA_JURIDICA`; no document
    ///    check when the person type is missing
    /// 3. CEP, mobile and landline only when filled in
    pub fn validate_cliente(&self, draft: Option<&ClienteDraft>) -> ValidationReport {
        let Some(draft) = draft else {
            return ValidationReport::single(ValidationError::required("Dados do cliente"));
        };

        let mut report = ValidationReport::new();

        report.check(self.validate_name(text(&draft.nome)));
        report.check(validate_email(text(&draft.email)));

        if let Some(tipo) = filled(&draft.tipo_pessoa) {
            match report.check(PersonType::parse_value(tipo)) {
                Some(PersonType::PessoaFisica) => {
                    report.check(validate_cpf(text(&draft.cpf)));
                }
                Some(PersonType::PessoaJuridica) => {
                    report.check(validate_cnpj(text(&draft.cnpj)));
                }
                None => {}
            }
        }

        if let Some(cep) = filled(&draft.cep) {
            report.check(validate_cep(cep));
        }
        if let Some(celular) = filled(&draft.celular) {
            report.check(validate_phone(celular, PhoneKind::Mobile));
        }
        if let Some(telefone) = filled(&draft.telefone) {
            report.check(validate_phone(telefone, PhoneKind::Landline));
        }

        report
    }

    /// Validates a product form. Every failure is reported.
    pub fn validate_produto(&self, draft: Option<&ProdutoDraft>) -> ValidationReport {
        let Some(draft) = draft else {
            return ValidationReport::single(ValidationError::required("Dados do produto"));
        };

        let mut report = ValidationReport::new();

        match filled(&draft.codigo) {
            None => report.push(ValidationError::required("Código")),
            Some(codigo) if !PRODUCT_CODE_REGEX.is_match(codigo) => {
                report.push(ValidationError::PatternMismatch {
                    field: "Código".to_string(),
                    pattern: "PRD-0000".to_string(),
                });
            }
            Some(_) => {}
        }

        let required = [
            ("Tecido", &draft.tecido),
            ("Cor", &draft.cor),
            ("Estampa", &draft.estampa),
            ("Tipo de traje", &draft.tipo_traje),
            ("Textura", &draft.textura),
            ("Tamanho", &draft.tamanho),
            ("Status", &draft.status),
            ("Sexo", &draft.sexo),
        ];
        for (field, value) in required {
            if filled(value).is_none() {
                report.push(ValidationError::required(field));
            }
        }

        match draft.preco {
            Some(preco) if preco.is_finite() && preco > 0.0 => {}
            _ => report.push(ValidationError::MustBePositive {
                field: "Preço".to_string(),
            }),
        }

        if let Some(tamanho) = filled(&draft.tamanho) {
            if !SIZE_REGEX.is_match(tamanho) {
                report.push(ValidationError::invalid_format("Tamanho"));
            }
        }

        if let Some(status) = filled(&draft.status) {
            report.check(ProductStatus::parse_value(status));
        }

        if let Some(sexo) = filled(&draft.sexo) {
            if !PRODUCT_SEXES.contains(&sexo) {
                report.push(ValidationError::NotAllowed {
                    field: "Sexo".to_string(),
                    allowed: PRODUCT_SEXES.iter().map(|s| s.to_string()).collect(),
                });
            }
        }

        report
    }
}

/// The value when it holds more than whitespace.
pub(crate) fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// The value, or `""` when absent.
fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

// =============================================================================
// Unit Tests
// =============================================================================

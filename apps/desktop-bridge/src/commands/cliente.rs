//! # Customer Commands
//!
//! Field-by-field checks for the customer form, plus the whole-form check
//! run on submit. Field checks never fail the request: an invalid value is
//! a successful answer with `isValid: false`.

use serde::Serialize;
use tracing::debug;

use celidone_core::document::{validate_cnpj as check_cnpj, validate_cpf as check_cpf};
use celidone_core::mask::remove_mask;
use celidone_core::validation::{self, FieldCheck, ValidationSummary};
use celidone_core::{ClienteDraft, DocumentKind, DocumentNumber, PersonType};

use crate::protocol::{DocumentArg, PhoneArg, TextArg};
use crate::state::EngineState;

/// Outcome of a CPF/CNPJ check.
///
/// ## Example Response
/// ```json
/// { "isValid": true, "kind": "CPF", "formatted": "111.444.777-35" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCheck {
    pub is_valid: bool,
    pub kind: DocumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DocumentCheck {
    fn valid(document: &DocumentNumber) -> Self {
        DocumentCheck {
            is_valid: true,
            kind: document.kind(),
            formatted: Some(document.formatted()),
            message: None,
        }
    }

    fn invalid(kind: DocumentKind, message: String) -> Self {
        DocumentCheck {
            is_valid: false,
            kind,
            formatted: None,
            message: Some(message),
        }
    }
}

pub fn validate_cpf(arg: TextArg) -> DocumentCheck {
    debug!("validate_cpf command");
    match check_cpf(&arg.value) {
        Ok(cpf) => DocumentCheck::valid(&DocumentNumber::Cpf(cpf)),
        Err(e) => DocumentCheck::invalid(DocumentKind::Cpf, e.to_string()),
    }
}

pub fn validate_cnpj(arg: TextArg) -> DocumentCheck {
    debug!("validate_cnpj command");
    match check_cnpj(&arg.value) {
        Ok(cnpj) => DocumentCheck::valid(&DocumentNumber::Cnpj(cnpj)),
        Err(e) => DocumentCheck::invalid(DocumentKind::Cnpj, e.to_string()),
    }
}

/// Validates a CPF or CNPJ.
///
/// Without `tipoPessoa`, 14 digits are read as a CNPJ and anything else as
/// a CPF.
pub fn validate_document(arg: DocumentArg) -> DocumentCheck {
    let person_type = arg.tipo_pessoa.unwrap_or_else(|| {
        if remove_mask(&arg.value).len() == DocumentKind::Cnpj.length() {
            PersonType::PessoaJuridica
        } else {
            PersonType::PessoaFisica
        }
    });
    debug!(?person_type, "validate_document command");

    match DocumentNumber::parse(&arg.value, person_type) {
        Ok(document) => DocumentCheck::valid(&document),
        Err(e) => {
            let kind = match person_type {
                PersonType::PessoaFisica => DocumentKind::Cpf,
                PersonType::PessoaJuridica => DocumentKind::Cnpj,
            };
            DocumentCheck::invalid(kind, e.to_string())
        }
    }
}

pub fn validate_cep(arg: TextArg) -> FieldCheck {
    debug!("validate_cep command");
    FieldCheck::from(&validation::validate_cep(&arg.value))
}

pub fn validate_email(arg: TextArg) -> FieldCheck {
    debug!("validate_email command");
    FieldCheck::from(&validation::validate_email(&arg.value))
}

/// Uses the configured length bounds.
pub fn validate_name(state: &EngineState, arg: TextArg) -> FieldCheck {
    debug!("validate_name command");
    FieldCheck::from(&state.validation.validate_name(&arg.value))
}

pub fn validate_phone(arg: PhoneArg) -> FieldCheck {
    debug!(kind = ?arg.tipo, "validate_phone command");
    FieldCheck::from(&validation::validate_phone(&arg.value, arg.tipo))
}

/// Validates the whole customer form and lists every failure.
pub fn validate_cliente(state: &EngineState, draft: Option<ClienteDraft>) -> ValidationSummary {
    let report = state.validation.validate_cliente(draft.as_ref());
    debug!(errors = report.errors().len(), "validate_cliente command");
    report.summary()
}

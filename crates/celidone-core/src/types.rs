//! # Domain Types
//!
//! Core domain types of the rental shop.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Form payloads (loose)          Entities (typed)                        │
//! │  ┌─────────────────┐            ┌─────────────────┐                     │
//! │  │ RentalRequest   │──accept──► │ RentalPayload   │ (rental module)     │
//! │  │ ClienteDraft    │            │ Rental          │ id, status, dates   │
//! │  │ ProdutoDraft    │            └─────────────────┘                     │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Closed sets                                                            │
//! │  RentalStatus   ATIVO | DEVOLVIDO | ATRASADO | CANCELADO                │
//! │  ChargeType     diaria | semanal | mensal | evento                      │
//! │  PaymentMethod  dinheiro | cartao_credito | cartao_debito | pix | …     │
//! │  PersonType     PESSOA_FISICA | PESSOA_JURIDICA                         │
//! │  ProductStatus  disponivel | indisponivel | manutencao | alugado        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loose vs. Typed
//! Form payloads keep every field optional so a missing value becomes a
//! "required" message instead of a deserialization failure. Entities are
//! fully typed and only come from the backend or from the rule engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{serde_reais, Money};
use crate::validation::ValidationResult;

// =============================================================================
// Closed Sets
// =============================================================================

/// An enum whose wire values form a fixed list.
pub trait ClosedSet: Sized + Copy + 'static {
    /// Label used in error messages.
    const FIELD: &'static str;

    /// Every member, in display order.
    const ALL: &'static [Self];

    /// Wire value.
    fn as_str(&self) -> &'static str;

    /// Whether `value` names this member.
    fn matches(&self, value: &str) -> bool {
        self.as_str() == value
    }

    /// Parses a wire value, listing the allowed ones on failure.
    fn parse_value(value: &str) -> ValidationResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.matches(value.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: Self::FIELD.to_string(),
                allowed: Self::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Rental Status
// =============================================================================

/// Lifecycle state of a rental.
///
/// `ATRASADO` is never stored by this engine: it is projected from `ATIVO`
/// when the expected return date has passed. Lowercase spellings are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    #[serde(alias = "ativo")]
    Ativo,
    #[serde(alias = "devolvido")]
    Devolvido,
    #[serde(alias = "atrasado")]
    Atrasado,
    #[serde(alias = "cancelado")]
    Cancelado,
}

impl RentalStatus {
    /// Terminal states accept no further action.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Devolvido | RentalStatus::Cancelado)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            RentalStatus::Ativo => "Ativo",
            RentalStatus::Devolvido => "Devolvido",
            RentalStatus::Atrasado => "Atrasado",
            RentalStatus::Cancelado => "Cancelado",
        }
    }
}

impl Default for RentalStatus {
    fn default() -> Self {
        RentalStatus::Ativo
    }
}

impl ClosedSet for RentalStatus {
    const FIELD: &'static str = "Status do aluguel";
    const ALL: &'static [Self] = &[
        RentalStatus::Ativo,
        RentalStatus::Devolvido,
        RentalStatus::Atrasado,
        RentalStatus::Cancelado,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Ativo => "ATIVO",
            RentalStatus::Devolvido => "DEVOLVIDO",
            RentalStatus::Atrasado => "ATRASADO",
            RentalStatus::Cancelado => "CANCELADO",
        }
    }

    fn matches(&self, value: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(value)
    }
}

// =============================================================================
// Charge Type
// =============================================================================

/// How the rent is charged; `periodo` counts units of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChargeType {
    Diaria,
    Semanal,
    Mensal,
    Evento,
}

impl ChargeType {
    pub const fn label(&self) -> &'static str {
        match self {
            ChargeType::Diaria => "Diária",
            ChargeType::Semanal => "Semanal",
            ChargeType::Mensal => "Mensal",
            ChargeType::Evento => "Evento",
        }
    }
}

impl ClosedSet for ChargeType {
    const FIELD: &'static str = "Tipo de cobrança";
    const ALL: &'static [Self] = &[
        ChargeType::Diaria,
        ChargeType::Semanal,
        ChargeType::Mensal,
        ChargeType::Evento,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ChargeType::Diaria => "diaria",
            ChargeType::Semanal => "semanal",
            ChargeType::Mensal => "mensal",
            ChargeType::Evento => "evento",
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the counter.
    Dinheiro,
    CartaoCredito,
    CartaoDebito,
    /// Instant transfer.
    Pix,
    Transferencia,
    Cheque,
}

impl PaymentMethod {
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "Dinheiro",
            PaymentMethod::CartaoCredito => "Cartão de Crédito",
            PaymentMethod::CartaoDebito => "Cartão de Débito",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Transferencia => "Transferência",
            PaymentMethod::Cheque => "Cheque",
        }
    }
}

impl ClosedSet for PaymentMethod {
    const FIELD: &'static str = "Forma de pagamento";
    const ALL: &'static [Self] = &[
        PaymentMethod::Dinheiro,
        PaymentMethod::CartaoCredito,
        PaymentMethod::CartaoDebito,
        PaymentMethod::Pix,
        PaymentMethod::Transferencia,
        PaymentMethod::Cheque,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "dinheiro",
            PaymentMethod::CartaoCredito => "cartao_credito",
            PaymentMethod::CartaoDebito => "cartao_debito",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Transferencia => "transferencia",
            PaymentMethod::Cheque => "cheque",
        }
    }
}

// =============================================================================
// Person Type
// =============================================================================

/// Whether a customer is an individual (CPF) or an organization (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonType {
    PessoaFisica,
    PessoaJuridica,
}

impl ClosedSet for PersonType {
    const FIELD: &'static str = "Tipo de pessoa";
    const ALL: &'static [Self] = &[PersonType::PessoaFisica, PersonType::PessoaJuridica];

    fn as_str(&self) -> &'static str {
        match self {
            PersonType::PessoaFisica => "PESSOA_FISICA",
            PersonType::PessoaJuridica => "PESSOA_JURIDICA",
        }
    }
}

// =============================================================================
// Product Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Disponivel,
    Indisponivel,
    Manutencao,
    Alugado,
}

impl ProductStatus {
    /// Only `disponivel` can be rented.
    pub const fn is_available(&self) -> bool {
        matches!(self, ProductStatus::Disponivel)
    }
}

impl ClosedSet for ProductStatus {
    const FIELD: &'static str = "Status";
    const ALL: &'static [Self] = &[
        ProductStatus::Disponivel,
        ProductStatus::Indisponivel,
        ProductStatus::Manutencao,
        ProductStatus::Alugado,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Disponivel => "disponivel",
            ProductStatus::Indisponivel => "indisponivel",
            ProductStatus::Manutencao => "manutencao",
            ProductStatus::Alugado => "alugado",
        }
    }
}

/// `Display` and `FromStr` through the wire value.
macro_rules! closed_set_str {
    ($($ty:ty),+ $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ClosedSet>::parse_value(s)
            }
        }
    )+};
}

closed_set_str!(RentalStatus, ChargeType, PaymentMethod, PersonType, ProductStatus);

// =============================================================================
// Form Payloads
// =============================================================================

/// Rental form as submitted. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalRequest {
    #[serde(deserialize_with = "id_string::deserialize")]
    pub cliente_id: Option<String>,
    #[serde(deserialize_with = "id_string::deserialize")]
    pub produto_id: Option<String>,
    /// `YYYY-MM-DD`, `DD/MM/YYYY` or an ISO datetime.
    pub data_aluguel: Option<String>,
    pub data_dev_prevista: Option<String>,
    /// Reais.
    pub valor_aluguel: Option<f64>,
    pub valor_caucao: Option<f64>,
    pub valor_desconto: Option<f64>,
    /// Number of charge units.
    pub periodo: Option<i64>,
    pub tipo_cobranca: Option<String>,
    pub forma_pagamento: Option<String>,
    pub observacoes: Option<String>,
}

/// Customer form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ClienteDraft {
    pub nome: Option<String>,
    pub email: Option<String>,
    /// `PESSOA_FISICA` or `PESSOA_JURIDICA`; older forms send `natureza`.
    #[serde(alias = "natureza")]
    pub tipo_pessoa: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub cep: Option<String>,
    /// Mobile phone, `(DD) NNNNN-NNNN`.
    pub celular: Option<String>,
    /// Landline, `(DD) NNNN-NNNN`.
    pub telefone: Option<String>,
}

/// Product form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProdutoDraft {
    /// `PRD-0000`
    pub codigo: Option<String>,
    pub tecido: Option<String>,
    pub cor: Option<String>,
    pub estampa: Option<String>,
    #[serde(alias = "tipotraje")]
    pub tipo_traje: Option<String>,
    pub textura: Option<String>,
    pub tamanho: Option<String>,
    pub status: Option<String>,
    pub sexo: Option<String>,
    /// Reais.
    pub preco: Option<f64>,
}

// =============================================================================
// Rental
// =============================================================================

/// A rental as stored by the backend.
///
/// Amounts travel as reais numbers and are held as [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(deserialize_with = "id_string::required")]
    pub id: String,
    #[serde(deserialize_with = "id_string::required")]
    pub cliente_id: String,
    #[serde(deserialize_with = "id_string::required")]
    pub produto_id: String,
    #[ts(as = "String")]
    pub data_aluguel: NaiveDate,
    #[ts(as = "String")]
    pub data_dev_prevista: NaiveDate,
    /// Set when the costume comes back.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub data_dev_efetiva: Option<NaiveDate>,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_aluguel: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_caucao: Money,
    #[serde(with = "serde_reais", default)]
    #[ts(type = "number")]
    pub valor_desconto: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_total: Money,
    pub periodo: i64,
    pub tipo_cobranca: ChargeType,
    pub forma_pagamento: PaymentMethod,
    pub status: RentalStatus,
    #[serde(default)]
    pub observacoes: Option<String>,
}

// =============================================================================
// Identifier Deserialization
// =============================================================================

/// Ids arrive as strings from the form and as numbers from the backend.
mod id_string {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("um identificador (texto ou número)")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(IdVisitor)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        d.deserialize_option(IdVisitor)
    }

    pub fn required<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        deserialize(d)?.ok_or_else(|| <D::Error as de::Error>::custom("identificador ausente"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&RentalStatus::Devolvido).unwrap(),
            "\"DEVOLVIDO\""
        );
        let status: RentalStatus = serde_json::from_str("\"cancelado\"").unwrap();
        assert_eq!(status, RentalStatus::Cancelado);
        assert_eq!("atrasado".parse::<RentalStatus>().unwrap(), RentalStatus::Atrasado);
        assert!(RentalStatus::Devolvido.is_terminal());
        assert!(!RentalStatus::Atrasado.is_terminal());
        assert_eq!(RentalStatus::default(), RentalStatus::Ativo);
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CartaoCredito).unwrap(),
            "\"cartao_credito\""
        );
        assert_eq!(
            serde_json::to_string(&PersonType::PessoaJuridica).unwrap(),
            "\"PESSOA_JURIDICA\""
        );
        assert_eq!(ChargeType::Semanal.to_string(), "semanal");
        assert_eq!(ProductStatus::Manutencao.to_string(), "manutencao");
        assert_eq!(PaymentMethod::Pix.label(), "PIX");
    }

    #[test]
    fn test_parse_lists_allowed_values() {
        assert_eq!("pix".parse::<PaymentMethod>().unwrap(), PaymentMethod::Pix);
        let err = "boleto".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Forma de pagamento deve ser um de: dinheiro, cartao_credito, \
             cartao_debito, pix, transferencia, cheque"
        );
        assert!("DIARIA".parse::<ChargeType>().is_err());
    }

    #[test]
    fn test_product_availability() {
        assert!(ProductStatus::Disponivel.is_available());
        assert!(!ProductStatus::Alugado.is_available());
        assert!(!ProductStatus::Manutencao.is_available());
    }

    #[test]
    fn test_rental_request_accepts_numeric_ids_and_gaps() {
        let json = r#"{"clienteId": 12, "produtoId": "7", "valorAluguel": 150.0}"#;
        let request: RentalRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.cliente_id.as_deref(), Some("12"));
        assert_eq!(request.produto_id.as_deref(), Some("7"));
        assert_eq!(request.valor_aluguel, Some(150.0));
        assert_eq!(request.periodo, None);

        let nulls: RentalRequest = serde_json::from_str(r#"{"clienteId": null}"#).unwrap();
        assert_eq!(nulls.cliente_id, None);
    }

    #[test]
    fn test_cliente_draft_accepts_natureza_alias() {
        let draft: ClienteDraft =
            serde_json::from_str(r#"{"nome": "Ana", "natureza": "PESSOA_FISICA"}"#).unwrap();
        assert_eq!(draft.tipo_pessoa.as_deref(), Some("PESSOA_FISICA"));
    }

    #[test]
    fn test_rental_round_trips_amounts_in_reais() {
        let json = r#"{
            "id": 1, "clienteId": 2, "produtoId": 3,
            "dataAluguel": "2024-01-08", "dataDevPrevista": "2024-01-15",
            "valorAluguel": 100.0, "valorCaucao": 200.0, "valorTotal": 690.0,
            "periodo": 7, "tipoCobranca": "diaria", "formaPagamento": "pix",
            "status": "ATIVO"
        }"#;
        let rental: Rental = serde_json::from_str(json).unwrap();
        assert_eq!(rental.id, "1");
        assert_eq!(rental.valor_total, Money::from_cents(69_000));
        assert_eq!(rental.valor_desconto, Money::zero());
        assert_eq!(rental.data_dev_efetiva, None);

        let value = serde_json::to_value(&rental).unwrap();
        assert_eq!(value["valorTotal"], serde_json::json!(690.0));
        assert_eq!(value["dataAluguel"], "2024-01-08");
    }
}

//! # Rental Rule Engine
//!
//! Validates rental requests, derives the accepted payload and runs the
//! policy calculations (late fee, suggested values).
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RentalRequest (form, loose)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. present?                  ── no ──► [Required]  (stops here)        │
//! │  2. required fields filled                                              │
//! │  3. amounts, periodo, closed sets                                       │
//! │  4. dates parse, dataDevPrevista > dataAluguel                          │
//! │  5. product available                                                   │
//! │       │        steps 2-5 accumulate into one ValidationReport           │
//! │       ▼                                                                 │
//! │  RentalPayload { …, valorTotal, status: ATIVO }  ──► backend REST       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! `valorTotal = valorAluguel × periodo − valorDesconto`. A discount larger
//! than the subtotal yields a negative total; it is reported as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{serde_reais, Money};
use crate::types::{ChargeType, ClosedSet, PaymentMethod, Rental, RentalRequest, RentalStatus};
use crate::validation::{filled, ValidationReport};

// =============================================================================
// Policy
// =============================================================================

/// Shop policy for amounts and fees.
///
/// Amounts are written in reais in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct RentalPolicy {
    /// Ceiling for `valorAluguel`.
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub max_valor_aluguel: Money,

    /// Ceiling for `valorCaucao`.
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub max_valor_caucao: Money,

    /// Late fee per chargeable day, in basis points of the rental total.
    pub late_fee_bps: u32,

    /// Overdue days not charged.
    pub late_fee_grace_days: i64,

    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub late_fee_cap: Money,

    /// Suggested rent, in basis points of the product price.
    pub suggested_rent_bps: u32,

    /// Suggested deposit, in basis points of the product price.
    pub suggested_deposit_bps: u32,

    /// Advisory deposit range, in basis points of the rent.
    pub deposit_min_bps: u32,
    pub deposit_max_bps: u32,

    /// Lowest advisory deposit.
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub deposit_floor: Money,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        RentalPolicy {
            max_valor_aluguel: Money::from_cents(999_999),
            max_valor_caucao: Money::from_cents(9_999_999),
            late_fee_bps: 200,
            late_fee_grace_days: 1,
            late_fee_cap: Money::from_cents(100_000),
            suggested_rent_bps: 3_000,
            suggested_deposit_bps: 10_000,
            deposit_min_bps: 5_000,
            deposit_max_bps: 20_000,
            deposit_floor: Money::from_cents(5_000),
        }
    }
}

// =============================================================================
// Accepted Payload
// =============================================================================

/// A rental request that passed every rule, ready for the backend.
///
/// Only [`RentalRuleEngine::accept`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct RentalPayload {
    pub cliente_id: String,
    pub produto_id: String,
    #[ts(as = "String")]
    pub data_aluguel: NaiveDate,
    #[ts(as = "String")]
    pub data_dev_prevista: NaiveDate,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_aluguel: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_caucao: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_desconto: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_total: Money,
    pub periodo: i64,
    pub tipo_cobranca: ChargeType,
    pub forma_pagamento: PaymentMethod,
    pub status: RentalStatus,
    pub observacoes: Option<String>,
}

// =============================================================================
// Suggestions
// =============================================================================

/// Advisory bounds for the deposit of a given rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DepositRange {
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub min: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub max: Money,
}

impl DepositRange {
    pub fn contains(&self, deposit: Money) -> bool {
        self.min <= deposit && deposit <= self.max
    }
}

/// Values pre-filled in the rental form once a product is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_aluguel: Money,
    #[serde(with = "serde_reais")]
    #[ts(type = "number")]
    pub valor_caucao: Money,
    pub caucao: DepositRange,
    pub periodos: Vec<i64>,
}

/// Common `periodo` choices per charge type.
pub fn suggested_periods(tipo: ChargeType) -> &'static [i64] {
    match tipo {
        ChargeType::Diaria => &[1, 2, 3, 5, 7],
        ChargeType::Semanal => &[1, 2, 3, 4],
        ChargeType::Mensal => &[1, 2, 3, 6],
        ChargeType::Evento => &[1, 2, 3],
    }
}

// =============================================================================
// Totals & Dates
// =============================================================================

/// `valor_aluguel × periodo − desconto`. May be negative.
///
/// Fails with [`ValidationError::Overflow`] on "Valor total" when the result
/// does not fit in centavos.
///
/// ## Example
/// ```rust
/// use celidone_core::money::Money;
/// use celidone_core::rental::compute_total;
///
/// let total = compute_total(Money::from_cents(10_000), 7, Money::from_cents(1_000));
/// assert_eq!(total, Ok(Money::from_cents(69_000))); // R$ 690,00
/// ```
pub fn compute_total(valor_aluguel: Money, periodo: i64, desconto: Money) -> Result<Money, ValidationError> {
    valor_aluguel
        .checked_times(periodo)
        .and_then(|subtotal| subtotal.checked_sub(desconto))
        .ok_or_else(|| ValidationError::Overflow {
            field: "Valor total".to_string(),
        })
}

/// Parses a form date: `2024-01-31`, `31/01/2024`, or an ISO datetime whose
/// date part is kept.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            let date_part = text.get(..10)?;
            let rest = text.get(10..)?;
            if rest.starts_with('T') || rest.starts_with(' ') {
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
            } else {
                None
            }
        })
}

// =============================================================================
// Rule Engine
// =============================================================================

/// Rental rules bound to a [`RentalPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RentalRuleEngine {
    policy: RentalPolicy,
}

impl RentalRuleEngine {
    pub fn new(policy: RentalPolicy) -> Self {
        RentalRuleEngine { policy }
    }

    pub fn policy(&self) -> &RentalPolicy {
        &self.policy
    }

    /// Runs every rule and reports all failures.
    ///
    /// A missing request yields a single `Required` error.
    pub fn validate(&self, request: Option<&RentalRequest>, product_available: bool) -> ValidationReport {
        match self.evaluate(request, product_available) {
            Ok(_) => ValidationReport::new(),
            Err(report) => report,
        }
    }

    /// Validates and builds the payload for the backend.
    pub fn accept(&self, request: Option<&RentalRequest>, product_available: bool) -> CoreResult<RentalPayload> {
        self.evaluate(request, product_available)
            .map_err(|report| CoreError::Rejected {
                errors: report.into_errors(),
            })
    }

    fn evaluate(
        &self,
        request: Option<&RentalRequest>,
        product_available: bool,
    ) -> Result<RentalPayload, ValidationReport> {
        let Some(request) = request else {
            return Err(ValidationReport::single(ValidationError::required(
                "Dados do aluguel",
            )));
        };

        let mut report = ValidationReport::new();

        // Presence
        let cliente_id = required_text(&mut report, &request.cliente_id, "Cliente");
        let produto_id = required_text(&mut report, &request.produto_id, "Produto");
        let data_aluguel_text = required_text(&mut report, &request.data_aluguel, "Data do aluguel");
        let data_dev_prevista_text = required_text(
            &mut report,
            &request.data_dev_prevista,
            "Data prevista para devolução",
        );
        let valor_aluguel = required_value(&mut report, request.valor_aluguel, "Valor do aluguel");
        let valor_caucao = required_value(&mut report, request.valor_caucao, "Valor da caução");
        let tipo_cobranca_text = required_text(&mut report, &request.tipo_cobranca, "Tipo de cobrança");
        let forma_pagamento_text =
            required_text(&mut report, &request.forma_pagamento, "Forma de pagamento");
        let periodo = required_value(&mut report, request.periodo, "Período");

        // Amounts and closed sets
        let valor_aluguel = valor_aluguel.and_then(|value| {
            report.check(bounded_amount(
                value,
                "Valor do aluguel",
                Money::from_cents(1),
                self.policy.max_valor_aluguel,
            ))
        });
        let valor_caucao = valor_caucao.and_then(|value| {
            report.check(bounded_amount(
                value,
                "Valor da caução",
                Money::zero(),
                self.policy.max_valor_caucao,
            ))
        });
        let valor_desconto = match request.valor_desconto {
            None => Some(Money::zero()),
            Some(value) => report.check(discount(value)),
        };
        let periodo = periodo.and_then(|periodo| {
            if periodo > 0 {
                Some(periodo)
            } else {
                report.push(ValidationError::MustBePositive {
                    field: "Período".to_string(),
                });
                None
            }
        });
        let tipo_cobranca = tipo_cobranca_text.and_then(|t| report.check(ChargeType::parse_value(t)));
        let forma_pagamento =
            forma_pagamento_text.and_then(|t| report.check(PaymentMethod::parse_value(t)));

        // Dates
        let data_aluguel = data_aluguel_text.and_then(|t| report.check(date_field(t, "Data do aluguel")));
        let data_dev_prevista = data_dev_prevista_text
            .and_then(|t| report.check(date_field(t, "Data prevista para devolução")));
        if let (Some(aluguel), Some(prevista)) = (data_aluguel, data_dev_prevista) {
            if prevista <= aluguel {
                report.push(ValidationError::ReturnNotAfterRental);
            }
        }

        // Availability
        if !product_available {
            report.push(ValidationError::ProductUnavailable);
        }

        let valor_total = match (valor_aluguel, periodo, valor_desconto) {
            (Some(valor_aluguel), Some(periodo), Some(valor_desconto)) => {
                report.check(compute_total(valor_aluguel, periodo, valor_desconto))
            }
            _ => None,
        };

        if !report.is_valid() {
            return Err(report);
        }

        let (
            Some(cliente_id),
            Some(produto_id),
            Some(data_aluguel),
            Some(data_dev_prevista),
            Some(valor_aluguel),
            Some(valor_caucao),
            Some(valor_desconto),
            Some(valor_total),
            Some(periodo),
            Some(tipo_cobranca),
            Some(forma_pagamento),
        ) = (
            cliente_id,
            produto_id,
            data_aluguel,
            data_dev_prevista,
            valor_aluguel,
            valor_caucao,
            valor_desconto,
            valor_total,
            periodo,
            tipo_cobranca,
            forma_pagamento,
        )
        else {
            return Err(report);
        };

        Ok(RentalPayload {
            cliente_id: cliente_id.to_string(),
            produto_id: produto_id.to_string(),
            data_aluguel,
            data_dev_prevista,
            valor_aluguel,
            valor_caucao,
            valor_desconto,
            valor_total,
            periodo,
            tipo_cobranca,
            forma_pagamento,
            status: RentalStatus::Ativo,
            observacoes: request.observacoes.clone().filter(|o| !o.trim().is_empty()),
        })
    }

    // =========================================================================
    // Policy Calculations
    // =========================================================================

    /// Late fee owed on `today`.
    ///
    /// `late_fee_bps` of the rental total per overdue day beyond the grace
    /// period, capped at `late_fee_cap`. Zero for returned or cancelled
    /// rentals and for rentals that are not overdue.
    pub fn late_fee(&self, rental: &Rental, today: NaiveDate) -> Money {
        let chargeable = rental
            .days_overdue(today)
            .saturating_sub(self.policy.late_fee_grace_days);
        if chargeable <= 0 || !rental.valor_total.is_positive() {
            return Money::zero();
        }

        rental
            .valor_total
            .percent_bps(self.policy.late_fee_bps)
            .checked_times(chargeable)
            .map_or(self.policy.late_fee_cap, |fee| fee.min(self.policy.late_fee_cap))
    }

    /// Rent suggested for a product of price `preco`.
    pub fn suggested_rent(&self, preco: Money) -> Money {
        preco.percent_bps(self.policy.suggested_rent_bps)
    }

    /// Deposit suggested for a product of price `preco`.
    pub fn suggested_deposit(&self, preco: Money) -> Money {
        preco.percent_bps(self.policy.suggested_deposit_bps)
    }

    /// Advisory deposit range for a rent of `valor_aluguel`.
    ///
    /// The lower bound never drops below `deposit_floor`, and the upper bound
    /// never drops below the lower one.
    pub fn deposit_advisory(&self, valor_aluguel: Money) -> DepositRange {
        let min = valor_aluguel
            .percent_bps(self.policy.deposit_min_bps)
            .max(self.policy.deposit_floor);
        let max = valor_aluguel.percent_bps(self.policy.deposit_max_bps).max(min);
        DepositRange { min, max }
    }

    /// Everything the form pre-fills for a product price and charge type.
    pub fn suggest(&self, preco: Money, tipo: ChargeType) -> Suggestions {
        let valor_aluguel = self.suggested_rent(preco);
        Suggestions {
            valor_aluguel,
            valor_caucao: self.suggested_deposit(preco),
            caucao: self.deposit_advisory(valor_aluguel),
            periodos: suggested_periods(tipo).to_vec(),
        }
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

fn required_text<'a>(report: &mut ValidationReport, value: &'a Option<String>, field: &str) -> Option<&'a str> {
    let text = filled(value);
    if text.is_none() {
        report.push(ValidationError::required(field));
    }
    text
}

fn required_value<T>(report: &mut ValidationReport, value: Option<T>, field: &str) -> Option<T> {
    if value.is_none() {
        report.push(ValidationError::required(field));
    }
    value
}

fn bounded_amount(value: f64, field: &str, min: Money, max: Money) -> Result<Money, ValidationError> {
    let amount = Money::from_reais(value).ok_or_else(|| ValidationError::invalid_format(field))?;

    if min.is_positive() && !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    if amount < min || amount > max {
        return Err(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(amount)
}

fn discount(value: f64) -> Result<Money, ValidationError> {
    let field = "Valor do desconto";
    let amount = Money::from_reais(value).ok_or_else(|| ValidationError::invalid_format(field))?;
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(amount)
}

fn date_field(text: &str, field: &str) -> Result<NaiveDate, ValidationError> {
    parse_date(text).ok_or_else(|| ValidationError::InvalidDate {
        field: field.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request() -> RentalRequest {
        RentalRequest {
            cliente_id: Some("1".into()),
            produto_id: Some("9".into()),
            data_aluguel: Some("2024-01-01".into()),
            data_dev_prevista: Some("2024-01-08".into()),
            valor_aluguel: Some(100.0),
            valor_caucao: Some(200.0),
            valor_desconto: Some(10.0),
            periodo: Some(7),
            tipo_cobranca: Some("diaria".into()),
            forma_pagamento: Some("pix".into()),
            observacoes: None,
        }
    }

    fn rental(total_cents: i64, status: RentalStatus) -> Rental {
        Rental {
            id: "1".into(),
            cliente_id: "1".into(),
            produto_id: "9".into(),
            data_aluguel: date("2024-01-01"),
            data_dev_prevista: date("2024-01-08"),
            data_dev_efetiva: None,
            valor_aluguel: Money::from_cents(10_000),
            valor_caucao: Money::zero(),
            valor_desconto: Money::zero(),
            valor_total: Money::from_cents(total_cents),
            periodo: 7,
            tipo_cobranca: ChargeType::Diaria,
            forma_pagamento: PaymentMethod::Dinheiro,
            status,
            observacoes: None,
        }
    }

    #[test]
    fn test_valid_request_accepted() {
        let engine = RentalRuleEngine::default();
        assert!(engine.validate(Some(&request()), true).is_valid());

        let payload = engine.accept(Some(&request()), true).unwrap();
        assert_eq!(payload.valor_total, Money::from_cents(69_000));
        assert_eq!(payload.status, RentalStatus::Ativo);
        assert_eq!(payload.tipo_cobranca, ChargeType::Diaria);
        assert_eq!(payload.data_aluguel, date("2024-01-01"));
    }

    #[test]
    fn test_missing_request() {
        let report = RentalRuleEngine::default().validate(None, true);
        assert_eq!(report.errors(), &[ValidationError::required("Dados do aluguel")]);
    }

    #[test]
    fn test_return_date_must_follow_rental_date() {
        let mut req = request();
        req.data_aluguel = Some("2024-01-08".into());
        req.data_dev_prevista = Some("2024-01-01".into());
        let report = RentalRuleEngine::default().validate(Some(&req), true);
        assert_eq!(report.errors(), &[ValidationError::ReturnNotAfterRental]);

        // Same day is not "after".
        req.data_dev_prevista = Some("2024-01-08".into());
        let report = RentalRuleEngine::default().validate(Some(&req), true);
        assert_eq!(report.errors(), &[ValidationError::ReturnNotAfterRental]);

        // "10/01/2024" sorts before "2024-01-09" as text but is the later day.
        req.data_aluguel = Some("10/01/2024".into());
        req.data_dev_prevista = Some("2024-01-09".into());
        let report = RentalRuleEngine::default().validate(Some(&req), true);
        assert_eq!(report.errors(), &[ValidationError::ReturnNotAfterRental]);

        req.data_dev_prevista = Some("2024-01-11".into());
        assert!(RentalRuleEngine::default().validate(Some(&req), true).is_valid());
    }

    #[test]
    fn test_zero_rent_must_be_positive() {
        let mut req = request();
        req.valor_aluguel = Some(0.0);
        let report = RentalRuleEngine::default().validate(Some(&req), true);
        assert_eq!(
            report.errors(),
            &[ValidationError::MustBePositive {
                field: "Valor do aluguel".into()
            }]
        );
    }

    #[test]
    fn test_amount_ceilings() {
        let mut req = request();
        req.valor_aluguel = Some(10_000.0);
        req.valor_caucao = Some(-1.0);
        let messages = RentalRuleEngine::default().validate(Some(&req), true).messages();
        assert_eq!(
            messages,
            vec![
                "Valor do aluguel deve ser entre R$ 0,01 e R$ 9.999,99",
                "Valor da caução não pode ser negativo",
            ]
        );
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let mut req = request();
        req.valor_aluguel = Some(f64::INFINITY);
        let report = RentalRuleEngine::default().validate(Some(&req), true);
        assert_eq!(
            report.errors(),
            &[ValidationError::invalid_format("Valor do aluguel")]
        );
    }

    #[test]
    fn test_errors_accumulate_in_rule_order() {
        let req = RentalRequest {
            cliente_id: Some(" ".into()),
            periodo: Some(0),
            valor_aluguel: Some(50.0),
            valor_caucao: Some(0.0),
            tipo_cobranca: Some("anual".into()),
            forma_pagamento: Some("pix".into()),
            data_aluguel: Some("31/13/2024".into()),
            data_dev_prevista: Some("2024-02-01".into()),
            ..Default::default()
        };
        let report = RentalRuleEngine::default().validate(Some(&req), false);
        let errors = report.errors();

        assert_eq!(errors[0], ValidationError::required("Cliente"));
        assert_eq!(errors[1], ValidationError::required("Produto"));
        assert_eq!(
            errors[2],
            ValidationError::MustBePositive {
                field: "Período".into()
            }
        );
        assert!(matches!(errors[3], ValidationError::NotAllowed { .. }));
        assert_eq!(
            errors[4],
            ValidationError::InvalidDate {
                field: "Data do aluguel".into()
            }
        );
        assert_eq!(errors[5], ValidationError::ProductUnavailable);
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_unavailable_product() {
        let err = RentalRuleEngine::default()
            .accept(Some(&request()), false)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::Rejected {
                errors: vec![ValidationError::ProductUnavailable]
            }
        );
        assert_eq!(
            err.to_string(),
            "Aluguel inválido: Produto não está disponível para aluguel"
        );
    }

    #[test]
    fn test_compute_total() {
        let total = compute_total(Money::from_cents(10_000), 7, Money::from_cents(1_000));
        assert_eq!(total, Ok(Money::from_cents(69_000)));

        // Discount larger than the subtotal is kept negative.
        let total = compute_total(Money::from_cents(5_000), 1, Money::from_cents(8_000));
        assert_eq!(total, Ok(Money::from_cents(-3_000)));

        let overflow = ValidationError::Overflow {
            field: "Valor total".into(),
        };
        let total = compute_total(Money::from_cents(10_000), i64::MAX / 2, Money::zero());
        assert_eq!(total, Err(overflow.clone()));
        let total = compute_total(Money::from_cents(1), i64::MAX, Money::from_cents(-1));
        assert_eq!(total, Err(overflow));
    }

    #[test]
    fn test_huge_period_reported_not_panicking() {
        let mut req = request();
        req.periodo = Some(i64::MAX / 2);
        let engine = RentalRuleEngine::default();

        let report = engine.validate(Some(&req), true);
        assert_eq!(
            report.messages(),
            vec!["Valor total excede o limite suportado"]
        );

        // Availability is still checked first.
        let report = engine.validate(Some(&req), false);
        assert_eq!(
            report.errors(),
            &[
                ValidationError::ProductUnavailable,
                ValidationError::Overflow {
                    field: "Valor total".into()
                },
            ]
        );
        assert!(engine.accept(Some(&req), true).is_err());
    }

    #[test]
    fn test_negative_total_passes_validation() {
        let mut req = request();
        req.valor_desconto = Some(1_000.0);
        let payload = RentalRuleEngine::default().accept(Some(&req), true).unwrap();
        assert_eq!(payload.valor_total, Money::from_cents(-30_000));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-31"), Some(date("2024-01-31")));
        assert_eq!(parse_date("31/01/2024"), Some(date("2024-01-31")));
        assert_eq!(parse_date("2024-01-31T15:30:00.000Z"), Some(date("2024-01-31")));
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("amanhã"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_payload_wire_form() {
        let mut req = request();
        req.observacoes = Some("Retirada na loja".into());
        let payload = RentalRuleEngine::default().accept(Some(&req), true).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["valorTotal"], serde_json::json!(690.0));
        assert_eq!(json["dataDevPrevista"], "2024-01-08");
        assert_eq!(json["tipoCobranca"], "diaria");
        assert_eq!(json["formaPagamento"], "pix");
        assert_eq!(json["status"], "ATIVO");
        assert_eq!(json["observacoes"], "Retirada na loja");
    }

    #[test]
    fn test_late_fee() {
        let engine = RentalRuleEngine::default();
        let active = rental(69_000, RentalStatus::Ativo);

        // Due 01-08; one grace day.
        assert_eq!(engine.late_fee(&active, date("2024-01-08")), Money::zero());
        assert_eq!(engine.late_fee(&active, date("2024-01-09")), Money::zero());
        // Two overdue days, one charged: 2% of R$ 690,00.
        assert_eq!(engine.late_fee(&active, date("2024-01-10")), Money::from_cents(1_380));
        // Capped at R$ 1.000,00.
        assert_eq!(engine.late_fee(&active, date("2024-06-01")), Money::from_cents(100_000));

        let returned = rental(69_000, RentalStatus::Devolvido);
        assert_eq!(engine.late_fee(&returned, date("2024-02-01")), Money::zero());
    }

    #[test]
    fn test_late_fee_on_huge_total_hits_cap() {
        let engine = RentalRuleEngine::default();
        let active = rental(i64::MAX, RentalStatus::Ativo);
        assert_eq!(engine.late_fee(&active, date("2024-06-01")), Money::from_cents(100_000));

        let engine = RentalRuleEngine::new(RentalPolicy {
            late_fee_grace_days: i64::MIN,
            ..RentalPolicy::default()
        });
        let active = rental(69_000, RentalStatus::Ativo);
        assert_eq!(engine.late_fee(&active, date("2024-01-10")), Money::from_cents(100_000));
    }

    #[test]
    fn test_suggestions() {
        let engine = RentalRuleEngine::default();
        let preco = Money::from_cents(100_000); // R$ 1.000,00

        assert_eq!(engine.suggested_rent(preco), Money::from_cents(30_000));
        assert_eq!(engine.suggested_deposit(preco), Money::from_cents(100_000));

        let range = engine.deposit_advisory(Money::from_cents(30_000));
        assert_eq!(range.min, Money::from_cents(15_000));
        assert_eq!(range.max, Money::from_cents(60_000));
        assert!(range.contains(Money::from_cents(20_000)));

        // Floor of R$ 50,00 wins for small rents.
        let range = engine.deposit_advisory(Money::from_cents(2_000));
        assert_eq!(range.min, Money::from_cents(5_000));
        assert_eq!(range.max, Money::from_cents(5_000));

        let suggestions = engine.suggest(preco, ChargeType::Mensal);
        assert_eq!(suggestions.periodos, vec![1, 2, 3, 6]);
    }

    #[test]
    fn test_suggested_periods() {
        assert_eq!(suggested_periods(ChargeType::Diaria), &[1, 2, 3, 5, 7]);
        assert_eq!(suggested_periods(ChargeType::Semanal), &[1, 2, 3, 4]);
        assert_eq!(suggested_periods(ChargeType::Evento), &[1, 2, 3]);
    }

    #[test]
    fn test_policy_from_toml_like_values() {
        let policy: RentalPolicy =
            serde_json::from_str(r#"{"late_fee_bps": 300, "late_fee_cap": 500.0}"#).unwrap();
        assert_eq!(policy.late_fee_bps, 300);
        assert_eq!(policy.late_fee_cap, Money::from_cents(50_000));
        assert_eq!(policy.max_valor_aluguel, Money::from_cents(999_999));
    }
}

//! # Rental Commands
//!
//! Rental form rules, totals, the return/cancel transitions and the
//! overdue projection.
//!
//! ## Rental Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rental Form Workflow                              │
//! │                                                                         │
//! │  1. PICK PRODUCT                                                        │
//! │     suggestValues ──► valorAluguel, valorCaucao, periodos               │
//! │                                                                         │
//! │  2. FILL FORM (live)                                                    │
//! │     computeTotal ──► valorTotal shown under the amounts                 │
//! │     validateAluguel ──► { isValid, errors[] }                           │
//! │                                                                         │
//! │  3. SUBMIT                                                              │
//! │     prepareAluguel ──► RentalPayload (shell POSTs it to the backend)    │
//! │                                                                         │
//! │  4. LISTING                                                             │
//! │     aluguelStatus / lateFee ──► ATRASADO badge, multa                   │
//! │     devolverAluguel / cancelarAluguel ──► updated Rental (shell PUTs)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that take a date use the bridge's local date when it is
//! omitted.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use celidone_core::money::{serde_reais, Money};
use celidone_core::rental::{self, RentalPayload, Suggestions};
use celidone_core::validation::ValidationSummary;
use celidone_core::{ChargeType, Rental, RentalAction, RentalStatus, ValidationError};

use crate::error::ApiError;
use crate::protocol::{AluguelArg, DevolverArg, RentalArg, StatusArg, SuggestArg, TotalArg};
use crate::state::EngineState;

// =============================================================================
// Response DTOs
// =============================================================================

/// Total of a rental form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalDto {
    #[serde(with = "serde_reais")]
    pub valor_total: Money,
    /// `R$ 690,00`
    pub formatted: String,
}

/// How a rental reads on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub status: RentalStatus,
    pub label: &'static str,
    pub dias_atraso: i64,
    #[serde(with = "serde_reais")]
    pub multa: Money,
}

/// Late fee owed on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LateFeeDto {
    pub dias_atraso: i64,
    #[serde(with = "serde_reais")]
    pub multa: Money,
    pub formatted: String,
}

// =============================================================================
// Form Commands
// =============================================================================

/// Runs every rental rule and lists the failures.
pub fn validate_aluguel(state: &EngineState, arg: AluguelArg) -> ValidationSummary {
    let report = state
        .rentals
        .validate(arg.aluguel.as_ref(), arg.product_available());
    debug!(errors = report.errors().len(), "validate_aluguel command");
    report.summary()
}

/// Validates the form and builds the payload for the backend.
///
/// ## Errors
/// A rejection carries every failed rule in `errors`.
pub fn prepare_aluguel(state: &EngineState, arg: AluguelArg) -> Result<RentalPayload, ApiError> {
    debug!("prepare_aluguel command");
    let payload = state
        .rentals
        .accept(arg.aluguel.as_ref(), arg.product_available())?;

    info!(
        cliente_id = %payload.cliente_id,
        produto_id = %payload.produto_id,
        total = %payload.valor_total,
        "Rental accepted"
    );
    Ok(payload)
}

/// `valorAluguel × periodo − valorDesconto`; may be negative.
pub fn compute_total(arg: TotalArg) -> Result<TotalDto, ApiError> {
    debug!(periodo = arg.periodo, "compute_total command");
    let valor_aluguel = amount(arg.valor_aluguel, "Valor do aluguel")?;
    let desconto = amount(arg.valor_desconto.unwrap_or(0.0), "Valor do desconto")?;

    let valor_total = rental::compute_total(valor_aluguel, arg.periodo, desconto)?;
    Ok(TotalDto {
        valor_total,
        formatted: valor_total.to_string(),
    })
}

/// Pre-filled values once a product is picked.
pub fn suggest_values(state: &EngineState, arg: SuggestArg) -> Result<Suggestions, ApiError> {
    let tipo = arg.tipo_cobranca.unwrap_or(ChargeType::Diaria);
    debug!(%tipo, "suggest_values command");

    let preco = amount(arg.preco, "Preço")?;
    if preco.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "Preço".to_string(),
        }
        .into());
    }

    Ok(state.rentals.suggest(preco, tipo))
}

// =============================================================================
// Lifecycle Commands
// =============================================================================

/// Marks a rental as returned.
///
/// ## Errors
/// - `ILLEGAL_TRANSITION` for DEVOLVIDO/CANCELADO rentals
/// - `BUSINESS_LOGIC` when the return date precedes the rental date
pub fn devolver_aluguel(state: &EngineState, arg: DevolverArg) -> Result<Rental, ApiError> {
    let data_dev_efetiva = day_or_today(
        state,
        arg.data_dev_efetiva.as_deref(),
        "Data efetiva de devolução",
    )?;
    debug!(id = %arg.aluguel.id, %data_dev_efetiva, "devolver_aluguel command");

    let returned = arg.aluguel.apply(RentalAction::Return { data_dev_efetiva })?;
    info!(id = %returned.id, "Rental returned");
    Ok(returned)
}

/// Cancels a rental.
pub fn cancelar_aluguel(arg: RentalArg) -> Result<Rental, ApiError> {
    debug!(id = %arg.aluguel.id, "cancelar_aluguel command");

    let cancelled = arg.aluguel.apply(RentalAction::Cancel)?;
    info!(id = %cancelled.id, "Rental cancelled");
    Ok(cancelled)
}

/// Status as seen on `hoje`, with the overdue projection applied.
pub fn aluguel_status(state: &EngineState, arg: StatusArg) -> Result<StatusDto, ApiError> {
    let today = day_or_today(state, arg.hoje.as_deref(), "Data de referência")?;
    debug!(id = %arg.aluguel.id, %today, "aluguel_status command");

    let status = arg.aluguel.status_on(today);
    Ok(StatusDto {
        status,
        label: status.label(),
        dias_atraso: arg.aluguel.days_overdue(today),
        multa: state.rentals.late_fee(&arg.aluguel, today),
    })
}

/// Late fee owed on `hoje`.
pub fn late_fee(state: &EngineState, arg: StatusArg) -> Result<LateFeeDto, ApiError> {
    let today = day_or_today(state, arg.hoje.as_deref(), "Data de referência")?;
    debug!(id = %arg.aluguel.id, %today, "late_fee command");

    let multa = state.rentals.late_fee(&arg.aluguel, today);
    Ok(LateFeeDto {
        dias_atraso: arg.aluguel.days_overdue(today),
        multa,
        formatted: multa.to_string(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn amount(value: f64, field: &str) -> Result<Money, ValidationError> {
    Money::from_reais(value).ok_or_else(|| ValidationError::invalid_format(field))
}

fn day_or_today(state: &EngineState, text: Option<&str>, field: &str) -> Result<NaiveDate, ValidationError> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(state.today()),
        Some(text) => rental::parse_date(text).ok_or_else(|| ValidationError::InvalidDate {
            field: field.to_string(),
        }),
    }
}

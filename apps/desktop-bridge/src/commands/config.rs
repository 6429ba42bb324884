//! # Config Commands
//!
//! Commands for retrieving the bridge configuration.

use serde::Serialize;
use tracing::debug;

use celidone_core::money::serde_reais;
use celidone_core::Money;

use crate::state::EngineState;

/// Settings the renderer needs to mirror the engine's limits.
///
/// Amounts are reais numbers, rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub name_min_length: usize,
    pub name_max_length: usize,
    #[serde(with = "serde_reais")]
    pub max_valor_aluguel: Money,
    #[serde(with = "serde_reais")]
    pub max_valor_caucao: Money,
    pub late_fee_percent: f64,
    pub late_fee_grace_days: i64,
    #[serde(with = "serde_reais")]
    pub late_fee_cap: Money,
}

/// Gets the current configuration.
///
/// ## When Used
/// - Shell startup (form `maxlength`, amount limits)
/// - Listing screen (late fee hint)
pub fn get_config(state: &EngineState) -> ConfigDto {
    debug!("get_config command");
    let rules = state.validation.rules();
    let policy = state.rentals.policy();

    ConfigDto {
        name_min_length: rules.name_min_len,
        name_max_length: rules.name_max_len,
        max_valor_aluguel: policy.max_valor_aluguel,
        max_valor_caucao: policy.max_valor_caucao,
        late_fee_percent: f64::from(policy.late_fee_bps) / 100.0,
        late_fee_grace_days: policy.late_fee_grace_days,
        late_fee_cap: policy.late_fee_cap,
    }
}

//! # Rental Lifecycle
//!
//! Status transitions of a rental and the overdue projection.
//!
//! ## State Machine
//! ```text
//!                      ┌───────────── return ─────────────► DEVOLVIDO ■
//!                      │
//!  (created) ──► ATIVO ┼───────────── cancel ─────────────► CANCELADO ■
//!                  │   │
//!     today > dataDevPrevista (read-time projection only)
//!                  ▼   │
//!              ATRASADO ┴─ return / cancel as from ATIVO
//!
//!  ■ terminal: every further action fails with TerminalState
//! ```
//!
//! Transitions never touch the rental dates; a return only records
//! `dataDevEfetiva`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Rental, RentalStatus};

// =============================================================================
// Actions
// =============================================================================

/// What the user asked to do with a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RentalActionKind {
    #[serde(rename = "devolver")]
    Return,
    #[serde(rename = "cancelar")]
    Cancel,
}

impl fmt::Display for RentalActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalActionKind::Return => write!(f, "devolver"),
            RentalActionKind::Cancel => write!(f, "cancelar"),
        }
    }
}

/// An action with the data it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalAction {
    /// Costume came back on `data_dev_efetiva`.
    Return { data_dev_efetiva: NaiveDate },
    Cancel,
}

impl RentalAction {
    pub fn kind(&self) -> RentalActionKind {
        match self {
            RentalAction::Return { .. } => RentalActionKind::Return,
            RentalAction::Cancel => RentalActionKind::Cancel,
        }
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// Next status after `action`, or `TerminalState` from DEVOLVIDO/CANCELADO.
///
/// ## Example
/// ```rust
/// use celidone_core::lifecycle::{transition, RentalActionKind};
/// use celidone_core::types::RentalStatus;
///
/// assert_eq!(
///     transition(RentalStatus::Ativo, RentalActionKind::Cancel).unwrap(),
///     RentalStatus::Cancelado
/// );
/// assert!(transition(RentalStatus::Cancelado, RentalActionKind::Return).is_err());
/// ```
pub fn transition(status: RentalStatus, action: RentalActionKind) -> CoreResult<RentalStatus> {
    if status.is_terminal() {
        return Err(CoreError::TerminalState { status, action });
    }

    Ok(match action {
        RentalActionKind::Return => RentalStatus::Devolvido,
        RentalActionKind::Cancel => RentalStatus::Cancelado,
    })
}

impl Rental {
    /// Status as seen on `today`: an ATIVO rental past its expected return
    /// date reads as ATRASADO.
    pub fn status_on(&self, today: NaiveDate) -> RentalStatus {
        match self.status {
            RentalStatus::Ativo if today > self.data_dev_prevista => RentalStatus::Atrasado,
            status => status,
        }
    }

    /// Whole days past the expected return date, 0 unless overdue on `today`.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.status_on(today) {
            RentalStatus::Atrasado => (today - self.data_dev_prevista).num_days().max(0),
            _ => 0,
        }
    }

    /// Returns the rental after `action`; `self` is left untouched.
    ///
    /// A return dated before `data_aluguel` is rejected.
    pub fn apply(&self, action: RentalAction) -> CoreResult<Rental> {
        let status = transition(self.status, action.kind())?;
        let mut next = self.clone();
        next.status = status;

        if let RentalAction::Return { data_dev_efetiva } = action {
            if data_dev_efetiva < self.data_aluguel {
                return Err(ValidationError::ReturnedBeforeRental.into());
            }
            next.data_dev_efetiva = Some(data_dev_efetiva);
        }

        Ok(next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{ChargeType, PaymentMethod};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rental(status: RentalStatus) -> Rental {
        Rental {
            id: "42".into(),
            cliente_id: "1".into(),
            produto_id: "9".into(),
            data_aluguel: date("2024-01-01"),
            data_dev_prevista: date("2024-01-08"),
            data_dev_efetiva: None,
            valor_aluguel: Money::from_cents(10_000),
            valor_caucao: Money::from_cents(20_000),
            valor_desconto: Money::from_cents(1_000),
            valor_total: Money::from_cents(69_000),
            periodo: 7,
            tipo_cobranca: ChargeType::Diaria,
            forma_pagamento: PaymentMethod::Pix,
            status,
            observacoes: None,
        }
    }

    #[test]
    fn test_transition_table() {
        use RentalActionKind::*;
        use RentalStatus::*;

        assert_eq!(transition(Ativo, Return).unwrap(), Devolvido);
        assert_eq!(transition(Ativo, Cancel).unwrap(), Cancelado);
        assert_eq!(transition(Atrasado, Return).unwrap(), Devolvido);
        assert_eq!(transition(Atrasado, Cancel).unwrap(), Cancelado);

        for status in [Devolvido, Cancelado] {
            for action in [Return, Cancel] {
                assert_eq!(
                    transition(status, action),
                    Err(CoreError::TerminalState { status, action })
                );
            }
        }
    }

    #[test]
    fn test_cancel_keeps_dates() {
        let original = rental(RentalStatus::Ativo);
        let cancelled = original.apply(RentalAction::Cancel).unwrap();

        assert_eq!(cancelled.status, RentalStatus::Cancelado);
        assert_eq!(cancelled.data_aluguel, original.data_aluguel);
        assert_eq!(cancelled.data_dev_prevista, original.data_dev_prevista);
        assert_eq!(cancelled.data_dev_efetiva, None);
        assert_eq!(original.status, RentalStatus::Ativo);
    }

    #[test]
    fn test_return_records_date() {
        let returned = rental(RentalStatus::Ativo)
            .apply(RentalAction::Return {
                data_dev_efetiva: date("2024-01-10"),
            })
            .unwrap();
        assert_eq!(returned.status, RentalStatus::Devolvido);
        assert_eq!(returned.data_dev_efetiva, Some(date("2024-01-10")));
    }

    #[test]
    fn test_return_before_rental_date_rejected() {
        let err = rental(RentalStatus::Ativo)
            .apply(RentalAction::Return {
                data_dev_efetiva: date("2023-12-31"),
            })
            .unwrap_err();
        assert_eq!(err, CoreError::Validation(ValidationError::ReturnedBeforeRental));

        // Same day as the rental is fine.
        assert!(rental(RentalStatus::Ativo)
            .apply(RentalAction::Return {
                data_dev_efetiva: date("2024-01-01"),
            })
            .is_ok());
    }

    #[test]
    fn test_terminal_rental_rejects_actions() {
        let cancelled = rental(RentalStatus::Cancelado);
        let err = cancelled
            .apply(RentalAction::Return {
                data_dev_efetiva: date("2024-01-05"),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::TerminalState { .. }));
    }

    #[test]
    fn test_overdue_projection() {
        let active = rental(RentalStatus::Ativo);
        assert_eq!(active.status_on(date("2024-01-08")), RentalStatus::Ativo);
        assert_eq!(active.status_on(date("2024-01-09")), RentalStatus::Atrasado);
        assert_eq!(active.days_overdue(date("2024-01-08")), 0);
        assert_eq!(active.days_overdue(date("2024-01-11")), 3);

        let returned = rental(RentalStatus::Devolvido);
        assert_eq!(returned.status_on(date("2024-02-01")), RentalStatus::Devolvido);
        assert_eq!(returned.days_overdue(date("2024-02-01")), 0);
    }

    #[test]
    fn test_action_kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&RentalActionKind::Return).unwrap(),
            "\"devolver\""
        );
        assert_eq!(RentalActionKind::Cancel.to_string(), "cancelar");
    }
}

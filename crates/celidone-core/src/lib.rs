//! # celidone-core: Rental Engine for Celidone
//!
//! Domain validation and rental-lifecycle rules of the Celidone costume
//! rental shop, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Celidone Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Electron shell (renderer + main)                │   │
//! │  │   Cliente form ──► Produto form ──► Aluguel form ──► Listagem   │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │ JSON lines over stdio            │ REST              │
//! │  ┌──────────────▼──────────────────┐   ┌───────────▼───────────────┐   │
//! │  │    desktop-bridge (commands)    │   │     Backend service       │   │
//! │  │  validateCpf, prepareAluguel…   │   │  customers, products,     │   │
//! │  └──────────────┬──────────────────┘   │  rentals (persistence)    │   │
//! │                 │                      └───────────────────────────┘   │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │               ★ celidone-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │  │ document │ │validation│ │   mask   │ │ money  │ │ rental  │  │   │
//! │  │  │ CPF/CNPJ │ │ fields,  │ │ apply /  │ │ Money, │ │ rules,  │  │   │
//! │  │  │ mod 11   │ │ reports  │ │ remove   │ │ BRL    │ │lifecycle│  │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`] - CPF/CNPJ check digits, `Cpf`, `Cnpj`, `DocumentNumber`
//! - [`validation`] - Email, CEP, name, phone; customer and product forms
//! - [`mask`] - Positional input masks and mask detection
//! - [`money`] - Integer-centavo `Money` and pt-BR currency text
//! - [`rental`] - Rental rule engine, totals, policy calculations
//! - [`lifecycle`] - Status transitions and the overdue projection
//! - [`types`] - Closed sets, form payloads, the `Rental` entity
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; "today" is a parameter
//! 2. **No I/O**: no files, network, clock or logging here
//! 3. **Integer Money**: amounts are centavos (i64); floats only at the edges
//! 4. **Explicit Errors**: every failure is a typed `ValidationError` or
//!    `CoreError`, never a panic on user input
//!
//! ## Example Usage
//!
//! ```rust
//! use celidone_core::rental::RentalRuleEngine;
//! use celidone_core::types::RentalRequest;
//!
//! let request = RentalRequest {
//!     cliente_id: Some("1".into()),
//!     produto_id: Some("9".into()),
//!     data_aluguel: Some("2024-01-01".into()),
//!     data_dev_prevista: Some("2024-01-08".into()),
//!     valor_aluguel: Some(100.0),
//!     valor_caucao: Some(200.0),
//!     valor_desconto: Some(10.0),
//!     periodo: Some(7),
//!     tipo_cobranca: Some("diaria".into()),
//!     forma_pagamento: Some("pix".into()),
//!     observacoes: None,
//! };
//!
//! let payload = RentalRuleEngine::default().accept(Some(&request), true).unwrap();
//! assert_eq!(payload.valor_total.to_string(), "R$ 690,00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod lifecycle;
pub mod mask;
pub mod money;
pub mod rental;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use celidone_core::Money` instead of
// `use celidone_core::money::Money`

pub use document::{Cnpj, Cpf, DocumentKind, DocumentNumber};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use lifecycle::{RentalAction, RentalActionKind};
pub use money::Money;
pub use rental::{RentalPayload, RentalPolicy, RentalRuleEngine};
pub use types::*;
pub use validation::{ValidationReport, ValidationRules, ValidationService};

//! # Bridge Commands
//!
//! All commands exposed to the Electron shell.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! ├── cliente.rs  ◄─── CPF/CNPJ, CEP, email, name, phone, customer form
//! ├── produto.rs  ◄─── Product form
//! ├── format.rs   ◄─── Masks and BRL currency text
//! ├── aluguel.rs  ◄─── Rental rules, totals, return/cancel, late fee
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bridge Command Flow                                  │
//! │                                                                         │
//! │  Electron main process                                                  │
//! │  ─────────────────────                                                  │
//! │  bridge.stdin.write(JSON.stringify({                                    │
//! │    id: '42', command: 'computeTotal',                                   │
//! │    payload: { valorAluguel: 100, periodo: 7, valorDesconto: 10 }        │
//! │  }) + '\n');                                                            │
//! │         │                                                               │
//! │         │ (JSON line over stdin)                                        │
//! │         ▼                                                               │
//! │  Rust bridge                                                            │
//! │  ───────────                                                            │
//! │  Envelope ──► Command::ComputeTotal(TotalArg)                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  aluguel::compute_total(arg) -> Result<TotalDto, ApiError>              │
//! │         │                                                               │
//! │         │ (JSON line over stdout)                                       │
//! │         ▼                                                               │
//! │  {"id":"42","ok":true,"data":{"valorTotal":690.0,...}}                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod aluguel;
pub mod cliente;
pub mod config;
pub mod format;
pub mod produto;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::protocol::Command;
use crate::state::EngineState;

/// Runs one command against the shared state.
pub fn dispatch(state: &EngineState, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::ValidateCpf(arg) => reply(cliente::validate_cpf(arg)),
        Command::ValidateCnpj(arg) => reply(cliente::validate_cnpj(arg)),
        Command::ValidateDocument(arg) => reply(cliente::validate_document(arg)),
        Command::ValidateCep(arg) => reply(cliente::validate_cep(arg)),
        Command::ValidateEmail(arg) => reply(cliente::validate_email(arg)),
        Command::ValidateName(arg) => reply(cliente::validate_name(state, arg)),
        Command::ValidatePhone(arg) => reply(cliente::validate_phone(arg)),
        Command::ValidateCliente(draft) => reply(cliente::validate_cliente(state, draft)),

        Command::ValidateProduto(draft) => reply(produto::validate_produto(state, draft)),

        Command::ApplyMask(arg) => reply(format::apply_mask(arg)),
        Command::RemoveMask(arg) => reply(format::remove_mask(arg)),
        Command::DetectMaskType(arg) => reply(format::detect_mask_type(arg)),
        Command::AutoMask(arg) => reply(format::auto_mask(arg)),
        Command::FormatCurrency(arg) => reply(format::format_currency(arg)),
        Command::ParseCurrency(arg) => reply(format::parse_currency(arg)),
        Command::MaskCurrencyInput(arg) => reply(format::mask_currency_input(arg)),

        Command::ValidateAluguel(arg) => reply(aluguel::validate_aluguel(state, arg)),
        Command::PrepareAluguel(arg) => reply(aluguel::prepare_aluguel(state, arg)?),
        Command::ComputeTotal(arg) => reply(aluguel::compute_total(arg)?),
        Command::DevolverAluguel(arg) => reply(aluguel::devolver_aluguel(state, arg)?),
        Command::CancelarAluguel(arg) => reply(aluguel::cancelar_aluguel(arg)?),
        Command::AluguelStatus(arg) => reply(aluguel::aluguel_status(state, arg)?),
        Command::LateFee(arg) => reply(aluguel::late_fee(state, arg)?),
        Command::SuggestValues(arg) => reply(aluguel::suggest_values(state, arg)?),

        Command::GetConfig => reply(config::get_config(state)),
    }
}

fn reply<T: Serialize>(data: T) -> Result<Value, ApiError> {
    serde_json::to_value(data)
        .map_err(|e| ApiError::internal(format!("Falha ao serializar resposta: {}", e)))
}

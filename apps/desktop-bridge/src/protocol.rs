//! # Wire Protocol
//!
//! One JSON object per line in each direction.
//!
//! ```text
//! stdin  ──► {"id":"7","command":"validateCpf","payload":{"value":"111.444.777-35"}}
//! stdout ◄── {"id":"7","ok":true,"data":{"isValid":true,"kind":"CPF",...}}
//!
//! stdin  ──► {"command":"nope"}
//! stdout ◄── {"id":"<uuid v4>","ok":false,"error":{"code":"BAD_REQUEST",...}}
//! ```
//!
//! Requests are parsed in two steps: the envelope first, so the `id` can be
//! echoed even when the payload does not fit the command, then the command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use celidone_core::validation::PhoneKind;
use celidone_core::{
    ChargeType, ClienteDraft, PersonType, ProductStatus, ProdutoDraft, Rental, RentalRequest,
};

use crate::error::ApiError;

// =============================================================================
// Envelope
// =============================================================================

/// A request line before its command is interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Correlation id, echoed back as given (string or number).
    #[serde(default)]
    pub id: Option<Value>,
    pub command: String,
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    /// The request id, or a fresh UUID v4 when the caller left it out.
    pub fn id_or_generate(&self) -> Value {
        match &self.id {
            Some(id) if !id.is_null() => id.clone(),
            _ => Value::String(uuid::Uuid::new_v4().to_string()),
        }
    }

    /// Interprets the payload for the named command.
    pub fn command(&self) -> Result<Command, ApiError> {
        let tagged = serde_json::json!({
            "command": self.command,
            "payload": self.payload,
        });
        serde_json::from_value(tagged).map_err(|e| {
            ApiError::bad_request(format!(
                "Requisição inválida para '{}': {}",
                self.command, e
            ))
        })
    }
}

/// A response line.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(id: Value, data: Value) -> Self {
        Response {
            id,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(id: Value, error: ApiError) -> Self {
        Response {
            id,
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Every command the bridge answers, with its payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "camelCase")]
pub enum Command {
    // Customer fields
    ValidateCpf(TextArg),
    ValidateCnpj(TextArg),
    ValidateDocument(DocumentArg),
    ValidateCep(TextArg),
    ValidateEmail(TextArg),
    ValidateName(TextArg),
    ValidatePhone(PhoneArg),
    ValidateCliente(Option<ClienteDraft>),

    // Product form
    ValidateProduto(Option<ProdutoDraft>),

    // Masks and currency
    ApplyMask(MaskArg),
    RemoveMask(TextArg),
    DetectMaskType(TextArg),
    AutoMask(TextArg),
    FormatCurrency(AmountArg),
    ParseCurrency(TextArg),
    MaskCurrencyInput(TextArg),

    // Rentals
    ValidateAluguel(AluguelArg),
    PrepareAluguel(AluguelArg),
    ComputeTotal(TotalArg),
    DevolverAluguel(DevolverArg),
    CancelarAluguel(RentalArg),
    AluguelStatus(StatusArg),
    LateFee(StatusArg),
    SuggestValues(SuggestArg),

    // Configuration
    GetConfig,
}

/// `{"value": "..."}`; a missing value reads as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextArg {
    pub value: String,
}

/// CPF or CNPJ; the kind is guessed from the digit count when
/// `tipoPessoa` is absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentArg {
    pub value: String,
    pub tipo_pessoa: Option<PersonType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhoneArg {
    pub value: String,
    pub tipo: PhoneKind,
}

/// `mask` is a template such as `(##) #####-####`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MaskArg {
    pub value: String,
    pub mask: String,
}

/// A reais amount; `null` formats as zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AmountArg {
    pub value: Option<f64>,
}

/// A rental form plus what the shell knows about the chosen product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AluguelArg {
    pub aluguel: Option<RentalRequest>,
    pub produto_disponivel: Option<bool>,
    pub produto_status: Option<ProductStatus>,
}

impl AluguelArg {
    /// Explicit flag first, then the product status; unknown means
    /// unavailable.
    pub fn product_available(&self) -> bool {
        self.produto_disponivel
            .or_else(|| self.produto_status.map(|s| s.is_available()))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalArg {
    pub valor_aluguel: f64,
    pub periodo: i64,
    #[serde(default)]
    pub valor_desconto: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RentalArg {
    pub aluguel: Rental,
}

/// Return a rental; the date defaults to today.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevolverArg {
    pub aluguel: Rental,
    #[serde(default)]
    pub data_dev_efetiva: Option<String>,
}

/// A rental and the day to evaluate it on (defaults to today).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusArg {
    pub aluguel: Rental,
    #[serde(default)]
    pub hoje: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestArg {
    pub preco: f64,
    /// Defaults to `diaria`.
    #[serde(default)]
    pub tipo_cobranca: Option<ChargeType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn envelope(line: &str) -> Envelope {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_parses_text_command() {
        let env = envelope(r#"{"id":"1","command":"validateCpf","payload":{"value":"11144477735"}}"#);
        match env.command().unwrap() {
            Command::ValidateCpf(arg) => assert_eq!(arg.value, "11144477735"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unit_command_without_payload() {
        let env = envelope(r#"{"id":2,"command":"getConfig"}"#);
        assert!(matches!(env.command().unwrap(), Command::GetConfig));
        assert_eq!(env.id_or_generate(), json!(2));
    }

    #[test]
    fn test_missing_id_is_generated() {
        let env = envelope(r#"{"command":"getConfig"}"#);
        let id = env.id_or_generate();
        let text = id.as_str().unwrap();
        assert!(uuid::Uuid::parse_str(text).is_ok());
    }

    #[test]
    fn test_unknown_command_is_bad_request() {
        let err = envelope(r#"{"id":"3","command":"launchRocket"}"#)
            .command()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert!(err.message.contains("launchRocket"));
    }

    #[test]
    fn test_wrong_payload_shape_is_bad_request() {
        let err = envelope(r#"{"command":"computeTotal","payload":{"valorAluguel":"cem"}}"#)
            .command()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_null_form_is_accepted() {
        let env = envelope(r#"{"command":"validateCliente","payload":null}"#);
        assert!(matches!(env.command().unwrap(), Command::ValidateCliente(None)));
    }

    #[test]
    fn test_product_availability() {
        let arg = AluguelArg {
            produto_status: Some(ProductStatus::Disponivel),
            ..Default::default()
        };
        assert!(arg.product_available());

        let arg = AluguelArg {
            produto_disponivel: Some(false),
            produto_status: Some(ProductStatus::Disponivel),
            ..Default::default()
        };
        assert!(!arg.product_available());

        assert!(!AluguelArg::default().product_available());
    }

    #[test]
    fn test_response_shape() {
        let ok = serde_json::to_value(Response::success(json!("a"), json!(1))).unwrap();
        assert_eq!(ok, json!({"id": "a", "ok": true, "data": 1}));

        let err = serde_json::to_value(Response::failure(
            json!("b"),
            ApiError::bad_request("x"),
        ))
        .unwrap();
        assert_eq!(
            err,
            json!({"id": "b", "ok": false, "error": {"code": "BAD_REQUEST", "message": "x"}})
        );
    }
}

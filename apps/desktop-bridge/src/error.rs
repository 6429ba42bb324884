//! # API Error Type
//!
//! Unified error type for bridge commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Bridge                             │
//! │                                                                         │
//! │  Electron shell              Rust bridge                                │
//! │  ──────────────              ───────────                                │
//! │                                                                         │
//! │  {"command":"prepareAluguel", ...}                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad JSON? ─── serde_json::Error ──────────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule failed? ─── CoreError::Rejected ─────────► ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄── {"id":"…","ok":false,"error":{"code":"VALIDATION_ERROR",          │
//! │        "message":"Aluguel inválido: …","errors":["…"]}}                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use celidone_core::{CoreError, ErrorKind, ValidationError};

/// API error returned from bridge commands.
///
/// ## Serialization
/// This is what the shell receives when a command fails:
/// ```json
/// {
///   "code": "ILLEGAL_TRANSITION",
///   "message": "Aluguel CANCELADO está em estado terminal: não é possível devolver"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// One message per failed rule, for rejected requests
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Error codes for API responses.
///
/// ## Usage in the Shell
/// ```typescript
/// const res = await bridge.send('devolverAluguel', { aluguel });
/// if (!res.ok) {
///   switch (res.error.code) {
///     case 'VALIDATION_ERROR':
///       showFieldErrors(res.error.errors);
///       break;
///     case 'ILLEGAL_TRANSITION':
///       notify(res.error.message);
///       break;
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or malformed field
    ValidationError,

    /// Amount, date or availability rule
    BusinessLogic,

    /// Action on a rental in a terminal state
    IllegalTransition,

    /// Unparseable line, unknown command or wrong payload shape
    BadRequest,

    /// Bridge failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Required | ErrorKind::Malformed | ErrorKind::Checksum => {
                ErrorCode::ValidationError
            }
            ErrorKind::BusinessRule => ErrorCode::BusinessLogic,
            ErrorKind::IllegalTransition => ErrorCode::IllegalTransition,
        }
    }
}

/// Converts field errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(err.kind().into(), err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = err.kind().into();
        let message = err.to_string();
        match err {
            CoreError::Rejected { errors } => ApiError {
                code,
                message,
                errors: errors.iter().map(ToString::to_string).collect(),
            },
            CoreError::TerminalState { .. } | CoreError::Validation(_) => {
                ApiError::new(code, message)
            }
        }
    }
}

/// Payloads that do not match the command's shape.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Requisição inválida: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

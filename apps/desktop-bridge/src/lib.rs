//! # Celidone Bridge Library
//!
//! Host process for the rental engine. The Electron main process spawns the
//! `celidone-bridge` binary and talks to it over stdio.
//!
//! ## Module Organization
//! ```text
//! celidone_bridge_lib/
//! ├── lib.rs          ◄─── You are here (startup & serve loop)
//! ├── protocol.rs     ◄─── Request envelope, commands, response
//! ├── state/
//! │   ├── mod.rs      ◄─── EngineState (services built once)
//! │   └── config.rs   ◄─── BridgeConfig (file + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch
//! │   ├── cliente.rs  ◄─── Customer field/form checks
//! │   ├── produto.rs  ◄─── Product form check
//! │   ├── format.rs   ◄─── Masks and currency text
//! │   ├── aluguel.rs  ◄─── Rental rules and lifecycle
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Electron main ──stdin──►  celidone-bridge  ──stdout──► Electron main  │
//! │                                    │                                    │
//! │                                    └──stderr──► logs (tracing)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Stdout carries nothing but response lines.

pub mod commands;
pub mod error;
pub mod protocol;
pub mod state;

use std::time::Instant;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use protocol::{Envelope, Response};
use state::{BridgeConfig, EngineState};

/// Runs the bridge until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Bridge Startup                                    │
/// │                                                                         │
/// │  1. Read Configuration ───────────────────────────────────────────────► │
/// │     • CELIDONE_CONFIG, else <config dir>/celidone.toml                  │
/// │     • CELIDONE_* environment overrides                                  │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else [logging] filter, else info,celidone=debug         │
/// │     • Written to stderr                                                 │
/// │                                                                         │
/// │  3. Build EngineState ────────────────────────────────────────────────► │
/// │     • ValidationService from [validation]                               │
/// │     • RentalRuleEngine from [rental]                                    │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One response line per request line, in order                      │
/// │     • Returns when stdin reaches EOF                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> std::io::Result<()> {
    let loaded = BridgeConfig::load(BridgeConfig::path_from_env());
    let filter = match &loaded {
        Ok(loaded) => loaded.config.logging.filter.clone(),
        Err(_) => state::DEFAULT_LOG_FILTER.to_string(),
    };
    init_tracing(&filter);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Celidone bridge"
    );
    let config = BridgeConfig::or_default(loaded);

    let state = EngineState::new(config);
    serve(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=celidone=trace` - Show trace for celidone crates only
/// - Default: `filter` (from config)
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Answers every request line from `reader` on `writer`, in order.
///
/// Blank lines are skipped. Malformed lines get an error response; the
/// loop only stops at end of input or on an I/O failure.
pub async fn serve<R, W>(state: &EngineState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line);
        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');

        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Answers one request line.
pub fn handle_line(state: &EngineState, line: &str) -> Response {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Unparseable request line");
            return Response::failure(Value::Null, ApiError::from(e));
        }
    };

    let id = envelope.id_or_generate();
    let span = info_span!("request", %id, command = %envelope.command);
    let _guard = span.enter();
    let started = Instant::now();

    match envelope
        .command()
        .and_then(|command| commands::dispatch(state, command))
    {
        Ok(data) => {
            debug!(elapsed_us = started.elapsed().as_micros() as u64, "Command succeeded");
            Response::success(id, data)
        }
        Err(error) => {
            info!(code = ?error.code, message = %error.message, "Command failed");
            Response::failure(id, error)
        }
    }
}

//! # Celidone Bridge Entry Point
//!
//! Spawned by the Electron main process; speaks JSON lines over stdio.
//!
//! ## Process Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Celidone Desktop                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Electron                                    │  │
//! │  │  ┌────────────────────────────────────────────────────────────┐  │  │
//! │  │  │                    Renderer                                │  │  │
//! │  │  │  • Cliente form         • Produto form                     │  │  │
//! │  │  │  • Aluguel form         • Listagem de aluguéis             │  │  │
//! │  │  └────────────────────────────────────────────────────────────┘  │  │
//! │  │                              │ ipcRenderer.invoke                │  │
//! │  │                              ▼                                   │  │
//! │  │                     Main process (child_process.spawn)           │  │
//! │  └──────────────────────────────┼───────────────────────────────────┘  │
//! │                                 ▼ stdin / stdout                        │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    celidone-bridge (this binary)                 │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Starts the runtime                                │  │
//! │  │  lib.rs ─────► Config, logging, serve loop                       │  │
//! │  │  commands/ ──► validateCpf, prepareAluguel, lateFee, ...         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // The actual setup is in lib.rs for better testability
    celidone_bridge_lib::run().await
}

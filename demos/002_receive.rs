//! Envelope reception through a listener.
//!
//! Demonstrates:
//! - Installing a TransportListener at construction
//! - Observing inbound envelopes in arrival order
//! - Raw frame tracing with LogTrace (visible with --debug)
//!
//! Usage:
//!   cargo run --example 002_receive -- ws://127.0.0.1:8080
//!   cargo run --example 002_receive -- ws://127.0.0.1:8080 --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use lime_ws::{Envelope, Error, LogTrace, Result, TransportListener, WebSocketTransport};

// ============================================================================
// Listener
// ============================================================================

/// Listener printing every notification to stdout.
struct Printer;

impl TransportListener for Printer {
    fn on_open(&self) {
        println!("    [event] open");
    }

    fn on_close(&self) {
        println!("    [event] close");
    }

    fn on_error(&self, error: &Error) {
        println!("    [event] error: {error}");
    }

    fn on_envelope(&self, envelope: Envelope) {
        println!("    [event] envelope: {}", envelope.as_value());
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== 002: Receive ===\n");

    // ========================================================================
    // Open
    // ========================================================================

    println!("[1] Opening {}...", args.target);

    let transport = WebSocketTransport::builder()
        .listener(Printer)
        .trace(LogTrace)
        .build();
    transport.open(&args.target).await?;

    println!("    ✓ Open\n");

    // ========================================================================
    // Receive
    // ========================================================================

    println!("[2] Waiting for envelopes (Ctrl+C to exit)...");

    tokio::signal::ctrl_c().await.ok();

    // ========================================================================
    // Close
    // ========================================================================

    if transport.state().is_open() {
        println!("\n[3] Closing...");
        transport.close().await?;
        println!("    ✓ Closed");
    }

    Ok(())
}

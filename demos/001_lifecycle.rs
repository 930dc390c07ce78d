//! Basic connection lifecycle.
//!
//! Demonstrates:
//! - Opening a connection with the lime subprotocol
//! - Sending an envelope
//! - Closing the connection
//!
//! Usage:
//!   cargo run --example 001_lifecycle -- ws://127.0.0.1:8080
//!   cargo run --example 001_lifecycle -- wss://host.example/messaging --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use lime_ws::{Envelope, Result, WebSocketTransport};
use serde_json::json;

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
    println!("=== 001: Lifecycle ===\n");

    // ========================================================================
    // Open
    // ========================================================================

    println!("[1] Opening {}...", args.target);

    let transport = WebSocketTransport::new();
    transport.open(&args.target).await?;

    println!("    ✓ Open (encryption: {})\n", transport.encryption());

    // ========================================================================
    // Send
    // ========================================================================

    println!("[2] Sending presence envelope...");

    transport.send(&Envelope::new(json!({
        "id": "1",
        "method": "set",
        "uri": "/presence",
        "type": "application/vnd.lime.presence+json",
        "resource": { "status": "available" },
    })))?;

    println!("    ✓ Sent\n");

    // ========================================================================
    // Close
    // ========================================================================

    println!("[3] Closing...");

    transport.close().await?;

    println!("    ✓ Closed (state: {})", transport.state());

    Ok(())
}

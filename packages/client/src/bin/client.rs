//! Torikae CLI chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin torikae-client -- --user-id 10 --peer-id 11
//! ```

use clap::Parser;

use torikae_client::{ClientConfig, run_client};
use torikae_shared::logger::setup_logger;

/// Command line arguments for the chat client
#[derive(Debug, Parser)]
#[command(name = "torikae-client", about = "Torikae CLI chat client")]
struct Args {
    /// Relay server WebSocket URL
    #[arg(long, default_value = "ws://127.0.0.1:9100/ws")]
    url: String,

    /// User id to identify as
    #[arg(long)]
    user_id: i64,

    /// Peer user id chat lines are sent to
    #[arg(long)]
    peer_id: i64,

    /// Exchange id to bind outgoing messages to
    #[arg(long)]
    exchange_id: Option<i64>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ClientConfig {
        url: args.url,
        user_id: args.user_id,
        peer_id: args.peer_id,
        exchange_id: args.exchange_id,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

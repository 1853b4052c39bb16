//! Torikae exchange-messaging relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin torikae-server -- --port 9100
//! ```

use clap::Parser;

use torikae_server::ServerConfig;
use torikae_shared::logger::setup_logger;

/// Command line arguments for the relay server
#[derive(Debug, Parser)]
#[command(name = "torikae-server", about = "Torikae exchange-messaging relay server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 9100)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    // Run the server
    if let Err(e) = torikae_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! Domino match relay.
//!
//! Pairs connecting clients two at a time and forwards every text or binary
//! frame from one seat to the other, unmodified.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin domino-server
//! cargo run --bin domino-server -- --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use domino_server::ui::Server;
use domino_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "domino-server")]
#[command(about = "WebSocket relay that pairs domino players and forwards their moves", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // In-memory lobby, WebSocket registry and the use cases on top of them
    let server = Server::in_memory();
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

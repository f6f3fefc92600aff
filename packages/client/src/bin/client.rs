//! Automatic domino client.
//!
//! Connects to the match relay, waits to be paired and plays one match with
//! the automatic player. With `--local`, plays both seats in-process over the
//! same-device transport instead.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin domino-client
//! cargo run --bin domino-client -- -u ws://127.0.0.1:9000/ws
//! cargo run --bin domino-client -- --local
//! ```

use clap::Parser;

use domino_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "domino-client")]
#[command(about = "Automatic domino player for the match relay", long_about = None)]
struct Args {
    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Play both seats on this device without a relay
    #[arg(long)]
    local: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let result = if args.local {
        domino_client::run_local().await
    } else {
        domino_client::run_client(args.url).await
    };

    if let Err(e) = result {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

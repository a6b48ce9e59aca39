//! Broadcast WebSocket chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-server -- --port 8080
//! ```

use clap::Parser;
use tsudoi_server::ServerArgs;
use tsudoi_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = tsudoi_server::run(&args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

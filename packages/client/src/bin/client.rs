//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-client -- --url ws://localhost:8080/ws
//! ```

use clap::Parser;
use tsudoi_client::ClientArgs;
use tsudoi_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let result = match args.into_config() {
        Ok(config) => tsudoi_client::run_client(config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

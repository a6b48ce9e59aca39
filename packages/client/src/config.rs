//! Command line configuration for the client.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    domain::{EchoPolicy, echo::DEFAULT_ECHO_WINDOW},
    error::ClientError,
    infrastructure::{
        repository::FileIdentityRepository,
        transport::{ReconnectPolicy, TransportConfig},
    },
};

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080/ws";

/// Terminal client for Tsudoi room chat
#[derive(Parser, Debug)]
#[command(name = "tsudoi-client")]
#[command(about = "Terminal client for Tsudoi room chat")]
#[command(version)]
pub struct ClientArgs {
    /// WebSocket endpoint of the chat server
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub url: String,

    /// File holding the chosen display name (defaults to the platform config dir)
    #[arg(long)]
    pub identity_file: Option<PathBuf>,

    /// Seconds to wait for a connect attempt before giving up
    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Reconnect attempts after an unexpected disconnect (0 disables reconnecting)
    #[arg(long, default_value_t = 5)]
    pub max_reconnect_attempts: u32,

    /// Hide the server's echo of messages this client sent
    #[arg(long)]
    pub suppress_echo: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub transport: TransportConfig,
    pub identity_file: PathBuf,
    pub echo_policy: EchoPolicy,
}

impl ClientArgs {
    pub fn into_config(self) -> Result<ClientConfig, ClientError> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(ClientError::InvalidUrl(self.url));
        }

        let reconnect = ReconnectPolicy::default().with_max_attempts(self.max_reconnect_attempts);
        let transport = TransportConfig::new(self.url)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_reconnect(reconnect);

        let echo_policy = if self.suppress_echo {
            EchoPolicy::Suppress {
                window: DEFAULT_ECHO_WINDOW,
            }
        } else {
            EchoPolicy::Display
        };

        Ok(ClientConfig {
            transport,
            identity_file: self
                .identity_file
                .unwrap_or_else(FileIdentityRepository::default_path),
            echo_policy,
        })
    }
}

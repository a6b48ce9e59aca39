//! Command line configuration for the server.

use clap::Parser;

/// Tsudoi reference broadcast server
#[derive(Parser, Debug)]
#[command(name = "tsudoi-server")]
#[command(about = "Broadcast chat server for Tsudoi clients")]
#[command(version)]
pub struct ServerArgs {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerArgs {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr() {
        // テスト項目: 引数なしでは 127.0.0.1:8080 で待ち受ける
        // given (前提条件):
        let args = ServerArgs::parse_from(["tsudoi-server"]);

        // when (操作):
        let addr = args.addr();

        // then (期待する結果):
        assert_eq!(addr, "127.0.0.1:8080");
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_host_and_port_flags() {
        // テスト項目: --host / --port で待ち受けアドレスを変更できる
        // given (前提条件):
        let args = ServerArgs::parse_from(["tsudoi-server", "--host", "0.0.0.0", "-p", "9000"]);

        // when (操作):
        let addr = args.addr();

        // then (期待する結果):
        assert_eq!(addr, "0.0.0.0:9000");
    }
}

//! Server configuration via CLI args and environment variables.

use std::net::{IpAddr, SocketAddr};

use clap::{Parser, ValueEnum};

/// Log output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// HTTP server for docstack.
#[derive(Parser, Debug, Clone)]
#[command(name = "docstack-server", version, about)]
pub struct Config {
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0", env = "DOCSTACK_HOST")]
    pub host: IpAddr,

    /// Bind port.
    #[arg(long, default_value_t = 8080, env = "DOCSTACK_PORT")]
    pub port: u16,

    /// Log level, used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info", env = "DOCSTACK_LOG_LEVEL")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "DOCSTACK_LOG_FORMAT")]
    pub log_format: LogFormat,
}

impl Config {
    /// Parses configuration from CLI args and env vars.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Address the HTTP listener binds to.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["docstack-server"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "docstack-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_host() {
        assert!(Config::try_parse_from(["docstack-server", "--host", "nowhere"]).is_err());
    }
}

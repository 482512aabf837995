use std::{env, net::SocketAddr};

use thiserror::Error;

use crate::mcp::server::ServerInfo;
use crate::DEFAULT_MAX_BODY_BYTES;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub max_body_bytes: usize,
    pub server_info: ServerInfo,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("MCP_MAX_BODY_BYTES must be a positive integer")]
    InvalidBodyLimit,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = non_blank("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = non_blank("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let max_body_bytes = non_blank("MCP_MAX_BODY_BYTES")
            .map(|value| {
                value
                    .parse::<usize>()
                    .ok()
                    .filter(|limit| *limit > 0)
                    .ok_or(ConfigError::InvalidBodyLimit)
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        let defaults = ServerInfo::default();
        let server_info = ServerInfo {
            name: non_blank("MCP_SERVER_NAME").unwrap_or(defaults.name),
            version: non_blank("MCP_SERVER_VERSION").unwrap_or(defaults.version),
            instructions: non_blank("MCP_SERVER_INSTRUCTIONS").unwrap_or(defaults.instructions),
        };

        let config = Self {
            bind_addr,
            bind_port,
            max_body_bytes,
            server_info,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

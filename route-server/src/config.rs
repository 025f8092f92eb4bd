//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::planner::RankConfig;

/// Address to listen on.
pub const ADDR_VAR: &str = "ROUTE_SERVER_ADDR";

/// Optional path to a JSON network document.
pub const NETWORK_PATH_VAR: &str = "ROUTE_NETWORK_PATH";

/// Optional default number of alternatives.
pub const DEFAULT_K_VAR: &str = "ROUTE_DEFAULT_K";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error reading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} is not a positive integer: {value:?}")]
    InvalidCount { var: &'static str, value: String },
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,

    /// Load the network from this file instead of the built-in topology
    pub network_path: Option<PathBuf>,

    pub rank: RankConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let addr_value = set(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value: addr_value.clone(),
            })?;

        let network_path = set(NETWORK_PATH_VAR).map(PathBuf::from);

        let mut rank = RankConfig::default();
        if let Some(value) = set(DEFAULT_K_VAR) {
            rank.default_k = match value.trim().parse::<usize>() {
                Ok(k) if k > 0 => k,
                _ => {
                    return Err(ConfigError::InvalidCount {
                        var: DEFAULT_K_VAR,
                        value,
                    });
                }
            };
        }

        Ok(Self {
            addr,
            network_path,
            rank,
        })
    }
}

//! Network configuration for the Supra SDK.
//!
//! This module provides configuration options for connecting to the Supra
//! networks (mainnet, testnet), a local node or a custom RPC endpoint, and
//! for how long the SDK waits for a submitted transaction to settle.

use crate::types::ChainId;
use std::time::Duration;
use url::Url;

/// Configuration for HTTP connection pooling.
///
/// Controls how connections are reused across requests.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of idle connections per host.
    /// Default: unlimited (no limit)
    pub max_idle_per_host: Option<usize>,
    /// How long to keep idle connections alive.
    /// Default: 90 seconds
    pub idle_timeout: Duration,
    /// TCP keepalive interval, if enabled.
    /// Default: 60 seconds
    pub tcp_keepalive: Option<Duration>,
    /// Whether to enable TCP nodelay (disable Nagle's algorithm).
    /// Default: true
    pub tcp_nodelay: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: None,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
            tcp_nodelay: true,
        }
    }
}

impl PoolConfig {
    /// Creates a configuration for talking to a node on the same machine.
    pub fn low_latency() -> Self {
        Self {
            max_idle_per_host: Some(8),
            idle_timeout: Duration::from_secs(30),
            tcp_keepalive: Some(Duration::from_secs(15)),
            tcp_nodelay: true,
        }
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = Some(max);
        self
    }

    /// Sets the idle connection timeout.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Disables TCP keepalive.
    pub fn without_tcp_keepalive(mut self) -> Self {
        self.tcp_keepalive = None;
        self
    }
}

/// How the SDK polls for a submitted transaction to reach a final status.
///
/// The loop issues at most `max_attempts` queries, sleeping `poll_interval`
/// between two consecutive queries. Running out of attempts is not an
/// error: the transaction is reported as still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Delay between two status queries.
    /// Default: 1 second
    pub poll_interval: Duration,
    /// Maximum number of status queries.
    /// Default: 20
    pub max_attempts: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_attempts: 20,
        }
    }
}

impl WaitConfig {
    /// Creates a wait configuration.
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Upper bound of the time spent sleeping while waiting.
    pub fn max_wait(&self) -> Duration {
        self.poll_interval
            .saturating_mul(self.max_attempts.saturating_sub(1))
    }
}

/// Known Supra networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Supra mainnet
    Mainnet,
    /// Supra testnet
    Testnet,
    /// Local development node
    Local,
    /// Custom network
    Custom,
}

impl Network {
    /// Returns the chain ID for this network, if it is known.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Network::Mainnet => Some(ChainId::mainnet()),
            Network::Testnet => Some(ChainId::testnet()),
            Network::Local => Some(ChainId::new(255)),
            Network::Custom => None,
        }
    }

    /// Returns the network name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Local => "local",
            Network::Custom => "custom",
        }
    }
}

/// Configuration for the Supra client.
///
/// ```rust
/// use std::time::Duration;
/// use supra_rust_sdk::config::{PoolConfig, SupraConfig, WaitConfig};
///
/// let config = SupraConfig::testnet()
///     .with_timeout(Duration::from_secs(10))
///     .with_pool(PoolConfig::low_latency())
///     .with_wait(WaitConfig::new(Duration::from_millis(500), 40));
/// assert_eq!(config.chain_id().map(|c| c.id()), Some(6));
/// ```
#[derive(Debug, Clone)]
pub struct SupraConfig {
    pub(crate) network: Network,
    pub(crate) rpc_url: Url,
    pub(crate) chain_id: Option<ChainId>,
    pub(crate) timeout: Duration,
    pub(crate) pool_config: PoolConfig,
    pub(crate) wait_config: WaitConfig,
}

impl Default for SupraConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

impl SupraConfig {
    /// Creates a configuration for Supra mainnet.
    pub fn mainnet() -> Self {
        Self::preset(
            Network::Mainnet,
            Url::parse("https://rpc-mainnet.supra.com/rpc/v1").expect("valid mainnet URL"),
        )
    }

    /// Creates a configuration for Supra testnet.
    pub fn testnet() -> Self {
        Self::preset(
            Network::Testnet,
            Url::parse("https://rpc-testnet.supra.com/rpc/v1").expect("valid testnet URL"),
        )
    }

    /// Creates a configuration for a node running on this machine with the
    /// default RPC port.
    pub fn local() -> Self {
        let mut config = Self::preset(
            Network::Local,
            Url::parse("http://127.0.0.1:27001/rpc/v1").expect("valid local URL"),
        );
        config.timeout = Duration::from_secs(10);
        config.pool_config = PoolConfig::low_latency();
        config
    }

    /// Creates a custom configuration with the specified RPC URL.
    ///
    /// Custom networks have no known chain id; set one with
    /// [`with_chain_id`](Self::with_chain_id) before building transactions.
    ///
    /// ```rust
    /// use supra_rust_sdk::config::SupraConfig;
    ///
    /// let config = SupraConfig::custom("https://my-node.example.com/rpc/v1").unwrap();
    /// assert!(config.chain_id().is_none());
    /// ```
    pub fn custom(rpc_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::preset(Network::Custom, Url::parse(rpc_url)?))
    }

    fn preset(network: Network, rpc_url: Url) -> Self {
        Self {
            network,
            rpc_url,
            chain_id: network.chain_id(),
            timeout: Duration::from_secs(30),
            pool_config: PoolConfig::default(),
            wait_config: WaitConfig::default(),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection pool configuration.
    pub fn with_pool(mut self, pool_config: PoolConfig) -> Self {
        self.pool_config = pool_config;
        self
    }

    /// Sets how submitted transactions are waited for.
    pub fn with_wait(mut self, wait_config: WaitConfig) -> Self {
        self.wait_config = wait_config;
        self
    }

    /// Overrides the chain id.
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Returns the network this config is for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the RPC base URL.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Returns the chain ID, if known.
    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection pool configuration.
    pub fn pool_config(&self) -> &PoolConfig {
        &self.pool_config
    }

    /// Returns the transaction wait configuration.
    pub fn wait_config(&self) -> &WaitConfig {
        &self.wait_config
    }
}

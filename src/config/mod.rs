// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for mirror node crawls
//!
//! This module provides the configuration system controlling which network
//! is crawled, how the mirror node is contacted, where registry files live,
//! and how aggressively token-info enrichment runs.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use mirrorscan::{Network, ScanConfig};
//!
//! // Public testnet mirror node, 100 contracts per page, enrichment on
//! let config = ScanConfig::for_network(Network::Testnet).expect("default config is valid");
//! assert_eq!(config.page_limit, 100);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use std::time::Duration;
//!
//! use mirrorscan::{Network, ScanConfig};
//!
//! let config = ScanConfig::builder(Network::Mainnet)
//!     .page_limit(25)
//!     .http_timeout(Duration::from_secs(10))
//!     .enrich_token_info(false)
//!     .registry_root("/var/lib/mirrorscan")
//!     .build()
//!     .expect("valid config");
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use mirrorscan::ScanConfig;
//!
//! // Reads MIRRORSCAN_NETWORK, MIRRORSCAN_BASE_URL, MIRRORSCAN_PAGE_LIMIT, ...
//! let config = ScanConfig::from_env()?;
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use tracing::warn;
use url::Url;

use crate::client::RetryPolicy;
use crate::errors::ConfigError;

pub mod constants;

use constants::{
    env, networks, DEFAULT_ENRICHMENT_CONCURRENCY, DEFAULT_HTTP_TIMEOUT, DEFAULT_PAGE_LIMIT,
    DEFAULT_REGISTRY_ROOT, MAX_PAGE_LIMIT,
};

/// A Hedera-style network with a public mirror node.
///
/// The network decides both the default mirror node endpoint and the name
/// of the per-network subdirectory under the registry root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Stable test network.
    Testnet,
    /// Preview network for upcoming releases.
    Previewnet,
}

impl Network {
    /// Lowercase network name, used as the registry subdirectory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Previewnet => "previewnet",
        }
    }

    /// Base URL of the network's public mirror node.
    pub fn mirror_base_url(&self) -> &'static str {
        match self {
            Network::Mainnet => networks::MAINNET_MIRROR_URL,
            Network::Testnet => networks::TESTNET_MIRROR_URL,
            Network::Previewnet => networks::PREVIEWNET_MIRROR_URL,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "previewnet" => Ok(Network::Previewnet),
            _ => Err(ConfigError::unknown_network(s)),
        }
    }
}

/// Where a crawl should start when ignoring any persisted cursor.
///
/// Parsed from operator input with [`FromStr`]: a `0x`-prefixed (or bare)
/// 40-hex-character string is an EVM address, a `shard.realm.num` triple is
/// a contract ID, and a string starting with `/` is taken verbatim as a
/// listing URL fragment.
///
/// # Examples
///
/// ```
/// use mirrorscan::StartingPoint;
///
/// let by_address: StartingPoint = "0x00000000000000000000000000000000004e6f21".parse().unwrap();
/// let by_id: StartingPoint = "0.0.5149985".parse().unwrap();
/// let by_fragment: StartingPoint = "/api/v1/contracts?limit=100&order=asc".parse().unwrap();
///
/// assert!(matches!(by_address, StartingPoint::EvmAddress(_)));
/// assert!(matches!(by_id, StartingPoint::ContractId(_)));
/// assert!(matches!(by_fragment, StartingPoint::NextFragment(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartingPoint {
    /// Start from contracts at or above this EVM address.
    EvmAddress(Address),
    /// Start from contracts at or above this `shard.realm.num` ID.
    ContractId(String),
    /// Resume from a previously returned listing URL fragment, verbatim.
    NextFragment(String),
}

impl fmt::Display for StartingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartingPoint::EvmAddress(address) => write!(f, "{address}"),
            StartingPoint::ContractId(id) => f.write_str(id),
            StartingPoint::NextFragment(fragment) => f.write_str(fragment),
        }
    }
}

impl FromStr for StartingPoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('/') {
            return Ok(StartingPoint::NextFragment(trimmed.to_owned()));
        }
        if let Ok(address) = trimmed.parse::<Address>() {
            return Ok(StartingPoint::EvmAddress(address));
        }
        if is_contract_id(trimmed) {
            return Ok(StartingPoint::ContractId(trimmed.to_owned()));
        }
        Err(ConfigError::invalid_starting_point(trimmed))
    }
}

/// True for `shard.realm.num` triples of decimal digits, e.g. `0.0.1234`.
fn is_contract_id(s: &str) -> bool {
    let mut parts = s.split('.');
    let valid_triple = (0..3).all(|_| {
        parts
            .next()
            .is_some_and(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    });
    valid_triple && parts.next().is_none()
}

/// Configuration for one crawl of a network's contract listing.
///
/// Construct with [`ScanConfig::for_network`] for defaults,
/// [`ScanConfig::builder`] for a fluent API, or [`ScanConfig::from_env`]
/// to honor `MIRRORSCAN_*` environment variables.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Network being crawled; names the registry subdirectory.
    pub network: Network,

    /// Validated mirror node base URL.
    pub base_url: Url,

    /// Contracts requested per listing page, 1 to 100.
    pub page_limit: usize,

    /// Per-request HTTP timeout.
    pub http_timeout: Duration,

    /// Retry policy for transient mirror node failures.
    pub retry: RetryPolicy,

    /// Whether classified tokens get best-effort metadata enrichment.
    pub enrich_token_info: bool,

    /// Concurrent token-info fetches per page.
    pub enrichment_concurrency: usize,

    /// Directory holding per-network registry subdirectories.
    pub registry_root: PathBuf,

    /// Explicit starting point, overriding any persisted cursor.
    pub starting_point: Option<StartingPoint>,
}

impl ScanConfig {
    /// Create a default configuration for a network.
    pub fn for_network(network: Network) -> Result<Self, ConfigError> {
        Self::builder(network).build()
    }

    /// Create a builder seeded with the defaults for a network.
    pub fn builder(network: Network) -> ScanConfigBuilder {
        ScanConfigBuilder::new(network)
    }

    /// Build a configuration from `MIRRORSCAN_*` environment variables.
    ///
    /// Unset variables fall back to defaults; the network itself defaults
    /// to testnet. Set variables that fail to parse are errors rather than
    /// silent fallbacks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let network = match std::env::var(env::NETWORK) {
            Ok(value) => value.parse::<Network>()?,
            Err(_) => Network::Testnet,
        };
        let mut builder = Self::builder(network);

        if let Ok(value) = std::env::var(env::BASE_URL) {
            builder = builder.base_url(value);
        }
        if let Ok(value) = std::env::var(env::REGISTRY_ROOT) {
            builder = builder.registry_root(value);
        }
        if let Ok(value) = std::env::var(env::STARTING_POINT) {
            builder = builder.starting_point(value.parse()?);
        }
        if let Ok(value) = std::env::var(env::PAGE_LIMIT) {
            let limit = value.parse::<usize>().map_err(|_| {
                ConfigError::invalid_env_value(env::PAGE_LIMIT, &value, "expected a positive integer")
            })?;
            builder = builder.page_limit(limit);
        }
        if let Ok(value) = std::env::var(env::ENRICH_TOKEN_INFO) {
            builder = builder.enrich_token_info(parse_bool(env::ENRICH_TOKEN_INFO, &value)?);
        }
        if let Ok(value) = std::env::var(env::ENRICHMENT_CONCURRENCY) {
            let concurrency = value.parse::<usize>().map_err(|_| {
                ConfigError::invalid_env_value(
                    env::ENRICHMENT_CONCURRENCY,
                    &value,
                    "expected a positive integer",
                )
            })?;
            builder = builder.enrichment_concurrency(concurrency);
        }
        if let Ok(value) = std::env::var(env::HTTP_TIMEOUT_SECS) {
            let secs = value.parse::<u64>().map_err(|_| {
                ConfigError::invalid_env_value(
                    env::HTTP_TIMEOUT_SECS,
                    &value,
                    "expected a number of seconds",
                )
            })?;
            builder = builder.http_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

fn parse_bool(variable: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_env_value(
            variable,
            value,
            "expected a boolean",
        )),
    }
}

fn parse_base_url(text: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(text).map_err(|e| ConfigError::invalid_base_url(text, e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::invalid_base_url(
            text,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::invalid_base_url(text, "missing host"));
    }
    Ok(url)
}

/// Builder for [`ScanConfig`]
///
/// Provides a fluent API for constructing crawl configurations. Values not
/// set explicitly use the defaults from [`constants`].
///
/// # Example
///
/// ```rust
/// use mirrorscan::{Network, ScanConfig, StartingPoint};
///
/// let config = ScanConfig::builder(Network::Testnet)
///     .page_limit(50)
///     .starting_point("0.0.1000".parse::<StartingPoint>().unwrap())
///     .build()
///     .expect("valid config");
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfigBuilder {
    network: Network,
    base_url: Option<String>,
    page_limit: usize,
    http_timeout: Duration,
    retry: RetryPolicy,
    enrich_token_info: bool,
    enrichment_concurrency: usize,
    registry_root: PathBuf,
    starting_point: Option<StartingPoint>,
}

impl ScanConfigBuilder {
    /// Create a builder with the defaults for a network.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            base_url: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            retry: RetryPolicy::default(),
            enrich_token_info: true,
            enrichment_concurrency: DEFAULT_ENRICHMENT_CONCURRENCY,
            registry_root: PathBuf::from(DEFAULT_REGISTRY_ROOT),
            starting_point: None,
        }
    }

    /// Override the mirror node base URL, e.g. for a self-hosted node.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set contracts per listing page; clamped to 1..=100 at build time.
    pub fn page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Set the retry policy for transient failures.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enable or disable token-info enrichment.
    pub fn enrich_token_info(mut self, enrich: bool) -> Self {
        self.enrich_token_info = enrich;
        self
    }

    /// Set concurrent token-info fetches per page; at least 1.
    pub fn enrichment_concurrency(mut self, concurrency: usize) -> Self {
        self.enrichment_concurrency = concurrency;
        self
    }

    /// Set the directory holding per-network registries.
    pub fn registry_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.registry_root = root.into();
        self
    }

    /// Set an explicit starting point, overriding any persisted cursor.
    pub fn starting_point(mut self, starting_point: StartingPoint) -> Self {
        self.starting_point = Some(starting_point);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ScanConfig, ConfigError> {
        let base_url = match &self.base_url {
            Some(text) => parse_base_url(text)?,
            None => parse_base_url(self.network.mirror_base_url())?,
        };

        let page_limit = self.page_limit.clamp(1, MAX_PAGE_LIMIT);
        if page_limit != self.page_limit {
            warn!(
                requested = self.page_limit,
                effective = page_limit,
                "page limit outside 1..=100, clamped"
            );
        }

        Ok(ScanConfig {
            network: self.network,
            base_url,
            page_limit,
            http_timeout: self.http_timeout,
            retry: self.retry,
            enrich_token_info: self.enrich_token_info,
            enrichment_concurrency: self.enrichment_concurrency.max(1),
            registry_root: self.registry_root,
            starting_point: self.starting_point,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn network_names_parse_case_insensitively() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(
            "PREVIEWNET".parse::<Network>().unwrap(),
            Network::Previewnet
        );
        assert!("devnet".parse::<Network>().is_err());
    }

    #[test]
    fn default_base_urls_are_per_network() {
        let mainnet = ScanConfig::for_network(Network::Mainnet).unwrap();
        let testnet = ScanConfig::for_network(Network::Testnet).unwrap();
        assert_eq!(
            mainnet.base_url.as_str(),
            "https://mainnet.mirrornode.hedera.com/"
        );
        assert_eq!(
            testnet.base_url.as_str(),
            "https://testnet.mirrornode.hedera.com/"
        );
    }

    #[test]
    fn starting_point_classifies_prefixed_and_bare_addresses() {
        let expected = address!("00000000000000000000000000000000004e6f21");

        let prefixed: StartingPoint = "0x00000000000000000000000000000000004e6f21"
            .parse()
            .unwrap();
        let bare: StartingPoint = "00000000000000000000000000000000004e6f21".parse().unwrap();

        assert_eq!(prefixed, StartingPoint::EvmAddress(expected));
        assert_eq!(bare, StartingPoint::EvmAddress(expected));
    }

    #[test]
    fn starting_point_classifies_contract_ids() {
        let point: StartingPoint = "0.0.5149985".parse().unwrap();
        assert_eq!(point, StartingPoint::ContractId("0.0.5149985".to_owned()));

        let nonzero_shard: StartingPoint = "10.20.30".parse().unwrap();
        assert_eq!(nonzero_shard, StartingPoint::ContractId("10.20.30".to_owned()));
    }

    #[test]
    fn starting_point_takes_fragments_verbatim() {
        let fragment = "/api/v1/contracts?limit=100&order=asc&contract.id=gt:0.0.5";
        let point: StartingPoint = fragment.parse().unwrap();
        assert_eq!(point, StartingPoint::NextFragment(fragment.to_owned()));
    }

    #[test]
    fn malformed_starting_points_are_rejected() {
        assert!("".parse::<StartingPoint>().is_err());
        assert!("0.0".parse::<StartingPoint>().is_err());
        assert!("0.0.12.34".parse::<StartingPoint>().is_err());
        assert!("0.0.abc".parse::<StartingPoint>().is_err());
        assert!("0xnothex".parse::<StartingPoint>().is_err());
        assert!("deadbeef".parse::<StartingPoint>().is_err());
    }

    #[test]
    fn builder_applies_defaults() {
        let config = ScanConfig::for_network(Network::Testnet).unwrap();
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
        assert!(config.enrich_token_info);
        assert_eq!(
            config.enrichment_concurrency,
            DEFAULT_ENRICHMENT_CONCURRENCY
        );
        assert_eq!(config.registry_root, PathBuf::from(DEFAULT_REGISTRY_ROOT));
        assert_eq!(config.starting_point, None);
    }

    #[test]
    fn page_limit_is_clamped_to_mirror_bounds() {
        let too_big = ScanConfig::builder(Network::Testnet)
            .page_limit(5000)
            .build()
            .unwrap();
        assert_eq!(too_big.page_limit, MAX_PAGE_LIMIT);

        let zero = ScanConfig::builder(Network::Testnet)
            .page_limit(0)
            .build()
            .unwrap();
        assert_eq!(zero.page_limit, 1);
    }

    #[test]
    fn enrichment_concurrency_is_at_least_one() {
        let config = ScanConfig::builder(Network::Testnet)
            .enrichment_concurrency(0)
            .build()
            .unwrap();
        assert_eq!(config.enrichment_concurrency, 1);
    }

    #[test]
    fn non_http_base_urls_are_rejected() {
        let ftp = ScanConfig::builder(Network::Testnet)
            .base_url("ftp://mirror.example.com")
            .build();
        assert!(ftp.is_err());

        let garbage = ScanConfig::builder(Network::Testnet)
            .base_url("not a url")
            .build();
        assert!(garbage.is_err());
    }

    #[test]
    fn self_hosted_base_urls_are_accepted() {
        let config = ScanConfig::builder(Network::Testnet)
            .base_url("http://localhost:5551")
            .build()
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5551/");
    }
}

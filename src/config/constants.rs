// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known mirror node endpoints and configuration defaults
//!
//! This module centralizes magic constants used throughout the mirrorscan
//! crate, improving discoverability and maintainability.

use std::time::Duration;

/// Public mirror node base URLs for the supported networks
pub mod networks {
    /// Hedera mainnet public mirror node
    pub const MAINNET_MIRROR_URL: &str = "https://mainnet.mirrornode.hedera.com";

    /// Hedera testnet public mirror node
    pub const TESTNET_MIRROR_URL: &str = "https://testnet.mirrornode.hedera.com";

    /// Hedera previewnet public mirror node
    pub const PREVIEWNET_MIRROR_URL: &str = "https://previewnet.mirrornode.hedera.com";
}

/// Environment variables read by [`ScanConfig::from_env`](crate::ScanConfig::from_env)
pub mod env {
    /// Network to crawl: `mainnet`, `testnet`, or `previewnet`
    pub const NETWORK: &str = "MIRRORSCAN_NETWORK";

    /// Base URL override for self-hosted mirror nodes
    pub const BASE_URL: &str = "MIRRORSCAN_BASE_URL";

    /// Directory holding the per-network registry subdirectories
    pub const REGISTRY_ROOT: &str = "MIRRORSCAN_REGISTRY_ROOT";

    /// Starting point override: EVM address, contract ID, or URL fragment
    pub const STARTING_POINT: &str = "MIRRORSCAN_STARTING_POINT";

    /// Contracts requested per listing page
    pub const PAGE_LIMIT: &str = "MIRRORSCAN_PAGE_LIMIT";

    /// Whether to enrich classified tokens with name/symbol metadata
    pub const ENRICH_TOKEN_INFO: &str = "MIRRORSCAN_ENRICH_TOKEN_INFO";

    /// Concurrent token-info fetches per page
    pub const ENRICHMENT_CONCURRENCY: &str = "MIRRORSCAN_ENRICHMENT_CONCURRENCY";

    /// Per-request HTTP timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "MIRRORSCAN_HTTP_TIMEOUT_SECS";
}

/// Contracts requested per listing page by default
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Largest page size the public mirror nodes accept
pub const MAX_PAGE_LIMIT: usize = 100;

/// Per-request HTTP timeout applied unless overridden
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Retries allowed after a first failed attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Fixed delay between retry attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Concurrent token-info fetches per page by default
pub const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 4;

/// Registry root directory used when none is configured
pub const DEFAULT_REGISTRY_ROOT: &str = "registry";

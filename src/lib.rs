// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! mirrorscan - ERC token discovery over Hedera-style mirror nodes.
//!
//! This crate crawls a mirror node's paginated contract listing, classifies
//! each contract's runtime bytecode as ERC-20, ERC-721 or ERC-1155 by
//! matching the standards' mandatory selector and event-topic digests, and
//! persists the recognized tokens into per-network JSON registries. Token
//! name, symbol, decimals and total supply are filled in best-effort through
//! the mirror node's read-only call endpoint.
//!
//! The crawl is resumable: the cursor of the next unprocessed page is
//! persisted after every page, and registry merges deduplicate by address,
//! so interrupted runs pick up where they stopped without losing or
//! double-counting tokens.
//!
//! # Architecture
//!
//! - [`catalog`] - the signature sets defining each standard, plus the
//!   token-info accessors used for enrichment
//! - [`classifier`] - pure bytecode classification with a fixed
//!   most-specific-first precedence
//! - [`client`] - the mirror node REST client behind the [`MirrorSource`]
//!   seam, with bounded fixed-delay retries
//! - [`registry`] - atomic per-network registry artifacts and the resume
//!   cursor
//! - [`engine`] - the sequential page loop tying the pieces together
//!
//! # Examples
//!
//! ```rust,ignore
//! use mirrorscan::{IndexerEngine, MirrorNodeClient, RegistryStore, ScanConfig};
//!
//! let config = ScanConfig::from_env()?;
//! let client = MirrorNodeClient::new(&config)?;
//! let store = RegistryStore::new(&config.registry_root, config.network.as_str());
//!
//! let report = IndexerEngine::new(client, store, config).run().await?;
//! println!("{} new registry entries", report.entries_inserted);
//! ```

pub mod bootstrap;
pub mod catalog;
pub mod classifier;
pub mod client;
pub mod config;
pub mod engine;
pub mod errors;
pub mod registry;
pub mod types;

pub use catalog::{TokenField, TokenInfoCall, TokenStandard};
pub use classifier::{classify, classify_strict, full_matches, ClassificationLabel};
pub use client::{AbiValue, MirrorNodeClient, MirrorSource, RetryPolicy};
pub use config::{Network, ScanConfig, ScanConfigBuilder, StartingPoint};
pub use engine::{CrawlReport, EngineState, IndexerEngine};
pub use errors::{
    ConfigError, CrawlError, MirrorNodeError, MirrorScanError, RegistryError,
};
pub use registry::{RegistryEntry, RegistrySnapshot, RegistryStore, TokenInfo};
pub use types::{ContractPage, ContractRecord, PageCursor};

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the mirrorscan library.
//!
//! This module provides strongly-typed errors for all public APIs in
//! mirrorscan. It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling
//!   (`MirrorNodeError`, `RegistryError`, etc.)
//! - **Unified error type** (`MirrorScanError`) for convenience when you
//!   don't need to distinguish between error sources
//!
//! # Architecture
//!
//! Each major module has its own error type:
//! - [`MirrorNodeError`] - Errors from mirror node HTTP communication
//! - [`RegistryError`] - Errors from registry file persistence
//! - [`ConfigError`] - Errors from configuration loading and validation
//! - [`CrawlError`] - Fatal errors that halt the crawl engine
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use mirrorscan::{MirrorNodeClient, MirrorNodeError};
//!
//! match client.list_contracts_page(None).await {
//!     Ok(page) => println!("{} contracts on page", page.records.len()),
//!     Err(MirrorNodeError::RetriesExhausted { operation, attempts, .. }) => {
//!         eprintln!("{operation} still failing after {attempts} attempts");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use mirrorscan::{IndexerEngine, MirrorNodeClient, MirrorScanError, RegistryStore, ScanConfig};
//!
//! async fn run() -> Result<(), MirrorScanError> {
//!     let config = ScanConfig::from_env()?;
//!     let client = MirrorNodeClient::new(&config)?;
//!     let store = RegistryStore::new(&config.registry_root, config.network.as_str());
//!     let report = IndexerEngine::new(client, store, config).run().await?;
//!     println!("scanned {} contracts", report.contracts_scanned);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod engine;
mod registry;

pub use client::MirrorNodeError;
pub use config::ConfigError;
pub use engine::CrawlError;
pub use registry::RegistryError;

/// Unified error type for all mirrorscan operations.
///
/// This enum wraps all module-specific error types, providing a convenient
/// way to handle errors when you don't need to distinguish between error
/// sources. All module-specific error types automatically convert to
/// `MirrorScanError` via `From` implementations, so `?` propagates them
/// naturally.
#[derive(Debug, thiserror::Error)]
pub enum MirrorScanError {
    /// Error from mirror node communication.
    #[error("Mirror node error: {0}")]
    Client(#[from] MirrorNodeError),

    /// Error from configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from registry persistence.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Fatal crawl failure.
    #[error("Crawl error: {0}")]
    Crawl(#[from] CrawlError),
}

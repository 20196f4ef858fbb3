// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Binary wiring: environment, logging, and the crawl run.

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::client::MirrorNodeClient;
use crate::config::ScanConfig;
use crate::engine::IndexerEngine;
use crate::errors::MirrorScanError;
use crate::registry::RegistryStore;

/// Main entry point for the indexer binary.
///
/// Loads `.env`, installs the tracing subscriber (`RUST_LOG` respected,
/// `info` otherwise), builds the client and store from environment
/// configuration and drives one full crawl. Returns the first fatal error;
/// the persisted cursor then still points at the failed page.
pub async fn run() -> Result<(), MirrorScanError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ScanConfig::from_env()?;
    info!(
        network = %config.network,
        base_url = %config.base_url,
        registry_root = %config.registry_root.display(),
        enrich = config.enrich_token_info,
        "starting mirrorscan"
    );

    let client = MirrorNodeClient::new(&config)?;
    let store = RegistryStore::new(&config.registry_root, config.network.as_str());

    let mut engine = IndexerEngine::new(client, store, config);
    let report = engine.run().await?;

    info!(
        pages = report.pages,
        contracts = report.contracts_scanned,
        erc20 = report.erc20_found,
        erc721 = report.erc721_found,
        erc1155 = report.erc1155_found,
        inserted = report.entries_inserted,
        enriched = report.tokens_enriched,
        "mirrorscan finished"
    );
    Ok(())
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The crawl engine driving discovery, classification and persistence.
//!
//! [`IndexerEngine`] walks the mirror node's contract listing one page at a
//! time. For each page it classifies every contract's runtime bytecode,
//! optionally enriches recognized tokens with name/symbol/decimals/supply
//! read calls, merges the results into the per-standard registries and then
//! persists the next-page cursor. Page processing is strictly sequential
//! because each page's cursor comes from the previous response; only the
//! token-info calls within a page run concurrently, bounded by the
//! configured worker count.
//!
//! The cursor is advanced only after the page's entries are durably merged.
//! A crashed or halted run therefore resumes at the page it failed on, and
//! the deduplicating merge makes reprocessing that page harmless.
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
//! let mut engine = IndexerEngine::new(client, store, config);
//! let report = engine.run().await?;
//! println!(
//!     "{} pages, {} tokens found",
//!     report.pages,
//!     report.erc20_found + report.erc721_found + report.erc1155_found
//! );
//! ```

use alloy_primitives::Address;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::catalog::{self, TokenField, TokenStandard};
use crate::classifier;
use crate::client::{starting_cursor, AbiValue, MirrorSource};
use crate::config::ScanConfig;
use crate::errors::CrawlError;
use crate::registry::{RegistryEntry, RegistryStore, TokenInfo};
use crate::types::{ContractRecord, PageCursor};

/// Lifecycle of a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Pages remain; the engine keeps pulling.
    Running,
    /// The mirror node reported the end of the listing.
    Done,
}

/// Counters accumulated over one [`IndexerEngine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Listing pages processed.
    pub pages: usize,
    /// Contracts whose bytecode was inspected.
    pub contracts_scanned: usize,
    /// Contracts classified as ERC-20.
    pub erc20_found: usize,
    /// Contracts classified as ERC-721.
    pub erc721_found: usize,
    /// Contracts classified as ERC-1155.
    pub erc1155_found: usize,
    /// Entries newly inserted into the registries (existing entries are
    /// deduplicated away and not counted).
    pub entries_inserted: usize,
    /// Tokens for which at least one metadata field was retrieved.
    pub tokens_enriched: usize,
}

impl CrawlReport {
    /// Contracts classified under `standard` during the run.
    pub fn found(&self, standard: TokenStandard) -> usize {
        match standard {
            TokenStandard::Erc20 => self.erc20_found,
            TokenStandard::Erc721 => self.erc721_found,
            TokenStandard::Erc1155 => self.erc1155_found,
        }
    }

    fn record_classified(&mut self, standard: TokenStandard) {
        match standard {
            TokenStandard::Erc20 => self.erc20_found += 1,
            TokenStandard::Erc721 => self.erc721_found += 1,
            TokenStandard::Erc1155 => self.erc1155_found += 1,
        }
    }
}

/// Orchestrates the page loop over any [`MirrorSource`].
///
/// The engine owns its registry store and configuration for the duration of
/// a run. One engine instance serves one network; concurrent engines over
/// the same registry directory are not supported.
pub struct IndexerEngine<S: MirrorSource> {
    source: S,
    store: RegistryStore,
    config: ScanConfig,
    state: EngineState,
}

impl<S: MirrorSource> IndexerEngine<S> {
    /// Creates an engine ready to run.
    pub fn new(source: S, store: RegistryStore, config: ScanConfig) -> Self {
        Self {
            source,
            store,
            config,
            state: EngineState::Running,
        }
    }

    /// Current lifecycle state.
    ///
    /// After a failed [`run`](Self::run) this stays [`EngineState::Running`]:
    /// the listing was not exhausted and a re-run will resume it.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Crawls the contract listing until the mirror node reports no more
    /// pages, returning the accumulated counters.
    ///
    /// The starting page is the configured [`StartingPoint`] override when
    /// present, otherwise the cursor persisted by the previous run, otherwise
    /// the beginning of the listing. A persisted `null` cursor means the
    /// previous run completed, so the crawl starts over and the merge
    /// deduplicates everything already registered.
    ///
    /// On a fatal listing or persistence failure the persisted cursor still
    /// points at the failed page; the error is returned after logging that
    /// cursor.
    ///
    /// [`StartingPoint`]: crate::config::StartingPoint
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlError> {
        self.state = EngineState::Running;
        let mut report = CrawlReport::default();

        let mut cursor: Option<PageCursor> = match &self.config.starting_point {
            Some(start) => {
                let cursor = starting_cursor(start, self.config.page_limit);
                info!(cursor = %cursor, "starting crawl from configured override");
                Some(cursor)
            }
            None => {
                let persisted = self.store.cursor().await?;
                match &persisted {
                    Some(cursor) => info!(cursor = %cursor, "resuming crawl from persisted cursor"),
                    None => info!("starting crawl from the beginning of the listing"),
                }
                persisted
            }
        };

        while self.state == EngineState::Running {
            let page = match self.source.list_contracts_page(cursor.as_ref()).await {
                Ok(page) => page,
                Err(e) => {
                    error!(
                        cursor = ?cursor,
                        error = %e,
                        "contract listing failed past the retry budget, halting crawl"
                    );
                    return Err(e.into());
                }
            };

            report.pages += 1;
            report.contracts_scanned += page.records.len();

            if let Err(e) = self.process_page(&page.records, &mut report).await {
                error!(
                    cursor = ?cursor,
                    error = %e,
                    "failed to persist page results, halting crawl"
                );
                return Err(e);
            }

            if let Err(e) = self.store.advance_cursor(page.next_cursor.as_ref()).await {
                error!(
                    cursor = ?cursor,
                    error = %e,
                    "failed to persist advanced cursor, halting crawl"
                );
                return Err(e.into());
            }

            info!(
                page = report.pages,
                records = page.records.len(),
                next = ?page.next_cursor,
                "processed contract listing page"
            );

            cursor = page.next_cursor;
            if cursor.is_none() {
                self.state = EngineState::Done;
            }
        }

        info!(
            pages = report.pages,
            contracts = report.contracts_scanned,
            erc20 = report.erc20_found,
            erc721 = report.erc721_found,
            erc1155 = report.erc1155_found,
            inserted = report.entries_inserted,
            enriched = report.tokens_enriched,
            "crawl complete"
        );
        Ok(report)
    }

    /// Classifies one page of records, enriches the recognized tokens and
    /// merges them into the registries.
    async fn process_page(
        &self,
        records: &[ContractRecord],
        report: &mut CrawlReport,
    ) -> Result<(), CrawlError> {
        let mut discovered: Vec<(TokenStandard, Address)> = Vec::new();
        for record in records {
            let label = classifier::classify(&record.runtime_bytecode);
            debug!(address = %record.address, label = %label, "classified contract");
            if let Some(standard) = label.standard() {
                report.record_classified(standard);
                discovered.push((standard, record.address));
            }
        }

        let entries = if self.config.enrich_token_info {
            self.enrich_discovered(&discovered, report).await
        } else {
            discovered
                .into_iter()
                .map(|(standard, address)| (standard, RegistryEntry::new(address)))
                .collect()
        };

        for standard in TokenStandard::ALL {
            let batch: Vec<RegistryEntry> = entries
                .iter()
                .filter(|(s, _)| *s == standard)
                .map(|(_, entry)| entry.clone())
                .collect();
            if batch.is_empty() {
                continue;
            }
            report.entries_inserted += self.store.merge(standard, batch).await?;
        }
        Ok(())
    }

    /// Fetches token info for every discovered token, bounded by the
    /// configured concurrency. Failures degrade to absent fields.
    async fn enrich_discovered(
        &self,
        discovered: &[(TokenStandard, Address)],
        report: &mut CrawlReport,
    ) -> Vec<(TokenStandard, RegistryEntry)> {
        let concurrency = self.config.enrichment_concurrency.max(1);
        let fetched: Vec<(TokenStandard, Address, TokenInfo)> =
            stream::iter(discovered.iter().copied())
                .map(|(standard, address)| async move {
                    (standard, address, self.fetch_token_info(standard, address).await)
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;

        fetched
            .into_iter()
            .map(|(standard, address, info)| {
                if !info.is_empty() {
                    report.tokens_enriched += 1;
                }
                (standard, RegistryEntry::with_token_info(address, info))
            })
            .collect()
    }

    /// Runs the standard's token-info call set against one contract.
    ///
    /// Every failure mode leaves the corresponding field empty and never
    /// propagates: an unavailable name must not cost the registry entry.
    async fn fetch_token_info(&self, standard: TokenStandard, address: Address) -> TokenInfo {
        let mut info = TokenInfo::default();
        for call in catalog::token_info_calls(standard) {
            match self.source.call_read_only(address, *call).await {
                Ok(Some(value)) => apply_token_value(&mut info, call.field, value),
                Ok(None) => {
                    debug!(address = %address, call = call.text, "token info unavailable");
                }
                Err(e) => {
                    warn!(
                        address = %address,
                        call = call.text,
                        error = %e,
                        "token info call failed, leaving field empty"
                    );
                }
            }
        }
        info
    }
}

/// Stores a decoded call result into the field its accessor populates.
///
/// A value whose shape does not match the field is dropped rather than
/// coerced. The client decodes against the declared return type, so a
/// mismatch here means the source implementation misbehaved.
fn apply_token_value(info: &mut TokenInfo, field: TokenField, value: AbiValue) {
    match (field, value) {
        (TokenField::Name, AbiValue::Text(text)) => info.name = Some(text),
        (TokenField::Symbol, AbiValue::Text(text)) => info.symbol = Some(text),
        (TokenField::Decimals, AbiValue::Uint8(value)) => info.decimals = Some(value),
        (TokenField::TotalSupply, AbiValue::Uint256(value)) => {
            info.total_supply = Some(value.to_string());
        }
        (field, value) => {
            debug!(?field, ?value, "decoded value does not fit its field, ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;

    #[test]
    fn token_values_land_in_their_fields() {
        let mut info = TokenInfo::default();
        apply_token_value(&mut info, TokenField::Name, AbiValue::Text("Token".into()));
        apply_token_value(&mut info, TokenField::Symbol, AbiValue::Text("TOK".into()));
        apply_token_value(&mut info, TokenField::Decimals, AbiValue::Uint8(6));
        apply_token_value(
            &mut info,
            TokenField::TotalSupply,
            AbiValue::Uint256(U256::from(42u64)),
        );

        assert_eq!(info.name.as_deref(), Some("Token"));
        assert_eq!(info.symbol.as_deref(), Some("TOK"));
        assert_eq!(info.decimals, Some(6));
        assert_eq!(info.total_supply.as_deref(), Some("42"));
    }

    #[test]
    fn mismatched_value_shapes_are_dropped() {
        let mut info = TokenInfo::default();
        apply_token_value(&mut info, TokenField::Decimals, AbiValue::Text("18".into()));
        apply_token_value(&mut info, TokenField::Name, AbiValue::Uint8(1));

        assert!(info.is_empty());
    }

    #[test]
    fn report_counts_by_standard() {
        let mut report = CrawlReport::default();
        report.record_classified(TokenStandard::Erc20);
        report.record_classified(TokenStandard::Erc20);
        report.record_classified(TokenStandard::Erc1155);

        assert_eq!(report.found(TokenStandard::Erc20), 2);
        assert_eq!(report.found(TokenStandard::Erc721), 0);
        assert_eq!(report.found(TokenStandard::Erc1155), 1);
    }
}

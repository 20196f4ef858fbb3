// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for mirrorscan integration tests
//!
//! Provides a scripted [`MirrorSource`] implementation so the crawl engine
//! can be exercised without a mirror node, plus builders for synthetic
//! contract records whose bytecode classifies as a chosen standard.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy_primitives::Address;
use async_trait::async_trait;
use mirrorscan::catalog::{self, TokenInfoCall, TokenStandard};
use mirrorscan::client::{AbiValue, MirrorSource};
use mirrorscan::errors::MirrorNodeError;
use mirrorscan::types::{ContractPage, ContractRecord, PageCursor};
use reqwest::StatusCode;

/// Scripted mirror source serving a fixed sequence of listing pages.
///
/// Pages are addressed by synthetic cursors `page-1`, `page-2`, ... so the
/// cursors surviving in `next-pointer.json` can be asserted against. Every
/// listing and read-only call is recorded for inspection.
///
/// # Example
///
/// ```rust,ignore
/// let source = Arc::new(
///     MockMirrorSource::new()
///         .with_page(vec![erc20_contract(addr(1))])
///         .with_page(vec![erc721_contract(addr(2))])
///         .with_call_value(addr(1), "06fdde03", AbiValue::Text("Token".into())),
/// );
///
/// let mut engine = IndexerEngine::new(Arc::clone(&source), store, config);
/// engine.run().await?;
/// assert_eq!(source.listing_requests().len(), 2);
/// ```
pub struct MockMirrorSource {
    pages: Vec<Vec<ContractRecord>>,
    fail_listing_once_at: Mutex<Option<usize>>,
    call_values: HashMap<(Address, &'static str), AbiValue>,
    call_failures: Vec<(Address, &'static str)>,
    listing_requests: Mutex<Vec<Option<String>>>,
    calls_seen: Mutex<Vec<(Address, &'static str)>>,
}

impl MockMirrorSource {
    /// Create a source with no pages; a crawl over it completes immediately.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            fail_listing_once_at: Mutex::new(None),
            call_values: HashMap::new(),
            call_failures: Vec::new(),
            listing_requests: Mutex::new(Vec::new()),
            calls_seen: Mutex::new(Vec::new()),
        }
    }

    /// Append one listing page.
    pub fn with_page(mut self, records: Vec<ContractRecord>) -> Self {
        self.pages.push(records);
        self
    }

    /// Make the listing of page `index` (0-based) fail exactly once.
    ///
    /// The failure is consumed on first hit, so a re-run against the same
    /// source succeeds, mimicking an outage that ended between runs.
    pub fn with_listing_failure_at(self, index: usize) -> Self {
        *self.fail_listing_once_at.lock().unwrap() = Some(index);
        self
    }

    /// Script the value returned by a read-only call.
    ///
    /// Calls without a scripted value resolve as unavailable (`Ok(None)`),
    /// the same as a reverting contract.
    pub fn with_call_value(
        mut self,
        address: Address,
        selector: &'static str,
        value: AbiValue,
    ) -> Self {
        self.call_values.insert((address, selector), value);
        self
    }

    /// Make a read-only call fail past the retry budget on every attempt.
    pub fn with_call_failure(mut self, address: Address, selector: &'static str) -> Self {
        self.call_failures.push((address, selector));
        self
    }

    /// Cursors of every listing request made, `None` for the first page.
    pub fn listing_requests(&self) -> Vec<Option<String>> {
        self.listing_requests.lock().unwrap().clone()
    }

    /// Every `(address, selector)` pair issued through `call_read_only`.
    pub fn calls_seen(&self) -> Vec<(Address, &'static str)> {
        self.calls_seen.lock().unwrap().clone()
    }

    fn page_index(cursor: Option<&PageCursor>) -> usize {
        match cursor {
            None => 0,
            Some(cursor) => cursor
                .as_str()
                .strip_prefix("page-")
                .and_then(|index| index.parse().ok())
                .unwrap_or_else(|| panic!("unexpected mock cursor {cursor}")),
        }
    }

    fn outage(operation: &'static str) -> MirrorNodeError {
        MirrorNodeError::retries_exhausted(
            operation,
            3,
            MirrorNodeError::upstream_status(
                operation,
                StatusCode::SERVICE_UNAVAILABLE,
                "scripted outage",
            ),
        )
    }
}

#[async_trait]
impl MirrorSource for MockMirrorSource {
    async fn list_contracts_page(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ContractPage, MirrorNodeError> {
        let index = Self::page_index(cursor);
        self.listing_requests
            .lock()
            .unwrap()
            .push(cursor.map(|c| c.as_str().to_owned()));

        let mut fail_at = self.fail_listing_once_at.lock().unwrap();
        if *fail_at == Some(index) {
            fail_at.take();
            return Err(Self::outage("list-contracts"));
        }
        drop(fail_at);

        let records = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len())
            .then(|| PageCursor::new(format!("page-{}", index + 1)));
        Ok(ContractPage {
            records,
            next_cursor,
        })
    }

    async fn call_read_only(
        &self,
        address: Address,
        call: TokenInfoCall,
    ) -> Result<Option<AbiValue>, MirrorNodeError> {
        self.calls_seen.lock().unwrap().push((address, call.selector));

        if self.call_failures.contains(&(address, call.selector)) {
            return Err(Self::outage("contract-call"));
        }
        Ok(self.call_values.get(&(address, call.selector)).cloned())
    }
}

/// Address with the given low byte, zero elsewhere.
pub fn addr(low_byte: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = low_byte;
    Address::from(bytes)
}

/// Synthetic runtime bytecode embedding the full signature sets of the
/// given standards, interleaved with dispatcher-looking filler.
pub fn bytecode_with(standards: &[TokenStandard]) -> String {
    let mut bytecode = String::from("0x6080604052348015600e575f5ffd5b50");
    for standard in standards {
        for signature in catalog::required_signatures(*standard) {
            bytecode.push_str("63");
            bytecode.push_str(signature.hex);
            bytecode.push_str("14610100");
        }
    }
    bytecode.push_str("5f5ffd");
    bytecode
}

/// Contract record whose bytecode classifies as the given standard.
pub fn token_contract(address: Address, standard: TokenStandard) -> ContractRecord {
    ContractRecord::new(address, bytecode_with(&[standard]))
}

/// Contract record whose bytecode matches no standard.
pub fn plain_contract(address: Address) -> ContractRecord {
    ContractRecord::new(address, "0x6080604052348015600e575f5ffd5b50")
}

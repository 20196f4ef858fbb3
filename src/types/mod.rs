// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Core domain types shared across the crawl pipeline.
//!
//! These types carry data between the mirror node client, the bytecode
//! classifier, and the registry store. They are deliberately small: the
//! interesting behavior lives in the modules that produce and consume them.

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Opaque pagination token for the mirror node contract listing.
///
/// The mirror node returns the next page as a relative URL fragment in
/// `links.next` (path plus query string). The crawl engine never inspects
/// the contents; it only hands the cursor back to the client for the next
/// request and to the registry store for persistence between runs.
///
/// # Examples
///
/// ```
/// use mirrorscan::PageCursor;
///
/// let cursor = PageCursor::new("/api/v1/contracts?limit=100&order=asc&contract.id=gt:0.0.5");
/// assert!(cursor.as_str().starts_with("/api/v1/contracts"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    /// Creates a cursor from a relative URL fragment.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self(fragment.into())
    }

    /// Returns the raw URL fragment.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PageCursor {
    fn from(fragment: String) -> Self {
        Self(fragment)
    }
}

impl From<&str> for PageCursor {
    fn from(fragment: &str) -> Self {
        Self(fragment.to_owned())
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contract discovered on the network, ready for classification.
///
/// `runtime_bytecode` is the deployed (post-constructor) bytecode as a hex
/// string, exactly as returned by the mirror node detail endpoint. Contracts
/// whose detail response carries no bytecode get an empty string, which the
/// classifier treats as non-conforming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRecord {
    /// EVM address of the contract.
    pub address: Address,
    /// Deployed bytecode hex, with or without a `0x` prefix.
    pub runtime_bytecode: String,
    /// Cursor of the listing page this contract appeared on, if any.
    /// `None` means the contract came from the first (uncursored) page.
    pub first_seen_cursor: Option<PageCursor>,
}

impl ContractRecord {
    /// Creates a record for a contract from the first listing page.
    pub fn new(address: Address, runtime_bytecode: impl Into<String>) -> Self {
        Self {
            address,
            runtime_bytecode: runtime_bytecode.into(),
            first_seen_cursor: None,
        }
    }
}

/// One page of the contract listing, with the cursor for the page after it.
///
/// `next_cursor == None` is the only signal that the listing is exhausted.
/// An empty `records` vector with a present cursor is a valid intermediate
/// page and does not end the crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractPage {
    /// Contracts on this page, in listing order.
    pub records: Vec<ContractRecord>,
    /// Cursor for the following page, or `None` on the final page.
    pub next_cursor: Option<PageCursor>,
}

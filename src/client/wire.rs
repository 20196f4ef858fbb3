// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Serde shapes for the mirror node REST API.
//!
//! Field names follow the wire format exactly (the mirror node uses
//! snake_case), and everything the crawl does not consume is left to
//! serde's default unknown-field handling. Optional fields default to
//! `None` so partially populated responses deserialize instead of failing.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// One page of `GET /api/v1/contracts`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContractsListResponse {
    /// Contracts on this page, in `contract.id` order.
    #[serde(default)]
    pub contracts: Vec<ContractListItem>,
    /// Pagination block; `links.next` is `null` on the final page.
    #[serde(default)]
    pub links: PageLinks,
}

/// A single entry of the contract listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContractListItem {
    /// Native `shard.realm.num` contract ID.
    #[serde(default)]
    pub contract_id: Option<String>,
    /// 20-byte EVM address as 0x-prefixed hex.
    #[serde(default)]
    pub evm_address: Option<String>,
}

impl ContractListItem {
    /// Parses the entry's EVM address, if one is present and well formed.
    pub fn parsed_evm_address(&self) -> Option<Address> {
        self.evm_address.as_deref()?.trim().parse().ok()
    }
}

/// The `links` object carried by every paginated listing response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageLinks {
    /// Relative URL of the next page, or `null` on the final page.
    #[serde(default)]
    pub next: Option<String>,
}

/// Subset of `GET /api/v1/contracts/{id}` the crawl consumes.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContractDetailResponse {
    /// Deployed bytecode as 0x-prefixed hex; absent or `null` for
    /// contracts whose bytecode the mirror node does not serve.
    #[serde(default)]
    pub runtime_bytecode: Option<String>,
}

/// Body of `POST /api/v1/contracts/call` for an eth_call-style read.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ContractCallRequest {
    /// Block tag to execute against.
    pub block: &'static str,
    /// Calldata: 0x-prefixed function selector (no arguments).
    pub data: String,
    /// False selects execution over gas estimation.
    pub estimate: bool,
    /// Target contract as a 0x-prefixed EVM address.
    pub to: String,
}

impl ContractCallRequest {
    /// Builds a read-only call of a zero-argument function against the
    /// latest block.
    pub fn read_only(to: Address, selector: &str) -> Self {
        Self {
            block: "latest",
            data: format!("0x{selector}"),
            estimate: false,
            to: format!("{to:#x}"),
        }
    }
}

/// Response of `POST /api/v1/contracts/call`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContractCallResponse {
    /// ABI-encoded return data as 0x-prefixed hex; empty or absent when
    /// the call produced no data.
    #[serde(default)]
    pub result: Option<String>,
}

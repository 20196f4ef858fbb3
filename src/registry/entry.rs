// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Registry entry and token metadata shapes.
//!
//! These are the durable JSON records consumers of the registry files read,
//! so their serialized form is part of the crate's public contract: camelCase
//! keys, lowercase `0x` hex addresses, and absent (not `null`) optional
//! fields.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Best-effort metadata captured for a classified token.
///
/// Every field is optional: enrichment may be disabled, a contract may not
/// implement the accessor, or the call may fail. `total_supply` is kept as
/// the decimal string form of the `uint256` so registries survive JSON
/// number precision limits.
///
/// # Examples
///
/// ```
/// use mirrorscan::TokenInfo;
///
/// let info = TokenInfo {
///     name: Some("Wrapped Hbar".to_owned()),
///     symbol: Some("WHBAR".to_owned()),
///     decimals: Some(8),
///     total_supply: None,
/// };
/// assert!(!info.is_empty());
/// assert!(TokenInfo::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Result of `name()`, when the contract serves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Result of `symbol()`, when the contract serves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Result of `decimals()`; only attempted for ERC-20 contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,

    /// Result of `totalSupply()` as a decimal string; only attempted for
    /// ERC-20 contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
}

impl TokenInfo {
    /// True when no field was populated.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.symbol.is_none()
            && self.decimals.is_none()
            && self.total_supply.is_none()
    }
}

/// One token in a per-network, per-standard registry file.
///
/// Registry files hold a JSON array of these, sorted by `address` ascending
/// and deduplicated on `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// EVM address of the token contract, serialized as lowercase 0x hex.
    pub address: Address,

    /// Enrichment metadata; omitted entirely when none was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_info: Option<TokenInfo>,
}

impl RegistryEntry {
    /// Creates an entry with no metadata.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            token_info: None,
        }
    }

    /// Creates an entry carrying metadata, unless the metadata is empty,
    /// in which case the field is omitted.
    pub fn with_token_info(address: Address, info: TokenInfo) -> Self {
        Self {
            address,
            token_info: (!info.is_empty()).then_some(info),
        }
    }
}

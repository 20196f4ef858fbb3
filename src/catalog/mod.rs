// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical ERC signature catalog for bytecode classification.
//!
//! This module is the single source of truth for which function selectors and
//! event topics a contract must embed to count as an implementation of one of
//! the supported token standards. Each entry pairs the human-readable Solidity
//! signature with its precomputed Keccak-256 digest: the first 4 bytes
//! (8 hex characters) for function selectors, the full 32 bytes (64 hex
//! characters) for event topics.
//!
//! The detection sets are intentionally conservative. Optional members of a
//! standard (for ERC-20: `name()`, `symbol()`, `decimals()`) are excluded so
//! that minimal-but-conforming implementations are still recognized. Those
//! optional members appear separately in the token-info call tables, which
//! drive best-effort metadata enrichment after classification.
//!
//! # Detection Signatures
//!
//! - **ERC-20**: 6 mandatory function selectors plus the `Transfer` and
//!   `Approval` event topics
//! - **ERC-721**: 9 mandatory function selectors plus the `Transfer`,
//!   `Approval`, and `ApprovalForAll` event topics
//! - **ERC-1155**: 6 mandatory function selectors plus the `TransferSingle`,
//!   `TransferBatch`, `ApprovalForAll`, and `URI` event topics
//!
//! Some digests are shared between standards: `transferFrom` appears in both
//! the ERC-20 and ERC-721 sets, and `isApprovedForAll` in both the ERC-721
//! and ERC-1155 sets. Disambiguation is the classifier's job, not the
//! catalog's.
//!
//! # Examples
//!
//! ```
//! use mirrorscan::catalog::{self, TokenStandard};
//!
//! let selectors = catalog::selectors(TokenStandard::Erc20);
//! assert_eq!(selectors.len(), 6);
//! assert!(selectors.iter().any(|s| s.text == "transfer(address,uint256)"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The token standards this crate can recognize and index.
///
/// Ordering of the variants is not meaningful; the classifier's precedence
/// is expressed explicitly by [`DETECTION_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    /// Fungible tokens (ERC-20).
    Erc20,
    /// Non-fungible tokens (ERC-721).
    Erc721,
    /// Multi-token contracts (ERC-1155).
    Erc1155,
}

impl TokenStandard {
    /// All supported standards, in registry enumeration order.
    pub const ALL: [TokenStandard; 3] = [
        TokenStandard::Erc20,
        TokenStandard::Erc721,
        TokenStandard::Erc1155,
    ];

    /// File name of the per-network registry holding this standard's tokens.
    pub fn registry_file(&self) -> &'static str {
        match self {
            TokenStandard::Erc20 => "erc-20.json",
            TokenStandard::Erc721 => "erc-721.json",
            TokenStandard::Erc1155 => "erc-1155.json",
        }
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenStandard::Erc20 => "ERC-20",
            TokenStandard::Erc721 => "ERC-721",
            TokenStandard::Erc1155 => "ERC-1155",
        };
        f.write_str(name)
    }
}

/// Order in which the classifier tests the standards.
///
/// ERC-1155 is tested before ERC-721, and ERC-721 before ERC-20, so that
/// contracts embedding the signature set of a richer standard are not
/// shadowed by a simpler one they happen to overlap with.
pub const DETECTION_ORDER: [TokenStandard; 3] = [
    TokenStandard::Erc1155,
    TokenStandard::Erc721,
    TokenStandard::Erc20,
];

/// A Solidity function or event signature with its precomputed digest.
///
/// `hex` is lowercase hex without a `0x` prefix: 8 characters for a function
/// selector, 64 for an event topic. The classifier searches for these digests
/// as substrings of normalized runtime bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Canonical Solidity signature text, e.g. `transfer(address,uint256)`.
    pub text: &'static str,
    /// Keccak-256 digest prefix (selector) or full digest (topic).
    pub hex: &'static str,
}

/// Mandatory ERC-20 function selectors.
pub const ERC20_SELECTORS: [Signature; 6] = [
    Signature {
        text: "totalSupply()",
        hex: "18160ddd",
    },
    Signature {
        text: "balanceOf(address)",
        hex: "70a08231",
    },
    Signature {
        text: "transfer(address,uint256)",
        hex: "a9059cbb",
    },
    Signature {
        text: "transferFrom(address,address,uint256)",
        hex: "23b872dd",
    },
    Signature {
        text: "approve(address,uint256)",
        hex: "095ea7b3",
    },
    Signature {
        text: "allowance(address,address)",
        hex: "dd62ed3e",
    },
];

/// Mandatory ERC-20 event topics.
pub const ERC20_TOPICS: [Signature; 2] = [
    Signature {
        text: "Transfer(address,address,uint256)",
        hex: "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
    },
    Signature {
        text: "Approval(address,address,uint256)",
        hex: "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925",
    },
];

/// Mandatory ERC-721 function selectors.
pub const ERC721_SELECTORS: [Signature; 9] = [
    Signature {
        text: "balanceOf(address)",
        hex: "70a08231",
    },
    Signature {
        text: "ownerOf(uint256)",
        hex: "6352211e",
    },
    Signature {
        text: "safeTransferFrom(address,address,uint256,bytes)",
        hex: "b88d4fde",
    },
    Signature {
        text: "safeTransferFrom(address,address,uint256)",
        hex: "42842e0e",
    },
    Signature {
        text: "transferFrom(address,address,uint256)",
        hex: "23b872dd",
    },
    Signature {
        text: "approve(address,uint256)",
        hex: "095ea7b3",
    },
    Signature {
        text: "setApprovalForAll(address,bool)",
        hex: "a22cb465",
    },
    Signature {
        text: "getApproved(uint256)",
        hex: "081812fc",
    },
    Signature {
        text: "isApprovedForAll(address,address)",
        hex: "e985e9c5",
    },
];

/// Mandatory ERC-721 event topics.
pub const ERC721_TOPICS: [Signature; 3] = [
    Signature {
        text: "Transfer(address,address,uint256)",
        hex: "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
    },
    Signature {
        text: "Approval(address,address,uint256)",
        hex: "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925",
    },
    Signature {
        text: "ApprovalForAll(address,address,bool)",
        hex: "17307eab39ab6107e8899845ad3d59bd9653f200f220920489ca2b5937696c31",
    },
];

/// Mandatory ERC-1155 function selectors.
pub const ERC1155_SELECTORS: [Signature; 6] = [
    Signature {
        text: "safeTransferFrom(address,address,uint256,uint256,bytes)",
        hex: "f242432a",
    },
    Signature {
        text: "safeBatchTransferFrom(address,address,uint256[],uint256[],bytes)",
        hex: "2eb2c2d6",
    },
    Signature {
        text: "balanceOf(address,uint256)",
        hex: "00fdd58e",
    },
    Signature {
        text: "balanceOfBatch(address[],uint256[])",
        hex: "4e1273f4",
    },
    Signature {
        text: "setApprovalForAll(address,bool)",
        hex: "a22cb465",
    },
    Signature {
        text: "isApprovedForAll(address,address)",
        hex: "e985e9c5",
    },
];

/// Mandatory ERC-1155 event topics.
pub const ERC1155_TOPICS: [Signature; 4] = [
    Signature {
        text: "TransferSingle(address,address,address,uint256,uint256)",
        hex: "c3d58168c5ae7397731d063d5bbf3d657854427343f4c083240f7aacaa2d0f62",
    },
    Signature {
        text: "TransferBatch(address,address,address,uint256[],uint256[])",
        hex: "4a39dc06d4c0dbc64b70af90fd698a233a518aa5d07e595d983b8c0526c8f7fb",
    },
    Signature {
        text: "ApprovalForAll(address,address,bool)",
        hex: "17307eab39ab6107e8899845ad3d59bd9653f200f220920489ca2b5937696c31",
    },
    Signature {
        text: "URI(string,uint256)",
        hex: "6bb7ff708619ba0610cba295a58592e0451dee2622938c8755667688daf3529b",
    },
];

/// Returns the mandatory function selectors for a standard.
pub fn selectors(standard: TokenStandard) -> &'static [Signature] {
    match standard {
        TokenStandard::Erc20 => &ERC20_SELECTORS,
        TokenStandard::Erc721 => &ERC721_SELECTORS,
        TokenStandard::Erc1155 => &ERC1155_SELECTORS,
    }
}

/// Returns the mandatory event topics for a standard.
pub fn topics(standard: TokenStandard) -> &'static [Signature] {
    match standard {
        TokenStandard::Erc20 => &ERC20_TOPICS,
        TokenStandard::Erc721 => &ERC721_TOPICS,
        TokenStandard::Erc1155 => &ERC1155_TOPICS,
    }
}

/// Iterates every signature (selectors then topics) a conforming
/// implementation of `standard` must embed.
pub fn required_signatures(standard: TokenStandard) -> impl Iterator<Item = &'static Signature> {
    selectors(standard).iter().chain(topics(standard).iter())
}

/// Return type of a token-info accessor, used to decode call results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// Solidity `string`.
    String,
    /// Solidity `uint8`.
    Uint8,
    /// Solidity `uint256`.
    Uint256,
}

/// The metadata field a token-info accessor populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenField {
    /// Human-readable token name.
    Name,
    /// Ticker symbol.
    Symbol,
    /// Decimal precision (ERC-20 only).
    Decimals,
    /// Total minted supply (ERC-20 only).
    TotalSupply,
}

/// A read-only accessor invoked during token-info enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfoCall {
    /// Field this call populates.
    pub field: TokenField,
    /// Canonical Solidity signature text.
    pub text: &'static str,
    /// 4-byte function selector as 8 lowercase hex characters.
    pub selector: &'static str,
    /// ABI type of the (single) return value.
    pub return_type: ReturnType,
}

/// Token-info accessors attempted for ERC-20 contracts.
pub const ERC20_TOKEN_INFO_CALLS: [TokenInfoCall; 4] = [
    TokenInfoCall {
        field: TokenField::Name,
        text: "name()",
        selector: "06fdde03",
        return_type: ReturnType::String,
    },
    TokenInfoCall {
        field: TokenField::Symbol,
        text: "symbol()",
        selector: "95d89b41",
        return_type: ReturnType::String,
    },
    TokenInfoCall {
        field: TokenField::Decimals,
        text: "decimals()",
        selector: "313ce567",
        return_type: ReturnType::Uint8,
    },
    TokenInfoCall {
        field: TokenField::TotalSupply,
        text: "totalSupply()",
        selector: "18160ddd",
        return_type: ReturnType::Uint256,
    },
];

/// Token-info accessors attempted for ERC-721 contracts.
///
/// `decimals()` and `totalSupply()` are not part of ERC-721, so only the
/// metadata-extension accessors are tried.
pub const ERC721_TOKEN_INFO_CALLS: [TokenInfoCall; 2] = [
    TokenInfoCall {
        field: TokenField::Name,
        text: "name()",
        selector: "06fdde03",
        return_type: ReturnType::String,
    },
    TokenInfoCall {
        field: TokenField::Symbol,
        text: "symbol()",
        selector: "95d89b41",
        return_type: ReturnType::String,
    },
];

/// Returns the token-info accessors attempted for a standard.
///
/// ERC-1155 has no standard name or symbol accessors, so its slice is empty
/// and enrichment skips those contracts entirely.
pub fn token_info_calls(standard: TokenStandard) -> &'static [TokenInfoCall] {
    match standard {
        TokenStandard::Erc20 => &ERC20_TOKEN_INFO_CALLS,
        TokenStandard::Erc721 => &ERC721_TOKEN_INFO_CALLS,
        TokenStandard::Erc1155 => &[],
    }
}

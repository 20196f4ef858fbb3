// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Heuristic token-standard classification of EVM runtime bytecode.
//!
//! Classification is a pure string computation: the candidate bytecode is
//! normalized (optional `0x` prefix stripped, lowercased) and a contract
//! counts as implementing a standard only if **every** mandatory selector
//! and event topic from the [`catalog`](crate::catalog) appears somewhere in
//! the normalized hex. No EVM execution or ABI metadata is involved.
//!
//! Solidity dispatchers embed each externally callable function's 4-byte
//! selector as a `PUSH4` literal, and emitted events embed their 32-byte
//! topic as a `PUSH32` literal, so conforming implementations compiled from
//! high-level languages match reliably. The heuristic admits false positives
//! (a digest can appear as data bytes by coincidence) and false negatives
//! (hand-rolled assembly can dispatch without literal selectors); both are
//! accepted trade-offs for classification without execution.
//!
//! Because the mandatory ERC-721 surface overlaps ERC-20 (`transferFrom`,
//! `approve`, `balanceOf`) and ERC-1155 overlaps ERC-721
//! (`setApprovalForAll`, `isApprovedForAll`), standards are tested
//! richest-first and the first full match wins. [`classify_strict`] is the
//! diagnostic variant that reports multi-standard matches as ambiguous
//! instead of resolving them by priority.
//!
//! # Examples
//!
//! ```
//! use mirrorscan::classifier::{classify, ClassificationLabel};
//!
//! // Real bytecode embeds the digests among actual opcodes; for the
//! // classifier only their presence matters.
//! let mut bytecode = String::from("0x6080604052");
//! for signature in mirrorscan::catalog::required_signatures(mirrorscan::TokenStandard::Erc20) {
//!     bytecode.push_str(signature.hex);
//! }
//!
//! assert_eq!(classify(&bytecode), ClassificationLabel::Erc20);
//! assert_eq!(classify("0x6080604052"), ClassificationLabel::NonConforming);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, TokenStandard, DETECTION_ORDER};

/// Outcome of classifying one contract's runtime bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationLabel {
    /// Full ERC-20 signature set present.
    Erc20,
    /// Full ERC-721 signature set present.
    Erc721,
    /// Full ERC-1155 signature set present.
    Erc1155,
    /// No standard's full signature set present (includes empty bytecode).
    NonConforming,
    /// More than one standard's full set present; only produced by
    /// [`classify_strict`].
    Ambiguous,
}

impl ClassificationLabel {
    /// The registry bucket this label maps to, if any.
    ///
    /// `NonConforming` and `Ambiguous` contracts are not persisted.
    pub fn standard(&self) -> Option<TokenStandard> {
        match self {
            ClassificationLabel::Erc20 => Some(TokenStandard::Erc20),
            ClassificationLabel::Erc721 => Some(TokenStandard::Erc721),
            ClassificationLabel::Erc1155 => Some(TokenStandard::Erc1155),
            ClassificationLabel::NonConforming | ClassificationLabel::Ambiguous => None,
        }
    }
}

impl From<TokenStandard> for ClassificationLabel {
    fn from(standard: TokenStandard) -> Self {
        match standard {
            TokenStandard::Erc20 => ClassificationLabel::Erc20,
            TokenStandard::Erc721 => ClassificationLabel::Erc721,
            TokenStandard::Erc1155 => ClassificationLabel::Erc1155,
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClassificationLabel::Erc20 => "ERC-20",
            ClassificationLabel::Erc721 => "ERC-721",
            ClassificationLabel::Erc1155 => "ERC-1155",
            ClassificationLabel::NonConforming => "non-conforming",
            ClassificationLabel::Ambiguous => "ambiguous",
        };
        f.write_str(name)
    }
}

/// Normalizes bytecode hex for matching: trims whitespace, strips an
/// optional `0x`/`0X` prefix, and lowercases the rest.
fn normalize(bytecode: &str) -> String {
    let trimmed = bytecode.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    stripped.to_ascii_lowercase()
}

/// True when every mandatory signature of `standard` appears in the
/// normalized bytecode.
fn matches_standard(normalized: &str, standard: TokenStandard) -> bool {
    catalog::required_signatures(standard).all(|signature| normalized.contains(signature.hex))
}

/// Classifies runtime bytecode, resolving overlaps by fixed priority.
///
/// Standards are tested in [`DETECTION_ORDER`] (ERC-1155, then ERC-721,
/// then ERC-20) and the first full match wins, so this function never
/// returns [`ClassificationLabel::Ambiguous`]. Empty or absent bytecode is
/// non-conforming, never an error.
pub fn classify(runtime_bytecode: &str) -> ClassificationLabel {
    let normalized = normalize(runtime_bytecode);
    if normalized.is_empty() {
        return ClassificationLabel::NonConforming;
    }

    for standard in DETECTION_ORDER {
        if matches_standard(&normalized, standard) {
            return standard.into();
        }
    }
    ClassificationLabel::NonConforming
}

/// Returns every standard whose full signature set the bytecode embeds,
/// in [`DETECTION_ORDER`].
///
/// Useful for auditing how often the priority rule in [`classify`] actually
/// decides an outcome.
pub fn full_matches(runtime_bytecode: &str) -> Vec<TokenStandard> {
    let normalized = normalize(runtime_bytecode);
    if normalized.is_empty() {
        return Vec::new();
    }

    DETECTION_ORDER
        .into_iter()
        .filter(|standard| matches_standard(&normalized, *standard))
        .collect()
}

/// Classifies without priority resolution: a contract matching more than
/// one full signature set is reported as [`ClassificationLabel::Ambiguous`].
pub fn classify_strict(runtime_bytecode: &str) -> ClassificationLabel {
    let matches = full_matches(runtime_bytecode);
    match matches.as_slice() {
        [] => ClassificationLabel::NonConforming,
        [only] => (*only).into(),
        _ => ClassificationLabel::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::required_signatures;

    use super::*;

    /// Builds synthetic bytecode embedding the full signature sets of the
    /// given standards, interleaved with dispatcher-looking filler.
    fn bytecode_with(standards: &[TokenStandard]) -> String {
        let mut bytecode = String::from("0x6080604052348015600e575f5ffd5b50");
        for standard in standards {
            for signature in required_signatures(*standard) {
                bytecode.push_str("63");
                bytecode.push_str(signature.hex);
                bytecode.push_str("14610100");
            }
        }
        bytecode.push_str("5f5ffd");
        bytecode
    }

    #[test]
    fn empty_bytecode_is_non_conforming() {
        assert_eq!(classify(""), ClassificationLabel::NonConforming);
        assert_eq!(classify("0x"), ClassificationLabel::NonConforming);
        assert_eq!(classify("  "), ClassificationLabel::NonConforming);
    }

    #[test]
    fn plain_contract_is_non_conforming() {
        assert_eq!(
            classify("0x6080604052348015600e575f5ffd5b50"),
            ClassificationLabel::NonConforming
        );
    }

    #[test]
    fn full_erc20_set_classifies_as_erc20() {
        let bytecode = bytecode_with(&[TokenStandard::Erc20]);
        assert_eq!(classify(&bytecode), ClassificationLabel::Erc20);
    }

    #[test]
    fn full_erc721_set_classifies_as_erc721() {
        let bytecode = bytecode_with(&[TokenStandard::Erc721]);
        assert_eq!(classify(&bytecode), ClassificationLabel::Erc721);
    }

    #[test]
    fn full_erc1155_set_classifies_as_erc1155() {
        let bytecode = bytecode_with(&[TokenStandard::Erc1155]);
        assert_eq!(classify(&bytecode), ClassificationLabel::Erc1155);
    }

    #[test]
    fn missing_one_selector_fails_the_whole_standard() {
        let full = bytecode_with(&[TokenStandard::Erc20]);
        // Drop allowance(address,address) and nothing should match.
        let partial = full.replace("dd62ed3e", "00000000");
        assert_eq!(classify(&partial), ClassificationLabel::NonConforming);
    }

    #[test]
    fn missing_one_topic_fails_the_whole_standard() {
        let full = bytecode_with(&[TokenStandard::Erc20]);
        let partial = full.replace(
            "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925",
            "8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b926",
        );
        assert_eq!(classify(&partial), ClassificationLabel::NonConforming);
    }

    #[test]
    fn erc1155_wins_over_erc721_and_erc20() {
        let bytecode = bytecode_with(&[
            TokenStandard::Erc20,
            TokenStandard::Erc721,
            TokenStandard::Erc1155,
        ]);
        assert_eq!(classify(&bytecode), ClassificationLabel::Erc1155);
    }

    #[test]
    fn erc721_wins_over_erc20() {
        let bytecode = bytecode_with(&[TokenStandard::Erc20, TokenStandard::Erc721]);
        assert_eq!(classify(&bytecode), ClassificationLabel::Erc721);
    }

    #[test]
    fn prefix_and_case_do_not_affect_the_outcome() {
        let bytecode = bytecode_with(&[TokenStandard::Erc20]);
        let bare = bytecode.trim_start_matches("0x").to_owned();
        let upper = format!("0X{}", bare.to_ascii_uppercase());

        assert_eq!(classify(&bare), ClassificationLabel::Erc20);
        assert_eq!(classify(&upper), ClassificationLabel::Erc20);
    }

    #[test]
    fn full_matches_reports_every_matching_standard_in_detection_order() {
        let bytecode = bytecode_with(&[TokenStandard::Erc20, TokenStandard::Erc721]);
        assert_eq!(
            full_matches(&bytecode),
            vec![TokenStandard::Erc721, TokenStandard::Erc20]
        );
        assert!(full_matches("0x6080").is_empty());
    }

    #[test]
    fn classify_strict_reports_overlaps_as_ambiguous() {
        let single = bytecode_with(&[TokenStandard::Erc20]);
        let double = bytecode_with(&[TokenStandard::Erc20, TokenStandard::Erc721]);

        assert_eq!(classify_strict(&single), ClassificationLabel::Erc20);
        assert_eq!(classify_strict(&double), ClassificationLabel::Ambiguous);
        assert_eq!(classify_strict("0x"), ClassificationLabel::NonConforming);
    }

    #[test]
    fn classify_never_returns_ambiguous() {
        let double = bytecode_with(&[TokenStandard::Erc20, TokenStandard::Erc721]);
        assert_eq!(classify(&double), ClassificationLabel::Erc721);
    }

    #[test]
    fn non_persisted_labels_map_to_no_standard() {
        assert_eq!(ClassificationLabel::NonConforming.standard(), None);
        assert_eq!(ClassificationLabel::Ambiguous.standard(), None);
        assert_eq!(
            ClassificationLabel::Erc1155.standard(),
            Some(TokenStandard::Erc1155)
        );
    }
}

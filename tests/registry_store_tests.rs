// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Registry persistence tests over a real filesystem root
//!
//! Exercises the on-disk artifact contract: canonical ordering regardless
//! of merge history, first-registration-wins metadata across store
//! instances, atomic replacement of partially written files, and the
//! aggregate snapshot view.

use std::collections::BTreeSet;
use std::path::Path;

use alloy_primitives::Address;
use mirrorscan::{Network, PageCursor, RegistryEntry, RegistryStore, TokenInfo, TokenStandard};
use tempfile::TempDir;

fn addr(low_byte: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = low_byte;
    Address::from(bytes)
}

fn store(root: &Path) -> RegistryStore {
    RegistryStore::new(root, Network::Testnet.as_str())
}

async fn registry_bytes(root: &Path, standard: TokenStandard) -> Vec<u8> {
    let path = root.join("testnet").join(standard.registry_file());
    tokio::fs::read(path).await.unwrap_or_default()
}

async fn registry_entries(root: &Path, standard: TokenStandard) -> Vec<RegistryEntry> {
    let bytes = registry_bytes(root, standard).await;
    serde_json::from_slice(&bytes).expect("registry file parses")
}

#[tokio::test]
async fn merge_history_does_not_affect_the_final_artifact() {
    let split = TempDir::new().unwrap();
    let merged = TempDir::new().unwrap();

    let split_store = store(split.path());
    split_store
        .merge(
            TokenStandard::Erc20,
            vec![RegistryEntry::new(addr(0x30)), RegistryEntry::new(addr(0x10))],
        )
        .await
        .unwrap();
    split_store
        .merge(
            TokenStandard::Erc20,
            vec![RegistryEntry::new(addr(0x20)), RegistryEntry::new(addr(0x10))],
        )
        .await
        .unwrap();

    store(merged.path())
        .merge(
            TokenStandard::Erc20,
            vec![
                RegistryEntry::new(addr(0x20)),
                RegistryEntry::new(addr(0x10)),
                RegistryEntry::new(addr(0x30)),
            ],
        )
        .await
        .unwrap();

    let split_bytes = registry_bytes(split.path(), TokenStandard::Erc20).await;
    let merged_bytes = registry_bytes(merged.path(), TokenStandard::Erc20).await;
    assert!(!split_bytes.is_empty());
    assert_eq!(split_bytes, merged_bytes);
}

#[tokio::test]
async fn interleaved_merges_keep_every_registry_sorted_and_unique() {
    let dir = TempDir::new().unwrap();
    let registry = store(dir.path());

    // Deterministic address stream with plenty of collisions.
    let mut state: u64 = 0x5eed;
    let mut drawn = Vec::new();
    for _ in 0..96 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        drawn.push(addr((state >> 32) as u8));
    }

    let mut expected: [BTreeSet<Address>; 3] = Default::default();
    for (chunk_index, chunk) in drawn.chunks(7).enumerate() {
        let standard = TokenStandard::ALL[chunk_index % 3];
        expected[chunk_index % 3].extend(chunk.iter().copied());
        registry
            .merge(standard, chunk.iter().copied().map(RegistryEntry::new).collect())
            .await
            .unwrap();
    }

    for (slot, standard) in TokenStandard::ALL.into_iter().enumerate() {
        let entries = registry_entries(dir.path(), standard).await;
        let addresses: Vec<Address> = entries.iter().map(|e| e.address).collect();
        let sorted: Vec<Address> = expected[slot].iter().copied().collect();
        assert_eq!(addresses, sorted);
        assert!(addresses.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[tokio::test]
async fn first_registration_wins_across_store_instances() {
    let dir = TempDir::new().unwrap();
    let original = TokenInfo {
        name: Some("Wrapped HBAR".into()),
        symbol: Some("WHBAR".into()),
        decimals: Some(8),
        total_supply: Some("1000000".into()),
    };

    let inserted = store(dir.path())
        .merge(
            TokenStandard::Erc20,
            vec![RegistryEntry::with_token_info(addr(0x42), original.clone())],
        )
        .await
        .unwrap();
    assert_eq!(inserted, 1);

    let rival = TokenInfo {
        name: Some("Impostor".into()),
        ..TokenInfo::default()
    };
    let inserted = store(dir.path())
        .merge(
            TokenStandard::Erc20,
            vec![RegistryEntry::with_token_info(addr(0x42), rival)],
        )
        .await
        .unwrap();
    assert_eq!(inserted, 0);

    let entries = registry_entries(dir.path(), TokenStandard::Erc20).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].token_info, Some(original));
}

#[tokio::test]
async fn stale_temp_files_from_a_crash_are_replaced() {
    let dir = TempDir::new().unwrap();
    let network_dir = dir.path().join("testnet");
    tokio::fs::create_dir_all(&network_dir).await.unwrap();
    tokio::fs::write(network_dir.join("erc-20.tmp"), b"half-written garbage")
        .await
        .unwrap();

    store(dir.path())
        .merge(TokenStandard::Erc20, vec![RegistryEntry::new(addr(0x01))])
        .await
        .unwrap();

    let mut dir_entries = tokio::fs::read_dir(&network_dir).await.unwrap();
    while let Some(entry) = dir_entries.next_entry().await.unwrap() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        assert!(name.ends_with(".json"), "unexpected leftover file {name}");
    }
    assert_eq!(registry_entries(dir.path(), TokenStandard::Erc20).await.len(), 1);
}

#[tokio::test]
async fn snapshot_aggregates_registries_and_cursor() {
    let dir = TempDir::new().unwrap();
    let registry = store(dir.path());

    for (offset, standard) in TokenStandard::ALL.into_iter().enumerate() {
        registry
            .merge(standard, vec![RegistryEntry::new(addr(offset as u8 + 1))])
            .await
            .unwrap();
    }
    registry
        .advance_cursor(Some(&PageCursor::new("page-7")))
        .await
        .unwrap();

    let snapshot = registry.load().await.unwrap();
    assert_eq!(snapshot.total_entries(), 3);
    for standard in TokenStandard::ALL {
        assert_eq!(snapshot.entries(standard).len(), 1);
    }
    assert_eq!(snapshot.cursor, Some(PageCursor::new("page-7")));

    registry.advance_cursor(None).await.unwrap();
    let snapshot = registry.load().await.unwrap();
    assert_eq!(snapshot.cursor, None);
}

#[tokio::test]
async fn registry_files_are_pretty_printed_camel_case_json() {
    let dir = TempDir::new().unwrap();
    let info = TokenInfo {
        name: Some("Wrapped HBAR".into()),
        symbol: Some("WHBAR".into()),
        decimals: Some(8),
        total_supply: Some("1000000".into()),
    };
    store(dir.path())
        .merge(
            TokenStandard::Erc20,
            vec![RegistryEntry::with_token_info(addr(0x42), info)],
        )
        .await
        .unwrap();

    let bytes = registry_bytes(dir.path(), TokenStandard::Erc20).await;
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("\"address\": \"0x"));
    assert!(text.contains("\"tokenInfo\""));
    assert!(text.contains("\"totalSupply\": \"1000000\""));
    assert!(text.lines().count() > 3);
}

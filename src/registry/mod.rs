// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Durable per-network token registries and the crawl resume cursor.
//!
//! The registry is a directory tree keyed by network:
//!
//! ```text
//! {root}/{network}/erc-20.json        sorted, deduplicated ERC-20 tokens
//! {root}/{network}/erc-721.json       sorted, deduplicated ERC-721 tokens
//! {root}/{network}/erc-1155.json      sorted, deduplicated ERC-1155 tokens
//! {root}/{network}/next-pointer.json  cursor of the next unprocessed page
//! ```
//!
//! Every update is written atomically (temp file plus rename), so readers
//! never observe a half-written registry and a crash leaves the previous
//! complete state in place. Merging is idempotent: re-running a crawl over
//! pages that were already processed inserts nothing and rewrites nothing.
//!
//! Registry files are published data, not a cache. A file that exists but
//! does not parse is reported as [`RegistryError::Corrupt`] instead of
//! being silently replaced.
//!
//! # Examples
//!
//! ```rust,ignore
//! use mirrorscan::{RegistryEntry, RegistryStore, TokenStandard};
//!
//! let store = RegistryStore::new("registry", "testnet");
//! let inserted = store
//!     .merge(TokenStandard::Erc20, vec![RegistryEntry::new(token_address)])
//!     .await?;
//! println!("{inserted} new tokens");
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::TokenStandard;
use crate::errors::RegistryError;
use crate::types::PageCursor;

pub mod entry;

pub use entry::{RegistryEntry, TokenInfo};

/// File holding the cursor of the next unprocessed listing page.
const CURSOR_FILE: &str = "next-pointer.json";

/// Serialized form of the resume cursor.
///
/// A file containing `{"cursor": null}` means the last crawl finished the
/// listing; a missing file means no crawl has run yet. Both resolve to
/// "start from the first page".
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CursorFile {
    cursor: Option<PageCursor>,
}

/// Everything the registry holds for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// ERC-20 registry entries, sorted by address.
    pub erc20: Vec<RegistryEntry>,
    /// ERC-721 registry entries, sorted by address.
    pub erc721: Vec<RegistryEntry>,
    /// ERC-1155 registry entries, sorted by address.
    pub erc1155: Vec<RegistryEntry>,
    /// Resume cursor, if a crawl has persisted one.
    pub cursor: Option<PageCursor>,
}

impl RegistrySnapshot {
    /// Entries for one standard.
    pub fn entries(&self, standard: TokenStandard) -> &[RegistryEntry] {
        match standard {
            TokenStandard::Erc20 => &self.erc20,
            TokenStandard::Erc721 => &self.erc721,
            TokenStandard::Erc1155 => &self.erc1155,
        }
    }

    /// Total entries across all standards.
    pub fn total_entries(&self) -> usize {
        self.erc20.len() + self.erc721.len() + self.erc1155.len()
    }
}

/// Owner of one network's registry directory.
///
/// All reads treat a missing file as empty state; all writes go through an
/// atomic temp-file-plus-rename. The store assumes it is the only writer
/// for its directory, which the single-engine crawl guarantees.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    root: PathBuf,
    network: String,
}

impl RegistryStore {
    /// Creates a store for `{root}/{network}`.
    ///
    /// No I/O happens here; directories are created lazily on first write.
    pub fn new(root: impl Into<PathBuf>, network: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            network: network.into(),
        }
    }

    /// Directory holding this network's registry files.
    pub fn network_dir(&self) -> PathBuf {
        self.root.join(&self.network)
    }

    fn entries_path(&self, standard: TokenStandard) -> PathBuf {
        self.network_dir().join(standard.registry_file())
    }

    fn cursor_path(&self) -> PathBuf {
        self.network_dir().join(CURSOR_FILE)
    }

    /// Loads one standard's entries; a missing file is an empty registry.
    pub async fn load_entries(
        &self,
        standard: TokenStandard,
    ) -> Result<Vec<RegistryEntry>, RegistryError> {
        self.read_json_or_default(&self.entries_path(standard)).await
    }

    /// Loads all registries and the cursor in one snapshot.
    pub async fn load(&self) -> Result<RegistrySnapshot, RegistryError> {
        Ok(RegistrySnapshot {
            erc20: self.load_entries(TokenStandard::Erc20).await?,
            erc721: self.load_entries(TokenStandard::Erc721).await?,
            erc1155: self.load_entries(TokenStandard::Erc1155).await?,
            cursor: self.cursor().await?,
        })
    }

    /// Merges newly classified entries into one standard's registry.
    ///
    /// Deduplication is by address and first-write-wins: entries already
    /// in the registry keep whatever metadata they have, and duplicates
    /// within `new_entries` keep their first occurrence. The merged file
    /// stays sorted by address ascending. Returns the number of entries
    /// actually inserted; when nothing is new the file is not rewritten,
    /// which keeps repeated crawls byte-for-byte idempotent.
    pub async fn merge(
        &self,
        standard: TokenStandard,
        new_entries: Vec<RegistryEntry>,
    ) -> Result<usize, RegistryError> {
        let existing = self.load_entries(standard).await?;

        let mut appended: Vec<RegistryEntry> = Vec::new();
        for entry in new_entries {
            let already_registered = existing
                .binary_search_by_key(&entry.address, |e| e.address)
                .is_ok();
            let duplicate_in_batch = appended.iter().any(|e| e.address == entry.address);
            if !already_registered && !duplicate_in_batch {
                appended.push(entry);
            }
        }

        let inserted = appended.len();
        if inserted == 0 {
            debug!(standard = %standard, "no new registry entries, skipping write");
            return Ok(0);
        }

        let mut merged = existing;
        merged.append(&mut appended);
        merged.sort_unstable_by_key(|entry| entry.address);

        let path = self.entries_path(standard);
        self.write_json_atomic(&path, &merged).await?;
        debug!(
            standard = %standard,
            inserted,
            total = merged.len(),
            "merged registry entries"
        );
        Ok(inserted)
    }

    /// Reads the resume cursor. `None` means either that no crawl has run
    /// or that the previous crawl completed the listing.
    pub async fn cursor(&self) -> Result<Option<PageCursor>, RegistryError> {
        let path = self.cursor_path();
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let file: CursorFile =
                    serde_json::from_slice(&bytes).map_err(|e| RegistryError::corrupt(&path, e))?;
                Ok(file.cursor)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RegistryError::io(&path, e)),
        }
    }

    /// Persists the cursor of the next unprocessed page.
    ///
    /// The engine calls this only after every entry from the page before
    /// it has been durably merged, so a crawl interrupted at any point
    /// resumes without losing discovered tokens.
    pub async fn advance_cursor(&self, cursor: Option<&PageCursor>) -> Result<(), RegistryError> {
        let file = CursorFile {
            cursor: cursor.cloned(),
        };
        self.write_json_atomic(&self.cursor_path(), &file).await?;
        debug!(cursor = ?file.cursor, "advanced resume cursor");
        Ok(())
    }

    async fn read_json_or_default<T>(&self, path: &Path) -> Result<T, RegistryError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| RegistryError::corrupt(path, e))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(RegistryError::io(path, e)),
        }
    }

    /// Serializes `value` and publishes it at `path` via temp file plus
    /// rename, creating the network directory on first use.
    async fn write_json_atomic<T: Serialize + Sync>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), RegistryError> {
        let json = serde_json::to_vec_pretty(value).map_err(RegistryError::serialize)?;

        let dir = self.network_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RegistryError::io(&dir, e))?;

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| RegistryError::io(&temp_path, e))?;
        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| RegistryError::io(path, e))?;
        Ok(())
    }
}

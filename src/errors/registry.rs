// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for registry persistence.
//!
//! Registry files are durable output, not a disposable cache: a file that
//! exists but cannot be read or parsed is an error the crawl must stop on,
//! never silently overwrite.

use std::path::{Path, PathBuf};

/// Errors that can occur while reading or writing registry files.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Filesystem I/O failed on a registry path.
    ///
    /// Covers reads, directory creation, temp file writes, and the final
    /// rename that publishes an update.
    #[error("Registry I/O failed for {path}: {source}")]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An existing registry file does not parse as the expected JSON shape.
    ///
    /// Deliberately not self-healing: a corrupt registry means previously
    /// published data is at risk, so the operator decides what to do.
    #[error("Registry file {path} is corrupt: {source}")]
    Corrupt {
        /// Path of the unparseable file
        path: PathBuf,
        /// Underlying JSON parse error
        #[source]
        source: serde_json::Error,
    },

    /// Registry contents could not be serialized for writing.
    #[error("Failed to serialize registry contents: {source}")]
    Serialize {
        /// Underlying JSON serialization error
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// Create an `Io` error for a path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a `Corrupt` error for a path.
    pub fn corrupt(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        RegistryError::Corrupt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a `Serialize` error.
    pub fn serialize(source: serde_json::Error) -> Self {
        RegistryError::Serialize { source }
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the crawl engine.

use super::{MirrorNodeError, RegistryError};

/// Fatal errors that halt a crawl.
///
/// Only two failure classes stop the engine: a page listing or detail fetch
/// that stays broken through every retry, and a registry write failure.
/// Everything softer (an individual token-info call failing, a contract
/// without bytecode) is degraded in place and logged, not raised.
///
/// The engine guarantees the persisted cursor still points at the failed
/// page when one of these is returned, so the next run retries exactly
/// where this one stopped.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// A mirror node request failed permanently.
    #[error("Mirror node failure: {0}")]
    MirrorNode(#[from] MirrorNodeError),

    /// Registry state could not be read or persisted.
    #[error("Registry failure: {0}")]
    Registry(#[from] RegistryError),
}

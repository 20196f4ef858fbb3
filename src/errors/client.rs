// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for mirror node communication.
//!
//! This module provides error types for the `client` module: HTTP transport
//! failures, upstream status rejections, malformed response bodies, and
//! retry exhaustion. The [`MirrorNodeError::is_transient`] predicate is what
//! the retry policy consults to decide whether an attempt is worth repeating.

use reqwest::StatusCode;

/// Maximum number of upstream body characters captured in an error.
const BODY_SNIPPET_LEN: usize = 200;

/// Errors that can occur while talking to a mirror node.
///
/// Variants split along the transient/permanent line: transport failures,
/// 5xx and 429 statuses, and malformed JSON bodies are transient and
/// eligible for retry; everything else is permanent and surfaces
/// immediately.
///
/// # Examples
///
/// ```rust,ignore
/// use mirrorscan::{MirrorNodeClient, MirrorNodeError};
///
/// match client.list_contracts_page(None).await {
///     Ok(page) => println!("Got {} contracts", page.records.len()),
///     Err(MirrorNodeError::RetriesExhausted { operation, attempts, .. }) => {
///         eprintln!("{operation} failed after {attempts} attempts");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MirrorNodeError {
    /// The underlying HTTP client could not be constructed.
    ///
    /// This occurs at startup, before any request is made, typically when
    /// the TLS backend cannot initialize.
    #[error("Failed to construct HTTP client: {source}")]
    ClientBuild {
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// A request URL could not be built from the base URL and a fragment.
    ///
    /// This indicates a malformed pagination cursor or base URL and is not
    /// retryable.
    #[error("Invalid mirror node URL fragment '{fragment}': {source}")]
    InvalidUrl {
        /// The offending relative URL fragment
        fragment: String,
        /// Underlying URL parse error
        #[source]
        source: url::ParseError,
    },

    /// The HTTP exchange itself failed: connection refused, timeout, or
    /// the connection dropped mid-body.
    #[error("HTTP transport failure during {operation}: {source}")]
    Transport {
        /// Logical operation being performed
        operation: &'static str,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The mirror node answered with a non-2xx status.
    ///
    /// 5xx and 429 are transient (overload, maintenance, throttling);
    /// other 4xx are permanent for the request that provoked them.
    #[error("Mirror node returned HTTP {status} during {operation}: {body}")]
    UpstreamStatus {
        /// Logical operation being performed
        operation: &'static str,
        /// HTTP status code returned
        status: StatusCode,
        /// Truncated response body, for diagnostics
        body: String,
    },

    /// The response body was not the JSON document the endpoint promises.
    ///
    /// Treated as transient: in practice this is a truncated or garbled
    /// body from a proxy or an overloaded upstream.
    #[error("Malformed mirror node response during {operation}: {source}")]
    MalformedResponse {
        /// Logical operation being performed
        operation: &'static str,
        /// Underlying JSON parse error
        #[source]
        source: serde_json::Error,
    },

    /// A read-only call result could not be ABI-decoded as the expected
    /// return type.
    #[error("Failed to decode call result: {details}")]
    AbiDecode {
        /// Details about why the decode failed
        details: String,
    },

    /// A transient failure persisted through every allowed retry.
    ///
    /// `source` is the error from the final attempt.
    #[error("Retries exhausted after {attempts} attempts during {operation}: {source}")]
    RetriesExhausted {
        /// Logical operation being performed
        operation: &'static str,
        /// Total attempts made, including the first
        attempts: u32,
        /// Error from the final attempt
        #[source]
        source: Box<MirrorNodeError>,
    },
}

impl MirrorNodeError {
    /// Create a `ClientBuild` error.
    pub fn client_build(source: reqwest::Error) -> Self {
        MirrorNodeError::ClientBuild { source }
    }

    /// Create an `InvalidUrl` error for a URL fragment.
    pub fn invalid_url(fragment: impl Into<String>, source: url::ParseError) -> Self {
        MirrorNodeError::InvalidUrl {
            fragment: fragment.into(),
            source,
        }
    }

    /// Create a `Transport` error for an operation.
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        MirrorNodeError::Transport { operation, source }
    }

    /// Create an `UpstreamStatus` error, truncating the body for logs.
    pub fn upstream_status(operation: &'static str, status: StatusCode, body: &str) -> Self {
        let mut snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
        if body.chars().count() > BODY_SNIPPET_LEN {
            snippet.push_str("...");
        }
        MirrorNodeError::UpstreamStatus {
            operation,
            status,
            body: snippet,
        }
    }

    /// Create a `MalformedResponse` error.
    pub fn malformed_response(operation: &'static str, source: serde_json::Error) -> Self {
        MirrorNodeError::MalformedResponse { operation, source }
    }

    /// Create an `AbiDecode` error with details.
    pub fn abi_decode(details: impl Into<String>) -> Self {
        MirrorNodeError::AbiDecode {
            details: details.into(),
        }
    }

    /// Create a `RetriesExhausted` error wrapping the final attempt's error.
    pub fn retries_exhausted(operation: &'static str, attempts: u32, source: MirrorNodeError) -> Self {
        MirrorNodeError::RetriesExhausted {
            operation,
            attempts,
            source: Box::new(source),
        }
    }

    /// True when retrying the same request could plausibly succeed.
    ///
    /// Transport failures, 5xx statuses, 429 throttling, and malformed
    /// JSON bodies qualify. URL construction, ABI decoding, other 4xx
    /// statuses, and exhaustion itself do not.
    pub fn is_transient(&self) -> bool {
        match self {
            MirrorNodeError::Transport { .. } | MirrorNodeError::MalformedResponse { .. } => true,
            MirrorNodeError::UpstreamStatus { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            MirrorNodeError::ClientBuild { .. }
            | MirrorNodeError::InvalidUrl { .. }
            | MirrorNodeError::AbiDecode { .. }
            | MirrorNodeError::RetriesExhausted { .. } => false,
        }
    }

    /// True when the mirror node rejected the request itself with a
    /// permanent 4xx status.
    ///
    /// For read-only contract calls this is the signal that the target
    /// contract cannot serve the call (reverted, not found, not callable),
    /// which callers treat as "value unavailable" rather than a failure.
    pub fn is_upstream_rejection(&self) -> bool {
        match self {
            MirrorNodeError::UpstreamStatus { status, .. } => {
                status.is_client_error() && *status != StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

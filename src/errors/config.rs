// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration loading and validation.

/// Errors raised while assembling a scan configuration.
///
/// Configuration is validated once at startup; every variant here is fatal
/// for the run, since a bad base URL or starting point would otherwise
/// produce confusing downstream failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The mirror node base URL could not be parsed or uses an
    /// unsupported scheme.
    #[error("Invalid mirror node base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending URL text
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The network name is not one of the supported networks.
    #[error("Unknown network '{name}', expected mainnet, testnet, or previewnet")]
    UnknownNetwork {
        /// The unrecognized network name
        name: String,
    },

    /// A starting point string is neither an EVM address, a shard.realm.num
    /// contract ID, nor a listing URL fragment.
    #[error("Invalid starting point '{value}', expected an EVM address, a contract ID, or a listing URL fragment")]
    InvalidStartingPoint {
        /// The unrecognized starting point text
        value: String,
    },

    /// An environment variable held a value that does not parse.
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidEnvValue {
        /// Environment variable name
        variable: String,
        /// The offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Create an `InvalidBaseUrl` error.
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an `UnknownNetwork` error.
    pub fn unknown_network(name: impl Into<String>) -> Self {
        ConfigError::UnknownNetwork { name: name.into() }
    }

    /// Create an `InvalidStartingPoint` error.
    pub fn invalid_starting_point(value: impl Into<String>) -> Self {
        ConfigError::InvalidStartingPoint {
            value: value.into(),
        }
    }

    /// Create an `InvalidEnvValue` error.
    pub fn invalid_env_value(
        variable: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidEnvValue {
            variable: variable.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

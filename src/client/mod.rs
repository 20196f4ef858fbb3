// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for Hedera-style mirror node REST APIs.
//!
//! The mirror node exposes the network's contract universe over three
//! endpoints the crawl consumes:
//!
//! - `GET /api/v1/contracts` - paginated contract listing, ascending by
//!   contract ID
//! - `GET /api/v1/contracts/{address}` - per-contract detail, including
//!   deployed runtime bytecode
//! - `POST /api/v1/contracts/call` - eth_call-style read-only execution,
//!   used for token-info enrichment
//!
//! [`MirrorNodeClient`] wraps these with per-request timeouts and the
//! bounded [`RetryPolicy`]. The crawl engine depends on the
//! [`MirrorSource`] trait rather than the concrete client, so tests drive
//! the engine with an in-memory source instead of a network.
//!
//! # Examples
//!
//! ```rust,ignore
//! use mirrorscan::{MirrorNodeClient, MirrorSource, Network, ScanConfig};
//!
//! let config = ScanConfig::for_network(Network::Testnet)?;
//! let client = MirrorNodeClient::new(&config)?;
//!
//! let first_page = client.list_contracts_page(None).await?;
//! println!(
//!     "{} contracts, next cursor {:?}",
//!     first_page.records.len(),
//!     first_page.next_cursor
//! );
//! ```

use std::sync::Arc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, Address, U256};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::{ReturnType, TokenInfoCall};
use crate::config::{ScanConfig, StartingPoint};
use crate::errors::MirrorNodeError;
use crate::types::{ContractPage, ContractRecord, PageCursor};

pub mod retry;
pub(crate) mod wire;

pub use retry::RetryPolicy;

use wire::{
    ContractCallRequest, ContractCallResponse, ContractDetailResponse, ContractsListResponse,
};

const CONTRACTS_PATH: &str = "/api/v1/contracts";
const CONTRACT_CALL_PATH: &str = "/api/v1/contracts/call";

const OP_LIST_CONTRACTS: &str = "list-contracts";
const OP_CONTRACT_DETAIL: &str = "contract-detail";
const OP_CONTRACT_CALL: &str = "contract-call";

/// A decoded single-value result of a read-only contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Solidity `string`.
    Text(String),
    /// Solidity `uint8`.
    Uint8(u8),
    /// Solidity `uint256`.
    Uint256(U256),
}

/// Source of contract pages and read-only call results.
///
/// This is the seam between the crawl engine and the network: production
/// code uses [`MirrorNodeClient`], tests substitute an in-memory
/// implementation with scripted pages and failures.
#[async_trait]
pub trait MirrorSource: Send + Sync {
    /// Fetches one listing page with per-contract runtime bytecode.
    ///
    /// `cursor == None` requests the first page. Implementations resolve
    /// each listed contract's bytecode before returning, so a returned
    /// page is complete and ready for classification.
    async fn list_contracts_page(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ContractPage, MirrorNodeError>;

    /// Executes a zero-argument read-only call against a contract.
    ///
    /// `Ok(None)` means the contract cannot serve this call: it reverted,
    /// returned no data, or returned data that does not decode as the
    /// expected type. `Err` is reserved for the request itself failing
    /// past the retry budget.
    async fn call_read_only(
        &self,
        address: Address,
        call: TokenInfoCall,
    ) -> Result<Option<AbiValue>, MirrorNodeError>;
}

#[async_trait]
impl<S: MirrorSource + ?Sized> MirrorSource for Arc<S> {
    async fn list_contracts_page(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ContractPage, MirrorNodeError> {
        self.as_ref().list_contracts_page(cursor).await
    }

    async fn call_read_only(
        &self,
        address: Address,
        call: TokenInfoCall,
    ) -> Result<Option<AbiValue>, MirrorNodeError> {
        self.as_ref().call_read_only(address, call).await
    }
}

/// HTTP client bound to one mirror node base URL.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct MirrorNodeClient {
    http: Client,
    base_url: Url,
    page_limit: usize,
    retry: RetryPolicy,
}

impl MirrorNodeClient {
    /// Builds a client from a validated configuration.
    pub fn new(config: &ScanConfig) -> Result<Self, MirrorNodeError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("mirrorscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MirrorNodeError::client_build)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            page_limit: config.page_limit,
            retry: config.retry.clone(),
        })
    }

    /// Resolves the absolute URL for a listing page.
    fn page_url(&self, cursor: Option<&PageCursor>) -> Result<Url, MirrorNodeError> {
        let fragment = match cursor {
            Some(cursor) => cursor.as_str().to_owned(),
            None => format!("{CONTRACTS_PATH}?limit={}&order=asc", self.page_limit),
        };
        self.base_url
            .join(&fragment)
            .map_err(|e| MirrorNodeError::invalid_url(fragment, e))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> Result<T, MirrorNodeError> {
        self.retry
            .execute(operation, || {
                let url = url.clone();
                async move { self.get_json_once(operation, url).await }
            })
            .await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> Result<T, MirrorNodeError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| MirrorNodeError::transport(operation, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MirrorNodeError::transport(operation, e))?;

        if !status.is_success() {
            return Err(MirrorNodeError::upstream_status(operation, status, &body));
        }
        serde_json::from_str(&body).map_err(|e| MirrorNodeError::malformed_response(operation, e))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
        request: &ContractCallRequest,
    ) -> Result<T, MirrorNodeError> {
        self.retry
            .execute(operation, || {
                let url = url.clone();
                async move { self.post_json_once(operation, url, request).await }
            })
            .await
    }

    async fn post_json_once<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
        request: &ContractCallRequest,
    ) -> Result<T, MirrorNodeError> {
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| MirrorNodeError::transport(operation, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MirrorNodeError::transport(operation, e))?;

        if !status.is_success() {
            return Err(MirrorNodeError::upstream_status(operation, status, &body));
        }
        serde_json::from_str(&body).map_err(|e| MirrorNodeError::malformed_response(operation, e))
    }
}

#[async_trait]
impl MirrorSource for MirrorNodeClient {
    async fn list_contracts_page(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ContractPage, MirrorNodeError> {
        let url = self.page_url(cursor)?;
        debug!(url = %url, "fetching contract listing page");
        let listing: ContractsListResponse = self.get_json(OP_LIST_CONTRACTS, url).await?;

        let mut records = Vec::with_capacity(listing.contracts.len());
        for item in &listing.contracts {
            let Some(address) = item.parsed_evm_address() else {
                warn!(
                    contract_id = ?item.contract_id,
                    "listed contract has no usable EVM address, skipping"
                );
                continue;
            };

            let detail_fragment = format!("{CONTRACTS_PATH}/{address:#x}");
            let detail_url = self
                .base_url
                .join(&detail_fragment)
                .map_err(|e| MirrorNodeError::invalid_url(detail_fragment.clone(), e))?;
            let detail: ContractDetailResponse =
                self.get_json(OP_CONTRACT_DETAIL, detail_url).await?;

            records.push(ContractRecord {
                address,
                runtime_bytecode: detail.runtime_bytecode.unwrap_or_default(),
                first_seen_cursor: cursor.cloned(),
            });
        }

        Ok(ContractPage {
            records,
            next_cursor: listing.links.next.map(PageCursor::from),
        })
    }

    async fn call_read_only(
        &self,
        address: Address,
        call: TokenInfoCall,
    ) -> Result<Option<AbiValue>, MirrorNodeError> {
        let url = self
            .base_url
            .join(CONTRACT_CALL_PATH)
            .map_err(|e| MirrorNodeError::invalid_url(CONTRACT_CALL_PATH, e))?;
        let request = ContractCallRequest::read_only(address, call.selector);

        let response: ContractCallResponse =
            match self.post_json(OP_CONTRACT_CALL, url, &request).await {
                Ok(response) => response,
                Err(error) if error.is_upstream_rejection() => {
                    debug!(
                        address = %address,
                        call = call.text,
                        error = %error,
                        "read-only call rejected by mirror node"
                    );
                    return Ok(None);
                }
                Err(error) => return Err(error),
            };

        let Some(payload) = response.result else {
            return Ok(None);
        };
        let trimmed = payload.trim();
        if trimmed.is_empty() || trimmed == "0x" {
            return Ok(None);
        }

        match decode_return(call.return_type, trimmed) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                debug!(
                    address = %address,
                    call = call.text,
                    error = %error,
                    "call result failed to decode, treating as unavailable"
                );
                Ok(None)
            }
        }
    }
}

/// Decodes a call result body as a single ABI value of the expected type.
pub(crate) fn decode_return(
    return_type: ReturnType,
    payload: &str,
) -> Result<AbiValue, MirrorNodeError> {
    let bytes = hex::decode(payload)
        .map_err(|e| MirrorNodeError::abi_decode(format!("result is not valid hex: {e}")))?;

    let sol_type = match return_type {
        ReturnType::String => DynSolType::String,
        ReturnType::Uint8 => DynSolType::Uint(8),
        ReturnType::Uint256 => DynSolType::Uint(256),
    };
    let value = sol_type
        .abi_decode(&bytes)
        .map_err(|e| MirrorNodeError::abi_decode(e.to_string()))?;

    match (return_type, value) {
        (ReturnType::String, DynSolValue::String(text)) => Ok(AbiValue::Text(text)),
        (ReturnType::Uint8, DynSolValue::Uint(value, _)) => u8::try_from(value)
            .map(AbiValue::Uint8)
            .map_err(|_| MirrorNodeError::abi_decode("uint8 value out of range")),
        (ReturnType::Uint256, DynSolValue::Uint(value, _)) => Ok(AbiValue::Uint256(value)),
        (_, other) => Err(MirrorNodeError::abi_decode(format!(
            "unexpected decoded shape: {other:?}"
        ))),
    }
}

/// Synthesizes the first-page cursor for an explicit starting point.
///
/// Addresses and contract IDs become a `contract.id=gte:` filter on the
/// listing endpoint, preserving ascending order; a raw fragment is trusted
/// verbatim (it already encodes its own limit and filters).
pub fn starting_cursor(start: &StartingPoint, page_limit: usize) -> PageCursor {
    let filter = match start {
        StartingPoint::NextFragment(fragment) => return PageCursor::new(fragment.clone()),
        StartingPoint::EvmAddress(address) => format!("contract.id=gte:{address:#x}"),
        StartingPoint::ContractId(id) => format!("contract.id=gte:{id}"),
    };
    PageCursor::new(format!(
        "{CONTRACTS_PATH}?limit={page_limit}&order=asc&{filter}"
    ))
}

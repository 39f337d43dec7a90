// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! # View-call executor
//!
//! The single point where the bridge touches the node. [`ViewCaller`] issues
//! one unauthenticated read call against a contract and hands back the raw
//! reply bytes. It never retries and imposes no deadline of its own; any
//! timeout belongs to the transport underneath.
//!
//! [`RpcClient`] implements the trait over the node's JSON-RPC `eth_call`.
//! The endpoint is expected to be local, or at least a trusted channel: an
//! Opera RPC interface must never be exposed to unrestricted access.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use opera_bridge_core::ContractAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Errors raised while talking to the node.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TransportError {
    /// The node could not be reached or the request could not be sent.
    #[error("Node request failed: {0}")]
    Request(String),
    /// The node answered with a non-success HTTP status.
    #[error("Node answered with HTTP status {0}")]
    Status(u16),
    /// The node rejected the call.
    #[error("Call rejected by node ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },
    /// The node reply could not be interpreted.
    #[error("Malformed node response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Request(err.to_string()),
        }
    }
}

/// Read-only access to contract view-functions.
#[async_trait]
pub trait ViewCaller: Send + Sync + Debug + 'static {
    /// Calls `contract` with the opaque `payload` (selector and arguments)
    /// and returns the reply bytes, which may be empty.
    async fn call(
        &self,
        contract: &ContractAddress,
        payload: &[u8],
    ) -> Result<Vec<u8>, TransportError>;
}

/// JSON-RPC client issuing `eth_call` requests against the latest block.
#[derive(Debug)]
pub struct RpcClient {
    uri: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client for the node at `uri`.
    ///
    /// `timeout` bounds each HTTP request; `None` leaves requests unbounded.
    pub fn new(
        uri: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            uri: uri.into(),
            client: builder.build()?,
            next_id: AtomicU64::new(1),
        })
    }

    /// The node endpoint.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[async_trait]
impl ViewCaller for RpcClient {
    async fn call(
        &self,
        contract: &ContractAddress,
        payload: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = CallRequest::new(id, contract, payload);
        trace!(id, %contract, selector = %request.selector(), "eth_call");

        let response = self
            .client
            .post(&self.uri)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let reply: CallResponse = response
            .json()
            .await
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
        reply.into_bytes()
    }
}

#[derive(Debug, Serialize)]
struct CallRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallMessage, &'static str),
}

#[derive(Debug, Serialize)]
struct CallMessage {
    from: ContractAddress,
    to: ContractAddress,
    data: String,
}

impl CallRequest {
    fn new(id: u64, contract: &ContractAddress, payload: &[u8]) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: "eth_call",
            params: (
                CallMessage {
                    from: ContractAddress::ZERO,
                    to: *contract,
                    data: format!("0x{}", hex::encode(payload)),
                },
                "latest",
            ),
        }
    }

    fn selector(&self) -> &str {
        let data = &self.params.0.data;
        data.get(..10).unwrap_or(data)
    }
}

#[derive(Debug, Deserialize)]
struct CallResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl CallResponse {
    fn into_bytes(self) -> Result<Vec<u8>, TransportError> {
        if let Some(error) = self.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = self.result.ok_or_else(|| {
            TransportError::MalformedResponse(
                "neither result nor error present".into(),
            )
        })?;
        let digits = result.strip_prefix("0x").unwrap_or(&result);
        hex::decode(digits).map_err(|e| {
            TransportError::MalformedResponse(format!(
                "result is not hex: {e}"
            ))
        })
    }
}

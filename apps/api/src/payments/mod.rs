//! On-chain payment check against a public EVM JSON-RPC endpoint.
//!
//! This is a stub gate: it only looks at the recipient and the amount of a
//! mined transaction. Any failure along the way reads as "not paid".

pub mod handlers;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Minimum payment: 0.01 of the native token, in wei.
pub const MIN_PAYMENT_WEI: u128 = 10_000_000_000_000_000;

const RPC_TIMEOUT: Duration = Duration::from_secs(2);

#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    /// True only when the transaction is mined, pays the expected recipient,
    /// and carries at least `MIN_PAYMENT_WEI`.
    async fn verify(&self, tx_hash: &str) -> bool;
}

/// The fields of `eth_getTransactionByHash` this check reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub block_number: Option<String>,
    pub to: Option<String>,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<RpcTransaction>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: [&'a str; 1],
}

pub struct RpcPaymentVerifier {
    client: Client,
    rpc_url: String,
    recipient: String,
}

impl RpcPaymentVerifier {
    pub fn new(rpc_url: String, recipient: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(RPC_TIMEOUT).build()?,
            rpc_url,
            recipient,
        })
    }

    async fn fetch_transaction(&self, tx_hash: &str) -> Result<Option<RpcTransaction>> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_getTransactionByHash",
            params: [tx_hash],
        };
        let response: RpcResponse = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .context("rpc request failed")?
            .error_for_status()?
            .json()
            .await
            .context("rpc response was not JSON-RPC")?;

        if let Some(err) = response.error {
            bail!("rpc error: {}", err.message);
        }
        Ok(response.result)
    }
}

#[async_trait]
impl PaymentVerifier for RpcPaymentVerifier {
    async fn verify(&self, tx_hash: &str) -> bool {
        match self.fetch_transaction(tx_hash).await {
            Ok(Some(tx)) => evaluate_transaction(&tx, &self.recipient),
            Ok(None) => {
                info!(tx_hash, "transaction not found");
                false
            }
            Err(e) => {
                warn!(tx_hash, "payment lookup failed: {e:#}");
                false
            }
        }
    }
}

/// Pure decision on an already-fetched transaction.
pub fn evaluate_transaction(tx: &RpcTransaction, recipient: &str) -> bool {
    if tx.block_number.is_none() {
        return false; // pending
    }
    let Some(to) = tx.to.as_deref() else {
        return false; // contract creation
    };
    if !to.eq_ignore_ascii_case(recipient) {
        return false;
    }
    matches!(parse_quantity(&tx.value), Some(value) if value >= MIN_PAYMENT_WEI)
}

/// Parses a JSON-RPC hex quantity such as `0x2386f26fc10000`.
fn parse_quantity(hex: &str) -> Option<u128> {
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Body accepted by `POST /api/verify-payment`.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(rename = "txHash", default)]
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "0xAbCdEf0000000000000000000000000000000001";

    fn tx(block: Option<&str>, to: Option<&str>, value: &str) -> RpcTransaction {
        RpcTransaction {
            block_number: block.map(str::to_string),
            to: to.map(str::to_string),
            value: value.to_string(),
        }
    }

    #[test]
    fn exact_minimum_to_the_recipient_passes() {
        // 0x2386f26fc10000 == 10^16
        let t = tx(Some("0x10"), Some(ADMIN), "0x2386f26fc10000");
        assert!(evaluate_transaction(&t, ADMIN));
    }

    #[test]
    fn recipient_comparison_ignores_case() {
        let t = tx(Some("0x10"), Some(&ADMIN.to_lowercase()), "0x2386f26fc10000");
        assert!(evaluate_transaction(&t, ADMIN));
    }

    #[test]
    fn pending_transaction_fails() {
        let t = tx(None, Some(ADMIN), "0xde0b6b3a7640000");
        assert!(!evaluate_transaction(&t, ADMIN));
    }

    #[test]
    fn wrong_recipient_fails() {
        let t = tx(
            Some("0x10"),
            Some("0x0000000000000000000000000000000000000002"),
            "0xde0b6b3a7640000",
        );
        assert!(!evaluate_transaction(&t, ADMIN));
    }

    #[test]
    fn contract_creation_fails() {
        let t = tx(Some("0x10"), None, "0xde0b6b3a7640000");
        assert!(!evaluate_transaction(&t, ADMIN));
    }

    #[test]
    fn one_wei_short_fails() {
        let t = tx(Some("0x10"), Some(ADMIN), "0x2386f26fc0ffff");
        assert!(!evaluate_transaction(&t, ADMIN));
    }

    #[test]
    fn malformed_value_fails() {
        assert!(!evaluate_transaction(&tx(Some("0x1"), Some(ADMIN), "lots"), ADMIN));
        assert!(!evaluate_transaction(&tx(Some("0x1"), Some(ADMIN), "0x"), ADMIN));
    }

    #[test]
    fn rpc_transaction_decodes_from_node_json() {
        let raw = r#"{"blockNumber":"0x1b4","to":"0xabc","value":"0x0","hash":"0x1","from":"0x2"}"#;
        let t: RpcTransaction = serde_json::from_str(raw).unwrap();
        assert_eq!(t.block_number.as_deref(), Some("0x1b4"));
        assert_eq!(t.to.as_deref(), Some("0xabc"));

        let pending = r#"{"blockNumber":null,"to":"0xabc","value":"0x0"}"#;
        let t: RpcTransaction = serde_json::from_str(pending).unwrap();
        assert!(t.block_number.is_none());
    }

    #[tokio::test]
    async fn unreachable_rpc_reads_as_unpaid() {
        let verifier =
            RpcPaymentVerifier::new("http://127.0.0.1:9".to_string(), ADMIN.to_string()).unwrap();
        assert!(!verifier.verify("0xdeadbeef").await);
    }
}

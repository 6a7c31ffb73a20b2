//! Wave Portal Contract Surface
//!
//! The fixed call interface of the deployed wave portal contract, spoken
//! through the injected provider: ABI-encoded `eth_call` reads, an
//! `eth_sendTransaction` write with a receipt wait, and a log filter for
//! the `NewWave` event.
//!
//! The ABI codec is `alloy_sol_types::sol!`; raw JSON-RPC values cross the
//! provider boundary as `serde_json::Value` and are decoded here.

use alloy_primitives::{hex, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use gloo_timers::future::TimeoutFuture;
use serde_json::{json, Value};
use thiserror::Error;

use crate::services::provider::{self, ProviderError};
use crate::utils::constants::{CONTRACT_ADDRESS, RECEIPT_POLL_INTERVAL_MS, WAVE_GAS_LIMIT};
use shared::Wave;

mod abi {
    alloy_sol_types::sol! {
        /// Storage shape of one wave, as returned by `getAllWaves`.
        #[derive(Debug, PartialEq, Eq)]
        struct WaveRecord {
            address waver;
            uint256 timestamp;
            string message;
        }

        function wave(string message) external;
        function getAllWaves() external view returns (WaveRecord[] memory);
        function getTotalWaves() external view returns (uint256);

        #[derive(Debug, PartialEq, Eq)]
        event NewWave(address indexed from, uint256 timestamp, string message);
    }
}

/// Failures from the contract surface.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("abi error: {0}")]
    Abi(String),
    #[error("unexpected rpc payload: {0}")]
    Rpc(String),
}

fn abi_err(err: alloy_sol_types::Error) -> PortalError {
    PortalError::Abi(err.to_string())
}

/// Total number of waves recorded by the contract.
pub async fn total_waves() -> Result<u64, PortalError> {
    let data = call(abi::getTotalWavesCall {}.abi_encode()).await?;
    let count = abi::getTotalWavesCall::abi_decode_returns(&data).map_err(abi_err)?;
    u64::try_from(count).map_err(|_| PortalError::Abi("wave count exceeds u64".to_string()))
}

/// Every wave the contract has stored, in contract (insertion) order.
pub async fn all_waves() -> Result<Vec<Wave>, PortalError> {
    let data = call(abi::getAllWavesCall {}.abi_encode()).await?;
    let records = abi::getAllWavesCall::abi_decode_returns(&data).map_err(abi_err)?;
    Ok(records
        .into_iter()
        .map(|record| {
            Wave::from_contract(
                record.waver.to_string(),
                unix_seconds(record.timestamp),
                record.message,
            )
        })
        .collect())
}

/// Submit a wave carrying `message`, paid from `from`, with the fixed gas
/// ceiling. Returns the transaction hash; the wallet does the signing.
pub async fn send_wave(from: &str, message: &str) -> Result<String, PortalError> {
    let data = abi::waveCall {
        message: message.to_owned(),
    }
    .abi_encode();
    let params = json!([{
        "from": from,
        "to": CONTRACT_ADDRESS.to_string(),
        "data": hex::encode_prefixed(&data),
        "gas": format!("{WAVE_GAS_LIMIT:#x}"),
    }]);

    let value = provider::request("eth_sendTransaction", params).await?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| PortalError::Rpc(format!("eth_sendTransaction returned {value}")))
}

/// Block until the transaction has a receipt. The receipt stays `null`
/// until the network mines the transaction; there is no timeout beyond
/// what the provider itself imposes.
pub async fn wait_mined(tx_hash: &str) -> Result<(), PortalError> {
    loop {
        let receipt = provider::request("eth_getTransactionReceipt", json!([tx_hash])).await?;
        if !receipt.is_null() {
            let status = receipt.get("status").and_then(Value::as_str);
            if status == Some("0x0") {
                return Err(PortalError::Rpc(format!("transaction {tx_hash} reverted")));
            }
            return Ok(());
        }
        TimeoutFuture::new(RECEIPT_POLL_INTERVAL_MS).await;
    }
}

/// A provider-side log filter scoped to the contract's `NewWave` event.
///
/// Install at activation, poll while active, uninstall at deactivation.
/// Dropping without [`NewWaveFilter::uninstall`] leaks the filter on the
/// provider side.
pub struct NewWaveFilter {
    id: String,
}

impl NewWaveFilter {
    /// Install a filter for `NewWave` logs emitted from now on.
    pub async fn install() -> Result<Self, PortalError> {
        let params = json!([{
            "address": CONTRACT_ADDRESS.to_string(),
            "topics": [abi::NewWave::SIGNATURE_HASH.to_string()],
            "fromBlock": "latest",
        }]);
        let value = provider::request("eth_newFilter", params).await?;
        let id = value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| PortalError::Rpc(format!("eth_newFilter returned {value}")))?;
        Ok(Self { id })
    }

    /// Logs accumulated since the previous poll, decoded into waves.
    /// Undecodable logs are skipped with a warning rather than failing
    /// the whole batch.
    pub async fn poll(&self) -> Result<Vec<Wave>, PortalError> {
        let value = provider::request("eth_getFilterChanges", json!([self.id])).await?;
        let logs = value
            .as_array()
            .ok_or_else(|| PortalError::Rpc(format!("eth_getFilterChanges returned {value}")))?;

        let mut waves = Vec::new();
        for log in logs {
            match decode_new_wave(log) {
                Ok(wave) => waves.push(wave),
                Err(err) => log::warn!("skipping undecodable NewWave log: {err}"),
            }
        }
        Ok(waves)
    }

    /// Release the provider-side filter.
    pub async fn uninstall(self) {
        if let Err(err) = provider::request("eth_uninstallFilter", json!([self.id])).await {
            log::warn!("failed to uninstall NewWave filter: {err}");
        }
    }
}

/// Decode one raw RPC log object into a [`Wave`].
fn decode_new_wave(log: &Value) -> Result<Wave, PortalError> {
    let topics = log
        .get("topics")
        .and_then(Value::as_array)
        .ok_or_else(|| PortalError::Rpc("log without topics".to_string()))?;
    let topics = topics
        .iter()
        .map(|topic| topic.as_str().and_then(|s| s.parse::<B256>().ok()))
        .collect::<Option<Vec<B256>>>()
        .ok_or_else(|| PortalError::Rpc("malformed log topic".to_string()))?;

    let data = log.get("data").and_then(Value::as_str).unwrap_or("0x");
    let data = hex::decode(data).map_err(|err| PortalError::Rpc(err.to_string()))?;

    let event = abi::NewWave::decode_raw_log(topics, &data).map_err(abi_err)?;
    Ok(Wave::from_contract(
        event.from.to_string(),
        unix_seconds(event.timestamp),
        event.message,
    ))
}

async fn call(data: Vec<u8>) -> Result<Vec<u8>, PortalError> {
    let params = json!([{
        "to": CONTRACT_ADDRESS.to_string(),
        "data": hex::encode_prefixed(&data),
    }, "latest"]);

    let value = provider::request("eth_call", params).await?;
    let output = value
        .as_str()
        .ok_or_else(|| PortalError::Rpc(format!("eth_call returned {value}")))?;
    hex::decode(output).map_err(|err| PortalError::Rpc(err.to_string()))
}

/// Block timestamps are uint256 on the wire but fit in i64 seconds for any
/// realistic chain; clamp rather than fail on absurd values.
fn unix_seconds(timestamp: U256) -> i64 {
    i64::try_from(timestamp).unwrap_or(i64::MAX)
}

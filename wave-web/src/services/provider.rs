//! Injected Ethereum Provider Interop via wasm-bindgen
//!
//! JavaScript interop for the EIP-1193 provider object that wallet
//! extensions (MetaMask and friends) inject as `window.ethereum`. The
//! provider exposes a single `request({ method, params })` entry point;
//! everything the app does on chain goes through it.
//!
//! Absence of the injected object is a first-class condition
//! ([`ProviderError::Missing`]), not a crash.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::prelude::*;

// ============================================================================
// PROVIDER DETECTION AND REQUEST DISPATCH (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function hasEthereumProvider() {
    return typeof window.ethereum !== 'undefined' && window.ethereum !== null;
}

export async function ethereumRequest(payload) {
    if (typeof window.ethereum === 'undefined' || window.ethereum === null) {
        throw new Error('no injected ethereum provider');
    }
    return await window.ethereum.request(payload);
}
")]
extern "C" {
    /// Check whether a wallet extension has injected `window.ethereum`
    fn hasEthereumProvider() -> bool;

    /// Forward an EIP-1193 `request` payload to the injected provider
    #[wasm_bindgen(catch)]
    async fn ethereumRequest(payload: JsValue) -> Result<JsValue, JsValue>;
}

/// Failures at the provider boundary.
///
/// Only [`ProviderError::Missing`] is ever surfaced to the user; the rest
/// are logged at the call site and the affected state update is skipped.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("no injected wallet provider")]
    Missing,
    #[error("request rejected in the wallet: {0}")]
    Rejected(String),
    #[error("provider call failed: {0}")]
    Call(String),
}

/// EIP-1193 request payload, serialized to a plain `{ method, params }`
/// object for `window.ethereum.request`.
#[derive(Serialize)]
struct RpcPayload<'a> {
    method: &'a str,
    params: &'a Value,
}

/// Whether an injected provider is present at all.
pub fn is_available() -> bool {
    hasEthereumProvider()
}

/// Dispatch one JSON-RPC style request to the injected provider.
///
/// `params` is a JSON array; the result is whatever JSON value the wallet
/// hands back (account lists, hex blobs, receipt objects, `null`).
pub async fn request(method: &str, params: Value) -> Result<Value, ProviderError> {
    if !is_available() {
        return Err(ProviderError::Missing);
    }

    let payload = RpcPayload {
        method,
        params: &params,
    };
    // serde-wasm-bindgen maps serde maps to ES Maps by default; the provider
    // wants plain objects, hence the JSON-compatible serializer.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let payload = payload
        .serialize(&serializer)
        .map_err(|err| ProviderError::Call(err.to_string()))?;

    let result = ethereumRequest(payload).await.map_err(decode_js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|err| ProviderError::Call(err.to_string()))
}

/// Accounts the wallet has already authorized for this origin. Never
/// prompts; an empty list means no authorization yet.
pub async fn authorized_accounts() -> Result<Vec<String>, ProviderError> {
    accounts("eth_accounts").await
}

/// Ask the wallet for account access, prompting the user if needed.
pub async fn request_accounts() -> Result<Vec<String>, ProviderError> {
    accounts("eth_requestAccounts").await
}

async fn accounts(method: &str) -> Result<Vec<String>, ProviderError> {
    let value = request(method, Value::Array(vec![])).await?;
    serde_json::from_value(value).map_err(|err| ProviderError::Call(err.to_string()))
}

/// Map a thrown JS value onto the error taxonomy. EIP-1193 uses code 4001
/// for a user rejection; everything else stays a plain call failure.
fn decode_js_error(err: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64());
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    match code {
        Some(code) if code == 4001.0 => ProviderError::Rejected(message),
        _ => ProviderError::Call(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rpc_payload_wire_shape() {
        let params = json!([{ "to": "0x0", "data": "0x" }, "latest"]);
        let payload = RpcPayload {
            method: "eth_call",
            params: &params,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "method": "eth_call",
                "params": [{ "to": "0x0", "data": "0x" }, "latest"],
            })
        );
    }

    #[test]
    fn test_rpc_payload_empty_params() {
        let params = json!([]);
        let payload = RpcPayload {
            method: "eth_accounts",
            params: &params,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "method": "eth_accounts", "params": [] })
        );
    }
}

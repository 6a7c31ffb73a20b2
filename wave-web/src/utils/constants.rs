//! Application constants

use alloy_primitives::{address, Address};

/// Deployed wave portal contract.
pub const CONTRACT_ADDRESS: Address = address!("b99ac7b8022d3292052202cf08968f10b8869c29");

/// Fixed gas ceiling for `wave` transactions.
pub const WAVE_GAS_LIMIT: u64 = 300_000;

// Polling cadence
pub const RECEIPT_POLL_INTERVAL_MS: u32 = 1_000;
pub const EVENT_POLL_INTERVAL_MS: u32 = 2_000;

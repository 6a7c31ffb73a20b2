//! # Shared Wave Portal Types
//!
//! Domain types and pure helpers used by the `wave-web` frontend. Everything
//! in this crate is target-independent: it compiles for the browser (WASM)
//! and natively, which is where the unit tests run.
//!
//! ## Structure
//!
//! - **[`dto`]**: domain records
//!   - **[`dto::wave::Wave`]**: one on-chain wave (sender, point-in-time, message)
//! - **[`utils`]**: display helpers
//!   - **[`utils::format_address`]**: format wallet addresses for display
//!   - **[`utils::truncate_address`]**: truncate addresses with ellipsis
//!   - **[`utils::time_ago`]**: relative "3 minutes ago" timestamps
//!
//! ## Usage in the frontend
//!
//! ```rust
//! use shared::{sort_newest_first, truncate_address, Wave};
//!
//! let mut waves = vec![
//!     Wave::from_contract("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into(), 10, "gm".into()),
//!     Wave::from_contract("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into(), 20, "wagmi".into()),
//! ];
//! sort_newest_first(&mut waves);
//! assert_eq!(waves[0].message, "wagmi");
//! assert_eq!(truncate_address(&waves[0].address), "0xd8dA...6045");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used items for convenience
pub use dto::*;
pub use utils::*;

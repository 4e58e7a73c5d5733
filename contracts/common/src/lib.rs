//! Star Notary Common Library
//!
//! Shared types, constants, and utilities for the Star Notary contracts.
//!
//! ## Components
//!
//! - **Types**: star tokens, contract actions and queries, payouts
//! - **Errors**: one revert enum with stable error codes
//! - **Events**: typed contract events and the per-call event log
//! - **Ledger**: native account balances in wei
//! - **Math**: checked wei arithmetic and unit conversion
//!
//! This crate is `no_std` compatible when built without the `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
pub use std::{collections::BTreeMap, string::String, vec::Vec};

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod ledger;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use ledger::*;

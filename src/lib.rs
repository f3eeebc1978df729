//! Token-Ledger: a fixed-supply fungible-token ledger in Rust
//!
//! This crate provides the accounting core of a standard fungible
//! token, featuring:
//! - Per-account balance tracking with conservation of total supply
//! - Direct transfers between accounts
//! - Two-step delegated transfers (approve, then transfer_from) with
//!   allowance consumption
//! - An append-only event log (Transfer / Approval)
//! - JSON persistence with rotating backups
//!
//! # Example
//!
//! ```rust
//! use token_ledger::ledger::{units, Address, Ledger};
//!
//! let deployer = Address::from_bytes([1u8; 20]);
//! let exchange = Address::from_bytes([2u8; 20]);
//! let receiver = Address::from_bytes([3u8; 20]);
//!
//! let mut ledger = Ledger::create(
//!     "Snarfcoin".to_string(),
//!     "SNARF".to_string(),
//!     units(1_000_000),
//!     deployer,
//! ).unwrap();
//!
//! // Direct transfer
//! ledger.transfer(&deployer, &receiver, units(100)).unwrap();
//!
//! // Delegated transfer
//! ledger.approve(&deployer, &exchange, units(50)).unwrap();
//! ledger.transfer_from(&exchange, &deployer, &receiver, units(50)).unwrap();
//!
//! assert_eq!(ledger.balance_of(&receiver), units(150));
//! assert_eq!(ledger.circulating(), ledger.total_supply());
//! ```

pub mod cli;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use ledger::{
    units, Address, ApprovalEvent, Ledger, LedgerError, LedgerEvent, LedgerMetadata,
    TransferEvent, DECIMALS,
};
pub use storage::{LedgerStore, StorageError, StoreConfig};

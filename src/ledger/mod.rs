//! Fixed-supply fungible-token ledger
//!
//! Provides the accounting core of a standard fungible token:
//! - Balances per account
//! - Allowances for delegated transfers
//! - Transfer, approve and transfer_from operations
//! - An append-only event log
//!
//! # Example
//!
//! ```rust
//! use token_ledger::ledger::{units, Address, Ledger};
//!
//! let deployer = Address::from_bytes([1u8; 20]);
//! let receiver = Address::from_bytes([2u8; 20]);
//!
//! // Deploy with the whole supply credited to the deployer
//! let mut ledger = Ledger::create(
//!     "Snarfcoin".to_string(),
//!     "SNARF".to_string(),
//!     units(1_000_000),
//!     deployer,
//! ).unwrap();
//!
//! // Transfer tokens
//! ledger.transfer(&deployer, &receiver, units(100)).unwrap();
//! assert_eq!(ledger.balance_of(&receiver), units(100));
//! ```

pub mod address;
pub mod event;
pub mod ledger;

pub use address::{Address, AddressError};
pub use event::{ApprovalEvent, LedgerEvent, TransferEvent};
pub use ledger::{units, Ledger, LedgerError, LedgerMetadata, DECIMALS};

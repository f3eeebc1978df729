//! Ledger events
//!
//! Every mutating operation emits exactly one event. Events are both
//! returned to the caller and appended to the ledger's event log, so
//! collaborators (and tests) can observe mutations deterministically.

use crate::ledger::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emitted when value moves between accounts (including the initial
/// supply allocation, which transfers from the null address)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// Emitted when an owner sets a spender's allowance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// A single entry in the ledger's append-only event log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    Transfer(TransferEvent),
    Approval(ApprovalEvent),
}

impl TransferEvent {
    pub fn new(from: Address, to: Address, amount: u128) -> Self {
        Self {
            from,
            to,
            amount,
            timestamp: Utc::now(),
        }
    }
}

impl ApprovalEvent {
    pub fn new(owner: Address, spender: Address, amount: u128) -> Self {
        Self {
            owner,
            spender,
            amount,
            timestamp: Utc::now(),
        }
    }
}

//! Fungible-token ledger state machine
//!
//! Owns all balances and allowances for a single fixed-supply token.
//! Mutations are transfer, approve and transfer_from; every other
//! accessor is a read-only query. All precondition checks run before
//! any state is touched, so a failing operation never partially
//! applies.

use crate::ledger::address::Address;
use crate::ledger::event::{ApprovalEvent, LedgerEvent, TransferEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Decimal precision of all ledger amounts
pub const DECIMALS: u8 = 18;

/// Scale a whole-token count into base units (10^18 per token)
pub fn units(whole: u128) -> u128 {
    whole * 10u128.pow(DECIMALS as u32)
}

/// Ledger operation errors
///
/// All errors are deterministic functions of the current state and the
/// inputs; there is no transient failure class.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid sender: transfer from the null address")]
    InvalidSender,
    #[error("Invalid recipient: transfer to the null address")]
    InvalidRecipient,
    #[error("Invalid spender: approval for the null address")]
    InvalidSpender,
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
}

/// Ledger metadata (immutable after deployment)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerMetadata {
    /// Token name (e.g., "Snarfcoin")
    pub name: String,
    /// Token symbol (e.g., "SNARF")
    pub symbol: String,
    /// Decimal places, fixed at 18
    pub decimals: u8,
    /// Total supply in base units, fixed at deployment
    pub total_supply: u128,
    /// Timestamp of deployment
    pub deployed_at: DateTime<Utc>,
}

/// The token ledger: balances, allowances and the event log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ledger {
    /// Immutable token metadata
    pub metadata: LedgerMetadata,
    /// Balances: account -> amount (absent entries read as 0)
    balances: HashMap<Address, u128>,
    /// Allowances: owner -> (spender -> approved amount)
    allowances: HashMap<Address, HashMap<Address, u128>>,
    /// Append-only log of every emitted event
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Deploy a new ledger with the whole supply credited to
    /// `initial_holder`
    ///
    /// Emits the conventional mint-as-transfer event from the null
    /// address to the initial holder.
    pub fn create(
        name: String,
        symbol: String,
        total_supply: u128,
        initial_holder: Address,
    ) -> Result<Self, LedgerError> {
        if initial_holder.is_null() {
            return Err(LedgerError::InvalidRecipient);
        }
        if total_supply == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let mut balances = HashMap::new();
        balances.insert(initial_holder, total_supply);

        let mint = TransferEvent::new(Address::NULL, initial_holder, total_supply);

        Ok(Self {
            metadata: LedgerMetadata {
                name,
                symbol,
                decimals: DECIMALS,
                total_supply,
                deployed_at: Utc::now(),
            },
            balances,
            allowances: HashMap::new(),
            events: vec![LedgerEvent::Transfer(mint)],
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Decimal places
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Total supply in base units
    pub fn total_supply(&self) -> u128 {
        self.metadata.total_supply
    }

    /// Balance of an account (0 for accounts never seen)
    pub fn balance_of(&self, account: &Address) -> u128 {
        *self.balances.get(account).unwrap_or(&0)
    }

    /// Remaining amount `spender` may transfer on behalf of `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// All accounts with a non-zero balance
    pub fn holders(&self) -> Vec<(&Address, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    /// Number of accounts with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Sum of all balances
    ///
    /// Always equals `total_supply`; exposed so the conservation
    /// invariant stays auditable.
    pub fn circulating(&self) -> u128 {
        self.balances.values().sum()
    }

    /// Every event emitted since deployment, in order
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Structural validity of the ledger state
    ///
    /// Holds for every state reachable through the operations above;
    /// checked on externally supplied state (e.g. imported snapshots)
    /// before adopting it.
    pub fn is_valid(&self) -> bool {
        self.circulating() == self.total_supply() && self.balance_of(&Address::NULL) == 0
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Move `amount` base units from `sender` to `to`
    pub fn transfer(
        &mut self,
        sender: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<TransferEvent, LedgerError> {
        if sender.is_null() {
            return Err(LedgerError::InvalidSender);
        }
        if to.is_null() {
            return Err(LedgerError::InvalidRecipient);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let sender_balance = self.balance_of(sender);
        if sender_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: sender_balance,
                need: amount,
            });
        }

        *self.balances.entry(*sender).or_insert(0) -= amount;
        *self.balances.entry(*to).or_insert(0) += amount;

        let event = TransferEvent::new(*sender, *to, amount);
        self.events.push(LedgerEvent::Transfer(event.clone()));

        log::debug!("transfer {} -> {} amount {}", sender, to, amount);

        Ok(event)
    }

    /// Authorize `spender` to transfer up to `amount` on behalf of
    /// `owner`
    ///
    /// The new allowance replaces any previous approval outright; it
    /// does not accumulate.
    pub fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<ApprovalEvent, LedgerError> {
        if spender.is_null() {
            return Err(LedgerError::InvalidSpender);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);

        let event = ApprovalEvent::new(*owner, *spender, amount);
        self.events.push(LedgerEvent::Approval(event.clone()));

        log::debug!("approve {} -> {} amount {}", owner, spender, amount);

        Ok(event)
    }

    /// Move `amount` base units from `owner` to `to` on the authority
    /// of `spender`'s allowance, consuming that allowance
    ///
    /// Consuming the allowance down to exactly 0 is a valid post-state.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<TransferEvent, LedgerError> {
        if owner.is_null() {
            return Err(LedgerError::InvalidSender);
        }
        if to.is_null() {
            return Err(LedgerError::InvalidRecipient);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let owner_balance = self.balance_of(owner);
        if owner_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: owner_balance,
                need: amount,
            });
        }

        let approved = self.allowance(owner, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: approved,
                need: amount,
            });
        }

        *self.balances.entry(*owner).or_insert(0) -= amount;
        *self.balances.entry(*to).or_insert(0) += amount;

        if let Some(spenders) = self.allowances.get_mut(owner) {
            if let Some(remaining) = spenders.get_mut(spender) {
                *remaining -= amount;
            }
        }

        let event = TransferEvent::new(*owner, *to, amount);
        self.events.push(LedgerEvent::Transfer(event.clone()));

        log::debug!(
            "transfer_from spender {} owner {} -> {} amount {}",
            spender,
            owner,
            to,
            amount
        );

        Ok(event)
    }
}

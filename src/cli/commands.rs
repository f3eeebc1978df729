//! CLI commands for the ledger
//!
//! Implements all command handlers for the CLI interface.

use crate::ledger::{Address, Ledger, LedgerEvent};
use crate::storage::{LedgerStore, StoreConfig};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub ledger: Ledger,
    pub store: LedgerStore,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load the deployed ledger from the data directory
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let store_config = StoreConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };

        let store = LedgerStore::new(store_config)?;

        if !store.exists() {
            return Err(format!(
                "No ledger deployed at {:?}. Run `ledger deploy` first.",
                data_dir
            )
            .into());
        }

        let ledger = store.load()?;

        Ok(Self {
            ledger,
            store,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.store.save(&self.ledger)?;
        Ok(())
    }
}

/// Deploy a new ledger
pub fn cmd_deploy(
    data_dir: &PathBuf,
    name: &str,
    symbol: &str,
    supply: u128,
    holder: &Address,
) -> CliResult<()> {
    let store_config = StoreConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    };

    let store = LedgerStore::new(store_config)?;

    if store.exists() {
        println!("⚠️  A ledger already exists at {:?}", data_dir);
        println!("   Delete the data directory to redeploy (this will erase all balances)");
        return Ok(());
    }

    let ledger = Ledger::create(name.to_string(), symbol.to_string(), supply, *holder)?;
    store.save(&ledger)?;

    log::info!("Ledger deployed: {} ({})", ledger.name(), ledger.symbol());

    println!("✅ Ledger deployed!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🪙 Token: {} ({})", ledger.name(), ledger.symbol());
    println!("   🔢 Decimals: {}", ledger.decimals());
    println!("   💰 Total supply: {} (all credited to {})", supply, holder);

    Ok(())
}

/// Show ledger metadata
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let ledger = &state.ledger;

    println!("🪙 {} ({})", ledger.name(), ledger.symbol());
    println!("   Decimals: {}", ledger.decimals());
    println!("   Total supply: {}", ledger.total_supply());
    println!("   Holders: {}", ledger.holder_count());
    println!("   Events: {}", ledger.events().len());
    println!(
        "   Deployed: {}",
        ledger.metadata.deployed_at.format("%Y-%m-%d %H:%M:%S")
    );

    let stats = state.store.stats()?;
    println!("   Storage: {} bytes, {} backup(s)", stats.file_size, stats.backup_count);

    Ok(())
}

/// Show an account balance
pub fn cmd_balance(state: &AppState, account: &Address) -> CliResult<()> {
    let balance = state.ledger.balance_of(account);
    println!("💰 Balance for {}", account);
    println!("   {} base units", balance);
    Ok(())
}

/// Show the allowance from an owner to a spender
pub fn cmd_allowance(state: &AppState, owner: &Address, spender: &Address) -> CliResult<()> {
    let allowance = state.ledger.allowance(owner, spender);
    println!("🔓 Allowance {} -> {}", owner, spender);
    println!("   {} base units", allowance);
    Ok(())
}

/// Transfer tokens between accounts
pub fn cmd_transfer(
    state: &mut AppState,
    from: &Address,
    to: &Address,
    amount: u128,
) -> CliResult<()> {
    let event = state.ledger.transfer(from, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} base units", event.amount);
    println!("   {} -> {}", event.from, event.to);
    println!("   New sender balance: {}", state.ledger.balance_of(from));

    Ok(())
}

/// Approve a spender
pub fn cmd_approve(
    state: &mut AppState,
    owner: &Address,
    spender: &Address,
    amount: u128,
) -> CliResult<()> {
    let event = state.ledger.approve(owner, spender, amount)?;
    state.save()?;

    println!("✅ Approved {} base units", event.amount);
    println!("   Owner: {}", event.owner);
    println!("   Spender: {}", event.spender);

    Ok(())
}

/// Delegated transfer on an owner's behalf
pub fn cmd_transfer_from(
    state: &mut AppState,
    spender: &Address,
    owner: &Address,
    to: &Address,
    amount: u128,
) -> CliResult<()> {
    let event = state.ledger.transfer_from(spender, owner, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} base units (delegated)", event.amount);
    println!("   {} -> {}", event.from, event.to);
    println!(
        "   Remaining allowance: {}",
        state.ledger.allowance(owner, spender)
    );

    Ok(())
}

/// Show recent ledger events
pub fn cmd_events(state: &AppState, count: usize) -> CliResult<()> {
    let events = state.ledger.events();

    println!("📜 Ledger events ({} total):", events.len());
    for event in events.iter().rev().take(count) {
        match event {
            LedgerEvent::Transfer(e) => {
                println!(
                    "   Transfer | {} -> {} | {} | {}",
                    e.from,
                    e.to,
                    e.amount,
                    e.timestamp.format("%Y-%m-%d %H:%M:%S")
                );
            }
            LedgerEvent::Approval(e) => {
                println!(
                    "   Approval | {} -> {} | {} | {}",
                    e.owner,
                    e.spender,
                    e.amount,
                    e.timestamp.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }

    Ok(())
}

/// List all accounts with a non-zero balance
pub fn cmd_holders(state: &AppState) -> CliResult<()> {
    let mut holders = state.ledger.holders();
    holders.sort_by(|a, b| b.1.cmp(a.1));

    println!("📋 Holders ({}):", holders.len());
    for (account, balance) in holders {
        println!("   {} - {} base units", account, balance);
    }

    Ok(())
}

/// Export the ledger to file
pub fn cmd_export(state: &AppState, path: &PathBuf) -> CliResult<()> {
    crate::storage::save_to_file(&state.ledger, path)?;
    println!("📦 Ledger exported to {:?}", path);
    Ok(())
}

/// Import a ledger from file
pub fn cmd_import(state: &mut AppState, path: &PathBuf) -> CliResult<()> {
    let ledger = crate::storage::load_from_file(path)?;

    if !ledger.is_valid() {
        println!("❌ Imported ledger is invalid!");
        println!("   Balances must sum to the total supply and the null address must hold 0.");
        return Ok(());
    }

    state.ledger = ledger;
    state.save()?;

    println!("📥 Ledger imported from {:?}", path);
    println!("   Holders: {}", state.ledger.holder_count());

    Ok(())
}

//! Ledger CLI Application
//!
//! A command-line interface for deploying and operating a
//! fixed-supply fungible-token ledger.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_ledger::cli::{self, AppState};
use token_ledger::ledger::Address;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "A fixed-supply fungible-token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new ledger (one-time)
    Deploy {
        /// Token name
        #[arg(long)]
        name: String,

        /// Token symbol
        #[arg(long)]
        symbol: String,

        /// Total supply in base units (fixed forever)
        #[arg(long)]
        supply: u128,

        /// Account credited with the whole supply
        #[arg(long)]
        holder: Address,
    },

    /// Show ledger metadata
    Info,

    /// Show an account balance
    Balance {
        /// Account address
        #[arg(short, long)]
        account: Address,
    },

    /// Show the approved amount from an owner to a spender
    Allowance {
        /// Owner address
        #[arg(long)]
        owner: Address,

        /// Spender address
        #[arg(long)]
        spender: Address,
    },

    /// Transfer tokens between accounts
    Transfer {
        /// Sender address
        #[arg(short, long)]
        from: Address,

        /// Recipient address
        #[arg(short, long)]
        to: Address,

        /// Amount in base units
        #[arg(short, long)]
        amount: u128,
    },

    /// Approve a spender to transfer on the owner's behalf
    Approve {
        /// Owner address
        #[arg(long)]
        owner: Address,

        /// Spender address
        #[arg(long)]
        spender: Address,

        /// Amount in base units (overwrites any previous approval)
        #[arg(short, long)]
        amount: u128,
    },

    /// Delegated transfer using a previously approved allowance
    TransferFrom {
        /// Spender address (must hold an allowance)
        #[arg(long)]
        spender: Address,

        /// Owner address whose balance is debited
        #[arg(long)]
        owner: Address,

        /// Recipient address
        #[arg(short, long)]
        to: Address,

        /// Amount in base units
        #[arg(short, long)]
        amount: u128,
    },

    /// Show recent ledger events
    Events {
        /// Number of events to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// List all accounts with a non-zero balance
    Holders,

    /// Export the ledger to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import a ledger from a file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle deploy separately (doesn't need an existing ledger)
    if let Commands::Deploy {
        ref name,
        ref symbol,
        supply,
        ref holder,
    } = cli.command
    {
        return cli::cmd_deploy(&cli.data_dir, name, symbol, supply, holder);
    }

    // Load the deployed ledger
    let mut state = AppState::load(cli.data_dir.clone())?;

    match cli.command {
        Commands::Deploy { .. } => unreachable!(),

        Commands::Info => cli::cmd_info(&state)?,

        Commands::Balance { account } => cli::cmd_balance(&state, &account)?,

        Commands::Allowance { owner, spender } => {
            cli::cmd_allowance(&state, &owner, &spender)?;
        }

        Commands::Transfer { from, to, amount } => {
            cli::cmd_transfer(&mut state, &from, &to, amount)?;
        }

        Commands::Approve {
            owner,
            spender,
            amount,
        } => {
            cli::cmd_approve(&mut state, &owner, &spender, amount)?;
        }

        Commands::TransferFrom {
            spender,
            owner,
            to,
            amount,
        } => {
            cli::cmd_transfer_from(&mut state, &spender, &owner, &to, amount)?;
        }

        Commands::Events { count } => cli::cmd_events(&state, count)?,

        Commands::Holders => cli::cmd_holders(&state)?,

        Commands::Export { output } => cli::cmd_export(&state, &output)?,

        Commands::Import { input } => cli::cmd_import(&mut state, &input)?,
    }

    Ok(())
}

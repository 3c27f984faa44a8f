//! CLI argument definitions for `balance`.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `coins` | List coins supported by the exchange |
//! | `quote` | Quote a cross-currency transfer |
//! | `transfer` | Create the exchange order and record the withdrawal to make |
//!
//! # Examples
//!
//! ```bash
//! balance coins --pretty
//! balance quote BTC ETH 0.5 --address 0xabc
//! BALANCE_SHAPESHIFT_API_KEY=... balance transfer BTC ETH 0.5 --address 0xabc
//! ```

use clap::{Args, Parser, Subcommand};

/// Move funds between cryptocurrencies through an exchange provider.
#[derive(Debug, Parser)]
#[command(name = "balance", author, version, about = "Cross-currency transfers for Balance")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Exchange request timeout in milliseconds (overrides BALANCE_SHAPESHIFT_TIMEOUT_MS).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Exchange API base URL (overrides BALANCE_SHAPESHIFT_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List coins supported by the exchange.
    Coins,

    /// Resolve the trading pair and quote what the recipient would receive.
    ///
    /// # Examples
    ///
    ///   balance quote BTC ETH 0.5 --address 0xabc
    Quote(TransferArgs),

    /// Create an exchange order and record the withdrawal that funds it.
    ///
    /// The output names the deposit address and amount to send from the
    /// source wallet.
    Transfer(TransferArgs),
}

/// Arguments shared by `quote` and `transfer`.
#[derive(Debug, Args)]
pub struct TransferArgs {
    /// Currency to send (e.g. BTC).
    pub from: String,

    /// Currency the recipient receives (e.g. ETH).
    pub to: String,

    /// Amount of the source currency.
    pub amount: String,

    /// Recipient address for the converted funds.
    #[arg(long)]
    pub address: String,

    /// Label of the source account in logs.
    #[arg(long, default_value = "manual")]
    pub account: String,
}

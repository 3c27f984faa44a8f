//! # Balance Transfer
//!
//! Cross-currency transfer orchestration for the Balance finance tracker.
//!
//! ## Overview
//!
//! Moving an amount of one currency into a different currency at a recipient
//! address is a multi-step negotiation with an exchange provider:
//!
//! 1. **Resolve** the provider's tradable pair for (source, recipient)
//! 2. **Quote** the expected recipient amount at live market rates
//! 3. **Execute** by creating an exchange order and withdrawing the deposit
//!    amount from the source account into the order's deposit address
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`account`] | Source account contract and manual account |
//! | [`config`] | Exchange client configuration from the environment |
//! | [`domain`] | Currencies, requests, pairs, quotes, orders, withdrawals |
//! | [`error`] | Validation, transport and transfer errors |
//! | [`exchange`] | Exchange API contract and the ShapeShift client |
//! | [`executor`] | Order creation followed by withdrawal |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`orchestrator`] | Per-request lifecycle with cached pair resolution |
//! | [`quote`] | Quote negotiation against market information |
//! | [`resolver`] | Currency pair resolution |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use balance_transfer::{
//!     Currency, ExchangeConfig, ManualAccount, TransferOrchestrator, TransferRequest,
//! };
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = TransferRequest::new(
//!         Arc::new(ManualAccount::new("wallet")),
//!         Currency::parse("BTC")?,
//!         Currency::parse("ETH")?,
//!         dec!(0.5),
//!         "0xabc",
//!     )?;
//!     let orchestrator = TransferOrchestrator::shapeshift(request, &ExchangeConfig::from_env()?);
//!
//!     let quote = orchestrator.fetch_quote().await?;
//!     println!("recipient receives {}", quote.recipient_amount());
//!
//!     let receipt = orchestrator.perform_transfer().await?;
//!     println!("order {}", receipt.transaction.order_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every orchestration operation returns [`TransferError`]. Use
//! [`TransferError::category`] to tell input problems from exchange outages
//! and from the partial state where an order exists but nothing was sent:
//!
//! ```rust
//! use balance_transfer::{TransferError, TransferErrorCategory};
//!
//! fn handle(error: &TransferError) -> &'static str {
//!     match error.category() {
//!         TransferErrorCategory::InputRejected => "fix the request",
//!         TransferErrorCategory::External => "try again later",
//!         TransferErrorCategory::PartialFailure => "manual intervention required",
//!     }
//! }
//! ```

pub mod account;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod executor;
pub mod http_client;
pub mod orchestrator;
pub mod quote;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use account::{ManualAccount, SourceAccount};
pub use config::ExchangeConfig;
pub use domain::{
    Coin, CoinPair, Currency, CurrencySide, MarketInformation, TransactionRequest, TransferQuote,
    TransferRequest, Withdrawal,
};
pub use error::{
    AccountError, ExchangeError, ExchangeErrorKind, QuoteRejection, TransferError,
    TransferErrorCategory, ValidationError,
};
pub use exchange::{ExchangeApi, ShapeShiftClient};
pub use executor::{TransferExecutor, TransferReceipt};
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use orchestrator::{TransferOperator, TransferOrchestrator};
pub use quote::QuoteNegotiator;
pub use resolver::PairResolver;

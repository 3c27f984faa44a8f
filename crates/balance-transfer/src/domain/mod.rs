//! # Domain Models
//!
//! Canonical transfer types with built-in validation.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Currency`] | Validated currency code |
//! | [`TransferRequest`] | Immutable description of one transfer |
//! | [`Coin`] / [`CoinPair`] | Provider coins and their tradable pair |
//! | [`MarketInformation`] | Live rate and limits for a pair |
//! | [`TransferQuote`] | Expected recipient amount, rejected outside limits |
//! | [`TransactionRequest`] | Provider order with deposit instructions |
//! | [`Withdrawal`] | Instruction sent to the source account |

mod currency;
mod models;
mod request;

pub use currency::{Currency, CurrencySide};
pub use models::{Coin, CoinPair, MarketInformation, TransactionRequest, TransferQuote, Withdrawal};
pub use request::TransferRequest;

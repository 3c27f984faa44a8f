//! Exchange API client contract.
//!
//! The orchestration core talks to the exchange provider only through
//! [`ExchangeApi`]. The wire protocol belongs to the implementation
//! ([`ShapeShiftClient`]); every call returns exactly one of a result or an
//! [`ExchangeError`](crate::ExchangeError).

mod shapeshift;

use std::future::Future;
use std::pin::Pin;

use rust_decimal::Decimal;

use crate::{Coin, CoinPair, ExchangeError, MarketInformation, TransactionRequest};

pub use shapeshift::ShapeShiftClient;

/// Exchange provider operations used by pair resolution, quoting and execution.
///
/// Implementations must be `Send + Sync`; one client is shared by every
/// component of an orchestrator.
pub trait ExchangeApi: Send + Sync {
    /// Fetches the full list of coins the provider supports.
    fn fetch_supported_coins<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Coin>, ExchangeError>> + Send + 'a>>;

    /// Fetches the current rate and deposit limits for `pair`.
    fn fetch_market_information<'a>(
        &'a self,
        pair: &'a CoinPair,
    ) -> Pin<Box<dyn Future<Output = Result<MarketInformation, ExchangeError>> + Send + 'a>>;

    /// Creates an exchange order that converts `amount` and pays out to `recipient_address`.
    ///
    /// `return_address` is where the provider refunds a failed or expired order.
    fn create_transaction<'a>(
        &'a self,
        amount: Decimal,
        recipient_address: &'a str,
        pair_code: &'a str,
        return_address: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TransactionRequest, ExchangeError>> + Send + 'a>>;
}
